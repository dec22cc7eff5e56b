use bevy::prelude::*;

use super::config::GameConfig;

/// Outcome of loading the config layers, kept until the logger is up.
#[derive(Resource, Debug, Clone, Default)]
pub struct ConfigReport {
    pub layers_used: Vec<String>,
    pub load_errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ConfigReport {
    pub fn new(cfg: &GameConfig, layers_used: Vec<String>, load_errors: Vec<String>) -> Self {
        Self {
            layers_used,
            load_errors,
            warnings: cfg.validate(),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.load_errors.is_empty() && self.warnings.is_empty()
    }
}

pub fn log_config_report(report: Option<Res<ConfigReport>>) {
    let Some(report) = report else { return };
    if report.layers_used.is_empty() {
        warn!(target: "config", "No config layers found; using built-in defaults");
    } else {
        info!(target: "config", "Config layers: {}", report.layers_used.join(" -> "));
    }
    for e in &report.load_errors {
        warn!(target: "config", "Config load error: {e}");
    }
    for w in &report.warnings {
        warn!(target: "config", "Config warning: {w}");
    }
}
