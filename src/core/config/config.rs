use bevy::prelude::*;
use serde::Deserialize;
use std::{fs, path::Path};

use crate::core::board::{BoardGeometry, SpawnRules, CAPACITY};

/// 8-bit sRGB triple, written `(r, g, b)` in RON.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn to_color(self) -> Color {
        Color::srgb_u8(self.0, self.1, self.2)
    }
}

#[derive(Debug, Deserialize, Resource, Clone, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
    pub title: String,
    /// Automatically close the app after this many seconds. 0.0 (or omitted) = run indefinitely.
    #[serde(rename = "autoClose")]
    pub auto_close: f32,
    /// PNG under `assets/` shown as the window icon. `None` keeps the platform default.
    pub icon_path: Option<String>,
}
impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 800.0,
            title: "2048".into(),
            auto_close: 0.0,
            icon_path: Some("icons/2048.png".into()),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct StyleConfig {
    pub background: Rgb,
    pub outline: Rgb,
    pub outline_thickness: f32,
    pub font_color: Rgb,
    pub font_size: f32,
    /// Font file under `assets/`. `None` uses the bundled default font.
    pub font_path: Option<String>,
}
impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            background: Rgb(205, 193, 180),
            outline: Rgb(187, 173, 160),
            outline_thickness: 10.0,
            font_color: Rgb(119, 110, 101),
            font_size: 80.0,
            font_path: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AnimationConfig {
    /// Animation frames per second (fixed timestep rate).
    pub fps: f32,
    /// Pixels a tile slides per animation frame.
    pub move_velocity: f32,
}
impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            fps: 130.0,
            move_velocity: 20.0,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SpawnConfig {
    pub initial_tiles: usize,
    pub initial_value: u32,
    /// Chance a post-move tile is a 4. 0.5 = uniform between 2 and 4.
    pub four_probability: f64,
    /// Fixed RNG seed for reproducible sessions; `None` seeds from entropy.
    pub seed: Option<u64>,
}
impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            initial_tiles: 2,
            initial_value: 2,
            four_probability: 0.5,
            seed: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct GameOverConfig {
    pub message: String,
    /// Seconds the message stays up before the app exits.
    pub display_secs: f32,
}
impl Default for GameOverConfig {
    fn default() -> Self {
        Self {
            message: "Game Over!".into(),
            display_secs: 2.5,
        }
    }
}

#[derive(Debug, Deserialize, Resource, Clone, Default, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    pub window: WindowConfig,
    pub style: StyleConfig,
    pub animation: AnimationConfig,
    pub spawn: SpawnConfig,
    pub game_over: GameOverConfig,
}

impl GameConfig {
    pub fn geometry(&self) -> BoardGeometry {
        BoardGeometry::new(
            self.window.width,
            self.window.height,
            self.animation.move_velocity,
        )
    }

    pub fn spawn_rules(&self) -> SpawnRules {
        SpawnRules {
            four_probability: self.spawn.four_probability,
        }
    }

    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, String> {
        let data = fs::read_to_string(&path).map_err(|e| format!("read config: {e}"))?;
        ron::from_str(&data).map_err(|e| format!("parse RON: {e}"))
    }

    pub fn load_or_default(path: impl AsRef<Path>) -> (Self, Option<String>) {
        match Self::load_from_file(&path) {
            Ok(cfg) => (cfg, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    /// Load multiple config layers, later files overriding earlier ones (deep merge).
    /// Missing files are skipped; returns (config, list_of_layer_paths_used, list_of_errors).
    pub fn load_layered<P, I>(paths: I) -> (Self, Vec<String>, Vec<String>)
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = P>,
    {
        use ron::value::Value;
        let mut merged: Option<Value> = None;
        let mut used = Vec::new();
        let mut errors = Vec::new();

        for p in paths {
            let path_ref = p.as_ref();
            if !path_ref.exists() {
                continue;
            }
            match fs::read_to_string(path_ref) {
                Ok(txt) => match ron::from_str::<Value>(&txt) {
                    Ok(val) => {
                        if let Some(cur) = &mut merged {
                            merge_value(cur, val);
                        } else {
                            merged = Some(val);
                        }
                        used.push(path_ref.display().to_string());
                    }
                    Err(e) => errors.push(format!("{}: parse error: {e}", path_ref.display())),
                },
                Err(e) => errors.push(format!("{}: read error: {e}", path_ref.display())),
            }
        }

        match merged {
            Some(val) => match val.into_rust::<GameConfig>() {
                Ok(cfg) => (cfg, used, errors),
                Err(e) => {
                    errors.push(format!(
                        "failed to deserialize merged config; using defaults: {e}"
                    ));
                    (GameConfig::default(), used, errors)
                }
            },
            None => (GameConfig::default(), used, errors),
        }
    }

    /// Validate the configuration returning a list of human‑readable warning strings.
    /// These represent suspicious values but are not hard errors; log each with `warn!`.
    pub fn validate(&self) -> Vec<String> {
        let mut w = Vec::new();
        if self.window.width <= 0.0 || self.window.height <= 0.0 {
            w.push("window dimensions must be > 0".into());
        }
        if (self.window.width - self.window.height).abs() > f32::EPSILON {
            w.push(format!(
                "window {}x{} is not square; cells will be stretched",
                self.window.width, self.window.height
            ));
        }
        if self.window.auto_close < 0.0 {
            w.push(format!(
                "window.autoClose {} negative -> treated as disabled (should be >= 0)",
                self.window.auto_close
            ));
        }
        if self.style.outline_thickness < 0.0 {
            w.push("style.outline_thickness negative".into());
        }
        if self.style.font_size <= 0.0 {
            w.push(format!("style.font_size {} must be > 0", self.style.font_size));
        }
        if self.animation.fps <= 0.0 {
            w.push(format!("animation.fps {} must be > 0", self.animation.fps));
        } else if self.animation.fps > 1000.0 {
            w.push(format!("animation.fps {} very high", self.animation.fps));
        }
        let geometry = self.geometry();
        let v = self.animation.move_velocity;
        if v <= 0.0 {
            w.push(format!(
                "animation.move_velocity {v} must be > 0 (clamped to {})",
                geometry.step
            ));
        } else if v > geometry.cell_width.min(geometry.cell_height) {
            w.push(format!(
                "animation.move_velocity {v} exceeds the cell size (clamped to {})",
                geometry.step
            ));
        } else if geometry.cell_width % v != 0.0 || geometry.cell_height % v != 0.0 {
            w.push(format!(
                "animation.move_velocity {v} does not divide the cell size {}x{}; tiles snap into place when a move settles",
                geometry.cell_width, geometry.cell_height
            ));
        }
        if self.spawn.initial_tiles > CAPACITY {
            w.push(format!(
                "spawn.initial_tiles {} exceeds board capacity {CAPACITY}",
                self.spawn.initial_tiles
            ));
        }
        if self.spawn.initial_value < 2 || !self.spawn.initial_value.is_power_of_two() {
            w.push(format!(
                "spawn.initial_value {} must be a power of two >= 2 (using 2)",
                self.spawn.initial_value
            ));
        }
        if !(0.0..=1.0).contains(&self.spawn.four_probability) {
            w.push(format!(
                "spawn.four_probability {} outside 0..1 (clamped)",
                self.spawn.four_probability
            ));
        }
        if self.game_over.display_secs < 0.0 {
            w.push("game_over.display_secs negative -> exits immediately".into());
        }
        w
    }
}

fn merge_value(base: &mut ron::value::Value, overlay: ron::value::Value) {
    use ron::value::Value;
    match (base, overlay) {
        (Value::Map(bm), Value::Map(om)) => {
            for (k, v) in om.into_iter() {
                let mut incoming = Some(v);
                for (ek, ev) in bm.iter_mut() {
                    if *ek == k {
                        if let Some(val) = incoming.take() {
                            merge_value(ev, val);
                        }
                        break;
                    }
                }
                if let Some(val) = incoming {
                    bm.insert(k, val);
                }
            }
        }
        (b, o) => *b = o,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parse_sample_config() {
        let sample = r#"(
            window: (width: 800.0, height: 800.0, title: "Test"),
            style: (
                background: (10, 20, 30),
                outline: (1, 2, 3),
                outline_thickness: 6.0,
                font_color: (119, 110, 101),
                font_size: 64.0,
            ),
            animation: (fps: 60.0, move_velocity: 40.0),
            spawn: (initial_tiles: 3, initial_value: 2, four_probability: 0.1, seed: Some(42)),
            game_over: (message: "Done", display_secs: 1.0),
        )"#;
        let mut file = tempfile::NamedTempFile::new().expect("tmp file");
        file.write_all(sample.as_bytes()).unwrap();
        let cfg = GameConfig::load_from_file(file.path()).expect("parse config");
        assert_eq!(cfg.window.title, "Test");
        assert_eq!(cfg.style.background, Rgb(10, 20, 30));
        assert_eq!(cfg.style.font_path, None);
        assert_eq!(cfg.animation.move_velocity, 40.0);
        assert_eq!(cfg.spawn.seed, Some(42));
        assert_eq!(cfg.spawn.initial_tiles, 3);
        assert_eq!(cfg.game_over.message, "Done");
        assert!(
            cfg.validate().is_empty(),
            "expected no validation warnings for sample config: {:?}",
            cfg.validate()
        );
    }

    #[test]
    fn defaults_match_classic_board() {
        let cfg = GameConfig::default();
        let g = cfg.geometry();
        assert_eq!((g.cell_width, g.cell_height, g.step), (200.0, 200.0, 20.0));
        assert_eq!(cfg.animation.fps, 130.0);
        assert_eq!(cfg.spawn_rules().four_probability, 0.5);
        assert!(cfg.validate().is_empty());
    }

    #[test]
    fn validate_detects_warnings() {
        let bad = GameConfig {
            window: WindowConfig {
                width: -100.0,
                height: 0.0,
                title: "Bad".into(),
                auto_close: -1.0,
                icon_path: None,
            },
            style: StyleConfig {
                font_size: 0.0,
                outline_thickness: -2.0,
                ..Default::default()
            },
            animation: AnimationConfig {
                fps: 0.0,
                move_velocity: -5.0,
            },
            spawn: SpawnConfig {
                initial_tiles: 40,
                initial_value: 3,
                four_probability: 1.5,
                seed: None,
            },
            game_over: GameOverConfig {
                message: String::new(),
                display_secs: -1.0,
            },
        };
        let warnings = bad.validate();
        let joined = warnings.join(" | ");
        assert!(joined.contains("window dimensions must be > 0"));
        assert!(joined.contains("window.autoClose"));
        assert!(joined.contains("style.font_size"));
        assert!(joined.contains("animation.fps"));
        assert!(joined.contains("animation.move_velocity"));
        assert!(joined.contains("spawn.initial_tiles"));
        assert!(joined.contains("spawn.initial_value"));
        assert!(joined.contains("spawn.four_probability"));
        assert!(joined.contains("game_over.display_secs"));
        assert!(warnings.len() >= 10, "expected many warnings, got {}: {joined}", warnings.len());
    }

    #[test]
    fn velocity_not_dividing_cells_warns() {
        let mut cfg = GameConfig::default();
        cfg.animation.move_velocity = 30.0;
        assert!(cfg.validate().iter().any(|w| w.contains("does not divide")));
    }

    #[test]
    fn load_or_default_missing_file() {
        let (cfg, err) = GameConfig::load_or_default("this/file/does/not/exist.ron");
        assert!(err.is_some());
        assert_eq!(cfg, GameConfig::default());
    }

    #[test]
    fn layered_merge_overrides() {
        let base = r"(
            window: (width: 600.0, height: 600.0),
            animation: (fps: 60.0),
        )";
        let override_one = r#"(
            window: (title: "Local"),
            animation: (move_velocity: 15.0),
        )"#;
        let mut f1 = tempfile::NamedTempFile::new().unwrap();
        let mut f2 = tempfile::NamedTempFile::new().unwrap();
        f1.write_all(base.as_bytes()).unwrap();
        f2.write_all(override_one.as_bytes()).unwrap();
        let (cfg, used, errors) = GameConfig::load_layered([f1.path(), f2.path()]);
        assert!(errors.is_empty(), "unexpected errors: {errors:?}");
        assert_eq!(used.len(), 2);
        assert_eq!(cfg.window.width, 600.0); // from base
        assert_eq!(cfg.window.title, "Local"); // overridden
        assert_eq!(cfg.animation.fps, 60.0); // untouched by overlay
        assert_eq!(cfg.animation.move_velocity, 15.0);
        assert_eq!(cfg.style, StyleConfig::default());
    }

    #[test]
    fn layered_skips_missing_and_reports_parse_errors() {
        let mut broken = tempfile::NamedTempFile::new().unwrap();
        broken.write_all(b"(window: (width: ").unwrap();
        let (cfg, used, errors) = GameConfig::load_layered([
            std::path::Path::new("no/such/layer.ron"),
            broken.path(),
        ]);
        assert!(used.is_empty());
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("parse error"));
        assert_eq!(cfg, GameConfig::default());
    }

    #[test]
    fn parse_autoclose() {
        let sample = r"(window: (autoClose: 3.25))";
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(sample.as_bytes()).unwrap();
        let cfg = GameConfig::load_from_file(file.path()).expect("parse config");
        assert!((cfg.window.auto_close - 3.25).abs() < 1e-6);
        assert_eq!(cfg.window.width, 800.0);
    }
}
