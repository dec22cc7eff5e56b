#[allow(clippy::module_inception)]
pub mod config;
pub mod report;

pub use config::{
    AnimationConfig, GameConfig, GameOverConfig, Rgb, SpawnConfig, StyleConfig, WindowConfig,
};
pub use report::ConfigReport;
