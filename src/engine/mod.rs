pub mod config;
pub mod error;

pub use config::{Config, DisplayConfig, ThemeConfig, TimingConfig};
pub use error::{Result, SprError};
