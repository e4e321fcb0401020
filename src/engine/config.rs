// Configuration for spr pacing, theme and display
// Every field has a default so a partial config.toml is valid

use super::error::{Result, SprError};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_DIR: &str = "spr";
const CONFIG_FILE: &str = "config.toml";

/// Pacing constants and speed bounds
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Words per minute reading speed (default 300)
    pub wpm: u32,

    /// Minimum and maximum allowed WPM
    pub min_wpm: u32,
    pub max_wpm: u32,

    /// WPM change per keypress
    pub wpm_step: u32,

    /// Initial rate multiplier and its keyboard bounds
    pub rate: f64,
    pub rate_step: f64,
    pub min_rate: f64,
    pub max_rate: f64,

    /// Extra time for sentence-ending units (default +30%)
    pub sentence_pause: f64,

    /// Extra time for clause-ending units (default +15%)
    pub clause_pause: f64,

    /// Long word bonus: +long_word_bonus per long_word_step chars past long_word_baseline
    pub long_word_baseline: usize,
    pub long_word_step: usize,
    pub long_word_bonus: f64,

    /// No unit is ever shown for less than this
    pub min_duration_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            wpm: 300,
            min_wpm: 50,
            max_wpm: 1000,
            wpm_step: 25,
            rate: 1.0,
            rate_step: 0.1,
            min_rate: 0.25,
            max_rate: 4.0,
            sentence_pause: 0.30,
            clause_pause: 0.15,
            long_word_baseline: 6,
            long_word_step: 4,
            long_word_bonus: 0.10,
            min_duration_ms: 30,
        }
    }
}

impl TimingConfig {
    pub fn clamp_wpm(&self, wpm: u32) -> u32 {
        wpm.clamp(self.min_wpm.max(1), self.max_wpm.max(self.min_wpm.max(1)))
    }

    pub fn clamp_rate(&self, rate: f64) -> f64 {
        rate.clamp(self.min_rate, self.max_rate.max(self.min_rate))
    }
}

/// Theme colors as hex strings (Midnight palette)
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub background_color: String,
    pub text_color: String,
    pub anchor_color: String,
    pub dimmed_color: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            background_color: "#1A1B26".to_string(),
            text_color: "#A9B1D6".to_string(),
            anchor_color: "#F7768E".to_string(),
            dimmed_color: "#646E96".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub show_progress_bar: bool,

    /// Dimmed words on either side of the current unit
    pub show_context: bool,
    pub context_words: usize,

    /// Draw in a small inline viewport instead of the alternate screen
    pub inline: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            show_progress_bar: true,
            show_context: true,
            context_words: 3,
            inline: false,
        }
    }
}

/// Master configuration combining all spr settings
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub timing: TimingConfig,
    pub theme: ThemeConfig,
    pub display: DisplayConfig,
}

impl Config {
    /// `<config dir>/spr/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Loads the default config file, falling back to defaults when it does not exist.
    pub fn load() -> Result<Self> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            SprError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config = Self::parse(&contents)?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn parse(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let timing = &self.timing;
        if timing.min_wpm == 0 || timing.min_wpm > timing.max_wpm {
            return Err(SprError::Config(format!(
                "invalid wpm range {}..={}",
                timing.min_wpm, timing.max_wpm
            )));
        }
        if !(timing.min_rate > 0.0) || timing.min_rate > timing.max_rate {
            return Err(SprError::Config(format!(
                "invalid rate range {}..={}",
                timing.min_rate, timing.max_rate
            )));
        }
        if !(timing.rate > 0.0) || !timing.rate.is_finite() {
            return Err(SprError::InvalidRate(timing.rate));
        }
        if timing.long_word_step == 0 {
            return Err(SprError::Config("long_word_step must be at least 1".to_string()));
        }
        if timing.min_duration_ms == 0 {
            return Err(SprError::Config("min_duration_ms must be at least 1".to_string()));
        }
        Ok(())
    }
}
