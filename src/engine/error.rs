use std::io;
use thiserror::Error;

use crate::input::LoadError;
use crate::rendering::renderer::RendererError;

/// Errors surfaced by the reader.
#[derive(Error, Debug)]
pub enum SprError {
    /// Unreadable or empty text source.
    #[error("Input error: {0}")]
    Input(String),

    /// Rate multipliers must be finite and strictly positive.
    #[error("Invalid rate multiplier: {0}")]
    InvalidRate(f64),

    /// The emission timer got into a state it should never reach.
    #[error("Scheduling error: {0}")]
    Scheduling(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Terminal error: {0}")]
    Terminal(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, SprError>;

impl From<LoadError> for SprError {
    fn from(err: LoadError) -> Self {
        SprError::Input(err.to_string())
    }
}

impl From<RendererError> for SprError {
    fn from(err: RendererError) -> Self {
        SprError::Scheduling(err.to_string())
    }
}

impl From<toml::de::Error> for SprError {
    fn from(err: toml::de::Error) -> Self {
        SprError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_load_error_becomes_input_error() {
        let err: SprError = LoadError::FileNotFound(PathBuf::from("missing.txt")).into();
        match err {
            SprError::Input(msg) => assert!(msg.contains("missing.txt")),
            other => panic!("Expected Input error, got {:?}", other),
        }
    }

    #[test]
    fn test_renderer_error_becomes_scheduling_error() {
        let err: SprError = RendererError::RenderFailed("backend gone".to_string()).into();
        assert!(matches!(err, SprError::Scheduling(msg) if msg.contains("backend gone")));
    }

    #[test]
    fn test_invalid_rate_display() {
        let err = SprError::InvalidRate(-1.0);
        assert_eq!(err.to_string(), "Invalid rate multiplier: -1");
    }
}
