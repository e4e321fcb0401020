use crate::engine::config::Config;
use crate::engine::error::{Result, SprError};
use crate::input::Source;
use clap::Parser;
use std::io::IsTerminal;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "spr")]
#[command(about = "Speed read text in the terminal, one word at a time")]
#[command(version)]
pub struct Args {
    /// File to read (.txt, .md, .pdf, .epub); reads stdin when piped
    pub file: Option<PathBuf>,

    /// Text to read instead of a file
    #[arg(short, long, conflicts_with_all = ["file", "clipboard"])]
    pub text: Option<String>,

    /// Read the system clipboard
    #[arg(long, conflicts_with = "file")]
    pub clipboard: bool,

    /// Words per minute
    #[arg(short, long)]
    pub wpm: Option<u32>,

    /// Rate multiplier applied on top of the WPM, kept within the configured bounds
    #[arg(short, long)]
    pub rate: Option<f64>,

    /// Draw in a small inline viewport instead of the full screen
    #[arg(short, long)]
    pub inline: bool,

    /// Start paused
    #[arg(long)]
    pub paused: bool,

    /// Resume a file from where the last session left off
    #[arg(long)]
    pub resume: bool,

    /// Exit as soon as the last word has been shown
    #[arg(long)]
    pub auto_exit: bool,

    /// Config file to use instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Write debug logs to spr.log in the state directory
    #[arg(long)]
    pub debug: bool,
}

impl Args {
    /// Picks the text source; stdin only counts when it is not a terminal.
    pub fn resolve_source(&self) -> Result<Source> {
        self.source_with_stdin(!std::io::stdin().is_terminal())
    }

    fn source_with_stdin(&self, stdin_piped: bool) -> Result<Source> {
        if let Some(text) = &self.text {
            return Ok(Source::Text(text.clone()));
        }
        if self.clipboard {
            return Ok(Source::Clipboard);
        }
        if let Some(path) = &self.file {
            return Ok(Source::File(path.clone()));
        }
        if stdin_piped {
            return Ok(Source::Stdin);
        }
        Err(SprError::Input(
            "nothing to read: pass a FILE, --text, --clipboard or pipe text on stdin".to_string(),
        ))
    }

    /// Folds command line overrides into the loaded config.
    pub fn apply_to(&self, config: &mut Config) -> Result<()> {
        if let Some(wpm) = self.wpm {
            config.timing.wpm = wpm;
        }
        if let Some(rate) = self.rate {
            if !(rate > 0.0) || !rate.is_finite() {
                return Err(SprError::InvalidRate(rate));
            }
            config.timing.rate = config.timing.clamp_rate(rate);
        }
        if self.inline {
            config.display.inline = true;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_file_argument() {
        let args = parse(&["spr", "book.epub", "--wpm", "450"]);
        assert_eq!(args.file, Some(PathBuf::from("book.epub")));
        assert_eq!(args.wpm, Some(450));
        assert_eq!(
            args.source_with_stdin(true).unwrap(),
            Source::File(PathBuf::from("book.epub"))
        );
    }

    #[test]
    fn test_text_wins_over_stdin() {
        let args = parse(&["spr", "-t", "hello world"]);
        assert_eq!(
            args.source_with_stdin(true).unwrap(),
            Source::Text("hello world".to_string())
        );
    }

    #[test]
    fn test_stdin_only_when_piped() {
        let args = parse(&["spr"]);
        assert_eq!(args.source_with_stdin(true).unwrap(), Source::Stdin);
        assert!(matches!(args.source_with_stdin(false), Err(SprError::Input(_))));
    }

    #[test]
    fn test_conflicting_sources_are_rejected() {
        assert!(Args::try_parse_from(["spr", "a.txt", "--text", "hi"]).is_err());
        assert!(Args::try_parse_from(["spr", "a.txt", "--clipboard"]).is_err());
    }

    #[test]
    fn test_overrides_apply_to_config() {
        let args = parse(&["spr", "--wpm", "500", "--rate", "1.5", "--inline"]);
        let mut config = Config::default();
        args.apply_to(&mut config).unwrap();
        assert_eq!(config.timing.wpm, 500);
        assert_eq!(config.timing.rate, 1.5);
        assert!(config.display.inline);
    }

    #[test]
    fn test_rate_is_clamped_to_configured_bounds() {
        let mut config = Config::default();
        parse(&["spr", "--rate", "8"]).apply_to(&mut config).unwrap();
        assert_eq!(config.timing.rate, 4.0);

        parse(&["spr", "--rate", "0.1"]).apply_to(&mut config).unwrap();
        assert_eq!(config.timing.rate, 0.25);
    }

    #[test]
    fn test_non_positive_rate_is_rejected() {
        let args = parse(&["spr", "--rate", "0"]);
        let mut config = Config::default();
        assert!(matches!(args.apply_to(&mut config), Err(SprError::InvalidRate(_))));
        assert_eq!(config.timing.rate, 1.0);
    }

    #[test]
    fn test_flags() {
        let args = parse(&["spr", "--paused", "--resume", "--auto-exit", "--debug"]);
        assert!(args.paused && args.resume && args.auto_exit && args.debug);
    }
}
