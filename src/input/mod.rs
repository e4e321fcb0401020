//! Text sources. Every loader yields raw text; tokenizing happens later.

use log::info;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub mod clipboard;
pub mod epub;
pub mod pdf;
pub mod text;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("PDF parse error: {0}")]
    PdfParse(String),

    #[error("EPUB parse error: {0}")]
    EpubParse(String),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Cannot read {source_name}: {message}")]
    Read { source_name: String, message: String },

    #[error("No words to display in {0}")]
    Empty(String),
}

/// Where the text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    File(PathBuf),
    Stdin,
    Text(String),
    Clipboard,
}

impl Source {
    /// Short human label for the status line.
    pub fn label(&self) -> String {
        match self {
            Source::File(path) => path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
            Source::Stdin => "stdin".to_string(),
            Source::Text(_) => "text".to_string(),
            Source::Clipboard => "clipboard".to_string(),
        }
    }
}

/// Raw text plus where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedText {
    pub text: String,
    pub label: String,
    /// Absolute path for file sources; used as the session key.
    pub path: Option<PathBuf>,
}

impl LoadedText {
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

/// Loads text from `source`, rejecting sources with no words.
pub fn load(source: &Source) -> Result<LoadedText, LoadError> {
    let label = source.label();
    let (text, path) = match source {
        Source::File(path) => (load_file(path)?, Some(absolute(path))),
        Source::Stdin => (text::load_stdin()?, None),
        Source::Text(text) => (text.clone(), None),
        Source::Clipboard => (clipboard::load()?, None),
    };

    let loaded = LoadedText { text, label, path };
    if loaded.word_count() == 0 {
        return Err(LoadError::Empty(loaded.label));
    }
    info!("Loaded {} words from {}", loaded.word_count(), loaded.label);
    Ok(loaded)
}

/// Picks a loader from the file extension; anything unknown is plain text.
fn load_file(path: &Path) -> Result<String, LoadError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("pdf") => pdf::load(path),
        Some("epub") => epub::load(path),
        _ => text::load_file(path),
    }
}

fn absolute(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}
