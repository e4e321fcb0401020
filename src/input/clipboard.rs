use super::LoadError;
use arboard::Clipboard;

/// Reads the current text contents of the system clipboard.
pub fn load() -> Result<String, LoadError> {
    let mut clipboard = Clipboard::new().map_err(|e| LoadError::Clipboard(e.to_string()))?;
    clipboard
        .get_text()
        .map_err(|e| LoadError::Clipboard(e.to_string()))
}
