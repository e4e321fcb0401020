use super::LoadError;
use std::fs;
use std::io::{self, Read};
use std::path::Path;

/// Reads a UTF-8 text file.
pub fn load_file(path: &Path) -> Result<String, LoadError> {
    if !path.exists() {
        return Err(LoadError::FileNotFound(path.to_path_buf()));
    }

    fs::read_to_string(path).map_err(|e| LoadError::Read {
        source_name: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Reads all of standard input.
pub fn load_stdin() -> Result<String, LoadError> {
    read_all(io::stdin().lock(), "stdin")
}

fn read_all<R: Read>(mut reader: R, source_name: &str) -> Result<String, LoadError> {
    let mut buffer = String::new();
    reader
        .read_to_string(&mut buffer)
        .map_err(|e| LoadError::Read {
            source_name: source_name.to_string(),
            message: e.to_string(),
        })?;
    Ok(buffer)
}
