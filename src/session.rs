//! Last-position resume.
//!
//! The session file is two lines of plain text: the absolute path of the
//! source file, then the cursor. Only file sources are remembered.

use crate::engine::error::{Result, SprError};
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};

const SESSION_DIR: &str = "spr";
const SESSION_FILE: &str = "last_position";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastPosition {
    pub path: PathBuf,
    pub cursor: isize,
}

impl LastPosition {
    fn serialize(&self) -> String {
        format!("{}\n{}\n", self.path.display(), self.cursor)
    }

    fn parse(contents: &str) -> Option<Self> {
        let mut lines = contents.lines();
        let path = lines.next().map(str::trim).filter(|p| !p.is_empty())?;
        let cursor = lines.next()?.trim().parse::<isize>().ok()?;
        if cursor < -1 {
            return None;
        }
        Some(Self {
            path: PathBuf::from(path),
            cursor,
        })
    }
}

pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// `<state dir>/spr/last_position`, falling back to the data dir on
    /// platforms without a state dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::state_dir()
            .or_else(dirs::data_local_dir)
            .map(|dir| dir.join(SESSION_DIR).join(SESSION_FILE))
    }

    pub fn open_default() -> Option<Self> {
        Self::default_path().map(Self::new)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn save(&self, position: &LastPosition) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, position.serialize()).map_err(|e| {
            SprError::Io(std::io::Error::new(
                e.kind(),
                format!("cannot write {}: {}", self.path.display(), e),
            ))
        })?;
        debug!(
            "Saved position {} for {}",
            position.cursor,
            position.path.display()
        );
        Ok(())
    }

    /// Missing or malformed files read as no session.
    pub fn load(&self) -> Result<Option<LastPosition>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&self.path)?;
        let position = LastPosition::parse(&contents);
        if position.is_none() {
            warn!("Ignoring malformed session file {}", self.path.display());
        }
        Ok(position)
    }

    /// Cursor saved for `source`, if the last session read that same file.
    pub fn resume_cursor(&self, source: &Path) -> Result<Option<isize>> {
        Ok(self
            .load()?
            .filter(|position| position.path == source)
            .map(|position| position.cursor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store(dir: &TempDir) -> SessionStore {
        SessionStore::new(dir.path().join("spr").join(SESSION_FILE))
    }

    #[test]
    fn test_round_trip_through_file_format() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        let position = LastPosition {
            path: PathBuf::from("/books/novel.txt"),
            cursor: 42,
        };
        store.save(&position).unwrap();

        let raw = fs::read_to_string(store.path()).unwrap();
        assert_eq!(raw, "/books/novel.txt\n42\n");
        assert_eq!(store.load().unwrap(), Some(position));
    }

    #[test]
    fn test_missing_file_is_no_session() {
        let dir = TempDir::new().unwrap();
        assert_eq!(store(&dir).load().unwrap(), None);
    }

    #[test]
    fn test_malformed_file_is_no_session() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();

        fs::write(store.path(), "/books/novel.txt\nforty-two\n").unwrap();
        assert_eq!(store.load().unwrap(), None);

        fs::write(store.path(), "").unwrap();
        assert_eq!(store.load().unwrap(), None);

        fs::write(store.path(), "/books/novel.txt\n-7\n").unwrap();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_resume_cursor_requires_matching_path() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store
            .save(&LastPosition {
                path: PathBuf::from("/books/a.txt"),
                cursor: 5,
            })
            .unwrap();

        assert_eq!(store.resume_cursor(Path::new("/books/a.txt")).unwrap(), Some(5));
        assert_eq!(store.resume_cursor(Path::new("/books/b.txt")).unwrap(), None);
    }
}
