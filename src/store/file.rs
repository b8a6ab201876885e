use std::ffi::OsString;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::ScoreStore;
use crate::error::ScoreStoreError;

/// Stores the best score as a plain decimal integer in a single file.
#[derive(Debug, Clone)]
pub struct FileScoreStore {
    path: PathBuf,
}

impl FileScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileScoreStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }
}

impl ScoreStore for FileScoreStore {
    fn load(&self) -> Result<u64, ScoreStoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no best score file, starting from 0");
                return Ok(0);
            }
            Err(e) => {
                return Err(ScoreStoreError::Read {
                    path: self.path.clone(),
                    source: e,
                })
            }
        };

        content
            .trim()
            .parse::<u64>()
            .map_err(|_| ScoreStoreError::Parse {
                path: self.path.clone(),
                content,
            })
    }

    fn save(&mut self, best: u64) -> Result<(), ScoreStoreError> {
        let tmp = self.tmp_path();
        let write_err = |source| ScoreStoreError::Write {
            path: self.path.clone(),
            source,
        };

        // Write then rename: the target is never left half-written
        fs::write(&tmp, best.to_string()).map_err(write_err)?;
        fs::rename(&tmp, &self.path).map_err(write_err)?;

        debug!(path = %self.path.display(), best, "saved best score");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_loads_zero() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileScoreStore::new(dir.path().join(".g2048_best"));
        assert_eq!(store.load().unwrap(), 0);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".g2048_best");
        let mut store = FileScoreStore::new(&path);

        store.save(1234).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "1234");
        assert_eq!(store.load().unwrap(), 1234);
        assert!(!store.tmp_path().exists());
    }

    #[test]
    fn test_load_tolerates_surrounding_whitespace() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("best");
        fs::write(&path, " 512\n").unwrap();
        assert_eq!(FileScoreStore::new(&path).load().unwrap(), 512);
    }

    #[test]
    fn test_garbage_content_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("best");
        fs::write(&path, "not a number").unwrap();

        match FileScoreStore::new(&path).load() {
            Err(ScoreStoreError::Parse { content, .. }) => assert_eq!(content, "not a number"),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_negative_value_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("best");
        fs::write(&path, "-5").unwrap();
        assert!(FileScoreStore::new(&path).load().is_err());
    }

    #[test]
    fn test_save_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileScoreStore::new(dir.path().join("missing").join("best"));
        assert!(matches!(store.save(8), Err(ScoreStoreError::Write { .. })));
    }
}
