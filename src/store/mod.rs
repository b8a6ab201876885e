//! Persistence of the best score across sessions.

mod file;

use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;

use crate::error::ScoreStoreError;

pub use file::FileScoreStore;

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub best_score_path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            best_score_path: PathBuf::from(".g2048_best"),
        }
    }
}

/// Durable storage for a single best-score value.
pub trait ScoreStore {
    /// Read the stored best score. Absent storage reads as 0.
    fn load(&self) -> Result<u64, ScoreStoreError>;

    /// Replace the stored best score.
    fn save(&mut self, best: u64) -> Result<(), ScoreStoreError>;
}

/// In-memory store. Clones share the same value, so a handle kept outside
/// the engine observes every save.
#[derive(Debug, Clone, Default)]
pub struct MemoryScoreStore {
    value: Rc<Cell<u64>>,
    saves: Rc<Cell<usize>>,
}

impl MemoryScoreStore {
    pub fn new(initial: u64) -> Self {
        MemoryScoreStore {
            value: Rc::new(Cell::new(initial)),
            saves: Rc::new(Cell::new(0)),
        }
    }

    pub fn value(&self) -> u64 {
        self.value.get()
    }

    /// Number of times `save` has been called
    pub fn save_count(&self) -> usize {
        self.saves.get()
    }
}

impl ScoreStore for MemoryScoreStore {
    fn load(&self) -> Result<u64, ScoreStoreError> {
        Ok(self.value.get())
    }

    fn save(&mut self, best: u64) -> Result<(), ScoreStoreError> {
        self.value.set(best);
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}
