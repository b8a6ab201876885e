use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use super::{Direction, Grid};
use crate::error::{EngineError, ScoreStoreError};
use crate::store::ScoreStore;

/// Tile value that wins the game.
pub const WIN_VALUE: u32 = 2048;

/// Chance that a spawned tile is a 4 instead of a 2.
const FOUR_PROBABILITY: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    Won,
    Lost,
}

/// Grid and score as they were just before a board-changing move.
#[derive(Debug, Clone)]
struct Snapshot {
    grid: Grid,
    score: u64,
}

/// Owns the grid, the score and the best score, and applies moves to them.
pub struct BoardEngine {
    grid: Grid,
    previous: Grid,
    score: u64,
    best: u64,
    undo: Option<Snapshot>,
    store: Box<dyn ScoreStore>,
    rng: StdRng,
}

impl BoardEngine {
    /// Start a new game on a `size` x `size` board with an OS-seeded RNG.
    pub fn new(size: usize, store: Box<dyn ScoreStore>) -> Result<Self, EngineError> {
        Self::with_rng(size, store, StdRng::from_os_rng())
    }

    /// Start a new game with a deterministic RNG.
    pub fn seeded(size: usize, store: Box<dyn ScoreStore>, seed: u64) -> Result<Self, EngineError> {
        Self::with_rng(size, store, StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(
        size: usize,
        store: Box<dyn ScoreStore>,
        rng: StdRng,
    ) -> Result<Self, EngineError> {
        if size < 2 {
            return Err(EngineError::InvalidSize(size));
        }
        let best = load_best(store.as_ref());
        let mut engine = BoardEngine {
            grid: Grid::new(size),
            previous: Grid::new(size),
            score: 0,
            best,
            undo: None,
            store,
            rng,
        };
        engine.place_initial_tiles();
        Ok(engine)
    }

    /// Start over on a fresh board. The best score carries over, raised to
    /// the stored value if storage holds a higher one.
    pub fn reset(&mut self, size: usize) -> Result<(), EngineError> {
        if size < 2 {
            return Err(EngineError::InvalidSize(size));
        }
        self.grid = Grid::new(size);
        self.previous = Grid::new(size);
        self.score = 0;
        self.undo = None;
        self.best = self.best.max(load_best(self.store.as_ref()));
        self.place_initial_tiles();
        Ok(())
    }

    fn place_initial_tiles(&mut self) {
        // Two 2s on distinct cells; a fresh board always has room.
        for _ in 0..2 {
            let empty = self.grid.empty_cells();
            let (row, col) = empty[self.rng.random_range(0..empty.len())];
            self.grid.set(row, col, 2);
        }
        self.previous = self.grid.clone();
        info!(size = self.grid.size(), best = self.best, "new game");
    }

    pub fn size(&self) -> usize {
        self.grid.size()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn previous_grid(&self) -> &Grid {
        &self.previous
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn best_score(&self) -> u64 {
        self.best
    }

    pub fn max_tile(&self) -> u32 {
        self.grid.max_tile()
    }

    /// Collapse one line toward its start, crediting every merge to the
    /// score.
    pub fn collapse_line(&mut self, line: &[u32]) -> Vec<u32> {
        let mut out = line.to_vec();
        collapse_in_place(&mut out, |merged| self.add_points(merged));
        out
    }

    /// Slide and merge the whole board in `direction`.
    pub fn apply_move(&mut self, direction: Direction) {
        self.previous = self.grid.clone();
        let score_before = self.score;

        let mut oriented = direction.orient(&self.grid);
        for row in 0..oriented.size() {
            collapse_in_place(oriented.row_mut(row), |merged| self.add_points(merged));
        }
        self.grid = direction.restore(&oriented);

        if self.move_changed_board() {
            self.undo = Some(Snapshot {
                grid: self.previous.clone(),
                score: score_before,
            });
            debug!(
                direction = direction.name(),
                gained = self.score - score_before,
                score = self.score,
                "move applied"
            );
        } else {
            debug!(direction = direction.name(), "move had no effect");
        }
    }

    /// Whether the last move altered any cell.
    pub fn move_changed_board(&self) -> bool {
        self.grid != self.previous
    }

    /// Put a new tile (2, or 4 one time in five) on a random empty cell and
    /// return its position.
    pub fn spawn_tile(&mut self) -> Result<(usize, usize), EngineError> {
        let empty = self.grid.empty_cells();
        if empty.is_empty() {
            return Err(EngineError::BoardFull);
        }
        let (row, col) = empty[self.rng.random_range(0..empty.len())];
        let value = if self.rng.random_bool(FOUR_PROBABILITY) { 4 } else { 2 };
        self.grid.set(row, col, value);
        debug!(row, col, value, "spawned tile");
        Ok((row, col))
    }

    pub fn won(&self) -> bool {
        self.grid.rows().any(|row| row.contains(&WIN_VALUE))
    }

    /// No empty cell and no adjacent pair left to merge.
    pub fn lost(&self) -> bool {
        self.grid.is_full() && !self.grid.has_adjacent_equal()
    }

    pub fn status(&self) -> GameStatus {
        if self.won() {
            GameStatus::Won
        } else if self.lost() {
            GameStatus::Lost
        } else {
            GameStatus::Playing
        }
    }

    pub fn can_undo(&self) -> bool {
        self.undo.is_some()
    }

    /// Roll back the last board-changing move, including the tile spawned
    /// after it. Only one step is kept. The best score is left untouched.
    pub fn undo(&mut self) -> bool {
        match self.undo.take() {
            Some(snapshot) => {
                self.grid = snapshot.grid;
                self.score = snapshot.score;
                self.previous = self.grid.clone();
                debug!(score = self.score, "undid last move");
                true
            }
            None => false,
        }
    }

    /// Write the best score to the backing store.
    pub fn save_best(&mut self) -> Result<(), ScoreStoreError> {
        self.store.save(self.best)
    }

    fn add_points(&mut self, points: u32) {
        self.score += u64::from(points);
        if self.score > self.best {
            self.best = self.score;
        }
    }

    #[cfg(test)]
    pub(crate) fn set_grid(&mut self, grid: Grid) {
        self.previous = grid.clone();
        self.grid = grid;
        self.undo = None;
    }
}

/// Read the stored best score, treating unreadable data as 0.
fn load_best(store: &dyn ScoreStore) -> u64 {
    match store.load() {
        Ok(best) => best,
        Err(e) => {
            warn!(error = %e, "ignoring stored best score");
            0
        }
    }
}

/// Compact non-zero values to the front, merge equal neighbours once each,
/// compact again. `on_merge` sees every merged value.
fn collapse_in_place(line: &mut [u32], mut on_merge: impl FnMut(u32)) {
    compact(line);
    for i in 1..line.len() {
        if line[i - 1] != 0 && line[i - 1] == line[i] {
            line[i - 1] *= 2;
            line[i] = 0;
            on_merge(line[i - 1]);
        }
    }
    compact(line);
}

fn compact(line: &mut [u32]) {
    let mut write = 0;
    for read in 0..line.len() {
        if line[read] != 0 {
            line.swap(write, read);
            write += 1;
        }
    }
}
