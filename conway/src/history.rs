// history.rs - Detects boards that repeat a recently seen state

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::grid::GridSnapshot;

const HISTORY_LEN: usize = 10;

/// Ring of the last few board hashes. A repeat means the board has settled into a
/// still life, an oscillator with period up to 10, or died out.
#[derive(Debug, Clone, Default)]
pub struct CycleDetector {
    history: [u64; HISTORY_LEN],
    count: usize,
}

impl CycleDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `snapshot` and reports whether its cells match a recent board.
    pub fn observe(&mut self, snapshot: &GridSnapshot) -> bool {
        let hash = hash_cells(&snapshot.cells);
        let filled = self.count.min(HISTORY_LEN);
        if self.history[..filled].contains(&hash) {
            return true;
        }
        self.history[self.count % HISTORY_LEN] = hash;
        self.count += 1;
        false
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

fn hash_cells(cells: &[bool]) -> u64 {
    let mut hasher = DefaultHasher::new();
    cells.hash(&mut hasher);
    hasher.finish()
}
