// engine.rs - The Game of Life stepping engine

use std::fmt;

use log::{debug, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::LifeConfig;
use crate::error::EngineError;
use crate::grid::{Cell, Grid, GridSnapshot};
use crate::observer::{GenerationObserver, ObserverId, ObserverRegistry};
use crate::patterns::Pattern;

/// Owns the board and the generation counter.
///
/// Every operation is synchronous. The engine does no locking of its own; share it
/// behind a `Mutex` when a [`Ticker`](crate::ticker::Ticker) drives it.
pub struct GridEngine {
    grid: Grid,
    generation: u64,
    rng: StdRng,
    observers: ObserverRegistry,
}

impl GridEngine {
    /// All-dead `width` x `height` board at generation 0, seeded from OS entropy.
    pub fn new(width: usize, height: usize) -> Result<Self, EngineError> {
        Self::with_rng(width, height, StdRng::from_entropy())
    }

    /// Same as [`GridEngine::new`] but with a reproducible random sequence.
    pub fn with_rng_seed(width: usize, height: usize, seed: u64) -> Result<Self, EngineError> {
        Self::with_rng(width, height, StdRng::seed_from_u64(seed))
    }

    pub fn from_config(config: &LifeConfig) -> Result<Self, EngineError> {
        match config.rng_seed {
            Some(seed) => Self::with_rng_seed(config.width, config.height, seed),
            None => Self::new(config.width, config.height),
        }
    }

    fn with_rng(width: usize, height: usize, rng: StdRng) -> Result<Self, EngineError> {
        let grid = Grid::new(width, height)?;
        debug!("created {width}x{height} engine");
        Ok(Self {
            grid,
            generation: 0,
            rng,
            observers: ObserverRegistry::default(),
        })
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn live_count(&self) -> usize {
        self.grid.live_count()
    }

    pub fn cell(&self, x: usize, y: usize) -> Option<Cell> {
        self.grid.get(x, y)
    }

    pub fn current_state(&self) -> GridSnapshot {
        GridSnapshot::capture(&self.grid, self.generation)
    }

    /// Registers a listener called after every write to the generation counter.
    pub fn subscribe<O>(&mut self, observer: O) -> ObserverId
    where
        O: GenerationObserver + 'static,
    {
        self.observers.add(Box::new(observer))
    }

    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.observers.remove(id)
    }

    /// Brings a random subset of cells to life. Other cells keep their state and
    /// the generation is left alone.
    ///
    /// Draws `(len - 1) / 8 + 1` indices uniformly from the whole board, with
    /// replacement; a repeated index lands on an already live cell.
    pub fn seed(&mut self) -> GridSnapshot {
        let max_index = self.grid.len() - 1;
        let count = max_index / 8;
        for _ in 0..=count {
            let idx = self.rng.gen_range(0..=max_index);
            self.grid.set_index(idx, Cell::Alive);
        }
        debug!("seeded {} draws, {} live", count + 1, self.grid.live_count());
        self.current_state()
    }

    /// Seeds, then restarts the generation count at 0.
    pub fn reset(&mut self) -> GridSnapshot {
        self.seed();
        self.generation = 0;
        self.publish()
    }

    /// Kills every cell and restarts the generation count at 0.
    pub fn clear(&mut self) -> GridSnapshot {
        self.grid.fill(Cell::Dead);
        self.generation = 0;
        debug!("cleared grid");
        self.publish()
    }

    /// Advances one generation.
    pub fn step(&mut self) -> GridSnapshot {
        let next = self.grid.next_generation();
        self.grid = next;
        self.generation += 1;
        trace!("generation {}: {} live", self.generation, self.grid.live_count());
        self.publish()
    }

    /// Sets a single cell; returns false when (x, y) is off the board.
    pub fn set_cell(&mut self, x: usize, y: usize, alive: bool) -> bool {
        self.grid.set(x, y, Cell::from(alive))
    }

    /// Flips a single cell and returns its new state, or `None` when off the board.
    pub fn toggle_cell(&mut self, x: usize, y: usize) -> Option<bool> {
        let flipped = !self.grid.get(x, y)?.is_alive();
        self.grid.set(x, y, Cell::from(flipped));
        Some(flipped)
    }

    /// Clears the board and stamps `pattern` in its centre at generation 0.
    pub fn apply_pattern(&mut self, pattern: &Pattern) -> Result<GridSnapshot, EngineError> {
        let (needed_width, needed_height) = pattern.extent();
        let (width, height) = (self.width(), self.height());
        if needed_width > width || needed_height > height {
            return Err(EngineError::PatternTooLarge {
                name: pattern.name,
                needed_width,
                needed_height,
                width,
                height,
            });
        }

        let left = (width - needed_width) / 2;
        let top = (height - needed_height) / 2;
        self.grid.fill(Cell::Dead);
        for &(x, y) in pattern.cells {
            self.grid.set(left + x, top + y, Cell::Alive);
        }
        self.generation = 0;
        debug!("applied pattern {} at ({left}, {top})", pattern.name);
        Ok(self.publish())
    }

    fn publish(&mut self) -> GridSnapshot {
        let snapshot = self.current_state();
        self.observers.notify(&snapshot);
        snapshot
    }
}

impl fmt::Debug for GridEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridEngine")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("generation", &self.generation)
            .field("live", &self.live_count())
            .field("observers", &self.observers.len())
            .finish()
    }
}
