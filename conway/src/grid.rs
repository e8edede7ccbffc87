// grid.rs - Grid types for Conway's Game of Life

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// A single cell of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Dead,
    Alive,
}

impl Cell {
    pub fn is_alive(self) -> bool {
        matches!(self, Cell::Alive)
    }

    /// Conway's rule: the state this cell takes next, given its live neighbor count.
    pub fn next(self, live_neighbors: usize) -> Cell {
        match (self, live_neighbors) {
            (Cell::Alive, 2) | (Cell::Alive, 3) => Cell::Alive, // Survival
            (Cell::Dead, 3)                     => Cell::Alive, // Birth
            _                                   => Cell::Dead,  // Death or stays dead
        }
    }
}

impl From<bool> for Cell {
    fn from(alive: bool) -> Self {
        if alive { Cell::Alive } else { Cell::Dead }
    }
}

/// Relative positions of the 8 neighbors.
const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1), (0, -1), (1, -1),
    (-1,  0),          (1,  0),
    (-1,  1), (0,  1), (1,  1),
];

/// Fixed-size, edge-bounded board stored row-major.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// All-dead grid. Zero dimensions, or an area that overflows `usize` or cannot be
    /// allocated, are rejected.
    pub fn new(width: usize, height: usize) -> Result<Self, EngineError> {
        let invalid = EngineError::InvalidDimension { width, height };
        let len = width
            .checked_mul(height)
            .filter(|&len| len > 0)
            .ok_or_else(|| invalid.clone())?;

        let mut cells = Vec::new();
        cells.try_reserve_exact(len).map_err(|_| invalid)?;
        cells.resize(len, Cell::Dead);

        Ok(Self {
            width,
            height,
            cells,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Row-major index of (x, y), if it lies on the board.
    pub fn index(&self, x: usize, y: usize) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Writes a cell; returns false when (x, y) is off the board.
    pub fn set(&mut self, x: usize, y: usize, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Writes a cell by linear index; out-of-range indices are ignored.
    pub(crate) fn set_index(&mut self, idx: usize, cell: Cell) {
        if let Some(slot) = self.cells.get_mut(idx) {
            *slot = cell;
        }
    }

    pub fn fill(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_alive()).count()
    }

    /// Live cells among the 8 neighbors of (x, y). Neighbors off any edge are
    /// skipped; nothing wraps.
    pub fn live_neighbors(&self, x: usize, y: usize) -> usize {
        NEIGHBOR_OFFSETS
            .iter()
            .filter_map(|&(dx, dy)| {
                let nx = x.checked_add_signed(dx)?;
                let ny = y.checked_add_signed(dy)?;
                self.get(nx, ny)
            })
            .filter(|cell| cell.is_alive())
            .count()
    }

    /// Successor generation, computed entirely from `self` into a fresh buffer.
    pub fn next_generation(&self) -> Grid {
        let mut cells = Vec::with_capacity(self.cells.len());
        for y in 0..self.height {
            for x in 0..self.width {
                let current = self.cells[y * self.width + x];
                cells.push(current.next(self.live_neighbors(x, y)));
            }
        }

        Grid {
            width: self.width,
            height: self.height,
            cells,
        }
    }
}

/// Owned copy of the board handed to callers and observers.
///
/// Deserializing rejects data whose `cells` length is not `width * height`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "SnapshotData")]
pub struct GridSnapshot {
    pub width: usize,
    pub height: usize,
    pub cells: Vec<bool>,
    pub generation: u64,
}

impl GridSnapshot {
    pub(crate) fn capture(grid: &Grid, generation: u64) -> Self {
        Self {
            width: grid.width,
            height: grid.height,
            cells: grid.cells.iter().map(|cell| cell.is_alive()).collect(),
            generation,
        }
    }

    /// False for coordinates off the board or past the end of `cells`.
    pub fn is_alive(&self, x: usize, y: usize) -> bool {
        x < self.width
            && y < self.height
            && y.checked_mul(self.width)
                .and_then(|row| row.checked_add(x))
                .and_then(|idx| self.cells.get(idx))
                .is_some_and(|&alive| alive)
    }

    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    /// Coordinates of every live cell, row by row.
    pub fn live_cells(&self) -> Vec<(usize, usize)> {
        if self.width == 0 {
            return Vec::new();
        }
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &alive)| alive)
            .map(|(idx, _)| (idx % self.width, idx / self.width))
            .filter(|&(_, y)| y < self.height)
            .collect()
    }
}

#[derive(Deserialize)]
struct SnapshotData {
    width: usize,
    height: usize,
    cells: Vec<bool>,
    generation: u64,
}

impl TryFrom<SnapshotData> for GridSnapshot {
    type Error = EngineError;

    fn try_from(data: SnapshotData) -> Result<Self, Self::Error> {
        let SnapshotData { width, height, cells, generation } = data;
        if width.checked_mul(height) != Some(cells.len()) || cells.is_empty() {
            return Err(EngineError::SnapshotShape {
                width,
                height,
                cells: cells.len(),
            });
        }
        Ok(Self { width, height, cells, generation })
    }
}
