#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use error::*;
pub use generator::*;
pub use listener::*;
pub use snapshot::*;
pub use types::*;

mod board;
mod cell;
mod error;
mod generator;
mod listener;
mod snapshot;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Validated config, fails when the mines do not fit on the board. Zero-sized boards are
    /// allowed and produce an empty grid.
    pub fn new(size: Coord2, mines: CellCount) -> Result<Self> {
        if mines > mult(size.0, size.1) {
            return Err(GameError::TooManyMines);
        }
        Ok(Self::new_unchecked(size, mines))
    }

    pub const fn beginner() -> Self {
        Self::new_unchecked((9, 9), 10)
    }

    pub const fn intermediate() -> Self {
        Self::new_unchecked((16, 16), 40)
    }

    pub const fn expert() -> Self {
        Self::new_unchecked((30, 16), 99)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::beginner()
    }
}

/// Generated board contents: every cell is a mine or knows how many mines surround it.
///
/// Only the cell grid is serialized, deserializing goes through [`Minefield::from_contents`]
/// so counts and shape are always consistent.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MinefieldData", into = "MinefieldData")]
pub struct Minefield {
    cells: Array2<CellContent>,
    mine_count: CellCount,
}

#[derive(Serialize, Deserialize)]
struct MinefieldData {
    cells: Array2<CellContent>,
}

impl TryFrom<MinefieldData> for Minefield {
    type Error = GameError;

    fn try_from(data: MinefieldData) -> Result<Self> {
        let (height, width) = data.cells.dim();
        let size = (
            Coord::try_from(width).map_err(|_| GameError::InvalidBoardShape)?,
            Coord::try_from(height).map_err(|_| GameError::InvalidBoardShape)?,
        );
        Self::from_contents(size, data.cells.iter().copied().collect())
    }
}

impl From<Minefield> for MinefieldData {
    fn from(minefield: Minefield) -> Self {
        Self {
            cells: minefield.cells,
        }
    }
}

impl Minefield {
    /// Builds a minefield from row-major contents (`y * width + x`). Only the position of
    /// [`CellContent::Mine`] entries matters, counts are recomputed for every other cell.
    pub fn from_contents(size: Coord2, contents: Vec<CellContent>) -> Result<Self> {
        let placed = Array2::from_shape_vec(size.to_nd_index(), contents)
            .map_err(|_| GameError::InvalidBoardShape)?;

        let mut cells = Array2::from_elem(size.to_nd_index(), CellContent::Empty);
        let mut mine_count: CellCount = 0;
        let (width, height) = size;
        for y in 0..height {
            for x in 0..width {
                let coords = (x, y);
                cells[coords.to_nd_index()] = if placed[coords.to_nd_index()].is_mine() {
                    mine_count += 1;
                    CellContent::Mine
                } else {
                    let adjacent = NeighborIter::new(coords, size)
                        .filter(|&pos| placed[pos.to_nd_index()].is_mine())
                        .count();
                    // at most 8 neighbors
                    CellContent::from_adjacent(adjacent as u8)
                };
            }
        }

        Ok(Self { cells, mine_count })
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let total = usize::from(mult(size.0, size.1));
        let mut contents = alloc::vec![CellContent::Empty; total];

        for &coords in mine_coords {
            let index = linear_index(coords, size).ok_or(GameError::InvalidCoords)?;
            contents[index] = CellContent::Mine;
        }

        Self::from_contents(size, contents)
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.size(), self.mine_count)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn size(&self) -> Coord2 {
        // built from a `Coord2` in `from_contents`, both axes fit
        let (height, width) = self.cells.dim();
        (width as Coord, height as Coord)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn total_cells(&self) -> CellCount {
        let (width, height) = self.size();
        mult(width, height)
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mine_count)
    }

    /// Content at `coords`, `None` when out of bounds.
    pub fn get(&self, coords: Coord2) -> Option<CellContent> {
        self.validate_coords(coords).ok()?;
        Some(self.cells[coords.to_nd_index()])
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self.get(coords).is_some_and(CellContent::is_mine)
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size())
    }

    /// All cells in row-major order with their coordinates.
    pub fn iter(&self) -> impl Iterator<Item = (Coord2, CellContent)> + '_ {
        let (width, height) = self.size();
        (0..height)
            .flat_map(move |y| (0..width).map(move |x| (x, y)))
            .map(move |coords| (coords, self.cells[coords.to_nd_index()]))
    }
}

impl Index<Coord2> for Minefield {
    type Output = CellContent;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}
