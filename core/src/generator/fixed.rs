use alloc::vec::Vec;

use super::*;

/// Places mines at exactly the given coordinates, for scripted boards and tests.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedGenerator {
    mines: Vec<Coord2>,
}

impl FixedGenerator {
    pub fn new(mines: &[Coord2]) -> Self {
        Self {
            mines: mines.to_vec(),
        }
    }
}

impl MinefieldGenerator for FixedGenerator {
    fn generate(self, config: GameConfig) -> Result<Minefield> {
        let minefield = Minefield::from_mine_coords(config.size, &self.mines)?;
        if minefield.mine_count() != config.mines {
            log::warn!(
                "Fixed minefield count mismatch, actual: {}, requested: {}",
                minefield.mine_count(),
                config.mines
            );
        }
        Ok(minefield)
    }
}
