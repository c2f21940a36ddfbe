use alloc::vec;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use super::*;

/// Purely random placement: the first `mines` cells are mined and the whole grid is then
/// shuffled, so every layout is equally likely.
#[derive(Clone, Debug)]
pub struct ShuffleGenerator<R = SmallRng> {
    rng: R,
}

impl ShuffleGenerator<SmallRng> {
    pub fn new(seed: u64) -> Self {
        Self::with_rng(SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> ShuffleGenerator<R> {
    /// Uses a caller-provided random source, `&mut R` works too.
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> MinefieldGenerator for ShuffleGenerator<R> {
    fn generate(mut self, config: GameConfig) -> Result<Minefield> {
        let total_cells = config.total_cells();
        if config.mines > total_cells {
            log::warn!(
                "Minefield cannot fit {} mines, only {} cells",
                config.mines,
                total_cells
            );
            return Err(GameError::TooManyMines);
        }

        let mut contents = vec![CellContent::Empty; usize::from(total_cells)];
        contents[..usize::from(config.mines)].fill(CellContent::Mine);
        contents.shuffle(&mut self.rng);

        let minefield = Minefield::from_contents(config.size, contents)?;
        log::debug!(
            "Generated {}x{} minefield with {} mines",
            config.size.0,
            config.size.1,
            minefield.mine_count()
        );
        Ok(minefield)
    }
}
