use crate::*;
pub use fixed::*;
pub use shuffle::*;

mod fixed;
mod shuffle;

pub trait MinefieldGenerator {
    fn generate(self, config: GameConfig) -> Result<Minefield>;
}
