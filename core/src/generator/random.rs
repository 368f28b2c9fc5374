use rand::rngs::SmallRng;
use rand::seq::index;
use rand::SeedableRng;

use super::*;

/// Uniformly random layout, drawn without replacement from the tiles outside the
/// starting area.
#[derive(Clone, Debug)]
pub struct RandomMineGenerator {
    rng: SmallRng,
}

impl RandomMineGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    pub fn from_os_rng() -> Self {
        Self {
            rng: SmallRng::from_os_rng(),
        }
    }
}

impl MineGenerator for RandomMineGenerator {
    fn plant_mines(&mut self, board: &mut Board, start: Coord2, mines: CellCount) -> Result<()> {
        let eligible = eligible_tiles(board, start);
        let amount = usize::from(mines);
        if amount > eligible.len() {
            return Err(GameError::InsufficientSpace);
        }

        for i in index::sample(&mut self.rng, eligible.len(), amount).into_iter() {
            board[eligible[i]].plant_mine();
        }
        log::trace!("Planted {} mines around start {:?}", mines, start);
        Ok(())
    }
}
