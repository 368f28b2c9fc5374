use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use crate::*;
pub use random::*;

mod random;

/// Places mines on a board that has none.
pub trait MineGenerator {
    /// Plants exactly `mines` mines, never on `start` nor any of its neighbors.
    ///
    /// Neighbor counts are refreshed by the caller afterwards.
    fn plant_mines(&mut self, board: &mut Board, start: Coord2, mines: CellCount) -> Result<()>;
}

/// Tiles allowed to hold a mine when the game opens at `start`.
pub fn eligible_tiles(board: &Board, start: Coord2) -> Vec<Coord2> {
    board
        .all_tiles()
        .map(|(coords, _)| coords)
        .filter(|&coords| !is_within_one(coords, start))
        .collect()
}

/// Runs a [`MineGenerator`] once per game, optionally retrying until a
/// [`Winnability`] predicate accepts the layout.
pub struct Generator {
    source: Box<dyn MineGenerator>,
    winnability: Box<dyn Winnability>,
    retry_until_winnable: bool,
    max_attempts: u32,
}

impl Generator {
    pub fn new(source: impl MineGenerator + 'static) -> Self {
        Self {
            source: Box::new(source),
            winnability: Box::new(AlwaysWinnable),
            retry_until_winnable: false,
            max_attempts: DEFAULT_MAX_GENERATION_ATTEMPTS,
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        let source = match config.seed {
            Some(seed) => RandomMineGenerator::new(seed),
            None => RandomMineGenerator::from_os_rng(),
        };
        Self::new(source)
            .with_retry(config.winnable_required)
            .with_max_attempts(config.max_generation_attempts)
    }

    pub fn with_source(mut self, source: impl MineGenerator + 'static) -> Self {
        self.source = Box::new(source);
        self
    }

    pub fn with_winnability(mut self, winnability: impl Winnability + 'static) -> Self {
        self.winnability = Box::new(winnability);
        self
    }

    pub fn with_retry(mut self, retry_until_winnable: bool) -> Self {
        self.retry_until_winnable = retry_until_winnable;
        self
    }

    /// Clamped to at least one attempt.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    /// Lays out `mines` mines around a safe `start` and fills in neighbor counts.
    ///
    /// Works on a copy, `board` is only replaced once a layout is accepted. Returns how many
    /// attempts it took.
    pub fn generate(&mut self, board: &mut Board, start: Coord2, mines: CellCount) -> Result<u32> {
        let start = board.validate_coords(start)?;

        let eligible = eligible_tiles(board, start).len();
        if usize::from(mines) > eligible {
            log::debug!(
                "Cannot keep {:?} safe, requested {} mines but only {} tiles are eligible",
                start,
                mines,
                eligible
            );
            return Err(GameError::InsufficientSpace);
        }

        let mut scratch = board.clone();
        for attempt in 1..=self.max_attempts {
            scratch.clear_mines();
            self.source.plant_mines(&mut scratch, start, mines)?;
            check_layout(&scratch, start, mines)?;
            scratch.update_counts();

            if !self.retry_until_winnable || self.winnability.is_winnable(&scratch, start) {
                log::debug!("Generated board after {} attempt(s)", attempt);
                *board = scratch;
                return Ok(attempt);
            }
            log::debug!("Attempt {} is not winnable, regenerating", attempt);
        }

        log::warn!(
            "Gave up generating a winnable board after {} attempts",
            self.max_attempts
        );
        Err(GameError::UngenerableBoard {
            attempts: self.max_attempts,
        })
    }
}

/// Rejects layouts that break the first-move guarantees, whatever source produced them.
fn check_layout(board: &Board, start: Coord2, mines: CellCount) -> Result<()> {
    let planted = board.mine_count();
    if planted != mines {
        log::warn!("Mine source planted {} mines, expected {}", planted, mines);
        return Err(GameError::InvalidMineLayout);
    }
    if board
        .all_tiles()
        .any(|(coords, tile)| tile.is_mine() && is_within_one(coords, start))
    {
        log::warn!("Mine source planted a mine next to the start {:?}", start);
        return Err(GameError::InvalidMineLayout);
    }
    Ok(())
}

impl fmt::Debug for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Generator")
            .field("retry_until_winnable", &self.retry_until_winnable)
            .field("max_attempts", &self.max_attempts)
            .finish_non_exhaustive()
    }
}
