#![cfg_attr(not(test), no_std)]

extern crate alloc;

use core::ops::BitOr;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use controller::*;
pub use error::*;
pub use generator::*;
pub use reveal::*;
pub use state::*;
pub use tile::*;
pub use types::*;
pub use winnable::*;

mod board;
mod controller;
mod error;
mod generator;
mod reveal;
mod state;
mod tile;
mod types;
mod winnable;

/// Upper bound on winnable-retry generation unless configured otherwise.
pub const DEFAULT_MAX_GENERATION_ATTEMPTS: u32 = 1000;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// `(height, width)`
    pub size: Coord2,
    pub mines: CellCount,
    #[serde(default)]
    pub winnable_required: bool,
    #[serde(default = "default_max_generation_attempts")]
    pub max_generation_attempts: u32,
    #[serde(default)]
    pub input_mode: InputMode,
    /// Fixed generator seed, fresh entropy is used when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_max_generation_attempts() -> u32 {
    DEFAULT_MAX_GENERATION_ATTEMPTS
}

impl GameConfig {
    pub const fn new(size: Coord2, mines: CellCount) -> Self {
        Self {
            size,
            mines,
            winnable_required: false,
            max_generation_attempts: DEFAULT_MAX_GENERATION_ATTEMPTS,
            input_mode: InputMode::Revealing,
            seed: None,
        }
    }

    pub const fn with_winnable_required(mut self, winnable_required: bool) -> Self {
        self.winnable_required = winnable_required;
        self
    }

    pub const fn with_max_generation_attempts(mut self, attempts: u32) -> Self {
        self.max_generation_attempts = attempts;
        self
    }

    pub const fn with_input_mode(mut self, input_mode: InputMode) -> Self {
        self.input_mode = input_mode;
        self
    }

    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub const fn total_tiles(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub fn validate(&self) -> Result<()> {
        if self.size.0 == 0 || self.size.1 == 0 {
            return Err(GameError::InvalidDimensions);
        }
        if self.mines >= self.total_tiles() {
            return Err(GameError::InvalidMineCount);
        }
        Ok(())
    }
}

/// Outcome of a flag toggle
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

/// Outcome of revealing one or more tiles
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            HitMine => true,
        }
    }
}

/// Used to merge outcomes of multi-tile reveals
impl BitOr for RevealOutcome {
    type Output = RevealOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use RevealOutcome::*;
        match (self, rhs) {
            (HitMine, _) => HitMine,
            (_, HitMine) => HitMine,
            (Revealed, _) => Revealed,
            (_, Revealed) => Revealed,
            (NoChange, NoChange) => NoChange,
        }
    }
}

/// What a player action did, as seen by a presentation layer
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ActionOutcome {
    NoChange,
    Revealed,
    Marked,
    /// The action revealed a mine and lost the game
    Exploded,
    /// The action completed the board
    Won,
}

impl ActionOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }

    pub const fn is_final(self) -> bool {
        matches!(self, Self::Exploded | Self::Won)
    }
}

impl From<RevealOutcome> for ActionOutcome {
    fn from(outcome: RevealOutcome) -> Self {
        match outcome {
            RevealOutcome::NoChange => Self::NoChange,
            RevealOutcome::Revealed => Self::Revealed,
            RevealOutcome::HitMine => Self::Exploded,
        }
    }
}

impl From<MarkOutcome> for ActionOutcome {
    fn from(outcome: MarkOutcome) -> Self {
        match outcome {
            MarkOutcome::NoChange => Self::NoChange,
            MarkOutcome::Changed => Self::Marked,
        }
    }
}
