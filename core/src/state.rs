use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - Undecided -> Won
/// - Undecided -> Lost
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndState {
    Undecided,
    Won,
    Lost,
}

impl EndState {
    pub const fn is_final(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for EndState {
    fn default() -> Self {
        Self::Undecided
    }
}

/// What a primary action does on a hidden tile
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputMode {
    Revealing,
    Flagging,
}

impl InputMode {
    pub const fn toggled(self) -> Self {
        match self {
            Self::Revealing => Self::Flagging,
            Self::Flagging => Self::Revealing,
        }
    }
}

impl Default for InputMode {
    fn default() -> Self {
        Self::Revealing
    }
}

/// Bookkeeping owned by the controller, separate from the board itself.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub end_state: EndState,
    /// Mines minus placed flags, negative when over-flagged.
    pub mines_remaining: isize,
    pub first_move: bool,
    pub input_mode: InputMode,
}

impl GameState {
    pub fn new(mines: CellCount, input_mode: InputMode) -> Self {
        Self {
            end_state: EndState::Undecided,
            mines_remaining: mines as isize,
            first_move: true,
            input_mode,
        }
    }
}

/// Player-facing view of one tile.
///
/// Whether the tile holds a mine is only disclosed once the game has ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileView {
    revealed: bool,
    flagged: bool,
    mined_neighbors: Option<u8>,
    mine: Option<bool>,
}

impl TileView {
    pub(crate) fn new(tile: Tile, end_state: EndState) -> Self {
        Self {
            revealed: tile.is_revealed(),
            flagged: tile.is_flagged(),
            mined_neighbors: (tile.is_revealed() && !tile.is_mine())
                .then_some(tile.mined_neighbor_count()),
            mine: end_state.is_final().then_some(tile.is_mine()),
        }
    }

    pub const fn is_revealed(self) -> bool {
        self.revealed
    }

    pub const fn is_flagged(self) -> bool {
        self.flagged
    }

    /// Count shown on a revealed safe tile.
    pub const fn mined_neighbor_count(self) -> Option<u8> {
        self.mined_neighbors
    }

    /// `None` while the game is undecided.
    pub const fn is_mine(self) -> Option<bool> {
        self.mine
    }
}
