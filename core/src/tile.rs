use serde::{Deserialize, Serialize};

/// One square of the board.
///
/// The mined neighbor count is only meaningful once mines have been placed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    mine: bool,
    flagged: bool,
    revealed: bool,
    mined_neighbors: u8,
}

impl Tile {
    pub const fn new() -> Self {
        Self {
            mine: false,
            flagged: false,
            revealed: false,
            mined_neighbors: 0,
        }
    }

    pub const fn is_mine(self) -> bool {
        self.mine
    }

    pub const fn is_flagged(self) -> bool {
        self.flagged
    }

    pub const fn is_revealed(self) -> bool {
        self.revealed
    }

    pub const fn mined_neighbor_count(self) -> u8 {
        self.mined_neighbors
    }

    /// Revealed, safe, and with no mine around it.
    pub const fn is_empty(self) -> bool {
        self.revealed && !self.mine && self.mined_neighbors == 0
    }

    pub fn plant_mine(&mut self) {
        self.mine = true;
    }

    pub fn remove_mine(&mut self) {
        self.mine = false;
    }

    /// Does nothing on a revealed tile.
    pub fn toggle_flag(&mut self) {
        if !self.revealed {
            self.flagged = !self.flagged;
        }
    }

    pub fn reveal(&mut self) {
        self.revealed = true;
    }

    pub(crate) fn set_mined_neighbor_count(&mut self, count: u8) {
        self.mined_neighbors = count;
    }
}
