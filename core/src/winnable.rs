use alloc::vec::Vec;

use crate::*;

/// Decides whether a freshly generated layout is acceptable to play from `start`.
pub trait Winnability {
    fn is_winnable(&self, board: &Board, start: Coord2) -> bool;
}

impl<F> Winnability for F
where
    F: Fn(&Board, Coord2) -> bool,
{
    fn is_winnable(&self, board: &Board, start: Coord2) -> bool {
        self(board, start)
    }
}

/// Accepts every layout.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct AlwaysWinnable;

impl Winnability for AlwaysWinnable {
    fn is_winnable(&self, _board: &Board, _start: Coord2) -> bool {
        true
    }
}

/// Accepts layouts that can be cleared from `start` with single-tile deductions only.
///
/// Plays the board on a copy: a numbered tile whose hidden neighbors plus flags equal its
/// count gets all of them flagged, and one whose flags already equal its count gets the rest
/// opened. The layout is winnable when that reaches a board where only mines stay hidden.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct LogicSolvable;

impl Winnability for LogicSolvable {
    fn is_winnable(&self, board: &Board, start: Coord2) -> bool {
        let mut probe = board.clone();
        if reveal_from(&mut probe, start) == RevealOutcome::HitMine {
            return false;
        }

        let mines = probe.mine_count();
        loop {
            if probe.unrevealed_count() == mines {
                return true;
            }
            match deduce(&mut probe) {
                Deduction::Progress => {}
                Deduction::Stuck => return false,
                Deduction::Contradiction => return false,
            }
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
enum Deduction {
    Progress,
    Stuck,
    /// A deduction opened a mine, only possible with a wrong flag.
    Contradiction,
}

fn deduce(board: &mut Board) -> Deduction {
    let clues: Vec<(Coord2, u8)> = board
        .all_tiles()
        .filter(|(_, tile)| tile.is_revealed() && !tile.is_mine())
        .map(|(coords, tile)| (coords, tile.mined_neighbor_count()))
        .filter(|&(_, count)| count > 0)
        .collect();

    let mut progress = false;
    for (coords, count) in clues {
        let hidden: Neighbors = board
            .iter_neighbors(coords)
            .filter(|&pos| !board[pos].is_revealed() && !board[pos].is_flagged())
            .collect();
        if hidden.is_empty() {
            continue;
        }

        let flagged = board.count_flagged_neighbors(coords);
        if usize::from(flagged) + hidden.len() == usize::from(count) {
            for pos in hidden {
                board[pos].toggle_flag();
            }
            progress = true;
        } else if flagged == count {
            if reveal_neighbors(board, coords) == RevealOutcome::HitMine {
                return Deduction::Contradiction;
            }
            progress = true;
        }
    }

    if progress {
        Deduction::Progress
    } else {
        Deduction::Stuck
    }
}
