use alloc::collections::VecDeque;
use hashbrown::HashSet;

use crate::*;

/// Reveal a hidden, unflagged tile and flood-fill from it when it turns out empty.
///
/// Revealed or flagged tiles are left alone. A mine is still marked revealed so the
/// detonation stays visible, the caller decides what losing means.
pub fn reveal_from(board: &mut Board, coords: Coord2) -> RevealOutcome {
    let tile = board[coords];
    if tile.is_revealed() || tile.is_flagged() {
        return RevealOutcome::NoChange;
    }

    board[coords].reveal();
    log::debug!("Reveal tile at {:?}, mine: {}", coords, tile.is_mine());

    if tile.is_mine() {
        return RevealOutcome::HitMine;
    }

    if board[coords].is_empty() {
        RevealOutcome::Revealed | flood_fill(board, coords)
    } else {
        RevealOutcome::Revealed
    }
}

/// Whether the flags around a revealed tile account for all of its mines.
pub fn is_chord_safe(board: &Board, coords: Coord2) -> bool {
    let tile = board[coords];
    tile.is_revealed() && board.count_flagged_neighbors(coords) >= tile.mined_neighbor_count()
}

/// Chord-reveal: open every unflagged neighbor of a sufficiently flagged tile.
///
/// No-op unless [`is_chord_safe`] holds. Flagged neighbors are always skipped.
pub fn reveal_neighbors(board: &mut Board, coords: Coord2) -> RevealOutcome {
    if !is_chord_safe(board, coords) {
        return RevealOutcome::NoChange;
    }
    flood_fill(board, coords)
}

/// Breadth-first expansion seeded with the revealable neighbors of `origin`.
///
/// Every tile enters the queue at most once per pass.
fn flood_fill(board: &mut Board, origin: Coord2) -> RevealOutcome {
    let mut outcome = RevealOutcome::NoChange;
    let mut visited: HashSet<Coord2> = HashSet::new();
    visited.insert(origin);
    let mut to_visit: VecDeque<Coord2> = board
        .iter_neighbors(origin)
        .filter(|&pos| is_revealable(board[pos]))
        .collect();
    visited.extend(to_visit.iter().copied());
    log::trace!(
        "Starting flood-fill from {:?}, initial neighbors: {:?}",
        origin,
        to_visit
    );

    while let Some(visit_coords) = to_visit.pop_front() {
        let tile = board[visit_coords];
        if !is_revealable(tile) {
            log::trace!("Skipping tile at {:?}", visit_coords);
            continue;
        }

        board[visit_coords].reveal();
        if tile.is_mine() {
            log::debug!("Flood-fill detonated mine at {:?}", visit_coords);
            outcome = outcome | RevealOutcome::HitMine;
            continue;
        }
        outcome = outcome | RevealOutcome::Revealed;
        log::trace!(
            "Flood revealed tile at {:?}, mine count: {}",
            visit_coords,
            tile.mined_neighbor_count()
        );

        if board[visit_coords].is_empty() {
            for pos in board.iter_neighbors(visit_coords) {
                if is_revealable(board[pos]) && visited.insert(pos) {
                    to_visit.push_back(pos);
                }
            }
        }
    }

    outcome
}

const fn is_revealable(tile: Tile) -> bool {
    !tile.is_revealed() && !tile.is_flagged()
}
