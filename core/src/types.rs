use smallvec::SmallVec;

/// Single coordinate axis used for board height, width, and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-tile counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(row, col)`, also used for `(height, width)`.
pub type Coord2 = (Coord, Coord);

/// In-bounds neighbors of a tile, at most 8 of them.
pub type Neighbors = SmallVec<[Coord2; 8]>;

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Whether `a` and `b` are the same tile or touch each other, diagonals included.
pub const fn is_within_one(a: Coord2, b: Coord2) -> bool {
    a.0.abs_diff(b.0) <= 1 && a.1.abs_diff(b.1) <= 1
}

const DISPLACEMENTS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coord2, delta: (isize, isize), bounds: Coord2) -> Option<Coord2> {
    let (row, col) = coords;
    let (d_row, d_col) = delta;
    let (height, width) = bounds;

    let next_row = row.checked_add_signed(d_row.try_into().ok()?)?;
    if next_row >= height {
        return None;
    }

    let next_col = col.checked_add_signed(d_col.try_into().ok()?)?;
    if next_col >= width {
        return None;
    }

    Some((next_row, next_col))
}

/// Iterates the neighbors of `center` inside `bounds`.
///
/// Holds no borrow of the board, so callers can mutate tiles while walking it.
#[derive(Debug, Clone)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    index: u8,
}

impl NeighborIter {
    pub(crate) fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if usize::from(self.index) >= DISPLACEMENTS.len() {
                return None;
            }

            let next_item =
                apply_delta(self.center, DISPLACEMENTS[self.index as usize], self.bounds);
            self.index += 1;

            if next_item.is_some() {
                return next_item;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corner_edge_and_interior_neighbor_counts() {
        assert_eq!(NeighborIter::new((0, 0), (8, 8)).count(), 3);
        assert_eq!(NeighborIter::new((0, 4), (8, 8)).count(), 5);
        assert_eq!(NeighborIter::new((7, 7), (8, 8)).count(), 3);
        assert_eq!(NeighborIter::new((4, 4), (8, 8)).count(), 8);
    }

    #[test]
    fn single_tile_board_has_no_neighbors() {
        assert_eq!(NeighborIter::new((0, 0), (1, 1)).next(), None);
    }

    #[test]
    fn neighbors_never_include_center() {
        assert!(NeighborIter::new((3, 3), (8, 8)).all(|pos| pos != (3, 3)));
        assert!(NeighborIter::new((3, 3), (8, 8)).all(|pos| is_within_one(pos, (3, 3))));
    }
}
