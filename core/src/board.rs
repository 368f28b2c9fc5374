use alloc::vec::Vec;
use core::ops::{Index, IndexMut};
use core::str::FromStr;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Fixed-size grid of tiles addressed by `(row, col)`.
///
/// Only geometry and storage live here, game rules are applied by the callers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BoardData")]
pub struct Board {
    tiles: Array2<Tile>,
}

/// Unchecked serialized form of a [`Board`].
#[derive(Deserialize)]
struct BoardData {
    tiles: Array2<Tile>,
}

impl TryFrom<BoardData> for Board {
    type Error = GameError;

    /// Applies the dimension limits of [`Board::new`] and recomputes neighbor counts.
    fn try_from(BoardData { tiles }: BoardData) -> Result<Self> {
        let (height, width) = tiles.dim();
        let fits = |len: usize| (1..=usize::from(Coord::MAX)).contains(&len);
        if !fits(height) || !fits(width) {
            return Err(GameError::InvalidDimensions);
        }

        let mut board = Self { tiles };
        board.update_counts();
        Ok(board)
    }
}

impl Board {
    pub fn new((height, width): Coord2) -> Result<Self> {
        if height == 0 || width == 0 {
            return Err(GameError::InvalidDimensions);
        }

        Ok(Self {
            tiles: Array2::default((height, width).to_nd_index()),
        })
    }

    /// Builds a board with mines at `mine_coords` and neighbor counts already filled in.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut board = Self::new(size)?;

        for &coords in mine_coords {
            let coords = board.validate_coords(coords)?;
            board[coords].plant_mine();
        }
        board.update_counts();

        Ok(board)
    }

    pub fn size(&self) -> Coord2 {
        let (height, width) = self.tiles.dim();
        // dimensions come from a `Coord2` and always fit
        (height as Coord, width as Coord)
    }

    pub fn height(&self) -> Coord {
        self.size().0
    }

    pub fn width(&self) -> Coord {
        self.size().1
    }

    pub fn total_tiles(&self) -> CellCount {
        let (height, width) = self.size();
        mult(height, width)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    pub fn tile_at(&self, coords: Coord2) -> Result<&Tile> {
        let coords = self.validate_coords(coords)?;
        Ok(&self[coords])
    }

    /// Coordinates of the 3, 5 or 8 tiles around `coords`.
    pub fn neighbors_of(&self, coords: Coord2) -> Result<Neighbors> {
        let coords = self.validate_coords(coords)?;
        Ok(self.iter_neighbors(coords).collect())
    }

    /// Every tile with its coordinates, row by row.
    pub fn all_tiles(&self) -> impl Iterator<Item = (Coord2, &Tile)> {
        self.tiles
            .indexed_iter()
            .map(|((row, col), tile)| ((row as Coord, col as Coord), tile))
    }

    pub fn mine_count(&self) -> CellCount {
        self.count_tiles(|tile| tile.is_mine())
    }

    pub fn flag_count(&self) -> CellCount {
        self.count_tiles(|tile| tile.is_flagged())
    }

    pub fn unrevealed_count(&self) -> CellCount {
        self.count_tiles(|tile| !tile.is_revealed())
    }

    pub fn count_flagged_neighbors(&self, coords: Coord2) -> u8 {
        self.count_neighbors(coords, |tile| tile.is_flagged())
    }

    pub(crate) fn count_mined_neighbors(&self, coords: Coord2) -> u8 {
        self.count_neighbors(coords, |tile| tile.is_mine())
    }

    pub(crate) fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size())
    }

    pub(crate) fn clear_mines(&mut self) {
        for tile in self.tiles.iter_mut() {
            tile.remove_mine();
        }
    }

    /// Full pass recomputing every tile's mined neighbor count.
    pub(crate) fn update_counts(&mut self) {
        let (height, width) = self.size();
        for row in 0..height {
            for col in 0..width {
                let count = self.count_mined_neighbors((row, col));
                self[(row, col)].set_mined_neighbor_count(count);
            }
        }
    }

    fn count_tiles(&self, pred: impl Fn(&Tile) -> bool) -> CellCount {
        // at most 255 * 255 tiles
        self.tiles.iter().filter(|&tile| pred(tile)).count() as CellCount
    }

    fn count_neighbors(&self, coords: Coord2, pred: impl Fn(&Tile) -> bool) -> u8 {
        self.iter_neighbors(coords)
            .filter(|&pos| pred(&self[pos]))
            .count() as u8
    }
}

impl Index<Coord2> for Board {
    type Output = Tile;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.tiles[coords.to_nd_index()]
    }
}

impl IndexMut<Coord2> for Board {
    fn index_mut(&mut self, coords: Coord2) -> &mut Self::Output {
        &mut self.tiles[coords.to_nd_index()]
    }
}

/// Parses one row per line, `1` or `*` for a mine and `0` or `.` for a safe tile.
///
/// Leading and trailing whitespace on each line is ignored, blank lines are skipped.
impl FromStr for Board {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        let rows: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        let width = rows.first().map_or(0, |row| row.chars().count());
        if rows.iter().any(|row| row.chars().count() != width) {
            return Err(GameError::InvalidBoardShape);
        }
        let height: Coord = rows
            .len()
            .try_into()
            .map_err(|_| GameError::InvalidDimensions)?;
        let width: Coord = width
            .try_into()
            .map_err(|_| GameError::InvalidDimensions)?;

        let mut mines = Vec::new();
        for (row, line) in (0..height).zip(&rows) {
            for (col, ch) in (0..width).zip(line.chars()) {
                match ch {
                    '1' | '*' => mines.push((row, col)),
                    '0' | '.' => {}
                    _ => return Err(GameError::InvalidBoardShape),
                }
            }
        }

        Self::from_mine_coords((height, width), &mines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_zero_dimensions() {
        assert_eq!(Board::new((0, 4)), Err(GameError::InvalidDimensions));
        assert_eq!(Board::new((4, 0)), Err(GameError::InvalidDimensions));
    }

    #[test]
    fn tile_at_checks_bounds() {
        let board = Board::new((2, 3)).unwrap();

        assert!(board.tile_at((1, 2)).is_ok());
        assert_eq!(board.tile_at((2, 0)), Err(GameError::OutOfBounds));
        assert_eq!(board.tile_at((0, 3)), Err(GameError::OutOfBounds));
        assert_eq!(board.neighbors_of((5, 5)), Err(GameError::OutOfBounds));
    }

    #[test]
    fn neighbors_depend_on_position() {
        let board = Board::new((3, 3)).unwrap();

        assert_eq!(board.neighbors_of((0, 0)).unwrap().len(), 3);
        assert_eq!(board.neighbors_of((0, 1)).unwrap().len(), 5);
        assert_eq!(board.neighbors_of((1, 1)).unwrap().len(), 8);
    }

    #[test]
    fn from_mine_coords_fills_counts() {
        let board = Board::from_mine_coords((3, 3), &[(0, 0), (2, 2)]).unwrap();

        assert_eq!(board.mine_count(), 2);
        assert_eq!(board[(1, 1)].mined_neighbor_count(), 2);
        assert_eq!(board[(0, 1)].mined_neighbor_count(), 1);
        assert_eq!(board[(2, 0)].mined_neighbor_count(), 0);
    }

    #[test]
    fn from_mine_coords_rejects_outside_mines() {
        assert_eq!(
            Board::from_mine_coords((2, 2), &[(2, 0)]),
            Err(GameError::OutOfBounds)
        );
    }

    #[test]
    fn clear_mines_keeps_shape() {
        let mut board = Board::from_mine_coords((4, 5), &[(0, 0), (3, 4)]).unwrap();

        board.clear_mines();
        board.update_counts();

        assert_eq!(board.size(), (4, 5));
        assert_eq!(board.mine_count(), 0);
        assert!(board.all_tiles().all(|(_, tile)| tile.mined_neighbor_count() == 0));
    }

    #[test]
    fn all_tiles_visits_every_coordinate_once() {
        let board = Board::new((3, 4)).unwrap();
        let coords: Vec<_> = board.all_tiles().map(|(coords, _)| coords).collect();

        assert_eq!(coords.len(), 12);
        assert_eq!(coords.first(), Some(&(0, 0)));
        assert_eq!(coords.last(), Some(&(2, 3)));
    }

    #[test]
    fn parses_text_layout() {
        let board: Board = "
            010
            .*.
            000
        "
        .parse()
        .unwrap();

        assert_eq!(board.size(), (3, 3));
        assert!(board[(0, 1)].is_mine());
        assert!(board[(1, 1)].is_mine());
        assert_eq!(board[(2, 0)].mined_neighbor_count(), 1);
        assert_eq!(board[(0, 0)].mined_neighbor_count(), 2);
    }

    #[test]
    fn parse_rejects_ragged_or_unknown() {
        assert_eq!("01\n0".parse::<Board>(), Err(GameError::InvalidBoardShape));
        assert_eq!("0x".parse::<Board>(), Err(GameError::InvalidBoardShape));
        assert_eq!("".parse::<Board>(), Err(GameError::InvalidDimensions));
    }

    #[test]
    fn deserialize_round_trips_a_played_board() {
        let mut board = Board::from_mine_coords((3, 4), &[(0, 3), (2, 0)]).unwrap();
        board[(1, 1)].reveal();
        board[(0, 3)].toggle_flag();

        let json = serde_json::to_string(&board).unwrap();

        assert_eq!(serde_json::from_str::<Board>(&json).unwrap(), board);
    }

    #[test]
    fn deserialize_rejects_unplayable_dimensions() {
        let empty = serde_json::json!({ "tiles": Array2::<Tile>::default((0, 3)) });
        let too_wide = serde_json::json!({ "tiles": Array2::<Tile>::default((1, 256)) });

        assert!(serde_json::from_value::<Board>(empty).is_err());
        assert!(serde_json::from_value::<Board>(too_wide).is_err());
    }
}
