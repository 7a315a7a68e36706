use crate::error::ParseError;
use crate::error::ParseError::{BadChar, BadString, EmptyString, OutOfBounds};
use std::fmt::{Debug, Display, Formatter};
use std::ops::Add;
use std::str::FromStr;

/// The length of each side of the (square) board.
pub const BOARD_SIZE: u8 = 14;

/// The location of a single tile on the board, ie, column and row. This struct is only a
/// reference to a location on the board, and does not contain any other information such as
/// piece placement, etc.
///
/// A tile is not guaranteed to be on the board; use [`tile_in_bounds`] (or convert from
/// [`Coords`] with [`Tile::try_from`]) where that matters.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Tile {
    pub col: u8,
    pub row: u8,
}

impl Tile {
    pub const fn new(col: u8, row: u8) -> Self {
        Self { col, row }
    }

    /// Absolute column and row differences between this tile and `other`.
    pub fn deltas(&self, other: Tile) -> (u8, u8) {
        (self.col.abs_diff(other.col), self.row.abs_diff(other.row))
    }

    /// All on-board tiles within Chebyshev distance 1 of this tile, including the tile itself.
    pub fn neighborhood(&self) -> Vec<Tile> {
        let centre = Coords::from(*self);
        let mut tiles = Vec::with_capacity(9);
        for dy in -1..=1i8 {
            for dx in -1..=1i8 {
                if let Ok(t) = Tile::try_from(centre + Offset::new(dx, dy)) {
                    tiles.push(t);
                }
            }
        }
        tiles
    }
}

/// Whether the given tile is on the board.
pub fn tile_in_bounds(tile: Tile) -> bool {
    tile.col < BOARD_SIZE && tile.row < BOARD_SIZE
}

impl Debug for Tile {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tile(col={}, row={})", self.col, self.row)
    }
}

/// Tiles are written as a column letter (`a` for column 0) followed by the 1-based row number,
/// so `Tile::new(12, 1)` is `m2`. Off-board tiles have no such notation and are written in their
/// [`Debug`] form.
impl Display for Tile {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if !tile_in_bounds(*self) {
            return write!(f, "{self:?}");
        }
        write!(f, "{}{}", (b'a' + self.col) as char, self.row + 1)
    }
}

impl FromStr for Tile {
    type Err = ParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let col_char = chars.next().ok_or(EmptyString)?;
        if !col_char.is_ascii_lowercase() {
            return Err(BadChar(col_char));
        }
        let rest = chars.as_str();
        if !rest.starts_with(|c: char| c.is_ascii_digit()) {
            return Err(BadString(String::from(s)));
        }
        let row_num: u8 = rest.parse()?;
        if row_num == 0 {
            return Err(OutOfBounds);
        }
        let t = Tile::new(col_char as u8 - b'a', row_num - 1);
        if tile_in_bounds(t) {
            Ok(t)
        } else {
            Err(OutOfBounds)
        }
    }
}

impl From<Tile> for (u8, u8) {
    fn from(value: Tile) -> Self {
        (value.col, value.row)
    }
}

/// Signed column and row offsets.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Offset {
    pub dx: i8,
    pub dy: i8,
}

impl Offset {
    pub const fn new(dx: i8, dy: i8) -> Self {
        Self { dx, dy }
    }
}

/// Signed coordinates that may lie off the board. Caller input goes through this type so that an
/// out-of-range position can be reported rather than wrapped.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Coords {
    pub col: i8,
    pub row: i8,
}

impl Coords {
    pub const fn new(col: i8, row: i8) -> Self {
        Self { col, row }
    }

    pub fn in_bounds(&self) -> bool {
        let range = 0..BOARD_SIZE as i8;
        range.contains(&self.col) && range.contains(&self.row)
    }
}

impl From<Tile> for Coords {
    fn from(value: Tile) -> Self {
        Self { col: value.col as i8, row: value.row as i8 }
    }
}

impl TryFrom<Coords> for Tile {
    type Error = crate::error::BoardError;

    fn try_from(value: Coords) -> Result<Self, Self::Error> {
        if value.in_bounds() {
            Ok(Tile::new(value.col as u8, value.row as u8))
        } else {
            Err(crate::error::BoardError::OutOfBounds)
        }
    }
}

impl Add<Offset> for Coords {
    type Output = Coords;

    fn add(self, rhs: Offset) -> Self::Output {
        Coords {
            col: self.col.saturating_add(rhs.dx),
            row: self.row.saturating_add(rhs.dy),
        }
    }
}

/// Iterator over all tiles on the board, row by row.
pub struct TileIterator {
    current_row: u8,
    current_col: u8,
}

impl TileIterator {
    pub fn new() -> Self {
        Self { current_row: 0, current_col: 0 }
    }
}

impl Default for TileIterator {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for TileIterator {
    type Item = Tile;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_row >= BOARD_SIZE {
            return None;
        }
        let tile = Tile::new(self.current_col, self.current_row);
        if self.current_col >= BOARD_SIZE - 1 {
            self.current_row += 1;
            self.current_col = 0;
        } else {
            self.current_col += 1;
        }
        Some(tile)
    }
}

#[cfg(test)]
mod tests {
    use crate::error::ParseError;
    use crate::tiles::{tile_in_bounds, Coords, Offset, Tile, TileIterator, BOARD_SIZE};
    use std::collections::HashSet;
    use std::str::FromStr;

    #[test]
    fn test_tile_notation() {
        assert_eq!(Tile::new(12, 1).to_string(), "m2");
        assert_eq!(Tile::new(0, 0).to_string(), "a1");
        assert_eq!(Tile::new(13, 13).to_string(), "n14");
        assert_eq!(Tile::from_str("m2"), Ok(Tile::new(12, 1)));
        assert_eq!(Tile::from_str("n14"), Ok(Tile::new(13, 13)));
        assert_eq!(Tile::from_str("o1"), Err(ParseError::OutOfBounds));
        assert_eq!(Tile::from_str("a15"), Err(ParseError::OutOfBounds));
        assert_eq!(Tile::from_str("a0"), Err(ParseError::OutOfBounds));
        assert_eq!(Tile::from_str(""), Err(ParseError::EmptyString));
        assert_eq!(Tile::from_str("A1"), Err(ParseError::BadChar('A')));
        assert!(matches!(Tile::from_str("a999"), Err(ParseError::BadInt(_))));
        assert!(matches!(Tile::from_str("b2x"), Err(ParseError::BadInt(_))));
    }

    #[test]
    fn test_row_must_start_with_digit() {
        for s in ["m+2", "m-2", "m 2", "bx", "m"] {
            assert_eq!(Tile::from_str(s), Err(ParseError::BadString(String::from(s))));
        }
    }

    #[test]
    fn test_off_board_display() {
        assert_eq!(Tile::new(200, 0).to_string(), "Tile(col=200, row=0)");
        assert_eq!(Tile::new(5, 255).to_string(), "Tile(col=5, row=255)");
        assert_eq!(Tile::new(14, 3).to_string(), "Tile(col=14, row=3)");
    }

    #[test]
    fn test_deltas() {
        assert_eq!(Tile::new(5, 5).deltas(Tile::new(3, 6)), (2, 1));
        assert_eq!(Tile::new(0, 13).deltas(Tile::new(0, 13)), (0, 0));
    }

    #[test]
    fn test_neighborhood() {
        let corner: HashSet<Tile> = Tile::new(0, 0).neighborhood().into_iter().collect();
        assert_eq!(
            corner,
            hashset!(Tile::new(0, 0), Tile::new(1, 0), Tile::new(0, 1), Tile::new(1, 1))
        );
        assert_eq!(Tile::new(5, 6).neighborhood().len(), 9);
        assert_eq!(Tile::new(13, 7).neighborhood().len(), 6);
    }

    #[test]
    fn test_coords() {
        assert!(Tile::try_from(Coords::new(-1, 3)).is_err());
        assert!(Tile::try_from(Coords::new(3, 14)).is_err());
        assert_eq!(Tile::try_from(Coords::new(3, 13)), Ok(Tile::new(3, 13)));
        assert_eq!(Coords::new(3, 3) + Offset::new(-2, 1), Coords::new(1, 4));
        assert!(!tile_in_bounds(Tile::new(BOARD_SIZE, 0)));
    }

    #[test]
    fn test_tile_iterator() {
        let tiles: Vec<Tile> = TileIterator::new().collect();
        assert_eq!(tiles.len(), 196);
        assert_eq!(tiles[0], Tile::new(0, 0));
        assert_eq!(tiles[1], Tile::new(1, 0));
        assert_eq!(tiles[14], Tile::new(0, 1));
        assert_eq!(tiles[195], Tile::new(13, 13));
    }
}
