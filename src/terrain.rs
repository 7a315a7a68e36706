use crate::error::ParseError;
use crate::error::ParseError::{BadChar, BadLineCount, BadLineLen};
use crate::pieces::Side;
use crate::tiles::{tile_in_bounds, Coords, Tile, TileIterator, BOARD_SIZE};
use std::fmt::{Display, Formatter, Write};
use std::ops::RangeInclusive;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The kind of terrain on a single tile.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TerrainType {
    #[default]
    Land,
    Forest,
    River,
    Mountain,
    Desert,
    Base,
}

impl TerrainType {
    /// Whether the terrain can be entered by every piece (Land, Forest and Base).
    pub fn is_open(&self) -> bool {
        matches!(self, TerrainType::Land | TerrainType::Forest | TerrainType::Base)
    }

    pub fn to_char(&self) -> char {
        match self {
            TerrainType::Land => '.',
            TerrainType::Forest => 'f',
            TerrainType::River => '~',
            TerrainType::Mountain => '^',
            TerrainType::Desert => 'd',
            TerrainType::Base => 'b',
        }
    }
}

impl TryFrom<char> for TerrainType {
    type Error = ParseError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            '.' => Ok(TerrainType::Land),
            'f' => Ok(TerrainType::Forest),
            '~' => Ok(TerrainType::River),
            '^' => Ok(TerrainType::Mountain),
            'd' => Ok(TerrainType::Desert),
            'b' => Ok(TerrainType::Base),
            other => Err(BadChar(other)),
        }
    }
}

/// A rectangular block of a single terrain type.
struct Region {
    terrain: TerrainType,
    cols: RangeInclusive<u8>,
    rows: RangeInclusive<u8>,
}

const STANDARD_REGIONS: [Region; 8] = [
    Region { terrain: TerrainType::Base, cols: 11..=13, rows: 0..=1 },
    Region { terrain: TerrainType::Base, cols: 11..=13, rows: 12..=13 },
    Region { terrain: TerrainType::Forest, cols: 4..=6, rows: 2..=3 },
    Region { terrain: TerrainType::Forest, cols: 4..=6, rows: 10..=11 },
    Region { terrain: TerrainType::Mountain, cols: 2..=4, rows: 5..=8 },
    Region { terrain: TerrainType::River, cols: 7..=13, rows: 6..=7 },
    Region { terrain: TerrainType::Desert, cols: 11..=13, rows: 5..=5 },
    Region { terrain: TerrainType::Desert, cols: 11..=13, rows: 8..=8 },
];

/// The terrain of every tile on the board. Built once when a game is created and never changed
/// afterwards.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TerrainMap {
    /// Indexed by row, then column.
    cells: [[TerrainType; BOARD_SIZE as usize]; BOARD_SIZE as usize],
}

impl Default for TerrainMap {
    fn default() -> Self {
        Self::standard()
    }
}

impl TerrainMap {
    /// A map consisting entirely of land.
    pub fn empty() -> Self {
        Self { cells: [[TerrainType::Land; BOARD_SIZE as usize]; BOARD_SIZE as usize] }
    }

    /// The standard board: two bases in the right-hand corners, two forests, a mountain range, a
    /// river band and two desert strips either side of it.
    pub fn standard() -> Self {
        let mut map = Self::empty();
        for region in &STANDARD_REGIONS {
            for row in region.rows.clone() {
                for col in region.cols.clone() {
                    map.cells[row as usize][col as usize] = region.terrain;
                }
            }
        }
        map
    }

    /// The terrain at the given coordinates. Coordinates that are off the board are reported as
    /// [`TerrainType::Land`]; use [`TerrainMap::checked_terrain_at`] to detect them.
    pub fn terrain_at(&self, coords: Coords) -> TerrainType {
        self.checked_terrain_at(coords).unwrap_or_default()
    }

    /// The terrain at the given coordinates, or `None` if they are off the board.
    pub fn checked_terrain_at(&self, coords: Coords) -> Option<TerrainType> {
        let tile = Tile::try_from(coords).ok()?;
        Some(self.tile_terrain(tile))
    }

    /// The terrain at the given tile. Off-board tiles are reported as [`TerrainType::Land`].
    pub fn tile_terrain(&self, tile: Tile) -> TerrainType {
        if tile_in_bounds(tile) {
            self.cells[tile.row as usize][tile.col as usize]
        } else {
            TerrainType::Land
        }
    }

    /// The side whose base contains the given tile, if the tile is a base tile. Base tiles in the
    /// top half of the board belong to Player 2, those in the bottom half to Player 1.
    pub fn base_owner(&self, tile: Tile) -> Option<Side> {
        if self.tile_terrain(tile) != TerrainType::Base || !tile_in_bounds(tile) {
            return None;
        }
        if tile.row < BOARD_SIZE / 2 {
            Some(Side::Player2)
        } else {
            Some(Side::Player1)
        }
    }

    /// All tiles belonging to the given side's base, in row-major order.
    pub fn base_tiles(&self, side: Side) -> Vec<Tile> {
        TileIterator::new()
            .filter(|t| self.base_owner(*t) == Some(side))
            .collect()
    }

    /// Parse a terrain map from 14 lines of 14 terrain characters each.
    pub fn from_display_str(s: &str) -> Result<Self, ParseError> {
        let lines: Vec<&str> = s.trim().lines().map(str::trim).collect();
        if lines.len() != BOARD_SIZE as usize {
            return Err(BadLineCount(lines.len()));
        }
        let mut map = Self::empty();
        for (r, line) in lines.iter().enumerate() {
            if line.chars().count() != BOARD_SIZE as usize {
                return Err(BadLineLen(line.chars().count()));
            }
            for (c, chr) in line.chars().enumerate() {
                map.cells[r][c] = TerrainType::try_from(chr)?;
            }
        }
        Ok(map)
    }

    pub fn to_display_str(&self) -> String {
        self.to_string()
    }
}

impl FromStr for TerrainMap {
    type Err = ParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_display_str(s)
    }
}

impl Display for TerrainMap {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for row in &self.cells {
            for t in row {
                f.write_char(t.to_char())?;
            }
            f.write_char('\n')?;
        }
        Ok(())
    }
}
