use crate::error::ParseError;
use crate::error::ParseError::BadString;
use crate::tiles::Tile;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// A single move of a piece from one tile to another. (Named "Play" rather than "Move" as the
/// lower-cased version of the latter would clash with the Rust keyword.)
///
/// The tiles are not guaranteed to be on the board, or the play to be legal; that is checked when
/// the play is made.
#[derive(Debug, Eq, PartialEq, Clone, Copy, Hash)]
pub struct Play {
    pub from: Tile,
    pub to: Tile,
}

impl Play {
    pub fn new(from: Tile, to: Tile) -> Self {
        Self { from, to }
    }
}

/// Plays are written as two tiles separated by a hyphen, eg, `l13-l12`.
impl FromStr for Play {
    type Err = ParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = s.split('-').collect();
        if tokens.len() != 2 {
            return Err(BadString(String::from(s)));
        };
        Ok(Play::new(Tile::from_str(tokens[0])?, Tile::from_str(tokens[1])?))
    }
}

impl Display for Play {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.from, self.to)
    }
}
