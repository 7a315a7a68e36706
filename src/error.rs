use std::num::ParseIntError;
use thiserror::Error;

/// Broad classification of a rejected play, for callers that only need to know whether the input
/// itself was malformed or whether it broke a rule of the game.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ErrorKind {
    /// Bad coordinates, wrong player, occupied destination, etc.
    Input,
    /// Movement geometry/terrain mismatch or an illegal King capture.
    RuleViolation,
}

#[derive(Debug, Error, Eq, PartialEq)]
pub enum ParseError {
    /// Tried to parse a multi-line string but encountered a line that was not the expected length.
    /// The given `usize` is the actual length.
    #[error("line has unexpected length {0}")]
    BadLineLen(usize),
    /// Tried to parse a multi-line string with the wrong number of lines.
    #[error("expected 14 lines, found {0}")]
    BadLineCount(usize),
    /// Encountered an unexpected character in a string.
    #[error("unexpected character {0:?}")]
    BadChar(char),
    /// Tried to parse an empty string.
    #[error("empty string")]
    EmptyString,
    /// Could not parse an integer from a string. This variant wraps the [`ParseIntError`] that was
    /// returned when trying to parse.
    #[error("bad integer: {0}")]
    BadInt(#[from] ParseIntError),
    /// Parsed a tile that does not lie on the board.
    #[error("tile is not on the board")]
    OutOfBounds,
    /// A generic error type where the given string could not be parsed for some reason.
    #[error("could not parse {0:?}")]
    BadString(String),
}

#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum BoardError {
    /// The given coordinates do not refer to a tile on the board.
    #[error("coordinates are out of bounds")]
    OutOfBounds,
    /// There is no piece at the given tile.
    #[error("no piece at tile")]
    NoPiece,
}

/// Reasons why a move may be rejected. No variant is ever returned after the game state has been
/// changed.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum MoveError {
    /// The game has already ended.
    #[error("the game is over")]
    GameOver,
    /// There is no piece at the source tile.
    #[error("no piece at source tile")]
    NoPiece,
    /// The piece being moved does not belong to the player whose turn it is.
    #[error("piece does not belong to the side to play")]
    NotYourPiece,
    /// The source or destination tile is outside the board.
    #[error("tile is out of bounds")]
    OutOfBounds,
    /// The piece cannot make this move, either because of its movement geometry or because of the
    /// terrain at the destination.
    #[error("piece cannot move there")]
    IllegalGeometryOrTerrain,
    /// Only a Pawn or a Bomb may capture a King.
    #[error("only a Pawn or a Bomb may capture a King")]
    IllegalKingCapture,
    /// The destination is occupied by a piece of the moving side.
    #[error("destination is occupied by a friendly piece")]
    DestinationOccupiedBySameOwner,
}

impl MoveError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::IllegalGeometryOrTerrain | Self::IllegalKingCapture => ErrorKind::RuleViolation,
            _ => ErrorKind::Input,
        }
    }
}

/// Reasons why dropping a reserve piece onto the board may be rejected.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum PlacementError {
    /// The game has already ended.
    #[error("the game is over")]
    GameOver,
    /// It is the other side's turn.
    #[error("it is not this side's turn")]
    NotYourTurn,
    /// The side has no pieces left in reserve.
    #[error("reserve is empty")]
    ReserveEmpty,
    /// There is no reserve piece at the given index.
    #[error("no reserve piece at index {0}")]
    BadReserveIndex(usize),
    /// The destination tile is outside the board.
    #[error("tile is out of bounds")]
    OutOfBounds,
    /// Pieces may only be placed in their own side's base.
    #[error("pieces may only be placed in their own base")]
    NotOwnBase,
    /// The destination tile is already occupied.
    #[error("destination is already occupied")]
    DestinationOccupiedBySameOwner,
}

impl PlacementError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Input
    }
}
