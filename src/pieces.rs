use crate::error::ParseError;
use crate::terrain::TerrainType;
use crate::tiles::Tile;
use std::fmt::{Display, Formatter};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The two players. Player 1 moves first under the standard rules.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Side {
    Player1,
    Player2,
}

impl Side {
    /// Return the other side.
    pub fn other(&self) -> Side {
        match self {
            Side::Player1 => Side::Player2,
            Side::Player2 => Side::Player1,
        }
    }

    /// The player number (1 or 2).
    pub fn number(&self) -> u8 {
        match self {
            Side::Player1 => 1,
            Side::Player2 => 2,
        }
    }
}

impl Display for Side {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.number())
    }
}

/// The kinds of piece. The discriminants are bit flags so that sets of piece types can be stored
/// in a [`crate::PieceSet`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PieceType {
    Knight = 0x01,
    Pawn = 0x02,
    Bomb = 0x04,
    Queen = 0x08,
    King = 0x10,
    Bishop = 0x20,
}

/// What happens when a piece uses its special ability.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SpecialAbility {
    /// The piece has no special ability.
    None,
    /// Every piece in the 3x3 neighbourhood of the piece's tile is removed.
    Detonate,
}

impl PieceType {
    pub const ALL: [PieceType; 6] = [
        PieceType::Knight,
        PieceType::Pawn,
        PieceType::Bomb,
        PieceType::Queen,
        PieceType::King,
        PieceType::Bishop,
    ];

    /// Whether a piece of this type may move from `from` to `to`, where `terrain` is the terrain
    /// at `to`. Only geometry and terrain are considered; occupancy, ownership and the effects of
    /// landing on the destination are handled by the game logic.
    pub fn can_move(&self, from: Tile, to: Tile, terrain: TerrainType) -> bool {
        let (dx, dy) = from.deltas(to);
        if dx == 0 && dy == 0 {
            return false;
        }
        let one_step = dx <= 1 && dy <= 1;
        match self {
            PieceType::Knight => match terrain {
                TerrainType::River => false,
                // Degraded movement: a single step in any direction.
                TerrainType::Mountain | TerrainType::Desert => one_step,
                _ => (dx == 2 && dy == 1) || (dx == 1 && dy == 2),
            },
            PieceType::Pawn => dx == 1 && dy == 0,
            PieceType::Bomb => {
                one_step && !matches!(terrain, TerrainType::River | TerrainType::Mountain)
            }
            PieceType::Queen => {
                matches!((dx, dy), (2, 0) | (0, 2) | (2, 2)) && terrain.is_open()
            }
            PieceType::King => one_step,
            PieceType::Bishop => dx == 2 && dy == 2 && terrain.is_open(),
        }
    }

    pub fn special_ability(&self) -> SpecialAbility {
        match self {
            PieceType::Bomb => SpecialAbility::Detonate,
            _ => SpecialAbility::None,
        }
    }

    /// The character used for this piece type in board strings (upper case).
    pub fn to_char(&self) -> char {
        match self {
            PieceType::Knight => 'N',
            PieceType::Pawn => 'P',
            PieceType::Bomb => 'X',
            PieceType::Queen => 'Q',
            PieceType::King => 'K',
            PieceType::Bishop => 'B',
        }
    }
}

impl TryFrom<char> for PieceType {
    type Error = ParseError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value.to_ascii_uppercase() {
            'N' => Ok(PieceType::Knight),
            'P' => Ok(PieceType::Pawn),
            'X' => Ok(PieceType::Bomb),
            'Q' => Ok(PieceType::Queen),
            'K' => Ok(PieceType::King),
            'B' => Ok(PieceType::Bishop),
            _ => Err(ParseError::BadChar(value)),
        }
    }
}

/// Identity of a single piece within a game. A piece keeps its id while it moves between the
/// reserve and the board; a demoted piece is replaced by a new piece with a new id.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PieceId(pub u16);

/// A single piece, belonging to one side.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Piece {
    pub id: PieceId,
    pub piece_type: PieceType,
    pub side: Side,
}

impl Piece {
    pub fn new(id: PieceId, piece_type: PieceType, side: Side) -> Self {
        Self { id, piece_type, side }
    }

    /// Whether this piece may move from `from` to `to`, given the terrain at `to`.
    pub fn can_move(&self, from: Tile, to: Tile, terrain: TerrainType) -> bool {
        self.piece_type.can_move(from, to, terrain)
    }

    /// Whether the two pieces belong to different sides.
    pub fn is_enemy_of(&self, other: &Piece) -> bool {
        self.side != other.side
    }

    /// The board-string character for this piece: upper case for Player 1, lower case for
    /// Player 2.
    pub fn to_char(&self) -> char {
        let c = self.piece_type.to_char();
        match self.side {
            Side::Player1 => c,
            Side::Player2 => c.to_ascii_lowercase(),
        }
    }
}

impl From<Piece> for char {
    fn from(value: Piece) -> Self {
        value.to_char()
    }
}

impl Display for Piece {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {:?} #{}", self.side, self.piece_type, self.id.0)
    }
}
