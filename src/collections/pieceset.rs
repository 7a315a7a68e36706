use crate::pieces::{Piece, PieceType};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A set of piece types. Membership ignores which side a piece belongs to.
#[derive(PartialEq, Eq, Copy, Clone, Debug, Default, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PieceSet(u8);

impl From<PieceType> for PieceSet {
    fn from(value: PieceType) -> Self {
        Self::from_piece_type(value)
    }
}

impl PieceSet {
    /// Create a new [`PieceSet`] which includes only the given piece type.
    ///
    /// **NOTE**: You can also use `PieceSet::from(piece_type)` for the same effect, but this
    /// function is `const`.
    pub const fn from_piece_type(value: PieceType) -> Self {
        Self(value as u8)
    }

    /// Return a copy of this [`PieceSet`] but with the given piece type included.
    pub const fn with_piece_type(&self, piece_type: PieceType) -> Self {
        Self(self.0 | piece_type as u8)
    }

    /// Check whether the set contains the given piece type.
    pub const fn contains_type(&self, piece_type: PieceType) -> bool {
        self.0 & piece_type as u8 > 0
    }

    /// Check whether the set contains the type of the given piece.
    pub const fn contains(&self, piece: Piece) -> bool {
        self.contains_type(piece.piece_type)
    }

    /// Check whether the set is empty.
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }
}
