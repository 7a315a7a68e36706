use crate::pieces::PieceType::{Bishop, Bomb, King, Knight, Pawn, Queen};
use crate::pieces::{Piece, PieceId, PieceType, Side};
use std::slice::Iter;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The composition of each side's army, in reserve order.
pub const STANDARD_ARMY: [PieceType; 11] = [
    Knight, Knight, Bomb, Pawn, Pawn, Pawn, Pawn, Queen, King, Bishop, Bishop,
];

/// A side's pieces that have not yet been placed on the board, in a fixed order. The reserve only
/// ever shrinks, when a piece is taken out of it to be placed.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Reserve {
    pieces: Vec<Piece>,
}

impl Reserve {
    /// Build the standard eleven-piece reserve for the given side. Piece ids are allocated from
    /// `next_id`, which is advanced past the ids used.
    pub fn standard(side: Side, next_id: &mut u16) -> Self {
        let pieces = STANDARD_ARMY
            .iter()
            .map(|&piece_type| {
                let piece = Piece::new(PieceId(*next_id), piece_type, side);
                *next_id += 1;
                piece
            })
            .collect();
        Self { pieces }
    }

    /// The piece at the given index, if any.
    pub fn get(&self, index: usize) -> Option<&Piece> {
        self.pieces.get(index)
    }

    /// Remove and return the piece at the given index. The remaining pieces keep their relative
    /// order.
    pub fn take(&mut self, index: usize) -> Option<Piece> {
        if index < self.pieces.len() {
            Some(self.pieces.remove(index))
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, Piece> {
        self.pieces.iter()
    }
}

impl<'a> IntoIterator for &'a Reserve {
    type Item = &'a Piece;
    type IntoIter = Iter<'a, Piece>;

    fn into_iter(self) -> Self::IntoIter {
        self.pieces.iter()
    }
}
