use crate::error::ParseError;
use crate::error::ParseError::{BadLineCount, BadLineLen};
use crate::pieces::{Piece, PieceId, PieceType, Side};
use crate::tiles::{Tile, TileIterator, BOARD_SIZE};
use std::collections::HashMap;
use std::fmt::{Display, Formatter, Write};
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The pieces currently on the board, keyed by the tile they occupy. A tile holds at most one
/// piece; every write goes through [`BoardState::set_piece`], which replaces any previous occupant,
/// so callers must resolve captures before placing a piece on an occupied tile.
#[derive(Debug, Clone, Eq, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoardState {
    pieces: HashMap<Tile, Piece>,
}

impl BoardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the piece that occupies the given tile, if any.
    pub fn get_piece(&self, t: Tile) -> Option<Piece> {
        self.pieces.get(&t).copied()
    }

    /// Check if there is any piece occupying a tile.
    pub fn tile_occupied(&self, t: Tile) -> bool {
        self.pieces.contains_key(&t)
    }

    /// Place a piece at the given tile, returning the piece it displaced (if any).
    pub fn set_piece(&mut self, t: Tile, piece: Piece) -> Option<Piece> {
        self.pieces.insert(t, piece)
    }

    /// Clear a tile, returning the piece that was on it.
    pub fn clear_tile(&mut self, t: Tile) -> Option<Piece> {
        self.pieces.remove(&t)
    }

    /// Count the number of pieces of the given side on the board.
    pub fn count_pieces_of_side(&self, side: Side) -> usize {
        self.pieces.values().filter(|p| p.side == side).count()
    }

    /// The tile on which the given side's King stands, if it is on the board.
    pub fn find_king(&self, side: Side) -> Option<Tile> {
        self.pieces
            .iter()
            .find(|(_, p)| p.side == side && p.piece_type == PieceType::King)
            .map(|(t, _)| *t)
    }

    /// The tile occupied by the piece with the given id, if it is on the board.
    pub fn find_piece(&self, id: PieceId) -> Option<Tile> {
        self.pieces.iter().find(|(_, p)| p.id == id).map(|(t, _)| *t)
    }

    /// Iterate over occupied tiles and their pieces. Order is not guaranteed.
    pub fn iter(&self) -> impl Iterator<Item = (Tile, Piece)> + '_ {
        self.pieces.iter().map(|(t, p)| (*t, *p))
    }

    /// The number of pieces on the board.
    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// The highest piece id on the board, if any piece is present.
    pub fn max_id(&self) -> Option<PieceId> {
        self.pieces.values().map(|p| p.id).max()
    }

    /// Parse a board from 14 lines of 14 characters, `.` for an empty tile and a piece character
    /// (see [`Piece::to_char`]) otherwise. Pieces are given ids in row-major order, starting at
    /// zero.
    pub fn from_display_str(s: &str) -> Result<Self, ParseError> {
        let lines: Vec<&str> = s.trim().lines().map(str::trim).collect();
        if lines.len() != BOARD_SIZE as usize {
            return Err(BadLineCount(lines.len()));
        }
        let mut state = Self::default();
        let mut next_id = 0u16;
        for (r, line) in lines.iter().enumerate() {
            if line.chars().count() != BOARD_SIZE as usize {
                return Err(BadLineLen(line.chars().count()));
            }
            for (c, chr) in line.chars().enumerate() {
                if chr == '.' {
                    continue;
                }
                let side = if chr.is_ascii_uppercase() { Side::Player1 } else { Side::Player2 };
                let piece = Piece::new(PieceId(next_id), PieceType::try_from(chr)?, side);
                next_id += 1;
                state.set_piece(Tile::new(c as u8, r as u8), piece);
            }
        }
        Ok(state)
    }

    /// Return a string representing the board state, in a format suitable for printing.
    pub fn to_display_str(&self) -> String {
        self.to_string()
    }
}

impl FromStr for BoardState {
    type Err = ParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_display_str(s)
    }
}

impl Display for BoardState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for t in TileIterator::new() {
            match self.get_piece(t) {
                Some(piece) => f.write_char(piece.into())?,
                None => f.write_char('.')?,
            }
            if t.col == BOARD_SIZE - 1 {
                f.write_char('\n')?;
            }
        }
        Ok(())
    }
}
