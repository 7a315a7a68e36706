//! Fog of war. A piece standing in a forest is hidden from its opponent unless at least one enemy
//! piece is also standing in a forest somewhere on the board (not necessarily the same one). Pieces
//! on any other terrain are always visible.

use crate::board::BoardState;
use crate::pieces::Side;
use crate::terrain::{TerrainMap, TerrainType};
use crate::tiles::Tile;
use std::collections::HashSet;

/// Whether any piece of the given side is standing on forest terrain.
pub fn side_in_forest(side: Side, board: &BoardState, terrain: &TerrainMap) -> bool {
    board
        .iter()
        .any(|(t, p)| p.side == side && terrain.tile_terrain(t) == TerrainType::Forest)
}

/// Whether the piece on the given tile may be shown to its opponent. Returns `false` if the tile
/// is empty, as there is nothing to show.
pub fn is_visible(tile: Tile, board: &BoardState, terrain: &TerrainMap) -> bool {
    let Some(piece) = board.get_piece(tile) else {
        return false;
    };
    if terrain.tile_terrain(tile) != TerrainType::Forest {
        return true;
    }
    side_in_forest(piece.side.other(), board, terrain)
}

/// The set of occupied tiles whose pieces are currently hidden from their opponents.
#[derive(Debug, Clone, Eq, PartialEq, Default)]
pub struct Fog {
    hidden: HashSet<Tile>,
}

impl Fog {
    /// A fog that hides nothing.
    pub fn clear() -> Self {
        Self::default()
    }

    /// Work out which pieces are hidden, from the live board. A side's forest pieces are either
    /// all hidden or all visible.
    pub fn compute(board: &BoardState, terrain: &TerrainMap) -> Self {
        let p1_in_forest = side_in_forest(Side::Player1, board, terrain);
        let p2_in_forest = side_in_forest(Side::Player2, board, terrain);
        let hidden = board
            .iter()
            .filter(|(t, _)| terrain.tile_terrain(*t) == TerrainType::Forest)
            .filter(|(_, p)| match p.side {
                Side::Player1 => !p2_in_forest,
                Side::Player2 => !p1_in_forest,
            })
            .map(|(t, _)| t)
            .collect();
        Self { hidden }
    }

    /// Whether the piece on the given tile is hidden from its opponent.
    pub fn is_hidden(&self, tile: Tile) -> bool {
        self.hidden.contains(&tile)
    }

    /// The hidden tiles. Order is not guaranteed.
    pub fn hidden_tiles(&self) -> impl Iterator<Item = &Tile> {
        self.hidden.iter()
    }

    pub fn len(&self) -> usize {
        self.hidden.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hidden.is_empty()
    }
}
