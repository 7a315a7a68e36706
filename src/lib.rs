#[macro_use]
mod utils;

mod board;
mod collections;
mod error;
pub mod game;
mod pieces;
pub mod play;
pub mod preset;
mod reserve;
mod rules;
#[cfg(feature = "serde")]
mod serde_utils;
mod terrain;
mod tiles;
mod visibility;

pub use crate::{
    board::BoardState,
    collections::PieceSet,
    error::{BoardError, ErrorKind, MoveError, ParseError, PlacementError},
    game::{
        logic::GameLogic, state::GameState, Game, GameOutcome, GameStatus, Phase,
        PlacementOutcome, PlayOutcome, WinReason,
    },
    pieces::{Piece, PieceId, PieceType, Side, SpecialAbility},
    play::Play,
    reserve::{Reserve, STANDARD_ARMY},
    rules::Ruleset,
    terrain::{TerrainMap, TerrainType},
    tiles::{tile_in_bounds, Coords, Offset, Tile, TileIterator, BOARD_SIZE},
    visibility::{is_visible, Fog},
};
