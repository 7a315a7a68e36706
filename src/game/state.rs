use crate::board::BoardState;
use crate::game::GameStatus;
use crate::game::GameStatus::Ongoing;
use crate::pieces::{PieceId, Side};
use crate::reserve::Reserve;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// This struct contains all state that changes over the course of a game: the pieces on the
/// board, the pieces still in reserve, whose turn it is and whether the game is over. Everything
/// that stays fixed (rules and terrain) lives in [`crate::game::logic::GameLogic`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GameState {
    /// Board state, ie, the current pieces on the board.
    pub board: BoardState,
    /// Player 1's unplaced pieces.
    pub p1_reserve: Reserve,
    /// Player 2's unplaced pieces.
    pub p2_reserve: Reserve,
    /// The side whose turn it is.
    pub side_to_play: Side,
    /// Current status of the game.
    pub status: GameStatus,
    /// Number of placements and moves that have been made by either side.
    pub turn: usize,
    /// The id that will be given to the next piece created.
    pub(crate) next_id: u16,
}

impl GameState {
    /// State at the start of a game: an empty board and both sides' full reserves.
    pub fn new(side_to_play: Side) -> Self {
        let mut next_id = 0;
        let p1_reserve = Reserve::standard(Side::Player1, &mut next_id);
        let p2_reserve = Reserve::standard(Side::Player2, &mut next_id);
        Self {
            board: BoardState::default(),
            p1_reserve,
            p2_reserve,
            side_to_play,
            status: Ongoing,
            turn: 0,
            next_id,
        }
    }

    /// State with the given pieces already on the board and nothing left in reserve.
    pub fn from_board(board: BoardState, side_to_play: Side) -> Self {
        let next_id = board.max_id().map_or(0, |id| id.0 + 1);
        Self {
            board,
            p1_reserve: Reserve::default(),
            p2_reserve: Reserve::default(),
            side_to_play,
            status: Ongoing,
            turn: 0,
            next_id,
        }
    }

    pub fn reserve(&self, side: Side) -> &Reserve {
        match side {
            Side::Player1 => &self.p1_reserve,
            Side::Player2 => &self.p2_reserve,
        }
    }

    pub fn reserve_mut(&mut self, side: Side) -> &mut Reserve {
        match side {
            Side::Player1 => &mut self.p1_reserve,
            Side::Player2 => &mut self.p2_reserve,
        }
    }

    /// Number of pieces the given side still has, on the board or in reserve.
    pub fn pieces_remaining(&self, side: Side) -> usize {
        self.board.count_pieces_of_side(side) + self.reserve(side).len()
    }

    /// Allocate a fresh piece id.
    pub(crate) fn alloc_id(&mut self) -> PieceId {
        let id = PieceId(self.next_id);
        self.next_id += 1;
        id
    }
}
