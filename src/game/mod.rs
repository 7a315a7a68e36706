pub mod logic;
pub mod state;

use crate::board::BoardState;
use crate::error::{BoardError, MoveError, PlacementError};
use crate::game::logic::GameLogic;
use crate::game::state::GameState;
use crate::pieces::{Piece, Side};
use crate::play::Play;
use crate::reserve::Reserve;
use crate::rules::Ruleset;
use crate::terrain::{TerrainMap, TerrainType};
use crate::tiles::{Coords, Tile};
use crate::visibility::Fog;
use log::{debug, trace};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The reason why a game has been won.
#[derive(Eq, PartialEq, Debug, Copy, Clone, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum WinReason {
    /// The other side's King has been removed from the board, by capture or by detonation.
    KingCaptured,
    /// A piece has reached the other side's base.
    BaseReached,
    /// The other side lost its own King, by detonating its own bomb next to it or by walking it
    /// into the desert.
    KingLost,
    /// All the other side's pieces have been captured, with none left in reserve.
    AllCaptured,
    /// The other side resigned.
    Resignation,
}

/// The outcome of a single game.
#[derive(Eq, PartialEq, Debug, Copy, Clone, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GameOutcome {
    /// Game has been won by the specified side.
    Win(WinReason, Side),
}

impl GameOutcome {
    pub fn winner(&self) -> Side {
        match self {
            GameOutcome::Win(_, side) => *side,
        }
    }
}

/// The current status of the game.
#[derive(Eq, PartialEq, Debug, Copy, Clone, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GameStatus {
    /// Game is still ongoing.
    Ongoing,
    /// Game is over, with the given outcome.
    Over(GameOutcome),
}

/// Which kind of action the side to play is expected to take.
#[derive(Eq, PartialEq, Debug, Copy, Clone, Hash)]
pub enum Phase {
    /// The side to play still has pieces in reserve. It may place one, or move a piece already
    /// on the board.
    Placement,
    /// The side to play has nothing left to place and must move.
    Turn,
    GameOver,
}

/// What happened as a result of a successful move.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlayOutcome {
    /// Tiles whose pieces were removed from the board, sorted.
    pub captures: Vec<Tile>,
    /// Whether the moving piece detonated.
    pub detonated: bool,
    /// Whether the moving piece was turned into a pawn on arrival.
    pub demoted: bool,
    /// The outcome of the game, if this move ended it.
    pub game_outcome: Option<GameOutcome>,
}

impl PlayOutcome {
    /// Whether any piece was removed from the board.
    pub fn captured(&self) -> bool {
        !self.captures.is_empty()
    }
}

/// What happened as a result of a successful placement.
#[derive(Eq, PartialEq, Debug, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlacementOutcome {
    /// The piece that was taken out of reserve.
    pub piece: Piece,
    /// Where it was placed.
    pub tile: Tile,
}

/// A struct representing a single game, including all state and associated information (such as
/// rules and terrain) needed to play.
///
/// Every action is validated before anything changes; a rejected action leaves the game exactly
/// as it was.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Game {
    pub logic: GameLogic,
    pub state: GameState,
}

impl Game {
    /// Create a new [`Game`] on the standard terrain, with an empty board and both reserves full.
    pub fn new(rules: Ruleset) -> Self {
        let logic = GameLogic::new(rules, TerrainMap::standard());
        let state = GameState::new(rules.starting_side);
        debug!("New game, {} to play", state.side_to_play);
        Self { logic, state }
    }

    /// Create a game from a position with all pieces already on the board (see
    /// [`BoardState::from_display_str`]) and nothing in reserve.
    pub fn from_board(rules: Ruleset, board: BoardState, side_to_play: Side) -> Self {
        Self {
            logic: GameLogic::new(rules, TerrainMap::standard()),
            state: GameState::from_board(board, side_to_play),
        }
    }

    /// Start again from the initial position under the same rules.
    pub fn reset(&mut self) {
        debug!("Resetting game");
        self.state = GameState::new(self.logic.rules.starting_side);
    }

    /// The terrain at the given coordinates. Off-board coordinates are reported as land.
    pub fn terrain_at(&self, coords: Coords) -> TerrainType {
        self.logic.terrain.terrain_at(coords)
    }

    pub fn reserve(&self, side: Side) -> &Reserve {
        self.state.reserve(side)
    }

    pub fn piece_at(&self, tile: Tile) -> Option<Piece> {
        self.state.board.get_piece(tile)
    }

    pub fn side_to_play(&self) -> Side {
        self.state.side_to_play
    }

    /// The number (1 or 2) of the player whose turn it is.
    pub fn current_player(&self) -> u8 {
        self.state.side_to_play.number()
    }

    pub fn phase(&self) -> Phase {
        if self.state.status != GameStatus::Ongoing {
            Phase::GameOver
        } else if self.state.reserve(self.state.side_to_play).is_empty() {
            Phase::Turn
        } else {
            Phase::Placement
        }
    }

    pub fn status(&self) -> GameStatus {
        self.state.status
    }

    /// Number of placements and moves made so far.
    pub fn turn(&self) -> usize {
        self.state.turn
    }

    /// Free tiles in the given side's base.
    pub fn placement_tiles(&self, side: Side) -> Vec<Tile> {
        self.logic.placement_tiles(side, &self.state)
    }

    /// The tiles the piece at the given tile could move to. Returns an error if there is no piece
    /// at the given tile. Order is not guaranteed.
    pub fn legal_moves(&self, tile: Tile) -> Result<Vec<Tile>, BoardError> {
        self.logic.legal_moves(tile, &self.state)
    }

    /// Take the reserve piece at `index` and place it on `tile`, which must be a free tile in the
    /// side's own base.
    pub fn place_piece(
        &mut self,
        side: Side,
        index: usize,
        tile: Tile,
    ) -> Result<PlacementOutcome, PlacementError> {
        let (state, outcome) = self
            .logic
            .do_placement(side, index, tile, &self.state)
            .inspect_err(|e| debug!("Rejected placement by {side} at {tile}: {e}"))?;
        debug!("{} placed at {}", outcome.piece, outcome.tile);
        self.state = state;
        self.log_turn();
        Ok(outcome)
    }

    /// Move the piece on `from` to `to`.
    pub fn do_move(&mut self, from: Tile, to: Tile) -> Result<PlayOutcome, MoveError> {
        self.do_play(Play::new(from, to))
    }

    /// Actually "do" a play: check validity, resolve captures and terrain effects, update the
    /// status and pass the turn. Returns a description of what happened.
    pub fn do_play(&mut self, play: Play) -> Result<PlayOutcome, MoveError> {
        let (state, outcome) = self
            .logic
            .do_move(play, &self.state)
            .inspect_err(|e| debug!("Rejected play {play}: {e}"))?;
        debug!("{} played {play}", self.state.side_to_play);
        self.state = state;
        self.log_turn();
        Ok(outcome)
    }

    /// End the game with a win for the other side.
    pub fn resign(&mut self, side: Side) -> Result<GameOutcome, MoveError> {
        if self.state.status != GameStatus::Ongoing {
            return Err(MoveError::GameOver);
        }
        let outcome = GameOutcome::Win(WinReason::Resignation, side.other());
        debug!("{side} resigned");
        self.state.status = GameStatus::Over(outcome);
        Ok(outcome)
    }

    /// Whether the piece on the given tile may be shown to its opponent. Always `false` for an
    /// empty tile.
    pub fn is_visible_to_opponent(&self, tile: Tile) -> bool {
        self.logic.is_visible_to_opponent(tile, &self.state)
    }

    /// The pieces currently hidden from their opponents.
    pub fn fog(&self) -> Fog {
        self.logic.fog(&self.state)
    }

    fn log_turn(&self) {
        match self.state.status {
            GameStatus::Ongoing => {
                trace!(
                    "Turn {}: {} to play, {} pieces hidden",
                    self.state.turn,
                    self.state.side_to_play,
                    self.fog().len()
                );
            }
            GameStatus::Over(outcome) => debug!("Game over: {outcome:?}"),
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(Ruleset::default())
    }
}
