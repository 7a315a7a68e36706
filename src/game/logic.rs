use crate::error::MoveError::{
    DestinationOccupiedBySameOwner, GameOver, IllegalGeometryOrTerrain, IllegalKingCapture,
    NoPiece, NotYourPiece, OutOfBounds,
};
use crate::error::{BoardError, MoveError, PlacementError};
use crate::game::state::GameState;
use crate::game::GameOutcome::Win;
use crate::game::GameStatus::{Ongoing, Over};
use crate::game::WinReason::{AllCaptured, BaseReached, KingCaptured, KingLost};
use crate::game::{GameOutcome, PlacementOutcome, PlayOutcome};
use crate::pieces::PieceType::{King, Pawn};
use crate::pieces::{Piece, Side, SpecialAbility};
use crate::play::Play;
use crate::rules::Ruleset;
use crate::terrain::{TerrainMap, TerrainType};
use crate::tiles::{tile_in_bounds, Coords, Offset, Tile};
use crate::visibility::{is_visible, Fog};
use log::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// This struct contains the information necessary to implement the game logic, namely the rules
/// and the terrain. It provides methods for evaluating a given play against a [`GameState`].
///
/// The information stored in this struct does not change over the course of a game. Methods that
/// make a play never modify the state they are given: they validate the play against it and, if
/// the play is valid, return a new state with the play applied.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GameLogic {
    pub rules: Ruleset,
    pub terrain: TerrainMap,
}

impl GameLogic {
    pub fn new(rules: Ruleset, terrain: TerrainMap) -> Self {
        Self { rules, terrain }
    }

    /// Check whether the given side may place the reserve piece at `index` on `tile`.
    pub fn check_placement_validity(
        &self,
        side: Side,
        index: usize,
        tile: Tile,
        state: &GameState,
    ) -> Result<(), PlacementError> {
        if state.status != Ongoing {
            return Err(PlacementError::GameOver);
        }
        if side != state.side_to_play {
            return Err(PlacementError::NotYourTurn);
        }
        let reserve = state.reserve(side);
        if reserve.is_empty() {
            return Err(PlacementError::ReserveEmpty);
        }
        if index >= reserve.len() {
            return Err(PlacementError::BadReserveIndex(index));
        }
        if !tile_in_bounds(tile) {
            return Err(PlacementError::OutOfBounds);
        }
        if self.terrain.base_owner(tile) != Some(side) {
            return Err(PlacementError::NotOwnBase);
        }
        if state.board.tile_occupied(tile) {
            return Err(PlacementError::DestinationOccupiedBySameOwner);
        }
        Ok(())
    }

    /// Drop a reserve piece onto the board and pass the turn. Placement is not a move, so no
    /// movement rules apply and no captures or terrain effects occur.
    pub fn do_placement(
        &self,
        side: Side,
        index: usize,
        tile: Tile,
        state: &GameState,
    ) -> Result<(GameState, PlacementOutcome), PlacementError> {
        self.check_placement_validity(side, index, tile, state)?;
        let mut state = state.clone();
        let piece = state
            .reserve_mut(side)
            .take(index)
            .ok_or(PlacementError::BadReserveIndex(index))?;
        state.board.set_piece(tile, piece);
        state.turn += 1;
        state.side_to_play = side.other();
        Ok((state, PlacementOutcome { piece, tile }))
    }

    /// Check whether a play is valid for the given side. If so, return the piece that would move.
    pub fn check_play_validity_for_side(
        &self,
        play: Play,
        side: Side,
        state: &GameState,
    ) -> Result<Piece, MoveError> {
        if state.status != Ongoing {
            return Err(GameOver);
        }
        if !(tile_in_bounds(play.from) && tile_in_bounds(play.to)) {
            return Err(OutOfBounds);
        }
        let piece = state.board.get_piece(play.from).ok_or(NoPiece)?;
        if piece.side != side {
            return Err(NotYourPiece);
        }
        let defender = state.board.get_piece(play.to);
        if defender.is_some_and(|d| !piece.is_enemy_of(&d)) {
            return Err(DestinationOccupiedBySameOwner);
        }
        let terrain = self.terrain.tile_terrain(play.to);
        if !piece.can_move(play.from, play.to, terrain) {
            return Err(IllegalGeometryOrTerrain);
        }
        let defender_is_king = defender.is_some_and(|d| d.piece_type == King);
        if defender_is_king && !self.rules.king_slayers.contains(piece) {
            return Err(IllegalKingCapture);
        }
        Ok(piece)
    }

    /// Check whether a play is valid for the side whose turn it is.
    pub fn check_play_validity(&self, play: Play, state: &GameState) -> Result<Piece, MoveError> {
        self.check_play_validity_for_side(play, state.side_to_play, state)
    }

    /// Get the outcome of the game, if any, after `mover` has moved to `to` and `removed` have
    /// been taken off the board. `king_demoted` indicates that the mover was a King that was
    /// turned into a pawn on arrival.
    pub fn get_game_outcome(
        &self,
        mover: Piece,
        to: Tile,
        removed: &[Piece],
        king_demoted: bool,
        state: &GameState,
    ) -> Option<GameOutcome> {
        let side = mover.side;
        let enemy = side.other();
        if removed.iter().any(|p| p.side == enemy && p.piece_type == King) {
            return Some(Win(KingCaptured, side));
        }
        if self.terrain.base_owner(to) == Some(enemy) {
            return Some(Win(BaseReached, side));
        }
        if king_demoted || removed.iter().any(|p| p.side == side && p.piece_type == King) {
            return Some(Win(KingLost, enemy));
        }
        if state.pieces_remaining(enemy) == 0 {
            return Some(Win(AllCaptured, side));
        }
        None
    }

    /// Actually "do" a move: check validity, resolve captures (including detonation), apply any
    /// terrain effect, assess the game outcome and pass the turn if the game continues. Returns the
    /// new state and a description of what happened.
    pub fn do_move(
        &self,
        play: Play,
        state: &GameState,
    ) -> Result<(GameState, PlayOutcome), MoveError> {
        let mover = self.check_play_validity(play, state)?;
        let mut state = state.clone();
        let mut removed: Vec<Piece> = vec![];
        let mut captures: Vec<Tile> = vec![];
        let mut detonated = false;

        // Lift the mover first so that a detonation next to its own tile does not remove it.
        state.board.clear_tile(play.from);
        if state.board.tile_occupied(play.to) {
            let blast = match mover.piece_type.special_ability() {
                SpecialAbility::Detonate => {
                    detonated = true;
                    play.to.neighborhood()
                }
                SpecialAbility::None => vec![play.to],
            };
            for t in blast {
                if let Some(p) = state.board.clear_tile(t) {
                    removed.push(p);
                    captures.push(t);
                }
            }
        }
        captures.sort();
        state.board.set_piece(play.to, mover);

        let mut demoted = false;
        if self.rules.desert_demotion && self.terrain.tile_terrain(play.to) == TerrainType::Desert {
            let pawn = Piece::new(state.alloc_id(), Pawn, mover.side);
            state.board.set_piece(play.to, pawn);
            demoted = true;
            debug!("{mover} demoted to pawn at {}", play.to);
        }

        if detonated {
            debug!("{mover} detonated at {}, removing {} pieces", play.to, removed.len());
        } else if !removed.is_empty() {
            debug!("{mover} captured {} at {}", removed[0], play.to);
        }

        let game_outcome = self.get_game_outcome(
            mover,
            play.to,
            &removed,
            demoted && mover.piece_type == King,
            &state,
        );

        state.turn += 1;
        match game_outcome {
            Some(outcome) => {
                debug!("Game over after {play}: {outcome:?}");
                state.status = Over(outcome);
            }
            None => state.side_to_play = mover.side.other(),
        }

        Ok((state, PlayOutcome { captures, detonated, demoted, game_outcome }))
    }

    /// The tiles the piece at the given tile could legally move to, ignoring whose turn it is.
    /// Returns an error if there is no piece at the given tile.
    pub fn legal_moves(&self, tile: Tile, state: &GameState) -> Result<Vec<Tile>, BoardError> {
        let piece = state.board.get_piece(tile).ok_or(BoardError::NoPiece)?;
        let origin = Coords::from(tile);
        let mut moves = vec![];
        // No piece moves more than two tiles in either direction.
        for dy in -2..=2i8 {
            for dx in -2..=2i8 {
                let Ok(to) = Tile::try_from(origin + Offset::new(dx, dy)) else {
                    continue;
                };
                let play = Play::new(tile, to);
                if self.check_play_validity_for_side(play, piece.side, state).is_ok() {
                    moves.push(to);
                }
            }
        }
        Ok(moves)
    }

    /// The tiles on which the given side could place a reserve piece right now.
    pub fn placement_tiles(&self, side: Side, state: &GameState) -> Vec<Tile> {
        self.terrain
            .base_tiles(side)
            .into_iter()
            .filter(|t| !state.board.tile_occupied(*t))
            .collect()
    }

    /// Which pieces are currently hidden from their opponents.
    pub fn fog(&self, state: &GameState) -> Fog {
        if self.rules.forest_fog {
            Fog::compute(&state.board, &self.terrain)
        } else {
            Fog::clear()
        }
    }

    /// Whether the piece on the given tile may be shown to its opponent.
    pub fn is_visible_to_opponent(&self, tile: Tile, state: &GameState) -> bool {
        if self.rules.forest_fog {
            is_visible(tile, &state.board, &self.terrain)
        } else {
            state.board.tile_occupied(tile)
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::board::BoardState;
    use crate::error::{MoveError, PlacementError};
    use crate::game::logic::GameLogic;
    use crate::game::state::GameState;
    use crate::game::GameOutcome::Win;
    use crate::game::GameStatus::Over;
    use crate::game::WinReason::{AllCaptured, BaseReached, KingCaptured, KingLost};
    use crate::pieces::PieceType::{Bishop, Bomb, Pawn, Queen};
    use crate::pieces::Side::{Player1, Player2};
    use crate::pieces::{PieceType, Side};
    use crate::play::Play;
    use crate::preset::rules;
    use crate::terrain::TerrainMap;
    use crate::tiles::Tile;
    use std::collections::HashSet;
    use std::str::FromStr;

    fn logic() -> GameLogic {
        GameLogic::new(rules::STANDARD, TerrainMap::standard())
    }

    /// Build a state from an otherwise empty board with the given pieces on it.
    fn state_with(pieces: &[(Tile, char)], side: Side) -> GameState {
        let mut rows = vec![vec!['.'; 14]; 14];
        for (t, c) in pieces {
            rows[t.row as usize][t.col as usize] = *c;
        }
        let s: String = rows
            .iter()
            .map(|r| r.iter().collect::<String>() + "\n")
            .collect();
        GameState::from_board(BoardState::from_str(&s).unwrap(), side)
    }

    fn play(s: &str) -> Play {
        Play::from_str(s).unwrap()
    }

    fn kind_at(state: &GameState, tile: Tile) -> Option<(PieceType, Side)> {
        state.board.get_piece(tile).map(|p| (p.piece_type, p.side))
    }

    const K1: (Tile, char) = (Tile::new(0, 13), 'K');
    const K2: (Tile, char) = (Tile::new(0, 0), 'k');

    #[test]
    fn test_validity_errors() {
        let l = logic();
        let s = state_with(
            &[K1, K2, (Tile::new(5, 5), 'N'), (Tile::new(6, 7), 'P'), (Tile::new(3, 3), 'q')],
            Player1,
        );
        assert_eq!(
            l.check_play_validity(Play::new(Tile::new(5, 5), Tile::new(14, 5)), &s),
            Err(MoveError::OutOfBounds)
        );
        assert_eq!(l.check_play_validity(play("b2-b3"), &s), Err(MoveError::NoPiece));
        assert_eq!(l.check_play_validity(play("d4-d6"), &s), Err(MoveError::NotYourPiece));
        assert_eq!(
            l.check_play_validity(play("f6-g8"), &s),
            Err(MoveError::DestinationOccupiedBySameOwner)
        );
        assert_eq!(
            l.check_play_validity(play("f6-f7"), &s),
            Err(MoveError::IllegalGeometryOrTerrain)
        );
        // h7 is river.
        assert_eq!(
            l.check_play_validity(play("f6-h7"), &s),
            Err(MoveError::IllegalGeometryOrTerrain)
        );
        assert!(l.check_play_validity(play("f6-h5"), &s).is_ok());
        // Player 2's queen is fine to move on Player 2's turn only.
        assert!(l.check_play_validity_for_side(play("d4-f4"), Player2, &s).is_ok());
    }

    #[test]
    fn test_ordinary_capture() {
        let l = logic();
        let s = state_with(&[K1, K2, (Tile::new(5, 5), 'Q'), (Tile::new(7, 5), 'b')], Player1);
        let (new, outcome) = l.do_move(Play::new(Tile::new(5, 5), Tile::new(7, 5)), &s).unwrap();
        assert_eq!(outcome.captures, vec![Tile::new(7, 5)]);
        assert!(!outcome.detonated);
        assert!(!outcome.demoted);
        assert_eq!(outcome.game_outcome, None);
        assert_eq!(kind_at(&new, Tile::new(7, 5)), Some((Queen, Player1)));
        assert!(!new.board.tile_occupied(Tile::new(5, 5)));
        assert_eq!(new.side_to_play, Player2);
        assert_eq!(new.turn, 1);
        assert_eq!(new.board.len(), 3);
        // The original state is untouched.
        assert_eq!(s.board.len(), 4);
        assert_eq!(s.side_to_play, Player1);
    }

    #[test]
    fn test_king_capture_restrictions() {
        let l = logic();
        let target = Tile::new(6, 4);
        for (c, from, slayer) in [
            ('N', Tile::new(4, 3), false),
            ('Q', Tile::new(4, 2), false),
            ('B', Tile::new(4, 2), false),
            ('K', Tile::new(5, 4), false),
            ('P', Tile::new(5, 4), true),
            ('X', Tile::new(5, 4), true),
        ] {
            let s = state_with(&[K1, (target, 'k'), (from, c)], Player1);
            let result = l.do_move(Play::new(from, target), &s);
            if slayer {
                let (new, outcome) = result.unwrap();
                assert_eq!(outcome.game_outcome, Some(Win(KingCaptured, Player1)));
                assert_eq!(new.status, Over(Win(KingCaptured, Player1)));
                assert_eq!(new.board.find_king(Player2), None);
                assert_eq!(new.side_to_play, Player1);
            } else {
                assert_eq!(result.unwrap_err(), MoveError::IllegalKingCapture, "attacker {c}");
            }
        }
    }

    #[test]
    fn test_detonation() {
        let l = logic();
        let s = state_with(
            &[
                K1,
                K2,
                (Tile::new(5, 5), 'X'),
                (Tile::new(5, 6), 'q'),
                (Tile::new(4, 7), 'p'),
                (Tile::new(6, 6), 'N'),
                (Tile::new(6, 7), 'n'),
                (Tile::new(8, 8), 'B'),
            ],
            Player1,
        );
        let (new, outcome) = l.do_move(Play::new(Tile::new(5, 5), Tile::new(5, 6)), &s).unwrap();
        assert!(outcome.detonated);
        let captured: HashSet<Tile> = outcome.captures.iter().copied().collect();
        assert_eq!(
            captured,
            hashset!(Tile::new(5, 6), Tile::new(4, 7), Tile::new(6, 6), Tile::new(6, 7))
        );
        assert_eq!(kind_at(&new, Tile::new(5, 6)), Some((Bomb, Player1)));
        assert_eq!(kind_at(&new, Tile::new(8, 8)), Some((Bishop, Player1)));
        assert!(!new.board.tile_occupied(Tile::new(5, 5)));
        assert_eq!(new.board.len(), 4);
        assert_eq!(outcome.game_outcome, None);
    }

    #[test]
    fn test_bomb_move_to_empty_tile_does_not_detonate() {
        let l = logic();
        let s = state_with(&[K1, K2, (Tile::new(5, 5), 'X'), (Tile::new(6, 6), 'n')], Player1);
        let (new, outcome) = l.do_move(Play::new(Tile::new(5, 5), Tile::new(5, 6)), &s).unwrap();
        assert!(!outcome.detonated);
        assert!(outcome.captures.is_empty());
        assert!(new.board.tile_occupied(Tile::new(6, 6)));
    }

    #[test]
    fn test_detonation_kills_own_king() {
        let l = logic();
        let s = state_with(
            &[
                (Tile::new(0, 13), 'k'),
                (Tile::new(5, 5), 'X'),
                (Tile::new(5, 6), 'q'),
                (Tile::new(4, 7), 'K'),
            ],
            Player1,
        );
        let (new, outcome) = l.do_move(Play::new(Tile::new(5, 5), Tile::new(5, 6)), &s).unwrap();
        assert_eq!(outcome.game_outcome, Some(Win(KingLost, Player2)));
        assert_eq!(new.status, Over(Win(KingLost, Player2)));
    }

    #[test]
    fn test_demotion() {
        let l = logic();
        // Desert strips are at columns 11-13 of rows 5 and 8.
        let s = state_with(
            &[K1, K2, (Tile::new(10, 4), 'X'), (Tile::new(10, 9), 'N')],
            Player1,
        );
        let bomb = s.board.get_piece(Tile::new(10, 4)).unwrap();
        let (new, outcome) = l.do_move(Play::new(Tile::new(10, 4), Tile::new(11, 5)), &s).unwrap();
        assert!(outcome.demoted);
        let pawn = new.board.get_piece(Tile::new(11, 5)).unwrap();
        assert_eq!((pawn.piece_type, pawn.side), (Pawn, Player1));
        assert_ne!(pawn.id, bomb.id);
        assert_eq!(new.board.find_piece(bomb.id), None);

        // Knights step a single tile onto desert, and are demoted too.
        let (new, outcome) = l.do_move(Play::new(Tile::new(10, 9), Tile::new(11, 8)), &s).unwrap();
        assert!(outcome.demoted);
        assert_eq!(kind_at(&new, Tile::new(11, 8)), Some((Pawn, Player1)));
    }

    #[test]
    fn test_no_demotion_when_disabled() {
        let mut l = logic();
        l.rules.desert_demotion = false;
        let s = state_with(&[K1, K2, (Tile::new(10, 4), 'X')], Player1);
        let (new, outcome) = l.do_move(Play::new(Tile::new(10, 4), Tile::new(11, 5)), &s).unwrap();
        assert!(!outcome.demoted);
        assert_eq!(kind_at(&new, Tile::new(11, 5)), Some((Bomb, Player1)));
    }

    #[test]
    fn test_king_demotion_loses() {
        let l = logic();
        let s = state_with(&[K2, (Tile::new(10, 4), 'K')], Player1);
        let (new, outcome) = l.do_move(Play::new(Tile::new(10, 4), Tile::new(11, 5)), &s).unwrap();
        assert!(outcome.demoted);
        assert_eq!(new.board.find_king(Player1), None);
        assert_eq!(outcome.game_outcome, Some(Win(KingLost, Player2)));
    }

    #[test]
    fn test_base_reached() {
        let l = logic();
        let s = state_with(&[K2, (Tile::new(12, 2), 'K')], Player1);
        let (new, outcome) = l.do_move(Play::new(Tile::new(12, 2), Tile::new(12, 1)), &s).unwrap();
        assert_eq!(outcome.game_outcome, Some(Win(BaseReached, Player1)));
        assert_eq!(new.side_to_play, Player1);

        // Reaching your own base is not a win.
        let s = state_with(&[K1, K2, (Tile::new(10, 12), 'P')], Player1);
        let (new, outcome) = l
            .do_move(Play::new(Tile::new(10, 12), Tile::new(11, 12)), &s)
            .unwrap();
        assert_eq!(outcome.game_outcome, None);
        assert_eq!(new.side_to_play, Player2);
    }

    #[test]
    fn test_all_captured() {
        let l = logic();
        // Player 2 has only a queen left and nothing in reserve.
        let s = state_with(&[K1, (Tile::new(5, 5), 'N'), (Tile::new(6, 7), 'q')], Player1);
        let (new, outcome) = l.do_move(Play::new(Tile::new(5, 5), Tile::new(6, 7)), &s).unwrap();
        assert_eq!(outcome.game_outcome, Some(Win(AllCaptured, Player1)));
        assert_eq!(new.pieces_remaining(Player2), 0);
        assert_eq!(new.side_to_play, Player1);
        assert_eq!(
            l.do_move(Play::new(Tile::new(0, 13), Tile::new(1, 13)), &new).unwrap_err(),
            MoveError::GameOver
        );
    }

    #[test]
    fn test_legal_moves() {
        let l = logic();
        let s = state_with(&[K2, (Tile::new(5, 5), 'K')], Player1);
        assert_eq!(l.legal_moves(Tile::new(5, 5), &s).unwrap().len(), 8);
        assert!(l.legal_moves(Tile::new(9, 9), &s).is_err());

        // Bishop at (6, 5): (4, 3) and (8, 3) are land, (4, 7) is mountain and (8, 7) is river.
        let s = state_with(&[K1, K2, (Tile::new(6, 5), 'B')], Player1);
        let moves: HashSet<Tile> = l
            .legal_moves(Tile::new(6, 5), &s)
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(moves, hashset!(Tile::new(4, 3), Tile::new(8, 3)));
    }

    #[test]
    fn test_placement() {
        let l = logic();
        let s = GameState::new(Player1);
        assert_eq!(l.placement_tiles(Player1, &s).len(), 6);
        let (new, outcome) = l.do_placement(Player1, 3, Tile::new(12, 13), &s).unwrap();
        assert_eq!(outcome.piece.piece_type, Pawn);
        assert_eq!(outcome.tile, Tile::new(12, 13));
        assert_eq!(new.reserve(Player1).len(), 10);
        assert_eq!(new.side_to_play, Player2);
        assert_eq!(new.turn, 1);
        assert_eq!(l.placement_tiles(Player1, &new).len(), 5);

        assert_eq!(
            l.do_placement(Player2, 0, Tile::new(12, 13), &new).unwrap_err(),
            PlacementError::NotOwnBase
        );
        assert_eq!(
            l.do_placement(Player1, 0, Tile::new(12, 12), &new).unwrap_err(),
            PlacementError::NotYourTurn
        );
        assert_eq!(
            l.do_placement(Player2, 11, Tile::new(12, 0), &new).unwrap_err(),
            PlacementError::BadReserveIndex(11)
        );
        assert_eq!(
            l.do_placement(Player2, 0, Tile::new(14, 0), &new).unwrap_err(),
            PlacementError::OutOfBounds
        );

        let (new, _) = l.do_placement(Player2, 0, Tile::new(12, 0), &new).unwrap();
        assert_eq!(
            l.do_placement(Player1, 0, Tile::new(12, 13), &new).unwrap_err(),
            PlacementError::DestinationOccupiedBySameOwner
        );
    }

    #[test]
    fn test_placement_with_empty_reserve() {
        let l = logic();
        let s = state_with(&[K1, K2], Player1);
        assert_eq!(
            l.do_placement(Player1, 0, Tile::new(12, 13), &s).unwrap_err(),
            PlacementError::ReserveEmpty
        );
    }

    #[test]
    fn test_fog_respects_rules() {
        let mut l = logic();
        // Forest at columns 4-6 of rows 2-3.
        let s = state_with(&[K1, K2, (Tile::new(4, 2), 'N')], Player2);
        assert!(l.fog(&s).is_hidden(Tile::new(4, 2)));
        assert!(!l.is_visible_to_opponent(Tile::new(4, 2), &s));
        l.rules = rules::OPEN_FIELD;
        assert!(l.fog(&s).is_empty());
        assert!(l.is_visible_to_opponent(Tile::new(4, 2), &s));
        assert!(!l.is_visible_to_opponent(Tile::new(9, 9), &s));
    }
}
