use crate::collections::PieceSet;
use crate::pieces::Side;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A set of rules for a game. See [`crate::preset::rules`] for the standard rule sets.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Ruleset {
    /// The side that places (and later moves) first.
    pub starting_side: Side,
    /// Whether pieces in forests are hidden from the opponent unless an enemy piece is also in a
    /// forest.
    pub forest_fog: bool,
    /// Whether a piece that moves onto desert is replaced by a pawn. Both presets turn this on;
    /// turning it off gives a non-standard variant in which desert only restricts movement.
    pub desert_demotion: bool,
    /// The types of piece that may capture a King.
    pub king_slayers: PieceSet,
}

impl Default for Ruleset {
    fn default() -> Self {
        crate::preset::rules::STANDARD
    }
}
