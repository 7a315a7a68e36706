pub mod rules {
    use crate::collections::PieceSet;
    use crate::pieces::PieceType::{Bomb, Pawn};
    use crate::pieces::Side::Player1;
    use crate::Ruleset;

    /// The standard rules: Player 1 starts, pieces in forests are hidden, desert demotes and only
    /// Pawns and Bombs may capture a King.
    pub const STANDARD: Ruleset = Ruleset {
        starting_side: Player1,
        forest_fog: true,
        desert_demotion: true,
        king_slayers: PieceSet::from_piece_type(Pawn).with_piece_type(Bomb),
    };

    /// The standard rules without the forest fog of war. Useful for local play on a single
    /// screen.
    pub const OPEN_FIELD: Ruleset = Ruleset {
        starting_side: Player1,
        forest_fog: false,
        desert_demotion: true,
        king_slayers: PieceSet::from_piece_type(Pawn).with_piece_type(Bomb),
    };
}

pub mod layouts {
    /// Text form of [`crate::TerrainMap::standard`]. `.` land, `f` forest, `~` river,
    /// `^` mountain, `d` desert, `b` base.
    pub const STANDARD: &str = concat!(
        "...........bbb\n",
        "...........bbb\n",
        "....fff.......\n",
        "....fff.......\n",
        "..............\n",
        "..^^^......ddd\n",
        "..^^^..~~~~~~~\n",
        "..^^^..~~~~~~~\n",
        "..^^^......ddd\n",
        "..............\n",
        "....fff.......\n",
        "....fff.......\n",
        "...........bbb\n",
        "...........bbb\n",
    );
}
