pub mod pieceset;

pub use pieceset::PieceSet;
