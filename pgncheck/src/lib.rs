//! # pgncheck
//!
//! A validating replayer for chess games in PGN notation. It parses tag
//! pairs and movetext, decodes each SAN token, and replays the game on a
//! board while cross-checking everything the notation claims: which piece
//! moves, capture marks, disambiguation hints, check and checkmate marks,
//! and the declared result.
//!
//! ```
//! use pgncheck::{replay, types::{Color, Piece}};
//!
//! let (moves, board) = replay::check("1. e4 e5 2. Nf3 Nc6 *").unwrap();
//! assert_eq!(moves.ply_count(), 4);
//! assert!(board.get("f3".parse().unwrap()).is(Color::White, Piece::Knight));
//! ```
//!
//! Whole files go through [`pgn::parse_games`], which splits the input into
//! games and keeps going past broken ones.
//!
//! The validator deliberately stops short of full rules-of-chess legality:
//! en passant captures, castling rights history, and pins against the
//! mover's own king are not tracked.

pub mod attack;
pub mod board;
pub mod mate;
pub mod movetext;
pub mod pgn;
pub mod replay;
pub mod san;

pub use pgncheck_base::geometry;
pub use pgncheck_base::types;

pub use board::Board;
pub use movetext::{GameResult, MoveText, Round};
pub use pgn::GameRecord;
pub use replay::{ReplayError, ReplayErrorKind};
pub use types::{CastlingSide, Cell, Color, Coord, File, Piece, PromotePiece, Rank};
