//! Replays parsed movetext on a board, cross-checking every claim the
//! notation makes: capture marks, disambiguation hints, check and checkmate
//! marks, and the declared result.

use crate::attack;
use crate::board::Board;
use crate::geometry;
use crate::mate;
use crate::movetext::{self, GameResult, MoveText};
use crate::san::{self, Data};
use crate::types::{CastlingSide, Cell, Color, Coord, File, Piece, Rank};
use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ReplayErrorKind {
    #[error("{0:?}-side castling is not available")]
    Castling(CastlingSide),
    #[error("no piece can perform this move")]
    NoCandidate,
    #[error("more than one piece can perform this move")]
    AmbiguousCandidates,
    #[error("capture mark doesn't match the target square")]
    CaptureMismatch,
    #[error("file disambiguation doesn't match the position")]
    FileDisambiguationMismatch,
    #[error("rank disambiguation doesn't match the position")]
    RankDisambiguationMismatch,
    #[error("check mark doesn't match the position")]
    CheckMismatch,
    #[error("checkmate mark doesn't match the position")]
    CheckmateMismatch,
    #[error("declared result {declared} contradicts the final position")]
    ResultMismatch { declared: GameResult },
    #[error("the king left the board")]
    MissingKing,
}

/// Validation failure, tagged with the zero-based half-move index and the
/// action text that caused it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("half-move {ply} ({action}): {kind}")]
pub struct ReplayError {
    pub ply: usize,
    pub action: String,
    pub kind: ReplayErrorKind,
}

/// Replays the whole movetext from the standard opening position and
/// returns the final board.
///
/// The input is never mutated, so a successful replay can be repeated on
/// the same [`MoveText`] with the same outcome.
pub fn replay(moves: &MoveText) -> Result<Board, ReplayError> {
    let mut board = Board::initial();
    let total = moves.ply_count();
    for (ply, mv) in moves.plies().enumerate() {
        let last = ply + 1 == total;
        apply(&mut board, mv, last, moves.result).map_err(|kind| ReplayError {
            ply,
            action: mv.action().to_string(),
            kind,
        })?;
    }
    Ok(board)
}

/// Error of [`check`]: either the movetext doesn't parse or it doesn't
/// replay.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckError {
    #[error(transparent)]
    Parse(#[from] movetext::ParseError),
    #[error(transparent)]
    Replay(#[from] ReplayError),
}

/// Parses and replays a bare movetext string in one go.
pub fn check(text: &str) -> Result<(MoveText, Board), CheckError> {
    let moves = movetext::parse(text)?;
    let board = replay(&moves)?;
    Ok((moves, board))
}

fn apply(
    board: &mut Board,
    mv: &san::Move,
    last: bool,
    declared: GameResult,
) -> Result<(), ReplayErrorKind> {
    let color = mv.color();
    match *mv.data() {
        Data::Castling(side) => castle(board, color, side)?,
        Data::Pawn {
            dst,
            src_file,
            is_capture,
            promote,
        } => {
            let src = find_pawn(board, color, dst, src_file, is_capture)
                .ok_or(ReplayErrorKind::NoCandidate)?;
            check_consistency(board, mv, src, dst)?;
            if let Some(promote) = promote {
                board.put(dst, Cell::from_parts(color, promote.into()));
                board.put(src, Cell::EMPTY);
            } else {
                board.relocate(src, dst);
            }
        }
        Data::Simple {
            piece,
            file,
            rank,
            dst,
            ..
        } => {
            let src = find_piece(board, piece, color, dst, file, rank)?;
            check_consistency(board, mv, src, dst)?;
            board.relocate(src, dst);
        }
    }
    validate_marks(board, mv, last, declared)
}

/// Capture and disambiguation marks must agree with the position before
/// the move is applied.
fn check_consistency(
    board: &Board,
    mv: &san::Move,
    src: Coord,
    dst: Coord,
) -> Result<(), ReplayErrorKind> {
    if mv.is_capture() != board.get(dst).is_occupied() {
        return Err(ReplayErrorKind::CaptureMismatch);
    }
    if attack::needs_file_disambiguation(board, src, dst) != mv.file_hint().is_some() {
        return Err(ReplayErrorKind::FileDisambiguationMismatch);
    }
    if attack::needs_rank_disambiguation(board, src, dst) != mv.rank_hint().is_some() {
        return Err(ReplayErrorKind::RankDisambiguationMismatch);
    }
    Ok(())
}

/// Locates the pawn claimed by the token.
///
/// A quiet pawn move comes from one square back, or from the start rank two
/// squares back over an empty square. A capture comes from the hinted file
/// one square back; if the hinted square is wrong, the adjacent files serve
/// as a fallback.
fn find_pawn(
    board: &Board,
    color: Color,
    dst: Coord,
    src_file: Option<File>,
    is_capture: bool,
) -> Option<Coord> {
    let back = -geometry::pawn_forward(color);
    let one = dst.try_shift(0, back)?;
    if !is_capture {
        if board.get(one).is(color, Piece::Pawn) {
            return Some(one);
        }
        let two = one.try_shift(0, back)?;
        if board.get(two).is(color, Piece::Pawn)
            && two.rank() == geometry::pawn_rank(color)
            && board.get(one).is_empty()
        {
            return Some(two);
        }
        return None;
    }
    if let Some(file) = src_file {
        let src = Coord::from_parts(file, one.rank());
        if board.get(src).is(color, Piece::Pawn) && geometry::pawn_attacks(color, src, dst) {
            return Some(src);
        }
    }
    for delta_file in [-1, 1] {
        if let Some(src) = dst.try_shift(delta_file, back) {
            if board.get(src).is(color, Piece::Pawn) {
                return Some(src);
            }
        }
    }
    None
}

/// Locates the one piece the token and its hints single out.
fn find_piece(
    board: &Board,
    piece: Piece,
    color: Color,
    dst: Coord,
    file: Option<File>,
    rank: Option<Rank>,
) -> Result<Coord, ReplayErrorKind> {
    let mut found = None;
    for c in attack::candidates(board, piece, color, dst) {
        if file.map_or(false, |f| c.file() != f) {
            continue;
        }
        if rank.map_or(false, |r| c.rank() != r) {
            continue;
        }
        if found.is_some() {
            return Err(ReplayErrorKind::AmbiguousCandidates);
        }
        found = Some(c);
    }
    found.ok_or(ReplayErrorKind::NoCandidate)
}

/// Performs castling if it is available in the position.
///
/// Availability here is positional: king and rook on their home squares,
/// the squares between them empty, the king not in check and its transit
/// square not attacked. Whether either piece has moved before is not
/// tracked.
fn castle(board: &mut Board, color: Color, side: CastlingSide) -> Result<(), ReplayErrorKind> {
    let rank = geometry::home_rank(color);
    let (rook_file, empties, king_dst, rook_dst): (_, &[File], _, _) = match side {
        CastlingSide::King => (File::H, &[File::F, File::G], File::G, File::F),
        CastlingSide::Queen => (File::A, &[File::B, File::C, File::D], File::C, File::D),
    };
    let king_src = Coord::from_parts(File::E, rank);
    let rook_src = Coord::from_parts(rook_file, rank);
    let fail = ReplayErrorKind::Castling(side);
    if !board.get(king_src).is(color, Piece::King) || !board.get(rook_src).is(color, Piece::Rook) {
        return Err(fail);
    }
    if empties.iter().any(|&f| board.get2(f, rank).is_occupied()) {
        return Err(fail);
    }
    let enemy = color.inv();
    if attack::is_attacked(board, king_src, enemy) {
        return Err(fail);
    }
    // The king passes over the rook's destination square on either side.
    if attack::is_attacked(board, Coord::from_parts(rook_dst, rank), enemy) {
        return Err(fail);
    }
    board.relocate(king_src, Coord::from_parts(king_dst, rank));
    board.relocate(rook_src, Coord::from_parts(rook_dst, rank));
    Ok(())
}

/// Check and checkmate marks must agree with the resulting position. The
/// checkmate analysis only runs on the last half-move, so a `#` anywhere
/// earlier is rejected, and a verified mate must match the declared result.
fn validate_marks(
    board: &Board,
    mv: &san::Move,
    last: bool,
    declared: GameResult,
) -> Result<(), ReplayErrorKind> {
    let enemy = mv.color().inv();
    let king = board.king(enemy).ok_or(ReplayErrorKind::MissingKing)?;
    let checked = attack::is_attacked(board, king, mv.color());
    if checked != mv.claims_check() {
        return Err(ReplayErrorKind::CheckMismatch);
    }
    if last {
        let mated = mate::is_checkmate(board, enemy);
        if mated != mv.claims_checkmate() {
            return Err(ReplayErrorKind::CheckmateMismatch);
        }
        if mated && declared != GameResult::from_winner(mv.color()) {
            return Err(ReplayErrorKind::ResultMismatch { declared });
        }
    } else if mv.claims_checkmate() {
        return Err(ReplayErrorKind::CheckmateMismatch);
    }
    Ok(())
}
