//! Pure per-kind move geometry, independent of any board state.

use crate::types::{Color, Coord, Piece, Rank};

pub const fn home_rank(c: Color) -> Rank {
    match c {
        Color::White => Rank::R1,
        Color::Black => Rank::R8,
    }
}

pub const fn pawn_rank(c: Color) -> Rank {
    match c {
        Color::White => Rank::R2,
        Color::Black => Rank::R7,
    }
}

/// Rank delta of a single pawn step for the given side.
pub const fn pawn_forward(c: Color) -> isize {
    match c {
        Color::White => 1,
        Color::Black => -1,
    }
}

/// True if a piece of the given kind and color could step from `src` to
/// `dst` on an empty board.
///
/// Occupancy is deliberately ignored: obstruction is the caller's concern.
/// The pawn case covers forward steps (one, or two from the start rank) and
/// the single forward-diagonal step used for captures.
pub fn reaches(piece: Piece, color: Color, src: Coord, dst: Coord) -> bool {
    if src == dst {
        return false;
    }
    let d_file = (dst.file().index() as isize - src.file().index() as isize).abs();
    let d_rank = dst.rank().index() as isize - src.rank().index() as isize;
    match piece {
        Piece::Pawn => {
            let forward = pawn_forward(color);
            if d_file == 0 && d_rank == forward {
                return true;
            }
            if d_file == 0 && d_rank == 2 * forward && src.rank() == pawn_rank(color) {
                return true;
            }
            d_file == 1 && d_rank == forward
        }
        Piece::Knight => {
            (d_file == 1 && d_rank.abs() == 2) || (d_file == 2 && d_rank.abs() == 1)
        }
        Piece::Bishop => d_file == d_rank.abs(),
        Piece::Rook => d_file == 0 || d_rank == 0,
        Piece::Queen => d_file == 0 || d_rank == 0 || d_file == d_rank.abs(),
        Piece::King => d_file <= 1 && d_rank.abs() <= 1,
    }
}

/// True if a pawn of color `color` standing on `src` attacks `dst`.
///
/// This is narrower than [`reaches`]: only the two forward-diagonal squares
/// count, never the forward-move squares.
pub fn pawn_attacks(color: Color, src: Coord, dst: Coord) -> bool {
    let d_file = (dst.file().index() as isize - src.file().index() as isize).abs();
    let d_rank = dst.rank().index() as isize - src.rank().index() as isize;
    d_file == 1 && d_rank == pawn_forward(color)
}
