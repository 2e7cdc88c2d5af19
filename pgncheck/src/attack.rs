//! Board-aware move primitives: path obstruction, attack detection, and the
//! disambiguation predicates used to cross-check SAN hints.

use crate::board::Board;
use crate::geometry;
use crate::types::{Color, Coord, Piece};
use arrayvec::ArrayVec;

/// Squares holding like pieces of one side. Eight promoted pieces plus the
/// two originals never exceed ten, so sixteen is a comfortable bound.
pub type CandidateList = ArrayVec<Coord, 16>;

/// Squares strictly between two aligned squares. The longest line on an 8x8
/// board has six inner squares.
pub type LineSquares = ArrayVec<Coord, 6>;

fn line_step(src: Coord, dst: Coord) -> (isize, isize) {
    let d_file = (dst.file().index() as isize - src.file().index() as isize).signum();
    let d_rank = (dst.rank().index() as isize - src.rank().index() as isize).signum();
    (d_file, d_rank)
}

/// True if all squares strictly between `src` and `dst` are empty.
///
/// Knights are exempt. For the other kinds the caller guarantees the two
/// squares are aligned the way the piece moves, which is what
/// [`geometry::reaches`] already established.
pub fn is_path_clear(b: &Board, piece: Piece, src: Coord, dst: Coord) -> bool {
    if piece == Piece::Knight {
        return true;
    }
    let (d_file, d_rank) = line_step(src, dst);
    let mut cur = src.try_shift(d_file, d_rank);
    while let Some(c) = cur {
        if c == dst {
            return true;
        }
        if b.get(c).is_occupied() {
            return false;
        }
        cur = c.try_shift(d_file, d_rank);
    }
    true
}

/// Squares strictly between `src` and `dst`, walking from `src` towards
/// `dst`. Empty when the squares are adjacent or not aligned on a line.
pub fn between(src: Coord, dst: Coord) -> LineSquares {
    let mut res = LineSquares::new();
    let d_file = (dst.file().index() as isize - src.file().index() as isize).abs();
    let d_rank = (dst.rank().index() as isize - src.rank().index() as isize).abs();
    if d_file != 0 && d_rank != 0 && d_file != d_rank {
        return res;
    }
    let (step_file, step_rank) = line_step(src, dst);
    let mut cur = src.try_shift(step_file, step_rank);
    while let Some(c) = cur {
        if c == dst {
            break;
        }
        res.push(c);
        cur = c.try_shift(step_file, step_rank);
    }
    res
}

/// True if some piece of color `by` attacks the square `target`.
///
/// Pawns attack only their two forward diagonals here. Their forward-move
/// squares count as reachable in [`geometry::reaches`], but a pawn never
/// gives check along its own file.
pub fn is_attacked(b: &Board, target: Coord, by: Color) -> bool {
    Coord::iter().any(|c| attacks_from(b, c, target, by))
}

/// Squares of all pieces of color `by` that attack `target`.
pub fn attackers(b: &Board, target: Coord, by: Color) -> CandidateList {
    Coord::iter()
        .filter(|&c| attacks_from(b, c, target, by))
        .collect()
}

fn attacks_from(b: &Board, src: Coord, target: Coord, by: Color) -> bool {
    let cell = b.get(src);
    let piece = match (cell.color(), cell.piece()) {
        (Some(c), Some(p)) if c == by => p,
        _ => return false,
    };
    if piece == Piece::Pawn {
        return geometry::pawn_attacks(by, src, target);
    }
    geometry::reaches(piece, by, src, target) && is_path_clear(b, piece, src, target)
}

/// Squares of all pieces of kind `piece` and color `color` that can go to
/// `dst` through an unobstructed path.
///
/// For pawns this includes forward moves along with diagonal steps, so the
/// replay resolves pawns through their own dedicated lookup instead.
pub fn candidates(b: &Board, piece: Piece, color: Color, dst: Coord) -> CandidateList {
    Coord::iter()
        .filter(|&c| {
            b.get(c).is(color, piece)
                && geometry::reaches(piece, color, c, dst)
                && is_path_clear(b, piece, c, dst)
        })
        .collect()
}

/// True if SAN requires a file letter for the piece on `src` moving to
/// `dst` in this position.
///
/// For pawns a file letter appears exactly on captures, which is when the
/// source and destination files differ. For the other kinds it is required
/// when another like piece on a different file could also make the move.
pub fn needs_file_disambiguation(b: &Board, src: Coord, dst: Coord) -> bool {
    let cell = b.get(src);
    let (color, piece) = match (cell.color(), cell.piece()) {
        (Some(c), Some(p)) => (c, p),
        _ => return false,
    };
    if piece == Piece::Pawn {
        return src.file() != dst.file();
    }
    other_candidates(b, color, piece, src, dst).any(|c| c.file() != src.file())
}

/// True if SAN requires a rank digit for the piece on `src` moving to
/// `dst` in this position.
///
/// Pawns never take one. Otherwise a rank digit is required when some
/// other like candidate stands on a different rank and a candidate shares
/// the mover's file, so the file letter alone would not settle it.
pub fn needs_rank_disambiguation(b: &Board, src: Coord, dst: Coord) -> bool {
    let cell = b.get(src);
    let (color, piece) = match (cell.color(), cell.piece()) {
        (Some(c), Some(p)) => (c, p),
        _ => return false,
    };
    if piece == Piece::Pawn {
        return false;
    }
    let mut other_rank = false;
    let mut shared_file = false;
    for c in other_candidates(b, color, piece, src, dst) {
        if c.rank() != src.rank() {
            other_rank = true;
        }
        if c.file() == src.file() {
            shared_file = true;
        }
    }
    other_rank && shared_file
}

/// Like candidates for the same destination, excluding `src` itself.
fn other_candidates<'a>(
    b: &'a Board,
    color: Color,
    piece: Piece,
    src: Coord,
    dst: Coord,
) -> impl Iterator<Item = Coord> + 'a {
    Coord::iter().filter(move |&c| {
        c != src
            && b.get(c).is(color, piece)
            && geometry::reaches(piece, color, c, dst)
            && is_path_clear(b, piece, c, dst)
    })
}

/// True if `color`'s own king is attacked in this position.
pub fn is_in_check(b: &Board, color: Color) -> bool {
    match b.king(color) {
        Some(king) => is_attacked(b, king, color.inv()),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Cell;
    use std::str::FromStr;

    fn sq(s: &str) -> Coord {
        Coord::from_str(s).unwrap()
    }

    fn put(b: &mut Board, s: &str, color: Color, piece: Piece) {
        b.put(sq(s), Cell::from_parts(color, piece));
    }

    #[test]
    fn test_path_clear() {
        let b = Board::initial();
        assert!(is_path_clear(&b, Piece::Rook, sq("a1"), sq("a2")));
        assert!(!is_path_clear(&b, Piece::Rook, sq("a1"), sq("a5")));
        assert!(!is_path_clear(&b, Piece::Bishop, sq("c1"), sq("h6")));
        // Knights jump.
        assert!(is_path_clear(&b, Piece::Knight, sq("b1"), sq("c3")));

        let mut b = Board::empty();
        put(&mut b, "d4", Color::White, Piece::Queen);
        put(&mut b, "f6", Color::Black, Piece::Pawn);
        assert!(is_path_clear(&b, Piece::Queen, sq("d4"), sq("f6")));
        assert!(!is_path_clear(&b, Piece::Queen, sq("d4"), sq("g7")));
    }

    #[test]
    fn test_between() {
        let line: Vec<_> = between(sq("a1"), sq("a5")).into_iter().collect();
        assert_eq!(line, vec![sq("a2"), sq("a3"), sq("a4")]);
        let line: Vec<_> = between(sq("h8"), sq("e5")).into_iter().collect();
        assert_eq!(line, vec![sq("g7"), sq("f6")]);
        assert!(between(sq("e1"), sq("e2")).is_empty());
        // Knight-shaped pairs have no inner line.
        assert!(between(sq("g1"), sq("f3")).is_empty());
    }

    #[test]
    fn test_is_attacked() {
        let b = Board::initial();
        assert!(is_attacked(&b, sq("f3"), Color::White));
        assert!(is_attacked(&b, sq("e3"), Color::White));
        assert!(!is_attacked(&b, sq("e4"), Color::White));
        assert!(!is_attacked(&b, sq("e1"), Color::Black));

        // A pawn attacks diagonals only, never its forward squares.
        let mut b = Board::empty();
        put(&mut b, "e4", Color::White, Piece::Pawn);
        assert!(is_attacked(&b, sq("d5"), Color::White));
        assert!(is_attacked(&b, sq("f5"), Color::White));
        assert!(!is_attacked(&b, sq("e5"), Color::White));
        assert!(!is_attacked(&b, sq("e6"), Color::White));
    }

    #[test]
    fn test_attackers() {
        let mut b = Board::empty();
        put(&mut b, "a1", Color::White, Piece::Rook);
        put(&mut b, "h8", Color::White, Piece::Bishop);
        put(&mut b, "c3", Color::White, Piece::Knight);
        put(&mut b, "a8", Color::Black, Piece::Rook);
        let mut atks: Vec<_> = attackers(&b, sq("a5"), Color::White).into_iter().collect();
        atks.sort_by_key(|c| c.index());
        assert_eq!(atks, vec![sq("a1")]);
        let atks = attackers(&b, sq("d5"), Color::White);
        assert_eq!(atks.len(), 2);
    }

    #[test]
    fn test_candidates() {
        let mut b = Board::empty();
        put(&mut b, "b1", Color::White, Piece::Knight);
        put(&mut b, "f3", Color::White, Piece::Knight);
        let cands = candidates(&b, Piece::Knight, Color::White, sq("d2"));
        assert_eq!(cands.len(), 2);
        // A blocker removes a candidate.
        put(&mut b, "d2", Color::White, Piece::Pawn);
        let cands = candidates(&b, Piece::Rook, Color::White, sq("d2"));
        assert!(cands.is_empty());
    }

    #[test]
    fn test_file_disambiguation() {
        // Knights on b1 and f3 both reach d2.
        let mut b = Board::empty();
        put(&mut b, "b1", Color::White, Piece::Knight);
        put(&mut b, "f3", Color::White, Piece::Knight);
        assert!(needs_file_disambiguation(&b, sq("b1"), sq("d2")));
        assert!(needs_file_disambiguation(&b, sq("f3"), sq("d2")));

        // A lone knight needs nothing.
        let mut b = Board::empty();
        put(&mut b, "b1", Color::White, Piece::Knight);
        assert!(!needs_file_disambiguation(&b, sq("b1"), sq("d2")));

        // Pawn: file letter appears exactly on file-changing moves.
        let mut b = Board::empty();
        put(&mut b, "e4", Color::White, Piece::Pawn);
        assert!(needs_file_disambiguation(&b, sq("e4"), sq("d5")));
        assert!(!needs_file_disambiguation(&b, sq("e4"), sq("e5")));
    }

    #[test]
    fn test_rank_disambiguation() {
        // Rooks on a1 and a5 both reach a3: same file, so the rank digit
        // is the one that settles it.
        let mut b = Board::empty();
        put(&mut b, "a1", Color::White, Piece::Rook);
        put(&mut b, "a5", Color::White, Piece::Rook);
        assert!(needs_rank_disambiguation(&b, sq("a1"), sq("a3")));
        assert!(!needs_file_disambiguation(&b, sq("a1"), sq("a3")));

        // Knights on b1 and f3: different files, file letter suffices.
        let mut b = Board::empty();
        put(&mut b, "b1", Color::White, Piece::Knight);
        put(&mut b, "f3", Color::White, Piece::Knight);
        assert!(!needs_rank_disambiguation(&b, sq("b1"), sq("d2")));
    }

    #[test]
    fn test_is_in_check() {
        let mut b = Board::empty();
        put(&mut b, "e1", Color::White, Piece::King);
        put(&mut b, "e8", Color::Black, Piece::Rook);
        assert!(is_in_check(&b, Color::White));
        put(&mut b, "e4", Color::Black, Piece::Pawn);
        assert!(!is_in_check(&b, Color::White));
    }
}
