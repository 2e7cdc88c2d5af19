//! Checkmate detection for the side that just got checked.
//!
//! The analysis follows the three classical outs: the king steps away, the
//! single attacker is captured, or the attack line is blocked. King escape
//! trials run on board copies.

use crate::attack;
use crate::board::Board;
use crate::geometry;
use crate::types::{Color, Coord, Piece};

/// True if side `color` is checkmated in this position.
///
/// A position where `color` has no king, or where the king is not even in
/// check, is never a mate.
pub fn is_checkmate(b: &Board, color: Color) -> bool {
    let king = match b.king(color) {
        Some(king) => king,
        None => return false,
    };
    let enemy = color.inv();
    if !attack::is_attacked(b, king, enemy) {
        return false;
    }
    if can_king_escape(b, king, color) {
        return false;
    }
    let attackers = attack::attackers(b, king, enemy);
    if attackers.len() > 1 {
        // A double check leaves only king moves, and those are exhausted.
        return true;
    }
    let attacker = attackers[0];
    if can_reach(b, color, king, attacker) {
        return false;
    }
    if b.get(attacker).piece() != Some(Piece::Knight) {
        for gap in attack::between(attacker, king) {
            if can_reach(b, color, king, gap) {
                return false;
            }
        }
    }
    true
}

/// Tries all eight king steps on a copy of the board.
fn can_king_escape(b: &Board, king: Coord, color: Color) -> bool {
    let enemy = color.inv();
    for delta_file in -1..=1_isize {
        for delta_rank in -1..=1_isize {
            if delta_file == 0 && delta_rank == 0 {
                continue;
            }
            let dst = match king.try_shift(delta_file, delta_rank) {
                Some(dst) => dst,
                None => continue,
            };
            if b.get(dst).color() == Some(color) {
                continue;
            }
            let mut trial = *b;
            trial.relocate(king, dst);
            if !attack::is_attacked(&trial, dst, enemy) {
                return true;
            }
        }
    }
    false
}

/// True if some non-king piece of side `color` can go to `target`, either to
/// capture the checking piece or to stand in its way.
///
/// Pawn reach counts both its captures and its forward steps here, so a
/// blocking pawn push is found too.
fn can_reach(b: &Board, color: Color, king: Coord, target: Coord) -> bool {
    Coord::iter().any(|c| {
        if c == king {
            return false;
        }
        let cell = b.get(c);
        match (cell.color(), cell.piece()) {
            (Some(side), Some(piece)) if side == color && piece != Piece::King => {
                geometry::reaches(piece, color, c, target)
                    && attack::is_path_clear(b, piece, c, target)
            }
            _ => false,
        }
    })
}
