//! Decoder for moves in Standard Algebraic Notation (SAN).
//!
//! Decoding is purely syntactic: no board is consulted. The produced
//! [`Move`] carries the descriptor fields exactly as written, plus the side
//! that claimed the move, and the replay layer checks them all against a
//! position later.

use crate::types::{CastlingSide, Color, Coord, CoordParseError, File, Piece, PromotePiece, Rank};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("empty move token")]
    Empty,
    #[error("cannot parse destination square: {0}")]
    Dst(#[from] CoordParseError),
    #[error("malformed pawn move")]
    PawnMove,
    #[error("malformed piece move")]
    PieceMove,
    #[error("king moves take no disambiguation")]
    KingDisambiguation,
    #[error("{0:?} is not a valid promotion piece")]
    BadPromotion(char),
    #[error("malformed numeric annotation glyph")]
    BadAnnotation,
    #[error("comment is not terminated")]
    UnterminatedComment,
    #[error("unexpected trailing input after move token")]
    TrailingInput,
    #[error("move token doesn't match any known syntax")]
    Syntax,
}

/// Check claim carried by a SAN token: `+` or `#`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CheckMark {
    Check,
    Checkmate,
}

/// Move descriptor, exactly as written in the token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Data {
    Castling(CastlingSide),
    Pawn {
        dst: Coord,
        /// Origin file, present exactly when the move is a capture.
        src_file: Option<File>,
        is_capture: bool,
        promote: Option<PromotePiece>,
    },
    Simple {
        piece: Piece,
        file: Option<File>,
        rank: Option<Rank>,
        is_capture: bool,
        dst: Coord,
    },
}

/// One decoded half-move together with its token-level trivia.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Move {
    data: Data,
    color: Color,
    check: Option<CheckMark>,
    annotation: Option<u16>,
    comment: Option<String>,
    action: String,
}

impl Move {
    /// Decodes a single SAN token claimed by side `color`.
    ///
    /// The token may carry a trailing numeric annotation glyph (`$12`) and a
    /// brace comment; both are split off before the action itself is parsed.
    pub fn parse(token: &str, color: Color) -> Result<Move, DecodeError> {
        let s = token.trim();
        let (s, comment) = split_comment(s)?;
        let (s, annotation) = split_annotation(s)?;
        let action = s.trim();
        if action.is_empty() {
            return Err(DecodeError::Empty);
        }

        let check = if action.contains('#') {
            Some(CheckMark::Checkmate)
        } else if action.contains('+') {
            Some(CheckMark::Check)
        } else {
            None
        };
        let body = action.trim_end_matches(&['+', '#'][..]);
        if body.contains('+') || body.contains('#') {
            return Err(DecodeError::Syntax);
        }

        let data = parse_body(body)?;
        Ok(Move {
            data,
            color,
            check,
            annotation,
            comment,
            action: action.to_string(),
        })
    }

    pub fn data(&self) -> &Data {
        &self.data
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn check(&self) -> Option<CheckMark> {
        self.check
    }

    pub fn annotation(&self) -> Option<u16> {
        self.annotation
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// The action text as written, with the check mark but without the
    /// annotation and comment.
    pub fn action(&self) -> &str {
        &self.action
    }

    /// True if the token ends with `+` or `#`.
    pub fn claims_check(&self) -> bool {
        self.check.is_some()
    }

    /// True if the token ends with `#`.
    pub fn claims_checkmate(&self) -> bool {
        self.check == Some(CheckMark::Checkmate)
    }

    pub fn is_capture(&self) -> bool {
        match self.data {
            Data::Castling(_) => false,
            Data::Pawn { is_capture, .. } | Data::Simple { is_capture, .. } => is_capture,
        }
    }

    /// Origin file hint, if the token spelled one.
    pub fn file_hint(&self) -> Option<File> {
        match self.data {
            Data::Castling(_) => None,
            Data::Pawn { src_file, .. } => src_file,
            Data::Simple { file, .. } => file,
        }
    }

    /// Origin rank hint, if the token spelled one.
    pub fn rank_hint(&self) -> Option<Rank> {
        match self.data {
            Data::Simple { rank, .. } => rank,
            _ => None,
        }
    }
}

fn split_comment(s: &str) -> Result<(&str, Option<String>), DecodeError> {
    let i = match s.find('{') {
        Some(i) => i,
        None => return Ok((s, None)),
    };
    let inner = &s[i + 1..];
    let j = inner.find('}').ok_or(DecodeError::UnterminatedComment)?;
    if !inner[j + 1..].trim().is_empty() {
        return Err(DecodeError::TrailingInput);
    }
    Ok((s[..i].trim_end(), Some(inner[..j].trim().to_string())))
}

fn split_annotation(s: &str) -> Result<(&str, Option<u16>), DecodeError> {
    let i = match s.find('$') {
        Some(i) => i,
        None => return Ok((s, None)),
    };
    let digits = s[i + 1..].trim();
    if digits.is_empty() || digits.len() > 3 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DecodeError::BadAnnotation);
    }
    let value = digits.parse().map_err(|_| DecodeError::BadAnnotation)?;
    Ok((s[..i].trim_end(), Some(value)))
}

fn parse_body(body: &str) -> Result<Data, DecodeError> {
    // SAN actions are ASCII; rejecting anything else up front keeps the
    // byte-offset slicing below on char boundaries.
    if !body.is_ascii() {
        return Err(DecodeError::Syntax);
    }
    match body {
        "O-O" => return Ok(Data::Castling(CastlingSide::King)),
        "O-O-O" => return Ok(Data::Castling(CastlingSide::Queen)),
        _ => {}
    }
    let first = body.chars().next().ok_or(DecodeError::Empty)?;
    if first.is_ascii_lowercase() {
        return parse_pawn(body);
    }
    match Piece::from_san_char(first) {
        Some(piece) => parse_simple(piece, &body[1..]),
        None => Err(DecodeError::Syntax),
    }
}

fn parse_pawn(body: &str) -> Result<Data, DecodeError> {
    let bytes = body.as_bytes();
    let (src_file, is_capture, rest) = if bytes.len() >= 2 && bytes[1] == b'x' {
        let file = File::from_char(bytes[0] as char).ok_or(DecodeError::PawnMove)?;
        (Some(file), true, &body[2..])
    } else {
        (None, false, body)
    };
    let (dst_str, promote_str) = match rest.find('=') {
        Some(i) => (&rest[..i], Some(&rest[i + 1..])),
        None => (rest, None),
    };
    if dst_str.len() != 2 {
        return Err(DecodeError::PawnMove);
    }
    let dst = Coord::from_str(dst_str)?;
    let promote = match promote_str {
        Some(p) => {
            let mut chars = p.chars();
            let c = chars.next().ok_or(DecodeError::PawnMove)?;
            if chars.next().is_some() {
                return Err(DecodeError::PawnMove);
            }
            Some(PromotePiece::from_san_char(c).ok_or(DecodeError::BadPromotion(c))?)
        }
        None => None,
    };
    Ok(Data::Pawn {
        dst,
        src_file,
        is_capture,
        promote,
    })
}

fn parse_simple(piece: Piece, inner: &str) -> Result<Data, DecodeError> {
    if inner.len() < 2 {
        return Err(DecodeError::PieceMove);
    }
    let dst = Coord::from_str(&inner[inner.len() - 2..])?;
    let mut hints = &inner[..inner.len() - 2];
    let is_capture = match hints.strip_suffix('x') {
        Some(rest) => {
            hints = rest;
            true
        }
        None => false,
    };
    let mut chars = hints.chars().peekable();
    let file = match chars.peek().copied().and_then(File::from_char) {
        Some(f) => {
            chars.next();
            Some(f)
        }
        None => None,
    };
    let rank = match chars.peek().copied().and_then(Rank::from_char) {
        Some(r) => {
            chars.next();
            Some(r)
        }
        None => None,
    };
    if chars.next().is_some() {
        return Err(DecodeError::PieceMove);
    }
    if piece == Piece::King && (file.is_some() || rank.is_some()) {
        return Err(DecodeError::KingDisambiguation);
    }
    Ok(Data::Simple {
        piece,
        file,
        rank,
        is_capture,
        dst,
    })
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match &self.data {
            Data::Castling(CastlingSide::King) => write!(f, "O-O")?,
            Data::Castling(CastlingSide::Queen) => write!(f, "O-O-O")?,
            Data::Pawn {
                dst,
                src_file,
                is_capture,
                promote,
            } => {
                if let Some(file) = src_file {
                    write!(f, "{}", file)?;
                }
                if *is_capture {
                    write!(f, "x")?;
                }
                write!(f, "{}", dst)?;
                if let Some(p) = promote {
                    write!(f, "={}", p.as_san_char())?;
                }
            }
            Data::Simple {
                piece,
                file,
                rank,
                is_capture,
                dst,
            } => {
                write!(f, "{}", piece.as_san_char())?;
                if let Some(file) = file {
                    write!(f, "{}", file)?;
                }
                if let Some(rank) = rank {
                    write!(f, "{}", rank)?;
                }
                if *is_capture {
                    write!(f, "x")?;
                }
                write!(f, "{}", dst)?;
            }
        }
        match self.check {
            Some(CheckMark::Check) => write!(f, "+"),
            Some(CheckMark::Checkmate) => write!(f, "#"),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Coord {
        Coord::from_str(s).unwrap()
    }

    fn parse(token: &str) -> Move {
        Move::parse(token, Color::White).unwrap()
    }

    #[test]
    fn test_pawn_moves() {
        let mv = parse("e4");
        assert_eq!(
            *mv.data(),
            Data::Pawn {
                dst: sq("e4"),
                src_file: None,
                is_capture: false,
                promote: None,
            }
        );
        assert!(!mv.claims_check());

        let mv = parse("exd5");
        assert_eq!(
            *mv.data(),
            Data::Pawn {
                dst: sq("d5"),
                src_file: Some(File::E),
                is_capture: true,
                promote: None,
            }
        );

        let mv = parse("gxh8=Q+");
        assert_eq!(
            *mv.data(),
            Data::Pawn {
                dst: sq("h8"),
                src_file: Some(File::G),
                is_capture: true,
                promote: Some(PromotePiece::Queen),
            }
        );
        assert_eq!(mv.check(), Some(CheckMark::Check));

        let mv = parse("e8=N");
        assert_eq!(
            *mv.data(),
            Data::Pawn {
                dst: sq("e8"),
                src_file: None,
                is_capture: false,
                promote: Some(PromotePiece::Knight),
            }
        );
    }

    #[test]
    fn test_simple_moves() {
        let mv = parse("Nf3");
        assert_eq!(
            *mv.data(),
            Data::Simple {
                piece: Piece::Knight,
                file: None,
                rank: None,
                is_capture: false,
                dst: sq("f3"),
            }
        );

        let mv = parse("Nbd2");
        assert_eq!(mv.file_hint(), Some(File::B));
        assert_eq!(mv.rank_hint(), None);

        let mv = parse("R1a3");
        assert_eq!(mv.file_hint(), None);
        assert_eq!(mv.rank_hint(), Some(Rank::R1));

        let mv = parse("Qh4xe1#");
        assert_eq!(
            *mv.data(),
            Data::Simple {
                piece: Piece::Queen,
                file: Some(File::H),
                rank: Some(Rank::R4),
                is_capture: true,
                dst: sq("e1"),
            }
        );
        assert_eq!(mv.check(), Some(CheckMark::Checkmate));
        assert!(mv.claims_checkmate());
    }

    #[test]
    fn test_castling() {
        assert_eq!(*parse("O-O").data(), Data::Castling(CastlingSide::King));
        assert_eq!(*parse("O-O-O").data(), Data::Castling(CastlingSide::Queen));
        let mv = Move::parse("O-O-O+", Color::Black).unwrap();
        assert_eq!(*mv.data(), Data::Castling(CastlingSide::Queen));
        assert_eq!(mv.check(), Some(CheckMark::Check));
        assert_eq!(mv.color(), Color::Black);
    }

    #[test]
    fn test_trivia() {
        let mv = parse("e4 $1 {king's pawn}");
        assert_eq!(mv.annotation(), Some(1));
        assert_eq!(mv.comment(), Some("king's pawn"));
        assert_eq!(mv.action(), "e4");

        let mv = parse("Nf3{attached}");
        assert_eq!(mv.comment(), Some("attached"));

        // Only the action itself is restricted to ASCII.
        let mv = parse("e4 {défense moderne}");
        assert_eq!(mv.comment(), Some("défense moderne"));

        let mv = parse("Qxf7#");
        assert_eq!(mv.annotation(), None);
        assert_eq!(mv.comment(), None);
        assert_eq!(mv.action(), "Qxf7#");
    }

    #[test]
    fn test_errors() {
        assert_eq!(Move::parse("", Color::White), Err(DecodeError::Empty));
        assert_eq!(
            Move::parse("Kbd2", Color::White),
            Err(DecodeError::KingDisambiguation)
        );
        assert_eq!(
            Move::parse("e8=K", Color::White),
            Err(DecodeError::BadPromotion('K'))
        );
        assert_eq!(
            Move::parse("e8=P", Color::White),
            Err(DecodeError::BadPromotion('P'))
        );
        assert!(matches!(
            Move::parse("Ni9", Color::White),
            Err(DecodeError::Dst(_))
        ));
        assert_eq!(Move::parse("N", Color::White), Err(DecodeError::PieceMove));
        assert_eq!(
            Move::parse("exd5e", Color::White),
            Err(DecodeError::PawnMove)
        );
        assert_eq!(Move::parse("Zf3", Color::White), Err(DecodeError::Syntax));
        assert_eq!(Move::parse("Né4", Color::White), Err(DecodeError::Syntax));
        assert_eq!(Move::parse("é4", Color::White), Err(DecodeError::Syntax));
        assert_eq!(
            Move::parse("e4 {unterminated", Color::White),
            Err(DecodeError::UnterminatedComment)
        );
        assert_eq!(
            Move::parse("e4 {done} junk", Color::White),
            Err(DecodeError::TrailingInput)
        );
        assert_eq!(
            Move::parse("e4 $abc", Color::White),
            Err(DecodeError::BadAnnotation)
        );
    }

    #[test]
    fn test_render_round_trip() {
        for token in [
            "e4", "exd5", "gxh8=Q+", "Nf3", "Nbd2", "R1a3", "Qh4xe1#", "O-O", "O-O-O+", "Kd2",
            "Bxc6", "c8=R",
        ] {
            let mv = parse(token);
            assert_eq!(mv.to_string(), token, "render of {}", token);
        }
    }
}
