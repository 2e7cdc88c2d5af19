//! Parser for the movetext section of a PGN game.
//!
//! Movetext is a flat sequence of numbered rounds, each holding a white move
//! and usually a black reply, closed by a game result token. The parser is
//! strict about round numbering: rounds must be contiguous, and a duplicated
//! round number is recorded as a warning instead of failing the game.

use crate::san;
use crate::types::Color;
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

/// Result token closing the movetext.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum GameResult {
    White,
    Black,
    Draw,
    /// `*`: the game is unterminated or the result is unknown.
    Undefined,
}

impl GameResult {
    pub const fn as_str(&self) -> &'static str {
        match *self {
            GameResult::White => "1-0",
            GameResult::Black => "0-1",
            GameResult::Draw => "1/2-1/2",
            GameResult::Undefined => "*",
        }
    }

    /// Result token declaring the given side the winner.
    pub const fn from_winner(color: Color) -> GameResult {
        match color {
            Color::White => GameResult::White,
            Color::Black => GameResult::Black,
        }
    }
}

impl fmt::Display for GameResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        write!(f, "{}", self.as_str())
    }
}

/// Non-fatal oddity noticed while parsing.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Warning {
    /// A round number appeared more than once.
    DuplicateRound(u32),
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        match *self {
            Warning::DuplicateRound(n) => write!(f, "duplicate round number {}", n),
        }
    }
}

/// One numbered round: a white move and, unless the game ends here, a black
/// reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    pub number: u32,
    pub white: san::Move,
    pub black: Option<san::Move>,
}

/// Parsed movetext: the rounds in order, the declared result, and any
/// warnings collected on the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveText {
    pub rounds: Vec<Round>,
    pub result: GameResult,
    pub warnings: Vec<Warning>,
}

impl MoveText {
    /// Half-moves in play order.
    pub fn plies(&self) -> impl Iterator<Item = &san::Move> {
        self.rounds
            .iter()
            .flat_map(|r| std::iter::once(&r.white).chain(r.black.as_ref()))
    }

    pub fn ply_count(&self) -> usize {
        self.rounds
            .iter()
            .map(|r| 1 + r.black.is_some() as usize)
            .sum()
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("expected \"{round}. <move>\" or a result token")]
    RoundHeader { round: u32 },
    #[error("round {found} breaks the sequence, expected round {expected}")]
    RoundSequence { expected: u32, found: u32 },
    #[error("cannot decode {color} move in round {round}: {source}")]
    Move {
        round: u32,
        color: Color,
        #[source]
        source: san::DecodeError,
    },
    #[error("unexpected round number before the black move of round {round}")]
    UnexpectedRound { round: u32 },
    #[error("black move in round {round} must repeat the round number as \"{round}...\"")]
    BlackRoundMissing { round: u32 },
    #[error("black move repeats round {found}, expected round {expected}")]
    BlackRoundMismatch { expected: u32, found: u32 },
    #[error("unexpected trailing input after the result token")]
    ResultToken,
}

/// Parses a whole movetext section.
///
/// Newlines are insignificant: the text is treated as one whitespace
/// separated stream.
pub fn parse(text: &str) -> Result<MoveText, ParseError> {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut s = flat.as_str();
    let mut rounds = Vec::new();
    let mut warnings = Vec::new();
    let mut seen = HashSet::new();
    let mut previous = 0_u32;
    loop {
        let expected = previous + 1;
        let number = take_round_header(&mut s, expected)?;
        // A repeated number is only warned about; any other break in the
        // sequence fails the game.
        if !seen.insert(number) {
            warnings.push(Warning::DuplicateRound(number));
        } else if number != expected {
            return Err(ParseError::RoundSequence {
                expected,
                found: number,
            });
        }

        let white = take_move(&mut s, number, Color::White)?;
        if let Some(result) = take_result(&mut s)? {
            rounds.push(Round {
                number,
                white,
                black: None,
            });
            return Ok(MoveText {
                rounds,
                result,
                warnings,
            });
        }

        take_black_prefix(&mut s, number, white.comment().is_some())?;
        let black = take_move(&mut s, number, Color::Black)?;
        rounds.push(Round {
            number,
            white,
            black: Some(black),
        });
        if let Some(result) = take_result(&mut s)? {
            return Ok(MoveText {
                rounds,
                result,
                warnings,
            });
        }
        previous = number;
    }
}

fn take_round_header(s: &mut &str, expected: u32) -> Result<u32, ParseError> {
    let t = s.trim_start();
    let digits_end = t.find(|c: char| !c.is_ascii_digit()).unwrap_or(t.len());
    let number = t[..digits_end]
        .parse()
        .map_err(|_| ParseError::RoundHeader { round: expected })?;
    let rest = t[digits_end..]
        .strip_prefix('.')
        .ok_or(ParseError::RoundHeader { round: expected })?;
    *s = rest;
    Ok(number)
}

/// Consumes the round number a black move repeats after a white comment.
///
/// When the white move carried a comment, the black move must restate the
/// round as `N...`. Without such a comment a leading digit is malformed.
fn take_black_prefix(s: &mut &str, round: u32, after_comment: bool) -> Result<(), ParseError> {
    let t = s.trim_start();
    let digits_end = t.find(|c: char| !c.is_ascii_digit()).unwrap_or(t.len());
    if digits_end == 0 {
        if after_comment {
            return Err(ParseError::BlackRoundMissing { round });
        }
        *s = t;
        return Ok(());
    }
    if !after_comment {
        return Err(ParseError::UnexpectedRound { round });
    }
    let found = t[..digits_end]
        .parse()
        .map_err(|_| ParseError::BlackRoundMissing { round })?;
    if found != round {
        return Err(ParseError::BlackRoundMismatch {
            expected: round,
            found,
        });
    }
    let rest = t[digits_end..]
        .strip_prefix("...")
        .ok_or(ParseError::BlackRoundMissing { round })?;
    *s = rest;
    Ok(())
}

fn take_move(s: &mut &str, round: u32, color: Color) -> Result<san::Move, ParseError> {
    let token = take_token(s).unwrap_or_default();
    san::Move::parse(&token, color).map_err(|source| ParseError::Move {
        round,
        color,
        source,
    })
}

/// Cuts the next move token off the stream, keeping its annotation glyph and
/// brace comment attached. Comments may span spaces.
fn take_token(s: &mut &str) -> Option<String> {
    let t = s.trim_start();
    if t.is_empty() {
        *s = t;
        return None;
    }
    let mut end = t.find(&[' ', '$', '{'][..]).unwrap_or(t.len());
    let skipped = end + t[end..].len() - t[end..].trim_start().len();
    if t[skipped..].starts_with('$') {
        end = t[skipped..]
            .find(&[' ', '{'][..])
            .map_or(t.len(), |i| skipped + i);
    }
    let skipped = end + t[end..].len() - t[end..].trim_start().len();
    if t[skipped..].starts_with('{') {
        // An unterminated comment is handed to the decoder whole, so the
        // error points at the move that owns it.
        end = t[skipped..].find('}').map_or(t.len(), |i| skipped + i + 1);
    }
    let token = t[..end].to_string();
    *s = &t[end..];
    Some(token)
}

fn take_result(s: &mut &str) -> Result<Option<GameResult>, ParseError> {
    let t = s.trim_start();
    for result in [
        GameResult::Draw,
        GameResult::White,
        GameResult::Black,
        GameResult::Undefined,
    ] {
        if let Some(rest) = t.strip_prefix(result.as_str()) {
            if !rest.trim().is_empty() {
                return Err(ParseError::ResultToken);
            }
            *s = "";
            return Ok(Some(result));
        }
    }
    Ok(None)
}
