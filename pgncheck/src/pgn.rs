//! Splits a PGN file into games.
//!
//! A game is a block of `[Key "Value"]` tag lines followed by movetext
//! lines. A new tag line after movetext starts the next game. Each game is
//! parsed independently, so one broken game doesn't take the file down.

use crate::board::Board;
use crate::movetext::{self, MoveText, ParseError};
use crate::replay::{self, ReplayError};
use std::collections::HashMap;
use std::mem;

/// One game out of a PGN file: its tag pairs and its parsed movetext.
#[derive(Debug, Clone, PartialEq)]
pub struct GameRecord {
    pub tags: HashMap<String, String>,
    pub moves: MoveText,
}

impl GameRecord {
    pub fn tag(&self, name: &str) -> Option<&str> {
        self.tags.get(name).map(String::as_str)
    }

    /// Replays the game's movetext from the opening position.
    pub fn replay(&self) -> Result<Board, ReplayError> {
        replay::replay(&self.moves)
    }
}

/// Splits `input` into games and parses the movetext of each.
pub fn parse_games(input: &str) -> Vec<Result<GameRecord, ParseError>> {
    let mut games = Vec::new();
    let mut tags = HashMap::new();
    let mut text = String::new();
    for line in input.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.starts_with('[') {
            // A tag line after movetext closes the previous game.
            if !text.is_empty() {
                games.push(finish(mem::take(&mut tags), mem::take(&mut text)));
            }
            if let Some((key, value)) = parse_tag(line) {
                tags.insert(key, value);
            }
        } else {
            text.push_str(line);
            text.push('\n');
        }
    }
    if !text.is_empty() || !tags.is_empty() {
        games.push(finish(tags, text));
    }
    games
}

fn finish(tags: HashMap<String, String>, text: String) -> Result<GameRecord, ParseError> {
    let moves = movetext::parse(&text)?;
    Ok(GameRecord { tags, moves })
}

/// Parses a `[Key "Value"]` tag pair. Malformed tag lines yield `None` and
/// are skipped by the caller.
fn parse_tag(line: &str) -> Option<(String, String)> {
    let inner = line.strip_prefix('[')?.strip_suffix(']')?.trim();
    let key_end = inner.find(char::is_whitespace)?;
    let (key, rest) = inner.split_at(key_end);
    if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return None;
    }
    let value = rest.trim().strip_prefix('"')?.strip_suffix('"')?;
    Some((key.to_string(), value.to_string()))
}
