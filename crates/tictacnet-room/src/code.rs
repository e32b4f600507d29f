//! Room code generation.
//!
//! A code is a random short word plus a random digit, so it survives
//! being read aloud or typed into a second terminal. The code space is
//! `pool size × 10`; uniqueness is only checked against currently-live
//! rooms, so a code becomes drawable again the moment its room is gone.

use std::borrow::Borrow;
use std::fmt;

use rand::Rng;

use crate::RoomError;

/// The fixed pool of short words codes are drawn from.
///
/// Loaded once at startup from a newline-separated asset and handed to
/// the registry; the pool never changes while the server runs.
#[derive(Debug, Clone)]
pub struct WordPool {
    words: Vec<String>,
}

impl WordPool {
    /// Parses a newline-separated word list, skipping blank lines.
    pub fn parse(text: &str) -> Result<Self, RoomError> {
        let words: Vec<String> = text
            .lines()
            .map(str::trim)
            .filter(|w| !w.is_empty())
            .map(str::to_string)
            .collect();
        if words.is_empty() {
            return Err(RoomError::EmptyWordPool);
        }
        Ok(Self { words })
    }

    /// Number of words in the pool.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Total number of distinct codes: one digit per word.
    pub fn code_space(&self) -> usize {
        self.words.len() * 10
    }
}

/// A human-shareable room identifier: `<word><digit>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RoomCode(String);

impl RoomCode {
    /// Draws a random code from the pool.
    pub fn draw(pool: &WordPool, rng: &mut impl Rng) -> Self {
        let word = &pool.words[rng.random_range(0..pool.words.len())];
        let digit: u8 = rng.random_range(0..10);
        Self(format!("{word}{digit}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RoomCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Lets a `HashMap<RoomCode, _>` be probed with the `&str` a joiner typed.
impl Borrow<str> for RoomCode {
    fn borrow(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_skips_blanks_and_trims() {
        let pool = WordPool::parse("plum\n\n  fox  \nmoss\n").unwrap();
        assert_eq!(pool.len(), 3);
        assert_eq!(pool.code_space(), 30);
    }

    #[test]
    fn test_empty_pool_is_an_error() {
        assert!(matches!(
            WordPool::parse("\n  \n"),
            Err(RoomError::EmptyWordPool)
        ));
    }

    #[test]
    fn test_drawn_codes_are_word_plus_digit() {
        let pool = WordPool::parse("zap").unwrap();
        let mut rng = rand::rng();
        for _ in 0..20 {
            let code = RoomCode::draw(&pool, &mut rng);
            let code = code.as_str();
            assert!(code.starts_with("zap"), "code {code:?}");
            let digit = code.strip_prefix("zap").unwrap();
            assert_eq!(digit.len(), 1);
            assert!(digit.chars().all(|c| c.is_ascii_digit()));
        }
    }
}
