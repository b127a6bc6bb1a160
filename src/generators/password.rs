// src/generators/password.rs
use rand::rngs::OsRng;
use rand::{CryptoRng, Rng};
use serde::{Deserialize, Serialize};

/// First character of the alphabet. Space (0x20) is never produced.
const ALPHABET_START: u8 = b'!';

/// Number of printable characters from `'!'` through `'~'`.
const ALPHABET_SIZE: u8 = 94;

/// Characters that are easy to confuse with one another in most fonts.
pub const AMBIGUOUS_CHARS: [char; 6] = ['I', 'l', '1', '|', 'O', '0'];

pub fn is_ambiguous(c: char) -> bool {
    AMBIGUOUS_CHARS.contains(&c)
}

/// Per-class character statistics for a password.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassCounts {
    pub lower: usize,
    pub upper: usize,
    pub digit: usize,
    pub symbol: usize,
}

impl ClassCounts {
    pub fn total(&self) -> usize {
        self.lower + self.upper + self.digit + self.symbol
    }

    fn record(&mut self, c: char) {
        if c.is_ascii_digit() {
            self.digit += 1;
        } else if c.is_ascii_uppercase() {
            self.upper += 1;
        } else if c.is_ascii_lowercase() {
            self.lower += 1;
        } else {
            self.symbol += 1;
        }
    }
}

/// Tally every character of `s` into exactly one class.
pub fn tally(s: &str) -> ClassCounts {
    let mut counts = ClassCounts::default();
    for c in s.chars() {
        counts.record(c);
    }
    counts
}

/// A finished password together with its statistics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPassword {
    pub content: String,
    pub counts: ClassCounts,
}

pub struct PasswordGenerator;

impl PasswordGenerator {
    pub fn new() -> Self {
        PasswordGenerator
    }

    /// Generate `length` characters using the operating system's CSPRNG.
    pub fn generate(&self, length: usize, avoid_ambiguous: bool) -> GeneratedPassword {
        self.generate_with(&mut OsRng, length, avoid_ambiguous)
    }

    /// Generate with a caller-supplied cryptographic RNG.
    ///
    /// Characters are drawn uniformly from `'!'..='~'`. With `avoid_ambiguous`
    /// set, any draw from [`AMBIGUOUS_CHARS`] is discarded and redrawn, so the
    /// result still has exactly `length` characters.
    pub fn generate_with<R>(&self, rng: &mut R, length: usize, avoid_ambiguous: bool) -> GeneratedPassword
    where
        R: Rng + CryptoRng,
    {
        let mut content = String::with_capacity(length);
        let mut counts = ClassCounts::default();

        while content.len() < length {
            let c = (ALPHABET_START + rng.gen_range(0..ALPHABET_SIZE)) as char;
            if avoid_ambiguous && is_ambiguous(c) {
                continue;
            }
            content.push(c);
            counts.record(c);
        }

        GeneratedPassword { content, counts }
    }
}

impl Default for PasswordGenerator {
    fn default() -> Self {
        Self::new()
    }
}
