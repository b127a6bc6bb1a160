// src/generators/mod.rs
mod password;

pub use password::{
    is_ambiguous, tally, ClassCounts, GeneratedPassword, PasswordGenerator, AMBIGUOUS_CHARS,
};
