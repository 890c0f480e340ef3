use crate::Generator;
use burrow_core::ShortCode;
use std::iter;

/// The URL-safe alphabet: every character passes short code validation.
const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";

pub const DEFAULT_LENGTH: usize = 8;

/// Generates random fixed-length codes from a 64-character alphabet.
///
/// With the default length of 8 there are 64^8 (about 2.8e14) possible
/// codes, so collisions are rare but not impossible.
#[derive(Debug, Clone)]
pub struct RandomGenerator {
    length: usize,
}

impl RandomGenerator {
    pub fn new() -> Self {
        Self::with_length(DEFAULT_LENGTH)
    }

    /// # Panics
    ///
    /// Panics if `length` is zero.
    pub fn with_length(length: usize) -> Self {
        assert!(length > 0, "short code length must be positive");
        Self { length }
    }

    pub fn length(&self) -> usize {
        self.length
    }
}

impl Default for RandomGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator for RandomGenerator {
    fn generate(&self) -> ShortCode {
        let code: String =
            iter::repeat_with(|| ALPHABET[rand::random_range(0..ALPHABET.len())] as char)
                .take(self.length)
                .collect();
        ShortCode::new_unchecked(code)
    }
}
