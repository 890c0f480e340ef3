use crate::Generator;
use burrow_core::ShortCode;
use std::sync::atomic::{AtomicU64, Ordering};

/// A short code generator using a sequential counter.
///
/// This generator produces codes like "seq000000", "seq000001", etc.
/// It is predictable, which makes it handy for tests and local runs.
#[derive(Debug)]
pub struct SeqGenerator {
    counter: AtomicU64,
    prefix: String,
}

impl Clone for SeqGenerator {
    fn clone(&self) -> Self {
        Self {
            counter: AtomicU64::new(self.counter.load(Ordering::SeqCst)),
            prefix: self.prefix.clone(),
        }
    }
}

impl SeqGenerator {
    /// Creates a new sequential generator with a custom prefix.
    ///
    /// The prefix must itself be a valid short code fragment.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self::with_offset(prefix, 0)
    }

    /// Creates a new sequential generator starting from a specific counter value.
    pub fn with_offset(prefix: impl Into<String>, offset: u64) -> Self {
        Self {
            counter: AtomicU64::new(offset),
            prefix: prefix.into(),
        }
    }
}

impl Generator for SeqGenerator {
    fn generate(&self) -> ShortCode {
        let count = self.counter.fetch_add(1, Ordering::SeqCst);
        ShortCode::new_unchecked(format!("{}{:06}", self.prefix, count))
    }
}
