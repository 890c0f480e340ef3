//! In-memory shortcode store.
//!
//! [`InMemoryStore`] owns every URL record and its click history and
//! implements [`burrow_core::ShortcodeStore`]. [`Sweeper`] optionally
//! evicts expired records in the background.

pub mod memory;
pub mod sweeper;

pub use memory::{InMemoryStore, StoreSettings};
pub use sweeper::Sweeper;
