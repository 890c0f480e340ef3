//! HTTP surface of the Burrow URL shortener.
//!
//! Maps requests onto the [`ShortcodeStore`](burrow_core::ShortcodeStore)
//! operations: create a short URL, read its stats, and follow it.

pub mod app;
pub mod error;
pub mod geo;
pub mod handlers;
pub mod middleware;
pub mod model;
pub mod state;

pub use app::App;
pub use error::{AppError, Result};
pub use state::AppState;
