//! Core types and traits for the Burrow URL shortener.
//!
//! This crate provides the domain model shared by the store, the
//! telemetry sinks and the HTTP gateway, along with the capability
//! traits those crates plug into.

pub mod clock;
pub mod error;
pub mod event;
pub mod geo;
pub mod record;
pub mod shortcode;
pub mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{Result, StoreError};
pub use event::{EventSink, LogEvent, LogLevel, NullSink, Stack};
pub use geo::{GeoInfo, GeoLocator, UnknownLocator};
pub use record::{ClickRecord, Location, UrlRecord};
pub use shortcode::ShortCode;
pub use store::{AllocateRequest, ClickData, ClickOutcome, ShortcodeStore};
