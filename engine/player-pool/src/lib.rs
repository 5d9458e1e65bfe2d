//! Player Pool - slate players for the lineup optimizer
//!
//! Holds the player/position types, validates pools (non-empty, unique IDs)
//! and ingests slates from a mock generator, salary CSV exports or
//! FFToolbox-style web pages.

pub mod error;
pub mod pool;
pub mod sources;
pub mod types;

pub use error::PoolError;
pub use pool::PlayerPool;
pub use sources::SlateSource;
pub use types::{Player, Position, UnknownPosition};
