//! Shared quiz data types and serialization for Chronokwiz.
//!
//! This crate contains pure data structures with no game logic.
//! It is a dependency for all other crates in the workspace.

pub mod landmark;
pub mod payload;

#[cfg(any(test, feature = "test-fixtures"))]
pub mod fixtures;

// Re-export landmark types
pub use landmark::{Chronological, Landmark, LandmarkId, OccurrenceKind};

// Re-export payload types
pub use payload::{
    ChronokwizId, CustomKwiz, DateStatus, DatesResponse, KwizPayload, SeenRequest,
};
