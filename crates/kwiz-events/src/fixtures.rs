//! Sample data fixtures for testing.
//!
//! This module provides ready-made quiz data for other crates to use.
//! Enable the `test-fixtures` feature to access these helpers.
//!
//! # Example
//!
//! ```ignore
//! // In your Cargo.toml:
//! // [dev-dependencies]
//! // kwiz-events = { path = "../kwiz-events", features = ["test-fixtures"] }
//!
//! use kwiz_events::fixtures;
//!
//! let payload = fixtures::sample_kwiz();
//! let dates = fixtures::sample_dates();
//! ```

use crate::{DatesResponse, KwizPayload, Landmark, LandmarkId};

/// Returns the sample quiz from the fixtures file.
///
/// Quiz id 101, six American history landmarks (ids 1 to 6) listed in
/// chronological order.
pub fn sample_kwiz() -> KwizPayload {
    let json = include_str!("../tests/fixtures/sample_kwiz.json");
    serde_json::from_str(json).expect("Failed to parse sample_kwiz.json")
}

/// Returns the sample date statuses.
///
/// - quiz 99: completed with score 14
/// - quiz 100: seen but without a score
/// - quiz 101: not seen yet
pub fn sample_dates() -> DatesResponse {
    let json = include_str!("../tests/fixtures/sample_dates.json");
    serde_json::from_str(json).expect("Failed to parse sample_dates.json")
}

/// Returns a landmark from the sample quiz.
pub fn get_landmark(id: LandmarkId) -> Option<Landmark> {
    sample_kwiz().events.into_iter().find(|l| l.id == id)
}

/// Builds landmarks whose ids are 1-based positions and whose dates are the
/// given strings.
pub fn landmarks_from_dates(dates: &[&str]) -> Vec<Landmark> {
    dates
        .iter()
        .enumerate()
        .map(|(i, date)| Landmark::new(i as LandmarkId + 1, *date))
        .collect()
}
