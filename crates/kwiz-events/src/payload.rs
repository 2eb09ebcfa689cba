//! Payload Types
//!
//! Serialization structs for what the quiz backend sends and receives.

use serde::{Deserialize, Serialize};

use crate::Landmark;

/// Identifier of a published quiz.
pub type ChronokwizId = u64;

/// A quiz as fetched from the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KwizPayload {
    #[serde(default)]
    pub events: Vec<Landmark>,
    #[serde(default)]
    pub category: String,
    /// Publication date, either `YYYY-MM-DD` or a full RFC 3339 timestamp
    #[serde(default)]
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ChronokwizId>,
}

impl KwizPayload {
    pub fn new(events: Vec<Landmark>, category: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            events,
            category: category.into(),
            date: date.into(),
            id: None,
        }
    }

    pub fn with_id(mut self, id: ChronokwizId) -> Self {
        self.id = Some(id);
        self
    }

    /// Returns true if the payload has nothing to play.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Completion status of one published quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateStatus {
    pub date: String,
    #[serde(default)]
    pub is_seen: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chronokwiz_id: Option<ChronokwizId>,
}

impl DateStatus {
    pub fn new(date: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            is_seen: false,
            score: None,
            chronokwiz_id: None,
        }
    }

    /// A quiz counts as completed once it was seen and a score was recorded.
    pub fn is_completed(&self) -> bool {
        self.is_seen && self.score.is_some()
    }
}

/// Response of the dates endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatesResponse {
    #[serde(default)]
    pub dates: Vec<DateStatus>,
}

impl DatesResponse {
    /// Finds the status entry for a quiz id.
    pub fn find_by_id(&self, id: ChronokwizId) -> Option<&DateStatus> {
        self.dates.iter().find(|d| d.chronokwiz_id == Some(id))
    }

    /// Finds the status entry for a `YYYY-MM-DD` date.
    pub fn find_by_date(&self, date: &str) -> Option<&DateStatus> {
        self.dates.iter().find(|d| d.date == date)
    }
}

/// Body of the "mark seen" mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeenRequest {
    pub chronokwiz_id: ChronokwizId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<u32>,
}

/// A generated quiz for a free-form topic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomKwiz {
    #[serde(default)]
    pub events: Vec<Landmark>,
    /// The topic as corrected by the generator
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attempt_number: Option<u32>,
}
