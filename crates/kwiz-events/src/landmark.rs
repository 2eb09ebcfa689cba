//! Landmark Types
//!
//! A landmark is one dated fact the player has to place on the timeline.

use serde::{Deserialize, Serialize};

/// Identifier of a landmark, unique within one quiz.
pub type LandmarkId = u32;

/// How the point of occurrence should be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OccurrenceKind {
    /// A calendar date
    #[default]
    Standard,
    /// An episode or release number rendered as a sortable string
    Episode,
}

/// Anything that carries a chronological ordering key.
///
/// Keys are ISO-8601 style strings (`YYYY-MM-DD` and compatible), so plain
/// lexicographic comparison gives chronological order.
pub trait Chronological {
    fn point_of_occurrence(&self) -> &str;

    /// True if `self` happened strictly after `other`.
    fn is_later_than(&self, other: &impl Chronological) -> bool {
        self.point_of_occurrence() > other.point_of_occurrence()
    }

    /// True if `self` happened strictly before `other`.
    fn is_earlier_than(&self, other: &impl Chronological) -> bool {
        self.point_of_occurrence() < other.point_of_occurrence()
    }
}

/// A dated fact as delivered in a quiz payload.
///
/// Placement progress is not part of this type; the game keeps it alongside.
/// The wire flags `isMoved` and `isConfirmed` are ignored on input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Landmark {
    pub id: LandmarkId,
    /// Sort key. The wire name keeps the upstream spelling.
    #[serde(rename = "pointOfOccurence", default)]
    pub point_of_occurrence: String,
    /// Shown before the placement is confirmed
    #[serde(default)]
    pub full_description: String,
    /// Shown together with the date once confirmed
    #[serde(default)]
    pub hint_description: String,
    #[serde(default)]
    pub category: String,
    #[serde(
        rename = "typeOfPointOfOccurence",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub occurrence_kind: Option<OccurrenceKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internet_link: Option<String>,
}

impl Landmark {
    /// Creates a landmark with the given id and date and empty texts.
    pub fn new(id: LandmarkId, point_of_occurrence: impl Into<String>) -> Self {
        Self {
            id,
            point_of_occurrence: point_of_occurrence.into(),
            full_description: String::new(),
            hint_description: String::new(),
            category: String::new(),
            occurrence_kind: None,
            internet_link: None,
        }
    }

    /// Sets both description texts.
    pub fn with_descriptions(
        mut self,
        full: impl Into<String>,
        hint: impl Into<String>,
    ) -> Self {
        self.full_description = full.into();
        self.hint_description = hint.into();
        self
    }

    /// Sets the category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }
}

impl Chronological for Landmark {
    fn point_of_occurrence(&self) -> &str {
        &self.point_of_occurrence
    }
}
