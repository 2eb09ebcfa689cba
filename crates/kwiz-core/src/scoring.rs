//! Placement scoring.
//!
//! A confirmed placement starts at [`MAX_ITEM_SCORE`] and loses one point per
//! neighbour it is out of order with. Neighbours are scanned outward from the
//! placement and the scan stops at the first neighbour that is in order, so
//! only the contiguous run of offenders counts. Later neighbours to the left
//! are checked first; earlier neighbours to the right only when the left side
//! is clean.
//!
//! After scoring, the placement settles just past the last offender, which
//! gradually sorts the confirmed part of the timeline.

use kwiz_events::Chronological;
use serde::{Deserialize, Serialize};

/// Points for a placement with no ordering violations.
pub const MAX_ITEM_SCORE: u32 = 3;

/// Which side of the placement was out of order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Misplacement {
    /// In order with both neighbours
    None,
    /// Placed after landmarks that happened later
    TooEarlyInTimeline { violations: usize },
    /// Placed before landmarks that happened earlier
    TooLateInTimeline { violations: usize },
}

impl Misplacement {
    pub fn violations(self) -> usize {
        match self {
            Misplacement::None => 0,
            Misplacement::TooEarlyInTimeline { violations }
            | Misplacement::TooLateInTimeline { violations } => violations,
        }
    }
}

/// Result of scoring one placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementScore {
    /// Points awarded, never negative
    pub points: u32,
    pub misplacement: Misplacement,
    /// Index the placement moves to once confirmed
    pub settle_index: usize,
}

impl PlacementScore {
    /// True when the placement was in order with its neighbours.
    pub fn is_correct(&self) -> bool {
        self.misplacement == Misplacement::None
    }
}

/// Scores the item at `index` against its neighbours in `items`.
///
/// `settle_index` is expressed in positions of `items` with the scored item
/// removed, ready to be passed to [`settle`].
///
/// # Panics
///
/// Panics if `index` is out of bounds.
pub fn evaluate<T: Chronological>(items: &[T], index: usize, max_item_score: u32) -> PlacementScore {
    let target = &items[index];

    // Earlier positions holding later dates.
    let behind = items[..index]
        .iter()
        .rev()
        .take_while(|other| other.is_later_than(target))
        .count();

    let misplacement = if behind > 0 {
        Misplacement::TooEarlyInTimeline { violations: behind }
    } else {
        // Later positions holding earlier dates.
        let ahead = items[index + 1..]
            .iter()
            .take_while(|other| other.is_earlier_than(target))
            .count();
        if ahead > 0 {
            Misplacement::TooLateInTimeline { violations: ahead }
        } else {
            Misplacement::None
        }
    };

    let settle_index = match misplacement {
        Misplacement::None => index,
        Misplacement::TooEarlyInTimeline { violations } => index - violations,
        Misplacement::TooLateInTimeline { violations } => index + violations,
    };

    let violations = u32::try_from(misplacement.violations()).unwrap_or(u32::MAX);
    PlacementScore {
        points: max_item_score.saturating_sub(violations),
        misplacement,
        settle_index,
    }
}

/// Moves the item at `from` to `settle_index` as computed by [`evaluate`]
/// and returns where it landed.
pub fn settle<T>(items: &mut Vec<T>, from: usize, settle_index: usize) -> usize {
    let item = items.remove(from);
    let to = settle_index.min(items.len());
    items.insert(to, item);
    to
}
