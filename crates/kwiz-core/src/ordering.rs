//! Chronological ordering and shuffling of quiz landmarks.

use kwiz_events::{Chronological, KwizPayload, Landmark};
use rand::Rng;

/// Returns a copy of `items` sorted ascending by point of occurrence.
///
/// The sort is stable, so landmarks sharing a date keep their input order.
pub fn order_chronologically<T: Chronological + Clone>(items: &[T]) -> Vec<T> {
    let mut ordered = items.to_vec();
    ordered.sort_by(|a, b| a.point_of_occurrence().cmp(b.point_of_occurrence()));
    ordered
}

/// Returns a uniformly shuffled copy of `items` (Fisher-Yates).
pub fn randomize<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut shuffled = items.to_vec();
    for i in (1..shuffled.len()).rev() {
        let j = rng.gen_range(0..=i);
        shuffled.swap(i, j);
    }
    shuffled
}

/// Both views of a fetched quiz.
#[derive(Debug, Clone, PartialEq)]
pub struct ProcessedKwiz {
    /// The answer key, used by the completed view
    pub ordered: Vec<Landmark>,
    /// Deal order for a new game
    pub randomized: Vec<Landmark>,
}

/// Produces the ordered and randomized sequences for a payload.
pub fn process_payload<R: Rng + ?Sized>(payload: &KwizPayload, rng: &mut R) -> ProcessedKwiz {
    ProcessedKwiz {
        ordered: order_chronologically(&payload.events),
        randomized: randomize(&payload.events, rng),
    }
}
