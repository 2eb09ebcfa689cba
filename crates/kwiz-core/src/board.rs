//! The three landmark containers a game is played on.
//!
//! - `on_deck`: the single landmark the player may drag in next
//! - `placed`: the player's timeline, confirmed and unconfirmed mixed
//! - `unplaced`: the pool not shown yet; refills take from its tail
//!
//! Every landmark of the quiz lives in exactly one container.

use std::collections::HashSet;

use kwiz_events::{Chronological, Landmark, LandmarkId};
use serde::{Deserialize, Serialize};

use crate::error::GameError;

/// Names of the containers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Container {
    OnDeck,
    Placed,
    Unplaced,
}

/// Where a landmark is in its placement lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    /// Waiting in the pool
    Unplaced,
    /// Next up; may be previewed inside the timeline while dragged
    OnDeck,
    /// Dropped on the timeline, waiting for confirmation
    PlacedUnconfirmed,
    /// Locked in, date revealed
    PlacedConfirmed,
}

impl Placement {
    /// True once the landmark has been dropped on the timeline.
    pub fn is_moved(self) -> bool {
        matches!(self, Placement::PlacedUnconfirmed | Placement::PlacedConfirmed)
    }

    pub fn is_confirmed(self) -> bool {
        matches!(self, Placement::PlacedConfirmed)
    }
}

/// A landmark together with its placement state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    pub landmark: Landmark,
    pub placement: Placement,
}

impl Card {
    pub fn new(landmark: Landmark, placement: Placement) -> Self {
        Self {
            landmark,
            placement,
        }
    }

    pub fn id(&self) -> LandmarkId {
        self.landmark.id
    }

    pub fn is_moved(&self) -> bool {
        self.placement.is_moved()
    }

    pub fn is_confirmed(&self) -> bool {
        self.placement.is_confirmed()
    }
}

impl Chronological for Card {
    fn point_of_occurrence(&self) -> &str {
        &self.landmark.point_of_occurrence
    }
}

/// Where a gesture is hovering or was released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropTarget {
    /// The container area itself, not a specific card
    Container(Container),
    /// A card, identified by its landmark
    Card(LandmarkId),
}

/// The container triple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Board {
    on_deck: Option<Card>,
    placed: Vec<Card>,
    unplaced: Vec<Card>,
}

impl Board {
    /// Deals a new board from landmarks in deal order.
    ///
    /// The first landmark becomes the confirmed anchor, the second goes on
    /// deck and the rest form the pool in the given order.
    pub fn deal(landmarks: Vec<Landmark>) -> Result<Self, GameError> {
        if landmarks.len() < 2 {
            return Err(GameError::NotEnoughLandmarks(landmarks.len()));
        }

        let mut iter = landmarks.into_iter();
        let anchor = iter.next().map(|l| Card::new(l, Placement::PlacedConfirmed));
        let on_deck = iter.next().map(|l| Card::new(l, Placement::OnDeck));
        let unplaced = iter.map(|l| Card::new(l, Placement::Unplaced)).collect();

        Self::from_parts(on_deck, anchor.into_iter().collect(), unplaced)
    }

    /// Builds a board from explicit containers, e.g. to resume a game.
    pub fn from_parts(
        on_deck: Option<Card>,
        placed: Vec<Card>,
        unplaced: Vec<Card>,
    ) -> Result<Self, GameError> {
        if placed.is_empty() {
            return Err(GameError::MissingAnchor);
        }

        let mut seen = HashSet::new();
        for card in on_deck.iter().chain(&placed).chain(&unplaced) {
            if !seen.insert(card.id()) {
                return Err(GameError::DuplicateLandmark(card.id()));
            }
        }

        Ok(Self {
            on_deck,
            placed,
            unplaced,
        })
    }

    pub fn on_deck(&self) -> Option<&Card> {
        self.on_deck.as_ref()
    }

    pub fn placed(&self) -> &[Card] {
        &self.placed
    }

    pub fn unplaced(&self) -> &[Card] {
        &self.unplaced
    }

    /// Total number of landmarks across all containers.
    pub fn len(&self) -> usize {
        self.on_deck.iter().count() + self.placed.len() + self.unplaced.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Landmark ids of one container, in container order.
    pub fn ids(&self, container: Container) -> Vec<LandmarkId> {
        match container {
            Container::OnDeck => self.on_deck.iter().map(Card::id).collect(),
            Container::Placed => self.placed.iter().map(Card::id).collect(),
            Container::Unplaced => self.unplaced.iter().map(Card::id).collect(),
        }
    }

    /// Finds the container and index holding a landmark.
    pub fn locate(&self, id: LandmarkId) -> Option<(Container, usize)> {
        if self.on_deck.as_ref().is_some_and(|c| c.id() == id) {
            return Some((Container::OnDeck, 0));
        }
        if let Some(index) = self.placed.iter().position(|c| c.id() == id) {
            return Some((Container::Placed, index));
        }
        self.unplaced
            .iter()
            .position(|c| c.id() == id)
            .map(|index| (Container::Unplaced, index))
    }

    pub fn card(&self, id: LandmarkId) -> Option<&Card> {
        match self.locate(id)? {
            (Container::OnDeck, _) => self.on_deck.as_ref(),
            (Container::Placed, index) => self.placed.get(index),
            (Container::Unplaced, index) => self.unplaced.get(index),
        }
    }

    /// Resolves a drop target to its container and, for card targets, the
    /// card's index.
    pub fn resolve(&self, target: DropTarget) -> Result<(Container, Option<usize>), GameError> {
        match target {
            DropTarget::Container(container) => Ok((container, None)),
            DropTarget::Card(id) => self
                .locate(id)
                .map(|(container, index)| (container, Some(index)))
                .ok_or(GameError::DropTargetNotFound(id)),
        }
    }

    /// True when nothing is left to place and every placement is confirmed.
    pub fn is_solved(&self) -> bool {
        self.unplaced.is_empty()
            && self.on_deck.is_none()
            && self.placed.iter().all(Card::is_confirmed)
    }

    /// Number of placed cards still awaiting confirmation.
    pub fn unconfirmed_count(&self) -> usize {
        self.placed.iter().filter(|c| c.is_moved() && !c.is_confirmed()).count()
    }

    /// Moves the on-deck card into `placed` at `index` (clamped).
    ///
    /// Returns the index the card ended up at.
    pub(crate) fn move_on_deck_to_placed(&mut self, index: usize) -> Option<usize> {
        let card = self.on_deck.take()?;
        let index = index.min(self.placed.len());
        self.placed.insert(index, card);
        Some(index)
    }

    /// Pops the tail of the pool into the empty on-deck slot.
    pub(crate) fn refill_on_deck(&mut self) -> Option<LandmarkId> {
        if self.on_deck.is_some() {
            return None;
        }
        let mut card = self.unplaced.pop()?;
        card.placement = Placement::OnDeck;
        let id = card.id();
        self.on_deck = Some(card);
        Some(id)
    }

    pub(crate) fn placed_mut(&mut self) -> &mut Vec<Card> {
        &mut self.placed
    }
}

/// Moves the element at `from` to `to`, where a negative `to` counts back
/// from the end of the list as it was before the move (`len + to`), so `-1`
/// appends. Out of range targets are clamped.
///
/// Returns the index the element ended up at, or `None` if `from` is out of
/// range.
pub fn array_move<T>(items: &mut Vec<T>, from: usize, to: isize) -> Option<usize> {
    if from >= items.len() {
        return None;
    }
    let target = if to < 0 { items.len() as isize + to } else { to };
    let item = items.remove(from);
    let target = target.clamp(0, items.len() as isize) as usize;
    items.insert(target, item);
    Some(target)
}
