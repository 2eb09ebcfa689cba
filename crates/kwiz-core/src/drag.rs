//! Drag-and-drop interaction rules.
//!
//! A drag goes through three gestures: pick-up, any number of hovers, and a
//! drop. Hovering over the timeline previews the on-deck landmark inside it;
//! dropping commits the preview or, when released elsewhere, cancels it.
//! Only the timeline (`placed`) accepts drops while a drag is active.

use kwiz_events::LandmarkId;
use serde::{Deserialize, Serialize};

use crate::board::{array_move, Board, Container, DropTarget, Placement};
use crate::error::GameError;

/// Whether the on-deck landmark may be picked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gate {
    /// Every placement so far is confirmed
    #[default]
    ReadyForNextMove,
    /// A dropped landmark is waiting for confirmation
    AwaitingConfirmation,
}

/// Drag progress.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        active: LandmarkId,
        /// The board at pick-up, restored if the drag is cancelled
        origin: Box<Board>,
    },
}

impl DragState {
    /// The landmark being dragged, if any.
    pub fn active(&self) -> Option<LandmarkId> {
        match self {
            DragState::Idle => None,
            DragState::Dragging { active, .. } => Some(*active),
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, DragState::Dragging { .. })
    }
}

/// Vertical position of the dragged card relative to the hovered card.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HoverGeometry {
    /// Top edge of the dragged card
    pub active_top: f64,
    /// Top edge of the hovered card
    pub over_top: f64,
    pub over_height: f64,
}

impl HoverGeometry {
    pub fn new(active_top: f64, over_top: f64, over_height: f64) -> Self {
        Self {
            active_top,
            over_top,
            over_height,
        }
    }

    /// True when the dragged card is below the hovered card's midpoint.
    pub fn is_below_midpoint(&self) -> bool {
        self.active_top > self.over_top + self.over_height / 2.0
    }
}

/// What a drop did to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropResult {
    Cancelled,
    Committed {
        /// Final index of the dropped landmark in `placed`
        index: usize,
        /// Landmark pulled from the pool into the on-deck slot
        refilled: Option<LandmarkId>,
    },
}

/// Checks whether `id` may be picked up and returns its container.
pub fn check_pick_up(board: &Board, gate: Gate, id: LandmarkId) -> Result<Container, GameError> {
    match board.locate(id) {
        None => Err(GameError::UnknownLandmark(id)),
        Some((Container::OnDeck, _)) if gate == Gate::AwaitingConfirmation => {
            Err(GameError::PickUpBlocked(id))
        }
        Some((Container::OnDeck, _)) => Ok(Container::OnDeck),
        Some((Container::Placed, index)) if board.placed()[index].is_confirmed() => {
            Err(GameError::Locked(id))
        }
        Some((Container::Placed, _)) => Ok(Container::Placed),
        Some((Container::Unplaced, _)) => Err(GameError::NotDraggable(id)),
    }
}

/// Index the previewed landmark is spliced in at.
///
/// Hovering the container appends; hovering a card inserts at its position,
/// or after it when it is the last card and the pointer is below its
/// midpoint.
pub fn preview_index(placed_len: usize, over_index: Option<usize>, geometry: Option<HoverGeometry>) -> usize {
    match over_index {
        None => placed_len,
        Some(index) => {
            let is_below_last = index + 1 == placed_len
                && geometry.is_some_and(|g| g.is_below_midpoint());
            if is_below_last {
                index + 1
            } else {
                index
            }
        }
    }
}

/// Moves the dragged landmark into the timeline when it hovers there from
/// another container. Returns the preview index, or `None` when nothing
/// moved.
pub fn hover(
    board: &mut Board,
    id: LandmarkId,
    over: Option<DropTarget>,
    geometry: Option<HoverGeometry>,
) -> Result<Option<usize>, GameError> {
    let Some(over) = over else {
        return Ok(None);
    };
    let (source, _) = board.locate(id).ok_or(GameError::UnknownLandmark(id))?;
    let (target, over_index) = board.resolve(over)?;

    if source == target || target != Container::Placed || source != Container::OnDeck {
        return Ok(None);
    }

    let index = preview_index(board.placed().len(), over_index, geometry);
    Ok(board.move_on_deck_to_placed(index))
}

/// Commits or cancels a drop.
///
/// The drop commits only when released inside the timeline on the container
/// the landmark is already in. The landmark is moved from its index to the
/// index of the card it was released over (`-1`, counted from the end, when
/// released over the container itself). When the on-deck slot is empty the
/// pool's last landmark moves up.
pub fn commit_drop(
    board: &mut Board,
    id: LandmarkId,
    over: Option<DropTarget>,
) -> Result<DropResult, GameError> {
    let Some(over) = over else {
        return Ok(DropResult::Cancelled);
    };
    let (source, active_index) = board.locate(id).ok_or(GameError::UnknownLandmark(id))?;
    let (target, over_index) = board.resolve(over)?;

    if target != Container::Placed || source != target {
        return Ok(DropResult::Cancelled);
    }

    let to = over_index.map_or(-1, |index| index as isize);
    let needs_refill = board.on_deck().is_none();

    let placed = board.placed_mut();
    let index = array_move(placed, active_index, to).ok_or(GameError::UnknownLandmark(id))?;
    placed[index].placement = Placement::PlacedUnconfirmed;

    let refilled = if needs_refill {
        let refilled = board.refill_on_deck();
        if refilled.is_none() {
            tracing::debug!("Pool is empty, last landmark {} placed", id);
        }
        refilled
    } else {
        None
    };

    Ok(DropResult::Committed { index, refilled })
}

#[cfg(test)]
mod tests {
    use super::*;
    use kwiz_events::fixtures::landmarks_from_dates;

    fn dealt() -> Board {
        // anchor 1 (2010), on deck 2 (2025), pool [3 (2015), 4 (2020)]
        Board::deal(landmarks_from_dates(&["2010", "2025", "2015", "2020"])).unwrap()
    }

    #[test]
    fn test_geometry_midpoint() {
        assert!(HoverGeometry::new(160.0, 100.0, 100.0).is_below_midpoint());
        assert!(!HoverGeometry::new(150.0, 100.0, 100.0).is_below_midpoint());
        assert!(!HoverGeometry::new(90.0, 100.0, 100.0).is_below_midpoint());
    }

    #[test]
    fn test_preview_index_rules() {
        let below = Some(HoverGeometry::new(200.0, 100.0, 50.0));
        let above = Some(HoverGeometry::new(0.0, 100.0, 50.0));

        assert_eq!(preview_index(3, None, None), 3);
        assert_eq!(preview_index(3, Some(1), below), 1, "only the last card shifts");
        assert_eq!(preview_index(3, Some(2), below), 3);
        assert_eq!(preview_index(3, Some(2), above), 2);
        assert_eq!(preview_index(3, Some(2), None), 2);
    }

    #[test]
    fn test_pick_up_rules() {
        let mut board = dealt();
        assert_eq!(check_pick_up(&board, Gate::ReadyForNextMove, 2), Ok(Container::OnDeck));
        assert_eq!(
            check_pick_up(&board, Gate::AwaitingConfirmation, 2),
            Err(GameError::PickUpBlocked(2))
        );
        assert_eq!(check_pick_up(&board, Gate::ReadyForNextMove, 1), Err(GameError::Locked(1)));
        assert_eq!(check_pick_up(&board, Gate::ReadyForNextMove, 3), Err(GameError::NotDraggable(3)));
        assert_eq!(check_pick_up(&board, Gate::ReadyForNextMove, 8), Err(GameError::UnknownLandmark(8)));

        board.move_on_deck_to_placed(1);
        board.placed_mut()[1].placement = Placement::PlacedUnconfirmed;
        assert_eq!(
            check_pick_up(&board, Gate::AwaitingConfirmation, 2),
            Ok(Container::Placed),
            "the unconfirmed card can still be repositioned"
        );
    }

    #[test]
    fn test_hover_over_container_appends() {
        let mut board = dealt();
        let index = hover(&mut board, 2, Some(DropTarget::Container(Container::Placed)), None).unwrap();

        assert_eq!(index, Some(1));
        assert_eq!(board.ids(Container::Placed), vec![1, 2]);
        assert!(board.on_deck().is_none());
        assert_eq!(board.placed()[1].placement, Placement::OnDeck, "preview is not a move");
    }

    #[test]
    fn test_hover_over_card_inserts_before_or_after() {
        let mut above = dealt();
        let geometry = Some(HoverGeometry::new(0.0, 100.0, 40.0));
        assert_eq!(hover(&mut above, 2, Some(DropTarget::Card(1)), geometry).unwrap(), Some(0));
        assert_eq!(above.ids(Container::Placed), vec![2, 1]);

        let mut below = dealt();
        let geometry = Some(HoverGeometry::new(130.0, 100.0, 40.0));
        assert_eq!(hover(&mut below, 2, Some(DropTarget::Card(1)), geometry).unwrap(), Some(1));
        assert_eq!(below.ids(Container::Placed), vec![1, 2]);
    }

    #[test]
    fn test_hover_ignored_cases() {
        let mut board = dealt();
        let before = board.clone();

        assert_eq!(hover(&mut board, 2, None, None).unwrap(), None);
        assert_eq!(
            hover(&mut board, 2, Some(DropTarget::Container(Container::OnDeck)), None).unwrap(),
            None
        );
        assert_eq!(
            hover(&mut board, 2, Some(DropTarget::Container(Container::Unplaced)), None).unwrap(),
            None
        );
        assert_eq!(board, before);

        hover(&mut board, 2, Some(DropTarget::Container(Container::Placed)), None).unwrap();
        let previewed = board.clone();
        assert_eq!(hover(&mut board, 2, Some(DropTarget::Card(1)), None).unwrap(), None);
        assert_eq!(board, previewed, "same-container hover does not re-splice");
    }

    #[test]
    fn test_hover_unknown_target() {
        let mut board = dealt();
        let before = board.clone();
        assert_eq!(
            hover(&mut board, 2, Some(DropTarget::Card(77)), None),
            Err(GameError::DropTargetNotFound(77))
        );
        assert_eq!(board, before);
    }

    #[test]
    fn test_commit_first_move_refills_from_tail() {
        let mut board = dealt();
        hover(&mut board, 2, Some(DropTarget::Container(Container::Placed)), None).unwrap();

        let result = commit_drop(&mut board, 2, Some(DropTarget::Card(2))).unwrap();
        assert_eq!(result, DropResult::Committed { index: 1, refilled: Some(4) });
        assert_eq!(board.ids(Container::Placed), vec![1, 2]);
        assert_eq!(board.ids(Container::OnDeck), vec![4]);
        assert_eq!(board.ids(Container::Unplaced), vec![3]);
        assert_eq!(board.placed()[1].placement, Placement::PlacedUnconfirmed);
    }

    #[test]
    fn test_commit_over_container_appends() {
        let mut board = dealt();
        hover(&mut board, 2, Some(DropTarget::Container(Container::Placed)), None).unwrap();

        let result = commit_drop(&mut board, 2, Some(DropTarget::Container(Container::Placed))).unwrap();
        assert_eq!(result, DropResult::Committed { index: 1, refilled: Some(4) });
        assert_eq!(board.ids(Container::Placed), vec![1, 2]);
        assert_eq!(board.placed()[1].placement, Placement::PlacedUnconfirmed);
    }

    #[test]
    fn test_commit_over_container_moves_card_to_end() {
        let mut board = dealt();
        hover(&mut board, 2, Some(DropTarget::Card(1)), None).unwrap();
        assert_eq!(board.ids(Container::Placed), vec![2, 1]);

        let result = commit_drop(&mut board, 2, Some(DropTarget::Container(Container::Placed))).unwrap();
        assert_eq!(result, DropResult::Committed { index: 1, refilled: Some(4) });
        assert_eq!(board.ids(Container::Placed), vec![1, 2]);
    }

    #[test]
    fn test_commit_reposition_keeps_on_deck() {
        let mut board = dealt();
        hover(&mut board, 2, Some(DropTarget::Container(Container::Placed)), None).unwrap();
        commit_drop(&mut board, 2, Some(DropTarget::Card(2))).unwrap();

        let result = commit_drop(&mut board, 2, Some(DropTarget::Card(1))).unwrap();
        assert_eq!(result, DropResult::Committed { index: 0, refilled: None });
        assert_eq!(board.ids(Container::Placed), vec![2, 1]);
        assert_eq!(board.ids(Container::OnDeck), vec![4]);
        assert_eq!(board.ids(Container::Unplaced), vec![3]);
    }

    #[test]
    fn test_commit_with_empty_pool_skips_refill() {
        let mut board = Board::deal(landmarks_from_dates(&["2010", "2020"])).unwrap();
        hover(&mut board, 2, Some(DropTarget::Container(Container::Placed)), None).unwrap();

        let result = commit_drop(&mut board, 2, Some(DropTarget::Card(2))).unwrap();
        assert_eq!(result, DropResult::Committed { index: 1, refilled: None });
        assert!(board.on_deck().is_none());
        assert!(board.unplaced().is_empty());
    }

    #[test]
    fn test_drop_cancel_cases() {
        let mut board = dealt();
        assert_eq!(commit_drop(&mut board, 2, None).unwrap(), DropResult::Cancelled);

        // Never hovered into the timeline: source and target differ.
        assert_eq!(
            commit_drop(&mut board, 2, Some(DropTarget::Container(Container::Placed))).unwrap(),
            DropResult::Cancelled
        );
        assert_eq!(
            commit_drop(&mut board, 2, Some(DropTarget::Card(2))).unwrap(),
            DropResult::Cancelled,
            "released on the on-deck slot"
        );
        assert_eq!(board, dealt());
    }
}
