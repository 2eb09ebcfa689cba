//! Errors raised by game transitions.

use kwiz_events::LandmarkId;

/// Reasons a game action was refused.
///
/// A refused action never leaves a half-applied change behind. Variants for
/// which [`GameError::is_invariant_violation`] holds additionally reset any
/// drag in progress back to where it started.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// A quiz needs an anchor and at least one landmark to place
    #[error("a quiz needs at least 2 landmarks, got {0}")]
    NotEnoughLandmarks(usize),
    #[error("landmark {0} appears more than once")]
    DuplicateLandmark(LandmarkId),
    #[error("the placed timeline must contain at least the anchor")]
    MissingAnchor,
    #[error("landmark {0} is not on the board")]
    UnknownLandmark(LandmarkId),
    #[error("drop target {0} is not on the board")]
    DropTargetNotFound(LandmarkId),
    #[error("no drag is in progress")]
    NotDragging,
    #[error("gesture for landmark {got} while landmark {expected} is being dragged")]
    ActiveMismatch {
        expected: LandmarkId,
        got: LandmarkId,
    },
    /// The on-deck landmark stays put until the last move is confirmed
    #[error("landmark {0} cannot be picked up before the last placement is confirmed")]
    PickUpBlocked(LandmarkId),
    #[error("landmark {0} is confirmed and cannot move")]
    Locked(LandmarkId),
    #[error("landmark {0} has not been surfaced yet")]
    NotDraggable(LandmarkId),
    #[error("landmark {0} is not awaiting confirmation")]
    NotConfirmable(LandmarkId),
    #[error("cannot confirm while a drag is in progress")]
    DragInProgress,
}

impl GameError {
    /// Lookups that failed mid-gesture. These abandon the drag.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(
            self,
            GameError::UnknownLandmark(_)
                | GameError::DropTargetNotFound(_)
                | GameError::NotDragging
                | GameError::ActiveMismatch { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invariant_violation_classification() {
        assert!(GameError::UnknownLandmark(1).is_invariant_violation());
        assert!(GameError::DropTargetNotFound(1).is_invariant_violation());
        assert!(GameError::NotDragging.is_invariant_violation());
        assert!(GameError::ActiveMismatch { expected: 1, got: 2 }.is_invariant_violation());

        assert!(!GameError::PickUpBlocked(1).is_invariant_violation());
        assert!(!GameError::Locked(1).is_invariant_violation());
        assert!(!GameError::NotConfirmable(1).is_invariant_violation());
        assert!(!GameError::DragInProgress.is_invariant_violation());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            GameError::NotEnoughLandmarks(1).to_string(),
            "a quiz needs at least 2 landmarks, got 1"
        );
        assert_eq!(
            GameError::ActiveMismatch { expected: 4, got: 9 }.to_string(),
            "gesture for landmark 9 while landmark 4 is being dragged"
        );
    }
}
