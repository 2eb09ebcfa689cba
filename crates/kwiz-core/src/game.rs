//! Game state and the action dispatcher.
//!
//! A [`Game`] owns the board, the drag state, the move gate and the running
//! score. Interface layers translate their gestures into [`Action`]s and feed
//! them to [`Game::dispatch`], which either applies the whole transition or
//! refuses it with a [`GameError`].

use kwiz_events::{Landmark, LandmarkId};
use serde::{Deserialize, Serialize};

use crate::board::{Board, Container, DropTarget, Placement};
use crate::completion::CompletionDetector;
use crate::drag::{self, DragState, DropResult, Gate, HoverGeometry};
use crate::error::GameError;
use crate::scoring::{self, Misplacement, MAX_ITEM_SCORE};

/// A player gesture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    DragStart {
        id: LandmarkId,
    },
    DragOver {
        id: LandmarkId,
        #[serde(default)]
        over: Option<DropTarget>,
        #[serde(default)]
        geometry: Option<HoverGeometry>,
    },
    DragEnd {
        id: LandmarkId,
        #[serde(default)]
        over: Option<DropTarget>,
    },
    Confirm {
        id: LandmarkId,
    },
}

/// Scoring details of a confirmed placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmReport {
    pub id: LandmarkId,
    pub points: u32,
    pub misplacement: Misplacement,
    /// Index the landmark was confirmed at
    pub from_index: usize,
    /// Index it settled at after scoring
    pub to_index: usize,
    pub total_score: u32,
    /// Final score, present only on the confirmation that finished the game
    pub completed: Option<u32>,
}

impl ConfirmReport {
    pub fn is_correct(&self) -> bool {
        self.misplacement == Misplacement::None
    }
}

/// What an applied action did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    PickedUp {
        id: LandmarkId,
        from: Container,
    },
    /// The on-deck landmark is previewed in the timeline
    Previewed {
        id: LandmarkId,
        index: usize,
    },
    /// Hover that does not change the board
    Hovered {
        id: LandmarkId,
    },
    Committed {
        id: LandmarkId,
        index: usize,
        refilled: Option<LandmarkId>,
    },
    /// Drop outside the timeline; the board is back to its pick-up state
    Cancelled {
        id: LandmarkId,
    },
    Confirmed(ConfirmReport),
}

/// Read-only view of a game for rendering and persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSnapshot {
    pub board: Board,
    pub gate: Gate,
    pub dragging: Option<LandmarkId>,
    pub score: u32,
    pub is_complete: bool,
}

/// A single play-through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    board: Board,
    drag: DragState,
    gate: Gate,
    score: u32,
    max_item_score: u32,
    completion: CompletionDetector,
}

impl Game {
    /// Deals a new game from landmarks in deal order.
    pub fn new(landmarks: Vec<Landmark>) -> Result<Self, GameError> {
        Ok(Self::from_board(Board::deal(landmarks)?))
    }

    /// Resumes a game on an existing board.
    ///
    /// The gate is closed while the timeline holds an unconfirmed placement.
    pub fn from_board(board: Board) -> Self {
        let gate = if board.unconfirmed_count() > 0 {
            Gate::AwaitingConfirmation
        } else {
            Gate::ReadyForNextMove
        };
        Self {
            board,
            drag: DragState::Idle,
            gate,
            score: 0,
            max_item_score: MAX_ITEM_SCORE,
            completion: CompletionDetector::new(),
        }
    }

    pub fn with_max_item_score(mut self, max_item_score: u32) -> Self {
        self.max_item_score = max_item_score;
        self
    }

    pub fn with_score(mut self, score: u32) -> Self {
        self.score = score;
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn drag_state(&self) -> &DragState {
        &self.drag
    }

    pub fn gate(&self) -> Gate {
        self.gate
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn max_item_score(&self) -> u32 {
        self.max_item_score
    }

    pub fn is_complete(&self) -> bool {
        self.completion.has_fired()
    }

    pub fn final_score(&self) -> Option<u32> {
        self.completion.final_score()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: self.board.clone(),
            gate: self.gate,
            dragging: self.drag.active(),
            score: self.score,
            is_complete: self.is_complete(),
        }
    }

    /// Applies one action.
    ///
    /// Invariant violations abandon the drag in progress, restoring the board
    /// to its pick-up state.
    pub fn dispatch(&mut self, action: &Action) -> Result<Outcome, GameError> {
        let result = match *action {
            Action::DragStart { id } => self.on_drag_start(id),
            Action::DragOver { id, over, geometry } => self.on_drag_over(id, over, geometry),
            Action::DragEnd { id, over } => self.on_drag_end(id, over),
            Action::Confirm { id } => self.confirm_placement(id),
        };

        if let Err(err) = &result {
            if err.is_invariant_violation() {
                tracing::warn!("Abandoning drag: {}", err);
                self.reset_drag();
            } else {
                tracing::debug!("Refused {:?}: {}", action, err);
            }
        }
        result
    }

    /// Picks up a landmark. A drag left over from an earlier gesture is
    /// abandoned first.
    fn on_drag_start(&mut self, id: LandmarkId) -> Result<Outcome, GameError> {
        if let Some(stale) = self.drag.active() {
            tracing::warn!("Drag of landmark {} never ended, reverting it", stale);
            self.reset_drag();
        }

        let from = drag::check_pick_up(&self.board, self.gate, id)?;
        self.drag = DragState::Dragging {
            active: id,
            origin: Box::new(self.board.clone()),
        };
        tracing::debug!("Picked up landmark {} from {:?}", id, from);
        Ok(Outcome::PickedUp { id, from })
    }

    fn on_drag_over(
        &mut self,
        id: LandmarkId,
        over: Option<DropTarget>,
        geometry: Option<HoverGeometry>,
    ) -> Result<Outcome, GameError> {
        self.expect_active(id)?;
        match drag::hover(&mut self.board, id, over, geometry)? {
            Some(index) => {
                tracing::trace!("Previewing landmark {} at {}", id, index);
                Ok(Outcome::Previewed { id, index })
            }
            None => Ok(Outcome::Hovered { id }),
        }
    }

    fn on_drag_end(&mut self, id: LandmarkId, over: Option<DropTarget>) -> Result<Outcome, GameError> {
        self.expect_active(id)?;
        match drag::commit_drop(&mut self.board, id, over)? {
            DropResult::Cancelled => {
                self.reset_drag();
                tracing::debug!("Drop of landmark {} cancelled", id);
                Ok(Outcome::Cancelled { id })
            }
            DropResult::Committed { index, refilled } => {
                self.drag = DragState::Idle;
                self.gate = Gate::AwaitingConfirmation;
                tracing::debug!("Landmark {} dropped at {}", id, index);
                Ok(Outcome::Committed { id, index, refilled })
            }
        }
    }

    /// Confirms the unconfirmed placement `id`, scores it and settles it
    /// into its scored position.
    fn confirm_placement(&mut self, id: LandmarkId) -> Result<Outcome, GameError> {
        if self.drag.is_dragging() {
            return Err(GameError::DragInProgress);
        }

        let from_index = match self.board.locate(id) {
            None => return Err(GameError::UnknownLandmark(id)),
            Some((Container::Placed, index))
                if self.board.placed()[index].placement == Placement::PlacedUnconfirmed =>
            {
                index
            }
            Some(_) => return Err(GameError::NotConfirmable(id)),
        };

        let result = scoring::evaluate(self.board.placed(), from_index, self.max_item_score);
        let placed = self.board.placed_mut();
        let to_index = scoring::settle(placed, from_index, result.settle_index);
        placed[to_index].placement = Placement::PlacedConfirmed;

        self.score = self.score.saturating_add(result.points);
        self.gate = Gate::ReadyForNextMove;

        tracing::info!(
            "Confirmed landmark {}: {} point(s), {:?}, total {}",
            id,
            result.points,
            result.misplacement,
            self.score
        );

        let completed = self.completion.observe(&self.board, self.score);
        if let Some(final_score) = completed {
            tracing::info!("Game complete with score {}", final_score);
        }

        Ok(Outcome::Confirmed(ConfirmReport {
            id,
            points: result.points,
            misplacement: result.misplacement,
            from_index,
            to_index,
            total_score: self.score,
            completed,
        }))
    }

    /// Abandons the drag in progress and restores the board it started
    /// from. Returns false when nothing was being dragged.
    pub fn reset_drag(&mut self) -> bool {
        match std::mem::take(&mut self.drag) {
            DragState::Idle => false,
            DragState::Dragging { origin, .. } => {
                self.board = *origin;
                true
            }
        }
    }

    fn expect_active(&self, id: LandmarkId) -> Result<(), GameError> {
        match self.drag.active() {
            None => Err(GameError::NotDragging),
            Some(active) if active != id => Err(GameError::ActiveMismatch {
                expected: active,
                got: id,
            }),
            Some(_) => Ok(()),
        }
    }
}

/// Applies `action` to an owned game and hands it back with the result.
pub fn reduce(mut game: Game, action: &Action) -> (Game, Result<Outcome, GameError>) {
    let result = game.dispatch(action);
    (game, result)
}
