//! Core game logic for Chronokwiz: containers, dragging, scoring.
//!
//! The crate is free of I/O apart from the attempt counter's file store.
//! Everything else is a pure transition over owned state.

pub mod attempts;
pub mod board;
pub mod completion;
pub mod drag;
pub mod error;
pub mod game;
pub mod ordering;
pub mod scoring;

pub use attempts::{AttemptCounter, JsonFileStore, KeyValueStore, MemoryStore, StoreError};
pub use board::{Board, Card, Container, DropTarget, Placement};
pub use completion::CompletionDetector;
pub use drag::{DragState, Gate, HoverGeometry};
pub use error::GameError;
pub use game::{reduce, Action, ConfirmReport, Game, GameSnapshot, Outcome};
pub use ordering::{order_chronologically, process_payload, randomize, ProcessedKwiz};
pub use scoring::{Misplacement, PlacementScore, MAX_ITEM_SCORE};
