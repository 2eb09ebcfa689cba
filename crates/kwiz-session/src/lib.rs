//! Chronokwiz sessions: fetching quizzes and playing them to completion.
//!
//! The session layer sits between a quiz backend and the game core. It
//! fetches a quiz, decides whether it is still playable, deals a game and
//! reports the final score back.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐   KwizPayload    ┌──────────────┐   Action / Outcome   ┌───────────┐
//! │ QuizSource  │ ───────────────▶ │   Session    │ ◀──────────────────▶ │ interface │
//! └─────────────┘ ◀─────────────── └──────────────┘                      └───────────┘
//!                    mark_seen           │ Game (kwiz-core)
//! ```
//!
//! # Modules
//!
//! - [`config`]: TOML configuration
//! - [`source`]: Quiz backend boundary and the directory-backed source
//! - [`session`]: Daily, archived and custom play-throughs
//! - [`history`]: Per-date completion history

pub mod config;
pub mod history;
pub mod session;
pub mod source;

// Re-export config types
pub use config::{
    default_config_toml, AttemptsConfig, ConfigError, KwizConfig, ScoringConfig, SessionConfig,
    SourceConfig, TomlSerializeError,
};

// Re-export source types
pub use source::{topic_slug, DirectorySource, QuizSource, SourceError};

// Re-export session types
pub use session::{CompletionCallback, Session, SessionError, SessionKind, SessionState};

// Re-export history types
pub use history::{normalize_date, summarize, totals, HistoryEntry, HistoryStatus, HistoryTotals};
