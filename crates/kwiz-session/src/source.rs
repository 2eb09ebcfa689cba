//! Where quizzes come from.
//!
//! [`QuizSource`] is the boundary to the quiz backend. [`DirectorySource`]
//! serves a directory of JSON files laid out like this:
//!
//! ```text
//! quizzes/
//! ├── daily.json              today's quiz
//! ├── dates.json              completion status per published quiz
//! ├── by-date/2024-03-01.json archived quizzes
//! └── custom/<topic>.json     generated quizzes, optionally <topic>-<attempt>.json
//! ```

use std::fs;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use kwiz_core::attempts::normalize_topic;
use kwiz_events::{CustomKwiz, DateStatus, DatesResponse, KwizPayload, SeenRequest};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Backend operations a session needs.
pub trait QuizSource {
    /// Fetches today's quiz for a category.
    fn fetch_daily(&self, category: &str) -> Result<KwizPayload, SourceError>;

    /// Fetches the quiz published on a `YYYY-MM-DD` date.
    fn fetch_by_date(&self, date: &str) -> Result<KwizPayload, SourceError>;

    /// Fetches the completion status of every published quiz.
    fn fetch_dates(&self) -> Result<DatesResponse, SourceError>;

    /// Records that a quiz was played, with its final score.
    fn mark_seen(&mut self, request: &SeenRequest) -> Result<(), SourceError>;

    /// Fetches a generated quiz for a topic.
    fn fetch_custom(&self, prompt: &str, attempt_number: u32) -> Result<CustomKwiz, SourceError>;
}

/// Serves quizzes from a directory of JSON files.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn read_json<T: DeserializeOwned>(&self, relative: &Path) -> Result<T, SourceError> {
        let path = self.root.join(relative);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(SourceError::NotFound(path))
            }
            Err(e) => return Err(SourceError::Io(e)),
        };
        Ok(serde_json::from_str(&content)?)
    }

    fn write_json<T: Serialize>(&self, relative: &Path, value: &T) -> Result<(), SourceError> {
        let path = self.root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let writer = BufWriter::new(fs::File::create(&path)?);
        serde_json::to_writer_pretty(writer, value)?;
        Ok(())
    }
}

impl QuizSource for DirectorySource {
    fn fetch_daily(&self, category: &str) -> Result<KwizPayload, SourceError> {
        let mut payload: KwizPayload = self.read_json(Path::new("daily.json"))?;
        if payload.category.is_empty() {
            payload.category = category.to_string();
        }
        tracing::debug!(
            "Loaded daily quiz {:?} with {} landmarks",
            payload.id,
            payload.events.len()
        );
        Ok(payload)
    }

    fn fetch_by_date(&self, date: &str) -> Result<KwizPayload, SourceError> {
        let relative = Path::new("by-date").join(format!("{}.json", date));
        let mut payload: KwizPayload = self.read_json(&relative)?;
        if payload.date.is_empty() {
            payload.date = date.to_string();
        }
        Ok(payload)
    }

    fn fetch_dates(&self) -> Result<DatesResponse, SourceError> {
        match self.read_json(Path::new("dates.json")) {
            Err(SourceError::NotFound(_)) => Ok(DatesResponse::default()),
            other => other,
        }
    }

    fn mark_seen(&mut self, request: &SeenRequest) -> Result<(), SourceError> {
        let mut dates = self.fetch_dates()?;
        match dates
            .dates
            .iter_mut()
            .find(|d| d.chronokwiz_id == Some(request.chronokwiz_id))
        {
            Some(status) => {
                status.is_seen = true;
                status.score = request.score;
            }
            None => {
                let today = chrono::Local::now().format("%Y-%m-%d").to_string();
                dates.dates.push(DateStatus {
                    date: today,
                    is_seen: true,
                    score: request.score,
                    chronokwiz_id: Some(request.chronokwiz_id),
                });
            }
        }
        self.write_json(Path::new("dates.json"), &dates)?;
        tracing::info!(
            "Marked quiz {} seen with score {:?}",
            request.chronokwiz_id,
            request.score
        );
        Ok(())
    }

    fn fetch_custom(&self, prompt: &str, attempt_number: u32) -> Result<CustomKwiz, SourceError> {
        let slug = topic_slug(prompt);
        if slug.is_empty() {
            return Err(SourceError::NotFound(self.root.join("custom")));
        }

        let attempt_path = Path::new("custom").join(format!("{}-{}.json", slug, attempt_number));
        let mut custom: CustomKwiz = match self.read_json(&attempt_path) {
            Err(SourceError::NotFound(_)) => {
                self.read_json(&Path::new("custom").join(format!("{}.json", slug)))?
            }
            other => other?,
        };

        custom.prompt.get_or_insert_with(|| prompt.to_string());
        custom.attempt_number.get_or_insert(attempt_number);
        Ok(custom)
    }
}

/// File-name form of a topic: lowercase words joined by `-`.
pub fn topic_slug(topic: &str) -> String {
    normalize_topic(topic)
        .split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

/// Errors that can occur while talking to a quiz source.
#[derive(Debug)]
pub enum SourceError {
    /// The requested quiz does not exist
    NotFound(PathBuf),
    /// I/O error (file operations)
    Io(std::io::Error),
    /// Malformed quiz data
    Json(serde_json::Error),
}

impl std::fmt::Display for SourceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceError::NotFound(path) => write!(f, "quiz not found: {}", path.display()),
            SourceError::Io(e) => write!(f, "I/O error: {}", e),
            SourceError::Json(e) => write!(f, "JSON error: {}", e),
        }
    }
}

impl std::error::Error for SourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SourceError::NotFound(_) => None,
            SourceError::Io(e) => Some(e),
            SourceError::Json(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for SourceError {
    fn from(e: std::io::Error) -> Self {
        SourceError::Io(e)
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(e: serde_json::Error) -> Self {
        SourceError::Json(e)
    }
}
