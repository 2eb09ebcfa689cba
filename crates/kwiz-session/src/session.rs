//! One play-through of a quiz, from fetch to completion.
//!
//! A session fetches a quiz from a [`QuizSource`], checks whether it was
//! already completed, deals a [`Game`] and reports the final score back to
//! the source once the game ends.

use kwiz_core::attempts::{normalize_topic, AttemptCounter, KeyValueStore, StoreError};
use kwiz_core::{
    process_payload, Action, Card, ConfirmReport, Game, GameError, Outcome, Placement,
};
use kwiz_events::{ChronokwizId, DatesResponse, KwizPayload, Landmark, SeenRequest};
use rand::Rng;
use uuid::Uuid;

use crate::config::KwizConfig;
use crate::history::normalize_date;
use crate::source::{QuizSource, SourceError};

/// How the quiz was chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionKind {
    Daily,
    ByDate,
    Custom { topic: String, attempt: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Playing(Game),
    /// The quiz was finished in an earlier session; only the answer key is
    /// shown
    AlreadyCompleted { score: Option<u32> },
}

/// Callback invoked once with the final score.
pub type CompletionCallback = Box<dyn FnMut(u32)>;

pub struct Session<S> {
    id: Uuid,
    source: S,
    kind: SessionKind,
    chronokwiz_id: Option<ChronokwizId>,
    category: String,
    date: String,
    ordered: Vec<Landmark>,
    state: SessionState,
    on_complete: Option<CompletionCallback>,
    pending_seen: Option<SeenRequest>,
}

impl<S: QuizSource> Session<S> {
    /// Starts a session on today's quiz.
    pub fn daily<R: Rng + ?Sized>(
        source: S,
        config: &KwizConfig,
        rng: &mut R,
    ) -> Result<Self, SessionError> {
        let payload = source.fetch_daily(&config.source.default_category)?;
        Self::from_published(source, payload, SessionKind::Daily, config, rng)
    }

    /// Starts a session on the quiz published on `date`.
    pub fn by_date<R: Rng + ?Sized>(
        source: S,
        date: &str,
        config: &KwizConfig,
        rng: &mut R,
    ) -> Result<Self, SessionError> {
        let day = normalize_date(date).ok_or_else(|| SessionError::InvalidDate(date.to_string()))?;
        let payload = source.fetch_by_date(&day.format("%Y-%m-%d").to_string())?;
        Self::from_published(source, payload, SessionKind::ByDate, config, rng)
    }

    /// Starts a session on a generated quiz for `topic`.
    ///
    /// The topic's attempt counter is bumped once the fetch succeeds, even if
    /// the quiz turns out to be empty.
    pub fn custom<K: KeyValueStore, R: Rng + ?Sized>(
        source: S,
        counter: &mut AttemptCounter<K>,
        topic: &str,
        config: &KwizConfig,
        rng: &mut R,
    ) -> Result<Self, SessionError> {
        let topic = normalize_topic(topic);
        if topic.is_empty() {
            return Err(SessionError::EmptyTopic);
        }

        let attempt = counter.get_attempt_count(&topic);
        let custom = source.fetch_custom(&topic, attempt)?;
        if let Err(e) = counter.increment_attempt_count(&topic) {
            tracing::warn!("Could not bump attempt counter for {:?}: {}", topic, e);
        }
        if custom.events.is_empty() {
            return Err(SessionError::EmptyQuiz);
        }

        let today = chrono::Local::now().format("%Y-%m-%d").to_string();
        let category = custom.prompt.clone().unwrap_or_else(|| topic.clone());
        let payload = KwizPayload::new(custom.events, category, today);
        let kind = SessionKind::Custom {
            topic,
            attempt: custom.attempt_number.unwrap_or(attempt),
        };
        Self::start(source, payload, kind, None, config, rng)
    }

    fn from_published<R: Rng + ?Sized>(
        source: S,
        payload: KwizPayload,
        kind: SessionKind,
        config: &KwizConfig,
        rng: &mut R,
    ) -> Result<Self, SessionError> {
        if payload.is_empty() {
            return Err(SessionError::EmptyQuiz);
        }
        let dates = source.fetch_dates()?;
        let completed_score = find_completed(&dates, &payload);
        Self::start(source, payload, kind, completed_score, config, rng)
    }

    fn start<R: Rng + ?Sized>(
        source: S,
        payload: KwizPayload,
        kind: SessionKind,
        completed_score: Option<Option<u32>>,
        config: &KwizConfig,
        rng: &mut R,
    ) -> Result<Self, SessionError> {
        if payload.is_empty() {
            return Err(SessionError::EmptyQuiz);
        }

        let processed = process_payload(&payload, rng);
        let state = match completed_score {
            Some(score) => SessionState::AlreadyCompleted { score },
            None => SessionState::Playing(
                Game::new(processed.randomized)?
                    .with_max_item_score(config.scoring.max_item_score),
            ),
        };

        let session = Self {
            id: Uuid::new_v4(),
            source,
            kind,
            chronokwiz_id: payload.id,
            category: payload.category,
            date: payload.date,
            ordered: processed.ordered,
            state,
            on_complete: None,
            pending_seen: None,
        };
        tracing::info!(
            "Session {} started: {:?} quiz {:?} ({}), {}",
            session.id,
            session.kind,
            session.chronokwiz_id,
            session.category,
            if session.is_completed() { "already completed" } else { "playing" }
        );
        Ok(session)
    }

    /// Registers the callback invoked with the final score.
    pub fn on_complete(&mut self, callback: impl FnMut(u32) + 'static) {
        self.on_complete = Some(Box::new(callback));
    }

    /// Forwards an action to the game.
    ///
    /// When the action finishes the game the completion callback runs and the
    /// quiz is marked seen at the source. A failure to mark it is logged and
    /// kept for [`Session::retry_mark_seen`]; the local score stands.
    pub fn dispatch(&mut self, action: &Action) -> Result<Outcome, SessionError> {
        let SessionState::Playing(game) = &mut self.state else {
            return Err(SessionError::AlreadyCompleted);
        };
        let outcome = game.dispatch(action)?;

        if let Outcome::Confirmed(ConfirmReport {
            completed: Some(final_score),
            ..
        }) = outcome
        {
            self.handle_complete(final_score);
        }
        Ok(outcome)
    }

    fn handle_complete(&mut self, final_score: u32) {
        tracing::info!("Session {} complete with score {}", self.id, final_score);
        if let Some(callback) = self.on_complete.as_mut() {
            callback(final_score);
        }

        if let Some(chronokwiz_id) = self.chronokwiz_id {
            let request = SeenRequest {
                chronokwiz_id,
                score: Some(final_score),
            };
            if let Err(e) = self.source.mark_seen(&request) {
                tracing::error!("Failed to mark quiz {} seen: {}", chronokwiz_id, e);
                self.pending_seen = Some(request);
            }
        }
    }

    /// Retries a failed "mark seen" call. Returns false when nothing was
    /// pending.
    pub fn retry_mark_seen(&mut self) -> Result<bool, SessionError> {
        let Some(request) = self.pending_seen.take() else {
            return Ok(false);
        };
        match self.source.mark_seen(&request) {
            Ok(()) => Ok(true),
            Err(e) => {
                tracing::error!("Retry marking quiz {} seen failed: {}", request.chronokwiz_id, e);
                self.pending_seen = Some(request);
                Err(SessionError::Fetch(e))
            }
        }
    }

    /// Settles a pending "mark seen" call at the end of a play-through.
    ///
    /// Without `retry` the request is only logged; the source is not called
    /// again. Returns the request if it is still pending.
    pub fn settle_pending_seen(&mut self, retry: bool) -> Option<SeenRequest> {
        let request = self.pending_seen?;
        if !retry {
            tracing::warn!(
                "Quiz {} was not recorded as seen (score {:?})",
                request.chronokwiz_id,
                request.score
            );
            return Some(request);
        }
        match self.retry_mark_seen() {
            Ok(_) => {
                tracing::info!("Quiz {} recorded as seen", request.chronokwiz_id);
                None
            }
            Err(_) => self.pending_seen,
        }
    }
}

impl<S> Session<S> {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn kind(&self) -> &SessionKind {
        &self.kind
    }

    pub fn chronokwiz_id(&self) -> Option<ChronokwizId> {
        self.chronokwiz_id
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn game(&self) -> Option<&Game> {
        match &self.state {
            SessionState::Playing(game) => Some(game),
            SessionState::AlreadyCompleted { .. } => None,
        }
    }

    /// True when the quiz was finished, in this session or an earlier one.
    pub fn is_completed(&self) -> bool {
        match &self.state {
            SessionState::Playing(game) => game.is_complete(),
            SessionState::AlreadyCompleted { .. } => true,
        }
    }

    /// Current score, or the recorded score of an earlier completion.
    pub fn score(&self) -> Option<u32> {
        match &self.state {
            SessionState::Playing(game) => Some(game.score()),
            SessionState::AlreadyCompleted { score } => *score,
        }
    }

    /// The answer key: landmarks in chronological order, all confirmed.
    pub fn completed_view(&self) -> Vec<Card> {
        self.ordered
            .iter()
            .cloned()
            .map(|landmark| Card::new(landmark, Placement::PlacedConfirmed))
            .collect()
    }

    pub fn pending_seen(&self) -> Option<&SeenRequest> {
        self.pending_seen.as_ref()
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn into_source(self) -> S {
        self.source
    }
}

impl<S> std::fmt::Debug for Session<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("kind", &self.kind)
            .field("chronokwiz_id", &self.chronokwiz_id)
            .field("state", &self.state)
            .field("pending_seen", &self.pending_seen)
            .finish_non_exhaustive()
    }
}

/// Looks up the payload's status, by quiz id first and by date otherwise.
/// Returns the recorded score when the quiz was already completed.
fn find_completed(dates: &DatesResponse, payload: &KwizPayload) -> Option<Option<u32>> {
    let by_id = payload.id.and_then(|id| dates.find_by_id(id));
    let status = by_id.or_else(|| {
        let day = normalize_date(&payload.date)?;
        dates
            .dates
            .iter()
            .find(|status| normalize_date(&status.date) == Some(day))
    })?;
    status.is_completed().then_some(status.score)
}

/// Errors that can occur while running a session.
#[derive(Debug)]
pub enum SessionError {
    /// The quiz source failed
    Fetch(SourceError),
    /// The fetched quiz has no landmarks
    EmptyQuiz,
    /// A date that is not `YYYY-MM-DD` or RFC 3339
    InvalidDate(String),
    /// A custom quiz was requested without a topic
    EmptyTopic,
    /// The game refused an action
    Game(GameError),
    /// The attempt counter could not be stored
    Store(StoreError),
    /// The quiz was completed before this session started
    AlreadyCompleted,
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::Fetch(e) => write!(f, "Quiz source error: {}", e),
            SessionError::EmptyQuiz => write!(f, "Quiz has no landmarks"),
            SessionError::InvalidDate(date) => write!(f, "Invalid date: {:?}", date),
            SessionError::EmptyTopic => write!(f, "Topic is empty"),
            SessionError::Game(e) => write!(f, "Game error: {}", e),
            SessionError::Store(e) => write!(f, "Attempt store error: {}", e),
            SessionError::AlreadyCompleted => write!(f, "Quiz was already completed"),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Fetch(e) => Some(e),
            SessionError::Game(e) => Some(e),
            SessionError::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SourceError> for SessionError {
    fn from(e: SourceError) -> Self {
        SessionError::Fetch(e)
    }
}

impl From<GameError> for SessionError {
    fn from(e: GameError) -> Self {
        SessionError::Game(e)
    }
}

impl From<StoreError> for SessionError {
    fn from(e: StoreError) -> Self {
        SessionError::Store(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kwiz_core::{Container, DropTarget, MemoryStore};
    use kwiz_events::fixtures::{landmarks_from_dates, sample_dates, sample_kwiz};
    use kwiz_events::{CustomKwiz, DateStatus};
    use rand::rngs::SmallRng;
    use rand::SeedableRng;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// In-memory source recording `mark_seen` calls.
    #[derive(Debug, Default)]
    struct FakeSource {
        daily: Option<KwizPayload>,
        dates: DatesResponse,
        custom: Option<CustomKwiz>,
        fail_mark_seen: bool,
        seen: Vec<SeenRequest>,
        custom_requests: RefCell<Vec<(String, u32)>>,
    }

    impl QuizSource for FakeSource {
        fn fetch_daily(&self, _category: &str) -> Result<KwizPayload, SourceError> {
            self.daily
                .clone()
                .ok_or_else(|| SourceError::NotFound("daily.json".into()))
        }

        fn fetch_by_date(&self, date: &str) -> Result<KwizPayload, SourceError> {
            self.daily
                .clone()
                .filter(|p| p.date.starts_with(date))
                .ok_or_else(|| SourceError::NotFound(date.into()))
        }

        fn fetch_dates(&self) -> Result<DatesResponse, SourceError> {
            Ok(self.dates.clone())
        }

        fn mark_seen(&mut self, request: &SeenRequest) -> Result<(), SourceError> {
            if self.fail_mark_seen {
                return Err(SourceError::Io(std::io::Error::new(std::io::ErrorKind::Other, "backend down")));
            }
            self.seen.push(*request);
            Ok(())
        }

        fn fetch_custom(&self, prompt: &str, attempt: u32) -> Result<CustomKwiz, SourceError> {
            self.custom_requests
                .borrow_mut()
                .push((prompt.to_string(), attempt));
            self.custom
                .clone()
                .ok_or_else(|| SourceError::NotFound(prompt.into()))
        }
    }

    fn two_landmark_quiz() -> KwizPayload {
        KwizPayload::new(landmarks_from_dates(&["2010", "2020"]), "American", "2024-03-02")
            .with_id(202)
    }

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(1)
    }

    /// Plays a two-landmark game: the on-deck card goes to the end.
    fn finish(session: &mut Session<FakeSource>) -> Outcome {
        let game = session.game().unwrap();
        let id = game.board().on_deck().unwrap().id();
        session.dispatch(&Action::DragStart { id }).unwrap();
        session
            .dispatch(&Action::DragOver {
                id,
                over: Some(DropTarget::Container(Container::Placed)),
                geometry: None,
            })
            .unwrap();
        session
            .dispatch(&Action::DragEnd {
                id,
                over: Some(DropTarget::Card(id)),
            })
            .unwrap();
        session.dispatch(&Action::Confirm { id }).unwrap()
    }

    #[test]
    fn test_daily_session_deals_game() {
        let source = FakeSource {
            daily: Some(sample_kwiz()),
            dates: sample_dates(),
            ..FakeSource::default()
        };
        let session = Session::daily(source, &KwizConfig::default(), &mut rng()).unwrap();

        assert_eq!(session.kind(), &SessionKind::Daily);
        assert_eq!(session.chronokwiz_id(), Some(101));
        assert!(!session.is_completed());
        let game = session.game().unwrap();
        assert_eq!(game.board().len(), 6);
        assert_eq!(game.board().placed().len(), 1);
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn test_already_completed_by_id() {
        let mut dates = sample_dates();
        dates.dates[2].is_seen = true;
        dates.dates[2].score = Some(11);
        let source = FakeSource {
            daily: Some(sample_kwiz()),
            dates,
            ..FakeSource::default()
        };
        let mut session = Session::daily(source, &KwizConfig::default(), &mut rng()).unwrap();

        assert_eq!(session.state(), &SessionState::AlreadyCompleted { score: Some(11) });
        assert_eq!(session.score(), Some(11));

        let view = session.completed_view();
        assert_eq!(view.len(), 6);
        assert!(view.iter().all(Card::is_confirmed));
        assert_eq!(view.iter().map(Card::id).collect::<Vec<_>>(), vec![1, 2, 3, 4, 5, 6]);

        assert!(matches!(
            session.dispatch(&Action::DragStart { id: 1 }),
            Err(SessionError::AlreadyCompleted)
        ));
    }

    #[test]
    fn test_already_completed_by_date_fallback() {
        let mut payload = sample_kwiz();
        payload.id = None;
        let mut status = DateStatus::new("2024-03-01");
        status.is_seen = true;
        status.score = Some(4);
        let source = FakeSource {
            daily: Some(payload),
            dates: DatesResponse { dates: vec![status] },
            ..FakeSource::default()
        };
        let session = Session::daily(source, &KwizConfig::default(), &mut rng()).unwrap();
        assert_eq!(session.state(), &SessionState::AlreadyCompleted { score: Some(4) });
    }

    #[test]
    fn test_seen_without_score_is_playable() {
        let mut payload = sample_kwiz();
        payload.id = Some(100);
        let source = FakeSource {
            daily: Some(payload),
            dates: sample_dates(),
            ..FakeSource::default()
        };
        let session = Session::daily(source, &KwizConfig::default(), &mut rng()).unwrap();
        assert!(session.game().is_some());
    }

    #[test]
    fn test_fetch_failures() {
        let missing = Session::daily(FakeSource::default(), &KwizConfig::default(), &mut rng());
        assert!(matches!(missing, Err(SessionError::Fetch(SourceError::NotFound(_)))));

        let empty = FakeSource {
            daily: Some(KwizPayload::new(vec![], "American", "2024-03-01")),
            ..FakeSource::default()
        };
        assert!(matches!(
            Session::daily(empty, &KwizConfig::default(), &mut rng()),
            Err(SessionError::EmptyQuiz)
        ));

        let single = FakeSource {
            daily: Some(KwizPayload::new(landmarks_from_dates(&["2010"]), "American", "2024-03-01")),
            ..FakeSource::default()
        };
        assert!(matches!(
            Session::daily(single, &KwizConfig::default(), &mut rng()),
            Err(SessionError::Game(GameError::NotEnoughLandmarks(1)))
        ));
    }

    #[test]
    fn test_by_date_normalizes_timestamp() {
        let source = FakeSource {
            daily: Some(sample_kwiz()),
            ..FakeSource::default()
        };
        let session = Session::by_date(
            source,
            "2024-03-01T12:00:00Z",
            &KwizConfig::default(),
            &mut rng(),
        )
        .unwrap();
        assert_eq!(session.kind(), &SessionKind::ByDate);

        let invalid = Session::by_date(FakeSource::default(), "yesterday", &KwizConfig::default(), &mut rng());
        assert!(matches!(invalid, Err(SessionError::InvalidDate(_))));
    }

    #[test]
    fn test_completion_invokes_callback_and_marks_seen() {
        let source = FakeSource {
            daily: Some(two_landmark_quiz()),
            ..FakeSource::default()
        };
        let mut session = Session::daily(source, &KwizConfig::default(), &mut rng()).unwrap();
        let reported = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&reported);
        session.on_complete(move |score| sink.borrow_mut().push(score));

        let outcome = finish(&mut session);
        let Outcome::Confirmed(report) = outcome else {
            panic!("expected a confirmation");
        };
        let expected = report.total_score;
        assert_eq!(report.completed, Some(expected));

        assert_eq!(*reported.borrow(), vec![expected]);
        assert!(session.is_completed());
        assert_eq!(
            session.source().seen,
            vec![SeenRequest {
                chronokwiz_id: 202,
                score: Some(expected)
            }]
        );
        assert!(session.pending_seen().is_none());
    }

    #[test]
    fn test_mark_seen_failure_is_kept_for_retry() {
        let source = FakeSource {
            daily: Some(two_landmark_quiz()),
            fail_mark_seen: true,
            ..FakeSource::default()
        };
        let mut session = Session::daily(source, &KwizConfig::default(), &mut rng()).unwrap();

        let outcome = finish(&mut session);
        assert!(matches!(outcome, Outcome::Confirmed(_)), "failure does not surface");
        assert!(session.is_completed());
        assert!(session.pending_seen().is_some());

        assert!(matches!(session.retry_mark_seen(), Err(SessionError::Fetch(_))));
        assert!(session.pending_seen().is_some());

        session.source.fail_mark_seen = false;
        assert!(session.retry_mark_seen().unwrap());
        assert!(session.pending_seen().is_none());
        assert!(!session.retry_mark_seen().unwrap());
        assert_eq!(session.source().seen.len(), 1);
    }

    #[test]
    fn test_pending_seen_is_retried_only_on_request() {
        let source = FakeSource {
            daily: Some(two_landmark_quiz()),
            fail_mark_seen: true,
            ..FakeSource::default()
        };
        let mut session = Session::daily(source, &KwizConfig::default(), &mut rng()).unwrap();
        finish(&mut session);
        let pending = *session.pending_seen().unwrap();

        session.source.fail_mark_seen = false;
        assert_eq!(session.settle_pending_seen(false), Some(pending));
        assert!(session.source().seen.is_empty(), "no call without a request");

        session.source.fail_mark_seen = true;
        assert_eq!(session.settle_pending_seen(true), Some(pending), "failure is not an error");

        session.source.fail_mark_seen = false;
        assert_eq!(session.settle_pending_seen(true), None);
        assert_eq!(session.source().seen, vec![pending]);
        assert_eq!(session.settle_pending_seen(true), None);
    }

    #[test]
    fn test_custom_session_bumps_counter_after_fetch() {
        let source = FakeSource {
            custom: Some(CustomKwiz {
                events: sample_kwiz().events,
                prompt: Some("The Space Race".to_string()),
                attempt_number: None,
            }),
            ..FakeSource::default()
        };
        let mut counter = AttemptCounter::new(MemoryStore::new());

        let mut session = Session::custom(
            source,
            &mut counter,
            "  Space   RACE ",
            &KwizConfig::default(),
            &mut rng(),
        )
        .unwrap();

        assert_eq!(
            session.kind(),
            &SessionKind::Custom {
                topic: "space race".to_string(),
                attempt: 1
            }
        );
        assert_eq!(session.category(), "The Space Race");
        assert_eq!(session.chronokwiz_id(), None);
        assert_eq!(
            *session.source().custom_requests.borrow(),
            vec![("space race".to_string(), 1)]
        );
        assert_eq!(counter.get_attempt_count("space race"), 2);
        assert_eq!(session.game().unwrap().board().len(), 6);
    }

    #[test]
    fn test_custom_session_completes_without_marking_seen() {
        let source = FakeSource {
            custom: Some(CustomKwiz {
                events: landmarks_from_dates(&["2010", "2020"]),
                prompt: None,
                attempt_number: None,
            }),
            ..FakeSource::default()
        };
        let mut counter = AttemptCounter::new(MemoryStore::new());
        let mut session = Session::custom(
            source,
            &mut counter,
            "moon landings",
            &KwizConfig::default(),
            &mut rng(),
        )
        .unwrap();
        let reported = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&reported);
        session.on_complete(move |score| sink.borrow_mut().push(score));

        let Outcome::Confirmed(report) = finish(&mut session) else {
            panic!("expected a confirmation");
        };
        let expected = report.completed.unwrap();

        assert_eq!(*reported.borrow(), vec![expected]);
        assert!(session.is_completed());
        assert!(session.source().seen.is_empty());
        assert!(session.pending_seen().is_none());
    }

    #[test]
    fn test_empty_custom_quiz_still_counts_attempt() {
        let source = FakeSource {
            custom: Some(CustomKwiz::default()),
            ..FakeSource::default()
        };
        let mut counter = AttemptCounter::new(MemoryStore::new());
        let result = Session::custom(
            source,
            &mut counter,
            "space race",
            &KwizConfig::default(),
            &mut rng(),
        );

        assert!(matches!(result, Err(SessionError::EmptyQuiz)));
        assert_eq!(counter.get_attempt_count("space race"), 2);
    }

    #[test]
    fn test_custom_fetch_failure_keeps_counter() {
        let mut counter = AttemptCounter::new(MemoryStore::new());
        let result = Session::custom(
            FakeSource::default(),
            &mut counter,
            "space race",
            &KwizConfig::default(),
            &mut rng(),
        );

        assert!(matches!(result, Err(SessionError::Fetch(_))));
        assert_eq!(counter.get_attempt_count("space race"), 1);

        let blank = Session::custom(
            FakeSource::default(),
            &mut counter,
            "   ",
            &KwizConfig::default(),
            &mut rng(),
        );
        assert!(matches!(blank, Err(SessionError::EmptyTopic)));
    }

    #[test]
    fn test_max_item_score_from_config() {
        let mut config = KwizConfig::default();
        config.scoring.max_item_score = 10;
        let source = FakeSource {
            daily: Some(two_landmark_quiz()),
            ..FakeSource::default()
        };
        let mut session = Session::daily(source, &config, &mut rng()).unwrap();
        assert_eq!(session.game().unwrap().max_item_score(), 10);

        let Outcome::Confirmed(report) = finish(&mut session) else {
            panic!("expected a confirmation");
        };
        assert!(report.points <= 10);
        assert!(report.points >= 9);
    }
}
