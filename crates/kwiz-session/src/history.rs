//! Per-date play history.

use chrono::{DateTime, NaiveDate};
use kwiz_events::{ChronokwizId, DatesResponse};
use serde::{Deserialize, Serialize};

/// Parses a backend date into a calendar date.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps and anything that starts with
/// a `YYYY-MM-DD` prefix.
pub fn normalize_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(timestamp.date_naive());
    }
    raw.get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
}

/// What the player did with one published quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum HistoryStatus {
    Completed { score: u32 },
    /// Opened but no score was recorded
    Seen,
    /// Published and not opened yet
    Available,
    /// Scheduled after today
    Future,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chronokwiz_id: Option<ChronokwizId>,
    #[serde(flatten)]
    pub status: HistoryStatus,
}

/// Aggregates over a history.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryTotals {
    pub completed: usize,
    pub total_score: u32,
    pub best_score: Option<u32>,
}

/// Builds the history, oldest date first.
///
/// Entries whose date cannot be parsed are skipped.
pub fn summarize(dates: &DatesResponse, today: NaiveDate) -> Vec<HistoryEntry> {
    let mut entries: Vec<HistoryEntry> = dates
        .dates
        .iter()
        .filter_map(|status| {
            let Some(date) = normalize_date(&status.date) else {
                tracing::warn!("Skipping history entry with unreadable date {:?}", status.date);
                return None;
            };
            let history_status = match (status.is_seen, status.score) {
                (true, Some(score)) => HistoryStatus::Completed { score },
                (true, None) => HistoryStatus::Seen,
                (false, _) if date > today => HistoryStatus::Future,
                (false, _) => HistoryStatus::Available,
            };
            Some(HistoryEntry {
                date,
                chronokwiz_id: status.chronokwiz_id,
                status: history_status,
            })
        })
        .collect();
    entries.sort_by_key(|entry| entry.date);
    entries
}

pub fn totals(entries: &[HistoryEntry]) -> HistoryTotals {
    entries
        .iter()
        .fold(HistoryTotals::default(), |mut totals, entry| {
            if let HistoryStatus::Completed { score } = entry.status {
                totals.completed += 1;
                totals.total_score = totals.total_score.saturating_add(score);
                totals.best_score = Some(totals.best_score.map_or(score, |best| best.max(score)));
            }
            totals
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use kwiz_events::fixtures::sample_dates;
    use kwiz_events::DateStatus;

    fn day(raw: &str) -> NaiveDate {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_normalize_date_formats() {
        assert_eq!(normalize_date("2024-03-01"), Some(day("2024-03-01")));
        assert_eq!(normalize_date("2024-03-01T00:00:00.000Z"), Some(day("2024-03-01")));
        assert_eq!(normalize_date("2024-03-01T23:30:00+02:00"), Some(day("2024-03-01")));
        assert_eq!(normalize_date("2024-03-01 08:00"), Some(day("2024-03-01")));
        assert_eq!(normalize_date("March 1st"), None);
        assert_eq!(normalize_date(""), None);
    }

    #[test]
    fn test_summarize_sample_dates() {
        let entries = summarize(&sample_dates(), day("2024-03-01"));

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].status, HistoryStatus::Completed { score: 14 });
        assert_eq!(entries[1].status, HistoryStatus::Seen);
        assert_eq!(entries[2].status, HistoryStatus::Available);
        assert_eq!(entries[2].chronokwiz_id, Some(101));
    }

    #[test]
    fn test_future_and_unreadable_dates() {
        let dates = DatesResponse {
            dates: vec![
                DateStatus::new("2030-01-01"),
                DateStatus::new("not a date"),
                DateStatus::new("2020-01-01"),
            ],
        };
        let entries = summarize(&dates, day("2024-06-01"));

        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].date, day("2020-01-01"));
        assert_eq!(entries[0].status, HistoryStatus::Available);
        assert_eq!(entries[1].status, HistoryStatus::Future);
    }

    #[test]
    fn test_totals() {
        let mut dates = sample_dates();
        dates.dates[2].is_seen = true;
        dates.dates[2].score = Some(9);
        let totals = totals(&summarize(&dates, day("2024-03-01")));

        assert_eq!(totals.completed, 2);
        assert_eq!(totals.total_score, 23);
        assert_eq!(totals.best_score, Some(14));
    }

    #[test]
    fn test_entry_serialization() {
        let entry = HistoryEntry {
            date: day("2024-02-28"),
            chronokwiz_id: Some(99),
            status: HistoryStatus::Completed { score: 14 },
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["date"], "2024-02-28");
        assert_eq!(json["status"], "completed");
        assert_eq!(json["score"], 14);
    }
}
