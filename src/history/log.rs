use serde::{Deserialize, Serialize};
use time::{Date, Duration, OffsetDateTime};

/// Most entries the log keeps; older ones are dropped on append.
pub const MAX_ENTRIES: usize = 100;
/// Calendar days shown by the grouped view: today and the three before it.
pub const DAY_WINDOW: i64 = 4;

/// One past scoring event. Immutable once created; identified by its
/// timestamp when deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub score: f64,
    pub product: String,
    #[serde(with = "crate::catalog::na")]
    pub sugar: Option<f64>,
    #[serde(with = "crate::catalog::na")]
    pub sodium: Option<f64>,
    #[serde(with = "time::serde::rfc3339")]
    pub time: OffsetDateTime,
}

/// Entries of one calendar day, oldest day first across the window.
#[derive(Debug, Serialize)]
pub struct DayGroup {
    pub date: String,
    pub entries: Vec<HistoryEntry>,
}

/// Prepend `entry` and truncate to the cap. Newest entries stay first.
pub fn append(mut log: Vec<HistoryEntry>, entry: HistoryEntry) -> Vec<HistoryEntry> {
    log.insert(0, entry);
    log.truncate(MAX_ENTRIES);
    log
}

/// Remove every entry whose timestamp equals `time` (unique in practice).
/// Returns the remaining log and how many entries were removed.
pub fn delete_by_time(
    log: Vec<HistoryEntry>,
    time: OffsetDateTime,
) -> (Vec<HistoryEntry>, usize) {
    let before = log.len();
    let remaining: Vec<HistoryEntry> = log.into_iter().filter(|e| e.time != time).collect();
    let removed = before - remaining.len();
    (remaining, removed)
}

/// Partition the log into the `DAY_WINDOW` most recent calendar days,
/// matching on the date portion of each timestamp. Entries outside the
/// window stay in storage but are not returned.
pub fn group_by_day(log: &[HistoryEntry], today: Date) -> Vec<DayGroup> {
    (0..DAY_WINDOW)
        .rev()
        .map(|offset| {
            let date = today - Duration::days(offset);
            DayGroup {
                date: date.to_string(),
                entries: log
                    .iter()
                    .filter(|e| e.time.date() == date)
                    .cloned()
                    .collect(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn entry_at(time: OffsetDateTime, score: f64) -> HistoryEntry {
        HistoryEntry {
            score,
            product: "Test Product".into(),
            sugar: Some(5.0),
            sodium: Some(0.1),
            time,
        }
    }

    #[test]
    fn append_keeps_newest_first() {
        let base = datetime!(2026-08-08 10:00:00 UTC);
        let mut log = Vec::new();
        for i in 0..3 {
            log = append(log, entry_at(base + Duration::minutes(i), i as f64));
        }
        assert_eq!(log[0].score, 2.0);
        assert_eq!(log[2].score, 0.0);
    }

    #[test]
    fn appending_101_entries_keeps_the_100_most_recent() {
        let base = datetime!(2026-08-08 10:00:00 UTC);
        let mut log = Vec::new();
        for i in 0..101i64 {
            log = append(log, entry_at(base + Duration::seconds(i), i as f64));
        }
        assert_eq!(log.len(), 100);
        // newest first, and the very first entry has been evicted
        assert_eq!(log[0].score, 100.0);
        assert_eq!(log[99].score, 1.0);
        assert!(log.iter().all(|e| e.score != 0.0));
    }

    #[test]
    fn delete_by_time_removes_exactly_one_and_preserves_order() {
        let base = datetime!(2026-08-08 10:00:00 UTC);
        let mut log = Vec::new();
        for i in 0..5i64 {
            log = append(log, entry_at(base + Duration::minutes(i), i as f64));
        }
        let target = base + Duration::minutes(2);
        let (remaining, removed) = delete_by_time(log, target);
        assert_eq!(removed, 1);
        assert_eq!(remaining.len(), 4);
        let scores: Vec<f64> = remaining.iter().map(|e| e.score).collect();
        assert_eq!(scores, vec![4.0, 3.0, 1.0, 0.0]);
    }

    #[test]
    fn delete_with_unknown_time_removes_nothing() {
        let base = datetime!(2026-08-08 10:00:00 UTC);
        let log = append(Vec::new(), entry_at(base, 50.0));
        let (remaining, removed) = delete_by_time(log, base + Duration::hours(1));
        assert_eq!(removed, 0);
        assert_eq!(remaining.len(), 1);
    }

    #[test]
    fn groups_cover_today_and_three_preceding_days() {
        let today = datetime!(2026-08-08 13:00:00 UTC);
        let log = vec![
            entry_at(today, 90.0),
            entry_at(today - Duration::days(1), 80.0),
            entry_at(today - Duration::days(3), 70.0),
            entry_at(today - Duration::days(10), 60.0), // outside the window
        ];

        let groups = group_by_day(&log, today.date());
        assert_eq!(groups.len(), 4);
        assert_eq!(groups[0].date, "2026-08-05");
        assert_eq!(groups[3].date, "2026-08-08");

        let day_scores: Vec<Vec<f64>> = groups
            .iter()
            .map(|g| g.entries.iter().map(|e| e.score).collect())
            .collect();
        assert_eq!(day_scores[0], vec![70.0]);
        assert!(day_scores[1].is_empty());
        assert_eq!(day_scores[2], vec![80.0]);
        assert_eq!(day_scores[3], vec![90.0]);
        // the 60.0 entry is nowhere in the window but was not deleted
        assert!(day_scores.iter().flatten().all(|s| *s != 60.0));
        assert_eq!(log.len(), 4);
    }

    #[test]
    fn entry_serializes_with_iso_timestamp_and_sentinel() {
        let e = HistoryEntry {
            score: 72.4,
            product: "Juice".into(),
            sugar: None,
            sodium: Some(0.2),
            time: datetime!(2026-08-08 10:30:00 UTC),
        };
        let json = serde_json::to_string(&e).unwrap();
        assert!(json.contains("2026-08-08T10:30:00Z"));
        assert!(json.contains(r#""sugar":"N/A""#));
        let back: HistoryEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, e);
    }
}
