use chrono::{DateTime, Utc};
use serde::Serialize;

/// Display format used on venue and artist pages.
pub const START_TIME_FORMAT: &str = "%m/%d/%Y, %H:%M";

pub fn format_start_time(start_time: &DateTime<Utc>) -> String {
    start_time.format(START_TIME_FORMAT).to_string()
}

/// One show row on a venue or artist page, carrying the counterpart
/// entity's display fields (the artist for a venue page, the venue for an
/// artist page).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowEntry {
    pub id: i64,
    pub name: String,
    pub image_link: Option<String>,
    pub start_time: DateTime<Utc>,
    pub start_time_display: String,
}

impl ShowEntry {
    pub fn new(
        id: i64,
        name: String,
        image_link: Option<String>,
        start_time: DateTime<Utc>,
    ) -> Self {
        Self {
            start_time_display: format_start_time(&start_time),
            id,
            name,
            image_link,
            start_time,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct Partition {
    pub past: Vec<ShowEntry>,
    pub upcoming: Vec<ShowEntry>,
}

impl Partition {
    pub fn past_count(&self) -> usize {
        self.past.len()
    }

    pub fn upcoming_count(&self) -> usize {
        self.upcoming.len()
    }
}

/// Split shows into past and upcoming relative to `now`. A show starting
/// exactly at `now` counts as past.
pub fn partition(entries: Vec<ShowEntry>, now: DateTime<Utc>) -> Partition {
    let mut result = Partition::default();

    for entry in entries {
        if entry.start_time <= now {
            result.past.push(entry);
        } else {
            result.upcoming.push(entry);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn entry(id: i64, start_time: DateTime<Utc>) -> ShowEntry {
        ShowEntry::new(id, format!("act {id}"), None, start_time)
    }

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn splits_around_reference_time() {
        let now = at(1_000);
        let result = partition(vec![entry(1, at(500)), entry(2, at(1_500))], now);

        assert_eq!(result.past.iter().map(|e| e.id).collect::<Vec<_>>(), vec![1]);
        assert_eq!(
            result.upcoming.iter().map(|e| e.id).collect::<Vec<_>>(),
            vec![2]
        );
    }

    #[test]
    fn show_starting_exactly_now_is_past() {
        let now = at(1_000);
        let result = partition(vec![entry(1, now)], now);

        assert_eq!(result.past_count(), 1);
        assert_eq!(result.upcoming_count(), 0);
    }

    #[test]
    fn counts_cover_every_show() {
        let now = at(0);
        let entries: Vec<ShowEntry> = (0..7).map(|i| entry(i, at(i * 100 - 300))).collect();
        let total = entries.len();

        let result = partition(entries, now);
        assert_eq!(result.past_count() + result.upcoming_count(), total);
    }

    #[test]
    fn formats_start_time_for_display() {
        let start = Utc.with_ymd_and_hms(2026, 3, 7, 21, 30, 0).unwrap();
        let e = entry(1, start);
        assert_eq!(e.start_time_display, "03/07/2026, 21:30");
    }
}
