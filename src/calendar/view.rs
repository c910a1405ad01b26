//! Ordering, due counting and line rendering of calendar entries

use super::CalendarEntry;
use chrono::{Datelike, NaiveDate};

/// Column the title is padded to
const TITLE_WIDTH: usize = 30;

/// Sort by ascending date; entries sharing a date keep their order
pub fn sort_by_date(mut entries: Vec<CalendarEntry>) -> Vec<CalendarEntry> {
    entries.sort_by_key(|entry| entry.date);
    entries
}

/// Number of entries due on or before `reference`
pub fn due_count(entries: &[CalendarEntry], reference: NaiveDate) -> usize {
    entries.iter().filter(|entry| entry.date <= reference).count()
}

/// `Mo,  4 Mar 2024`
pub fn format_pretty(date: NaiveDate) -> String {
    let weekday = date.weekday().to_string();
    let weekday: String = weekday.chars().take(2).collect();
    format!("{}, {:>2} {} {}", weekday, date.day(), date.format("%b"), date.year())
}

/// One listing line for an entry
pub fn render(entry: &CalendarEntry) -> String {
    let next = entry
        .next_date
        .map(|next| format!(" (next in {})", format_pretty(next)))
        .unwrap_or_default();

    format!(
        "{}: {:<width$}{}",
        format_pretty(entry.date),
        entry.title,
        next,
        width = TITLE_WIDTH
    )
}

impl std::fmt::Display for CalendarEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&render(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::{Recurrence, Unit};
    use chrono::{Local, NaiveTime, TimeZone};
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn entry(id: &str, date: NaiveDate) -> CalendarEntry {
        CalendarEntry {
            title: id.to_string(),
            date,
            recurrence: None,
            next_date: None,
            source_id: id.to_string(),
        }
    }

    #[test]
    fn test_sort_by_date_is_stable() {
        let entries = vec![
            entry("c", date(2024, 5, 1)),
            entry("a", date(2024, 3, 1)),
            entry("d", date(2024, 5, 1)),
            entry("b", date(2024, 3, 1)),
        ];

        let ids: Vec<String> = sort_by_date(entries)
            .into_iter()
            .map(|e| e.source_id)
            .collect();
        assert_eq!(ids, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_due_count() {
        let entries = vec![
            entry("past", date(2023, 12, 31)),
            entry("today", date(2024, 3, 1)),
            entry("tomorrow", date(2024, 3, 2)),
            entry("next-year", date(2025, 1, 1)),
        ];
        assert_eq!(due_count(&entries, date(2024, 3, 1)), 2);
        assert_eq!(due_count(&entries, date(2022, 1, 1)), 0);
        assert_eq!(due_count(&[], date(2024, 3, 1)), 0);
    }

    #[test]
    fn test_due_count_ignores_time_of_day() {
        let today = date(2024, 3, 1);
        let entries = vec![entry("today", today)];

        for (h, m, s) in [(0, 0, 0), (12, 30, 0), (23, 59, 59)] {
            let now = Local
                .from_local_datetime(&today.and_time(NaiveTime::from_hms_opt(h, m, s).unwrap()))
                .earliest()
                .unwrap();
            assert_eq!(due_count(&entries, now.date_naive()), 1);
        }
    }

    #[test]
    fn test_format_pretty() {
        assert_eq!(format_pretty(date(2024, 3, 4)), "Mo,  4 Mar 2024");
        assert_eq!(format_pretty(date(2024, 12, 25)), "We, 25 Dec 2024");
    }

    #[test]
    fn test_render_structure() {
        let mut rent = entry("rent.md", date(2024, 3, 1));
        rent.title = "Pay rent".to_string();
        let plain = render(&rent);
        let (when, rest) = plain.split_once(": ").unwrap();
        assert_eq!(when, format_pretty(date(2024, 3, 1)));
        assert_eq!(rest.trim_end(), "Pay rent");
        assert!(!plain.contains("next in"));

        rent.recurrence = Recurrence::new(1, Unit::Month);
        rent.next_date = Some(date(2024, 4, 1));
        let recurring = render(&rent);
        assert!(recurring.starts_with(&plain));
        assert!(recurring.ends_with(&format!(" (next in {})", format_pretty(date(2024, 4, 1)))));
    }

    #[test]
    fn test_render_pads_titles_to_same_column() {
        let short = render(&entry("a", date(2024, 3, 1)));
        let long = render(&entry("a much longer title", date(2024, 3, 1)));
        assert_eq!(short.chars().count(), long.chars().count());
    }

    proptest! {
        #[test]
        fn prop_sort_is_ordered_and_stable(days in proptest::collection::vec(0u64..30, 0..40)) {
            let base = date(2024, 1, 1);
            let entries: Vec<CalendarEntry> = days
                .iter()
                .enumerate()
                .map(|(i, d)| entry(&format!("{:03}", i), base + chrono::Days::new(*d)))
                .collect();

            let sorted = sort_by_date(entries);
            for pair in sorted.windows(2) {
                prop_assert!(pair[0].date <= pair[1].date);
                if pair[0].date == pair[1].date {
                    prop_assert!(pair[0].source_id < pair[1].source_id);
                }
            }
        }
    }
}
