use std::ops::Bound;

use crate::time_label;
use crate::{DaySnapshots, Document, Payload};

/// Borrowed, read-only view over a fetched [`Document`].
///
/// A date is *available* when it maps to at least one snapshot time; a date
/// key holding an empty time map is treated exactly like a missing key.
#[derive(Debug, Clone, Copy)]
pub struct SnapshotIndex<'a> {
    doc: &'a Document,
}

impl<'a> SnapshotIndex<'a> {
    /// Index over `doc`.
    #[must_use]
    pub const fn new(doc: &'a Document) -> Self {
        Self { doc }
    }

    fn day(&self, date: &str) -> Option<&'a DaySnapshots> {
        self.doc.get(date).filter(|day| !day.is_empty())
    }

    /// Whether `date` has at least one snapshot.
    #[must_use]
    pub fn has_available_date(&self, date: &str) -> bool {
        self.day(date).is_some()
    }

    /// Snapshot times of `date`, latest first. Empty when the date is absent.
    #[must_use]
    pub fn times_for_date(&self, date: &str) -> Vec<String> {
        self.day(date)
            .map(|day| time_label::sort_descending(day.keys().map(String::as_str)))
            .unwrap_or_default()
    }

    /// The chronologically latest snapshot time of `date`.
    #[must_use]
    pub fn latest_time_for_date(&self, date: &str) -> Option<String> {
        self.times_for_date(date).into_iter().next()
    }

    /// The greatest available date key that is `<= target`.
    ///
    /// Date keys are ISO `YYYY-MM-DD`, so string order is calendar order.
    #[must_use]
    pub fn latest_date_at_or_before(&self, target: &str) -> Option<String> {
        self.doc
            .range::<str, _>((Bound::Unbounded, Bound::Included(target)))
            .rev()
            .find(|(_, day)| !day.is_empty())
            .map(|(date, _)| date.clone())
    }

    /// The payload stored under exactly `(date, time)`.
    #[must_use]
    pub fn payload_at(&self, date: &str, time: &str) -> Option<&'a Payload> {
        self.doc.get(date).and_then(|day| day.get(time))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(entries: &[(&str, &[&str])]) -> Document {
        entries
            .iter()
            .map(|(date, times)| {
                let day: DaySnapshots = times
                    .iter()
                    .map(|t| ((*t).to_string(), Payload::new()))
                    .collect();
                ((*date).to_string(), day)
            })
            .collect()
    }

    #[test]
    fn times_are_latest_first() {
        let d = doc(&[("2024-05-10", &["9:00 AM", "1:00 PM", "10:30 AM"])]);
        let idx = SnapshotIndex::new(&d);
        assert_eq!(
            idx.times_for_date("2024-05-10"),
            vec!["1:00 PM", "10:30 AM", "9:00 AM"]
        );
        assert_eq!(idx.latest_time_for_date("2024-05-10").as_deref(), Some("1:00 PM"));
        assert!(idx.times_for_date("2024-05-11").is_empty());
    }

    #[test]
    fn fallback_skips_empty_days() {
        let d = doc(&[("2024-05-08", &["9:00 AM"]), ("2024-05-10", &[])]);
        let idx = SnapshotIndex::new(&d);
        assert!(!idx.has_available_date("2024-05-10"));
        assert_eq!(
            idx.latest_date_at_or_before("2024-05-12").as_deref(),
            Some("2024-05-08")
        );
        assert_eq!(idx.latest_date_at_or_before("2024-05-01"), None);
    }

    #[test]
    fn payload_lookup_is_exact() {
        let d = doc(&[("2024-05-10", &["9:00 AM"])]);
        let idx = SnapshotIndex::new(&d);
        assert!(idx.payload_at("2024-05-10", "9:00 AM").is_some());
        assert!(idx.payload_at("2024-05-10", "09:00 AM").is_none());
    }
}
