use std::cmp::Ordering;

use chrono::NaiveTime;

use crate::StockboardError;

/// Parse a `H:MM AM|PM` (or `HH:MM AM|PM`) label into a time of day.
///
/// `12 AM` is midnight and `12 PM` is noon; the meridiem is case-insensitive.
///
/// # Errors
/// Returns `StockboardError::Format` when the label does not split into
/// exactly a time part and a two-letter meridiem, or the clock is invalid.
pub fn parse(label: &str) -> Result<NaiveTime, StockboardError> {
    let mut parts = label.split_whitespace();
    let (Some(clock), Some(meridiem), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(StockboardError::format(label, "expected `H:MM AM|PM`"));
    };
    if meridiem.len() != 2 {
        return Err(StockboardError::format(label, "meridiem must be AM or PM"));
    }
    NaiveTime::parse_from_str(&format!("{clock} {meridiem}"), "%I:%M %p")
        .map_err(|err| StockboardError::format(label, err.to_string()))
}

/// Normalize a label to its 24-hour `HH:MM` form.
///
/// The result orders lexicographically in chronological order.
///
/// # Errors
/// See [`parse`].
pub fn normalize(label: &str) -> Result<String, StockboardError> {
    parse(label).map(|time| time.format("%H:%M").to_string())
}

/// Order two labels chronologically; later times of day compare greater.
///
/// # Errors
/// Returns the first `Format` error among the two labels.
pub fn compare(a: &str, b: &str) -> Result<Ordering, StockboardError> {
    Ok(normalize(a)?.cmp(&normalize(b)?))
}

/// Sort labels latest-first.
///
/// Malformed labels are kept but sort after every valid label, in label
/// order. Labels with the same clock value are ordered by their text so the
/// result never depends on input order.
pub fn sort_descending<I, S>(labels: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut keyed: Vec<(Option<String>, String)> = labels
        .into_iter()
        .map(|label| {
            let label = label.into();
            let key = match normalize(&label) {
                Ok(key) => Some(key),
                Err(_err) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(label = %label, error = %_err, "malformed time label sorts last");
                    None
                }
            };
            (key, label)
        })
        .collect();

    keyed.sort_by(|(ka, la), (kb, lb)| match (ka, kb) {
        (Some(a), Some(b)) => b.cmp(a).then_with(|| la.cmp(lb)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => la.cmp(lb),
    });

    keyed.into_iter().map(|(_, label)| label).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_meridiem_edges() {
        assert_eq!(normalize("12:00 AM").unwrap(), "00:00");
        assert_eq!(normalize("12:30 PM").unwrap(), "12:30");
        assert_eq!(normalize("1:05 PM").unwrap(), "13:05");
        assert_eq!(normalize("9:00 am").unwrap(), "09:00");
        assert_eq!(normalize("11:59 PM").unwrap(), "23:59");
    }

    #[test]
    fn rejects_labels_without_meridiem() {
        for bad in ["10:00", "10:00 AM extra", "", "10:00 A.M.", "25:00 PM", "10:75 AM"] {
            let err = normalize(bad).expect_err(bad);
            assert!(matches!(err, StockboardError::Format { .. }), "{bad}: {err:?}");
        }
    }

    #[test]
    fn compare_is_chronological_not_lexicographic() {
        // "9:00 AM" > "1:00 PM" as plain strings
        assert_eq!(compare("9:00 AM", "1:00 PM").unwrap(), Ordering::Less);
        assert_eq!(compare("12:15 AM", "1:00 AM").unwrap(), Ordering::Less);
        assert_eq!(compare("10:00 AM", "10:00 AM").unwrap(), Ordering::Equal);
    }

    #[test]
    fn malformed_labels_sort_last() {
        let sorted = sort_descending(["9:00 AM", "noon", "1:00 PM", "11:30 AM"]);
        assert_eq!(sorted, vec!["1:00 PM", "11:30 AM", "9:00 AM", "noon"]);
    }
}
