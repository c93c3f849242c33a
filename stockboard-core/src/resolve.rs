use crate::index::SnapshotIndex;
use crate::{Correction, Document, EffectiveTime, Resolution, Selection};

/// Resolve `selection` against `doc`.
///
/// Deterministic and side-effect free. When the requested date has no data
/// the latest earlier date is used instead, the requested time is discarded
/// and the rewrite is reported in [`Resolution::correction`] for the caller
/// to apply.
#[must_use]
pub fn resolve(selection: &Selection, doc: &Document) -> Resolution {
    let index = SnapshotIndex::new(doc);
    let requested = selection.requested_date.as_str();

    let (date, correction) = if index.has_available_date(requested) {
        (requested.to_string(), None)
    } else {
        match index.latest_date_at_or_before(requested) {
            None => return Resolution::not_found(requested),
            Some(fallback) => {
                let correction = Correction {
                    date: fallback.clone(),
                };
                (fallback, Some(correction))
            }
        }
    };

    if correction.is_none() && !selection.wants_latest() {
        let time = selection.requested_time.clone();
        let payload = index.payload_at(&date, &time).cloned();
        return Resolution {
            effective_date: date,
            effective_time: EffectiveTime::At(time),
            payload,
            correction,
        };
    }

    match index.latest_time_for_date(&date) {
        Some(time) => {
            let payload = index.payload_at(&date, &time).cloned();
            Resolution {
                effective_date: date,
                effective_time: EffectiveTime::At(time),
                payload,
                correction,
            }
        }
        None => Resolution {
            effective_date: date,
            effective_time: EffectiveTime::NoData,
            payload: None,
            correction,
        },
    }
}
