//! User selection and the derived resolution of what to display.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::Payload;

/// User intent: the requested date and optional time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    /// Requested ISO date.
    pub requested_date: String,
    /// Requested time label; empty means "latest".
    pub requested_time: String,
}

impl Selection {
    /// Select the latest snapshot of `date`.
    pub fn latest(date: impl Into<String>) -> Self {
        Self {
            requested_date: date.into(),
            requested_time: String::new(),
        }
    }

    /// Select an explicit time on `date`.
    pub fn at(date: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            requested_date: date.into(),
            requested_time: time.into(),
        }
    }

    /// Whether the selection asks for the latest snapshot of its date.
    #[must_use]
    pub fn wants_latest(&self) -> bool {
        self.requested_time.is_empty()
    }

    /// Rewrite the selection after a date fallback. The time is reset to
    /// "latest" since a time chosen for another date is meaningless.
    pub fn apply(&mut self, correction: &Correction) {
        self.requested_date.clone_from(&correction.date);
        self.requested_time.clear();
    }
}

/// The time actually displayed for the effective date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectiveTime {
    /// A concrete time label.
    At(String),
    /// No snapshot time exists for the effective date.
    NoData,
}

impl EffectiveTime {
    /// The label, if any.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::At(label) => Some(label),
            Self::NoData => None,
        }
    }
}

impl fmt::Display for EffectiveTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::At(label) => f.write_str(label),
            Self::NoData => f.write_str("No Data"),
        }
    }
}

/// Date rewrite emitted when the requested date had no data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Correction {
    /// The fallback date the selection must switch to.
    pub date: String,
}

/// Outcome of resolving a selection against a document.
///
/// Ephemeral: recomputed on every render cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    /// The date actually rendered.
    pub effective_date: String,
    /// The time actually rendered.
    pub effective_time: EffectiveTime,
    /// The snapshot to render; `None` is the not-found state.
    pub payload: Option<Payload>,
    /// Set when the requested date fell back to an earlier one.
    pub correction: Option<Correction>,
}

impl Resolution {
    /// Terminal state: nothing at or before the requested date.
    pub fn not_found(date: impl Into<String>) -> Self {
        Self {
            effective_date: date.into(),
            effective_time: EffectiveTime::NoData,
            payload: None,
            correction: None,
        }
    }

    /// Whether a snapshot was found.
    #[must_use]
    pub const fn is_found(&self) -> bool {
        self.payload.is_some()
    }
}
