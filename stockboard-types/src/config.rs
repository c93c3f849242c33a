//! Configuration types shared by the board controller and its scheduler.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::BrandKey;

/// Digit grouping used when formatting prices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Grouping {
    /// Indian grouping (`en-IN`): the last three digits, then pairs
    /// (`1,00,000`).
    #[default]
    Indian,
    /// Groups of three (`100,000`).
    Western,
}

/// Periodic background refresh settings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RefreshConfig {
    /// Fixed interval between background fetches.
    pub interval: Duration,
    /// Random jitter percentage [0, 100] added to each interval.
    pub jitter_percent: u8,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(60),
            jitter_percent: 0,
        }
    }
}

/// A single key press as reported by the input layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyPress {
    /// The pressed key.
    pub key: char,
    /// Control held.
    pub ctrl: bool,
    /// Shift held.
    pub shift: bool,
    /// Alt held.
    pub alt: bool,
}

impl KeyPress {
    /// A key press without modifiers.
    #[must_use]
    pub const fn plain(key: char) -> Self {
        Self {
            key,
            ctrl: false,
            shift: false,
            alt: false,
        }
    }
}

/// Key combination bound to the manual refresh command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyChord {
    /// Key to match (case-insensitive).
    pub key: char,
    /// Control required.
    pub ctrl: bool,
    /// Shift required.
    pub shift: bool,
    /// Alt required.
    pub alt: bool,
}

impl KeyChord {
    /// Whether `press` triggers this chord. Modifiers must match exactly.
    #[must_use]
    pub fn matches(&self, press: &KeyPress) -> bool {
        self.key.eq_ignore_ascii_case(&press.key)
            && self.ctrl == press.ctrl
            && self.shift == press.shift
            && self.alt == press.alt
    }
}

impl Default for KeyChord {
    /// `Ctrl+Shift+R`.
    fn default() -> Self {
        Self {
            key: 'r',
            ctrl: true,
            shift: true,
            alt: false,
        }
    }
}

/// Global configuration for a `Board`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Brand sections in display order.
    pub brands: Vec<BrandKey>,
    /// Digit grouping for prices.
    pub grouping: Grouping,
    /// Stock text that selects the `in-stock` badge class.
    pub in_stock_label: String,
    /// Timeout for a single fetch.
    pub fetch_timeout: Duration,
    /// Background refresh settings.
    pub refresh: RefreshConfig,
    /// Manual refresh key binding.
    pub manual_refresh: KeyChord,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            brands: BrandKey::default_set(),
            grouping: Grouping::default(),
            in_stock_label: "In Stock".to_string(),
            fetch_timeout: Duration::from_secs(10),
            refresh: RefreshConfig::default(),
            manual_refresh: KeyChord::default(),
        }
    }
}
