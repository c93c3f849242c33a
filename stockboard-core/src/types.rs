//! Re-export of foundational types from `stockboard-types`.
// Consolidated re-exports so downstream crates can depend on `stockboard-core` only

pub use stockboard_types::{
    BoardConfig, BrandKey, Correction, DaySnapshots, Document, EffectiveTime, Grouping, Item,
    KeyChord, KeyPress, Payload, RefreshConfig, Resolution, Selection, StockboardError,
};

pub use rust_decimal::Decimal;
