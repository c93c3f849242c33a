//! Stockboard data transfer objects and configuration primitives.
#![warn(missing_docs)]

mod brand;
mod config;
mod document;
mod error;
mod resolution;

pub use brand::BrandKey;
pub use config::{BoardConfig, Grouping, KeyChord, KeyPress, RefreshConfig};
pub use document::{DaySnapshots, Document, Item, Payload};
pub use error::StockboardError;
pub use resolution::{Correction, EffectiveTime, Resolution, Selection};
