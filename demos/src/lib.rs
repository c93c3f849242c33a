//! Shared helpers for the stockboard demos.

pub mod common;
pub mod terminal;
