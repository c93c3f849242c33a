//! Background refresh.
//!
//! `refresh_sm` is a pure state machine deciding when to fetch; `controller`
//! drives it on tokio, turning timer ticks and user commands into events and
//! executing the resulting actions against a shared `Board`.

/// Interval jitter.
pub mod backoff;
/// Tokio driver and the `RefreshHandle` it returns.
pub mod controller;
/// Pure refresh state machine.
pub mod refresh_sm;
