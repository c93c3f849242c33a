use rand::Rng;

/// Delay before the next periodic tick: `interval_ms` stretched by a random
/// share of up to `jitter_percent` of itself.
///
/// Saturates at `u64::MAX` instead of overflowing.
#[must_use]
pub fn jitter_wait(interval_ms: u64, jitter_percent: u32) -> u64 {
    let max_extra = u64::try_from(
        u128::from(interval_ms) * u128::from(jitter_percent.min(100)) / 100,
    )
    .unwrap_or(u64::MAX);
    if max_extra == 0 {
        return interval_ms;
    }
    interval_ms.saturating_add(rand::rng().random_range(0..max_extra))
}
