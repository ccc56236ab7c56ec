use std::time::Duration;

/// Elapsed time below this is treated as one full second when computing
/// speed, so the first frames after start do not report absurd rates.
const MIN_ELAPSED_SECS: f64 = 1.0;

/// Symbols per minute for `symbols` typed over `elapsed`
pub fn spm(elapsed: Duration, symbols: usize) -> u64 {
    let secs = elapsed.as_secs_f64().max(MIN_ELAPSED_SECS);
    (60.0 * symbols as f64 / secs).round() as u64
}

/// Elapsed seconds rounded to two decimals for display
pub fn round_secs(elapsed: Duration) -> f64 {
    (elapsed.as_secs_f64() * 100.0).round() / 100.0
}
