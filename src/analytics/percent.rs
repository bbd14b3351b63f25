//! Percentage helpers

/// Relative change from `previous` to `current`, rounded to a whole percent.
///
/// With no baseline (`previous == 0`) the change is reported as
/// `current * 100`.
pub fn percentage_change(current: i64, previous: i64) -> i64 {
    if previous == 0 {
        return current.saturating_mul(100);
    }
    let change = (current - previous) as f64 / previous as f64 * 100.0;
    change.round() as i64
}

/// `part` as a whole percent of `whole`; 0 when `whole` is 0.
pub fn share_percent(part: u64, whole: u64) -> i64 {
    if whole == 0 {
        return 0;
    }
    (part as f64 / whole as f64 * 100.0).round() as i64
}
