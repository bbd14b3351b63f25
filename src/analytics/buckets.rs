//! Month bucketing
//!
//! A series of `len` buckets is indexed oldest first: index `len - 1` is the
//! current month, index `len - 2` the month before, and so on.
//!
//! The month distance only compares calendar months modulo 12, ignoring the
//! year. A record 13 months old lands in the "1 month ago" bucket and one
//! exactly 12 months old lands in the current month. Callers bound their
//! record sets with a date window, so only the 12-month series can see the
//! overlap at its oldest edge.

use chrono::{DateTime, Datelike, Utc};

use crate::domain::{Order, OrderAmount, Timestamped};

/// Calendar months between `at` and `now`, modulo 12.
pub fn months_ago(now: DateTime<Utc>, at: DateTime<Utc>) -> u32 {
    (now.month0() + 12 - at.month0()) % 12
}

/// Adds `value(record)` to the bucket of each record's creation month.
/// Records outside the last `len` months are dropped.
pub fn month_buckets<T, F>(len: usize, now: DateTime<Utc>, records: &[T], value: F) -> Vec<i64>
where
    T: Timestamped,
    F: Fn(&T) -> i64,
{
    let mut data = vec![0; len];
    for record in records {
        let ago = months_ago(now, record.created_at()) as usize;
        if ago < len {
            data[len - ago - 1] += value(record);
        }
    }
    data
}

pub fn count_by_month<T: Timestamped>(len: usize, now: DateTime<Utc>, records: &[T]) -> Vec<i64> {
    month_buckets(len, now, records, |_| 1)
}

pub fn sum_by_month(len: usize, now: DateTime<Utc>, orders: &[Order], field: OrderAmount) -> Vec<i64> {
    month_buckets(len, now, orders, |order| order.amount(field))
}
