//! Line series over the last twelve months.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::analytics::buckets::{count_by_month, sum_by_month};
use crate::analytics::queries::LineBatch;
use crate::domain::OrderAmount;

pub const LINE_MONTHS: usize = 12;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LineCharts {
    pub users: Vec<i64>,
    pub products: Vec<i64>,
    pub revenue: Vec<i64>,
    pub discount: Vec<i64>,
}

pub fn build(batch: &LineBatch, now: DateTime<Utc>) -> LineCharts {
    LineCharts {
        users: count_by_month(LINE_MONTHS, now, &batch.users),
        products: count_by_month(LINE_MONTHS, now, &batch.products),
        revenue: sum_by_month(LINE_MONTHS, now, &batch.orders, OrderAmount::Total),
        discount: sum_by_month(LINE_MONTHS, now, &batch.orders, OrderAmount::Discount),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::buckets::months_ago;
    use crate::domain::Order;
    use chrono::{Months, TimeZone};
    use uuid::Uuid;

    #[test]
    fn test_revenue_matches_per_bucket_totals() {
        let now = Utc.with_ymd_and_hms(2024, 4, 30, 23, 0, 0).unwrap();
        let user = Uuid::new_v4();
        let orders: Vec<Order> = (0..12u32)
            .map(|n| {
                let at = now.checked_sub_months(Months::new(n)).unwrap();
                Order::new(user, i64::from(n + 1) * 100, at).with_discount(i64::from(n))
            })
            .collect();
        let charts = build(&LineBatch { orders: orders.clone(), ..LineBatch::default() }, now);

        for (index, value) in charts.revenue.iter().enumerate() {
            let expected: i64 = orders
                .iter()
                .filter(|o| months_ago(now, o.created_at) as usize == LINE_MONTHS - index - 1)
                .map(|o| o.total)
                .sum();
            assert_eq!(*value, expected);
        }
        assert_eq!(charts.revenue[11], 100);
        assert_eq!(charts.discount[0], 11);
    }
}
