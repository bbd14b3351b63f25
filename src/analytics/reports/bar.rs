//! Bar series: new products and users over six months, orders and
//! cancellations over twelve.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::analytics::buckets::count_by_month;
use crate::analytics::queries::BarBatch;

pub const BAR_SHORT_MONTHS: usize = 6;
pub const BAR_LONG_MONTHS: usize = 12;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BarCharts {
    pub products: Vec<i64>,
    pub users: Vec<i64>,
    pub orders: Vec<i64>,
    pub cancelled_orders: Vec<i64>,
}

pub fn build(batch: &BarBatch, now: DateTime<Utc>) -> BarCharts {
    BarCharts {
        products: count_by_month(BAR_SHORT_MONTHS, now, &batch.products),
        users: count_by_month(BAR_SHORT_MONTHS, now, &batch.users),
        orders: count_by_month(BAR_LONG_MONTHS, now, &batch.orders),
        cancelled_orders: count_by_month(BAR_LONG_MONTHS, now, &batch.cancelled_orders),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Order, Product};
    use chrono::{Months, TimeZone};
    use uuid::Uuid;

    #[test]
    fn test_series_lengths_and_placement() {
        let now = Utc.with_ymd_and_hms(2024, 9, 10, 0, 0, 0).unwrap();
        let ago = |n| now.checked_sub_months(Months::new(n)).unwrap();
        let user = Uuid::new_v4();
        let batch = BarBatch {
            products: vec![Product::new("p", "c", 1, now), Product::new("p", "c", 1, ago(5))],
            orders: vec![Order::new(user, 10, ago(11))],
            cancelled_orders: vec![Order::new(user, 10, ago(3)).cancel()],
            ..BarBatch::default()
        };
        let charts = build(&batch, now);
        assert_eq!(charts.products, vec![1, 0, 0, 0, 0, 1]);
        assert_eq!(charts.users, vec![0; 6]);
        assert_eq!(charts.orders.len(), 12);
        assert_eq!(charts.orders[0], 1);
        assert_eq!(charts.cancelled_orders[8], 1);
    }
}
