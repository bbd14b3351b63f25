//! Dashboard totals, month-over-month change and inventory mix.

use serde::Serialize;
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::analytics::buckets::{count_by_month, sum_by_month};
use crate::analytics::percent::percentage_change;
use crate::analytics::queries::DashboardBatch;
use crate::analytics::windows::ReportWindows;
use crate::domain::{Order, OrderAmount, OrderStatus};
use super::{as_i64, category_shares};

pub const DASHBOARD_MONTHS: usize = 6;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub change_percentage: ChangePercentage,
    pub count: Totals,
    pub chart: DashboardChart,
    pub inventory: BTreeMap<String, i64>,
    pub gender: GenderSplit,
    pub latest_transactions: Vec<TransactionSummary>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChangePercentage { pub product: i64, pub user: i64, pub order: i64, pub revenue: i64 }

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Totals { pub product: i64, pub user: i64, pub order: i64, pub revenue: i64 }

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DashboardChart { pub revenue: Vec<i64>, pub orders: Vec<i64> }

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GenderSplit { pub male: i64, pub female: i64, pub others: i64 }

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TransactionSummary { pub id: Uuid, pub discount: i64, pub total: i64, pub status: OrderStatus }

fn revenue(orders: &[Order]) -> i64 {
    orders.iter().map(|o| o.total).sum()
}

pub fn build(batch: &DashboardBatch, windows: &ReportWindows) -> DashboardStats {
    let change_percentage = ChangePercentage {
        product: percentage_change(as_i64(batch.this_month_products), as_i64(batch.last_month_products)),
        user: percentage_change(as_i64(batch.this_month_users), as_i64(batch.last_month_users)),
        order: percentage_change(as_i64(batch.this_month_orders.len()), as_i64(batch.last_month_orders.len())),
        revenue: percentage_change(revenue(&batch.this_month_orders), revenue(&batch.last_month_orders)),
    };

    let count = Totals {
        product: as_i64(batch.product_count),
        user: as_i64(batch.user_count),
        order: as_i64(batch.all_orders.len()),
        revenue: revenue(&batch.all_orders),
    };

    let chart = DashboardChart {
        revenue: sum_by_month(DASHBOARD_MONTHS, windows.now, &batch.last_six_months_orders, OrderAmount::Total),
        orders: count_by_month(DASHBOARD_MONTHS, windows.now, &batch.last_six_months_orders),
    };

    DashboardStats {
        change_percentage,
        count,
        chart,
        inventory: category_shares(&batch.category_counts, batch.product_count),
        gender: GenderSplit { male: as_i64(batch.male), female: as_i64(batch.female), others: as_i64(batch.others) },
        latest_transactions: batch
            .recent_orders
            .iter()
            .map(|o| TransactionSummary { id: o.id, discount: o.discount, total: o.total, status: o.status })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Months, TimeZone, Utc};

    #[test]
    fn test_revenue_change_against_small_baseline() {
        let now = Utc.with_ymd_and_hms(2024, 6, 20, 0, 0, 0).unwrap();
        let windows = ReportWindows::at(now);
        let user = Uuid::new_v4();
        let last_month = now.checked_sub_months(Months::new(1)).unwrap();
        let this_month: Vec<Order> = [100, 200, 300].into_iter().map(|t| Order::new(user, t, now)).collect();
        let previous = vec![Order::new(user, 50, last_month)];
        let mut all = this_month.clone();
        all.extend(previous.clone());

        let batch = DashboardBatch {
            this_month_products: 10,
            last_month_products: 0,
            this_month_orders: this_month,
            last_month_orders: previous,
            last_six_months_orders: all.clone(),
            all_orders: all,
            product_count: 10,
            category_counts: vec![("books".into(), 3), ("laptops".into(), 7)],
            ..DashboardBatch::default()
        };
        let stats = build(&batch, &windows);

        assert_eq!(stats.change_percentage.revenue, 1100);
        assert_eq!(stats.change_percentage.product, 1000);
        assert_eq!(stats.change_percentage.order, 200);
        assert_eq!(stats.change_percentage.user, 0);
        assert_eq!(stats.count.revenue, 650);
        assert_eq!(stats.chart.revenue, vec![0, 0, 0, 0, 50, 600]);
        assert_eq!(stats.chart.orders, vec![0, 0, 0, 0, 1, 3]);
        assert_eq!(stats.inventory["books"], 30);
        assert_eq!(stats.inventory["laptops"], 70);
    }

    #[test]
    fn test_empty_store_has_no_nan() {
        let windows = ReportWindows::at(Utc::now());
        let batch = DashboardBatch { category_counts: vec![("books".into(), 0)], ..DashboardBatch::default() };
        let stats = build(&batch, &windows);
        assert_eq!(stats.inventory["books"], 0);
        assert_eq!(stats.chart.revenue, vec![0; DASHBOARD_MONTHS]);
        assert!(stats.latest_transactions.is_empty());
    }

    #[test]
    fn test_serializes_camel_case() {
        let windows = ReportWindows::at(Utc::now());
        let json = serde_json::to_value(build(&DashboardBatch::default(), &windows)).unwrap();
        assert!(json.get("changePercentage").is_some());
        assert!(json.get("latestTransactions").is_some());
        assert_eq!(json["gender"]["others"], 0);
    }
}
