//! Pie breakdowns.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::analytics::queries::PieBatch;
use crate::domain::{Order, OrderAmount, User};
use super::{as_i64, category_shares};

/// Share of gross income assumed spent on marketing.
pub const MARKETING_COST_PERCENT: i64 = 30;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PieCharts {
    pub order_count: OrderStatusCounts,
    pub stock: StockSplit,
    pub category_count: BTreeMap<String, i64>,
    pub age_groups: AgeGroups,
    pub revenue_distribution: RevenueDistribution,
    pub people: PeopleSplit,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OrderStatusCounts { pub processing: i64, pub shipped: i64, pub delivered: i64, pub cancelled: i64 }

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockSplit { pub out_of_stock: i64, pub in_stock: i64 }

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct AgeGroups { pub teen: i64, pub adult: i64, pub old: i64 }

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueDistribution {
    pub net_margin: i64,
    pub discount: i64,
    pub shipping_cost: i64,
    pub burnt: i64,
    pub marketing_cost: i64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PeopleSplit { pub admin: i64, pub customer: i64 }

/// Teen below 20, adult from 20 to 39, old from 40.
pub fn age_groups(users: &[User], today: NaiveDate) -> AgeGroups {
    users.iter().fold(AgeGroups::default(), |mut groups, user| {
        match user.age_on(today) {
            age if age < 20 => groups.teen += 1,
            age if age < 40 => groups.adult += 1,
            _ => groups.old += 1,
        }
        groups
    })
}

pub fn revenue_distribution(orders: &[Order]) -> RevenueDistribution {
    let sum = |field: OrderAmount| orders.iter().map(|o| o.amount(field)).sum::<i64>();
    let gross_income = sum(OrderAmount::Total);
    let discount = sum(OrderAmount::Discount);
    let shipping_cost = sum(OrderAmount::ShippingCharges);
    let burnt = sum(OrderAmount::Tax);
    // round half up
    let marketing_cost = (gross_income * MARKETING_COST_PERCENT + 50).div_euclid(100);

    RevenueDistribution {
        net_margin: gross_income - discount - shipping_cost - burnt - marketing_cost,
        discount,
        shipping_cost,
        burnt,
        marketing_cost,
    }
}

pub fn build(batch: &PieBatch, today: NaiveDate) -> PieCharts {
    PieCharts {
        order_count: OrderStatusCounts {
            processing: as_i64(batch.processing),
            shipped: as_i64(batch.shipped),
            delivered: as_i64(batch.delivered),
            cancelled: as_i64(batch.cancelled),
        },
        stock: StockSplit { out_of_stock: as_i64(batch.out_of_stock), in_stock: as_i64(batch.in_stock) },
        category_count: category_shares(&batch.category_counts, batch.product_count),
        age_groups: age_groups(&batch.users, today),
        revenue_distribution: revenue_distribution(&batch.orders),
        people: PeopleSplit { admin: as_i64(batch.admins), customer: as_i64(batch.customers) },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Gender;
    use chrono::Utc;
    use uuid::Uuid;

    fn born(y: i32, m: u32, d: u32) -> User {
        User::new("u", Gender::Others, NaiveDate::from_ymd_opt(y, m, d).unwrap(), Utc::now())
    }

    #[test]
    fn test_age_group_boundaries() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let users = vec![
            born(2005, 6, 2),  // 18
            born(2004, 6, 1),  // 20
            born(1984, 6, 2),  // 39
            born(1984, 6, 1),  // 40
            born(1950, 1, 1),
        ];
        assert_eq!(age_groups(&users, today), AgeGroups { teen: 1, adult: 2, old: 2 });
    }

    #[test]
    fn test_revenue_distribution() {
        let user = Uuid::new_v4();
        let now = Utc::now();
        let orders = vec![
            Order::new(user, 1000, now).with_discount(100).with_tax(50).with_shipping(25),
            Order::new(user, 500, now).with_discount(0).with_tax(20),
        ];
        let dist = revenue_distribution(&orders);
        assert_eq!(dist.discount, 100);
        assert_eq!(dist.shipping_cost, 25);
        assert_eq!(dist.burnt, 70);
        assert_eq!(dist.marketing_cost, 450);
        assert_eq!(dist.net_margin, 1500 - 100 - 25 - 70 - 450);
    }

    #[test]
    fn test_marketing_cost_rounds_half_up_and_margin_can_go_negative() {
        let user = Uuid::new_v4();
        let orders = vec![Order::new(user, 5, Utc::now()).with_discount(4)];
        let dist = revenue_distribution(&orders);
        assert_eq!(dist.marketing_cost, 2);
        assert_eq!(dist.net_margin, -1);
    }

    #[test]
    fn test_category_shares_empty_catalog() {
        let batch = PieBatch { category_counts: vec![("shoes".into(), 0)], ..PieBatch::default() };
        let charts = build(&batch, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(charts.category_count["shoes"], 0);
        assert_eq!(charts.revenue_distribution.net_margin, 0);
    }
}
