//! Typed query filters
//!
//! Every field is optional and fields combine with AND. An empty filter
//! matches every record of the source.

use crate::domain::aggregates::{CancelledOrder, Order, Product, User};
use crate::domain::value_objects::{DateRange, Gender, OrderStatus, Role};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StockLevel { OutOfStock, InStock }

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub created: Option<DateRange>,
    pub category: Option<String>,
    pub stock: Option<StockLevel>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserFilter {
    pub created: Option<DateRange>,
    pub gender: Option<Gender>,
    pub role: Option<Role>,
}

/// Shared by orders and cancelled orders.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OrderFilter {
    pub created: Option<DateRange>,
    pub status: Option<OrderStatus>,
}

fn within(range: &Option<DateRange>, at: chrono::DateTime<chrono::Utc>) -> bool {
    range.map_or(true, |r| r.contains(at))
}

impl ProductFilter {
    pub fn all() -> Self { Self::default() }
    pub fn created_within(range: DateRange) -> Self { Self { created: Some(range), ..Self::default() } }
    pub fn in_category(category: impl Into<String>) -> Self { Self { category: Some(category.into()), ..Self::default() } }
    pub fn stock(level: StockLevel) -> Self { Self { stock: Some(level), ..Self::default() } }

    pub fn matches(&self, product: &Product) -> bool {
        within(&self.created, product.created_at)
            && self.category.as_deref().map_or(true, |c| product.category == c)
            && self.stock.map_or(true, |level| match level {
                StockLevel::OutOfStock => product.stock == 0,
                StockLevel::InStock => product.stock > 0,
            })
    }
}

impl UserFilter {
    pub fn all() -> Self { Self::default() }
    pub fn created_within(range: DateRange) -> Self { Self { created: Some(range), ..Self::default() } }
    pub fn gender(gender: Gender) -> Self { Self { gender: Some(gender), ..Self::default() } }
    pub fn role(role: Role) -> Self { Self { role: Some(role), ..Self::default() } }

    pub fn matches(&self, user: &User) -> bool {
        within(&self.created, user.created_at)
            && self.gender.map_or(true, |g| user.gender == g)
            && self.role.map_or(true, |r| user.role == r)
    }
}

impl OrderFilter {
    pub fn all() -> Self { Self::default() }
    pub fn created_within(range: DateRange) -> Self { Self { created: Some(range), ..Self::default() } }
    pub fn status(status: OrderStatus) -> Self { Self { status: Some(status), ..Self::default() } }

    pub fn matches(&self, order: &Order) -> bool {
        within(&self.created, order.created_at) && self.status.map_or(true, |s| order.status == s)
    }

    pub fn matches_cancelled(&self, order: &CancelledOrder) -> bool {
        within(&self.created, order.created_at) && self.status.map_or(true, |s| order.status == s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    #[test]
    fn test_product_filter_combines_fields() {
        let now = Utc::now();
        let laptop = Product::new("Laptop", "electronics", 0, now);
        assert!(ProductFilter::all().matches(&laptop));
        assert!(ProductFilter::in_category("electronics").matches(&laptop));
        assert!(!ProductFilter::in_category("books").matches(&laptop));
        assert!(ProductFilter::stock(StockLevel::OutOfStock).matches(&laptop));
        assert!(!ProductFilter::stock(StockLevel::InStock).matches(&laptop));

        let last_week = DateRange::new(now - Duration::days(7), now - Duration::days(1));
        let filter = ProductFilter { created: Some(last_week), category: Some("electronics".into()), stock: None };
        assert!(!filter.matches(&laptop));
    }

    #[test]
    fn test_user_filter_by_role() {
        let dob = chrono::NaiveDate::from_ymd_opt(1990, 1, 1).unwrap();
        let admin = User::new("Ravi", Gender::Male, dob, Utc::now()).with_role(Role::Admin);
        assert!(UserFilter::role(Role::Admin).matches(&admin));
        assert!(!UserFilter::role(Role::User).matches(&admin));
        assert!(!UserFilter::gender(Gender::Female).matches(&admin));
    }
}
