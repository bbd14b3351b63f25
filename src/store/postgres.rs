//! Postgres-backed record store.
//!
//! Each record source lives in its own table (`products`, `users`, `orders`,
//! `deleted_orders`). Filters compile to `WHERE` clauses with bound values.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{postgres::PgPoolOptions, PgPool, Postgres, QueryBuilder};
use std::time::Duration;
use uuid::Uuid;

use crate::domain::{
    CancelledOrder, DateRange, Order, OrderFilter, Product, ProductFilter, StockLevel, User, UserFilter,
};
use crate::{AnalyticsError, Result};
use super::RecordStore;

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

const PRODUCT_COLUMNS: &str = "id, name, brand, category, price, stock, created_at";
const USER_COLUMNS: &str = "id, name, email, gender, role, dob, created_at";
const ORDER_COLUMNS: &str = "id, user_id, subtotal, discount, tax, shipping_charges, total, status, created_at";
const CANCELLED_COLUMNS: &str =
    "id, user_id, subtotal, discount, tax, shipping_charges, total, status, refund_status, created_at";

#[derive(Debug, Clone, Copy)]
pub struct PoolConfig {
    pub max_connections: u32,
    pub acquire_timeout_secs: u64,
}

impl Default for PoolConfig {
    fn default() -> Self { Self { max_connections: 10, acquire_timeout_secs: 10 } }
}

#[derive(Clone, Debug)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self { Self { pool } }

    pub async fn connect(database_url: &str, config: PoolConfig) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .connect(database_url)
            .await?;
        Ok(Self { pool })
    }

    pub async fn migrate(&self) -> Result<()> {
        MIGRATOR.run(&self.pool).await?;
        Ok(())
    }
}

// =============================================================================
// Rows
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct ProductRow { id: Uuid, name: String, brand: String, category: String, price: i64, stock: i32, created_at: DateTime<Utc> }

#[derive(Debug, sqlx::FromRow)]
struct UserRow { id: Uuid, name: String, email: String, gender: String, role: String, dob: NaiveDate, created_at: DateTime<Utc> }

#[derive(Debug, sqlx::FromRow)]
struct OrderRow {
    id: Uuid, user_id: Uuid, subtotal: i64, discount: i64, tax: i64, shipping_charges: Option<i64>,
    total: i64, status: String, created_at: DateTime<Utc>,
}

#[derive(Debug, sqlx::FromRow)]
struct CancelledOrderRow {
    id: Uuid, user_id: Uuid, subtotal: i64, discount: i64, tax: i64, shipping_charges: Option<i64>,
    total: i64, status: String, refund_status: String, created_at: DateTime<Utc>,
}

fn decode(entity: &'static str, err: impl std::fmt::Display) -> AnalyticsError {
    AnalyticsError::Decode { entity, reason: err.to_string() }
}

impl TryFrom<ProductRow> for Product {
    type Error = AnalyticsError;
    fn try_from(r: ProductRow) -> Result<Self> {
        let stock = u32::try_from(r.stock).map_err(|e| decode("product", e))?;
        Ok(Product { id: r.id, name: r.name, brand: r.brand, category: r.category, price: r.price, stock, created_at: r.created_at })
    }
}

impl TryFrom<UserRow> for User {
    type Error = AnalyticsError;
    fn try_from(r: UserRow) -> Result<Self> {
        Ok(User {
            id: r.id, name: r.name, email: r.email,
            gender: r.gender.parse().map_err(|e| decode("user", e))?,
            role: r.role.parse().map_err(|e| decode("user", e))?,
            dob: r.dob, created_at: r.created_at,
        })
    }
}

impl TryFrom<OrderRow> for Order {
    type Error = AnalyticsError;
    fn try_from(r: OrderRow) -> Result<Self> {
        Ok(Order {
            id: r.id, user_id: r.user_id, subtotal: r.subtotal, discount: r.discount, tax: r.tax,
            shipping_charges: r.shipping_charges, total: r.total,
            status: r.status.parse().map_err(|e| decode("order", e))?,
            created_at: r.created_at,
        })
    }
}

impl TryFrom<CancelledOrderRow> for CancelledOrder {
    type Error = AnalyticsError;
    fn try_from(r: CancelledOrderRow) -> Result<Self> {
        Ok(CancelledOrder {
            id: r.id, user_id: r.user_id, subtotal: r.subtotal, discount: r.discount, tax: r.tax,
            shipping_charges: r.shipping_charges, total: r.total,
            status: r.status.parse().map_err(|e| decode("cancelled order", e))?,
            refund_status: r.refund_status.parse().map_err(|e| decode("cancelled order", e))?,
            created_at: r.created_at,
        })
    }
}

// =============================================================================
// Filter compilation
// =============================================================================

fn push_created(qb: &mut QueryBuilder<'_, Postgres>, created: Option<DateRange>) {
    if let Some(range) = created {
        qb.push(" AND created_at >= ").push_bind(range.start);
        qb.push(" AND created_at <= ").push_bind(range.end);
    }
}

fn push_product_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &ProductFilter) {
    push_created(qb, filter.created);
    if let Some(category) = &filter.category {
        qb.push(" AND category = ").push_bind(category.clone());
    }
    match filter.stock {
        Some(StockLevel::OutOfStock) => { qb.push(" AND stock = 0"); }
        Some(StockLevel::InStock) => { qb.push(" AND stock > 0"); }
        None => {}
    }
}

fn push_user_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &UserFilter) {
    push_created(qb, filter.created);
    if let Some(gender) = filter.gender {
        qb.push(" AND gender = ").push_bind(gender.as_str());
    }
    if let Some(role) = filter.role {
        qb.push(" AND role = ").push_bind(role.as_str());
    }
}

fn push_order_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &OrderFilter) {
    push_created(qb, filter.created);
    if let Some(status) = filter.status {
        // rows written before the status spelling was corrected
        if status == crate::domain::OrderStatus::Delivered {
            qb.push(" AND status IN ('Delivered', 'Deliverd')");
        } else {
            qb.push(" AND status = ").push_bind(status.as_str());
        }
    }
}

fn select(columns: &str, table: &str) -> QueryBuilder<'static, Postgres> {
    QueryBuilder::new(format!("SELECT {columns} FROM {table} WHERE TRUE"))
}

fn count_from(table: &str) -> QueryBuilder<'static, Postgres> {
    QueryBuilder::new(format!("SELECT COUNT(*) FROM {table} WHERE TRUE"))
}

fn to_count(n: i64) -> u64 { u64::try_from(n).unwrap_or_default() }

#[async_trait]
impl RecordStore for PgStore {
    async fn products(&self, filter: &ProductFilter) -> Result<Vec<Product>> {
        let mut qb = select(PRODUCT_COLUMNS, "products");
        push_product_filter(&mut qb, filter);
        qb.push(" ORDER BY id");
        let rows = qb.build_query_as::<ProductRow>().fetch_all(&self.pool).await?;
        rows.into_iter().map(Product::try_from).collect()
    }

    async fn count_products(&self, filter: &ProductFilter) -> Result<u64> {
        let mut qb = count_from("products");
        push_product_filter(&mut qb, filter);
        Ok(to_count(qb.build_query_scalar::<i64>().fetch_one(&self.pool).await?))
    }

    async fn distinct_categories(&self) -> Result<Vec<String>> {
        let categories = sqlx::query_scalar::<_, String>("SELECT DISTINCT category FROM products ORDER BY category")
            .fetch_all(&self.pool)
            .await?;
        Ok(categories)
    }

    async fn users(&self, filter: &UserFilter) -> Result<Vec<User>> {
        let mut qb = select(USER_COLUMNS, "users");
        push_user_filter(&mut qb, filter);
        qb.push(" ORDER BY id");
        let rows = qb.build_query_as::<UserRow>().fetch_all(&self.pool).await?;
        rows.into_iter().map(User::try_from).collect()
    }

    async fn count_users(&self, filter: &UserFilter) -> Result<u64> {
        let mut qb = count_from("users");
        push_user_filter(&mut qb, filter);
        Ok(to_count(qb.build_query_scalar::<i64>().fetch_one(&self.pool).await?))
    }

    async fn orders(&self, filter: &OrderFilter) -> Result<Vec<Order>> {
        let mut qb = select(ORDER_COLUMNS, "orders");
        push_order_filter(&mut qb, filter);
        qb.push(" ORDER BY id");
        let rows = qb.build_query_as::<OrderRow>().fetch_all(&self.pool).await?;
        rows.into_iter().map(Order::try_from).collect()
    }

    async fn count_orders(&self, filter: &OrderFilter) -> Result<u64> {
        let mut qb = count_from("orders");
        push_order_filter(&mut qb, filter);
        Ok(to_count(qb.build_query_scalar::<i64>().fetch_one(&self.pool).await?))
    }

    async fn first_orders(&self, limit: usize) -> Result<Vec<Order>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = sqlx::query_as::<_, OrderRow>(&format!("SELECT {ORDER_COLUMNS} FROM orders ORDER BY id LIMIT $1"))
            .bind(limit)
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(Order::try_from).collect()
    }

    async fn cancelled_orders(&self, filter: &OrderFilter) -> Result<Vec<CancelledOrder>> {
        let mut qb = select(CANCELLED_COLUMNS, "deleted_orders");
        push_order_filter(&mut qb, filter);
        qb.push(" ORDER BY id");
        let rows = qb.build_query_as::<CancelledOrderRow>().fetch_all(&self.pool).await?;
        rows.into_iter().map(CancelledOrder::try_from).collect()
    }

    async fn count_cancelled_orders(&self, filter: &OrderFilter) -> Result<u64> {
        let mut qb = count_from("deleted_orders");
        push_order_filter(&mut qb, filter);
        Ok(to_count(qb.build_query_scalar::<i64>().fetch_one(&self.pool).await?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Gender, OrderStatus, Role};

    #[test]
    fn test_product_filter_sql() {
        let mut qb = count_from("products");
        push_product_filter(&mut qb, &ProductFilter { category: Some("books".into()), stock: Some(StockLevel::InStock), created: None });
        assert_eq!(qb.sql(), "SELECT COUNT(*) FROM products WHERE TRUE AND category = $1 AND stock > 0");
    }

    #[test]
    fn test_delivered_matches_legacy_spelling() {
        let mut qb = count_from("orders");
        push_order_filter(&mut qb, &OrderFilter::status(OrderStatus::Delivered));
        assert_eq!(qb.sql(), "SELECT COUNT(*) FROM orders WHERE TRUE AND status IN ('Delivered', 'Deliverd')");
    }

    #[test]
    fn test_user_filter_binds_in_order() {
        let mut qb = select(USER_COLUMNS, "users");
        push_user_filter(&mut qb, &UserFilter { created: None, gender: Some(Gender::Male), role: Some(Role::Admin) });
        assert!(qb.sql().ends_with("WHERE TRUE AND gender = $1 AND role = $2"));
    }

    #[test]
    fn test_negative_stock_is_rejected() {
        let row = ProductRow {
            id: Uuid::new_v4(), name: "Broken".into(), brand: String::new(), category: "misc".into(),
            price: 0, stock: -1, created_at: Utc::now(),
        };
        assert!(matches!(Product::try_from(row), Err(AnalyticsError::Decode { entity: "product", .. })));
    }
}
