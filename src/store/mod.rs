//! Record store interface
//!
//! The store owns the four record collections. Reports only ever call the
//! read methods below; the handle is built once at startup and shared.

mod memory;
mod postgres;

use async_trait::async_trait;

use crate::domain::{CancelledOrder, Order, OrderFilter, Product, ProductFilter, User, UserFilter};
use crate::Result;

pub use memory::MemoryStore;
pub use postgres::{PgStore, PoolConfig};

#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn products(&self, filter: &ProductFilter) -> Result<Vec<Product>>;
    async fn count_products(&self, filter: &ProductFilter) -> Result<u64>;
    /// Distinct product categories, sorted.
    async fn distinct_categories(&self) -> Result<Vec<String>>;

    async fn users(&self, filter: &UserFilter) -> Result<Vec<User>>;
    async fn count_users(&self, filter: &UserFilter) -> Result<u64>;

    async fn orders(&self, filter: &OrderFilter) -> Result<Vec<Order>>;
    async fn count_orders(&self, filter: &OrderFilter) -> Result<u64>;
    /// The first `limit` orders in natural (id) order, without any other sort.
    async fn first_orders(&self, limit: usize) -> Result<Vec<Order>>;

    async fn cancelled_orders(&self, filter: &OrderFilter) -> Result<Vec<CancelledOrder>>;
    async fn count_cancelled_orders(&self, filter: &OrderFilter) -> Result<u64>;
}
