//! Insertion-ordered in-memory store.

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::{CancelledOrder, Order, OrderFilter, Product, ProductFilter, User, UserFilter};
use crate::Result;
use super::RecordStore;

#[derive(Debug, Default)]
pub struct MemoryStore {
    products: RwLock<Vec<Product>>,
    users: RwLock<Vec<User>>,
    orders: RwLock<Vec<Order>>,
    cancelled: RwLock<Vec<CancelledOrder>>,
}

impl MemoryStore {
    pub fn new() -> Self { Self::default() }

    pub async fn insert_product(&self, product: Product) { self.products.write().await.push(product); }
    pub async fn insert_user(&self, user: User) { self.users.write().await.push(user); }
    pub async fn insert_order(&self, order: Order) { self.orders.write().await.push(order); }
    pub async fn insert_cancelled_order(&self, order: CancelledOrder) { self.cancelled.write().await.push(order); }
}

fn count(n: usize) -> u64 { u64::try_from(n).unwrap_or(u64::MAX) }

#[async_trait]
impl RecordStore for MemoryStore {
    async fn products(&self, filter: &ProductFilter) -> Result<Vec<Product>> {
        Ok(self.products.read().await.iter().filter(|p| filter.matches(p)).cloned().collect())
    }

    async fn count_products(&self, filter: &ProductFilter) -> Result<u64> {
        Ok(count(self.products.read().await.iter().filter(|p| filter.matches(p)).count()))
    }

    async fn distinct_categories(&self) -> Result<Vec<String>> {
        let mut categories: Vec<String> = self.products.read().await.iter().map(|p| p.category.clone()).collect();
        categories.sort();
        categories.dedup();
        Ok(categories)
    }

    async fn users(&self, filter: &UserFilter) -> Result<Vec<User>> {
        Ok(self.users.read().await.iter().filter(|u| filter.matches(u)).cloned().collect())
    }

    async fn count_users(&self, filter: &UserFilter) -> Result<u64> {
        Ok(count(self.users.read().await.iter().filter(|u| filter.matches(u)).count()))
    }

    async fn orders(&self, filter: &OrderFilter) -> Result<Vec<Order>> {
        Ok(self.orders.read().await.iter().filter(|o| filter.matches(o)).cloned().collect())
    }

    async fn count_orders(&self, filter: &OrderFilter) -> Result<u64> {
        Ok(count(self.orders.read().await.iter().filter(|o| filter.matches(o)).count()))
    }

    async fn first_orders(&self, limit: usize) -> Result<Vec<Order>> {
        Ok(self.orders.read().await.iter().take(limit).cloned().collect())
    }

    async fn cancelled_orders(&self, filter: &OrderFilter) -> Result<Vec<CancelledOrder>> {
        Ok(self.cancelled.read().await.iter().filter(|o| filter.matches_cancelled(o)).cloned().collect())
    }

    async fn count_cancelled_orders(&self, filter: &OrderFilter) -> Result<u64> {
        Ok(count(self.cancelled.read().await.iter().filter(|o| filter.matches_cancelled(o)).count()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    #[tokio::test]
    async fn test_distinct_categories_sorted() {
        let store = MemoryStore::new();
        let now = Utc::now();
        for category in ["shoes", "electronics", "shoes", "books"] {
            store.insert_product(Product::new("item", category, 1, now)).await;
        }
        assert_eq!(store.distinct_categories().await.unwrap(), vec!["books", "electronics", "shoes"]);
    }

    #[tokio::test]
    async fn test_first_orders_keep_insertion_order() {
        let store = MemoryStore::new();
        let now = Utc::now();
        let user = Uuid::new_v4();
        for total in [10, 20, 30, 40, 50] {
            store.insert_order(Order::new(user, total, now)).await;
        }
        let totals: Vec<i64> = store.first_orders(4).await.unwrap().iter().map(|o| o.total).collect();
        assert_eq!(totals, vec![10, 20, 30, 40]);
        assert_eq!(store.count_orders(&OrderFilter::all()).await.unwrap(), 5);
    }
}
