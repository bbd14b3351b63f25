//! Product Record

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use super::Timestamped;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub brand: String,
    pub category: String,
    pub price: i64,
    pub stock: u32,
    pub created_at: DateTime<Utc>,
}

impl Product {
    pub fn new(name: impl Into<String>, category: impl Into<String>, stock: u32, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::now_v7(), name: name.into(), brand: String::new(), category: category.into(),
            price: 0, stock, created_at,
        }
    }
}

impl Timestamped for Product {
    fn created_at(&self) -> DateTime<Utc> { self.created_at }
}
