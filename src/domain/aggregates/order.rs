//! Order Records
//!
//! Cancelled orders are moved into their own collection, keeping the monetary
//! fields of the original order and gaining a refund status.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::domain::value_objects::{OrderAmount, OrderStatus, RefundStatus};
use super::Timestamped;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    pub user_id: Uuid,
    pub subtotal: i64,
    pub discount: i64,
    pub tax: i64,
    pub shipping_charges: Option<i64>,
    pub total: i64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CancelledOrder {
    pub id: Uuid,
    pub user_id: Uuid,
    pub subtotal: i64,
    pub discount: i64,
    pub tax: i64,
    pub shipping_charges: Option<i64>,
    pub total: i64,
    pub status: OrderStatus,
    pub refund_status: RefundStatus,
    pub created_at: DateTime<Utc>,
}

impl Order {
    pub fn new(user_id: Uuid, total: i64, created_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::now_v7(), user_id, subtotal: total, discount: 0, tax: 0, shipping_charges: None,
            total, status: OrderStatus::Processing, created_at,
        }
    }

    pub fn with_status(mut self, status: OrderStatus) -> Self { self.status = status; self }
    pub fn with_discount(mut self, discount: i64) -> Self { self.discount = discount; self }
    pub fn with_tax(mut self, tax: i64) -> Self { self.tax = tax; self }
    pub fn with_shipping(mut self, shipping: i64) -> Self { self.shipping_charges = Some(shipping); self }

    /// Reads a named amount; a missing shipping charge reads as 0.
    pub fn amount(&self, field: OrderAmount) -> i64 {
        match field {
            OrderAmount::Total => self.total,
            OrderAmount::Discount => self.discount,
            OrderAmount::Tax => self.tax,
            OrderAmount::ShippingCharges => self.shipping_charges.unwrap_or(0),
        }
    }

    pub fn cancel(self) -> CancelledOrder {
        CancelledOrder {
            id: self.id, user_id: self.user_id, subtotal: self.subtotal, discount: self.discount,
            tax: self.tax, shipping_charges: self.shipping_charges, total: self.total,
            status: self.status, refund_status: RefundStatus::Processing, created_at: self.created_at,
        }
    }
}

impl Timestamped for Order {
    fn created_at(&self) -> DateTime<Utc> { self.created_at }
}

impl Timestamped for CancelledOrder {
    fn created_at(&self) -> DateTime<Utc> { self.created_at }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_shipping_reads_as_zero() {
        let order = Order::new(Uuid::new_v4(), 500, Utc::now()).with_discount(20).with_tax(45);
        assert_eq!(order.amount(OrderAmount::ShippingCharges), 0);
        assert_eq!(order.amount(OrderAmount::Discount), 20);
        assert_eq!(order.with_shipping(30).amount(OrderAmount::ShippingCharges), 30);
    }

    #[test]
    fn test_cancel_keeps_creation_time() {
        let order = Order::new(Uuid::new_v4(), 250, Utc::now()).with_status(OrderStatus::Shipped);
        let created = order.created_at;
        let cancelled = order.cancel();
        assert_eq!(cancelled.created_at, created);
        assert_eq!(cancelled.refund_status, RefundStatus::Processing);
        assert_eq!((cancelled.total, cancelled.status), (250, OrderStatus::Shipped));
    }
}
