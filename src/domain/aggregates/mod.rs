//! Aggregates module
//!
//! Records are owned by the store; this crate only reads them.
pub mod product;
pub mod order;
pub mod user;

use chrono::{DateTime, Utc};

pub use product::Product;
pub use order::{CancelledOrder, Order};
pub use user::User;

/// A record with exactly one immutable creation instant.
pub trait Timestamped {
    fn created_at(&self) -> DateTime<Utc>;
}
