//! Read-only record model
pub mod aggregates;
pub mod filters;
pub mod value_objects;

pub use aggregates::{CancelledOrder, Order, Product, Timestamped, User};
pub use filters::{OrderFilter, ProductFilter, StockLevel, UserFilter};
pub use value_objects::{DateRange, Gender, OrderAmount, OrderStatus, RefundStatus, Role};
