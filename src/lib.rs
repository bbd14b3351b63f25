//! OpenSASE Stats
//!
//! Admin analytics for the self-hosted ecommerce store.
//!
//! ## Features
//! - Dashboard totals with month-over-month change
//! - Pie breakdowns (order status, stock, categories, age groups, revenue)
//! - Bar and line series bucketed by month
//! - Postgres and in-memory record stores

pub mod analytics;
pub mod api;
pub mod config;
pub mod domain;
pub mod store;

use thiserror::Error;

// =============================================================================
// Error Types
// =============================================================================

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Invalid {entity} record: {reason}")]
    Decode { entity: &'static str, reason: String },
}

pub type Result<T> = std::result::Result<T, AnalyticsError>;
