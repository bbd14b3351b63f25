//! Analytics core: month bucketing, percentage change, the per-report query
//! batches and the report builders.

pub mod buckets;
pub mod percent;
pub mod queries;
pub mod reports;
pub mod windows;

pub use buckets::{count_by_month, month_buckets, months_ago, sum_by_month};
pub use percent::{percentage_change, share_percent};
pub use reports::{BarCharts, DashboardStats, LineCharts, PieCharts, ReportService};
pub use windows::ReportWindows;
