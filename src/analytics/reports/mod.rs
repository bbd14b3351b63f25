//! Report builders
//!
//! Builders are pure functions of a query batch. [`ReportService`] runs the
//! batch for a report against the store and hands it to the builder.

pub mod bar;
pub mod dashboard;
pub mod line;
pub mod pie;

use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::analytics::percent::share_percent;
use crate::analytics::queries;
use crate::analytics::windows::ReportWindows;
use crate::store::RecordStore;
use crate::Result;

pub use bar::BarCharts;
pub use dashboard::DashboardStats;
pub use line::LineCharts;
pub use pie::PieCharts;

pub(crate) fn as_i64<T: TryInto<i64>>(n: T) -> i64 {
    n.try_into().unwrap_or(i64::MAX)
}

/// Each category's share of the whole catalog in whole percent.
pub fn category_shares(counts: &[(String, u64)], total: u64) -> BTreeMap<String, i64> {
    counts.iter().map(|(category, count)| (category.clone(), share_percent(*count, total))).collect()
}

#[derive(Clone)]
pub struct ReportService {
    store: Arc<dyn RecordStore>,
}

impl ReportService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self { Self { store } }

    #[tracing::instrument(skip(self))]
    pub async fn dashboard(&self, now: DateTime<Utc>) -> Result<DashboardStats> {
        let windows = ReportWindows::at(now);
        let batch = queries::load_dashboard(self.store.as_ref(), &windows).await?;
        tracing::debug!(
            orders = batch.all_orders.len(),
            categories = batch.category_counts.len(),
            "dashboard batch loaded"
        );
        Ok(dashboard::build(&batch, &windows))
    }

    #[tracing::instrument(skip(self))]
    pub async fn pie(&self, now: DateTime<Utc>) -> Result<PieCharts> {
        let batch = queries::load_pie(self.store.as_ref()).await?;
        tracing::debug!(users = batch.users.len(), orders = batch.orders.len(), "pie batch loaded");
        Ok(pie::build(&batch, now.date_naive()))
    }

    #[tracing::instrument(skip(self))]
    pub async fn bar(&self, now: DateTime<Utc>) -> Result<BarCharts> {
        let windows = ReportWindows::at(now);
        let batch = queries::load_bar(self.store.as_ref(), &windows).await?;
        tracing::debug!(
            products = batch.products.len(),
            users = batch.users.len(),
            orders = batch.orders.len(),
            cancelled = batch.cancelled_orders.len(),
            "bar batch loaded"
        );
        Ok(bar::build(&batch, now))
    }

    #[tracing::instrument(skip(self))]
    pub async fn line(&self, now: DateTime<Utc>) -> Result<LineCharts> {
        let windows = ReportWindows::at(now);
        let batch = queries::load_line(self.store.as_ref(), &windows).await?;
        tracing::debug!(orders = batch.orders.len(), "line batch loaded");
        Ok(line::build(&batch, now))
    }
}
