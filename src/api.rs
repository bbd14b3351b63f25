//! HTTP routes for the admin stats.

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::analytics::{BarCharts, DashboardStats, LineCharts, PieCharts, ReportService};
use crate::store::RecordStore;
use crate::AnalyticsError;

#[derive(Clone)]
pub struct AppState { pub reports: ReportService }

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>) -> Self { Self { reports: ReportService::new(store) } }
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> { pub success: bool, pub data: T }

impl<T: Serialize> ApiResponse<T> {
    fn ok(data: T) -> Json<Self> { Json(Self { success: true, data }) }
}

#[derive(Debug)]
pub struct ApiError { pub status: StatusCode, pub message: String }

#[derive(Serialize)]
struct ErrorBody<'a> { success: bool, message: &'a str }

impl From<AnalyticsError> for ApiError {
    fn from(e: AnalyticsError) -> Self {
        tracing::error!(error = %e, "report query failed");
        Self { status: StatusCode::INTERNAL_SERVER_ERROR, message: "Internal Server Error".to_string() }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(ErrorBody { success: false, message: &self.message })).into_response()
    }
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { Json(serde_json::json!({"status": "healthy", "service": "opensase-stats"})) }))
        .route("/api/v1/stats/dashboard", get(dashboard))
        .route("/api/v1/stats/pie", get(pie))
        .route("/api/v1/stats/bar", get(bar))
        .route("/api/v1/stats/line", get(line))
        .layer(TraceLayer::new_for_http()).layer(CorsLayer::permissive()).with_state(state)
}

async fn dashboard(State(s): State<AppState>) -> Result<Json<ApiResponse<DashboardStats>>, ApiError> {
    Ok(ApiResponse::ok(s.reports.dashboard(Utc::now()).await?))
}

async fn pie(State(s): State<AppState>) -> Result<Json<ApiResponse<PieCharts>>, ApiError> {
    Ok(ApiResponse::ok(s.reports.pie(Utc::now()).await?))
}

async fn bar(State(s): State<AppState>) -> Result<Json<ApiResponse<BarCharts>>, ApiError> {
    Ok(ApiResponse::ok(s.reports.bar(Utc::now()).await?))
}

async fn line(State(s): State<AppState>) -> Result<Json<ApiResponse<LineCharts>>, ApiError> {
    Ok(ApiResponse::ok(s.reports.line(Utc::now()).await?))
}
