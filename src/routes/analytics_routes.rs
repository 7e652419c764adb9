use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use crate::controllers::analytics_controller::AnalyticsController;
use crate::dto::analytics_dto::{AnalyticsSummaryResponse, DateRangeQuery};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_analytics_router() -> Router<AppState> {
    Router::new().route("/summary", get(analytics_summary))
}

pub fn create_reports_router() -> Router<AppState> {
    Router::new()
        .route("/vehicles", get(vehicles_report))
        .route("/incidents", get(incidents_report))
        .route("/analytics", get(analytics_report))
}

async fn analytics_summary(
    State(state): State<AppState>,
    Query(query): Query<DateRangeQuery>,
) -> Result<Json<AnalyticsSummaryResponse>, AppError> {
    let controller = AnalyticsController::new(state.pool.clone());
    let response = controller.summary(query).await?;
    Ok(Json(response))
}

async fn vehicles_report(
    State(state): State<AppState>,
    Query(query): Query<DateRangeQuery>,
) -> Result<impl IntoResponse, AppError> {
    let controller = AnalyticsController::new(state.pool.clone());
    let report = controller.vehicles_report(query).await?;
    Ok(plain_text(report))
}

async fn incidents_report(
    State(state): State<AppState>,
    Query(query): Query<DateRangeQuery>,
) -> Result<impl IntoResponse, AppError> {
    let controller = AnalyticsController::new(state.pool.clone());
    let report = controller.incidents_report(query).await?;
    Ok(plain_text(report))
}

async fn analytics_report(
    State(state): State<AppState>,
    Query(query): Query<DateRangeQuery>,
) -> Result<impl IntoResponse, AppError> {
    let controller = AnalyticsController::new(state.pool.clone());
    let report = controller.analytics_report(query).await?;
    Ok(plain_text(report))
}

fn plain_text(body: String) -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], body)
}
