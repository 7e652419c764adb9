use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::controllers::incident_controller::IncidentController;
use crate::dto::incident_dto::{
    CreateIncidentRequest, IncidentListQuery, IncidentListResponse, IncidentResponse,
    UpdateIncidentRequest,
};
use crate::middleware::auth::{ensure_write_role, AuthenticatedUser};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_incident_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_incidents).post(create_incident))
        .route("/:id", get(get_incident).put(update_incident).delete(delete_incident))
}

async fn list_incidents(
    State(state): State<AppState>,
    Query(query): Query<IncidentListQuery>,
) -> Result<Json<IncidentListResponse>, AppError> {
    let controller = IncidentController::new(state.pool.clone());
    let response = controller.list(query).await?;
    Ok(Json(response))
}

async fn create_incident(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Json(request): Json<CreateIncidentRequest>,
) -> Result<(StatusCode, Json<IncidentResponse>), AppError> {
    ensure_write_role(&user)?;
    let controller = IncidentController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn get_incident(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<IncidentResponse>, AppError> {
    let controller = IncidentController::new(state.pool.clone());
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn update_incident(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateIncidentRequest>,
) -> Result<Json<IncidentResponse>, AppError> {
    ensure_write_role(&user)?;
    let controller = IncidentController::new(state.pool.clone());
    let response = controller.update(id, request).await?;
    Ok(Json(response))
}

async fn delete_incident(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    ensure_write_role(&user)?;
    let controller = IncidentController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(Json(serde_json::json!({
        "message": "Incident deleted successfully"
    })))
}
