// HTTP request handlers
use crate::domain::dashboard::Dashboard;
use crate::domain::widget::DashboardWidget;
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

#[derive(Deserialize)]
pub struct NewDashboard {
    pub name: String,
    #[serde(default)]
    pub widgets: Vec<DashboardWidget>,
}

fn internal_error(context: &str, e: anyhow::Error) -> StatusCode {
    tracing::error!("{}: {:#}", context, e);
    StatusCode::INTERNAL_SERVER_ERROR
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// List stored dashboards without metadata
pub async fn list_dashboards(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Dashboard>>, StatusCode> {
    state
        .dashboard_service
        .list_dashboards()
        .map(Json)
        .map_err(|e| internal_error("Error listing dashboards", e))
}

/// Fetch one dashboard by name with live widget metadata
pub async fn get_dashboard(
    Path(name): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Dashboard>, StatusCode> {
    match state.dashboard_service.get_dashboard_with_metadata(&name).await {
        Ok(Some(dashboard)) => Ok(Json(dashboard)),
        Ok(None) => Err(StatusCode::NOT_FOUND),
        Err(e) => Err(internal_error(&format!("Error loading dashboard {}", name), e)),
    }
}

/// Create a dashboard with a fresh id
pub async fn create_dashboard(
    State(state): State<Arc<AppState>>,
    Json(body): Json<NewDashboard>,
) -> Result<(StatusCode, Json<Dashboard>), StatusCode> {
    state
        .dashboard_service
        .create_dashboard(body.name, body.widgets)
        .map(|dashboard| (StatusCode::CREATED, Json(dashboard)))
        .map_err(|e| internal_error("Error creating dashboard", e))
}

/// Save a dashboard, replacing any stored entry with the same id
pub async fn save_dashboard(
    State(state): State<Arc<AppState>>,
    Json(dashboard): Json<Dashboard>,
) -> Result<Json<Dashboard>, StatusCode> {
    state
        .dashboard_service
        .save_dashboard(&dashboard)
        .map(|_| Json(dashboard.without_metadata()))
        .map_err(|e| internal_error("Error saving dashboard", e))
}

/// Delete every stored dashboard with this id
pub async fn delete_dashboard(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> StatusCode {
    match state.dashboard_service.delete_dashboard(&id) {
        Ok(_) => StatusCode::NO_CONTENT,
        Err(e) => internal_error(&format!("Error deleting dashboard {}", id), e),
    }
}
