// Presentation layer - HTTP surface for the dashboard UI
pub mod app_state;
pub mod handlers;

use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    create_dashboard, delete_dashboard, get_dashboard, health_check, list_dashboards,
    save_dashboard,
};
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route(
            "/dashboards",
            get(list_dashboards).post(create_dashboard).put(save_dashboard),
        )
        .route(
            "/dashboards/:dashboard",
            get(get_dashboard).delete(delete_dashboard),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
