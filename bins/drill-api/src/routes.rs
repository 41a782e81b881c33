// Route table for the Drill API

use axum::{
    routing::{get, post},
    Router,
};
use drill_common::config::{RUN_PATH, STATUS_PATH};
use std::sync::Arc;

use crate::handlers;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            RUN_PATH,
            post(handlers::run_code).fallback(handlers::method_not_allowed),
        )
        .route(STATUS_PATH, get(handlers::health_check))
}

/// Fully assembled application with its state attached
pub fn app(state: Arc<AppState>) -> Router {
    Router::new().merge(routes()).with_state(state)
}
