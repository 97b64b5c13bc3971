use crate::handlers;
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, post, put},
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/food/add", post(handlers::form_add_food))
        .route("/food/quick", post(handlers::form_quick_add))
        .route("/food/remove", post(handlers::form_remove_food))
        .route("/workout", post(handlers::form_save_workout))
        .route("/reset", post(handlers::form_reset_day))
        .route("/api/state", get(handlers::get_state))
        .route("/api/summary", get(handlers::get_summary))
        .route("/api/food", post(handlers::add_food))
        .route("/api/food/:meal/:index", delete(handlers::remove_food))
        .route("/api/workouts/:slot", put(handlers::save_workout))
        .route("/api/reset", post(handlers::reset_day))
        .with_state(state)
}
