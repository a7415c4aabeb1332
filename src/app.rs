use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/fragments/search", get(handlers::search))
        .route("/fragments/reminders", get(handlers::reminders))
        .route("/reminders/:id/send", post(handlers::send_reminder))
        .route("/reminders/test", post(handlers::test_reminder))
        .route("/api/notifications", get(handlers::notifications))
        .route("/api/notifications/:id/dismiss", post(handlers::dismiss_notification))
        .with_state(state)
}
