use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/vote/boy", post(handlers::vote_boy))
        .route("/vote/girl", post(handlers::vote_girl))
        .route("/api/state", get(handlers::get_state))
        .route("/api/vote", post(handlers::vote))
        .with_state(state)
}
