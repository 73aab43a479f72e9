//! HTTP Layer
//!
//! Pages, Google sign-in and the Tasks passthrough, served from one router.

mod auth;
mod error;
mod extract;
mod pages;
mod tasks;


use axum::routing::{get, patch, post};
use axum::Router;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::AppState;

pub use error::{AppError, AppResult};
pub use extract::{CurrentUser, MaybeUser};

pub fn build_router(state: AppState) -> Router {
    let public_dir = state.config.public_dir.clone();

    let task_routes = Router::new()
        .route("/lists", get(tasks::list_task_lists))
        .route("/:list_id", get(tasks::list_tasks).post(tasks::create_task))
        .route("/:list_id/:task_id", patch(tasks::update_task).delete(tasks::delete_task))
        .route("/:list_id/:task_id/complete", post(tasks::complete_task));

    Router::new()
        .route("/", get(pages::landing))
        .route("/dashboard", get(pages::dashboard))
        .route("/privacy", get(pages::privacy))
        .route("/terms", get(pages::terms))
        .route("/auth/google", get(auth::start_sign_in))
        .route("/auth/google/callback", get(auth::finish_sign_in))
        .route("/auth/logout", post(auth::logout))
        .nest("/tasks", task_routes)
        .nest_service("/public", ServeDir::new(public_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
