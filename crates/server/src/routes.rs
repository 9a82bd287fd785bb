use axum::http::HeaderValue;
use axum::routing::get;
use axum::{Json, Router};
use sea_orm::DatabaseConnection;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Message;

pub mod todos;

/// Process-wide state handed to every handler: the shared connection pool
/// and the empty-list response policy.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub empty_list_as_not_found: bool,
}

pub async fn root() -> Json<Message> {
    Json(Message { message: "Welcome to dailyDo todo app" })
}

/// CORS from the configured origin allow-list; permissive when unset.
pub fn build_cors(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::very_permissive();
    }
    let origins: Vec<HeaderValue> = origins.iter().filter_map(|o| o.parse().ok()).collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Build the full application router
pub fn build_router(cors: CorsLayer, state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/todos/", get(todos::list).post(todos::create))
        .route(
            "/todos/:id",
            get(todos::get_one).put(todos::update).delete(todos::delete),
        )
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
