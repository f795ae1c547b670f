//! HTTP API over the note store.

mod error;
mod notes;

use std::sync::Arc;

use axum::{
    response::Html,
    routing::{get, put},
    Json, Router,
};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::store::NoteStore;

pub use error::{ApiError, ErrorBody};
pub use notes::{sort_newest_first, MessageBody};

const INDEX_HTML: &str = include_str!("../../assets/index.html");

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn NoteStore>,
}

pub fn create_router<S: NoteStore + 'static>(store: S) -> Router {
    let state = AppState {
        store: Arc::new(store),
    };

    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/notes", get(notes::list_notes).post(notes::create_note))
        .route(
            "/notes/{id}",
            put(notes::update_note).delete(notes::delete_note),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
