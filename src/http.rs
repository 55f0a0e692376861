//! HTTP transport for the book service.
//!
//! Requires the `http` feature. Uses axum for routing.
//!
//! ## Routes
//!
//! - `GET /` - service summary.
//! - `GET /books` - every book.
//! - `GET /books/random` - one random book.
//! - `GET /books/:id` - one book.
//! - `POST /books` - create a book, `201` with the stored record.
//! - `PUT /books/:id` - partial update.
//! - `DELETE /books/:id` - delete, `204` with no body.
//! - `GET /stats` - book and author counts.
//!
//! Errors are returned as `{ "error": <kind>, "detail": <message> }` with
//! the status from `HandlerError::status_code()`.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use bookvault::{http, BookService, BookStore, JsonFileSnapshot};
//!
//! let store = BookStore::open(JsonFileSnapshot::new("data/books.json"));
//! let service = Arc::new(BookService::new(store));
//! http::serve_with_shutdown(service, "0.0.0.0:8000", shutdown).await?;
//! ```

use std::future::Future;
use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};

use crate::book::{BookPatch, NewBook};
use crate::service::{parse_book_id, BookService, HandlerError};
use crate::snapshot::SnapshotStore;

/// Build an axum `Router` serving the book routes from `service`.
pub fn router<S: SnapshotStore + 'static>(service: Arc<BookService<S>>) -> Router {
    Router::new()
        .route("/", get(summary_handler::<S>))
        .route("/books", get(list_handler::<S>).post(create_handler::<S>))
        .route("/books/random", get(random_handler::<S>))
        .route(
            "/books/:id",
            get(get_handler::<S>)
                .put(update_handler::<S>)
                .delete(delete_handler::<S>),
        )
        .route("/stats", get(stats_handler::<S>))
        .with_state(service)
}

/// Serve the book routes at `addr` (e.g. `"0.0.0.0:8000"`) until `signal`
/// resolves, then finish in-flight requests and return.
pub async fn serve_with_shutdown<S, F>(
    service: Arc<BookService<S>>,
    addr: &str,
    signal: F,
) -> Result<(), std::io::Error>
where
    S: SnapshotStore + 'static,
    F: Future<Output = ()> + Send + 'static,
{
    let app = router(service);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(signal)
        .await
}

type SharedService<S> = State<Arc<BookService<S>>>;

async fn summary_handler<S: SnapshotStore + 'static>(
    State(service): SharedService<S>,
) -> Response {
    respond(StatusCode::OK, service.summary())
}

async fn list_handler<S: SnapshotStore + 'static>(State(service): SharedService<S>) -> Response {
    respond(StatusCode::OK, service.list())
}

async fn random_handler<S: SnapshotStore + 'static>(
    State(service): SharedService<S>,
) -> Response {
    respond(StatusCode::OK, service.random_pick())
}

async fn get_handler<S: SnapshotStore + 'static>(
    State(service): SharedService<S>,
    Path(id): Path<String>,
) -> Response {
    let result = parse_book_id(&id).and_then(|id| service.get_by_id(id));
    respond(StatusCode::OK, result)
}

async fn create_handler<S: SnapshotStore + 'static>(
    State(service): SharedService<S>,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    let result = decode::<NewBook>(body).and_then(|input| service.create(input));
    respond(StatusCode::CREATED, result)
}

async fn update_handler<S: SnapshotStore + 'static>(
    State(service): SharedService<S>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    let result = parse_book_id(&id)
        .and_then(|id| decode::<BookPatch>(body).map(|patch| (id, patch)))
        .and_then(|(id, patch)| service.update(id, patch));
    respond(StatusCode::OK, result)
}

async fn delete_handler<S: SnapshotStore + 'static>(
    State(service): SharedService<S>,
    Path(id): Path<String>,
) -> Response {
    match parse_book_id(&id).and_then(|id| service.delete(id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(e),
    }
}

async fn stats_handler<S: SnapshotStore + 'static>(State(service): SharedService<S>) -> Response {
    respond(StatusCode::OK, service.stats())
}

/// Decode a JSON body. Extractor rejections (bad syntax, wrong content
/// type) become `BadRequest` like any other undecodable body.
fn decode<T: DeserializeOwned>(
    body: Result<Json<Value>, JsonRejection>,
) -> Result<T, HandlerError> {
    let Json(value) = body.map_err(|e| HandlerError::BadRequest(e.body_text()))?;
    Ok(serde_json::from_value(value)?)
}

fn respond<T: Serialize>(status: StatusCode, result: Result<T, HandlerError>) -> Response {
    match result {
        Ok(value) => (status, Json(value)).into_response(),
        Err(e) => error_response(e),
    }
}

fn error_response(err: HandlerError) -> Response {
    if let HandlerError::Store(cause) = &err {
        tracing::error!(error = %cause, "store failure while handling request");
    }
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let body = json!({ "error": err.kind(), "detail": err.to_string() });
    (status, Json(body)).into_response()
}
