//! API handlers and routing for the book REST endpoints

pub mod books;
pub mod openapi;

use std::any::Any;

use axum::{
    async_trait,
    body::Bytes,
    extract::{DefaultBodyLimit, FromRequest, FromRequestParts, Path, Request},
    http::{header, request::Parts, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any as AnyOrigin, CorsLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

use crate::{error::AppError, AppState};

/// Extractor that buffers the whole request body and decodes it as a JSON
/// object, rejecting with the catalog's own error bodies.
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state).await.map_err(|rejection| {
            if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
                AppError::PayloadTooLarge
            } else {
                tracing::debug!("Failed to buffer request body: {}", rejection.body_text());
                AppError::BadRequest("Failed to read request body".to_string())
            }
        })?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Err(AppError::MissingBody);
        }

        let value: Value =
            serde_json::from_slice(&bytes).map_err(|e| AppError::InvalidJson(e.to_string()))?;
        if !value.is_object() {
            return Err(AppError::InvalidJson("expected a JSON object".to_string()));
        }

        serde_json::from_value(value)
            .map(JsonBody)
            .map_err(|e| AppError::InvalidJson(e.to_string()))
    }
}

/// Book id taken from the `{id}` path segment
pub struct BookId(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for BookId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(id) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                tracing::debug!("Rejected book id: {}", rejection.body_text());
                AppError::BadRequest("Invalid book ID".to_string())
            })?;
        Ok(BookId(id))
    }
}

/// Fallback for every method/path pair outside the routing table
pub async fn route_not_found() -> AppError {
    AppError::RouteNotFound
}

fn handle_panic(_err: Box<dyn Any + Send + 'static>) -> Response {
    AppError::Internal("request handler panicked".to_string()).into_response()
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    let body_limit = state.config.server.max_body_bytes;

    // HEAD is routed explicitly, otherwise axum answers it with the GET handler
    let routes = Router::new()
        .route(
            "/book",
            get(books::list_books)
                .post(books::create_book)
                .head(route_not_found)
                .fallback(route_not_found),
        )
        .route(
            "/book/:id",
            get(books::get_book)
                .put(books::update_book)
                .delete(books::delete_book)
                .head(route_not_found)
                .fallback(route_not_found),
        )
        .fallback(route_not_found);

    with_middleware(routes, body_limit).with_state(state)
}

/// Body limit, panic recovery, tracing and CORS shared by every route
fn with_middleware(router: Router<AppState>, body_limit: usize) -> Router<AppState> {
    // OPTIONS on any path is answered here, before routing
    let cors = CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    router
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static("GET, POST, PUT, DELETE"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static("Content-Type"),
        ))
}
