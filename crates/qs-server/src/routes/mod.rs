pub mod auth;
pub mod fs;
pub mod upload;


use axum::{http::StatusCode, middleware, Json, Router};
use qs_core::{ErrorResp, ShareError};

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    let protected = Router::new()
        .merge(fs::router())
        .merge(upload::router())
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::require_auth));

    Router::new()
        .merge(auth::router())
        .merge(protected)
        .with_state(state)
}

pub type ApiError = (StatusCode, Json<ErrorResp>);

pub fn map_err(e: ShareError) -> ApiError {
    use ShareError::*;
    let (status, msg) = match e {
        BadName(_) | NotFound => (StatusCode::NOT_FOUND, "file not found".to_string()),
        NoFiles => (StatusCode::BAD_REQUEST, "no files".to_string()),
        BadRequest(s) => (StatusCode::BAD_REQUEST, s),
        Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized".to_string()),
        Io(err) => {
            tracing::error!("io error: {err}");
            (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_string())
        }
    };
    (status, Json(ErrorResp::new(msg)))
}
