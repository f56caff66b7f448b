use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use std::any::Any;
use tracing::error;

use crate::error::ApiErrorBody;

/// Last-resort handler for `CatchPanicLayer`.
pub fn catch_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.to_string()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "<unknown>".into()
    };
    error!(panic = %detail, "route handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiErrorBody {
            message: "Something went wrong!".to_string(),
        }),
    )
        .into_response()
}
