//! Error types for the dashboard web layer.
//!
//! [`WebError`] unifies every failure a page request can hit and converts
//! into an HTTP response via its [`IntoResponse`] implementation. The
//! client only ever sees a generic error page; the detail goes to the log.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use dexstats_core::ComposeError;

use crate::render::RenderError;
use crate::session::SessionError;

/// Body served with every 500 response.
pub const ERROR_PAGE: &str = "<!DOCTYPE html>\n<html><head><title>Error</title></head>\
<body><h1>Something went wrong</h1><p>Please try again later.</p></body></html>";

/// Errors that can occur while serving a request.
#[derive(Debug, thiserror::Error)]
pub enum WebError {
    /// Page composition failed (an upstream query or serialization).
    #[error("compose error: {0}")]
    Compose(#[from] ComposeError),

    /// The template could not be rendered.
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    /// The session store failed.
    #[error("session error: {0}")]
    Session(#[from] SessionError),
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, Html(ERROR_PAGE)).into_response()
    }
}
