//! # Error Module
//!
//! One error type covers every way a request can fail: the upstream
//! API refused or timed out, the session cookie could not be read or
//! written, or a template failed to render.
//!
//! There is no retry or recovery path. Per the error design, every
//! failure surfaces to the visitor as an error page: 502 for upstream
//! failures, 500 for everything else.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use askama::Template;

use crate::templates::ErrorPage;

/// Errors that can occur while serving a request.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The upstream ADS API returned a non-success status or the
    /// request failed at the transport level.
    #[error("Upstream API request failed: {0}")]
    Upstream(#[from] reqwest::Error),

    /// The visitor session could not be read or written.
    #[error("Session error: {0}")]
    Session(String),

    /// A template failed to render.
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Upstream(_) => StatusCode::BAD_GATEWAY,
            AppError::Session(_) | AppError::Template(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let page = ErrorPage {
            status: status.as_u16(),
            message: self.to_string(),
        };

        match page.render() {
            Ok(body) => HttpResponse::build(status)
                .content_type("text/html; charset=utf-8")
                .body(body),
            // Rendering the error page itself failed; fall back to text
            Err(_) => HttpResponse::build(status).body(self.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_errors_render_internal_error_page() {
        let err = AppError::Session("cookie store unavailable".to_string());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = err.error_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
