//! # Route Configuration
//!
//! This module sets up all the HTTP routes for the site.

use actix_web::web;

use super::handlers;

/// Configure all routes.
///
/// This function is called from main.rs to set up
/// all the endpoint routes.
///
/// ## Route Structure
///
/// ```text
/// /
/// ├── /                    GET  - Search form
/// │                        POST - Run search
/// ├── /abs/{bibcode}       GET  - Abstract view
/// ├── /export/{bibcode}    GET  - BibTeX export
/// └── /health              GET  - Health check
/// ```
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg
        // Search page: form on GET, results on POST
        .route("/", web::get().to(handlers::index))
        .route("/", web::post().to(handlers::run_search))
        // Abstract view for one bibcode
        .route("/abs/{bibcode}", web::get().to(handlers::abstract_page))
        // BibTeX export for one bibcode
        .route("/export/{bibcode}", web::get().to(handlers::export_page))
        // Health check endpoint
        .route("/health", web::get().to(handlers::health_check));
}
