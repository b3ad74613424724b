//! # Request Handlers
//!
//! This module contains the handler functions for each endpoint.
//! Each handler:
//! 1. Validates request input
//! 2. Refreshes the visitor's anonymous token if needed
//! 3. Calls the ADS client
//! 4. Renders a template
//!
//! ## Error Handling
//!
//! Handlers return `Result<HttpResponse, AppError>`; any upstream or
//! session failure is turned into an error page by the
//! `ResponseError` impl on [`AppError`].

use std::sync::Arc;

use actix_session::Session;
use actix_web::{http::header, web, HttpResponse};
use askama::Template;
use chrono::Utc;
use serde_json::json;
use tracing::info;

use crate::ads::DEFAULT_SORT;
use crate::error::AppError;
use crate::models::QueryForm;
use crate::services::results::truncate_authors;
use crate::services::session::{ensure_auth, load_cookies, merge_cookies, save_cookies};
use crate::templates::{AbstractPage, DocView, ExportPage, IndexPage};
use crate::utils::is_valid_bibcode;
use crate::AppState;

/// Render a template to an HTML response.
fn render<T: Template>(page: T) -> Result<HttpResponse, AppError> {
    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(page.render()?))
}

/// Redirect to the search page.
fn redirect_home() -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, "/"))
        .finish()
}

/// Search form.
///
/// ## Endpoint
///
/// `GET /`
pub async fn index(
    state: web::Data<Arc<AppState>>,
    session: Session,
) -> Result<HttpResponse, AppError> {
    ensure_auth(&session, &state.ads).await?;
    render(IndexPage::blank(String::new()))
}

/// Run a search and render the results.
///
/// An empty or whitespace-only query re-renders the form without
/// issuing a search.
///
/// ## Endpoint
///
/// `POST /`
pub async fn run_search(
    state: web::Data<Arc<AppState>>,
    session: Session,
    form: web::Form<QueryForm>,
) -> Result<HttpResponse, AppError> {
    let form = form.into_inner();
    let auth = ensure_auth(&session, &state.ads).await?;

    let query = form.query.trim().to_string();
    if query.is_empty() {
        return render(IndexPage::blank(String::new()));
    }

    let sort = form.sort.as_deref().unwrap_or(DEFAULT_SORT);

    let mut cookies = load_cookies(&session)?;
    let (mut results, fresh) = state.ads.search(&auth, &cookies, &query, sort, 0).await?;
    merge_cookies(&mut cookies, fresh);
    save_cookies(&session, &cookies)?;

    info!(
        query = query.as_str(),
        num_found = results.response.num_found,
        "Search completed"
    );

    truncate_authors(&mut results.response.docs);
    let docs: Vec<DocView> = results.response.docs.into_iter().map(DocView::from).collect();

    render(IndexPage {
        query,
        searched: true,
        num_found: results.response.num_found,
        docs,
    })
}

/// Abstract view: the records citing one bibcode.
///
/// A bibcode of the wrong length redirects to `/` before any API
/// call is made.
///
/// ## Endpoint
///
/// `GET /abs/{bibcode}`
pub async fn abstract_page(
    state: web::Data<Arc<AppState>>,
    session: Session,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let bibcode = path.into_inner();
    if !is_valid_bibcode(&bibcode) {
        info!(bibcode = bibcode.as_str(), "Malformed bibcode, redirecting");
        return Ok(redirect_home());
    }

    let auth = ensure_auth(&session, &state.ads).await?;

    let mut cookies = load_cookies(&session)?;
    let (mut results, fresh) = state.ads.citations(&auth, &cookies, &bibcode).await?;
    merge_cookies(&mut cookies, fresh);
    save_cookies(&session, &cookies)?;

    truncate_authors(&mut results.response.docs);
    let docs: Vec<DocView> = results.response.docs.into_iter().map(DocView::from).collect();

    render(AbstractPage {
        bibcode,
        num_found: results.response.num_found,
        docs,
    })
}

/// BibTeX export view for one bibcode.
///
/// Applies the same length validation and redirect as the abstract
/// view.
///
/// ## Endpoint
///
/// `GET /export/{bibcode}`
pub async fn export_page(
    state: web::Data<Arc<AppState>>,
    session: Session,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let bibcode = path.into_inner();
    if !is_valid_bibcode(&bibcode) {
        info!(bibcode = bibcode.as_str(), "Malformed bibcode, redirecting");
        return Ok(redirect_home());
    }

    let auth = ensure_auth(&session, &state.ads).await?;

    let mut cookies = load_cookies(&session)?;
    let (export, fresh) = state
        .ads
        .export_bibtex(&auth, &cookies, &[bibcode.clone()])
        .await?;
    merge_cookies(&mut cookies, fresh);
    save_cookies(&session, &cookies)?;

    render(ExportPage {
        bibcode,
        export: export.export,
    })
}

/// Health check endpoint.
///
/// ## Endpoint
///
/// `GET /health`
///
/// ## Response
///
/// ```json
/// {
///     "status": "healthy",
///     "upstream": "https://dev.adsabs.harvard.edu/v1/",
///     "version": "0.1.0",
///     "timestamp": "2026-08-30T12:00:00Z"
/// }
/// ```
pub async fn health_check(state: web::Data<Arc<AppState>>) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "upstream": state.config.ads_api_url.as_str(),
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": Utc::now(),
    }))
}
