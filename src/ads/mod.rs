//! # ADS Client Module
//!
//! This module provides a client for the remote ADS API. It wraps
//! `reqwest` and exposes one method per upstream endpoint.
//!
//! ## Responsibilities
//!
//! - Obtain anonymous bootstrap tokens
//! - Execute search queries with the fixed field lists
//! - Export records as BibTeX
//! - Forward and capture upstream cookies for the visitor session
//!
//! ## Endpoints
//!
//! | Method | Endpoint | Purpose |
//! |--------|----------|---------|
//! | GET | `accounts/bootstrap` | Anonymous token |
//! | GET | `search/query` | Search / citations |
//! | POST | `export/bibtex` | Citation export |
//!
//! Every call sends the visitor's stored upstream cookies and returns
//! the `Set-Cookie` pairs from the response alongside the parsed body,
//! so the handler can merge them back into the session. There is no
//! retry: a non-2xx status or transport failure is the final answer.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, COOKIE, SET_COOKIE};
use reqwest::{Client, Response};
use tracing::debug;

use crate::config::AppConfig;
use crate::error::AppError;
use crate::models::{AuthToken, ExportResponse, SearchResponse};
use crate::services::session::CookieMap;

/// Default sort order for free-text searches.
pub const DEFAULT_SORT: &str = "date desc, bibcode desc";

/// Fields requested for the search-results page.
const SEARCH_FIELDS: &str = "title,abstract,comment,bibcode,author,keyword,id,\
citation_count,[citations],pub,aff,volume,pubdate,doi,pub_raw,page,links_data,\
property,esources,data,email,doctype";

/// Fields requested for the abstract page.
const ABSTRACT_FIELDS: &str = "title,bibcode,author,keyword,pub,aff,volume,\
year,[citations],property,pubdate,abstract,esources,data";

/// Cookie name/value pairs captured from an upstream response.
pub type SetCookies = Vec<(String, String)>;

/// ADS API client.
///
/// Cheap to clone; the inner `reqwest::Client` is an `Arc` around a
/// connection pool.
///
/// ## Usage
///
/// ```rust,ignore
/// let config = AppConfig::from_env()?;
/// let ads = AdsClient::new(&config)?;
///
/// let (auth, cookies) = ads.bootstrap(&CookieMap::new()).await?;
/// let (results, _) = ads.search(&auth, &cookies, "dark matter", DEFAULT_SORT, 0).await?;
/// ```
#[derive(Clone)]
pub struct AdsClient {
    /// Shared HTTP client with the configured timeout.
    http: Client,

    /// Resolved `accounts/bootstrap` URL.
    bootstrap_url: String,

    /// Resolved `search/query` URL.
    search_url: String,

    /// Resolved `export/bibtex` URL.
    export_url: String,

    /// Rows requested per search query.
    rows: u32,
}

impl AdsClient {
    /// Create a new client from the application configuration.
    pub fn new(config: &AppConfig) -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.api_timeout))
            .build()?;

        let base = config.ads_api_url.trim_end_matches('/');

        Ok(Self {
            http,
            bootstrap_url: format!("{}/accounts/bootstrap", base),
            search_url: format!("{}/search/query", base),
            export_url: format!("{}/export/bibtex", base),
            rows: config.search_rows,
        })
    }

    /// Fetch an anonymous token from the bootstrap endpoint.
    ///
    /// No `Authorization` header is sent; the bootstrap endpoint
    /// identifies returning visitors by cookie alone.
    pub async fn bootstrap(
        &self,
        cookies: &CookieMap,
    ) -> Result<(AuthToken, SetCookies), AppError> {
        debug!("Bootstrapping anonymous token");

        let mut request = self.http.get(&self.bootstrap_url);
        if let Some(header) = cookie_header(cookies) {
            request = request.header(COOKIE, header);
        }

        let response = request.send().await?.error_for_status()?;
        let set_cookies = collect_cookies(&response);
        let token: AuthToken = response.json().await?;

        Ok((token, set_cookies))
    }

    /// Execute a free-text search query.
    ///
    /// ## Arguments
    ///
    /// * `auth` - Current bootstrap token
    /// * `cookies` - Visitor's upstream cookies
    /// * `q` - Query string as typed by the user
    /// * `sort` - Sort order, see [`DEFAULT_SORT`]
    /// * `start` - Offset of the first row
    pub async fn search(
        &self,
        auth: &AuthToken,
        cookies: &CookieMap,
        q: &str,
        sort: &str,
        start: u64,
    ) -> Result<(SearchResponse, SetCookies), AppError> {
        debug!(query = q, sort, start, "Running search query");

        let rows = self.rows.to_string();
        let start = start.to_string();
        let params = [
            ("fl", SEARCH_FIELDS),
            ("q", q),
            ("rows", rows.as_str()),
            ("sort", sort),
            ("start", start.as_str()),
        ];

        self.query(auth, cookies, &params).await
    }

    /// Fetch the records citing a bibcode, abstracts included.
    ///
    /// This drives the abstract page: the upstream query is
    /// `citations(bibcode:<code>)` with the abstract field list.
    pub async fn citations(
        &self,
        auth: &AuthToken,
        cookies: &CookieMap,
        bibcode: &str,
    ) -> Result<(SearchResponse, SetCookies), AppError> {
        debug!(bibcode, "Running citations query");

        let q = format!("citations(bibcode:{})", bibcode);
        let params = [
            ("fl", ABSTRACT_FIELDS),
            ("q", q.as_str()),
            ("rows", "25"),
            ("sort", "date desc"),
            ("start", "0"),
        ];

        self.query(auth, cookies, &params).await
    }

    /// Export records as BibTeX.
    ///
    /// ## Request body
    ///
    /// ```json
    /// {"bibcode": ["2019ApJ...123..456A"]}
    /// ```
    pub async fn export_bibtex(
        &self,
        auth: &AuthToken,
        cookies: &CookieMap,
        bibcodes: &[String],
    ) -> Result<(ExportResponse, SetCookies), AppError> {
        debug!(count = bibcodes.len(), "Exporting BibTeX");

        let body = serde_json::json!({ "bibcode": bibcodes });

        let mut request = self
            .http
            .post(&self.export_url)
            .header(AUTHORIZATION, bearer(auth))
            .json(&body);
        if let Some(header) = cookie_header(cookies) {
            request = request.header(COOKIE, header);
        }

        let response = request.send().await?.error_for_status()?;
        let set_cookies = collect_cookies(&response);
        let export: ExportResponse = response.json().await?;

        Ok((export, set_cookies))
    }

    /// Issue an authenticated GET against `search/query`.
    async fn query(
        &self,
        auth: &AuthToken,
        cookies: &CookieMap,
        params: &[(&str, &str)],
    ) -> Result<(SearchResponse, SetCookies), AppError> {
        let mut request = self
            .http
            .get(&self.search_url)
            .query(params)
            .header(AUTHORIZATION, bearer(auth));
        if let Some(header) = cookie_header(cookies) {
            request = request.header(COOKIE, header);
        }

        let response = request.send().await?.error_for_status()?;
        let set_cookies = collect_cookies(&response);
        let results: SearchResponse = response.json().await?;

        Ok((results, set_cookies))
    }
}

/// Format the `Authorization` header value.
///
/// The upstream expects `Bearer:<token>`, colon included.
fn bearer(auth: &AuthToken) -> String {
    format!("Bearer:{}", auth.access_token)
}

/// Build a `Cookie` header from the stored pairs, or `None` when the
/// jar is empty.
fn cookie_header(cookies: &CookieMap) -> Option<String> {
    if cookies.is_empty() {
        return None;
    }

    Some(
        cookies
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect::<Vec<_>>()
            .join("; "),
    )
}

/// Extract cookie pairs from the `Set-Cookie` headers of a response.
///
/// Only the leading `name=value` segment matters; attributes are
/// dropped. Pairs with an empty value are still returned so the
/// session layer can remove the cookie (that is how upstream clears
/// an expired cookie).
fn collect_cookies(response: &Response) -> SetCookies {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|header| header.to_str().ok())
        .filter_map(|raw| {
            let pair = raw.split(';').next()?;
            let (name, value) = pair.split_once('=')?;
            let name = name.trim();
            if name.is_empty() {
                return None;
            }
            Some((name.to_string(), value.trim().to_string()))
        })
        .collect()
}
