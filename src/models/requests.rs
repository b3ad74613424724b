//! # Request Models
//!
//! Structures for incoming request bodies. The search page is the only
//! route that accepts a body: a classic form POST.

use serde::{Deserialize, Serialize};

/// The search form submitted from the index page.
///
/// ## Example body
///
/// ```text
/// query=dark+matter
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryForm {
    /// The free-text search query.
    #[serde(default)]
    pub query: String,

    /// Optional sort override. When absent the handler falls back to
    /// the default sort order (`date desc, bibcode desc`).
    #[serde(default)]
    pub sort: Option<String>,
}
