//! # Upstream Models
//!
//! Structures for the JSON documents returned by the ADS API: the
//! anonymous bootstrap token, Solr search responses, and the export
//! service response.
//!
//! Fields we do not render are still carried through the session (see
//! [`AuthToken::extra`]) so the stored record matches what the API
//! issued.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Anonymous credential issued by `GET accounts/bootstrap`.
///
/// ## Example JSON
///
/// ```json
/// {
///     "username": "anonymous@ads",
///     "scopes": ["execute-query", "store-query"],
///     "access_token": "7vIASALjYla1ddaFD6A258bH1KfyPiKQ7l5RBSi2",
///     "token_type": "Bearer",
///     "anonymous": true,
///     "expire_in": "2019-06-12T14:15:17.823482"
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthToken {
    /// Bearer token sent on every authenticated request.
    #[serde(default)]
    pub access_token: String,

    /// Naive timestamp (`%Y-%m-%dT%H:%M:%S%.f`) after which the token
    /// is no longer valid.
    #[serde(default)]
    pub expire_in: String,

    /// Account the token was issued for (`anonymous@ads`).
    #[serde(default)]
    pub username: String,

    /// Token type, `Bearer` for anonymous tokens.
    #[serde(default)]
    pub token_type: String,

    /// Whether this is an anonymous credential.
    #[serde(default)]
    pub anonymous: bool,

    /// OAuth scopes granted to the token.
    #[serde(default)]
    pub scopes: Vec<String>,

    /// Remaining bootstrap fields (client id/secret, refresh token,
    /// rate limit), kept verbatim in the session record.
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

/// Envelope of a `search/query` response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchResponse {
    /// The Solr result block.
    #[serde(default)]
    pub response: SolrResponse,
}

/// Solr result block: hit count plus the page of documents.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SolrResponse {
    /// Total number of matching records.
    #[serde(rename = "numFound", default)]
    pub num_found: u64,

    /// Offset of the first returned record.
    #[serde(default)]
    pub start: u64,

    /// The returned page of documents.
    #[serde(default)]
    pub docs: Vec<SolrDoc>,
}

/// One bibliographic record as returned by Solr.
///
/// Solr omits fields a record does not have, so everything defaults.
/// Multi-valued fields (title, author, keyword, doi, page) arrive as
/// arrays even when they hold a single entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SolrDoc {
    /// 19-character bibcode identifying the record.
    #[serde(default)]
    pub bibcode: String,

    /// Title segments.
    #[serde(default)]
    pub title: Vec<String>,

    /// Author list, `Last, First` per entry.
    #[serde(default)]
    pub author: Vec<String>,

    /// Keywords attached to the record.
    #[serde(default)]
    pub keyword: Vec<String>,

    /// Publication name.
    #[serde(rename = "pub", default)]
    pub publication: String,

    /// Publication date, `YYYY-MM-00` style.
    #[serde(default)]
    pub pubdate: String,

    /// Publication year.
    #[serde(default)]
    pub year: String,

    /// Abstract text.
    #[serde(rename = "abstract", default)]
    pub abstract_text: String,

    /// DOIs attached to the record.
    #[serde(default)]
    pub doi: Vec<String>,

    /// Volume number.
    #[serde(default)]
    pub volume: String,

    /// Page range segments.
    #[serde(default)]
    pub page: Vec<String>,

    /// Number of citations known to ADS.
    #[serde(default)]
    pub citation_count: u64,

    /// Record type (`article`, `eprint`, ...).
    #[serde(default)]
    pub doctype: String,
}

/// Response of `POST export/bibtex`.
///
/// ## Example JSON
///
/// ```json
/// {
///     "export": "@ARTICLE{2019ApJ...123..456A, ...}",
///     "msg": "Retrieved 1 abstracts, starting with number 1."
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportResponse {
    /// The rendered citation block.
    #[serde(default)]
    pub export: String,

    /// Informational message from the export service.
    #[serde(default)]
    pub msg: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_token_roundtrip_keeps_extra_fields() {
        let raw = r#"{
            "username": "anonymous@ads",
            "scopes": ["execute-query", "store-query"],
            "access_token": "tok",
            "token_type": "Bearer",
            "anonymous": true,
            "expire_in": "2019-06-12T14:15:17.823482",
            "refresh_token": "refresh",
            "ratelimit": 1.0
        }"#;

        let token: AuthToken = serde_json::from_str(raw).unwrap();
        assert_eq!(token.access_token, "tok");
        assert_eq!(token.expire_in, "2019-06-12T14:15:17.823482");
        assert!(token.anonymous);
        assert_eq!(token.scopes.len(), 2);
        assert!(token.extra.contains_key("refresh_token"));
        assert!(token.extra.contains_key("ratelimit"));

        // Survives a session store round trip
        let stored = serde_json::to_string(&token).unwrap();
        let reloaded: AuthToken = serde_json::from_str(&stored).unwrap();
        assert_eq!(reloaded.access_token, "tok");
        assert!(reloaded.extra.contains_key("refresh_token"));
    }

    #[test]
    fn test_solr_doc_tolerates_missing_fields() {
        let raw = r#"{
            "response": {
                "numFound": 2,
                "start": 0,
                "docs": [
                    {"bibcode": "2019ApJ...123..456A", "title": ["A title"]},
                    {"author": ["Doe, J."]}
                ]
            }
        }"#;

        let parsed: SearchResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.response.num_found, 2);
        assert_eq!(parsed.response.docs.len(), 2);
        assert_eq!(parsed.response.docs[0].bibcode, "2019ApJ...123..456A");
        assert!(parsed.response.docs[0].author.is_empty());
        assert!(parsed.response.docs[1].bibcode.is_empty());
    }

    #[test]
    fn test_pub_field_renames() {
        let raw = r#"{"pub": "The Astrophysical Journal", "abstract": "text"}"#;
        let doc: SolrDoc = serde_json::from_str(raw).unwrap();
        assert_eq!(doc.publication, "The Astrophysical Journal");
        assert_eq!(doc.abstract_text, "text");
    }
}
