//! # Results Service
//!
//! Reshaping of raw Solr responses before they reach a template.
//!
//! The only transformation is author-list truncation: long author
//! lists are cut to the first three entries with an `" and N more"`
//! tail entry carrying the count of removed names.

use crate::models::SolrDoc;

/// Maximum authors displayed per record.
pub const AUTHOR_LIMIT: usize = 3;

/// Truncate the author lists of a page of documents in place.
pub fn truncate_authors(docs: &mut [SolrDoc]) {
    for doc in docs {
        truncate_author_list(&mut doc.author);
    }
}

/// Cut an author list to [`AUTHOR_LIMIT`] entries.
///
/// Lists at or under the limit are untouched. Longer lists keep the
/// first three authors and gain a final `" and N more"` entry, N being
/// the number of removed names.
pub fn truncate_author_list(authors: &mut Vec<String>) {
    if authors.len() > AUTHOR_LIMIT {
        let remainder = authors.len() - AUTHOR_LIMIT;
        authors.truncate(AUTHOR_LIMIT);
        authors.push(format!(" and {} more", remainder));
    }
}
