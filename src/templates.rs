//! # Templates Module
//!
//! Typed askama templates for every page plus the view model derived
//! from upstream documents. Handlers fill these structs and render
//! them to HTML; no raw JSON reaches a template.

use askama::Template;

use crate::models::SolrDoc;
use crate::utils::join_field;

/// One record prepared for display.
///
/// Multi-valued Solr fields are joined into single strings here so
/// the templates only print.
pub struct DocView {
    /// Bibcode, used for the abstract and export links.
    pub bibcode: String,

    /// Joined title segments.
    pub title: String,

    /// Joined (already truncated) author list.
    pub authors: String,

    /// Publication name.
    pub publication: String,

    /// Publication date.
    pub pubdate: String,

    /// Abstract text, may be empty.
    pub abstract_text: String,

    /// Citation count known to ADS.
    pub citation_count: u64,
}

impl From<SolrDoc> for DocView {
    fn from(doc: SolrDoc) -> Self {
        let title = if doc.title.is_empty() {
            doc.bibcode.clone()
        } else {
            join_field(&doc.title, "; ")
        };

        Self {
            bibcode: doc.bibcode,
            title,
            authors: join_field(&doc.author, ", "),
            publication: doc.publication,
            pubdate: doc.pubdate,
            abstract_text: doc.abstract_text,
            citation_count: doc.citation_count,
        }
    }
}

/// The search page, with or without results.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage {
    /// Query echoed back into the form field.
    pub query: String,

    /// Whether a search ran for this render.
    pub searched: bool,

    /// Total number of matching records upstream.
    pub num_found: u64,

    /// The rendered page of results.
    pub docs: Vec<DocView>,
}

impl IndexPage {
    /// The empty search form.
    pub fn blank(query: String) -> Self {
        Self {
            query,
            searched: false,
            num_found: 0,
            docs: Vec::new(),
        }
    }
}

/// The abstract page: records citing one bibcode.
#[derive(Template)]
#[template(path = "abstract.html")]
pub struct AbstractPage {
    /// The bibcode the page is keyed by.
    pub bibcode: String,

    /// Total number of citing records upstream.
    pub num_found: u64,

    /// The rendered page of citing records.
    pub docs: Vec<DocView>,
}

/// The export page: a BibTeX citation block.
#[derive(Template)]
#[template(path = "export.html")]
pub struct ExportPage {
    /// The exported bibcode.
    pub bibcode: String,

    /// The citation text as returned by the export service.
    pub export: String,
}

/// The error page rendered by [`crate::error::AppError`].
#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorPage {
    /// HTTP status code of the failure.
    pub status: u16,

    /// Human-readable error message.
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_doc_view_joins_fields() {
        let doc = SolrDoc {
            bibcode: "2019ApJ...123..456A".to_string(),
            title: vec!["Part one".to_string(), "Part two".to_string()],
            author: vec!["Adams, A.".to_string(), "Brown, B.".to_string()],
            ..SolrDoc::default()
        };

        let view = DocView::from(doc);
        assert_eq!(view.title, "Part one; Part two");
        assert_eq!(view.authors, "Adams, A., Brown, B.");
    }

    #[test]
    fn test_doc_view_falls_back_to_bibcode_title() {
        let doc = SolrDoc {
            bibcode: "2019ApJ...123..456A".to_string(),
            ..SolrDoc::default()
        };

        let view = DocView::from(doc);
        assert_eq!(view.title, "2019ApJ...123..456A");
    }

    #[test]
    fn test_pages_render() {
        let page = IndexPage::blank(String::new());
        assert!(page.render().unwrap().contains("<form"));

        let page = ErrorPage {
            status: 502,
            message: "upstream failed".to_string(),
        };
        let html = page.render().unwrap();
        assert!(html.contains("502"));
        assert!(html.contains("upstream failed"));
    }

    #[test]
    fn test_results_render_escaped() {
        let page = IndexPage {
            query: "<script>".to_string(),
            searched: true,
            num_found: 1,
            docs: vec![DocView {
                bibcode: "2019ApJ...123..456A".to_string(),
                title: "A <b>title</b>".to_string(),
                authors: "Adams, A.".to_string(),
                publication: String::new(),
                pubdate: String::new(),
                abstract_text: String::new(),
                citation_count: 0,
            }],
        };

        let html = page.render().unwrap();
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;b&gt;title&lt;/b&gt;"));
    }
}
