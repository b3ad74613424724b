//! # Utilities Module
//!
//! Helper functions shared across handlers and view construction.

/// Length of an ADS bibcode (`YYYYJJJJJVVVVMPPPPA`).
pub const BIBCODE_LEN: usize = 19;

/// Validate a bibcode.
///
/// Only the length is checked; the API is the authority on whether the
/// code resolves to a record. Wrong-length codes never reach the API.
///
/// ## Examples
///
/// ```rust,ignore
/// assert!(is_valid_bibcode("2019ApJ...123..456A"));
/// assert!(!is_valid_bibcode("2019ApJ"));
/// ```
pub fn is_valid_bibcode(bibcode: &str) -> bool {
    bibcode.chars().count() == BIBCODE_LEN
}

/// Join a multi-valued Solr field into one display string.
///
/// Empty entries are skipped so a record with blank segments does not
/// render stray separators.
pub fn join_field(values: &[String], separator: &str) -> String {
    values
        .iter()
        .filter(|v| !v.is_empty())
        .cloned()
        .collect::<Vec<_>>()
        .join(separator)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_bibcode() {
        // Real-shaped bibcode
        assert!(is_valid_bibcode("2019ApJ...123..456A"));

        // Too short
        assert!(!is_valid_bibcode("2019ApJ"));

        // Too long
        assert!(!is_valid_bibcode("2019ApJ...123..456AB"));

        // Length counts characters, not bytes
        assert!(is_valid_bibcode("2019ApJ...123..456Å"));
    }

    #[test]
    fn test_join_field() {
        let values = vec!["one".to_string(), String::new(), "two".to_string()];
        assert_eq!(join_field(&values, ", "), "one, two");
        assert_eq!(join_field(&[], ", "), "");
    }
}
