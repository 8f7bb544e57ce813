//! Search text derivation and query term extraction.
//!
//! Both sides of a search go through the same word splitting: a note's
//! search text is tokenized by SQLite's `porter unicode61` tokenizer, and
//! query text is only cut at whitespace here before FTS5 tokenizes each
//! quoted chunk with that same tokenizer.

use crate::domain::NoteContent;

/// Builds the searchable text of a note.
///
/// Title, type, description and the present task fields are joined with a
/// single space. Absent fields contribute nothing, and so do fields that are
/// empty after trimming.
pub fn derive_search_text(content: &NoteContent) -> String {
    let parts = [
        Some(content.title()),
        Some(content.note_type()),
        Some(content.description()),
        content.completion_time(),
        content.completion_date(),
        content.status(),
        content.delegation(),
    ];

    parts
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Splits query text into whitespace-separated chunks.
///
/// Chunks with no letter or digit are dropped. Tokenizing inside a chunk is
/// left to FTS5, so a chunk like `trip-plan` or a word carrying combining
/// marks is split exactly the way the indexed text was.
pub fn query_terms(query: &str) -> Vec<&str> {
    query
        .split_whitespace()
        .filter(|chunk| chunk.chars().any(char::is_alphanumeric))
        .collect()
}

/// Builds an FTS5 `MATCH` expression requiring every chunk.
///
/// Each chunk becomes an FTS5 string literal, so user input is never read
/// as an operator, column filter or prefix query. Returns `None` when the
/// query has no terms, which callers treat as an empty result rather than
/// an error.
pub fn match_expression(query: &str) -> Option<String> {
    let terms = query_terms(query);
    if terms.is_empty() {
        return None;
    }

    Some(
        terms
            .iter()
            .map(|term| format!("\"{}\"", term.replace('"', "\"\"")))
            .collect::<Vec<_>>()
            .join(" AND "),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn derive_joins_required_fields() {
        let content = NoteContent::builder("Trip plan")
            .note_type("task")
            .description("Pack bags")
            .build()
            .unwrap();
        assert_eq!(derive_search_text(&content), "Trip plan task Pack bags");
    }

    #[test]
    fn derive_skips_absent_optional_fields() {
        let content = NoteContent::builder("Trip plan").build().unwrap();
        let text = derive_search_text(&content);
        assert_eq!(text, "Trip plan");
        assert!(!text.contains("null"));
        assert!(!text.contains("None"));
    }

    #[test]
    fn derive_includes_present_optional_fields_in_order() {
        let content = NoteContent::builder("Report")
            .note_type("task")
            .description("Quarterly numbers")
            .completion_time(Some("17:00".into()))
            .completion_date(Some("2024-03-01".into()))
            .status(Some("open".into()))
            .delegation(Some("BIGCAT".into()))
            .build()
            .unwrap();

        assert_eq!(
            derive_search_text(&content),
            "Report task Quarterly numbers 17:00 2024-03-01 open BIGCAT"
        );
    }

    #[test]
    fn derive_ignores_blank_fields() {
        let content = NoteContent::builder("Report")
            .description("   ")
            .status(Some(String::new()))
            .build()
            .unwrap();
        assert_eq!(derive_search_text(&content), "Report");
    }

    #[test]
    fn query_terms_split_on_whitespace_only() {
        assert_eq!(query_terms("  Trip-plan,\tpack! "), vec!["Trip-plan,", "pack!"]);
    }

    #[test]
    fn query_terms_keep_combining_marks_inside_a_word() {
        assert_eq!(query_terms("nai\u{0308}ve"), vec!["nai\u{0308}ve"]);
    }

    #[test]
    fn query_terms_drop_chunks_without_letters_or_digits() {
        assert_eq!(query_terms("-- trip * !!"), vec!["trip"]);
    }

    #[test]
    fn match_expression_quotes_and_ands_chunks() {
        assert_eq!(
            match_expression("Trip plan").as_deref(),
            Some("\"Trip\" AND \"plan\"")
        );
    }

    #[test]
    fn match_expression_escapes_embedded_quotes() {
        assert_eq!(
            match_expression("title:\"bags\" OR").as_deref(),
            Some("\"title:\"\"bags\"\"\" AND \"OR\"")
        );
    }

    #[test]
    fn match_expression_is_none_for_blank_query() {
        assert_eq!(match_expression(""), None);
        assert_eq!(match_expression("   "), None);
        assert_eq!(match_expression("!!! --"), None);
    }
}
