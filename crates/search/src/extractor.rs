//! Pulls the Summary or Text field back out of rendered search records.
//!
//! A value starts after any `Summary:` / `Text:` marker, wherever it sits on a
//! line, and runs until a newline followed by any recognized field marker
//! (`Title:`, `URL:`, `Score:`, `Published Date:`, `Author:`, `Highlights:`,
//! `Summary:`, `Text:`) or the end of the input.
//!
//! Marker-like text is not special-cased: a content line starting with one of
//! those markers cuts the value short, and a `Summary:` inside some other field
//! starts a value of its own.

use regex::Regex;
use std::sync::LazyLock;

use crate::client::ContentMode;

/// Separator placed between extracted values.
pub const SEGMENT_DELIMITER: &str = "\n---\n";

static SUMMARY_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Summary:").expect("summary marker pattern"));

static TEXT_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Text:").expect("text marker pattern"));

static FIELD_TERMINATOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\n(?:Title|URL|Score|Published Date|Author|Highlights|Summary|Text):")
        .expect("field terminator pattern")
});

/// Extract every value of the given content field, trimmed and joined with
/// [`SEGMENT_DELIMITER`], one segment per marker (empty values included).
/// No matches gives `""`.
pub fn extract_field(raw: &str, field: ContentMode) -> String {
    let marker = match field {
        ContentMode::Summary => &*SUMMARY_MARKER,
        ContentMode::Text => &*TEXT_MARKER,
    };

    let mut values = Vec::new();
    let mut cursor = 0;

    while let Some(found) = marker.find_at(raw, cursor) {
        let value_start = found.end();
        let value_end = FIELD_TERMINATOR
            .find_at(raw, value_start)
            .map(|m| m.start())
            .unwrap_or(raw.len());

        values.push(raw[value_start..value_end].trim());

        cursor = value_end;
    }

    values.join(SEGMENT_DELIMITER)
}

pub fn extract_summaries(raw: &str) -> String {
    extract_field(raw, ContentMode::Summary)
}

pub fn extract_texts(raw: &str) -> String {
    extract_field(raw, ContentMode::Text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summaries_between_records() {
        let raw = "Summary: Foo bar.\nTitle: X\nSummary: Baz.\n";
        assert_eq!(extract_summaries(raw), "Foo bar.\n---\nBaz.");
    }

    #[test]
    fn test_no_markers_gives_empty_string() {
        assert_eq!(extract_summaries(""), "");
        assert_eq!(extract_summaries("Title: X\nURL: https://x.test\n"), "");
    }

    #[test]
    fn test_one_segment_per_record() {
        let mut raw = String::new();
        for i in 0..5 {
            raw.push_str(&format!(
                "Title: Doc {i}\nURL: https://example.test/{i}\nScore: 0.{i}\nPublished Date: 2024-01-0{i}\nAuthor: A\nSummary:   Summary number {i}.\nSecond line {i}.  \n\n"
            ));
        }

        let extracted = extract_summaries(&raw);
        let segments: Vec<&str> = extracted.split(SEGMENT_DELIMITER).collect();

        assert_eq!(segments.len(), 5);
        for (i, segment) in segments.iter().enumerate() {
            assert_eq!(*segment, format!("Summary number {i}.\nSecond line {i}."));
        }
    }

    #[test]
    fn test_value_runs_to_end_of_input() {
        assert_eq!(extract_summaries("Summary: last one without newline"), "last one without newline");
    }

    #[test]
    fn test_text_field() {
        let raw = "Title: A\nText: Full page body.\nSummary: short\n\nTitle: B\nText: Another body.\n";
        assert_eq!(extract_texts(raw), "Full page body.\n---\nAnother body.");
        assert_eq!(extract_summaries(raw), "short");
    }

    #[test]
    fn test_value_stops_at_any_known_marker() {
        let raw = "Summary: one\nHighlights: h\nSummary: two\nPublished Date: d\nSummary: three\nAuthor: z";
        assert_eq!(extract_summaries(raw), "one\n---\ntwo\n---\nthree");
    }

    #[test]
    fn test_marker_matches_mid_line() {
        let raw = "Score: 0.5 Summary: Foo.\nTitle: X\n";
        assert_eq!(extract_summaries(raw), "Foo.");
    }

    #[test]
    fn test_marker_inside_value_is_consumed() {
        let raw = "Summary: The report has a Title: section and a Summary: heading.\nURL: u";
        assert_eq!(
            extract_summaries(raw),
            "The report has a Title: section and a Summary: heading."
        );
    }

    #[test]
    fn test_marker_at_line_start_inside_content_truncates() {
        let raw = "Summary: First part\nAuthor: quoted in the body\nrest of body";
        assert_eq!(extract_summaries(raw), "First part");
    }

    #[test]
    fn test_empty_values_keep_their_segment() {
        let raw = "Summary:\nTitle: X\nSummary: kept\n";
        assert_eq!(extract_summaries(raw), "\n---\nkept");

        let raw = "Title: A\nSummary:   \nTitle: B\nSummary: Baz.\n";
        let extracted = extract_summaries(raw);
        assert_eq!(extracted, "\n---\nBaz.");
        assert_eq!(extracted.split(SEGMENT_DELIMITER).count(), 2);
    }
}
