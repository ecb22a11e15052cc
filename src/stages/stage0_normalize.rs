use std::sync::OnceLock;

use regex::Regex;

/// Header row that opens every tabulated transcript
pub const HEADER: &str = "speaker,text";

fn overlap_span_regex() -> &'static Regex {
    static OVERLAP_SPAN: OnceLock<Regex> = OnceLock::new();
    OVERLAP_SPAN.get_or_init(|| {
        Regex::new(r"(?s)<&>.*?</&>").expect("Failed to compile overlap span regex")
    })
}

fn blank_run_regex() -> &'static Regex {
    static BLANK_RUN: OnceLock<Regex> = OnceLock::new();
    BLANK_RUN.get_or_init(|| Regex::new(r"\n\n+").expect("Failed to compile blank run regex"))
}

/// Prepend the header row and drop carriage returns
///
/// Postcondition: output starts with `speaker,text\n` and contains no `\r`.
pub fn add_header(text: &str) -> String {
    format!("{}\n{}", HEADER, text.replace('\r', ""))
}

/// Remove every `<&>...</&>` span, markers included
///
/// Matching is non-greedy and crosses line breaks, so two spans on the same
/// line are removed independently and the text between them survives.
pub fn strip_overlap_spans(text: &str) -> String {
    overlap_span_regex().replace_all(text, "").into_owned()
}

/// Collapse runs of two or more newlines to nothing
///
/// The run is deleted outright, not reduced to a single newline, so the
/// lines on either side of a blank run end up joined.
pub fn collapse_blank_runs(text: &str) -> String {
    blank_run_regex().replace_all(text, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_header_strips_carriage_returns() {
        let out = add_header("<$A> one\r\n<$B> two\r\n");
        assert_eq!(out, "speaker,text\n<$A> one\n<$B> two\n");
    }

    #[test]
    fn test_strip_overlap_span_on_one_line() {
        let out = strip_overlap_spans("keep <&> drop this </&> also keep");
        assert_eq!(out, "keep  also keep");
    }

    #[test]
    fn test_strip_overlap_span_across_lines() {
        let out = strip_overlap_spans("before <&> first\nsecond\nthird </&> after");
        assert_eq!(out, "before  after");
    }

    #[test]
    fn test_strip_overlap_spans_is_non_greedy() {
        let out = strip_overlap_spans("a <&>x</&> b <&>y</&> c");
        assert_eq!(out, "a  b  c");
    }

    #[test]
    fn test_unclosed_overlap_span_is_left_alone() {
        let out = strip_overlap_spans("a <&> never closed");
        assert_eq!(out, "a <&> never closed");
    }

    #[test]
    fn test_collapse_blank_runs_deletes_the_run() {
        assert_eq!(collapse_blank_runs("a\n\nb"), "ab");
        assert_eq!(collapse_blank_runs("a\n\n\n\nb\nc"), "ab\nc");
        assert_eq!(collapse_blank_runs("a\nb"), "a\nb");
    }
}
