use std::sync::OnceLock;

use regex::Regex;

fn continuation_regex() -> &'static Regex {
    static CONTINUATION: OnceLock<Regex> = OnceLock::new();
    CONTINUATION.get_or_init(|| {
        Regex::new(r#"[ \t]*\n\s*([^"\s])"#).expect("Failed to compile continuation regex")
    })
}

fn utterance_regex() -> &'static Regex {
    static UTTERANCE: OnceLock<Regex> = OnceLock::new();
    UTTERANCE.get_or_init(|| {
        Regex::new(r#"(?m)",[ \t](.+)$"#).expect("Failed to compile utterance regex")
    })
}

fn line_start_whitespace_regex() -> &'static Regex {
    static LINE_START: OnceLock<Regex> = OnceLock::new();
    LINE_START.get_or_init(|| {
        Regex::new(r"(?m)^\s+").expect("Failed to compile line start regex")
    })
}

/// Join wrapped lines onto the row above
///
/// Every line break before a line that does not open with `"` becomes a
/// single space. Blank or whitespace-only lines in between (left behind by
/// tag-only lines) and trailing blanks on the row above are folded into that
/// space. Lines that open with `"` after indentation stay rows of their own.
pub fn rejoin_continuations(text: &str) -> String {
    continuation_regex().replace_all(text, " ${1}").into_owned()
}

/// Wrap the text after `"speaker", ` in its own quotes
///
/// Only the first `", ` on a line is the separator, so commas and quotes
/// later in the utterance stay inside the second field.
pub fn quote_utterances(text: &str) -> String {
    utterance_regex().replace_all(text, r#"","${1}""#).into_owned()
}

/// Strip whitespace at the start of every line
///
/// Whitespace-only lines are consumed along with the newline that ends them.
pub fn trim_line_starts(text: &str) -> String {
    line_start_whitespace_regex().replace_all(text, "").into_owned()
}
