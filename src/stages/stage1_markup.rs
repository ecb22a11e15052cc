use std::sync::OnceLock;

use regex::{Captures, Regex};

fn speaker_marker_regex() -> &'static Regex {
    static SPEAKER_MARKER: OnceLock<Regex> = OnceLock::new();
    SPEAKER_MARKER.get_or_init(|| {
        Regex::new(r"<\$([A-Z])>").expect("Failed to compile speaker marker regex")
    })
}

// Tag content may not contain `( @ | O )`, which keeps `<@>`, `<O>` and
// `</O>` style tags in the text. `<`, `>`, `"` and newlines are excluded so a
// match can never reach into a substituted speaker field.
fn annotation_tag_regex() -> &'static Regex {
    static ANNOTATION_TAG: OnceLock<Regex> = OnceLock::new();
    ANNOTATION_TAG.get_or_init(|| {
        Regex::new(r#"<[^<>"\n(@|O)]*>"#).expect("Failed to compile annotation tag regex")
    })
}

/// Replace each `<$X>` marker with `"{prefix}X",`
///
/// This is the only step that introduces column structure. The prefix is
/// inserted verbatim, so `$` or `\` in it are never treated as group
/// references.
pub fn replace_speaker_markers(text: &str, speaker_prefix: &str) -> String {
    speaker_marker_regex()
        .replace_all(text, |caps: &Captures| {
            format!("\"{}{}\",", speaker_prefix, &caps[1])
        })
        .into_owned()
}

/// Delete the remaining bracketed annotation tags
pub fn strip_annotation_tags(text: &str) -> String {
    annotation_tag_regex().replace_all(text, "").into_owned()
}

/// Count the speaker-turn markers present in raw transcript text
pub fn count_speaker_markers(text: &str) -> usize {
    speaker_marker_regex().find_iter(text).count()
}
