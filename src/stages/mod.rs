pub mod stage0_normalize;
pub mod stage1_markup;
pub mod stage2_rows;

pub use stage0_normalize::*;
pub use stage1_markup::*;
pub use stage2_rows::*;

use tracing::{debug, trace};

/// Inputs shared by every stage of a tabulation run
#[derive(Debug, Clone)]
pub struct TabulateContext {
    /// Namespace prefix joined to the speaker letter in each speaker field
    pub speaker_prefix: String,
}

impl TabulateContext {
    pub fn new(speaker_prefix: impl Into<String>) -> Self {
        Self {
            speaker_prefix: speaker_prefix.into(),
        }
    }
}

/// One text rewrite of the tabulation pipeline
///
/// Each stage consumes the output of the one before it. Reordering them
/// changes the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Prepend `speaker,text` and remove `\r`
    Header,
    /// Remove `<&>...</&>` spans, across lines
    StripOverlaps,
    /// Delete runs of two or more newlines
    CollapseBlankRuns,
    /// `<$X>` becomes `"{prefix}X",`
    SpeakerMarkers,
    /// Drop the remaining annotation tags
    StripTags,
    /// Join wrapped lines onto their row
    RejoinContinuations,
    /// Quote the utterance after the speaker field
    QuoteUtterances,
    /// Strip leading whitespace on every line
    TrimLineStarts,
}

impl Stage {
    /// All stages in execution order
    pub const ALL: [Stage; 8] = [
        Stage::Header,
        Stage::StripOverlaps,
        Stage::CollapseBlankRuns,
        Stage::SpeakerMarkers,
        Stage::StripTags,
        Stage::RejoinContinuations,
        Stage::QuoteUtterances,
        Stage::TrimLineStarts,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Stage::Header => "header",
            Stage::StripOverlaps => "strip_overlaps",
            Stage::CollapseBlankRuns => "collapse_blank_runs",
            Stage::SpeakerMarkers => "speaker_markers",
            Stage::StripTags => "strip_tags",
            Stage::RejoinContinuations => "rejoin_continuations",
            Stage::QuoteUtterances => "quote_utterances",
            Stage::TrimLineStarts => "trim_line_starts",
        }
    }

    /// Run this stage over `text`
    pub fn apply(&self, ctx: &TabulateContext, text: &str) -> String {
        match self {
            Stage::Header => add_header(text),
            Stage::StripOverlaps => strip_overlap_spans(text),
            Stage::CollapseBlankRuns => collapse_blank_runs(text),
            Stage::SpeakerMarkers => replace_speaker_markers(text, &ctx.speaker_prefix),
            Stage::StripTags => strip_annotation_tags(text),
            Stage::RejoinContinuations => rejoin_continuations(text),
            Stage::QuoteUtterances => quote_utterances(text),
            Stage::TrimLineStarts => trim_line_starts(text),
        }
    }
}

/// Intermediate text recorded after each stage
#[derive(Debug, Clone)]
pub struct TabulateTrace {
    /// `(stage, text after the stage)` in execution order
    pub steps: Vec<(Stage, String)>,
}

impl TabulateTrace {
    /// The finished table
    pub fn output(&self) -> &str {
        self.steps.last().map(|(_, text)| text.as_str()).unwrap_or("")
    }

    /// Text as it stood after `stage`
    pub fn after(&self, stage: Stage) -> Option<&str> {
        self.steps
            .iter()
            .find(|(s, _)| *s == stage)
            .map(|(_, text)| text.as_str())
    }
}

/// Convert annotated transcript text to a `speaker,text` table
///
/// Never fails: malformed markup passes through as best-effort text.
pub fn tabulate(speaker_prefix: &str, raw_text: &str) -> String {
    let ctx = TabulateContext::new(speaker_prefix);
    let markers = count_speaker_markers(raw_text);

    let table = Stage::ALL
        .iter()
        .fold(raw_text.to_string(), |text, stage| {
            let next = stage.apply(&ctx, &text);
            trace!(stage = stage.name(), bytes = next.len(), "stage applied");
            next
        });

    debug!(
        "Tabulated {} speaker markers into {} lines",
        markers,
        table.lines().count()
    );
    table
}

/// Run the pipeline and keep every intermediate result
pub fn tabulate_traced(speaker_prefix: &str, raw_text: &str) -> TabulateTrace {
    let ctx = TabulateContext::new(speaker_prefix);
    let mut steps = Vec::with_capacity(Stage::ALL.len());
    let mut text = raw_text.to_string();

    for stage in Stage::ALL {
        text = stage.apply(&ctx, &text);
        steps.push((stage, text.clone()));
    }

    TabulateTrace { steps }
}
