pub mod dates;
pub mod io;
pub mod models;
pub mod stages;

pub use dates::{matching_rule, normalize_date, DateErrorKind, DateParseError};
pub use io::{
    convert_directory, parse_metadata_file, read_table, read_transcript, speaker_prefix,
    write_table, BatchConfig, BatchSummary, DocumentSummary,
};
pub use models::{DatePrecision, DateValue, DocumentRecord, TableRow, TranscriptTable};
pub use stages::{tabulate, tabulate_traced, Stage, TabulateContext, TabulateTrace};
