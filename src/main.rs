use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use icetab::{
    convert_directory, matching_rule, normalize_date, parse_metadata_file, read_table,
    read_transcript, tabulate, tabulate_traced, write_table, BatchConfig, DocumentSummary,
};

#[derive(Parser)]
#[command(name = "icetab")]
#[command(author, version, about = "ICE transcript tabulation and metadata date normalization", long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert one annotated transcript to a speaker,text table
    Tabulate {
        /// Raw transcript file
        #[arg(short, long)]
        input: PathBuf,

        /// Output CSV file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Speaker namespace prefix, e.g. arcp://name,ice/speaker/S1A-001#
        #[arg(short, long)]
        prefix: String,

        /// Print the text after every pipeline stage to stderr
        #[arg(long)]
        trace: bool,
    },

    /// Convert every transcript in a directory
    Batch {
        /// Directory of raw transcripts
        #[arg(long)]
        input_dir: PathBuf,

        /// Directory for the CSV tables
        #[arg(long)]
        output_dir: PathBuf,

        /// Namespace used in speaker prefixes
        #[arg(long, default_value = "ice")]
        namespace: String,

        /// Transcript file extension
        #[arg(long, default_value = "TXT")]
        extension: String,
    },

    /// Normalize metadata date strings
    Date {
        /// Date strings, e.g. 12/5/93 or 9/93?
        #[arg(required = true)]
        values: Vec<String>,

        /// Also print the rule each value matched
        #[arg(long)]
        explain: bool,
    },

    /// Summarize a per-document metadata file as JSON
    Metadata {
        /// Expanded JSON-LD metadata file
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Report row and speaker statistics of a tabulated transcript
    Analyze {
        /// Tabulated CSV file
        #[arg(short, long)]
        input: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        Commands::Tabulate {
            input,
            output,
            prefix,
            trace,
        } => tabulate_file(input, output, &prefix, trace),
        Commands::Batch {
            input_dir,
            output_dir,
            namespace,
            extension,
        } => {
            let config = BatchConfig {
                input_dir,
                output_dir,
                namespace,
                transcript_extension: extension,
            };
            let summary = convert_directory(&config).await?;
            for document in &summary.documents {
                println!(
                    "{}\t{} markers\t{} rows\t{}",
                    document.document_id,
                    document.markers,
                    document.lines.saturating_sub(1),
                    document.output_path.display()
                );
            }
            Ok(())
        }
        Commands::Date { values, explain } => normalize_dates(&values, explain),
        Commands::Metadata { input } => {
            let record = parse_metadata_file(&input)?;
            let summary = DocumentSummary::from_record(&record)?;
            println!("{}", summary.to_json()?);
            Ok(())
        }
        Commands::Analyze { input } => analyze_table(input),
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

fn tabulate_file(
    input: PathBuf,
    output: Option<PathBuf>,
    prefix: &str,
    trace: bool,
) -> Result<()> {
    info!("Loading transcript from {:?}", input);
    let raw = read_transcript(&input)?;

    let table = if trace {
        let traced = tabulate_traced(prefix, &raw);
        for (stage, text) in &traced.steps {
            eprintln!("--- {} ---\n{}", stage.name(), text);
        }
        traced.output().to_string()
    } else {
        tabulate(prefix, &raw)
    };

    match output {
        Some(path) => {
            write_table(&path, &table)?;
            info!(
                "Wrote {} rows to {:?}",
                table.lines().count().saturating_sub(1),
                path
            );
        }
        None => print!("{}", table),
    }

    Ok(())
}

fn normalize_dates(values: &[String], explain: bool) -> Result<()> {
    for value in values {
        let date = normalize_date(value).with_context(|| format!("Cannot normalize {:?}", value))?;
        if explain {
            let rule = matching_rule(value).unwrap_or("-");
            println!("{}\t{}\t{}", value, date, rule);
        } else {
            println!("{}\t{}", value, date);
        }
    }
    Ok(())
}

fn analyze_table(input: PathBuf) -> Result<()> {
    info!("Analyzing table from {:?}", input);
    let table = read_table(&input)?;

    println!("Table Analysis");
    println!("==============");
    println!("Rows: {}", table.rows.len());
    println!("Words: {}", table.word_count());
    println!();

    println!("Speakers");
    println!("--------");
    for speaker in table.speakers() {
        let words: usize = table
            .rows
            .iter()
            .filter(|r| r.speaker == speaker)
            .map(|r| r.text.split_whitespace().count())
            .sum();
        println!(
            "{}: {} rows, {} words",
            speaker,
            table.rows_for(speaker),
            words
        );
    }

    Ok(())
}
