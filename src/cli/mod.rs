mod terminal;

pub use terminal::TerminalView;

use std::fs::File;
use std::io::{self, BufRead, Read, Write};

use anyhow::{Context, Result};
use chrono::{TimeDelta, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use crate::application::{AppError, Orchestrator, Settings};
use crate::domain::{FormField, LedgerSnapshot, RawSubmission, format_amount};

/// Tally - a single-ledger bookkeeping form
#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "Record dated income and expenses and keep a running balance")]
#[command(version)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Seconds before error and success messages are cleared
    #[arg(long, default_value = "5", global = true)]
    pub clear_delay: u32,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fill in entries interactively, one field at a time
    Session,

    /// Submit every row of a CSV file (date,description,category,amount)
    Replay {
        /// Input file (stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

/// Counts and final ledger state after a session or replay.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub accepted: usize,
    pub rejected: usize,
    pub ledger: LedgerSnapshot,
}

/// Install the stderr log subscriber. `RUST_LOG` wins over `verbose`.
pub fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("tally={level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

impl Cli {
    pub fn settings(&self) -> Settings {
        Settings {
            clear_delay: TimeDelta::seconds(i64::from(self.clear_delay)),
        }
    }

    pub fn run(self) -> Result<()> {
        let settings = self.settings();

        match self.command {
            Commands::Session => {
                let stdin = io::stdin();
                let summary = run_session(stdin.lock(), io::stdout(), settings)?;
                tracing::info!(
                    accepted = summary.accepted,
                    rejected = summary.rejected,
                    "Session ended"
                );
            }

            Commands::Replay { input, format } => {
                let reader: Box<dyn Read> = match &input {
                    Some(path) => Box::new(
                        File::open(path).with_context(|| format!("Cannot open '{}'", path))?,
                    ),
                    None => Box::new(io::stdin()),
                };
                run_replay(reader, io::stdout(), format, settings)?;
            }
        }

        Ok(())
    }
}

/// Prompt for the four fields in order and submit them, until input ends.
pub fn run_session<R: BufRead, W: Write>(
    mut input: R,
    output: W,
    settings: Settings,
) -> Result<RunSummary> {
    let mut orchestrator = Orchestrator::new(TerminalView::new(output), settings);
    let (mut accepted, mut rejected) = (0, 0);

    'form: loop {
        for field in FormField::ALL {
            orchestrator.view_mut().prompt(field)?;
            let Some(value) = read_field(&mut input)? else {
                break 'form;
            };
            orchestrator.view_mut().set_field(field, value);
        }

        let raw = orchestrator.view().form().clone();
        if orchestrator.submit(&raw, Utc::now()).is_accepted() {
            accepted += 1;
        } else {
            rejected += 1;
        }
    }

    let ledger = orchestrator.ledger().snapshot();
    let out = orchestrator.view_mut().writer();
    writeln!(out)?;
    let count = ledger.entries.len();
    writeln!(
        out,
        "{} {}, balance {}",
        count,
        if count == 1 { "entry" } else { "entries" },
        format_amount(ledger.total_balance)
    )?;

    Ok(RunSummary {
        accepted,
        rejected,
        ledger,
    })
}

/// Read one line, without its line terminator. None at end of input.
/// Bytes that are not UTF-8 become U+FFFD and go on to validation.
fn read_field<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = Vec::new();
    if input.read_until(b'\n', &mut line).context("Failed to read input")? == 0 {
        return Ok(None);
    }
    if line.ends_with(b"\n") {
        line.pop();
        if line.ends_with(b"\r") {
            line.pop();
        }
    }
    Ok(Some(String::from_utf8_lossy(&line).into_owned()))
}

/// Submit every CSV record in order, then report the ledger.
///
/// Table output streams rows as they are accepted; JSON output prints only the
/// final snapshot.
pub fn run_replay<R: Read, W: Write>(
    reader: R,
    mut output: W,
    format: OutputFormat,
    settings: Settings,
) -> Result<RunSummary> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let (ledger, accepted, rejected) = match format {
        OutputFormat::Table => {
            let mut orchestrator = Orchestrator::new(TerminalView::new(&mut output), settings);
            let (accepted, rejected) = submit_records(&mut csv_reader, &mut orchestrator)?;
            (orchestrator.ledger().snapshot(), accepted, rejected)
        }
        OutputFormat::Json => {
            let mut orchestrator = Orchestrator::new(TerminalView::new(io::sink()), settings);
            let (accepted, rejected) = submit_records(&mut csv_reader, &mut orchestrator)?;
            (orchestrator.ledger().snapshot(), accepted, rejected)
        }
    };

    match format {
        OutputFormat::Table => {
            writeln!(output, "Accepted {}, rejected {}", accepted, rejected)?;
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut output, &ledger)?;
            writeln!(output)?;
        }
    }

    Ok(RunSummary {
        accepted,
        rejected,
        ledger,
    })
}

fn submit_records<R: Read, W: Write>(
    csv_reader: &mut csv::Reader<R>,
    orchestrator: &mut Orchestrator<TerminalView<W>>,
) -> Result<(usize, usize)> {
    let (mut accepted, mut rejected) = (0, 0);

    for (index, record) in csv_reader.deserialize::<RawSubmission>().enumerate() {
        let submission = match record {
            Ok(raw) => orchestrator.submit(&raw, Utc::now()),
            // A failing reader is not a bad row; stop instead of spinning on it.
            Err(err) if err.is_io_error() => {
                return Err(err).context("Failed to read CSV input");
            }
            Err(err) => orchestrator.reject(
                AppError::Input(format!("CSV record {}: {}", index + 1, err)),
                Utc::now(),
            ),
        };
        if submission.is_accepted() {
            accepted += 1;
        } else {
            rejected += 1;
        }
    }

    Ok((accepted, rejected))
}
