// shears - headless spreadsheet column cleaning and schema matching

mod exit_codes;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use shears_recon::{reconcile, Session};
use shears_table::{ColumnSelection, Table};

use exit_codes::{EXIT_DECODE, EXIT_ENCODE, EXIT_IO, EXIT_SCHEMA_DIFFS, EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "shears")]
#[command(about = "Spreadsheet column cleaning and schema matching (headless)")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List a file's column positions and header labels
    #[command(after_help = "\
Examples:
  shears headers data.xlsx
  shears headers data.csv --json")]
    Headers {
        /// Input file (csv, tsv, xlsx, xlsm, xls, xlsb, ods)
        input: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Remove columns and write the cleaned file
    #[command(after_help = "\
Columns can be dropped by 1-based position, position range, or header
name (case-insensitive; a duplicated name drops its first occurrence).

Examples:
  shears clean data.xlsx --drop 2 -o cleaned.xlsx
  shears clean data.xlsx --drop 2-4 --drop 7 -o cleaned.xlsx
  shears clean data.csv --drop 'Internal Ref,Notes' -o cleaned.csv")]
    Clean {
        input: PathBuf,

        /// Columns to delete. Repeatable; comma-separated accepted.
        #[arg(long, value_name = "COLS")]
        drop: Vec<String>,

        /// Output file (format inferred from extension)
        #[arg(long, short = 'o')]
        output: PathBuf,

        /// Suppress stderr notes
        #[arg(long, short = 'q')]
        quiet: bool,
    },

    /// Align a follow-up file's columns to a cleaned file's header set
    #[command(after_help = "\
Keeps the columns common to both files, reordered to the reference
order. Missing/extra headers and duplicate-label resolutions are
reported on stderr; they are warnings, not failures.

Examples:
  shears match cleaned.xlsx followup.xlsx -o matched.xlsx
  shears match cleaned.csv followup.csv -o matched.csv --json")]
    Match {
        /// Reference file (output of a prior clean)
        reference: PathBuf,

        /// Candidate file to align
        candidate: PathBuf,

        /// Output file (format inferred from extension)
        #[arg(long, short = 'o')]
        output: PathBuf,

        /// Print the reconciliation report as JSON on stdout
        #[arg(long)]
        json: bool,

        /// Suppress stderr warnings and notes
        #[arg(long, short = 'q')]
        quiet: bool,
    },

    /// Report schema differences without writing anything (exit 1 = schemas differ)
    #[command(after_help = "\
Examples:
  shears compare cleaned.xlsx followup.xlsx
  shears compare cleaned.csv followup.csv --json")]
    Compare {
        reference: PathBuf,
        candidate: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Headers { input, json } => cmd_headers(&input, json),
        Commands::Clean {
            input,
            drop,
            output,
            quiet,
        } => cmd_clean(&input, &drop, &output, quiet),
        Commands::Match {
            reference,
            candidate,
            output,
            json,
            quiet,
        } => cmd_match(&reference, &candidate, &output, json, quiet),
        Commands::Compare {
            reference,
            candidate,
            json,
        } => cmd_compare(&reference, &candidate, json),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError {
            code,
            message,
            hint,
        }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn args(msg: impl Into<String>) -> Self {
        Self {
            code: EXIT_USAGE,
            message: msg.into(),
            hint: None,
        }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self {
            code: EXIT_IO,
            message: msg.into(),
            hint: None,
        }
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self {
            code: EXIT_DECODE,
            message: msg.into(),
            hint: None,
        }
    }

    pub fn encode(msg: impl Into<String>) -> Self {
        Self {
            code: EXIT_ENCODE,
            message: msg.into(),
            hint: None,
        }
    }

    /// `compare` found differences; no message, just the exit code.
    pub fn diffs() -> Self {
        Self {
            code: EXIT_SCHEMA_DIFFS,
            message: String::new(),
            hint: None,
        }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

// ============================================================================
// File IO
// ============================================================================

#[derive(Clone, Copy, PartialEq, Eq)]
enum Format {
    Csv,
    Tsv,
    Excel,
}

fn infer_format(path: &Path) -> Result<Format, CliError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());

    match ext.as_deref() {
        Some("csv") => Ok(Format::Csv),
        Some("tsv") => Ok(Format::Tsv),
        Some("xlsx") | Some("xlsm") | Some("xls") | Some("xlsb") | Some("ods") => Ok(Format::Excel),
        _ => Err(CliError::args(format!(
            "cannot infer format from extension {:?}",
            ext.as_deref().unwrap_or("(none)")
        ))
        .with_hint("supported extensions: csv, tsv, xlsx, xlsm, xls, xlsb, ods")),
    }
}

fn read_table(path: &Path) -> Result<Table, CliError> {
    let format = infer_format(path)?;
    let bytes = std::fs::read(path)
        .map_err(|e| CliError::io(format!("{}: {}", path.display(), e)))?;

    let table = match format {
        Format::Csv => shears_io::csv::decode(&bytes),
        Format::Tsv => shears_io::csv::decode_with_delimiter(&bytes, b'\t'),
        Format::Excel => shears_io::xlsx::decode(&bytes),
    }
    .map_err(|e| CliError::decode(format!("{}: {}", path.display(), e)))?;

    // CSV carries no sheet name; use the file stem so output suffixes read well
    if format == Format::Excel {
        Ok(table)
    } else {
        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("Sheet1");
        Ok(table.with_name(stem))
    }
}

fn write_table(table: &Table, path: &Path) -> Result<(), CliError> {
    let format = infer_format(path)?;
    let bytes = match format {
        Format::Csv => shears_io::csv::encode(table),
        Format::Tsv => shears_io::csv::encode_tsv(table),
        Format::Excel => shears_io::xlsx::encode(table),
    }
    .map_err(CliError::encode)?;

    std::fs::write(path, &bytes).map_err(|e| CliError::io(format!("{}: {}", path.display(), e)))
}

// ============================================================================
// --drop parsing
// ============================================================================

fn parse_drop_args(drop_args: &[String]) -> Vec<String> {
    drop_args
        .iter()
        .flat_map(|arg| arg.split(','))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Resolve drop tokens (positions, ranges, header names) to a selection.
///
/// Positions and ranges are tried first, so a header literally named "2"
/// or "2-4" must be dropped by its position instead.
fn resolve_drop_tokens(
    tokens: &[String],
    headers: &[String],
) -> Result<ColumnSelection, CliError> {
    let mut selection = ColumnSelection::new();

    for token in tokens {
        if let Ok(position) = token.parse::<usize>() {
            validate_position(position, headers.len(), token)?;
            selection.insert(position);
            continue;
        }

        if let Some((start, end)) = token.split_once('-') {
            if let (Ok(start), Ok(end)) = (start.trim().parse::<usize>(), end.trim().parse::<usize>())
            {
                if start > end {
                    return Err(CliError::args(format!("empty range {:?}", token)));
                }
                validate_position(start, headers.len(), token)?;
                validate_position(end, headers.len(), token)?;
                for position in start..=end {
                    selection.insert(position);
                }
                continue;
            }
        }

        // Header name, case-insensitive; first occurrence wins
        let needle = token.to_lowercase();
        match headers
            .iter()
            .position(|h| h.trim().to_lowercase() == needle)
        {
            Some(idx) => selection.insert(idx + 1),
            None => {
                let available: Vec<&str> = headers.iter().map(|h| h.as_str()).take(25).collect();
                let suffix = if headers.len() > 25 {
                    format!(" (+{} more)", headers.len() - 25)
                } else {
                    String::new()
                };
                return Err(CliError::args(format!("unknown column {:?}", token))
                    .with_hint(format!("available columns: {}{}", available.join(", "), suffix)));
            }
        }
    }

    Ok(selection)
}

fn validate_position(position: usize, column_count: usize, token: &str) -> Result<(), CliError> {
    if position == 0 || position > column_count {
        return Err(
            CliError::args(format!("column position {:?} out of range", token)).with_hint(
                format!("positions are 1-based, this file has {} columns", column_count),
            ),
        );
    }
    Ok(())
}

// ============================================================================
// headers
// ============================================================================

fn cmd_headers(input: &Path, json: bool) -> Result<(), CliError> {
    let table = read_table(input)?;

    if json {
        let entries: Vec<serde_json::Value> = table
            .headers
            .iter()
            .enumerate()
            .map(|(i, h)| serde_json::json!({ "position": i + 1, "header": h }))
            .collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&entries).map_err(|e| CliError::io(e.to_string()))?
        );
    } else {
        for (i, header) in table.headers.iter().enumerate() {
            println!("{}: {}", i + 1, header);
        }
    }

    Ok(())
}

// ============================================================================
// clean
// ============================================================================

fn cmd_clean(
    input: &Path,
    drop_args: &[String],
    output: &Path,
    quiet: bool,
) -> Result<(), CliError> {
    let table = read_table(input)?;
    let total = table.column_count();

    let tokens = parse_drop_args(drop_args);
    let selection = resolve_drop_tokens(&tokens, &table.headers)?;

    let mut session = Session::new();
    session.load_original(table);
    let cleaned = session
        .clean(&selection)
        .map_err(|e| CliError::args(e.to_string()))?;

    write_table(&cleaned, output)?;

    if !quiet {
        eprintln!(
            "note: kept {}/{} columns, {} rows -> {}",
            cleaned.column_count(),
            total,
            cleaned.row_count(),
            output.display()
        );
    }
    Ok(())
}

// ============================================================================
// match
// ============================================================================

fn cmd_match(
    reference: &Path,
    candidate: &Path,
    output: &Path,
    json: bool,
    quiet: bool,
) -> Result<(), CliError> {
    let reference_table = read_table(reference)?;
    let candidate_table = read_table(candidate)?;

    // The reference file is already cleaned; replaying it through the
    // workflow with an empty selection establishes its headers as the
    // reference schema for the match step.
    let mut session = Session::new();
    session.load_original(reference_table);
    session
        .clean(&ColumnSelection::new())
        .map_err(|e| CliError::args(e.to_string()))?;
    session
        .load_candidate(candidate_table)
        .map_err(|e| CliError::args(e.to_string()))?;
    let outcome = session
        .match_candidate()
        .map_err(|e| CliError::args(e.to_string()))?;

    if !quiet {
        if let Some(warning) = outcome.reconciliation.warning_summary() {
            eprintln!("warning: {}", warning);
        }
        if !outcome.remap.ambiguous.is_empty() {
            eprintln!(
                "warning: duplicate header(s) resolved to first occurrence: {}",
                outcome.remap.ambiguous.join(", ")
            );
        }
    }

    write_table(&outcome.table, output)?;

    if json {
        let report = serde_json::json!({
            "reconciliation": outcome.reconciliation,
            "remap": outcome.remap,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&report).map_err(|e| CliError::io(e.to_string()))?
        );
    } else if !quiet {
        eprintln!(
            "note: {} -> {}",
            outcome.reconciliation.summary(),
            output.display()
        );
    }
    Ok(())
}

// ============================================================================
// compare
// ============================================================================

fn cmd_compare(reference: &Path, candidate: &Path, json: bool) -> Result<(), CliError> {
    let reference_table = read_table(reference)?;
    let candidate_table = read_table(candidate)?;
    let recon = reconcile(&reference_table.headers, &candidate_table.headers);

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&recon).map_err(|e| CliError::io(e.to_string()))?
        );
    } else {
        print_side("common", &recon.common);
        print_side("missing", &recon.missing);
        print_side("extra", &recon.extra);
    }

    if recon.is_exact() {
        Ok(())
    } else {
        Err(CliError::diffs())
    }
}

fn print_side(label: &str, headers: &[String]) {
    if headers.is_empty() {
        println!("{} (0)", label);
    } else {
        println!("{} ({}): {}", label, headers.len(), headers.join(", "));
    }
}
