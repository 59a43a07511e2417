//! CLI for md-refgen - Generate a bibliography from Markdown reference definitions.

use std::fmt;
use std::fs;
use std::io;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use md_refgen::{
    format_bibliography, generate_output, input::Compression, read_document, scan, split_lines,
    write_output, FormatOptions, HeaderKind, InputError, OutputError, MAX_HEADER_LEVEL,
};

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

/// Generate a bibliography from reference definitions in Markdown documents
#[derive(Parser)]
#[command(name = "md-refgen")]
#[command(version)]
#[command(after_help = "\
Examples:
  md-refgen process paper.md -r
  md-refgen process paper.md -b -l 3 -o paper-with-refs.md
  md-refgen process paper.md.gz --only-ref --no-links
  cat paper.md | md-refgen process - -r
  md-refgen list paper.md")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Append a bibliography built from the document's reference definitions
    #[command(after_help = "\
Examples:
  md-refgen process paper.md -r
  md-refgen process paper.md -r -o paper.md        (replace the input in place)
  md-refgen process paper.md --only-ref --no-links

Reference syntax: [1]: http://example.com \"Title\" or [key]: ./file.pdf \"Title\"")]
    Process {
        /// Input Markdown file, optionally .gz, .bz2 or .zip (use '-' for stdin)
        input: PathBuf,

        /// Output file; may name the input file to replace it (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Add a "References" header
        #[arg(short = 'r', long = "reference", conflicts_with = "bibliography")]
        reference: bool,

        /// Add a "Bibliography" header
        #[arg(short, long)]
        bibliography: bool,

        /// Header level of the references/bibliography header (1-6)
        #[arg(short, long, value_name = "LEVEL", default_value = "2", value_parser = parse_level)]
        level: NonZeroUsize,

        /// Don't render entries as reference links
        #[arg(long, alias = "noLinks")]
        no_links: bool,

        /// Only print the bibliography, not the original document
        #[arg(long, alias = "onlyRef")]
        only_ref: bool,
    },

    /// Print the reference definitions found in a document as JSON
    List {
        /// Input Markdown file, optionally .gz, .bz2 or .zip (use '-' for stdin)
        input: PathBuf,
    },
}

/// Parse a header level, rejecting anything Markdown cannot render.
fn parse_level(s: &str) -> Result<NonZeroUsize, String> {
    let out_of_range = || format!("header level must be between 1 and {}", MAX_HEADER_LEVEL);
    let level: usize = s.parse().map_err(|_| out_of_range())?;
    NonZeroUsize::new(level)
        .filter(|level| level.get() <= MAX_HEADER_LEVEL)
        .ok_or_else(out_of_range)
}

// ---------------------------------------------------------------------------
// AppError — semantic exit codes
// ---------------------------------------------------------------------------

enum AppError {
    /// Exit 10 — input file not found / unreadable
    InputFile(String),
    /// Exit 11 — cannot write output
    OutputFile(String),
}

impl AppError {
    fn exit_code(&self) -> i32 {
        match self {
            AppError::InputFile(_) => 10,
            AppError::OutputFile(_) => 11,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::InputFile(msg) => {
                write!(
                    f,
                    "{}\n  hint: verify the file path is correct and the file is UTF-8 text (optionally .gz, .bz2 or .zip)",
                    msg
                )
            }
            AppError::OutputFile(msg) => {
                write!(
                    f,
                    "{}\n  hint: check that the output directory exists and is writable",
                    msg
                )
            }
        }
    }
}

impl From<InputError> for AppError {
    fn from(e: InputError) -> Self {
        AppError::InputFile(e.to_string())
    }
}

impl From<OutputError> for AppError {
    fn from(e: OutputError) -> Self {
        AppError::OutputFile(e.to_string())
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() {
    init_tracing();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(e.exit_code());
    }
}

/// Diagnostics go to stderr, filtered by `RUST_LOG` (default: warn).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run() -> Result<(), AppError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Process {
            input,
            output,
            reference,
            bibliography,
            level,
            no_links,
            only_ref,
        } => {
            let header = if reference {
                HeaderKind::References
            } else if bibliography {
                HeaderKind::Bibliography
            } else {
                HeaderKind::None
            };
            let options = FormatOptions {
                header,
                header_level: level,
                linked: !no_links,
            };
            process_command(&input, output.as_deref(), &options, !only_ref)?;
        }
        Commands::List { input } => {
            list_command(&input)?;
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

/// Append (or print) the bibliography for a Markdown file.
fn process_command(
    input: &Path,
    output: Option<&Path>,
    options: &FormatOptions,
    passthrough: bool,
) -> Result<(), AppError> {
    // 1. Read the whole document first, so the output may replace it
    let text = read_document(input)?;

    // 2. Refuse to overwrite a compressed input with plain text
    let in_place = output.map_or(false, |out| same_file(input, out));
    if in_place && Compression::from_path(input) != Compression::None {
        return Err(AppError::OutputFile(format!(
            "'{}': refusing to replace a compressed input with plain text",
            input.display()
        )));
    }

    // 3. Scan for reference definitions
    let scanned = scan(split_lines(&text), passthrough);

    // 4. Format the bibliography
    let bibliography = format_bibliography(&scanned.table, options);

    // 5. Generate and write the output in one piece
    let result = generate_output(scanned.lines.as_slice(), bibliography.as_slice());
    write_output(output, &result)?;

    if let Some(output_path) = output.filter(|p| !md_refgen::output::is_stdout(p)) {
        if in_place {
            info!(path = %output_path.display(), "replaced input in place");
        }
        eprintln!(
            "found {} reference(s), wrote {}",
            scanned.table.len(),
            output_path.display()
        );
    }

    Ok(())
}

/// Print the reference table as JSON.
fn list_command(input: &Path) -> Result<(), AppError> {
    let text = read_document(input)?;
    let scanned = scan(split_lines(&text), false);

    let mut json = serde_json::to_string_pretty(&scanned.table)
        .map_err(|e| AppError::OutputFile(format!("stdout: {}", e)))?;
    json.push('\n');
    write_output(None, &json)?;

    Ok(())
}

/// Whether two paths name the same existing file.
fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
