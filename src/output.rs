//! Output generation.
//!
//! Joins the passthrough document lines with the formatted bibliography and
//! writes the result to its destination.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use thiserror::Error;

use crate::bibliography::{format_bibliography, FormatOptions};
use crate::markdown::scan;

/// Errors that can occur when writing the output.
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("'{path}': {source}")]
    IoUnavailable {
        path: String,
        #[source]
        source: io::Error,
    },
}

/// Whether the destination names standard output (`-` or `stdout`).
pub fn is_stdout(path: &Path) -> bool {
    path == Path::new("-") || path == Path::new("stdout")
}

/// Generates the final output from document lines and bibliography lines.
///
/// If the document's last line has no terminator and a bibliography follows,
/// a newline is inserted so the header starts on its own line.
pub fn generate_output<D, B>(document: &[D], bibliography: &[B]) -> String
where
    D: AsRef<str>,
    B: AsRef<str>,
{
    let mut output = String::new();
    for line in document {
        output.push_str(line.as_ref());
    }

    if !bibliography.is_empty() && !output.is_empty() && !output.ends_with('\n') {
        output.push('\n');
    }
    for line in bibliography {
        output.push_str(line.as_ref());
    }

    output
}

/// Runs the full pipeline on in-memory lines.
///
/// # Arguments
///
/// * `lines` - The document lines, each with its terminator
/// * `passthrough` - Whether the document itself is part of the output
/// * `options` - Bibliography formatting options
///
/// # Examples
///
/// ```
/// use md_refgen::{render_document, FormatOptions};
///
/// let lines = ["See [1].\n", "[1]: http://a \"One\"\n"];
/// let output = render_document(&lines, false, &FormatOptions::default());
/// assert_eq!(output, "1. [One] [1]\n");
/// ```
pub fn render_document<S: AsRef<str>>(
    lines: &[S],
    passthrough: bool,
    options: &FormatOptions,
) -> String {
    let scanned = scan(lines, passthrough);
    let bibliography = format_bibliography(&scanned.table, options);
    generate_output(scanned.lines.as_slice(), bibliography.as_slice())
}

/// Writes the output to a file, or to stdout when `destination` is `None`,
/// `-` or `stdout`. An existing file is replaced.
pub fn write_output(destination: Option<&Path>, content: &str) -> Result<(), OutputError> {
    match destination {
        Some(path) if !is_stdout(path) => {
            fs::write(path, content).map_err(|source| OutputError::IoUnavailable {
                path: path.display().to_string(),
                source,
            })
        }
        _ => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle
                .write_all(content.as_bytes())
                .and_then(|()| handle.flush())
                .map_err(|source| OutputError::IoUnavailable {
                    path: "stdout".to_string(),
                    source,
                })
        }
    }
}
