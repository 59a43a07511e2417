//! md-refgen: generate a bibliography from reference definitions in Markdown documents.
//!
//! This library provides functionality to:
//! - Load a Markdown document, optionally gzip/bzip2/zip compressed
//! - Scan it for reference definitions of the form `[id]: target "title"`
//! - Format the collected references as a sorted bibliography
//! - Append the bibliography to the document, or emit it on its own

pub mod bibliography;
pub mod input;
pub mod markdown;
pub mod output;
pub mod refs;

pub use bibliography::{
    format_bibliography, format_entry, FormatOptions, HeaderKind, MAX_HEADER_LEVEL,
};
pub use input::{read_document, split_lines, InputError};
pub use markdown::{parse_definition, scan, ScanOutput};
pub use output::{generate_output, render_document, write_output, OutputError};
pub use refs::{ReferenceEntry, ReferenceId, ReferenceKind, ReferenceTable};
