//! Bibliography formatting.
//!
//! Renders a completed [`ReferenceTable`] as Markdown lines: an optional
//! section header followed by one line per reference.

use std::num::NonZeroUsize;

use crate::refs::{ReferenceEntry, ReferenceKind, ReferenceTable};

/// Character repeated to form the section header (`##References`).
pub const SECTION_MARKER: char = '#';

/// Deepest header level Markdown supports (`######`).
pub const MAX_HEADER_LEVEL: usize = 6;

/// Which section header, if any, precedes the entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HeaderKind {
    #[default]
    None,
    References,
    Bibliography,
}

impl HeaderKind {
    /// The header text, or `None` when no header is wanted.
    pub fn title(self) -> Option<&'static str> {
        match self {
            HeaderKind::None => None,
            HeaderKind::References => Some("References"),
            HeaderKind::Bibliography => Some("Bibliography"),
        }
    }
}

/// Options controlling the rendered bibliography.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatOptions {
    pub header: HeaderKind,
    /// Number of section markers in the header line, capped at [`MAX_HEADER_LEVEL`]
    pub header_level: NonZeroUsize,
    /// Repeat each identifier as a reference link after the title
    pub linked: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        FormatOptions {
            header: HeaderKind::None,
            header_level: NonZeroUsize::MIN.saturating_add(1),
            linked: true,
        }
    }
}

/// Renders a single entry, without line terminator.
///
/// Numeric entries carry an ordinal prefix (`1. `); alphanumeric entries do not.
///
/// # Examples
///
/// ```
/// use md_refgen::{format_entry, ReferenceEntry};
///
/// let entry = ReferenceEntry::new("1", "http://a", "Title One");
/// assert_eq!(format_entry(&entry, true), "1. [Title One] [1]");
/// assert_eq!(format_entry(&entry, false), "1. Title One");
/// ```
pub fn format_entry(entry: &ReferenceEntry, linked: bool) -> String {
    match (entry.kind(), linked) {
        (ReferenceKind::Numeric, true) => {
            format!("{}. [{}] [{}]", entry.id, entry.title, entry.id)
        }
        (ReferenceKind::Numeric, false) => format!("{}. {}", entry.id, entry.title),
        (ReferenceKind::Alphanumeric, true) => format!("[{}] [{}]", entry.title, entry.id),
        (ReferenceKind::Alphanumeric, false) => entry.title.clone(),
    }
}

/// Formats the bibliography for a completed reference table.
///
/// # Arguments
///
/// * `table` - The references collected by the scanner
/// * `options` - Header and rendering options
///
/// # Returns
///
/// The bibliography lines, each terminated by `\n`. An empty table yields
/// only the header line, or nothing at all without a header. A header level
/// above [`MAX_HEADER_LEVEL`] is rendered at that level.
pub fn format_bibliography(table: &ReferenceTable, options: &FormatOptions) -> Vec<String> {
    let mut lines = Vec::with_capacity(table.len() + 1);

    if let Some(title) = options.header.title() {
        let depth = options.header_level.get().min(MAX_HEADER_LEVEL);
        let marker = SECTION_MARKER.to_string().repeat(depth);
        lines.push(format!("{}{}\n", marker, title));
    }

    // The table iterates numeric ids by value, then alphanumeric ids lexically
    for entry in table {
        let mut line = format_entry(entry, options.linked);
        line.push('\n');
        lines.push(line);
    }

    lines
}
