//! Markdown reference-definition scanner.
//!
//! Recognizes lines of the form `[id]: target "title"` and collects them into
//! a [`ReferenceTable`], optionally echoing every input line to the output.

use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, info, warn};

use crate::refs::{ReferenceEntry, ReferenceKind, ReferenceTable};

/// Regex for a reference definition, anchored at the start of the line.
///
/// Separators are ASCII whitespace only; a no-break or ideographic space
/// does not delimit the target.
///
/// Group 1: identifier (anything but `]`)
/// Group 2: target (shortest run followed by whitespace and a quote)
/// Group 3: title (up to the last quote on the line)
fn definition_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"^\[([^\]]+)\]:(?-u:\s)+(.+?)(?-u:\s)+"(.+)""#).unwrap())
}

/// Result of scanning a document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanOutput {
    /// All reference definitions found, last definition winning per identifier
    pub table: ReferenceTable,
    /// The input lines to carry into the output (empty without passthrough)
    pub lines: Vec<String>,
}

/// Parses a single line as a reference definition.
///
/// Returns `None` for anything that is not a complete definition, including
/// lines that start like one but have no quoted title.
///
/// # Examples
///
/// ```
/// use md_refgen::parse_definition;
///
/// let entry = parse_definition("[1]: http://a \"Title One\"\n").unwrap();
/// assert_eq!(entry.id.as_str(), "1");
/// assert_eq!(entry.target, "http://a");
/// assert_eq!(entry.title, "Title One");
///
/// assert!(parse_definition("[1]: http://a\n").is_none());
/// ```
pub fn parse_definition(line: &str) -> Option<ReferenceEntry> {
    let cap = definition_re().captures(line)?;
    Some(ReferenceEntry::new(
        cap.get(1)?.as_str(),
        cap.get(2)?.as_str(),
        cap.get(3)?.as_str(),
    ))
}

/// Scans document lines for reference definitions.
///
/// # Arguments
///
/// * `lines` - The document lines in order, each with its line terminator
/// * `passthrough` - Whether the input lines are echoed into the output
///
/// # Returns
///
/// The completed reference table and the lines to emit before the
/// bibliography.
pub fn scan<I, S>(lines: I, passthrough: bool) -> ScanOutput
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut output = ScanOutput::default();

    for (index, line) in lines.into_iter().enumerate() {
        let line = line.as_ref();

        if let Some(entry) = parse_definition(line) {
            debug!(line = index + 1, id = %entry.id, "found reference definition");
            if let Some(previous) = output.table.insert(entry) {
                warn!(
                    line = index + 1,
                    id = %previous.id,
                    previous_target = %previous.target,
                    "reference redefined, keeping the later definition"
                );
            }
        }

        if passthrough {
            output.lines.push(line.to_string());
        }
    }

    info!(
        numeric = output.table.count_of(ReferenceKind::Numeric),
        alphanumeric = output.table.count_of(ReferenceKind::Alphanumeric),
        "scan complete"
    );

    output
}
