//! Reference data model.
//!
//! A reference definition in a Markdown document has the form
//! `[identifier]: target "title"`. Each one found by the scanner becomes a
//! [`ReferenceEntry`], collected into a [`ReferenceTable`] keyed by identifier.

use std::cmp::Ordering;
use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// How an identifier is classified, decided per entry at scan time.
///
/// Variant order is significant: numeric entries sort before alphanumeric ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceKind {
    /// Identifier made only of ASCII decimal digits (e.g. `[12]`)
    Numeric,
    /// Any other identifier (e.g. `[smith2020]`)
    Alphanumeric,
}

/// The identifier of a reference, tagged with its kind.
///
/// Numeric identifiers are kept in canonical form (no leading zeros) and
/// ordered by value; alphanumeric identifiers are kept verbatim and ordered
/// lexically.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReferenceId {
    kind: ReferenceKind,
    key: String,
}

impl ReferenceId {
    /// Classifies a raw identifier as captured between the brackets.
    ///
    /// # Examples
    ///
    /// ```
    /// use md_refgen::{ReferenceId, ReferenceKind};
    ///
    /// let id = ReferenceId::parse("007");
    /// assert_eq!(id.kind(), ReferenceKind::Numeric);
    /// assert_eq!(id.as_str(), "7");
    ///
    /// let id = ReferenceId::parse("smith2020");
    /// assert_eq!(id.kind(), ReferenceKind::Alphanumeric);
    /// ```
    pub fn parse(raw: &str) -> Self {
        if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
            let trimmed = raw.trim_start_matches('0');
            let key = if trimmed.is_empty() { "0" } else { trimmed };
            ReferenceId {
                kind: ReferenceKind::Numeric,
                key: key.to_string(),
            }
        } else {
            ReferenceId {
                kind: ReferenceKind::Alphanumeric,
                key: raw.to_string(),
            }
        }
    }

    pub fn kind(&self) -> ReferenceKind {
        self.kind
    }

    pub fn as_str(&self) -> &str {
        &self.key
    }
}

impl Ord for ReferenceId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.kind.cmp(&other.kind).then_with(|| match self.kind {
            // Canonical digit strings: a shorter one is always the smaller number.
            ReferenceKind::Numeric => self
                .key
                .len()
                .cmp(&other.key.len())
                .then_with(|| self.key.cmp(&other.key)),
            ReferenceKind::Alphanumeric => self.key.cmp(&other.key),
        })
    }
}

impl PartialOrd for ReferenceId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for ReferenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}

impl Serialize for ReferenceId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.key)
    }
}

/// One reference definition found in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceEntry {
    /// The identifier used by citation markers (e.g. "1" for `[1]`)
    pub id: ReferenceId,
    /// The link target; never validated or dereferenced
    pub target: String,
    /// The display title, without its delimiting quotes
    pub title: String,
}

impl Serialize for ReferenceEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ReferenceEntry", 4)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("kind", &self.id.kind())?;
        state.serialize_field("target", &self.target)?;
        state.serialize_field("title", &self.title)?;
        state.end()
    }
}

impl ReferenceEntry {
    pub fn new(id: &str, target: impl Into<String>, title: impl Into<String>) -> Self {
        ReferenceEntry {
            id: ReferenceId::parse(id),
            target: target.into(),
            title: title.into(),
        }
    }

    pub fn kind(&self) -> ReferenceKind {
        self.id.kind()
    }
}

/// Identifier-keyed collection of reference entries.
///
/// Each identifier appears at most once; inserting an existing identifier
/// replaces the earlier entry. Iteration yields numeric entries by value,
/// then alphanumeric entries lexically, regardless of insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceTable {
    entries: BTreeMap<ReferenceId, ReferenceEntry>,
}

impl ReferenceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts an entry, returning the entry it replaced, if any.
    pub fn insert(&mut self, entry: ReferenceEntry) -> Option<ReferenceEntry> {
        self.entries.insert(entry.id.clone(), entry)
    }

    /// Looks up an entry by its raw identifier (`"01"` finds entry `1`).
    pub fn get(&self, id: &str) -> Option<&ReferenceEntry> {
        self.entries.get(&ReferenceId::parse(id))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in bibliography order.
    pub fn iter(&self) -> btree_map::Values<'_, ReferenceId, ReferenceEntry> {
        self.entries.values()
    }

    pub fn count_of(&self, kind: ReferenceKind) -> usize {
        self.entries.keys().filter(|id| id.kind() == kind).count()
    }
}

impl<'a> IntoIterator for &'a ReferenceTable {
    type Item = &'a ReferenceEntry;
    type IntoIter = btree_map::Values<'a, ReferenceId, ReferenceEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<ReferenceEntry> for ReferenceTable {
    fn from_iter<I: IntoIterator<Item = ReferenceEntry>>(iter: I) -> Self {
        let mut table = ReferenceTable::new();
        for entry in iter {
            table.insert(entry);
        }
        table
    }
}

impl Serialize for ReferenceTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.entries.values())
    }
}
