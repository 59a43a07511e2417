//! Document loading.
//!
//! Reads the input document from a file or standard input, transparently
//! decompressing gzip, bzip2 and zip inputs, and splits it into lines.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;
use std::string::FromUtf8Error;

use bzip2::read::MultiBzDecoder;
use flate2::read::MultiGzDecoder;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur when loading the input document.
#[derive(Error, Debug)]
pub enum InputError {
    #[error("'{path}': {source}")]
    IoUnavailable {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("'{path}': invalid zip archive: {source}")]
    Archive {
        path: String,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("'{path}': zip archive contains no files")]
    EmptyArchive { path: String },

    #[error("'{path}': input is not valid UTF-8")]
    NotUtf8 {
        path: String,
        #[source]
        source: FromUtf8Error,
    },
}

/// Input encoding, chosen from the file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compression {
    None,
    Gzip,
    Bzip2,
    Zip,
}

impl Compression {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("gz") => Compression::Gzip,
            Some("bz2") => Compression::Bzip2,
            Some("zip") => Compression::Zip,
            _ => Compression::None,
        }
    }
}

/// Whether the path names standard input (`-` or `stdin`).
pub fn is_stdin(path: &Path) -> bool {
    path == Path::new("-") || path == Path::new("stdin")
}

/// Reads the whole input document as text.
///
/// # Errors
///
/// Returns an error if the input cannot be opened or decoded, or is not UTF-8.
pub fn read_document(path: &Path) -> Result<String, InputError> {
    let label = path.display().to_string();

    if is_stdin(path) {
        return read_text(io::stdin().lock(), &label);
    }

    let io_err = |source| InputError::IoUnavailable {
        path: label.clone(),
        source,
    };
    let file = File::open(path).map_err(io_err)?;

    let compression = Compression::from_path(path);
    debug!(path = %label, ?compression, "opening input");

    match compression {
        Compression::None => read_text(BufReader::new(file), &label),
        Compression::Gzip => read_text(MultiGzDecoder::new(BufReader::new(file)), &label),
        Compression::Bzip2 => read_text(MultiBzDecoder::new(BufReader::new(file)), &label),
        Compression::Zip => read_first_zip_entry(file, &label),
    }
}

/// Reads the first file entry of a zip archive.
fn read_first_zip_entry(file: File, label: &str) -> Result<String, InputError> {
    let archive_err = |source| InputError::Archive {
        path: label.to_string(),
        source,
    };
    let mut archive = zip::ZipArchive::new(BufReader::new(file)).map_err(archive_err)?;

    for index in 0..archive.len() {
        let entry = archive.by_index(index).map_err(archive_err)?;
        if entry.is_dir() {
            continue;
        }
        debug!(archive = %label, entry = %entry.name(), "reading zip entry");
        let entry_label = format!("{}:{}", label, entry.name());
        return read_text(entry, &entry_label);
    }

    Err(InputError::EmptyArchive {
        path: label.to_string(),
    })
}

fn read_text<R: Read>(mut reader: R, label: &str) -> Result<String, InputError> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|source| InputError::IoUnavailable {
            path: label.to_string(),
            source,
        })?;
    String::from_utf8(bytes).map_err(|source| InputError::NotUtf8 {
        path: label.to_string(),
        source,
    })
}

/// Splits text into lines, keeping each line's terminator.
///
/// ```
/// use md_refgen::split_lines;
///
/// assert_eq!(split_lines("a\nb\r\nc"), vec!["a\n", "b\r\n", "c"]);
/// ```
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split_inclusive('\n').collect()
}
