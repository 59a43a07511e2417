//! Shared test constants and helpers for integration tests.

#![allow(dead_code)]

use std::io::Write;

use tempfile::NamedTempFile;

/// A document citing two numbered references, both defined at the end.
///
/// Mirrors the canonical usage example: running with a level-2 References
/// header and linked entries should append [`NUMERIC_BIBLIOGRAPHY`].
pub const NUMERIC_DOCUMENT: &str = "\
There are several articles showing how to properly write a grant [[1],[2]].

[1]: http://www.ncbi.nlm.nih.gov/pmc/articles/PMC1378105/  \"Ten Simple Rules for Getting Grants. Bourne PE and Chalupa LM. PLoS Comput Biol. 2006; 2(2)\"
[2]: http://www.blah.com \"This is it!\"
";

/// The bibliography generated for [`NUMERIC_DOCUMENT`] (`##References`, linked).
pub const NUMERIC_BIBLIOGRAPHY: &str = "\
##References
1. [Ten Simple Rules for Getting Grants. Bourne PE and Chalupa LM. PLoS Comput Biol. 2006; 2(2)] [1]
2. [This is it!] [2]
";

/// Build a document body followed by one definition per identifier.
///
/// Each definition gets a target `http://example.com/{id}` and a title `Title {id}`.
pub fn build_document(ids: &[&str]) -> String {
    let mut document = String::from("Body text citing references.\n\n");
    for id in ids {
        document.push_str(&format!(
            "[{}]: http://example.com/{} \"Title {}\"\n",
            id, id, id
        ));
    }
    document
}

/// Create a temporary file with the given content and suffix.
pub fn create_temp_file(content: &[u8], suffix: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content).unwrap();
    file.flush().unwrap();
    file
}
