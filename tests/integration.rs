//! Integration tests using TOML fixtures.
//!
//! This test harness loads test cases from TOML files in the `fixtures/` directory
//! and runs them against the md-refgen library.

use std::fs;
use std::num::NonZeroUsize;
use std::path::Path;

use md_refgen::{render_document, split_lines, FormatOptions, HeaderKind};
use pretty_assertions::assert_eq;
use serde::Deserialize;

/// A test fixture loaded from a TOML file.
#[derive(Debug, Deserialize)]
struct Fixture {
    /// Name of the test case
    name: String,
    /// Input Markdown text
    markdown: String,
    /// Section header: "none", "references" or "bibliography"
    #[serde(default = "default_header")]
    header: String,
    /// Header level
    #[serde(default = "default_level")]
    level: usize,
    /// Render entries as reference links
    #[serde(default = "default_true")]
    linked: bool,
    /// Echo the original document before the bibliography
    #[serde(default = "default_true")]
    passthrough: bool,
    /// Expected output
    expected: String,
}

fn default_header() -> String {
    "none".to_string()
}

fn default_level() -> usize {
    2
}

fn default_true() -> bool {
    true
}

impl Fixture {
    fn options(&self) -> FormatOptions {
        let header = match self.header.as_str() {
            "none" => HeaderKind::None,
            "references" => HeaderKind::References,
            "bibliography" => HeaderKind::Bibliography,
            other => panic!("Fixture '{}': unknown header '{}'", self.name, other),
        };
        FormatOptions {
            header,
            header_level: NonZeroUsize::new(self.level).expect("level must be at least 1"),
            linked: self.linked,
        }
    }
}

/// Load all fixtures from a directory.
fn load_fixtures(dir: &Path) -> Vec<(String, Fixture)> {
    let mut fixtures = Vec::new();

    if !dir.exists() {
        return fixtures;
    }

    for entry in fs::read_dir(dir).unwrap() {
        let entry = entry.unwrap();
        let path = entry.path();

        if path.extension().map_or(false, |e| e == "toml") {
            let content = fs::read_to_string(&path).unwrap();
            let fixture: Fixture = toml::from_str(&content).unwrap();
            let name = path.file_stem().unwrap().to_string_lossy().to_string();
            fixtures.push((name, fixture));
        }
    }

    fixtures.sort_by(|a, b| a.0.cmp(&b.0));
    fixtures
}

/// Run a fixture through the whole pipeline and compare the output.
fn run_fixture(name: &str, fixture: &Fixture) {
    let lines = split_lines(&fixture.markdown);
    let output = render_document(&lines, fixture.passthrough, &fixture.options());

    assert_eq!(
        output, fixture.expected,
        "Test '{}' ({}) output mismatch",
        name, fixture.name
    );
}

fn run_fixture_dir(subdir: &str) -> usize {
    let fixtures_dir = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(subdir);
    let fixtures = load_fixtures(&fixtures_dir);

    for (name, fixture) in &fixtures {
        println!("Running {} test: {}", subdir, fixture.name);
        run_fixture(name, fixture);
    }

    fixtures.len()
}

#[test]
fn test_integration_fixtures() {
    let count = run_fixture_dir("integration");
    assert!(count > 0, "expected fixtures in tests/fixtures/integration");
}

#[test]
fn test_output_fixtures() {
    let count = run_fixture_dir("output");
    assert!(count > 0, "expected fixtures in tests/fixtures/output");
}

#[test]
fn test_passthrough_fidelity_without_definitions() {
    // Given: a document with no reference definitions
    let markdown = "# Notes\n\nSome [linked](http://x) text.\n\n- item\n";

    // When: we render it with passthrough and no header
    let output = render_document(
        &split_lines(markdown),
        true,
        &FormatOptions::default(),
    );

    // Then: the output is the input, byte for byte
    assert_eq!(output, markdown);
}

#[test]
fn test_passthrough_fidelity_with_header_appended() {
    let markdown = "# Notes\n\nNo definitions.\n";
    let options = FormatOptions {
        header: HeaderKind::Bibliography,
        ..FormatOptions::default()
    };

    let output = render_document(&split_lines(markdown), true, &options);

    assert_eq!(output, format!("{}##Bibliography\n", markdown));
}
