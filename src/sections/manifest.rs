//! SECTION_MANIFEST parser - extracts the ordered section list from index.md
//!
//! The index document declares its sections inside an HTML comment block:
//!
//! ```text
//! <!-- SECTION_MANIFEST
//! section-01-foundation
//! section-02-config
//! section-03-parser
//! END_MANIFEST -->
//! ```
//!
//! Validation problems never escape this module as errors. They are folded
//! into [`ManifestParse`] / [`IndexFormat`] so callers can show them to the
//! user as a diagnostic.

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Literal that opens the manifest block
pub const MANIFEST_START: &str = "<!-- SECTION_MANIFEST";

/// Literal that closes the manifest block
pub const MANIFEST_END: &str = "END_MANIFEST -->";

/// Index-level diagnostic when index.md has no manifest block at all
pub const MISSING_MANIFEST_ERROR: &str = "index.md is missing SECTION_MANIFEST block. \
     index.md must start with a SECTION_MANIFEST block. \
     See SKILL.md step 18 for the required format.";

/// `section-NN-name`: exactly two ASCII digits, then a non-empty name
static SECTION_NAME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^section-([0-9]{2})-([a-zA-Z0-9_-]+)$").expect("section name pattern is valid")
});

/// Reasons a manifest block is rejected.
///
/// The `Display` text is what ends up in the `error` field of the
/// diagnostic, so it is written for the person editing index.md.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ManifestError {
    #[error(
        "No SECTION_MANIFEST block found in index.md. \
         index.md must start with a SECTION_MANIFEST block. \
         See SKILL.md step 18 for the required format."
    )]
    NoManifestBlock,

    #[error("SECTION_MANIFEST block not closed (missing END_MANIFEST -->)")]
    UnclosedManifestBlock,

    #[error("SECTION_MANIFEST block is empty. Add section definitions, one per line.")]
    EmptyManifestBlock,

    #[error(
        "Invalid section name on line {line_number}: '{line}'. \
         Expected format: section-NN-name (e.g., section-01-foundation). \
         Section numbers must be two digits (01, 02, etc.)."
    )]
    InvalidSectionName { line_number: usize, line: String },

    #[error(
        "Duplicate section number on line {line_number}: '{line}'. \
         Section {number} already defined."
    )]
    DuplicateSectionNumber {
        line_number: usize,
        line: String,
        number: String,
    },
}

/// A successfully validated manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    /// Section identifiers sorted by their two-digit number
    pub sections: Vec<String>,
    /// Non-fatal numbering gap notices
    pub warnings: Vec<String>,
}

/// Flattened parse outcome, as reported to callers and serialized to JSON
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestParse {
    pub success: bool,
    pub sections: Vec<String>,
    pub error: Option<String>,
    pub warnings: Vec<String>,
}

impl From<Result<Manifest, ManifestError>> for ManifestParse {
    fn from(result: Result<Manifest, ManifestError>) -> Self {
        match result {
            Ok(manifest) => Self {
                success: true,
                sections: manifest.sections,
                error: None,
                warnings: manifest.warnings,
            },
            Err(e) => Self {
                success: false,
                sections: Vec::new(),
                error: Some(e.to_string()),
                warnings: Vec::new(),
            },
        }
    }
}

/// Detailed format status of an index document.
///
/// `has_manifest` distinguishes "no manifest attempted" from "manifest
/// attempted but invalid".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexFormat {
    pub exists: bool,
    pub has_manifest: bool,
    pub manifest_valid: bool,
    pub sections: Vec<String>,
    pub error: Option<String>,
    pub warnings: Vec<String>,
}

impl IndexFormat {
    /// Placeholder used by progress checks when there is no index at all.
    /// Carries no error: a missing index is a state, not a mistake.
    pub fn absent() -> Self {
        Self {
            exists: false,
            has_manifest: false,
            manifest_valid: false,
            sections: Vec::new(),
            error: None,
            warnings: Vec::new(),
        }
    }
}

/// Two-digit number of a manifest-conformant section name
pub fn manifest_section_number(name: &str) -> Option<u32> {
    SECTION_NAME_PATTERN
        .captures(name)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Whether a string is a valid manifest section identifier
pub fn is_valid_section_name(name: &str) -> bool {
    SECTION_NAME_PATTERN.is_match(name)
}

/// Parse and validate the SECTION_MANIFEST block of an index document.
pub fn parse_manifest(content: &str) -> Result<Manifest, ManifestError> {
    let block = extract_manifest_block(content)?;

    let mut sections: Vec<(u32, String)> = Vec::new();
    let mut seen_numbers = HashSet::new();

    // Line numbers are relative to the trimmed block and include blank lines
    for (index, raw_line) in block.lines().enumerate() {
        let line_number = index + 1;
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        let number = SECTION_NAME_PATTERN
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .ok_or_else(|| ManifestError::InvalidSectionName {
                line_number,
                line: line.to_string(),
            })?;

        if !seen_numbers.insert(number.clone()) {
            return Err(ManifestError::DuplicateSectionNumber {
                line_number,
                line: line.to_string(),
                number,
            });
        }

        let value = number
            .parse::<u32>()
            .map_err(|_| ManifestError::InvalidSectionName {
                line_number,
                line: line.to_string(),
            })?;
        sections.push((value, line.to_string()));
    }

    if sections.is_empty() {
        return Err(ManifestError::EmptyManifestBlock);
    }

    sections.sort_by_key(|(number, _)| *number);
    let warnings = numbering_gaps(sections.iter().map(|(number, _)| *number));

    Ok(Manifest {
        sections: sections.into_iter().map(|(_, name)| name).collect(),
        warnings,
    })
}

/// Parse a manifest block into the flattened diagnostic form.
pub fn parse_manifest_block(content: &str) -> ManifestParse {
    parse_manifest(content).into()
}

/// Locate the text strictly between the manifest markers, trimmed.
fn extract_manifest_block(content: &str) -> Result<&str, ManifestError> {
    let start = content
        .find(MANIFEST_START)
        .ok_or(ManifestError::NoManifestBlock)?;
    let block_start = start + MANIFEST_START.len();

    let end = content[block_start..]
        .find(MANIFEST_END)
        .ok_or(ManifestError::UnclosedManifestBlock)?;

    let block = content[block_start..block_start + end].trim();
    if block.is_empty() {
        return Err(ManifestError::EmptyManifestBlock);
    }

    Ok(block)
}

/// Walk sorted section numbers and report every break in the 01, 02, ... run.
fn numbering_gaps(numbers: impl Iterator<Item = u32>) -> Vec<String> {
    let mut warnings = Vec::new();
    let mut expected = 1;
    for actual in numbers {
        if actual != expected {
            warnings.push(format!(
                "Section numbering gap: expected section-{expected:02}, found section-{actual:02}"
            ));
        }
        expected = actual + 1;
    }
    warnings
}

/// Section names from an index document, or empty if its manifest is invalid.
///
/// There is no fallback parsing: use [`check_index_format`] to find out why
/// the list came back empty.
pub fn parse_index_sections(index_path: &Path) -> Result<Vec<String>> {
    if !index_path.exists() {
        return Ok(Vec::new());
    }
    let content = read_index(index_path)?;
    Ok(parse_manifest(&content)
        .map(|manifest| manifest.sections)
        .unwrap_or_default())
}

/// Check the format of an index document and return detailed status.
pub fn check_index_format(index_path: &Path) -> Result<IndexFormat> {
    if !index_path.exists() {
        return Ok(IndexFormat {
            error: Some("index.md does not exist".to_string()),
            ..IndexFormat::absent()
        });
    }

    let content = read_index(index_path)?;
    Ok(check_index_content(&content))
}

/// Format status of index content that is known to exist.
pub fn check_index_content(content: &str) -> IndexFormat {
    if !content.contains(MANIFEST_START) {
        return IndexFormat {
            exists: true,
            error: Some(MISSING_MANIFEST_ERROR.to_string()),
            ..IndexFormat::absent()
        };
    }

    let parsed = parse_manifest_block(content);

    IndexFormat {
        exists: true,
        has_manifest: true,
        manifest_valid: parsed.success,
        sections: parsed.sections,
        error: parsed.error,
        warnings: parsed.warnings,
    }
}

fn read_index(index_path: &Path) -> Result<String> {
    fs::read_to_string(index_path)
        .with_context(|| format!("Failed to read section index: {}", index_path.display()))
}
