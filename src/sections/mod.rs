//! Section index validation and section-writing progress

pub mod manifest;
pub mod progress;

pub use manifest::{
    check_index_format, parse_index_sections, parse_manifest, parse_manifest_block, IndexFormat,
    Manifest, ManifestError, ManifestParse,
};
pub use progress::{check_section_progress, get_completed_sections, SectionProgress, SectionState};
