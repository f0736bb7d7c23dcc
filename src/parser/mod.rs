pub mod cookies;
pub mod descriptor;
pub mod metadata;
pub mod params;

use crate::ir::{ActionDescriptor, ScanMetadata};

/// What the text extractors recover from a single retrieved body.
#[derive(Debug, Clone, Default)]
pub struct ParsedContent {
    pub descriptors: Vec<ActionDescriptor>,
    pub metadata: ScanMetadata,
}

/// Run the descriptor and metadata extractors over one body of text.
///
/// Pure: no network access, and absence of matches is an empty result.
pub fn parse_content(text: &str, url: &str) -> ParsedContent {
    ParsedContent {
        descriptors: descriptor::extract(text),
        metadata: metadata::extract_metadata(text, url),
    }
}
