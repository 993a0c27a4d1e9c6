//! Mapping between generated (binary) locations and synthesized
//! per-function "original" pseudo-sources.
//!
//! A WASM module has no original source text of its own; instead every
//! function body gets a pseudo-source identity derived from the module URL,
//! so the debugger can show one function per "file" while stepping.

use crate::binary::build_function_index;
use serde::{Deserialize, Serialize};

/// A location in a generated (binary) source. For WASM sources `line`
/// encodes a byte offset into the module, not a textual line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedLocation {
    pub source_id: String,
    pub line: u64,
}

/// A location in an original (or pseudo-original) source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    pub source_id: String,
    pub line: u64,
}

/// The synthesized original identity of a generated WASM location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OriginalLocation {
    pub source_id: String,
    pub line: u64,
    pub source_url: String,
}

/// Derive the original-source id for a generated source and an original URL.
pub fn generated_to_original_id(generated_id: &str, original_url: &str) -> String {
    format!("{}/originalSource-{}", generated_id, original_url)
}

/// Synthesize the per-function original identity for a generated location.
///
/// The owning function is the indexed range containing the location's byte
/// offset; its id becomes the `?parts/<id>` suffix of the pseudo-source URL.
/// An offset outside every function keeps an empty part id.
pub fn original_location(
    bytes: &[u8],
    location: &GeneratedLocation,
    generated_source_url: &str,
) -> OriginalLocation {
    let index = build_function_index(bytes);
    let offset = location.line;
    let found = index
        .iter()
        .find(|range| (range.start as u64) <= offset && offset < range.end as u64);

    let part = found.map(|range| range.id.as_str()).unwrap_or("");
    let source_url = format!("{}?parts/{}", generated_source_url, part);
    OriginalLocation {
        source_id: generated_to_original_id(&location.source_id, &source_url),
        line: offset,
        source_url,
    }
}
