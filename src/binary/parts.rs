//! Extraction of disassembly sub-views ("parts") by byte range.
//!
//! A part is either the lines inside one function's byte range, or
//! everything outside a set of excluded ranges (a module-level pseudo-source
//! that hides function bodies).

use super::disasm::{Disassembler, Disassembly};
use super::state::{WasmStateCache, EMPTY_DISASSEMBLY_LINE};

/// Half-open `[start, end)` byte range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    pub start: usize,
    pub end: usize,
}

/// Which lines of the disassembly a part keeps.
#[derive(Debug, Clone)]
pub enum PartSelector {
    /// Lines whose offset falls within the range, plus the first line
    /// exactly at its upper edge.
    Range(ByteRange),
    /// Lines outside the envelope of the given ranges, keeping the first
    /// line exactly at the envelope's upper edge.
    Exclude(Vec<ByteRange>),
}

impl PartSelector {
    /// Whether the line at `offset` is kept, given the offset of the
    /// previous kept-or-not line.
    ///
    /// The upper-edge rule deliberately includes one trailing line past a
    /// range: disassembly lines are coarser than byte ranges, and the line
    /// starting exactly at the range end belongs to the boundary. Only the
    /// first such line is kept.
    fn keeps(&self, offset: usize, previous: Option<usize>) -> bool {
        match self {
            PartSelector::Range(range) => {
                (range.start <= offset && offset < range.end)
                    || (offset == range.end && previous != Some(range.end))
            }
            PartSelector::Exclude(ranges) => {
                let start = ranges.iter().map(|r| r.start).min().unwrap_or(usize::MAX);
                let end = ranges.iter().map(|r| r.end).max().unwrap_or(0);
                (offset < start || offset >= end)
                    && !(offset == end && previous == Some(end))
            }
        }
    }
}

/// Disassemble a binary, keep the lines the selector names, rebuild the
/// offset table for the kept subset under `source_id`, and return the text.
pub fn extract_part(
    cache: &WasmStateCache,
    source_id: &str,
    selector: &PartSelector,
    bytes: &[u8],
    disassembler: &dyn Disassembler,
) -> String {
    let mut result = disassembler.disassemble(bytes);
    if result.is_empty() {
        result = Disassembly {
            lines: vec![EMPTY_DISASSEMBLY_LINE.to_string()],
            offsets: vec![0],
        };
    }

    let mut text_lines = Vec::new();
    let mut offsets = Vec::new();
    for (i, line) in result.lines.iter().enumerate() {
        let offset = result.offsets[i];
        let previous = i.checked_sub(1).map(|p| result.offsets[p]);
        if selector.keeps(offset, previous) {
            text_lines.push(line.as_str());
            offsets.push(offset);
        }
    }

    cache.record(source_id, offsets);
    text_lines.join("\n")
}
