//! Per-source-id offset↔line tables for disassembled WASM sources.

use super::disasm::{Disassembler, Disassembly};
use crate::config::DisassemblyConfig;
use crate::logging;
use std::collections::HashMap;
use std::sync::Mutex;

/// Diagnostic line substituted when the disassembler produces no output.
pub(crate) const EMPTY_DISASSEMBLY_LINE: &str = "No luck with wast conversion";

/// The bidirectional table for one disassembled source: byte offset per line,
/// and line index per byte offset. When several lines start at the same
/// offset, the offset maps to the last of them.
#[derive(Debug, Default)]
struct WasmState {
    offsets: Vec<usize>,
    lines: HashMap<usize, usize>,
}

impl WasmState {
    fn from_offsets(offsets: Vec<usize>) -> Self {
        let mut lines = HashMap::with_capacity(offsets.len());
        for (line, &offset) in offsets.iter().enumerate() {
            lines.insert(offset, line);
        }
        Self { offsets, lines }
    }
}

/// Cache of offset↔line tables keyed by source id.
///
/// Entries are overwritten on each full re-disassembly of the same source id
/// and dropped only by [`WasmStateCache::clear`] on session teardown.
#[derive(Debug, Default)]
pub struct WasmStateCache {
    states: Mutex<HashMap<String, WasmState>>,
}

impl WasmStateCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the offset table for a source id, replacing any previous one.
    pub fn record(&self, source_id: &str, offsets: Vec<usize>) {
        let mut states = self.states.lock().expect("wasm state lock");
        states.insert(source_id.to_string(), WasmState::from_offsets(offsets));
    }

    /// Disassemble a whole module, cache its offset table under `source_id`,
    /// and return the text lines, truncated per `config` for pathologically
    /// large modules.
    pub fn render_text(
        &self,
        source_id: &str,
        bytes: &[u8],
        disassembler: &dyn Disassembler,
        config: &DisassemblyConfig,
    ) -> Vec<String> {
        let mut result = disassembler.disassemble(bytes);
        if result.is_empty() {
            result = Disassembly {
                lines: vec![EMPTY_DISASSEMBLY_LINE.to_string()],
                offsets: vec![0],
            };
        }

        self.record(source_id, result.offsets);

        let mut lines = result.lines;
        let truncated = lines.len() > config.max_lines;
        if truncated {
            lines.truncate(config.max_lines);
            lines.push(config.truncation_marker.clone());
        }
        logging::log_disassembly_rendered(source_id, lines.len(), truncated);
        lines
    }

    /// Translate a 0-based line index to its byte offset. Lines past the end
    /// of the table fall back to the last known line.
    pub fn line_to_offset(&self, source_id: &str, line: usize) -> Option<usize> {
        let states = self.states.lock().expect("wasm state lock");
        let state = states.get(source_id)?;
        if state.offsets.is_empty() {
            return None;
        }
        let line = line.min(state.offsets.len() - 1);
        Some(state.offsets[line])
    }

    /// Translate a byte offset to the line starting at it, if any.
    pub fn offset_to_line(&self, source_id: &str, offset: usize) -> Option<usize> {
        let states = self.states.lock().expect("wasm state lock");
        states.get(source_id)?.lines.get(&offset).copied()
    }

    /// Whether a source id has a recorded disassembly table.
    pub fn is_known_source(&self, source_id: &str) -> bool {
        let states = self.states.lock().expect("wasm state lock");
        states.contains_key(source_id)
    }

    /// Drop every table. Invoked on session teardown.
    pub fn clear(&self) {
        let mut states = self.states.lock().expect("wasm state lock");
        let count = states.len();
        states.clear();
        logging::log_cache_cleared("wasm-state", count);
    }
}
