//! Line-number rendering for WASM sources: a line's "number" is the byte
//! offset of the instruction it shows, as zero-padded 8-digit hex.

use super::state::WasmStateCache;

/// Stateful formatter for one source id.
///
/// The digit buffer and the previous leading-zero watermark persist between
/// calls so consecutive renders only rewrite the digits that changed. Gutter
/// rendering calls this once per visible line, in order.
#[derive(Debug)]
pub struct LineNumberFormatter {
    source_id: String,
    buffer: [u8; 8],
    last_zero: isize,
}

impl LineNumberFormatter {
    pub fn new(source_id: &str) -> Self {
        Self {
            source_id: source_id.to_string(),
            buffer: [b'0'; 8],
            last_zero: 7,
        }
    }

    /// Render the 1-based display line `number` as the hex byte offset of
    /// the corresponding disassembly line; empty when the source is unknown.
    pub fn format(&mut self, cache: &WasmStateCache, number: usize) -> String {
        let Some(offset) = number
            .checked_sub(1)
            .and_then(|line| cache.line_to_offset(&self.source_id, line))
        else {
            return String::new();
        };

        let mut i: isize = 7;
        let mut n = offset;
        while n != 0 && i >= 0 {
            let nibble = (n & 15) as u8;
            self.buffer[i as usize] = if nibble < 10 {
                b'0' + nibble
            } else {
                b'A' - 10 + nibble
            };
            n >>= 4;
            i -= 1;
        }
        // Clear digits left over from a longer previous offset.
        let mut j = i;
        while j > self.last_zero {
            self.buffer[j as usize] = b'0';
            j -= 1;
        }
        self.last_zero = i;

        String::from_utf8_lossy(&self.buffer).into_owned()
    }
}
