//! Function byte-range indexing over a WASM binary.

use crate::logging;
use wasmparser::{Parser, Payload, TypeRef};

/// One function body's byte span in the binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionRange {
    /// Synthetic id `func<index>`, counting imported functions first.
    pub id: String,
    pub start: usize,
    pub end: usize,
}

impl FunctionRange {
    pub fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }
}

/// Stream-parse a module into an ordered list of function byte-ranges.
///
/// Imported functions occupy the leading index slots but have no body, so
/// ids for defined functions start at `func<imported-count>`. Parsing is
/// best-effort: the loop stops at the first unparseable section and returns
/// whatever ranges were completed.
pub fn build_function_index(bytes: &[u8]) -> Vec<FunctionRange> {
    let mut index = Vec::new();
    let mut imported = 0usize;
    let mut defined = 0usize;

    for payload in Parser::new(0).parse_all(bytes) {
        let payload = match payload {
            Ok(payload) => payload,
            Err(err) => {
                tracing::debug!(error = %err, "Stopping function index at parse error");
                break;
            }
        };
        match payload {
            Payload::ImportSection(reader) => {
                for import in reader {
                    match import {
                        Ok(import) => {
                            if matches!(import.ty, TypeRef::Func(_)) {
                                imported += 1;
                            }
                        }
                        Err(err) => {
                            tracing::debug!(error = %err, "Malformed import entry");
                            logging::log_function_index_built(index.len(), imported);
                            return index;
                        }
                    }
                }
            }
            Payload::CodeSectionEntry(body) => {
                let range = body.range();
                index.push(FunctionRange {
                    id: format!("func{}", imported + defined),
                    start: range.start,
                    end: range.end,
                });
                defined += 1;
            }
            Payload::End(_) => break,
            _ => {}
        }
    }

    logging::log_function_index_built(index.len(), imported);
    index
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_yields_empty_index() {
        assert!(build_function_index(&[]).is_empty());
    }

    #[test]
    fn garbage_input_yields_empty_index() {
        assert!(build_function_index(&[0xde, 0xad, 0xbe, 0xef]).is_empty());
    }
}
