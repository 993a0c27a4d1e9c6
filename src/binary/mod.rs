//! Parsing of raw WASM module binaries into function boundaries and
//! offset↔line tables over a textual disassembly.

mod disasm;
mod format;
mod index;
mod parts;
mod state;

pub use disasm::{Disassembler, Disassembly, WatDisassembler};
pub use format::LineNumberFormatter;
pub use index::{build_function_index, FunctionRange};
pub use parts::{extract_part, ByteRange, PartSelector};
pub use state::WasmStateCache;
