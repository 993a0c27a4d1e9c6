//! Decoding of DWARF-style location expressions into symbolic source
//! expressions.
//!
//! A location expression is a byte-coded stack-machine program attached to a
//! debug-info node. Decoding runs the program against an operand stack of
//! expression *text* (operands may be symbolic memory reads, so nothing is
//! ever folded numerically) and yields a string the debuggee-side evaluator
//! can execute, or `None` when an opcode is unsupported or the stream is
//! truncated.

mod cursor;
mod decoder;

pub use cursor::ExprCursor;
pub use decoder::{
    decode_expression, decode_hex_expression, substitute_frame_base, FRAME_BASE_PLACEHOLDER,
};
