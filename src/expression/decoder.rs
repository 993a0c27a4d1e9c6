//! The location-expression interpreter.

use super::cursor::ExprCursor;
use regex::{NoExpand, Regex};
use std::sync::OnceLock;

/// Placeholder token standing in for the frame-base expression. Callers
/// substitute a concrete frame base before evaluating in the debuggee.
pub const FRAME_BASE_PLACEHOLDER: &str = "fp()";

/// Sentinel pushed by `DW_OP_stack_value`: the entry below is already a
/// value, not an address.
const VALUE_SENTINEL: &str = "<value>";

/// Supported opcode byte values.
mod opcode {
    pub const ADDR: u8 = 0x03;
    pub const CONST1U: u8 = 0x08;
    pub const CONST1S: u8 = 0x09;
    pub const CONST2U: u8 = 0x0a;
    pub const CONST2S: u8 = 0x0b;
    pub const CONST4U: u8 = 0x0c;
    pub const CONST4S: u8 = 0x0d;
    pub const CONSTU: u8 = 0x10;
    pub const CONSTS: u8 = 0x11;
    pub const MINUS: u8 = 0x1c;
    pub const PLUS: u8 = 0x22;
    pub const PLUS_UCONST: u8 = 0x23;
    pub const LIT0: u8 = 0x30;
    pub const LIT31: u8 = 0x4f;
    pub const PIECE: u8 = 0x93;
    pub const STACK_VALUE: u8 = 0x9f;
    /// WASM location extension.
    pub const WASM_LOCATION: u8 = 0xed;
    /// Legacy byte value of the WASM extension, still emitted by older
    /// toolchains.
    pub const WASM_LOCATION_LEGACY: u8 = 0xf6;
}

/// Render a 4-byte little-endian unsigned read from linear memory at `addr`.
///
/// The exact text matters: it is evaluated verbatim by the debuggee-side
/// evaluator against the module's first memory.
fn heap_expr(addr: &str) -> String {
    format!("(new DataView(memory0.buffer).getUint32({}, true))", addr)
}

/// Resolve the top of stack into a final expression. A `stack_value`
/// sentinel on top means the entry below it is the value itself; anything
/// else is an address and gets wrapped in a memory read.
fn pop_location(stack: &mut Vec<String>) -> Option<String> {
    let loc = stack.pop()?;
    if loc == VALUE_SENTINEL {
        return stack.pop();
    }
    Some(heap_expr(&loc))
}

/// Interpret a location-expression byte stream into a symbolic source
/// expression.
///
/// The operand stack is seeded with `frame_base`, or the `fp()` placeholder
/// when none is supplied. Returns `None` for an unsupported opcode or a
/// truncated stream.
pub fn decode_expression(bytes: &[u8], frame_base: Option<&str>) -> Option<String> {
    let mut cur = ExprCursor::new(bytes);
    let mut stack = vec![frame_base.unwrap_or(FRAME_BASE_PLACEHOLDER).to_string()];

    while let Some(code) = cur.read_u8() {
        match code {
            opcode::ADDR => {
                let addr = cur.read_u32()?;
                stack.push(heap_expr(&addr.to_string()));
            }
            opcode::CONST1U => stack.push(cur.read_u8()?.to_string()),
            opcode::CONST1S => stack.push(cur.read_i8()?.to_string()),
            opcode::CONST2U => stack.push(cur.read_u16()?.to_string()),
            opcode::CONST2S => stack.push(cur.read_i16()?.to_string()),
            opcode::CONST4U => stack.push(cur.read_u32()?.to_string()),
            opcode::CONST4S => stack.push(cur.read_i32()?.to_string()),
            opcode::CONSTU => stack.push(cur.read_uleb()?.to_string()),
            opcode::CONSTS => stack.push(cur.read_sleb()?.to_string()),
            opcode::MINUS => {
                let b = stack.pop()?;
                let a = stack.pop()?;
                stack.push(format!("{}-{}", a, b));
            }
            opcode::PLUS => {
                let b = stack.pop()?;
                let a = stack.pop()?;
                stack.push(format!("{}+{}", a, b));
            }
            opcode::PLUS_UCONST => {
                let b = cur.read_uleb()?;
                let a = stack.pop()?;
                stack.push(format!("{}+{}", a, b));
            }
            opcode::LIT0..=opcode::LIT31 => {
                stack.push((code - opcode::LIT0).to_string());
            }
            opcode::PIECE => {
                let size = cur.read_sleb()?;
                let loc = pop_location(&mut stack)?;
                stack.push(format!("piece({}, {})", loc, size));
            }
            opcode::STACK_VALUE => stack.push(VALUE_SENTINEL.to_string()),
            opcode::WASM_LOCATION | opcode::WASM_LOCATION_LEGACY => {
                // Kind 0 names a WASM local; other kinds become a generic
                // typed-index reference. Either way the instruction's result
                // is the whole expression.
                let kind = cur.read_uleb()?;
                let index = cur.read_sleb()?;
                if kind == 0 {
                    return Some(format!("var{}", index));
                }
                return Some(format!("ti{}({})", kind, index));
            }
            _ => {
                tracing::debug!(opcode = code, "Unsupported location-expression opcode");
                return None;
            }
        }
    }

    pop_location(&mut stack)
}

/// Decode a hex-encoded location expression, falling back to a diagnostic
/// `dwarf("<hex>")` placeholder when decoding fails.
///
/// A trailing `// ...` comment after the hex digits is stripped first; each
/// byte is exactly two hex characters.
pub fn decode_hex_expression(expr: &str, frame_base: Option<&str>) -> String {
    let digits = match expr.find("//") {
        Some(idx) => expr[..idx].trim(),
        None => expr.trim(),
    };
    decode_hex_bytes(digits)
        .and_then(|bytes| decode_expression(&bytes, frame_base))
        .unwrap_or_else(|| format!("dwarf(\"{}\")", digits))
}

fn decode_hex_bytes(digits: &str) -> Option<Vec<u8>> {
    if !digits.is_ascii() {
        return None;
    }
    // A trailing lone nibble is dropped rather than failing the decode.
    let even = &digits[..digits.len() & !1];
    hex::decode(even).ok()
}

/// Substitute a concrete frame-base expression for every word-bounded
/// `fp()` placeholder, for re-evaluation in a live debuggee context.
pub fn substitute_frame_base(expr: &str, frame_base: &str) -> String {
    static FP: OnceLock<Regex> = OnceLock::new();
    let re = FP.get_or_init(|| Regex::new(r"\bfp\(\)").expect("static pattern"));
    re.replace_all(expr, NoExpand(frame_base)).into_owned()
}
