//! Disassembly of a module binary into ordered text lines, each annotated
//! with its originating byte offset.
//!
//! Disassembly text generation is a replaceable primitive: hosts with a
//! full-fidelity wast printer implement [`Disassembler`] over it.
//! [`WatDisassembler`] is the built-in stand-in, good enough for offset
//! mapping and for reading stepped-through code.

use wasmparser::{Operator, Parser, Payload};

/// Ordered disassembly lines with a parallel per-line byte offset.
#[derive(Debug, Clone, Default)]
pub struct Disassembly {
    pub lines: Vec<String>,
    pub offsets: Vec<usize>,
}

impl Disassembly {
    fn push(&mut self, offset: usize, line: String) {
        self.offsets.push(offset);
        self.lines.push(line);
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }
}

/// Turns a binary span into ordered lines with per-line originating offsets.
pub trait Disassembler: Send + Sync {
    fn disassemble(&self, bytes: &[u8]) -> Disassembly;
}

/// Built-in text disassembler over `wasmparser` operators.
#[derive(Debug, Clone, Copy, Default)]
pub struct WatDisassembler;

impl Disassembler for WatDisassembler {
    fn disassemble(&self, bytes: &[u8]) -> Disassembly {
        let mut out = Disassembly::default();
        let mut func = 0usize;

        for payload in Parser::new(0).parse_all(bytes) {
            let payload = match payload {
                Ok(payload) => payload,
                Err(err) => {
                    tracing::debug!(error = %err, "Stopping disassembly at parse error");
                    break;
                }
            };
            match payload {
                Payload::Version { .. } => out.push(0, "(module".to_string()),
                Payload::CodeSectionEntry(body) => {
                    let start = body.range().start;
                    out.push(start, format!("  (func (;{};)", func));
                    func += 1;
                    let Ok(reader) = body.get_operators_reader() else {
                        break;
                    };
                    let mut ok = true;
                    for item in reader.into_iter_with_offsets() {
                        match item {
                            Ok((op, offset)) => {
                                out.push(offset, format!("    {}", operator_text(&op)));
                            }
                            Err(err) => {
                                tracing::debug!(error = %err, "Stopping disassembly mid-body");
                                ok = false;
                                break;
                            }
                        }
                    }
                    if !ok {
                        break;
                    }
                }
                Payload::End(offset) => {
                    out.push(offset, ")".to_string());
                    break;
                }
                _ => {}
            }
        }

        out
    }
}

/// Render one operator as text. Immediates are shown for the operators a
/// debugger most often steps through; the rest keep just their mnemonic.
fn operator_text(op: &Operator) -> String {
    match op {
        Operator::LocalGet { local_index } => format!("local.get {}", local_index),
        Operator::LocalSet { local_index } => format!("local.set {}", local_index),
        Operator::LocalTee { local_index } => format!("local.tee {}", local_index),
        Operator::GlobalGet { global_index } => format!("global.get {}", global_index),
        Operator::GlobalSet { global_index } => format!("global.set {}", global_index),
        Operator::Call { function_index } => format!("call {}", function_index),
        Operator::Br { relative_depth } => format!("br {}", relative_depth),
        Operator::BrIf { relative_depth } => format!("br_if {}", relative_depth),
        Operator::I32Const { value } => format!("i32.const {}", value),
        Operator::I64Const { value } => format!("i64.const {}", value),
        Operator::F32Const { value } => format!("f32.const {}", f32::from_bits(value.bits())),
        Operator::F64Const { value } => format!("f64.const {}", f64::from_bits(value.bits())),
        Operator::I32Load { memarg } => format!("i32.load offset={}", memarg.offset),
        Operator::I64Load { memarg } => format!("i64.load offset={}", memarg.offset),
        Operator::I32Store { memarg } => format!("i32.store offset={}", memarg.offset),
        Operator::I64Store { memarg } => format!("i64.store offset={}", memarg.offset),
        _ => operator_name(op).to_string(),
    }
}

fn operator_name(op: &Operator) -> &'static str {
    match op {
        Operator::Unreachable => "unreachable",
        Operator::Nop => "nop",
        Operator::Block { .. } => "block",
        Operator::Loop { .. } => "loop",
        Operator::If { .. } => "if",
        Operator::Else => "else",
        Operator::End => "end",
        Operator::BrTable { .. } => "br_table",
        Operator::Return => "return",
        Operator::CallIndirect { .. } => "call_indirect",
        Operator::Drop => "drop",
        Operator::Select => "select",
        Operator::F32Load { .. } => "f32.load",
        Operator::F64Load { .. } => "f64.load",
        Operator::I32Load8S { .. } => "i32.load8_s",
        Operator::I32Load8U { .. } => "i32.load8_u",
        Operator::I32Load16S { .. } => "i32.load16_s",
        Operator::I32Load16U { .. } => "i32.load16_u",
        Operator::F32Store { .. } => "f32.store",
        Operator::F64Store { .. } => "f64.store",
        Operator::I32Store8 { .. } => "i32.store8",
        Operator::I32Store16 { .. } => "i32.store16",
        Operator::MemorySize { .. } => "memory.size",
        Operator::MemoryGrow { .. } => "memory.grow",
        Operator::I32Eqz => "i32.eqz",
        Operator::I32Eq => "i32.eq",
        Operator::I32Ne => "i32.ne",
        Operator::I32LtS => "i32.lt_s",
        Operator::I32LtU => "i32.lt_u",
        Operator::I32GtS => "i32.gt_s",
        Operator::I32GtU => "i32.gt_u",
        Operator::I32LeS => "i32.le_s",
        Operator::I32LeU => "i32.le_u",
        Operator::I32GeS => "i32.ge_s",
        Operator::I32GeU => "i32.ge_u",
        Operator::I64Eqz => "i64.eqz",
        Operator::I64Eq => "i64.eq",
        Operator::I64Ne => "i64.ne",
        Operator::I32Clz => "i32.clz",
        Operator::I32Ctz => "i32.ctz",
        Operator::I32Popcnt => "i32.popcnt",
        Operator::I32Add => "i32.add",
        Operator::I32Sub => "i32.sub",
        Operator::I32Mul => "i32.mul",
        Operator::I32DivS => "i32.div_s",
        Operator::I32DivU => "i32.div_u",
        Operator::I32RemS => "i32.rem_s",
        Operator::I32RemU => "i32.rem_u",
        Operator::I32And => "i32.and",
        Operator::I32Or => "i32.or",
        Operator::I32Xor => "i32.xor",
        Operator::I32Shl => "i32.shl",
        Operator::I32ShrS => "i32.shr_s",
        Operator::I32ShrU => "i32.shr_u",
        Operator::I64Add => "i64.add",
        Operator::I64Sub => "i64.sub",
        Operator::I64Mul => "i64.mul",
        Operator::F32Add => "f32.add",
        Operator::F32Sub => "f32.sub",
        Operator::F32Mul => "f32.mul",
        Operator::F32Div => "f32.div",
        Operator::F64Add => "f64.add",
        Operator::F64Sub => "f64.sub",
        Operator::F64Mul => "f64.mul",
        Operator::F64Div => "f64.div",
        Operator::I32WrapI64 => "i32.wrap_i64",
        Operator::I64ExtendI32S => "i64.extend_i32_s",
        Operator::I64ExtendI32U => "i64.extend_i32_u",
        _ => "unknown",
    }
}
