//! Scope filtering and variable harvesting at a program counter.

use super::index::LinkageIndex;
use super::loader::DebugInfoBundle;
use super::node::{DebugInfoNode, LocationExpression};
use crate::expression::decode_hex_expression;
use crate::location::{generated_to_original_id, GeneratedLocation, SourceLocation};
use crate::logging;

/// One variable visible in a scope, with its decoded location expression.
/// `expr` is `None` when the variable has no location valid at the PC.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeVariable {
    pub name: String,
    pub expr: Option<String>,
}

/// The variables of one scope plus its decoded frame-base expression.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeVariables {
    pub vars: Vec<ScopeVariable>,
    pub frame_base: Option<String>,
}

/// A scope found during traversal, before original-source mapping.
#[derive(Debug, Clone)]
pub struct FoundScope {
    /// Linkage name of the subprogram (or of an inlined subroutine's origin).
    pub id: String,
    pub name: Option<String>,
    pub variables: ScopeVariables,
    /// Call-site file index, backfilled by an inlined callee.
    pub file: Option<u64>,
    /// Call-site line, backfilled by an inlined callee.
    pub line: Option<u64>,
}

/// A resolved scope ready for the caller: display name, evaluable variable
/// expressions, and the synthesized original-source location when known.
#[derive(Debug, Clone)]
pub struct MappedScope {
    pub display_name: String,
    pub variables: ScopeVariables,
    pub location: Option<SourceLocation>,
}

/// Decode a location attribute at `pc`. Ranged locations pick the
/// sub-expression whose range contains the PC; no match decodes to nothing.
fn decode_location_at(location: &LocationExpression, pc: u64) -> Option<String> {
    location
        .expression_at(pc)
        .map(|expr| decode_hex_expression(expr, None))
}

/// Harvest `variable`/`formal_parameter` children of a scope node, decoding
/// each location at `pc`, plus the scope's own frame base.
fn get_variables(
    children: &[DebugInfoNode],
    frame_base: Option<&LocationExpression>,
    pc: u64,
) -> ScopeVariables {
    let vars = children
        .iter()
        .filter_map(|child| match child {
            DebugInfoNode::Variable(v) | DebugInfoNode::FormalParameter(v) => Some(ScopeVariable {
                name: v.name.clone().unwrap_or_default(),
                expr: v.location.as_ref().and_then(|loc| decode_location_at(loc, pc)),
            }),
            _ => None,
        })
        .collect();
    let frame_base = frame_base.and_then(|fb| decode_location_at(fb, pc));
    ScopeVariables { vars, frame_base }
}

/// Depth-first scope filter.
///
/// Scopes are appended outer-to-inner; `enclosing` indexes the scope record
/// in `found` that lexically encloses the nodes being visited, so an inlined
/// subroutine can backfill its call site onto the caller's record.
fn filter_scopes(
    roots: &[DebugInfoNode],
    items: &[DebugInfoNode],
    pc: u64,
    enclosing: Option<usize>,
    index: &LinkageIndex,
    found: &mut Vec<FoundScope>,
) {
    for item in items {
        match item {
            DebugInfoNode::CompileUnit(unit) => {
                if unit.is_in_range(pc) {
                    filter_scopes(roots, &unit.children, pc, enclosing, index, found);
                }
            }
            DebugInfoNode::Namespace(container)
            | DebugInfoNode::StructureType(container)
            | DebugInfoNode::UnionType(container) => {
                filter_scopes(roots, &container.children, pc, enclosing, index, found);
            }
            DebugInfoNode::Subprogram(subprogram) => {
                if subprogram.is_in_range(pc) {
                    found.push(FoundScope {
                        id: subprogram.linkage_name.clone().unwrap_or_default(),
                        name: subprogram.name.clone(),
                        variables: get_variables(
                            &subprogram.children,
                            subprogram.frame_base.as_ref(),
                            pc,
                        ),
                        file: None,
                        line: None,
                    });
                    let this = found.len() - 1;
                    filter_scopes(roots, &subprogram.children, pc, Some(this), index, found);
                }
            }
            DebugInfoNode::InlinedSubroutine(inlined) => {
                if inlined.is_in_range(pc) {
                    let origin = inlined.abstract_origin.as_deref().unwrap_or_default();
                    let name = index
                        .resolve(roots, origin)
                        .and_then(|node| node.name())
                        .map(str::to_string);
                    // The caller's frame is annotated with where the
                    // inlining call occurred.
                    if let Some(enclosing) = enclosing {
                        found[enclosing].file = inlined.call_file;
                        found[enclosing].line = inlined.call_line;
                    }
                    found.push(FoundScope {
                        id: origin.to_string(),
                        name,
                        variables: get_variables(&inlined.children, None, pc),
                        file: None,
                        line: None,
                    });
                    let this = found.len() - 1;
                    filter_scopes(roots, &inlined.children, pc, Some(this), index, found);
                }
            }
            DebugInfoNode::Variable(_) | DebugInfoNode::FormalParameter(_) => {}
        }
    }
}

impl DebugInfoBundle {
    /// Resolve the chain of scopes active at a generated location,
    /// innermost-first, with variable expressions decoded at that PC.
    ///
    /// Debug-info addresses are relative to the code section start, so the
    /// location's byte offset is shifted by `code_section_offset` first; an
    /// offset before the code section resolves to no scopes.
    pub fn search(&self, generated: &GeneratedLocation) -> Vec<MappedScope> {
        let Some(pc) = generated.line.checked_sub(self.code_section_offset) else {
            return Vec::new();
        };

        let mut found = Vec::new();
        filter_scopes(
            &self.debug_info,
            &self.debug_info,
            pc,
            None,
            &self.linkage_index,
            &mut found,
        );
        found.reverse();
        logging::log_scopes_resolved(pc, found.len());

        found
            .into_iter()
            .map(|scope| {
                let location = scope.file.map(|file| {
                    let source = self
                        .sources
                        .get(file as usize)
                        .map(String::as_str)
                        .unwrap_or_default();
                    SourceLocation {
                        source_id: generated_to_original_id(&generated.source_id, source),
                        line: scope.line.unwrap_or(0),
                    }
                });
                MappedScope {
                    display_name: scope.name.unwrap_or_default(),
                    variables: scope.variables,
                    location,
                }
            })
            .collect()
    }
}
