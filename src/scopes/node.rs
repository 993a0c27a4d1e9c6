//! The debug-info node model.
//!
//! Nodes arrive as JSON-shaped data with a `tag` discriminator; each variant
//! carries only the attributes meaningful for its tag.

use serde::Deserialize;

/// A location attribute: either one hex-encoded expression valid everywhere,
/// or a list of expressions each valid for a PC range.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum LocationExpression {
    Hex(String),
    Ranged(Vec<RangedExpression>),
}

/// One `{ expression, validity-range }` pair of a ranged location.
#[derive(Debug, Clone, Deserialize)]
pub struct RangedExpression {
    pub expr: String,
    /// Half-open `[lo, hi)` PC range.
    pub range: (u64, u64),
}

impl LocationExpression {
    /// Pick the hex expression valid at `pc`, if any.
    pub fn expression_at(&self, pc: u64) -> Option<&str> {
        match self {
            LocationExpression::Hex(expr) => Some(expr),
            LocationExpression::Ranged(list) => list
                .iter()
                .find(|r| r.range.0 <= pc && pc < r.range.1)
                .map(|r| r.expr.as_str()),
        }
    }
}

/// A node of the debug-info tree.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "tag", rename_all = "snake_case")]
pub enum DebugInfoNode {
    CompileUnit(CompileUnitNode),
    Namespace(ContainerNode),
    StructureType(ContainerNode),
    UnionType(ContainerNode),
    Subprogram(SubprogramNode),
    InlinedSubroutine(InlinedSubroutineNode),
    Variable(VariableNode),
    FormalParameter(VariableNode),
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompileUnitNode {
    pub name: Option<String>,
    pub ranges: Option<Vec<(u64, u64)>>,
    pub low_pc: Option<u64>,
    pub high_pc: Option<u64>,
    #[serde(default)]
    pub children: Vec<DebugInfoNode>,
}

/// Organizational scope (namespace, structure, union): never filters by PC.
#[derive(Debug, Clone, Deserialize)]
pub struct ContainerNode {
    pub name: Option<String>,
    #[serde(default)]
    pub children: Vec<DebugInfoNode>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubprogramNode {
    pub name: Option<String>,
    pub linkage_name: Option<String>,
    pub ranges: Option<Vec<(u64, u64)>>,
    pub low_pc: Option<u64>,
    pub high_pc: Option<u64>,
    pub frame_base: Option<LocationExpression>,
    #[serde(default)]
    pub children: Vec<DebugInfoNode>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InlinedSubroutineNode {
    /// Linkage-name key of the out-of-line definition this was inlined from.
    pub abstract_origin: Option<String>,
    pub call_file: Option<u64>,
    pub call_line: Option<u64>,
    pub ranges: Option<Vec<(u64, u64)>>,
    pub low_pc: Option<u64>,
    pub high_pc: Option<u64>,
    #[serde(default)]
    pub children: Vec<DebugInfoNode>,
}

/// A `variable` or `formal_parameter` leaf.
#[derive(Debug, Clone, Deserialize)]
pub struct VariableNode {
    pub name: Option<String>,
    pub location: Option<LocationExpression>,
}

/// A node is in range when any of its `ranges` pairs contains `pc`, or its
/// `low_pc <= pc < high_pc`. A node with neither attribute is never in range.
fn in_range(
    ranges: Option<&[(u64, u64)]>,
    low_pc: Option<u64>,
    high_pc: Option<u64>,
    pc: u64,
) -> bool {
    if let Some(ranges) = ranges {
        return ranges.iter().any(|&(lo, hi)| lo <= pc && pc < hi);
    }
    if let (Some(lo), Some(hi)) = (low_pc, high_pc) {
        return lo <= pc && pc < hi;
    }
    false
}

impl CompileUnitNode {
    pub fn is_in_range(&self, pc: u64) -> bool {
        in_range(self.ranges.as_deref(), self.low_pc, self.high_pc, pc)
    }
}

impl SubprogramNode {
    pub fn is_in_range(&self, pc: u64) -> bool {
        in_range(self.ranges.as_deref(), self.low_pc, self.high_pc, pc)
    }
}

impl InlinedSubroutineNode {
    pub fn is_in_range(&self, pc: u64) -> bool {
        in_range(self.ranges.as_deref(), self.low_pc, self.high_pc, pc)
    }
}

impl DebugInfoNode {
    /// Ordered child nodes; leaves yield an empty slice.
    pub fn children(&self) -> &[DebugInfoNode] {
        match self {
            DebugInfoNode::CompileUnit(n) => &n.children,
            DebugInfoNode::Namespace(n)
            | DebugInfoNode::StructureType(n)
            | DebugInfoNode::UnionType(n) => &n.children,
            DebugInfoNode::Subprogram(n) => &n.children,
            DebugInfoNode::InlinedSubroutine(n) => &n.children,
            DebugInfoNode::Variable(_) | DebugInfoNode::FormalParameter(_) => &[],
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            DebugInfoNode::CompileUnit(n) => n.name.as_deref(),
            DebugInfoNode::Namespace(n)
            | DebugInfoNode::StructureType(n)
            | DebugInfoNode::UnionType(n) => n.name.as_deref(),
            DebugInfoNode::Subprogram(n) => n.name.as_deref(),
            DebugInfoNode::Variable(n) | DebugInfoNode::FormalParameter(n) => n.name.as_deref(),
            DebugInfoNode::InlinedSubroutine(_) => None,
        }
    }

    pub fn linkage_name(&self) -> Option<&str> {
        match self {
            DebugInfoNode::Subprogram(n) => n.linkage_name.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranges_take_precedence_over_pc_bounds() {
        // An empty ranges list means "never in range" even with pc bounds set.
        assert!(!in_range(Some(&[]), Some(0), Some(100), 50));
        assert!(in_range(Some(&[(0, 10), (40, 60)]), None, None, 50));
        assert!(!in_range(Some(&[(0, 10), (40, 60)]), None, None, 60));
    }

    #[test]
    fn pc_bounds_are_half_open() {
        assert!(in_range(None, Some(10), Some(50), 10));
        assert!(!in_range(None, Some(10), Some(50), 50));
        assert!(!in_range(None, None, None, 0));
    }

    #[test]
    fn node_deserializes_by_tag() {
        let node: DebugInfoNode = serde_json::from_str(
            r#"{
                "tag": "subprogram",
                "name": "main",
                "linkage_name": "_Z4mainv",
                "low_pc": 10,
                "high_pc": 50,
                "children": [
                    { "tag": "formal_parameter", "name": "argc", "location": "ed0000" }
                ]
            }"#,
        )
        .unwrap();
        assert_eq!(node.linkage_name(), Some("_Z4mainv"));
        assert_eq!(node.children().len(), 1);
        assert!(matches!(node.children()[0], DebugInfoNode::FormalParameter(_)));
    }

    #[test]
    fn ranged_location_selects_by_pc() {
        let loc: LocationExpression = serde_json::from_str(
            r#"[
                { "expr": "309f", "range": [10, 30] },
                { "expr": "319f", "range": [30, 60] }
            ]"#,
        )
        .unwrap();
        assert_eq!(loc.expression_at(20), Some("309f"));
        assert_eq!(loc.expression_at(30), Some("319f"));
        assert_eq!(loc.expression_at(60), None);
    }
}
