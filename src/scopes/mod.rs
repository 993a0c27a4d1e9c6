//! Resolution of source-level scopes and variables from a debug-info tree.
//!
//! The tree arrives attached to a loaded source map as nested lexical scopes
//! (compile units, namespaces, types, subprograms, inlined subroutines).
//! Given a program counter, the resolver walks the tree to produce the active
//! chain of scopes innermost-first, decoding each scope's variable location
//! expressions at that PC and synthesizing call-site info for inlined frames.

mod index;
mod loader;
mod node;
mod resolver;

pub use index::LinkageIndex;
pub use loader::{DebugInfoBundle, DebugInfoCache, RawScopeData, SourceMapProvider};
pub use node::{
    CompileUnitNode, ContainerNode, DebugInfoNode, InlinedSubroutineNode, LocationExpression,
    RangedExpression, SubprogramNode, VariableNode,
};
pub use resolver::{FoundScope, MappedScope, ScopeVariable, ScopeVariables};
