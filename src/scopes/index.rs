//! Linkage-name index over a debug-info tree.

use super::node::DebugInfoNode;
use std::collections::{HashMap, VecDeque};

/// Maps a linkage name to the node carrying it, for resolving
/// `abstract_origin` back-references from inlined subroutines.
///
/// Built once per tree before any resolution; immutable afterward. Nodes are
/// addressed by their child-index path from the tree roots so the index
/// never borrows from the tree it describes.
#[derive(Debug, Default)]
pub struct LinkageIndex {
    paths: HashMap<String, Vec<usize>>,
}

impl LinkageIndex {
    /// Build the index by a breadth-first traversal of the tree.
    pub fn build(roots: &[DebugInfoNode]) -> Self {
        let mut paths = HashMap::new();
        let mut queue: VecDeque<(Vec<usize>, &DebugInfoNode)> = roots
            .iter()
            .enumerate()
            .map(|(i, node)| (vec![i], node))
            .collect();

        while let Some((path, node)) = queue.pop_front() {
            if let Some(linkage_name) = node.linkage_name() {
                paths.insert(linkage_name.to_string(), path.clone());
            }
            for (i, child) in node.children().iter().enumerate() {
                let mut child_path = path.clone();
                child_path.push(i);
                queue.push_back((child_path, child));
            }
        }

        Self { paths }
    }

    /// Resolve a linkage name against the tree the index was built from.
    pub fn resolve<'a>(&self, roots: &'a [DebugInfoNode], key: &str) -> Option<&'a DebugInfoNode> {
        let path = self.paths.get(key)?;
        let (&first, rest) = path.split_first()?;
        let mut node = roots.get(first)?;
        for &i in rest {
            node = node.children().get(i)?;
        }
        Some(node)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.paths.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}
