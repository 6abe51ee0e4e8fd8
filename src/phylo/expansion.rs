use super::{NodeId, TaxonomyTree};
use std::collections::HashSet;

/// A row that would be shown for the current [ExpansionState].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleRow {
    pub node_id: NodeId,
    pub depth: usize,
    pub has_children: bool,
    pub is_expanded: bool,
}

/// Which nodes of a [TaxonomyTree] are currently expanded.
///
/// Children of a node are only materialized (see
/// [ExpansionState::visible_children]) while the node is expanded. Only
/// nodes with children can be expanded. The tree itself is never touched.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExpansionState {
    expanded: HashSet<NodeId>,
}

impl ExpansionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root_expanded(tree: &TaxonomyTree) -> Self {
        let mut state = Self::new();
        _ = state.expand(tree, tree.root_id());
        state
    }

    pub fn is_expanded(&self, node_id: NodeId) -> bool {
        self.expanded.contains(&node_id)
    }

    pub fn expanded_count(&self) -> usize {
        self.expanded.len()
    }

    /// Returns `true` if the node was not expanded before.
    pub fn expand(&mut self, tree: &TaxonomyTree, node_id: NodeId) -> bool {
        match tree.node(node_id) {
            Some(node) if node.has_children() => self.expanded.insert(node_id),
            _ => false,
        }
    }

    /// Returns `true` if the node was expanded before.
    pub fn collapse(&mut self, node_id: NodeId) -> bool {
        self.expanded.remove(&node_id)
    }

    /// Flips the node and returns whether it is expanded afterwards.
    pub fn toggle(&mut self, tree: &TaxonomyTree, node_id: NodeId) -> bool {
        if !self.collapse(node_id) {
            _ = self.expand(tree, node_id);
        }
        self.is_expanded(node_id)
    }

    pub fn expand_all(&mut self, tree: &TaxonomyTree) {
        self.expanded.extend(
            tree.preorder(tree.root_id())
                .filter(|node| node.has_children())
                .map(|node| node.node_id()),
        );
    }

    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }

    /// Expands every ancestor of `node_id` so that it becomes visible.
    pub fn expand_to(&mut self, tree: &TaxonomyTree, node_id: NodeId) {
        let mut current = tree.parent_id(node_id);
        while let Some(ancestor_id) = current {
            _ = self.expand(tree, ancestor_id);
            current = tree.parent_id(ancestor_id);
        }
    }

    pub fn visible_children<'a>(
        &self,
        tree: &'a TaxonomyTree,
        node_id: NodeId,
    ) -> Option<&'a [NodeId]> {
        let child_ids = tree.child_ids(node_id);
        if self.is_expanded(node_id) && !child_ids.is_empty() {
            Some(child_ids)
        } else {
            None
        }
    }

    /// Rows reachable from the root through expanded nodes, in pre-order.
    pub fn visible_rows(&self, tree: &TaxonomyTree) -> Vec<VisibleRow> {
        let mut rows: Vec<VisibleRow> = Vec::new();
        let mut stack: Vec<NodeId> = vec![tree.root_id()];

        while let Some(node_id) = stack.pop() {
            let Some(node) = tree.node(node_id) else {
                continue;
            };
            let is_expanded = self.is_expanded(node_id);
            rows.push(VisibleRow {
                node_id,
                depth: node.depth(),
                has_children: node.has_children(),
                is_expanded,
            });
            if let Some(child_ids) = self.visible_children(tree, node_id) {
                stack.extend(child_ids.iter().rev());
            }
        }

        rows
    }
}
