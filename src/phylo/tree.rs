use super::flatten_tree;
use super::node::{FlatNode, NodeId};
use crate::TreeFloat;
use crate::parsers::TreeParseError;
use crate::parsers::newick::parse_newick;
use slotmap::SlotMap;
use std::fmt::Display;

/// A flattened taxonomy tree: every node addressable by [NodeId], plus the
/// id of the root.
///
/// Built once by [flatten_tree] and read-only afterwards.
#[derive(Debug, Clone)]
pub struct TaxonomyTree {
    nodes: SlotMap<NodeId, FlatNode>,
    root_id: NodeId,
}

impl TaxonomyTree {
    // =========================================================================
    // Construction
    // =========================================================================

    pub(crate) fn from_parts(
        nodes: SlotMap<NodeId, FlatNode>,
        root_id: NodeId,
    ) -> Self {
        Self { nodes, root_id }
    }

    /// Parses and flattens Newick text in one step.
    pub fn from_newick(text: &str) -> Result<Self, TreeParseError> {
        Ok(flatten_tree(parse_newick(text)?))
    }

    // =========================================================================
    // Node Access
    // =========================================================================

    pub fn root_id(&self) -> NodeId {
        self.root_id
    }

    pub fn root(&self) -> &FlatNode {
        &self.nodes[self.root_id]
    }

    pub fn node(&self, node_id: NodeId) -> Option<&FlatNode> {
        self.nodes.get(node_id)
    }

    pub fn node_exists(&self, node_id: NodeId) -> bool {
        self.nodes.contains_key(node_id)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn node_ids_all(&self) -> Vec<NodeId> {
        self.nodes.keys().collect()
    }

    pub fn parent_id(&self, node_id: NodeId) -> Option<NodeId> {
        self.node(node_id)?.parent_id()
    }

    /// Empty for leaves and for ids not in this tree.
    pub fn child_ids(&self, node_id: NodeId) -> &[NodeId] {
        match self.node(node_id) {
            Some(node) => node.child_ids(),
            None => &[],
        }
    }

    pub fn children(&self, node_id: NodeId) -> Vec<&FlatNode> {
        self.child_ids(node_id)
            .iter()
            .filter_map(|&child_id| self.node(child_id))
            .collect()
    }

    pub fn name(&self, node_id: NodeId) -> Option<&str> {
        self.node(node_id)?.name()
    }

    pub fn branch_length(&self, node_id: NodeId) -> Option<TreeFloat> {
        self.node(node_id)?.branch_length()
    }

    pub fn node_ids_by_name(&self, name: &str) -> Vec<NodeId> {
        self.preorder(self.root_id)
            .filter(|node| node.name() == Some(name))
            .map(FlatNode::node_id)
            .collect()
    }

    // =========================================================================
    // Tree Properties
    // =========================================================================

    pub fn leaf_count(&self) -> usize {
        self.nodes.values().filter(|node| node.is_leaf()).count()
    }

    pub fn max_depth(&self) -> usize {
        self.nodes.values().map(FlatNode::depth).max().unwrap_or(0)
    }

    // =========================================================================
    // Tree Traversal
    // =========================================================================

    /// Depth-first, pre-order walk of the subtree rooted at `node_id`,
    /// children in stored order.
    pub fn preorder(&self, node_id: NodeId) -> Preorder<'_> {
        let stack =
            if self.node_exists(node_id) { vec![node_id] } else { Vec::new() };
        Preorder { tree: self, stack }
    }

    // =========================================================================
    // Taxon Queries
    // =========================================================================

    /// First node in pre-order whose taxon id equals `taxon_id`.
    pub fn subtree_by_taxon_id(&self, taxon_id: &str) -> Option<&FlatNode> {
        self.subtree_by_taxon_id_from(self.root_id, taxon_id)
    }

    /// Like [TaxonomyTree::subtree_by_taxon_id], searching only below
    /// `node_id` (inclusive).
    pub fn subtree_by_taxon_id_from(
        &self,
        node_id: NodeId,
        taxon_id: &str,
    ) -> Option<&FlatNode> {
        self.preorder(node_id).find(|node| node.taxon_id() == Some(taxon_id))
    }

    /// Path from the root down to the first node carrying `taxon_id`, both
    /// ends included. Empty when no node matches.
    pub fn lineage_by_taxon_id(&self, taxon_id: &str) -> Vec<&FlatNode> {
        self.lineage_by_taxon_id_from(self.root_id, taxon_id)
    }

    /// Like [TaxonomyTree::lineage_by_taxon_id], with the path starting at
    /// `node_id` instead of the root.
    pub fn lineage_by_taxon_id_from(
        &self,
        node_id: NodeId,
        taxon_id: &str,
    ) -> Vec<&FlatNode> {
        let Some(target) = self.subtree_by_taxon_id_from(node_id, taxon_id)
        else {
            return Vec::new();
        };

        let mut lineage: Vec<&FlatNode> = vec![target];
        let mut current = target;
        while current.node_id() != node_id {
            let Some(parent) = current.parent_id().and_then(|id| self.node(id))
            else {
                break;
            };
            lineage.push(parent);
            current = parent;
        }

        lineage.reverse();
        lineage
    }

    /// Number of nodes with an accession in the whole tree.
    pub fn accession_count(&self) -> usize {
        self.accession_count_from(self.root_id)
    }

    /// Number of nodes with an accession below `node_id` (inclusive).
    pub fn accession_count_from(&self, node_id: NodeId) -> usize {
        self.preorder(node_id)
            .filter(|node| node.accession().is_some())
            .count()
    }

    // =========================================================================
    // Display
    // =========================================================================

    fn print_tree(&self) -> String {
        let mut result: String = String::new();
        result.push_str(&format!(
            "Nodes: {}\nLeaves: {}\nAccessions: {}\nMax depth: {}\n\n",
            self.node_count(),
            self.leaf_count(),
            self.accession_count(),
            self.max_depth(),
        ));

        for node in self.preorder(self.root_id) {
            result.push_str(&print_node(node));
        }

        result
    }
}

fn print_node(node: &FlatNode) -> String {
    format!(
        "{}- {} | {} | {} | {} | {:<5.3}\n",
        " ".repeat(node.depth() * 4),
        node.node_id(),
        node.name().unwrap_or("None"),
        node.accession().unwrap_or("None"),
        node.taxon_id().unwrap_or("None"),
        node.branch_length().unwrap_or(TreeFloat::NAN),
    )
}

impl Display for TaxonomyTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.print_tree())
    }
}

/// Iterator returned by [TaxonomyTree::preorder].
#[derive(Debug, Clone)]
pub struct Preorder<'a> {
    tree: &'a TaxonomyTree,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for Preorder<'a> {
    type Item = &'a FlatNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.tree.node(self.stack.pop()?)?;
        self.stack.extend(node.child_ids().iter().rev());
        Some(node)
    }
}
