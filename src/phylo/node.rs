use crate::TreeFloat;
use slotmap::new_key_type;
use std::{fmt::Display, sync::Arc};

new_key_type! { pub struct NodeId; }

/// One addressable node of a flattened [TaxonomyTree](super::TaxonomyTree).
#[derive(Debug, Default, Clone, PartialEq)]
pub struct FlatNode {
    node_id: NodeId,
    parent_id: Option<NodeId>,
    child_ids: Vec<NodeId>,
    name: Option<Arc<str>>,
    accession: Option<Arc<str>>,
    taxon_id: Option<Arc<str>>,
    branch_length: Option<TreeFloat>,
    depth: usize,
    is_leaf: bool,
}

impl FlatNode {
    pub(crate) fn new(
        name: Option<String>,
        accession: Option<String>,
        taxon_id: Option<String>,
        branch_length: Option<TreeFloat>,
    ) -> Self {
        Self {
            name: name.map(Arc::from),
            accession: accession.map(Arc::from),
            taxon_id: taxon_id.map(Arc::from),
            branch_length,
            ..Self::default()
        }
    }

    pub fn node_id(&self) -> NodeId {
        self.node_id
    }

    pub(crate) fn set_node_id(&mut self, node_id: NodeId) {
        self.node_id = node_id;
    }

    pub fn parent_id(&self) -> Option<NodeId> {
        self.parent_id
    }

    pub(crate) fn set_parent_id(&mut self, parent_id: Option<NodeId>) {
        self.parent_id = parent_id;
    }

    pub fn child_ids(&self) -> &[NodeId] {
        &self.child_ids
    }

    pub(crate) fn add_child_id(&mut self, node_id: NodeId) {
        self.child_ids.push(node_id);
    }

    pub fn child_node_count(&self) -> usize {
        self.child_ids.len()
    }

    pub fn has_children(&self) -> bool {
        !self.child_ids.is_empty()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn accession(&self) -> Option<&str> {
        self.accession.as_deref()
    }

    pub fn taxon_id(&self) -> Option<&str> {
        self.taxon_id.as_deref()
    }

    pub fn branch_length(&self) -> Option<TreeFloat> {
        self.branch_length
    }

    /// Distance from the root; the root is at depth 0.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub(crate) fn set_depth(&mut self, depth: usize) {
        self.depth = depth;
    }

    pub fn is_leaf(&self) -> bool {
        self.is_leaf
    }

    pub(crate) fn set_is_leaf(&mut self, is_leaf: bool) {
        self.is_leaf = is_leaf;
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let disp = format!("{self:?}");
        write!(f, "{}", &disp[7..disp.len() - 1])
    }
}
