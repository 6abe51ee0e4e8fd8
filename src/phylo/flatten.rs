use super::{FlatNode, NodeId, TaxonomyTree};
use crate::ParsedNode;
use slotmap::SlotMap;

/// Converts a parsed tree into an addressable [TaxonomyTree].
///
/// Nodes are visited depth-first in pre-order and receive their ids in that
/// order, so the same input always yields the same ids. Before descending,
/// each node is checked for the redundant-wrapper pattern (a single leaf
/// child with the same name and an accession) and collapsed into one leaf
/// if it matches.
///
/// Collapsing is applied once per node; it does not chain through several
/// same-named wrappers.
pub fn flatten_tree(root: ParsedNode) -> TaxonomyTree {
    let mut nodes: SlotMap<NodeId, FlatNode> = SlotMap::with_key();

    let (root_node, root_children) = to_flat_node(root, None, 0);
    let root_id = insert_node(&mut nodes, root_node);

    let mut stack: Vec<(ParsedNode, NodeId, usize)> =
        pending_children(root_children, root_id, 1);

    while let Some((parsed, parent_id, depth)) = stack.pop() {
        let (flat, children) = to_flat_node(parsed, Some(parent_id), depth);
        let node_id = insert_node(&mut nodes, flat);
        nodes[parent_id].add_child_id(node_id);
        stack.extend(pending_children(children, node_id, depth + 1));
    }

    let tree = TaxonomyTree::from_parts(nodes, root_id);

    log::debug!(
        "Flattened tree: {} nodes, {} leaves, max depth {}.",
        tree.node_count(),
        tree.leaf_count(),
        tree.max_depth()
    );

    tree
}

fn insert_node(
    nodes: &mut SlotMap<NodeId, FlatNode>,
    mut node: FlatNode,
) -> NodeId {
    nodes.insert_with_key(|node_id| {
        node.set_node_id(node_id);
        node
    })
}

/// Reversed so that popping the stack visits siblings in stored order.
fn pending_children(
    children: Vec<ParsedNode>,
    parent_id: NodeId,
    depth: usize,
) -> Vec<(ParsedNode, NodeId, usize)> {
    children
        .into_iter()
        .rev()
        .map(|child| (child, parent_id, depth))
        .collect()
}

/// A node is a redundant wrapper when its only child is a leaf with the
/// same name that carries an accession.
fn is_redundant_wrapper(parsed: &ParsedNode) -> bool {
    match parsed.children.as_slice() {
        [only_child] => {
            only_child.is_leaf()
                && only_child.name == parsed.name
                && only_child.accession.is_some()
        }
        _ => false,
    }
}

/// Builds the flat node for `parsed` and hands back the children that still
/// need visiting. A collapsed wrapper takes its child's accession, taxon id
/// and branch length and keeps its own name, position and depth.
fn to_flat_node(
    mut parsed: ParsedNode,
    parent_id: Option<NodeId>,
    depth: usize,
) -> (FlatNode, Vec<ParsedNode>) {
    let collapse = is_redundant_wrapper(&parsed);
    let mut children = std::mem::take(&mut parsed.children);
    let collapsed_leaf = if collapse { children.pop() } else { None };

    let mut flat = match collapsed_leaf {
        Some(mut leaf) => FlatNode::new(
            parsed.name.take(),
            leaf.accession.take(),
            leaf.taxon_id.take(),
            leaf.branch_length,
        ),
        None => FlatNode::new(
            parsed.name.take(),
            parsed.accession.take(),
            parsed.taxon_id.take(),
            parsed.branch_length,
        ),
    };

    flat.set_parent_id(parent_id);
    flat.set_depth(depth);
    flat.set_is_leaf(children.is_empty());

    (flat, children)
}
