mod expansion;
mod flatten;
mod node;
mod tree;

pub use expansion::{ExpansionState, VisibleRow};
pub use flatten::flatten_tree;
pub use node::{FlatNode, NodeId};
pub use tree::{Preorder, TaxonomyTree};
