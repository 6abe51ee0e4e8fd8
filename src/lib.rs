// -------------------------------------
// #![allow(dead_code)]
// #![allow(unused_imports)]
// #![allow(unused_variables)]
// #![allow(clippy::type_complexity)]
// -------------------------------------

mod cache;
mod parsers;
mod phylo;

pub type TreeFloat = f64;

pub use cache::CacheError;
pub use cache::TreeCache;
pub use cache::source::DirectorySource;
pub use cache::source::SourceConfig;
pub use cache::source::SourceError;
pub use cache::source::TreeSource;
pub use parsers::TreeParseError;
pub use parsers::newick::ParsedNode;
pub use parsers::newick::parse_newick;
pub use phylo::ExpansionState;
pub use phylo::FlatNode;
pub use phylo::NodeId;
pub use phylo::Preorder;
pub use phylo::TaxonomyTree;
pub use phylo::VisibleRow;
pub use phylo::flatten_tree;
