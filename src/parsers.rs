pub(crate) mod newick;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TreeParseError {
    #[error("Newick input is empty.")]
    EmptyInput,
}
