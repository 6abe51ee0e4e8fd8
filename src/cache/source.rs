use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Category '{0}' cannot be used as a tree name.")]
    InvalidCategory(String),
    #[error("No tree text found for category '{0}'.")]
    NotFound(String),
    #[error("Failed to read tree text for category '{category}' from {path:?}.")]
    Io {
        category: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Supplies raw Newick text for a named category.
pub trait TreeSource: Send + Sync {
    fn load_text(&self, category: &str) -> Result<String, SourceError>;
}

/// In-memory texts keyed by category.
impl TreeSource for HashMap<String, String> {
    fn load_text(&self, category: &str) -> Result<String, SourceError> {
        self.get(category)
            .cloned()
            .ok_or_else(|| SourceError::NotFound(category.to_string()))
    }
}

/// Where [DirectorySource] looks for tree files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceConfig {
    pub root: PathBuf,
    pub extension: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("public").join("taxonomy"),
            extension: "newick".to_string(),
        }
    }
}

/// Reads `<root>/<category>.<extension>` from disk.
#[derive(Debug, Clone, Default)]
pub struct DirectorySource {
    config: SourceConfig,
}

impl DirectorySource {
    pub fn new(config: SourceConfig) -> Self {
        Self { config }
    }

    pub fn with_root(root: impl AsRef<Path>) -> Self {
        Self::new(SourceConfig {
            root: root.as_ref().to_path_buf(),
            ..SourceConfig::default()
        })
    }

    pub fn config(&self) -> &SourceConfig {
        &self.config
    }

    /// Category names are single path components; anything that could walk
    /// out of `root` is rejected.
    pub fn path_for(&self, category: &str) -> Result<PathBuf, SourceError> {
        if category.is_empty()
            || category.contains(['/', '\\'])
            || category.contains("..")
        {
            return Err(SourceError::InvalidCategory(category.to_string()));
        }

        let file_name = format!("{category}.{}", self.config.extension);
        Ok(self.config.root.join(file_name))
    }
}

impl TreeSource for DirectorySource {
    fn load_text(&self, category: &str) -> Result<String, SourceError> {
        let path = self.path_for(category)?;
        std::fs::read_to_string(&path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => SourceError::NotFound(category.to_string()),
            _ => SourceError::Io { category: category.to_string(), path, source },
        })
    }
}
