pub(crate) mod source;

use crate::TaxonomyTree;
use crate::TreeParseError;
use parking_lot::Mutex;
use rayon::prelude::*;
use source::{SourceError, TreeSource};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

type Slot = Arc<Mutex<Option<Arc<TaxonomyTree>>>>;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error("Failed to parse the tree for category '{category}': {source}")]
    Parse {
        category: String,
        #[source]
        source: TreeParseError,
    },
}

/// Memoizes parsed and flattened trees by category.
///
/// Construct one per application and share it; entries live as long as the
/// cache unless invalidated. Loads are serialized per category, so
/// concurrent first requests for the same category read and parse it once.
/// Failed loads are not remembered and are retried on the next request.
#[derive(Debug)]
pub struct TreeCache<S: TreeSource> {
    source: S,
    slots: Mutex<HashMap<String, Slot>>,
}

impl<S: TreeSource> TreeCache<S> {
    pub fn new(source: S) -> Self {
        Self { source, slots: Mutex::new(HashMap::new()) }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Cached tree for `category`, loading it on first use.
    ///
    /// Failures are logged and reported as `None`; use
    /// [TreeCache::try_get] to inspect them.
    pub fn get(&self, category: &str) -> Option<Arc<TaxonomyTree>> {
        match self.try_get(category) {
            Ok(tree) => Some(tree),
            Err(err) => {
                log::error!(
                    "Failed to load tree for category '{category}': {err}"
                );
                None
            }
        }
    }

    pub fn try_get(
        &self,
        category: &str,
    ) -> Result<Arc<TaxonomyTree>, CacheError> {
        loop {
            let slot = self.slot(category);
            let mut entry = slot.lock();

            if let Some(tree) = entry.as_ref() {
                log::debug!("Tree cache hit: '{category}'.");
                return Ok(Arc::clone(tree));
            }

            // An empty slot dropped after a failed load while we waited.
            if !self.is_registered(category, &slot) {
                continue;
            }

            log::debug!("Tree cache miss: '{category}'.");
            match self.load(category) {
                Ok(tree) => {
                    let tree = Arc::new(tree);
                    *entry = Some(Arc::clone(&tree));
                    return Ok(tree);
                }
                Err(err) => {
                    // Still holding the empty slot, so nobody has filled it.
                    self.release(category, &slot);
                    return Err(err);
                }
            }
        }
    }

    /// Loads several categories in parallel and returns how many of them
    /// are available afterwards.
    pub fn preload(&self, categories: &[&str]) -> usize {
        categories
            .par_iter()
            .filter(|category| self.get(category).is_some())
            .count()
    }

    pub fn contains(&self, category: &str) -> bool {
        let slot = self.slots.lock().get(category).cloned();
        slot.is_some_and(|slot| slot.lock().is_some())
    }

    pub fn len(&self) -> usize {
        let slots: Vec<Slot> = self.slots.lock().values().cloned().collect();
        slots.iter().filter(|slot| slot.lock().is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forgets one category; the next request loads it again. Returns
    /// `true` if a tree was cached for it.
    pub fn invalidate(&self, category: &str) -> bool {
        let slot = self.slots.lock().remove(category);
        slot.is_some_and(|slot| slot.lock().is_some())
    }

    pub fn clear(&self) {
        self.slots.lock().clear();
    }

    fn load(&self, category: &str) -> Result<TaxonomyTree, CacheError> {
        let text = self.source.load_text(category)?;
        TaxonomyTree::from_newick(&text).map_err(|source| CacheError::Parse {
            category: category.to_string(),
            source,
        })
    }

    fn is_registered(&self, category: &str, slot: &Slot) -> bool {
        self.slots
            .lock()
            .get(category)
            .is_some_and(|current| Arc::ptr_eq(current, slot))
    }

    /// Unregisters `slot` unless another slot has replaced it already.
    fn release(&self, category: &str, slot: &Slot) {
        let mut slots = self.slots.lock();
        if slots.get(category).is_some_and(|current| Arc::ptr_eq(current, slot))
        {
            _ = slots.remove(category);
        }
    }

    fn slot(&self, category: &str) -> Slot {
        Arc::clone(self.slots.lock().entry(category.to_string()).or_default())
    }
}
