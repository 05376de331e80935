use std::hash::Hash;
use std::sync::Arc;

use dashmap::DashMap;

use super::Analysis;

/// Last published analysis per document.
///
/// Entries are replaced wholesale, so readers holding an `Arc` keep a
/// consistent snapshot while a newer run is stored.
#[derive(Debug)]
pub struct AnalysisStore<K: Eq + Hash> {
    entries: DashMap<K, Arc<Analysis>>,
}

impl<K: Eq + Hash> Default for AnalysisStore<K> {
    fn default() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }
}

impl<K: Eq + Hash + Clone> AnalysisStore<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &K) -> Option<Arc<Analysis>> {
        self.entries.get(key).map(|entry| Arc::clone(entry.value()))
    }

    /// Stores `analysis` for `key`, dropping whatever was there before.
    pub fn replace(&self, key: K, analysis: Analysis) -> Arc<Analysis> {
        let analysis = Arc::new(analysis);
        self.entries.insert(key, Arc::clone(&analysis));
        analysis
    }

    pub fn remove(&self, key: &K) -> Option<Arc<Analysis>> {
        self.entries.remove(key).map(|(_, analysis)| analysis)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
