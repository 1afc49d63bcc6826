//! Domain deduplication
//!
//! In-memory set of normalized domains, drained in sorted order once the
//! input has been consumed.

use ahash::RandomState;
use hashbrown::HashSet;

/// Set of distinct normalized domains
#[derive(Debug, Default)]
pub struct DomainSet {
    set: HashSet<String, RandomState>,
    duplicates: u64,
}

impl DomainSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a domain. Returns true if it was not seen before.
    pub fn insert(&mut self, domain: String) -> bool {
        let inserted = self.set.insert(domain);
        if !inserted {
            self.duplicates += 1;
        }
        inserted
    }

    pub fn len(&self) -> usize {
        self.set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    /// Number of rejected repeat insertions
    pub fn duplicates(&self) -> u64 {
        self.duplicates
    }

    /// Consume the set, returning its domains in ascending byte order
    pub fn into_sorted(self) -> Vec<String> {
        let mut domains: Vec<String> = self.set.into_iter().collect();
        domains.sort_unstable();
        domains
    }
}
