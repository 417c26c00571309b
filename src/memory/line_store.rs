//! Storage of the resident lines of one cache level

use std::collections::BTreeMap;
use std::collections::HashMap;

use indexmap::IndexMap;

/// A resident cache line
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CacheLine {
    /// Address of the first byte of the line
    pub block_address: u64,
    /// Logical timestamp of the last access
    pub last_used: u64,
}

/// Set of resident lines keyed by block address.
///
/// Implementations only keep lines and their recency; capacity is
/// enforced by the owning [`Cache`](super::cache::Cache).
pub trait LineStore {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn contains(&self, block_address: u64) -> bool;

    /// Refresh the timestamp of a resident line.
    /// Returns false if the line is not resident.
    fn touch(&mut self, block_address: u64, clock: u64) -> bool;

    /// Insert a line that is not resident yet
    fn insert(&mut self, block_address: u64, clock: u64);

    /// Remove and return the least recently used line
    fn evict_lru(&mut self) -> Option<CacheLine>;

    /// All resident lines, in no particular order
    fn lines(&self) -> Vec<CacheLine>;
}

/// Insertion-ordered map, evicting by a linear scan.
/// On equal timestamps the first line in insertion order is evicted.
#[derive(Default)]
pub struct ScanLineStore {
    lines: IndexMap<u64, u64>,
}

impl LineStore for ScanLineStore {
    fn len(&self) -> usize {
        self.lines.len()
    }

    fn contains(&self, block_address: u64) -> bool {
        self.lines.contains_key(&block_address)
    }

    fn touch(&mut self, block_address: u64, clock: u64) -> bool {
        match self.lines.get_mut(&block_address) {
            Some(last_used) => {
                *last_used = clock;
                true
            }
            None => false,
        }
    }

    fn insert(&mut self, block_address: u64, clock: u64) {
        debug_assert!(!self.lines.contains_key(&block_address));
        self.lines.insert(block_address, clock);
    }

    fn evict_lru(&mut self) -> Option<CacheLine> {
        let mut victim: Option<(u64, u64)> = None;
        for (&block_address, &last_used) in self.lines.iter() {
            // Strict comparison keeps the first minimum
            match victim {
                Some((_, min_used)) if last_used >= min_used => {}
                _ => victim = Some((block_address, last_used)),
            }
        }
        let (block_address, last_used) = victim?;
        // shift_remove keeps the insertion order of the remaining lines
        self.lines.shift_remove(&block_address);
        Some(CacheLine { block_address, last_used })
    }

    fn lines(&self) -> Vec<CacheLine> {
        self.lines
            .iter()
            .map(|(&block_address, &last_used)| CacheLine {
                block_address,
                last_used,
            })
            .collect()
    }
}

/// Lookup map plus a recency index ordered by timestamp.
///
/// Every access stamps at most one line with a fresh clock value,
/// so timestamps of resident lines are unique and the oldest line is
/// the first entry of the recency index.
#[derive(Default)]
pub struct OrderedLineStore {
    lookup: HashMap<u64, u64>,
    recency: BTreeMap<u64, u64>,
}

impl LineStore for OrderedLineStore {
    fn len(&self) -> usize {
        self.lookup.len()
    }

    fn contains(&self, block_address: u64) -> bool {
        self.lookup.contains_key(&block_address)
    }

    fn touch(&mut self, block_address: u64, clock: u64) -> bool {
        let Some(last_used) = self.lookup.get_mut(&block_address) else {
            return false;
        };
        self.recency.remove(&*last_used);
        *last_used = clock;
        let previous = self.recency.insert(clock, block_address);
        debug_assert!(previous.is_none());
        true
    }

    fn insert(&mut self, block_address: u64, clock: u64) {
        let previous = self.lookup.insert(block_address, clock);
        debug_assert!(previous.is_none());
        let previous = self.recency.insert(clock, block_address);
        debug_assert!(previous.is_none());
    }

    fn evict_lru(&mut self) -> Option<CacheLine> {
        let (last_used, block_address) = self.recency.pop_first()?;
        self.lookup.remove(&block_address);
        Some(CacheLine { block_address, last_used })
    }

    fn lines(&self) -> Vec<CacheLine> {
        self.recency
            .iter()
            .map(|(&last_used, &block_address)| CacheLine {
                block_address,
                last_used,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_lru_order(store: &mut impl LineStore) {
        store.insert(0, 1);
        store.insert(64, 2);
        store.insert(128, 3);
        assert!(store.touch(0, 4));
        assert!(!store.touch(192, 5));

        assert_eq!(
            store.evict_lru(),
            Some(CacheLine { block_address: 64, last_used: 2 })
        );
        assert_eq!(
            store.evict_lru(),
            Some(CacheLine { block_address: 128, last_used: 3 })
        );
        assert_eq!(
            store.evict_lru(),
            Some(CacheLine { block_address: 0, last_used: 4 })
        );
        assert_eq!(store.evict_lru(), None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_scan_store_lru_order() {
        check_lru_order(&mut ScanLineStore::default());
    }

    #[test]
    fn test_ordered_store_lru_order() {
        check_lru_order(&mut OrderedLineStore::default());
    }

    #[test]
    fn test_scan_store_first_minimum_wins() {
        let mut store = ScanLineStore::default();
        store.insert(128, 7);
        store.insert(0, 7);
        store.insert(64, 9);
        let victim = store.evict_lru().unwrap();
        assert_eq!(victim.block_address, 128);
        // Remaining lines keep their insertion order
        let remaining: Vec<_> =
            store.lines().iter().map(|line| line.block_address).collect();
        assert_eq!(remaining, vec![0, 64]);
    }

    #[test]
    fn test_evict_on_empty_store_is_noop() {
        assert_eq!(ScanLineStore::default().evict_lru(), None);
        assert_eq!(OrderedLineStore::default().evict_lru(), None);
    }
}
