//! Cache implementation

use serde::{Deserialize, Serialize};

use super::line_store::{CacheLine, LineStore, OrderedLineStore};
use super::AccessResult;
use crate::error::{ConfigError, MemoryError};

/// Fully associative cache with LRU replacement.
///
/// Addresses are truncated to their line, the clock advances once per
/// access and a miss evicts the least recently used line before inserting
/// when the cache is full.
pub struct Cache<S: LineStore = OrderedLineStore> {
    pub name: &'static str,
    pub policy: CachePolicy,

    pub history: CacheHistory,

    clock: u64,
    lines: S,
}

impl Cache {
    pub fn make(
        name: &'static str,
        policy: CachePolicy,
    ) -> Result<Self, ConfigError> {
        Self::with_store(name, policy, OrderedLineStore::default())
    }
}

impl<S: LineStore> Cache<S> {
    /// Make a cache backed by the given line store
    pub fn with_store(
        name: &'static str,
        policy: CachePolicy,
        lines: S,
    ) -> Result<Self, ConfigError> {
        policy.validate(name)?;
        Ok(Self {
            name,
            policy,
            history: CacheHistory::default(),
            clock: 0,
            lines,
        })
    }

    /// Truncate an address to the start of its line
    pub fn get_block_address(&self, address: u64) -> u64 {
        address / self.policy.line_size_bytes * self.policy.line_size_bytes
    }

    pub fn access(&mut self, address: u64) -> AccessResult {
        self.clock += 1;
        let block_address = self.get_block_address(address);

        if self.lines.touch(block_address, self.clock) {
            self.record_hit();
            log::trace!(
                "{} hit: {:#x} (block {:#x}) at t={}",
                self.name,
                address,
                block_address,
                self.clock
            );
            AccessResult::Hit
        } else {
            self.record_miss();
            log::trace!(
                "{} miss: {:#x} (block {:#x}) at t={}",
                self.name,
                address,
                block_address,
                self.clock
            );
            self.allocate(block_address);
            AccessResult::Miss
        }
    }

    /// Insert a missing line, evicting first if the cache is full
    fn allocate(&mut self, block_address: u64) {
        // For capacities that are a multiple of the line size this is
        // the same as occupied_bytes() >= capacity
        while !self.lines.is_empty()
            && self.occupied_bytes() + self.policy.line_size_bytes
                > self.policy.capacity_bytes
        {
            self.evict();
        }
        self.lines.insert(block_address, self.clock);
    }

    /// Drop the least recently used line, if any
    pub fn evict(&mut self) -> Option<CacheLine> {
        let victim = self.lines.evict_lru();
        if let Some(line) = victim {
            log::trace!(
                "{} evict: block {:#x} (last used t={})",
                self.name,
                line.block_address,
                line.last_used
            );
        }
        victim
    }

    fn record_hit(&mut self) {
        self.history.num_hit += 1;
    }

    fn record_miss(&mut self) {
        self.history.num_miss += 1;
    }

    /// Hit rate as a percentage in [0, 100]
    pub fn get_hit_rate(&self) -> f64 {
        let accesses = self.history.accesses();
        if accesses == 0 {
            return 0.0;
        }
        self.history.num_hit as f64 / accesses as f64 * 100.0
    }

    /// Miss rate as a fraction in [0, 1]
    pub fn get_miss_rate(&self) -> f64 {
        let accesses = self.history.accesses();
        if accesses == 0 {
            return 0.0;
        }
        self.history.num_miss as f64 / accesses as f64
    }

    /// Number of accesses seen so far
    pub fn clock(&self) -> u64 {
        self.clock
    }

    pub fn resident_lines(&self) -> usize {
        self.lines.len()
    }

    pub fn occupied_bytes(&self) -> u64 {
        self.lines.len() as u64 * self.policy.line_size_bytes
    }

    pub fn is_in_cache(&self, address: u64) -> bool {
        self.lines.contains(self.get_block_address(address))
    }

    pub fn lines(&self) -> Vec<CacheLine> {
        self.lines.lines()
    }

    /// Check the capacity and timestamp invariants
    pub fn verify(&self) -> Result<(), MemoryError> {
        if self.occupied_bytes() > self.policy.capacity_bytes {
            return Err(MemoryError::CapacityExceeded {
                level: self.name,
                lines: self.lines.len(),
                line_size: self.policy.line_size_bytes,
                capacity: self.policy.capacity_bytes,
            });
        }
        for line in self.lines.lines() {
            if line.last_used > self.clock {
                return Err(MemoryError::TimestampFromFuture {
                    level: self.name,
                    block_address: line.block_address,
                    last_used: line.last_used,
                    clock: self.clock,
                });
            }
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Default, Debug, PartialEq, Serialize)]
pub struct CacheHistory {
    pub num_hit: u64,
    pub num_miss: u64,
}

impl CacheHistory {
    pub fn accesses(&self) -> u64 {
        self.num_hit + self.num_miss
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CachePolicy {
    pub capacity_bytes: u64,
    pub line_size_bytes: u64,
}

impl CachePolicy {
    pub fn make(capacity_bytes: u64, line_size_bytes: u64) -> Self {
        Self { capacity_bytes, line_size_bytes }
    }

    /// Default L1: 32KB with 64B lines
    pub fn l1() -> Self {
        Self::make(32 * 1024, 64)
    }

    /// Default L2: 2MB with 64B lines
    pub fn l2() -> Self {
        Self::make(2 * 1024 * 1024, 64)
    }

    /// Number of lines the cache holds when full
    pub fn line_num(&self) -> u64 {
        self.capacity_bytes / self.line_size_bytes
    }

    pub fn validate(&self, level: &'static str) -> Result<(), ConfigError> {
        if self.capacity_bytes == 0 {
            return Err(ConfigError::ZeroCapacity(level));
        }
        if self.line_size_bytes == 0 {
            return Err(ConfigError::ZeroLineSize(level));
        }
        // At least one line must fit
        if self.line_size_bytes > self.capacity_bytes {
            return Err(ConfigError::LineLargerThanCapacity {
                level,
                line_size: self.line_size_bytes,
                capacity: self.capacity_bytes,
            });
        }
        Ok(())
    }
}
