//! Global memory descriptor

use crate::error::ConfigError;

/// Backing global memory. Only its size is modeled; accesses that miss
/// every cache level are served here without further bookkeeping.
pub struct GlobalMemory {
    pub capacity_bytes: u64,
}

impl GlobalMemory {
    pub fn make(capacity_bytes: u64) -> Result<Self, ConfigError> {
        if capacity_bytes == 0 {
            return Err(ConfigError::ZeroCapacity("Global memory"));
        }
        Ok(Self { capacity_bytes })
    }

    /// Addresses beyond the capacity are still served; the size is advisory
    pub fn in_range(&self, address: u64) -> bool {
        address < self.capacity_bytes
    }
}
