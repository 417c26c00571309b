//! Scratchpad (local data store) occupancy tracker

use serde::Serialize;

use crate::error::ConfigError;

/// Fixed-capacity, allocation-only scratchpad.
/// Space is never freed during a run.
pub struct Scratchpad {
    pub capacity_bytes: u64,
    used_bytes: u64,

    pub history: ScratchpadHistory,
}

/// Result of a scratchpad allocation
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Allocation {
    Committed,
    /// Rejected, nothing was accounted
    Overflow { requested: u64, available: u64 },
}

#[derive(Clone, Copy, Default, Debug, PartialEq, Serialize)]
pub struct ScratchpadHistory {
    pub num_committed: u64,
    pub num_overflow: u64,
}

impl Scratchpad {
    pub fn make(capacity_bytes: u64) -> Result<Self, ConfigError> {
        if capacity_bytes == 0 {
            return Err(ConfigError::ZeroCapacity("Scratchpad"));
        }
        Ok(Self {
            capacity_bytes,
            used_bytes: 0,
            history: ScratchpadHistory::default(),
        })
    }

    pub fn allocate(&mut self, size: u64) -> Allocation {
        let available = self.available_bytes();
        if size > available {
            self.history.num_overflow += 1;
            return Allocation::Overflow { requested: size, available };
        }
        self.used_bytes += size;
        self.history.num_committed += 1;
        Allocation::Committed
    }

    pub fn used_bytes(&self) -> u64 {
        self.used_bytes
    }

    pub fn available_bytes(&self) -> u64 {
        self.capacity_bytes - self.used_bytes
    }

    /// Utilization as a percentage of capacity
    pub fn get_utilization(&self) -> f64 {
        self.used_bytes as f64 / self.capacity_bytes as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_saturation() {
        let mut lds = Scratchpad::make(100).unwrap();
        assert_eq!(lds.allocate(60), Allocation::Committed);
        assert_eq!(
            lds.allocate(50),
            Allocation::Overflow { requested: 50, available: 40 }
        );
        assert_eq!(lds.used_bytes(), 60);
        assert_eq!(lds.get_utilization(), 60.0);
        assert_eq!(
            lds.history,
            ScratchpadHistory { num_committed: 1, num_overflow: 1 }
        );
    }

    #[test]
    fn test_fill_exactly() {
        let mut lds = Scratchpad::make(8).unwrap();
        assert_eq!(lds.allocate(4), Allocation::Committed);
        assert_eq!(lds.allocate(4), Allocation::Committed);
        assert_eq!(lds.available_bytes(), 0);
        assert_eq!(lds.get_utilization(), 100.0);
        assert!(matches!(lds.allocate(1), Allocation::Overflow { .. }));
        assert_eq!(lds.used_bytes(), 8);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert!(matches!(
            Scratchpad::make(0),
            Err(ConfigError::ZeroCapacity(_))
        ));
    }
}
