//! Memory structure

pub mod cache;
pub mod global;
pub mod hierarchy;
pub mod line_store;
pub mod scratchpad;

pub use cache::Cache;
pub use hierarchy::MemoryHierarchy;
pub use scratchpad::Scratchpad;

/// Outcome of a single cache lookup
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AccessResult {
    Hit,
    Miss,
}

/// Where an instruction was served
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AccessOutcome {
    /// Hit in L1
    L1,
    /// Store that missed L1; stores are not forwarded further
    L1Miss,
    /// Load that missed L1 and hit L2
    L2,
    /// Load that missed both caches
    Global,
    /// Scratchpad allocation committed
    Scratchpad,
    /// Scratchpad allocation rejected
    ScratchpadOverflow,
}
