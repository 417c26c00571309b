//! Statistics snapshots and their text rendering

use serde::Serialize;

use crate::diagnostic::Diagnostic;
use crate::error::SimulatorResult;
use crate::memory::cache::{Cache, CacheHistory};
use crate::memory::line_store::LineStore;
use crate::memory::scratchpad::ScratchpadHistory;
use crate::memory::MemoryHierarchy;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct CacheReport {
    pub name: &'static str,
    pub capacity_bytes: u64,
    pub line_size_bytes: u64,
    pub resident_lines: usize,
    pub history: CacheHistory,
    /// Percentage in [0, 100]
    pub hit_rate: f64,
}

impl CacheReport {
    pub fn collect<S: LineStore>(cache: &Cache<S>) -> Self {
        Self {
            name: cache.name,
            capacity_bytes: cache.policy.capacity_bytes,
            line_size_bytes: cache.policy.line_size_bytes,
            resident_lines: cache.resident_lines(),
            history: cache.history,
            hit_rate: cache.get_hit_rate(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScratchpadReport {
    pub capacity_bytes: u64,
    pub used_bytes: u64,
    pub history: ScratchpadHistory,
    /// Percentage of capacity in use
    pub utilization: f64,
}

/// Everything a run produces, queryable after or during replay
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HierarchyReport {
    pub instructions: u64,
    pub l1: CacheReport,
    pub l2: CacheReport,
    pub scratchpad: ScratchpadReport,
    pub global_capacity_bytes: u64,
    pub diagnostics: Vec<Diagnostic>,
}

impl HierarchyReport {
    pub fn collect<S: LineStore>(mem: &MemoryHierarchy<S>) -> Self {
        Self {
            instructions: mem.instruction_count,
            l1: CacheReport::collect(&mem.l1),
            l2: CacheReport::collect(&mem.l2),
            scratchpad: ScratchpadReport {
                capacity_bytes: mem.scratchpad.capacity_bytes,
                used_bytes: mem.scratchpad.used_bytes(),
                history: mem.scratchpad.history,
                utilization: mem.scratchpad.get_utilization(),
            },
            global_capacity_bytes: mem.global.capacity_bytes,
            diagnostics: mem.diagnostics.clone(),
        }
    }

    /// Pretty-printed JSON rendering
    pub fn to_json(&self) -> SimulatorResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Headline numbers, one per level
    pub fn print_summary(&self) {
        println!("L1 hit rate: {:.2}%", self.l1.hit_rate);
        println!("L2 hit rate: {:.2}%", self.l2.hit_rate);
        println!("Scratchpad utilization: {:.2}%", self.scratchpad.utilization);
    }

    /// Print the detailed history to stderr
    pub fn print(&self) {
        eprintln!("[HISTORY] # instructions = {}", self.instructions);
        for cache in [&self.l1, &self.l2] {
            eprintln!(
                "[HISTORY] {}: hit rate = {:.2}% ({} hits / {} misses), {} of {} lines resident",
                cache.name,
                cache.hit_rate,
                cache.history.num_hit,
                cache.history.num_miss,
                cache.resident_lines,
                cache.capacity_bytes / cache.line_size_bytes,
            );
        }
        eprintln!(
            "[HISTORY] Scratchpad: utilization = {:.2}% ({} / {} B), {} overflows",
            self.scratchpad.utilization,
            self.scratchpad.used_bytes,
            self.scratchpad.capacity_bytes,
            self.scratchpad.history.num_overflow,
        );
        if !self.diagnostics.is_empty() {
            eprintln!("[HISTORY] {} warnings", self.diagnostics.len());
        }
    }
}
