//! Two-level cache hierarchy with a scratchpad

use super::cache::Cache;
use super::global::GlobalMemory;
use super::line_store::{LineStore, OrderedLineStore};
use super::scratchpad::{Allocation, Scratchpad};
use super::{AccessOutcome, AccessResult};
use crate::config::HierarchyConfig;
use crate::diagnostic::Diagnostic;
use crate::error::{ConfigError, MemoryError};
use crate::instruction::{Instruction, InstructionKind};
use crate::report::HierarchyReport;

/// L1 and L2 caches, a scratchpad and global memory.
///
/// Routing:
/// - loads go to L1, then L2 on a miss, then global memory
/// - stores only go to L1
/// - scratchpad loads and stores both allocate scratchpad space
pub struct MemoryHierarchy<S: LineStore = OrderedLineStore> {
    pub l1: Cache<S>,
    pub l2: Cache<S>,
    pub scratchpad: Scratchpad,
    pub global: GlobalMemory,

    /// Warnings raised while replaying
    pub diagnostics: Vec<Diagnostic>,
    pub instruction_count: u64,
}

impl MemoryHierarchy {
    pub fn make(config: &HierarchyConfig) -> Result<Self, ConfigError> {
        Self::with_line_store(config)
    }
}

impl<S: LineStore + Default> MemoryHierarchy<S> {
    /// Build a hierarchy whose caches use the store type `S`
    pub fn with_line_store(config: &HierarchyConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            l1: Cache::with_store("L1", config.l1, S::default())?,
            l2: Cache::with_store("L2", config.l2, S::default())?,
            scratchpad: Scratchpad::make(config.scratchpad_capacity_bytes)?,
            global: GlobalMemory::make(config.global_capacity_bytes)?,
            diagnostics: Vec::new(),
            instruction_count: 0,
        })
    }
}

impl<S: LineStore> MemoryHierarchy<S> {
    /// Apply a single instruction and report where it was served
    pub fn execute(&mut self, inst: &Instruction) -> AccessOutcome {
        self.instruction_count += 1;
        let outcome = match inst.kind {
            InstructionKind::Load => self.load(inst.address),
            InstructionKind::Store => match self.l1.access(inst.address) {
                AccessResult::Hit => AccessOutcome::L1,
                // Stores stop at L1 whatever the outcome
                AccessResult::Miss => AccessOutcome::L1Miss,
            },
            InstructionKind::ScratchpadLoad
            | InstructionKind::ScratchpadStore => self.allocate_scratchpad(inst),
        };
        log::debug!("{} -> {:?}", inst, outcome);
        outcome
    }

    /// Apply a sequence of instructions in order
    pub fn run(&mut self, instructions: &[Instruction]) {
        for inst in instructions {
            self.execute(inst);
        }
    }

    fn load(&mut self, address: u64) -> AccessOutcome {
        if self.l1.access(address) == AccessResult::Hit {
            return AccessOutcome::L1;
        }
        if self.l2.access(address) == AccessResult::Hit {
            return AccessOutcome::L2;
        }
        if !self.global.in_range(address) {
            log::debug!(
                "Load {:#x} lies beyond global memory ({} B)",
                address,
                self.global.capacity_bytes
            );
        }
        AccessOutcome::Global
    }

    fn allocate_scratchpad(&mut self, inst: &Instruction) -> AccessOutcome {
        let size = inst.scratchpad_size();
        match self.scratchpad.allocate(size) {
            Allocation::Committed => AccessOutcome::Scratchpad,
            Allocation::Overflow { requested, .. } => {
                let diagnostic = Diagnostic::ScratchpadOverflow {
                    address: inst.address,
                    requested,
                    used: self.scratchpad.used_bytes(),
                    capacity: self.scratchpad.capacity_bytes,
                };
                diagnostic.emit();
                self.diagnostics.push(diagnostic);
                AccessOutcome::ScratchpadOverflow
            }
        }
    }

    /// Check the invariants of both cache levels
    pub fn verify(&self) -> Result<(), MemoryError> {
        self.l1.verify()?;
        self.l2.verify()
    }

    /// Snapshot of all statistics
    pub fn report(&self) -> HierarchyReport {
        HierarchyReport::collect(self)
    }
}
