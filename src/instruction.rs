//! Instruction representation

use std::fmt;
use std::str::FromStr;

/// Scratchpad access size when an instruction does not carry one
pub const DEFAULT_SCRATCHPAD_SIZE: u64 = 4;

/// A memory instruction fed to the hierarchy
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Instruction {
    pub kind: InstructionKind,
    pub address: u64,
    /// Access size in bytes, only meaningful for scratchpad accesses
    pub size: Option<u64>,
}

impl Instruction {
    pub fn new(kind: InstructionKind, address: u64) -> Self {
        Self { kind, address, size: None }
    }

    pub fn with_size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    pub fn load(address: u64) -> Self {
        Self::new(InstructionKind::Load, address)
    }

    pub fn store(address: u64) -> Self {
        Self::new(InstructionKind::Store, address)
    }

    /// Bytes claimed in the scratchpad by this instruction
    pub fn scratchpad_size(&self) -> u64 {
        self.size.unwrap_or(DEFAULT_SCRATCHPAD_SIZE)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:#x}", self.kind, self.address)?;
        if let Some(size) = self.size {
            write!(f, " {}", size)?;
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InstructionKind {
    Load,
    Store,
    ScratchpadLoad,
    ScratchpadStore,
}

impl fmt::Display for InstructionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InstructionKind::Load => "LOAD",
            InstructionKind::Store => "STORE",
            InstructionKind::ScratchpadLoad => "LDS_LOAD",
            InstructionKind::ScratchpadStore => "LDS_STORE",
        };
        f.write_str(name)
    }
}

impl FromStr for InstructionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "LOAD" => Ok(InstructionKind::Load),
            "STORE" => Ok(InstructionKind::Store),
            "LDS_LOAD" | "SCRATCHPAD_LOAD" => Ok(InstructionKind::ScratchpadLoad),
            "LDS_STORE" | "SCRATCHPAD_STORE" => {
                Ok(InstructionKind::ScratchpadStore)
            }
            _ => Err(format!("Unknown instruction kind: '{}'", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_is_case_insensitive() {
        assert_eq!("load".parse::<InstructionKind>(), Ok(InstructionKind::Load));
        assert_eq!("Store".parse::<InstructionKind>(), Ok(InstructionKind::Store));
        assert_eq!("lds_load".parse::<InstructionKind>(), Ok(InstructionKind::ScratchpadLoad));
        assert_eq!(
            "Scratchpad_Store".parse::<InstructionKind>(),
            Ok(InstructionKind::ScratchpadStore)
        );
        assert!("prefetch".parse::<InstructionKind>().is_err());
    }

    #[test]
    fn test_default_scratchpad_size() {
        let inst = Instruction::new(InstructionKind::ScratchpadLoad, 0);
        assert_eq!(inst.scratchpad_size(), 4);
        assert_eq!(inst.with_size(16).scratchpad_size(), 16);
    }

    #[test]
    fn test_display() {
        let inst =
            Instruction::new(InstructionKind::ScratchpadStore, 32).with_size(8);
        assert_eq!(inst.to_string(), "LDS_STORE 0x20 8");
        assert_eq!(Instruction::load(64).to_string(), "LOAD 0x40");
    }
}
