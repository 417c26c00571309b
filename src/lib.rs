pub mod config;
pub mod diagnostic;
pub mod instruction;
pub mod memory;
pub mod report;
pub mod run_wrapper;
pub mod trace;

pub mod error;
