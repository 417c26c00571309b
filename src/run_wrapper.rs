//! A simulator wrapper

use std::io::BufRead;
use std::path::Path;

use crate::config::{HierarchyConfig, LineStoreKind};
use crate::error::SimulatorResult;
use crate::memory::line_store::{LineStore, OrderedLineStore, ScanLineStore};
use crate::memory::MemoryHierarchy;
use crate::report::HierarchyReport;
use crate::trace::{fetch_trace, parse_line, LineError, ParsedTrace};

/// Run simulation on the given trace file
/// and return the final statistics
pub fn run(
    trace_path: &Path,
    config: &HierarchyConfig,
) -> SimulatorResult<HierarchyReport> {
    let trace = fetch_trace(trace_path)?;
    log::info!(
        "Loaded {} instructions from {}",
        trace.instructions.len(),
        trace_path.display()
    );
    run_trace(&trace, config)
}

/// Replay an already parsed trace on a fresh hierarchy
pub fn run_trace(
    trace: &ParsedTrace,
    config: &HierarchyConfig,
) -> SimulatorResult<HierarchyReport> {
    match config.line_store {
        LineStoreKind::Ordered => replay::<OrderedLineStore>(trace, config),
        LineStoreKind::Scan => replay::<ScanLineStore>(trace, config),
    }
}

fn replay<S: LineStore + Default>(
    trace: &ParsedTrace,
    config: &HierarchyConfig,
) -> SimulatorResult<HierarchyReport> {
    let mut mem = MemoryHierarchy::<S>::with_line_store(config)?;
    mem.run(&trace.instructions);
    mem.verify()?;

    let mut report = mem.report();
    // Parse warnings come first, they were raised before the replay
    report.diagnostics.splice(0..0, trace.diagnostics.iter().cloned());
    Ok(report)
}

/// Read instructions from stdin one line at a time,
/// printing where each one was served
pub fn run_interactive(
    config: &HierarchyConfig,
) -> SimulatorResult<HierarchyReport> {
    eprintln!("Enter 'KIND ADDRESS [SIZE]', 'stats' or 'quit'");
    let input = std::io::stdin().lock();
    match config.line_store {
        LineStoreKind::Ordered => step::<OrderedLineStore>(config, input),
        LineStoreKind::Scan => step::<ScanLineStore>(config, input),
    }
}

/// Replay instructions from `input` until it runs out or a `quit` line
pub fn step<S: LineStore + Default>(
    config: &HierarchyConfig,
    input: impl BufRead,
) -> SimulatorResult<HierarchyReport> {
    let mut mem = MemoryHierarchy::<S>::with_line_store(config)?;
    let mut diagnostics = Vec::new();

    for (line_num, line) in input.lines().enumerate() {
        let line = line?;
        let line_num = line_num + 1;

        match line.trim() {
            "quit" | "exit" => break,
            "stats" => {
                mem.report().print();
                continue;
            }
            _ => {}
        }

        match parse_line(&line, line_num) {
            Ok(Some(inst)) => {
                let outcome = mem.execute(&inst);
                println!(
                    "{} -> {:?} | L1 {:.2}% | L2 {:.2}% | LDS {:.2}%",
                    inst,
                    outcome,
                    mem.l1.get_hit_rate(),
                    mem.l2.get_hit_rate(),
                    mem.scratchpad.get_utilization(),
                );
            }
            Ok(None) => {}
            Err(LineError::UnknownKind(diagnostic)) => {
                diagnostic.emit();
                diagnostics.push(diagnostic);
            }
            // A typo should not end the session
            Err(LineError::Invalid(e)) => log::warn!("{}", e),
        }
    }

    mem.verify()?;
    let mut report = mem.report();
    report.diagnostics.extend(diagnostics);
    Ok(report)
}
