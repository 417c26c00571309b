use std::path::Path;

use memsim_lib::config::HierarchyConfig;
use memsim_lib::diagnostic::Diagnostic;
use memsim_lib::instruction::Instruction;
use memsim_lib::memory::cache::CachePolicy;
use memsim_lib::memory::{AccessOutcome, MemoryHierarchy};
use memsim_lib::run_wrapper::{run, run_trace};
use memsim_lib::trace::parse_trace;

#[test]
fn test_sample_trace() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("traces/sample.trace");
    let report = run(&path, &HierarchyConfig::default()).unwrap();

    assert_eq!(report.instructions, 14);
    // 4 cold misses, 4 reuse hits, STORE 0x100 misses, STORE 0x104 and
    // the final load of 0x100 hit
    assert_eq!(report.l1.history.num_hit, 6);
    assert_eq!(report.l1.history.num_miss, 5);
    // Only the cold loads reach L2
    assert_eq!(report.l2.history.num_miss, 4);
    assert_eq!(report.l2.history.num_hit, 0);
    assert_eq!(report.scratchpad.used_bytes, 516);
    assert_eq!(
        report.diagnostics,
        vec![Diagnostic::UnknownInstruction {
            line: 16,
            kind: "PREFETCH".to_string()
        }]
    );
}

#[test]
fn test_end_to_end_l1_hit_rate() {
    let trace = parse_trace("Load 0\nLoad 64\nLoad 0\n").unwrap();
    let report = run_trace(&trace, &HierarchyConfig::default()).unwrap();
    assert_eq!(format!("{:.2}", report.l1.hit_rate), "33.33");
}

#[test]
fn test_l1_thrash_hits_l2() {
    let config = HierarchyConfig {
        l1: CachePolicy::make(4 * 64, 64),
        l2: CachePolicy::make(64 * 64, 64),
        ..Default::default()
    };
    let mut mem = MemoryHierarchy::make(&config).unwrap();

    // Eight lines cycle through a four-line L1
    let addresses: Vec<u64> = (0..8).map(|i| i * 64).collect();
    for &address in &addresses {
        assert_eq!(mem.execute(&Instruction::load(address)), AccessOutcome::Global);
    }
    for &address in &addresses {
        assert_eq!(mem.execute(&Instruction::load(address)), AccessOutcome::L2);
    }

    let report = mem.report();
    assert_eq!(report.l1.hit_rate, 0.0);
    assert_eq!(report.l2.hit_rate, 50.0);
    assert_eq!(report.l1.resident_lines, 4);
    assert!(mem.verify().is_ok());
}
