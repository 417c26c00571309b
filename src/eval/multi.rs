use std::path::Path;
use std::process;

use memsim_lib::config::{HierarchyConfig, LineStoreKind};
use memsim_lib::error::{SimulatorError, SimulatorResult};
use memsim_lib::memory::cache::CachePolicy;
use memsim_lib::run_wrapper::run_trace;
use memsim_lib::trace::fetch_trace;

fn main() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("warn"),
    )
    .init();

    if let Err(e) = run_eval() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run_eval() -> SimulatorResult<()> {
    let param_tokens: Vec<String> = std::env::args().collect();
    let trace_path = param_tokens.get(1).ok_or_else(|| {
        SimulatorError::UsageError(
            "You should specify exactly one trace file".to_string(),
        )
    })?;
    let trace = fetch_trace(Path::new(trace_path))?;

    let trace_base_name = Path::new(trace_path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| trace_path.clone());
    std::fs::create_dir_all("eval")?;
    let output_path = format!("eval/multi_eval_{}.csv", trace_base_name);

    let mut writer = csv::Writer::from_path(&output_path)?;
    writer.write_record([
        "Configuration",
        "L1 hit rate",
        "L2 hit rate",
        "Scratchpad utilization",
        "Scratchpad overflows",
    ])?;

    let default = HierarchyConfig::default();
    let configs = vec![
        ("Default", default),
        (
            "Small L1 (8KB)",
            HierarchyConfig { l1: CachePolicy::make(8 * 1024, 64), ..default },
        ),
        (
            "Large L1 (128KB)",
            HierarchyConfig { l1: CachePolicy::make(128 * 1024, 64), ..default },
        ),
        (
            "Wide lines (128B)",
            HierarchyConfig {
                l1: CachePolicy::make(32 * 1024, 128),
                l2: CachePolicy::make(2 * 1024 * 1024, 128),
                ..default
            },
        ),
        (
            "Small L2 (256KB)",
            HierarchyConfig { l2: CachePolicy::make(256 * 1024, 64), ..default },
        ),
        (
            "Linear-scan store",
            HierarchyConfig { line_store: LineStoreKind::Scan, ..default },
        ),
    ];

    for (name, config) in configs {
        log::info!("Running configuration: {}", name);
        let report = run_trace(&trace, &config)?;
        writer.write_record([
            name,
            &format!("{:.3}", report.l1.hit_rate),
            &format!("{:.3}", report.l2.hit_rate),
            &format!("{:.3}", report.scratchpad.utilization),
            &report.scratchpad.history.num_overflow.to_string(),
        ])?;
    }

    writer.flush()?;
    eprintln!("Wrote {}", output_path);
    Ok(())
}
