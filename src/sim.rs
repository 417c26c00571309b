use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use memsim_lib::config::{HierarchyConfig, LineStoreKind};
use memsim_lib::run_wrapper;

/// GPU memory hierarchy simulator.
/// Replays a trace of loads, stores and scratchpad accesses
/// through an L1/L2 cache pair and a scratchpad.
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// Trace file, one 'KIND ADDRESS [SIZE]' per line
    trace: Option<PathBuf>,

    /// JSON configuration file; flags below override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// L1 capacity in bytes
    #[arg(long)]
    l1_size: Option<u64>,

    /// L1 line size in bytes
    #[arg(long)]
    l1_line: Option<u64>,

    /// L2 capacity in bytes
    #[arg(long)]
    l2_size: Option<u64>,

    /// L2 line size in bytes
    #[arg(long)]
    l2_line: Option<u64>,

    /// Scratchpad capacity in bytes
    #[arg(long)]
    lds_size: Option<u64>,

    /// Global memory size in bytes
    #[arg(long)]
    global_size: Option<u64>,

    /// Line store: 'ordered' (default) or 'scan'
    #[arg(long)]
    store: Option<LineStoreKind>,

    /// Read instructions from stdin one at a time
    #[arg(long)]
    step: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Print detailed history after simulation
    #[arg(long)]
    history: bool,

    /// Log every instruction
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn hierarchy_config(&self) -> Result<HierarchyConfig, Box<dyn Error>> {
        let mut config = match &self.config {
            Some(path) => HierarchyConfig::load(path)?,
            None => HierarchyConfig::default(),
        };
        if let Some(size) = self.l1_size {
            config.l1.capacity_bytes = size;
        }
        if let Some(line) = self.l1_line {
            config.l1.line_size_bytes = line;
        }
        if let Some(size) = self.l2_size {
            config.l2.capacity_bytes = size;
        }
        if let Some(line) = self.l2_line {
            config.l2.line_size_bytes = line;
        }
        if let Some(size) = self.lds_size {
            config.scratchpad_capacity_bytes = size;
        }
        if let Some(size) = self.global_size {
            config.global_capacity_bytes = size;
        }
        if let Some(store) = self.store {
            config.line_store = store;
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(default_level),
    )
    .init();

    let config = args.hierarchy_config()?;
    log::debug!("{:?}", config);

    let report = if args.step {
        run_wrapper::run_interactive(&config)?
    } else {
        let trace = args
            .trace
            .as_ref()
            .ok_or("You should specify exactly one trace file")?;
        run_wrapper::run(trace, &config)?
    };

    if args.json {
        println!("{}", report.to_json()?);
    } else {
        report.print_summary();
    }
    if args.history {
        report.print();
    }

    Ok(())
}
