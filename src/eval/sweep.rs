use std::path::Path;

use plotters::prelude::*;

use memsim_lib::config::HierarchyConfig;
use memsim_lib::memory::cache::CachePolicy;
use memsim_lib::run_wrapper::run_trace;
use memsim_lib::trace::fetch_trace;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("warn"),
    )
    .init();

    let param_tokens: Vec<String> = std::env::args().collect();
    let trace_path =
        param_tokens.get(1).ok_or("You should specify exactly one trace file")?;
    let trace = fetch_trace(Path::new(trace_path))?;

    // Plot line series for each line size
    // For a fixed line size, vary the L1 capacity
    // Performance metric: L1 hit rate
    // L1 capacities: 4KB, 8KB, 16KB, 32KB, 64KB, 128KB
    let l1_sizes: Vec<u64> = vec![4, 8, 16, 32, 64, 128];
    // Line sizes: 32B, 64B, 128B, 256B
    let line_sizes: Vec<u64> = vec![32, 64, 128, 256];

    let mut data: Vec<Vec<(u64, f64)>> = vec![vec![]; line_sizes.len()];
    for (i, line_size) in line_sizes.iter().enumerate() {
        for l1_size in l1_sizes.iter() {
            let config = HierarchyConfig {
                l1: CachePolicy::make(l1_size * 1024, *line_size),
                ..Default::default()
            };
            let report = run_trace(&trace, &config)?;
            log::info!(
                "L1 {}KB / {}B lines: {:.2}%",
                l1_size,
                line_size,
                report.l1.hit_rate
            );
            data[i].push((*l1_size, report.l1.hit_rate));
        }
    }

    // Plot the data
    let trace_base_name = Path::new(trace_path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| trace_path.clone());
    let plot_title = format!("L1 hit rate sweep: {}", trace_base_name);
    std::fs::create_dir_all("eval")?;
    let output_path = format!("eval/sweep_eval_{}.svg", trace_base_name);

    let root =
        SVGBackend::new(output_path.as_str(), (800, 600)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut ctx = ChartBuilder::on(&root)
        .caption(plot_title.as_str(), ("sans-serif", 40).into_font())
        .margin(5)
        .x_label_area_size(40)
        .y_label_area_size(40)
        .build_cartesian_2d((4u64..128u64).log_scale(), 0.0..100.0)?;
    ctx.configure_mesh()
        .x_desc("L1 capacity (KB)")
        .y_desc("L1 hit rate (%)")
        .draw()?;

    for (i, line_size) in line_sizes.iter().enumerate() {
        let series = data[i].iter().copied();
        let label = format!("Line size = {}B", line_size);
        let color = Palette99::pick(i).to_rgba();
        ctx.draw_series(LineSeries::new(series, color))?
            .label(label)
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], color)
            });
    }

    ctx.configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    root.present()?;

    eprintln!("Wrote {}", output_path);
    Ok(())
}
