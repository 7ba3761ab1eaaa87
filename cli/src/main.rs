use anyhow::Context;
use clap::Parser;
use lapsim::core::handle_sim::handle_sim;
use lapsim::post::chart::{encode_png, render_scatter, write_png, ChartStyle};
use lapsim::post::sim_result::SimResult;
use lapsim::pre::sim_opts::SimOpts;
use lapsim::pre::sim_pars::SimPars;
use std::path::Path;
use std::time::Instant;

const CHART_SIZE: (u32, u32) = (600, 400);

fn export_results_plot(result: &SimResult, out_dir: &Path) -> anyhow::Result<String> {
    let image = render_scatter(
        &result.xs(),
        &result.ys(),
        CHART_SIZE.0,
        CHART_SIZE.1,
        &ChartStyle::default(),
    )?;
    let bytes = encode_png(&image)?;
    let out_path = out_dir.join("lap_times.png");
    write_png(&bytes, &out_path)
        .context(format!("Failed to write chart to {}!", out_path.display()))?;
    Ok(out_path.to_string_lossy().into_owned())
}

fn export_results_files(result: &SimResult, out_dir: &Path) -> anyhow::Result<()> {
    result.write_lap_times_to_file(&out_dir.join("last_run.txt"))?;
    result.write_csv(&out_dir.join("last_run.csv"))?;
    result.write_json(&out_dir.join("last_run.json"))?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    // PRE-PROCESSING ------------------------------------------------------------------------------
    let sim_opts: SimOpts = SimOpts::parse();
    let sim_pars = SimPars::default();

    println!(
        "INFO: Simulating {} iterations with a step size of {:.3}",
        sim_pars.no_iterations, sim_pars.step_size
    );

    // EXECUTION -----------------------------------------------------------------------------------
    let t_start = Instant::now();
    let sim_result = handle_sim(&sim_pars, sim_opts.debug)?;
    println!("INFO: Execution time: {}us", t_start.elapsed().as_micros());

    // POST-PROCESSING -----------------------------------------------------------------------------
    sim_result.print_lap_times();

    if sim_opts.export || !sim_opts.no_plot {
        std::fs::create_dir_all(&sim_opts.outdir).context(format!(
            "Failed to create output directory {}!",
            sim_opts.outdir.display()
        ))?;
    }

    if sim_opts.export {
        match export_results_files(&sim_result, &sim_opts.outdir) {
            Ok(()) => println!("INFO: Results written to {}", sim_opts.outdir.display()),
            Err(e) => eprintln!("WARNING: Could not export results: {:#}", e),
        }
    }

    if !sim_opts.no_plot {
        match export_results_plot(&sim_result, &sim_opts.outdir) {
            Ok(path) => println!("INFO: Chart written to {}", path),
            Err(e) => eprintln!("WARNING: Could not draw chart: {:#}", e),
        }
    }

    Ok(())
}
