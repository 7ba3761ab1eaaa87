use clap::Parser;
use std::path::PathBuf;

/// SimOpts only controls reporting and output. All physical parameters are built-in constants
/// (see `SimPars::default`).
#[derive(Debug, Parser, Clone)]
#[clap(
    version = "0.1.0",
    name = "lapsim",
    about = "A deterministic tire/velocity/fuel lap time simulator written in Rust"
)]
pub struct SimOpts {
    // FLAGS ---------------------------------------------------------------------------------------
    /// Activate debug printing of the vehicle state after every iteration
    #[clap(short, long)]
    pub debug: bool,

    /// Do not render the lap time chart
    #[clap(long)]
    pub no_plot: bool,

    /// Write lap times as text, CSV and JSON files to the output directory
    #[clap(short, long)]
    pub export: bool,

    // OPTIONS -------------------------------------------------------------------------------------
    /// Set output directory for the chart and exported results
    #[clap(short, long, default_value = "output")]
    pub outdir: PathBuf,
}
