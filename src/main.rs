mod cli;
mod config;
mod engine;
mod error;
mod model;
mod output;
mod panel;
mod pool;
mod reader;

use crate::error::Result;
use clap::Parser;
use miette::IntoDiagnostic;
use std::path::PathBuf;

/// Simulate admixed individuals from two ancestral EIGENSTRAT panels.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Args {
    /// JSON parameter file. Flags given on the command line take precedence.
    #[arg(short, long, value_hint = clap::ValueHint::FilePath)]
    config: Option<PathBuf>,

    /// Input file prefix of ancestral population A.
    #[arg(long)]
    pop_a: Option<String>,

    /// Input file prefix of ancestral population B.
    #[arg(long)]
    pop_b: Option<String>,

    /// Output file prefix [default: admixsim_output_<timestamp>/admixed].
    #[arg(short, long)]
    output_prefix: Option<String>,

    /// Generations since admixture. Several comma-separated values run one
    /// simulation each.
    #[arg(short, long, value_delimiter = ',')]
    generations: Vec<u32>,

    /// Admixture fraction: probability that an ancestor comes from population A.
    #[arg(short, long)]
    alpha: Option<f64>,

    /// Number of admixed individuals to simulate.
    #[arg(short, long)]
    n_individuals: Option<usize>,

    /// Emit haploid calls instead of diploid dosages.
    #[arg(long)]
    haploid: bool,

    /// Also write per-marker local ancestry (.anc).
    #[arg(short, long)]
    track_ancestry: bool,

    /// Population label of the admixed individuals [default: ADMIX].
    #[arg(long)]
    population_name: Option<String>,

    /// Random seed (random if omitted).
    #[arg(short, long)]
    seed: Option<u64>,
}

fn try_main() -> Result<()> {
    let args = Args::parse();

    let run_spec = cli::build_run_spec(&args)?;
    run_spec.print_paths();

    cli::run(&run_spec)?;
    Ok(())
}

fn main() -> miette::Result<()> {
    try_main().into_diagnostic()
}
