use crate::Args;
use crate::config::ParamFile;
use crate::engine::{AdmixtureEngine, SimulationParams};
use crate::error::{CustomError, Result};
use crate::model::Ploidy;
use crate::output::{OutputPaths, write_genome};
use crate::panel::{GenotypePanel, PanelPaths};
use chrono::Local;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const DEFAULT_POPULATION_NAME: &str = "ADMIX";

#[derive(Debug, Clone)]
pub struct RunSpec {
    pub pop_a: PanelPaths,
    pub pop_b: PanelPaths,
    pub output_prefix: String,
    pub generations: Vec<u32>,
    pub alpha: f64,
    pub n_individuals: usize,
    pub ploidy: Ploidy,
    pub track_ancestry: bool,
    pub population_name: String,
    pub seed: u64,
}

/// One simulation of a sweep: its parameters, seed and output location.
#[derive(Debug, Clone)]
pub struct Job {
    pub params: SimulationParams,
    pub seed: u64,
    pub output: OutputPaths,
}

impl RunSpec {
    pub fn print_paths(&self) {
        self.pop_a.print_paths("A");
        self.pop_b.print_paths("B");
        println!("Seed: {}", self.seed);
        println!();
    }

    /// A single generation count writes to the prefix as given; a sweep
    /// suffixes prefix and population name with the generation count.
    pub fn jobs(&self) -> Vec<Job> {
        let sweep = self.generations.len() > 1;
        self.generations
            .iter()
            .enumerate()
            .map(|(idx, &generations)| {
                let (prefix, name) = if sweep {
                    (
                        format!("{}{}", self.output_prefix, generations),
                        format!("{}{}", self.population_name, generations),
                    )
                } else {
                    (self.output_prefix.clone(), self.population_name.clone())
                };
                Job {
                    params: SimulationParams {
                        generations,
                        alpha: self.alpha,
                        n_individuals: self.n_individuals,
                        ploidy: self.ploidy,
                        track_ancestry: self.track_ancestry,
                        population_name: name,
                    },
                    seed: self.seed.wrapping_add(idx as u64),
                    output: OutputPaths::from_prefix(&prefix),
                }
            })
            .collect()
    }
}

pub fn build_run_spec(args: &Args) -> Result<RunSpec> {
    let file = match &args.config {
        Some(path) => ParamFile::load(path)?,
        None => ParamFile::default(),
    };
    merge(args, file)
}

fn merge(args: &Args, file: ParamFile) -> Result<RunSpec> {
    let pop_a = args
        .pop_a
        .clone()
        .or(file.pop_a)
        .ok_or(CustomError::MissingParameter {
            name: "pop_a",
            flag: "pop-a",
        })?;
    let pop_b = args
        .pop_b
        .clone()
        .or(file.pop_b)
        .ok_or(CustomError::MissingParameter {
            name: "pop_b",
            flag: "pop-b",
        })?;
    let generations = if args.generations.is_empty() {
        file.generations.map(|g| g.into_vec()).unwrap_or_default()
    } else {
        args.generations.clone()
    };
    if generations.is_empty() {
        return Err(CustomError::MissingParameter {
            name: "generations",
            flag: "generations",
        });
    }
    let alpha = args
        .alpha
        .or(file.alpha)
        .ok_or(CustomError::MissingParameter {
            name: "alpha",
            flag: "alpha",
        })?;
    let n_individuals =
        args.n_individuals
            .or(file.n_individuals)
            .ok_or(CustomError::MissingParameter {
                name: "n_individuals",
                flag: "n-individuals",
            })?;

    let haploid = args.haploid || file.haploid.unwrap_or(false);
    let track_ancestry = args.track_ancestry || file.track_ancestry.unwrap_or(false);
    let output_prefix = args
        .output_prefix
        .clone()
        .or(file.output_prefix)
        .unwrap_or_else(|| {
            format!(
                "admixsim_output_{}/admixed",
                Local::now().format("%Y%m%d_%H%M%S")
            )
        });
    let population_name = args
        .population_name
        .clone()
        .or(file.population_name)
        .unwrap_or_else(|| DEFAULT_POPULATION_NAME.to_string());
    let seed = args
        .seed
        .or(file.seed)
        .unwrap_or_else(|| rand::rng().random_range(1..u64::MAX));

    Ok(RunSpec {
        pop_a: PanelPaths::from_prefix(&pop_a),
        pop_b: PanelPaths::from_prefix(&pop_b),
        output_prefix,
        generations,
        alpha,
        n_individuals,
        ploidy: if haploid {
            Ploidy::Haploid
        } else {
            Ploidy::Diploid
        },
        track_ancestry,
        population_name,
        seed,
    })
}

pub fn run(spec: &RunSpec) -> Result<()> {
    let jobs = spec.jobs();
    // Reject bad parameters before touching the input files.
    for job in &jobs {
        job.params.check_values()?;
    }

    println!("Loading population A...");
    let pop_a = GenotypePanel::open(&spec.pop_a)?;
    println!("Loading population B...");
    let pop_b = GenotypePanel::open(&spec.pop_b)?;
    pop_a.check_aligned(&pop_b)?;
    println!(
        "Loaded {} variants, {} + {} source individuals",
        pop_a.n_markers(),
        pop_a.n_individuals(),
        pop_b.n_individuals()
    );
    println!();

    for job in &jobs {
        println!(
            "Simulating {} individuals, {} generations since admixture (alpha={}, seed={})...",
            job.params.n_individuals, job.params.generations, job.params.alpha, job.seed
        );
        let rng = StdRng::seed_from_u64(job.seed);
        let genome = AdmixtureEngine::new(&pop_a, &pop_b, &job.params, rng)
            .with_progress()
            .run()?;
        write_genome(&genome, &job.output)?;
        println!();
    }
    Ok(())
}
