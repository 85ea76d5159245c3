use indicatif::{ProgressBar, ProgressStyle};
use rand::Rng;

use crate::error::{CustomError, Result};
use crate::model::{Individual, Marker, Ploidy, Population, fold_diploid};
use crate::panel::GenotypePanel;
use crate::pool::{AncestorPool, Assignment};

#[derive(Debug, Clone)]
pub struct SimulationParams {
    /// Generations elapsed since the admixture event.
    pub generations: u32,
    /// Probability that an ancestor is drawn from population A.
    pub alpha: f64,
    /// Admixed individuals to emit.
    pub n_individuals: usize,
    pub ploidy: Ploidy,
    pub track_ancestry: bool,
    pub population_name: String,
}

impl SimulationParams {
    /// Haplotype slots walked along the genome.
    pub fn n_slots(&self) -> usize {
        self.n_individuals.saturating_mul(self.ploidy.copies())
    }

    /// Checks that need no input panel.
    pub fn check_values(&self) -> Result<()> {
        if !self.alpha.is_finite() || !(0.0..=1.0).contains(&self.alpha) {
            return Err(CustomError::AdmixtureFraction { alpha: self.alpha });
        }
        if self.n_individuals < 1 {
            return Err(CustomError::AdmixedCount {
                n_individuals: self.n_individuals,
            });
        }
        Ok(())
    }

    pub fn validate(&self, n_a: usize, n_b: usize) -> Result<()> {
        self.check_values()?;
        let n_slots = self.n_slots();
        let available = if self.alpha == 1.0 {
            n_a
        } else if self.alpha == 0.0 {
            n_b
        } else {
            n_a + n_b
        };
        if n_slots > available {
            return Err(CustomError::SourceCount { n_slots, available });
        }
        Ok(())
    }
}

/// Probability of at least one crossover over `distance` Morgans after
/// `generations` meioses.
pub fn recombination_probability(generations: u32, distance: f64) -> f64 {
    1.0 - (-(generations as f64) * distance).exp()
}

#[derive(Debug, Clone, Default)]
pub struct AdmixedGenome {
    /// One row per marker, one code per emitted individual.
    pub genotypes: Vec<Vec<u8>>,
    pub markers: Vec<Marker>,
    /// One row per marker, one entry per haplotype slot.
    pub ancestry: Option<Vec<Vec<Population>>>,
    pub individuals: Vec<Individual>,
}

/// Mutable state of one walk: the slot bindings and the pool they draw from.
#[derive(Debug, Clone)]
pub struct WalkState {
    pub assignments: Vec<Assignment>,
    pub pool: AncestorPool,
}

pub struct AdmixtureEngine<'a, R> {
    pop_a: &'a GenotypePanel,
    pop_b: &'a GenotypePanel,
    params: &'a SimulationParams,
    rng: R,
    progress: ProgressBar,
}

impl<'a, R: Rng> AdmixtureEngine<'a, R> {
    pub fn new(
        pop_a: &'a GenotypePanel,
        pop_b: &'a GenotypePanel,
        params: &'a SimulationParams,
        rng: R,
    ) -> Self {
        Self {
            pop_a,
            pop_b,
            params,
            rng,
            progress: ProgressBar::hidden(),
        }
    }

    /// Report progress over markers on a visible bar.
    pub fn with_progress(mut self) -> Self {
        let pb = ProgressBar::new(self.pop_a.n_markers() as u64);
        if let Ok(style) =
            ProgressStyle::with_template("[{elapsed_precise}] {bar:30} {pos}/{len} markers")
        {
            pb.set_style(style);
        }
        self.progress = pb;
        self
    }

    pub fn run(mut self) -> Result<AdmixedGenome> {
        let (pop_a, pop_b) = (self.pop_a, self.pop_b);
        pop_a.check_aligned(pop_b)?;
        self.params
            .validate(pop_a.n_individuals(), pop_b.n_individuals())?;

        let markers = pop_a.markers();
        let mut genome = AdmixedGenome {
            genotypes: Vec::with_capacity(markers.len()),
            markers: Vec::with_capacity(markers.len()),
            ancestry: self
                .params
                .track_ancestry
                .then(|| Vec::with_capacity(markers.len())),
            individuals: self.admixed_individuals(),
        };

        let mut state = self.segment_start()?;
        self.emit(0, &state, &mut genome);
        self.progress.inc(1);

        for (pos, pair) in markers.windows(2).enumerate() {
            let (prev, curr) = (&pair[0], &pair[1]);
            if prev.chromosome == curr.chromosome {
                let distance = curr.genetic_position - prev.genetic_position;
                let probability = recombination_probability(self.params.generations, distance);
                self.step(&mut state, probability)?;
            } else {
                state = self.segment_start()?;
            }
            self.emit(pos + 1, &state, &mut genome);
            self.progress.inc(1);
        }
        self.progress.abandon();

        Ok(genome)
    }

    /// Fresh bindings for every slot, independent of any earlier segment.
    pub fn segment_start(&mut self) -> Result<WalkState> {
        let (assignments, pool) = AncestorPool::initialize(
            self.params.n_slots(),
            self.params.alpha,
            self.pop_a.n_individuals(),
            self.pop_b.n_individuals(),
            &mut self.rng,
        )?;
        debug_assert!(pool.partitions(&assignments));
        Ok(WalkState { assignments, pool })
    }

    /// Each slot switches ancestor with `probability`, in slot order.
    pub fn step(&mut self, state: &mut WalkState, probability: f64) -> Result<()> {
        for slot in 0..state.assignments.len() {
            if self.rng.random::<f64>() < probability {
                let current = state.assignments[slot];
                state.assignments[slot] =
                    state.pool.swap(current, self.params.alpha, &mut self.rng)?;
            }
        }
        debug_assert!(state.pool.partitions(&state.assignments));
        Ok(())
    }

    fn panel(&self, population: Population) -> &'a GenotypePanel {
        match population {
            Population::A => self.pop_a,
            Population::B => self.pop_b,
        }
    }

    fn emit(&self, marker: usize, state: &WalkState, genome: &mut AdmixedGenome) {
        let haploid: Vec<u8> = state
            .assignments
            .iter()
            .map(|a| self.panel(a.population).genotype(marker, a.individual))
            .collect();
        let row = match self.params.ploidy {
            Ploidy::Haploid => haploid,
            Ploidy::Diploid => fold_diploid(&haploid),
        };
        genome.genotypes.push(row);
        genome.markers.push(self.pop_a.markers()[marker].clone());
        if let Some(ancestry) = genome.ancestry.as_mut() {
            ancestry.push(state.assignments.iter().map(|a| a.population).collect());
        }
    }

    fn admixed_individuals(&self) -> Vec<Individual> {
        let name = &self.params.population_name;
        (0..self.params.n_individuals)
            .map(|idx| Individual {
                id: format!("{name}{idx}"),
                sex: "U".to_string(),
                label: name.clone(),
            })
            .collect()
    }
}
