use rand::Rng;

use crate::error::{CustomError, Result};
use crate::model::Population;

/// The source individual currently supplying calls to one haplotype slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Assignment {
    pub population: Population,
    pub individual: usize,
}

/// Free source individuals per population. Every source index is either free
/// or held by exactly one slot.
#[derive(Debug, Clone)]
pub struct AncestorPool {
    free: [Vec<usize>; 2],
    sizes: [usize; 2],
}

impl AncestorPool {
    fn new(n_a: usize, n_b: usize) -> Self {
        Self {
            free: [(0..n_a).collect(), (0..n_b).collect()],
            sizes: [n_a, n_b],
        }
    }

    /// Binds every slot to a fresh ancestor drawn without replacement.
    pub fn initialize<R: Rng + ?Sized>(
        n_slots: usize,
        alpha: f64,
        n_a: usize,
        n_b: usize,
        rng: &mut R,
    ) -> Result<(Vec<Assignment>, Self)> {
        let mut pool = Self::new(n_a, n_b);
        let mut assignments = Vec::with_capacity(n_slots);
        for _ in 0..n_slots {
            let population = choose_population(alpha, rng);
            assignments.push(pool.draw(population, rng)?);
        }
        Ok((assignments, pool))
    }

    /// Replaces `current` with a new ancestor. The replacement is drawn before
    /// `current` is released, so a slot never redraws the ancestor it just left.
    pub fn swap<R: Rng + ?Sized>(
        &mut self,
        current: Assignment,
        alpha: f64,
        rng: &mut R,
    ) -> Result<Assignment> {
        let population = choose_population(alpha, rng);
        let next = self.draw(population, rng)?;
        self.release(current);
        Ok(next)
    }

    pub fn free(&self, population: Population) -> &[usize] {
        &self.free[population.index()]
    }

    /// Number of source individuals in `population`.
    pub fn size(&self, population: Population) -> usize {
        self.sizes[population.index()]
    }

    /// True when the free lists and `assignments` together hold every source
    /// index exactly once.
    pub fn partitions(&self, assignments: &[Assignment]) -> bool {
        Population::ALL.into_iter().all(|population| {
            let mut seen = vec![false; self.size(population)];
            let used = assignments
                .iter()
                .filter(|a| a.population == population)
                .map(|a| a.individual);
            for idx in self.free(population).iter().copied().chain(used) {
                match seen.get_mut(idx) {
                    Some(slot) if !*slot => *slot = true,
                    _ => return false,
                }
            }
            seen.into_iter().all(|s| s)
        })
    }

    fn draw<R: Rng + ?Sized>(&mut self, population: Population, rng: &mut R) -> Result<Assignment> {
        let free = &mut self.free[population.index()];
        if free.is_empty() {
            return Err(CustomError::PoolExhausted { population });
        }
        let pick = rng.random_range(0..free.len());
        let individual = free.swap_remove(pick);
        Ok(Assignment {
            population,
            individual,
        })
    }

    fn release(&mut self, assignment: Assignment) {
        self.free[assignment.population.index()].push(assignment.individual);
    }
}

// Bernoulli(alpha); success picks population A.
fn choose_population<R: Rng + ?Sized>(alpha: f64, rng: &mut R) -> Population {
    if rng.random::<f64>() < alpha {
        Population::A
    } else {
        Population::B
    }
}
