use std::fmt;

/// EIGENSTRAT code for a missing call.
pub const MISSING: u8 = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Population {
    A,
    B,
}

impl Population {
    pub const ALL: [Population; 2] = [Population::A, Population::B];

    pub fn letter(self) -> char {
        match self {
            Population::A => 'A',
            Population::B => 'B',
        }
    }

    pub fn index(self) -> usize {
        match self {
            Population::A => 0,
            Population::B => 1,
        }
    }
}

impl fmt::Display for Population {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ploidy {
    Haploid,
    Diploid,
}

impl Ploidy {
    /// Haplotype slots simulated per emitted individual.
    pub fn copies(self) -> usize {
        match self {
            Ploidy::Haploid => 1,
            Ploidy::Diploid => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub id: String,
    pub chromosome: String,
    /// Morgans.
    pub genetic_position: f64,
    /// Genetic position as it appeared in the .snp file.
    pub genetic_position_text: String,
    pub physical_position: String,
    pub ref_allele: String,
    pub alt_allele: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Individual {
    pub id: String,
    pub sex: String,
    pub label: String,
}

/// Sums consecutive haplotype calls into diploid dosages.
pub fn fold_diploid(haploid: &[u8]) -> Vec<u8> {
    debug_assert!(haploid.len() % 2 == 0, "odd haplotype row width");
    haploid
        .chunks_exact(2)
        .map(|pair| {
            if pair[0] == MISSING || pair[1] == MISSING {
                MISSING
            } else {
                pair[0] + pair[1]
            }
        })
        .collect()
}
