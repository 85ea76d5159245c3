use std::collections::HashSet;
use std::path::PathBuf;

use crate::error::{CustomError, Result};
use crate::model::{Individual, MISSING, Marker};
use crate::reader::{read_eigenstrat_geno, read_eigenstrat_ind, read_eigenstrat_snp};

#[derive(Debug, Clone)]
pub struct PanelPaths {
    pub ind: PathBuf,
    pub geno: PathBuf,
    pub snp: PathBuf,
}

impl PanelPaths {
    pub fn from_prefix(prefix: &str) -> Self {
        Self {
            ind: PathBuf::from(prefix.to_string() + ".ind"),
            geno: PathBuf::from(prefix.to_string() + ".geno"),
            snp: PathBuf::from(prefix.to_string() + ".snp"),
        }
    }

    pub fn print_paths(&self, label: &str) {
        println!("[{label}] IND : {}", self.ind.display());
        println!("[{label}] GENO: {}", self.geno.display());
        println!("[{label}] SNP : {}", self.snp.display());
    }
}

/// One ancestral population: individuals, markers and a marker-major genotype matrix.
#[derive(Debug, Clone)]
pub struct GenotypePanel {
    individuals: Vec<Individual>,
    markers: Vec<Marker>,
    genotypes: Vec<Vec<u8>>,
}

impl GenotypePanel {
    pub fn open(paths: &PanelPaths) -> Result<Self> {
        let individuals = read_eigenstrat_ind(&paths.ind)?;
        let markers = read_eigenstrat_snp(&paths.snp)?;
        let genotypes = read_eigenstrat_geno(&paths.geno, individuals.len())?;
        Self::from_parts(individuals, markers, genotypes)
    }

    pub fn from_parts(
        individuals: Vec<Individual>,
        markers: Vec<Marker>,
        genotypes: Vec<Vec<u8>>,
    ) -> Result<Self> {
        let n_samples = individuals.len();
        let n_variants = markers.len();

        // Sanity-check samples
        if n_samples < 1 {
            return Err(CustomError::SampleCount { n_samples });
        }
        // Sanity-check variants
        if n_variants < 1 {
            return Err(CustomError::VariantCount { n_variants });
        }
        if genotypes.len() != n_variants {
            return Err(CustomError::EigenstratGenoVariantCount {
                expected: n_variants,
                found: genotypes.len(),
            });
        }
        if let Some((line_idx, row)) = genotypes
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != n_samples)
        {
            return Err(CustomError::EigenstratGenoFields {
                line_num: line_idx + 1,
                n_fields: row.len(),
                expected: n_samples,
            });
        }
        for (line_idx, row) in genotypes.iter().enumerate() {
            if let Some(&code) = row.iter().find(|&&c| c > 1 && c != MISSING) {
                return Err(CustomError::HaplotypeCode {
                    line_num: line_idx + 1,
                    code,
                });
            }
        }
        check_marker_order(&markers)?;

        Ok(Self {
            individuals,
            markers,
            genotypes,
        })
    }

    /// Both panels must describe the same variants in the same order.
    pub fn check_aligned(&self, other: &GenotypePanel) -> Result<()> {
        if self.n_markers() != other.n_markers() {
            return Err(CustomError::PanelVariantCount {
                n_a: self.n_markers(),
                n_b: other.n_markers(),
            });
        }
        for (idx, (a, b)) in self.markers.iter().zip(&other.markers).enumerate() {
            if a.id != b.id || a.chromosome != b.chromosome {
                return Err(CustomError::PanelMarkerMismatch {
                    record: idx + 1,
                    a: format!("{} (chromosome {})", a.id, a.chromosome),
                    b: format!("{} (chromosome {})", b.id, b.chromosome),
                });
            }
        }
        Ok(())
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn n_individuals(&self) -> usize {
        self.individuals.len()
    }

    pub fn n_markers(&self) -> usize {
        self.markers.len()
    }

    pub fn genotype(&self, marker: usize, individual: usize) -> u8 {
        self.genotypes[marker][individual]
    }
}

// Each chromosome is one contiguous run with non-decreasing genetic positions.
fn check_marker_order(markers: &[Marker]) -> Result<()> {
    let mut finished: HashSet<&str> = HashSet::new();
    for (idx, pair) in markers.windows(2).enumerate() {
        let (prev, curr) = (&pair[0], &pair[1]);
        let record = idx + 2;
        if prev.chromosome == curr.chromosome {
            if curr.genetic_position < prev.genetic_position {
                return Err(CustomError::UnsortedMarkers {
                    record,
                    id: curr.id.clone(),
                    chromosome: curr.chromosome.clone(),
                    position: curr.genetic_position,
                    previous: prev.genetic_position,
                });
            }
        } else {
            finished.insert(prev.chromosome.as_str());
            if finished.contains(curr.chromosome.as_str()) {
                return Err(CustomError::SplitChromosome {
                    record,
                    chromosome: curr.chromosome.clone(),
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn marker(id: &str, chromosome: &str, genetic_position: f64) -> Marker {
        Marker {
            id: id.to_string(),
            chromosome: chromosome.to_string(),
            genetic_position,
            genetic_position_text: genetic_position.to_string(),
            physical_position: "0".to_string(),
            ref_allele: "A".to_string(),
            alt_allele: "G".to_string(),
        }
    }

    pub(crate) fn individuals(prefix: &str, n: usize) -> Vec<Individual> {
        (0..n)
            .map(|i| Individual {
                id: format!("{prefix}{i}"),
                sex: "U".to_string(),
                label: prefix.to_string(),
            })
            .collect()
    }

    #[test]
    fn rejects_row_count_mismatch() {
        let err = GenotypePanel::from_parts(
            individuals("A", 2),
            vec![marker("rs1", "1", 0.0), marker("rs2", "1", 0.1)],
            vec![vec![0, 1]],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            CustomError::EigenstratGenoVariantCount {
                expected: 2,
                found: 1
            }
        ));
    }

    #[test]
    fn rejects_decreasing_genetic_position() {
        let err = GenotypePanel::from_parts(
            individuals("A", 1),
            vec![marker("rs1", "1", 0.2), marker("rs2", "1", 0.1)],
            vec![vec![0], vec![1]],
        )
        .unwrap_err();
        match err {
            CustomError::UnsortedMarkers { record, id, .. } => {
                assert_eq!(record, 2);
                assert_eq!(id, "rs2");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn position_may_reset_at_chromosome_boundary() {
        let panel = GenotypePanel::from_parts(
            individuals("A", 1),
            vec![
                marker("rs1", "1", 0.0),
                marker("rs2", "1", 0.05),
                marker("rs3", "2", 0.0),
            ],
            vec![vec![0], vec![1], vec![0]],
        )
        .unwrap();
        assert_eq!(panel.n_markers(), 3);
        assert_eq!(panel.genotype(1, 0), 1);
    }

    #[test]
    fn rejects_dosage_calls_in_haplotype_panel() {
        let err = GenotypePanel::from_parts(
            individuals("A", 2),
            vec![marker("rs1", "1", 0.0), marker("rs2", "1", 0.1)],
            vec![vec![0, MISSING], vec![2, 2]],
        )
        .unwrap_err();
        assert!(matches!(
            err,
            CustomError::HaplotypeCode {
                line_num: 2,
                code: 2
            }
        ));
    }

    #[test]
    fn rejects_split_chromosome() {
        let err = GenotypePanel::from_parts(
            individuals("A", 1),
            vec![
                marker("rs1", "1", 0.0),
                marker("rs2", "2", 0.0),
                marker("rs3", "1", 0.3),
            ],
            vec![vec![0], vec![1], vec![0]],
        )
        .unwrap_err();
        assert!(matches!(err, CustomError::SplitChromosome { record: 3, .. }));
    }

    #[test]
    fn alignment_requires_matching_ids() {
        let a = GenotypePanel::from_parts(
            individuals("A", 1),
            vec![marker("rs1", "1", 0.0), marker("rs2", "1", 0.1)],
            vec![vec![0], vec![1]],
        )
        .unwrap();
        let b = GenotypePanel::from_parts(
            individuals("B", 1),
            vec![marker("rs1", "1", 0.0), marker("rs9", "1", 0.1)],
            vec![vec![0], vec![1]],
        )
        .unwrap();
        assert!(a.check_aligned(&a.clone()).is_ok());
        let err = a.check_aligned(&b).unwrap_err();
        assert!(matches!(err, CustomError::PanelMarkerMismatch { record: 2, .. }));
    }
}
