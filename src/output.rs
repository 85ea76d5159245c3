use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::engine::AdmixedGenome;
use crate::error::{CustomError, Result};
use crate::model::{Individual, Marker, Population};

#[derive(Debug, Clone)]
pub struct OutputPaths {
    pub snp: PathBuf,
    pub geno: PathBuf,
    pub ind: PathBuf,
    pub anc: PathBuf,
}

impl OutputPaths {
    pub fn from_prefix(prefix: &str) -> Self {
        Self {
            snp: PathBuf::from(prefix.to_string() + ".snp"),
            geno: PathBuf::from(prefix.to_string() + ".geno"),
            ind: PathBuf::from(prefix.to_string() + ".ind"),
            anc: PathBuf::from(prefix.to_string() + ".anc"),
        }
    }

    fn create_parent_dir(&self) -> Result<()> {
        if let Some(parent) = self.snp.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| CustomError::OutputDir {
                source: e,
                path: parent.to_path_buf(),
            })?;
        }
        Ok(())
    }
}

pub fn write_genome(genome: &AdmixedGenome, paths: &OutputPaths) -> Result<()> {
    paths.create_parent_dir()?;

    println!("Writing admixed variants to {}...", paths.snp.display());
    write_snp(&genome.markers, &paths.snp)?;

    println!("Writing admixed genotypes to {}...", paths.geno.display());
    write_geno(&genome.genotypes, &paths.geno)?;

    println!("Writing admixed individuals to {}...", paths.ind.display());
    write_ind(&genome.individuals, &paths.ind)?;

    if let Some(ancestry) = &genome.ancestry {
        println!("Writing local ancestry to {}...", paths.anc.display());
        write_ancestry(ancestry, &paths.anc)?;
    }
    Ok(())
}

fn tab_writer(path: &Path) -> Result<csv::Writer<File>> {
    let wtr = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .quote_style(csv::QuoteStyle::Never)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_path(path)?;
    Ok(wtr)
}

pub fn write_snp(markers: &[Marker], path: &Path) -> Result<()> {
    let mut wtr = tab_writer(path)?;
    for marker in markers {
        wtr.write_record([
            marker.id.as_str(),
            marker.chromosome.as_str(),
            marker.genetic_position_text.as_str(),
            marker.physical_position.as_str(),
            marker.ref_allele.as_str(),
            marker.alt_allele.as_str(),
        ])?;
    }
    wtr.flush().map_err(|e| CustomError::Write {
        source: e,
        path: path.into(),
    })?;
    Ok(())
}

pub fn write_ind(individuals: &[Individual], path: &Path) -> Result<()> {
    let mut wtr = tab_writer(path)?;
    for individual in individuals {
        wtr.write_record([
            individual.id.as_str(),
            individual.sex.as_str(),
            individual.label.as_str(),
        ])?;
    }
    wtr.flush().map_err(|e| CustomError::Write {
        source: e,
        path: path.into(),
    })?;
    Ok(())
}

pub fn write_geno(rows: &[Vec<u8>], path: &Path) -> Result<()> {
    write_lines(rows.iter().map(|row| row.iter().map(|&code| b'0' + code)), path)
}

pub fn write_ancestry(rows: &[Vec<Population>], path: &Path) -> Result<()> {
    write_lines(
        rows.iter()
            .map(|row| row.iter().map(|population| population.letter() as u8)),
        path,
    )
}

// One undelimited row of single-byte codes per line.
fn write_lines<R, C>(rows: R, path: &Path) -> Result<()>
where
    R: Iterator<Item = C>,
    C: Iterator<Item = u8>,
{
    let write_err = |e: std::io::Error| CustomError::Write {
        source: e,
        path: path.into(),
    };
    let f = File::create(path).map_err(write_err)?;
    let mut wtr = BufWriter::new(f);
    let mut line = Vec::new();
    for row in rows {
        line.clear();
        line.extend(row);
        line.push(b'\n');
        wtr.write_all(&line).map_err(write_err)?;
    }
    wtr.flush().map_err(write_err)?;
    Ok(())
}
