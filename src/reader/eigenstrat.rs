use itertools::Itertools;
use std::path::Path;

use crate::error::{CustomError, Result};
use crate::model::{Individual, MISSING, Marker};

pub(crate) const IND_FIELDS: usize = 3;
pub(crate) const SNP_FIELDS: usize = 6;

fn read_to_string(path: &impl AsRef<Path>) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| CustomError::ReadWithPath {
        source: e,
        path: path.as_ref().to_path_buf(),
    })
}

// Records are grouped by token count, not by line.
fn check_record_fields(path: &impl AsRef<Path>, n_tokens: usize, expected: usize) -> Result<()> {
    if n_tokens % expected != 0 {
        return Err(CustomError::EigenstratRecordFields {
            path: path.as_ref().to_path_buf(),
            record: n_tokens / expected + 1,
            n_tokens,
            expected,
        });
    }
    Ok(())
}

pub(crate) fn read_eigenstrat_ind(path: &impl AsRef<Path>) -> Result<Vec<Individual>> {
    let content = read_to_string(path)?;
    let tokens: Vec<&str> = content.split_whitespace().collect();
    check_record_fields(path, tokens.len(), IND_FIELDS)?;

    let individuals = tokens
        .into_iter()
        .tuples::<(_, _, _)>()
        .map(|(id, sex, label)| Individual {
            id: id.to_string(),
            sex: sex.to_string(),
            label: label.to_string(),
        })
        .collect();
    Ok(individuals)
}

pub(crate) fn read_eigenstrat_snp(path: &impl AsRef<Path>) -> Result<Vec<Marker>> {
    let content = read_to_string(path)?;
    let tokens: Vec<&str> = content.split_whitespace().collect();
    check_record_fields(path, tokens.len(), SNP_FIELDS)?;

    tokens
        .into_iter()
        .tuples::<(_, _, _, _, _, _)>()
        .enumerate()
        .map(|(record_idx, (id, chromosome, genetic, physical, ref_allele, alt_allele))| {
            parse_marker(
                record_idx + 1,
                [id, chromosome, genetic, physical, ref_allele, alt_allele],
            )
        })
        .collect()
}

fn parse_marker(record: usize, fields: [&str; SNP_FIELDS]) -> Result<Marker> {
    let [id, chromosome, genetic, physical, ref_allele, alt_allele] = fields;
    let genetic_position: f64 = genetic.parse().map_err(|e| CustomError::GeneticPosition {
        source: e,
        record,
        value: genetic.to_string(),
    })?;
    if !genetic_position.is_finite() {
        return Err(CustomError::GeneticPositionFinite {
            record,
            value: genetic_position,
        });
    }

    Ok(Marker {
        id: id.to_string(),
        chromosome: chromosome.to_string(),
        genetic_position,
        genetic_position_text: genetic.to_string(),
        physical_position: physical.to_string(),
        ref_allele: ref_allele.to_string(),
        alt_allele: alt_allele.to_string(),
    })
}

/// Reads one phased haplotype row per variant. Every row must hold exactly
/// `n_samples` calls, each `0`, `1` or missing.
pub(crate) fn read_eigenstrat_geno(
    path: &impl AsRef<Path>,
    n_samples: usize,
) -> Result<Vec<Vec<u8>>> {
    let content = read_to_string(path)?;
    content
        .split_whitespace()
        .enumerate()
        .map(|(line_idx, row)| parse_variant_row(row, line_idx + 1, n_samples))
        .collect()
}

fn parse_variant_row(row: &str, line_num: usize, n_samples: usize) -> Result<Vec<u8>> {
    let n_fields = row.chars().count();
    if n_fields != n_samples {
        return Err(CustomError::EigenstratGenoFields {
            line_num,
            n_fields,
            expected: n_samples,
        });
    }

    row.chars()
        .map(|c| match c {
            '0' => Ok(0),
            '1' => Ok(1),
            '9' => Ok(MISSING),
            code => Err(CustomError::EigenstratGenoCode { line_num, code }),
        })
        .collect()
}
