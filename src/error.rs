use thiserror::Error;

use crate::model::Population;

#[derive(Debug, Error)]
pub enum CustomError {
    #[error("could not read {path}")]
    ReadWithPath {
        #[source]
        source: std::io::Error,
        path: std::path::PathBuf,
    },

    #[error("could not write to {path}")]
    Write {
        #[source]
        source: std::io::Error,
        path: std::path::PathBuf,
    },

    #[error("could not create output directory {path}")]
    OutputDir {
        #[source]
        source: std::io::Error,
        path: std::path::PathBuf,
    },

    #[error("could not write delimited output")]
    CsvWrite(#[from] csv::Error),

    #[error("could not parse parameter file {path}")]
    ConfigParse {
        #[source]
        source: serde_json::Error,
        path: std::path::PathBuf,
    },

    #[error("missing required parameter `{name}` (pass --{flag} or set it in the parameter file)")]
    MissingParameter { name: &'static str, flag: &'static str },

    #[error("{path}: {n_tokens} tokens do not form whole records of {expected} fields (record {record} is incomplete)")]
    EigenstratRecordFields {
        path: std::path::PathBuf,
        record: usize,
        n_tokens: usize,
        expected: usize,
    },

    #[error("could not parse genetic position {value:?} in record {record} of .snp file")]
    GeneticPosition {
        #[source]
        source: std::num::ParseFloatError,
        record: usize,
        value: String,
    },

    #[error("genetic position {value} in record {record} of .snp file is not finite")]
    GeneticPositionFinite { record: usize, value: f64 },

    #[error("expected {expected} genotype calls (got {n_fields}) in line {line_num} of .geno file")]
    EigenstratGenoFields {
        line_num: usize,
        n_fields: usize,
        expected: usize,
    },

    #[error("invalid genotype code {code:?} in line {line_num} of .geno file")]
    EigenstratGenoCode { line_num: usize, code: char },

    #[error("haplotype call {code} in line {line_num} of .geno file is not 0, 1 or 9")]
    HaplotypeCode { line_num: usize, code: u8 },

    #[error(".geno file has {found} rows but .snp file lists {expected} variants")]
    EigenstratGenoVariantCount { expected: usize, found: usize },

    #[error("need at least 1 sample (got {n_samples})")]
    SampleCount { n_samples: usize },

    #[error("need at least 1 variant (got {n_variants})")]
    VariantCount { n_variants: usize },

    #[error(
        "variant {id} (record {record}) on chromosome {chromosome} has genetic position {position} before the previous variant at {previous}"
    )]
    UnsortedMarkers {
        record: usize,
        id: String,
        chromosome: String,
        position: f64,
        previous: f64,
    },

    #[error("chromosome {chromosome} reappears at record {record} after other chromosomes")]
    SplitChromosome { record: usize, chromosome: String },

    #[error("population panels disagree on variant count (A={n_a}, B={n_b})")]
    PanelVariantCount { n_a: usize, n_b: usize },

    #[error("population panels disagree at variant {record} (A={a}, B={b})")]
    PanelMarkerMismatch { record: usize, a: String, b: String },

    #[error("admixture fraction must lie in [0, 1] (got {alpha})")]
    AdmixtureFraction { alpha: f64 },

    #[error("need at least 1 admixed individual (got {n_individuals})")]
    AdmixedCount { n_individuals: usize },

    #[error(
        "{n_slots} haplotypes requested but the source panels only hold {available} individuals"
    )]
    SourceCount { n_slots: usize, available: usize },

    #[error("no free individuals left in population {population}")]
    PoolExhausted { population: Population },
}

pub type Result<T> = std::result::Result<T, CustomError>;
