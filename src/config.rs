use serde::Deserialize;
use std::path::Path;

use crate::error::{CustomError, Result};

/// Run parameters read from a JSON file. Every key is optional; command-line
/// flags take precedence.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParamFile {
    pub pop_a: Option<String>,
    pub pop_b: Option<String>,
    pub output_prefix: Option<String>,
    pub generations: Option<Generations>,
    pub alpha: Option<f64>,
    pub n_individuals: Option<usize>,
    pub haploid: Option<bool>,
    pub track_ancestry: Option<bool>,
    pub population_name: Option<String>,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum Generations {
    One(u32),
    Many(Vec<u32>),
}

impl Generations {
    pub fn into_vec(self) -> Vec<u32> {
        match self {
            Generations::One(g) => vec![g],
            Generations::Many(gs) => gs,
        }
    }
}

impl ParamFile {
    pub fn load(path: &impl AsRef<Path>) -> Result<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| CustomError::ReadWithPath {
                source: e,
                path: path.as_ref().to_path_buf(),
            })?;
        Self::parse(&content, path)
    }

    fn parse(content: &str, path: &impl AsRef<Path>) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| CustomError::ConfigParse {
            source: e,
            path: path.as_ref().to_path_buf(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_parameter_file() {
        let params = ParamFile::parse(
            r#"{
                "pop_a": "data/CEU",
                "pop_b": "data/YRI",
                "generations": [0, 5, 10],
                "alpha": 0.6,
                "n_individuals": 10,
                "haploid": true,
                "track_ancestry": true,
                "population_name": "CEUYRI",
                "seed": 7
            }"#,
            &"params.json",
        )
        .unwrap();
        assert_eq!(params.pop_a.as_deref(), Some("data/CEU"));
        assert_eq!(params.generations.unwrap().into_vec(), vec![0, 5, 10]);
        assert_eq!(params.alpha, Some(0.6));
        assert_eq!(params.haploid, Some(true));
        assert!(params.output_prefix.is_none());
    }

    #[test]
    fn accepts_single_generation_count() {
        let params = ParamFile::parse(r#"{"generations": 20}"#, &"params.json").unwrap();
        assert_eq!(params.generations, Some(Generations::One(20)));
    }

    #[test]
    fn rejects_negative_generations() {
        let err = ParamFile::parse(r#"{"generations": -3}"#, &"params.json").unwrap_err();
        assert!(matches!(err, CustomError::ConfigParse { .. }));
    }

    #[test]
    fn rejects_unknown_keys() {
        let err = ParamFile::parse(r#"{"alpah": 0.5}"#, &"params.json").unwrap_err();
        assert!(matches!(err, CustomError::ConfigParse { .. }));
    }
}
