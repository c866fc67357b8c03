#![forbid(unsafe_code)]

//! Reading current/target sequences from flags or a JSON file.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use clap::Args;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::{CliError, Result};

#[derive(Debug, Clone, Default, Args)]
pub struct SequenceArgs {
    /// Current values, comma- or space-separated (e.g. "1,23,53").
    #[arg(long, allow_hyphen_values = true)]
    pub current: Option<String>,

    /// Target values, same length as --current.
    #[arg(long, allow_hyphen_values = true)]
    pub target: Option<String>,

    /// JSON file holding {"current": [...], "target": [...]}.
    #[arg(long, conflicts_with_all = ["current", "target"])]
    pub input: Option<PathBuf>,

    /// Treat values as floating point instead of integers.
    #[arg(long)]
    pub float: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SequencePair<T> {
    pub current: Vec<T>,
    pub target: Vec<T>,
}

impl SequenceArgs {
    /// Resolve the flags into a pair of sequences.
    pub fn load<T>(&self) -> Result<SequencePair<T>>
    where
        T: FromStr + DeserializeOwned,
    {
        if let Some(path) = &self.input {
            return read_pair(path);
        }
        match (&self.current, &self.target) {
            (Some(current), Some(target)) => Ok(SequencePair {
                current: parse_list(current, "current")?,
                target: parse_list(target, "target")?,
            }),
            _ => Err(CliError::MissingInput),
        }
    }
}

fn read_pair<T: DeserializeOwned>(path: &Path) -> Result<SequencePair<T>> {
    let content = std::fs::read_to_string(path).map_err(|source| CliError::ReadInput {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| CliError::ParseInput {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse a comma/whitespace-separated list. Empty input is an empty list.
pub fn parse_list<T: FromStr>(raw: &str, flag: &'static str) -> Result<Vec<T>> {
    raw.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .enumerate()
        .map(|(position, token)| {
            token.parse().map_err(|_| CliError::InvalidNumber {
                flag,
                position,
                value: token.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn parses_commas_and_spaces() {
        let values: Vec<i64> = parse_list("1, 23,53  -4", "current").unwrap();
        assert_eq!(values, vec![1, 23, 53, -4]);
    }

    #[test]
    fn empty_list() {
        let values: Vec<i64> = parse_list("", "current").unwrap();
        assert!(values.is_empty());
    }

    #[test]
    fn reports_bad_token_position() {
        let err = parse_list::<i64>("1,x,3", "target").unwrap_err();
        match err {
            CliError::InvalidNumber {
                flag,
                position,
                value,
            } => {
                assert_eq!(flag, "target");
                assert_eq!(position, 1);
                assert_eq!(value, "x");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_target_is_missing_input() {
        let args = SequenceArgs {
            current: Some("1,2".into()),
            ..SequenceArgs::default()
        };
        assert!(matches!(args.load::<i64>(), Err(CliError::MissingInput)));
    }

    #[test]
    fn reads_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"current": [0.5, 1.0], "target": [1.5, 0.0]}}"#).unwrap();
        let args = SequenceArgs {
            input: Some(file.path().to_path_buf()),
            float: true,
            ..SequenceArgs::default()
        };
        let pair = args.load::<f64>().unwrap();
        assert_eq!(pair.current, vec![0.5, 1.0]);
        assert_eq!(pair.target, vec![1.5, 0.0]);
    }

    #[test]
    fn malformed_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[1, 2]").unwrap();
        let args = SequenceArgs {
            input: Some(file.path().to_path_buf()),
            ..SequenceArgs::default()
        };
        let err = args.load::<i64>().unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(matches!(err, CliError::ParseInput { .. }));
    }
}
