use crate::error::{CliError, Result};
use mdbench::workflows::benchmark::Performance;
use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Value reported for entries whose simulation failed.
pub const FAILURE_SENTINEL: &str = "NaN";

/// One entry of the benchmark input manifest. Paths are relative to the
/// manifest file's directory.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct EntrySpec {
    /// Protein PDB file.
    pub protein: PathBuf,
    /// Ligand atom-mapping JSON ("edge" of a free-energy network).
    pub edge: PathBuf,
    /// Optional SDF of cofactor molecules.
    #[serde(default)]
    pub cofactors: Option<PathBuf>,
}

/// The benchmark input manifest: system name to input file references.
pub type BenchmarkManifest = BTreeMap<String, EntrySpec>;

/// Loads and parses the input manifest.
pub fn load_manifest(path: &Path) -> Result<BenchmarkManifest> {
    let text = fs::read_to_string(path)?;
    serde_json::from_str(&text).map_err(|source| CliError::Manifest {
        path: path.to_path_buf(),
        source,
    })
}

/// One output manifest value: a whole ns/day figure or the failure sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputValue {
    NsPerDay(u64),
    Failed,
}

impl From<Performance> for OutputValue {
    fn from(performance: Performance) -> Self {
        match performance {
            Performance::NsPerDay(v) => OutputValue::NsPerDay(v),
            Performance::Failed => OutputValue::Failed,
        }
    }
}

impl Serialize for OutputValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            OutputValue::NsPerDay(v) => serializer.serialize_u64(*v),
            OutputValue::Failed => serializer.serialize_str(FAILURE_SENTINEL),
        }
    }
}

impl<'de> Deserialize<'de> for OutputValue {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(u64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Int(v) => Ok(OutputValue::NsPerDay(v)),
            Raw::Text(s) if s == FAILURE_SENTINEL => Ok(OutputValue::Failed),
            Raw::Text(s) => Err(de::Error::custom(format!(
                "expected a non-negative integer or \"{}\", got \"{}\"",
                FAILURE_SENTINEL, s
            ))),
        }
    }
}

/// The benchmark output manifest: system name to performance value.
pub type BenchmarkResults = BTreeMap<String, OutputValue>;

/// Writes the output manifest as indented JSON.
pub fn write_results(path: &Path, results: &BenchmarkResults) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
    results
        .serialize(&mut serializer)
        .map_err(|source| CliError::Manifest {
            path: path.to_path_buf(),
            source,
        })?;
    writeln!(writer)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const MANIFEST_JSON: &str = r#"{
        "tyk2": { "protein": "tyk2/protein.pdb", "edge": "tyk2/edge.json" },
        "p38": {
            "protein": "p38/protein.pdb",
            "edge": "p38/edge.json",
            "cofactors": "p38/cofactors.sdf"
        }
    }"#;

    #[test]
    fn parses_entries_with_and_without_cofactors() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bench.json");
        fs::write(&path, MANIFEST_JSON).unwrap();

        let manifest = load_manifest(&path).unwrap();
        assert_eq!(manifest.len(), 2);
        assert_eq!(manifest["tyk2"].protein, PathBuf::from("tyk2/protein.pdb"));
        assert!(manifest["tyk2"].cofactors.is_none());
        assert_eq!(
            manifest["p38"].cofactors,
            Some(PathBuf::from("p38/cofactors.sdf"))
        );
    }

    #[test]
    fn missing_edge_field_is_a_manifest_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bench.json");
        fs::write(&path, r#"{ "sys": { "protein": "p.pdb" } }"#).unwrap();
        let result = load_manifest(&path);
        assert!(matches!(result, Err(CliError::Manifest { .. })));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bench.json");
        fs::write(
            &path,
            r#"{ "sys": { "protein": "p.pdb", "edge": "e.json", "ligand": "l.sdf" } }"#,
        )
        .unwrap();
        let result = load_manifest(&path);
        assert!(matches!(result, Err(CliError::Manifest { .. })));
    }

    #[test]
    fn missing_manifest_file_is_an_io_error() {
        let result = load_manifest(Path::new("/no/such/manifest.json"));
        assert!(matches!(result, Err(CliError::Io(_))));
    }

    #[test]
    fn output_values_serialize_as_integers_or_the_sentinel() {
        let mut results = BenchmarkResults::new();
        results.insert("tyk2".to_string(), OutputValue::NsPerDay(117));
        results.insert("p38".to_string(), OutputValue::Failed);

        let json = serde_json::to_string(&results).unwrap();
        assert_eq!(json, r#"{"p38":"NaN","tyk2":117}"#);
    }

    #[test]
    fn output_manifest_round_trips() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("md_benchmark.out");

        let mut results = BenchmarkResults::new();
        results.insert("tyk2".to_string(), OutputValue::NsPerDay(117));
        results.insert("p38".to_string(), OutputValue::Failed);
        write_results(&path, &results).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("    \"p38\": \"NaN\""));
        let reread: BenchmarkResults = serde_json::from_str(&text).unwrap();
        assert_eq!(reread, results);
    }

    #[test]
    fn unexpected_sentinel_strings_fail_to_deserialize() {
        let result: std::result::Result<OutputValue, _> = serde_json::from_str("\"broken\"");
        assert!(result.is_err());
        let ok: OutputValue = serde_json::from_str("\"NaN\"").unwrap();
        assert_eq!(ok, OutputValue::Failed);
    }

    #[test]
    fn performance_converts_into_output_values() {
        assert_eq!(
            OutputValue::from(Performance::NsPerDay(42)),
            OutputValue::NsPerDay(42)
        );
        assert_eq!(OutputValue::from(Performance::Failed), OutputValue::Failed);
    }
}
