use super::performance::{self, PerformanceError};
use crate::core::io::pdb::PdbError;
use crate::core::io::sdf::SdfError;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use thiserror::Error;

/// Why a single work unit failed. Captured in the DAG result, never
/// propagated past it.
#[derive(Debug, Error)]
pub enum UnitFailure {
    #[error("Cannot stage engine inputs: {0}")]
    Staging(String),

    #[error("I/O error while staging engine inputs: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to write staged structure: {0}")]
    Pdb(#[from] PdbError),

    #[error("Failed to write staged molecules: {0}")]
    Sdf(#[from] SdfError),

    #[error("Failed to serialize engine control file: {0}")]
    Control(#[from] toml::ser::Error),

    #[error("Failed to launch engine '{program}': {source}", program = program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Engine exited with {status}: {stderr_tail}")]
    EngineExit {
        status: ExitStatus,
        stderr_tail: String,
    },

    #[error("Engine did not produce expected artifact '{path}'", path = path.display())]
    MissingArtifact { path: PathBuf },
}

/// Artifacts left behind by a successful work unit.
#[derive(Debug, Clone)]
pub struct UnitOutput {
    /// Shared directory holding everything the unit produced.
    pub shared_dir: PathBuf,
    /// The equilibrated structure written by the engine.
    pub structure: PathBuf,
    /// The engine's own performance log.
    pub log: PathBuf,
}

/// Outcome of one work unit, including how many attempts it took.
#[derive(Debug)]
pub struct UnitResult {
    pub name: String,
    pub attempts: u32,
    pub outcome: Result<UnitOutput, UnitFailure>,
}

impl UnitResult {
    pub fn ok(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Result of executing a whole protocol DAG.
#[derive(Debug)]
pub struct ProtocolDagResult {
    pub dag_name: String,
    pub unit_results: Vec<UnitResult>,
}

impl ProtocolDagResult {
    /// Whether every unit in the DAG succeeded.
    pub fn ok(&self) -> bool {
        !self.unit_results.is_empty() && self.unit_results.iter().all(|u| u.ok())
    }

    /// The first captured failure, for reporting.
    pub fn first_failure(&self) -> Option<&UnitFailure> {
        self.unit_results
            .iter()
            .find_map(|u| u.outcome.as_ref().err())
    }
}

/// Gathered view over one or more DAG results for the same protocol.
#[derive(Debug, Clone, Default)]
pub struct ProtocolResult {
    structures: Vec<PathBuf>,
}

impl ProtocolResult {
    pub(crate) fn from_dag_results<'a>(
        results: impl IntoIterator<Item = &'a ProtocolDagResult>,
    ) -> Self {
        let structures = results
            .into_iter()
            .flat_map(|dag| &dag.unit_results)
            .filter_map(|unit| unit.outcome.as_ref().ok())
            .map(|output| output.structure.clone())
            .collect();
        Self { structures }
    }

    /// Paths to the equilibrated structures, one per successful unit.
    pub fn pdb_filenames(&self) -> &[PathBuf] {
        &self.structures
    }

    /// The final ns/day figure, read from the performance log that sits next
    /// to the first gathered structure.
    ///
    /// # Errors
    ///
    /// Returns an error if no structure was gathered or the log cannot be
    /// read; see [`PerformanceError`].
    pub fn ns_per_day(&self) -> Result<f64, PerformanceError> {
        let structure = self.structures.first().ok_or_else(|| {
            PerformanceError::EmptyLog {
                path: PathBuf::from("<no gathered results>"),
            }
        })?;
        let log = structure
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join(performance::SPEED_LOG_NAME);
        performance::extract_ns_per_day(&log)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn success(name: &str, shared_dir: &Path) -> UnitResult {
        UnitResult {
            name: name.to_string(),
            attempts: 1,
            outcome: Ok(UnitOutput {
                shared_dir: shared_dir.to_path_buf(),
                structure: shared_dir.join("equilibrated.pdb"),
                log: shared_dir.join("simulation.log"),
            }),
        }
    }

    fn failure(name: &str) -> UnitResult {
        UnitResult {
            name: name.to_string(),
            attempts: 1,
            outcome: Err(UnitFailure::Staging("no inputs".to_string())),
        }
    }

    #[test]
    fn dag_result_is_ok_only_when_all_units_succeed() {
        let dir = std::env::temp_dir();
        let all_ok = ProtocolDagResult {
            dag_name: "md".to_string(),
            unit_results: vec![success("md-unit", &dir)],
        };
        assert!(all_ok.ok());
        assert!(all_ok.first_failure().is_none());

        let mixed = ProtocolDagResult {
            dag_name: "md".to_string(),
            unit_results: vec![success("md-unit", &dir), failure("bad-unit")],
        };
        assert!(!mixed.ok());
        assert!(matches!(
            mixed.first_failure(),
            Some(UnitFailure::Staging(_))
        ));
    }

    #[test]
    fn empty_dag_result_is_not_ok() {
        let empty = ProtocolDagResult {
            dag_name: "md".to_string(),
            unit_results: Vec::new(),
        };
        assert!(!empty.ok());
    }

    #[test]
    fn gathering_keeps_only_successful_structures() {
        let dir = std::env::temp_dir();
        let dag = ProtocolDagResult {
            dag_name: "md".to_string(),
            unit_results: vec![success("md-unit", &dir), failure("bad-unit")],
        };
        let gathered = ProtocolResult::from_dag_results([&dag]);
        assert_eq!(gathered.pdb_filenames().len(), 1);
        assert_eq!(gathered.pdb_filenames()[0], dir.join("equilibrated.pdb"));
    }

    #[test]
    fn ns_per_day_reads_the_log_next_to_the_structure() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("simulation.log"),
            "Step,Speed (ns/day)\n1000,42.5\n2000,87.3\n",
        )
        .unwrap();
        let dag = ProtocolDagResult {
            dag_name: "md".to_string(),
            unit_results: vec![success("md-unit", dir.path())],
        };
        let gathered = ProtocolResult::from_dag_results([&dag]);
        let speed = gathered.ns_per_day().unwrap();
        assert!((speed - 87.3).abs() < 1e-9);
    }

    #[test]
    fn ns_per_day_fails_with_no_gathered_results() {
        let gathered = ProtocolResult::default();
        assert!(gathered.ns_per_day().is_err());
    }
}
