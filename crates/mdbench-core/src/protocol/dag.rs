use super::results::{ProtocolDagResult, UnitResult};
use super::unit::MdUnit;
use crate::progress::{Progress, ProgressReporter};
use std::fs;
use std::io;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{info, warn};

/// Infrastructure failures of the executor itself. Unit failures are not
/// errors here; they are captured in the [`ProtocolDagResult`].
#[derive(Debug, Error)]
pub enum DagError {
    #[error("Failed to prepare working directory '{path}': {source}", path = path.display())]
    Workdir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// An ordered set of work units produced by a protocol.
///
/// The plain MD protocol emits a single unit, but execution does not assume
/// that.
#[derive(Debug, Clone)]
pub struct ProtocolDag {
    pub name: String,
    pub units: Vec<MdUnit>,
}

/// Where and how to execute a DAG.
#[derive(Debug, Clone)]
pub struct ExecutionOptions {
    /// Base directory for per-unit shared directories (artifacts live here).
    pub shared_basedir: PathBuf,
    /// Base directory for per-unit scratch directories (staged inputs).
    pub scratch_basedir: PathBuf,
    /// Keep shared directories after execution; scratch is always
    /// best-effort removed.
    pub keep_shared: bool,
    /// Number of times to re-run a failed unit. The benchmark disables
    /// retries.
    pub n_retries: u32,
}

/// Executes every unit of the DAG sequentially.
///
/// Each attempt of each unit gets a fresh scratch directory; the shared
/// directory is per unit and survives across attempts. A failing unit is
/// retried up to `n_retries` times and its last failure is captured in the
/// result.
///
/// # Errors
///
/// Only directory preparation failures abort execution; simulation failures
/// are recorded in the returned [`ProtocolDagResult`].
pub fn execute_dag(
    dag: &ProtocolDag,
    options: &ExecutionOptions,
    reporter: &ProgressReporter,
) -> Result<ProtocolDagResult, DagError> {
    let mut unit_results = Vec::with_capacity(dag.units.len());

    for unit in &dag.units {
        let shared_dir = options.shared_basedir.join(unit.name());
        fs::create_dir_all(&shared_dir).map_err(|source| DagError::Workdir {
            path: shared_dir.clone(),
            source,
        })?;

        let max_attempts = options.n_retries + 1;
        let mut attempts = 0;
        let mut outcome = None;

        while attempts < max_attempts {
            attempts += 1;
            let scratch_dir = options
                .scratch_basedir
                .join(format!("{}-attempt-{}", unit.name(), attempts));
            fs::create_dir_all(&scratch_dir).map_err(|source| DagError::Workdir {
                path: scratch_dir.clone(),
                source,
            })?;

            reporter.report(Progress::Message(format!(
                "Running unit '{}' (attempt {}/{})",
                unit.name(),
                attempts,
                max_attempts
            )));
            let attempt_outcome = unit.execute(&shared_dir, &scratch_dir);

            if fs::remove_dir_all(&scratch_dir).is_err() {
                warn!(path = %scratch_dir.display(), "Could not remove scratch directory");
            }

            match attempt_outcome {
                Ok(output) => {
                    info!(unit = unit.name(), attempts, "Unit succeeded");
                    outcome = Some(Ok(output));
                    break;
                }
                Err(failure) => {
                    warn!(unit = unit.name(), attempts, %failure, "Unit attempt failed");
                    outcome = Some(Err(failure));
                }
            }
        }

        let outcome = outcome.unwrap_or_else(|| {
            Err(super::results::UnitFailure::Staging(
                "unit was never attempted".to_string(),
            ))
        });
        let succeeded = outcome.is_ok();
        unit_results.push(UnitResult {
            name: unit.name().to_string(),
            attempts,
            outcome,
        });

        if !succeeded && !options.keep_shared {
            if fs::remove_dir_all(&shared_dir).is_err() {
                warn!(path = %shared_dir.display(), "Could not remove shared directory");
            }
        }
    }

    Ok(ProtocolDagResult {
        dag_name: dag.name.clone(),
        unit_results,
    })
}

#[cfg(test)]
#[cfg(unix)]
mod tests {
    use super::*;
    use crate::core::models::atom::Atom;
    use crate::core::models::components::{Component, SolventComponent};
    use crate::core::models::element::Element;
    use crate::core::models::protein::ProteinBuilder;
    use crate::core::models::system::ChemicalSystem;
    use crate::protocol::settings::benchmark_settings;
    use nalgebra::Point3;
    use std::os::unix::fs::PermissionsExt;
    use std::path::Path;
    use tempfile::tempdir;

    fn minimal_system() -> ChemicalSystem {
        let mut builder = ProteinBuilder::new("tiny");
        builder.start_chain('A');
        builder.start_residue(1, "ALA", None);
        builder.add_atom(Atom::named(
            1,
            "CA",
            Element::from_symbol("C").unwrap(),
            Point3::origin(),
        ));
        let mut system = ChemicalSystem::new();
        system.insert("protein", Component::Protein(builder.build()));
        system.insert("solvent", Component::Solvent(SolventComponent::default()));
        system
    }

    fn write_stub_engine(dir: &Path, script_body: &str) -> std::path::PathBuf {
        let path = dir.join("stub-engine");
        std::fs::write(&path, format!("#!/bin/sh\n{}", script_body)).unwrap();
        let mut permissions = std::fs::metadata(&path).unwrap().permissions();
        permissions.set_mode(0o755);
        std::fs::set_permissions(&path, permissions).unwrap();
        path
    }

    /// Stub engine that honors the subprocess contract: parses --output-dir
    /// and writes the expected artifacts there.
    fn succeeding_engine(dir: &Path) -> std::path::PathBuf {
        write_stub_engine(
            dir,
            r#"
out=""
while [ $# -gt 0 ]; do
    case "$1" in
        --output-dir) out="$2"; shift 2 ;;
        *) shift ;;
    esac
done
printf 'REMARK equilibrated\nATOM      1  CA  ALA A   1       0.000   0.000   0.000  1.00  0.00           C\nEND\n' > "$out/equilibrated.pdb"
printf 'Step,Time (ps),Speed (ns/day)\n1000,4.0,88.0\n2000,8.0,123.4\n' > "$out/simulation.log"
"#,
        )
    }

    fn dag_with_engine(engine: &Path) -> ProtocolDag {
        let mut settings = benchmark_settings();
        settings.engine.executable = engine.to_path_buf();
        ProtocolDag {
            name: "plain-md".to_string(),
            units: vec![crate::protocol::unit::MdUnit::new(
                "md-unit",
                minimal_system(),
                settings,
            )],
        }
    }

    fn options(base: &Path) -> ExecutionOptions {
        ExecutionOptions {
            shared_basedir: base.join("shared"),
            scratch_basedir: base.join("scratch"),
            keep_shared: true,
            n_retries: 0,
        }
    }

    #[test]
    fn successful_unit_produces_an_ok_dag_result() {
        let dir = tempdir().unwrap();
        let engine = succeeding_engine(dir.path());
        let dag = dag_with_engine(&engine);

        let result = execute_dag(&dag, &options(dir.path()), &ProgressReporter::new()).unwrap();
        assert!(result.ok());
        assert_eq!(result.unit_results[0].attempts, 1);

        let output = result.unit_results[0].outcome.as_ref().unwrap();
        assert!(output.structure.exists());
        assert!(output.log.exists());
    }

    #[test]
    fn scratch_directories_are_cleaned_up() {
        let dir = tempdir().unwrap();
        let engine = succeeding_engine(dir.path());
        let dag = dag_with_engine(&engine);
        let opts = options(dir.path());

        execute_dag(&dag, &opts, &ProgressReporter::new()).unwrap();
        let leftovers: Vec<_> = std::fs::read_dir(&opts.scratch_basedir)
            .unwrap()
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn failing_unit_is_captured_not_propagated() {
        let dir = tempdir().unwrap();
        let engine = write_stub_engine(dir.path(), "echo 'platform not available' >&2\nexit 3\n");
        let dag = dag_with_engine(&engine);

        let result = execute_dag(&dag, &options(dir.path()), &ProgressReporter::new()).unwrap();
        assert!(!result.ok());
        let failure = result.first_failure().unwrap();
        assert!(failure.to_string().contains("platform not available"));
    }

    #[test]
    fn unit_missing_artifacts_fails() {
        let dir = tempdir().unwrap();
        // Exits cleanly but writes nothing.
        let engine = write_stub_engine(dir.path(), "exit 0\n");
        let dag = dag_with_engine(&engine);

        let result = execute_dag(&dag, &options(dir.path()), &ProgressReporter::new()).unwrap();
        assert!(!result.ok());
        assert!(matches!(
            result.first_failure(),
            Some(crate::protocol::results::UnitFailure::MissingArtifact { .. })
        ));
    }

    #[test]
    fn retries_rerun_failed_units() {
        let dir = tempdir().unwrap();
        // Fails until a marker file exists, creating it on the first run.
        let marker = dir.path().join("ran-once");
        let engine = write_stub_engine(
            dir.path(),
            &format!(
                r#"
out=""
while [ $# -gt 0 ]; do
    case "$1" in
        --output-dir) out="$2"; shift 2 ;;
        *) shift ;;
    esac
done
if [ ! -f "{marker}" ]; then
    touch "{marker}"
    exit 1
fi
printf 'END\n' > "$out/equilibrated.pdb"
printf 'Speed (ns/day)\n50.0\n' > "$out/simulation.log"
"#,
                marker = marker.display()
            ),
        );
        let dag = dag_with_engine(&engine);
        let mut opts = options(dir.path());
        opts.n_retries = 2;

        let result = execute_dag(&dag, &opts, &ProgressReporter::new()).unwrap();
        assert!(result.ok());
        assert_eq!(result.unit_results[0].attempts, 2);
    }

    #[test]
    fn retries_disabled_means_a_single_attempt() {
        let dir = tempdir().unwrap();
        let engine = write_stub_engine(dir.path(), "exit 1\n");
        let dag = dag_with_engine(&engine);

        let result = execute_dag(&dag, &options(dir.path()), &ProgressReporter::new()).unwrap();
        assert!(!result.ok());
        assert_eq!(result.unit_results[0].attempts, 1);
    }
}
