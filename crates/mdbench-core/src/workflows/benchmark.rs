use crate::core::io::mapping::{LigandAtomMapping, MappingError};
use crate::core::io::pdb::{PdbError, PdbFile};
use crate::core::io::sdf::{SdfError, SdfFile};
use crate::core::models::components::{Component, SmallMoleculeComponent, SolventComponent};
use crate::core::models::system::ChemicalSystem;
use crate::progress::{Progress, ProgressReporter};
use crate::protocol::dag::{self, DagError, ExecutionOptions};
use crate::protocol::md::PlainMdProtocol;
use crate::protocol::performance::PerformanceError;
use crate::protocol::settings::MdProtocolSettings;
use std::io;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{info, instrument, warn};

/// Single-letter keys handed out to cofactors, in SDF record order.
const COFACTOR_KEYS: &str = "abcdefghijklmnopqrstuvwxyz";

#[derive(Debug, Error)]
pub enum BenchmarkError {
    #[error("Failed to read protein structure: {0}")]
    Protein(#[from] PdbError),

    #[error("Failed to read cofactors: {0}")]
    Cofactors(#[from] SdfError),

    #[error("Failed to read ligand mapping: {0}")]
    Mapping(#[from] MappingError),

    #[error("Too many cofactors: {count} (at most {max} are supported)")]
    TooManyCofactors { count: usize, max: usize },

    #[error("Failed to create working directory: {0}")]
    Workdir(#[source] io::Error),

    #[error(transparent)]
    Execution(#[from] DagError),

    #[error("Failed to extract performance figure: {0}")]
    Performance(#[from] PerformanceError),
}

/// Input files for one benchmark entry, already resolved to absolute or
/// manifest-relative paths.
#[derive(Debug, Clone)]
pub struct BenchmarkInputs {
    /// Protein PDB file.
    pub protein: PathBuf,
    /// Ligand atom-mapping JSON; component A enters the simulation.
    pub edge: Option<PathBuf>,
    /// SDF of cofactor molecules, keyed `a`, `b`, ... in record order.
    pub cofactors: Option<PathBuf>,
}

/// Throughput outcome of one benchmark entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Performance {
    /// Final production throughput, truncated to whole ns/day.
    NsPerDay(u64),
    /// The simulation failed; reported as the `"NaN"` sentinel.
    Failed,
}

/// Assembles the chemical system for one entry: solvent, protein, optional
/// cofactors, optional ligand.
///
/// # Errors
///
/// Returns an error if any input file cannot be read or parsed, or if the
/// cofactor SDF holds more molecules than there are single-letter keys.
pub fn assemble_system(inputs: &BenchmarkInputs) -> Result<ChemicalSystem, BenchmarkError> {
    let mut system = ChemicalSystem::new();
    system.insert("solvent", Component::Solvent(SolventComponent::default()));

    let protein = PdbFile::read_from_path(&inputs.protein)?;
    info!(
        name = %protein.name,
        chains = protein.chain_count(),
        atoms = protein.atom_count(),
        "Loaded protein"
    );
    system.insert("protein", Component::Protein(protein));

    if let Some(cofactors_path) = &inputs.cofactors {
        let cofactors = SdfFile::read_all_from_path(cofactors_path)?;
        if cofactors.len() > COFACTOR_KEYS.len() {
            return Err(BenchmarkError::TooManyCofactors {
                count: cofactors.len(),
                max: COFACTOR_KEYS.len(),
            });
        }
        info!(count = cofactors.len(), "Loaded cofactors");
        for (molecule, key) in cofactors.into_iter().zip(COFACTOR_KEYS.chars()) {
            system.insert(
                &key.to_string(),
                Component::SmallMolecule(SmallMoleculeComponent::new(molecule)),
            );
        }
    }

    if let Some(edge_path) = &inputs.edge {
        let mapping = LigandAtomMapping::from_json_path(edge_path)?;
        let ligand = mapping.into_component_a();
        info!(
            name = ligand.name(),
            atoms = ligand.molecule.atom_count(),
            "Loaded ligand from mapping component A"
        );
        system.insert("ligand", Component::SmallMolecule(ligand));
    }

    Ok(system)
}

/// Runs one benchmark entry end to end.
///
/// The protocol executes inside a scoped temporary directory that is removed
/// when the run finishes, succeed or fail. Retries are disabled: a benchmark
/// wants the first number, not the best of several. Simulation failure
/// degrades to [`Performance::Failed`] so the batch can continue; input
/// loading and infrastructure failures propagate as errors.
#[instrument(skip_all, name = "benchmark_entry")]
pub fn run_entry(
    inputs: &BenchmarkInputs,
    settings: &MdProtocolSettings,
    reporter: &ProgressReporter,
) -> Result<Performance, BenchmarkError> {
    reporter.report(Progress::PhaseStart {
        name: "Loading inputs",
    });
    let system = assemble_system(inputs)?;
    reporter.report(Progress::PhaseFinish);

    let protocol = PlainMdProtocol::new(settings.clone());
    let dag = protocol.create(&system);

    let workdir = tempfile::tempdir().map_err(BenchmarkError::Workdir)?;
    let options = ExecutionOptions {
        shared_basedir: workdir.path().to_path_buf(),
        scratch_basedir: workdir.path().to_path_buf(),
        keep_shared: true,
        n_retries: 0,
    };

    reporter.report(Progress::PhaseStart {
        name: "Running simulation",
    });
    let dag_result = dag::execute_dag(&dag, &options, reporter)?;
    reporter.report(Progress::PhaseFinish);

    if !dag_result.ok() {
        if let Some(failure) = dag_result.first_failure() {
            warn!(%failure, "Simulation failed; reporting sentinel");
        }
        return Ok(Performance::Failed);
    }

    let gathered = protocol.gather([&dag_result]);
    let speed = gathered.ns_per_day()?;
    if !speed.is_finite() || speed < 0.0 {
        warn!(speed, "Engine reported a nonsensical throughput");
        return Ok(Performance::Failed);
    }

    info!(speed, "Benchmark entry complete");
    Ok(Performance::NsPerDay(speed as u64))
}
