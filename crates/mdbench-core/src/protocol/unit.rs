use super::results::{UnitFailure, UnitOutput};
use super::settings::MdProtocolSettings;
use crate::core::io::pdb::PdbFile;
use crate::core::io::sdf::SdfFile;
use crate::core::models::components::SolventComponent;
use crate::core::models::system::ChemicalSystem;
use serde::Serialize;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info};

const CONTROL_FILE_NAME: &str = "md_settings.toml";
const PROTEIN_FILE_NAME: &str = "system.pdb";
const MOLECULES_FILE_NAME: &str = "molecules.sdf";
const STDOUT_FILE_NAME: &str = "engine.stdout";
const STDERR_FILE_NAME: &str = "engine.stderr";

/// The `[system]` table of the engine control file: where the staged inputs
/// live and what solvent to build around them.
#[derive(Debug, Serialize)]
struct SystemSection<'a> {
    protein: &'a Path,
    #[serde(skip_serializing_if = "Option::is_none")]
    molecules: Option<&'a Path>,
    solvent: &'a SolventComponent,
}

#[derive(Debug, Serialize)]
struct ControlFile<'a> {
    system: SystemSection<'a>,
    #[serde(flatten)]
    settings: &'a MdProtocolSettings,
}

/// One unit of MD work: stage inputs, run the engine, collect artifacts.
///
/// The unit owns a snapshot of the chemical system and settings so the DAG
/// can outlive the builders that produced them.
#[derive(Debug, Clone)]
pub struct MdUnit {
    name: String,
    system: ChemicalSystem,
    settings: MdProtocolSettings,
}

impl MdUnit {
    pub fn new(name: &str, system: ChemicalSystem, settings: MdProtocolSettings) -> Self {
        Self {
            name: name.to_string(),
            system,
            settings,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Runs the unit once.
    ///
    /// Inputs are staged into `scratch_dir`; the engine is told to write its
    /// artifacts into `shared_dir`, where its stdout/stderr are captured
    /// too. Every failure mode is returned as a [`UnitFailure`] for the DAG
    /// executor to record.
    pub fn execute(
        &self,
        shared_dir: &Path,
        scratch_dir: &Path,
    ) -> Result<UnitOutput, UnitFailure> {
        let control_path = self.stage_inputs(shared_dir, scratch_dir)?;
        self.invoke_engine(&control_path, shared_dir, scratch_dir)?;

        let structure = shared_dir.join(&self.settings.output.structure_output);
        let log = shared_dir.join(&self.settings.output.log_output);
        for artifact in [&structure, &log] {
            if !artifact.exists() {
                return Err(UnitFailure::MissingArtifact {
                    path: artifact.clone(),
                });
            }
        }

        Ok(UnitOutput {
            shared_dir: shared_dir.to_path_buf(),
            structure,
            log,
        })
    }

    fn stage_inputs(
        &self,
        shared_dir: &Path,
        scratch_dir: &Path,
    ) -> Result<PathBuf, UnitFailure> {
        let protein = self
            .system
            .protein()
            .ok_or_else(|| UnitFailure::Staging("system has no protein component".to_string()))?;
        let solvent = self
            .system
            .solvent()
            .ok_or_else(|| UnitFailure::Staging("system has no solvent component".to_string()))?;

        let protein_path = scratch_dir.join(PROTEIN_FILE_NAME);
        PdbFile::write_to_path(protein, &protein_path)?;
        debug!(path = %protein_path.display(), atoms = protein.atom_count(), "Staged protein");

        let mut molecules_path = None;
        let small_molecules: Vec<_> = self.system.small_molecules().collect();
        if !small_molecules.is_empty() {
            let path = scratch_dir.join(MOLECULES_FILE_NAME);
            let file = File::create(&path)?;
            let mut writer = BufWriter::new(file);
            for &(key, component) in &small_molecules {
                debug!(key, name = component.name(), "Staging small molecule");
                SdfFile::write_record(&component.molecule, &mut writer)?;
            }
            molecules_path = Some(path);
        }

        let control = ControlFile {
            system: SystemSection {
                protein: &protein_path,
                molecules: molecules_path.as_deref(),
                solvent,
            },
            settings: &self.settings,
        };
        let control_path = shared_dir.join(CONTROL_FILE_NAME);
        fs::write(&control_path, toml::to_string(&control)?)?;
        Ok(control_path)
    }

    fn invoke_engine(
        &self,
        control_path: &Path,
        shared_dir: &Path,
        scratch_dir: &Path,
    ) -> Result<(), UnitFailure> {
        let program = &self.settings.engine.executable;
        info!(
            engine = %program.display(),
            platform = %self.settings.engine.compute_platform,
            unit = %self.name,
            "Invoking MD engine"
        );

        let output = Command::new(program)
            .arg("--settings")
            .arg(control_path)
            .arg("--output-dir")
            .arg(shared_dir)
            .arg("--platform")
            .arg(self.settings.engine.compute_platform.as_str())
            .current_dir(scratch_dir)
            .output()
            .map_err(|source| UnitFailure::Spawn {
                program: program.clone(),
                source,
            })?;

        fs::write(shared_dir.join(STDOUT_FILE_NAME), &output.stdout)?;
        fs::write(shared_dir.join(STDERR_FILE_NAME), &output.stderr)?;

        if !output.status.success() {
            return Err(UnitFailure::EngineExit {
                status: output.status,
                stderr_tail: stderr_tail(&output.stderr),
            });
        }
        Ok(())
    }
}

/// Last few lines of the engine's stderr, for failure reports.
fn stderr_tail(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    let tail_start = lines.len().saturating_sub(3);
    lines[tail_start..].join(" | ")
}
