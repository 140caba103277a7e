use super::quantities::{Femtoseconds, Kelvin, Nanometers, Picoseconds};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Shape of the periodic solvent box the engine builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BoxShape {
    #[default]
    Cube,
    Dodecahedron,
    Octahedron,
}

/// Compute platform requested from the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ComputePlatform {
    /// Let the engine pick the fastest available platform.
    #[default]
    Auto,
    Cuda,
    OpenCl,
    Cpu,
}

impl ComputePlatform {
    pub fn as_str(self) -> &'static str {
        match self {
            ComputePlatform::Auto => "auto",
            ComputePlatform::Cuda => "cuda",
            ComputePlatform::OpenCl => "opencl",
            ComputePlatform::Cpu => "cpu",
        }
    }
}

impl fmt::Display for ComputePlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ComputePlatform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(ComputePlatform::Auto),
            "cuda" => Ok(ComputePlatform::Cuda),
            "opencl" => Ok(ComputePlatform::OpenCl),
            "cpu" => Ok(ComputePlatform::Cpu),
            other => Err(format!(
                "unknown compute platform '{}' (expected auto, cuda, opencl, or cpu)",
                other
            )),
        }
    }
}

/// Force fields and nonbonded treatment handed to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForcefieldSettings {
    pub protein_forcefield: String,
    pub small_molecule_forcefield: String,
    pub nonbonded_cutoff: Nanometers,
    /// Hydrogen mass repartitioning factor in amu.
    pub hydrogen_mass: f64,
}

impl Default for ForcefieldSettings {
    fn default() -> Self {
        Self {
            protein_forcefield: "amber/ff14SB".to_string(),
            small_molecule_forcefield: "openff-2.1.0".to_string(),
            nonbonded_cutoff: Nanometers(1.0),
            hydrogen_mass: 3.0,
        }
    }
}

/// Solvent box construction parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolvationSettings {
    pub box_shape: BoxShape,
    /// Minimum solute-to-box-edge distance.
    pub padding: Nanometers,
}

impl Default for SolvationSettings {
    fn default() -> Self {
        Self {
            box_shape: BoxShape::Cube,
            padding: Nanometers(1.2),
        }
    }
}

/// Lengths and thermodynamic conditions of the simulation stages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationSettings {
    pub equilibration_length_nvt: Picoseconds,
    pub equilibration_length: Picoseconds,
    pub production_length: Picoseconds,
    pub timestep: Femtoseconds,
    pub temperature: Kelvin,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            equilibration_length_nvt: Picoseconds(100.0),
            equilibration_length: Picoseconds(200.0),
            production_length: Picoseconds(5000.0),
            timestep: Femtoseconds(4.0),
            temperature: Kelvin(298.15),
        }
    }
}

/// Names and cadence of the artifacts the engine writes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSettings {
    pub checkpoint_interval: Picoseconds,
    pub log_output: String,
    pub trajectory_output: String,
    pub structure_output: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            checkpoint_interval: Picoseconds(250.0),
            log_output: "simulation.log".to_string(),
            trajectory_output: "simulation.xtc".to_string(),
            structure_output: "equilibrated.pdb".to_string(),
        }
    }
}

/// How to reach the engine executable and what hardware to ask it for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSettings {
    /// Engine executable; a bare name is resolved through `PATH`.
    pub executable: PathBuf,
    pub compute_platform: ComputePlatform,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            executable: PathBuf::from("openmm-md"),
            compute_platform: ComputePlatform::Auto,
        }
    }
}

/// The full settings tree for the plain MD protocol.
///
/// `Default` carries the engine's stock values. The benchmark profile is the
/// stock tree with a handful of fields overridden; see
/// [`benchmark_settings`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct MdProtocolSettings {
    pub forcefield: ForcefieldSettings,
    pub solvation: SolvationSettings,
    pub simulation: SimulationSettings,
    pub output: OutputSettings,
    pub engine: EngineSettings,
}

/// The fixed benchmark profile: stock settings with short equilibration, a
/// 500 ps production run, a dodecahedral box, a 0.9 nm cutoff, a 100 ps
/// checkpoint cadence, and the CUDA platform.
pub fn benchmark_settings() -> MdProtocolSettings {
    let mut settings = MdProtocolSettings::default();
    settings.simulation.equilibration_length_nvt = Picoseconds(1.0);
    settings.simulation.equilibration_length = Picoseconds(1.0);
    settings.simulation.production_length = Picoseconds(500.0);
    settings.solvation.box_shape = BoxShape::Dodecahedron;
    settings.output.checkpoint_interval = Picoseconds(100.0);
    settings.forcefield.nonbonded_cutoff = Nanometers(0.9);
    settings.engine.compute_platform = ComputePlatform::Cuda;
    settings
}
