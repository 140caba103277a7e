use super::sdf::{SdfError, SdfFile};
use crate::core::models::components::SmallMoleculeComponent;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MappingError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Failed to parse molblock for {which}: {source}")]
    Molblock {
        which: &'static str,
        #[source]
        source: SdfError,
    },
    #[error(
        "Mapping index {index} for {which} is out of range (atom count: {atom_count})"
    )]
    IndexOutOfRange {
        which: &'static str,
        index: usize,
        atom_count: usize,
    },
}

#[derive(Debug, Deserialize)]
struct MoleculeRecord {
    name: String,
    molblock: String,
}

#[derive(Debug, Deserialize)]
struct MappingFile {
    #[serde(rename = "componentA")]
    component_a: MoleculeRecord,
    #[serde(rename = "componentB")]
    component_b: MoleculeRecord,
    #[serde(rename = "componentA_to_componentB")]
    atom_map: BTreeMap<usize, usize>,
    #[serde(default)]
    #[allow(dead_code)]
    annotations: BTreeMap<String, serde_json::Value>,
}

/// A pairwise atom mapping between two ligands, as produced by free-energy
/// network planners.
///
/// Each component is carried as an embedded V2000 molblock plus a display
/// name; the mapping relates zero-based atom indices of component A to those
/// of component B. The benchmark only simulates component A, but the whole
/// file is validated on load so a broken edge fails loudly rather than after
/// a simulation has been paid for.
#[derive(Debug, Clone)]
pub struct LigandAtomMapping {
    pub component_a: SmallMoleculeComponent,
    pub component_b: SmallMoleculeComponent,
    pub atom_map: BTreeMap<usize, usize>,
}

impl LigandAtomMapping {
    /// Parses a mapping from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed, either molblock does not
    /// parse, or any mapping index falls outside its molecule's atom list.
    pub fn from_json(text: &str) -> Result<Self, MappingError> {
        let file: MappingFile = serde_json::from_str(text)?;

        let component_a = parse_record(&file.component_a, "componentA")?;
        let component_b = parse_record(&file.component_b, "componentB")?;

        for (&a, &b) in &file.atom_map {
            let count_a = component_a.molecule.atom_count();
            if a >= count_a {
                return Err(MappingError::IndexOutOfRange {
                    which: "componentA",
                    index: a,
                    atom_count: count_a,
                });
            }
            let count_b = component_b.molecule.atom_count();
            if b >= count_b {
                return Err(MappingError::IndexOutOfRange {
                    which: "componentB",
                    index: b,
                    atom_count: count_b,
                });
            }
        }

        Ok(Self {
            component_a,
            component_b,
            atom_map: file.atom_map,
        })
    }

    /// Loads and validates a mapping from a JSON file on disk.
    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<Self, MappingError> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Consumes the mapping, yielding component A as the ligand to simulate.
    pub fn into_component_a(self) -> SmallMoleculeComponent {
        self.component_a
    }
}

fn parse_record(
    record: &MoleculeRecord,
    which: &'static str,
) -> Result<SmallMoleculeComponent, MappingError> {
    let mut molecule =
        SdfFile::read_molblock(&record.molblock).map_err(|source| MappingError::Molblock {
            which,
            source,
        })?;
    if !record.name.is_empty() {
        molecule.name = record.name.clone();
    }
    Ok(SmallMoleculeComponent::new(molecule))
}
