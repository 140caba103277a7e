//! # Core Models Module
//!
//! Data structures representing the molecular content of one benchmark entry.
//!
//! ## Key Components
//!
//! - [`element`] - Chemical element identities with a static symbol table.
//! - [`atom`] - Individual atom representation plus bonds and bond orders.
//! - [`molecule`] - Small-molecule container used for ligands and cofactors.
//! - [`protein`] - Chain/residue/atom hierarchy parsed from a PDB file.
//! - [`components`] - The named components (protein, solvent, small molecules)
//!   that can enter a simulation.
//! - [`system`] - The assembled [`ChemicalSystem`](system::ChemicalSystem),
//!   a deterministic mapping from component keys to components.
//!
//! ## Usage
//!
//! A system is assembled fresh for every benchmark entry and owned only for
//! the duration of one run:
//!
//! ```ignore
//! use mdbench::core::models::{components::Component, system::ChemicalSystem};
//!
//! let mut system = ChemicalSystem::new();
//! system.insert("protein", Component::Protein(protein));
//! system.insert("solvent", Component::Solvent(Default::default()));
//! ```

pub mod atom;
pub mod components;
pub mod element;
pub mod molecule;
pub mod protein;
pub mod system;
