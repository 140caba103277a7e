//! # File I/O Module
//!
//! Readers and writers for the input formats the benchmark consumes:
//!
//! - [`pdb`] - Protein structures (ATOM/HETATM records, first model only).
//! - [`sdf`] - Small molecules as V2000 molfiles, singly or in SDF batches.
//! - [`mapping`] - Pairwise ligand atom mappings serialized as JSON with
//!   embedded molblocks.
//!
//! Each format has its own error enum carrying line numbers and field context
//! for parse failures.

pub mod mapping;
pub mod pdb;
pub mod sdf;
