//! # Core Module
//!
//! Fundamental building blocks for describing the chemical systems the
//! benchmark simulates.
//!
//! ## Overview
//!
//! The core module provides the stateless data structures and file parsers
//! needed to turn a set of input files (a protein PDB, an optional cofactor
//! SDF, an optional ligand atom-mapping JSON) into an assembled
//! [`ChemicalSystem`](models::system::ChemicalSystem) ready to hand to a
//! simulation protocol.
//!
//! ## Architecture
//!
//! - **Molecular Representation** ([`models`]) - Atoms, molecules, proteins,
//!   solvent descriptions, and the named-component chemical system.
//! - **File I/O** ([`io`]) - Readers and writers for the PDB, SDF/molblock,
//!   and ligand atom-mapping formats.

pub mod io;
pub mod models;
