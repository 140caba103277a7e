//! # mdbench Core Library
//!
//! A library for benchmarking molecular dynamics (MD) simulation throughput,
//! in nanoseconds of simulated time per wall-clock day, across a set of
//! protein-ligand systems.
//!
//! ## Architectural Philosophy
//!
//! The library is a thin, carefully-typed orchestration layer over an external
//! MD engine. All numerically significant work (force-field parameterization,
//! integration, GPU dispatch) is delegated to the engine executable; this crate
//! owns the plumbing around it.
//!
//! - **[`core`]: The Foundation.** Stateless molecular data models
//!   (`ChemicalSystem` and its components) and file I/O for the input formats
//!   the benchmark consumes (PDB, SDF, atom-mapping JSON).
//!
//! - **[`protocol`]: The Engine Boundary.** Typed simulation settings, the
//!   protocol DAG, and the subprocess delegation to the external engine,
//!   including recovery of the engine's own performance log.
//!
//! - **[`workflows`]: The Public API.** Ties `core` and `protocol` together to
//!   run one benchmark entry end to end: load inputs, assemble the system,
//!   execute the protocol in a scoped working directory, and report a
//!   throughput figure or a failure sentinel.

pub mod core;
pub mod progress;
pub mod protocol;
pub mod workflows;
