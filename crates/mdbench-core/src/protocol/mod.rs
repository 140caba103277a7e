//! # Protocol Module
//!
//! The boundary between this crate and the external MD engine.
//!
//! ## Overview
//!
//! A [`PlainMdProtocol`](md::PlainMdProtocol) turns an assembled
//! [`ChemicalSystem`](crate::core::models::system::ChemicalSystem) into a
//! [`ProtocolDag`](dag::ProtocolDag) of work units. Executing the DAG stages
//! engine inputs into per-run scratch directories, invokes the engine
//! executable as a subprocess, and collects the artifacts it leaves behind.
//! Unit failures are captured in the
//! [`ProtocolDagResult`](results::ProtocolDagResult) rather than propagated,
//! so a failed simulation degrades one benchmark entry instead of aborting
//! the batch.
//!
//! ## Submodules
//!
//! - [`quantities`] - Typed physical quantities used by the settings tree.
//! - [`settings`] - The settings tree serialized into the engine's control file.
//! - [`md`] - The plain MD protocol itself.
//! - [`dag`] - DAG assembly and sequential execution with retry accounting.
//! - [`unit`] - The single MD work unit and its engine subprocess contract.
//! - [`results`] - Per-unit outcomes and gathered protocol results.
//! - [`performance`] - Extraction of ns/day from the engine's log output.

pub mod dag;
pub mod md;
pub mod performance;
pub mod quantities;
pub mod results;
pub mod settings;
pub mod unit;
