//! # Workflows Module
//!
//! The highest-level, user-facing layer: complete procedures that tie the
//! data models and the protocol boundary together. Currently one workflow
//! exists, [`benchmark`], which runs a single manifest entry end to end and
//! reports its throughput or a failure sentinel.

pub mod benchmark;
