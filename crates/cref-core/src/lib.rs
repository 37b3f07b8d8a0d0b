//! # CReF++ Core Library
//!
//! A library for predicting protein backbone torsion angles from sequence alone, following
//! the CReF (Central residue Fragment-based) method: every residue's (phi, psi) pair is
//! inferred from the experimental conformations of structurally characterized homologs of
//! the short fragment centred on it.
//!
//! ## Architectural Philosophy
//!
//! The library is split into three layers, each testable in isolation.
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Sequence`, `Fragment`,
//!   `HomologyHit`, `CandidateStructure`), the collaborator traits that abstract homology
//!   search, secondary-structure prediction and torsion lookup, and their file-backed
//!   implementations.
//!
//! - **[`engine`]: The Logic Core.** Job-scoped state (`JobState` with its torsion cache and
//!   identity memo), validated configuration, the candidate filter that turns raw hits into
//!   templates, and the cluster selector that reduces templates to one representative pair.
//!
//! - **[`workflows`]: The Public API.** Drives a complete prediction: labels the sequence,
//!   walks its fragments in order, and assembles one (phi, psi) pair per residue together
//!   with the per-fragment templates and cluster results.

pub mod core;
pub mod engine;
pub mod workflows;
