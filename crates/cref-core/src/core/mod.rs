//! # Core Module
//!
//! Stateless building blocks of fragment-based backbone prediction.
//!
//! ## Overview
//!
//! The core module holds the data model of a prediction job (sequences, fragments, search
//! hits, torsion profiles, accepted templates), the interfaces through which the engine
//! reaches external services, and file-backed implementations of those interfaces.
//!
//! ## Architecture
//!
//! - **Data Model** ([`models`]) - Sequences, fragment windows, hits, torsions and templates
//! - **External Services** ([`collaborators`]) - Search, prediction and lookup traits
//! - **File I/O** ([`io`]) - Torsion databases, reference tables, BLAST and report writers
//! - **Utilities** ([`utils`]) - Global alignment and residue code tables
//!
//! Nothing in this module keeps state between calls; memoization and job bookkeeping live
//! in [`crate::engine`].

pub mod collaborators;
pub mod io;
pub mod models;
pub mod utils;
