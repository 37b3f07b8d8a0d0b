//! # Workflows Module
//!
//! High-level entry points that run a complete prediction job.
//!
//! ## Overview
//!
//! A workflow validates its inputs, asks the collaborators for a labeling and for the
//! homologs of every fragment, and assembles the per-residue result. Everything a front end
//! needs to report on the job (templates, cluster results, benchmark deviations) is
//! returned alongside the angles.
//!
//! ## Architecture
//!
//! - **Prediction Workflow** ([`predict`]) - Fragment-by-fragment backbone torsion prediction
//! - **Benchmarking** ([`compare`]) - Angular deviations against an experimental structure

pub mod compare;
pub mod predict;
