//! File-backed implementations of the prediction collaborators and the report writers.
//!
//! Torsions, reference chain assignments, precomputed search hits and predicted labels are
//! read from plain CSV or text files; [`blast`] drives a local `blastp` instead. The
//! [`report`] writers produce the per-residue angle table, the template table and the
//! parameter record of a job.

pub mod blast;
pub mod error;
pub mod hits;
pub mod labels;
pub mod references;
pub mod report;
pub mod torsions;
