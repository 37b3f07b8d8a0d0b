//! # Engine Module
//!
//! The stateful layer of a prediction job: it turns the raw search hits of each fragment
//! into templates and reduces those templates to one representative angle pair.
//!
//! ## Overview
//!
//! Everything that must persist across fragments lives in [`state::JobState`], created
//! fresh for every job and passed by `&mut`. Collaborators are reached through the
//! borrowed handles in [`context::PredictionContext`], so tests inject deterministic fakes.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Validated job settings and their documented defaults
//! - **Job State** ([`state`], [`cache`]) - Torsion cache, failed-structure set, identity memo
//! - **Template Selection** ([`candidates`]) - Ranking, filtering and extraction of hits
//! - **Clustering** ([`clustering`]) - k-means over (phi, psi) and representative choice
//! - **Progress Monitoring** ([`progress`]) - Progress events for front ends
//! - **Error Handling** ([`error`]) - Errors that abort a job
//!
//! Per-hit and per-structure failures never surface as errors: they become
//! [`candidates::HitOutcome::Skipped`] and the job carries on.

pub mod cache;
pub mod candidates;
pub mod clustering;
pub mod config;
pub mod context;
pub mod error;
pub mod progress;
pub mod state;
#[cfg(test)]
pub(crate) mod testing;
