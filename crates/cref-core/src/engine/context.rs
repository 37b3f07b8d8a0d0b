use super::config::PredictionConfig;
use super::progress::ProgressReporter;
use crate::core::collaborators::{
    HomologySearch, ReferenceChains, SecondaryStructurePredictor, TorsionLookup,
};

/// The external services a prediction job talks to.
#[derive(Clone, Copy)]
pub struct Collaborators<'a> {
    pub search: &'a dyn HomologySearch,
    pub predictor: &'a dyn SecondaryStructurePredictor,
    pub torsions: &'a dyn TorsionLookup,
    pub references: &'a dyn ReferenceChains,
}

impl<'a> Collaborators<'a> {
    pub fn new(
        search: &'a dyn HomologySearch,
        predictor: &'a dyn SecondaryStructurePredictor,
        torsions: &'a dyn TorsionLookup,
        references: &'a dyn ReferenceChains,
    ) -> Self {
        Self {
            search,
            predictor,
            torsions,
            references,
        }
    }
}

#[derive(Clone, Copy)]
pub struct PredictionContext<'a> {
    pub target: &'a str,
    pub collaborators: Collaborators<'a>,
    pub config: &'a PredictionConfig,
    pub reporter: &'a ProgressReporter<'a>,
}

impl<'a> PredictionContext<'a> {
    pub fn new(
        target: &'a str,
        collaborators: Collaborators<'a>,
        config: &'a PredictionConfig,
        reporter: &'a ProgressReporter<'a>,
    ) -> Self {
        Self {
            target,
            collaborators,
            config,
            reporter,
        }
    }
}
