use std::fmt;

/// Coarse stages of a prediction job, in the order they are entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStage {
    PredictingSecondaryStructure,
    SearchingTemplates,
    Benchmarking,
}

impl fmt::Display for JobStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            JobStage::PredictingSecondaryStructure => "Predicting secondary structure",
            JobStage::SearchingTemplates => "Searching fragment templates",
            JobStage::Benchmarking => "Comparing with experimental structure",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Progress {
    StageStart(JobStage),
    StageFinish,

    FragmentsStart { total: u64 },
    FragmentDone { offset: usize, templates: usize },
    FragmentsFinish,

    Message(String),
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }
}
