#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProgressStatus {
    Pending,
    InProgress,
    Completed,
    Error,
}

impl ProgressStatus {
    // Completed and Error are both terminal.
    fn rank(self) -> u8 {
        match self {
            ProgressStatus::Pending => 0,
            ProgressStatus::InProgress => 1,
            ProgressStatus::Completed | ProgressStatus::Error => 2,
        }
    }
}

/// The five reported stages of a submission, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Stage {
    SubmittingBasicInfo,
    BasicInfoSaved,
    SubmittingDetails,
    DetailsSaved,
    AllDone,
}

impl Stage {
    pub const ALL: [Stage; 5] = [
        Stage::SubmittingBasicInfo,
        Stage::BasicInfoSaved,
        Stage::SubmittingDetails,
        Stage::DetailsSaved,
        Stage::AllDone,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            Stage::SubmittingBasicInfo => "Submitting basicInfo…",
            Stage::BasicInfoSaved => "basicInfo saved!",
            Stage::SubmittingDetails => "Submitting details…",
            Stage::DetailsSaved => "details saved!",
            Stage::AllDone => "All data processed successfully!",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressStep {
    pub label: &'static str,
    pub status: ProgressStatus,
}

/// Per-attempt progress of the submission.
///
/// Transitions only move forward (pending, in progress, then completed or
/// error). Once any stage has failed, no later stage changes until the next
/// [`ProgressPipeline::begin_attempt`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressPipeline {
    steps: [ProgressStep; 5],
}

impl Default for ProgressPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressPipeline {
    pub fn new() -> Self {
        Self {
            steps: Stage::ALL.map(|stage| ProgressStep {
                label: stage.label(),
                status: ProgressStatus::Pending,
            }),
        }
    }

    pub fn steps(&self) -> &[ProgressStep] {
        &self.steps
    }

    pub fn status(&self, stage: Stage) -> ProgressStatus {
        self.steps[stage.index()].status
    }

    pub fn in_progress(&self) -> Option<Stage> {
        Stage::ALL
            .into_iter()
            .find(|stage| self.status(*stage) == ProgressStatus::InProgress)
    }

    pub fn failed(&self) -> Option<Stage> {
        Stage::ALL
            .into_iter()
            .find(|stage| self.status(*stage) == ProgressStatus::Error)
    }

    /// Resets every stage to pending and starts the basic-info write.
    pub fn begin_attempt(&mut self) {
        *self = Self::new();
        self.advance(Stage::SubmittingBasicInfo, ProgressStatus::InProgress);
    }

    pub fn basic_info_saved(&mut self) {
        self.advance(Stage::SubmittingBasicInfo, ProgressStatus::Completed);
        self.advance(Stage::BasicInfoSaved, ProgressStatus::Completed);
        self.advance(Stage::SubmittingDetails, ProgressStatus::InProgress);
    }

    pub fn details_saved(&mut self) {
        self.advance(Stage::SubmittingDetails, ProgressStatus::Completed);
        self.advance(Stage::DetailsSaved, ProgressStatus::Completed);
        self.advance(Stage::AllDone, ProgressStatus::Completed);
    }

    /// Marks the stage currently in progress as failed and returns it.
    pub fn fail_in_progress(&mut self) -> Option<Stage> {
        let stage = self.in_progress()?;
        self.advance(stage, ProgressStatus::Error).then_some(stage)
    }

    fn advance(&mut self, stage: Stage, to: ProgressStatus) -> bool {
        if self.failed().is_some() {
            return false;
        }
        if to == ProgressStatus::InProgress && self.in_progress().is_some() {
            return false;
        }
        let step = &mut self.steps[stage.index()];
        if to.rank() <= step.status.rank() {
            return false;
        }
        step.status = to;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn statuses(pipeline: &ProgressPipeline) -> Vec<ProgressStatus> {
        pipeline.steps().iter().map(|step| step.status).collect()
    }

    #[test]
    fn happy_path_completes_every_stage() {
        let mut pipeline = ProgressPipeline::new();
        pipeline.begin_attempt();
        assert_eq!(pipeline.in_progress(), Some(Stage::SubmittingBasicInfo));

        pipeline.basic_info_saved();
        assert_eq!(pipeline.in_progress(), Some(Stage::SubmittingDetails));

        pipeline.details_saved();
        assert_eq!(statuses(&pipeline), vec![ProgressStatus::Completed; 5]);
        assert_eq!(pipeline.in_progress(), None);
    }

    #[test]
    fn completed_stage_is_never_revisited() {
        let mut pipeline = ProgressPipeline::new();
        pipeline.begin_attempt();
        pipeline.basic_info_saved();

        assert!(!pipeline.advance(Stage::SubmittingBasicInfo, ProgressStatus::InProgress));
        assert!(!pipeline.advance(Stage::BasicInfoSaved, ProgressStatus::Pending));
        assert_eq!(pipeline.status(Stage::SubmittingBasicInfo), ProgressStatus::Completed);
    }

    #[test]
    fn failure_freezes_later_stages() {
        let mut pipeline = ProgressPipeline::new();
        pipeline.begin_attempt();
        assert_eq!(pipeline.fail_in_progress(), Some(Stage::SubmittingBasicInfo));

        pipeline.basic_info_saved();
        pipeline.details_saved();
        assert_eq!(
            statuses(&pipeline),
            vec![
                ProgressStatus::Error,
                ProgressStatus::Pending,
                ProgressStatus::Pending,
                ProgressStatus::Pending,
                ProgressStatus::Pending,
            ]
        );
    }

    #[test]
    fn new_attempt_resets_to_pending() {
        let mut pipeline = ProgressPipeline::new();
        pipeline.begin_attempt();
        pipeline.fail_in_progress();

        pipeline.begin_attempt();
        assert_eq!(pipeline.failed(), None);
        assert_eq!(pipeline.status(Stage::SubmittingBasicInfo), ProgressStatus::InProgress);
        assert_eq!(pipeline.status(Stage::AllDone), ProgressStatus::Pending);
    }
}
