//! The runtime state of a target during a run

use crate::domain::operation::{Operation, OperationStatus};
use crate::domain::settings::BuildSettings;
use crate::project_model::target::TargetModel;

/// One per declared target, created at the start of the run and discarded at its end
#[derive(Debug)]
pub struct BuildTarget<'a> {
    pub spec: &'a TargetModel<'a>,
    /// Filled on the first settings query, and reused afterwards
    pub build_settings: Option<BuildSettings>,
    pub failed: bool,
    /// Reserved for targets filtered out of a run. Nothing sets it yet
    pub skipped: bool,
    /// Measured by the coverage operation, at most once per run
    pub coverage: Option<f64>,
    /// Parallel to the declared operations of the target
    statuses: Vec<OperationStatus>,
}

impl<'a> BuildTarget<'a> {
    pub fn new(spec: &'a TargetModel<'a>) -> Self {
        Self {
            spec,
            build_settings: None,
            failed: false,
            skipped: false,
            coverage: None,
            statuses: vec![OperationStatus::NotStarted; spec.operations.len()],
        }
    }

    pub fn name(&self) -> &'a str {
        self.spec.name.as_ref()
    }

    pub fn operations(&self) -> &'a [Operation] {
        &self.spec.operations
    }

    /// Every declared operation paired with its current status
    pub fn statuses(&self) -> impl Iterator<Item = (Operation, OperationStatus)> + '_ {
        self.spec
            .operations
            .iter()
            .copied()
            .zip(self.statuses.iter().copied())
    }

    pub(crate) fn set_status(&mut self, idx: usize, status: OperationStatus) {
        if let Some(slot) = self.statuses.get_mut(idx) {
            *slot = status;
        }
    }

    /// Marks every operation after `idx` as not attempted
    pub(crate) fn abandon_after(&mut self, idx: usize) {
        self.statuses
            .iter_mut()
            .skip(idx + 1)
            .for_each(|status| *status = OperationStatus::NotAttempted);
    }
}
