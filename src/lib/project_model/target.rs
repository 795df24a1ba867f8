use std::borrow::Cow;

use crate::domain::coverage::CoverageThresholds;
use crate::domain::operation::{Operation, Platform};

/// What `xcodebuild` is pointed at to find the scheme of a target
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum SchemeContainer<'a> {
    Project(Cow<'a, str>),
    Workspace(Cow<'a, str>),
}

#[derive(Debug, PartialEq, Clone)]
pub struct TargetModel<'a> {
    pub name: Cow<'a, str>,
    pub container: SchemeContainer<'a>,
    pub scheme: Cow<'a, str>,
    pub operations: Vec<Operation>,
    pub platform: Platform,
    pub coverage: CoverageThresholds,
    pub use_analysis_tool: bool,
    /// Declared on the configuration, but never used to order or gate the execution
    pub dependencies: Vec<Cow<'a, str>>,
}

impl<'a> TargetModel<'a> {
    /// Whether the coverage report is part of the work declared for this target
    pub fn wants_coverage(&self) -> bool {
        self.operations.contains(&Operation::Codecov)
    }
}
