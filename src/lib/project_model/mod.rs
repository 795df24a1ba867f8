pub mod build;
pub mod target;

use self::{build::BuildModel, target::TargetModel};

/// The resolved, read only view of the configuration that drives a whole run
#[derive(Debug, PartialEq)]
pub struct CiModel<'a> {
    pub build: BuildModel<'a>,
    /// In declaration order, which is the execution order
    pub targets: Vec<TargetModel<'a>>,
}
