//! The operations that can be run against a target, and the platforms a target is built for

use core::fmt;

use serde::{Deserialize, Serialize};

/// One step of the work declared for a target. The declaration order on the
/// configuration is the execution order
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Build,
    Test,
    /// Runs the coverage report over the data collected by a previous instrumented `test`
    #[serde(alias = "coverage")]
    Codecov,
}

impl AsRef<str> for Operation {
    fn as_ref(&self) -> &str {
        match *self {
            Operation::Build => "build",
            Operation::Test => "test",
            Operation::Codecov => "codecov",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

/// Where the target is built for
#[derive(Debug, PartialEq, Eq, Copy, Clone, Serialize, Deserialize, Default)]
pub enum Platform {
    #[serde(rename = "iOS", alias = "ios", alias = "IOS")]
    Ios,
    #[default]
    #[serde(rename = "Mac", alias = "mac", alias = "macOS", alias = "macos", alias = "osx")]
    Mac,
}

impl AsRef<str> for Platform {
    fn as_ref(&self) -> &str {
        match *self {
            Platform::Ios => "iOS",
            Platform::Mac => "Mac",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

impl Platform {
    /// Mobile targets are built and tested against the simulator, without code signing
    pub fn is_mobile(&self) -> bool {
        matches!(self, Platform::Ios)
    }
}

/// The lifecycle of a single operation of a target during a run
#[derive(Debug, PartialEq, Eq, Copy, Clone, Default)]
pub enum OperationStatus {
    #[default]
    NotStarted,
    Running,
    Succeeded,
    Failed,
    /// A previous operation of the same target failed, so this one never ran
    NotAttempted,
}

impl OperationStatus {
    pub fn from_exit_code(exit_code: i32) -> Self {
        if exit_code == 0 {
            OperationStatus::Succeeded
        } else {
            OperationStatus::Failed
        }
    }
}
