//! Generation of the command lines handed to the external tools.
//!
//! Nothing here validates paths or schemes: they are passed verbatim, and it's up to
//! the tool to reject them

use std::path::Path;

use super::arguments::{Argument, Arguments};
use crate::domain::operation::Operation;
use crate::project_model::{
    build::BuildModel,
    target::{SchemeContainer, TargetModel},
};
use crate::utils::constants::{coverage, dir_names, tools, xcodebuild};

/// Generates the `xcodebuild` command line that runs `operation` over `target`.
///
/// A `None` operation generates the bare invocation, used as the base of the
/// settings query. When `pretty_print` is set, the output is piped through the
/// configured log formatter
pub fn xcodebuild_command<'a>(
    target: &'a TargetModel<'a>,
    build: &'a BuildModel<'a>,
    operation: Option<Operation>,
    pretty_print: bool,
) -> Arguments<'a> {
    let mut arguments = Arguments::with_capacity(16);
    arguments.create_and_push(tools::XCODEBUILD);

    if let Some(operation) = operation {
        arguments.create_and_push(operation.as_ref().to_owned());
    }

    match &target.container {
        SchemeContainer::Project(path) => {
            arguments.create_and_push("-project");
            arguments.create_and_push(path);
        }
        SchemeContainer::Workspace(path) => {
            arguments.create_and_push("-workspace");
            arguments.create_and_push(path);
        }
    }

    arguments.create_and_push("-scheme");
    arguments.create_and_push(format!("\"{}\"", target.scheme));
    arguments.create_and_push("-configuration");
    arguments.create_and_push(&build.configuration);

    if operation == Some(Operation::Test) && target.wants_coverage() {
        arguments.create_and_push(xcodebuild::ENABLE_CODE_COVERAGE);
    }

    if target.platform.is_mobile() {
        arguments.create_and_push(xcodebuild::IOS_SIMULATOR_SDK);
        arguments.create_and_push(xcodebuild::DISABLE_CODE_SIGNING);
        arguments.create_and_push(format!("-destination '{}'", build.simulator_destination));
    }

    if pretty_print {
        arguments.create_and_push("|");
        arguments.create_and_push(&build.pretty_printer);
    }

    arguments
}

/// The query that dumps the build settings of `target`, never piped through the formatter
pub fn settings_query_command<'a>(
    target: &'a TargetModel<'a>,
    build: &'a BuildModel<'a>,
) -> Arguments<'a> {
    let mut arguments = xcodebuild_command(target, build, None, false);
    arguments.create_and_push(xcodebuild::SHOW_BUILD_SETTINGS);
    arguments
}

/// Prepends the static analysis build wrapper to an already generated build command
pub fn wrap_with_analysis_tool(command: Arguments<'_>) -> Arguments<'_> {
    let mut arguments = Arguments::with_capacity(command.len() + 3);
    arguments.create_and_push(tools::ANALYSIS_BUILD_WRAPPER);
    arguments.create_and_push("--out-dir");
    arguments.create_and_push(dir_names::BUILD_WRAPPER_OUTPUT);
    arguments.extend(command);
    arguments
}

/// The coverage report over the profile data of the target executable. Meant to be run
/// from the coverage data directory of the target
pub fn coverage_report_command(
    configuration: &str,
    platform_name: &str,
    executable_path: &str,
) -> Arguments<'static> {
    let executable = Path::new(dir_names::PRODUCTS)
        .join(format!("{configuration}{platform_name}"))
        .join(executable_path);

    Arguments::from_vec(vec![
        Argument::from(tools::LLVM_COV_REPORT),
        Argument::from("-instr-profile"),
        Argument::from(coverage::PROFILE_DATA),
        Argument::from(format!("-arch=\"{}\"", coverage::ARCH)),
        Argument::from("-use-color"),
        Argument::from(executable.as_path()),
    ])
}
