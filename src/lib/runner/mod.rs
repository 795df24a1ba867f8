//! Execution of the operations declared for every target: settings retrieval,
//! builds and tests through `xcodebuild`, and the coverage report

use std::io::Write;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use color_eyre::{
    eyre::{bail, Context},
    Result,
};

use crate::{
    cli::{
        input::CliArgs,
        output::{
            commands,
            executors::{Invocation, ToolInvoker},
            reporter::Reporter,
        },
    },
    domain::{
        coverage,
        operation::{Operation, OperationStatus},
        settings::BuildSettings,
        target::BuildTarget,
    },
    project_model::{build::BuildModel, target::TargetModel},
    utils::{
        self,
        constants::{dir_names, error_messages, settings_keys},
    },
};

/// Exit code of an operation that couldn't be carried out at all
pub const FAILURE_SENTINEL: i32 = -1;

/// The process wide switches of a run, fixed at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    /// Delete the derived data of every target before building
    pub clean: bool,
    /// Pipe the build output through the log formatter
    pub pretty_print: bool,
    /// Running on the CI service, which enables the static analysis wrapper
    pub ci_environment: bool,
    /// Where the builds are launched from
    pub root: PathBuf,
    pub timeout: Option<Duration>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            clean: true,
            pretty_print: true,
            ci_environment: false,
            root: PathBuf::from("."),
            timeout: None,
        }
    }
}

impl RunOptions {
    /// Resolves the options from the command line, and the CI marker from the environment
    pub fn new(cli_args: &CliArgs, build: &BuildModel<'_>) -> Self {
        let ci_environment = std::env::var(&*build.ci_env_var)
            .map(|value| value == build.ci_env_value)
            .unwrap_or(false);

        Self {
            clean: !cli_args.no_clean,
            pretty_print: !cli_args.no_xcpretty,
            ci_environment,
            root: PathBuf::from(cli_args.root.as_deref().unwrap_or(".")),
            timeout: cli_args.timeout.map(Duration::from_secs),
        }
    }
}

/// Runs the operations of the targets one at a time, writing the status lines to `W`
pub struct Runner<'r, W: Write> {
    build: &'r BuildModel<'r>,
    options: &'r RunOptions,
    invoker: &'r dyn ToolInvoker,
    pub reporter: &'r mut Reporter<W>,
}

impl<'r, W: Write> Runner<'r, W> {
    pub fn new(
        build: &'r BuildModel<'r>,
        options: &'r RunOptions,
        invoker: &'r dyn ToolInvoker,
        reporter: &'r mut Reporter<W>,
    ) -> Self {
        Self {
            build,
            options,
            invoker,
            reporter,
        }
    }

    /// The build settings of `target`. Only the first call per target queries the
    /// build tool, the rest return the cached result
    pub fn get_build_settings<'t>(
        &mut self,
        target: &'t mut BuildTarget<'_>,
    ) -> Result<&'t BuildSettings> {
        let settings = match target.build_settings.take() {
            Some(settings) => settings,
            None => self.query_build_settings(target.spec)?,
        };
        Ok(target.build_settings.insert(settings))
    }

    fn query_build_settings(&mut self, spec: &TargetModel<'_>) -> Result<BuildSettings> {
        let start = Instant::now();
        let command = commands::settings_query_command(spec, self.build);
        log::debug!("Querying the build settings of {}", spec.name);

        let output = self
            .invoker
            .invoke(&Invocation::captured(&command).in_dir(&self.options.root))?;

        if !output.success() {
            bail!(
                "{} ({}) for {}: {}",
                error_messages::SETTINGS_QUERY_FAILED,
                output.exit_code,
                spec.name,
                output.stderr().trim()
            );
        }

        let settings = BuildSettings::parse(output.stdout());
        self.reporter.line(format!(
            "Retrieved Build Settings ({:.2} sec)",
            start.elapsed().as_secs_f64()
        ))?;

        Ok(settings)
    }

    /// Runs the declared operations of `target` in order, stopping at the first failure.
    ///
    /// Returns the exit code of the last operation run
    pub fn run_target(&mut self, target: &mut BuildTarget<'_>) -> Result<i32> {
        let mut exit_code = 0;

        for (idx, operation) in target.operations().iter().copied().enumerate() {
            target.set_status(idx, OperationStatus::Running);
            exit_code = self.do_operation(target, operation)?;
            target.set_status(idx, OperationStatus::from_exit_code(exit_code));

            if exit_code != 0 {
                // The rest are almost certainly going to fail too
                target.abandon_after(idx);
                break;
            }
        }

        Ok(exit_code)
    }

    /// Runs one operation over `target`, between its start and end markers.
    ///
    /// Any error raised while carrying out the operation is reported and turned into
    /// a failed exit code. Only failures writing the status lines are propagated
    pub fn do_operation(
        &mut self,
        target: &mut BuildTarget<'_>,
        operation: Operation,
    ) -> Result<i32> {
        let name = target.name();
        self.reporter.operation_start(name, operation)?;
        let start = Instant::now();

        let exit_code = match self.execute(target, operation) {
            Ok(exit_code) => exit_code,
            Err(error) => {
                log::error!("{name} [{operation}] aborted: {error}");
                self.reporter.operation_error(&error)?;
                FAILURE_SENTINEL
            }
        };

        if exit_code != 0 {
            target.failed = true;
        }

        self.reporter
            .operation_end(name, operation, exit_code, start.elapsed())?;
        self.reporter.blank()?;

        Ok(exit_code)
    }

    fn execute(&mut self, target: &mut BuildTarget<'_>, operation: Operation) -> Result<i32> {
        if operation == Operation::Codecov {
            return self.do_codecov(target);
        }

        let spec = target.spec;
        let mut command =
            commands::xcodebuild_command(spec, self.build, Some(operation), self.options.pretty_print);

        if operation == Operation::Build && spec.use_analysis_tool && self.options.ci_environment {
            for stale in [dir_names::SONAR, dir_names::BUILD_WRAPPER_OUTPUT] {
                utils::fs::remove_directory(&self.options.root.join(stale))?;
            }
            command = commands::wrap_with_analysis_tool(command);
        }

        self.reporter.line(&command)?;
        let output = self.invoker.invoke(
            &Invocation::streamed(&command)
                .in_dir(&self.options.root)
                .with_pipefail(),
        )?;

        Ok(output.exit_code)
    }

    /// Generates the coverage report of `target`, records the measured percentage and
    /// classifies it against the target thresholds
    pub fn do_codecov(&mut self, target: &mut BuildTarget<'_>) -> Result<i32> {
        let (coverage_dir, command) = {
            let settings = self.get_build_settings(target)?;
            let objroot = settings.require(settings_keys::OBJROOT)?;
            let command = commands::coverage_report_command(
                settings.require(settings_keys::CONFIGURATION)?,
                settings
                    .get(settings_keys::EFFECTIVE_PLATFORM_NAME)
                    .unwrap_or_default(),
                settings.require(settings_keys::EXECUTABLE_PATH)?,
            );
            (utils::fs::coverage_data_dir(objroot), command)
        };

        self.reporter.line(&command)?;
        let output = self
            .invoker
            .invoke(&Invocation::captured(&command).in_dir(&coverage_dir))?;

        self.reporter.echo(output.stdout())?;
        eprint!("{}", output.stderr());

        if !output.success() {
            log::error!(
                "The coverage report for {} exited with: {}",
                target.name(),
                output.exit_code
            );
            return Ok(output.exit_code);
        }

        let measured = coverage::parse_summary_percentage(output.stdout())
            .wrap_err_with(|| format!("Reading the coverage of {}", target.name()))?;
        target.coverage = Some(measured);

        Ok(self.print_coverage(target, false)?)
    }

    /// Prints the coverage of `target` against its thresholds, prefixed with the target
    /// name if `print_name` is set.
    ///
    /// Returns `-1` when the coverage is under the failure threshold, `0` otherwise
    /// (including when nothing was measured)
    pub fn print_coverage(
        &mut self,
        target: &BuildTarget<'_>,
        print_name: bool,
    ) -> std::io::Result<i32> {
        let Some(measured) = target.coverage else {
            return Ok(0);
        };

        let thresholds = target.spec.coverage;
        let verdict = thresholds.classify(measured);
        let name = print_name.then(|| target.name());

        if let (true, Some(warn)) = (verdict.warned, thresholds.warn_below) {
            self.reporter.coverage_warning(name, measured, warn)?;
        }
        if let (true, Some(fail)) = (verdict.failed, thresholds.fail_below) {
            self.reporter.coverage_failure(name, measured, fail)?;
        }
        if !verdict.warned && !verdict.failed {
            self.reporter.coverage_ok(name, measured)?;
        }

        Ok(verdict.status_code())
    }
}
