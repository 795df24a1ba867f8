pub mod cli;
pub mod config_file;
pub mod domain;
pub mod project_model;
pub mod runner;
pub mod utils;

/// The entry point for the execution of the program.
///
/// This module existence is motivated to let us run
/// integration tests for the whole operations of the program
/// without having to do fancy work about checking the
/// data sent to stdout/stderr
pub mod worker {
    use std::io::Write;
    use std::{fs, path::PathBuf};

    use color_eyre::{eyre::Context, Result};
    use indexmap::IndexSet;

    use crate::{
        cli::{
            input::CliArgs,
            output::{
                executors::{SystemShell, ToolInvoker},
                reporter::Reporter,
            },
        },
        config_file::{self, XcciConfigFile},
        domain::{operation::OperationStatus, target::BuildTarget},
        project_model::CiModel,
        runner::{RunOptions, Runner},
        utils::{
            self,
            constants::{error_messages, settings_keys, DEFAULT_CONFIG_FILE},
        },
    };

    /// The process exit status of a run where every target succeeded
    pub const SUCCESS_STATUS: i32 = 0;
    /// The process exit status of a run where any target failed
    pub const FAILURE_STATUS: i32 = 1;

    /// What a run left behind for a single target
    #[derive(Debug, Clone, PartialEq)]
    pub struct TargetOutcome {
        pub name: String,
        pub failed: bool,
        pub coverage: Option<f64>,
        pub statuses: Vec<OperationStatus>,
    }

    /// The rollup of a whole run
    #[derive(Debug, Clone, PartialEq)]
    pub struct RunReport {
        /// [`SUCCESS_STATUS`] or [`FAILURE_STATUS`]
        pub final_status: i32,
        /// Set when any succeeded target measured its coverage
        pub coverage_present: bool,
        pub targets: Vec<TargetOutcome>,
    }

    /// The main work of the project. Loads the targets, runs them against the system
    /// shell and returns the process exit status
    pub fn run_xcci(cli_args: &CliArgs) -> Result<i32> {
        let raw_file = match cli_args.config.as_deref() {
            Some(cfg_path) => {
                log::info!("Loading the targets from {cfg_path:?}");
                fs::read_to_string(cfg_path).with_context(|| {
                    format!("{}: {:?}", error_messages::READ_CFG_FILE, cfg_path)
                })?
            }
            None => {
                log::info!("Loading the built-in targets table");
                DEFAULT_CONFIG_FILE.to_owned()
            }
        };

        let config: XcciConfigFile<'_> = config_file::xcci_cfg_from_file(raw_file.as_str())
            .with_context(|| error_messages::PARSE_CFG_FILE)?;
        let model: CiModel<'_> =
            utils::reader::build_model(config).with_context(|| error_messages::BUILD_MODEL)?;

        let options = RunOptions::new(cli_args, &model.build);
        log::debug!("Running with: {options:?}");

        let invoker = SystemShell::new(options.timeout);
        let mut reporter = Reporter::stdout();

        let report = run_targets(&model, &options, &invoker, &mut reporter)?;
        Ok(report.final_status)
    }

    /// Runs every target of `model` in declaration order, writing the status lines
    /// through `reporter`.
    ///
    /// A failing target never stops the others. Only configuration problems, a failed
    /// cleanup or a broken output sink abort the run
    pub fn run_targets<W: Write>(
        model: &CiModel<'_>,
        options: &RunOptions,
        invoker: &dyn ToolInvoker,
        reporter: &mut Reporter<W>,
    ) -> Result<RunReport> {
        let mut targets: Vec<BuildTarget<'_>> =
            model.targets.iter().map(BuildTarget::new).collect();
        let mut runner = Runner::new(&model.build, options, invoker, reporter);

        if options.clean {
            clean_derived_data(&mut runner, &mut targets)
                .with_context(|| error_messages::CLEANING_DERIVED_DATA)?;
        }

        for target in targets.iter_mut() {
            runner.run_target(target)?;
            runner.reporter.target_result(target.name(), !target.failed)?;
        }

        runner.reporter.blank()?;

        let mut final_status = SUCCESS_STATUS;
        let mut coverage_present = false;
        for target in targets.iter() {
            if target.failed {
                final_status = FAILURE_STATUS;
            } else if target.spec.wants_coverage() {
                coverage_present = true;
            }
            runner.reporter.final_result(target.name(), target.failed)?;
        }

        if coverage_present {
            runner.reporter.coverage_header()?;
            for target in targets.iter().filter(|target| target.coverage.is_some()) {
                runner.print_coverage(target, true)?;
            }
        }

        log::debug!("Run finished with status: {final_status}");

        Ok(RunReport {
            final_status,
            coverage_present,
            targets: targets.iter().map(outcome).collect(),
        })
    }

    /// Deletes the derived data directory of every target, each one once even when
    /// several targets share it. Every target prints its directory, shared or not
    fn clean_derived_data<W: Write>(
        runner: &mut Runner<'_, W>,
        targets: &mut [BuildTarget<'_>],
    ) -> Result<()> {
        let mut derived_data_dirs: IndexSet<PathBuf> = IndexSet::new();

        for target in targets.iter_mut() {
            let name = target.name();
            let settings = runner.get_build_settings(target)?;
            let objroot = settings.require(settings_keys::OBJROOT)?;

            match utils::fs::derived_data_dir(objroot) {
                Some(dir) => {
                    runner.reporter.line(dir.display())?;
                    derived_data_dirs.insert(dir);
                }
                None => log::warn!(
                    "Not cleaning {name}: {objroot:?} doesn't look like a derived data directory"
                ),
            }
        }

        for dir in derived_data_dirs.iter() {
            runner.reporter.line(format!("Deleting {}", dir.display()))?;
            if utils::fs::remove_directory(dir)? {
                log::debug!("Deleted {dir:?}");
            }
        }

        Ok(())
    }

    fn outcome(target: &BuildTarget<'_>) -> TargetOutcome {
        TargetOutcome {
            name: target.name().to_owned(),
            failed: target.failed,
            coverage: target.coverage,
            statuses: target.statuses().map(|(_, status)| status).collect(),
        }
    }

}
