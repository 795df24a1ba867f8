//! The colorized status lines read by the humans looking at the CI log, including
//! the fold markers that let the CI web view collapse every operation

use std::io::{self, Write};
use std::time::Duration;

use colored::Colorize;

use crate::domain::operation::Operation;

/// Writes the CI status lines to the sink `W`
pub struct Reporter<W: Write> {
    sink: W,
}

impl Reporter<io::Stdout> {
    /// Writes to the console, colorized even when it is piped into a CI log
    pub fn stdout() -> Self {
        Self::new(io::stdout()).with_colors()
    }
}

impl<W: Write> Reporter<W> {
    pub fn new(sink: W) -> Self {
        Self { sink }
    }

    /// Always emits the color escape codes, whatever the sink is. The switch is process wide
    pub fn with_colors(self) -> Self {
        colored::control::set_override(true);
        self
    }

    pub fn into_inner(self) -> W {
        self.sink
    }

    /// Writes a line, flushing it so it's ordered with the output of the child processes
    pub fn line(&mut self, line: impl std::fmt::Display) -> io::Result<()> {
        writeln!(self.sink, "{line}")?;
        self.sink.flush()
    }

    pub fn blank(&mut self) -> io::Result<()> {
        self.line("")
    }

    /// Echoes the captured output of a tool as is
    pub fn echo(&mut self, output: &str) -> io::Result<()> {
        write!(self.sink, "{output}")?;
        self.sink.flush()
    }

    pub fn operation_start(&mut self, name: &str, operation: Operation) -> io::Result<()> {
        self.line(format!("Beginning {name} [{operation}]").bold())?;
        self.line(format!("travis_fold:start:{}", fold_token(name, operation)))
    }

    pub fn operation_end(
        &mut self,
        name: &str,
        operation: Operation,
        exit_code: i32,
        elapsed: Duration,
    ) -> io::Result<()> {
        self.line(format!("travis_fold:end:{}", fold_token(name, operation)))?;

        let seconds = format!("({:.2} seconds)", elapsed.as_secs_f64());
        if exit_code == 0 {
            let status = format!("{name} [{operation}] Succeeded").green().bold();
            self.line(format!("{status} {seconds}"))
        } else {
            let status = format!("{name} [{operation}] Failed").red().bold();
            self.line(format!("{status} {seconds}"))
        }
    }

    /// The diagnostic printed when an operation couldn't be carried out at all
    pub fn operation_error(&mut self, error: &color_eyre::Report) -> io::Result<()> {
        self.line("Failed due to exception in build script")?;
        self.line(format!("{error:?}"))
    }

    /// The line printed once all the operations of a target finished or were abandoned
    pub fn target_result(&mut self, name: &str, succeeded: bool) -> io::Result<()> {
        if succeeded {
            self.line(format!("{name} Succeeded").green().bold())
        } else {
            self.line(format!("{name} Failed").red().bold())
        }
    }

    /// The line of the final rollup of the run
    pub fn final_result(&mut self, name: &str, failed: bool) -> io::Result<()> {
        if failed {
            self.line(format!("{name} failed.").red().bold())
        } else {
            self.line(format!("{name} succeeded.").bright_green().bold())
        }
    }

    pub fn coverage_header(&mut self) -> io::Result<()> {
        self.blank()?;
        self.line("Code Coverage Results:")
    }

    pub fn coverage_warning(
        &mut self,
        name: Option<&str>,
        coverage: f64,
        threshold: f64,
    ) -> io::Result<()> {
        let message = format!(
            "{}{}% coverage is below the recommended minimum requirement: {}%",
            prefix(name),
            percent(coverage),
            percent(threshold)
        );
        self.line(message.yellow().bold())
    }

    pub fn coverage_failure(
        &mut self,
        name: Option<&str>,
        coverage: f64,
        threshold: f64,
    ) -> io::Result<()> {
        let message = format!(
            "{}{}% coverage is below the minimum requirement: {}%",
            prefix(name),
            percent(coverage),
            percent(threshold)
        );
        self.line(message.red().bold())
    }

    pub fn coverage_ok(&mut self, name: Option<&str>, coverage: f64) -> io::Result<()> {
        self.line(format!("{}{}%", prefix(name), percent(coverage)).green().bold())
    }
}

/// The identifier of the fold of an operation: the target name and the operation
/// joined by an underscore, without whitespaces
pub fn fold_token(name: &str, operation: Operation) -> String {
    format!("{name}_{operation}").replace(' ', "_")
}

fn prefix(name: Option<&str>) -> String {
    name.map(|name| format!("{name}: ")).unwrap_or_default()
}

/// The shortest representation of `value` that reads back the same, always with a
/// fractional part: `90.0`, `79.33333333333333`
fn percent(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}
