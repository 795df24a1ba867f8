use std::ffi::OsString;

use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::Parser;

/// [`CliArgs`] is the command line arguments parser
///
/// #Test
/// ```rust
/// use clap::Parser;
/// use xcci::cli::input::CliArgs;
///
/// let parser = CliArgs::parse_from(["", "-v"]);
/// assert_eq!(1, parser.verbose);
/// assert!(!parser.no_clean);
///
/// let parser = CliArgs::parse_from(["", "--no-clean", "--no-xcpretty"]);
/// assert!(parser.no_clean);
/// assert!(parser.no_xcpretty);
///
/// let parser = CliArgs::parse_from(["", "--timeout", "600", "--config", "ci.toml"]);
/// assert_eq!(parser.timeout, Some(600));
/// assert_eq!(parser.config.as_deref(), Some("ci.toml"));
/// ```
#[derive(Parser, Debug, Default)]
#[command(name = "xcci")]
#[command(args_override_self = true)]
#[command(author = "Zero Day Code")]
#[command(version = "0.1.0")]
#[command(
    about = "xcci builds, tests and measures the coverage of every declared Xcode target",
    long_about = "xcci drives xcodebuild once per declared target, in order, and reports a single exit status for the CI runner"
)]
pub struct CliArgs {
    #[arg(short, long, action = clap::ArgAction::Count, help = "xcci maximum allowed verbosity level is: '-v'")]
    pub verbose: u8,

    #[arg(long, help = "Skip the removal of the derived data directories before building")]
    pub no_clean: bool,

    #[arg(long, help = "Do not pipe the xcodebuild output through the log formatter")]
    pub no_xcpretty: bool,

    #[arg(long, help = "Path to a TOML file declaring the targets. Defaults to the built-in table")]
    pub config: Option<String>,

    #[arg(long, help = "Directory where the builds are launched from. Defaults to '.'")]
    pub root: Option<String>,

    #[arg(long, help = "Seconds to wait for each external tool invocation before killing it")]
    pub timeout: Option<u64>,
}

impl CliArgs {
    /// Parses the given arguments like [`Parser::try_parse_from`], but every token
    /// that isn't recognized is discarded instead of aborting the program.
    ///
    /// ```rust
    /// use xcci::cli::input::CliArgs;
    ///
    /// let parser = CliArgs::parse_lenient(["", "whatever", "--no-clean", "--unknown=1"])
    ///     .expect("Unknown tokens must be ignored");
    /// assert!(parser.no_clean);
    /// assert!(!parser.no_xcpretty);
    /// ```
    pub fn parse_lenient<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let mut args: Vec<OsString> = args.into_iter().map(Into::into).collect();

        loop {
            let err = match Self::try_parse_from(&args) {
                Ok(parsed) => return Ok(parsed),
                Err(err) => err,
            };

            if err.kind() != ErrorKind::UnknownArgument {
                return Err(err);
            }

            let unknown = match err.get(ContextKind::InvalidArg) {
                Some(ContextValue::String(unknown)) => unknown.clone(),
                _ => return Err(err),
            };

            // The binary name never gets discarded
            let position = args.iter().skip(1).position(|arg| {
                arg.to_str()
                    .map(|arg| arg == unknown.as_str() || arg.starts_with(&format!("{unknown}=")))
                    .unwrap_or(false)
            });

            if let Some(idx) = position {
                log::trace!("Ignoring unrecognized argument: {unknown}");
                args.remove(idx + 1);
                continue;
            }

            match short_flag(&unknown).and_then(|flag| drop_from_cluster(&mut args, flag)) {
                Some(()) => log::trace!("Ignoring unrecognized flag {unknown} of a short flags cluster"),
                None => return Err(err),
            }
        }
    }
}

/// The letter of a short flag like `-x`
fn short_flag(arg: &str) -> Option<char> {
    let mut chars = arg.strip_prefix('-')?.chars();
    match (chars.next(), chars.next()) {
        (Some(flag), None) if flag != '-' => Some(flag),
        _ => None,
    }
}

/// Removes `flag` from the first cluster of short flags (`-vx`) that carries it.
/// A cluster left without flags is removed entirely
fn drop_from_cluster(args: &mut Vec<OsString>, flag: char) -> Option<()> {
    let (idx, cluster) = args.iter().enumerate().skip(1).find_map(|(idx, arg)| {
        let arg = arg.to_str()?;
        let flags = arg.strip_prefix('-').filter(|flags| !flags.starts_with('-'))?;
        (flags.chars().count() > 1 && flags.contains(flag)).then(|| (idx, flags.to_owned()))
    })?;

    let remaining = cluster.replacen(flag, "", 1);
    if remaining.is_empty() {
        args.remove(idx);
    } else {
        args[idx] = OsString::from(format!("-{remaining}"));
    }
    Some(())
}

#[cfg(test)]
mod tests {
    use super::CliArgs;

    #[test]
    fn test_flags_are_recognized_anywhere() {
        let parsed = CliArgs::parse_lenient(["xcci", "foo", "--no-xcpretty", "bar", "--no-clean"])
            .expect("Lenient parsing failed");

        assert!(parsed.no_clean);
        assert!(parsed.no_xcpretty);
        assert_eq!(parsed.verbose, 0);
    }

    #[test]
    fn test_defaults_without_arguments() {
        let parsed = CliArgs::parse_lenient(["xcci"]).expect("Lenient parsing failed");

        assert!(!parsed.no_clean);
        assert!(!parsed.no_xcpretty);
        assert!(parsed.config.is_none());
        assert!(parsed.root.is_none());
        assert!(parsed.timeout.is_none());
    }

    #[test]
    fn test_repeated_flags_are_accepted() {
        let parsed = CliArgs::parse_lenient(["xcci", "--no-clean", "--no-clean"])
            .expect("Repeated flags must not conflict");

        assert!(parsed.no_clean);
        assert!(!parsed.no_xcpretty);
    }

    #[test]
    fn test_unknown_flags_inside_a_short_cluster() {
        let parsed = CliArgs::parse_lenient(["xcci", "-vx", "--no-clean"])
            .expect("Unknown short flags must be ignored");
        assert_eq!(parsed.verbose, 1);
        assert!(parsed.no_clean);

        let parsed = CliArgs::parse_lenient(["xcci", "-xy", "--no-xcpretty"])
            .expect("Unknown short flags must be ignored");
        assert_eq!(parsed.verbose, 0);
        assert!(parsed.no_xcpretty);
    }

    #[test]
    fn test_invalid_values_still_fail() {
        let parsed = CliArgs::parse_lenient(["xcci", "--timeout", "soon"]);
        assert!(parsed.is_err());
    }
}
