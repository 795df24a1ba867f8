//! file that contains the global options available
//! within xcci to configure how the external tools are driven
use std::borrow::Cow;

use serde::*;

/// [`BuildAttribute`] - Stores the settings shared by every target
///
/// * `default_workspace` - The workspace used by the targets that declare
/// neither a project nor a workspace
/// * `configuration` - The build configuration passed to `xcodebuild`
/// * `simulator_destination` - The destination used for the iOS targets
/// * `ci_env_var` / `ci_env_value` - The environment marker that identifies a CI run,
/// which enables the static analysis build wrapper
/// * `pretty_printer` - The log formatter the build output is piped through
///
/// ```rust
/// use xcci::config_file::build::BuildAttribute;
///
/// const CONFIG_FILE_MOCK: &str = r#"
///     #[build]
///     default_workspace = 'App.xcworkspace'
///     configuration = 'Release'
///     ci_env_var = 'CI'
///"#;
///
/// let config: BuildAttribute = toml::from_str(CONFIG_FILE_MOCK)
///    .expect("A failure happened parsing the xcci toml file");
///
/// assert_eq!(config.default_workspace.as_deref(), Some("App.xcworkspace"));
/// assert_eq!(config.configuration.as_deref(), Some("Release"));
/// assert_eq!(config.ci_env_var.as_deref(), Some("CI"));
/// assert!(config.ci_env_value.is_none());
/// assert!(config.pretty_printer.is_none());
/// ```
/// > Note: TOML table are toml commented (#) to allow us to parse
/// the inner attributes as the direct type that they belongs to.
#[derive(Deserialize, Debug, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct BuildAttribute<'a> {
    #[serde(borrow)]
    pub default_workspace: Option<Cow<'a, str>>,
    #[serde(borrow)]
    pub configuration: Option<Cow<'a, str>>,
    #[serde(borrow)]
    pub simulator_destination: Option<Cow<'a, str>>,
    #[serde(borrow)]
    pub ci_env_var: Option<Cow<'a, str>>,
    #[serde(borrow)]
    pub ci_env_value: Option<Cow<'a, str>>,
    #[serde(borrow)]
    pub pretty_printer: Option<Cow<'a, str>>,
}
