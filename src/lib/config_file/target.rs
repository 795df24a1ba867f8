//! Type for holds the Targets build details

use std::borrow::Cow;

use serde::Deserialize;

use crate::domain::operation::{Operation, Platform};

/// [`TargetAttribute`] - The type for holding the build details of every
/// user declared target
/// * `name` - Unique, human readable name of the target
/// * `scheme` - The scheme handed to `xcodebuild`
/// * `operations` - What to run against the target, in order
/// * `platform` - Whether it builds for the iOS simulator or for the Mac
/// * `project` / `workspace` - What contains the scheme. At most one is used
/// * `min_warn_codecov` / `min_codecov` - Coverage thresholds, in percent
/// * `use_sonarcube` - Wraps the CI builds with the static analysis build wrapper
/// * `dependencies` - Declared for documentation purposes, never scheduled on
///
/// ### Tests
///
/// ```rust
/// use xcci::config_file::target::TargetAttribute;
/// use xcci::domain::operation::{Operation, Platform};
///
/// const CONFIG_FILE_MOCK: &str = r#"
///     #[[targets]]
///     name = 'Sample Swift App'
///     scheme = 'SampleSwiftApp'
///     operations = [ 'build' ]
///     platform = 'iOS'
///     workspace = 'Samples/SampleSwiftApp/SampleSwiftApp.xcworkspace'
///     dependencies = [ 'iOS Framework' ]
/// "#;
///
/// let config: TargetAttribute = toml::from_str(CONFIG_FILE_MOCK)
///    .expect("A failure happened parsing the xcci toml file");
///
/// assert_eq!(config.name, "Sample Swift App");
/// assert_eq!(config.operations, vec![Operation::Build]);
/// assert_eq!(config.platform, Platform::Ios);
/// assert!(config.project.is_none());
/// assert_eq!(config.dependencies.map(|d| d.len()), Some(1));
/// assert!(!config.use_sonarcube.unwrap_or_default());
/// ```
#[derive(Deserialize, Debug, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TargetAttribute<'a> {
    #[serde(borrow)]
    pub name: Cow<'a, str>,
    #[serde(borrow)]
    pub scheme: Cow<'a, str>,
    pub operations: Vec<Operation>,
    pub platform: Platform,
    #[serde(borrow)]
    pub project: Option<Cow<'a, str>>,
    #[serde(borrow)]
    pub workspace: Option<Cow<'a, str>>,
    pub min_warn_codecov: Option<f64>,
    pub min_codecov: Option<f64>,
    pub use_sonarcube: Option<bool>,
    #[serde(borrow)]
    pub dependencies: Option<Vec<Cow<'a, str>>>,
}
