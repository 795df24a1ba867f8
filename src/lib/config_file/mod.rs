//! root file for the crate where the datastructures that holds the TOML
//! parsed data lives.
pub mod build;
pub mod target;

use serde::Deserialize;

use self::{build::BuildAttribute, target::TargetAttribute};

/// ```rust
/// use xcci::config_file::{self, XcciConfigFile};
/// use xcci::domain::operation::{Operation, Platform};
///
/// const CONFIG_FILE_MOCK: &str = r#"
///     [build]
///     configuration = 'Release'
///
///     [[targets]]
///     name = 'iOS Framework'
///     scheme = 'OIDC'
///     operations = [ 'build', 'test', 'codecov' ]
///     platform = 'iOS'
///     min_warn_codecov = 70.0
///
///     [[targets]]
///     name = 'Mac Test App'
///     scheme = 'MyTestMacOSApp'
///     operations = [ 'build' ]
///     platform = 'Mac'
///     project = 'Mac/TestApp.xcodeproj'
/// "#;
///
/// let config: XcciConfigFile = config_file::xcci_cfg_from_file(CONFIG_FILE_MOCK)
///     .expect("A failure happened parsing the xcci toml file");
///
/// let build = config.build.as_ref().expect("Missing [build] table");
/// assert_eq!(build.configuration.as_deref(), Some("Release"));
///
/// assert_eq!(config.targets.len(), 2);
/// let framework = &config.targets[0];
/// assert_eq!(framework.name, "iOS Framework");
/// assert_eq!(framework.operations, vec![Operation::Build, Operation::Test, Operation::Codecov]);
/// assert_eq!(framework.platform, Platform::Ios);
/// assert_eq!(framework.min_warn_codecov, Some(70.0));
///
/// let app = &config.targets[1];
/// assert_eq!(app.platform, Platform::Mac);
/// assert_eq!(app.project.as_deref(), Some("Mac/TestApp.xcodeproj"));
/// assert!(app.workspace.is_none());
/// ```
/// The [`XcciConfigFile`] is the type that holds
/// the whole hierarchy of the xcci config file attributes.
/// The `[[targets]]` array is kept in declaration order, which is the
/// order in which the targets get built
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct XcciConfigFile<'a> {
    #[serde(borrow)]
    pub build: Option<BuildAttribute<'a>>,
    #[serde(borrow, default)]
    pub targets: Vec<TargetAttribute<'a>>,
}

pub fn xcci_cfg_from_file(cfg: &'_ str) -> Result<XcciConfigFile<'_>, toml::de::Error> {
    <XcciConfigFile>::deserialize(&mut toml::Deserializer::new(cfg))
}
