use std::borrow::Cow;

/// The settings shared by every target of the run
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct BuildModel<'a> {
    pub default_workspace: Cow<'a, str>,
    pub configuration: Cow<'a, str>,
    pub simulator_destination: Cow<'a, str>,
    pub ci_env_var: Cow<'a, str>,
    pub ci_env_value: Cow<'a, str>,
    pub pretty_printer: Cow<'a, str>,
}
