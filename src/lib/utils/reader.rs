use std::borrow::Cow;
use std::collections::HashSet;

use color_eyre::{eyre::bail, Result};

use crate::{
    config_file::{build::BuildAttribute, target::TargetAttribute, XcciConfigFile},
    domain::coverage::CoverageThresholds,
    project_model::{
        build::BuildModel,
        target::{SchemeContainer, TargetModel},
        CiModel,
    },
    utils::constants::defaults,
};

/// Maps the raw [`XcciConfigFile`] into the [`CiModel`] that drives the run,
/// filling the defaults and validating the declared targets
pub fn build_model(config: XcciConfigFile<'_>) -> Result<CiModel<'_>> {
    let build = assemble_build_model(config.build);

    if config.targets.is_empty() {
        bail!("No targets declared on the configuration");
    }

    let mut names = HashSet::with_capacity(config.targets.len());
    let mut targets = Vec::with_capacity(config.targets.len());

    for target in config.targets {
        if !names.insert(target.name.clone()) {
            bail!("Duplicated target name: {:?}", target.name);
        }
        targets.push(assemble_target_model(target, &build)?);
    }

    Ok(CiModel { build, targets })
}

fn assemble_build_model(config: Option<BuildAttribute<'_>>) -> BuildModel<'_> {
    let config = config.unwrap_or_default();

    BuildModel {
        default_workspace: config
            .default_workspace
            .unwrap_or(Cow::Borrowed(defaults::WORKSPACE)),
        configuration: config
            .configuration
            .unwrap_or(Cow::Borrowed(defaults::CONFIGURATION)),
        simulator_destination: config
            .simulator_destination
            .unwrap_or(Cow::Borrowed(defaults::SIMULATOR_DESTINATION)),
        ci_env_var: config
            .ci_env_var
            .unwrap_or(Cow::Borrowed(defaults::CI_ENV_VAR)),
        ci_env_value: config
            .ci_env_value
            .unwrap_or(Cow::Borrowed(defaults::CI_ENV_VALUE)),
        pretty_printer: config
            .pretty_printer
            .unwrap_or(Cow::Borrowed(defaults::PRETTY_PRINTER)),
    }
}

fn assemble_target_model<'a>(
    config: TargetAttribute<'a>,
    build: &BuildModel<'a>,
) -> Result<TargetModel<'a>> {
    let container = match (config.project, config.workspace) {
        (Some(project), _) => SchemeContainer::Project(project),
        (None, Some(workspace)) => SchemeContainer::Workspace(workspace),
        (None, None) => SchemeContainer::Workspace(build.default_workspace.clone()),
    };

    let coverage = CoverageThresholds {
        warn_below: validate_threshold(&config.name, "min_warn_codecov", config.min_warn_codecov)?,
        fail_below: validate_threshold(&config.name, "min_codecov", config.min_codecov)?,
    };

    if config.operations.is_empty() {
        log::warn!("Target {:?} declares no operations", config.name);
    }

    Ok(TargetModel {
        name: config.name,
        container,
        scheme: config.scheme,
        operations: config.operations,
        platform: config.platform,
        coverage,
        use_analysis_tool: config.use_sonarcube.unwrap_or_default(),
        dependencies: config.dependencies.unwrap_or_default(),
    })
}

fn validate_threshold(target: &str, key: &str, value: Option<f64>) -> Result<Option<f64>> {
    match value {
        Some(percent) if !(0.0..=100.0).contains(&percent) => {
            bail!("Target {target:?}: {key} must be a percentage between 0 and 100, found {percent}")
        }
        _ => Ok(value),
    }
}

#[cfg(test)]
mod test {
    use crate::config_file;
    use crate::domain::operation::{Operation, Platform};
    use crate::utils::constants::DEFAULT_CONFIG_FILE;

    use super::*;

    #[test]
    fn test_model_from_the_default_configuration() -> Result<()> {
        let config = config_file::xcci_cfg_from_file(DEFAULT_CONFIG_FILE)?;
        let model = build_model(config)?;

        assert_eq!(model.build.configuration, "Debug");
        assert_eq!(model.build.ci_env_var, "TRAVIS");
        assert_eq!(model.targets.len(), 6);

        let names: Vec<&str> = model.targets.iter().map(|t| t.name.as_ref()).collect();
        assert_eq!(
            names,
            vec![
                "iOS Framework",
                "iOS Test App",
                "iOS Automation Test App",
                "Sample Swift App",
                "Mac Framework",
                "Mac Test App"
            ]
        );

        let framework = &model.targets[0];
        assert_eq!(
            framework.operations,
            vec![Operation::Build, Operation::Test, Operation::Codecov]
        );
        assert_eq!(framework.coverage.warn_below, Some(70.0));
        assert_eq!(framework.coverage.fail_below, None);
        assert!(framework.use_analysis_tool);
        assert_eq!(framework.platform, Platform::Ios);

        let sample = &model.targets[3];
        assert_eq!(
            sample.container,
            SchemeContainer::Workspace("Samples/SampleSwiftApp/SampleSwiftApp.xcworkspace".into())
        );

        Ok(())
    }

    #[test]
    fn test_every_target_resolves_exactly_one_container() -> Result<()> {
        const CONFIG_FILE_MOCK: &str = r#"
            [build]
            default_workspace = 'Default.xcworkspace'

            [[targets]]
            name = 'neither'
            scheme = 'A'
            operations = [ 'build' ]
            platform = 'Mac'

            [[targets]]
            name = 'project'
            scheme = 'B'
            operations = [ 'build' ]
            platform = 'Mac'
            project = 'B.xcodeproj'

            [[targets]]
            name = 'workspace'
            scheme = 'C'
            operations = [ 'build' ]
            platform = 'Mac'
            workspace = 'C.xcworkspace'

            [[targets]]
            name = 'both'
            scheme = 'D'
            operations = [ 'build' ]
            platform = 'Mac'
            project = 'D.xcodeproj'
            workspace = 'D.xcworkspace'
        "#;

        let model = build_model(config_file::xcci_cfg_from_file(CONFIG_FILE_MOCK)?)?;
        let containers: Vec<&SchemeContainer> =
            model.targets.iter().map(|t| &t.container).collect();

        assert_eq!(
            containers,
            vec![
                &SchemeContainer::Workspace("Default.xcworkspace".into()),
                &SchemeContainer::Project("B.xcodeproj".into()),
                &SchemeContainer::Workspace("C.xcworkspace".into()),
                &SchemeContainer::Project("D.xcodeproj".into()),
            ]
        );

        Ok(())
    }

    #[test]
    fn test_duplicated_names_are_rejected() -> Result<()> {
        const CONFIG_FILE_MOCK: &str = r#"
            [[targets]]
            name = 'twice'
            scheme = 'A'
            operations = [ 'build' ]
            platform = 'iOS'

            [[targets]]
            name = 'twice'
            scheme = 'B'
            operations = [ 'test' ]
            platform = 'iOS'
        "#;

        assert!(build_model(config_file::xcci_cfg_from_file(CONFIG_FILE_MOCK)?).is_err());
        Ok(())
    }

    #[test]
    fn test_thresholds_out_of_range_are_rejected() -> Result<()> {
        const CONFIG_FILE_MOCK: &str = r#"
            [[targets]]
            name = 'greedy'
            scheme = 'A'
            operations = [ 'build', 'test', 'codecov' ]
            platform = 'iOS'
            min_codecov = 120.0
        "#;

        assert!(build_model(config_file::xcci_cfg_from_file(CONFIG_FILE_MOCK)?).is_err());
        Ok(())
    }

    #[test]
    fn test_empty_configuration_is_rejected() -> Result<()> {
        assert!(build_model(config_file::xcci_cfg_from_file("")?).is_err());
        Ok(())
    }

    #[test]
    fn test_unknown_operations_fail_to_parse() {
        const CONFIG_FILE_MOCK: &str = r#"
            [[targets]]
            name = 'archive'
            scheme = 'A'
            operations = [ 'archive' ]
            platform = 'iOS'
        "#;

        assert!(config_file::xcci_cfg_from_file(CONFIG_FILE_MOCK).is_err());
    }
}
