//! Constant value definitions to use across the whole program

/// The external programs driven by `xcci`
pub mod tools {
    pub const XCODEBUILD: &str = "xcodebuild";
    pub const LLVM_COV_REPORT: &str = "xcrun llvm-cov report";
    pub const ANALYSIS_BUILD_WRAPPER: &str = "build-wrapper-macosx-x86";
    pub const SHELL: &str = "bash";
}

/// Fixed pieces of the generated `xcodebuild` command lines
pub mod xcodebuild {
    pub const SHOW_BUILD_SETTINGS: &str = "-showBuildSettings";
    pub const ENABLE_CODE_COVERAGE: &str = "-enableCodeCoverage YES";
    pub const IOS_SIMULATOR_SDK: &str = "-sdk iphonesimulator";
    pub const DISABLE_CODE_SIGNING: &str = "CODE_SIGN_IDENTITY=\"\" CODE_SIGNING_REQUIRED=NO";
}

/// Keys looked up on the map returned by `xcodebuild -showBuildSettings`
pub mod settings_keys {
    pub const OBJROOT: &str = "OBJROOT";
    pub const EXECUTABLE_PATH: &str = "EXECUTABLE_PATH";
    pub const CONFIGURATION: &str = "CONFIGURATION";
    pub const EFFECTIVE_PLATFORM_NAME: &str = "EFFECTIVE_PLATFORM_NAME";
}

/// Names of the directories handled by `xcci`, not their paths
pub mod dir_names {
    pub const INTERMEDIATES_SUFFIX: &str = "/Build/Intermediates";
    /// Appended by Xcode 9 and later to the intermediates root, but the coverage
    /// data still lives next to the un-suffixed path
    pub const NOINDEX_SUFFIX: &str = ".noindex";
    pub const CODE_COVERAGE: &str = "CodeCoverage";
    pub const PRODUCTS: &str = "Products";
    pub const SONAR: &str = ".sonar";
    pub const BUILD_WRAPPER_OUTPUT: &str = "build-wrapper-output";
}

pub mod coverage {
    pub const PROFILE_DATA: &str = "Coverage.profdata";
    pub const ARCH: &str = "x86_64";
    /// Zero based index of the percentage column on the report summary row
    pub const SUMMARY_PERCENT_FIELD: usize = 3;
}

pub mod defaults {
    pub const WORKSPACE: &str = "OIDC.xcworkspace";
    pub const CONFIGURATION: &str = "Debug";
    pub const SIMULATOR_DESTINATION: &str = "platform=iOS Simulator,name=iPhone 6,OS=latest";
    pub const CI_ENV_VAR: &str = "TRAVIS";
    pub const CI_ENV_VALUE: &str = "true";
    pub const PRETTY_PRINTER: &str = "xcpretty";
}

pub mod error_messages {
    pub const READ_CFG_FILE: &str = "Could not read the configuration file";
    pub const PARSE_CFG_FILE: &str = "Could not parse the configuration file";
    pub const BUILD_MODEL: &str = "Error building the targets model from the configuration";
    pub const SETTINGS_QUERY_FAILED: &str = "The build settings query exited with a failure status";
    pub const MISSING_SETTING: &str = "Missing required build setting";
    pub const CLEANING_DERIVED_DATA: &str = "Failed to clean the derived data directories";
    pub const EMPTY_COVERAGE_REPORT: &str = "The coverage report produced no summary row";
    pub const SHORT_COVERAGE_SUMMARY: &str =
        "The coverage summary row has fewer fields than expected";
    pub const UNPARSABLE_COVERAGE: &str = "Unable to parse the coverage percentage";
    pub const MAX_VERBOSITY: &str = "xcci maximum allowed verbosity level is: '-v'";
}

/// The target table used when no configuration file is given on the command line
pub const DEFAULT_CONFIG_FILE: &str = r#"
[build]
default_workspace = 'OIDC.xcworkspace'
configuration = 'Debug'

[[targets]]
name = 'iOS Framework'
scheme = 'OIDC'
operations = [ 'build', 'test', 'codecov' ]
min_warn_codecov = 70.0
platform = 'iOS'
use_sonarcube = true

[[targets]]
name = 'iOS Test App'
scheme = 'MyTestiOSApp'
operations = [ 'build' ]
platform = 'iOS'

[[targets]]
name = 'iOS Automation Test App'
scheme = 'OIDCAutomation'
operations = [ 'build' ]
platform = 'iOS'

[[targets]]
name = 'Sample Swift App'
scheme = 'SampleSwiftApp'
operations = [ 'build' ]
platform = 'iOS'
workspace = 'Samples/SampleSwiftApp/SampleSwiftApp.xcworkspace'

[[targets]]
name = 'Mac Framework'
scheme = 'OIDC Mac'
operations = [ 'build', 'test', 'codecov' ]
min_warn_codecov = 70.0
platform = 'Mac'

[[targets]]
name = 'Mac Test App'
scheme = 'MyTestMacOSApp'
operations = [ 'build' ]
platform = 'Mac'
"#;
