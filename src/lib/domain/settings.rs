//! The build settings reported by `xcodebuild -showBuildSettings`

use std::collections::HashMap;

use color_eyre::{eyre::eyre, Result};

use crate::utils::constants::error_messages;

/// Separator between a setting key and its value on the settings dump
const SEPARATOR: &str = " = ";

/// Key-value view of the settings dump of a target. Both sides are trimmed
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BuildSettings(HashMap<String, String>);

impl BuildSettings {
    /// Parses the line oriented `key = value` text printed by the build tool.
    /// The key ends at the first separator and the value at the next one, if any.
    /// Lines without a separator are skipped
    pub fn parse(dump: &str) -> Self {
        let settings = dump
            .lines()
            .filter_map(|line| {
                let mut fields = line.split(SEPARATOR);
                let key = fields.next()?;
                let value = fields.next()?;
                Some((key.trim().to_string(), value.trim().to_string()))
            })
            .collect();

        Self(settings)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Like [`BuildSettings::get`], but a missing key is an error
    pub fn require(&self, key: &str) -> Result<&str> {
        self.get(key)
            .ok_or_else(|| eyre!("{}: {key}", error_messages::MISSING_SETTING))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for BuildSettings {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SETTINGS_DUMP: &str = r#"
Build settings for action build and target OIDC:
    ACTION = build
    CONFIGURATION = Debug
    EXECUTABLE_PATH = OIDC.framework/OIDC
    OBJROOT = /Users/ci/Library/Developer/Xcode/DerivedData/OIDC-abc/Build/Intermediates.noindex
    OTHER_LDFLAGS = -framework = Foundation
    SDKROOT=/no/spaces/around/the/separator
"#;

    #[test]
    fn test_parse_settings_dump() {
        let settings = BuildSettings::parse(SETTINGS_DUMP);

        assert_eq!(settings.len(), 5);
        assert_eq!(settings.get("CONFIGURATION"), Some("Debug"));
        assert_eq!(settings.get("EXECUTABLE_PATH"), Some("OIDC.framework/OIDC"));
        assert_eq!(
            settings.get("OBJROOT"),
            Some("/Users/ci/Library/Developer/Xcode/DerivedData/OIDC-abc/Build/Intermediates.noindex")
        );
        // A second separator ends the value
        assert_eq!(settings.get("OTHER_LDFLAGS"), Some("-framework"));
        assert!(settings.get("SDKROOT").is_none());
        assert!(settings.get("Build settings for action build and target OIDC:").is_none());
    }

    #[test]
    fn test_value_ends_at_the_next_separator() {
        let settings = BuildSettings::parse("    OTHER_LDFLAGS = -framework = Foundation\n");
        assert_eq!(settings.get("OTHER_LDFLAGS"), Some("-framework"));
    }

    #[test]
    fn test_parse_is_idempotent() {
        assert_eq!(
            BuildSettings::parse(SETTINGS_DUMP),
            BuildSettings::parse(SETTINGS_DUMP)
        );
    }

    #[test]
    fn test_lines_without_separator_contribute_nothing() {
        let settings = BuildSettings::parse("no separator here\n\n   \nKEY=VALUE");
        assert!(settings.is_empty());
    }

    #[test]
    fn test_require_missing_key() {
        let settings = BuildSettings::parse("    OBJROOT = /tmp/objroot");
        assert_eq!(settings.require("OBJROOT").ok(), Some("/tmp/objroot"));
        assert!(settings.require("EXECUTABLE_PATH").is_err());
    }
}
