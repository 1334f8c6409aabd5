//! Configuration schema definitions

use crate::error::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static VERSION_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9A-Za-z.+-]+$").unwrap());

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigSchema {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub android: AndroidConfig,

    #[serde(default)]
    pub dependencies: DependenciesConfig,
}

impl ConfigSchema {
    /// Check values that serde cannot constrain on its own
    pub fn validate(&self) -> Result<()> {
        for (key, value) in [
            (
                "dependencies.google_services_version",
                &self.dependencies.google_services_version,
            ),
            (
                "dependencies.crashlytics_gradle_version",
                &self.dependencies.crashlytics_gradle_version,
            ),
        ] {
            if !VERSION_PATTERN.is_match(value) {
                return Err(Error::invalid_config_value(key, value)
                    .with_suggestion("Use a plain Maven version such as 4.3.3"));
            }
        }

        if self.general.platform_dir.trim().is_empty() {
            return Err(Error::invalid_config_value(
                "general.platform_dir",
                &self.general.platform_dir,
            ));
        }

        if self.android.build_gradle.trim().is_empty() {
            return Err(Error::invalid_config_value(
                "android.build_gradle",
                &self.android.build_gradle,
            ));
        }

        Ok(())
    }
}

/// General project configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Directory holding generated platforms, relative to the project root
    #[serde(default = "default_platform_dir")]
    pub platform_dir: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            platform_dir: default_platform_dir(),
        }
    }
}

fn default_platform_dir() -> String {
    "platforms".to_string()
}

/// Android platform configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AndroidConfig {
    /// Root build script, relative to the platform directory
    #[serde(default = "default_build_gradle")]
    pub build_gradle: String,
}

impl Default for AndroidConfig {
    fn default() -> Self {
        Self {
            build_gradle: default_build_gradle(),
        }
    }
}

fn default_build_gradle() -> String {
    "android/build.gradle".to_string()
}

/// Versions of the injected Gradle plugins
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DependenciesConfig {
    #[serde(default = "default_google_services_version")]
    pub google_services_version: String,

    #[serde(default = "default_crashlytics_gradle_version")]
    pub crashlytics_gradle_version: String,
}

impl Default for DependenciesConfig {
    fn default() -> Self {
        Self {
            google_services_version: default_google_services_version(),
            crashlytics_gradle_version: default_crashlytics_gradle_version(),
        }
    }
}

fn default_google_services_version() -> String {
    "4.3.3".to_string()
}

fn default_crashlytics_gradle_version() -> String {
    "2.3.0".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let schema = ConfigSchema::default();
        assert!(schema.validate().is_ok());
        assert_eq!(schema.general.platform_dir, "platforms");
        assert_eq!(schema.android.build_gradle, "android/build.gradle");
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let schema: ConfigSchema = toml::from_str(
            r#"
            [dependencies]
            google_services_version = "4.3.10"
            "#,
        )
        .unwrap();

        assert_eq!(schema.dependencies.google_services_version, "4.3.10");
        assert_eq!(schema.dependencies.crashlytics_gradle_version, "2.3.0");
        assert_eq!(schema.general.platform_dir, "platforms");
    }

    #[test]
    fn test_rejects_quoted_version() {
        let mut schema = ConfigSchema::default();
        schema.dependencies.crashlytics_gradle_version = "2.3.0'".to_string();

        let err = schema.validate().unwrap_err();
        assert_eq!(err.code, crate::ErrorCode::InvalidConfigValue);
    }

    #[test]
    fn test_rejects_empty_platform_dir() {
        let mut schema = ConfigSchema::default();
        schema.general.platform_dir = "  ".to_string();
        assert!(schema.validate().is_err());
    }
}
