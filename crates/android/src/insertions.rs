//! Text injected into the root build script
//!
//! Every injected line ends with a comment carrying [`MARKER`], which is the
//! only thing the restore step looks for.

use crashlytics_core::config::DependenciesConfig;

/// Tag identifying lines owned by this hook
pub const MARKER: &str = "cordova-plugin-firebase";

/// Versions of the Gradle plugins to inject
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SdkVersions {
    /// `com.google.gms:google-services`
    pub google_services: String,
    /// `com.google.firebase:firebase-crashlytics-gradle`
    pub crashlytics_gradle: String,
}

impl Default for SdkVersions {
    fn default() -> Self {
        Self::from(&DependenciesConfig::default())
    }
}

impl From<&DependenciesConfig> for SdkVersions {
    fn from(config: &DependenciesConfig) -> Self {
        Self {
            google_services: config.google_services_version.clone(),
            crashlytics_gradle: config.crashlytics_gradle_version.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    declaration: String,
    label: &'static str,
}

/// A group of declarations inserted together after one anchor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsertionBlock {
    entries: Vec<Entry>,
}

impl InsertionBlock {
    /// Buildscript classpath entries for Google Services and Crashlytics
    pub fn dependencies(versions: &SdkVersions) -> Self {
        Self {
            entries: vec![
                Entry {
                    declaration: format!(
                        "classpath 'com.google.gms:google-services:{}'",
                        versions.google_services
                    ),
                    label: "google-services dependency",
                },
                Entry {
                    declaration: format!(
                        "classpath 'com.google.firebase:firebase-crashlytics-gradle:{}'",
                        versions.crashlytics_gradle
                    ),
                    label: "firebase crashlytics dependency",
                },
            ],
        }
    }

    /// Google's Maven repository for the allprojects section
    pub fn google_repository() -> Self {
        Self {
            entries: vec![Entry {
                declaration: "repositories { google() }".to_string(),
                label: "Google's Maven repository",
            }],
        }
    }

    /// Number of lines the block expands to
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the block is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lines prefixed with `indent` and tagged with the marker comment
    pub fn render(&self, indent: &str) -> Vec<String> {
        self.entries
            .iter()
            .map(|entry| {
                format!(
                    "{}{} // {} from {}",
                    indent, entry.declaration, entry.label, MARKER
                )
            })
            .collect()
    }
}
