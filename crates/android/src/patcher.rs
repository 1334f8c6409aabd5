//! Apply and revert the Crashlytics patch on the root `build.gradle`
//!
//! The patch adds two buildscript classpath entries after the Android Gradle
//! plugin declaration and Google's Maven repository to the allprojects
//! section. Reverting drops every line tagged with [`MARKER`].
//!
//! The file is read once and written once, after the new content has been
//! computed in full, so a failed patch never leaves a half-written file.

use crate::anchors::{BUILD_TOOLS_CLASSPATH, REPOSITORIES_REPOS, SECTION_KEYWORD};
use crate::build_gradle::GradleDocument;
use crate::insertions::{InsertionBlock, SdkVersions, MARKER};
use crashlytics_core::config::Config;
use crashlytics_core::error::{Error, Result, ResultExt};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Result of [`RootBuildGradle::modify`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatchOutcome {
    /// Lines were inserted and the file rewritten
    Applied {
        /// Number of inserted lines
        lines_added: usize,
    },
    /// Marker lines were already present; nothing written
    AlreadyApplied {
        /// Number of marker lines found
        marker_lines: usize,
    },
    /// No build script at the expected path
    MissingFile,
}

/// Result of [`RootBuildGradle::restore`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreOutcome {
    /// Marker lines were removed and the file rewritten
    Restored {
        /// Number of removed lines
        lines_removed: usize,
    },
    /// No marker lines; nothing written
    Unchanged,
    /// No build script at the expected path
    MissingFile,
}

/// Patch state of a build script on disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatchStatus {
    /// Script location
    pub path: PathBuf,
    /// Whether the script exists
    pub exists: bool,
    /// Whether any marker line is present
    pub patched: bool,
    /// Number of marker lines
    pub marker_lines: usize,
}

/// An outcome together with the content that would be written, if any
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Planned<T> {
    /// What the operation does
    pub outcome: T,
    /// New file content, `None` when nothing would be written
    pub contents: Option<String>,
}

/// Insert the classpath entries after the Android Gradle plugin line
pub fn add_dependencies(doc: &mut GradleDocument, versions: &SdkVersions) -> Result<usize> {
    let anchor = BUILD_TOOLS_CLASSPATH
        .find(doc, 0)
        .ok_or_else(|| Error::anchor_not_found(BUILD_TOOLS_CLASSPATH.name()))?;

    let lines = InsertionBlock::dependencies(versions).render(&anchor.indent);
    let added = lines.len();
    doc.insert_after(anchor.line, lines);

    Ok(added)
}

/// Insert Google's Maven repository into the allprojects repositories.
///
/// The repository anchor appears once in the buildscript block and once in
/// the allprojects block; only the second one is patched. Indentation comes
/// from the first anchor in the file.
pub fn add_repositories(doc: &mut GradleDocument) -> Result<usize> {
    let first = REPOSITORIES_REPOS
        .find(doc, 0)
        .ok_or_else(|| Error::anchor_not_found(REPOSITORIES_REPOS.name()))?;

    let occurrences = doc.occurrences(SECTION_KEYWORD);
    let target = match doc.first_line_containing(SECTION_KEYWORD) {
        None => {
            warn!(
                keyword = SECTION_KEYWORD,
                "Section keyword not found, patching first repositories anchor"
            );
            first.line
        }
        Some(_) if occurrences > 1 => {
            return Err(Error::ambiguous_section(SECTION_KEYWORD, occurrences));
        }
        Some(section_start) => {
            REPOSITORIES_REPOS
                .find(doc, section_start)
                .ok_or_else(|| {
                    Error::anchor_not_found(REPOSITORIES_REPOS.name())
                        .with_context(format!("Searching after `{}`", SECTION_KEYWORD))
                })?
                .line
        }
    };

    let lines = InsertionBlock::google_repository().render(&first.indent);
    let added = lines.len();
    doc.insert_after(target, lines);

    Ok(added)
}

/// Apply the full patch to `contents`.
///
/// No check for an earlier patch is made: applying twice duplicates every
/// inserted line.
pub fn patch_contents(contents: &str, versions: &SdkVersions) -> Result<String> {
    let mut doc = GradleDocument::parse(contents);
    add_dependencies(&mut doc, versions)?;
    add_repositories(&mut doc)?;
    Ok(doc.render())
}

/// Remove every marker line from `contents`
pub fn unpatch_contents(contents: &str) -> String {
    let mut doc = GradleDocument::parse(contents);
    doc.remove_containing(MARKER);
    doc.render()
}

/// Whether `contents` carries any marker line
pub fn is_patched(contents: &str) -> bool {
    contents.contains(MARKER)
}

/// The root `build.gradle` of an Android platform directory
#[derive(Debug, Clone)]
pub struct RootBuildGradle {
    path: PathBuf,
    versions: SdkVersions,
}

impl RootBuildGradle {
    /// Location of the script relative to the platform root
    pub const RELATIVE_PATH: &'static str = "android/build.gradle";

    /// Script under `<platform_root>/android/build.gradle`
    pub fn new(platform_root: impl AsRef<Path>) -> Self {
        Self::at(platform_root.as_ref().join(Self::RELATIVE_PATH))
    }

    /// Script at an explicit path
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            versions: SdkVersions::default(),
        }
    }

    /// Script and versions as configured for `project_root`
    pub fn from_config(config: &Config, project_root: &Path) -> Self {
        Self::at(config.build_gradle_path(project_root))
            .with_versions(SdkVersions::from(&config.schema.dependencies))
    }

    /// Override the injected plugin versions
    pub fn with_versions(mut self, versions: SdkVersions) -> Self {
        self.versions = versions;
        self
    }

    /// Script location
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the script exists
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Work out what [`modify`](Self::modify) would do without writing
    pub fn preview_modify(&self, force: bool) -> Result<Planned<PatchOutcome>> {
        if !self.exists() {
            debug!(path = %self.path.display(), "build.gradle not found, nothing to patch");
            return Ok(Planned {
                outcome: PatchOutcome::MissingFile,
                contents: None,
            });
        }

        let mut doc = GradleDocument::parse(&self.read()?);

        let marker_lines = doc.count_containing(MARKER);
        if marker_lines > 0 && !force {
            info!(
                path = %self.path.display(),
                marker_lines,
                "build.gradle already patched"
            );
            return Ok(Planned {
                outcome: PatchOutcome::AlreadyApplied { marker_lines },
                contents: None,
            });
        }

        let describe = || format!("Patching {}", self.path.display());
        let mut lines_added = add_dependencies(&mut doc, &self.versions).context(describe())?;
        lines_added += add_repositories(&mut doc).context(describe())?;

        Ok(Planned {
            outcome: PatchOutcome::Applied { lines_added },
            contents: Some(doc.render()),
        })
    }

    /// Inject the Crashlytics dependencies and repository.
    ///
    /// Does nothing when the file is missing, or when it is already patched
    /// and `force` is false.
    pub fn modify(&self, force: bool) -> Result<PatchOutcome> {
        let planned = self.preview_modify(force)?;
        if let Some(contents) = planned.contents {
            self.write(&contents)?;
            info!(path = %self.path.display(), outcome = ?planned.outcome, "Patched build.gradle");
        }
        Ok(planned.outcome)
    }

    /// Work out what [`restore`](Self::restore) would do without writing
    pub fn preview_restore(&self) -> Result<Planned<RestoreOutcome>> {
        if !self.exists() {
            debug!(path = %self.path.display(), "build.gradle not found, nothing to restore");
            return Ok(Planned {
                outcome: RestoreOutcome::MissingFile,
                contents: None,
            });
        }

        let mut doc = GradleDocument::parse(&self.read()?);
        let lines_removed = doc.remove_containing(MARKER);

        if lines_removed == 0 {
            debug!(path = %self.path.display(), "No marker lines to remove");
            return Ok(Planned {
                outcome: RestoreOutcome::Unchanged,
                contents: None,
            });
        }

        Ok(Planned {
            outcome: RestoreOutcome::Restored { lines_removed },
            contents: Some(doc.render()),
        })
    }

    /// Remove every line tagged with the marker
    pub fn restore(&self) -> Result<RestoreOutcome> {
        let planned = self.preview_restore()?;
        if let Some(contents) = planned.contents {
            self.write(&contents)?;
            info!(path = %self.path.display(), outcome = ?planned.outcome, "Restored build.gradle");
        }
        Ok(planned.outcome)
    }

    /// Report whether the script exists and carries marker lines
    pub fn status(&self) -> Result<PatchStatus> {
        let marker_lines = if self.exists() {
            GradleDocument::parse(&self.read()?).count_containing(MARKER)
        } else {
            0
        };

        Ok(PatchStatus {
            path: self.path.clone(),
            exists: self.exists(),
            patched: marker_lines > 0,
            marker_lines,
        })
    }

    fn read(&self) -> Result<String> {
        fs::read_to_string(&self.path).context(format!("Failed to read {}", self.path.display()))
    }

    fn write(&self, contents: &str) -> Result<()> {
        fs::write(&self.path, contents)
            .context(format!("Failed to write {}", self.path.display()))
    }
}
