//! Entry points called by the packaging tool at its hook stages
//!
//! `modify_root_build_gradle` runs before the Android build, and
//! `restore_root_build_gradle` runs when the platform is cleaned up.

use crate::patcher::{PatchOutcome, RestoreOutcome, RootBuildGradle};
use crashlytics_core::config::Config;
use crashlytics_core::error::Result;
use std::path::PathBuf;
use tracing::info;

/// Details the calling tool passes along with a hook invocation
#[derive(Debug, Clone, Default)]
pub struct HookContext {
    /// Hook stage name, e.g. `after_prepare`
    pub hook: String,
    /// Project root the tool runs in
    pub project_root: PathBuf,
}

impl HookContext {
    /// Context for `hook` running in `project_root`
    pub fn new(hook: impl Into<String>, project_root: impl Into<PathBuf>) -> Self {
        Self {
            hook: hook.into(),
            project_root: project_root.into(),
        }
    }
}

/// Patch the configured root `build.gradle` unless it is already patched
pub fn modify_root_build_gradle(config: &Config, context: &HookContext) -> Result<PatchOutcome> {
    let gradle = RootBuildGradle::from_config(config, &context.project_root);
    info!(
        hook = %context.hook,
        path = %gradle.path().display(),
        "Injecting Crashlytics dependencies"
    );
    gradle.modify(false)
}

/// Remove the lines added by [`modify_root_build_gradle`]
pub fn restore_root_build_gradle(config: &Config, context: &HookContext) -> Result<RestoreOutcome> {
    let gradle = RootBuildGradle::from_config(config, &context.project_root);
    info!(
        hook = %context.hook,
        path = %gradle.path().display(),
        "Removing Crashlytics dependencies"
    );
    gradle.restore()
}
