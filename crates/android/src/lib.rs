//! Android build script patching for the Crashlytics hooks
//!
//! This crate edits the root `build.gradle` generated for the Android
//! platform:
//! - Line-oriented document model that round-trips untouched text
//! - Anchor patterns for the insertion points
//! - Marker-tagged insertion blocks
//! - Apply, revert, status and preview operations
//!
//! # Example
//!
//! ```rust,no_run
//! use crashlytics_android::patcher::{PatchOutcome, RootBuildGradle};
//!
//! let gradle = RootBuildGradle::new("platforms");
//! match gradle.modify(false)? {
//!     PatchOutcome::Applied { lines_added } => println!("added {} lines", lines_added),
//!     PatchOutcome::AlreadyApplied { .. } => println!("already patched"),
//!     PatchOutcome::MissingFile => println!("no Android platform"),
//! }
//! # Ok::<(), crashlytics_core::Error>(())
//! ```

#![warn(missing_docs)]

pub mod anchors;
pub mod build_gradle;
pub mod hook;
pub mod insertions;
pub mod patcher;

pub use hook::{modify_root_build_gradle, restore_root_build_gradle, HookContext};
pub use insertions::{SdkVersions, MARKER};
pub use patcher::{PatchOutcome, PatchStatus, RestoreOutcome, RootBuildGradle};
