//! Core utilities for the Crashlytics build hooks
//!
//! This crate provides shared functionality used by the platform crates and
//! the CLI:
//!
//! - **Error handling**: errors with codes, context, and recovery suggestions
//! - **Configuration**: TOML-based configuration with validation
//!
//! # Example
//!
//! ```rust,no_run
//! use crashlytics_core::config::Config;
//! use std::path::Path;
//!
//! let root = Path::new(".");
//! let config = Config::load(None, root).expect("invalid configuration");
//! println!("{}", config.build_gradle_path(root).display());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;

pub use error::{Error, ErrorCode, Result, ResultExt};
