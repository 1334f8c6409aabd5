//! Crashlytics Android hook CLI
//!
//! Injects Firebase Crashlytics dependencies into the generated Android root
//! `build.gradle` before a build, and removes them again on clean-up.

use anyhow::Result;
use clap::{Parser, Subcommand};
use crashlytics_android::patcher::{PatchOutcome, RestoreOutcome, RootBuildGradle};
use crashlytics_android::{modify_root_build_gradle, restore_root_build_gradle, HookContext};
use crashlytics_cli::output::{format_count, format_flag, Status};
use crashlytics_core::config::Config;
use crashlytics_core::error::{exit_codes, Error};
use crashlytics_telemetry::{TelemetryConfig, Timer};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "crashlytics-android")]
#[command(about = "Inject Firebase Crashlytics into the Android root build.gradle")]
#[command(version)]
struct Cli {
    /// Project root containing the platforms directory
    #[arg(long, global = true, default_value = ".")]
    project_root: PathBuf,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Hook stage reported by the calling tool
    #[arg(long, global = true, env = "CORDOVA_HOOK", default_value = "manual")]
    hook: String,

    /// Increase output verbosity
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add the Crashlytics dependencies and Google repository
    Modify {
        /// Patch even if marker lines are already present
        #[arg(long)]
        force: bool,
        /// Print the patched file instead of writing it
        #[arg(long)]
        dry_run: bool,
    },

    /// Remove every line added by `modify`
    Restore {
        /// Print the restored file instead of writing it
        #[arg(long)]
        dry_run: bool,
    },

    /// Show whether build.gradle is patched
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        owo_colors::set_override(false);
    }

    crashlytics_telemetry::init_with_config(TelemetryConfig::from_verbosity(
        cli.quiet,
        cli.verbose,
    ))?;

    let config = match Config::load(cli.config.as_deref(), &cli.project_root) {
        Ok(config) => config,
        Err(e) => std::process::exit(report_error(&e)),
    };

    let context = HookContext::new(cli.hook.clone(), cli.project_root.clone());

    let exit_code = match cli.command {
        Commands::Modify { force, dry_run } => {
            run_modify(&config, &context, force, dry_run, cli.quiet)
        }
        Commands::Restore { dry_run } => run_restore(&config, &context, dry_run, cli.quiet),
        Commands::Status { json } => run_status(&config, &context, json),
    };

    std::process::exit(exit_code);
}

fn run_modify(
    config: &Config,
    context: &HookContext,
    force: bool,
    dry_run: bool,
    quiet: bool,
) -> i32 {
    let timer = Timer::start("modify");
    let gradle = RootBuildGradle::from_config(config, &context.project_root);

    let result = if dry_run {
        gradle.preview_modify(force).map(|planned| {
            if let Some(contents) = &planned.contents {
                print!("{}", contents);
            }
            planned.outcome
        })
    } else if force {
        gradle.modify(true)
    } else {
        modify_root_build_gradle(config, context)
    };
    timer.stop();

    match result {
        Ok(outcome) => {
            if !quiet && !dry_run {
                report_modify(&gradle, outcome);
            }
            exit_codes::SUCCESS
        }
        Err(e) => report_error(&e),
    }
}

fn report_modify(gradle: &RootBuildGradle, outcome: PatchOutcome) {
    let path = gradle.path().display();
    match outcome {
        PatchOutcome::Applied { lines_added } => Status::success(&format!(
            "Patched {} ({} added)",
            path,
            format_count(lines_added, "line", "lines")
        )),
        PatchOutcome::AlreadyApplied { marker_lines } => Status::info(&format!(
            "{} already patched ({} present), use --force to patch again",
            path,
            format_count(marker_lines, "marker line", "marker lines")
        )),
        PatchOutcome::MissingFile => {
            Status::warning(&format!("{} not found, nothing to patch", path))
        }
    }
}

fn run_restore(config: &Config, context: &HookContext, dry_run: bool, quiet: bool) -> i32 {
    let timer = Timer::start("restore");
    let gradle = RootBuildGradle::from_config(config, &context.project_root);

    let result = if dry_run {
        gradle.preview_restore().map(|planned| {
            if let Some(contents) = &planned.contents {
                print!("{}", contents);
            }
            planned.outcome
        })
    } else {
        restore_root_build_gradle(config, context)
    };
    timer.stop();

    match result {
        Ok(outcome) => {
            if !quiet && !dry_run {
                report_restore(&gradle, outcome);
            }
            exit_codes::SUCCESS
        }
        Err(e) => report_error(&e),
    }
}

fn report_restore(gradle: &RootBuildGradle, outcome: RestoreOutcome) {
    let path = gradle.path().display();
    match outcome {
        RestoreOutcome::Restored { lines_removed } => Status::success(&format!(
            "Restored {} ({} removed)",
            path,
            format_count(lines_removed, "line", "lines")
        )),
        RestoreOutcome::Unchanged => Status::info(&format!("{} has no patched lines", path)),
        RestoreOutcome::MissingFile => {
            Status::warning(&format!("{} not found, nothing to restore", path))
        }
    }
}

fn run_status(config: &Config, context: &HookContext, json: bool) -> i32 {
    let gradle = RootBuildGradle::from_config(config, &context.project_root);

    let status = match gradle.status() {
        Ok(status) => status,
        Err(e) if json => {
            if let Ok(report) = serde_json::to_string_pretty(&e.to_report()) {
                eprintln!("{}", report);
            }
            return e.code.exit_code();
        }
        Err(e) => return report_error(&e),
    };

    if json {
        match serde_json::to_string_pretty(&status) {
            Ok(out) => println!("{}", out),
            Err(e) => return report_error(&Error::from(e)),
        }
        return exit_codes::SUCCESS;
    }

    Status::header("Crashlytics build.gradle status");
    Status::field("Path", &status.path.display().to_string());
    Status::field("Exists", &format_flag(status.exists));
    Status::field("Patched", &format_flag(status.patched));
    Status::field("Marker", &format_count(status.marker_lines, "line", "lines"));

    exit_codes::SUCCESS
}

fn report_error(err: &Error) -> i32 {
    tracing::debug!(code = %err.code, category = err.code.category(), "Command failed");
    Status::error(&err.to_string());
    err.code.exit_code()
}
