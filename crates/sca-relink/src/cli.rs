use std::path::PathBuf;

use clap::{Parser, Subcommand};
use sca_relink::Action;

#[derive(Parser)]
#[command(name = "sca-relink")]
#[command(about = "Link or unlink SCA projects on application profiles found through a legacy inventory")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file (defaults to ./sca-relink.toml when present)
    #[arg(short, long, global = true, env = "SCA_RELINK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log level (overrides logging.level)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Append-mode log file (overrides logging.file)
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Reconcile both files, then link or unlink each matched project
    Run(RunArgs),
    /// Reconcile both files and show or save the matched records
    Reconcile(ReconcileArgs),
    /// Show the API credentials in use and when they expire
    Credentials,
    /// Search application profiles by name
    Find(FindArgs),
}

#[derive(clap::Args)]
pub struct FileArgs {
    /// Linked-projects CSV (app_name, project_guid, project_name)
    #[arg(long)]
    pub linked_projects: Option<PathBuf>,
    /// Legacy inventory CSV (APP_NAME, APP_ID, ACCOUNT_ID)
    #[arg(long)]
    pub legacy_apps: Option<PathBuf>,
}

#[derive(clap::Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub files: FileArgs,
    /// Action applied to every matched project
    #[arg(long)]
    pub action: Option<Action>,
    /// Issue the link/unlink calls
    #[arg(long, conflicts_with = "trial")]
    pub live: bool,
    /// Report what would be done without calling the API
    #[arg(long)]
    pub trial: bool,
    /// Account that must own the legacy application
    #[arg(long)]
    pub account_id: Option<String>,
    /// Do not prompt; behave as if the first answer were "x"
    #[arg(short, long)]
    pub yes: bool,
}

impl RunArgs {
    /// `None` when neither `--live` nor `--trial` was given.
    pub fn live_override(&self) -> Option<bool> {
        match (self.live, self.trial) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

#[derive(clap::Args)]
pub struct ReconcileArgs {
    #[command(flatten)]
    pub files: FileArgs,
    /// Write matched records to this CSV instead of printing them
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(clap::Args)]
pub struct FindArgs {
    /// Application name (partial matches are returned)
    pub name: String,
}
