mod cli;
mod commands;
mod output;

use anyhow::{Context, Result};
use clap::Parser;
use sca_relink::AppConfig;
use sca_relink::config::loader;
use sca_relink::logging::init_logging;
use veracode_client::{ApiCredentials, VeracodeClient};

use cli::{Cli, Commands, FileArgs};
use output::print_error;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        print_error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let mut cfg = loader::load_config(cli.config.as_deref())?;
    apply_overrides(&mut cfg, &cli);

    if matches!(cli.command, Commands::Run(_)) {
        cfg.check()?;
    }
    init_logging(&cfg.logging.level, cfg.logging.file.as_deref())?;

    match &cli.command {
        Commands::Run(_) => {
            let client = make_client(&cfg)?;
            commands::run::run(&client, &cfg).await?;
        }
        Commands::Reconcile(args) => {
            commands::reconcile::reconcile(&cfg.files, args.output.as_deref())?;
        }
        Commands::Credentials => {
            let client = make_client(&cfg)?;
            commands::credentials::show(&client).await?;
        }
        Commands::Find(args) => {
            let client = make_client(&cfg)?;
            commands::find::find(&client, &args.name).await?;
        }
    }

    Ok(())
}

/// Command-line flags win over the config file and environment.
fn apply_overrides(cfg: &mut AppConfig, cli: &Cli) {
    if let Some(level) = &cli.log_level {
        cfg.logging.level = level.clone();
    }
    if let Some(file) = &cli.log_file {
        cfg.logging.file = Some(file.clone());
    }

    let files = match &cli.command {
        Commands::Run(args) => Some(&args.files),
        Commands::Reconcile(args) => Some(&args.files),
        _ => None,
    };
    if let Some(FileArgs {
        linked_projects,
        legacy_apps,
    }) = files
    {
        if let Some(path) = linked_projects {
            cfg.files.linked_projects = path.clone();
        }
        if let Some(path) = legacy_apps {
            cfg.files.legacy_apps = path.clone();
        }
    }

    if let Commands::Run(args) = &cli.command {
        if let Some(action) = args.action {
            cfg.run.action = action;
        }
        if let Some(account_id) = &args.account_id {
            cfg.run.account_id = account_id.clone();
        }
        if let Some(live) = args.live_override() {
            cfg.run.live = live;
        }
        cfg.run.assume_yes |= args.yes;
    }
}

fn make_client(cfg: &AppConfig) -> Result<VeracodeClient> {
    let creds = ApiCredentials::load().context("Cannot load Veracode API credentials")?;
    let client = match &cfg.api.base_url {
        Some(url) => VeracodeClient::with_base_url(url, creds, cfg.timeout())?,
        None => VeracodeClient::new(creds, cfg.timeout())?,
    };
    Ok(client)
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use sca_relink::Action;

    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("sca-relink").chain(args.iter().copied()))
            .expect("arguments parse")
    }

    fn file_config() -> AppConfig {
        let mut cfg = AppConfig::default();
        cfg.run.action = Action::Link;
        cfg.run.live = true;
        cfg.run.account_id = "11111".into();
        cfg.logging.level = "warn".into();
        cfg
    }

    #[test]
    fn flags_override_file_and_env_values() {
        let mut cfg = file_config();
        let cli = parse(&[
            "--log-level",
            "debug",
            "run",
            "--action",
            "unlink",
            "--account-id",
            "00000",
            "--legacy-apps",
            "inventory.csv",
            "--yes",
        ]);
        apply_overrides(&mut cfg, &cli);

        assert_eq!(cfg.run.action, Action::Unlink);
        assert_eq!(cfg.run.account_id, "00000");
        assert_eq!(cfg.files.legacy_apps, Path::new("inventory.csv"));
        assert_eq!(cfg.files.linked_projects, Path::new("linked_projects.csv"));
        assert_eq!(cfg.logging.level, "debug");
        assert!(cfg.run.assume_yes);
        assert!(cfg.run.live, "live is kept when no mode flag is given");
    }

    #[test]
    fn trial_flag_turns_off_configured_live_mode() {
        let mut cfg = file_config();
        apply_overrides(&mut cfg, &parse(&["run", "--trial"]));
        assert!(!cfg.run.live);

        let mut cfg = AppConfig::default();
        apply_overrides(&mut cfg, &parse(&["run", "--live"]));
        assert!(cfg.run.live);
    }

    #[test]
    fn live_and_trial_conflict() {
        let result = Cli::try_parse_from(["sca-relink", "run", "--live", "--trial"]);
        assert!(result.is_err());
    }

    #[test]
    fn run_flags_do_not_touch_other_commands() {
        let mut cfg = file_config();
        apply_overrides(&mut cfg, &parse(&["reconcile", "--linked-projects", "x.csv"]));
        assert_eq!(cfg.files.linked_projects, Path::new("x.csv"));
        assert_eq!(cfg.run.action, Action::Link);
        assert!(cfg.run.live);
    }
}
