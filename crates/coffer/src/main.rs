// SPDX-FileCopyrightText: 2026 Coffer Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Coffer - settings with encrypted credentials.
//!
//! This is the binary entry point.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use coffer_config::CofferConfig;

/// Coffer - settings with encrypted credentials.
#[derive(Parser, Debug)]
#[command(name = "coffer", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the XDG hierarchy.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Treat credentials that cannot be decrypted as lost and continue
    /// with an empty set instead of failing.
    #[arg(long, global = true)]
    discard_unreadable: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the current settings as JSON.
    Show {
        /// Prompt for the passphrase and include (masked) credentials.
        #[arg(long)]
        unlock: bool,
    },
    /// Change editor preferences.
    Set(SetArgs),
    /// Manage registered repositories.
    Repo {
        #[command(subcommand)]
        action: RepoCommands,
    },
    /// Manage per-host auth tokens (requires the passphrase).
    Token {
        #[command(subcommand)]
        action: TokenCommands,
    },
    /// Erase all settings, credentials, and the installation salt.
    Reset {
        /// Confirm the reset. Nothing is erased without it.
        #[arg(long)]
        yes: bool,
    },
}

#[derive(clap::Args, Debug, Default)]
struct SetArgs {
    #[arg(long)]
    font_size: Option<u32>,
    #[arg(long)]
    theme: Option<String>,
    #[arg(long)]
    tab_size: Option<u32>,
    #[arg(long)]
    line_numbers: Option<bool>,
    #[arg(long)]
    word_wrap: Option<bool>,
}

#[derive(Subcommand, Debug)]
enum RepoCommands {
    /// Register a repository.
    Add {
        path: String,
        /// Display name (defaults to the last path component).
        #[arg(long)]
        name: Option<String>,
    },
    /// Unregister a repository by path.
    Remove { path: String },
}

#[derive(Subcommand, Debug)]
enum TokenCommands {
    /// Store or replace the token for a host.
    Set { host: String, token: String },
    /// Forget the token for a host.
    Remove { host: String },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(errors) => {
            coffer_config::render_errors(&errors);
            std::process::exit(2);
        }
    };

    init_tracing(&config.logging.level);

    if let Err(e) = commands::run(cli.command, &config, cli.discard_unreadable).await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn load_config(
    path: Option<&std::path::Path>,
) -> Result<CofferConfig, Vec<coffer_config::ConfigError>> {
    match path {
        Some(path) => coffer_config::load_and_validate_path(path),
        None => coffer_config::load_and_validate(),
    }
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("coffer={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn set_flags_parse() {
        let cli = Cli::try_parse_from(["coffer", "set", "--font-size", "12", "--word-wrap", "true"])
            .unwrap();
        match cli.command {
            Commands::Set(args) => {
                assert_eq!(args.font_size, Some(12));
                assert_eq!(args.word_wrap, Some(true));
                assert!(args.theme.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn discard_flag_is_accepted_after_the_subcommand() {
        let cli = Cli::try_parse_from([
            "coffer",
            "token",
            "set",
            "github.com",
            "ghp_x",
            "--discard-unreadable",
        ])
        .unwrap();
        assert!(cli.discard_unreadable);
    }

    #[test]
    fn token_set_takes_host_and_token() {
        let cli = Cli::try_parse_from(["coffer", "token", "set", "github.com", "ghp_x"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Token {
                action: TokenCommands::Set { .. }
            }
        ));
    }
}
