//! Scorpion CLI
//!
//! - `scorpion theme` reads and changes the persisted theme
//! - `scorpion simulate` replays navigation against the headless host
//! - `scorpion config` writes and prints `scorpion.toml`

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use scorpion_cli::{open_store, DarkAction, Scenario, SiteConfig, Step, ThemeReport};
use scorpion_theme::ThemeName;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Theme and navigation tooling for Scorpion UI
#[derive(Parser, Debug)]
#[command(name = "scorpion")]
#[command(about = "Theme and navigation tooling for Scorpion UI")]
#[command(version)]
struct Cli {
    /// Config file
    #[arg(short, long, global = true, default_value = scorpion_cli::CONFIG_FILE)]
    config: PathBuf,

    /// Log more (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Read or change the persisted theme
    Theme {
        #[command(subcommand)]
        action: ThemeCommand,
    },

    /// Replay navigation headlessly and print layout snapshots as JSON
    Simulate {
        /// Viewport width in CSS pixels
        #[arg(long, default_value = "1280")]
        width: f64,

        /// Initial URL
        #[arg(long, default_value = "/")]
        start: String,

        /// Navigation as <url>@<ms after mount>, repeatable
        #[arg(long = "step")]
        steps: Vec<Step>,

        /// Milliseconds each page takes to become ready
        #[arg(long, default_value = "0")]
        ready_after: u64,

        /// Theme to start in
        #[arg(long, default_value = "retro")]
        theme: String,

        /// Start with the retro dark flag set
        #[arg(long)]
        dark: bool,
    },

    /// Manage scorpion.toml
    Config {
        #[command(subcommand)]
        action: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ThemeCommand {
    /// Print the persisted theme
    Show,
    /// Select a theme (modern or retro)
    Set { name: String },
    /// Switch between modern and retro
    Toggle,
    /// Change the retro dark flag
    Dark {
        #[arg(value_enum)]
        action: DarkAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Print the effective configuration
    Show,
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = SiteConfig::load(&cli.config)?;

    match cli.command {
        Command::Theme { action } => {
            let storage_path = config.storage_path(&cli.config);
            let store = open_store(&config, &storage_path)?;
            match action {
                ThemeCommand::Show => {}
                ThemeCommand::Set { name } => {
                    let name: ThemeName = name.parse().context("Invalid theme")?;
                    store.set_theme(name);
                }
                ThemeCommand::Toggle => store.toggle_theme(),
                ThemeCommand::Dark { action } => action.apply(&store),
            }
            println!("{}", serde_json::to_string_pretty(&ThemeReport::of(&store))?);
        }

        Command::Simulate {
            width,
            start,
            steps,
            ready_after,
            theme,
            dark,
        } => {
            let scenario = Scenario {
                width,
                start,
                theme: theme.parse().context("Invalid theme")?,
                retro_dark: dark,
                steps,
                ready_after: Duration::from_millis(ready_after),
                ..Scenario::default()
            };
            let snapshots = scenario.run(&config);
            println!("{}", serde_json::to_string_pretty(&snapshots)?);
        }

        Command::Config { action } => match action {
            ConfigCommand::Init { force } => {
                SiteConfig::default().write(&cli.config, force)?;
                info!("Wrote {}", cli.config.display());
            }
            ConfigCommand::Show => print!("{}", config.to_toml()?),
        },
    }

    Ok(())
}
