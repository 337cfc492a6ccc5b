pub mod commands;
pub mod host;
pub mod terminal;
pub mod utils;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::config::{config, FailurePolicy};
use host::PageHost;

#[derive(Parser)]
#[command(name = "gallery")]
#[command(about = "Gallery page controller - load a page and trigger its actions against the backend")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[arg(long, global = true, value_name = "FILE", help = "Page context JSON file rendered by the server")]
    pub context: Option<PathBuf>,

    #[arg(
        long = "set",
        global = true,
        value_name = "KEY=VALUE",
        value_parser = parse_key_value,
        help = "Set a page context key (repeatable, overrides --context)"
    )]
    pub set: Vec<(String, String)>,

    #[arg(long, global = true, help = "Base URL that relative endpoint URLs resolve against")]
    pub base_url: Option<String>,

    #[arg(long, global = true, help = "Answer yes to confirmation prompts")]
    pub yes: bool,

    #[arg(long, global = true, help = "Failure handling for unchecked actions: faithful or unified")]
    pub failure_policy: Option<FailurePolicy>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Page load and inspection")]
    Page {
        #[command(subcommand)]
        cmd: commands::page::PageCommands,
    },

    #[command(about = "Actions on the current image")]
    Image {
        #[command(subcommand)]
        cmd: commands::image::ImageCommands,
    },

    #[command(about = "Login, registration and account actions")]
    Auth {
        #[command(subcommand)]
        cmd: commands::auth::AuthCommands,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", raw))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty key in '{}'", raw));
    }
    Ok((key.to_string(), value.to_string()))
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let host = PageHost::from_cli(&cli, config())?;

    match cli.command {
        Commands::Page { cmd } => commands::page::handle(cmd, &host, output_format).await,
        Commands::Image { cmd } => commands::image::handle(cmd, &host, output_format).await,
        Commands::Auth { cmd } => commands::auth::handle(cmd, &host, output_format).await,
    }
}
