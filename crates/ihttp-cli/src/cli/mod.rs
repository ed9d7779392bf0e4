//! CLI for the ihttp client.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use ihttp_core::config;
use ihttp_core::Method;
use std::path::Path;

use commands::{run_parse, run_send, run_url};

/// Top-level CLI for the ihttp client.
#[derive(Debug, Parser)]
#[command(name = "ihttp")]
#[command(about = "ihttp: send an HTTP request and inspect the parsed response", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Send one request and print the response body.
    Send(SendArgs),

    /// Parse a captured raw response (headers + body) from a file.
    Parse {
        /// Path to the raw response file.
        path: String,

        /// Print the parsed response as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show how a URL decomposes into protocol, host and URI.
    Url {
        /// URL to decompose.
        url: String,
    },
}

#[derive(Debug, Args)]
pub struct SendArgs {
    /// HTTP/HTTPS URL to request.
    pub url: String,

    /// Request method: GET, POST, PUT or HEAD.
    #[arg(short = 'X', long, default_value = "GET", value_name = "METHOD")]
    pub method: Method,

    /// Extra request header, repeatable.
    #[arg(short = 'H', long = "header", value_name = "NAME: VALUE")]
    pub headers: Vec<String>,

    /// Form field to post, repeatable.
    #[arg(short = 'd', long = "data", value_name = "KEY=VALUE")]
    pub data: Vec<String>,

    /// User-Agent header (overrides config).
    #[arg(short = 'A', long, value_name = "AGENT")]
    pub user_agent: Option<String>,

    /// Skip TLS peer verification even if config enables it.
    #[arg(short = 'k', long, conflicts_with = "verify_peer")]
    pub insecure: bool,

    /// Verify the TLS peer even if config disables it.
    #[arg(long)]
    pub verify_peer: bool,

    /// Print status line and headers before the body.
    #[arg(short = 'i', long)]
    pub include: bool,

    /// Print the parsed response as JSON.
    #[arg(long, conflicts_with = "include")]
    pub json: bool,
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Send(args) => {
                let cfg = config::load_or_init()?;
                tracing::debug!("loaded config: {:?}", cfg);
                run_send(&cfg, &args)?;
            }
            CliCommand::Parse { path, json } => run_parse(Path::new(&path), json)?,
            CliCommand::Url { url } => run_url(&url)?,
        }

        Ok(())
    }
}
