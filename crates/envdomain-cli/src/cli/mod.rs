//! CLI for envdomain backend URL resolution.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use envdomain_core::config::{self, EnvdomainConfig};
use std::io;
use std::path::PathBuf;

use commands::{run_classify, run_plaza, run_rewrite, run_table};

/// Top-level CLI for envdomain.
#[derive(Debug, Parser)]
#[command(name = "envdomain")]
#[command(about = "Rewrite backend URLs for the current deployment environment", long_about = None)]
pub struct Cli {
    /// Host the client runs under (overrides `current_host` from config).
    #[arg(long, global = true, env = "ENVDOMAIN_HOST")]
    pub host: Option<String>,

    /// Config file to use instead of ~/.config/envdomain/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Show which environment a host classifies to.
    Classify {
        /// Host to classify (default: the current host).
        #[arg(value_name = "HOST")]
        target: Option<String>,

        /// Print a JSON object instead of the bare environment name.
        #[arg(long)]
        json: bool,
    },

    /// Rewrite a backend URL for the current environment.
    Rewrite {
        /// URL on a recognized domain family, e.g. https://api.ffan.com/plazas/1.
        url: String,
    },

    /// Show the effective replacement table.
    Table,

    /// Show the request target for fetching plazas by ID.
    Plaza {
        /// Plaza ID or comma-separated IDs.
        ids: String,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = match &cli.config {
            Some(path) => config::load_from(path)?,
            None => config::load_or_init()?,
        };
        tracing::debug!("loaded config: {:?}", cfg);

        let stdout = io::stdout();
        let mut out = stdout.lock();
        cli.command.run(&cfg, cli.host.as_deref(), &mut out)
    }

    pub fn run(
        self,
        cfg: &EnvdomainConfig,
        host: Option<&str>,
        out: &mut impl io::Write,
    ) -> Result<()> {
        match self {
            CliCommand::Classify { target, json } => {
                run_classify(cfg, host, target.as_deref(), json, out)?
            }
            CliCommand::Rewrite { url } => run_rewrite(cfg, host, &url, out)?,
            CliCommand::Table => run_table(cfg, out)?,
            CliCommand::Plaza { ids } => run_plaza(cfg, host, &ids, out)?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
