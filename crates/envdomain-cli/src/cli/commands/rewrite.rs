//! `envdomain rewrite` – print a URL retargeted for the current environment.

use anyhow::{Context, Result};
use envdomain_core::config::EnvdomainConfig;
use std::io::Write;

pub fn run_rewrite(
    cfg: &EnvdomainConfig,
    host: Option<&str>,
    url: &str,
    out: &mut impl Write,
) -> Result<()> {
    let resolver = cfg.resolver(host)?;
    let rewritten = resolver
        .rewrite(url, None)
        .with_context(|| format!("cannot rewrite for host {}", resolver.current_host()))?;
    writeln!(out, "{rewritten}")?;
    Ok(())
}
