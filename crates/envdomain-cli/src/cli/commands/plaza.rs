//! `envdomain plaza` – show the resolved request target for plaza IDs.

use anyhow::Result;
use envdomain_core::config::EnvdomainConfig;
use envdomain_core::dispatcher::PlazaApi;
use std::io::Write;

pub fn run_plaza(
    cfg: &EnvdomainConfig,
    host: Option<&str>,
    ids: &str,
    out: &mut impl Write,
) -> Result<()> {
    let api = PlazaApi::from_config(cfg, host)?;
    let spec = api.plaza_ids_request(ids)?;
    writeln!(out, "{} {}", spec.method, spec.url)?;
    Ok(())
}
