//! `envdomain table` – show the effective replacement table.

use anyhow::Result;
use envdomain_core::config::EnvdomainConfig;
use std::io::Write;

pub fn run_table(cfg: &EnvdomainConfig, out: &mut impl Write) -> Result<()> {
    let resolver = cfg.resolver(None)?;
    writeln!(out, "{:<6} {}", "ENV", "PREFIX")?;
    for (env, prefix) in resolver.table().iter() {
        writeln!(out, "{:<6} {:?}", env.as_str(), prefix)?;
    }
    Ok(())
}
