//! `envdomain classify` – show the environment a host classifies to.

use anyhow::Result;
use envdomain_core::config::EnvdomainConfig;
use std::io::Write;

pub fn run_classify(
    cfg: &EnvdomainConfig,
    host: Option<&str>,
    target: Option<&str>,
    json: bool,
    out: &mut impl Write,
) -> Result<()> {
    let resolver = cfg.resolver(host)?;
    let target = target.filter(|t| !t.is_empty()).unwrap_or(resolver.current_host());
    let env = resolver.classify(Some(target));

    if json {
        let value = serde_json::json!({ "host": target, "environment": env });
        writeln!(out, "{}", serde_json::to_string(&value)?)?;
    } else {
        writeln!(out, "{env}")?;
    }
    Ok(())
}
