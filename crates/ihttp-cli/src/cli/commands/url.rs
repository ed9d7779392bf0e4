//! `ihttp url <url>` – show the URL decomposition used by the request builder.

use anyhow::Result;
use ihttp_core::request::UrlParts;
use std::fmt::Write as _;

pub fn run_url(url: &str) -> Result<()> {
    print!("{}", describe(url)?);
    Ok(())
}

/// One `LABEL value` row per part; absent parts are shown as `-`.
fn describe(url: &str) -> Result<String> {
    let parts = UrlParts::parse(url);
    let show = |v: &Option<String>| v.clone().unwrap_or_else(|| "-".to_string());
    let mut out = String::new();
    writeln!(out, "{:<10} {}", "BASE", show(&parts.base_url))?;
    writeln!(out, "{:<10} {}", "PROTOCOL", show(&parts.protocol))?;
    writeln!(out, "{:<10} {}", "HOST", show(&parts.host))?;
    writeln!(out, "{:<10} {}", "URI", parts.uri())?;
    Ok(out)
}
