//! `ihttp parse <file>` – parse a captured raw response offline.

use anyhow::{Context, Result};
use ihttp_core::response::TransferInfo;
use ihttp_core::Response;
use std::fs;
use std::path::Path;

use super::output::{render, OutputMode};

pub fn run_parse(path: &Path, json: bool) -> Result<()> {
    let response = load_capture(path)?;

    let mode = OutputMode::from_flags(true, json);
    println!("{}", render(&response, mode)?);
    if !json {
        if let Some(ct) = response.content_type() {
            eprintln!("content-type: {}", ct);
        }
        if let Some(cs) = response.charset() {
            eprintln!("charset: {}", cs);
        }
    }
    Ok(())
}

/// Reads a captured payload byte-for-byte and parses its final message.
fn load_capture(path: &Path) -> Result<Response> {
    let raw = fs::read(path).with_context(|| format!("read {}", path.display()))?;
    let response = Response::from_raw(&path.display().to_string(), &raw, TransferInfo::default())
        .with_context(|| format!("parse {}", path.display()))?;
    Ok(response)
}
