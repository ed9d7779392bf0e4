//! Rendering of a parsed response to stdout.

use anyhow::Result;
use ihttp_core::Response;
use std::fmt::Write as _;

/// How much of the response to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Body,
    Include,
    Json,
}

impl OutputMode {
    pub fn from_flags(include: bool, json: bool) -> Self {
        if json {
            OutputMode::Json
        } else if include {
            OutputMode::Include
        } else {
            OutputMode::Body
        }
    }
}

pub fn render(response: &Response, mode: OutputMode) -> Result<String> {
    let out = match mode {
        OutputMode::Body => response.body().to_string(),
        OutputMode::Json => serde_json::to_string_pretty(response)?,
        OutputMode::Include => {
            let mut out = String::new();
            writeln!(out, "{}", response.status_line())?;
            let mut names: Vec<&String> = response.headers().keys().collect();
            names.sort();
            for name in names {
                writeln!(out, "{}: {}", name, response.headers()[name])?;
            }
            writeln!(out)?;
            out.push_str(&response.body());
            out
        }
    };
    Ok(out)
}
