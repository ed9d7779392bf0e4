//! `ihttp send <url>` – issue one request and print the response.

use anyhow::{Context, Result};
use ihttp_core::config::ClientConfig;
use ihttp_core::Request;

use super::output::{render, OutputMode};
use crate::cli::SendArgs;

pub fn run_send(cfg: &ClientConfig, args: &SendArgs) -> Result<()> {
    let mut options = cfg.curl_options();
    if args.insecure {
        options.ssl_verify_peer = false;
    }
    if args.verify_peer {
        options.ssl_verify_peer = true;
    }

    let headers = args
        .headers
        .iter()
        .map(|h| parse_header_arg(h))
        .collect::<Result<Vec<_>>>()?;
    let data = args
        .data
        .iter()
        .map(|d| parse_data_arg(d))
        .collect::<Result<Vec<_>>>()?;

    let mut request = Request::with_options(options);
    request
        .set_url(args.url.as_str())
        .set_method(args.method)
        .set_headers(headers)
        .set_post_data(data);
    if let Some(agent) = args.user_agent.as_ref().or(cfg.user_agent.as_ref()) {
        request.set_user_agent(agent.as_str());
    }

    let response = request
        .send()
        .with_context(|| format!("{} {}", args.method, args.url))?;
    tracing::info!(
        "{} {} -> {} ({} bytes)",
        args.method,
        args.url,
        response.http_code(),
        response.body_bytes().len()
    );

    let mode = OutputMode::from_flags(args.include, args.json);
    println!("{}", render(response, mode)?);
    Ok(())
}

/// `Name: value` into a header pair.
fn parse_header_arg(arg: &str) -> Result<(String, String)> {
    let (name, value) = arg
        .split_once(':')
        .with_context(|| format!("header must be `Name: value`, got {:?}", arg))?;
    let name = name.trim();
    if name.is_empty() {
        anyhow::bail!("header name is empty in {:?}", arg);
    }
    Ok((name.to_string(), value.trim().to_string()))
}

/// `key=value` into a form field.
fn parse_data_arg(arg: &str) -> Result<(String, String)> {
    let (key, value) = arg
        .split_once('=')
        .with_context(|| format!("data must be `key=value`, got {:?}", arg))?;
    Ok((key.to_string(), value.to_string()))
}
