//! modelhub-cli: validate or send ModelHub requests from JSON files
//!
//! Usage:
//!   modelhub-cli validate <kind> <request.json>   Validate a request offline
//!   modelhub-cli send <kind> <request.json>       Validate, then send it
//!   modelhub-cli kinds                            List request kinds

use anyhow::Context;
use modelhub_rust::{Error, ModelHubClient, RequestKind};
use std::path::Path;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        std::process::exit(1);
    }

    let code = match args[1].as_str() {
        "validate" => cmd_validate(&args[2..]),
        "send" => cmd_send(&args[2..]).await,
        "kinds" => cmd_kinds(),
        "version" | "--version" | "-V" => cmd_version(),
        "help" | "--help" | "-h" => {
            print_usage();
            0
        }
        other => {
            eprintln!("Unknown command: {other}");
            eprintln!();
            print_usage();
            1
        }
    };
    std::process::exit(code);
}

fn print_usage() {
    println!(
        r#"modelhub-cli: ModelHub request tool

USAGE:
    modelhub-cli <COMMAND> [ARGS]

COMMANDS:
    validate <kind> <file>    Validate a JSON request without sending it
    send <kind> <file>        Validate and send a JSON request, print the response
    kinds                     List request kinds
    version                   Show version information
    help                      Show this help message

ENVIRONMENT:
    MODELHUB_API_KEY            API key (used when no keyring entry exists)
    MODELHUB_BASE_URL           Platform base URL
    MODELHUB_HTTP_TIMEOUT_SECS  Request timeout in seconds
    MODELHUB_PROXY_URL          Optional proxy
    RUST_LOG                    Log filter (e.g. modelhub_rust=debug)"#
    );
}

fn cmd_version() -> i32 {
    println!("modelhub-cli {}", env!("CARGO_PKG_VERSION"));
    0
}

fn cmd_kinds() -> i32 {
    for kind in RequestKind::ALL {
        let endpoint = kind.endpoint().unwrap_or("-");
        println!("{:<16} {}", kind.as_str(), endpoint);
    }
    0
}

fn load_request(args: &[String]) -> anyhow::Result<(RequestKind, serde_json::Value)> {
    let [kind, file, ..] = args else {
        anyhow::bail!("expected <kind> <file>");
    };
    let kind = RequestKind::parse(kind)
        .with_context(|| format!("unknown request kind '{kind}' (see `modelhub-cli kinds`)"))?;
    let text = std::fs::read_to_string(Path::new(file))
        .with_context(|| format!("cannot read {file}"))?;
    let body = serde_json::from_str(&text).with_context(|| format!("{file} is not valid JSON"))?;
    Ok((kind, body))
}

fn report(err: &Error) {
    eprintln!("error: {}", err.message());
    eprintln!("  code:   {}", err.code());
    if let Some(status) = err.status() {
        eprintln!("  status: {}", status);
    }
    if let Some(details) = err.details() {
        eprintln!("  details: {}", details);
    }
}

fn cmd_validate(args: &[String]) -> i32 {
    let (kind, body) = match load_request(args) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e:#}");
            return 1;
        }
    };
    match modelhub_rust::validation::validate(kind, &body) {
        Ok(()) => {
            println!("ok");
            0
        }
        Err(err) => {
            report(&err);
            1
        }
    }
}

async fn cmd_send(args: &[String]) -> i32 {
    let (kind, body) = match load_request(args) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e:#}");
            return 1;
        }
    };
    let client = match ModelHubClient::new() {
        Ok(c) => c,
        Err(err) => {
            report(&err);
            return 1;
        }
    };
    match client.execute(kind, body).await {
        Ok(response) => {
            match serde_json::to_string_pretty(&response) {
                Ok(text) => println!("{text}"),
                Err(_) => println!("{response}"),
            }
            0
        }
        Err(err) => {
            report(&err);
            1
        }
    }
}
