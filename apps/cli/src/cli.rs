//! Command-line arguments

use std::path::PathBuf;
use std::time::Duration;

use beacon_log::Format;
use beacon_request::Method;
use clap::{Args, Parser, Subcommand};
use serde_json::Value;

#[derive(Debug, Parser)]
#[command(name = "beacon", version)]
#[command(about = "Send one-off or interval-polled JSON requests")]
pub struct Cli {
    /// Config file (defaults to ./beacon.toml when present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Base URL request paths are resolved against
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// Whole-request timeout, e.g. `30s` or `500ms`
    #[arg(long, global = true, value_name = "DURATION", value_parser = parse_duration)]
    pub timeout: Option<Duration>,

    /// Log filter directive, e.g. `debug` or `beacon_request=trace`
    #[arg(long, global = true, value_name = "FILTER")]
    pub log_level: Option<String>,

    /// Log output format: pretty, compact or json
    #[arg(long, global = true, value_name = "FORMAT")]
    pub log_format: Option<Format>,

    /// Start from the development logging preset (debug, pretty, source locations)
    #[arg(long, global = true)]
    pub dev_log: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Send one request and print the normalized result
    Send(RequestArgs),
    /// Poll a request and print every state change as a JSON line
    Poll(PollArgs),
}

/// Request shared by `send` and `poll`
#[derive(Debug, Args)]
pub struct RequestArgs {
    /// Request path, relative to the base URL
    pub path: String,

    /// HTTP method
    #[arg(short = 'X', long, default_value = "GET", value_parser = parse_method)]
    pub method: Method,

    /// JSON request body
    #[arg(long, value_name = "JSON", value_parser = parse_json)]
    pub body: Option<Value>,
}

#[derive(Debug, Args)]
pub struct PollArgs {
    #[command(flatten)]
    pub request: RequestArgs,

    /// Polling period; without it only the initial request is sent
    #[arg(long, value_name = "DURATION", value_parser = parse_duration)]
    pub interval: Option<Duration>,

    /// Stop after this many settled snapshots
    #[arg(long, value_name = "N")]
    pub count: Option<usize>,
}

fn parse_duration(s: &str) -> Result<Duration, String> {
    humantime_serde::re::humantime::parse_duration(s).map_err(|e| e.to_string())
}

fn parse_method(s: &str) -> Result<Method, String> {
    Method::from_bytes(s.to_ascii_uppercase().as_bytes()).map_err(|e| e.to_string())
}

fn parse_json(s: &str) -> Result<Value, String> {
    serde_json::from_str(s).map_err(|e| format!("invalid JSON body: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        let cli = Cli::try_parse_from([
            "beacon",
            "poll",
            "/api/status",
            "-X",
            "post",
            "--body",
            r#"{"id":1}"#,
            "--interval",
            "5s",
            "--timeout",
            "250ms",
            "--log-format",
            "json",
        ])
        .unwrap();

        assert_eq!(cli.timeout, Some(Duration::from_millis(250)));
        assert_eq!(cli.log_format, Some(Format::Json));
        let Command::Poll(poll) = cli.command else {
            panic!("expected poll");
        };
        assert_eq!(poll.request.method, Method::POST);
        assert_eq!(poll.request.body, Some(serde_json::json!({"id": 1})));
        assert_eq!(poll.interval, Some(Duration::from_secs(5)));
        assert_eq!(poll.count, None);
    }

    #[test]
    fn malformed_body_is_rejected() {
        let err = Cli::try_parse_from(["beacon", "send", "/x", "--body", "{nope"]).unwrap_err();
        assert!(err.to_string().contains("invalid JSON body"));
    }
}
