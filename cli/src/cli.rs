//! CLI argument definitions.

use clap::{ArgAction, Parser};
use fetch_core::config::{BASE_URL_ENV, DEFAULT_BASE_URL};
use serde_json::{Map, Value};

#[derive(Parser, Debug)]
#[command(
    name = "fetch",
    version,
    about = "Send one validated JSON API request",
    long_about = "Send one validated JSON API request against a fixed base URL.\n\n\
                  GET parameters travel in the query string; every other method\n\
                  sends them as a JSON body. The parsed response is printed on\n\
                  success; failures are reported on stderr."
)]
pub struct Cli {
    /// HTTP method: GET, POST, PUT, DELETE, PATCH, OPTIONS or HEAD.
    #[arg(value_name = "METHOD")]
    pub method: String,

    /// Path appended to the base URL.
    #[arg(value_name = "PATH", default_value = "")]
    pub path: String,

    /// Base URL every path is appended to.
    #[arg(long, value_name = "URL", env = BASE_URL_ENV, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Request parameter as KEY=VALUE (repeatable). Values are sent as strings.
    #[arg(short = 'd', long = "data", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub data: Vec<(String, String)>,

    /// Full request body as a JSON object. `-d` entries are merged into it.
    #[arg(long, value_name = "JSON", value_parser = parse_json)]
    pub body: Option<Value>,

    /// Load the response as `{payload: [{id, text}]}` into these selection
    /// controls and print them instead of the raw JSON (repeatable).
    #[arg(long = "select", value_name = "SELECTOR")]
    pub select: Vec<String>,

    /// Do not show the busy spinner.
    #[arg(long)]
    pub no_spinner: bool,

    /// More log output (-v for debug, -vv for trace). `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only print the response and user-facing errors.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    /// The `--body` value with every `-d` pair merged in. A non-object body
    /// is passed through untouched so the dispatcher can reject it.
    pub fn request_body(&self) -> Value {
        let mut body = self.body.clone().unwrap_or_else(|| Value::Object(Map::new()));
        if let Value::Object(map) = &mut body {
            for (key, value) in &self.data {
                map.insert(key.clone(), Value::String(value.clone()));
            }
        }
        body
    }
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got `{raw}`"))?;
    if key.is_empty() {
        return Err(format!("empty key in `{raw}`"));
    }
    Ok((key.to_string(), value.to_string()))
}

fn parse_json(raw: &str) -> Result<Value, String> {
    serde_json::from_str(raw).map_err(|e| format!("invalid JSON: {e}"))
}
