//! Dispatch the request described on the command line and render the result.

use std::process::ExitCode;
use std::sync::{Arc, Mutex, PoisonError};

use anyhow::Context;
use fetch_core::{
    load_select_with_options, BusyIndicator, DispatchError, DispatcherConfig, IndicatorController, NoopIndicator,
    OptionPayload, Outcome, RequestDispatcher, RequestSpec, SelectBoard, UreqTransport,
};
use serde_json::Value;
use tracing::debug;

use crate::cli::Cli;
use crate::spinner::Spinner;

/// Exit status for a call site the dispatcher rejected before sending.
const INVALID_ARGUMENT: u8 = 2;

pub async fn run(cli: &Cli) -> anyhow::Result<ExitCode> {
    let config = DispatcherConfig::new(cli.base_url.as_str());
    let indicator: Arc<dyn BusyIndicator> = if cli.no_spinner || cli.quiet {
        Arc::new(NoopIndicator)
    } else {
        Arc::new(Spinner::new("Loading..."))
    };
    let dispatcher = RequestDispatcher::new(&config, Arc::new(UreqTransport::new()))
        .with_indicator(Arc::new(IndicatorController::new(indicator)));

    let spec = RequestSpec::new(cli.path.as_str())
        .with_method(cli.method.as_str())
        .with_body(cli.request_body());

    let delivered: Arc<Mutex<Option<Value>>> = Arc::default();
    let slot = delivered.clone();
    let handle = match dispatcher.dispatch(spec, move |payload| {
        *slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(payload);
    }) {
        Ok(handle) => handle,
        Err(err @ DispatchError::InvalidArgument(_)) => {
            eprintln!("error: {err}");
            return Ok(ExitCode::from(INVALID_ARGUMENT));
        }
        Err(err) => return Err(err.into()),
    };

    let outcome = handle.await.context("request task panicked")?;
    debug!(?outcome, "request settled");
    if let Outcome::Failed(_) = outcome {
        return Ok(ExitCode::FAILURE);
    }

    let payload = delivered
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .take()
        .unwrap_or(Value::Null);
    println!("{}", render(payload, &cli.select)?);
    Ok(ExitCode::SUCCESS)
}

/// Pretty JSON, or the populated selection controls when selectors are given.
fn render(payload: Value, selectors: &[String]) -> anyhow::Result<String> {
    if selectors.is_empty() {
        return serde_json::to_string_pretty(&payload).context("failed to format response");
    }
    let options = OptionPayload::from_value(payload).context("response is not an option payload")?;
    let mut board = SelectBoard::new();
    load_select_with_options(&options, &mut board, selectors);

    let mut out = String::new();
    for selector in selectors {
        out.push_str(selector);
        out.push('\n');
        for option in board.options(selector) {
            out.push_str(&format!("  {}\t{}\n", option.value, option.label));
        }
    }
    Ok(out.trim_end().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn renders_raw_json_without_selectors() {
        let out = render(json!({"a": 1}), &[]).unwrap();
        assert_eq!(out, "{\n  \"a\": 1\n}");
    }

    #[test]
    fn renders_each_selector_in_order() {
        let payload = json!({"payload": [{"id": 1, "text": "A"}, {"id": 2, "text": "B"}]});
        let out = render(payload, &["#one".to_string(), "#two".to_string()]).unwrap();
        assert_eq!(out, "#one\n  1\tA\n  2\tB\n#two\n  1\tA\n  2\tB");
    }

    #[test]
    fn rejects_payload_without_entries() {
        assert!(render(json!({"a": 1}), &["#one".to_string()]).is_err());
    }
}
