//! Validated single-request dispatch against a fixed base endpoint.
//!
//! # Design
//! `RequestDispatcher` keeps the build/parse split of a host-does-IO client:
//! `prepare` turns a `RequestSpec` into an `HttpRequest` (or rejects it) and
//! `complete` interprets the `HttpResponse`. `send` wraps the round trip with
//! the busy indicator and settles it into exactly one `Outcome`, and
//! `dispatch` runs `send` on the blocking pool so the caller never waits.
//!
//! Network-phase failures stop at this boundary: they are logged, alerted,
//! and returned inside `Outcome::Failed`. The success continuation only ever
//! sees a parsed payload.

use std::sync::Arc;

use serde_json::Value;
use tokio::task::JoinHandle;
use tracing::{debug, error, instrument};

use crate::alert::{AlertSink, StderrAlert};
use crate::config::DispatcherConfig;
use crate::error::DispatchError;
use crate::http::{HttpRequest, HttpResponse};
use crate::indicator::IndicatorController;
use crate::request::{append_query, encode_query, join_url, RequestSpec};
use crate::transport::Transport;

const TEXT_CONTENT_TYPE: &str = "text/plain";
const JSON_CONTENT_TYPE: &str = "application/json";

/// How a dispatched request settled.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum Outcome {
    /// The success continuation ran with the parsed payload.
    Delivered,
    /// The request failed; the user has already been alerted.
    Failed(DispatchError),
}

impl Outcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self, Outcome::Delivered)
    }

    pub fn error(&self) -> Option<&DispatchError> {
        match self {
            Outcome::Delivered => None,
            Outcome::Failed(error) => Some(error),
        }
    }
}

#[derive(Clone)]
pub struct RequestDispatcher {
    base_url: String,
    transport: Arc<dyn Transport>,
    indicator: Arc<IndicatorController>,
    alert: Arc<dyn AlertSink>,
}

impl RequestDispatcher {
    /// A dispatcher with a headless indicator that alerts on stderr.
    pub fn new(config: &DispatcherConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            base_url: config.base_url.clone(),
            transport,
            indicator: Arc::new(IndicatorController::noop()),
            alert: Arc::new(StderrAlert),
        }
    }

    pub fn with_indicator(mut self, indicator: Arc<IndicatorController>) -> Self {
        self.indicator = indicator;
        self
    }

    pub fn with_alert(mut self, alert: Arc<dyn AlertSink>) -> Self {
        self.alert = alert;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The controller callers use for manual indicator ownership.
    pub fn indicator(&self) -> &Arc<IndicatorController> {
        &self.indicator
    }

    /// Validate `spec` and build the request it describes.
    pub fn prepare(&self, spec: &RequestSpec) -> Result<HttpRequest, DispatchError> {
        let (method, body) = spec.validate()?;
        let mut url = join_url(&self.base_url, &spec.path);

        if !method.sends_body() {
            append_query(&mut url, &encode_query(body));
            return Ok(HttpRequest {
                method,
                url,
                headers: vec![("content-type".to_string(), TEXT_CONTENT_TYPE.to_string())],
                body: None,
            });
        }

        let payload =
            serde_json::to_string(body).map_err(|e| DispatchError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method,
            url,
            headers: vec![("content-type".to_string(), JSON_CONTENT_TYPE.to_string())],
            body: Some(payload),
        })
    }

    /// Interpret a response: any 2xx is parsed as JSON, an empty body as `null`.
    pub fn complete(&self, response: HttpResponse) -> Result<Value, DispatchError> {
        if !response.is_success() {
            return Err(DispatchError::HttpError {
                status: response.status,
                status_text: response.status_text,
            });
        }
        if response.body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&response.body).map_err(|e| DispatchError::DeserializationError(e.to_string()))
    }

    /// Execute a prepared request and settle it. Blocks the calling thread
    /// for the duration of the round trip.
    #[instrument(name = "send", skip_all, fields(method = %request.method, url = %request.url))]
    pub fn send<F>(&self, request: HttpRequest, on_success: F) -> Outcome
    where
        F: FnOnce(Value),
    {
        self.indicator.show_auto();
        let result = self
            .transport
            .execute(&request)
            .and_then(|response| self.complete(response));
        self.indicator.hide_auto();

        match result {
            Ok(payload) => {
                debug!("response delivered");
                on_success(payload);
                Outcome::Delivered
            }
            Err(err) => {
                error!("{err}");
                self.alert.alert(&err.alert_message());
                Outcome::Failed(err)
            }
        }
    }

    /// Validate synchronously, then run the round trip on the tokio blocking
    /// pool. Must be called from within a tokio runtime.
    ///
    /// `InvalidArgument` is returned before any indicator toggle or network
    /// call. Everything after that is reported through the handle's
    /// `Outcome`.
    pub fn dispatch<F>(&self, spec: RequestSpec, on_success: F) -> Result<JoinHandle<Outcome>, DispatchError>
    where
        F: FnOnce(Value) + Send + 'static,
    {
        let request = self.prepare(&spec)?;
        debug!(method = %request.method, url = %request.url, "dispatching request");
        let dispatcher = self.clone();
        Ok(tokio::task::spawn_blocking(move || dispatcher.send(request, on_success)))
    }
}

impl std::fmt::Debug for RequestDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestDispatcher")
            .field("base_url", &self.base_url)
            .field("indicator", &self.indicator)
            .finish_non_exhaustive()
    }
}
