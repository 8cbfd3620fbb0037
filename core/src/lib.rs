//! Validated HTTP request dispatch with a busy indicator and a single
//! success/failure outcome per call.
//!
//! # Overview
//! A `RequestDispatcher` validates a `RequestSpec`, builds the HTTP request
//! against a fixed base endpoint, executes it through a `Transport`, and
//! either hands the parsed JSON payload to a success continuation or alerts
//! the user and logs the failure.
//!
//! # Design
//! - Request building and response interpretation are plain functions over
//!   `HttpRequest` / `HttpResponse` data; I/O lives behind `Transport`.
//! - The busy indicator, user alerts and the network are capabilities
//!   (`BusyIndicator`, `AlertSink`, `Transport`) injected into the
//!   dispatcher, so tests substitute fakes without shared state.
//! - Option payloads can be loaded into selection controls via `OptionSink`.

pub mod alert;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod http;
pub mod indicator;
pub mod options;
pub mod request;
pub mod transport;

pub use alert::{AlertSink, StderrAlert};
pub use config::DispatcherConfig;
pub use dispatcher::{Outcome, RequestDispatcher};
pub use error::DispatchError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use indicator::{BusyIndicator, IndicatorController, NoopIndicator};
pub use options::{load_select_with_options, OptionEntry, OptionPayload, OptionSink, SelectBoard, SelectOption};
pub use request::RequestSpec;
pub use transport::{Transport, UreqTransport};
