//! End-to-end dispatch against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then dispatches real requests
//! through `UreqTransport`. Validates that request building, the ureq round
//! trip and response interpretation agree with an actual HTTP server.

use std::sync::{Arc, Mutex};

use fetch_core::{
    load_select_with_options, AlertSink, DispatchError, DispatcherConfig, OptionPayload, Outcome, RequestDispatcher,
    RequestSpec, SelectBoard, SelectOption, UreqTransport,
};
use mock_server::Echo;
use serde_json::{json, Value};

#[derive(Default)]
struct Alerts(Mutex<Vec<String>>);

impl AlertSink for Alerts {
    fn alert(&self, message: &str) {
        self.0.lock().unwrap().push(message.to_string());
    }
}

/// Start the mock server on its own thread and return its base URL.
fn start_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

fn dispatcher(base_url: &str, alerts: Arc<Alerts>) -> RequestDispatcher {
    RequestDispatcher::new(&DispatcherConfig::new(base_url), Arc::new(UreqTransport::new())).with_alert(alerts)
}

/// Dispatch and wait, returning the outcome and the delivered payload.
async fn run(dispatcher: &RequestDispatcher, spec: RequestSpec) -> (Outcome, Option<Value>) {
    let slot: Arc<Mutex<Option<Value>>> = Arc::default();
    let sink = slot.clone();
    let outcome = dispatcher
        .dispatch(spec, move |payload| {
            *sink.lock().unwrap() = Some(payload);
        })
        .unwrap()
        .await
        .unwrap();
    let payload = slot.lock().unwrap().take();
    (outcome, payload)
}

#[tokio::test(flavor = "multi_thread")]
async fn dispatch_lifecycle() {
    let base_url = start_server();
    let alerts = Arc::new(Alerts::default());
    let d = dispatcher(&base_url, alerts.clone());

    // Step 1: GET flattens the body into the query string.
    let spec = RequestSpec::new("/echo").with_body(json!({"fname": "Dark Magician", "level": 7}));
    let (outcome, payload) = run(&d, spec).await;
    assert_eq!(outcome, Outcome::Delivered);
    let echo: Echo = serde_json::from_value(payload.unwrap()).unwrap();
    assert_eq!(echo.method, "GET");
    assert_eq!(echo.query["fname"], "Dark Magician");
    assert_eq!(echo.query["level"], "7");
    assert_eq!(echo.content_type.as_deref(), Some("text/plain"));
    assert!(echo.body.is_null());

    // Step 2: every payload verb sends the body as JSON.
    let body = json!({"name": "Starter", "cards": [1, 2, 3]});
    for method in ["POST", "PUT", "PATCH", "DELETE", "OPTIONS"] {
        let spec = RequestSpec::new("/echo").with_method(method).with_body(body.clone());
        let (outcome, payload) = run(&d, spec).await;
        assert_eq!(outcome, Outcome::Delivered, "{method}");
        let echo: Echo = serde_json::from_value(payload.unwrap()).unwrap();
        assert_eq!(echo.method, method);
        assert!(echo.query.is_empty(), "{method}");
        assert_eq!(echo.content_type.as_deref(), Some("application/json"), "{method}");
        assert_eq!(echo.body, body, "{method}");
    }

    // Step 3: HEAD has no response body and delivers null.
    let (outcome, payload) = run(&d, RequestSpec::new("/echo").with_method("HEAD")).await;
    assert_eq!(outcome, Outcome::Delivered);
    assert_eq!(payload, Some(Value::Null));
    assert!(alerts.0.lock().unwrap().is_empty());

    // Step 4: a 404 is reported, alerted, and never delivered.
    let (outcome, payload) = run(&d, RequestSpec::new("/status/404")).await;
    assert_eq!(
        outcome,
        Outcome::Failed(DispatchError::HttpError {
            status: 404,
            status_text: "Not Found".to_string()
        })
    );
    assert!(payload.is_none());

    // Step 5: a 2xx that is not JSON is a failure.
    let (outcome, payload) = run(&d, RequestSpec::new("/text")).await;
    assert!(matches!(outcome, Outcome::Failed(DispatchError::DeserializationError(_))));
    assert!(payload.is_none());
    assert_eq!(alerts.0.lock().unwrap().len(), 2);

    // Step 6: option payloads populate selection controls.
    let (outcome, payload) = run(&d, RequestSpec::new("/options")).await;
    assert_eq!(outcome, Outcome::Delivered);
    let options = OptionPayload::from_value(payload.unwrap()).unwrap();
    let mut board = SelectBoard::new();
    load_select_with_options(&options, &mut board, &["#type", "#filter"]);
    let expected = vec![
        SelectOption::new("Monster", "1"),
        SelectOption::new("Spell", "2"),
        SelectOption::new("Trap", "3"),
    ];
    assert_eq!(board.options("#type"), expected.as_slice());
    assert_eq!(board.options("#filter"), expected.as_slice());
}

#[tokio::test(flavor = "multi_thread")]
async fn unreachable_server_is_a_transport_error() {
    // Bind then drop so the port is very likely closed.
    let addr = std::net::TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();
    let alerts = Arc::new(Alerts::default());
    let d = dispatcher(&format!("http://{addr}"), alerts.clone());

    let (outcome, payload) = run(&d, RequestSpec::new("/echo")).await;
    assert!(matches!(outcome, Outcome::Failed(DispatchError::TransportError(_))), "{outcome:?}");
    assert!(payload.is_none());
    assert_eq!(alerts.0.lock().unwrap().len(), 1);
}
