#![allow(dead_code)]

// tests/common/mod.rs
use actix_web::body::BoxBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::header::{HeaderName, CONTENT_TYPE};
use actix_web::test;
use once_cell::sync::OnceCell;
use serde_json::Value;
use tracing_subscriber::{fmt, EnvFilter};

static LOGGING: OnceCell<()> = OnceCell::new();

// Logging is auto-installed for every test binary that pulls this module in
#[ctor::ctor]
fn init_logging() {
    LOGGING.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}

/// Validate that a failure response follows the ProblemDetails structure and
/// carries a non-empty trace id in both the body and the X-Trace-Id header.
pub async fn assert_problem_details_structure(
    resp: ServiceResponse<BoxBody>,
    expected_status: u16,
    expected_code: &str,
) {
    assert_eq!(resp.status().as_u16(), expected_status);

    let headers = resp.headers().clone();

    let trace_hdr = HeaderName::from_static("x-trace-id");
    let trace_id = headers
        .get(&trace_hdr)
        .and_then(|v| v.to_str().ok())
        .expect("X-Trace-Id header should be present and valid UTF-8")
        .to_string();
    assert!(
        !trace_id.is_empty(),
        "X-Trace-Id header should not be empty"
    );

    // Content-Type may include parameters (e.g., charset)
    let content_type = headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(
        content_type.starts_with("application/problem+json"),
        "Content-Type must be application/problem+json (got {content_type})"
    );

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"].as_u64(), Some(expected_status as u64));
    assert_eq!(body["code"].as_str(), Some(expected_code));
    assert_eq!(body["trace_id"].as_str(), Some(trace_id.as_str()));
    assert!(body["detail"].as_str().is_some_and(|d| !d.is_empty()));
}
