//! Calculate endpoint tests through the router.

use hyper::{Method, StatusCode};
use serde_json::json;

use super::test_utils::{calculate, call, Fixture};

#[tokio::test]
async fn test_add() {
    let fixture = Fixture::new();
    let state = fixture.state();

    let response = calculate(&state, &json!({"operation": "add", "left": 2, "right": 3})).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.content_type(), "application/json");
    assert_eq!(response.json(), json!({"result": 5}));
}

#[tokio::test]
async fn test_subtract() {
    let fixture = Fixture::new();
    let state = fixture.state();

    let response = calculate(
        &state,
        &json!({"operation": "subtract", "left": 10.5, "right": 0.25}),
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["result"].as_f64(), Some(10.25));
}

#[tokio::test]
async fn test_arithmetic_matches_f64() {
    let fixture = Fixture::new();
    let state = fixture.state();

    let cases = [(0.1, 0.2), (-7.0, 3.5), (1e15, 1.0), (123.456, -654.321), (0.0, -0.0)];
    for (a, b) in cases {
        let added = calculate(&state, &json!({"operation": "add", "left": a, "right": b})).await;
        assert_eq!(added.json()["result"].as_f64(), Some(a + b), "{a} + {b}");

        let subtracted =
            calculate(&state, &json!({"operation": "subtract", "left": a, "right": b})).await;
        assert_eq!(subtracted.json()["result"].as_f64(), Some(a - b), "{a} - {b}");
    }
}

#[tokio::test]
async fn test_numeric_string_operands() {
    let fixture = Fixture::new();
    let state = fixture.state();

    let response = calculate(&state, &json!({"operation": "add", "left": "4", "right": " 1.5"})).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json()["result"].as_f64(), Some(5.5));
}

#[tokio::test]
async fn test_unsupported_operation() {
    let fixture = Fixture::new();
    let state = fixture.state();

    for operation in [json!("multiply"), json!("divide"), json!("Add"), json!(1), json!(null)] {
        let response = calculate(
            &state,
            &json!({"operation": operation, "left": 1, "right": 2}),
        )
        .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(
            response.json(),
            json!({"error": "Only add and subtract operations are supported."})
        );
    }
}

#[tokio::test]
async fn test_non_numeric_operands() {
    let fixture = Fixture::new();
    let state = fixture.state();

    let payloads = [
        json!({"operation": "add", "left": "abc", "right": 1}),
        json!({"operation": "add", "left": 1, "right": null}),
        json!({"operation": "add", "left": 1}),
        json!({"operation": "subtract"}),
        json!({"operation": "add", "left": {"n": 1}, "right": 2}),
        // operand check comes before the operation check
        json!({"operation": "multiply", "left": "abc", "right": 2}),
    ];

    for payload in payloads {
        let response = calculate(&state, &payload).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{payload}");
        assert_eq!(
            response.json(),
            json!({"error": "Both operands must be numbers."})
        );
    }
}

#[tokio::test]
async fn test_empty_body_is_empty_object() {
    let fixture = Fixture::new();
    let state = fixture.state();

    let response = call(&state, Method::POST, "/calculate", "").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json(),
        json!({"error": "Both operands must be numbers."})
    );
}

#[tokio::test]
async fn test_malformed_json() {
    let fixture = Fixture::new();
    let state = fixture.state();

    for body in ["{not valid}", "null", "{\"left\": 1,", "   "] {
        let response = call(&state, Method::POST, "/calculate", body).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "{body:?}");
        assert_eq!(response.json(), json!({"error": "Invalid request payload."}));
    }
}

#[tokio::test]
async fn test_overflowing_operand_literal() {
    let fixture = Fixture::new();
    let state = fixture.state();

    let body = r#"{"operation":"add","left":1e400,"right":1}"#;
    let response = call(&state, Method::POST, "/calculate", body).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.json(),
        json!({"error": "Both operands must be numbers."})
    );
}

#[tokio::test]
async fn test_body_over_limit() {
    let fixture = Fixture::new();
    let state = fixture.state();

    // Valid JSON padded with whitespace to just over 1,000,000 bytes
    let mut body = json!({"operation": "add", "left": 1, "right": 2}).to_string();
    body.push_str(&" ".repeat(1_000_001 - body.len()));

    let response = call(&state, Method::POST, "/calculate", &body).await;
    assert_eq!(response.status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(response.json(), json!({"error": "Payload too large."}));
}

#[tokio::test]
async fn test_body_at_limit_is_accepted() {
    let fixture = Fixture::new();
    let state = fixture.state();

    let mut body = json!({"operation": "add", "left": 1, "right": 2}).to_string();
    body.push_str(&" ".repeat(1_000_000 - body.len()));

    let response = call(&state, Method::POST, "/calculate", &body).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json(), json!({"result": 3}));
}

#[tokio::test]
async fn test_repeated_requests_are_idempotent() {
    let fixture = Fixture::new();
    let state = fixture.state();
    let payload = json!({"operation": "subtract", "left": 42, "right": 0.5});

    let first = calculate(&state, &payload).await;
    for _ in 0..5 {
        let again = calculate(&state, &payload).await;
        assert_eq!(again.status, first.status);
        assert_eq!(again.body, first.body);
    }
}
