//! Calculate endpoint module
//!
//! Reads a JSON body under a size cap, validates two operands and an operation, and
//! answers with the result.

use http_body_util::{BodyExt, Full};
use hyper::body::{Body, Bytes};
use hyper::{Request, Response, StatusCode};
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::config::AppState;
use crate::error::CalculateError;
use crate::http;
use crate::logger;

/// Largest integer an `f64` holds exactly (2^53 - 1)
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Supported arithmetic operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Subtract,
}

impl Operation {
    /// Parse an operation name; matching is exact and case-sensitive
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "add" => Some(Self::Add),
            "subtract" => Some(Self::Subtract),
            _ => None,
        }
    }

    pub fn apply(self, left: f64, right: f64) -> f64 {
        match self {
            Self::Add => left + right,
            Self::Subtract => left - right,
        }
    }
}

/// Successful calculation
#[derive(Debug, Serialize)]
pub struct CalculateResponse {
    #[serde(serialize_with = "serialize_number")]
    pub result: f64,
}

/// Failed calculation
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Handle `POST /calculate`
pub async fn handle<B>(req: Request<B>, state: &AppState) -> Response<Full<Bytes>>
where
    B: Body<Data = Bytes> + Unpin,
    B::Error: std::fmt::Display,
{
    let limit = state.max_body_size();

    match calculate(req, limit).await {
        Ok(result) => http::json_response(StatusCode::OK, &CalculateResponse { result }),
        Err(e) => {
            if e == CalculateError::PayloadTooLarge {
                logger::log_warning(&format!("Request body too large (max: {limit} bytes)"));
            }
            http::json_response(
                e.status(),
                &ErrorResponse {
                    error: e.to_string(),
                },
            )
        }
    }
}

async fn calculate<B>(req: Request<B>, limit: u64) -> Result<f64, CalculateError>
where
    B: Body<Data = Bytes> + Unpin,
    B::Error: std::fmt::Display,
{
    check_content_length(&req, limit)?;
    let body = read_body(req.into_body(), limit).await?;
    evaluate(&body)
}

/// Reject early when the declared Content-Length is over the cap
fn check_content_length<B>(req: &Request<B>, limit: u64) -> Result<(), CalculateError> {
    let declared = req
        .headers()
        .get(hyper::header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok());

    match declared {
        Some(size) if size > limit => Err(CalculateError::PayloadTooLarge),
        _ => Ok(()),
    }
}

/// Collect the body frame by frame, in arrival order, stopping once it exceeds `limit` bytes
pub async fn read_body<B>(mut body: B, limit: u64) -> Result<Vec<u8>, CalculateError>
where
    B: Body<Data = Bytes> + Unpin,
    B::Error: std::fmt::Display,
{
    let limit = usize::try_from(limit).unwrap_or(usize::MAX);
    let mut buf = Vec::new();

    while let Some(frame) = body.frame().await {
        let frame = frame.map_err(|e| {
            logger::log_warning(&format!("Failed to read request body: {e}"));
            CalculateError::InvalidPayload
        })?;

        if let Ok(chunk) = frame.into_data() {
            if buf.len().saturating_add(chunk.len()) > limit {
                return Err(CalculateError::PayloadTooLarge);
            }
            buf.extend_from_slice(&chunk);
        }
    }

    Ok(buf)
}

/// Parse a request body and compute the result
///
/// Operands are validated before the operation name. Number literals are kept as text
/// while parsing, so one outside the `f64` range is an operand error, not a payload error.
pub fn evaluate(body: &[u8]) -> Result<f64, CalculateError> {
    let payload: Value = if body.is_empty() {
        Value::Object(serde_json::Map::new())
    } else {
        serde_json::from_slice(body).map_err(|_| CalculateError::InvalidPayload)?
    };

    if payload.is_null() {
        return Err(CalculateError::InvalidPayload);
    }

    let left = to_number(payload.get("left"));
    let right = to_number(payload.get("right"));
    let (Some(left), Some(right)) = (left, right) else {
        return Err(CalculateError::InvalidOperands);
    };

    let operation = payload
        .get("operation")
        .and_then(Value::as_str)
        .and_then(Operation::parse)
        .ok_or(CalculateError::UnsupportedOperation)?;

    Ok(operation.apply(left, right))
}

/// Convert a JSON value to a finite number
///
/// Numbers are taken as-is and strings are parsed; anything else is not a number.
pub fn to_number(value: Option<&Value>) -> Option<f64> {
    let number = match value? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => parse_numeric_str(s)?,
        _ => return None,
    };

    number.is_finite().then_some(number)
}

/// Parse a decimal float (sign, fraction, exponent) or a `0x`/`0o`/`0b` integer literal
fn parse_numeric_str(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let radix = match text.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };

    match radix {
        Some(radix) => parse_radix_digits(&text[2..], radix),
        None => text.parse::<f64>().ok(),
    }
}

/// Digits of a prefixed integer literal; no sign, no separators, any width
fn parse_radix_digits(digits: &str, radix: u32) -> Option<f64> {
    if digits.is_empty() {
        return None;
    }

    digits.chars().try_fold(0.0_f64, |acc, c| {
        c.to_digit(radix)
            .map(|d| acc.mul_add(f64::from(radix), f64::from(d)))
    })
}

/// Write integral results without a fractional part
#[allow(clippy::trivially_copy_pass_by_ref, clippy::cast_possible_truncation)]
fn serialize_number<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_finite() && value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}
