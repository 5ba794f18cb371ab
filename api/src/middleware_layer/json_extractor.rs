//! Rewrites plain-text extractor rejections into the JSON envelope.

use axum::{
    body::{Body, Bytes},
    http::{HeaderValue, Request, StatusCode, header::CONTENT_TYPE},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use tracing::debug;

use crate::core::http::response_envelope::{ApiErrorDetail, ApiResponse};

const REQUEST_ID: &str = "X-Request-Id";

async fn take_body(res: Response) -> (axum::http::response::Parts, Bytes) {
    let (parts, body) = res.into_parts();
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .unwrap_or_default();
    (parts, bytes)
}

fn guess_path_from_serde_msg(msg: &str) -> Option<String> {
    ["question", "session_id", "index"]
        .into_iter()
        .find(|key| msg.contains(key))
        .map(str::to_string)
}

fn ensure_request_id(parts: &mut axum::http::response::Parts) -> String {
    if let Some(v) = parts.headers.get(REQUEST_ID).and_then(|h| h.to_str().ok()) {
        if !v.trim().is_empty() {
            return v.to_string();
        }
    }
    let nanos = Utc::now()
        .timestamp_nanos_opt()
        .unwrap_or_else(|| Utc::now().timestamp_micros() * 1000);
    let id = format!("req-{nanos}");
    if let Ok(value) = HeaderValue::from_str(&id) {
        parts.headers.insert(REQUEST_ID, value);
    }
    id
}

fn is_json(parts: &axum::http::response::Parts) -> bool {
    parts
        .headers
        .get(CONTENT_TYPE)
        .and_then(|h| h.to_str().ok())
        .is_some_and(|ct| ct.starts_with("application/json"))
}

fn code_for(status: StatusCode) -> Option<&'static str> {
    match status {
        StatusCode::BAD_REQUEST => Some("BAD_REQUEST"),
        StatusCode::UNPROCESSABLE_ENTITY => Some("UNPROCESSABLE_ENTITY"),
        StatusCode::UNSUPPORTED_MEDIA_TYPE => Some("UNSUPPORTED_MEDIA_TYPE"),
        _ => None,
    }
}

pub async fn json_error_mapper(req: Request<Body>, next: Next) -> Response {
    let res = next.run(req).await;
    let Some(code) = code_for(res.status()) else {
        return res;
    };

    let (mut parts, bytes) = take_body(res).await;
    // Handler errors are already enveloped.
    if is_json(&parts) {
        return Response::from_parts(parts, Body::from(bytes));
    }

    let original = String::from_utf8_lossy(&bytes);
    let req_id = ensure_request_id(&mut parts);
    debug!(request_id = %req_id, code, body = %original.trim(), "extractor rejection mapped");

    let detail = ApiErrorDetail {
        path: guess_path_from_serde_msg(&original),
        hint: if original.contains("missing field") {
            Some("Send a JSON object like { \"question\": \"...\" }.".into())
        } else if original.contains("Content-Type") {
            Some("Set the header Content-Type: application/json.".into())
        } else {
            None
        },
    };

    let envelope = ApiResponse::<()>::error(code, original.trim(), vec![detail]);
    let body = serde_json::to_vec(&envelope).unwrap_or_else(|_| bytes.to_vec());

    parts
        .headers
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    parts.headers.remove(axum::http::header::CONTENT_LENGTH);

    Response::from_parts(parts, Body::from(body))
}
