//! Uniform JSON and plain-text responses for the function endpoints.

use axum::{
    body::Bytes,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::{Serialize, de::DeserializeOwned};

use crate::error::{AppError, AppResult};

const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";
const TEXT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// Deserialize an inbound JSON body, rejecting malformed input as a 400.
pub fn read_json<T: DeserializeOwned>(body: &Bytes) -> AppResult<T> {
    serde_json::from_slice(body).map_err(|err| AppError::BadRequest(err.to_string()))
}

pub fn ok<T: Serialize>(body: &T) -> Response {
    json(StatusCode::OK, body)
}

pub fn created<T: Serialize>(body: &T) -> Response {
    json(StatusCode::CREATED, body)
}

pub fn bad_request(message: impl Into<String>) -> Response {
    text(StatusCode::BAD_REQUEST, message)
}

pub fn not_found(message: impl Into<String>) -> Response {
    text(StatusCode::NOT_FOUND, message)
}

pub fn no_content() -> Response {
    StatusCode::NO_CONTENT.into_response()
}

pub fn json<T: Serialize>(status: StatusCode, body: &T) -> Response {
    match serde_json::to_vec(body) {
        Ok(bytes) => (status, [(header::CONTENT_TYPE, JSON_CONTENT_TYPE)], bytes).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "failed to serialize response body");
            text(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
        }
    }
}

pub fn text(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, TEXT_CONTENT_TYPE)],
        message.into(),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Ping {
        status: String,
    }

    #[test]
    fn created_sets_status_and_json_content_type() {
        let resp = created(&serde_json::json!({ "id": "C1" }));
        assert_eq!(resp.status(), StatusCode::CREATED);
        assert_eq!(resp.headers()[header::CONTENT_TYPE], JSON_CONTENT_TYPE);
    }

    #[test]
    fn not_found_is_plain_text() {
        let resp = not_found("Order not found");
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(resp.headers()[header::CONTENT_TYPE], TEXT_CONTENT_TYPE);
    }

    #[test]
    fn no_content_has_204() {
        assert_eq!(no_content().status(), StatusCode::NO_CONTENT);
    }

    #[test]
    fn read_json_accepts_valid_and_rejects_malformed_bodies() {
        let parsed: Ping = read_json(&Bytes::from_static(br#"{"status":"ok"}"#)).expect("valid");
        assert_eq!(parsed, Ping { status: "ok".into() });

        let err = read_json::<Ping>(&Bytes::from_static(b"{not json")).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }
}
