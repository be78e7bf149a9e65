//! Response envelopes.
//!
//! [`RestResponse`] is the normalized success/error JSON structure returned
//! by every REST-style endpoint; [`RawResponse`] is the transport-level shape
//! raw handlers produce. Both carry "unset" legs that the pipeline fills with
//! defaults just before the response is written.

use bytes::Bytes;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Content type of every REST response.
pub const JSON_CONTENT_TYPE: &str = "application/json;charset=utf-8";

/// Default content type for raw responses.
pub const TEXT_CONTENT_TYPE: &str = "text/plain";

/// Default body for responses whose handler produced nothing.
pub const DEFAULT_BODY: &str = "Success";

/// Resolved outcome marker on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    Error,
}

/// Transport-level response: status code, content type, body.
///
/// Legs left `None` by the handler are filled by [`RawResponse::finalize`]
/// with 200 / `text/plain` / `"Success"`.
#[derive(Debug, Clone, Default)]
pub struct RawResponse {
    status_code: Option<StatusCode>,
    content_type: Option<String>,
    body: Option<Bytes>,
}

impl RawResponse {
    /// Creates a response with every leg unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the status code.
    pub fn with_status(mut self, status_code: StatusCode) -> Self {
        self.status_code = Some(status_code);
        self
    }

    /// Sets the content type.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Sets the body.
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Fills unset legs with transport defaults.
    pub fn finalize(self) -> (StatusCode, String, Bytes) {
        (
            self.status_code.unwrap_or(StatusCode::OK),
            self.content_type
                .unwrap_or_else(|| TEXT_CONTENT_TYPE.to_string()),
            self.body.unwrap_or_else(|| Bytes::from_static(DEFAULT_BODY.as_bytes())),
        )
    }
}

/// Normalized success/error envelope.
///
/// Serialization omits `message`, `data`, and `error` entirely when unset;
/// `status` is always present once the envelope has been finalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RestResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    status: Option<ResponseStatus>,

    #[serde(skip)]
    status_code: Option<StatusCode>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    message: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    data: Option<JsonValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl RestResponse {
    /// Creates an empty envelope; finalization turns it into the default
    /// success response.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a success envelope carrying data.
    pub fn with_data(data: JsonValue) -> Self {
        Self {
            data: Some(data),
            ..Self::default()
        }
    }

    /// Creates an error envelope from a handler failure. The status code is
    /// left unset so finalization derives 500, unless the caller assigns a
    /// more specific one.
    pub fn from_error(error: impl ToString) -> Self {
        Self {
            error: Some(error.to_string()),
            ..Self::default()
        }
    }

    /// Sets an explicit status marker, overriding derivation.
    pub fn with_status(mut self, status: ResponseStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets an explicit status code.
    pub fn with_status_code(mut self, status_code: StatusCode) -> Self {
        self.status_code = Some(status_code);
        self
    }

    /// Sets the human-readable message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Sets the error text.
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    /// Resolves the status code and status marker.
    ///
    /// - code defaults to 500 when an error is set, 200 otherwise
    /// - status, when not explicitly set, is `success` for codes in
    ///   [200, 400) and `error` for everything else
    pub fn finalized(mut self) -> (StatusCode, Self) {
        let code = self.status_code.unwrap_or(if self.error.is_some() {
            StatusCode::INTERNAL_SERVER_ERROR
        } else {
            StatusCode::OK
        });
        self.status_code = Some(code);

        if self.status.is_none() {
            self.status = Some(if (200..400).contains(&code.as_u16()) {
                ResponseStatus::Success
            } else {
                ResponseStatus::Error
            });
        }

        (code, self)
    }

    /// Returns the resolved status marker, if finalized or explicitly set.
    pub fn status(&self) -> Option<ResponseStatus> {
        self.status
    }

    /// Returns the status code, if finalized or explicitly set.
    pub fn status_code(&self) -> Option<StatusCode> {
        self.status_code
    }

    /// Returns the message, if set.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Returns the data payload, if set.
    pub fn data(&self) -> Option<&JsonValue> {
        self.data.as_ref()
    }

    /// Returns the error text, if set.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn empty_envelope_finalizes_to_success_200() {
        let (code, envelope) = RestResponse::new().finalized();
        assert_eq!(code, StatusCode::OK);
        assert_eq!(envelope.status(), Some(ResponseStatus::Success));
    }

    #[test]
    fn error_envelope_defaults_to_500() {
        let (code, envelope) = RestResponse::from_error("boom").finalized();
        assert_eq!(code, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(envelope.status(), Some(ResponseStatus::Error));
        assert_eq!(envelope.error(), Some("boom"));
    }

    #[test]
    fn explicit_status_marker_overrides_derivation() {
        let (code, envelope) = RestResponse::new()
            .with_status(ResponseStatus::Error)
            .with_status_code(StatusCode::OK)
            .finalized();
        assert_eq!(code, StatusCode::OK);
        assert_eq!(envelope.status(), Some(ResponseStatus::Error));
    }

    #[test]
    fn explicit_status_code_is_preserved() {
        let (code, envelope) = RestResponse::new()
            .with_status_code(StatusCode::NOT_FOUND)
            .with_error("missing")
            .finalized();
        assert_eq!(code, StatusCode::NOT_FOUND);
        assert_eq!(envelope.status(), Some(ResponseStatus::Error));
    }

    #[test]
    fn serialization_omits_unset_fields() {
        let (_, envelope) = RestResponse::with_data(json!({"k": "v"})).finalized();
        let wire = serde_json::to_value(&envelope).unwrap();

        assert_eq!(wire["status"], "success");
        assert_eq!(wire["data"]["k"], "v");
        assert!(wire.get("message").is_none());
        assert!(wire.get("error").is_none());
    }

    #[test]
    fn data_round_trips_through_json() {
        let payload = json!({"id": "abc123", "n": 3});
        let (_, envelope) = RestResponse::with_data(payload.clone()).finalized();

        let wire = serde_json::to_string(&envelope).unwrap();
        let decoded: RestResponse = serde_json::from_str(&wire).unwrap();

        assert_eq!(decoded.status(), Some(ResponseStatus::Success));
        assert_eq!(decoded.data(), Some(&payload));
        assert!(decoded.message().is_none());
        assert!(decoded.error().is_none());
    }

    #[test]
    fn raw_response_fills_transport_defaults() {
        let (code, content_type, body) = RawResponse::new().finalize();
        assert_eq!(code, StatusCode::OK);
        assert_eq!(content_type, TEXT_CONTENT_TYPE);
        assert_eq!(&body[..], DEFAULT_BODY.as_bytes());
    }

    #[test]
    fn raw_response_keeps_explicit_legs() {
        let (code, content_type, body) = RawResponse::new()
            .with_status(StatusCode::NOT_FOUND)
            .with_content_type("application/octet-stream")
            .with_body(&b"bin"[..])
            .finalize();
        assert_eq!(code, StatusCode::NOT_FOUND);
        assert_eq!(content_type, "application/octet-stream");
        assert_eq!(&body[..], b"bin");
    }

    proptest! {
        #[test]
        fn derived_status_follows_the_2xx_3xx_rule(code in 100u16..600) {
            let status_code = StatusCode::from_u16(code).unwrap();
            let (_, envelope) = RestResponse::new()
                .with_status_code(status_code)
                .finalized();

            let expected = if (200..400).contains(&code) {
                ResponseStatus::Success
            } else {
                ResponseStatus::Error
            };
            prop_assert_eq!(envelope.status(), Some(expected));
        }
    }
}
