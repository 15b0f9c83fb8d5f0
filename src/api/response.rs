//! Transport metadata envelope for API responses.

use reqwest::header::HeaderMap;
use reqwest::StatusCode;

use super::error::{ApiError, Result};

/// Metadata and raw body captured from a completed HTTP exchange.
///
/// The API layer treats the envelope as opaque: it is handed back to the
/// caller next to every decoded value, and attached to errors so a failed
/// call can still be inspected (status, headers, raw body).
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl ApiResponse {
    /// Drain a `reqwest` response into an owned envelope.
    ///
    /// Consumes the response body entirely. A body that cannot be read
    /// surfaces as [`ApiError::ReadBody`].
    pub(crate) async fn read(response: reqwest::Response) -> Result<Self> {
        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(ApiError::ReadBody)?
            .to_vec();

        Ok(Self {
            status,
            headers,
            body,
        })
    }

    /// Build an envelope from parts. Intended for tests.
    #[cfg(test)]
    pub(crate) fn from_parts(status: StatusCode, headers: HeaderMap, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// The HTTP status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// The response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// The raw response body.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// The response body as text, lossily decoded.
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Decode the raw body as JSON into `T`.
    ///
    /// On failure the error carries a copy of this envelope so the caller
    /// can still look at what the server actually sent.
    pub fn decode<T: serde::de::DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(|source| ApiError::Decode {
            source,
            response: Box::new(self.clone()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope(status: StatusCode, body: &str) -> ApiResponse {
        ApiResponse::from_parts(status, HeaderMap::new(), body.as_bytes().to_vec())
    }

    #[test]
    fn test_decode_valid_json() {
        let response = envelope(StatusCode::OK, r#"{"name": "fred"}"#);
        let value: serde_json::Value = response.decode().unwrap();
        assert_eq!(value["name"], "fred");
    }

    #[test]
    fn test_decode_error_keeps_envelope() {
        let response = envelope(StatusCode::CREATED, "not json at all");
        let err = response.decode::<serde_json::Value>().unwrap_err();

        match err {
            ApiError::Decode { response, .. } => {
                assert_eq!(response.status(), StatusCode::CREATED);
                assert_eq!(response.body_text(), "not json at all");
            }
            other => panic!("Expected Decode error, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_error_message_omits_body() {
        // The error text must not repeat whatever the server sent back.
        let response = envelope(StatusCode::OK, "secret-payload-garbage");
        let err = response.decode::<serde_json::Value>().unwrap_err();
        assert!(!err.to_string().contains("secret-payload-garbage"));
    }

    #[test]
    fn test_body_text_lossy() {
        let response =
            ApiResponse::from_parts(StatusCode::OK, HeaderMap::new(), vec![0xff, 0xfe]);
        assert!(!response.body_text().is_empty());
    }
}
