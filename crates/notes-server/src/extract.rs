//! JSON body extraction with API-shaped rejections.
//!
//! axum's `Json` rejects unparseable bodies with plain-text 4xx responses.
//! `JsonBody` turns those into the usual `{ "message": ... }` 400 so clients
//! see one error format.
//!
//! A request without a body is read as `{}`, so the handlers' own field
//! checks report what is missing.

use axum::{
    Json,
    body::Bytes,
    extract::{FromRequest, Request},
    http::{HeaderMap, header::CONTENT_TYPE},
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Extracts and deserializes a JSON request body.
pub struct JsonBody<T>(pub T);

fn invalid_body(reason: impl std::fmt::Display) -> ApiError {
    tracing::debug!(%reason, "Rejected request body");
    ApiError::Validation(format!("Invalid request body: {}", reason))
}

/// `application/json` or any `+json` media type.
fn has_json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return false;
    };
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/json"
        || (essence.starts_with("application/") && essence.ends_with("+json"))
}

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let json_typed = has_json_content_type(req.headers());
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| invalid_body(rejection.body_text()))?;

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return serde_json::from_str("{}")
                .map(Self)
                .map_err(invalid_body);
        }

        if !json_typed {
            return Err(invalid_body(
                "Expected request with `Content-Type: application/json`",
            ));
        }

        match Json::<T>::from_bytes(&bytes) {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(invalid_body(rejection.body_text())),
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::HeaderValue;
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct Payload {
        #[serde(default)]
        id: Option<String>,
    }

    fn request(content_type: Option<&str>, body: &'static str) -> Request {
        let mut builder = Request::builder().method("POST").uri("/notes");
        if let Some(content_type) = content_type {
            builder = builder.header(CONTENT_TYPE, content_type);
        }
        builder.body(Body::from(body)).unwrap()
    }

    async fn extract(req: Request) -> Result<JsonBody<Payload>, ApiError> {
        JsonBody::<Payload>::from_request(req, &()).await
    }

    #[test]
    fn test_json_content_type_detection() {
        let mut headers = HeaderMap::new();
        assert!(!has_json_content_type(&headers));

        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json; charset=utf-8"));
        assert!(has_json_content_type(&headers));

        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/merge-patch+json"));
        assert!(has_json_content_type(&headers));

        headers.insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        assert!(!has_json_content_type(&headers));
    }

    #[tokio::test]
    async fn test_empty_body_reads_as_empty_object() {
        let JsonBody(parsed) = extract(request(None, "")).await.unwrap();
        assert!(parsed.id.is_none());

        let JsonBody(parsed) = extract(request(Some("application/json"), "  \n")).await.unwrap();
        assert!(parsed.id.is_none());
    }

    #[tokio::test]
    async fn test_json_body_is_parsed() {
        let JsonBody(parsed) = extract(request(Some("application/json"), r#"{"id": "abc"}"#))
            .await
            .unwrap();
        assert_eq!(parsed.id.as_deref(), Some("abc"));
    }

    #[tokio::test]
    async fn test_untyped_body_is_rejected() {
        let Err(err) = extract(request(None, r#"{"id": "abc"}"#)).await else {
            panic!("expected rejection");
        };
        assert!(err.message().contains("Content-Type"));
    }

    #[tokio::test]
    async fn test_unparseable_body_is_rejected() {
        let Err(err) = extract(request(Some("application/json"), "{not json")).await else {
            panic!("expected rejection");
        };
        assert!(err.message().starts_with("Invalid request body"));
    }
}
