//! JSON request-body extraction with enveloped rejections.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};

use crate::error::RegistryError;

/// JSON body extractor for request payloads.
///
/// Behaves like [`axum::Json`] except that a body that fails to parse
/// (wrong content type, malformed JSON, a string where a number is
/// expected) becomes [`RegistryError::Validation`], so the client gets
/// the uniform `{success: false, error}` envelope with a 400 instead of
/// axum's plain-text rejection.
#[derive(Debug)]
pub struct JsonBody<T>(
    /// The deserialized request body.
    pub T,
);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    axum::Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = RegistryError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let axum::Json(value) = axum::Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| RegistryError::Validation(rejection.body_text()))?;
        Ok(Self(value))
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request as HttpRequest;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Point {
        x: f64,
    }

    fn json_request(body: &str) -> Request {
        let Ok(req) = HttpRequest::builder()
            .method("POST")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
        else {
            panic!("request must build");
        };
        req
    }

    #[tokio::test]
    async fn parse_failure_becomes_validation() {
        let req = json_request(r#"{"x": "not-a-number"}"#);
        let Err(RegistryError::Validation(msg)) = JsonBody::<Point>::from_request(req, &()).await
        else {
            panic!("type mismatch must map to a validation error");
        };
        assert!(!msg.is_empty());
    }

    #[tokio::test]
    async fn valid_body_deserializes() {
        let req = json_request(r#"{"x": 1.5}"#);
        let Ok(JsonBody(point)) = JsonBody::<Point>::from_request(req, &()).await else {
            panic!("valid body must parse");
        };
        assert!((point.x - 1.5).abs() < f64::EPSILON);
    }
}
