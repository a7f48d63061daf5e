//! Custom Axum extractors.
//!
//! Provides `PixelPayload`, which merges URL query parameters and the request
//! body into one JSON object. Body fields win on key collisions. Bodies may be
//! JSON objects or `application/x-www-form-urlencoded`; anything else is
//! ignored rather than rejected, so extraction never fails.

use axum::{
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
};
use serde_json::{Map, Value};
use std::convert::Infallible;
use url::form_urlencoded;

/// Bodies larger than this are dropped.
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Query parameters merged with body fields.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelPayload(pub Value);

impl<S: Send + Sync> FromRequest<S> for PixelPayload {
    type Rejection = Infallible;

    async fn from_request(req: Request, _state: &S) -> Result<Self, Self::Rejection> {
        let mut merged = Map::new();
        if let Some(query) = req.uri().query() {
            merge_pairs(&mut merged, query.as_bytes());
        }

        let is_form = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"));

        match axum::body::to_bytes(req.into_body(), MAX_BODY_BYTES).await {
            Ok(body) if body.is_empty() => {}
            Ok(body) if is_form => merge_pairs(&mut merged, &body),
            Ok(body) => merge_json(&mut merged, &body),
            Err(e) => tracing::debug!(error = %e, "Failed to read pixel body, ignoring it"),
        }

        Ok(PixelPayload(Value::Object(merged)))
    }
}

fn merge_pairs(merged: &mut Map<String, Value>, input: &[u8]) {
    for (key, value) in form_urlencoded::parse(input) {
        merged.insert(key.into_owned(), Value::String(value.into_owned()));
    }
}

fn merge_json(merged: &mut Map<String, Value>, body: &[u8]) {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(fields)) => merged.extend(fields),
        Ok(_) => tracing::debug!("Pixel body is JSON but not an object, ignoring it"),
        Err(e) => tracing::debug!(error = %e, "Pixel body is not JSON, ignoring it"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use serde_json::json;

    async fn extract(req: Request) -> Value {
        let Ok(PixelPayload(value)) = PixelPayload::from_request(req, &()).await;
        value
    }

    #[tokio::test]
    async fn test_query_only() {
        let req = Request::builder()
            .uri("/pixel?pixel_id=px-1&page_url=https%3A%2F%2Fexample.com%2F")
            .body(Body::empty())
            .unwrap();
        assert_eq!(
            extract(req).await,
            json!({"pixel_id": "px-1", "page_url": "https://example.com/"})
        );
    }

    #[tokio::test]
    async fn test_json_body_overrides_query() {
        let req = Request::builder()
            .method("POST")
            .uri("/pixel?pixel_id=from-query&source=q")
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"pixel_id":"from-body","events":[{"a":1}]}"#))
            .unwrap();
        assert_eq!(
            extract(req).await,
            json!({"pixel_id": "from-body", "source": "q", "events": [{"a": 1}]})
        );
    }

    #[tokio::test]
    async fn test_form_body() {
        let req = Request::builder()
            .method("POST")
            .uri("/pixel?event_type=view")
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("event_type=click&first_name=Jane"))
            .unwrap();
        assert_eq!(
            extract(req).await,
            json!({"event_type": "click", "first_name": "Jane"})
        );
    }

    #[tokio::test]
    async fn test_untyped_json_body_without_content_type() {
        let req = Request::builder()
            .method("POST")
            .uri("/pixel")
            .header(CONTENT_TYPE, "text/plain")
            .body(Body::from(r#"{"events":[]}"#))
            .unwrap();
        assert_eq!(extract(req).await, json!({"events": []}));
    }

    #[tokio::test]
    async fn test_malformed_bodies_are_ignored() {
        for body in ["not json", "[1,2,3]", "\"text\""] {
            let req = Request::builder()
                .method("POST")
                .uri("/pixel?k=v")
                .body(Body::from(body))
                .unwrap();
            assert_eq!(extract(req).await, json!({"k": "v"}));
        }
    }

    #[tokio::test]
    async fn test_oversized_body_is_dropped() {
        let big = format!(r#"{{"pad":"{}"}}"#, "x".repeat(MAX_BODY_BYTES));
        let req = Request::builder()
            .method("POST")
            .uri("/pixel")
            .body(Body::from(big))
            .unwrap();
        assert_eq!(extract(req).await, json!({}));
    }
}
