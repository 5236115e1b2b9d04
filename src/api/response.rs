use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde_json::Value;

use crate::client::protocol::MEDIA_TYPE_JSON_LD;

/// A JSON-LD document served as `application/ld+json`.
#[derive(Debug, Clone)]
pub struct JsonLd(pub Value);

impl IntoResponse for JsonLd {
    fn into_response(self) -> Response {
        (
            StatusCode::OK,
            [(header::CONTENT_TYPE, MEDIA_TYPE_JSON_LD)],
            self.0.to_string(),
        )
            .into_response()
    }
}
