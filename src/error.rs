use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Every failure an API handler can answer with.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(&'static str),
    #[error("failed to parse body")]
    Decode,
    #[error("{error}")]
    Storage {
        error: &'static str,
        details: Option<String>,
    },
    #[error("route not found")]
    RouteNotFound,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<&'a str>,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::Decode => StatusCode::BAD_REQUEST,
            ApiError::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::RouteNotFound => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        let details = match &self {
            ApiError::Storage { details, .. } => details.as_deref(),
            _ => None,
        };
        let body = ErrorBody {
            error: &message,
            details,
        };
        (self.status_code(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(err: ApiError) -> (StatusCode, serde_json::Value) {
        let res = err.into_response();
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn validation_is_bad_request_without_details() {
        let (status, json) = body_json(ApiError::Validation("invalid id")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json, serde_json::json!({ "error": "invalid id" }));
    }

    #[tokio::test]
    async fn storage_carries_details_when_present() {
        let (status, json) = body_json(ApiError::Storage {
            error: "failed to list users",
            details: Some("connection refused".into()),
        })
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"], "failed to list users");
        assert_eq!(json["details"], "connection refused");

        let (_, json) = body_json(ApiError::Storage {
            error: "failed to list users",
            details: None,
        })
        .await;
        assert!(json.get("details").is_none());
    }

    #[tokio::test]
    async fn route_not_found_is_404() {
        let (status, json) = body_json(ApiError::RouteNotFound).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["error"], "route not found");
    }
}
