//! RFC 7807 problem documents for 5xx responses.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

const INTERNAL_ERROR_TYPE: &str = "https://tools.ietf.org/html/rfc9110#section-15.6.1";
const INTERNAL_ERROR_TITLE: &str = "An error occurred while processing your request.";

/// Problem details body (`application/problem+json`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub status: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl Problem {
    /// 500 problem with a route-specific `detail`.
    pub fn internal(detail: impl Into<String>) -> Self {
        Self {
            kind: INTERNAL_ERROR_TYPE.to_string(),
            title: INTERNAL_ERROR_TITLE.to_string(),
            status: StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
            detail: Some(detail.into()),
        }
    }
}

impl IntoResponse for Problem {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        match serde_json::to_string(&self) {
            Ok(body) => (
                status,
                [(header::CONTENT_TYPE, "application/problem+json")],
                body,
            )
                .into_response(),
            Err(_) => status.into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_internal_problem_shape() {
        let value = serde_json::to_value(Problem::internal("Failed to retrieve tools")).unwrap();
        assert_eq!(value["status"], 500);
        assert_eq!(value["detail"], "Failed to retrieve tools");
        assert_eq!(value["type"], INTERNAL_ERROR_TYPE);
    }

    #[test]
    fn test_response_headers() {
        let response = Problem::internal("boom").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/problem+json"
        );
    }
}
