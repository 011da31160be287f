use serde::{Deserialize, Serialize};
use tower_api_client::{Error as ApiError, StatusCode};

#[derive(Debug)]
pub enum FreshApiError {
    /// The backend rejected the request and sent its error payload.
    Backend(StatusCode, ErrorBody),
    /// Transport or client-side failure.
    Internal(ApiError),
}

impl From<ApiError> for FreshApiError {
    fn from(value: ApiError) -> Self {
        match value {
            ApiError::ClientError(status, detail) | ApiError::ServerError(status, detail) => {
                // The backend sends {"error": "...", "details": [...]} for
                // validation failures and a bare message otherwise.
                let body = serde_json::from_str(&detail).unwrap_or_else(|_| ErrorBody {
                    error: detail,
                    details: None,
                });
                FreshApiError::Backend(status, body)
            }
            e => FreshApiError::Internal(e),
        }
    }
}

impl std::fmt::Display for FreshApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FreshApiError::Internal(e) => write!(f, "Internal error: {}", e),
            FreshApiError::Backend(status, body) => match &body.details {
                Some(details) if !details.is_empty() => {
                    write!(f, "({}) {}: {}", status, body.error, details[0].message)
                }
                _ => write!(f, "({}) {}", status, body.error),
            },
        }
    }
}

impl std::error::Error for FreshApiError {}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<ValidationDetail>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationDetail {
    pub code: String,
    pub message: String,
    pub path: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_validation_payload() {
        let raw = r#"{"error":"Validation error","details":[{"code":"too_small","message":"items must not be empty","path":["items"]}]}"#;
        let body: ErrorBody = serde_json::from_str(raw).unwrap();
        assert_eq!(body.error, "Validation error");

        let rendered = FreshApiError::Backend(StatusCode::BAD_REQUEST, body).to_string();
        assert!(rendered.contains("Validation error"));
        assert!(rendered.contains("items must not be empty"));
    }

    #[test]
    fn renders_bare_messages_without_details() {
        let body = ErrorBody {
            error: "upstream exploded".to_string(),
            details: None,
        };
        let rendered = FreshApiError::Backend(StatusCode::INTERNAL_SERVER_ERROR, body).to_string();
        assert!(rendered.contains("upstream exploded"));
    }
}
