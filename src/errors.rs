use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("session store error: {0}")]
    SessionStore(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("not found: {0}")]
    NotFound(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::SessionStore(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
        };

        let body = serde_json::json!({ "error": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}

/// Failures raised by the booking operations adapter.
#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("booking {0} not found")]
    NotFound(String),

    #[error("booking provider returned {status}: {body}")]
    Http { status: u16, body: String },

    #[error("booking provider request failed: {0}")]
    Request(String),

    #[error("failed to decode booking provider response: {0}")]
    Decode(String),

    #[error("booking provider timed out")]
    Timeout,
}

impl From<reqwest::Error> for BookingError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            BookingError::Timeout
        } else if e.is_decode() {
            BookingError::Decode(e.to_string())
        } else {
            BookingError::Request(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_app_error_status_codes() {
        let res = AppError::BadRequest("message must not be empty".to_string()).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);

        let res = AppError::NotFound("session abc".to_string()).into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "not found: session abc");
    }

    #[test]
    fn test_booking_error_messages() {
        assert_eq!(
            BookingError::NotFound("ABC1234".to_string()).to_string(),
            "booking ABC1234 not found"
        );
        assert_eq!(
            BookingError::Http { status: 500, body: "boom".to_string() }.to_string(),
            "booking provider returned 500: boom"
        );
    }
}
