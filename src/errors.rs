use crate::upstream::UpstreamError;
use axum::http::StatusCode;
use tracing::error;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl From<UpstreamError> for AppError {
    fn from(err: UpstreamError) -> Self {
        // Detail goes to the log; the user gets a generic failure.
        error!("upstream request failed: {err}");
        Self {
            status: StatusCode::BAD_GATEWAY,
            message: "The club backend is not responding. Please try again.".to_string(),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
