use actix_web::{HttpResponse, ResponseError, http::StatusCode};

#[derive(thiserror::Error, Debug)]
pub enum ScrapeError {
    #[error("Missing 'url'")]
    MissingUrl,
    #[error("Invalid URL.")]
    InvalidUrl,
    #[error("Only {host} is allowed.")]
    HostNotAllowed { host: String },
    #[error("Fetch failed with {0}")]
    UpstreamStatus(u16),
    #[error("{0}")]
    Http(#[from] reqwest::Error),
    #[error("{0}")]
    Internal(String),
}

impl ScrapeError {
    /// Message sent back to the caller; never empty.
    pub fn message(&self) -> String {
        let msg = self.to_string();
        if msg.trim().is_empty() {
            "Unknown error".to_string()
        } else {
            msg
        }
    }
}

impl From<serde_json::Error> for ScrapeError {
    fn from(e: serde_json::Error) -> Self {
        ScrapeError::Internal(e.to_string())
    }
}

impl ResponseError for ScrapeError {
    fn status_code(&self) -> StatusCode {
        match self {
            ScrapeError::MissingUrl | ScrapeError::InvalidUrl | ScrapeError::HostNotAllowed { .. } => {
                StatusCode::BAD_REQUEST
            }
            ScrapeError::UpstreamStatus(code) => {
                StatusCode::from_u16(*code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            ScrapeError::Http(_) | ScrapeError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({ "error": self.message() }))
    }
}
