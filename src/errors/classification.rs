use super::types::FetchError;

#[derive(Debug, Clone)]
pub struct ErrorClassification {
    pub error_type: &'static str,
    pub retryable: bool,
}

impl FetchError {
    /// Classify this error to determine its type and whether it can be retried.
    pub fn classify(&self) -> ErrorClassification {
        match self {
            FetchError::Timeout { .. } => ErrorClassification {
                error_type: "TimeoutError",
                retryable: true,
            },
            FetchError::Transport { .. } => ErrorClassification {
                error_type: "TransportError",
                retryable: true,
            },
            FetchError::HttpStatus { code: 429, .. } => ErrorClassification {
                error_type: "RateLimitError",
                retryable: true,
            },
            FetchError::HttpStatus { code, .. } if *code >= 500 => ErrorClassification {
                error_type: "UpstreamError",
                retryable: true,
            },

            // Client-side statuses and bad payloads won't improve on retry
            FetchError::HttpStatus { .. } => ErrorClassification {
                error_type: "HttpStatusError",
                retryable: false,
            },
            FetchError::Parse { .. } => ErrorClassification {
                error_type: "ParseError",
                retryable: false,
            },
        }
    }
}
