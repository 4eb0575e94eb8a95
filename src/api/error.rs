use thiserror::Error;

/// Generic text used when neither the server nor the transport said anything.
pub const FALLBACK_MESSAGE: &str = "An error occurred";

/// Every failure the client can report. All variants render to one display
/// string; the variant only tells the caller where the failure came from.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    /// DNS, connect, timeout or any other failure before a status arrived.
    #[error("{}", non_blank(.0))]
    Transport(String),
    /// Non-2xx response. `message` is the server-supplied text when the body
    /// carried one.
    #[error("{}", status_message(.status, .message.as_deref()))]
    Status { status: u16, message: Option<String> },
    /// 2xx envelope with `success: false`.
    #[error("{}", non_blank(.message))]
    Rejected {
        message: String,
        error_code: Option<String>,
    },
    /// 2xx body that does not match the declared type.
    #[error("{}", non_blank(.0))]
    Decode(String),
}

impl ApiError {
    /// The message shown to users.
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// HTTP status, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

fn non_blank(text: &str) -> &str {
    if text.trim().is_empty() {
        FALLBACK_MESSAGE
    } else {
        text
    }
}

fn status_message(status: &u16, message: Option<&str>) -> String {
    match message.map(str::trim).filter(|m| !m.is_empty()) {
        Some(m) => m.to_string(),
        None => format!("Request failed with status code {}", status),
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return ApiError::Decode(err.to_string());
        }
        if let Some(status) = err.status() {
            return ApiError::Status {
                status: status.as_u16(),
                message: None,
            };
        }
        let message = if err.is_timeout() {
            "Request timed out".to_string()
        } else if err.is_connect() {
            "Network Error".to_string()
        } else {
            err.to_string()
        };
        ApiError::Transport(message)
    }
}
