use crate::response::ApiResponse;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-2xx status other than 401.
    #[error("request failed with status {}", .0.status)]
    Status(ApiResponse),

    /// 401. The response is kept for its message.
    #[error("authentication expired")]
    AuthExpired(ApiResponse),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("config error: {0}")]
    Config(String),
}

impl ClientError {
    /// HTTP status behind this error, when the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status(response) | ClientError::AuthExpired(response) => {
                Some(response.status)
            }
            _ => None,
        }
    }

    /// The server's response, when there was one.
    pub fn response(&self) -> Option<&ApiResponse> {
        match self {
            ClientError::Status(response) | ClientError::AuthExpired(response) => Some(response),
            _ => None,
        }
    }
}

impl From<ureq::Error> for ClientError {
    fn from(e: ureq::Error) -> Self {
        ClientError::Network(e.to_string())
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::Serialization(e.to_string())
    }
}

impl From<http::Error> for ClientError {
    fn from(e: http::Error) -> Self {
        ClientError::InvalidRequest(e.to_string())
    }
}
