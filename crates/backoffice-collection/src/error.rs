use backoffice_client::ClientError;
use backoffice_query::FilterError;

#[derive(Debug, thiserror::Error)]
pub enum CollectionError {
    #[error("client error: {0}")]
    Client(#[from] ClientError),

    #[error("filter error: {0}")]
    Filter(#[from] FilterError),

    #[error("invalid list config: {0}")]
    Config(#[from] serde_json::Error),
}
