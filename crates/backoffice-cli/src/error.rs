use backoffice_client::ClientError;
use backoffice_collection::CollectionError;
use backoffice_form::FormError;
use backoffice_query::FilterError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Collection(#[from] CollectionError),

    #[error(transparent)]
    Filter(#[from] FilterError),

    #[error(transparent)]
    Form(#[from] FormError),

    #[error("unknown column: {0}")]
    UnknownColumn(String),

    #[error("failed to load collection: {0}")]
    Fetch(String),
}
