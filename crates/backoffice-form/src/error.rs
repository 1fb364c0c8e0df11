#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("invalid date '{0}', expected DD/MM/YYYY")]
    InvalidDate(String),

    #[error("invalid field path: '{0}'")]
    InvalidPath(String),
}
