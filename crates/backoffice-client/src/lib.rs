mod client;
mod config;
mod error;
mod form_data;
mod response;
mod session;
mod transport;

pub use client::Client;
pub use config::{ClientConfig, DEFAULT_API_PREFIX};
pub use error::ClientError;
pub use form_data::FormData;
pub use response::ApiResponse;
pub use session::Session;
pub use transport::{Transport, UreqTransport};
