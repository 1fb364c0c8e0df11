use backoffice_client::{Client, ClientError, Transport};
use serde_json::Value;

/// Loads the `data` payload for a collection url.
///
/// Implemented by the gateway client; tests and embedders can supply their own.
pub trait Fetcher {
    fn fetch(&self, url: &str) -> Result<Value, ClientError>;
}

impl<T: Transport> Fetcher for Client<T> {
    fn fetch(&self, url: &str) -> Result<Value, ClientError> {
        Ok(self.get(url)?.into_data())
    }
}
