use http::{Method, Request, header};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::form_data::FormData;
use crate::response::ApiResponse;
use crate::session::Session;
use crate::transport::{Transport, UreqTransport};

/// Request gateway for the `/api/v1` REST surface.
pub struct Client<T: Transport = UreqTransport> {
    config: ClientConfig,
    transport: T,
    session: Session,
}

impl Client<UreqTransport> {
    pub fn new(config: ClientConfig) -> Self {
        let transport = UreqTransport::new(config.timeout);
        Self::with_transport(config, transport)
    }
}

impl<T: Transport> Client<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self {
            config,
            transport,
            session: Session::new(),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    // ── JSON requests ───────────────────────────────────────────

    pub fn get(&self, path: &str) -> Result<ApiResponse, ClientError> {
        self.send(Method::GET, path, None)
    }

    pub fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ApiResponse, ClientError> {
        self.send(Method::POST, path, Some(serde_json::to_vec(body)?))
    }

    pub fn patch<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ApiResponse, ClientError> {
        self.send(Method::PATCH, path, Some(serde_json::to_vec(body)?))
    }

    pub fn put<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<ApiResponse, ClientError> {
        self.send(Method::PUT, path, Some(serde_json::to_vec(body)?))
    }

    pub fn delete(&self, path: &str, body: Option<&Value>) -> Result<ApiResponse, ClientError> {
        let body = body.map(serde_json::to_vec).transpose()?;
        self.send(Method::DELETE, path, body)
    }

    /// Sends `method` with an optional JSON body already serialised.
    pub fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<ApiResponse, ClientError> {
        let mut builder = Request::builder()
            .method(method)
            .uri(self.config.url(path))
            .header(header::ACCEPT, "application/json");
        if body.is_some() {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
        }
        let request = builder.body(body.unwrap_or_default())?;
        self.execute(request)
    }

    // ── Multipart uploads ───────────────────────────────────────

    /// Posts files and fields. The content type comes from the form itself.
    pub fn post_form_files(&self, path: &str, form: &FormData) -> Result<ApiResponse, ClientError> {
        let (content_type, body) = form.encode();
        let request = Request::builder()
            .method(Method::POST)
            .uri(self.config.url(path))
            .header(header::ACCEPT, "application/json")
            .header(header::CONTENT_TYPE, content_type)
            .body(body)?;
        self.execute(request)
    }

    fn execute(&self, request: Request<Vec<u8>>) -> Result<ApiResponse, ClientError> {
        let method = request.method().clone();
        let uri = request.uri().to_string();
        debug!(%method, %uri, "sending request");

        let response = self.transport.send(request)?;
        let status = response.status().as_u16();
        let response = ApiResponse::new(status, parse_body(response.body()));
        debug!(%method, %uri, status, "received response");

        if response.is_success() {
            return Ok(response);
        }
        if status == 401 {
            warn!(%uri, "authentication expired");
            self.session.mark_logged_out();
            return Err(ClientError::AuthExpired(response));
        }
        Err(ClientError::Status(response))
    }
}

/// JSON when possible, otherwise the raw text.
fn parse_body(bytes: &[u8]) -> Value {
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}
