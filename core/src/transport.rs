//! The IO seam between the core and its host.
//!
//! # Design
//! A `Transport` performs one HTTP round-trip and reports either a response
//! (of any status) or a `TransportError`. `ResourceClient` pairs a transport
//! with a `PostClient` to offer the five operations as plain calls, folding
//! transport failures into the same `ClientError` a bad status would give.
//! There is exactly one attempt per call.

use tracing::warn;

use crate::client::{Operation, PostClient};
use crate::error::{ClientError, TransportError};
use crate::http::{HttpRequest, HttpResponse};
use crate::types::{Post, PostId};

/// Outcome of executing one request.
pub type Exchange = Result<HttpResponse, TransportError>;

/// Performs HTTP round-trips on behalf of the core.
pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Exchange;
}

impl<F> Transport for F
where
    F: Fn(&HttpRequest) -> Exchange,
{
    fn execute(&self, request: &HttpRequest) -> Exchange {
        self(request)
    }
}

/// Collapse a transport failure into the operation's client error.
pub(crate) fn settle(exchange: Exchange, op: Operation) -> Result<HttpResponse, ClientError> {
    exchange.map_err(|e| {
        warn!(?op, error = %e, "request did not complete");
        op.failure()
    })
}

/// Typed facade over a `PostClient` and a `Transport`.
#[derive(Debug, Clone)]
pub struct ResourceClient<T> {
    client: PostClient,
    transport: T,
}

impl<T: Transport> ResourceClient<T> {
    pub fn new(client: PostClient, transport: T) -> Self {
        Self { client, transport }
    }

    pub fn client(&self) -> &PostClient {
        &self.client
    }

    pub fn list(&self) -> Result<Vec<Post>, ClientError> {
        let response = self.send(&self.client.build_list(), Operation::List)?;
        self.client.parse_list(response)
    }

    pub fn get(&self, id: &PostId) -> Result<Post, ClientError> {
        let response = self.send(&self.client.build_get(id), Operation::Get)?;
        self.client.parse_get(id, response)
    }

    /// Create `post` on the server and return the canonical record.
    pub fn create(&self, post: &Post) -> Result<Post, ClientError> {
        let response = self.send(&self.client.build_create(post.fields()), Operation::Create)?;
        self.client.parse_create(post, response)
    }

    pub fn update(&self, id: &PostId, post: &Post) -> Result<(), ClientError> {
        let response = self.send(&self.client.build_update(id, post.fields()), Operation::Update)?;
        self.client.parse_update(response)
    }

    pub fn delete(&self, id: &PostId) -> Result<(), ClientError> {
        let response = self.send(&self.client.build_delete(id), Operation::Delete)?;
        self.client.parse_delete(response)
    }

    fn send(&self, request: &HttpRequest, op: Operation) -> Result<HttpResponse, ClientError> {
        settle(self.transport.execute(request), op)
    }
}
