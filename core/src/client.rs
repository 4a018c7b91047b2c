//! Stateless HTTP request builder and response parser for the post API.
//!
//! # Design
//! `PostClient` holds only the resource base path. Each operation is split
//! into a `build_*` method that produces an `HttpRequest` and a `parse_*`
//! method that consumes an `HttpResponse`. Every parse failure, whether a
//! non-2xx status or an undecodable body, maps to the operation's single
//! `ClientError`; the status or serde message is logged, not returned.

use serde::de::DeserializeOwned;
use tracing::warn;

use crate::error::ClientError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Post, PostFields, PostId, ServerRecord};

/// The five logical operations against the resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    List,
    Get,
    Create,
    Update,
    Delete,
}

impl Operation {
    /// The error every failure of this operation collapses into.
    pub fn failure(self) -> ClientError {
        match self {
            Operation::List | Operation::Get => ClientError::FetchFailed,
            Operation::Create => ClientError::SaveFailed,
            Operation::Update => ClientError::UpdateFailed,
            Operation::Delete => ClientError::DeleteFailed,
        }
    }
}

/// Synchronous, stateless client for the post API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostClient {
    base: String,
}

impl PostClient {
    pub fn new(base: &str) -> Self {
        Self {
            base: trim_base(base).to_string(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn build_list(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: self.base.clone(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_get(&self, id: &PostId) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: self.item_path(id),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_create(&self, fields: PostFields<'_>) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Post,
            path: self.base.clone(),
            headers: json_headers(),
            body: Some(encode(fields)),
        }
    }

    /// Updates are a full replace of the three fields, sent with POST.
    pub fn build_update(&self, id: &PostId, fields: PostFields<'_>) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Post,
            path: self.item_path(id),
            headers: json_headers(),
            body: Some(encode(fields)),
        }
    }

    pub fn build_delete(&self, id: &PostId) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            path: self.item_path(id),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_list(&self, response: HttpResponse) -> Result<Vec<Post>, ClientError> {
        check_status(&response, Operation::List)?;
        decode(&response.body, Operation::List)
    }

    /// Parse a single post. If the server leaves out the id, the requested
    /// one is filled in.
    pub fn parse_get(&self, id: &PostId, response: HttpResponse) -> Result<Post, ClientError> {
        check_status(&response, Operation::Get)?;
        let mut post: Post = decode(&response.body, Operation::Get)?;
        if post.id.is_none() {
            post.id = Some(id.clone());
        }
        Ok(post)
    }

    /// Parse a create confirmation. The server's body is canonical; whatever
    /// it leaves out is taken from `submitted`. An empty body echoes
    /// `submitted` back.
    pub fn parse_create(&self, submitted: &Post, response: HttpResponse) -> Result<Post, ClientError> {
        check_status(&response, Operation::Create)?;
        if response.body.trim().is_empty() {
            return Ok(submitted.clone());
        }
        let record: ServerRecord = decode(&response.body, Operation::Create)?;
        Ok(record.canonicalize(submitted))
    }

    /// Any 2xx confirms an update; the body is not inspected.
    pub fn parse_update(&self, response: HttpResponse) -> Result<(), ClientError> {
        check_status(&response, Operation::Update)
    }

    pub fn parse_delete(&self, response: HttpResponse) -> Result<(), ClientError> {
        check_status(&response, Operation::Delete)
    }

    fn item_path(&self, id: &PostId) -> String {
        if self.base.ends_with('/') {
            format!("{}{id}", self.base)
        } else {
            format!("{}/{id}", self.base)
        }
    }
}

/// Drop one trailing slash, unless the base is the root `/` itself.
pub(crate) fn trim_base(base: &str) -> &str {
    match base.strip_suffix('/') {
        Some(trimmed) if !trimmed.is_empty() => trimmed,
        _ => base,
    }
}

fn json_headers() -> Vec<(String, String)> {
    vec![("content-type".to_string(), "application/json".to_string())]
}

fn encode(fields: PostFields<'_>) -> String {
    // Three borrowed strings always serialize.
    serde_json::to_string(&fields).unwrap_or_default()
}

fn check_status(response: &HttpResponse, op: Operation) -> Result<(), ClientError> {
    if response.is_success() {
        return Ok(());
    }
    warn!(?op, status = response.status, "server rejected request");
    Err(op.failure())
}

fn decode<T: DeserializeOwned>(body: &str, op: Operation) -> Result<T, ClientError> {
    serde_json::from_str(body).map_err(|e| {
        warn!(?op, error = %e, "malformed response body");
        op.failure()
    })
}
