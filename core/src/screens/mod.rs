//! The four screens: list, create, edit and detail.
//!
//! Each one is a thin wrapper around the shared `Screen` template that fixes
//! the data type, the set of operations it may have in flight, and what a
//! dismissed error falls back to when no data was preserved.

mod create;
mod detail;
mod edit;
mod list;

pub use create::CreateScreen;
pub use detail::DetailScreen;
pub use edit::EditScreen;
pub use list::ListScreen;

use std::fmt;

use tracing::debug;

use crate::types::{Field, Post};
use crate::view::{Screen, ViewState};

impl<Op: Clone + fmt::Debug> Screen<Post, Op> {
    /// Replace the held post with a copy carrying the new field value. Only
    /// applies while Ready; last write wins.
    pub fn edit(&mut self, field: Field, value: String) -> bool {
        if !self.accepts_input() {
            return false;
        }
        let next = match self.state() {
            ViewState::Ready(post) => post.with_field(field, value),
            _ => return false,
        };
        debug!(field = field.name(), "field edited");
        self.transition(ViewState::Ready(next));
        true
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::client::PostClient;
    use crate::http::HttpResponse;
    use crate::transport::Exchange;
    use crate::types::{Post, PostId};

    pub const BASE: &str = "http://localhost:9501/blog/api/blog_entry";

    pub fn client() -> PostClient {
        PostClient::new(BASE)
    }

    pub fn respond(status: u16, body: &str) -> Exchange {
        Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        })
    }

    pub fn post(id: u64, title: &str) -> Post {
        Post {
            id: Some(PostId::from(id)),
            title: title.to_string(),
            ..Post::default()
        }
    }
}
