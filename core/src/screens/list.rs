//! The list screen: all posts, with a per-row delete.
//!
//! Deleting never removes a row locally. A confirmed delete re-fetches the
//! whole list; a failed one leaves the rendered rows exactly as they were.
//! If that re-fetch fails, the rows shown before the delete are what
//! dismissal returns to.

use tracing::debug;

use crate::client::{Operation, PostClient};
use crate::transport::Exchange;
use crate::types::{Post, PostId};
use crate::view::{Command, Screen, Ticket, View, ViewState};

#[derive(Debug, Clone)]
enum ListOp {
    Load,
    Delete(PostId),
    Reload(Vec<Post>),
}

#[derive(Debug)]
pub struct ListScreen {
    screen: Screen<Vec<Post>, ListOp>,
}

impl ListScreen {
    /// Open the screen in Loading together with its one initial fetch.
    pub fn open(client: PostClient) -> (Self, Command) {
        let mut screen = Screen::new("list", client, ViewState::Loading);
        let request = screen.client().build_list();
        let command = screen.issue(ListOp::Load, request);
        (Self { screen }, command)
    }

    pub fn rows(&self) -> Option<&[Post]> {
        self.screen.state().data().map(Vec::as_slice)
    }

    /// Ask the server to delete one of the displayed rows.
    pub fn delete(&mut self, id: &PostId) -> Option<Command> {
        let listed = self
            .rows()
            .is_some_and(|rows| rows.iter().any(|post| post.id.as_ref() == Some(id)));
        if !listed {
            debug!(%id, "delete of unlisted post ignored");
            return None;
        }
        self.screen
            .submit_with(ListOp::Delete(id.clone()), |client, _| client.build_delete(id))
    }

    fn settle_load(&mut self, exchange: Exchange, previous: Option<Vec<Post>>) {
        match self.screen.parse(exchange, Operation::List, |c, r| c.parse_list(r)) {
            Ok(rows) => self.screen.transition(ViewState::Ready(rows)),
            Err(error) => self.screen.fail(error, previous),
        }
    }
}

impl View for ListScreen {
    type Data = Vec<Post>;

    fn state(&self) -> &ViewState<Vec<Post>> {
        self.screen.state()
    }

    fn resolve(&mut self, ticket: Ticket, exchange: Exchange) -> Option<Command> {
        match self.screen.claim(ticket)? {
            ListOp::Load => {
                self.settle_load(exchange, None);
                None
            }
            ListOp::Reload(previous) => {
                self.settle_load(exchange, Some(previous));
                None
            }
            ListOp::Delete(id) => {
                match self.screen.parse(exchange, Operation::Delete, |c, r| c.parse_delete(r)) {
                    Ok(()) => {
                        debug!(%id, "post deleted, reloading");
                        let previous = self.screen.state().data().cloned().unwrap_or_default();
                        self.screen.transition(ViewState::Loading);
                        let request = self.screen.client().build_list();
                        Some(self.screen.issue(ListOp::Reload(previous), request))
                    }
                    Err(error) => {
                        self.screen.fail_keeping_data(error);
                        None
                    }
                }
            }
        }
    }

    /// A failed load has no rows to return to, so it falls back to an empty
    /// list.
    fn dismiss(&mut self) -> bool {
        self.screen.dismiss(|| ViewState::Ready(Vec::new()))
    }

    fn dispose(&mut self) {
        self.screen.dispose();
    }
}
