//! The edit screen: fetch one post, edit it locally, replace it on submit.

use crate::client::{Operation, PostClient};
use crate::transport::Exchange;
use crate::types::{Field, Post, PostId};
use crate::view::{Command, Redirect, Screen, Ticket, View, ViewState};

#[derive(Debug, Clone, Copy)]
enum EditOp {
    Load,
    Save,
}

#[derive(Debug)]
pub struct EditScreen {
    id: PostId,
    screen: Screen<Post, EditOp>,
}

impl EditScreen {
    /// Open the screen for `id` in Loading, with the fetch to run.
    pub fn open(client: PostClient, id: PostId) -> (Self, Command) {
        let mut screen = Screen::new("edit", client, ViewState::Loading);
        let request = screen.client().build_get(&id);
        let command = screen.issue(EditOp::Load, request);
        (Self { id, screen }, command)
    }

    pub fn id(&self) -> &PostId {
        &self.id
    }

    pub fn post(&self) -> Option<&Post> {
        self.screen.state().data()
    }

    pub fn edit(&mut self, field: Field, value: impl Into<String>) -> bool {
        self.screen.edit(field, value.into())
    }

    /// Send the full edited post. The target is always the id the screen was
    /// opened for.
    pub fn submit(&mut self) -> Option<Command> {
        let id = &self.id;
        self.screen
            .submit_with(EditOp::Save, |client, post| client.build_update(id, post.fields()))
    }
}

impl View for EditScreen {
    type Data = Post;

    fn state(&self) -> &ViewState<Post> {
        self.screen.state()
    }

    fn resolve(&mut self, ticket: Ticket, exchange: Exchange) -> Option<Command> {
        match self.screen.claim(ticket)? {
            EditOp::Load => {
                let id = &self.id;
                match self.screen.parse(exchange, Operation::Get, |c, r| c.parse_get(id, r)) {
                    Ok(post) => self.screen.transition(ViewState::Ready(post)),
                    Err(error) => self.screen.fail(error, None),
                }
            }
            EditOp::Save => {
                match self.screen.parse(exchange, Operation::Update, |c, r| c.parse_update(r)) {
                    Ok(()) => self.screen.transition(ViewState::Done(Redirect::List)),
                    Err(error) => self.screen.fail_keeping_data(error),
                }
            }
        }
        None
    }

    /// Without a loaded post there is nothing to edit; go back to the list.
    fn dismiss(&mut self) -> bool {
        self.screen.dismiss(|| ViewState::Done(Redirect::List))
    }

    fn dispose(&mut self) {
        self.screen.dispose();
    }
}
