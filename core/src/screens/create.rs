//! The create screen: an empty editor that posts a new record.

use crate::client::{Operation, PostClient};
use crate::transport::Exchange;
use crate::types::{Field, Post};
use crate::view::{Command, Redirect, Screen, Ticket, View, ViewState};

#[derive(Debug, Clone, Copy)]
enum CreateOp {
    Save,
}

#[derive(Debug)]
pub struct CreateScreen {
    screen: Screen<Post, CreateOp>,
    created: Option<Post>,
}

impl CreateScreen {
    /// Starts Ready with an empty post; nothing needs fetching.
    pub fn open(client: PostClient) -> Self {
        Self {
            screen: Screen::new("create", client, ViewState::Ready(Post::default())),
            created: None,
        }
    }

    pub fn post(&self) -> Option<&Post> {
        self.screen.state().data()
    }

    pub fn edit(&mut self, field: Field, value: impl Into<String>) -> bool {
        self.screen.edit(field, value.into())
    }

    pub fn submit(&mut self) -> Option<Command> {
        self.screen
            .submit_with(CreateOp::Save, |client, post| client.build_create(post.fields()))
    }

    /// The server's canonical record, once the create has been confirmed.
    pub fn created(&self) -> Option<&Post> {
        self.created.as_ref()
    }
}

impl View for CreateScreen {
    type Data = Post;

    fn state(&self) -> &ViewState<Post> {
        self.screen.state()
    }

    fn resolve(&mut self, ticket: Ticket, exchange: Exchange) -> Option<Command> {
        let CreateOp::Save = self.screen.claim(ticket)?;
        let submitted = self.screen.state().data()?;
        let result = self.screen.parse(exchange, Operation::Create, |c, r| {
            c.parse_create(submitted, r)
        });
        match result {
            Ok(post) => {
                self.created = Some(post);
                self.screen.transition(ViewState::Done(Redirect::List));
            }
            Err(error) => self.screen.fail_keeping_data(error),
        }
        None
    }

    fn dismiss(&mut self) -> bool {
        self.screen.dismiss(|| ViewState::Ready(Post::default()))
    }

    fn dispose(&mut self) {
        self.screen.dispose();
    }
}
