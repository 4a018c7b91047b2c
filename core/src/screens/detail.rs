//! The read-only detail screen. A failed fetch is surfaced like on every
//! other screen.

use crate::client::{Operation, PostClient};
use crate::transport::Exchange;
use crate::types::{Post, PostId};
use crate::view::{Command, Redirect, Screen, Ticket, View, ViewState};

#[derive(Debug, Clone, Copy)]
enum DetailOp {
    Load,
}

#[derive(Debug)]
pub struct DetailScreen {
    id: PostId,
    screen: Screen<Post, DetailOp>,
}

impl DetailScreen {
    pub fn open(client: PostClient, id: PostId) -> (Self, Command) {
        let mut screen = Screen::new("detail", client, ViewState::Loading);
        let request = screen.client().build_get(&id);
        let command = screen.issue(DetailOp::Load, request);
        (Self { id, screen }, command)
    }

    pub fn id(&self) -> &PostId {
        &self.id
    }

    pub fn post(&self) -> Option<&Post> {
        self.screen.state().data()
    }
}

impl View for DetailScreen {
    type Data = Post;

    fn state(&self) -> &ViewState<Post> {
        self.screen.state()
    }

    fn resolve(&mut self, ticket: Ticket, exchange: Exchange) -> Option<Command> {
        let DetailOp::Load = self.screen.claim(ticket)?;
        let id = &self.id;
        match self.screen.parse(exchange, Operation::Get, |c, r| c.parse_get(id, r)) {
            Ok(post) => self.screen.transition(ViewState::Ready(post)),
            Err(error) => self.screen.fail(error, None),
        }
        None
    }

    fn dismiss(&mut self) -> bool {
        self.screen.dismiss(|| ViewState::Done(Redirect::List))
    }

    fn dispose(&mut self) {
        self.screen.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;
    use crate::screens::fixtures::{client, respond};

    #[test]
    fn shows_fetched_post() {
        let (mut screen, cmd) = DetailScreen::open(client(), PostId::from(3));
        screen.resolve(
            cmd.ticket,
            respond(200, r#"{"id":3,"title":"T","description":"D","content":"C"}"#),
        );
        let post = screen.post().unwrap();
        assert_eq!(post.title, "T");
        assert_eq!(post.content, "C");
    }

    #[test]
    fn failed_fetch_is_surfaced() {
        let (mut screen, cmd) = DetailScreen::open(client(), PostId::from(3));
        screen.resolve(cmd.ticket, Err(TransportError::new("reset")));
        assert_eq!(screen.state().failure().unwrap().message(), "fetch failed");
        assert!(screen.dismiss());
        assert_eq!(screen.state().redirect(), Some(Redirect::List));
    }

    #[test]
    fn malformed_body_is_surfaced() {
        let (mut screen, cmd) = DetailScreen::open(client(), PostId::from(3));
        screen.resolve(cmd.ticket, respond(200, "<html>"));
        assert!(screen.state().failure().is_some());
    }

    #[test]
    fn stale_ticket_is_ignored() {
        let (mut screen, cmd) = DetailScreen::open(client(), PostId::from(3));
        let (_other, foreign) = DetailScreen::open(client(), PostId::from(4));
        screen.resolve(foreign.ticket, respond(200, r#"{"id":4,"title":"other"}"#));
        assert_eq!(*screen.state(), ViewState::Loading);

        screen.resolve(cmd.ticket, respond(200, r#"{"id":3,"title":"mine"}"#));
        assert_eq!(screen.post().unwrap().title, "mine");
    }
}
