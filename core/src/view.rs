//! Per-screen view state and the shared screen template.
//!
//! # Design
//! Every screen holds exactly one `ViewState`, so combinations such as
//! "done and failed" cannot be expressed. `Screen<T, Op>` is the one
//! template all four screens are built from. It owns:
//! - the state,
//! - at most one pending request, identified by its `Ticket`,
//! - a disposal flag.
//!
//! A response is applied only when its ticket matches the pending one and the
//! screen has not been disposed; anything else is dropped. Screens never
//! perform IO: they hand out `Command`s and receive the resulting `Exchange`
//! through `View::resolve`.

use std::fmt;
use std::mem;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;

use crate::client::{Operation, PostClient};
use crate::error::ClientError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::{self, Exchange, Transport};

static NEXT_TICKET: AtomicU64 = AtomicU64::new(1);

/// Identifies one request issued by a screen. Unique for the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

impl Ticket {
    fn next() -> Self {
        Ticket(NEXT_TICKET.fetch_add(1, Ordering::Relaxed))
    }
}

/// A request a screen asks its host to perform. The host hands the outcome
/// back to the same screen together with `ticket`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub ticket: Ticket,
    pub request: HttpRequest,
}

impl Command {
    pub fn dispatch<T: Transport>(&self, transport: &T) -> Exchange {
        transport.execute(&self.request)
    }
}

/// Where a finished screen sends the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redirect {
    List,
}

/// A dismissible error notice, remembering what to show once dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure<T> {
    error: ClientError,
    resume: Option<T>,
}

impl<T> Failure<T> {
    pub fn error(&self) -> ClientError {
        self.error
    }

    /// The user-visible text of the notice.
    pub fn message(&self) -> String {
        self.error.to_string()
    }

    /// Data the screen returns to on dismissal, if it had any.
    pub fn resume(&self) -> Option<&T> {
        self.resume.as_ref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState<T> {
    /// Waiting for the initial fetch.
    Loading,
    /// Showing data; inputs are live.
    Ready(T),
    /// A mutation is in flight; inputs are inert.
    Submitting(T),
    /// Terminal. Render nothing but the redirect.
    Done(Redirect),
    /// Content is hidden behind a dismissible notice.
    Failed(Failure<T>),
}

impl<T> ViewState<T> {
    /// The data currently on screen (Ready or Submitting).
    pub fn data(&self) -> Option<&T> {
        match self {
            ViewState::Ready(data) | ViewState::Submitting(data) => Some(data),
            _ => None,
        }
    }

    pub fn into_data(self) -> Option<T> {
        match self {
            ViewState::Ready(data) | ViewState::Submitting(data) => Some(data),
            _ => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, ViewState::Ready(_))
    }

    pub fn redirect(&self) -> Option<Redirect> {
        match self {
            ViewState::Done(redirect) => Some(*redirect),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&Failure<T>> {
        match self {
            ViewState::Failed(failure) => Some(failure),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ViewState::Loading => "loading",
            ViewState::Ready(_) => "ready",
            ViewState::Submitting(_) => "submitting",
            ViewState::Done(_) => "done",
            ViewState::Failed(_) => "failed",
        }
    }
}

/// The host-facing surface shared by every screen.
pub trait View {
    type Data;

    fn state(&self) -> &ViewState<Self::Data>;

    /// Apply the outcome of a command. Returns a follow-up command when the
    /// screen needs another round-trip (the list re-fetch after a delete).
    fn resolve(&mut self, ticket: Ticket, exchange: Exchange) -> Option<Command>;

    /// Close the error notice. Returns `false` when there was none.
    fn dismiss(&mut self) -> bool;

    /// Detach the screen; later responses are ignored.
    fn dispose(&mut self);

    /// Run `command` and any follow-ups to completion over `transport`.
    fn drive<T: Transport>(&mut self, transport: &T, command: Command)
    where
        Self: Sized,
    {
        let mut next = Some(command);
        while let Some(command) = next {
            let exchange = command.dispatch(transport);
            next = self.resolve(command.ticket, exchange);
        }
    }
}

/// The state-machine template the four screens instantiate.
#[derive(Debug)]
pub(crate) struct Screen<T, Op> {
    kind: &'static str,
    client: PostClient,
    state: ViewState<T>,
    pending: Option<(Ticket, Op)>,
    disposed: bool,
}

impl<T, Op: Clone + fmt::Debug> Screen<T, Op> {
    pub fn new(kind: &'static str, client: PostClient, state: ViewState<T>) -> Self {
        Self {
            kind,
            client,
            state,
            pending: None,
            disposed: false,
        }
    }

    pub fn client(&self) -> &PostClient {
        &self.client
    }

    pub fn state(&self) -> &ViewState<T> {
        &self.state
    }

    pub fn transition(&mut self, next: ViewState<T>) {
        debug!(screen = self.kind, from = self.state.name(), to = next.name(), "transition");
        self.state = next;
    }

    fn take_state(&mut self) -> ViewState<T> {
        mem::replace(&mut self.state, ViewState::Loading)
    }

    /// Inputs are live only in Ready with nothing outstanding.
    pub fn accepts_input(&self) -> bool {
        let live = !self.disposed && self.pending.is_none() && self.state.is_ready();
        if !live {
            debug!(screen = self.kind, state = self.state.name(), "input ignored");
        }
        live
    }

    /// Record `op` as the one outstanding request and hand out its command.
    pub fn issue(&mut self, op: Op, request: HttpRequest) -> Command {
        let ticket = Ticket::next();
        debug!(
            screen = self.kind,
            ?op,
            method = request.method.as_str(),
            path = %request.path,
            "issuing request"
        );
        self.pending = Some((ticket, op));
        Command { ticket, request }
    }

    /// Move Ready(data) to Submitting(data) and issue the request `build`
    /// derives from the data.
    pub fn submit_with(
        &mut self,
        op: Op,
        build: impl FnOnce(&PostClient, &T) -> HttpRequest,
    ) -> Option<Command> {
        if !self.accepts_input() {
            return None;
        }
        match self.take_state() {
            ViewState::Ready(data) => {
                let request = build(&self.client, &data);
                self.transition(ViewState::Submitting(data));
                Some(self.issue(op, request))
            }
            other => {
                self.state = other;
                None
            }
        }
    }

    /// Take ownership of the pending operation if `ticket` is the one this
    /// live screen is waiting on.
    pub fn claim(&mut self, ticket: Ticket) -> Option<Op> {
        if self.disposed {
            debug!(screen = self.kind, ?ticket, "response after dispose ignored");
            return None;
        }
        if !matches!(&self.pending, Some((pending, _)) if *pending == ticket) {
            debug!(screen = self.kind, ?ticket, "stale response ignored");
            return None;
        }
        self.pending.take().map(|(_, op)| op)
    }

    /// Fold the exchange and hand a successful response to `parse`.
    pub fn parse<R>(
        &self,
        exchange: Exchange,
        op: Operation,
        parse: impl FnOnce(&PostClient, HttpResponse) -> Result<R, ClientError>,
    ) -> Result<R, ClientError> {
        transport::settle(exchange, op).and_then(|response| parse(&self.client, response))
    }

    pub fn fail(&mut self, error: ClientError, resume: Option<T>) {
        self.transition(ViewState::Failed(Failure { error, resume }));
    }

    /// Fail while keeping whatever data was on screen for after dismissal.
    pub fn fail_keeping_data(&mut self, error: ClientError) {
        let resume = self.take_state().into_data();
        self.fail(error, resume);
    }

    /// Leave Failed: back to Ready with the preserved data, or to `fallback`
    /// when nothing was preserved. Never issues a request.
    pub fn dismiss(&mut self, fallback: impl FnOnce() -> ViewState<T>) -> bool {
        if self.disposed {
            return false;
        }
        match self.take_state() {
            ViewState::Failed(failure) => {
                let next = match failure.resume {
                    Some(data) => ViewState::Ready(data),
                    None => fallback(),
                };
                self.transition(next);
                true
            }
            other => {
                self.state = other;
                false
            }
        }
    }

    pub fn dispose(&mut self) {
        debug!(screen = self.kind, "disposed");
        self.disposed = true;
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpMethod;

    fn screen(state: ViewState<u32>) -> Screen<u32, &'static str> {
        Screen::new("test", PostClient::new("/posts"), state)
    }

    fn ok() -> Exchange {
        Ok(HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: String::new(),
        })
    }

    fn request() -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: "/posts".to_string(),
            headers: Vec::new(),
            body: None,
        }
    }

    #[test]
    fn tickets_are_unique() {
        let a = Ticket::next();
        let b = Ticket::next();
        assert_ne!(a, b);
    }

    #[test]
    fn only_the_pending_ticket_is_claimed() {
        let mut s = screen(ViewState::Loading);
        let first = s.issue("load", request());
        assert_eq!(s.claim(Ticket::next()), None);
        assert_eq!(s.claim(first.ticket), Some("load"));
        assert_eq!(s.claim(first.ticket), None);
    }

    #[test]
    fn disposed_screen_claims_nothing() {
        let mut s = screen(ViewState::Loading);
        let cmd = s.issue("load", request());
        s.dispose();
        assert_eq!(s.claim(cmd.ticket), None);
        assert_eq!(*s.state(), ViewState::Loading);
    }

    #[test]
    fn submit_requires_ready_and_idle() {
        let mut s = screen(ViewState::Loading);
        assert!(s.submit_with("save", |c, _| c.build_list()).is_none());

        let mut s = screen(ViewState::Ready(7));
        let cmd = s.submit_with("save", |c, _| c.build_list());
        assert!(cmd.is_some());
        assert_eq!(*s.state(), ViewState::Submitting(7));
        assert!(s.submit_with("save", |c, _| c.build_list()).is_none());
    }

    #[test]
    fn failure_keeps_data_and_dismiss_restores_it() {
        let mut s = screen(ViewState::Submitting(3));
        s.fail_keeping_data(ClientError::SaveFailed);
        let failure = s.state().failure().unwrap();
        assert_eq!(failure.message(), "save failed");
        assert_eq!(failure.resume(), Some(&3));

        assert!(s.dismiss(|| ViewState::Done(Redirect::List)));
        assert_eq!(*s.state(), ViewState::Ready(3));
        assert!(!s.dismiss(|| ViewState::Done(Redirect::List)));
    }

    #[test]
    fn dismiss_without_data_uses_fallback() {
        let mut s = screen(ViewState::Loading);
        s.fail(ClientError::FetchFailed, None);
        assert!(s.dismiss(|| ViewState::Done(Redirect::List)));
        assert_eq!(s.state().redirect(), Some(Redirect::List));
    }

    #[test]
    fn parse_folds_transport_errors() {
        let s = screen(ViewState::Loading);
        let err = s
            .parse(
                Err(crate::error::TransportError::new("down")),
                Operation::Delete,
                |c, r| c.parse_delete(r),
            )
            .unwrap_err();
        assert_eq!(err, ClientError::DeleteFailed);
        assert!(s.parse(ok(), Operation::Delete, |c, r| c.parse_delete(r)).is_ok());
    }
}
