//! Search controller.
//!
//! Drives [`SearchState`] from user events and gateway completions. Gateway
//! calls run on spawned tasks that never touch state; they report back through
//! a channel, and the owner of the controller feeds each [`Completion`] into
//! [`SearchController::apply`]. All mutation therefore happens on the caller's
//! task, in the order the caller observes events.

use std::sync::Arc;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::debug;

use crate::{
    gateway::WeatherGateway,
    model::{LookupFailure, WeatherReport},
    state::{LookupTicket, SearchState, SearchView},
};

/// Outcome of one gateway call, tagged with the ticket that started it.
#[derive(Debug)]
pub struct Completion {
    ticket: LookupTicket,
    outcome: Result<WeatherReport, LookupFailure>,
}

impl Completion {
    pub fn ticket(&self) -> &LookupTicket {
        &self.ticket
    }

    pub fn outcome(&self) -> &Result<WeatherReport, LookupFailure> {
        &self.outcome
    }
}

#[derive(Debug)]
pub struct SearchController {
    state: SearchState,
    gateway: Arc<dyn WeatherGateway>,
    completions: UnboundedSender<Completion>,
}

impl SearchController {
    /// Create a controller and the receiving end of its completion channel.
    pub fn new(gateway: Arc<dyn WeatherGateway>) -> (Self, UnboundedReceiver<Completion>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let controller = Self { state: SearchState::new(), gateway, completions: tx };
        (controller, rx)
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    pub fn view(&self) -> SearchView<'_> {
        self.state.view()
    }

    pub fn can_submit(&self) -> bool {
        self.state.can_submit()
    }

    pub fn edit_query(&mut self, text: impl Into<String>) {
        self.state.edit_query(text);
    }

    /// Start a lookup for the current query.
    ///
    /// Returns `false` without side effects when submit is disabled. Must be
    /// called from within a tokio runtime.
    pub fn submit(&mut self) -> bool {
        let Some(ticket) = self.state.begin_lookup() else {
            debug!(query = self.state.query(), "submit ignored");
            return false;
        };

        debug!(generation = ticket.generation(), city = ticket.city(), "lookup started");

        let gateway = Arc::clone(&self.gateway);
        let completions = self.completions.clone();
        tokio::spawn(async move {
            let outcome = gateway.fetch_weather(ticket.city()).await;
            // A closed channel means the session is over.
            let _ = completions.send(Completion { ticket, outcome });
        });

        true
    }

    /// Abandon the in-flight lookup. Its transport call keeps running.
    pub fn cancel(&mut self) -> bool {
        let cancelled = self.state.cancel();
        if cancelled {
            debug!(generation = self.state.generation(), "lookup cancelled");
        }
        cancelled
    }

    /// Apply a completion; returns `false` if it was stale and got discarded.
    pub fn apply(&mut self, completion: Completion) -> bool {
        let Completion { ticket, outcome } = completion;
        let succeeded = outcome.is_ok();

        let applied = self.state.resolve(&ticket, outcome);
        if applied {
            debug!(generation = ticket.generation(), succeeded, "lookup settled");
        } else {
            debug!(
                generation = ticket.generation(),
                current = self.state.generation(),
                city = ticket.city(),
                "discarded stale lookup result"
            );
        }
        applied
    }

    /// Apply completions until nothing is in flight.
    ///
    /// Returns `false` if the channel closed first.
    pub async fn settle(&mut self, completions: &mut UnboundedReceiver<Completion>) -> bool {
        while self.state.is_in_flight() {
            match completions.recv().await {
                Some(completion) => {
                    self.apply(completion);
                }
                None => return false,
            }
        }
        true
    }
}
