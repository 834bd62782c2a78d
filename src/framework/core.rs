//! # Core Mediator
//!
//! This module defines the request/response plumbing between the HTTP layer and
//! the handlers.
//!
//! ## Key Types
//!
//! - [`Message`]: The closed set of messages, each carrying its reply channel.
//! - [`Mediator`]: The dispatcher that routes every message to its handler.
//! - [`MediatorClient`]: The cloneable sender half used by callers.
//! - [`DispatchError`]: Failures of the dispatch itself, or of the handler.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::{Ack, Activity};
use crate::handlers::{self, create, delete, details, edit, list, ActivityError};
use crate::persistence::DataContext;

// =============================================================================
// 1. THE MESSAGES & ERRORS
// =============================================================================

/// Errors surfaced by [`MediatorClient`].
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum DispatchError {
    #[error("Mediator closed")]
    MediatorClosed,
    #[error("Handler dropped response channel")]
    HandlerDropped,
    #[error(transparent)]
    Handler(#[from] ActivityError),
}

/// Type alias for the one-shot response channel used by handlers.
pub type Response<T> = oneshot::Sender<Result<T, ActivityError>>;

/// Message sent to the mediator.
///
/// # Closed Dispatch
/// Every variant is bound to exactly one handler module in
/// [`crate::handlers`]. Because the set is an enum, the `match` in
/// [`Mediator::dispatch`] is checked for exhaustiveness at compile time: a
/// message without a handler cannot be built, so there is no runtime
/// registration to get wrong.
#[derive(Debug)]
pub enum Message {
    List {
        query: list::Query,
        respond_to: Response<Vec<Activity>>,
    },
    Details {
        query: details::Query,
        respond_to: Response<Activity>,
    },
    Create {
        command: create::Command,
        respond_to: Response<Ack>,
    },
    Edit {
        command: edit::Command,
        respond_to: Response<Ack>,
    },
    Delete {
        command: delete::Command,
        respond_to: Response<Ack>,
    },
}

impl Message {
    fn kind(&self) -> &'static str {
        match self {
            Message::List { .. } => "List",
            Message::Details { .. } => "Details",
            Message::Create { .. } => "Create",
            Message::Edit { .. } => "Edit",
            Message::Delete { .. } => "Delete",
        }
    }
}

// =============================================================================
// 2. THE DISPATCHER
// =============================================================================

/// Routes messages to handlers.
///
/// # Concurrency Model
/// The receive loop is sequential, but each message is handed to its own Tokio
/// task, so a slow handler never blocks the next submission. Handlers share
/// nothing but the [`DataContext`], whose own concurrency control decides the
/// outcome of racing writes to the same identifier.
pub struct Mediator {
    receiver: mpsc::Receiver<Message>,
}

impl Mediator {
    pub fn new(buffer_size: usize) -> (Self, MediatorClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        (Self { receiver }, MediatorClient::new(sender))
    }

    /// Runs the dispatch loop until every [`MediatorClient`] is dropped.
    ///
    /// # Context Injection
    /// The persistence context is injected here rather than in `new()`, so the
    /// client can be handed out before the store is ready.
    pub async fn run(mut self, context: Arc<dyn DataContext>) {
        info!("Mediator started");
        let mut in_flight = tokio::task::JoinSet::new();

        while let Some(msg) = self.receiver.recv().await {
            let ctx = context.clone();
            in_flight.spawn(Self::dispatch(msg, ctx));
            // Reap finished handlers so the set stays small.
            while in_flight.try_join_next().is_some() {}
        }

        while in_flight.join_next().await.is_some() {}
        info!("Mediator shutdown");
    }

    async fn dispatch(msg: Message, ctx: Arc<dyn DataContext>) {
        let kind = msg.kind();
        debug!(kind, "Dispatch");
        let ctx = ctx.as_ref();
        let delivered = match msg {
            Message::List { query, respond_to } => {
                respond_to.send(handlers::list::handle(query, ctx).await).is_ok()
            }
            Message::Details { query, respond_to } => {
                respond_to.send(handlers::details::handle(query, ctx).await).is_ok()
            }
            Message::Create { command, respond_to } => {
                respond_to.send(handlers::create::handle(command, ctx).await).is_ok()
            }
            Message::Edit { command, respond_to } => {
                respond_to.send(handlers::edit::handle(command, ctx).await).is_ok()
            }
            Message::Delete { command, respond_to } => {
                respond_to.send(handlers::delete::handle(command, ctx).await).is_ok()
            }
        };
        if !delivered {
            warn!(kind, "Caller went away before the reply");
        }
    }
}

// =============================================================================
// 3. THE CLIENT
// =============================================================================

/// A type-safe handle for submitting messages to a [`Mediator`].
#[derive(Clone)]
pub struct MediatorClient {
    sender: mpsc::Sender<Message>,
}

impl MediatorClient {
    pub fn new(sender: mpsc::Sender<Message>) -> Self {
        Self { sender }
    }

    async fn send<T>(
        &self,
        build: impl FnOnce(Response<T>) -> Message,
    ) -> Result<T, DispatchError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| DispatchError::MediatorClosed)?;
        Ok(response.await.map_err(|_| DispatchError::HandlerDropped)??)
    }

    #[tracing::instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Activity>, DispatchError> {
        self.send(|respond_to| Message::List {
            query: list::Query,
            respond_to,
        })
        .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn details(&self, id: Uuid) -> Result<Activity, DispatchError> {
        self.send(|respond_to| Message::Details {
            query: details::Query { id },
            respond_to,
        })
        .await
    }

    #[tracing::instrument(skip(self, activity), fields(id = %activity.id))]
    pub async fn create(&self, activity: Activity) -> Result<Ack, DispatchError> {
        self.send(|respond_to| Message::Create {
            command: create::Command { activity },
            respond_to,
        })
        .await
    }

    #[tracing::instrument(skip(self, activity), fields(id = %activity.id))]
    pub async fn edit(&self, activity: Activity) -> Result<Ack, DispatchError> {
        self.send(|respond_to| Message::Edit {
            command: edit::Command { activity },
            respond_to,
        })
        .await
    }

    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> Result<Ack, DispatchError> {
        self.send(|respond_to| Message::Delete {
            command: delete::Command { id },
            respond_to,
        })
        .await
    }
}
