//! # Mock Mediator
//!
//! Utilities for testing the HTTP layer without handlers or a store.
//!
//! Use [`MockMediator`] to script replies with `expect_*` builders, or
//! [`create_mock_client`] plus the `expect_*` helper functions to inspect the
//! exact message a caller produced.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use uuid::Uuid;

use crate::domain::{Ack, Activity};
use crate::framework::{MediatorClient, Message, Response};
use crate::handlers::{create, edit, ActivityError};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// An expected message and the reply to send back.
enum Expectation {
    List {
        response: Result<Vec<Activity>, ActivityError>,
    },
    Details {
        id: Uuid,
        response: Result<Activity, ActivityError>,
    },
    Create {
        response: Result<Ack, ActivityError>,
    },
    Edit {
        id: Uuid,
        response: Result<Ack, ActivityError>,
    },
    Delete {
        id: Uuid,
        response: Result<Ack, ActivityError>,
    },
}

type Expectations = Arc<Mutex<VecDeque<Expectation>>>;

/// A mock mediator with expectation tracking for fluent testing.
///
/// # Example
/// ```ignore
/// let mut mock = MockMediator::new();
/// mock.expect_details(id).return_err(ActivityError::NotFound(id));
///
/// let client = mock.client();
/// // Route requests through the client...
/// mock.verify(); // Ensures all expectations were met
/// ```
///
/// Messages are matched in order. A message that does not match the next
/// expectation panics the background task, which callers observe as
/// `DispatchError::HandlerDropped`.
pub struct MockMediator {
    client: MediatorClient,
    expectations: Expectations,
    _handle: tokio::task::JoinHandle<()>,
}

impl MockMediator {
    /// Creates a new mock with no expectations.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<Message>(100);
        let expectations: Expectations = Arc::new(Mutex::new(VecDeque::new()));
        let expectations_clone = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(message) = receiver.recv().await {
                let expectation = expectations_clone
                    .lock()
                    .expect("expectation lock poisoned")
                    .pop_front();

                match (message, expectation) {
                    (Message::List { respond_to, .. }, Some(Expectation::List { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        Message::Details { query, respond_to },
                        Some(Expectation::Details { id, response }),
                    ) => {
                        assert_eq!(query.id, id, "Details sent for unexpected id");
                        let _ = respond_to.send(response);
                    }
                    (Message::Create { respond_to, .. }, Some(Expectation::Create { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        Message::Edit { command, respond_to },
                        Some(Expectation::Edit { id, response }),
                    ) => {
                        assert_eq!(command.activity.id, id, "Edit sent for unexpected id");
                        let _ = respond_to.send(response);
                    }
                    (
                        Message::Delete { command, respond_to },
                        Some(Expectation::Delete { id, response }),
                    ) => {
                        assert_eq!(command.id, id, "Delete sent for unexpected id");
                        let _ = respond_to.send(response);
                    }
                    (message, _) => {
                        panic!("Unexpected message or expectation mismatch: {:?}", message);
                    }
                }
            }
        });

        Self {
            client: MediatorClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    /// Returns the client to wire into the code under test.
    pub fn client(&self) -> MediatorClient {
        self.client.clone()
    }

    pub fn expect_list(&mut self) -> ExpectationBuilder<Vec<Activity>> {
        self.builder(|response, ()| Expectation::List { response }, ())
    }

    pub fn expect_details(&mut self, id: Uuid) -> ExpectationBuilder<Activity, Uuid> {
        self.builder(|response, id| Expectation::Details { id, response }, id)
    }

    pub fn expect_create(&mut self) -> ExpectationBuilder<Ack> {
        self.builder(|response, ()| Expectation::Create { response }, ())
    }

    pub fn expect_edit(&mut self, id: Uuid) -> ExpectationBuilder<Ack, Uuid> {
        self.builder(|response, id| Expectation::Edit { id, response }, id)
    }

    pub fn expect_delete(&mut self, id: Uuid) -> ExpectationBuilder<Ack, Uuid> {
        self.builder(|response, id| Expectation::Delete { id, response }, id)
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let remaining = self
            .expectations
            .lock()
            .expect("expectation lock poisoned")
            .len();
        if remaining > 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
    }

    fn builder<T, K>(
        &mut self,
        make: fn(Result<T, ActivityError>, K) -> Expectation,
        key: K,
    ) -> ExpectationBuilder<T, K> {
        ExpectationBuilder {
            key,
            make,
            expectations: self.expectations.clone(),
        }
    }
}

impl Default for MockMediator {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder that records the reply for one expected message.
pub struct ExpectationBuilder<T, K = ()> {
    key: K,
    make: fn(Result<T, ActivityError>, K) -> Expectation,
    expectations: Expectations,
}

impl<T, K> ExpectationBuilder<T, K> {
    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: T) {
        self.push(Ok(value));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: ActivityError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<T, ActivityError>) {
        let expectation = (self.make)(response, self.key);
        self.expectations
            .lock()
            .expect("expectation lock poisoned")
            .push_back(expectation);
    }
}

// =============================================================================
// CHANNEL HELPERS
// =============================================================================

/// Creates a client whose messages land on a receiver the test controls.
///
/// # Testing Strategy
/// Use this when the assertion is about the message itself (for example which
/// identifier an edit carries), then answer through the returned responder.
pub fn create_mock_client(buffer_size: usize) -> (MediatorClient, mpsc::Receiver<Message>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (MediatorClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Create command
pub async fn expect_create(
    receiver: &mut mpsc::Receiver<Message>,
) -> Option<(create::Command, Response<Ack>)> {
    match receiver.recv().await {
        Some(Message::Create { command, respond_to }) => Some((command, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Edit command
pub async fn expect_edit(
    receiver: &mut mpsc::Receiver<Message>,
) -> Option<(edit::Command, Response<Ack>)> {
    match receiver.recv().await {
        Some(Message::Edit { command, respond_to }) => Some((command, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::DispatchError;

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver) = create_mock_client(10);
        let id = Uuid::new_v4();

        let create_task =
            tokio::spawn(async move { client.create(Activity::new(id, "Run")).await });

        let (command, responder) = expect_create(&mut receiver)
            .await
            .expect("Expected Create command");
        assert_eq!(command.activity.id, id);
        responder.send(Ok(Ack {})).unwrap();

        assert_eq!(create_task.await.unwrap(), Ok(Ack {}));
    }

    #[tokio::test]
    async fn test_mock_mediator_with_expectations() {
        let mut mock = MockMediator::new();
        let id = Uuid::new_v4();

        mock.expect_create().return_ok(Ack {});
        mock.expect_details(id).return_ok(Activity::new(id, "Run"));
        mock.expect_delete(id).return_err(ActivityError::NotFound(id));

        let client = mock.client();
        client.create(Activity::new(id, "Run")).await.unwrap();
        assert_eq!(client.details(id).await.unwrap().title, "Run");
        assert_eq!(
            client.delete(id).await.unwrap_err(),
            DispatchError::Handler(ActivityError::NotFound(id))
        );

        mock.verify();
    }
}
