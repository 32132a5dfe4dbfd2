//! Message types and handler traits for the Actor system.

use crate::core::ActorController;
use async_trait::async_trait;
use tokio::time::Instant;

/// A generic message in the Actor system.
/// T represents the payload type; `method` names the message for logging and routing.
#[derive(Debug, Clone, PartialEq)]
pub struct Message<T> {
    /// The method name for this message
    pub method: String,
    /// The message payload
    pub payload: T,
}

impl<T> Message<T> {
    /// Create a new Message with the specified method and payload.
    pub fn new(method: impl Into<String>, payload: T) -> Self {
        Self {
            method: method.into(),
            payload,
        }
    }
}

/// Trait for handling messages in the Actor system.
///
/// The handler is owned by the actor's message loop, so `&mut self` access is
/// always exclusive: messages, deadlines and shutdown are processed one at a
/// time, in arrival order.
#[async_trait]
pub trait MessageHandler<T: Send + 'static>: Send {
    /// Handle an incoming message.
    ///
    /// # Arguments
    /// * `message` - The incoming message to process
    /// * `controller` - Sends outgoing messages, or posts messages back to this actor
    async fn on_message(&mut self, message: Message<T>, controller: &ActorController<T>);

    /// Next instant at which [`MessageHandler::on_deadline`] should run.
    /// Queried again after every message.
    fn next_deadline(&self) -> Option<Instant> {
        None
    }

    /// Called when the deadline returned by [`MessageHandler::next_deadline`] passes.
    async fn on_deadline(&mut self, _controller: &ActorController<T>) {}
}
