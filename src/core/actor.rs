//! Actor implementation for notification-based communication
//!
//! An [`Actor`] owns a [`MessageHandler`] inside a single tokio task. All state
//! the handler keeps is touched only from that task, one message at a time,
//! so no locking is needed around it. Work that must not block the loop
//! (network calls, for example) runs in spawned tasks that post their results
//! back through the sender from [`ActorController::inbox`].

use crate::core::message::{Message, MessageHandler};
use std::marker::PhantomData;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::Instant;

/// A lightweight actor that handles notification messages.
///
/// Must be created from within a tokio runtime. Dropping the actor stops its
/// message loop.
pub struct Actor<T: Send + 'static, H: MessageHandler<T> + 'static> {
    /// Sender feeding this actor's inbox
    inbox: mpsc::UnboundedSender<Message<T>>,
    /// Channel for sending shutdown signal
    shutdown_sender: Option<oneshot::Sender<()>>,
    /// Handle to the message processing task
    task_handle: Option<JoinHandle<()>>,
    _phantom: PhantomData<fn() -> H>,
}

impl<T: Send + 'static, H: MessageHandler<T> + 'static> Actor<T, H> {
    /// Spawn the message loop for `handler`.
    ///
    /// # Arguments
    /// * `handler` - Message handler implementation
    /// * `outbox` - Channel receiving messages the handler sends to the outside
    pub fn new(handler: H, outbox: mpsc::UnboundedSender<Message<T>>) -> Self {
        let (inbox, receiver) = mpsc::unbounded_channel();
        let (shutdown_sender, shutdown_receiver) = oneshot::channel();
        let controller = ActorController::new(inbox.clone(), outbox);

        let task_handle = tokio::spawn(Self::run_message_loop(
            receiver,
            controller,
            handler,
            shutdown_receiver,
        ));

        Self {
            inbox,
            shutdown_sender: Some(shutdown_sender),
            task_handle: Some(task_handle),
            _phantom: PhantomData,
        }
    }

    /// Deliver a message to this actor.
    pub fn send(&self, message: Message<T>) -> Result<(), ActorSendError> {
        self.inbox
            .send(message)
            .map_err(|_| ActorSendError::ChannelClosed)
    }

    /// Deliver a message built from `method` and `payload` to this actor.
    pub fn send_message(&self, method: impl Into<String>, payload: T) -> Result<(), ActorSendError> {
        self.send(Message::new(method, payload))
    }

    /// Whether the message loop is still running.
    pub fn is_running(&self) -> bool {
        self.task_handle
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Main message processing loop.
    async fn run_message_loop(
        mut receiver: mpsc::UnboundedReceiver<Message<T>>,
        controller: ActorController<T>,
        mut handler: H,
        mut shutdown_receiver: oneshot::Receiver<()>,
    ) {
        loop {
            let deadline = handler.next_deadline();

            tokio::select! {
                // Handle shutdown signal
                _ = &mut shutdown_receiver => {
                    log::debug!("Received shutdown signal, stopping message loop");
                    break;
                }
                // Handle messages
                message = receiver.recv() => {
                    match message {
                        Some(message) => {
                            log::trace!("Received message: method={}", message.method);
                            handler.on_message(message, &controller).await;
                        }
                        None => {
                            log::debug!("Receiver channel closed");
                            break;
                        }
                    }
                }
                // Handle the handler's own timer
                _ = wait_until(deadline) => {
                    log::trace!("Deadline reached");
                    handler.on_deadline(&controller).await;
                }
            }
        }
    }

    /// Stop the message loop and wait for it to finish.
    /// Dropping the actor stops the loop as well, without waiting.
    pub async fn shutdown(&mut self) {
        log::debug!("Shutdown requested for Actor");

        if let Some(shutdown_sender) = self.shutdown_sender.take() {
            let _ = shutdown_sender.send(());
        }

        if let Some(task_handle) = self.task_handle.take() {
            if let Err(e) = task_handle.await {
                log::warn!("Actor message loop ended abnormally: {}", e);
            }
        }

        log::debug!("Actor shutdown completed");
    }
}

async fn wait_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending::<()>().await,
    }
}

/// Error type for Actor message sending operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActorSendError {
    #[error("Actor channel is closed")]
    ChannelClosed,
}

/// Handle given to a [`MessageHandler`] for sending messages.
pub struct ActorController<T> {
    inbox: mpsc::UnboundedSender<Message<T>>,
    outbox: mpsc::UnboundedSender<Message<T>>,
}

impl<T: Send + 'static> ActorController<T> {
    pub fn new(
        inbox: mpsc::UnboundedSender<Message<T>>,
        outbox: mpsc::UnboundedSender<Message<T>>,
    ) -> Self {
        Self { inbox, outbox }
    }

    /// Send a message to external recipients.
    pub fn send_message(&self, method: impl Into<String>, payload: T) -> Result<(), ActorSendError> {
        self.outbox
            .send(Message::new(method, payload))
            .map_err(|_| ActorSendError::ChannelClosed)
    }

    /// A sender into this actor's inbox, for spawned tasks.
    pub fn inbox(&self) -> mpsc::UnboundedSender<Message<T>> {
        self.inbox.clone()
    }
}

impl<T> Clone for ActorController<T> {
    fn clone(&self) -> Self {
        Self {
            inbox: self.inbox.clone(),
            outbox: self.outbox.clone(),
        }
    }
}

impl<T: Send + 'static, H: MessageHandler<T> + 'static> Drop for Actor<T, H> {
    fn drop(&mut self) {
        if let Some(shutdown_sender) = self.shutdown_sender.take() {
            log::debug!("Actor dropped without explicit shutdown, stopping message loop");
            let _ = shutdown_sender.send(());
        }
    }
}
