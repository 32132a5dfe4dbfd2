//! Core module for notification-based communication
//!
//! This module provides a lightweight actor system based on notification
//! messages. An actor owns its handler's state exclusively; everything that
//! needs to change that state, including timers and the results of spawned
//! work, arrives as a message on the same loop.

pub mod actor;
pub mod message;

// Re-exports for convenience
pub use actor::{Actor, ActorController, ActorSendError};
pub use message::{Message, MessageHandler};
