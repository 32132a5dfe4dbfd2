//! Actor implementations
//!
//! Concrete handlers running on the core actor system.

pub mod messages;
pub mod search_widget;

pub use messages::{DisplaySnapshot, WidgetMessage};
pub use search_widget::SearchWidgetActor;
