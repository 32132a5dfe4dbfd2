//! searchbox - debounced, paginated search-as-you-type
//!
//! A search widget core: keystrokes are debounced into committed queries,
//! pages are fetched from a remote endpoint and merged into a growing result
//! set, and answers that belong to an outdated query are dropped. The
//! rendering layer only sees [`DisplaySnapshot`]s.

pub mod actors;
pub mod cli;
pub mod config;
pub mod controller;
pub mod core;
pub mod display;
pub mod error;
pub mod fetcher;
pub mod result_set;
pub mod search_debouncer;
pub mod selection;
pub mod tui;
pub mod types;
pub mod widget;

// 公開API
pub use actors::{DisplaySnapshot, WidgetMessage};
pub use config::WidgetConfig;
pub use controller::{FetchRequest, FetchTicket, Phase, Resolution, SearchController};
pub use display::{DisplayProjection, DisplayProjector, Viewport};
pub use error::{ConfigError, FailureKind, FetchError};
pub use fetcher::{HttpPageFetcher, PageFetcher};
pub use result_set::ResultSet;
pub use search_debouncer::QueryDebouncer;
pub use selection::SelectionSet;
pub use types::{Page, Query, ResultItem, ResultStatus};
pub use widget::{SearchWidget, WidgetEvents};
