//! Projection of controller state into list rows
//!
//! The rendering layer only ever sees [`DisplayProjection`]: real rows, plus
//! at most one synthetic row. Synthetic rows carry the reserved id `0`.

use crate::controller::{FetchRequest, SearchController};
use crate::types::ResultItem;
use serde::{Deserialize, Serialize};

/// Rows to draw, in order
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DisplayProjection {
    pub rows: Vec<ResultItem>,
    pub loading_placeholder_present: bool,
}

impl DisplayProjection {
    /// Number of rows backed by real results
    pub fn real_row_count(&self) -> usize {
        self.rows.iter().filter(|row| !row.is_sentinel()).count()
    }
}

/// Maps controller state to rows and turns viewport positions into
/// load-more requests
#[derive(Debug, Clone, Default)]
pub struct DisplayProjector {
    load_more_threshold: usize,
}

impl DisplayProjector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allow "load more" when the viewport stops within `threshold` rows of
    /// the last loaded item
    pub fn with_threshold(threshold: usize) -> Self {
        Self {
            load_more_threshold: threshold,
        }
    }

    pub fn project(&self, controller: &SearchController) -> DisplayProjection {
        let results = controller.results();

        if results.status().shows_sentinel() {
            return DisplayProjection {
                rows: vec![ResultItem::no_options_found()],
                loading_placeholder_present: false,
            };
        }

        let mut rows = results.items().to_vec();
        let loading_placeholder_present = results.is_loading() && !rows.is_empty();
        if loading_placeholder_present {
            rows.push(ResultItem::loading());
        }

        DisplayProjection {
            rows,
            loading_placeholder_present,
        }
    }

    /// Viewport feedback from the rendering layer.
    ///
    /// Requests the next page only when `last_visible_index` has reached the
    /// end of the loaded items and the controller is idle with more to load.
    /// Repeated signals while a page is in flight are ignored.
    pub fn on_viewport_reached_near(
        &self,
        controller: &mut SearchController,
        last_visible_index: usize,
    ) -> Option<FetchRequest> {
        let loaded = controller.results().len();
        if !self.is_near_end(loaded, last_visible_index) {
            return None;
        }

        if controller.is_loading() || !controller.has_more() {
            log::trace!(
                "Viewport at {} of {}, but loading={} has_more={}",
                last_visible_index,
                loaded,
                controller.is_loading(),
                controller.has_more()
            );
            return None;
        }

        controller.load_more()
    }

    fn is_near_end(&self, loaded: usize, last_visible_index: usize) -> bool {
        loaded > 0 && last_visible_index.saturating_add(self.load_more_threshold) >= loaded - 1
    }
}
