//! Display side of the widget: row projection, list virtualization and row
//! formatting shared by the terminal front end and the one-shot CLI.

mod projector;
mod viewport;

pub use projector::{DisplayProjection, DisplayProjector};
pub use viewport::Viewport;

use crate::types::ResultItem;

/// Render a row as a single line no wider than `max_width` characters.
///
/// Real rows get their id as a prefix; synthetic rows show their label only.
pub fn format_row(item: &ResultItem, max_width: usize) -> String {
    let line = if item.is_sentinel() {
        item.name.clone()
    } else {
        format!("{:>6}  {}", item.id, item.name)
    };
    truncate_label(&line, max_width)
}

/// Truncate on a character boundary, marking the cut with "..."
pub fn truncate_label(text: &str, max_width: usize) -> String {
    if text.chars().count() <= max_width {
        return text.to_string();
    }
    if max_width <= 3 {
        return text.chars().take(max_width).collect();
    }

    let mut truncated: String = text.chars().take(max_width - 3).collect();
    truncated.push_str("...");
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_real_row() {
        let row = format_row(&ResultItem::new(42, "Doggo"), 80);
        assert_eq!(row, "    42  Doggo");
    }

    #[test]
    fn test_format_sentinel_row() {
        assert_eq!(format_row(&ResultItem::loading(), 80), "Loading...");
    }

    #[test]
    fn test_truncate_label() {
        assert_eq!(truncate_label("short", 10), "short");
        assert_eq!(truncate_label("a rather long name", 10), "a rathe...");
        assert_eq!(truncate_label("日本語の名前です", 5), "日本...");
        assert_eq!(truncate_label("abcdef", 2), "ab");
    }
}
