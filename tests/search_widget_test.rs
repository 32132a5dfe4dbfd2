//! End-to-end behavior of a running search widget
//!
//! Time is paused, so the 400ms quiet window elapses only when every task is
//! idle and the runtime auto-advances the clock.

mod common;

use common::{drain, init_logging, items, next_snapshot, settled_snapshot, GatedFetcher};
use searchbox::{FetchError, ResultItem, ResultStatus, SearchWidget, WidgetConfig, WidgetMessage};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

fn config() -> WidgetConfig {
    WidgetConfig::default()
        .with_page_size(10)
        .with_debounce(Duration::from_millis(400))
}

fn committed(messages: &[WidgetMessage]) -> Vec<String> {
    messages
        .iter()
        .filter_map(|message| match message {
            WidgetMessage::QueryCommitted(query) => Some(query.clone()),
            _ => None,
        })
        .collect()
}

#[tokio::test(start_paused = true)]
async fn test_keystroke_burst_commits_once() {
    init_logging();
    let (fetcher, mut pending) = GatedFetcher::new();
    let (widget, mut events) = SearchWidget::spawn(Arc::new(fetcher), &config());

    widget.input("c").unwrap();
    sleep(Duration::from_millis(100)).await;
    widget.input("ca").unwrap();
    sleep(Duration::from_millis(100)).await;
    widget.input("cat").unwrap();

    let request = pending.recv().await.unwrap();
    assert_eq!(request.query, "cat");
    assert_eq!(request.limit, 10);
    assert_eq!(request.offset, 0);

    let before = drain(&mut events);
    assert_eq!(committed(&before), vec!["cat".to_string()]);

    request.respond_with(vec![ResultItem::new(1, "Cathy")], 1);
    let snapshot = settled_snapshot(&mut events, "cat").await;
    assert_eq!(snapshot.rows, vec![ResultItem::new(1, "Cathy")]);

    sleep(Duration::from_secs(2)).await;
    assert!(committed(&drain(&mut events)).is_empty());
    assert!(pending.try_recv().is_err());

    widget.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn test_typing_restarts_quiet_window() {
    let (fetcher, mut pending) = GatedFetcher::new();
    let (widget, _events) = SearchWidget::spawn(Arc::new(fetcher), &config());

    widget.input("d").unwrap();
    sleep(Duration::from_millis(300)).await;
    widget.input("do").unwrap();
    sleep(Duration::from_millis(300)).await;

    // 600ms after the first keystroke, 300ms after the last
    assert!(pending.try_recv().is_err());

    sleep(Duration::from_millis(150)).await;
    let request = pending.try_recv().expect("commit after quiet window");
    assert_eq!(request.query, "do");
}

#[tokio::test(start_paused = true)]
async fn test_empty_query_short_circuits() {
    let (fetcher, mut pending) = GatedFetcher::new();
    let (widget, mut events) = SearchWidget::spawn(Arc::new(fetcher), &config());

    widget.input("").unwrap();

    let first = events.recv().await.unwrap();
    assert_eq!(first.payload, WidgetMessage::QueryCommitted(String::new()));

    let snapshot = next_snapshot(&mut events).await;
    assert!(snapshot.rows.is_empty());
    assert_eq!(snapshot.total, 0);
    assert!(!snapshot.loading);
    assert!(!snapshot.has_more);

    sleep(Duration::from_secs(1)).await;
    assert!(pending.try_recv().is_err());
}

#[tokio::test(start_paused = true)]
async fn test_clearing_input_discards_in_flight_fetch() {
    let (fetcher, mut pending) = GatedFetcher::new();
    let (widget, mut events) = SearchWidget::spawn(Arc::new(fetcher), &config());

    widget.input("cat").unwrap();
    let request = pending.recv().await.unwrap();

    widget.input("").unwrap();
    let cleared = settled_snapshot(&mut events, "").await;
    assert!(cleared.rows.is_empty());

    request.respond_with(vec![ResultItem::new(1, "Cathy")], 1);
    sleep(Duration::from_millis(50)).await;

    for message in drain(&mut events) {
        if let WidgetMessage::DisplayUpdated(snapshot) = message {
            assert!(snapshot.rows.is_empty(), "late answer leaked: {:?}", snapshot.rows);
        }
    }
}

#[tokio::test(start_paused = true)]
async fn test_stale_answer_is_discarded() {
    init_logging();
    let (fetcher, mut pending) = GatedFetcher::new();
    let (widget, mut events) = SearchWidget::spawn(Arc::new(fetcher), &config());

    widget.input("cat").unwrap();
    let cat = pending.recv().await.unwrap();
    assert_eq!(cat.query, "cat");

    widget.input("dog").unwrap();
    let dog = pending.recv().await.unwrap();
    assert_eq!(dog.query, "dog");

    // "cat" answers after "dog" was committed
    cat.respond_with(vec![ResultItem::new(1, "Cathy")], 1);
    sleep(Duration::from_millis(10)).await;
    dog.respond_with(vec![ResultItem::new(2, "Doggo")], 1);

    let snapshot = settled_snapshot(&mut events, "dog").await;
    assert_eq!(snapshot.rows, vec![ResultItem::new(2, "Doggo")]);
    assert_eq!(snapshot.total, 1);

    sleep(Duration::from_millis(50)).await;
    for message in drain(&mut events) {
        if let WidgetMessage::DisplayUpdated(snapshot) = message {
            assert!(!snapshot.rows.contains(&ResultItem::new(1, "Cathy")));
        }
    }
}

#[tokio::test(start_paused = true)]
async fn test_pages_accumulate_until_exhausted() {
    let (fetcher, mut pending) = GatedFetcher::new();
    let (widget, mut events) = SearchWidget::spawn(Arc::new(fetcher), &config());

    widget.input("cat").unwrap();
    pending.recv().await.unwrap().respond_with(items(1, 10), 25);
    let first = settled_snapshot(&mut events, "cat").await;
    assert_eq!(first.rows.len(), 10);
    assert!(first.has_more);

    widget.viewport_near(9).unwrap();
    let request = pending.recv().await.unwrap();
    assert_eq!((request.limit, request.offset), (10, 10));

    let loading = next_snapshot(&mut events).await;
    assert!(loading.loading);
    assert!(loading.loading_placeholder_present);
    assert_eq!(loading.rows.len(), 11);
    assert_eq!(loading.rows.last(), Some(&ResultItem::loading()));

    request.respond_with(items(11, 10), 25);
    let second = settled_snapshot(&mut events, "cat").await;
    assert_eq!(second.rows.len(), 20);
    assert!(second.has_more);

    widget.viewport_near(19).unwrap();
    let request = pending.recv().await.unwrap();
    assert_eq!(request.offset, 20);
    request.respond_with(items(21, 5), 25);

    let third = settled_snapshot(&mut events, "cat").await;
    assert_eq!(third.rows.len(), 25);
    assert_eq!(third.rows.first().map(|row| row.id), Some(1));
    assert_eq!(third.rows.last().map(|row| row.id), Some(25));
    assert!(!third.has_more);
    assert!(!third.loading_placeholder_present);

    widget.viewport_near(24).unwrap();
    sleep(Duration::from_millis(50)).await;
    assert!(pending.try_recv().is_err());
}

#[tokio::test(start_paused = true)]
async fn test_continuation_answer_after_new_query_is_discarded() {
    init_logging();
    let (fetcher, mut pending) = GatedFetcher::new();
    let (widget, mut events) = SearchWidget::spawn(Arc::new(fetcher), &config());

    widget.input("a").unwrap();
    pending.recv().await.unwrap().respond_with(items(1, 10), 25);
    settled_snapshot(&mut events, "a").await;

    widget.viewport_near(9).unwrap();
    let more = pending.recv().await.unwrap();
    assert_eq!((more.query.as_str(), more.offset), ("a", 10));

    widget.input("b").unwrap();
    let b = pending.recv().await.unwrap();
    assert_eq!((b.query.as_str(), b.offset), ("b", 0));

    // The second page of "a" lands while "b" is in flight
    more.respond_with(items(11, 10), 25);
    sleep(Duration::from_millis(10)).await;
    b.respond_with(items(100, 3), 3);

    // Every snapshot of "b" up to and after it settles
    let mut seen = Vec::new();
    let settled = loop {
        let snapshot = next_snapshot(&mut events).await;
        if snapshot.query != "b" {
            continue;
        }
        seen.push(snapshot.clone());
        if !snapshot.loading {
            break snapshot;
        }
    };
    assert_eq!(settled.rows, items(100, 3));
    assert_eq!(settled.total, 3);
    assert!(!settled.has_more);

    sleep(Duration::from_millis(50)).await;
    seen.extend(drain(&mut events).into_iter().filter_map(|message| match message {
        WidgetMessage::DisplayUpdated(snapshot) => Some(snapshot),
        _ => None,
    }));
    for snapshot in seen {
        assert!(
            snapshot.rows.iter().all(|row| row.id >= 100 || row.is_sentinel()),
            "rows of \"a\" leaked into \"b\": {:?}",
            snapshot.rows
        );
    }
    assert!(pending.try_recv().is_err());
}

#[tokio::test(start_paused = true)]
async fn test_no_duplicate_continuation() {
    let (fetcher, mut pending) = GatedFetcher::new();
    let (widget, mut events) = SearchWidget::spawn(Arc::new(fetcher), &config());

    widget.input("cat").unwrap();
    pending.recv().await.unwrap().respond_with(items(1, 10), 25);
    settled_snapshot(&mut events, "cat").await;

    widget.viewport_near(9).unwrap();
    widget.viewport_near(9).unwrap();
    widget.viewport_near(10).unwrap();

    let request = pending.recv().await.unwrap();
    assert_eq!(request.offset, 10);
    sleep(Duration::from_millis(50)).await;
    assert!(pending.try_recv().is_err());
}

#[tokio::test(start_paused = true)]
async fn test_viewport_away_from_end_does_not_load() {
    let (fetcher, mut pending) = GatedFetcher::new();
    let (widget, mut events) = SearchWidget::spawn(Arc::new(fetcher), &config());

    widget.input("cat").unwrap();
    pending.recv().await.unwrap().respond_with(items(1, 10), 25);
    settled_snapshot(&mut events, "cat").await;

    widget.viewport_near(6).unwrap();
    sleep(Duration::from_millis(50)).await;
    assert!(pending.try_recv().is_err());
}

#[tokio::test(start_paused = true)]
async fn test_failure_shows_sentinel() {
    let (fetcher, mut pending) = GatedFetcher::new();
    let (widget, mut events) = SearchWidget::spawn(Arc::new(fetcher), &config());

    widget.input("zzz").unwrap();
    pending.recv().await.unwrap().respond(Err(FetchError::EmptyResult));

    let snapshot = settled_snapshot(&mut events, "zzz").await;
    assert_eq!(snapshot.rows, vec![ResultItem::no_options_found()]);
    assert_eq!(snapshot.total, 0);
    assert!(!snapshot.has_more);
    assert_eq!(snapshot.status, ResultStatus::NoResults);

    // The sentinel is not a loaded item
    widget.viewport_near(0).unwrap();
    sleep(Duration::from_millis(50)).await;
    assert!(pending.try_recv().is_err());
}

#[tokio::test(start_paused = true)]
async fn test_transport_failure_recovers_on_next_query() {
    let (fetcher, mut pending) = GatedFetcher::new();
    let (widget, mut events) = SearchWidget::spawn(Arc::new(fetcher), &config());

    widget.input("cat").unwrap();
    pending
        .recv()
        .await
        .unwrap()
        .respond(Err(FetchError::Transport("connection reset".to_string())));
    let failed = settled_snapshot(&mut events, "cat").await;
    assert_eq!(failed.status, ResultStatus::Failed);

    widget.input("cats").unwrap();
    pending
        .recv()
        .await
        .unwrap()
        .respond_with(vec![ResultItem::new(7, "Cats")], 1);
    let recovered = settled_snapshot(&mut events, "cats").await;
    assert_eq!(recovered.rows, vec![ResultItem::new(7, "Cats")]);
    assert_eq!(recovered.status, ResultStatus::Loaded);
}

#[tokio::test(start_paused = true)]
async fn test_selection_survives_new_query() {
    let (fetcher, mut pending) = GatedFetcher::new();
    let (widget, mut events) = SearchWidget::spawn(Arc::new(fetcher), &config());

    widget.input("dog").unwrap();
    pending
        .recv()
        .await
        .unwrap()
        .respond_with(vec![ResultItem::new(2, "Doggo")], 1);
    settled_snapshot(&mut events, "dog").await;

    widget.toggle_selection(ResultItem::new(2, "Doggo")).unwrap();
    widget.toggle_selection(ResultItem::no_options_found()).unwrap();
    let selection = loop {
        let message = events.recv().await.unwrap();
        if let WidgetMessage::SelectionChanged(selection) = message.payload {
            break selection;
        }
    };
    assert_eq!(selection, vec![ResultItem::new(2, "Doggo")]);

    widget.input("cat").unwrap();
    pending.recv().await.unwrap().respond_with(vec![ResultItem::new(1, "Cathy")], 1);
    let snapshot = settled_snapshot(&mut events, "cat").await;
    assert_eq!(snapshot.selection, vec![ResultItem::new(2, "Doggo")]);

    widget.deselect(2).unwrap();
    let snapshot = next_snapshot(&mut events).await;
    assert!(snapshot.selection.is_empty());
}
