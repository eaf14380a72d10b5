//! Unit tests for the picker state machine.

use super::*;
use crate::github::models::PullRequest;
use crate::ui::messages::PickerMsg;

fn pr(number: u64, title: &str) -> PullRequest {
    PullRequest {
        number,
        title: title.to_owned(),
        description: String::new(),
        author: "octocat".to_owned(),
    }
}

fn page(numbers: &[u64]) -> Vec<PullRequest> {
    numbers
        .iter()
        .map(|&number| pr(number, &format!("PR {number}")))
        .collect()
}

fn app_with_first_page(numbers: &[u64]) -> PickerApp {
    let mut app = PickerApp::new();
    let cmd = app.handle_message(PickerMsg::PageLoaded {
        page: 1,
        items: page(numbers),
    });
    assert!(cmd.is_none());
    app
}

#[test]
fn the_first_page_leaves_the_cursor_on_the_first_entry() {
    let app = app_with_first_page(&[1, 2]);

    assert_eq!(app.cursor, 0, "the picker opens on the first entry");
    assert!(app.has_load_more_row());
}

#[test]
fn pages_accumulate_and_the_sentinel_disappears_after_an_empty_page() {
    let mut app = app_with_first_page(&[1, 2]);

    // Two entries plus the "load more" row.
    assert_eq!(app.row_count(), 3);
    assert!(app.is_load_more_row(2));

    // Move to the sentinel and activate it; a fetch command is issued.
    app.handle_message(PickerMsg::CursorDown);
    app.handle_message(PickerMsg::CursorDown);
    let cmd = app.handle_message(PickerMsg::Accept);
    assert!(cmd.is_some());
    assert!(app.loading);

    app.handle_message(PickerMsg::PageLoaded {
        page: 2,
        items: page(&[3]),
    });
    assert_eq!(app.accumulated.len(), 3);
    assert!(app.has_load_more_row());
    assert_eq!(app.cursor, 3, "focus should stay on the load-more row");

    // The final page is empty: the sentinel goes away and earlier pages
    // stay untouched.
    let cmd = app.handle_message(PickerMsg::Accept);
    assert!(cmd.is_some());
    app.handle_message(PickerMsg::PageLoaded {
        page: 3,
        items: Vec::new(),
    });

    assert_eq!(app.accumulated.len(), 3);
    assert!(!app.has_load_more_row());
    assert_eq!(app.row_count(), 3);
    assert_eq!(app.cursor, 2, "focus should fall back to the last entry");
    let numbers: Vec<u64> = app.accumulated.iter().map(|item| item.number).collect();
    assert_eq!(numbers, vec![1, 2, 3]);
}

#[test]
fn typing_then_clearing_before_the_debounce_fires_issues_no_search() {
    let mut app = app_with_first_page(&[1]);

    let cmd = app.handle_message(PickerMsg::FilterInput('a'));
    assert!(cmd.is_some(), "keystroke should arm the debounce timer");
    let cmd = app.handle_message(PickerMsg::FilterBackspace);
    assert!(cmd.is_some(), "backspace should re-arm the debounce timer");

    // The first timer fires late and is stale.
    let cmd = app.handle_message(PickerMsg::DebounceElapsed { generation: 1 });
    assert!(cmd.is_none());

    // The second timer fires with an empty filter: listing mode, no
    // search.
    let cmd = app.handle_message(PickerMsg::DebounceElapsed { generation: 2 });
    assert!(cmd.is_none());

    assert_eq!(app.search_generation, 0, "no search should have started");
    assert!(app.cancel_search.is_none());
    assert!(app.search_results.is_none());
}

#[tokio::test]
async fn a_superseded_search_is_cancelled_and_only_the_newest_result_applies() {
    let mut app = app_with_first_page(&[1]);

    // Query A starts.
    app.handle_message(PickerMsg::FilterInput('a'));
    let cmd = app.handle_message(PickerMsg::DebounceElapsed {
        generation: app.debounce_generation,
    });
    assert!(cmd.is_some(), "query A should start a search");
    assert_eq!(app.search_generation, 1);

    // Swap in an observable cancellation channel for query A.
    let (cancel_tx, mut cancel_rx) = tokio::sync::oneshot::channel();
    app.cancel_search = Some(cancel_tx);

    // Query B starts before A finishes; A must be cancelled.
    app.handle_message(PickerMsg::FilterInput('b'));
    let cmd = app.handle_message(PickerMsg::DebounceElapsed {
        generation: app.debounce_generation,
    });
    assert!(cmd.is_some(), "query B should start a search");
    assert_eq!(app.search_generation, 2);
    assert!(
        cancel_rx.try_recv().is_ok(),
        "query A's cancellation signal should have fired"
    );

    // A's result straggles in and is discarded.
    app.handle_message(PickerMsg::SearchFinished {
        generation: 1,
        items: page(&[10]),
    });
    assert!(app.search_results.is_none());

    // B's result applies.
    app.handle_message(PickerMsg::SearchFinished {
        generation: 2,
        items: page(&[20]),
    });
    let shown: Vec<u64> = app.entries().iter().map(|item| item.number).collect();
    assert_eq!(shown, vec![20]);
    assert!(!app.has_load_more_row());
}

#[test]
fn clearing_the_filter_restores_the_accumulated_listing() {
    let mut app = app_with_first_page(&[1, 2]);
    app.search_results = Some(page(&[9]));
    app.searching = false;
    app.filter = "query".to_owned();

    // Drain the filter; the final backspace's timer fires with an empty
    // field.
    for _ in 0..5 {
        app.handle_message(PickerMsg::FilterBackspace);
    }
    let cmd = app.handle_message(PickerMsg::DebounceElapsed {
        generation: app.debounce_generation,
    });
    assert!(cmd.is_none());

    assert!(app.search_results.is_none());
    assert_eq!(app.row_count(), 3, "listing plus sentinel should be back");
}

#[test]
fn accepting_an_entry_records_the_selection_and_quits() {
    let mut app = app_with_first_page(&[1, 2]);
    app.cursor = 1;

    let cmd = app.handle_message(PickerMsg::Accept);
    assert!(cmd.is_some(), "accepting should quit the program");
    assert_eq!(app.selection().map(|item| item.number), Some(2));

    // Terminal state: further messages are ignored.
    app.handle_message(PickerMsg::CursorUp);
    assert_eq!(app.cursor, 1);
}

#[test]
fn dismissing_leaves_no_selection() {
    let mut app = app_with_first_page(&[1]);

    let cmd = app.handle_message(PickerMsg::Dismiss);
    assert!(cmd.is_some());
    assert!(app.selection().is_none());
}

#[test]
fn a_failed_search_restores_the_listing_under_the_error() {
    let mut app = app_with_first_page(&[1, 2]);

    app.handle_message(PickerMsg::FilterInput('a'));
    let cmd = app.handle_message(PickerMsg::DebounceElapsed {
        generation: app.debounce_generation,
    });
    assert!(cmd.is_some(), "typing should start a search");

    // Rows from an earlier query are still on screen when the new search
    // fails; they must not stay there under the error line.
    app.search_results = Some(page(&[9]));
    app.handle_message(PickerMsg::SearchFailed {
        generation: app.search_generation,
        message: "search pulls failed with status 500".to_owned(),
    });

    assert!(app.search_results.is_none());
    assert_eq!(app.row_count(), 3, "listing plus sentinel should be back");
    assert!(
        app.error
            .as_deref()
            .is_some_and(|error| error.contains("500"))
    );
}

#[test]
fn view_marks_the_cursor_and_shows_the_load_more_row() {
    let mut app = app_with_first_page(&[7]);
    app.cursor = 0;

    let view = app.view();
    assert!(view.contains("> #7: PR 7"));
    assert!(view.contains("-- load more --"));
}

#[test]
fn view_scrolls_to_keep_the_cursor_row_visible() {
    let numbers: Vec<u64> = (1..=30).collect();
    let mut app = app_with_first_page(&numbers);
    app.handle_message(PickerMsg::WindowResized {
        width: 80,
        height: 24,
    });

    // Cursor on the sentinel, past what an unscrolled viewport would show.
    app.cursor = 30;
    let view = app.view();
    assert!(
        view.contains("> -- load more --"),
        "cursor row missing from: {view}"
    );
    assert!(
        !view.contains("#1: PR 1\n"),
        "viewport should have scrolled past the first entry"
    );

    // Back at the top the first entry is rendered again.
    app.cursor = 0;
    let view = app.view();
    assert!(view.contains("> #1: PR 1"));
}
