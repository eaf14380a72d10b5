//! Interactive pull request picker with pagination and debounced search.
//!
//! The picker accumulates listing pages in an append-only list and shows a
//! "load more" row while more pages may exist. Typing into the filter field
//! arms a debounce timer; when it fires, a server-side search replaces the
//! displayed rows, cancelling any search still in flight so only the most
//! recent query's results are ever applied. Clearing the filter restores
//! the accumulated listing.

use std::any::Any;
use std::time::Duration;

use bubbletea_rs::{Cmd, Model};
use tokio::sync::oneshot;
use unicode_width::UnicodeWidthChar;

use crate::github::models::PullRequest;

use super::input::map_picker_key;
use super::messages::PickerMsg;

/// Quiet period after the last keystroke before a search fires.
const DEBOUNCE_DELAY: Duration = Duration::from_millis(300);

const FIRST_PAGE: u32 = 1;
const LOAD_MORE_LABEL: &str = "-- load more --";

/// Pull request picker model.
pub struct PickerApp {
    /// Append-only accumulation of listing pages.
    accumulated: Vec<PullRequest>,
    /// Search results currently replacing the listing, when search is
    /// active.
    search_results: Option<Vec<PullRequest>>,
    /// Last listing page fetched.
    page: u32,
    /// Whether the listing may have further pages. Heuristic: the last
    /// fetched page was non-empty.
    has_more: bool,
    /// Whether a listing page fetch is in flight.
    loading: bool,
    /// Whether a search request is in flight.
    searching: bool,
    /// Filter field contents.
    filter: String,
    /// Bumped on every keystroke; debounce timers carry the generation they
    /// were armed for, so stale timers are ignored.
    debounce_generation: u64,
    /// Bumped when a search starts; results carrying an older generation
    /// are discarded.
    search_generation: u64,
    /// Cancellation handle for the search currently in flight.
    cancel_search: Option<oneshot::Sender<()>>,
    /// Cursor position within the visible rows.
    cursor: usize,
    /// Pull request chosen by the user, set just before quitting.
    selection: Option<PullRequest>,
    /// Set once the picker has quit; later messages are ignored.
    done: bool,
    error: Option<String>,
    width: u16,
    height: u16,
}

impl PickerApp {
    /// Creates a picker waiting for its first listing page.
    #[must_use]
    pub fn new() -> Self {
        Self {
            accumulated: Vec::new(),
            search_results: None,
            page: 0,
            has_more: false,
            loading: true,
            searching: false,
            filter: String::new(),
            debounce_generation: 0,
            search_generation: 0,
            cancel_search: None,
            cursor: 0,
            selection: None,
            done: false,
            error: None,
            width: 80,
            height: 24,
        }
    }

    /// The pull request the user chose, if any.
    #[must_use]
    pub const fn selection(&self) -> Option<&PullRequest> {
        self.selection.as_ref()
    }

    /// Visible entries: search results while a search is applied, the
    /// accumulated listing otherwise.
    fn entries(&self) -> &[PullRequest] {
        self.search_results
            .as_deref()
            .unwrap_or(&self.accumulated)
    }

    /// The "load more" row only exists in listing mode while more pages may
    /// exist.
    const fn has_load_more_row(&self) -> bool {
        self.search_results.is_none() && self.has_more
    }

    fn row_count(&self) -> usize {
        self.entries().len() + usize::from(self.has_load_more_row())
    }

    fn is_load_more_row(&self, index: usize) -> bool {
        self.has_load_more_row() && index == self.entries().len()
    }

    fn clamp_cursor(&mut self) {
        let count = self.row_count();
        if count == 0 {
            self.cursor = 0;
        } else if self.cursor >= count {
            self.cursor = count - 1;
        }
    }

    /// Handles a picker message and returns any resulting command.
    pub fn handle_message(&mut self, msg: PickerMsg) -> Option<Cmd> {
        if self.done {
            return None;
        }

        match msg {
            PickerMsg::CursorUp => {
                self.cursor = self.cursor.saturating_sub(1);
                None
            }
            PickerMsg::CursorDown => {
                if self.cursor + 1 < self.row_count() {
                    self.cursor += 1;
                }
                None
            }
            PickerMsg::Accept => self.handle_accept(),
            PickerMsg::Dismiss => {
                self.done = true;
                Some(bubbletea_rs::quit())
            }
            PickerMsg::FilterInput(ch) => {
                self.filter.push(ch);
                Some(self.arm_debounce())
            }
            PickerMsg::FilterBackspace => {
                if self.filter.pop().is_some() {
                    Some(self.arm_debounce())
                } else {
                    None
                }
            }
            PickerMsg::DebounceElapsed { generation } => self.handle_debounce(generation),
            PickerMsg::PageLoaded { page, items } => {
                self.handle_page_loaded(page, items);
                None
            }
            PickerMsg::LoadFailed(message) => {
                self.loading = false;
                self.error = Some(message);
                None
            }
            PickerMsg::SearchFinished { generation, items } => {
                self.handle_search_finished(generation, items);
                None
            }
            PickerMsg::SearchFailed {
                generation,
                message,
            } => {
                if generation == self.search_generation {
                    self.searching = false;
                    self.cancel_search = None;
                    // Drop any stale search rows so the error is not shown
                    // against results of an earlier query.
                    self.search_results = None;
                    self.clamp_cursor();
                    self.error = Some(message);
                }
                None
            }
            PickerMsg::WindowResized { width, height } => {
                self.width = width;
                self.height = height;
                None
            }
        }
    }

    fn handle_accept(&mut self) -> Option<Cmd> {
        if self.is_load_more_row(self.cursor) {
            if self.loading {
                return None;
            }
            self.loading = true;
            self.error = None;
            return Some(Self::fetch_page_cmd(self.page + 1));
        }

        let chosen = self.entries().get(self.cursor).cloned()?;
        self.selection = Some(chosen);
        self.done = true;
        Some(bubbletea_rs::quit())
    }

    /// Arms a fresh debounce timer, invalidating any timer already running.
    fn arm_debounce(&mut self) -> Cmd {
        self.debounce_generation += 1;
        let generation = self.debounce_generation;
        Box::pin(async move {
            tokio::time::sleep(DEBOUNCE_DELAY).await;
            Some(Box::new(PickerMsg::DebounceElapsed { generation }) as Box<dyn Any + Send>)
        })
    }

    fn handle_debounce(&mut self, generation: u64) -> Option<Cmd> {
        if generation != self.debounce_generation {
            // A newer keystroke superseded this timer.
            return None;
        }

        let query = self.filter.trim().to_owned();
        if query.is_empty() {
            // Clearing the filter leaves search mode and restores the
            // accumulated listing.
            self.cancel_outstanding_search();
            self.searching = false;
            self.search_results = None;
            self.clamp_cursor();
            return None;
        }

        Some(self.start_search(query))
    }

    fn start_search(&mut self, query: String) -> Cmd {
        self.cancel_outstanding_search();
        self.search_generation += 1;
        self.searching = true;
        self.error = None;

        let generation = self.search_generation;
        let (cancel_tx, cancel_rx) = oneshot::channel();
        self.cancel_search = Some(cancel_tx);

        Box::pin(async move {
            tokio::select! {
                _ = cancel_rx => None,
                result = super::run_search(query) => {
                    let msg = match result {
                        Ok(items) => PickerMsg::SearchFinished { generation, items },
                        Err(error) => PickerMsg::SearchFailed {
                            generation,
                            message: error.to_string(),
                        },
                    };
                    Some(Box::new(msg) as Box<dyn Any + Send>)
                }
            }
        })
    }

    fn cancel_outstanding_search(&mut self) {
        if let Some(cancel) = self.cancel_search.take() {
            let _ = cancel.send(());
        }
    }

    fn handle_page_loaded(&mut self, page: u32, items: Vec<PullRequest>) {
        self.loading = false;
        self.page = page;
        self.has_more = !items.is_empty();
        self.accumulated.extend(items);

        if self.search_results.is_none() {
            if page == FIRST_PAGE {
                self.cursor = 0;
            } else {
                // The load was triggered from the "load more" row. Keep
                // focus where it was: on the sentinel when it is still
                // present, else on the final entry.
                self.cursor = if self.has_more {
                    self.accumulated.len()
                } else {
                    self.row_count().saturating_sub(1)
                };
            }
        }
    }

    fn handle_search_finished(&mut self, generation: u64, items: Vec<PullRequest>) {
        if generation != self.search_generation {
            tracing::debug!(generation, "discarding superseded search result");
            return;
        }
        self.searching = false;
        self.cancel_search = None;
        self.search_results = Some(items);
        self.cursor = 0;
    }

    fn status_line(&self) -> String {
        if let Some(error) = &self.error {
            return format!("error: {error}");
        }
        if self.loading {
            return "loading pull requests...".to_owned();
        }
        if self.searching {
            return "searching...".to_owned();
        }
        if self.row_count() == 0 {
            return "no pull requests found".to_owned();
        }
        "select a pull request  enter: generate slides  esc: cancel".to_owned()
    }
}

impl Default for PickerApp {
    fn default() -> Self {
        Self::new()
    }
}

impl PickerApp {
    fn fetch_page_cmd(page: u32) -> Cmd {
        Box::pin(async move {
            let msg = match super::fetch_page(page).await {
                Ok(items) => PickerMsg::PageLoaded { page, items },
                Err(error) => PickerMsg::LoadFailed(error.to_string()),
            };
            Some(Box::new(msg) as Box<dyn Any + Send>)
        })
    }
}

impl Model for PickerApp {
    fn init() -> (Self, Option<Cmd>) {
        (Self::new(), Some(Self::fetch_page_cmd(FIRST_PAGE)))
    }

    fn update(&mut self, msg: Box<dyn Any + Send>) -> Option<Cmd> {
        match msg.downcast::<PickerMsg>() {
            Ok(picker_msg) => self.handle_message(*picker_msg),
            Err(msg) => {
                if let Some(key_msg) = msg.downcast_ref::<bubbletea_rs::event::KeyMsg>() {
                    return map_picker_key(key_msg)
                        .and_then(|mapped| self.handle_message(mapped));
                }
                if let Some(size_msg) = msg.downcast_ref::<bubbletea_rs::event::WindowSizeMsg>() {
                    return self.handle_message(PickerMsg::WindowResized {
                        width: size_msg.width,
                        height: size_msg.height,
                    });
                }
                None
            }
        }
    }

    fn view(&self) -> String {
        let mut output = String::new();
        output.push_str(&format!("filter: {}\n\n", self.filter));

        let max_width = usize::from(self.width).saturating_sub(2).max(10);
        let visible_rows = usize::from(self.height).saturating_sub(4).max(1);

        // Window the rows so the cursor is always rendered.
        let first = self.cursor.saturating_sub(visible_rows.saturating_sub(1));
        for index in first..self.row_count().min(first + visible_rows) {
            let marker = if index == self.cursor { '>' } else { ' ' };
            let label = if self.is_load_more_row(index) {
                LOAD_MORE_LABEL.to_owned()
            } else {
                self.entries()
                    .get(index)
                    .map(PullRequest::label)
                    .unwrap_or_default()
            };
            output.push_str(&format!("{marker} {}\n", fit_width(&label, max_width)));
        }

        output.push('\n');
        output.push_str(&self.status_line());
        output
    }
}

/// Cuts a label to the given display width, honouring wide characters.
fn fit_width(text: &str, max_width: usize) -> String {
    let mut width = 0_usize;
    let mut output = String::new();
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if width + ch_width > max_width {
            break;
        }
        width += ch_width;
        output.push(ch);
    }
    output
}

#[cfg(test)]
#[path = "picker_tests.rs"]
mod tests;
