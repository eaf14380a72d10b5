//! Side-panel style tree grouping pull requests by state.
//!
//! Two fixed category nodes, open and closed, lazily fetch their children
//! on first expansion. Each category carries an explicit kind that maps to
//! the listing query's state parameter; the label text plays no part in
//! query construction. Refresh discards cached children and re-requests
//! the expanded categories from scratch.

use std::any::Any;

use bubbletea_rs::{Cmd, Model};

use crate::github::gateway::PullRequestState;
use crate::github::models::PullRequest;

use super::input::map_panel_key;
use super::messages::PanelMsg;

const FIRST_PAGE: u32 = 1;

/// Category kind carried on each tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrCategory {
    /// Open pull requests.
    Open,
    /// Closed (including merged) pull requests.
    Closed,
}

impl PrCategory {
    /// Listing state filter this category queries with.
    #[must_use]
    pub const fn query_state(self) -> PullRequestState {
        match self {
            Self::Open => PullRequestState::Open,
            Self::Closed => PullRequestState::Closed,
        }
    }

    /// Display label for the category row.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Open => "Open Pull Requests",
            Self::Closed => "Closed Pull Requests",
        }
    }
}

/// One category node with its lazily fetched children.
#[derive(Debug)]
struct CategoryNode {
    category: PrCategory,
    expanded: bool,
    loading: bool,
    children: Option<Vec<PullRequest>>,
}

impl CategoryNode {
    const fn new(category: PrCategory) -> Self {
        Self {
            category,
            expanded: false,
            loading: false,
            children: None,
        }
    }

    fn visible_children(&self) -> &[PullRequest] {
        if self.expanded {
            self.children.as_deref().unwrap_or_default()
        } else {
            &[]
        }
    }
}

/// A row in the flattened tree view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PanelRow {
    Category(PrCategory),
    /// Child at `index` within its category's children.
    Entry(PrCategory, usize),
}

/// Side-panel tree model.
pub struct PanelApp {
    open: CategoryNode,
    closed: CategoryNode,
    cursor: usize,
    selection: Option<PullRequest>,
    done: bool,
    error: Option<String>,
    height: u16,
}

impl PanelApp {
    /// Creates a panel with both categories collapsed.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            open: CategoryNode::new(PrCategory::Open),
            closed: CategoryNode::new(PrCategory::Closed),
            cursor: 0,
            selection: None,
            done: false,
            error: None,
            height: 24,
        }
    }

    /// The pull request the user chose, if any.
    #[must_use]
    pub const fn selection(&self) -> Option<&PullRequest> {
        self.selection.as_ref()
    }

    fn node(&self, category: PrCategory) -> &CategoryNode {
        match category {
            PrCategory::Open => &self.open,
            PrCategory::Closed => &self.closed,
        }
    }

    fn node_mut(&mut self, category: PrCategory) -> &mut CategoryNode {
        match category {
            PrCategory::Open => &mut self.open,
            PrCategory::Closed => &mut self.closed,
        }
    }

    fn node_for_state(&mut self, state: PullRequestState) -> Option<&mut CategoryNode> {
        match state {
            PullRequestState::Open => Some(&mut self.open),
            PullRequestState::Closed => Some(&mut self.closed),
            PullRequestState::All => None,
        }
    }

    fn rows(&self) -> Vec<PanelRow> {
        let mut rows = Vec::new();
        for node in [&self.open, &self.closed] {
            rows.push(PanelRow::Category(node.category));
            for index in 0..node.visible_children().len() {
                rows.push(PanelRow::Entry(node.category, index));
            }
        }
        rows
    }

    fn clamp_cursor(&mut self) {
        let count = self.rows().len();
        if self.cursor >= count {
            self.cursor = count.saturating_sub(1);
        }
    }

    /// Handles a panel message and returns any resulting command.
    pub fn handle_message(&mut self, msg: PanelMsg) -> Option<Cmd> {
        if self.done {
            return None;
        }

        match msg {
            PanelMsg::CursorUp => {
                self.cursor = self.cursor.saturating_sub(1);
                None
            }
            PanelMsg::CursorDown => {
                if self.cursor + 1 < self.rows().len() {
                    self.cursor += 1;
                }
                None
            }
            PanelMsg::Accept => self.handle_accept(),
            PanelMsg::Dismiss => {
                self.done = true;
                Some(bubbletea_rs::quit())
            }
            PanelMsg::Refresh => self.handle_refresh(),
            PanelMsg::ChildrenLoaded { state, items } => {
                if let Some(node) = self.node_for_state(state) {
                    node.loading = false;
                    node.children = Some(items);
                }
                None
            }
            PanelMsg::RefreshFinished { results } => {
                for (state, outcome) in results {
                    let Some(node) = self.node_for_state(state) else {
                        continue;
                    };
                    node.loading = false;
                    match outcome {
                        Ok(items) => node.children = Some(items),
                        Err(message) => self.error = Some(message),
                    }
                }
                self.clamp_cursor();
                None
            }
            PanelMsg::ChildrenFailed { state, message } => {
                if let Some(node) = self.node_for_state(state) {
                    node.loading = false;
                    node.expanded = false;
                }
                self.error = Some(message);
                None
            }
            PanelMsg::WindowResized { height, .. } => {
                self.height = height;
                None
            }
        }
    }

    fn handle_accept(&mut self) -> Option<Cmd> {
        let row = *self.rows().get(self.cursor)?;
        match row {
            PanelRow::Category(category) => self.toggle_category(category),
            PanelRow::Entry(category, index) => {
                let chosen = self.node(category).visible_children().get(index).cloned()?;
                self.selection = Some(chosen);
                self.done = true;
                Some(bubbletea_rs::quit())
            }
        }
    }

    fn toggle_category(&mut self, category: PrCategory) -> Option<Cmd> {
        let node = self.node_mut(category);
        if node.expanded {
            node.expanded = false;
            self.clamp_cursor();
            return None;
        }

        node.expanded = true;
        if node.children.is_some() || node.loading {
            return None;
        }
        node.loading = true;
        self.error = None;
        Some(Self::fetch_children_cmd(category.query_state()))
    }

    /// Discards cached children and re-requests the expanded categories.
    fn handle_refresh(&mut self) -> Option<Cmd> {
        let mut states = Vec::new();
        for category in [PrCategory::Open, PrCategory::Closed] {
            let node = self.node_mut(category);
            node.children = None;
            if node.expanded {
                node.loading = true;
                states.push(category.query_state());
            }
        }
        self.error = None;
        self.clamp_cursor();

        if states.is_empty() {
            return None;
        }

        Some(Box::pin(async move {
            let mut results = Vec::with_capacity(states.len());
            for state in states {
                let outcome = super::fetch_page_with_state(FIRST_PAGE, state)
                    .await
                    .map_err(|error| error.to_string());
                results.push((state, outcome));
            }
            Some(Box::new(PanelMsg::RefreshFinished { results }) as Box<dyn Any + Send>)
        }))
    }

    fn fetch_children_cmd(state: PullRequestState) -> Cmd {
        Box::pin(async move {
            let msg = match super::fetch_page_with_state(FIRST_PAGE, state).await {
                Ok(items) => PanelMsg::ChildrenLoaded { state, items },
                Err(error) => PanelMsg::ChildrenFailed {
                    state,
                    message: error.to_string(),
                },
            };
            Some(Box::new(msg) as Box<dyn Any + Send>)
        })
    }

    fn status_line(&self) -> String {
        if let Some(error) = &self.error {
            return format!("error: {error}");
        }
        if self.open.loading || self.closed.loading {
            return "loading pull requests...".to_owned();
        }
        "enter: expand/generate  r: refresh  q: quit".to_owned()
    }
}

impl Default for PanelApp {
    fn default() -> Self {
        Self::new()
    }
}

impl Model for PanelApp {
    fn init() -> (Self, Option<Cmd>) {
        (Self::new(), None)
    }

    fn update(&mut self, msg: Box<dyn Any + Send>) -> Option<Cmd> {
        match msg.downcast::<PanelMsg>() {
            Ok(panel_msg) => self.handle_message(*panel_msg),
            Err(msg) => {
                if let Some(key_msg) = msg.downcast_ref::<bubbletea_rs::event::KeyMsg>() {
                    return map_panel_key(key_msg).and_then(|mapped| self.handle_message(mapped));
                }
                if let Some(size_msg) = msg.downcast_ref::<bubbletea_rs::event::WindowSizeMsg>() {
                    return self.handle_message(PanelMsg::WindowResized {
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

        for (index, row) in self.rows().iter().enumerate() {
            let marker = if index == self.cursor { '>' } else { ' ' };
            match row {
                PanelRow::Category(category) => {
                    let node = self.node(*category);
                    let arrow = if node.expanded { 'v' } else { '>' };
                    output.push_str(&format!("{marker} {arrow} {}\n", category.label()));
                }
                PanelRow::Entry(category, child_index) => {
                    let label = self
                        .node(*category)
                        .visible_children()
                        .get(*child_index)
                        .map(PullRequest::label)
                        .unwrap_or_default();
                    output.push_str(&format!("{marker}     {label}\n"));
                }
            }
        }

        output.push('\n');
        output.push_str(&self.status_line());
        output
    }
}
