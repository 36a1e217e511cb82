//! Search box state.
//!
//! The query is applied to the active view on every keystroke, so there is
//! no separate result list here: the view's rows are the results.

/// Live search input.
#[derive(Debug, Clone, Default)]
pub struct SearchInput {
    /// Whether the search box has focus
    pub active: bool,
    /// Current search query
    pub query: String,
}

impl SearchInput {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            active: false,
            query: String::new(),
        }
    }

    /// Focus the box, continuing from `query`.
    pub fn start(&mut self, query: &str) {
        self.active = true;
        self.query = query.to_string();
    }

    /// Leave the box, keeping the query applied.
    pub const fn stop(&mut self) {
        self.active = false;
    }

    /// Leave the box and drop the query.
    pub fn cancel(&mut self) {
        self.active = false;
        self.query.clear();
    }

    pub fn push_char(&mut self, c: char) {
        self.query.push(c);
    }

    pub fn pop_char(&mut self) {
        self.query.pop();
    }
}
