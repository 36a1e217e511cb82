//! Back/forward history for cross-view navigation.
//!
//! Each entry is the bookmark of the view that was left, so going back
//! restores that view's selection and expansion exactly as it was.

use super::constants::HISTORY_LIMIT;
use crate::views::NavigationBookmark;
use std::collections::VecDeque;

#[derive(Debug, Clone)]
pub struct NavigationHistory {
    back: VecDeque<NavigationBookmark>,
    forward: Vec<NavigationBookmark>,
    limit: usize,
}

impl Default for NavigationHistory {
    fn default() -> Self {
        Self::with_limit(HISTORY_LIMIT)
    }
}

impl NavigationHistory {
    #[must_use]
    pub fn with_limit(limit: usize) -> Self {
        Self {
            back: VecDeque::new(),
            forward: Vec::new(),
            limit: limit.max(1),
        }
    }

    /// Record the view being left. A new jump discards the forward trail.
    pub fn push(&mut self, left: NavigationBookmark) {
        if self.back.len() == self.limit {
            self.back.pop_front();
        }
        self.back.push_back(left);
        self.forward.clear();
    }

    /// Step back, remembering `current` for a later [`forward`](Self::forward).
    pub fn back(&mut self, current: NavigationBookmark) -> Option<NavigationBookmark> {
        let target = self.back.pop_back()?;
        self.forward.push(current);
        Some(target)
    }

    /// Step forward, remembering `current` for a later [`back`](Self::back).
    pub fn forward(&mut self, current: NavigationBookmark) -> Option<NavigationBookmark> {
        let target = self.forward.pop()?;
        if self.back.len() == self.limit {
            self.back.pop_front();
        }
        self.back.push_back(current);
        Some(target)
    }

    #[must_use]
    pub fn can_go_back(&self) -> bool {
        !self.back.is_empty()
    }

    #[must_use]
    pub fn can_go_forward(&self) -> bool {
        !self.forward.is_empty()
    }

    /// Views on the back trail, oldest first.
    #[must_use]
    pub fn trail(&self) -> String {
        self.back
            .iter()
            .map(|b| b.view.title())
            .collect::<Vec<_>>()
            .join(" > ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{Bookmark, NodeId};
    use crate::views::ViewKind;

    fn mark(view: ViewKind, selected: u32) -> NavigationBookmark {
        NavigationBookmark {
            view,
            state: Bookmark {
                selected_ids: vec![NodeId(selected)],
                expanded_ids: Vec::new(),
            },
        }
    }

    #[test]
    fn test_back_then_forward() {
        let mut history = NavigationHistory::default();
        history.push(mark(ViewKind::Bundles, 2));
        assert_eq!(history.trail(), "Bundles");

        let back = history.back(mark(ViewKind::Assets, 5)).unwrap();
        assert_eq!(back, mark(ViewKind::Bundles, 2));
        assert!(!history.can_go_back());
        assert!(history.can_go_forward());

        let forward = history.forward(mark(ViewKind::Bundles, 3)).unwrap();
        assert_eq!(forward, mark(ViewKind::Assets, 5));
        assert_eq!(history.back(mark(ViewKind::Assets, 5)), Some(mark(ViewKind::Bundles, 3)));
    }

    #[test]
    fn test_push_clears_forward() {
        let mut history = NavigationHistory::default();
        history.push(mark(ViewKind::Groups, 1));
        history.back(mark(ViewKind::Bundles, 1));
        history.push(mark(ViewKind::Groups, 4));
        assert!(!history.can_go_forward());
        assert_eq!(history.forward(mark(ViewKind::Bundles, 1)), None);
    }

    #[test]
    fn test_limit_drops_oldest() {
        let mut history = NavigationHistory::with_limit(2);
        history.push(mark(ViewKind::Groups, 1));
        history.push(mark(ViewKind::Groups, 2));
        history.push(mark(ViewKind::Groups, 3));

        assert_eq!(history.back(mark(ViewKind::Bundles, 9)), Some(mark(ViewKind::Groups, 3)));
        assert_eq!(history.back(mark(ViewKind::Bundles, 9)), Some(mark(ViewKind::Groups, 2)));
        assert_eq!(history.back(mark(ViewKind::Bundles, 9)), None);
    }
}
