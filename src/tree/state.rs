//! Expansion, selection and bookmark state keyed by node id.
//!
//! None of these types hold a reference to a tree, so they survive a rebuild.
//! Ids that no longer exist simply fail to resolve.

use super::node::NodeId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Ids of expanded nodes. The root is implicitly expanded and never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpansionSet(BTreeSet<NodeId>);

impl ExpansionSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        id.is_root() || self.0.contains(&id)
    }

    /// Returns `true` if the id was newly inserted.
    pub fn insert(&mut self, id: NodeId) -> bool {
        !id.is_root() && self.0.insert(id)
    }

    /// Returns `true` if the id was present.
    pub fn remove(&mut self, id: NodeId) -> bool {
        self.0.remove(&id)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.0.iter().copied()
    }

    #[must_use]
    pub fn to_vec(&self) -> Vec<NodeId> {
        self.iter().collect()
    }
}

impl FromIterator<NodeId> for ExpansionSet {
    fn from_iter<I: IntoIterator<Item = NodeId>>(iter: I) -> Self {
        let mut set = Self::new();
        for id in iter {
            set.insert(id);
        }
        set
    }
}

/// Ordered selection. The first id is the primary selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionSet(Vec<NodeId>);

impl SelectionSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selection of `ids` in order, without duplicates.
    #[must_use]
    pub fn from_ids(ids: impl IntoIterator<Item = NodeId>) -> Self {
        let mut selected = Vec::new();
        for id in ids {
            if !selected.contains(&id) {
                selected.push(id);
            }
        }
        Self(selected)
    }

    #[must_use]
    pub fn primary(&self) -> Option<NodeId> {
        self.0.first().copied()
    }

    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.0.contains(&id)
    }

    #[must_use]
    pub fn ids(&self) -> &[NodeId] {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Snapshot of selection and expansion, restorable later by id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bookmark {
    pub selected_ids: Vec<NodeId>,
    pub expanded_ids: Vec<NodeId>,
}

impl Bookmark {
    #[must_use]
    pub fn capture(selection: &SelectionSet, expanded: &ExpansionSet) -> Self {
        Self {
            selected_ids: selection.ids().to_vec(),
            expanded_ids: expanded.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_is_implicitly_expanded() {
        let mut set = ExpansionSet::new();
        assert!(set.contains(NodeId::ROOT));
        assert!(!set.insert(NodeId::ROOT));
        assert!(set.is_empty());
    }

    #[test]
    fn test_expansion_insert_remove() {
        let mut set: ExpansionSet = [NodeId(3), NodeId(1)].into_iter().collect();
        assert_eq!(set.to_vec(), vec![NodeId(1), NodeId(3)]);
        assert!(!set.insert(NodeId(3)));
        assert!(set.remove(NodeId(3)));
        assert!(!set.contains(NodeId(3)));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_selection_dedupes_and_keeps_order() {
        let selection = SelectionSet::from_ids([NodeId(4), NodeId(2), NodeId(4)]);
        assert_eq!(selection.ids(), &[NodeId(4), NodeId(2)]);
        assert_eq!(selection.primary(), Some(NodeId(4)));
        assert!(SelectionSet::new().primary().is_none());
    }

    #[test]
    fn test_bookmark_serializes_as_plain_ids() {
        let selection = SelectionSet::from_ids([NodeId(2)]);
        let expanded: ExpansionSet = [NodeId(1)].into_iter().collect();
        let bookmark = Bookmark::capture(&selection, &expanded);

        let json = serde_json::to_string(&bookmark).expect("serialize");
        assert_eq!(json, r#"{"selectedIds":[2],"expandedIds":[1]}"#);

        let back: Bookmark = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, bookmark);
    }
}
