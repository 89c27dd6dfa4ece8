// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Widget paths: root-to-leaf sequences of weak widget references.

use alloc::vec::Vec;
use core::ops::Index;

use smallvec::SmallVec;

use crate::types::WidgetId;
use crate::weak::WeakRef;

/// An ordered sequence of [`WeakRef`]s, root-most first and leaf-most last.
///
/// A path never owns widgets. Entries may go stale at any time (a handler can
/// remove widgets mid-dispatch), so consumers check [`WeakRef::is_valid`] on
/// each entry before use.
///
/// Equality and the identity helpers ([`contains_widget`](Self::contains_widget),
/// [`position_of`](Self::position_of)) compare the underlying [`WidgetId`]s.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct WidgetPath {
    refs: SmallVec<[WeakRef; 8]>,
}

impl WidgetPath {
    /// An empty path.
    pub fn new() -> Self {
        Self::default()
    }

    /// A path holding a single widget.
    pub fn single(r: WeakRef) -> Self {
        let mut path = Self::new();
        path.push(r);
        path
    }

    /// Append a ref at the leaf end.
    pub fn push(&mut self, r: WeakRef) {
        self.refs.push(r);
    }

    /// Insert a ref at `index`, shifting later entries toward the leaf.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert(&mut self, index: usize, r: WeakRef) {
        self.refs.insert(index, r);
    }

    /// Remove and return the ref at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn remove(&mut self, index: usize) -> WeakRef {
        self.refs.remove(index)
    }

    /// Remove the leaf-most ref.
    pub fn pop(&mut self) -> Option<WeakRef> {
        self.refs.pop()
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.refs.clear();
    }

    /// Keep only the first `len` entries.
    pub fn truncate(&mut self, len: usize) {
        self.refs.truncate(len);
    }

    /// Number of entries, stale ones included.
    pub fn len(&self) -> usize {
        self.refs.len()
    }

    /// Whether the path has no entries.
    pub fn is_empty(&self) -> bool {
        self.refs.is_empty()
    }

    /// The entry at `index`.
    pub fn get(&self, index: usize) -> Option<&WeakRef> {
        self.refs.get(index)
    }

    /// The root-most entry.
    pub fn first(&self) -> Option<&WeakRef> {
        self.refs.first()
    }

    /// The leaf-most entry.
    pub fn last(&self) -> Option<&WeakRef> {
        self.refs.last()
    }

    /// Iterate root to leaf; call `.rev()` for leaf to root.
    pub fn iter(&self) -> core::slice::Iter<'_, WeakRef> {
        self.refs.iter()
    }

    /// The leaf-most entry that is still alive.
    pub fn leaf(&self) -> Option<WidgetId> {
        self.refs.iter().rev().find_map(WeakRef::upgrade)
    }

    /// Whether any entry (valid or not) names `id`.
    pub fn contains_widget(&self, id: WidgetId) -> bool {
        self.refs.iter().any(|r| r.refers_to(id))
    }

    /// Index of the first entry naming `id`.
    pub fn position_of(&self, id: WidgetId) -> Option<usize> {
        self.refs.iter().position(|r| r.refers_to(id))
    }

    /// Ids of all entries, stale ones included.
    pub fn ids(&self) -> Vec<WidgetId> {
        self.refs.iter().map(WeakRef::id).collect()
    }

    /// Ids of the entries that are still alive, root to leaf.
    pub fn live_ids(&self) -> Vec<WidgetId> {
        self.refs.iter().filter_map(WeakRef::upgrade).collect()
    }

    /// The prefix of this path up to and including `index`.
    pub fn sub_path(&self, index: usize) -> Self {
        let end = (index + 1).min(self.refs.len());
        self.refs[..end].iter().cloned().collect()
    }

    /// Drop stale entries.
    pub fn retain_valid(&mut self) {
        self.refs.retain(|r| r.is_valid());
    }

    /// Whether every entry is still alive.
    pub fn is_fully_valid(&self) -> bool {
        self.refs.iter().all(WeakRef::is_valid)
    }
}

impl Index<usize> for WidgetPath {
    type Output = WeakRef;

    fn index(&self, index: usize) -> &WeakRef {
        &self.refs[index]
    }
}

impl FromIterator<WeakRef> for WidgetPath {
    fn from_iter<I: IntoIterator<Item = WeakRef>>(iter: I) -> Self {
        Self {
            refs: iter.into_iter().collect(),
        }
    }
}

impl Extend<WeakRef> for WidgetPath {
    fn extend<I: IntoIterator<Item = WeakRef>>(&mut self, iter: I) {
        self.refs.extend(iter);
    }
}

impl<'a> IntoIterator for &'a WidgetPath {
    type Item = &'a WeakRef;
    type IntoIter = core::slice::Iter<'a, WeakRef>;

    fn into_iter(self) -> Self::IntoIter {
        self.refs.iter()
    }
}

impl core::fmt::Debug for WidgetPath {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.refs.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Blank, WidgetProps, WidgetTree};
    use alloc::vec;
    use kurbo::Rect;

    fn three() -> (WidgetTree, [WidgetId; 3]) {
        let mut tree = WidgetTree::new();
        let props = WidgetProps::new(Rect::new(0.0, 0.0, 10.0, 10.0));
        let a = tree.insert(None, props.clone(), Blank);
        let b = tree.insert(Some(a), props.clone(), Blank);
        let c = tree.insert(Some(b), props, Blank);
        (tree, [a, b, c])
    }

    #[test]
    fn vector_operations() {
        let (tree, [a, b, c]) = three();
        let mut path = WidgetPath::new();
        path.push(tree.weak_ref(a).unwrap());
        path.push(tree.weak_ref(c).unwrap());
        path.insert(1, tree.weak_ref(b).unwrap());
        assert_eq!(path.ids(), vec![a, b, c]);
        assert_eq!(path.first().map(WeakRef::id), Some(a));
        assert_eq!(path.last().map(WeakRef::id), Some(c));
        assert_eq!(path[1].id(), b);

        let reversed: Vec<_> = path.iter().rev().map(WeakRef::id).collect();
        assert_eq!(reversed, vec![c, b, a]);

        let removed = path.remove(0);
        assert_eq!(removed.id(), a);
        assert_eq!(path.len(), 2);
        path.clear();
        assert!(path.is_empty());
    }

    #[test]
    fn equality_is_identity_based() {
        let (tree, [a, b, _]) = three();
        let p1: WidgetPath = [a, b].iter().map(|&id| tree.weak_ref(id).unwrap()).collect();
        let p2: WidgetPath = [a, b].iter().map(|&id| tree.weak_ref(id).unwrap()).collect();
        assert_eq!(p1, p2);
        assert!(p1.contains_widget(b));
        assert_eq!(p1.position_of(b), Some(1));
    }

    #[test]
    fn tolerates_stale_entries() {
        let (mut tree, [a, b, c]) = three();
        let path: WidgetPath = [a, b, c]
            .iter()
            .map(|&id| tree.weak_ref(id).unwrap())
            .collect();
        tree.remove(b);
        // Removing `b` takes its subtree (`c`) with it.
        assert_eq!(path.len(), 3);
        assert_eq!(path.live_ids(), vec![a]);
        assert_eq!(path.leaf(), Some(a));
        assert!(!path.is_fully_valid());

        let mut scrubbed = path.clone();
        scrubbed.retain_valid();
        assert_eq!(scrubbed.ids(), vec![a]);
    }

    #[test]
    fn sub_path_is_inclusive() {
        let (tree, [a, b, c]) = three();
        let path: WidgetPath = [a, b, c]
            .iter()
            .map(|&id| tree.weak_ref(id).unwrap())
            .collect();
        assert_eq!(path.sub_path(1).ids(), vec![a, b]);
        assert_eq!(path.sub_path(10).ids(), vec![a, b, c]);
    }
}
