// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Self-invalidating weak references to widgets.
//!
//! Every live widget owns a shared liveness cell. A [`WeakRef`] holds the
//! widget's [`WidgetId`] plus a handle to that cell:
//!
//! - creating or cloning a ref registers it with the widget (the widget's
//!   tracked count goes up by one),
//! - dropping a ref unregisters it,
//! - moving a ref transfers the registration; the moved-from binding is gone, so
//!   there is nothing left to unregister twice,
//! - removing the widget from its tree flips the cell once, which invalidates
//!   every outstanding ref without touching any of them.
//!
//! Refs never keep a widget alive and never dereference it on their own; they
//! only answer "is it still there" and "which widget was it".
//!
//! The cell is reference counted with [`Rc`], so refs are neither `Send` nor
//! `Sync`. All widget state lives on the one UI thread.

use alloc::rc::Rc;
use core::cell::Cell;

use crate::tree::WidgetTree;
use crate::types::WidgetId;

/// Shared liveness cell owned by a widget node and observed by its refs.
#[derive(Debug)]
pub(crate) struct Liveness {
    alive: Cell<bool>,
}

impl Liveness {
    pub(crate) fn new() -> Rc<Self> {
        Rc::new(Self {
            alive: Cell::new(true),
        })
    }

    /// Flip the cell. Called once by the owning node when it is removed.
    pub(crate) fn invalidate(&self) {
        debug_assert!(self.alive.get(), "widget liveness invalidated twice");
        self.alive.set(false);
    }

    /// Number of refs registered against this cell, excluding the owner's handle.
    pub(crate) fn tracked(this: &Rc<Self>) -> usize {
        Rc::strong_count(this) - 1
    }
}

/// A non-owning, self-invalidating reference to a widget.
///
/// ```rust
/// use kurbo::Rect;
/// use thicket_widget::{Blank, WidgetProps, WidgetTree};
///
/// let mut tree = WidgetTree::new();
/// let id = tree.insert(None, WidgetProps::new(Rect::new(0.0, 0.0, 10.0, 10.0)), Blank);
///
/// let a = tree.weak_ref(id).unwrap();
/// let b = a.clone();
/// assert_eq!(tree.tracked_ref_count(id), Some(2));
///
/// drop(b);
/// assert_eq!(tree.tracked_ref_count(id), Some(1));
///
/// tree.remove(id);
/// assert!(!a.is_valid());
/// ```
#[derive(Clone)]
pub struct WeakRef {
    id: WidgetId,
    liveness: Rc<Liveness>,
}

impl WeakRef {
    /// Register a new ref against a live widget.
    ///
    /// Returns `None` when `id` is stale.
    pub fn new(tree: &WidgetTree, id: WidgetId) -> Option<Self> {
        tree.weak_ref(id)
    }

    pub(crate) fn from_parts(id: WidgetId, liveness: Rc<Liveness>) -> Self {
        Self { id, liveness }
    }

    /// Whether the referent is still alive.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.liveness.alive.get()
    }

    /// The referent's id.
    ///
    /// # Panics
    ///
    /// Panics if the ref is no longer valid. Check [`WeakRef::is_valid`] first,
    /// or use [`WeakRef::upgrade`].
    #[track_caller]
    pub fn get(&self) -> WidgetId {
        assert!(
            self.is_valid(),
            "WeakRef::get called on an invalidated ref to {}",
            self.id
        );
        self.id
    }

    /// The referent's id if it is still alive.
    #[inline]
    pub fn upgrade(&self) -> Option<WidgetId> {
        self.is_valid().then_some(self.id)
    }

    /// The id this ref was created for, whether or not it is still alive.
    ///
    /// Use this for identity comparisons and logging only.
    #[inline]
    pub fn id(&self) -> WidgetId {
        self.id
    }

    /// Whether this ref names `id` (valid or not).
    #[inline]
    pub fn refers_to(&self, id: WidgetId) -> bool {
        self.id == id
    }
}

impl PartialEq for WeakRef {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for WeakRef {}

impl core::fmt::Debug for WeakRef {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WeakRef")
            .field("id", &self.id)
            .field("valid", &self.is_valid())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Blank, WidgetProps};
    use alloc::vec::Vec;
    use kurbo::Rect;

    fn tree_with_one() -> (WidgetTree, WidgetId) {
        let mut tree = WidgetTree::new();
        let id = tree.insert(
            None,
            WidgetProps::new(Rect::new(0.0, 0.0, 10.0, 10.0)),
            Blank,
        );
        (tree, id)
    }

    #[test]
    fn tracked_count_matches_live_refs() {
        let (tree, id) = tree_with_one();
        assert_eq!(tree.tracked_ref_count(id), Some(0));

        let mut refs: Vec<WeakRef> = (0..5).map(|_| tree.weak_ref(id).unwrap()).collect();
        assert_eq!(tree.tracked_ref_count(id), Some(5));

        refs.truncate(3);
        assert_eq!(tree.tracked_ref_count(id), Some(3));

        refs.clear();
        assert_eq!(tree.tracked_ref_count(id), Some(0));
    }

    #[test]
    fn move_transfers_registration() {
        let (tree, id) = tree_with_one();
        let a = tree.weak_ref(id).unwrap();
        let b = a;
        assert_eq!(tree.tracked_ref_count(id), Some(1));
        assert!(b.is_valid());
    }

    #[test]
    fn removal_invalidates_every_ref() {
        let (mut tree, id) = tree_with_one();
        let a = tree.weak_ref(id).unwrap();
        let b = a.clone();
        let c = WeakRef::new(&tree, id).unwrap();
        tree.remove(id);
        assert!(!a.is_valid());
        assert!(!b.is_valid());
        assert!(!c.is_valid());
        assert_eq!(a.upgrade(), None);
        assert_eq!(a.id(), id);
        assert_eq!(tree.tracked_ref_count(id), None);
    }

    #[test]
    fn clone_of_invalid_ref_stays_invalid() {
        let (mut tree, id) = tree_with_one();
        let a = tree.weak_ref(id).unwrap();
        tree.remove(id);
        let b = a.clone();
        assert!(!b.is_valid());
    }

    #[test]
    fn stale_id_has_no_ref() {
        let (mut tree, id) = tree_with_one();
        tree.remove(id);
        assert!(WeakRef::new(&tree, id).is_none());
    }

    #[test]
    #[should_panic(expected = "invalidated ref")]
    fn get_on_invalid_ref_panics() {
        let (mut tree, id) = tree_with_one();
        let a = tree.weak_ref(id).unwrap();
        tree.remove(id);
        let _ = a.get();
    }
}
