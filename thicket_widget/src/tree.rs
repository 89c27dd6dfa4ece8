// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Widget arena: structure, liveness, per-widget props, and handler access.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;

use kurbo::Rect;

use crate::path::WidgetPath;
use crate::types::{WidgetFlags, WidgetId, WidgetProps};
use crate::weak::{Liveness, WeakRef};
use crate::widget::{EventCx, Widget};

/// Generational arena of widgets arranged in a tree.
///
/// Each node stores layout-written [`WidgetProps`], its parent and children in
/// insertion (= rendering) order, and the boxed [`Widget`] behaviour. Removing a
/// node removes its subtree, invalidates every [`WeakRef`] to the removed
/// widgets, and frees their slots for reuse under a higher generation.
///
/// ## Example
///
/// ```rust
/// use kurbo::Rect;
/// use thicket_widget::{Blank, WidgetProps, WidgetTree};
///
/// let mut tree = WidgetTree::new();
/// let root = tree.insert(None, WidgetProps::new(Rect::new(0.0, 0.0, 100.0, 100.0)), Blank);
/// let child = tree.insert(Some(root), WidgetProps::new(Rect::new(10.0, 10.0, 50.0, 50.0)), Blank);
///
/// assert_eq!(tree.parent_of(child), Some(root));
/// assert_eq!(tree.ancestry(child), vec![root, child]);
///
/// tree.remove(root);
/// assert!(!tree.is_alive(child));
/// ```
pub struct WidgetTree {
    /// slots
    nodes: Vec<Option<Node>>,
    /// last generation per slot (persists across frees)
    generations: Vec<u32>,
    free_list: Vec<usize>,
}

struct Node {
    generation: u32,
    parent: Option<WidgetId>,
    children: Vec<WidgetId>,
    props: WidgetProps,
    // `None` while the widget's own handler is running.
    widget: Option<Box<dyn Widget>>,
    liveness: Rc<Liveness>,
}

impl Node {
    fn new(generation: u32, props: WidgetProps, widget: Box<dyn Widget>) -> Self {
        Self {
            generation,
            parent: None,
            children: Vec::new(),
            props,
            widget: Some(widget),
            liveness: Liveness::new(),
        }
    }
}

impl core::fmt::Debug for WidgetTree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        let free = self.free_list.len();
        f.debug_struct("WidgetTree")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &free)
            .finish_non_exhaustive()
    }
}

impl Default for WidgetTree {
    fn default() -> Self {
        Self::new()
    }
}

impl WidgetTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
        }
    }

    /// Insert a widget as the last child of `parent` (or as a root if `None`).
    ///
    /// # Panics
    ///
    /// Panics if `parent` is stale.
    pub fn insert(
        &mut self,
        parent: Option<WidgetId>,
        props: WidgetProps,
        widget: impl Widget + 'static,
    ) -> WidgetId {
        self.insert_boxed(parent, props, Box::new(widget))
    }

    /// Insert an already boxed widget. See [`WidgetTree::insert`].
    pub fn insert_boxed(
        &mut self,
        parent: Option<WidgetId>,
        props: WidgetProps,
        widget: Box<dyn Widget>,
    ) -> WidgetId {
        if let Some(p) = parent {
            assert!(self.is_alive(p), "cannot insert under stale parent {p}");
        }
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, props, widget));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "WidgetId slots are 32-bit."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, props, widget)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "WidgetId slots are 32-bit."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        let id = WidgetId::new(idx, generation);
        if let Some(p) = parent {
            self.link_parent(id, p);
        }
        id
    }

    /// Remove a widget and its subtree.
    ///
    /// Every outstanding [`WeakRef`] to a removed widget becomes invalid. A
    /// stale `id` is ignored.
    pub fn remove(&mut self, id: WidgetId) {
        if !self.is_alive(id) {
            return;
        }
        if let Some(parent) = self.node(id).parent {
            self.unlink_parent(id, parent);
        }
        self.remove_subtree(id);
    }

    fn remove_subtree(&mut self, id: WidgetId) {
        let children = core::mem::take(&mut self.node_mut(id).children);
        for child in children {
            self.remove_subtree(child);
        }
        if let Some(node) = self.nodes[id.idx()].take() {
            node.liveness.invalidate();
            tracing::trace!(widget = %id, "widget removed");
        }
        self.free_list.push(id.idx());
    }

    /// Move `id` to be the last child of `new_parent` (or a root).
    ///
    /// Ignored if either id is stale or if `new_parent` lies inside `id`'s subtree.
    pub fn reparent(&mut self, id: WidgetId, new_parent: Option<WidgetId>) {
        if !self.is_alive(id) {
            return;
        }
        if let Some(p) = new_parent {
            if !self.is_alive(p) || self.is_ancestor_or_self(id, p) {
                return;
            }
        }
        if let Some(parent) = self.node(id).parent {
            self.unlink_parent(id, parent);
        }
        if let Some(p) = new_parent {
            self.link_parent(id, p);
        }
    }

    /// Returns true if `id` refers to a live widget.
    ///
    /// An id is live if its slot is occupied and the slot's generation matches.
    pub fn is_alive(&self, id: WidgetId) -> bool {
        self.nodes
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .map(|n| n.generation == id.1)
            .unwrap_or(false)
    }

    /// Number of live widgets.
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    /// Whether the tree holds no widgets.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Register a new [`WeakRef`] to `id`, or `None` if `id` is stale.
    pub fn weak_ref(&self, id: WidgetId) -> Option<WeakRef> {
        let node = self.node_opt(id)?;
        Some(WeakRef::from_parts(id, Rc::clone(&node.liveness)))
    }

    /// Number of [`WeakRef`]s currently registered against `id`.
    pub fn tracked_ref_count(&self, id: WidgetId) -> Option<usize> {
        self.node_opt(id).map(|n| Liveness::tracked(&n.liveness))
    }

    /// Parent of a widget, or `None` for roots and stale ids.
    pub fn parent_of(&self, id: WidgetId) -> Option<WidgetId> {
        self.node_opt(id).and_then(|n| n.parent)
    }

    /// Children of a widget in rendering order; empty for stale ids.
    pub fn children_of(&self, id: WidgetId) -> &[WidgetId] {
        self.node_opt(id)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    /// Root-to-`id` chain of ids, or empty if `id` is stale.
    pub fn ancestry(&self, id: WidgetId) -> Vec<WidgetId> {
        let mut out = Vec::new();
        if !self.is_alive(id) {
            return out;
        }
        let mut cur = id;
        // Collect to root; links are acyclic because reparent refuses cycles.
        loop {
            out.push(cur);
            match self.parent_of(cur) {
                Some(p) => cur = p,
                None => break,
            }
        }
        out.reverse();
        out
    }

    /// Root-to-`id` chain as a [`WidgetPath`], or empty if `id` is stale.
    pub fn ancestry_path(&self, id: WidgetId) -> WidgetPath {
        self.ancestry(id)
            .into_iter()
            .filter_map(|a| self.weak_ref(a))
            .collect()
    }

    /// Whether `ancestor` is `id` or one of its ancestors.
    pub fn is_ancestor_or_self(&self, ancestor: WidgetId, id: WidgetId) -> bool {
        let mut cur = Some(id);
        while let Some(c) = cur {
            if c == ancestor {
                return true;
            }
            cur = self.parent_of(c);
        }
        false
    }

    /// Props of a live widget.
    pub fn props(&self, id: WidgetId) -> Option<&WidgetProps> {
        self.node_opt(id).map(|n| &n.props)
    }

    /// Replace the props of a live widget. Stale ids are ignored.
    pub fn set_props(&mut self, id: WidgetId, props: WidgetProps) {
        if let Some(n) = self.node_opt_mut(id) {
            n.props = props;
        }
    }

    /// Screen extent of a live widget.
    pub fn extent(&self, id: WidgetId) -> Option<Rect> {
        self.props(id).map(|p| p.extent)
    }

    /// Set the screen extent of a live widget.
    pub fn set_extent(&mut self, id: WidgetId, extent: Rect) {
        if let Some(n) = self.node_opt_mut(id) {
            n.props.extent = extent;
        }
    }

    /// Clip of a live widget.
    pub fn clip(&self, id: WidgetId) -> Option<Rect> {
        self.props(id).and_then(|p| p.clip)
    }

    /// Set or clear the clip of a live widget.
    pub fn set_clip(&mut self, id: WidgetId, clip: Option<Rect>) {
        if let Some(n) = self.node_opt_mut(id) {
            n.props.clip = clip;
        }
    }

    /// Flags of a live widget.
    pub fn flags(&self, id: WidgetId) -> Option<WidgetFlags> {
        self.props(id).map(|p| p.flags)
    }

    /// Replace the flags of a live widget.
    pub fn set_flags(&mut self, id: WidgetId, flags: WidgetFlags) {
        if let Some(n) = self.node_opt_mut(id) {
            n.props.flags = flags;
        }
    }

    /// Whether a live widget is visible. Stale ids are not.
    pub fn is_visible(&self, id: WidgetId) -> bool {
        self.has_flag(id, WidgetFlags::VISIBLE)
    }

    /// Whether a live widget can take focus. Stale ids cannot.
    pub fn is_focusable(&self, id: WidgetId) -> bool {
        self.has_flag(id, WidgetFlags::FOCUSABLE)
    }

    /// Whether a live widget can start a drag. Stale ids cannot.
    pub fn is_drag_droppable(&self, id: WidgetId) -> bool {
        self.has_flag(id, WidgetFlags::DRAG_DROPPABLE)
    }

    fn has_flag(&self, id: WidgetId, flag: WidgetFlags) -> bool {
        self.flags(id).is_some_and(|f| f.contains(flag))
    }

    /// Borrow a widget's behaviour.
    ///
    /// Returns `None` for stale ids and while the widget's own handler runs.
    pub fn widget(&self, id: WidgetId) -> Option<&dyn Widget> {
        self.node_opt(id).and_then(|n| n.widget.as_deref())
    }

    /// Run `f` against a widget's behaviour with an [`EventCx`] for that widget.
    ///
    /// The behaviour is taken out of the arena for the duration of the call, so
    /// `f` may mutate the tree freely, including removing the widget itself. If
    /// the widget is gone when `f` returns, its behaviour is dropped instead of
    /// put back.
    ///
    /// Returns `None` if `id` is stale or its behaviour is already checked out
    /// (a handler re-entering itself).
    pub fn with_widget<R>(
        &mut self,
        id: WidgetId,
        f: impl FnOnce(&mut dyn Widget, &mut EventCx<'_>) -> R,
    ) -> Option<R> {
        let mut widget = self.node_opt_mut(id)?.widget.take()?;
        let out = {
            let mut cx = EventCx::new(self, id);
            f(widget.as_mut(), &mut cx)
        };
        match self.node_opt_mut(id) {
            Some(node) => node.widget = Some(widget),
            None => {
                tracing::trace!(widget = %id, "widget removed during its own handler");
            }
        }
        Some(out)
    }

    /// Depth-first, parent-before-children walk of `root`'s subtree.
    ///
    /// `visit` returns whether to descend into the visited widget's children.
    pub fn walk(&self, root: WidgetId, mut visit: impl FnMut(WidgetId, &WidgetProps) -> bool) {
        fn go(
            tree: &WidgetTree,
            id: WidgetId,
            visit: &mut impl FnMut(WidgetId, &WidgetProps) -> bool,
        ) {
            let Some(node) = tree.node_opt(id) else {
                return;
            };
            if visit(id, &node.props) {
                for &child in &node.children {
                    go(tree, child, visit);
                }
            }
        }
        go(self, root, &mut visit);
    }

    // --- internals ---

    fn node_opt(&self, id: WidgetId) -> Option<&Node> {
        self.nodes
            .get(id.idx())
            .and_then(|n| n.as_ref())
            .filter(|n| n.generation == id.1)
    }

    fn node_opt_mut(&mut self, id: WidgetId) -> Option<&mut Node> {
        self.nodes
            .get_mut(id.idx())
            .and_then(|n| n.as_mut())
            .filter(|n| n.generation == id.1)
    }

    fn node(&self, id: WidgetId) -> &Node {
        self.node_opt(id).expect("dangling WidgetId")
    }

    fn node_mut(&mut self, id: WidgetId) -> &mut Node {
        self.node_opt_mut(id).expect("dangling WidgetId")
    }

    fn link_parent(&mut self, id: WidgetId, parent: WidgetId) {
        self.node_mut(parent).children.push(id);
        self.node_mut(id).parent = Some(parent);
    }

    fn unlink_parent(&mut self, id: WidgetId, parent: WidgetId) {
        if let Some(p) = self.node_opt_mut(parent) {
            p.children.retain(|&c| c != id);
        }
        self.node_mut(id).parent = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{MouseButton, MouseButtonEvent};
    use crate::widget::{Blank, EventResult};
    use alloc::vec;
    use core::cell::Cell;
    use kurbo::Point;

    fn props() -> WidgetProps {
        WidgetProps::new(Rect::new(0.0, 0.0, 10.0, 10.0))
    }

    #[test]
    fn liveness_insert_remove_reuse() {
        let mut tree = WidgetTree::new();
        let root = tree.insert(None, props(), Blank);
        let a = tree.insert(Some(root), props(), Blank);

        assert!(tree.is_alive(root));
        assert!(tree.is_alive(a));

        tree.remove(a);
        assert!(!tree.is_alive(a));
        assert!(tree.children_of(root).is_empty());

        // Might reuse the slot, but the generation bumps.
        let b = tree.insert(Some(root), props(), Blank);
        assert!(tree.is_alive(b));
        assert!(!tree.is_alive(a));
        if a.0 == b.0 {
            assert!(b.1 > a.1, "generation must increase on reuse");
        }
    }

    #[test]
    fn remove_takes_subtree() {
        let mut tree = WidgetTree::new();
        let root = tree.insert(None, props(), Blank);
        let mid = tree.insert(Some(root), props(), Blank);
        let leaf = tree.insert(Some(mid), props(), Blank);
        let leaf_ref = tree.weak_ref(leaf).unwrap();

        tree.remove(mid);
        assert!(tree.is_alive(root));
        assert!(!tree.is_alive(mid));
        assert!(!tree.is_alive(leaf));
        assert!(!leaf_ref.is_valid());
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn ancestry_and_reparent() {
        let mut tree = WidgetTree::new();
        let root = tree.insert(None, props(), Blank);
        let a = tree.insert(Some(root), props(), Blank);
        let b = tree.insert(Some(root), props(), Blank);
        let c = tree.insert(Some(a), props(), Blank);
        assert_eq!(tree.ancestry(c), vec![root, a, c]);

        tree.reparent(c, Some(b));
        assert_eq!(tree.ancestry(c), vec![root, b, c]);
        assert_eq!(tree.ancestry_path(c).ids(), vec![root, b, c]);
        assert!(tree.children_of(a).is_empty());

        // Refuses to create a cycle.
        tree.reparent(root, Some(c));
        assert_eq!(tree.parent_of(root), None);
    }

    #[test]
    fn walk_visits_parent_before_children_and_prunes() {
        let mut tree = WidgetTree::new();
        let root = tree.insert(None, props(), Blank);
        let a = tree.insert(Some(root), props().hidden(), Blank);
        let _a_child = tree.insert(Some(a), props(), Blank);
        let b = tree.insert(Some(root), props(), Blank);

        let mut seen = Vec::new();
        tree.walk(root, |id, p| {
            seen.push(id);
            p.flags.contains(WidgetFlags::VISIBLE)
        });
        assert_eq!(seen, vec![root, a, b]);
    }

    #[test]
    fn flag_queries_respect_liveness() {
        let mut tree = WidgetTree::new();
        let w = tree.insert(None, props().focusable().drag_droppable(), Blank);
        assert!(tree.is_visible(w));
        assert!(tree.is_focusable(w));
        assert!(tree.is_drag_droppable(w));
        tree.remove(w);
        assert!(!tree.is_visible(w));
        assert!(!tree.is_focusable(w));
        assert_eq!(tree.extent(w), None);
    }

    struct SelfRemoving {
        dropped: Rc<Cell<bool>>,
    }

    impl Drop for SelfRemoving {
        fn drop(&mut self) {
            self.dropped.set(true);
        }
    }

    impl Widget for SelfRemoving {
        fn on_mouse_down(&mut self, cx: &mut EventCx<'_>, _: &MouseButtonEvent) -> EventResult {
            cx.remove_self();
            EventResult::handled()
        }
    }

    #[test]
    fn handler_may_remove_itself() {
        let mut tree = WidgetTree::new();
        let dropped = Rc::new(Cell::new(false));
        let w = tree.insert(
            None,
            props(),
            SelfRemoving {
                dropped: Rc::clone(&dropped),
            },
        );
        let ev = MouseButtonEvent::new(MouseButton::Left, Point::new(1.0, 1.0));
        let out = tree.with_widget(w, |widget, cx| widget.on_mouse_down(cx, &ev));
        assert_eq!(out.map(|r| r.was_handled), Some(true));
        assert!(!tree.is_alive(w));
        assert!(dropped.get());
        assert!(tree.with_widget(w, |_, _| ()).is_none());
    }

    #[test]
    fn behaviour_is_restored_after_handler() {
        let mut tree = WidgetTree::new();
        let w = tree.insert(None, props(), Blank);
        assert!(tree.with_widget(w, |_, cx| cx.id()).is_some());
        assert!(tree.widget(w).is_some());
    }
}
