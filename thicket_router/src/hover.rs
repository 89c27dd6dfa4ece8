// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover enter/leave transitions between two widget paths.

use smallvec::SmallVec;
use thicket_widget::{WidgetId, WidgetPath};

/// A hover transition for one widget.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HoverEvent {
    /// The pointer entered this widget.
    Enter(WidgetId),
    /// The pointer left this widget.
    Leave(WidgetId),
}

/// Transitions from hovering `old` to hovering `new`.
///
/// Every widget of `old` missing from `new` leaves, innermost first; then every
/// widget of `new` missing from `old` enters, outermost first. Membership is
/// by widget identity, so two paths naming the same widgets produce nothing.
///
/// ```
/// use kurbo::Rect;
/// use thicket_router::hover::{HoverEvent, transitions};
/// use thicket_widget::{Blank, WidgetProps, WidgetTree};
///
/// let mut tree = WidgetTree::new();
/// let props = WidgetProps::new(Rect::new(0.0, 0.0, 10.0, 10.0));
/// let root = tree.insert(None, props.clone(), Blank);
/// let a = tree.insert(Some(root), props.clone(), Blank);
/// let b = tree.insert(Some(root), props, Blank);
///
/// let events = transitions(&tree.ancestry_path(a), &tree.ancestry_path(b));
/// assert_eq!(events.as_slice(), &[HoverEvent::Leave(a), HoverEvent::Enter(b)]);
/// ```
pub fn transitions(old: &WidgetPath, new: &WidgetPath) -> SmallVec<[HoverEvent; 8]> {
    let mut out = SmallVec::new();
    for r in old.iter().rev() {
        if !new.contains_widget(r.id()) {
            out.push(HoverEvent::Leave(r.id()));
        }
    }
    for r in new {
        if !old.contains_widget(r.id()) {
            out.push(HoverEvent::Enter(r.id()));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Rect;
    use thicket_widget::{Blank, WidgetProps, WidgetTree};

    fn tree() -> (WidgetTree, [WidgetId; 4]) {
        let mut tree = WidgetTree::new();
        let props = WidgetProps::new(Rect::new(0.0, 0.0, 10.0, 10.0));
        let root = tree.insert(None, props.clone(), Blank);
        let a = tree.insert(Some(root), props.clone(), Blank);
        let a1 = tree.insert(Some(a), props.clone(), Blank);
        let b = tree.insert(Some(root), props, Blank);
        (tree, [root, a, a1, b])
    }

    #[test]
    fn enter_from_nothing_is_outer_to_inner() {
        let (tree, [root, a, a1, _]) = tree();
        let events = transitions(&WidgetPath::new(), &tree.ancestry_path(a1));
        assert_eq!(
            events.as_slice(),
            &[
                HoverEvent::Enter(root),
                HoverEvent::Enter(a),
                HoverEvent::Enter(a1)
            ]
        );
    }

    #[test]
    fn leaves_come_before_enters_and_run_inner_to_outer() {
        let (tree, [_, a, a1, b]) = tree();
        let events = transitions(&tree.ancestry_path(a1), &tree.ancestry_path(b));
        assert_eq!(
            events.as_slice(),
            &[
                HoverEvent::Leave(a1),
                HoverEvent::Leave(a),
                HoverEvent::Enter(b)
            ]
        );
    }

    #[test]
    fn same_path_is_idempotent() {
        let (tree, [_, _, a1, _]) = tree();
        let p = tree.ancestry_path(a1);
        assert!(transitions(&p, &p.clone()).is_empty());
    }
}
