// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The widget handler surface and the side-effect requests handlers return.

use kurbo::Rect;

use crate::event::{
    DragEvent, DragPayload, FocusLostReason, KeyEvent, MouseButtonEvent, MouseMoveEvent,
    MouseWheelEvent, TextInputEvent,
};
use crate::tree::WidgetTree;
use crate::types::{WidgetFlags, WidgetId};

/// Side-effect request returned by a widget handler.
///
/// The router applies the request right after the handler returns: capture
/// changes first, then focus changes. `was_handled` stops tunnel and bubble
/// passes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[must_use]
pub struct EventResult {
    /// The handler consumed the event.
    pub was_handled: bool,
    /// Route all pointer input to this widget until released.
    pub set_mouse_capture: Option<WidgetId>,
    /// End the current mouse capture.
    pub release_mouse_capture: bool,
    /// Move keyboard focus to this widget. It must be focusable.
    pub set_focus: Option<WidgetId>,
    /// Drop keyboard focus.
    pub drop_focus: bool,
}

impl EventResult {
    /// Nothing handled, nothing requested.
    pub const UNHANDLED: Self = Self {
        was_handled: false,
        set_mouse_capture: None,
        release_mouse_capture: false,
        set_focus: None,
        drop_focus: false,
    };

    /// The event was consumed.
    pub fn handled() -> Self {
        Self {
            was_handled: true,
            ..Self::UNHANDLED
        }
    }

    /// The event was not consumed.
    pub fn unhandled() -> Self {
        Self::UNHANDLED
    }

    /// Request mouse capture for `id`.
    pub fn with_mouse_capture(mut self, id: WidgetId) -> Self {
        self.set_mouse_capture = Some(id);
        self
    }

    /// Request release of mouse capture.
    pub fn with_mouse_release(mut self) -> Self {
        self.release_mouse_capture = true;
        self
    }

    /// Request keyboard focus for `id`.
    pub fn with_focus(mut self, id: WidgetId) -> Self {
        self.set_focus = Some(id);
        self
    }

    /// Request that keyboard focus be dropped.
    pub fn with_focus_dropped(mut self) -> Self {
        self.drop_focus = true;
        self
    }

    /// Whether applying this result changes capture or focus.
    pub fn has_side_effects(&self) -> bool {
        self.set_mouse_capture.is_some()
            || self.release_mouse_capture
            || self.set_focus.is_some()
            || self.drop_focus
    }
}

/// Context handed to every handler call.
///
/// Gives the handler its own id and mutable access to the tree, so it can
/// restyle, move or remove widgets (itself and its ancestors included) while
/// the event is still being routed. Removal is immediate; the router notices
/// stale entries before it touches them.
pub struct EventCx<'a> {
    tree: &'a mut WidgetTree,
    id: WidgetId,
}

impl core::fmt::Debug for EventCx<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EventCx")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

impl<'a> EventCx<'a> {
    pub(crate) fn new(tree: &'a mut WidgetTree, id: WidgetId) -> Self {
        Self { tree, id }
    }

    /// The widget whose handler is running.
    pub fn id(&self) -> WidgetId {
        self.id
    }

    /// Read access to the whole tree.
    pub fn tree(&self) -> &WidgetTree {
        &*self.tree
    }

    /// Write access to the whole tree.
    pub fn tree_mut(&mut self) -> &mut WidgetTree {
        &mut *self.tree
    }

    /// This widget's extent.
    pub fn extent(&self) -> Rect {
        self.tree.extent(self.id).unwrap_or(Rect::ZERO)
    }

    /// This widget's flags.
    pub fn flags(&self) -> WidgetFlags {
        self.tree.flags(self.id).unwrap_or_else(WidgetFlags::empty)
    }

    /// Remove `id` and its subtree from the tree.
    pub fn remove_widget(&mut self, id: WidgetId) {
        self.tree.remove(id);
    }

    /// Remove this widget and its subtree.
    pub fn remove_self(&mut self) {
        self.tree.remove(self.id);
    }

    /// Whether this widget is still in the tree.
    pub fn is_alive(&self) -> bool {
        self.tree.is_alive(self.id)
    }
}

/// Handler surface of a widget.
///
/// Every method has a default that ignores the event, so a widget implements
/// only what it reacts to. Geometry and capability flags are not part of the
/// trait; they live in the [`WidgetTree`] next to the widget and are written by
/// layout.
#[allow(unused_variables, reason = "Default handlers ignore their arguments.")]
pub trait Widget {
    /// Data carried by a drag started on this widget.
    fn drag_payload(&self) -> Option<DragPayload> {
        None
    }

    /// Tunnel (root to leaf) preview of a mouse press.
    fn on_preview_mouse_down(
        &mut self,
        cx: &mut EventCx<'_>,
        event: &MouseButtonEvent,
    ) -> EventResult {
        EventResult::UNHANDLED
    }

    /// Bubble (leaf to root) mouse press.
    fn on_mouse_down(&mut self, cx: &mut EventCx<'_>, event: &MouseButtonEvent) -> EventResult {
        EventResult::UNHANDLED
    }

    /// Mouse release.
    fn on_mouse_up(&mut self, cx: &mut EventCx<'_>, event: &MouseButtonEvent) -> EventResult {
        EventResult::UNHANDLED
    }

    /// Second (or later) press of a multi-click.
    fn on_mouse_double_click(
        &mut self,
        cx: &mut EventCx<'_>,
        event: &MouseButtonEvent,
    ) -> EventResult {
        EventResult::UNHANDLED
    }

    /// Scroll wheel.
    fn on_mouse_wheel(&mut self, cx: &mut EventCx<'_>, event: &MouseWheelEvent) -> EventResult {
        EventResult::UNHANDLED
    }

    /// Pointer motion over (or captured by) this widget.
    fn on_mouse_move(&mut self, cx: &mut EventCx<'_>, event: &MouseMoveEvent) -> EventResult {
        EventResult::UNHANDLED
    }

    /// The pointer entered this widget.
    fn on_mouse_enter(&mut self, cx: &mut EventCx<'_>, event: &MouseMoveEvent) {}

    /// The pointer left this widget.
    fn on_mouse_leave(&mut self, cx: &mut EventCx<'_>, event: &MouseMoveEvent) {}

    /// A drag started on this widget.
    fn on_drag_start(&mut self, cx: &mut EventCx<'_>, event: &DragEvent) -> EventResult {
        EventResult::UNHANDLED
    }

    /// Pointer motion while a drag is underway.
    fn on_drag_move(&mut self, cx: &mut EventCx<'_>, event: &DragEvent) -> EventResult {
        EventResult::UNHANDLED
    }

    /// A drag entered this widget.
    fn on_drag_enter(&mut self, cx: &mut EventCx<'_>, event: &DragEvent) {}

    /// A drag left this widget.
    fn on_drag_leave(&mut self, cx: &mut EventCx<'_>, event: &DragEvent) {}

    /// The drag was released over this widget.
    fn on_drop(&mut self, cx: &mut EventCx<'_>, event: &DragEvent) -> EventResult {
        EventResult::UNHANDLED
    }

    /// The drag this widget started has ended.
    fn on_drag_end(&mut self, cx: &mut EventCx<'_>, event: &DragEvent) -> EventResult {
        EventResult::UNHANDLED
    }

    /// Tunnel (root to leaf) preview of a key press along the focus path.
    fn on_preview_key_down(&mut self, cx: &mut EventCx<'_>, event: &KeyEvent) -> EventResult {
        EventResult::UNHANDLED
    }

    /// Bubble (leaf to root) key press along the focus path.
    fn on_key_down(&mut self, cx: &mut EventCx<'_>, event: &KeyEvent) -> EventResult {
        EventResult::UNHANDLED
    }

    /// Key release along the focus path.
    fn on_key_up(&mut self, cx: &mut EventCx<'_>, event: &KeyEvent) -> EventResult {
        EventResult::UNHANDLED
    }

    /// Committed text along the focus path.
    fn on_text_input(&mut self, cx: &mut EventCx<'_>, event: &TextInputEvent) -> EventResult {
        EventResult::UNHANDLED
    }

    /// This widget gained keyboard focus.
    fn on_focus_gained(&mut self, cx: &mut EventCx<'_>) -> EventResult {
        EventResult::UNHANDLED
    }

    /// This widget lost keyboard focus.
    fn on_focus_lost(&mut self, cx: &mut EventCx<'_>, reason: FocusLostReason) {}
}

/// A widget with no behaviour of its own, for containers and spacers.
#[derive(Copy, Clone, Debug, Default)]
pub struct Blank;

impl Widget for Blank {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders_set_requests() {
        let id = WidgetId::new(3, 1);
        let r = EventResult::handled().with_mouse_capture(id).with_focus(id);
        assert!(r.was_handled);
        assert_eq!(r.set_mouse_capture, Some(id));
        assert_eq!(r.set_focus, Some(id));
        assert!(r.has_side_effects());
        assert!(!EventResult::unhandled().has_side_effects());
        assert_eq!(EventResult::default(), EventResult::UNHANDLED);
    }
}
