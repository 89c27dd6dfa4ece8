// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Router implementation.
//!
//! ## Overview
//!
//! Turns each [`InputEvent`] into handler calls along a [`WidgetPath`]:
//!
//! - Pointer input follows the path under the cursor, or the captor while the
//!   mouse is captured.
//! - Keyboard and text input follow the focus path.
//! - Preview handlers tunnel root to leaf; regular handlers bubble leaf to root.
//!   Either pass stops at the first handler reporting the event handled.
//!
//! ## Side effects
//!
//! Every handler returns an [`EventResult`]. The router applies it right after
//! that handler returns, before the next handler runs: capture changes first,
//! then focus changes.
//!
//! ## Reentrancy
//!
//! Handlers may remove widgets through their [`EventCx`]. The router walks
//! private copies of its paths and re-checks liveness before every call, so a
//! removed widget is skipped and never called.

use kurbo::{Point, Vec2};
use thicket_widget::{
    DragEvent, DragPayload, EventCx, EventResult, FocusLostReason, Key, KeyEvent, MouseButton,
    MouseButtonEvent, MouseMoveEvent, MouseWheelEvent, TextInputEvent, WeakRef, Widget, WidgetId,
    WidgetPath, WidgetTree,
};

use crate::config::RouterConfig;
use crate::dispatcher::{self, Outcome, Phase};
use crate::hover::{self, HoverEvent};
use crate::input::InputEvent;
use crate::logging::targets;
use crate::screen::Screen;

enum DragState {
    Idle,
    Armed {
        source: WeakRef,
        origin: Point,
    },
    Dragging {
        source: WeakRef,
        payload: Option<DragPayload>,
    },
}

impl core::fmt::Debug for DragState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Idle => f.write_str("Idle"),
            Self::Armed { source, origin } => f
                .debug_struct("Armed")
                .field("source", source)
                .field("origin", origin)
                .finish(),
            Self::Dragging { source, payload } => f
                .debug_struct("Dragging")
                .field("source", source)
                .field("has_payload", &payload.is_some())
                .finish(),
        }
    }
}

/// Focus, capture, hover, and drag state plus the dispatch algorithms over it.
///
/// The router owns no widgets. Every entry point takes the [`WidgetTree`] and
/// the [`Screen`] explicitly; [`UiContext`](crate::UiContext) bundles the three.
///
/// ## Usage
///
/// - Feed platform input to [`handle_event`](Self::handle_event).
/// - Drive focus and capture from the host with [`set_focus`](Self::set_focus),
///   [`drop_focus`](Self::drop_focus), [`set_mouse_capture`](Self::set_mouse_capture),
///   and [`release_mouse_capture`](Self::release_mouse_capture). Handlers do
///   the same by returning an [`EventResult`].
pub struct EventRouter {
    config: RouterConfig,
    hovered: WidgetPath,
    // Empty or exactly the captor.
    capture: WidgetPath,
    // Ends at the focused widget.
    focus: WidgetPath,
    drag: DragState,
    last_mouse_position: Option<Point>,
    // A handler changed focus during the current mouse-down.
    focus_was_set: bool,
    // The widget whose on_focus_gained is running.
    in_focus_gained: Option<WidgetId>,
    text_input_active: bool,
}

impl core::fmt::Debug for EventRouter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EventRouter")
            .field("config", &self.config)
            .field("hovered", &self.hovered)
            .field("capture", &self.capture)
            .field("focus", &self.focus)
            .field("drag", &self.drag)
            .field("last_mouse_position", &self.last_mouse_position)
            .field("text_input_active", &self.text_input_active)
            .finish_non_exhaustive()
    }
}

impl Default for EventRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl EventRouter {
    /// Create a router with the default configuration.
    pub fn new() -> Self {
        Self::with_config(RouterConfig::default())
    }

    /// Create a router with an explicit configuration.
    pub fn with_config(config: RouterConfig) -> Self {
        Self {
            config,
            hovered: WidgetPath::new(),
            capture: WidgetPath::new(),
            focus: WidgetPath::new(),
            drag: DragState::Idle,
            last_mouse_position: None,
            focus_was_set: false,
            in_focus_gained: None,
            text_input_active: false,
        }
    }

    /// Current configuration.
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Replace the configuration.
    pub fn set_config(&mut self, config: RouterConfig) {
        self.config = config;
    }

    /// The focused widget, if it is still alive.
    pub fn focused_widget(&self) -> Option<WidgetId> {
        self.focus.last().and_then(WeakRef::upgrade)
    }

    /// Path keyboard input is routed along, ending at the focused widget.
    pub fn focus_path(&self) -> &WidgetPath {
        &self.focus
    }

    /// The widget holding mouse capture, if it is still alive.
    pub fn captured_widget(&self) -> Option<WidgetId> {
        self.capture.last().and_then(WeakRef::upgrade)
    }

    /// Widgets currently under the pointer (or the captor), root first.
    pub fn hovered_path(&self) -> &WidgetPath {
        &self.hovered
    }

    /// Whether a drag is underway.
    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    /// Source of the armed or running drag.
    pub fn drag_source(&self) -> Option<WidgetId> {
        match &self.drag {
            DragState::Idle => None,
            DragState::Armed { source, .. } | DragState::Dragging { source, .. } => {
                source.upgrade()
            }
        }
    }

    /// Whether text input events are being generated for a focused widget.
    pub fn is_text_input_active(&self) -> bool {
        self.text_input_active && self.focused_widget().is_some()
    }

    /// Last pointer position seen, in screen coordinates.
    pub fn last_mouse_position(&self) -> Option<Point> {
        self.last_mouse_position
    }

    /// Route one input event. Returns whether anything handled it.
    ///
    /// An unhandled Escape counts as handled only when it drops focus; with
    /// nothing focused it falls through to the screen's unhandled-key hook.
    pub fn handle_event(
        &mut self,
        tree: &mut WidgetTree,
        screen: &mut Screen,
        event: &InputEvent,
    ) -> bool {
        match event {
            InputEvent::MouseDown(e) if e.clicks >= 2 => self.route_double_click(tree, screen, e),
            InputEvent::MouseDown(e) => self.route_mouse_down(tree, screen, e),
            InputEvent::MouseUp(e) => self.route_mouse_up(tree, screen, e),
            InputEvent::MouseMove(e) => self.route_mouse_move(tree, screen, e),
            InputEvent::MouseWheel(e) => self.route_mouse_wheel(tree, screen, e),
            InputEvent::KeyDown(e) => self.route_key_down(tree, screen, e),
            InputEvent::KeyUp(e) => self.route_key_up(tree, screen, e),
            InputEvent::TextInput(e) => self.route_text_input(tree, screen, e),
        }
    }

    // --- focus ---

    /// Move keyboard focus to `id`.
    ///
    /// The previous focus holder gets `on_focus_lost(Replaced)`, then `id`
    /// gets `on_focus_gained`. Focusing the focused widget does nothing. A
    /// stale `id` is ignored.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not focusable.
    #[track_caller]
    pub fn set_focus(&mut self, tree: &mut WidgetTree, screen: &Screen, id: WidgetId) {
        if !tree.is_alive(id) {
            tracing::trace!(
                target: targets::FOCUS,
                widget = %id,
                "ignoring focus request for stale widget"
            );
            return;
        }
        let path = screen.path_under_widget(tree, id);
        self.focus_path_to(tree, screen, path);
    }

    /// Drop keyboard focus. Returns whether a live widget lost it.
    pub fn drop_focus(&mut self, tree: &mut WidgetTree) -> bool {
        self.drop_focus_with(tree, FocusLostReason::Requested)
    }

    #[track_caller]
    fn focus_path_to(&mut self, tree: &mut WidgetTree, screen: &Screen, path: WidgetPath) {
        let Some(id) = path.last().and_then(WeakRef::upgrade) else {
            return;
        };
        assert!(
            tree.is_focusable(id),
            "widget {id} requested focus but is not focusable"
        );
        if self.focused_widget() == Some(id) {
            return;
        }
        self.drop_focus_with(tree, FocusLostReason::Replaced);

        tracing::debug!(target: targets::FOCUS, widget = %id, "focus gained");
        self.focus = path;
        self.text_input_active = true;
        let outer = self.in_focus_gained.replace(id);
        let _ = self.call(tree, screen, id, |w, cx| w.on_focus_gained(cx));
        self.in_focus_gained = outer;
    }

    fn drop_focus_with(&mut self, tree: &mut WidgetTree, reason: FocusLostReason) -> bool {
        if self.focus.is_empty() {
            return false;
        }
        let previous = self.focused_widget();
        self.focus.clear();
        self.text_input_active = false;
        let Some(id) = previous else {
            tracing::trace!(target: targets::FOCUS, "cleared focus of a removed widget");
            return false;
        };
        tracing::debug!(target: targets::FOCUS, widget = %id, ?reason, "focus lost");
        tree.with_widget(id, |w, cx| w.on_focus_lost(cx, reason));
        true
    }

    /// After a click: focus the nearest focusable widget on `path`, leaf first.
    fn focus_from_click(&mut self, tree: &mut WidgetTree, screen: &Screen, path: &WidgetPath) {
        let found = (0..path.len())
            .rev()
            .find(|&i| path[i].upgrade().is_some_and(|id| tree.is_focusable(id)));
        match found {
            Some(i) => {
                let mut sub = path.sub_path(i);
                sub.retain_valid();
                self.focus_path_to(tree, screen, sub);
            }
            None => {
                self.drop_focus_with(tree, FocusLostReason::Click);
            }
        }
    }

    // --- capture ---

    /// Route all pointer input to `id` until released.
    ///
    /// The hover path becomes the captor alone, with enter/leave transitions
    /// fired as if the pointer had jumped. A stale `id` is ignored.
    pub fn set_mouse_capture(&mut self, tree: &mut WidgetTree, screen: &Screen, id: WidgetId) {
        let Some(captor) = tree.weak_ref(id) else {
            tracing::trace!(
                target: targets::CAPTURE,
                widget = %id,
                "ignoring capture request for stale widget"
            );
            return;
        };
        if self.captured_widget() == Some(id) {
            return;
        }
        tracing::debug!(target: targets::CAPTURE, widget = %id, "mouse captured");
        self.capture = WidgetPath::single(captor);
        self.refresh_hover(tree, screen);
    }

    /// End mouse capture and hover whatever is under the pointer again.
    pub fn release_mouse_capture(&mut self, tree: &mut WidgetTree, screen: &Screen) {
        if self.capture.is_empty() {
            return;
        }
        tracing::debug!(
            target: targets::CAPTURE,
            widget = %self.capture[0].id(),
            "mouse capture released"
        );
        self.capture.clear();
        self.refresh_hover(tree, screen);
    }

    fn release_stale_capture(&mut self, tree: &mut WidgetTree, screen: &Screen) {
        if !self.capture.is_empty() && self.captured_widget().is_none() {
            tracing::debug!(
                target: targets::CAPTURE,
                widget = %self.capture[0].id(),
                "captor removed; releasing capture"
            );
            self.capture.clear();
            self.refresh_hover(tree, screen);
        }
    }

    // --- handler calls ---

    /// Call one handler and apply its result.
    fn call(
        &mut self,
        tree: &mut WidgetTree,
        screen: &Screen,
        id: WidgetId,
        handler: impl FnOnce(&mut dyn Widget, &mut EventCx<'_>) -> EventResult,
    ) -> EventResult {
        let Some(result) = tree.with_widget(id, handler) else {
            return EventResult::UNHANDLED;
        };
        self.process_event_result(tree, screen, id, &result);
        result
    }

    /// Walk `path` in `phase` order calling `handler` until one handles the event.
    fn walk(
        &mut self,
        tree: &mut WidgetTree,
        screen: &Screen,
        path: &WidgetPath,
        phase: Phase,
        mut handler: impl FnMut(&mut dyn Widget, &mut EventCx<'_>) -> EventResult,
    ) -> Option<usize> {
        dispatcher::run(path, phase, |id| {
            let result = self.call(tree, screen, id, &mut handler);
            Outcome::from_result(&result)
        })
    }

    #[track_caller]
    fn process_event_result(
        &mut self,
        tree: &mut WidgetTree,
        screen: &Screen,
        source: WidgetId,
        result: &EventResult,
    ) {
        if result.release_mouse_capture {
            self.release_mouse_capture(tree, screen);
        }
        if let Some(target) = result.set_mouse_capture {
            self.set_mouse_capture(tree, screen, target);
        }

        if let Some(target) = result.set_focus {
            assert!(
                !(target == source && self.in_focus_gained == Some(source)),
                "widget {source} requested focus on itself from its own on_focus_gained"
            );
            self.focus_was_set = true;
            self.set_focus(tree, screen, target);
        } else if result.drop_focus {
            self.focus_was_set = true;
            self.drop_focus_with(tree, FocusLostReason::Requested);
        }
    }

    // --- hover ---

    /// Capture path while captured, otherwise the widgets under `pos`.
    fn active_path(&self, screen: &Screen, pos: Point) -> WidgetPath {
        if self.capture.is_empty() {
            screen.path_under_point(pos)
        } else {
            self.capture.clone()
        }
    }

    /// Window-relative position of a screen point.
    fn local_position(&self, tree: &WidgetTree, screen: &Screen, pos: Point) -> Point {
        let window = match self.captured_widget() {
            Some(captor) => screen.window_of_widget(tree, captor),
            None => screen.window_under_point(pos),
        };
        window.map_or(pos, |w| w.to_local(pos))
    }

    fn drag_event(&self, position: Point, screen_position: Point) -> Option<DragEvent> {
        match &self.drag {
            DragState::Dragging { source, payload } => Some(DragEvent {
                source: source.id(),
                position,
                screen_position,
                payload: payload.clone(),
            }),
            DragState::Idle | DragState::Armed { .. } => None,
        }
    }

    /// Recompute hover at the last pointer position.
    fn refresh_hover(&mut self, tree: &mut WidgetTree, screen: &Screen) {
        let (path, pos) = match self.last_mouse_position {
            Some(pos) => (self.active_path(screen, pos), pos),
            None => (self.capture.clone(), Point::ZERO),
        };
        self.update_hover(tree, screen, path, pos);
    }

    /// Make `path` the hover path, firing leaves then enters.
    fn update_hover(
        &mut self,
        tree: &mut WidgetTree,
        screen: &Screen,
        path: WidgetPath,
        pos: Point,
    ) {
        let events = hover::transitions(&self.hovered, &path);
        self.hovered = path;
        if events.is_empty() {
            return;
        }
        let local = self.local_position(tree, screen, pos);
        let drag = self.drag_event(local, pos);
        let motion = MouseMoveEvent {
            position: local,
            screen_position: pos,
            delta: Vec2::ZERO,
        };
        for event in events {
            tracing::trace!(
                target: targets::HOVER,
                ?event,
                dragging = drag.is_some(),
                "hover transition"
            );
            match (event, &drag) {
                (HoverEvent::Leave(id), Some(d)) => {
                    tree.with_widget(id, |w, cx| w.on_drag_leave(cx, d));
                }
                (HoverEvent::Enter(id), Some(d)) => {
                    tree.with_widget(id, |w, cx| w.on_drag_enter(cx, d));
                }
                (HoverEvent::Leave(id), None) => {
                    tree.with_widget(id, |w, cx| w.on_mouse_leave(cx, &motion));
                }
                (HoverEvent::Enter(id), None) => {
                    tree.with_widget(id, |w, cx| w.on_mouse_enter(cx, &motion));
                }
            }
        }
    }

    // --- drag ---

    fn arm_drag(&mut self, tree: &WidgetTree, path: &WidgetPath, origin: Point) {
        if self.is_dragging() {
            return;
        }
        let source = path
            .iter()
            .rev()
            .find(|r| r.upgrade().is_some_and(|id| tree.is_drag_droppable(id)));
        self.drag = match source {
            Some(source) => {
                tracing::debug!(
                    target: targets::DRAG,
                    widget = %source.id(),
                    ?origin,
                    "drag armed"
                );
                DragState::Armed {
                    source: source.clone(),
                    origin,
                }
            }
            None => DragState::Idle,
        };
    }

    fn maybe_start_drag(&mut self, tree: &mut WidgetTree, screen: &Screen, pos: Point) {
        let DragState::Armed { source, origin } = &self.drag else {
            return;
        };
        if (pos - *origin).hypot2() <= self.config.drag_trigger_distance_squared() {
            return;
        }
        let source = source.clone();
        let Some(id) = source.upgrade() else {
            tracing::trace!(
                target: targets::DRAG,
                widget = %source.id(),
                "armed drag source removed"
            );
            self.drag = DragState::Idle;
            return;
        };

        tracing::debug!(target: targets::DRAG, widget = %id, "drag started");
        let payload = tree.widget(id).and_then(|w| w.drag_payload());
        let local = self.local_position(tree, screen, pos);
        let start = DragEvent {
            source: id,
            position: local,
            screen_position: pos,
            payload: payload.clone(),
        };
        let _ = self.call(tree, screen, id, |w, cx| w.on_drag_start(cx, &start));

        // Normal hover is suspended while dragging.
        let motion = MouseMoveEvent {
            position: local,
            screen_position: pos,
            delta: Vec2::ZERO,
        };
        let hovered = core::mem::take(&mut self.hovered);
        for r in hovered.iter().rev() {
            if let Some(h) = r.upgrade() {
                tree.with_widget(h, |w, cx| w.on_mouse_leave(cx, &motion));
            }
        }
        self.drag = DragState::Dragging { source, payload };
    }

    /// Deliver the drop and end the drag. Drag state must already be cleared.
    fn finish_drag(
        &mut self,
        tree: &mut WidgetTree,
        screen: &Screen,
        source: &WeakRef,
        payload: Option<DragPayload>,
        pos: Point,
    ) {
        let event = DragEvent {
            source: source.id(),
            position: self.local_position(tree, screen, pos),
            screen_position: pos,
            payload,
        };
        let target = screen.path_under_point(pos);
        let dropped_on = self.walk(tree, screen, &target, Phase::Bubble, |w, cx| {
            w.on_drop(cx, &event)
        });
        tracing::debug!(
            target: targets::DRAG,
            source = %source.id(),
            drop_target = ?dropped_on.map(|i| target[i].id()),
            "dropped"
        );
        if let Some(id) = source.upgrade() {
            let _ = self.call(tree, screen, id, |w, cx| w.on_drag_end(cx, &event));
        }

        let hovered = core::mem::take(&mut self.hovered);
        for r in hovered.iter().rev() {
            if let Some(h) = r.upgrade() {
                tree.with_widget(h, |w, cx| w.on_drag_leave(cx, &event));
            }
        }
        self.refresh_hover(tree, screen);
    }

    // --- routing ---

    fn route_mouse_down(
        &mut self,
        tree: &mut WidgetTree,
        screen: &Screen,
        event: &MouseButtonEvent,
    ) -> bool {
        let pos = event.screen_position;
        self.last_mouse_position = Some(pos);
        let Some(window) = screen.window_under_point(pos) else {
            tracing::trace!(target: targets::DISPATCH, ?pos, "mouse down outside every window");
            self.drop_focus_with(tree, FocusLostReason::Click);
            return false;
        };
        let path = window.path_under_point(pos);
        let mut event = event.clone();
        event.position = window.to_local(pos);

        self.focus_was_set = false;
        let mut handled_at = self.walk(tree, screen, &path, Phase::Tunnel, |w, cx| {
            w.on_preview_mouse_down(cx, &event)
        });
        if handled_at.is_none() {
            handled_at = self.walk(tree, screen, &path, Phase::Bubble, |w, cx| {
                w.on_mouse_down(cx, &event)
            });
        }
        let truncated = match handled_at {
            Some(i) => path.sub_path(i),
            None => path,
        };

        if !self.focus_was_set {
            self.focus_from_click(tree, screen, &truncated);
        }
        if event.button == MouseButton::Left {
            self.arm_drag(tree, &truncated, pos);
        }
        handled_at.is_some()
    }

    fn route_double_click(
        &mut self,
        tree: &mut WidgetTree,
        screen: &Screen,
        event: &MouseButtonEvent,
    ) -> bool {
        let pos = event.screen_position;
        self.last_mouse_position = Some(pos);
        let Some(window) = screen.window_under_point(pos) else {
            return false;
        };
        let path = window.path_under_point(pos);
        let mut event = event.clone();
        event.position = window.to_local(pos);
        self.walk(tree, screen, &path, Phase::Bubble, |w, cx| {
            w.on_mouse_double_click(cx, &event)
        })
        .is_some()
    }

    fn route_mouse_up(
        &mut self,
        tree: &mut WidgetTree,
        screen: &Screen,
        event: &MouseButtonEvent,
    ) -> bool {
        let pos = event.screen_position;
        self.last_mouse_position = Some(pos);
        self.release_stale_capture(tree, screen);

        let mut handled = false;
        let mut dropped = false;
        match core::mem::replace(&mut self.drag, DragState::Idle) {
            DragState::Dragging { source, payload } => {
                self.finish_drag(tree, screen, &source, payload, pos);
                dropped = true;
                handled = true;
            }
            DragState::Armed { source, .. } => {
                tracing::trace!(target: targets::DRAG, widget = %source.id(), "drag disarmed");
            }
            DragState::Idle => {}
        }

        let mut event = event.clone();
        event.position = self.local_position(tree, screen, pos);
        if let Some(captor) = self.captured_widget() {
            handled |= self
                .call(tree, screen, captor, |w, cx| w.on_mouse_up(cx, &event))
                .was_handled;
        } else if !dropped {
            let path = screen.path_under_point(pos);
            handled |= self
                .walk(tree, screen, &path, Phase::Bubble, |w, cx| {
                    w.on_mouse_up(cx, &event)
                })
                .is_some();
        }
        handled
    }

    fn route_mouse_move(
        &mut self,
        tree: &mut WidgetTree,
        screen: &Screen,
        event: &MouseMoveEvent,
    ) -> bool {
        let pos = event.screen_position;
        self.last_mouse_position = Some(pos);
        self.release_stale_capture(tree, screen);
        self.maybe_start_drag(tree, screen, pos);

        let path = self.active_path(screen, pos);
        self.update_hover(tree, screen, path.clone(), pos);

        let local = self.local_position(tree, screen, pos);
        if let Some(drag) = self.drag_event(local, pos) {
            self.walk(tree, screen, &path, Phase::Bubble, |w, cx| {
                w.on_drag_move(cx, &drag)
            })
            .is_some()
        } else {
            let mut event = event.clone();
            event.position = local;
            self.walk(tree, screen, &path, Phase::Bubble, |w, cx| {
                w.on_mouse_move(cx, &event)
            })
            .is_some()
        }
    }

    fn route_mouse_wheel(
        &mut self,
        tree: &mut WidgetTree,
        screen: &Screen,
        event: &MouseWheelEvent,
    ) -> bool {
        let pos = event.screen_position;
        self.last_mouse_position = Some(pos);
        self.release_stale_capture(tree, screen);

        let mut event = event.clone();
        event.position = self.local_position(tree, screen, pos);
        if event.natural && self.config.natural_scrolling {
            event.delta = -event.delta;
            event.natural = false;
        }

        if let Some(captor) = self.captured_widget() {
            self.call(tree, screen, captor, |w, cx| w.on_mouse_wheel(cx, &event))
                .was_handled
        } else {
            let path = self.hovered.clone();
            self.walk(tree, screen, &path, Phase::Bubble, |w, cx| {
                w.on_mouse_wheel(cx, &event)
            })
            .is_some()
        }
    }

    fn route_key_down(
        &mut self,
        tree: &mut WidgetTree,
        screen: &mut Screen,
        event: &KeyEvent,
    ) -> bool {
        let mut handled = false;
        if self.focused_widget().is_some() {
            let path = self.focus.clone();
            handled = self
                .walk(tree, screen, &path, Phase::Tunnel, |w, cx| {
                    w.on_preview_key_down(cx, event)
                })
                .is_some()
                || self
                    .walk(tree, screen, &path, Phase::Bubble, |w, cx| {
                        w.on_key_down(cx, event)
                    })
                    .is_some();
        }
        if !handled && event.key == Key::Escape {
            handled = self.drop_focus_with(tree, FocusLostReason::Escape);
        }
        if !handled {
            handled = screen.offer_unhandled_key(event);
        }
        handled
    }

    fn route_key_up(&mut self, tree: &mut WidgetTree, screen: &Screen, event: &KeyEvent) -> bool {
        if self.focused_widget().is_none() {
            return false;
        }
        let path = self.focus.clone();
        self.walk(tree, screen, &path, Phase::Bubble, |w, cx| {
            w.on_key_up(cx, event)
        })
        .is_some()
    }

    fn route_text_input(
        &mut self,
        tree: &mut WidgetTree,
        screen: &Screen,
        event: &TextInputEvent,
    ) -> bool {
        if !self.text_input_active || self.focused_widget().is_none() {
            return false;
        }
        let path = self.focus.clone();
        self.walk(tree, screen, &path, Phase::Bubble, |w, cx| {
            w.on_text_input(cx, event)
        })
        .is_some()
    }
}
