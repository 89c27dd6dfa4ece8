// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One UI instance: the widget tree, the window stack, and the router.

use kurbo::Rect;
use thicket_widget::{WidgetId, WidgetTree};

use crate::config::RouterConfig;
use crate::input::InputEvent;
use crate::router::EventRouter;
use crate::screen::Screen;
use crate::window::WindowId;

/// Owns everything input routing touches, so hosts pass one value around.
///
/// The tree, the screen and the router are separate fields and the router
/// methods take the other two explicitly; [`parts_mut`](Self::parts_mut) hands
/// out all three at once for hosts that need finer control.
#[derive(Debug, Default)]
pub struct UiContext {
    tree: WidgetTree,
    screen: Screen,
    router: EventRouter,
}

impl UiContext {
    /// An empty UI with the default router configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty UI with an explicit router configuration.
    pub fn with_config(config: RouterConfig) -> Self {
        Self {
            tree: WidgetTree::new(),
            screen: Screen::new(),
            router: EventRouter::with_config(config),
        }
    }

    /// The widget tree.
    pub fn tree(&self) -> &WidgetTree {
        &self.tree
    }

    /// The widget tree, mutably. Call [`layout`](Self::layout) after changing geometry.
    pub fn tree_mut(&mut self) -> &mut WidgetTree {
        &mut self.tree
    }

    /// The window stack.
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// The window stack, mutably.
    pub fn screen_mut(&mut self) -> &mut Screen {
        &mut self.screen
    }

    /// The router.
    pub fn router(&self) -> &EventRouter {
        &self.router
    }

    /// All three parts at once.
    pub fn parts_mut(&mut self) -> (&mut WidgetTree, &mut Screen, &mut EventRouter) {
        (&mut self.tree, &mut self.screen, &mut self.router)
    }

    /// Open a window showing `root`'s subtree.
    pub fn open_window(&mut self, extent: Rect, root: WidgetId) -> WindowId {
        self.screen.open_window(extent, root)
    }

    /// Rebuild every window's locator from the tree.
    pub fn layout(&mut self) {
        self.screen.layout(&self.tree);
    }

    /// Route one input event. Returns whether anything handled it.
    pub fn dispatch(&mut self, event: &InputEvent) -> bool {
        self.router.handle_event(&mut self.tree, &mut self.screen, event)
    }

    /// See [`EventRouter::set_focus`].
    #[track_caller]
    pub fn set_focus(&mut self, id: WidgetId) {
        self.router.set_focus(&mut self.tree, &self.screen, id);
    }

    /// See [`EventRouter::drop_focus`].
    pub fn drop_focus(&mut self) -> bool {
        self.router.drop_focus(&mut self.tree)
    }

    /// See [`EventRouter::set_mouse_capture`].
    pub fn set_mouse_capture(&mut self, id: WidgetId) {
        self.router.set_mouse_capture(&mut self.tree, &self.screen, id);
    }

    /// See [`EventRouter::release_mouse_capture`].
    pub fn release_mouse_capture(&mut self) {
        self.router.release_mouse_capture(&mut self.tree, &self.screen);
    }
}
