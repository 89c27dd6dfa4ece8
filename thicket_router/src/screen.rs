// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The window stack.

use alloc::boxed::Box;
use alloc::vec::Vec;

use kurbo::{Point, Rect};
use thicket_locator::DEFAULT_CELL_SIZE;
use thicket_widget::{KeyEvent, WidgetId, WidgetPath, WidgetTree};

use crate::window::{Window, WindowId};

type KeyHook = Box<dyn FnMut(&KeyEvent) -> bool>;

/// All open windows, back to front, plus the last-resort key handler.
#[derive(Default)]
pub struct Screen {
    windows: Vec<Window>,
    next_id: u32,
    unhandled_key: Option<KeyHook>,
}

impl core::fmt::Debug for Screen {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Screen")
            .field("windows", &self.windows)
            .field("has_unhandled_key_hook", &self.unhandled_key.is_some())
            .finish_non_exhaustive()
    }
}

impl Screen {
    /// An empty screen.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a window showing `root`'s subtree in front of every other window.
    pub fn open_window(&mut self, extent: Rect, root: WidgetId) -> WindowId {
        self.open_window_with_cell_size(extent, root, DEFAULT_CELL_SIZE)
    }

    /// Open a window whose locator uses `cell_size` cells.
    pub fn open_window_with_cell_size(
        &mut self,
        extent: Rect,
        root: WidgetId,
        cell_size: f64,
    ) -> WindowId {
        let id = WindowId(self.next_id);
        self.next_id += 1;
        self.windows.push(Window::new(id, extent, root, cell_size));
        id
    }

    /// Close a window, returning it.
    pub fn close_window(&mut self, id: WindowId) -> Option<Window> {
        let pos = self.windows.iter().position(|w| w.id() == id)?;
        Some(self.windows.remove(pos))
    }

    /// Move a window in front of all others.
    pub fn raise_window(&mut self, id: WindowId) {
        if let Some(pos) = self.windows.iter().position(|w| w.id() == id) {
            let w = self.windows.remove(pos);
            self.windows.push(w);
        }
    }

    /// A window by id.
    pub fn window(&self, id: WindowId) -> Option<&Window> {
        self.windows.iter().find(|w| w.id() == id)
    }

    /// A window by id, mutably.
    pub fn window_mut(&mut self, id: WindowId) -> Option<&mut Window> {
        self.windows.iter_mut().find(|w| w.id() == id)
    }

    /// Windows back to front.
    pub fn windows(&self) -> impl DoubleEndedIterator<Item = &Window> + '_ {
        self.windows.iter()
    }

    /// Rebuild every window's locator from the tree.
    pub fn layout(&mut self, tree: &WidgetTree) {
        for window in &mut self.windows {
            window.rebuild_locator(tree);
        }
    }

    /// The front-most window containing a screen point.
    pub fn window_under_point(&self, point: Point) -> Option<&Window> {
        self.windows.iter().rev().find(|w| w.contains(point))
    }

    /// The front-most window whose subtree contains `id`.
    pub fn window_of_widget(&self, tree: &WidgetTree, id: WidgetId) -> Option<&Window> {
        self.windows
            .iter()
            .rev()
            .find(|w| tree.is_ancestor_or_self(w.root(), id))
    }

    /// Widgets under a screen point in the window there, back to front.
    pub fn path_under_point(&self, point: Point) -> WidgetPath {
        self.window_under_point(point)
            .map(|w| w.path_under_point(point))
            .unwrap_or_default()
    }

    /// A path ending at `id`.
    ///
    /// Uses the owning window's locator when it knows the widget, and falls
    /// back to the widget's tree ancestry otherwise (hidden or off-window
    /// widgets, or before the first layout).
    pub fn path_under_widget(&self, tree: &WidgetTree, id: WidgetId) -> WidgetPath {
        if let Some(window) = self.window_of_widget(tree, id) {
            let path = window.path_under_widget(id);
            if !path.is_empty() {
                return path;
            }
        }
        tree.ancestry_path(id)
    }

    /// Install the handler for key presses nothing else handled.
    pub fn set_unhandled_key_handler(&mut self, hook: impl FnMut(&KeyEvent) -> bool + 'static) {
        self.unhandled_key = Some(Box::new(hook));
    }

    /// Offer an unhandled key press to the screen. Returns whether it was handled.
    pub fn offer_unhandled_key(&mut self, event: &KeyEvent) -> bool {
        self.unhandled_key.as_mut().is_some_and(|hook| hook(event))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use thicket_widget::{Blank, Key, WidgetProps};

    #[test]
    fn front_most_window_wins() {
        let mut tree = WidgetTree::new();
        let back_root = tree.insert(
            None,
            WidgetProps::new(Rect::new(0.0, 0.0, 300.0, 300.0)),
            Blank,
        );
        let front_root = tree.insert(
            None,
            WidgetProps::new(Rect::new(100.0, 100.0, 200.0, 200.0)),
            Blank,
        );
        let mut screen = Screen::new();
        let back = screen.open_window(Rect::new(0.0, 0.0, 300.0, 300.0), back_root);
        let front = screen.open_window(Rect::new(100.0, 100.0, 200.0, 200.0), front_root);
        screen.layout(&tree);

        let p = Point::new(150.0, 150.0);
        assert_eq!(screen.window_under_point(p).map(Window::id), Some(front));
        assert_eq!(screen.path_under_point(p).ids(), vec![front_root]);

        screen.raise_window(back);
        assert_eq!(screen.window_under_point(p).map(Window::id), Some(back));
        assert!(screen.window_under_point(Point::new(500.0, 5.0)).is_none());

        assert!(screen.close_window(front).is_some());
        assert!(screen.window(front).is_none());
    }

    #[test]
    fn path_under_widget_falls_back_to_ancestry() {
        let mut tree = WidgetTree::new();
        let root = tree.insert(
            None,
            WidgetProps::new(Rect::new(0.0, 0.0, 300.0, 300.0)),
            Blank,
        );
        let hidden = tree.insert(
            Some(root),
            WidgetProps::new(Rect::new(10.0, 10.0, 50.0, 50.0)).hidden(),
            Blank,
        );
        let mut screen = Screen::new();
        let _ = screen.open_window(Rect::new(0.0, 0.0, 300.0, 300.0), root);
        screen.layout(&tree);
        assert_eq!(
            screen.path_under_widget(&tree, hidden).ids(),
            vec![root, hidden]
        );
        assert_eq!(screen.path_under_widget(&tree, root).ids(), vec![root]);
    }

    #[test]
    fn cell_size_is_chosen_at_open_and_changed_in_place() {
        let mut tree = WidgetTree::new();
        let extent = Rect::new(0.0, 0.0, 256.0, 256.0);
        let root = tree.insert(None, WidgetProps::new(extent), Blank);
        let mut screen = Screen::new();
        let id = screen.open_window_with_cell_size(extent, root, 32.0);
        screen.layout(&tree);
        let window = screen.window(id).unwrap();
        assert_eq!(window.locator().cell_size(), 32.0);
        assert_eq!(window.locator().widget_count(), 1);

        let window = screen.window_mut(id).unwrap();
        window.set_cell_size(64.0);
        assert_eq!(window.locator().cell_size(), 64.0);
        assert_eq!(window.locator().widget_count(), 0);

        screen.layout(&tree);
        let p = Point::new(200.0, 200.0);
        assert_eq!(screen.path_under_point(p).ids(), vec![root]);
    }

    #[test]
    fn unhandled_key_hook() {
        let mut screen = Screen::new();
        assert!(!screen.offer_unhandled_key(&KeyEvent::new(Key::Tab)));
        screen.set_unhandled_key_handler(|e| e.key == Key::Tab);
        assert!(screen.offer_unhandled_key(&KeyEvent::new(Key::Tab)));
        assert!(!screen.offer_unhandled_key(&KeyEvent::new(Key::Enter)));
    }
}
