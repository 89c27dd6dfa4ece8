// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Windows: a widget subtree, a screen region, and the locator that hit-tests it.

use kurbo::{Point, Rect};
use thicket_locator::{DEFAULT_CELL_SIZE, SpatialLocator};
use thicket_widget::{WidgetFlags, WidgetId, WidgetPath, WidgetTree};

use crate::logging::targets;

/// Identifier of a window on a [`Screen`](crate::Screen).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(pub(crate) u32);

impl core::fmt::Display for WindowId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "window#{}", self.0)
    }
}

/// A screen region showing the subtree under one root widget.
///
/// The window owns a [`SpatialLocator`] covering its extent. Layout calls
/// [`rebuild_locator`](Self::rebuild_locator) after updating widget extents.
#[derive(Debug)]
pub struct Window {
    id: WindowId,
    extent: Rect,
    root: WidgetId,
    locator: SpatialLocator,
}

impl Window {
    pub(crate) fn new(id: WindowId, extent: Rect, root: WidgetId, cell_size: f64) -> Self {
        Self {
            id,
            extent,
            root,
            locator: SpatialLocator::new(extent, cell_size),
        }
    }

    /// This window's id.
    pub fn id(&self) -> WindowId {
        self.id
    }

    /// Screen region of the window.
    pub fn extent(&self) -> Rect {
        self.extent
    }

    /// Root widget of the window's subtree.
    pub fn root(&self) -> WidgetId {
        self.root
    }

    /// The window's locator.
    pub fn locator(&self) -> &SpatialLocator {
        &self.locator
    }

    /// Move or resize the window. Clears the locator; rebuild it afterwards.
    pub fn set_extent(&mut self, extent: Rect) {
        self.extent = extent;
        self.locator.set_extent(extent);
    }

    /// Change the locator's cell size. Clears the locator; rebuild it afterwards.
    pub fn set_cell_size(&mut self, cell_size: f64) {
        self.locator.set_cell_size(cell_size);
    }

    /// Clear the locator and add every visible widget of the subtree again.
    ///
    /// Widgets are added parent first and children in insertion order, which is
    /// rendering order. An invisible widget hides its whole subtree. Widgets
    /// outside the window are skipped.
    pub fn rebuild_locator(&mut self, tree: &WidgetTree) {
        self.locator.clear();
        let locator = &mut self.locator;
        let window = self.id;
        tree.walk(self.root, |id, props| {
            if !props.flags.contains(WidgetFlags::VISIBLE) {
                return false;
            }
            let Some(widget) = tree.weak_ref(id) else {
                return false;
            };
            if let Err(err) = locator.try_add_widget(&widget, props.extent, props.clip) {
                tracing::trace!(
                    target: targets::LAYOUT,
                    %window,
                    %err,
                    "skipping off-window widget"
                );
            }
            true
        });
        tracing::trace!(
            target: targets::LAYOUT,
            window = %self.id,
            widgets = self.locator.widget_count(),
            "locator rebuilt"
        );
    }

    /// Whether `point` (screen space) lies in this window.
    pub fn contains(&self, point: Point) -> bool {
        self.extent.contains(point)
    }

    /// Widgets under a screen point, back to front. Empty outside the window.
    pub fn path_under_point(&self, point: Point) -> WidgetPath {
        self.locator.try_path_under_point(point).unwrap_or_default()
    }

    /// Path under the centre of `id`, ending at `id`. Empty if `id` is not placed.
    pub fn path_under_widget(&self, id: WidgetId) -> WidgetPath {
        self.locator.path_under_widget(id)
    }

    /// Convert a screen point to window-relative coordinates.
    pub fn to_local(&self, point: Point) -> Point {
        point - self.extent.origin().to_vec2()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use thicket_widget::{Blank, WidgetProps};

    #[test]
    fn rebuild_adds_visible_widgets_in_render_order() {
        let mut tree = WidgetTree::new();
        let root = tree.insert(
            None,
            WidgetProps::new(Rect::new(0.0, 0.0, 400.0, 400.0)),
            Blank,
        );
        let hidden = tree.insert(
            Some(root),
            WidgetProps::new(Rect::new(10.0, 10.0, 100.0, 100.0)).hidden(),
            Blank,
        );
        let under_hidden = tree.insert(
            Some(hidden),
            WidgetProps::new(Rect::new(20.0, 20.0, 50.0, 50.0)),
            Blank,
        );
        let shown = tree.insert(
            Some(root),
            WidgetProps::new(Rect::new(10.0, 10.0, 100.0, 100.0)),
            Blank,
        );
        let outside = tree.insert(
            Some(root),
            WidgetProps::new(Rect::new(900.0, 900.0, 950.0, 950.0)),
            Blank,
        );

        let mut window = Window::new(WindowId(0), Rect::new(0.0, 0.0, 400.0, 400.0), root, 64.0);
        window.rebuild_locator(&tree);

        assert_eq!(
            window.path_under_point(Point::new(30.0, 30.0)).ids(),
            vec![root, shown]
        );
        assert!(!window.locator().contains_widget(hidden));
        assert!(!window.locator().contains_widget(under_hidden));
        assert!(!window.locator().contains_widget(outside));
        assert!(window.path_under_point(Point::new(500.0, 30.0)).is_empty());

        // Removed widgets vanish on the next rebuild.
        tree.remove(shown);
        window.rebuild_locator(&tree);
        assert_eq!(window.locator().widget_count(), 1);
    }

    #[test]
    fn local_coordinates_are_window_relative() {
        let mut tree = WidgetTree::new();
        let extent = Rect::new(100.0, 50.0, 300.0, 250.0);
        let root = tree.insert(None, WidgetProps::new(extent), Blank);
        let window = Window::new(WindowId(1), extent, root, DEFAULT_CELL_SIZE);
        assert_eq!(
            window.to_local(Point::new(110.0, 60.0)),
            Point::new(10.0, 10.0)
        );
    }
}
