// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Uniform grid of widget buckets.

use alloc::vec::Vec;
use core::fmt::Debug;

use hashbrown::{HashMap, HashSet};
use kurbo::{Point, Rect};
use smallvec::SmallVec;
use thicket_widget::{WeakRef, WidgetId, WidgetPath};

use crate::cell::{CellRect, floor_coord};
use crate::error::LocatorError;

/// Cell edge length used when none is given, in device pixels.
pub const DEFAULT_CELL_SIZE: f64 = 128.0;

/// Answers "which widgets contain this point, in z-order" by bucketing
/// widgets into fixed-size square cells.
///
/// Widgets are added back to front (the order they are rendered in). A point
/// query scans only the bucket of the cell containing the point, and returns
/// every live widget whose recorded extent contains the point, in insertion
/// order. The locator holds [`WeakRef`]s, so widgets removed from their tree
/// after being added are skipped without any bookkeeping here.
///
/// The locator does not move widgets in place. Each layout pass calls
/// [`clear`](Self::clear) and adds every widget again so insertion order keeps
/// matching rendering order.
///
/// ## Example
///
/// ```rust
/// use kurbo::{Point, Rect};
/// use thicket_locator::SpatialLocator;
/// use thicket_widget::{Blank, WidgetProps, WidgetTree};
///
/// let mut tree = WidgetTree::new();
/// let panel = Rect::new(0.0, 0.0, 300.0, 200.0);
/// let button = Rect::new(20.0, 20.0, 120.0, 60.0);
/// let p = tree.insert(None, WidgetProps::new(panel), Blank);
/// let b = tree.insert(Some(p), WidgetProps::new(button), Blank);
///
/// let mut locator = SpatialLocator::new(Rect::new(0.0, 0.0, 800.0, 600.0), 64.0);
/// locator.add_widget(&tree.weak_ref(p).unwrap(), panel, None);
/// locator.add_widget(&tree.weak_ref(b).unwrap(), button, None);
///
/// assert_eq!(locator.path_under_point(Point::new(30.0, 30.0)).ids(), vec![p, b]);
/// assert_eq!(locator.path_under_point(Point::new(200.0, 150.0)).ids(), vec![p]);
/// ```
pub struct SpatialLocator {
    cell_size: f64,
    extent: Rect,
    // Cells backing `cells`, anchored at the screen origin.
    grid: CellRect,
    cells: Vec<Bucket>,
    placements: HashMap<WidgetId, Placement>,
}

#[derive(Clone, Debug)]
struct Placement {
    // Hit-testable extent (clip applied).
    extent: Rect,
    cells: CellRect,
}

#[derive(Clone, Debug)]
struct Entry {
    widget: WeakRef,
    extent: Rect,
}

#[derive(Clone, Debug, Default)]
struct Bucket {
    entries: SmallVec<[Entry; 4]>,
}

impl Debug for SpatialLocator {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let occupied = self.cells.iter().filter(|c| !c.entries.is_empty()).count();
        f.debug_struct("SpatialLocator")
            .field("cell_size", &self.cell_size)
            .field("extent", &self.extent)
            .field("grid", &self.grid)
            .field("widgets", &self.placements.len())
            .field("occupied_cells", &occupied)
            .finish_non_exhaustive()
    }
}

impl SpatialLocator {
    /// Create a locator covering `extent` with square cells of `cell_size` pixels.
    ///
    /// # Panics
    ///
    /// Panics if `cell_size` is not strictly positive.
    pub fn new(extent: Rect, cell_size: f64) -> Self {
        assert!(cell_size > 0.0, "cell_size must be strictly positive");
        let mut locator = Self {
            cell_size,
            extent: Rect::ZERO,
            grid: CellRect::default(),
            cells: Vec::new(),
            placements: HashMap::new(),
        };
        locator.set_extent(extent);
        locator
    }

    /// Create a locator covering `extent` with [`DEFAULT_CELL_SIZE`] cells.
    pub fn with_extent(extent: Rect) -> Self {
        Self::new(extent, DEFAULT_CELL_SIZE)
    }

    /// Screen region covered by the locator.
    pub fn extent(&self) -> Rect {
        self.extent
    }

    /// Cell edge length in pixels.
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Cells backing the grid, in grid units.
    pub fn grid(&self) -> CellRect {
        self.grid
    }

    /// Grid dimensions as `(columns, rows)`.
    pub fn grid_size(&self) -> (u32, u32) {
        (self.grid.width, self.grid.height)
    }

    /// Number of widgets currently placed.
    pub fn widget_count(&self) -> usize {
        self.placements.len()
    }

    /// Cover a new screen region. Recomputes the grid and drops every placement.
    pub fn set_extent(&mut self, extent: Rect) {
        self.extent = extent.abs();
        self.rebuild_grid();
    }

    /// Change the cell size. Drops every placement; callers add widgets again.
    ///
    /// # Panics
    ///
    /// Panics if `cell_size` is not strictly positive.
    pub fn set_cell_size(&mut self, cell_size: f64) {
        assert!(cell_size > 0.0, "cell_size must be strictly positive");
        self.cell_size = cell_size;
        self.rebuild_grid();
    }

    fn rebuild_grid(&mut self) {
        self.grid = CellRect::covering(self.extent, self.cell_size);
        self.placements.clear();
        self.cells.clear();
        self.cells.resize_with(self.grid.cell_count(), Bucket::default);
    }

    /// Drop every placement. The grid keeps its dimensions.
    pub fn clear(&mut self) {
        self.placements.clear();
        for bucket in &mut self.cells {
            bucket.entries.clear();
        }
    }

    /// Place a widget in front of every widget added so far.
    ///
    /// `extent` is the widget's screen extent. A `clip` narrows the part of the
    /// widget that can be hit; a zero-size clip is ignored. Adding a widget that
    /// is already placed moves it to the front at its new extent.
    ///
    /// # Panics
    ///
    /// Panics if the (clipped) extent lies entirely outside the locator's
    /// extent. Use [`try_add_widget`](Self::try_add_widget) when that can
    /// legitimately happen.
    #[track_caller]
    pub fn add_widget(&mut self, widget: &WeakRef, extent: Rect, clip: Option<Rect>) {
        if let Err(err) = self.try_add_widget(widget, extent, clip) {
            panic!("{err}");
        }
    }

    /// Fallible [`add_widget`](Self::add_widget).
    ///
    /// A stale `widget` is ignored. A widget whose clip hides it entirely is
    /// not placed (it cannot be hit) and is not an error.
    pub fn try_add_widget(
        &mut self,
        widget: &WeakRef,
        extent: Rect,
        clip: Option<Rect>,
    ) -> Result<(), LocatorError> {
        let id = widget.id();
        if !widget.is_valid() {
            tracing::trace!(widget = %id, "skipping stale widget");
            return Ok(());
        }

        let extent = extent.abs();
        let hit_extent = match clip {
            Some(clip) if clip.is_zero_area() => {
                tracing::debug!(widget = %id, ?clip, "zero-size clip disables clipping");
                extent
            }
            Some(clip) => {
                let clipped = extent.intersect(clip.abs());
                if clipped.is_zero_area() && !extent.is_zero_area() {
                    tracing::trace!(widget = %id, ?extent, ?clip, "widget clipped away");
                    self.remove_widget(id);
                    return Ok(());
                }
                clipped
            }
            None => extent,
        };

        if !touches(self.extent, hit_extent) {
            return Err(LocatorError::OutsideExtent {
                widget: id,
                extent: hit_extent,
                locator: self.extent,
            });
        }

        // Re-adding scrubs the earlier placement first.
        self.remove_widget(id);

        let Some(cells) = CellRect::covering(hit_extent, self.cell_size).intersect(&self.grid)
        else {
            unreachable!("an extent touching the locator covers at least one grid cell");
        };
        for (cx, cy) in cells.cells() {
            let idx = self.bucket_index(cx, cy);
            self.cells[idx].entries.push(Entry {
                widget: widget.clone(),
                extent: hit_extent,
            });
        }
        self.placements.insert(
            id,
            Placement {
                extent: hit_extent,
                cells,
            },
        );
        Ok(())
    }

    /// Remove a widget from every cell it occupies. Untracked ids are ignored.
    pub fn remove_widget(&mut self, id: WidgetId) {
        let Some(placement) = self.placements.remove(&id) else {
            return;
        };
        for (cx, cy) in placement.cells.cells() {
            let idx = self.bucket_index(cx, cy);
            let bucket = &mut self.cells[idx];
            let pos = bucket
                .entries
                .iter()
                .position(|e| e.widget.refers_to(id))
                .expect("locator invariant violated: widget not found in expected cell");
            // Order-preserving: bucket order is z-order.
            bucket.entries.remove(pos);
        }
    }

    /// Whether `id` is placed.
    pub fn contains_widget(&self, id: WidgetId) -> bool {
        self.placements.contains_key(&id)
    }

    /// Cells occupied by `id`, if placed.
    pub fn cell_rect_of(&self, id: WidgetId) -> Option<CellRect> {
        self.placements.get(&id).map(|p| p.cells)
    }

    /// Hit-testable extent recorded for `id`, if placed.
    pub fn extent_of(&self, id: WidgetId) -> Option<Rect> {
        self.placements.get(&id).map(|p| p.extent)
    }

    /// Every live widget containing `point`, back to front.
    ///
    /// # Panics
    ///
    /// Panics if `point` is outside the locator's extent.
    #[track_caller]
    pub fn path_under_point(&self, point: Point) -> WidgetPath {
        assert!(
            self.extent.contains(point),
            "point {point:?} is outside the locator extent {:?}",
            self.extent
        );
        self.collect_under_point(point)
    }

    /// Like [`path_under_point`](Self::path_under_point), but `None` when the
    /// point is outside the locator's extent.
    pub fn try_path_under_point(&self, point: Point) -> Option<WidgetPath> {
        self.extent
            .contains(point)
            .then(|| self.collect_under_point(point))
    }

    fn collect_under_point(&self, point: Point) -> WidgetPath {
        let cx = floor_coord(point.x, self.cell_size);
        let cy = floor_coord(point.y, self.cell_size);
        let mut path = WidgetPath::new();
        if !self.grid.contains_cell(cx, cy) {
            return path;
        }
        for entry in &self.cells[self.bucket_index(cx, cy)].entries {
            if !entry.widget.is_valid() {
                tracing::trace!(widget = %entry.widget.id(), "skipping stale widget");
                continue;
            }
            if entry.extent.contains(point) {
                path.push(entry.widget.clone());
            }
        }
        path
    }

    /// The path under the centre of `id`'s recorded extent, ending at `id`.
    ///
    /// Empty if `id` is not placed or is no longer alive.
    pub fn path_under_widget(&self, id: WidgetId) -> WidgetPath {
        let Some(placement) = self.placements.get(&id) else {
            return WidgetPath::new();
        };
        let inside = placement.extent.intersect(self.extent).center();
        let Some(mut path) = self.try_path_under_point(inside) else {
            return WidgetPath::new();
        };
        match path.position_of(id) {
            Some(pos) if path[pos].is_valid() => {
                path.truncate(pos + 1);
                path
            }
            _ => WidgetPath::new(),
        }
    }

    /// Every live widget whose recorded extent overlaps `rect`, each once, in
    /// the order first encountered.
    pub fn widgets_in_rect(&self, rect: Rect) -> Vec<WidgetId> {
        let mut out = Vec::new();
        let Some(cells) = CellRect::covering(rect.abs(), self.cell_size).intersect(&self.grid)
        else {
            return out;
        };
        let mut seen: HashSet<WidgetId> = HashSet::new();
        for (cx, cy) in cells.cells() {
            for entry in &self.cells[self.bucket_index(cx, cy)].entries {
                let Some(id) = entry.widget.upgrade() else {
                    continue;
                };
                if !seen.insert(id) {
                    continue;
                }
                if touches(rect, entry.extent) {
                    out.push(id);
                }
            }
        }
        out
    }

    /// Ids stored in the bucket of cell `(cx, cy)`, stale ones included.
    pub fn widgets_in_cell(&self, cx: i32, cy: i32) -> Vec<WidgetId> {
        if !self.grid.contains_cell(cx, cy) {
            return Vec::new();
        }
        self.cells[self.bucket_index(cx, cy)]
            .entries
            .iter()
            .map(|e| e.widget.id())
            .collect()
    }

    fn bucket_index(&self, cx: i32, cy: i32) -> usize {
        debug_assert!(
            self.grid.contains_cell(cx, cy),
            "cell ({cx}, {cy}) is outside the grid {:?}",
            self.grid
        );
        let col = cx.abs_diff(self.grid.x) as usize;
        let row = cy.abs_diff(self.grid.y) as usize;
        row * self.grid.width as usize + col
    }
}

/// Whether `rect` shares area with `region` (half-open), treating a zero-size
/// `rect` as the point at its origin.
fn touches(region: Rect, rect: Rect) -> bool {
    if rect.is_zero_area() {
        return region.contains(rect.origin());
    }
    rect.x0 < region.x1 && rect.x1 > region.x0 && rect.y0 < region.y1 && rect.y1 > region.y0
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use thicket_widget::{Blank, WidgetProps, WidgetTree};

    fn rect(x: f64, y: f64, w: f64, h: f64) -> Rect {
        Rect::new(x, y, x + w, y + h)
    }

    fn add(tree: &mut WidgetTree, extent: Rect) -> (WidgetId, WeakRef) {
        let id = tree.insert(None, WidgetProps::new(extent), Blank);
        (id, tree.weak_ref(id).unwrap())
    }

    #[test]
    fn cell_span_uses_floor_and_ceil() {
        let mut tree = WidgetTree::new();
        let extent = rect(200.0, 200.0, 400.0, 400.0);
        let (w, r) = add(&mut tree, extent);
        let mut locator = SpatialLocator::new(extent, 128.0);
        locator.add_widget(&r, extent, None);
        assert_eq!(locator.cell_rect_of(w), Some(CellRect::new(1, 1, 4, 4)));
        assert_eq!(locator.grid_size(), (4, 4));
    }

    #[test]
    fn insertion_order_is_z_order() {
        let mut tree = WidgetTree::new();
        let (a, ra) = add(&mut tree, rect(0.0, 0.0, 100.0, 100.0));
        let (b, rb) = add(&mut tree, rect(50.0, 50.0, 100.0, 100.0));
        let mut locator = SpatialLocator::new(rect(0.0, 0.0, 512.0, 512.0), 128.0);
        locator.add_widget(&ra, rect(0.0, 0.0, 100.0, 100.0), None);
        locator.add_widget(&rb, rect(50.0, 50.0, 100.0, 100.0), None);

        let p = Point::new(75.0, 75.0);
        assert_eq!(locator.path_under_point(p).ids(), vec![a, b]);
        // Only `a` contains this point, though both share the cell.
        assert_eq!(
            locator.path_under_point(Point::new(10.0, 10.0)).ids(),
            vec![a]
        );
    }

    #[test]
    fn removal_clears_every_cell() {
        let mut tree = WidgetTree::new();
        let extent = rect(100.0, 100.0, 300.0, 300.0);
        let (w, r) = add(&mut tree, extent);
        let mut locator = SpatialLocator::new(rect(0.0, 0.0, 512.0, 512.0), 64.0);
        locator.add_widget(&r, extent, None);
        let cells = locator.cell_rect_of(w).unwrap();
        assert!(cells.cell_count() > 1);

        locator.remove_widget(w);
        assert!(!locator.contains_widget(w));
        for (cx, cy) in cells.cells() {
            assert!(locator.widgets_in_cell(cx, cy).is_empty());
        }
        for &(x, y) in &[(100.0, 100.0), (250.0, 250.0), (399.0, 399.0)] {
            assert!(locator.path_under_point(Point::new(x, y)).is_empty());
        }
        // Removing again is a no-op.
        locator.remove_widget(w);
    }

    #[test]
    fn readding_moves_to_front() {
        let mut tree = WidgetTree::new();
        let e = rect(0.0, 0.0, 50.0, 50.0);
        let (a, ra) = add(&mut tree, e);
        let (b, rb) = add(&mut tree, e);
        let mut locator = SpatialLocator::with_extent(rect(0.0, 0.0, 256.0, 256.0));
        locator.add_widget(&ra, e, None);
        locator.add_widget(&rb, e, None);
        locator.add_widget(&ra, e, None);
        assert_eq!(
            locator.path_under_point(Point::new(10.0, 10.0)).ids(),
            vec![b, a]
        );
        assert_eq!(locator.widget_count(), 2);
    }

    #[test]
    fn stale_widgets_are_skipped() {
        let mut tree = WidgetTree::new();
        let e = rect(0.0, 0.0, 50.0, 50.0);
        let (a, ra) = add(&mut tree, e);
        let (b, rb) = add(&mut tree, e);
        let mut locator = SpatialLocator::with_extent(rect(0.0, 0.0, 256.0, 256.0));
        locator.add_widget(&ra, e, None);
        locator.add_widget(&rb, e, None);
        tree.remove(a);
        assert_eq!(
            locator.path_under_point(Point::new(10.0, 10.0)).ids(),
            vec![b]
        );
        assert!(locator.path_under_widget(a).is_empty());
        // The stale entry is still bookkept until the next rebuild.
        assert_eq!(locator.widgets_in_cell(0, 0), vec![a, b]);
    }

    #[test]
    fn clip_narrows_hits_and_zero_clip_is_ignored() {
        let mut tree = WidgetTree::new();
        let e = rect(0.0, 0.0, 100.0, 100.0);
        let (a, ra) = add(&mut tree, e);
        let (b, rb) = add(&mut tree, e);
        let mut locator = SpatialLocator::new(rect(0.0, 0.0, 256.0, 256.0), 32.0);
        locator.add_widget(&ra, e, Some(rect(0.0, 0.0, 50.0, 50.0)));
        locator.add_widget(&rb, e, Some(Rect::ZERO));

        assert_eq!(
            locator.path_under_point(Point::new(10.0, 10.0)).ids(),
            vec![a, b]
        );
        assert_eq!(
            locator.path_under_point(Point::new(75.0, 75.0)).ids(),
            vec![b]
        );
        assert_eq!(locator.cell_rect_of(a), Some(CellRect::new(0, 0, 2, 2)));
        assert_eq!(locator.cell_rect_of(b), Some(CellRect::new(0, 0, 4, 4)));
    }

    #[test]
    fn clipped_away_widget_is_not_placed() {
        let mut tree = WidgetTree::new();
        let e = rect(0.0, 0.0, 100.0, 100.0);
        let (a, ra) = add(&mut tree, e);
        let mut locator = SpatialLocator::with_extent(rect(0.0, 0.0, 256.0, 256.0));
        locator
            .try_add_widget(&ra, e, Some(rect(150.0, 150.0, 10.0, 10.0)))
            .unwrap();
        assert!(!locator.contains_widget(a));
    }

    #[test]
    fn outside_extent_is_an_error() {
        let mut tree = WidgetTree::new();
        let e = rect(600.0, 600.0, 10.0, 10.0);
        let (a, ra) = add(&mut tree, e);
        let mut locator = SpatialLocator::with_extent(rect(0.0, 0.0, 256.0, 256.0));
        let err = locator.try_add_widget(&ra, e, None).unwrap_err();
        assert_eq!(
            err,
            LocatorError::OutsideExtent {
                widget: a,
                extent: e,
                locator: locator.extent(),
            }
        );
        assert!(!locator.contains_widget(a));
    }

    #[test]
    #[should_panic(expected = "outside the locator extent")]
    fn adding_outside_extent_panics() {
        let mut tree = WidgetTree::new();
        let e = rect(600.0, 600.0, 10.0, 10.0);
        let (_, ra) = add(&mut tree, e);
        let mut locator = SpatialLocator::with_extent(rect(0.0, 0.0, 256.0, 256.0));
        locator.add_widget(&ra, e, None);
    }

    #[test]
    #[should_panic(expected = "outside the locator extent")]
    fn querying_outside_extent_panics() {
        let locator = SpatialLocator::with_extent(rect(0.0, 0.0, 256.0, 256.0));
        let _ = locator.path_under_point(Point::new(300.0, 10.0));
    }

    #[test]
    fn try_query_outside_extent_is_none() {
        let locator = SpatialLocator::with_extent(rect(0.0, 0.0, 256.0, 256.0));
        let outside = Point::new(-1.0, 10.0);
        assert!(locator.try_path_under_point(outside).is_none());
        let empty_spot = Point::new(1.0, 10.0);
        assert!(locator.try_path_under_point(empty_spot).unwrap().is_empty());
    }

    #[test]
    fn path_under_widget_is_truncated_at_the_widget() {
        let mut tree = WidgetTree::new();
        let outer = rect(0.0, 0.0, 200.0, 200.0);
        let inner = rect(50.0, 50.0, 100.0, 100.0);
        let top = rect(80.0, 80.0, 40.0, 40.0);
        let (o, ro) = add(&mut tree, outer);
        let (i, ri) = add(&mut tree, inner);
        let (t, rt) = add(&mut tree, top);
        let mut locator = SpatialLocator::with_extent(rect(0.0, 0.0, 256.0, 256.0));
        locator.add_widget(&ro, outer, None);
        locator.add_widget(&ri, inner, None);
        locator.add_widget(&rt, top, None);

        assert_eq!(locator.path_under_widget(i).ids(), vec![o, i]);
        assert_eq!(locator.path_under_widget(t).ids(), vec![o, i, t]);
    }

    #[test]
    fn rect_query_deduplicates_across_cells() {
        let mut tree = WidgetTree::new();
        let big = rect(0.0, 0.0, 200.0, 200.0);
        let small = rect(300.0, 300.0, 10.0, 10.0);
        let (a, ra) = add(&mut tree, big);
        let (b, rb) = add(&mut tree, small);
        let mut locator = SpatialLocator::new(rect(0.0, 0.0, 512.0, 512.0), 32.0);
        locator.add_widget(&ra, big, None);
        locator.add_widget(&rb, small, None);

        assert_eq!(
            locator.widgets_in_rect(rect(0.0, 0.0, 512.0, 512.0)),
            vec![a, b]
        );
        assert_eq!(
            locator.widgets_in_rect(rect(150.0, 150.0, 20.0, 20.0)),
            vec![a]
        );
        let gap = rect(250.0, 0.0, 20.0, 20.0);
        assert!(locator.widgets_in_rect(gap).is_empty());
    }

    #[test]
    fn clear_keeps_grid_and_set_cell_size_regrids() {
        let mut tree = WidgetTree::new();
        let e = rect(0.0, 0.0, 50.0, 50.0);
        let (a, ra) = add(&mut tree, e);
        let mut locator = SpatialLocator::new(rect(0.0, 0.0, 256.0, 256.0), 64.0);
        locator.add_widget(&ra, e, None);
        locator.clear();
        assert!(!locator.contains_widget(a));
        assert_eq!(locator.grid_size(), (4, 4));

        locator.add_widget(&ra, e, None);
        locator.set_cell_size(128.0);
        assert!(!locator.contains_widget(a));
        assert_eq!(locator.grid_size(), (2, 2));

        locator.set_extent(rect(0.0, 0.0, 1024.0, 256.0));
        assert_eq!(locator.grid_size(), (8, 2));
    }
}
