// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Thicket Locator: uniform-grid hit testing for widgets.
//!
//! A [`SpatialLocator`] covers one window's screen region with square cells of
//! a fixed size. Widgets are added back to front with their screen extents;
//! each widget is recorded in every cell its extent touches. A point query
//! looks at a single cell and returns the widgets containing the point as a
//! [`WidgetPath`](thicket_widget::WidgetPath), in insertion (= z) order.
//!
//! - [`SpatialLocator`]: the grid. Add, remove, clear, and query by point, by
//!   widget, or by rectangle.
//! - [`CellRect`]: a rectangle of cells in grid units.
//! - [`LocatorError`]: returned by the `try_` variants.
//!
//! Cell coordinates are anchored at the screen origin: the cell of a
//! coordinate is `floor(v / cell_size)`, and a rectangle covers the cells from
//! `floor(min / cell_size)` up to (excluding) `ceil(max / cell_size)`.
//!
//! The locator holds weak references only. Widgets removed from their tree are
//! skipped by queries and disappear for good at the next layout pass, when the
//! owner clears the locator and adds the surviving widgets again.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod cell;
mod error;
mod locator;

pub use cell::CellRect;
pub use error::LocatorError;
pub use locator::{DEFAULT_CELL_SIZE, SpatialLocator};
