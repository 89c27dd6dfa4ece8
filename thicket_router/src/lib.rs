// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Thicket Router: input routing over a widget tree.
//!
//! ## Overview
//!
//! The [`EventRouter`] takes platform input and calls widget handlers along
//! [`WidgetPath`](thicket_widget::WidgetPath)s found by each window's
//! [`SpatialLocator`](thicket_locator::SpatialLocator):
//!
//! - Mouse presses tunnel a preview from the root down to the widget under the
//!   pointer, then bubble back up. The first handler that reports the event
//!   handled stops the pass.
//! - Keyboard and text input follow the focus path the same way.
//! - Mouse capture redirects pointer input to a single widget.
//! - Hover changes produce enter/leave pairs: leaves inner to outer, then
//!   enters outer to inner.
//! - Drag and drop starts once the pointer travels past a threshold with the
//!   left button held on a drag-droppable widget.
//!
//! ## Ownership
//!
//! Nothing is global. A [`UiContext`] owns the
//! [`WidgetTree`](thicket_widget::WidgetTree), the [`Screen`] (the window
//! stack) and the router, and hosts pass it around explicitly.
//!
//! ## Example
//!
//! ```
//! use kurbo::{Point, Rect};
//! use thicket_router::{InputEvent, UiContext};
//! use thicket_widget::{Blank, MouseButton, MouseButtonEvent, WidgetProps};
//!
//! let mut ui = UiContext::new();
//! let root = ui
//!     .tree_mut()
//!     .insert(None, WidgetProps::new(Rect::new(0.0, 0.0, 200.0, 200.0)), Blank);
//! let field = ui.tree_mut().insert(
//!     Some(root),
//!     WidgetProps::new(Rect::new(10.0, 10.0, 90.0, 30.0)).focusable(),
//!     Blank,
//! );
//! ui.open_window(Rect::new(0.0, 0.0, 200.0, 200.0), root);
//! ui.layout();
//!
//! let click = MouseButtonEvent::new(MouseButton::Left, Point::new(20.0, 20.0));
//! ui.dispatch(&InputEvent::MouseDown(click));
//! assert_eq!(ui.router().focused_widget(), Some(field));
//! assert!(ui.router().is_text_input_active());
//! ```
//!
//! ## Logging
//!
//! State transitions are logged through `tracing` under the targets in
//! [`logging::targets`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod context;
pub mod dispatcher;
pub mod hover;
mod input;
pub mod logging;
mod router;
mod screen;
mod window;


pub use config::RouterConfig;
pub use context::UiContext;
pub use input::InputEvent;
pub use router::EventRouter;
pub use screen::Screen;
pub use window::{Window, WindowId};
