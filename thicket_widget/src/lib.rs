// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Thicket Widget: the widget arena, weak references, and widget paths.
//!
//! This crate holds the data every other Thicket crate talks about:
//!
//! - [`WidgetTree`]: a generational arena of widgets arranged in a tree. Each node
//!   carries layout-written [`WidgetProps`] (screen extent, optional clip, and
//!   [`WidgetFlags`]) next to its boxed [`Widget`] behaviour.
//! - [`WidgetId`]: generational handle of a widget. A removed widget's id never
//!   aliases a later occupant of the same slot.
//! - [`WeakRef`]: a non-owning, self-invalidating reference. Removing a widget
//!   invalidates every outstanding ref to it at once.
//! - [`WidgetPath`]: a root-to-leaf sequence of [`WeakRef`]s, as produced by hit
//!   testing and consumed by event routing.
//! - [`Widget`], [`EventResult`], [`EventCx`]: the handler surface. Handlers get
//!   mutable access to the tree through [`EventCx`] and may remove widgets
//!   (themselves included) while an event is being routed.
//! - Input payloads ([`MouseButtonEvent`], [`KeyEvent`], [`DragEvent`], ...).
//!
//! Hit testing lives in `thicket_locator` and routing in `thicket_router`.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::Rect;
//! use thicket_widget::{Blank, WidgetPath, WidgetProps, WidgetTree};
//!
//! let mut tree = WidgetTree::new();
//! let root = tree.insert(None, WidgetProps::new(Rect::new(0.0, 0.0, 400.0, 300.0)), Blank);
//! let button = tree.insert(
//!     Some(root),
//!     WidgetProps::new(Rect::new(20.0, 20.0, 120.0, 60.0)).focusable(),
//!     Blank,
//! );
//!
//! let path: WidgetPath = tree.ancestry_path(button);
//! assert_eq!(path.ids(), vec![root, button]);
//!
//! // Removing the root takes the button with it and invalidates the path.
//! tree.remove(root);
//! assert!(path.leaf().is_none());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod event;
mod path;
mod tree;
mod types;
mod weak;
mod widget;

pub use event::{
    DragEvent, DragPayload, FocusLostReason, InputError, Key, KeyEvent, Modifiers, MouseButton,
    MouseButtonEvent, MouseMoveEvent, MouseWheelEvent, TextInputEvent,
};
pub use path::WidgetPath;
pub use tree::WidgetTree;
pub use types::{WidgetFlags, WidgetId, WidgetProps};
pub use weak::WeakRef;
pub use widget::{Blank, EventCx, EventResult, Widget};
