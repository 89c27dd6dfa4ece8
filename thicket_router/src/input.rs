// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Point;
use thicket_widget::{KeyEvent, MouseButtonEvent, MouseMoveEvent, MouseWheelEvent, TextInputEvent};

/// A platform input event, already translated into Thicket's payload types.
///
/// Pointer payloads are built with their screen position; the router fills in
/// window-relative positions before handlers run.
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    /// A mouse button went down. `clicks >= 2` is a multi-click.
    MouseDown(MouseButtonEvent),
    /// A mouse button went up.
    MouseUp(MouseButtonEvent),
    /// The pointer moved.
    MouseMove(MouseMoveEvent),
    /// The wheel turned.
    MouseWheel(MouseWheelEvent),
    /// A key went down (or auto-repeated).
    KeyDown(KeyEvent),
    /// A key went up.
    KeyUp(KeyEvent),
    /// Committed text.
    TextInput(TextInputEvent),
}

impl InputEvent {
    /// Screen position of pointer events.
    pub fn screen_position(&self) -> Option<Point> {
        match self {
            Self::MouseDown(e) | Self::MouseUp(e) => Some(e.screen_position),
            Self::MouseMove(e) => Some(e.screen_position),
            Self::MouseWheel(e) => Some(e.screen_position),
            Self::KeyDown(_) | Self::KeyUp(_) | Self::TextInput(_) => None,
        }
    }
}
