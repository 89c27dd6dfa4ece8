// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input event payloads delivered to widget handlers.
//!
//! Pointer events carry two positions: `screen_position` as reported by the
//! platform, and `position`, relative to the window the pointer is over. The
//! router fills in `position` before any handler sees the event; events built
//! by hand start out with both positions equal.

use alloc::rc::Rc;
use alloc::string::String;
use core::any::Any;

use kurbo::{Point, Vec2};

use crate::types::WidgetId;

/// Errors raised while translating platform input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    /// The platform reported a mouse button code with no known meaning.
    #[error("unrecognized platform mouse button code {0}")]
    UnknownButton(u8),
}

/// A mouse button.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Primary button.
    Left,
    /// Wheel button.
    Middle,
    /// Secondary button.
    Right,
    /// First extra button (usually "back").
    X1,
    /// Second extra button (usually "forward").
    X2,
}

impl TryFrom<u8> for MouseButton {
    type Error = InputError;

    /// Translate an SDL-style button code (1 = left .. 5 = X2).
    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Self::Left),
            2 => Ok(Self::Middle),
            3 => Ok(Self::Right),
            4 => Ok(Self::X1),
            5 => Ok(Self::X2),
            other => Err(InputError::UnknownButton(other)),
        }
    }
}

impl MouseButton {
    /// Translate an SDL-style button code.
    ///
    /// # Panics
    ///
    /// Panics on an unknown code: the platform layer and this table disagree,
    /// which is a programming error rather than a runtime condition.
    #[track_caller]
    pub fn from_platform_code(code: u8) -> Self {
        match Self::try_from(code) {
            Ok(button) => button,
            Err(err) => panic!("{err}"),
        }
    }
}

bitflags::bitflags! {
    /// Keyboard modifier state.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Either shift key.
        const SHIFT = 0b0001;
        /// Either control key.
        const CTRL  = 0b0010;
        /// Either alt/option key.
        const ALT   = 0b0100;
        /// Either meta/command/windows key.
        const META  = 0b1000;
    }
}

/// A key, as far as routing needs to distinguish keys.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Escape. Unhandled escape drops keyboard focus.
    Escape,
    /// Enter/return.
    Enter,
    /// Tab.
    Tab,
    /// Backspace.
    Backspace,
    /// Forward delete.
    Delete,
    /// Left arrow.
    ArrowLeft,
    /// Right arrow.
    ArrowRight,
    /// Up arrow.
    ArrowUp,
    /// Down arrow.
    ArrowDown,
    /// Home.
    Home,
    /// End.
    End,
    /// A key producing a character.
    Character(char),
    /// Any other key, by platform key code.
    Other(u32),
}

/// Mouse button press or release.
#[derive(Clone, Debug, PartialEq)]
pub struct MouseButtonEvent {
    /// Which button.
    pub button: MouseButton,
    /// Window-relative position.
    pub position: Point,
    /// Screen position.
    pub screen_position: Point,
    /// Click count: 1 for a single click, 2 or more for multi-clicks.
    pub clicks: u8,
}

impl MouseButtonEvent {
    /// A single click of `button` at a screen position.
    pub fn new(button: MouseButton, screen_position: Point) -> Self {
        Self {
            button,
            position: screen_position,
            screen_position,
            clicks: 1,
        }
    }

    /// Set the click count.
    pub fn with_clicks(mut self, clicks: u8) -> Self {
        self.clicks = clicks;
        self
    }
}

/// Pointer motion.
#[derive(Clone, Debug, PartialEq)]
pub struct MouseMoveEvent {
    /// Window-relative position.
    pub position: Point,
    /// Screen position.
    pub screen_position: Point,
    /// Motion since the previous move event.
    pub delta: Vec2,
}

impl MouseMoveEvent {
    /// A move to a screen position.
    pub fn new(screen_position: Point) -> Self {
        Self {
            position: screen_position,
            screen_position,
            delta: Vec2::ZERO,
        }
    }
}

/// Scroll wheel motion.
#[derive(Clone, Debug, PartialEq)]
pub struct MouseWheelEvent {
    /// Window-relative pointer position.
    pub position: Point,
    /// Screen pointer position.
    pub screen_position: Point,
    /// Scroll amount; positive `y` scrolls content up.
    pub delta: Vec2,
    /// Whether the platform reported the delta with "natural scrolling" inversion.
    ///
    /// The router flips such deltas back so handlers see one convention.
    pub natural: bool,
}

impl MouseWheelEvent {
    /// A wheel event at a screen position.
    pub fn new(screen_position: Point, delta: Vec2) -> Self {
        Self {
            position: screen_position,
            screen_position,
            delta,
            natural: false,
        }
    }

    /// Mark the delta as naturally inverted.
    pub fn natural(mut self) -> Self {
        self.natural = true;
        self
    }
}

/// Key press or release.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key.
    pub key: Key,
    /// Modifier state at the time of the event.
    pub modifiers: Modifiers,
    /// Whether this press is an auto-repeat.
    pub repeat: bool,
}

impl KeyEvent {
    /// A non-repeating event for `key` without modifiers.
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::empty(),
            repeat: false,
        }
    }
}

/// Committed text from the platform's text input system.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextInputEvent {
    /// The text.
    pub text: String,
}

impl TextInputEvent {
    /// Wrap committed text.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Opaque data carried by a drag operation from its source to drop targets.
pub type DragPayload = Rc<dyn Any>;

/// Drag progress delivered to drag sources and targets.
#[derive(Clone)]
pub struct DragEvent {
    /// The widget the drag started on.
    pub source: WidgetId,
    /// Window-relative pointer position.
    pub position: Point,
    /// Screen pointer position.
    pub screen_position: Point,
    /// Payload supplied by the source when the drag started.
    pub payload: Option<DragPayload>,
}

impl core::fmt::Debug for DragEvent {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DragEvent")
            .field("source", &self.source)
            .field("position", &self.position)
            .field("screen_position", &self.screen_position)
            .field("has_payload", &self.payload.is_some())
            .finish()
    }
}

impl DragEvent {
    /// Borrow the payload as a concrete type.
    pub fn payload_as<T: Any>(&self) -> Option<&T> {
        self.payload.as_deref().and_then(|p| p.downcast_ref::<T>())
    }
}

/// Why a widget lost keyboard focus.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FocusLostReason {
    /// The user clicked somewhere that does not take focus.
    Click,
    /// The user pressed escape and nothing handled it.
    Escape,
    /// A handler or the host explicitly dropped focus.
    Requested,
    /// Focus moved to another widget.
    Replaced,
}
