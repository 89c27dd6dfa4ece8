// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the widget arena: identifiers, flags, and per-widget geometry.

use kurbo::Rect;

/// Identifier for a widget in a [`WidgetTree`](crate::WidgetTree) (generational).
///
/// The first field is the arena slot, the second the generation of that slot
/// when the widget was inserted. A slot reused after a removal gets a higher
/// generation, so a stale id never aliases the new occupant.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct WidgetId(pub(crate) u32, pub(crate) u32);

impl WidgetId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    /// The arena slot of this id.
    pub const fn slot(self) -> u32 {
        self.0
    }

    /// The generation of the slot when this id was handed out.
    pub const fn generation(self) -> u32 {
        self.1
    }
}

impl core::fmt::Display for WidgetId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "#{}v{}", self.0, self.1)
    }
}

bitflags::bitflags! {
    /// Widget capability flags consulted by hit testing and the event router.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct WidgetFlags: u8 {
        /// Widget is visible. Invisible widgets (and their subtrees) are left out of hit testing.
        const VISIBLE        = 0b0000_0001;
        /// Widget can hold keyboard focus.
        const FOCUSABLE      = 0b0000_0010;
        /// Widget can be armed into a drag operation by press-and-move.
        const DRAG_DROPPABLE = 0b0000_0100;
    }
}

impl Default for WidgetFlags {
    fn default() -> Self {
        Self::VISIBLE
    }
}

/// Geometry and capabilities of one widget, written by layout.
#[derive(Clone, Debug, PartialEq)]
pub struct WidgetProps {
    /// Screen extent in device pixels.
    pub extent: Rect,
    /// Optional clip in screen space.
    ///
    /// Hit testing only considers the part of `extent` inside the clip. A
    /// zero-size clip is treated as "no clip".
    pub clip: Option<Rect>,
    /// Visibility, focusability and drag capability.
    pub flags: WidgetFlags,
}

impl Default for WidgetProps {
    fn default() -> Self {
        Self {
            extent: Rect::ZERO,
            clip: None,
            flags: WidgetFlags::default(),
        }
    }
}

impl WidgetProps {
    /// Props for a visible widget covering `extent`.
    pub fn new(extent: Rect) -> Self {
        Self {
            extent,
            ..Self::default()
        }
    }

    /// Add flags to these props.
    pub fn with_flags(mut self, flags: WidgetFlags) -> Self {
        self.flags |= flags;
        self
    }

    /// Set a clip rectangle.
    pub fn with_clip(mut self, clip: Rect) -> Self {
        self.clip = Some(clip);
        self
    }

    /// Mark these props focusable.
    pub fn focusable(self) -> Self {
        self.with_flags(WidgetFlags::FOCUSABLE)
    }

    /// Mark these props drag-droppable.
    pub fn drag_droppable(self) -> Self {
        self.with_flags(WidgetFlags::DRAG_DROPPABLE)
    }

    /// Clear the visible flag.
    pub fn hidden(mut self) -> Self {
        self.flags.remove(WidgetFlags::VISIBLE);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_props_are_visible_only() {
        let props = WidgetProps::default();
        assert_eq!(props.flags, WidgetFlags::VISIBLE);
        assert!(props.clip.is_none());
    }

    #[test]
    fn builder_combines_flags() {
        let props = WidgetProps::new(Rect::new(0.0, 0.0, 10.0, 10.0))
            .focusable()
            .drag_droppable()
            .hidden();
        assert!(props.flags.contains(WidgetFlags::FOCUSABLE));
        assert!(props.flags.contains(WidgetFlags::DRAG_DROPPABLE));
        assert!(!props.flags.contains(WidgetFlags::VISIBLE));
    }
}
