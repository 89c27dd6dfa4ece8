// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Router configuration.

/// Tunable behaviour of an [`EventRouter`](crate::EventRouter).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RouterConfig {
    /// Distance in pixels the pointer must travel from the press position
    /// before an armed drag starts. The comparison is strict.
    pub drag_trigger_distance: f64,
    /// Whether wheel deltas reported as naturally inverted are flipped back
    /// before handlers see them.
    pub natural_scrolling: bool,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            drag_trigger_distance: 4.0,
            natural_scrolling: true,
        }
    }
}

impl RouterConfig {
    /// Set the drag trigger distance.
    pub fn with_drag_trigger_distance(mut self, distance: f64) -> Self {
        self.drag_trigger_distance = distance;
        self
    }

    /// Set whether natural-scrolling inversion is honoured.
    pub fn with_natural_scrolling(mut self, enabled: bool) -> Self {
        self.natural_scrolling = enabled;
        self
    }

    /// Squared drag trigger distance, compared against squared pointer travel.
    pub fn drag_trigger_distance_squared(&self) -> f64 {
        self.drag_trigger_distance * self.drag_trigger_distance
    }
}
