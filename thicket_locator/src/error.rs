// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Rect;
use thicket_widget::WidgetId;

/// Errors returned by the fallible [`SpatialLocator`](crate::SpatialLocator) operations.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum LocatorError {
    /// The widget's hit-testable extent shares no area with the locator.
    #[error("widget {widget} at {extent:?} lies outside the locator extent {locator:?}")]
    OutsideExtent {
        /// The rejected widget.
        widget: WidgetId,
        /// Its hit-testable extent (clip applied).
        extent: Rect,
        /// The locator's extent.
        locator: Rect,
    },
}
