// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing targets used by the router.
//!
//! Thicket logs through `tracing` and never installs a subscriber itself.
//! State transitions (focus, capture, drag) are logged at `debug`, skipped
//! stale widgets and off-window widgets at `trace`. Filter by subsystem with
//! these targets, for example `RUST_LOG=thicket::focus=debug`.

/// Target names for log filtering.
pub mod targets {
    /// Keyboard focus changes.
    pub const FOCUS: &str = "thicket::focus";
    /// Mouse capture changes.
    pub const CAPTURE: &str = "thicket::capture";
    /// Drag arming, start, drop, and end.
    pub const DRAG: &str = "thicket::drag";
    /// Hover enter/leave transitions.
    pub const HOVER: &str = "thicket::hover";
    /// Locator rebuilds during layout.
    pub const LAYOUT: &str = "thicket::layout";
    /// Event dispatch.
    pub const DISPATCH: &str = "thicket::dispatch";
}
