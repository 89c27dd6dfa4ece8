// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dispatcher helper: walk a widget path in tunnel or bubble order and honor
//! stop outcomes.
//!
//! - [`Phase::Tunnel`] visits root to leaf, [`Phase::Bubble`] leaf to root.
//! - Entries whose widget is gone are skipped. Liveness is re-checked right
//!   before each visit, so a handler may remove widgets still ahead of the walk.
//! - [`Outcome::Stop`] ends the walk; [`run`] reports the index of the entry
//!   that stopped it.
//!
//! ```
//! use kurbo::Rect;
//! use thicket_router::dispatcher::{self, Outcome, Phase};
//! use thicket_widget::{Blank, WidgetPath, WidgetProps, WidgetTree};
//!
//! let mut tree = WidgetTree::new();
//! let props = WidgetProps::new(Rect::new(0.0, 0.0, 10.0, 10.0));
//! let root = tree.insert(None, props.clone(), Blank);
//! let leaf = tree.insert(Some(root), props, Blank);
//! let path: WidgetPath = tree.ancestry_path(leaf);
//!
//! let mut seen = Vec::new();
//! let stopped = dispatcher::run(&path, Phase::Bubble, |id| {
//!     seen.push(id);
//!     Outcome::Continue
//! });
//! assert_eq!(stopped, None);
//! assert_eq!(seen, vec![leaf, root]);
//! ```

use thicket_widget::{EventResult, WidgetId, WidgetPath};

use crate::logging::targets;

/// Direction of a walk over a path.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Root to leaf; used for preview handlers.
    Tunnel,
    /// Leaf to root.
    Bubble,
}

/// Whether a walk continues past the current widget.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Visit the next widget.
    Continue,
    /// Stop here.
    Stop,
}

impl Outcome {
    /// Stop when a handler reports the event handled.
    pub fn from_result(result: &EventResult) -> Self {
        if result.was_handled {
            Self::Stop
        } else {
            Self::Continue
        }
    }
}

/// Visit the live widgets of `path` in `phase` order.
///
/// Returns the index in `path` of the widget whose visit returned
/// [`Outcome::Stop`], or `None` if the walk completed.
pub fn run(
    path: &WidgetPath,
    phase: Phase,
    mut visit: impl FnMut(WidgetId) -> Outcome,
) -> Option<usize> {
    let len = path.len();
    for step in 0..len {
        let index = match phase {
            Phase::Tunnel => step,
            Phase::Bubble => len - 1 - step,
        };
        let Some(id) = path[index].upgrade() else {
            tracing::trace!(
                target: targets::DISPATCH,
                widget = %path[index].id(),
                ?phase,
                "skipping stale widget"
            );
            continue;
        };
        if visit(id) == Outcome::Stop {
            return Some(index);
        }
    }
    None
}
