// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover tracking, drag and drop between two windows, and the locator behind it.
//!
//! A palette window holds colour swatches that can be dragged. A canvas
//! window in front of it accepts drops and records the colour it received.
//! The pointer path is synthetic: hover over a swatch, press, move past the
//! drag threshold onto the canvas, release.
//!
//! Run:
//! - `cargo run -p thicket_demos --example drag_and_drop`

use std::cell::Cell;
use std::rc::Rc;

use kurbo::{Point, Rect};
use thicket_locator::SpatialLocator;
use thicket_router::{InputEvent, UiContext};
use thicket_widget::{
    Blank, DragEvent, DragPayload, EventCx, EventResult, MouseButton, MouseButtonEvent,
    MouseMoveEvent, Widget, WidgetProps,
};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Colour(u32);

struct Swatch {
    colour: Colour,
}

impl Widget for Swatch {
    fn drag_payload(&self) -> Option<DragPayload> {
        Some(Rc::new(self.colour))
    }

    fn on_mouse_enter(&mut self, _: &mut EventCx<'_>, _: &MouseMoveEvent) {
        println!("  swatch #{:06x}: hover on", self.colour.0);
    }

    fn on_mouse_leave(&mut self, _: &mut EventCx<'_>, _: &MouseMoveEvent) {
        println!("  swatch #{:06x}: hover off", self.colour.0);
    }

    fn on_drag_start(&mut self, _: &mut EventCx<'_>, _: &DragEvent) -> EventResult {
        println!("  swatch #{:06x}: drag started", self.colour.0);
        EventResult::handled()
    }

    fn on_drag_end(&mut self, _: &mut EventCx<'_>, _: &DragEvent) -> EventResult {
        println!("  swatch #{:06x}: drag ended", self.colour.0);
        EventResult::handled()
    }
}

struct Canvas {
    fill: Rc<Cell<Option<Colour>>>,
}

impl Widget for Canvas {
    fn on_drag_enter(&mut self, _: &mut EventCx<'_>, event: &DragEvent) {
        println!(
            "  canvas: drag entered at {:?} (window-relative)",
            event.position
        );
    }

    fn on_drag_leave(&mut self, _: &mut EventCx<'_>, _: &DragEvent) {
        println!("  canvas: drag left");
    }

    fn on_drop(&mut self, _: &mut EventCx<'_>, event: &DragEvent) -> EventResult {
        match event.payload_as::<Colour>() {
            Some(&colour) => {
                println!("  canvas: filled with #{:06x}", colour.0);
                self.fill.set(Some(colour));
                EventResult::handled()
            }
            None => EventResult::UNHANDLED,
        }
    }
}

fn describe(name: &str, locator: &SpatialLocator) {
    let (cols, rows) = locator.grid_size();
    println!(
        "{name}: {} widgets in a {cols}x{rows} grid of {}px cells",
        locator.widget_count(),
        locator.cell_size()
    );
}

fn move_to(ui: &mut UiContext, x: f64, y: f64) {
    let event = MouseMoveEvent::new(Point::new(x, y));
    ui.dispatch(&InputEvent::MouseMove(event));
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let mut ui = UiContext::new();

    let palette_extent = Rect::new(0.0, 0.0, 120.0, 400.0);
    let palette = ui
        .tree_mut()
        .insert(None, WidgetProps::new(palette_extent), Blank);
    for (i, colour) in [0xd0_30_30, 0x30_a0_40, 0x30_50_d0].into_iter().enumerate() {
        let top = 10.0 + 60.0 * i as f64;
        ui.tree_mut().insert(
            Some(palette),
            WidgetProps::new(Rect::new(10.0, top, 110.0, top + 50.0)).drag_droppable(),
            Swatch {
                colour: Colour(colour),
            },
        );
    }

    let fill = Rc::new(Cell::new(None));
    let canvas_extent = Rect::new(100.0, 0.0, 500.0, 400.0);
    let canvas_root = ui
        .tree_mut()
        .insert(None, WidgetProps::new(canvas_extent), Blank);
    ui.tree_mut().insert(
        Some(canvas_root),
        WidgetProps::new(Rect::new(140.0, 20.0, 480.0, 380.0)),
        Canvas { fill: fill.clone() },
    );

    let palette_window = ui.open_window(palette_extent, palette);
    let canvas_window = ui.open_window(canvas_extent, canvas_root);
    ui.layout();

    for (name, id) in [("palette", palette_window), ("canvas", canvas_window)] {
        if let Some(window) = ui.screen().window(id) {
            describe(name, window.locator());
        }
    }

    println!("hover the green swatch");
    move_to(&mut ui, 50.0, 90.0);

    println!("press and drag onto the canvas");
    let press = MouseButtonEvent::new(MouseButton::Left, Point::new(50.0, 90.0));
    ui.dispatch(&InputEvent::MouseDown(press));
    move_to(&mut ui, 52.0, 91.0);
    move_to(&mut ui, 200.0, 150.0);
    move_to(&mut ui, 300.0, 200.0);

    println!("release");
    let release = MouseButtonEvent::new(MouseButton::Left, Point::new(300.0, 200.0));
    ui.dispatch(&InputEvent::MouseUp(release));

    assert_eq!(fill.get(), Some(Colour(0x30_a0_40)));
    assert!(!ui.router().is_dragging());
}
