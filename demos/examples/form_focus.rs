// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Click-to-focus, keyboard routing, and escape handling on a small form.
//!
//! The form has two text fields inside a panel. Synthetic input clicks the
//! first field, types, tabs to the second field through the screen's
//! unhandled-key hook, and finally presses escape.
//!
//! Run:
//! - `cargo run -p thicket_demos --example form_focus`
//!
//! The subscriber logs at `debug`, so focus changes appear next to the printed output.

use std::cell::Cell;
use std::rc::Rc;

use kurbo::{Point, Rect};
use thicket_router::{InputEvent, UiContext};
use thicket_widget::{
    Blank, EventCx, EventResult, FocusLostReason, Key, KeyEvent, MouseButton, MouseButtonEvent,
    TextInputEvent, Widget, WidgetProps,
};

/// A single-line field that accumulates committed text.
struct TextField {
    label: &'static str,
    text: String,
}

impl TextField {
    fn new(label: &'static str) -> Self {
        Self {
            label,
            text: String::new(),
        }
    }
}

impl Widget for TextField {
    fn on_text_input(&mut self, _: &mut EventCx<'_>, event: &TextInputEvent) -> EventResult {
        self.text.push_str(&event.text);
        println!("  {}: {:?}", self.label, self.text);
        EventResult::handled()
    }

    fn on_key_down(&mut self, _: &mut EventCx<'_>, event: &KeyEvent) -> EventResult {
        if event.key == Key::Backspace {
            self.text.pop();
            println!("  {}: {:?}", self.label, self.text);
            return EventResult::handled();
        }
        EventResult::UNHANDLED
    }

    fn on_focus_gained(&mut self, _: &mut EventCx<'_>) -> EventResult {
        println!("  {} gained focus", self.label);
        EventResult::UNHANDLED
    }

    fn on_focus_lost(&mut self, _: &mut EventCx<'_>, reason: FocusLostReason) {
        println!("  {} lost focus ({reason:?})", self.label);
    }
}

fn click(ui: &mut UiContext, x: f64, y: f64) {
    let event = MouseButtonEvent::new(MouseButton::Left, Point::new(x, y));
    ui.dispatch(&InputEvent::MouseDown(event.clone()));
    ui.dispatch(&InputEvent::MouseUp(event));
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let mut ui = UiContext::new();
    let window = Rect::new(0.0, 0.0, 320.0, 200.0);
    let root = ui.tree_mut().insert(None, WidgetProps::new(window), Blank);
    let panel = ui.tree_mut().insert(
        Some(root),
        WidgetProps::new(Rect::new(10.0, 10.0, 310.0, 190.0)),
        Blank,
    );
    let name = ui.tree_mut().insert(
        Some(panel),
        WidgetProps::new(Rect::new(20.0, 20.0, 300.0, 50.0)).focusable(),
        TextField::new("name"),
    );
    let email = ui.tree_mut().insert(
        Some(panel),
        WidgetProps::new(Rect::new(20.0, 60.0, 300.0, 90.0)).focusable(),
        TextField::new("email"),
    );
    ui.open_window(window, root);
    ui.layout();

    // Tab moves between the two fields. The hook cannot reach the router, so
    // it records the request and the host applies it after dispatch.
    let tab_requested = Rc::new(Cell::new(false));
    let requested = tab_requested.clone();
    ui.screen_mut().set_unhandled_key_handler(move |event| {
        if event.key == Key::Tab {
            requested.set(true);
            true
        } else {
            false
        }
    });

    println!("click the name field");
    click(&mut ui, 40.0, 30.0);
    assert_eq!(ui.router().focused_widget(), Some(name));

    println!("type");
    for chunk in ["Ada", " Lovelace", "!"] {
        ui.dispatch(&InputEvent::TextInput(TextInputEvent::new(chunk)));
    }
    ui.dispatch(&InputEvent::KeyDown(KeyEvent::new(Key::Backspace)));

    println!("tab");
    ui.dispatch(&InputEvent::KeyDown(KeyEvent::new(Key::Tab)));
    if tab_requested.replace(false) {
        let next = if ui.router().focused_widget() == Some(name) {
            email
        } else {
            name
        };
        ui.set_focus(next);
    }
    let email_text = TextInputEvent::new("ada@example.com");
    ui.dispatch(&InputEvent::TextInput(email_text));

    println!("click the panel background");
    click(&mut ui, 15.0, 150.0);
    assert_eq!(ui.router().focused_widget(), None);

    println!("click email, then escape");
    click(&mut ui, 40.0, 70.0);
    let handled = ui.dispatch(&InputEvent::KeyDown(KeyEvent::new(Key::Escape)));
    println!("escape handled: {handled}");
    assert_eq!(ui.router().focused_widget(), None);
}
