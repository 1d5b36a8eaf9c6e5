//! Synth panel simulator for desktop development.
//!
//! Runs the widget toolkit against an SDL window via the
//! embedded-graphics-simulator crate: the screen area shows the real UI
//! driven by [`panel_common::SceneHost`], surrounded by a mock of the
//! physical panel whose buttons and encoders are operated with the mouse.

// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

mod demo;
mod panel;
mod render;
mod timing;

use std::thread;
use std::time::Instant;

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::text::Text;
use embedded_graphics_simulator::{
    OutputSettingsBuilder,
    SimulatorDisplay,
    SimulatorEvent,
    Window,
};
use panel_common::diag::EventLog;
use panel_common::SceneHost;
use profont::PROFONT_9_POINT;

use crate::demo::DemoUi;
use crate::panel::layout::{PANEL_SIZE, SCREEN_X, SCREEN_Y};
use crate::panel::HwPanel;
use crate::render::draw_scene;
use crate::timing::{FRAME_TIME, FRAME_TIME_MS};

fn main() {
    let mut display: SimulatorDisplay<Rgb888> =
        SimulatorDisplay::new(Size::new(PANEL_SIZE as u32, PANEL_SIZE as u32));
    let output_settings = OutputSettingsBuilder::new().scale(1).build();
    let mut window = Window::new("Synth Panel Simulator", &output_settings);

    display.clear(Rgb888::new(0, 0, 0)).ok();
    window.update(&display);

    // UI state
    let mut host = SceneHost::new();
    let mut demo = DemoUi::build(&mut host);
    let mut panel = HwPanel::new();
    let mut log = EventLog::new();
    log.push("System started");

    loop {
        let frame_start = Instant::now();

        // Handle input
        for event in window.events() {
            match event {
                SimulatorEvent::Quit => return,
                other => {
                    for input in panel.handle_event(&other) {
                        demo.apply_input(&mut host, &mut panel, &input, &mut log);
                    }
                }
            }
        }

        // Advance timers/animations, then drain notifications so geometry
        // settles before this frame is painted.
        host.tick(FRAME_TIME_MS);
        while let Some(event) = host.pop_event() {
            demo.dispatch(&mut host, &event);
        }

        // Render
        panel.render(&mut display);
        draw_scene(&mut display, &host, Point::new(SCREEN_X, SCREEN_Y));
        draw_log(&mut display, &log, panel.active_control_name());
        window.update(&display);

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME_TIME {
            thread::sleep(FRAME_TIME - elapsed);
        }
    }
}

/// Recent control events in the lower-right corner of the panel.
fn draw_log(display: &mut SimulatorDisplay<Rgb888>, log: &EventLog, active: Option<&'static str>) {
    let style = MonoTextStyle::new(&PROFONT_9_POINT, Rgb888::new(0xD9, 0xD9, 0xD9));
    let header_style = MonoTextStyle::new(&PROFONT_9_POINT, Rgb888::new(0xEC, 0xA7, 0x47));
    let x = PANEL_SIZE - 340;
    let mut y = PANEL_SIZE - 20 - (log.len() as i32 + 1) * 14;

    if let Some(name) = active {
        Text::new(name, Point::new(x, y), header_style)
            .draw(display)
            .ok();
    }
    y += 14;

    for line in log.iter() {
        Text::new(line, Point::new(x, y), style).draw(display).ok();
        y += 14;
    }
}
