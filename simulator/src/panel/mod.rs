//! Desktop mock of the physical control panel.
//!
//! Holds the button/encoder set laid out from real hardware measurements,
//! translates SDL mouse input (click, vertical drag, wheel) into control
//! events, and renders the panel procedurally around the screen area.

pub mod controls;
pub mod layout;

use std::time::Instant;

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, PrimitiveStyle, Rectangle, RoundedRectangle};
use embedded_graphics_simulator::SimulatorEvent;

use self::controls::{dim, ControlId, PanelButton, PanelEncoder};
use self::layout::*;

/// Vertical drag distance that sweeps an absolute encoder end to end.
const DRAG_FULL_SCALE_PX: f32 = 100.0;

/// Encoder change per wheel notch.
const WHEEL_STEP: f32 = 0.02;

/// How long the activity legend stays visible.
const LEGEND_HOLD_MS: u128 = 2000;

/// Panel chrome colors.
mod panel_color {
    use embedded_graphics::pixelcolor::Rgb888;
    use panel_common::theme::rgb;

    pub const BACKGROUND: Rgb888 = rgb(0x3D2B1F); // dark wood brown
    pub const BORDER: Rgb888 = rgb(0x2A1A10);
    pub const SCREEN_BG: Rgb888 = rgb(0x1A1A1A);

    // Left buttons (red gradient)
    pub const LEFT_TOP: Rgb888 = rgb(0xE53935);
    pub const LEFT_CENTER: Rgb888 = rgb(0xEF9A9A);
    pub const LEFT_BOTTOM: Rgb888 = rgb(0xFFCDD2);

    // Bottom buttons (green gradient)
    pub const BOTTOM_LEFT: Rgb888 = rgb(0x43A047);
    pub const BOTTOM_CENTER: Rgb888 = rgb(0x81C784);
    pub const BOTTOM_RIGHT: Rgb888 = rgb(0xC8E6C9);

    // Right controls
    pub const NAV: Rgb888 = rgb(0x1E88E5);
    pub const OPT: Rgb888 = rgb(0xAD1457);

    // Macro colors (orange to yellow gradient)
    pub const MACROS: [Rgb888; 8] = [
        rgb(0xEF6C00),
        rgb(0xF57C00),
        rgb(0xFDD835),
        rgb(0xC0CA33),
        rgb(0xFFCC80),
        rgb(0xFFE082),
        rgb(0xFFF59D),
        rgb(0xF0F4C3),
    ];
}

/// A control event produced from mouse input.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum PanelInput {
    Button { id: ControlId, pressed: bool },
    EncoderAbsolute { id: ControlId, value: f32 },
    EncoderDelta { id: ControlId, delta: f32 },
}

struct ActiveControl {
    id: ControlId,
    color: Rgb888,
    is_button: bool,
    since: Instant,
}

/// The simulated hardware panel.
pub struct HwPanel {
    buttons: Vec<PanelButton>,
    encoders: Vec<PanelEncoder>,
    active_encoder: Option<usize>,
    mouse_pos: Point,
    active_control: Option<ActiveControl>,
}

impl HwPanel {
    pub fn new() -> Self {
        let buttons = vec![
            PanelButton::new(ControlId::LeftTop, LEFT_BTN_X, LEFT_BTN_Y_TOP, BTN_RADIUS, panel_color::LEFT_TOP),
            PanelButton::new(ControlId::LeftCenter, LEFT_BTN_X, LEFT_BTN_Y_CENTER, BTN_RADIUS, panel_color::LEFT_CENTER),
            PanelButton::new(ControlId::LeftBottom, LEFT_BTN_X, LEFT_BTN_Y_BOTTOM, BTN_RADIUS, panel_color::LEFT_BOTTOM),
            PanelButton::new(ControlId::BottomLeft, BOTTOM_BTN_X_LEFT, BOTTOM_BTN_Y, BTN_RADIUS, panel_color::BOTTOM_LEFT),
            PanelButton::new(ControlId::BottomCenter, BOTTOM_BTN_X_CENTER, BOTTOM_BTN_Y, BTN_RADIUS, panel_color::BOTTOM_CENTER),
            PanelButton::new(ControlId::BottomRight, BOTTOM_BTN_X_RIGHT, BOTTOM_BTN_Y, BTN_RADIUS, panel_color::BOTTOM_RIGHT),
        ];

        let mut encoders = vec![
            // NAV encoder (with push button)
            PanelEncoder::new(
                ControlId::NavEnc,
                Some(ControlId::NavBtn),
                RIGHT_X,
                NAV_Y,
                NAV_RADIUS,
                panel_color::NAV,
                0.5,
                false,
            ),
            // OPT encoder (no button, relative)
            PanelEncoder::new(ControlId::OptEnc, None, RIGHT_X, OPT_Y, OPT_RADIUS, panel_color::OPT, 0.0, true),
        ];

        // Macro encoders, 4x2 grid, each with a push button.
        for i in 0..8u8 {
            let col = i32::from(i % 4);
            let row = i32::from(i / 4);
            encoders.push(PanelEncoder::new(
                ControlId::MacroEnc(i),
                Some(ControlId::MacroBtn(i)),
                MACRO_START_X + col * MACRO_SPACING_X,
                MACRO_START_Y + row * MACRO_SPACING_Y,
                MACRO_RADIUS,
                panel_color::MACROS[i as usize],
                0.5,
                false,
            ));
        }

        Self {
            buttons,
            encoders,
            active_encoder: None,
            mouse_pos: Point::zero(),
            active_control: None,
        }
    }

    /// Sync an encoder's displayed value with the UI (e.g. after the UI
    /// changed a parameter itself).
    pub fn set_encoder_value(&mut self, id: ControlId, value: f32) {
        if let Some(enc) = self.encoders.iter_mut().find(|enc| enc.enc_id == id) {
            enc.value = value.clamp(0.0, 1.0);
        }
    }

    /// Translate one SDL event into zero or more control events.
    pub fn handle_event(&mut self, event: &SimulatorEvent) -> Vec<PanelInput> {
        let mut inputs = Vec::new();

        match *event {
            SimulatorEvent::MouseButtonDown { point, .. } => {
                self.mouse_pos = point;

                for btn in &mut self.buttons {
                    if btn.hit_test(point) {
                        btn.pressed = true;
                        self.active_control = Some(ActiveControl {
                            id: btn.id,
                            color: btn.color,
                            is_button: true,
                            since: Instant::now(),
                        });
                        inputs.push(PanelInput::Button {
                            id: btn.id,
                            pressed: true,
                        });
                        return inputs;
                    }
                }

                for (idx, enc) in self.encoders.iter_mut().enumerate() {
                    if !enc.hit_test(point) {
                        continue;
                    }
                    if enc.center_hit_test(point)
                        && let Some(btn_id) = enc.btn_id
                    {
                        // Push the encoder's center button.
                        enc.pressed = true;
                        self.active_control = Some(ActiveControl {
                            id: btn_id,
                            color: enc.color,
                            is_button: true,
                            since: Instant::now(),
                        });
                        inputs.push(PanelInput::Button {
                            id: btn_id,
                            pressed: true,
                        });
                    } else {
                        // Start a value drag.
                        enc.dragging = true;
                        enc.drag_start_y = point.y;
                        self.active_encoder = Some(idx);
                        self.active_control = Some(ActiveControl {
                            id: enc.enc_id,
                            color: enc.color,
                            is_button: false,
                            since: Instant::now(),
                        });
                    }
                    return inputs;
                }
            }

            SimulatorEvent::MouseButtonUp { point, .. } => {
                self.mouse_pos = point;

                for btn in &mut self.buttons {
                    if btn.pressed {
                        btn.pressed = false;
                        inputs.push(PanelInput::Button {
                            id: btn.id,
                            pressed: false,
                        });
                    }
                }
                for enc in &mut self.encoders {
                    if enc.pressed {
                        enc.pressed = false;
                        if let Some(btn_id) = enc.btn_id {
                            inputs.push(PanelInput::Button {
                                id: btn_id,
                                pressed: false,
                            });
                        }
                    }
                    enc.dragging = false;
                }
                self.active_encoder = None;
            }

            SimulatorEvent::MouseMove { point } => {
                self.mouse_pos = point;

                if let Some(idx) = self.active_encoder {
                    let enc = &mut self.encoders[idx];
                    if enc.dragging {
                        let dy = enc.drag_start_y - point.y;
                        enc.drag_start_y = point.y;
                        let delta = dy as f32 / DRAG_FULL_SCALE_PX;

                        if enc.relative {
                            inputs.push(PanelInput::EncoderDelta {
                                id: enc.enc_id,
                                delta,
                            });
                        } else {
                            enc.value = (enc.value + delta).clamp(0.0, 1.0);
                            inputs.push(PanelInput::EncoderAbsolute {
                                id: enc.enc_id,
                                value: enc.value,
                            });
                        }
                    }
                }
            }

            SimulatorEvent::MouseWheel { scroll_delta, .. } => {
                for enc in &mut self.encoders {
                    if !enc.hit_test(self.mouse_pos) {
                        continue;
                    }
                    let delta = scroll_delta.y as f32 * WHEEL_STEP;
                    self.active_control = Some(ActiveControl {
                        id: enc.enc_id,
                        color: enc.color,
                        is_button: false,
                        since: Instant::now(),
                    });

                    if enc.relative {
                        inputs.push(PanelInput::EncoderDelta {
                            id: enc.enc_id,
                            delta,
                        });
                    } else {
                        enc.value = (enc.value + delta).clamp(0.0, 1.0);
                        inputs.push(PanelInput::EncoderAbsolute {
                            id: enc.enc_id,
                            value: enc.value,
                        });
                    }
                    break;
                }
            }

            _ => {}
        }

        inputs
    }

    /// Draw the full panel: chrome, controls, and activity legend.
    pub fn render<D>(&self, display: &mut D)
    where
        D: DrawTarget<Color = Rgb888>,
    {
        self.render_chrome(display);

        for btn in &self.buttons {
            btn.render(display);
        }
        for enc in &self.encoders {
            enc.render(display);
        }

        self.render_legend(display);
    }

    /// Panel background around the screen cutout plus the bezel.
    fn render_chrome<D>(&self, display: &mut D)
    where
        D: DrawTarget<Color = Rgb888>,
    {
        let bg = PrimitiveStyle::with_fill(panel_color::BACKGROUND);
        let panel = PANEL_SIZE as u32;

        // Screen backing, painted over by the UI scene.
        Rectangle::new(
            Point::new(SCREEN_X, SCREEN_Y),
            Size::new(SCREEN_W as u32, SCREEN_H as u32),
        )
        .into_styled(PrimitiveStyle::with_fill(panel_color::SCREEN_BG))
        .draw(display)
        .ok();

        // Four strips around the screen area, so the screen contents are
        // never overdrawn.
        Rectangle::new(Point::zero(), Size::new(panel, SCREEN_Y as u32))
            .into_styled(bg)
            .draw(display)
            .ok();
        Rectangle::new(
            Point::new(0, SCREEN_Y + SCREEN_H),
            Size::new(panel, (PANEL_SIZE - SCREEN_Y - SCREEN_H) as u32),
        )
        .into_styled(bg)
        .draw(display)
        .ok();
        Rectangle::new(
            Point::new(0, SCREEN_Y),
            Size::new(SCREEN_X as u32, SCREEN_H as u32),
        )
        .into_styled(bg)
        .draw(display)
        .ok();
        Rectangle::new(
            Point::new(SCREEN_X + SCREEN_W, SCREEN_Y),
            Size::new((PANEL_SIZE - SCREEN_X - SCREEN_W) as u32, SCREEN_H as u32),
        )
        .into_styled(bg)
        .draw(display)
        .ok();

        // Rounded panel border.
        RoundedRectangle::with_equal_corners(
            Rectangle::new(Point::new(5, 5), Size::new(panel - 10, panel - 10)),
            Size::new(15, 15),
        )
        .into_styled(PrimitiveStyle::with_stroke(panel_color::BORDER, 2))
        .draw(display)
        .ok();

        // Screen bezel.
        Rectangle::new(
            Point::new(SCREEN_X - 2, SCREEN_Y - 2),
            Size::new((SCREEN_W + 4) as u32, (SCREEN_H + 4) as u32),
        )
        .into_styled(PrimitiveStyle::with_stroke(Rgb888::new(30, 30, 30), 2))
        .draw(display)
        .ok();
    }

    /// Recent-activity indicator in the bottom-left corner.
    fn render_legend<D>(&self, display: &mut D)
    where
        D: DrawTarget<Color = Rgb888>,
    {
        let Some(ref active) = self.active_control else {
            return;
        };
        let elapsed = active.since.elapsed().as_millis();
        if elapsed > LEGEND_HOLD_MS {
            return;
        }

        const INDICATOR_X: i32 = 60;
        const INDICATOR_Y: i32 = PANEL_SIZE - 60;
        const INDICATOR_RADIUS: u32 = 40;

        // Fade out over the hold time in place of alpha blending.
        let fade = 1.0 - elapsed as f32 / LEGEND_HOLD_MS as f32 * 0.6;
        let center = Point::new(INDICATOR_X, INDICATOR_Y);

        Circle::with_center(center, (INDICATOR_RADIUS + 8) * 2)
            .into_styled(PrimitiveStyle::with_fill(dim(active.color, 0.25 * fade)))
            .draw(display)
            .ok();
        Circle::with_center(center, INDICATOR_RADIUS * 2)
            .into_styled(PrimitiveStyle::with_fill(dim(active.color, fade)))
            .draw(display)
            .ok();

        // Type marker: square for buttons, ring for encoders.
        if active.is_button {
            Rectangle::with_center(center, Size::new(24, 24))
                .into_styled(PrimitiveStyle::with_fill(Rgb888::new(0, 0, 0)))
                .draw(display)
                .ok();
        } else {
            Circle::with_center(center, 30)
                .into_styled(PrimitiveStyle::with_stroke(Rgb888::new(0, 0, 0), 3))
                .draw(display)
                .ok();
        }
    }

    /// Name of the most recently touched control, for the on-screen log.
    pub fn active_control_name(&self) -> Option<&'static str> {
        self.active_control.as_ref().map(|active| active.id.name())
    }
}

impl Default for HwPanel {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
