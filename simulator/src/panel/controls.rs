//! Hardware panel controls: buttons and encoders.
//!
//! Procedural vector rendering plus circular hit-testing for mouse input.
//! Coordinates are panel-absolute device pixels.

use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Arc, Circle, PrimitiveStyle};

/// Identity of a physical control.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ControlId {
    // Buttons
    LeftTop,
    LeftCenter,
    LeftBottom,
    BottomLeft,
    BottomCenter,
    BottomRight,
    NavBtn,
    MacroBtn(u8),
    // Encoders
    NavEnc,
    OptEnc,
    MacroEnc(u8),
}

impl ControlId {
    pub const fn name(self) -> &'static str {
        match self {
            Self::LeftTop => "LEFT_TOP",
            Self::LeftCenter => "LEFT_CENTER",
            Self::LeftBottom => "LEFT_BOTTOM",
            Self::BottomLeft => "BOTTOM_LEFT",
            Self::BottomCenter => "BOTTOM_CENTER",
            Self::BottomRight => "BOTTOM_RIGHT",
            Self::NavBtn => "NAV_BTN",
            Self::MacroBtn(n) => match n {
                0 => "MACRO_BTN_1",
                1 => "MACRO_BTN_2",
                2 => "MACRO_BTN_3",
                3 => "MACRO_BTN_4",
                4 => "MACRO_BTN_5",
                5 => "MACRO_BTN_6",
                6 => "MACRO_BTN_7",
                _ => "MACRO_BTN_8",
            },
            Self::NavEnc => "NAV_ENC",
            Self::OptEnc => "OPT_ENC",
            Self::MacroEnc(n) => match n {
                0 => "MACRO_ENC_1",
                1 => "MACRO_ENC_2",
                2 => "MACRO_ENC_3",
                3 => "MACRO_ENC_4",
                4 => "MACRO_ENC_5",
                5 => "MACRO_ENC_6",
                6 => "MACRO_ENC_7",
                _ => "MACRO_ENC_8",
            },
        }
    }
}

/// Scale all channels of a color by `factor` (pressed/darkened looks).
pub fn dim(color: Rgb888, factor: f32) -> Rgb888 {
    Rgb888::new(
        (color.r() as f32 * factor) as u8,
        (color.g() as f32 * factor) as u8,
        (color.b() as f32 * factor) as u8,
    )
}

fn circle_hit(cx: i32, cy: i32, radius: i32, p: Point) -> bool {
    let dx = p.x - cx;
    let dy = p.y - cy;
    dx * dx + dy * dy <= radius * radius
}

// =============================================================================
// PanelButton
// =============================================================================

/// Simple circular momentary button.
pub struct PanelButton {
    pub id: ControlId,
    pub x: i32,
    pub y: i32,
    pub radius: i32,
    pub color: Rgb888,
    pub pressed: bool,
}

impl PanelButton {
    pub const fn new(id: ControlId, x: i32, y: i32, radius: i32, color: Rgb888) -> Self {
        Self {
            id,
            x,
            y,
            radius,
            color,
            pressed: false,
        }
    }

    pub fn hit_test(&self, p: Point) -> bool {
        circle_hit(self.x, self.y, self.radius, p)
    }

    pub fn render<D>(&self, display: &mut D)
    where
        D: DrawTarget<Color = Rgb888>,
    {
        let color = if self.pressed {
            dim(self.color, 0.7)
        } else {
            self.color
        };

        Circle::with_center(Point::new(self.x, self.y), (self.radius * 2) as u32)
            .into_styled(PrimitiveStyle::with_fill(color))
            .draw(display)
            .ok();
        // Subtle dark outline.
        Circle::with_center(Point::new(self.x, self.y), (self.radius * 2 + 2) as u32)
            .into_styled(PrimitiveStyle::with_stroke(Rgb888::new(40, 40, 40), 1))
            .draw(display)
            .ok();
    }
}

// =============================================================================
// PanelEncoder
// =============================================================================

/// Rotary encoder with an optional center push button.
///
/// Absolute encoders track a [0, 1] value shown as an arc; relative
/// encoders only report deltas and draw no arc.
pub struct PanelEncoder {
    pub enc_id: ControlId,
    pub btn_id: Option<ControlId>,
    pub x: i32,
    pub y: i32,
    pub radius: i32,
    pub color: Rgb888,
    pub value: f32,
    pub relative: bool,
    pub pressed: bool,
    pub dragging: bool,
    pub drag_start_y: i32,
}

impl PanelEncoder {
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        enc_id: ControlId,
        btn_id: Option<ControlId>,
        x: i32,
        y: i32,
        radius: i32,
        color: Rgb888,
        value: f32,
        relative: bool,
    ) -> Self {
        Self {
            enc_id,
            btn_id,
            x,
            y,
            radius,
            color,
            value,
            relative,
            pressed: false,
            dragging: false,
            drag_start_y: 0,
        }
    }

    pub fn hit_test(&self, p: Point) -> bool {
        circle_hit(self.x, self.y, self.radius, p)
    }

    /// The center push button occupies the inner third of the knob.
    pub fn center_hit_test(&self, p: Point) -> bool {
        self.btn_id.is_some() && circle_hit(self.x, self.y, self.radius / 3, p)
    }

    pub fn render<D>(&self, display: &mut D)
    where
        D: DrawTarget<Color = Rgb888>,
    {
        let center = Point::new(self.x, self.y);

        // Background disc, well darkened.
        Circle::with_center(center, (self.radius * 2) as u32)
            .into_styled(PrimitiveStyle::with_fill(dim(self.color, 0.25)))
            .draw(display)
            .ok();

        // Value arc from 7 o'clock to the current value.
        if !self.relative {
            let sweep = self.value.clamp(0.0, 1.0) * 270.0;
            if sweep > 0.5 {
                let thickness = 8u32;
                let diameter = (self.radius * 2) as u32 - thickness;
                Arc::with_center(
                    center,
                    diameter,
                    Angle::from_degrees(135.0),
                    Angle::from_degrees(sweep),
                )
                .into_styled(PrimitiveStyle::with_stroke(self.color, thickness))
                .draw(display)
                .ok();
            }
        }

        // Center button, darkened while pressed.
        if self.btn_id.is_some() {
            let center_color = if self.pressed {
                dim(self.color, 0.5)
            } else {
                self.color
            };
            Circle::with_center(center, (self.radius * 2 / 3) as u32)
                .into_styled(PrimitiveStyle::with_fill(center_color))
                .draw(display)
                .ok();
        }

        // Outer ring.
        Circle::with_center(center, (self.radius * 2) as u32)
            .into_styled(PrimitiveStyle::with_stroke(Rgb888::new(60, 60, 60), 1))
            .draw(display)
            .ok();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_hit_test_circle() {
        let btn = PanelButton::new(ControlId::LeftTop, 100, 100, 30, Rgb888::new(0xE5, 0x39, 0x35));
        assert!(btn.hit_test(Point::new(100, 100)));
        assert!(btn.hit_test(Point::new(129, 100)));
        assert!(!btn.hit_test(Point::new(131, 100)));
        // Corner of the bounding square is outside the circle.
        assert!(!btn.hit_test(Point::new(122, 122)));
    }

    #[test]
    fn test_encoder_center_hit_requires_button() {
        let with_btn = PanelEncoder::new(
            ControlId::NavEnc,
            Some(ControlId::NavBtn),
            100,
            100,
            30,
            Rgb888::new(0x1E, 0x88, 0xE5),
            0.5,
            false,
        );
        assert!(with_btn.center_hit_test(Point::new(102, 102)));
        assert!(!with_btn.center_hit_test(Point::new(100, 115)));

        let without_btn = PanelEncoder::new(
            ControlId::OptEnc,
            None,
            100,
            100,
            30,
            Rgb888::new(0xAD, 0x14, 0x57),
            0.0,
            true,
        );
        assert!(!without_btn.center_hit_test(Point::new(100, 100)));
    }

    #[test]
    fn test_control_names() {
        assert_eq!(ControlId::MacroEnc(0).name(), "MACRO_ENC_1");
        assert_eq!(ControlId::MacroBtn(7).name(), "MACRO_BTN_8");
        assert_eq!(ControlId::NavEnc.name(), "NAV_ENC");
    }

    #[test]
    fn test_dim_scales_channels() {
        let c = dim(Rgb888::new(200, 100, 40), 0.5);
        assert_eq!((c.r(), c.g(), c.b()), (100, 50, 20));
    }
}
