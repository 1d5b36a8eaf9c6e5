//! LED-style state indicator.
//!
//! A small circle with three states and per-state color/opacity overrides
//! falling back to theme defaults.

use embedded_graphics::pixelcolor::Rgb888;

use crate::host::{ElementId, Host, RADIUS_CIRCLE};
use crate::theme::{color, opacity};

/// Indicator states, in escalation order.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum IndicatorState {
    #[default]
    Off,
    Active,
    Pressed,
}

impl IndicatorState {
    const fn index(self) -> usize {
        match self {
            Self::Off => 0,
            Self::Active => 1,
            Self::Pressed => 2,
        }
    }
}

const DEFAULT_COLORS: [Rgb888; 3] = [
    color::INACTIVE,
    color::STATUS_WARNING,
    color::STATUS_SUCCESS,
];

const DEFAULT_OPACITIES: [u8; 3] = [opacity::OPA_60, opacity::OPA_80, opacity::OPA_FULL];

pub struct StateIndicator {
    led: ElementId,
    state: IndicatorState,
    colors: [Option<Rgb888>; 3],
    opacities: [Option<u8>; 3],
}

impl StateIndicator {
    pub fn new(host: &mut dyn Host, parent: ElementId, size: i32) -> Self {
        let led = host.create_element(Some(parent));
        host.set_size(led, size, size);
        host.set_corner_radius(led, RADIUS_CIRCLE);

        let indicator = Self {
            led,
            state: IndicatorState::Off,
            colors: [None; 3],
            opacities: [None; 3],
        };
        indicator.apply_state(host);
        indicator
    }

    pub fn set_state(&mut self, host: &mut dyn Host, state: IndicatorState) {
        if self.state == state {
            return;
        }
        self.state = state;
        self.apply_state(host);
    }

    pub const fn state(&self) -> IndicatorState {
        self.state
    }

    /// Override the color for one state; restyles immediately if that
    /// state is showing.
    pub fn color(&mut self, host: &mut dyn Host, state: IndicatorState, color: Rgb888) -> &mut Self {
        self.colors[state.index()] = Some(color);
        if self.state == state {
            self.apply_state(host);
        }
        self
    }

    pub fn opacity(&mut self, host: &mut dyn Host, state: IndicatorState, opacity: u8) -> &mut Self {
        self.opacities[state.index()] = Some(opacity);
        if self.state == state {
            self.apply_state(host);
        }
        self
    }

    pub const fn element(&self) -> ElementId {
        self.led
    }

    pub fn destroy(&mut self, host: &mut dyn Host) {
        host.delete_element(self.led);
    }

    fn apply_state(&self, host: &mut dyn Host) {
        let idx = self.state.index();
        let color = self.colors[idx].unwrap_or(DEFAULT_COLORS[idx]);
        let opacity = self.opacities[idx].unwrap_or(DEFAULT_OPACITIES[idx]);
        host.set_bg_color(self.led, color);
        host.set_bg_opacity(self.led, opacity);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
