//! Owner-side parameter components.
//!
//! Thin compositions that pair one widget with its caption label(s) and
//! split the component box between them on every resize. Each component
//! consumes a small contiguous range of widget tokens starting at the one
//! it is constructed with — callers must space component base tokens by at
//! least [`TOKEN_STRIDE`].

mod parameter_enum;
mod parameter_knob;
mod parameter_switch;

pub use parameter_enum::ParameterEnum;
pub use parameter_knob::ParameterKnob;
pub use parameter_switch::ParameterSwitch;

/// Token distance to leave between two components (or between a component
/// and any other widget).
pub const TOKEN_STRIDE: u32 = 8;
