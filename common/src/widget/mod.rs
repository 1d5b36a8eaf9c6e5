//! Adaptive parameter widgets.
//!
//! All widgets follow the same reactive protocol: construction creates the
//! backing elements and schedules a deferred first geometry pass; size
//! -change notifications re-run the shared square-geometry recalculation;
//! value mutations re-project independently of geometry. See
//! [`geometry`](crate::widget::geometry) for the shared sizing strategy.

pub mod arc_model;
pub mod button;
pub mod enum_select;
pub mod flash;
pub mod geometry;
pub mod knob;
pub mod label;
pub mod scroll_label;
pub mod size_policy;
pub mod state_indicator;
pub mod virtual_list;
