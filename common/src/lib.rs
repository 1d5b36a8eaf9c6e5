//! Widget toolkit core for the synth panel UI.
//!
//! This crate contains everything that is independent of a concrete
//! rendering backend and can therefore be tested on the host machine:
//!
//! - [`host`]: the abstract retained-toolkit contract and the reference
//!   [`host::scene::SceneHost`] implementation (element arena, one-shot
//!   timers, value animations, notification queue)
//! - [`widget`]: the adaptive widgets — knob, button, enum selector,
//!   labels, state indicator — and the virtual-scroll list
//! - [`component`]: widget + caption compositions used by screens
//! - [`theme`]: color, layout, and animation constant tables
//! - [`diag`]: bounded event log for on-screen diagnostics
//!
//! # Testing
//!
//! Run tests on host with:
//! ```bash
//! cargo test -p panel-common
//! ```
//!
//! Tests run with `std` enabled (via `cfg_attr`), allowing use of the
//! standard test framework while deployments stay `no_std`.

// Use no_std only when NOT testing (tests need std for the test harness)
#![cfg_attr(not(test), no_std)]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

pub mod component;
pub mod diag;
pub mod host;
pub mod theme;
pub mod widget;

// Re-export commonly used items
pub use host::scene::SceneHost;
pub use host::{ElementId, EventKind, Host, UiEvent, WidgetRef};
