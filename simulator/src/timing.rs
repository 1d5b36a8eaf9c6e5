//! Timing constants for the simulator.
//!
//! These constants use `std::time::Duration` which is not available in
//! `no_std` environments, so they are defined here rather than in the
//! common crate.

use std::time::Duration;

/// Target frame time (~50 FPS). The main loop sleeps if a frame completes
/// early.
pub const FRAME_TIME: Duration = Duration::from_millis(20);

/// The same budget as an integer, fed to the host clock each frame.
pub const FRAME_TIME_MS: u32 = 20;
