//! Hardware panel layout constants.
//!
//! # Optimization: Pre-computed Layout Constants
//!
//! Every control position is derived at compile time from physical
//! measurements of the real controller (millimeters) and the fixed screen
//! resolution, so the drawing code never recomputes positions per frame.

// =============================================================================
// Base Reference Values (from real hardware measurements)
// =============================================================================

/// Physical panel edge length in millimeters.
pub const PANEL_MM: f32 = 190.0;

/// Screen share of the panel width (measured).
pub const SCREEN_WIDTH_RATIO: f32 = 0.315789;

/// Display resolution of the built-in screen.
pub const SCREEN_W: i32 = 320;
pub const SCREEN_H: i32 = 240;

// =============================================================================
// Derived Panel Size & Scale
// =============================================================================

/// Panel edge in pixels, derived from the screen size and ratio (~1013).
pub const PANEL_SIZE: i32 = (SCREEN_W as f32 / SCREEN_WIDTH_RATIO) as i32;

/// Pixels per millimeter (~5.33).
pub const PX_PER_MM: f32 = PANEL_SIZE as f32 / PANEL_MM;

// =============================================================================
// Component Sizes (physical diameters in mm)
// =============================================================================

pub const BTN_SIZE_MM: f32 = 6.0;
pub const NAV_SIZE_MM: f32 = 4.0;
pub const OPT_SIZE_MM: f32 = 12.75;
pub const MACRO_SIZE_MM: f32 = 7.3;

pub const BTN_RADIUS: i32 = (BTN_SIZE_MM * PX_PER_MM) as i32;
pub const NAV_RADIUS: i32 = (NAV_SIZE_MM * PX_PER_MM) as i32;
pub const OPT_RADIUS: i32 = (OPT_SIZE_MM * PX_PER_MM) as i32;
pub const MACRO_RADIUS: i32 = (MACRO_SIZE_MM * PX_PER_MM) as i32;

// =============================================================================
// Position Ratios (measured from real hardware layout)
// =============================================================================

/// Screen top edge from panel top.
pub const SCREEN_TOP_RATIO: f32 = 0.079;

/// Horizontal gaps between the screen edge and the control columns (mm).
pub const LEFT_GAP_MM: f32 = 30.0;
pub const RIGHT_GAP_MM: f32 = 18.8;

/// Bottom button row, as a ratio of the panel height.
pub const BOTTOM_BTN_Y_RATIO: f32 = 0.395;

/// Macro encoder grid.
pub const MACRO_START_Y_RATIO: f32 = 0.612;
pub const MACRO_SPACING_X_RATIO: f32 = 0.219;
pub const MACRO_SPACING_Y_RATIO: f32 = 0.197;

// =============================================================================
// Derived Positions
// =============================================================================

/// Screen position (centered horizontally).
pub const SCREEN_X: i32 = (PANEL_SIZE - SCREEN_W) / 2;
pub const SCREEN_Y: i32 = (PANEL_SIZE as f32 * SCREEN_TOP_RATIO) as i32;

/// Left buttons column, bounding box aligned with the screen top/bottom.
pub const LEFT_BTN_X: i32 = SCREEN_X - (LEFT_GAP_MM * PX_PER_MM) as i32;
pub const LEFT_BTN_Y_TOP: i32 = SCREEN_Y + BTN_RADIUS;
pub const LEFT_BTN_Y_CENTER: i32 = SCREEN_Y + SCREEN_H / 2;
pub const LEFT_BTN_Y_BOTTOM: i32 = SCREEN_Y + SCREEN_H - BTN_RADIUS;

/// Right controls, bounding box aligned with the screen top/bottom.
pub const RIGHT_X: i32 = SCREEN_X + SCREEN_W + (RIGHT_GAP_MM * PX_PER_MM) as i32 + OPT_RADIUS;
pub const NAV_Y: i32 = SCREEN_Y + NAV_RADIUS;
pub const OPT_Y: i32 = SCREEN_Y + SCREEN_H - OPT_RADIUS;

/// Bottom buttons, bounding box aligned with the screen left/right.
pub const BOTTOM_BTN_Y: i32 = (PANEL_SIZE as f32 * BOTTOM_BTN_Y_RATIO) as i32;
pub const BOTTOM_BTN_X_LEFT: i32 = SCREEN_X + BTN_RADIUS;
pub const BOTTOM_BTN_X_CENTER: i32 = SCREEN_X + SCREEN_W / 2;
pub const BOTTOM_BTN_X_RIGHT: i32 = SCREEN_X + SCREEN_W - BTN_RADIUS;

/// Macro encoders (4x2 grid), centered horizontally.
pub const MACRO_SPACING_X: i32 = (PANEL_SIZE as f32 * MACRO_SPACING_X_RATIO) as i32;
pub const MACRO_SPACING_Y: i32 = (PANEL_SIZE as f32 * MACRO_SPACING_Y_RATIO) as i32;
pub const MACRO_START_X: i32 = (PANEL_SIZE - 3 * MACRO_SPACING_X) / 2;
pub const MACRO_START_Y: i32 = (PANEL_SIZE as f32 * MACRO_START_Y_RATIO) as i32;

// =============================================================================
// Unit Tests
// =============================================================================
