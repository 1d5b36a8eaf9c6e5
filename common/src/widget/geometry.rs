//! Shared square-geometry strategy for adaptive widgets.
//!
//! Knob, button, and enum widgets all follow the same recalculation
//! protocol: run the size policy, apply any container overwrite it asks
//! for, clamp the square to a minimum floor, snap it to an even integer,
//! and scale every sub-element from that one authoritative side length.
//! The per-widget part is only the ratio table; the protocol lives here.

use crate::host::{ElementId, Host};
use crate::widget::size_policy::SquareSizePolicy;

/// Snap a dimension down to an even integer so that halving it for
/// centering never introduces a 1-unit asymmetry.
pub const fn snap_even(v: i32) -> i32 {
    v & !1
}

/// Resolved geometry for one recalculation pass.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct SquareBox {
    /// Authoritative square side, floored and even-snapped.
    pub size: i32,
    /// Container width after any policy overwrite.
    pub width: i32,
    /// Container height after any policy overwrite.
    pub height: i32,
}

impl SquareBox {
    /// Scale a sub-element dimension from the square, even-snapped.
    pub fn scaled(&self, ratio: f32) -> i32 {
        snap_even((self.size as f32 * ratio) as i32)
    }

    pub const fn center_x(&self) -> i32 {
        self.width / 2
    }

    pub const fn center_y(&self) -> i32 {
        self.height / 2
    }
}

/// Square-geometry strategy: policy plus a minimum floor that keeps
/// degenerate tiny layouts usable.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct SquareGeometry {
    pub policy: SquareSizePolicy,
    pub min_size: i32,
}

impl SquareGeometry {
    pub const fn new(policy: SquareSizePolicy, min_size: i32) -> Self {
        Self { policy, min_size }
    }

    /// Run one recalculation pass for `container`.
    ///
    /// Returns `None` when the container is not yet laid out (silent skip,
    /// retried on the next size-change notification). Applying a container
    /// overwrite may re-fire the size-change notification; the second pass
    /// resolves to the same square, so re-entry is idempotent.
    pub fn resolve(&self, host: &mut dyn Host, container: ElementId) -> Option<SquareBox> {
        let result = self.policy.compute(host, container);
        if !result.valid {
            return None;
        }

        if result.modify_width {
            host.set_width(container, result.width);
        }
        if result.modify_height {
            host.set_height(container, result.height);
        }

        let side = result.width.min(result.height).max(self.min_size);
        let size = snap_even(side);
        if size <= 0 {
            return None;
        }

        Some(SquareBox {
            size,
            width: result.width,
            height: result.height,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::scene::SceneHost;
    use crate::widget::size_policy::SizeMode;

    fn geometry() -> SquareGeometry {
        SquareGeometry::new(SquareSizePolicy::new(SizeMode::FitContent), 24)
    }

    #[test]
    fn test_snap_even() {
        assert_eq!(snap_even(64), 64);
        assert_eq!(snap_even(63), 62);
        assert_eq!(snap_even(1), 0);
        assert_eq!(snap_even(0), 0);
    }

    #[test]
    fn test_resolve_skips_before_layout() {
        let mut host = SceneHost::new();
        let el = host.create_element(None);
        assert_eq!(geometry().resolve(&mut host, el), None);
    }

    #[test]
    fn test_resolve_uses_min_dimension() {
        let mut host = SceneHost::new();
        let el = host.create_element(None);
        host.set_size(el, 80, 64);
        let sq = geometry().resolve(&mut host, el).unwrap();
        assert_eq!(sq.size, 64);
        assert_eq!((sq.center_x(), sq.center_y()), (40, 32));
    }

    #[test]
    fn test_resolve_snaps_odd_sizes_even() {
        let mut host = SceneHost::new();
        let el = host.create_element(None);
        host.set_size(el, 63, 63);
        let sq = geometry().resolve(&mut host, el).unwrap();
        assert_eq!(sq.size, 62);
        // Center of the square grid is an exact integer.
        assert_eq!(sq.size % 2, 0);
    }

    #[test]
    fn test_resolve_enforces_floor() {
        let mut host = SceneHost::new();
        let el = host.create_element(None);
        host.set_size(el, 10, 10);
        let sq = geometry().resolve(&mut host, el).unwrap();
        assert_eq!(sq.size, 24);
    }

    #[test]
    fn test_resolve_applies_container_overwrite() {
        let mut host = SceneHost::new();
        let el = host.create_element(None);
        host.set_size(el, 64, 10);
        let g = SquareGeometry::new(SquareSizePolicy::new(SizeMode::SquareFromWidth), 24);
        let sq = g.resolve(&mut host, el).unwrap();
        assert_eq!(sq.size, 64);
        assert_eq!(host.computed_size(el), (64, 64));
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let mut host = SceneHost::new();
        let el = host.create_element(None);
        host.set_size(el, 77, 51);
        let g = geometry();
        let first = g.resolve(&mut host, el).unwrap();
        let second = g.resolve(&mut host, el).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.scaled(0.13), second.scaled(0.13));
    }

    #[test]
    fn test_scaled_sub_elements_are_even() {
        let mut host = SceneHost::new();
        let el = host.create_element(None);
        host.set_size(el, 64, 64);
        let sq = geometry().resolve(&mut host, el).unwrap();
        for ratio in [0.10, 0.13, 0.23, 0.60] {
            assert_eq!(sq.scaled(ratio) % 2, 0);
        }
    }
}
