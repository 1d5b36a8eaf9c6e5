//! Square sizing policy for adaptive widgets.
//!
//! Widgets that render circular content (knob arcs, button pads) must stay
//! square even when their container cell is rectangular. The policy decides,
//! from the container's computed box and declared style, what the square
//! dimensions are and whether the container itself has to be resized to
//! match.

use crate::host::{ElementId, Host};

/// Sizing mode for square widgets.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum SizeMode {
    /// Detect from the container's declared style.
    #[default]
    Auto,
    /// Don't modify the container; internal elements adapt to min(w, h).
    FitContent,
    /// Overwrite the container height to equal its width.
    SquareFromWidth,
    /// Overwrite the container width to equal its height.
    SquareFromHeight,
    /// Return dimensions as-is; the widget handles sizing itself.
    Custom,
}

/// Outcome of a policy computation.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct SizeResult {
    pub width: i32,
    pub height: i32,
    /// Caller must overwrite the container width.
    pub modify_width: bool,
    /// Caller must overwrite the container height.
    pub modify_height: bool,
    /// Whether the result is usable. False before the first layout pass.
    pub valid: bool,
}

impl SizeResult {
    const INVALID: Self = Self {
        width: 0,
        height: 0,
        modify_width: false,
        modify_height: false,
        valid: false,
    };
}

/// Size policy for widgets that keep a square aspect ratio.
///
/// Pure function of the container's current computed box and declared
/// style; no side effects.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct SquareSizePolicy {
    pub mode: SizeMode,
}

impl SquareSizePolicy {
    pub const fn new(mode: SizeMode) -> Self {
        Self { mode }
    }

    /// Compute the square size for `container` under the configured mode.
    pub fn compute(&self, host: &dyn Host, container: ElementId) -> SizeResult {
        let (w, h) = host.computed_size(container);

        let effective = if self.mode == SizeMode::Auto {
            detect_mode(host, container, w, h)
        } else {
            self.mode
        };

        match effective {
            SizeMode::SquareFromWidth => SizeResult {
                width: w,
                height: w,
                modify_width: false,
                modify_height: true,
                valid: w > 0,
            },
            SizeMode::SquareFromHeight => SizeResult {
                width: h,
                height: h,
                modify_width: true,
                modify_height: false,
                valid: h > 0,
            },
            SizeMode::FitContent => SizeResult {
                width: w,
                height: h,
                modify_width: false,
                modify_height: false,
                valid: w > 0 && h > 0,
            },
            SizeMode::Custom | SizeMode::Auto => SizeResult {
                width: w,
                height: h,
                modify_width: false,
                modify_height: false,
                valid: w > 0 || h > 0,
            },
        }
    }
}

/// Infer the effective mode from the container's declared style: a fixed
/// dimension paired with a content-sized one means the fixed side is
/// authoritative.
fn detect_mode(host: &dyn Host, container: ElementId, w: i32, h: i32) -> SizeMode {
    let (w_style, h_style) = host.declared_size(container);

    let w_is_content = w_style.is_content();
    let h_is_content = h_style.is_content();

    if h_is_content && !w_is_content && w > 0 {
        return SizeMode::SquareFromWidth;
    }
    if w_is_content && !h_is_content && h > 0 {
        return SizeMode::SquareFromHeight;
    }

    SizeMode::FitContent
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::scene::SceneHost;
    use crate::host::SizeSpec;

    fn stale_element() -> (SceneHost, ElementId) {
        let mut host = SceneHost::new();
        let el = host.create_element(None);
        (host, el)
    }

    #[test]
    fn test_invalid_before_first_layout() {
        let (host, el) = stale_element();
        let result = SquareSizePolicy::default().compute(&host, el);
        assert!(!result.valid);
    }

    #[test]
    fn test_fit_content_passes_dimensions_through() {
        let (mut host, el) = stale_element();
        host.set_size(el, 64, 48);
        let result = SquareSizePolicy::new(SizeMode::FitContent).compute(&host, el);
        assert_eq!(
            result,
            SizeResult {
                width: 64,
                height: 48,
                modify_width: false,
                modify_height: false,
                valid: true,
            }
        );
    }

    #[test]
    fn test_square_from_width() {
        let (mut host, el) = stale_element();
        host.set_size(el, 64, 10);
        let result = SquareSizePolicy::new(SizeMode::SquareFromWidth).compute(&host, el);
        assert_eq!((result.width, result.height), (64, 64));
        assert!(result.modify_height);
        assert!(!result.modify_width);
        assert!(result.valid);
    }

    #[test]
    fn test_square_from_height() {
        let (mut host, el) = stale_element();
        host.set_size(el, 10, 50);
        let result = SquareSizePolicy::new(SizeMode::SquareFromHeight).compute(&host, el);
        assert_eq!((result.width, result.height), (50, 50));
        assert!(result.modify_width);
        assert!(!result.modify_height);
    }

    #[test]
    fn test_auto_detects_square_from_width() {
        let (mut host, el) = stale_element();
        host.set_declared_size(el, SizeSpec::Px(64), SizeSpec::Content);
        let result = SquareSizePolicy::default().compute(&host, el);
        assert_eq!((result.width, result.height), (64, 64));
        assert!(result.modify_height);
    }

    #[test]
    fn test_auto_detects_square_from_height() {
        let (mut host, el) = stale_element();
        host.set_declared_size(el, SizeSpec::Content, SizeSpec::Px(40));
        let result = SquareSizePolicy::default().compute(&host, el);
        assert_eq!((result.width, result.height), (40, 40));
        assert!(result.modify_width);
    }

    #[test]
    fn test_auto_falls_back_to_fit_content() {
        let (mut host, el) = stale_element();
        host.set_declared_size(el, SizeSpec::Px(64), SizeSpec::Px(48));
        let result = SquareSizePolicy::default().compute(&host, el);
        assert_eq!((result.width, result.height), (64, 48));
        assert!(!result.modify_width && !result.modify_height);
    }

    #[test]
    fn test_custom_valid_with_one_dimension() {
        let (mut host, el) = stale_element();
        host.set_size(el, 64, 0);
        let result = SquareSizePolicy::new(SizeMode::Custom).compute(&host, el);
        assert!(result.valid);
        assert_eq!((result.width, result.height), (64, 0));
    }

    #[test]
    fn test_pre_layout_then_laid_out() {
        // Container resized from 0x0 (pre-layout) to 64x64.
        let (mut host, el) = stale_element();
        let policy = SquareSizePolicy::new(SizeMode::FitContent);
        assert!(!policy.compute(&host, el).valid);

        host.set_size(el, 64, 64);
        let result = policy.compute(&host, el);
        assert!(result.valid);
        assert_eq!((result.width, result.height), (64, 64));
    }
}
