//! Enum selector widget.
//!
//! A thin indicator line over an owner-filled content area (typically the
//! current enum value's label). The widget itself only owns the line, the
//! content box, and the flash-on-change behavior; which value is shown is
//! entirely the owner's business.

use embedded_graphics::pixelcolor::Rgb888;

use crate::host::{
    DeferredTask,
    ElementId,
    EventKind,
    Host,
    TaskTag,
    TimerId,
    WidgetRef,
};
use crate::theme::color;
use crate::widget::flash::FlashAnimator;
use crate::widget::geometry::{snap_even, SquareGeometry};
use crate::widget::size_policy::{SizeMode, SquareSizePolicy};

const MIN_SIZE: i32 = 24;
const LINE_HEIGHT: i32 = 2;
const LINE_MARGIN: i32 = 4;
const LINE_TOP_MARGIN: i32 = 2;
const LINE_BOTTOM_MARGIN: i32 = 2;
const INNER_HEIGHT: i32 = 40;

/// Enum value selector: indicator line + content area.
pub struct EnumWidget {
    me: WidgetRef,
    container: ElementId,
    inner: ElementId,
    top_line: ElementId,
    content: ElementId,

    flash: FlashAnimator,
    geometry: SquareGeometry,
    init_timer: Option<TimerId>,

    bg_color: Option<Rgb888>,
    line_color: Option<Rgb888>,
    flash_color: Option<Rgb888>,
}

impl EnumWidget {
    pub fn new(host: &mut dyn Host, parent: ElementId, me: WidgetRef) -> Self {
        let container = host.create_element(Some(parent));

        // Inner area: line on top, owner content below, centered as a unit.
        let inner = host.create_element(Some(container));
        host.center_in_parent(inner);

        let top_line = host.create_element(Some(inner));
        let content = host.create_element(Some(inner));

        host.subscribe_size_changed(container, me);
        let init_timer = host.schedule_one_shot(
            0,
            DeferredTask {
                widget: me,
                tag: TaskTag::InitGeometry,
            },
        );

        let widget = Self {
            me,
            container,
            inner,
            top_line,
            content,
            flash: FlashAnimator::new(),
            geometry: SquareGeometry::new(SquareSizePolicy::default(), MIN_SIZE),
            init_timer: Some(init_timer),
            bg_color: None,
            line_color: None,
            flash_color: None,
        };
        widget.apply_colors(host);
        widget
    }

    pub fn handle_event(&mut self, host: &mut dyn Host, kind: &EventKind) {
        match kind {
            EventKind::SizeChanged { .. } => self.update_geometry(host),
            EventKind::Timer(TaskTag::InitGeometry) => {
                self.init_timer = None;
                self.update_geometry(host);
            }
            EventKind::Timer(TaskTag::FlashRevert) => {
                self.flash.on_revert();
                host.set_bg_color(self.top_line, self.line_color.unwrap_or(color::INACTIVE));
            }
            _ => {}
        }
    }

    /// Pulse the indicator line; the owner calls this when the selected
    /// value changes.
    pub fn trigger_flash(&mut self, host: &mut dyn Host) {
        if self.flash.trigger(host, self.me) {
            host.set_bg_color(self.top_line, self.flash_color.unwrap_or(color::ACTIVE));
        }
    }

    // --- fluent configuration ------------------------------------------------------

    pub fn size_mode(&mut self, host: &mut dyn Host, mode: SizeMode) -> &mut Self {
        self.geometry.policy.mode = mode;
        self.update_geometry(host);
        self
    }

    pub fn bg_color(&mut self, host: &mut dyn Host, color: Rgb888) -> &mut Self {
        self.bg_color = Some(color);
        self.apply_colors(host);
        self
    }

    pub fn line_color(&mut self, host: &mut dyn Host, color: Rgb888) -> &mut Self {
        self.line_color = Some(color);
        self.apply_colors(host);
        self
    }

    pub fn flash_color(&mut self, color: Rgb888) -> &mut Self {
        self.flash_color = Some(color);
        self
    }

    // --- element access -------------------------------------------------------------

    pub const fn element(&self) -> ElementId {
        self.container
    }

    /// Content area below the indicator line; the owner parents its value
    /// label (or anything else) here.
    pub const fn content(&self) -> ElementId {
        self.content
    }

    pub const fn line_element(&self) -> ElementId {
        self.top_line
    }

    // --- teardown ----------------------------------------------------------------------

    pub fn destroy(&mut self, host: &mut dyn Host) {
        self.flash.cancel(host);
        if let Some(timer) = self.init_timer.take() {
            host.cancel_one_shot(timer);
        }
        host.delete_element(self.container);
    }

    // --- internals ---------------------------------------------------------------------

    fn apply_colors(&self, host: &mut dyn Host) {
        if let Some(bg) = self.bg_color {
            host.set_bg_color(self.container, bg);
        }
        host.set_bg_color(self.top_line, self.line_color.unwrap_or(color::INACTIVE));
    }

    fn update_geometry(&mut self, host: &mut dyn Host) {
        let Some(square) = self.geometry.resolve(host, self.container) else {
            return;
        };

        // Line spans the square minus margins, even-snapped so the inner
        // block centers without a one-pixel bias.
        let line_width = snap_even(square.size - 2 * LINE_MARGIN);
        if line_width <= 0 {
            return;
        }

        host.set_size(self.inner, line_width, INNER_HEIGHT);
        host.center_in_parent(self.inner);

        host.set_size(self.top_line, line_width, LINE_HEIGHT);
        host.set_pos(self.top_line, 0, LINE_TOP_MARGIN);

        let content_top = LINE_TOP_MARGIN + LINE_HEIGHT + LINE_BOTTOM_MARGIN;
        host.set_size(self.content, line_width, INNER_HEIGHT - content_top);
        host.set_pos(self.content, 0, content_top);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::scene::SceneHost;
    use crate::theme::animation::FLASH_DURATION_MS;

    const ENUM: WidgetRef = WidgetRef(4);

    fn setup() -> (SceneHost, EnumWidget) {
        let mut host = SceneHost::new();
        let screen = host.create_element(None);
        let widget = EnumWidget::new(&mut host, screen, ENUM);
        (host, widget)
    }

    fn pump(host: &mut SceneHost, widget: &mut EnumWidget) {
        while let Some(event) = host.pop_event() {
            if event.target == ENUM {
                widget.handle_event(host, &event.kind);
            }
        }
    }

    #[test]
    fn test_line_spans_square_minus_margins() {
        let (mut host, mut widget) = setup();
        host.set_size(widget.element(), 64, 64);
        pump(&mut host, &mut widget);

        assert_eq!(host.computed_size(widget.line_element()), (56, LINE_HEIGHT));
        let (content_w, content_h) = host.computed_size(widget.content());
        assert_eq!(content_w, 56);
        assert!(content_h > 0);
    }

    #[test]
    fn test_rect_container_uses_min_side() {
        let (mut host, mut widget) = setup();
        host.set_size(widget.element(), 100, 64);
        pump(&mut host, &mut widget);
        assert_eq!(host.computed_size(widget.line_element()).0, 56);
    }

    #[test]
    fn test_flash_applies_and_reverts_line_color() {
        let (mut host, mut widget) = setup();
        host.set_size(widget.element(), 64, 64);
        host.tick(1);
        pump(&mut host, &mut widget);

        widget.line_color(&mut host, color::KNOB_TRACK);
        widget.trigger_flash(&mut host);
        let (flash_bg, _, _) = host.bg(widget.line_element()).unwrap();
        assert_eq!(flash_bg, color::ACTIVE);

        host.tick(FLASH_DURATION_MS);
        pump(&mut host, &mut widget);
        let (base_bg, _, _) = host.bg(widget.line_element()).unwrap();
        assert_eq!(base_bg, color::KNOB_TRACK);
    }

    #[test]
    fn test_pre_layout_is_skipped() {
        let (mut host, mut widget) = setup();
        host.tick(1);
        pump(&mut host, &mut widget);
        assert_eq!(host.computed_size(widget.line_element()), (0, 0));
    }
}
