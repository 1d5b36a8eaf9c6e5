//! Rotary knob widget with arc visualization.
//!
//! Displays a normalized parameter value as a circular arc with a radial
//! indicator line. Supports normal and centered (bipolar) modes, plus an
//! optional second "ribbon" arc tracking an auxiliary value. All internal
//! geometry scales from one authoritative square size (see
//! [`crate::widget::geometry`]).

use embedded_graphics::geometry::Point;
use embedded_graphics::pixelcolor::Rgb888;
#[allow(unused_imports)]
use micromath::F32Ext;

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
use crate::widget::arc_model::{
    self,
    VALUE_EPSILON,
    START_ANGLE_DEG,
    SWEEP_DEG,
};
use crate::widget::flash::FlashAnimator;
use crate::widget::geometry::SquareGeometry;
use crate::widget::size_policy::{SizeMode, SquareSizePolicy};

const MIN_SIZE: i32 = 24;
const ARC_WIDTH_RATIO: f32 = 0.13;
const INDICATOR_RATIO: f32 = 0.13;
const CENTER_CIRCLE_RATIO: f32 = 0.23;
const INNER_CIRCLE_RATIO: f32 = 0.10;

/// Rotary knob widget.
pub struct KnobWidget {
    me: WidgetRef,
    container: ElementId,
    arc: ElementId,
    indicator: ElementId,
    center_circle: ElementId,
    inner_circle: ElementId,
    ribbon_arc: Option<ElementId>,

    flash: FlashAnimator,
    geometry: SquareGeometry,
    init_timer: Option<TimerId>,

    bg_color: Option<Rgb888>,
    track_color: Option<Rgb888>,
    value_color: Option<Rgb888>,
    flash_color: Option<Rgb888>,
    ribbon_color: Option<Rgb888>,

    value: f32,
    origin: f32,
    centered: bool,
    ribbon_value: f32,
    ribbon_enabled: bool,

    // Cached geometry
    knob_size: i32,
    center: Point,
    radius: i32,
}

impl KnobWidget {
    pub fn new(host: &mut dyn Host, parent: ElementId, me: WidgetRef) -> Self {
        let container = host.create_element(Some(parent));

        let arc = host.create_arc(container);
        host.set_arc_bg_angles(arc, START_ANGLE_DEG, START_ANGLE_DEG + SWEEP_DEG);
        host.center_in_parent(arc);

        let indicator = host.create_line(container);

        let center_circle = host.create_element(Some(container));
        host.set_corner_radius(center_circle, crate::host::RADIUS_CIRCLE);
        host.center_in_parent(center_circle);

        let inner_circle = host.create_element(Some(container));
        host.set_corner_radius(inner_circle, crate::host::RADIUS_CIRCLE);
        host.set_bg_color(inner_circle, color::INACTIVE);
        host.center_in_parent(inner_circle);

        // Listen for size changes to recalculate geometry, and defer the
        // initial pass to the next tick when the layout has real sizes.
        host.subscribe_size_changed(container, me);
        let init_timer = host.schedule_one_shot(
            0,
            DeferredTask {
                widget: me,
                tag: TaskTag::InitGeometry,
            },
        );

        let knob = Self {
            me,
            container,
            arc,
            indicator,
            center_circle,
            inner_circle,
            ribbon_arc: None,
            flash: FlashAnimator::new(),
            geometry: SquareGeometry::new(SquareSizePolicy::default(), MIN_SIZE),
            init_timer: Some(init_timer),
            bg_color: None,
            track_color: None,
            value_color: None,
            flash_color: None,
            ribbon_color: None,
            value: 0.0,
            origin: 0.0,
            centered: false,
            ribbon_value: 0.0,
            ribbon_enabled: false,
            knob_size: 0,
            center: Point::zero(),
            radius: 0,
        };
        knob.apply_colors(host);
        knob
    }

    // --- event entry points ---------------------------------------------------

    pub fn handle_event(&mut self, host: &mut dyn Host, kind: &EventKind) {
        match kind {
            EventKind::SizeChanged { .. } => self.update_geometry(host),
            EventKind::Timer(TaskTag::InitGeometry) => {
                self.init_timer = None;
                self.update_geometry(host);
            }
            EventKind::Timer(TaskTag::FlashRevert) => {
                self.flash.on_revert();
                host.set_bg_color(self.inner_circle, self.bg_color.unwrap_or(color::INACTIVE));
            }
            _ => {}
        }
    }

    // --- data -------------------------------------------------------------------

    /// Set the normalized value. Clamped to [0, 1]; changes smaller than
    /// the epsilon are ignored entirely (no recompute, no flash).
    pub fn set_value(&mut self, host: &mut dyn Host, value: f32) {
        let clamped = value.clamp(0.0, 1.0);
        if (self.value - clamped).abs() < VALUE_EPSILON {
            return;
        }

        self.value = clamped;
        self.update_arc(host);
        if self.flash.trigger(host, self.me) {
            host.set_bg_color(self.inner_circle, self.flash_color.unwrap_or(color::ACTIVE));
        }
    }

    pub const fn value(&self) -> f32 {
        self.value
    }

    /// Whether the knob is in bipolar (center-origin) mode.
    pub const fn is_centered(&self) -> bool {
        self.centered
    }

    /// Set the ribbon (secondary) value, lazily materializing the ribbon
    /// arc on first use.
    pub fn set_ribbon_value(&mut self, host: &mut dyn Host, value: f32) {
        let clamped = value.clamp(0.0, 1.0);
        if self.ribbon_arc.is_some() && (self.ribbon_value - clamped).abs() < VALUE_EPSILON {
            return;
        }
        self.ribbon_value = clamped;
        self.ensure_ribbon(host);
        self.update_arc(host);
    }

    pub const fn ribbon_value(&self) -> f32 {
        self.ribbon_value
    }

    /// Show or hide the ribbon arc, lazily materializing it on first use.
    pub fn set_ribbon_enabled(&mut self, host: &mut dyn Host, enabled: bool) {
        self.ribbon_enabled = enabled;
        if enabled {
            self.ensure_ribbon(host);
        }
        if let Some(ribbon) = self.ribbon_arc {
            host.set_hidden(ribbon, !enabled);
        }
    }

    pub fn set_visible(&mut self, host: &mut dyn Host, visible: bool) {
        host.set_hidden(self.container, !visible);
    }

    // --- fluent configuration ---------------------------------------------------

    /// Bipolar mode: the arc is drawn from a center origin. Enabling it
    /// before any value was set also parks the value at the origin.
    pub fn centered(&mut self, host: &mut dyn Host, centered: bool) -> &mut Self {
        self.centered = centered;
        if centered && self.origin == 0.0 {
            self.origin = 0.5;
            self.value = 0.5;
        }
        self.update_arc(host);
        self
    }

    pub fn origin(&mut self, host: &mut dyn Host, origin: f32) -> &mut Self {
        self.origin = origin.clamp(0.0, 1.0);
        self.update_arc(host);
        self
    }

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

    pub fn track_color(&mut self, host: &mut dyn Host, color: Rgb888) -> &mut Self {
        self.track_color = Some(color);
        self.apply_colors(host);
        self
    }

    pub fn value_color(&mut self, host: &mut dyn Host, color: Rgb888) -> &mut Self {
        self.value_color = Some(color);
        self.apply_colors(host);
        self
    }

    /// Flash color is applied on the next trigger; no immediate restyle.
    pub fn flash_color(&mut self, color: Rgb888) -> &mut Self {
        self.flash_color = Some(color);
        self
    }

    pub fn ribbon_color(&mut self, host: &mut dyn Host, color: Rgb888) -> &mut Self {
        self.ribbon_color = Some(color);
        if let Some(ribbon) = self.ribbon_arc {
            host.set_arc_colors(ribbon, self.bg_color.unwrap_or(color::INACTIVE), color);
        }
        self
    }

    // --- element access -----------------------------------------------------------

    pub const fn element(&self) -> ElementId {
        self.container
    }

    pub const fn arc_element(&self) -> ElementId {
        self.arc
    }

    pub const fn indicator_element(&self) -> ElementId {
        self.indicator
    }

    pub const fn ribbon_element(&self) -> Option<ElementId> {
        self.ribbon_arc
    }

    /// Authoritative square side from the last geometry pass (0 until the
    /// first real layout).
    pub const fn square_size(&self) -> i32 {
        self.knob_size
    }

    // --- teardown -------------------------------------------------------------------

    /// Cancel outstanding timers, then release all backing elements. Must
    /// run before the widget is dropped so no late callback can address it.
    pub fn destroy(&mut self, host: &mut dyn Host) {
        self.flash.cancel(host);
        if let Some(timer) = self.init_timer.take() {
            host.cancel_one_shot(timer);
        }
        host.delete_element(self.container);
    }

    // --- internals ---------------------------------------------------------------------

    fn ensure_ribbon(&mut self, host: &mut dyn Host) {
        if self.ribbon_arc.is_some() {
            return;
        }
        let ribbon = host.create_arc(self.container);
        host.set_arc_bg_angles(ribbon, START_ANGLE_DEG, START_ANGLE_DEG + SWEEP_DEG);
        host.center_in_parent(ribbon);
        // Span only; the ribbon draws over the main arc's track.
        host.set_arc_widths(ribbon, 0, 2);
        host.set_arc_colors(
            ribbon,
            self.bg_color.unwrap_or(color::INACTIVE),
            self.ribbon_color.unwrap_or(color::ACTIVE),
        );
        host.set_hidden(ribbon, !self.ribbon_enabled);
        self.ribbon_arc = Some(ribbon);

        // One geometry pass so the lazily created arc is sized before it
        // first becomes visible.
        self.ribbon_geometry(host);
    }

    fn apply_colors(&self, host: &mut dyn Host) {
        let bg = self.bg_color.unwrap_or(color::INACTIVE);
        let track = self.track_color.unwrap_or(color::KNOB_TRACK);
        let value = self.value_color.unwrap_or(color::KNOB_VALUE);

        host.set_arc_colors(self.arc, bg, track);
        host.set_line_color(self.indicator, value);
        host.set_bg_color(self.center_circle, value);
    }

    /// Recompute every sub-element dimension from the authoritative square.
    fn update_geometry(&mut self, host: &mut dyn Host) {
        let Some(square) = self.geometry.resolve(host, self.container) else {
            return;
        };

        self.knob_size = square.size;
        self.center = Point::new(square.center_x(), square.center_y());

        let arc_width = square.scaled(ARC_WIDTH_RATIO);
        let indicator_thickness = square.scaled(INDICATOR_RATIO);
        let center_circle_size = square.scaled(CENTER_CIRCLE_RATIO);
        let inner_circle_size = square.scaled(INNER_CIRCLE_RATIO);

        // Shrink the arc by the indicator thickness for clean edges.
        let arc_size = self.knob_size - indicator_thickness;
        self.radius = arc_size / 2;

        host.set_size(self.arc, arc_size, arc_size);
        host.center_in_parent(self.arc);
        host.set_arc_widths(self.arc, arc_width, arc_width / 2);

        host.set_line_width(self.indicator, indicator_thickness);

        host.set_size(self.center_circle, center_circle_size, center_circle_size);
        host.center_in_parent(self.center_circle);
        host.set_size(self.inner_circle, inner_circle_size, inner_circle_size);
        host.center_in_parent(self.inner_circle);

        self.ribbon_geometry(host);

        // Radius changed; re-project the value.
        self.update_arc(host);
    }

    fn ribbon_geometry(&self, host: &mut dyn Host) {
        let Some(ribbon) = self.ribbon_arc else { return };
        if self.knob_size == 0 {
            return;
        }
        let arc_width = ((self.knob_size as f32 * ARC_WIDTH_RATIO) as i32) & !1;
        let indicator_thickness = ((self.knob_size as f32 * INDICATOR_RATIO) as i32) & !1;
        let arc_size = self.knob_size - indicator_thickness;

        // The ribbon rides just inside the main arc.
        let ribbon_size = (arc_size - 2 * arc_width).max(0);
        host.set_size(ribbon, ribbon_size, ribbon_size);
        host.center_in_parent(ribbon);
        host.set_arc_widths(ribbon, 0, (arc_width / 2).max(2));
    }

    /// Re-run the value-to-angle projection.
    fn update_arc(&mut self, host: &mut dyn Host) {
        if self.radius == 0 {
            return;
        }

        let span = arc_model::primary_span(self.origin, self.value);
        host.set_arc_span(self.arc, span.start_deg, span.end_deg);

        if self.ribbon_enabled
            && let Some(ribbon) = self.ribbon_arc
        {
            let span = arc_model::ribbon_span(self.value, self.ribbon_value);
            host.set_arc_span(ribbon, span.start_deg, span.end_deg);
        }

        let tip = arc_model::indicator_endpoint(self.center, self.radius as f32, self.value);
        host.set_line_points(self.indicator, self.center, tip);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
