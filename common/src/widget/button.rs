//! Toggle button widget.
//!
//! A rounded square pad with an optional state caption inside. The button
//! does not receive layout-driven sizing itself; it tracks its parent's
//! size-change notifications and carves its square out of the parent box
//! (minus any space the owner reserved for a sibling caption).

use embedded_graphics::pixelcolor::Rgb888;

use crate::host::{
    DeferredTask,
    ElementId,
    EventKind,
    FontKind,
    Host,
    TaskTag,
    TextAlign,
    TimerId,
    WidgetRef,
};
use crate::theme::color;
use crate::widget::flash::FlashAnimator;
use crate::widget::geometry::snap_even;

const MIN_SIZE: i32 = 24;
/// Pad side as a share of the smaller parent dimension.
const BUTTON_SIZE_RATIO: f32 = 0.60;
/// Corner radius as a share of the pad side.
const RADIUS_RATIO: f32 = 0.20;

/// Binary on/off button with state-dependent colors.
pub struct ButtonWidget {
    me: WidgetRef,
    parent: ElementId,
    container: ElementId,
    button_box: ElementId,
    state_label: Option<ElementId>,

    flash: FlashAnimator,
    init_timer: Option<TimerId>,

    is_on: bool,
    off_color: Option<Rgb888>,
    on_color: Option<Rgb888>,
    text_off_color: Option<Rgb888>,
    text_on_color: Option<Rgb888>,
    flash_color: Option<Rgb888>,

    /// Vertical space at the bottom of the parent the button must leave
    /// free (sibling caption).
    reserved_bottom: i32,
    button_size: i32,
}

impl ButtonWidget {
    pub fn new(host: &mut dyn Host, parent: ElementId, me: WidgetRef) -> Self {
        let container = host.create_element(Some(parent));

        let button_box = host.create_element(Some(container));
        host.center_in_parent(button_box);

        // The button sizes itself from the parent, so listen there.
        host.subscribe_size_changed(parent, me);
        let init_timer = host.schedule_one_shot(
            0,
            DeferredTask {
                widget: me,
                tag: TaskTag::InitGeometry,
            },
        );

        let button = Self {
            me,
            parent,
            container,
            button_box,
            state_label: None,
            flash: FlashAnimator::new(),
            init_timer: Some(init_timer),
            is_on: false,
            off_color: None,
            on_color: None,
            text_off_color: None,
            text_on_color: None,
            flash_color: None,
            reserved_bottom: 0,
            button_size: 0,
        };
        button.apply_state(host);
        button
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
                self.apply_state(host);
            }
            _ => {}
        }
    }

    // --- data ------------------------------------------------------------------

    /// Switch the on/off state. No-op when unchanged.
    pub fn set_state(&mut self, host: &mut dyn Host, on: bool) {
        if self.is_on == on {
            return;
        }
        self.is_on = on;
        self.apply_state(host);
        if self.flash.trigger(host, self.me) {
            host.set_bg_color(self.button_box, self.flash_color.unwrap_or(color::ACTIVE));
        }
    }

    pub const fn state(&self) -> bool {
        self.is_on
    }

    /// Set the caption inside the pad, creating the label on first use.
    pub fn set_text(&mut self, host: &mut dyn Host, text: &str) {
        let label = match self.state_label {
            Some(label) => label,
            None => {
                let label = host.create_text(self.button_box);
                host.set_text_align(label, TextAlign::Center);
                host.set_font(label, FontKind::Small);
                host.center_in_parent(label);
                self.state_label = Some(label);
                self.size_label(host);
                label
            }
        };
        host.set_text(label, text);
        self.apply_state(host);
    }

    // --- fluent configuration ------------------------------------------------------

    pub fn off_color(&mut self, host: &mut dyn Host, color: Rgb888) -> &mut Self {
        self.off_color = Some(color);
        self.apply_state(host);
        self
    }

    pub fn on_color(&mut self, host: &mut dyn Host, color: Rgb888) -> &mut Self {
        self.on_color = Some(color);
        self.apply_state(host);
        self
    }

    pub fn text_off_color(&mut self, host: &mut dyn Host, color: Rgb888) -> &mut Self {
        self.text_off_color = Some(color);
        self.apply_state(host);
        self
    }

    pub fn text_on_color(&mut self, host: &mut dyn Host, color: Rgb888) -> &mut Self {
        self.text_on_color = Some(color);
        self.apply_state(host);
        self
    }

    pub fn flash_color(&mut self, color: Rgb888) -> &mut Self {
        self.flash_color = Some(color);
        self
    }

    /// Reserve vertical space at the bottom of the parent (sibling caption
    /// height) before carving out the square.
    pub fn caption_reserve(&mut self, host: &mut dyn Host, height: i32) -> &mut Self {
        self.reserved_bottom = height.max(0);
        self.update_geometry(host);
        self
    }

    // --- element access -------------------------------------------------------------

    pub const fn element(&self) -> ElementId {
        self.container
    }

    /// The visible pad; owners attach click handling here.
    pub const fn inner(&self) -> ElementId {
        self.button_box
    }

    pub const fn square_size(&self) -> i32 {
        self.button_size
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

    fn update_geometry(&mut self, host: &mut dyn Host) {
        let (parent_w, parent_h) = host.computed_size(self.parent);
        let available_h = parent_h - self.reserved_bottom;
        if parent_w <= 0 || available_h <= 0 {
            return;
        }

        let min_dim = parent_w.min(available_h);
        self.button_size = snap_even(
            ((min_dim as f32 * BUTTON_SIZE_RATIO) as i32).max(MIN_SIZE),
        );

        // Container holds exactly the pad, centered in the available box.
        host.set_size(self.container, self.button_size, self.button_size);
        host.set_pos(
            self.container,
            (parent_w - self.button_size) / 2,
            (available_h - self.button_size) / 2,
        );

        host.set_size(self.button_box, self.button_size, self.button_size);
        host.center_in_parent(self.button_box);

        let radius = (self.button_size as f32 * RADIUS_RATIO) as i32;
        host.set_corner_radius(self.button_box, radius);

        self.size_label(host);
    }

    fn size_label(&self, host: &mut dyn Host) {
        if let Some(label) = self.state_label
            && self.button_size > 0
        {
            host.set_size(label, self.button_size, FontKind::Small.char_height());
            host.center_in_parent(label);
        }
    }

    fn apply_state(&self, host: &mut dyn Host) {
        let bg = if self.is_on {
            self.on_color.unwrap_or(color::ACTIVE)
        } else {
            self.off_color.unwrap_or(color::INACTIVE)
        };
        let text = if self.is_on {
            self.text_on_color.unwrap_or(color::TEXT_PRIMARY_INVERTED)
        } else {
            self.text_off_color.unwrap_or(color::TEXT_PRIMARY)
        };

        host.set_bg_color(self.button_box, bg);
        if let Some(label) = self.state_label {
            host.set_text_color(label, text);
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::scene::SceneHost;

    const BTN: WidgetRef = WidgetRef(2);

    fn setup() -> (SceneHost, ElementId, ButtonWidget) {
        let mut host = SceneHost::new();
        let cell = host.create_element(None);
        let button = ButtonWidget::new(&mut host, cell, BTN);
        (host, cell, button)
    }

    fn pump(host: &mut SceneHost, button: &mut ButtonWidget) {
        while let Some(event) = host.pop_event() {
            if event.target == BTN {
                button.handle_event(host, &event.kind);
            }
        }
    }

    #[test]
    fn test_sizes_from_parent_notification() {
        let (mut host, cell, mut button) = setup();
        host.set_size(cell, 80, 100);
        pump(&mut host, &mut button);

        // 60% of min(80, 100) = 48, even.
        assert_eq!(button.square_size(), 48);
        assert_eq!(host.computed_size(button.element()), (48, 48));
    }

    #[test]
    fn test_caption_reserve_shrinks_available_box() {
        let (mut host, cell, mut button) = setup();
        host.set_size(cell, 80, 100);
        pump(&mut host, &mut button);

        button.caption_reserve(&mut host, 40);
        // min(80, 60) * 0.6 = 36.
        assert_eq!(button.square_size(), 36);
    }

    #[test]
    fn test_minimum_floor() {
        let (mut host, cell, mut button) = setup();
        host.set_size(cell, 30, 30);
        pump(&mut host, &mut button);
        assert_eq!(button.square_size(), MIN_SIZE);
    }

    #[test]
    fn test_pre_layout_parent_is_skipped() {
        let (mut host, _cell, mut button) = setup();
        host.tick(1);
        pump(&mut host, &mut button);
        assert_eq!(button.square_size(), 0);
    }

    #[test]
    fn test_set_state_is_edge_triggered() {
        let (mut host, cell, mut button) = setup();
        host.set_size(cell, 80, 80);
        host.tick(1);
        pump(&mut host, &mut button);

        button.set_state(&mut host, true);
        assert!(button.state());
        let timers = host.pending_timers();

        // Same state again: no flash, no work.
        button.set_state(&mut host, true);
        assert_eq!(host.pending_timers(), timers);
    }

    #[test]
    fn test_label_created_on_first_text() {
        let (mut host, cell, mut button) = setup();
        host.set_size(cell, 80, 80);
        pump(&mut host, &mut button);

        let before = host.ids().count();
        button.set_text(&mut host, "OFF");
        assert_eq!(host.ids().count(), before + 1);
        button.set_text(&mut host, "ON");
        assert_eq!(host.ids().count(), before + 1);
    }

    #[test]
    fn test_destroy_cancels_flash() {
        let (mut host, cell, mut button) = setup();
        host.set_size(cell, 80, 80);
        host.tick(1);
        pump(&mut host, &mut button);

        button.set_state(&mut host, true);
        button.destroy(&mut host);
        assert_eq!(host.pending_timers(), 0);
    }
}
