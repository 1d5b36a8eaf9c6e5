//! Auto-scrolling (marquee) label.
//!
//! A clipping container with an inner text element. After `set_text`, an
//! overflow check runs one deferred tick later (so the layout has
//! settled): text that fits is aligned in place; text that overflows is
//! left-aligned and scrolled out by the overflow amount, paused, and
//! scrolled back, one cycle per text change.

use embedded_graphics::pixelcolor::Rgb888;

use crate::host::{
    AnimId,
    AnimationSpec,
    DeferredTask,
    Easing,
    ElementId,
    EventKind,
    FontKind,
    Host,
    TaskTag,
    TextAlign,
    TimerId,
    WidgetRef,
};
use crate::theme::animation::{
    OVERFLOW_CHECK_DELAY_MS,
    SCROLL_DURATION_MS,
    SCROLL_PAUSE_MS,
    SCROLL_START_DELAY_MS,
};

pub struct ScrollLabel {
    me: WidgetRef,
    container: ElementId,
    label: ElementId,

    auto_scroll: bool,
    alignment: TextAlign,
    overflow: i32,

    /// Running scroll animation and its direction (true = scrolling out).
    anim: Option<(AnimId, bool)>,
    pending_check: Option<TimerId>,
    pending_resume: Option<TimerId>,

    scroll_duration_ms: u32,
    pause_duration_ms: u32,
}

impl ScrollLabel {
    pub fn new(host: &mut dyn Host, parent: ElementId, me: WidgetRef) -> Self {
        let container = host.create_element(Some(parent));
        let label = host.create_text(container);
        // The text element fills the container; scrolling moves the draw
        // offset, and the renderer clips to the element box.
        host.set_text_align(label, TextAlign::Left);

        host.subscribe_size_changed(container, me);

        Self {
            me,
            container,
            label,
            auto_scroll: false,
            alignment: TextAlign::Center,
            overflow: 0,
            anim: None,
            pending_check: None,
            pending_resume: None,
            scroll_duration_ms: SCROLL_DURATION_MS,
            pause_duration_ms: SCROLL_PAUSE_MS,
        }
    }

    pub fn handle_event(&mut self, host: &mut dyn Host, kind: &EventKind) {
        match *kind {
            EventKind::SizeChanged { .. } => {
                let (w, h) = host.computed_size(self.container);
                host.set_size(self.label, w, h);
                self.schedule_overflow_check(host);
            }
            EventKind::Timer(TaskTag::OverflowCheck) => {
                self.pending_check = None;
                self.check_overflow(host);
            }
            EventKind::Timer(TaskTag::ScrollResume) => {
                self.pending_resume = None;
                let id = host.start_animation(AnimationSpec {
                    widget: self.me,
                    from: -self.overflow,
                    to: 0,
                    duration_ms: self.scroll_duration_ms,
                    delay_ms: 0,
                    easing: Easing::EaseInOut,
                });
                self.anim = Some((id, false));
            }
            EventKind::AnimStep { anim, value } => {
                if self.anim.map(|(id, _)| id) == Some(anim) {
                    host.set_text_offset(self.label, value);
                }
            }
            EventKind::AnimDone { anim } => {
                let Some((id, outbound)) = self.anim else { return };
                if id != anim {
                    return;
                }
                self.anim = None;
                if outbound {
                    self.pending_resume = Some(host.schedule_one_shot(
                        self.pause_duration_ms,
                        DeferredTask {
                            widget: self.me,
                            tag: TaskTag::ScrollResume,
                        },
                    ));
                }
            }
            _ => {}
        }
    }

    // --- data -------------------------------------------------------------------

    pub fn set_text(&mut self, host: &mut dyn Host, text: &str) {
        self.stop_scroll(host);
        host.set_text_offset(self.label, 0);
        host.set_text(self.label, text);
        self.schedule_overflow_check(host);
    }

    // --- fluent configuration ------------------------------------------------------

    pub fn auto_scroll(&mut self, enabled: bool) -> &mut Self {
        self.auto_scroll = enabled;
        self
    }

    pub fn alignment(&mut self, host: &mut dyn Host, align: TextAlign) -> &mut Self {
        self.alignment = align;
        self.apply_alignment(host);
        self
    }

    pub fn color(&mut self, host: &mut dyn Host, color: Rgb888) -> &mut Self {
        host.set_text_color(self.label, color);
        self
    }

    pub fn font(&mut self, host: &mut dyn Host, font: FontKind) -> &mut Self {
        host.set_font(self.label, font);
        self.schedule_overflow_check(host);
        self
    }

    // --- element access -------------------------------------------------------------

    pub const fn element(&self) -> ElementId {
        self.container
    }

    pub const fn is_scrolling(&self) -> bool {
        self.anim.is_some()
    }

    // --- teardown ----------------------------------------------------------------------

    pub fn destroy(&mut self, host: &mut dyn Host) {
        self.stop_scroll(host);
        if let Some(timer) = self.pending_check.take() {
            host.cancel_one_shot(timer);
        }
        host.delete_element(self.container);
    }

    // --- internals ---------------------------------------------------------------------

    fn schedule_overflow_check(&mut self, host: &mut dyn Host) {
        if let Some(timer) = self.pending_check.take() {
            host.cancel_one_shot(timer);
        }
        self.pending_check = Some(host.schedule_one_shot(
            OVERFLOW_CHECK_DELAY_MS,
            DeferredTask {
                widget: self.me,
                tag: TaskTag::OverflowCheck,
            },
        ));
    }

    fn stop_scroll(&mut self, host: &mut dyn Host) {
        if self.anim.take().is_some() {
            host.cancel_animations(self.me);
        }
        if let Some(timer) = self.pending_resume.take() {
            host.cancel_one_shot(timer);
        }
    }

    fn check_overflow(&mut self, host: &mut dyn Host) {
        let text_width = host.measured_text_width(self.label);
        let (container_width, _) = host.computed_size(self.container);
        if container_width <= 0 {
            return;
        }
        self.overflow = text_width - container_width;

        if self.overflow > 0 {
            host.set_text_offset(self.label, 0);
            if self.auto_scroll {
                let id = host.start_animation(AnimationSpec {
                    widget: self.me,
                    from: 0,
                    to: -self.overflow,
                    duration_ms: self.scroll_duration_ms,
                    delay_ms: SCROLL_START_DELAY_MS,
                    easing: Easing::EaseInOut,
                });
                self.anim = Some((id, true));
            }
        } else {
            self.apply_alignment(host);
        }
    }

    fn apply_alignment(&self, host: &mut dyn Host) {
        let text_width = host.measured_text_width(self.label);
        let (container_width, _) = host.computed_size(self.container);
        let free = container_width - text_width;
        if free < 0 {
            return;
        }
        let offset = match self.alignment {
            TextAlign::Left => 0,
            TextAlign::Center => free / 2,
            TextAlign::Right => free,
        };
        host.set_text_offset(self.label, offset);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::scene::{Payload, SceneHost};

    const LABEL: WidgetRef = WidgetRef(6);

    fn setup(width: i32) -> (SceneHost, ScrollLabel) {
        let mut host = SceneHost::new();
        let root = host.create_element(None);
        let mut label = ScrollLabel::new(&mut host, root, LABEL);
        host.set_size(label.element(), width, 14);
        pump(&mut host, &mut label);
        (host, label)
    }

    fn pump(host: &mut SceneHost, label: &mut ScrollLabel) {
        while let Some(event) = host.pop_event() {
            if event.target == LABEL {
                label.handle_event(host, &event.kind);
            }
        }
    }

    fn offset(host: &SceneHost, label: &ScrollLabel) -> i32 {
        let mut result = 0;
        for id in host.ids() {
            if let Some(Payload::Text(data)) = host.payload(id)
                && host.parent(id) == Some(label.element())
            {
                result = data.offset_x;
            }
        }
        result
    }

    #[test]
    fn test_fitting_text_is_aligned_not_scrolled() {
        let (mut host, mut label) = setup(100);
        label.auto_scroll(true);
        label.set_text(&mut host, "Pan"); // 3 * 8 = 24 px

        host.tick(OVERFLOW_CHECK_DELAY_MS);
        pump(&mut host, &mut label);

        assert!(!label.is_scrolling());
        assert_eq!(offset(&host, &label), (100 - 24) / 2);
    }

    #[test]
    fn test_overflowing_text_starts_scroll() {
        let (mut host, mut label) = setup(60);
        label.auto_scroll(true);
        label.set_text(&mut host, "Cutoff Frequency"); // 16 * 8 = 128 px

        host.tick(OVERFLOW_CHECK_DELAY_MS);
        pump(&mut host, &mut label);
        assert!(label.is_scrolling());

        // Past the start delay and the full duration: offset has reached
        // -overflow and the pause timer is armed.
        host.tick(SCROLL_START_DELAY_MS + SCROLL_DURATION_MS);
        pump(&mut host, &mut label);
        assert_eq!(offset(&host, &label), -(128 - 60));
        assert!(!label.is_scrolling());
        assert!(host.pending_timers() > 0);

        // Pause elapses; the label scrolls back to rest.
        host.tick(SCROLL_PAUSE_MS);
        pump(&mut host, &mut label);
        assert!(label.is_scrolling());
        host.tick(SCROLL_DURATION_MS);
        pump(&mut host, &mut label);
        assert_eq!(offset(&host, &label), 0);
        assert!(!label.is_scrolling());
    }

    #[test]
    fn test_set_text_cancels_running_scroll() {
        let (mut host, mut label) = setup(60);
        label.auto_scroll(true);
        label.set_text(&mut host, "Cutoff Frequency");
        host.tick(OVERFLOW_CHECK_DELAY_MS);
        pump(&mut host, &mut label);
        assert!(label.is_scrolling());

        label.set_text(&mut host, "Reso");
        assert!(!label.is_scrolling());
        assert_eq!(host.running_anims(), 0);

        host.tick(OVERFLOW_CHECK_DELAY_MS);
        pump(&mut host, &mut label);
        // Short text: aligned, no new animation.
        assert!(!label.is_scrolling());
    }

    #[test]
    fn test_no_scroll_when_auto_scroll_disabled() {
        let (mut host, mut label) = setup(60);
        label.set_text(&mut host, "Cutoff Frequency");
        host.tick(OVERFLOW_CHECK_DELAY_MS);
        pump(&mut host, &mut label);
        assert!(!label.is_scrolling());
        // Overflowing text stays left-aligned at rest.
        assert_eq!(offset(&host, &label), 0);
    }

    #[test]
    fn test_destroy_cancels_pending_work() {
        let (mut host, mut label) = setup(60);
        label.auto_scroll(true);
        label.set_text(&mut host, "Cutoff Frequency");
        label.destroy(&mut host);
        assert_eq!(host.pending_timers(), 0);
        assert_eq!(host.running_anims(), 0);
    }
}
