//! Knob + caption composition.

use crate::host::{ElementId, EventKind, FontKind, Host, TextAlign, UiEvent, WidgetRef};
use crate::theme::color;
use crate::theme::layout::CAPTION_HEIGHT;
use crate::widget::knob::KnobWidget;
use crate::widget::scroll_label::ScrollLabel;

/// A parameter knob with a scrolling caption underneath.
pub struct ParameterKnob {
    me: WidgetRef,
    container: ElementId,
    knob: KnobWidget,
    label: ScrollLabel,
}

impl ParameterKnob {
    pub fn new(host: &mut dyn Host, parent: ElementId, me: WidgetRef) -> Self {
        let container = host.create_element(Some(parent));
        host.subscribe_size_changed(container, me);

        let knob = KnobWidget::new(host, container, me.child(1));

        let mut label = ScrollLabel::new(host, container, me.child(2));
        label
            .auto_scroll(true)
            .alignment(host, TextAlign::Center)
            .color(host, color::TEXT_PRIMARY)
            .font(host, FontKind::Small);

        Self {
            me,
            container,
            knob,
            label,
        }
    }

    /// Route an event to this component or one of its children. Returns
    /// whether the event was consumed.
    pub fn handle_event(&mut self, host: &mut dyn Host, event: &UiEvent) -> bool {
        if event.target == self.me {
            if let EventKind::SizeChanged { .. } = event.kind {
                self.layout(host);
            }
            return true;
        }
        if event.target == self.me.child(1) {
            self.knob.handle_event(host, &event.kind);
            return true;
        }
        if event.target == self.me.child(2) {
            self.label.handle_event(host, &event.kind);
            return true;
        }
        false
    }

    pub fn knob(&self) -> &KnobWidget {
        &self.knob
    }

    pub fn knob_mut(&mut self) -> &mut KnobWidget {
        &mut self.knob
    }

    pub fn label_mut(&mut self) -> &mut ScrollLabel {
        &mut self.label
    }

    pub const fn element(&self) -> ElementId {
        self.container
    }

    pub fn show(&mut self, host: &mut dyn Host) {
        host.set_hidden(self.container, false);
    }

    pub fn hide(&mut self, host: &mut dyn Host) {
        host.set_hidden(self.container, true);
    }

    pub fn destroy(&mut self, host: &mut dyn Host) {
        self.knob.destroy(host);
        self.label.destroy(host);
        host.delete_element(self.container);
    }

    /// Knob above, caption in a fixed strip at the bottom.
    fn layout(&mut self, host: &mut dyn Host) {
        let (w, h) = host.computed_size(self.container);
        if w <= 0 || h <= CAPTION_HEIGHT {
            return;
        }

        host.set_pos(self.knob.element(), 0, 0);
        host.set_size(self.knob.element(), w, h - CAPTION_HEIGHT);

        host.set_pos(self.label.element(), 0, h - CAPTION_HEIGHT);
        host.set_size(self.label.element(), w, CAPTION_HEIGHT);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::scene::SceneHost;

    const PARAM: WidgetRef = WidgetRef(16);

    fn pump(host: &mut SceneHost, param: &mut ParameterKnob) {
        while let Some(event) = host.pop_event() {
            param.handle_event(host, &event);
        }
    }

    #[test]
    fn test_layout_splits_knob_and_caption() {
        let mut host = SceneHost::new();
        let screen = host.create_element(None);
        let mut param = ParameterKnob::new(&mut host, screen, PARAM);

        host.set_size(param.element(), 80, 110);
        host.tick(1);
        pump(&mut host, &mut param);

        let (knob_w, knob_h) = host.computed_size(param.knob().element());
        assert_eq!((knob_w, knob_h), (80, 110 - CAPTION_HEIGHT));
        // The knob reacted to its area and resolved a square.
        assert_eq!(param.knob().square_size(), 80);
    }

    #[test]
    fn test_events_route_to_children() {
        let mut host = SceneHost::new();
        let screen = host.create_element(None);
        let mut param = ParameterKnob::new(&mut host, screen, PARAM);
        host.set_size(param.element(), 80, 110);
        pump(&mut host, &mut param);

        param.knob_mut().set_value(&mut host, 0.6);
        host.tick(crate::theme::animation::FLASH_DURATION_MS + 1);
        // The flash revert addresses the knob's child token and must be
        // consumed by the component's routing.
        let event = host.pop_event().unwrap();
        assert!(param.handle_event(&mut host, &event));
    }

    #[test]
    fn test_foreign_events_are_not_consumed() {
        let mut host = SceneHost::new();
        let screen = host.create_element(None);
        let mut param = ParameterKnob::new(&mut host, screen, PARAM);
        let foreign = UiEvent {
            target: WidgetRef(999),
            kind: EventKind::Timer(crate::host::TaskTag::InitGeometry),
        };
        assert!(!param.handle_event(&mut host, &foreign));
    }
}
