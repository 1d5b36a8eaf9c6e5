//! Button + caption composition for binary on/off parameters.

use crate::host::{ElementId, EventKind, FontKind, Host, TextAlign, UiEvent, WidgetRef};
use crate::theme::color;
use crate::theme::layout::CAPTION_HEIGHT;
use crate::widget::button::ButtonWidget;
use crate::widget::scroll_label::ScrollLabel;

/// A toggle button with a caption underneath.
pub struct ParameterSwitch {
    me: WidgetRef,
    container: ElementId,
    button: ButtonWidget,
    label: ScrollLabel,
}

impl ParameterSwitch {
    pub fn new(host: &mut dyn Host, parent: ElementId, me: WidgetRef) -> Self {
        let container = host.create_element(Some(parent));
        host.subscribe_size_changed(container, me);

        // The button watches the component container itself and carves its
        // pad out of the box above the caption strip.
        let mut button = ButtonWidget::new(host, container, me.child(1));
        button.caption_reserve(host, CAPTION_HEIGHT);

        let mut label = ScrollLabel::new(host, container, me.child(2));
        label
            .alignment(host, TextAlign::Center)
            .color(host, color::TEXT_PRIMARY)
            .font(host, FontKind::Small);

        Self {
            me,
            container,
            button,
            label,
        }
    }

    pub fn handle_event(&mut self, host: &mut dyn Host, event: &UiEvent) -> bool {
        if event.target == self.me {
            if let EventKind::SizeChanged { .. } = event.kind {
                self.layout(host);
            }
            return true;
        }
        if event.target == self.me.child(1) {
            self.button.handle_event(host, &event.kind);
            return true;
        }
        if event.target == self.me.child(2) {
            self.label.handle_event(host, &event.kind);
            return true;
        }
        false
    }

    pub fn button(&self) -> &ButtonWidget {
        &self.button
    }

    pub fn button_mut(&mut self) -> &mut ButtonWidget {
        &mut self.button
    }

    pub fn label_mut(&mut self) -> &mut ScrollLabel {
        &mut self.label
    }

    pub const fn element(&self) -> ElementId {
        self.container
    }

    pub fn destroy(&mut self, host: &mut dyn Host) {
        self.button.destroy(host);
        self.label.destroy(host);
        host.delete_element(self.container);
    }

    fn layout(&mut self, host: &mut dyn Host) {
        let (w, h) = host.computed_size(self.container);
        if w <= 0 || h <= CAPTION_HEIGHT {
            return;
        }
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

    const PARAM: WidgetRef = WidgetRef(48);

    fn pump(host: &mut SceneHost, param: &mut ParameterSwitch) {
        while let Some(event) = host.pop_event() {
            param.handle_event(host, &event);
        }
    }

    #[test]
    fn test_button_sizes_above_caption() {
        let mut host = SceneHost::new();
        let screen = host.create_element(None);
        let mut param = ParameterSwitch::new(&mut host, screen, PARAM);

        host.set_size(param.element(), 80, 110);
        host.tick(1);
        pump(&mut host, &mut param);

        // min(80, 110 - 16) * 0.6 = 48.
        assert_eq!(param.button().square_size(), 48);

        let label_pos_y = 110 - CAPTION_HEIGHT;
        let (_, label_h) = host.computed_size(param.label_mut().element());
        assert_eq!(label_h, CAPTION_HEIGHT);
        assert_eq!(
            host.absolute_pos(param.label_mut().element()).y,
            label_pos_y
        );
    }

    #[test]
    fn test_toggle_round_trip() {
        let mut host = SceneHost::new();
        let screen = host.create_element(None);
        let mut param = ParameterSwitch::new(&mut host, screen, PARAM);
        host.set_size(param.element(), 80, 110);
        host.tick(1);
        pump(&mut host, &mut param);

        param.button_mut().set_text(&mut host, "OFF");
        param.button_mut().set_state(&mut host, true);
        param.button_mut().set_text(&mut host, "ON");
        assert!(param.button().state());

        host.tick(crate::theme::animation::FLASH_DURATION_MS);
        pump(&mut host, &mut param);
        let (bg, _, _) = host.bg(param.button().inner()).unwrap();
        assert_eq!(bg, color::ACTIVE);
    }
}
