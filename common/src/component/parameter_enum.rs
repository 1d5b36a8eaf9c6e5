//! Enum selector + value/name label composition.

use crate::host::{ElementId, EventKind, FontKind, Host, TextAlign, UiEvent, WidgetRef};
use crate::theme::color;
use crate::theme::layout::CAPTION_HEIGHT;
use crate::widget::enum_select::EnumWidget;
use crate::widget::scroll_label::ScrollLabel;

/// An enum selector showing the current value above a name caption.
pub struct ParameterEnum {
    me: WidgetRef,
    container: ElementId,
    enum_widget: EnumWidget,
    value_label: ScrollLabel,
    name_label: ScrollLabel,
}

impl ParameterEnum {
    pub fn new(host: &mut dyn Host, parent: ElementId, me: WidgetRef) -> Self {
        let container = host.create_element(Some(parent));
        host.subscribe_size_changed(container, me);

        let enum_widget = EnumWidget::new(host, container, me.child(1));

        // Value label lives inside the enum's content area and follows its
        // size, which the enum derives in its own geometry pass.
        let mut value_label = ScrollLabel::new(host, enum_widget.content(), me.child(2));
        value_label
            .auto_scroll(true)
            .alignment(host, TextAlign::Center)
            .color(host, color::TEXT_PRIMARY)
            .font(host, FontKind::Body);
        host.subscribe_size_changed(enum_widget.content(), me.child(3));

        let mut name_label = ScrollLabel::new(host, container, me.child(4));
        name_label
            .alignment(host, TextAlign::Center)
            .color(host, color::TEXT_PRIMARY)
            .font(host, FontKind::Small);

        Self {
            me,
            container,
            enum_widget,
            value_label,
            name_label,
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
            self.enum_widget.handle_event(host, &event.kind);
            return true;
        }
        if event.target == self.me.child(2) {
            self.value_label.handle_event(host, &event.kind);
            return true;
        }
        if event.target == self.me.child(3) {
            // Enum content box resized: the value label fills it.
            if let EventKind::SizeChanged { .. } = event.kind {
                let (w, h) = host.computed_size(self.enum_widget.content());
                host.set_size(self.value_label.element(), w, h);
            }
            return true;
        }
        if event.target == self.me.child(4) {
            self.name_label.handle_event(host, &event.kind);
            return true;
        }
        false
    }

    pub fn enum_widget(&self) -> &EnumWidget {
        &self.enum_widget
    }

    pub fn enum_widget_mut(&mut self) -> &mut EnumWidget {
        &mut self.enum_widget
    }

    pub fn value_label_mut(&mut self) -> &mut ScrollLabel {
        &mut self.value_label
    }

    pub fn name_label_mut(&mut self) -> &mut ScrollLabel {
        &mut self.name_label
    }

    pub const fn element(&self) -> ElementId {
        self.container
    }

    pub fn destroy(&mut self, host: &mut dyn Host) {
        self.value_label.destroy(host);
        self.name_label.destroy(host);
        self.enum_widget.destroy(host);
        host.delete_element(self.container);
    }

    fn layout(&mut self, host: &mut dyn Host) {
        let (w, h) = host.computed_size(self.container);
        if w <= 0 || h <= CAPTION_HEIGHT {
            return;
        }

        host.set_pos(self.enum_widget.element(), 0, 0);
        host.set_size(self.enum_widget.element(), w, h - CAPTION_HEIGHT);

        host.set_pos(self.name_label.element(), 0, h - CAPTION_HEIGHT);
        host.set_size(self.name_label.element(), w, CAPTION_HEIGHT);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::scene::SceneHost;

    const PARAM: WidgetRef = WidgetRef(32);

    fn pump(host: &mut SceneHost, param: &mut ParameterEnum) {
        while let Some(event) = host.pop_event() {
            param.handle_event(host, &event);
        }
    }

    #[test]
    fn test_value_label_tracks_content_box() {
        let mut host = SceneHost::new();
        let screen = host.create_element(None);
        let mut param = ParameterEnum::new(&mut host, screen, PARAM);

        host.set_size(param.element(), 80, 110);
        host.tick(1);
        pump(&mut host, &mut param);

        let content = host.computed_size(param.enum_widget().content());
        assert!(content.0 > 0 && content.1 > 0);
        let value_label = host.computed_size(param.value_label_mut().element());
        assert_eq!(value_label, content);
    }

    #[test]
    fn test_value_change_flashes_line() {
        let mut host = SceneHost::new();
        let screen = host.create_element(None);
        let mut param = ParameterEnum::new(&mut host, screen, PARAM);
        host.set_size(param.element(), 80, 110);
        host.tick(1);
        pump(&mut host, &mut param);

        param.value_label_mut().set_text(&mut host, "Sawtooth");
        param.enum_widget_mut().trigger_flash(&mut host);

        let line = param.enum_widget().line_element();
        let (bg, _, _) = host.bg(line).unwrap();
        assert_eq!(bg, color::ACTIVE);

        host.tick(crate::theme::animation::FLASH_DURATION_MS);
        pump(&mut host, &mut param);
        let (bg, _, _) = host.bg(line).unwrap();
        assert_eq!(bg, color::INACTIVE);
    }
}
