//! Plain text label.
//!
//! Thin wrapper over a host text element with fluent styling. Sizing is
//! the owner's job; see [`crate::widget::scroll_label`] for the variant
//! that measures and scrolls overflowing text.

use embedded_graphics::pixelcolor::Rgb888;

use crate::host::{ElementId, FontKind, Host, TextAlign};

pub struct Label {
    element: ElementId,
}

impl Label {
    pub fn new(host: &mut dyn Host, parent: ElementId) -> Self {
        let element = host.create_text(parent);
        Self { element }
    }

    pub fn set_text(&mut self, host: &mut dyn Host, text: &str) {
        host.set_text(self.element, text);
    }

    pub fn color(&mut self, host: &mut dyn Host, color: Rgb888) -> &mut Self {
        host.set_text_color(self.element, color);
        self
    }

    pub fn alignment(&mut self, host: &mut dyn Host, align: TextAlign) -> &mut Self {
        host.set_text_align(self.element, align);
        self
    }

    pub fn font(&mut self, host: &mut dyn Host, font: FontKind) -> &mut Self {
        host.set_font(self.element, font);
        self
    }

    pub const fn element(&self) -> ElementId {
        self.element
    }

    pub fn destroy(&mut self, host: &mut dyn Host) {
        host.delete_element(self.element);
    }
}
