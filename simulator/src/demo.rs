//! Demo screen composition and control wiring.
//!
//! Builds the on-screen UI (parameter knobs, wave selector, bypass switch,
//! state indicators, preset list) against the widget toolkit, routes host
//! notifications to the owning widgets, and maps panel controls onto
//! widget operations.

use panel_common::component::{ParameterEnum, ParameterKnob, ParameterSwitch};
use panel_common::diag::EventLog;
use panel_common::host::{ElementId, FontKind, TextAlign};
use panel_common::theme::{color, opacity};
use panel_common::widget::label::Label;
use panel_common::widget::state_indicator::{IndicatorState, StateIndicator};
use panel_common::widget::virtual_list::{ScrollMode, Slot, SlotBinder, VirtualList};
use panel_common::{Host, SceneHost, UiEvent};

use crate::panel::controls::ControlId;
use crate::panel::layout::{SCREEN_H, SCREEN_W};
use crate::panel::{HwPanel, PanelInput};

/// Widget tokens. Components consume a small range above their base, so
/// bases are spaced generously.
mod tokens {
    use panel_common::WidgetRef;

    pub const KNOBS: [WidgetRef; 4] = [
        WidgetRef(0x10),
        WidgetRef(0x20),
        WidgetRef(0x30),
        WidgetRef(0x40),
    ];
    pub const WAVE: WidgetRef = WidgetRef(0x50);
    pub const BYPASS: WidgetRef = WidgetRef(0x60);
    pub const PRESETS: WidgetRef = WidgetRef(0x70);
}

const KNOB_NAMES: [&str; 4] = ["Cutoff Frequency", "Pan", "Reso", "Attack"];
const KNOB_COLORS: [u8; 4] = [0, 5, 2, 3];

const WAVE_VALUES: [&str; 5] = ["Sine", "Triangle", "Sawtooth", "Square", "Noise"];

const PRESET_NAMES: [&str; 12] = [
    "Init Patch",
    "Warm Pad",
    "Acid Bass",
    "Pluck",
    "Solina Strings",
    "FM Bell",
    "Sub Bass",
    "Brass Section",
    "Glass Keys",
    "Noise Sweep",
    "Tape Choir",
    "Lead Saw",
];

// =============================================================================
// Preset list binder
// =============================================================================

/// Binds preset names into list slots; the payload is the reused text
/// element of each slot.
pub struct PresetBinder;

impl PresetBinder {
    fn style(host: &mut dyn Host, slot_container: ElementId, label: ElementId, selected: bool) {
        if selected {
            host.set_bg_color(slot_container, color::ACTIVE);
            host.set_text_color(label, color::TEXT_PRIMARY_INVERTED);
        } else {
            host.set_bg_color(slot_container, color::KNOB_BACKGROUND);
            host.set_text_color(label, color::TEXT_SECONDARY);
        }
        host.set_corner_radius(slot_container, 3);
    }
}

impl SlotBinder for PresetBinder {
    type Payload = ElementId;

    fn bind(&mut self, host: &mut dyn Host, slot: &mut Slot<ElementId>, index: usize, selected: bool) {
        let label = match slot.payload {
            Some(label) => label,
            None => {
                let label = host.create_text(slot.container);
                host.set_font(label, FontKind::Small);
                host.set_text_align(label, TextAlign::Left);
                slot.payload = Some(label);
                label
            }
        };

        let (w, h) = host.computed_size(slot.container);
        host.set_size(label, (w - 8).max(0), h);
        host.set_pos(label, 4, 0);
        host.set_text(label, PRESET_NAMES[index % PRESET_NAMES.len()]);

        Self::style(host, slot.container, label, selected);
    }

    fn highlight(&mut self, host: &mut dyn Host, slot: &mut Slot<ElementId>, selected: bool) -> bool {
        match slot.payload {
            Some(label) => {
                Self::style(host, slot.container, label, selected);
                true
            }
            None => false,
        }
    }
}

// =============================================================================
// Demo UI
// =============================================================================

pub struct DemoUi {
    knobs: Vec<ParameterKnob>,
    wave: ParameterEnum,
    bypass: ParameterSwitch,
    indicators: Vec<StateIndicator>,
    status_label: Label,
    presets: VirtualList<PresetBinder>,
    wave_index: usize,
    center_locked: bool,
}

impl DemoUi {
    pub fn build(host: &mut SceneHost) -> Self {
        let screen = host.create_element(None);
        host.set_bg_color(screen, color::BACKGROUND);
        host.set_size(screen, SCREEN_W, SCREEN_H);

        // Top row: four parameter knobs.
        let mut knobs = Vec::with_capacity(4);
        for (i, token) in tokens::KNOBS.into_iter().enumerate() {
            let mut param = ParameterKnob::new(host, screen, token);
            param
                .knob_mut()
                .track_color(host, color::macro_color(KNOB_COLORS[i]))
                .flash_color(color::ACTIVE);
            if i == 1 {
                param.knob_mut().centered(host, true);
            } else {
                param.knob_mut().set_value(host, 0.5);
            }
            param.label_mut().set_text(host, KNOB_NAMES[i]);

            host.set_pos(param.element(), 6 + i as i32 * 78, 4);
            host.set_size(param.element(), 72, 108);
            knobs.push(param);
        }

        // Bottom row: wave selector, bypass switch, indicators, presets.
        let mut wave = ParameterEnum::new(host, screen, tokens::WAVE);
        wave.enum_widget_mut()
            .line_color(host, color::macro_color(4))
            .flash_color(color::ACTIVE);
        wave.value_label_mut().set_text(host, WAVE_VALUES[0]);
        wave.name_label_mut().set_text(host, "Wave");
        host.set_pos(wave.element(), 6, 116);
        host.set_size(wave.element(), 64, 120);

        let mut bypass = ParameterSwitch::new(host, screen, tokens::BYPASS);
        bypass
            .button_mut()
            .off_color(host, color::INACTIVE)
            .on_color(host, color::macro_color(1))
            .text_off_color(host, color::TEXT_PRIMARY)
            .text_on_color(host, color::TEXT_PRIMARY_INVERTED);
        bypass.button_mut().set_text(host, "OFF");
        bypass.label_mut().set_text(host, "Bypass");
        host.set_pos(bypass.element(), 74, 116);
        host.set_size(bypass.element(), 64, 120);

        // Indicator column.
        let mut indicators = Vec::with_capacity(3);
        for (i, macro_idx) in [0u8, 3, 5].into_iter().enumerate() {
            let mut led = StateIndicator::new(host, screen, 12);
            led.color(host, IndicatorState::Off, color::macro_color(macro_idx))
                .color(host, IndicatorState::Active, color::macro_color(macro_idx))
                .opacity(host, IndicatorState::Off, opacity::OPA_40)
                .opacity(host, IndicatorState::Active, opacity::OPA_FULL);
            led.set_state(
                host,
                if i < 2 {
                    IndicatorState::Active
                } else {
                    IndicatorState::Off
                },
            );
            host.set_pos(led.element(), 148, 124 + i as i32 * 18);
            indicators.push(led);
        }

        let mut status_label = Label::new(host, screen);
        status_label
            .color(host, color::TEXT_PRIMARY)
            .alignment(host, TextAlign::Center)
            .font(host, FontKind::Small);
        status_label.set_text(host, "Status");
        host.set_pos(status_label.element(), 132, 182);
        host.set_size(status_label.element(), 44, 12);

        // Preset list, center-locked.
        let mut presets = VirtualList::new(host, screen, tokens::PRESETS, PresetBinder);
        host.set_pos(presets.element(), 176, 116);
        host.set_size(presets.element(), 138, 120);
        presets.scroll_mode(host, ScrollMode::CenterLocked);
        presets.set_total_count(host, PRESET_NAMES.len());
        presets.show(host);

        Self {
            knobs,
            wave,
            bypass,
            indicators,
            status_label,
            presets,
            wave_index: 0,
            center_locked: true,
        }
    }

    /// Route one host notification to its owning widget.
    pub fn dispatch(&mut self, host: &mut SceneHost, event: &UiEvent) {
        for knob in &mut self.knobs {
            if knob.handle_event(host, event) {
                return;
            }
        }
        if self.wave.handle_event(host, event) {
            return;
        }
        if self.bypass.handle_event(host, event) {
            return;
        }
        if event.target == tokens::PRESETS {
            self.presets.handle_event(host, &event.kind);
        }
    }

    /// Map one panel control event onto the widgets.
    pub fn apply_input(
        &mut self,
        host: &mut SceneHost,
        panel: &mut HwPanel,
        input: &PanelInput,
        log: &mut EventLog,
    ) {
        match *input {
            PanelInput::EncoderAbsolute {
                id: ControlId::MacroEnc(n),
                value,
            } => {
                let n = n as usize;
                if n < 4 {
                    self.knobs[n].knob_mut().set_value(host, value);
                    if n == 0 {
                        self.indicators[0].set_state(
                            host,
                            if value > 0.5 {
                                IndicatorState::Active
                            } else {
                                IndicatorState::Off
                            },
                        );
                    }
                } else {
                    // Second macro row overlays ribbon values on the knobs.
                    let knob = self.knobs[n - 4].knob_mut();
                    knob.set_ribbon_enabled(host, true);
                    knob.set_ribbon_value(host, value);
                }
                log.push(&format!("{} {:.2}", ControlId::MacroEnc(n as u8).name(), value));
            }

            PanelInput::EncoderAbsolute {
                id: ControlId::NavEnc,
                value,
            } => {
                let total = self.presets.total_count();
                if total > 0 {
                    let index = (value * (total - 1) as f32 + 0.5) as usize;
                    self.presets.set_selected_index(host, index);
                    log.push(&format!("Preset {}", self.presets.selected_index() + 1));
                }
            }

            PanelInput::EncoderDelta {
                id: ControlId::OptEnc,
                delta,
            } => {
                // Fine adjustment of the first knob.
                let knob = self.knobs[0].knob_mut();
                let value = knob.value() + delta * 0.2;
                knob.set_value(host, value);
                panel.set_encoder_value(ControlId::MacroEnc(0), knob.value());
                log.push(&format!("OPT_ENC {:+.3}", delta));
            }

            PanelInput::Button { id, pressed: true } => self.on_button_press(host, panel, id, log),

            PanelInput::Button { id, pressed: false } => {
                if let Some(i) = bottom_button_index(id) {
                    self.indicators[i].set_state(host, IndicatorState::Off);
                }
            }

            _ => {}
        }
    }

    fn on_button_press(
        &mut self,
        host: &mut SceneHost,
        panel: &mut HwPanel,
        id: ControlId,
        log: &mut EventLog,
    ) {
        match id {
            ControlId::LeftTop => {
                let next = !self.bypass.button().state();
                self.bypass.button_mut().set_state(host, next);
                self.bypass
                    .button_mut()
                    .set_text(host, if next { "ON" } else { "OFF" });
                self.status_label
                    .set_text(host, if next { "Bypassed" } else { "Status" });
                log.push(if next { "Bypass ON" } else { "Bypass OFF" });
            }

            ControlId::LeftCenter => {
                self.wave_index = (self.wave_index + 1) % WAVE_VALUES.len();
                self.wave
                    .value_label_mut()
                    .set_text(host, WAVE_VALUES[self.wave_index]);
                self.wave.enum_widget_mut().trigger_flash(host);
                log.push(&format!("Wave: {}", WAVE_VALUES[self.wave_index]));
            }

            ControlId::LeftBottom => {
                self.presets.invalidate(host);
                log.push("List refreshed");
            }

            ControlId::NavBtn => {
                self.center_locked = !self.center_locked;
                let mode = if self.center_locked {
                    ScrollMode::CenterLocked
                } else {
                    ScrollMode::PageBased
                };
                self.presets.scroll_mode(host, mode);
                log.push(if self.center_locked {
                    "Scroll: CENTER"
                } else {
                    "Scroll: PAGE"
                });
            }

            ControlId::MacroBtn(n) if (n as usize) < 4 => {
                // Click-to-reset.
                let value = if self.knobs[n as usize].knob().is_centered() {
                    0.5
                } else {
                    0.0
                };
                self.knobs[n as usize].knob_mut().set_value(host, value);
                panel.set_encoder_value(ControlId::MacroEnc(n), value);
                log.push(&format!("{} reset", ControlId::MacroBtn(n).name()));
            }

            id => {
                if let Some(i) = bottom_button_index(id) {
                    self.indicators[i].set_state(host, IndicatorState::Pressed);
                }
                log.push(id.name());
            }
        }
    }
}

/// Map bottom-row buttons to indicator slots.
fn bottom_button_index(id: ControlId) -> Option<usize> {
    match id {
        ControlId::BottomLeft => Some(0),
        ControlId::BottomCenter => Some(1),
        ControlId::BottomRight => Some(2),
        _ => None,
    }
}
