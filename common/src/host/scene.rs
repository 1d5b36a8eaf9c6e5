//! Reference [`Host`] implementation backed by a generational arena.
//!
//! `SceneHost` is the in-memory element tree used by the simulator and the
//! unit tests. It is deliberately free of any rendering: the simulator walks
//! the tree each frame and paints it with embedded-graphics primitives,
//! while tests inspect it directly.
//!
//! # Determinism
//!
//! The host clock only advances through [`SceneHost::tick`], so timer and
//! animation behavior is fully deterministic under test. Notifications are
//! queued FIFO and drained with [`SceneHost::pop_event`]; a size-change
//! notification queued by a mutation is therefore handled before anything
//! queued after it in the same tick.
//!
//! # Staleness
//!
//! Every element slot carries a generation counter. Deleting an element
//! bumps the generation, so handles kept by a widget that was torn down are
//! inert: every `Host` method resolves them to "not found" and does
//! nothing.

use embedded_graphics::geometry::Point;
use embedded_graphics::pixelcolor::Rgb888;
use heapless::{Deque, String, Vec};

use super::{
    AnimId,
    AnimationSpec,
    DeferredTask,
    Easing,
    ElementId,
    EventKind,
    FontKind,
    Host,
    SizeSpec,
    TextAlign,
    TimerId,
    UiEvent,
    WidgetRef,
};
use crate::theme::opacity::OPA_FULL;

// =============================================================================
// Capacities
// =============================================================================

/// Maximum live elements in one scene.
pub const MAX_ELEMENTS: usize = 160;

/// Maximum pending one-shot timers.
pub const MAX_TIMERS: usize = 32;

/// Maximum concurrently running value animations.
pub const MAX_ANIMS: usize = 8;

/// Maximum queued notifications between drains.
pub const MAX_EVENTS: usize = 64;

/// Per-element text capacity; longer strings are truncated.
pub const TEXT_CAPACITY: usize = 48;

/// Maximum size-change watchers per element.
pub const MAX_WATCHERS: usize = 4;

// =============================================================================
// Element storage
// =============================================================================

/// Arc element state: background (track) angles plus the value span.
#[derive(Clone, Copy, Debug)]
pub struct ArcData {
    pub bg_start_deg: f32,
    pub bg_end_deg: f32,
    pub span_start_deg: f32,
    pub span_end_deg: f32,
    pub track_width: i32,
    pub span_width: i32,
    pub track_color: Rgb888,
    pub span_color: Rgb888,
}

impl ArcData {
    const fn new() -> Self {
        Self {
            bg_start_deg: 0.0,
            bg_end_deg: 360.0,
            span_start_deg: 0.0,
            span_end_deg: 0.0,
            track_width: 2,
            span_width: 2,
            track_color: crate::theme::color::INACTIVE,
            span_color: crate::theme::color::ACTIVE,
        }
    }
}

/// Line element state, endpoints relative to the parent origin.
#[derive(Clone, Copy, Debug)]
pub struct LineData {
    pub from: Point,
    pub to: Point,
    pub width: i32,
    pub color: Rgb888,
}

impl LineData {
    const fn new() -> Self {
        Self {
            from: Point::zero(),
            to: Point::zero(),
            width: 1,
            color: crate::theme::color::TEXT_PRIMARY,
        }
    }
}

/// Text element state.
#[derive(Clone, Debug)]
pub struct TextData {
    pub text: String<TEXT_CAPACITY>,
    pub color: Rgb888,
    pub align: TextAlign,
    pub font: FontKind,
    pub offset_x: i32,
}

impl TextData {
    fn new() -> Self {
        Self {
            text: String::new(),
            color: crate::theme::color::TEXT_PRIMARY,
            align: TextAlign::default(),
            font: FontKind::default(),
            offset_x: 0,
        }
    }
}

/// Kind-specific element payload.
#[derive(Clone, Debug)]
pub enum Payload {
    Box,
    Arc(ArcData),
    Line(LineData),
    Text(TextData),
}

#[derive(Clone, Debug)]
struct ElementRec {
    seq: u32,
    parent: Option<ElementId>,
    x: i32,
    y: i32,
    width: i32,
    height: i32,
    declared: (SizeSpec, SizeSpec),
    centered: bool,
    hidden: bool,
    bg_color: Option<Rgb888>,
    bg_opacity: u8,
    corner_radius: i32,
    size_watchers: Vec<WidgetRef, MAX_WATCHERS>,
    payload: Payload,
}

impl ElementRec {
    fn new(seq: u32, parent: Option<ElementId>, payload: Payload) -> Self {
        Self {
            seq,
            parent,
            x: 0,
            y: 0,
            width: 0,
            height: 0,
            declared: (SizeSpec::Content, SizeSpec::Content),
            centered: false,
            hidden: false,
            bg_color: None,
            bg_opacity: OPA_FULL,
            corner_radius: 0,
            size_watchers: Vec::new(),
            payload,
        }
    }
}

struct Slot {
    generation: u16,
    rec: Option<ElementRec>,
}

struct TimerRec {
    id: TimerId,
    due_at: u64,
    task: DeferredTask,
}

struct AnimRec {
    id: AnimId,
    spec: AnimationSpec,
    elapsed_ms: u32,
}

// =============================================================================
// SceneHost
// =============================================================================

/// In-memory retained element tree with timers and value animations.
pub struct SceneHost {
    slots: Vec<Slot, MAX_ELEMENTS>,
    timers: Vec<TimerRec, MAX_TIMERS>,
    anims: Vec<AnimRec, MAX_ANIMS>,
    events: Deque<UiEvent, MAX_EVENTS>,
    now_ms: u64,
    next_seq: u32,
    next_timer: u32,
    next_anim: u32,
}

impl SceneHost {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            timers: Vec::new(),
            anims: Vec::new(),
            events: Deque::new(),
            now_ms: 0,
            next_seq: 0,
            next_timer: 0,
            next_anim: 0,
        }
    }

    /// Advance the host clock, firing due one-shots and stepping animations.
    pub fn tick(&mut self, dt_ms: u32) {
        self.now_ms += u64::from(dt_ms);

        // One-shots fire in schedule order once due, then disappear.
        let now = self.now_ms;
        let mut idx = 0;
        while idx < self.timers.len() {
            if self.timers[idx].due_at <= now {
                let timer = self.timers.remove(idx);
                self.push_event(UiEvent {
                    target: timer.task.widget,
                    kind: EventKind::Timer(timer.task.tag),
                });
            } else {
                idx += 1;
            }
        }

        // Animations emit a step per tick while active and a final
        // completion event; both carry the animation id so widgets can
        // tell concurrent animations apart.
        let mut idx = 0;
        while idx < self.anims.len() {
            let anim = &mut self.anims[idx];
            anim.elapsed_ms = anim.elapsed_ms.saturating_add(dt_ms);

            if anim.elapsed_ms < anim.spec.delay_ms {
                idx += 1;
                continue;
            }

            let run = anim.elapsed_ms - anim.spec.delay_ms;
            let done = run >= anim.spec.duration_ms;
            let t = if anim.spec.duration_ms == 0 || done {
                1.0
            } else {
                run as f32 / anim.spec.duration_ms as f32
            };
            let eased = ease(anim.spec.easing, t);
            let delta = (anim.spec.to - anim.spec.from) as f32;
            let value = anim.spec.from + (delta * eased) as i32;

            let target = anim.spec.widget;
            let id = anim.id;
            self.push_event(UiEvent {
                target,
                kind: EventKind::AnimStep { anim: id, value },
            });
            if done {
                self.anims.remove(idx);
                self.push_event(UiEvent {
                    target,
                    kind: EventKind::AnimDone { anim: id },
                });
            } else {
                idx += 1;
            }
        }
    }

    /// Drain the next queued notification, FIFO.
    pub fn pop_event(&mut self) -> Option<UiEvent> {
        self.events.pop_front()
    }

    /// Number of pending one-shot timers (test observability).
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Number of running animations (test observability).
    pub fn running_anims(&self) -> usize {
        self.anims.len()
    }

    // --- read access for the renderer ---------------------------------------

    /// All live element ids. Paint order is ascending [`Self::seq`].
    pub fn ids(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.slots.iter().enumerate().filter_map(|(i, slot)| {
            slot.rec
                .as_ref()
                .map(|_| ElementId::new(i as u16, slot.generation))
        })
    }

    /// Monotonic creation sequence, for painter's-algorithm ordering.
    pub fn seq(&self, id: ElementId) -> u32 {
        self.get(id).map_or(0, |rec| rec.seq)
    }

    pub fn parent(&self, id: ElementId) -> Option<ElementId> {
        self.get(id).and_then(|rec| rec.parent)
    }

    /// Absolute top-left position (parent chain walked).
    pub fn absolute_pos(&self, id: ElementId) -> Point {
        let mut pos = Point::zero();
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let Some(rec) = self.get(current) else { break };
            pos += Point::new(rec.x, rec.y);
            cursor = rec.parent;
        }
        pos
    }

    /// Hidden, taking ancestors into account.
    pub fn effectively_hidden(&self, id: ElementId) -> bool {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let Some(rec) = self.get(current) else {
                return true;
            };
            if rec.hidden {
                return true;
            }
            cursor = rec.parent;
        }
        false
    }

    pub fn bg(&self, id: ElementId) -> Option<(Rgb888, u8, i32)> {
        let rec = self.get(id)?;
        rec.bg_color
            .map(|color| (color, rec.bg_opacity, rec.corner_radius))
    }

    pub fn payload(&self, id: ElementId) -> Option<&Payload> {
        self.get(id).map(|rec| &rec.payload)
    }

    // --- internals -----------------------------------------------------------

    fn get(&self, id: ElementId) -> Option<&ElementRec> {
        let slot = self.slots.get(id.index())?;
        if slot.generation != id.generation() {
            return None;
        }
        slot.rec.as_ref()
    }

    fn get_mut(&mut self, id: ElementId) -> Option<&mut ElementRec> {
        let slot = self.slots.get_mut(id.index())?;
        if slot.generation != id.generation() {
            return None;
        }
        slot.rec.as_mut()
    }

    fn push_event(&mut self, event: UiEvent) {
        // Dropping a notification would break the reactive model; the
        // capacity is sized far above anything one tick produces.
        let pushed = self.events.push_back(event);
        debug_assert!(pushed.is_ok(), "event queue overflow");
    }

    fn alloc(&mut self, parent: Option<ElementId>, payload: Payload) -> ElementId {
        let seq = self.next_seq;
        self.next_seq = self.next_seq.wrapping_add(1);
        let rec = ElementRec::new(seq, parent, payload);

        // Reuse the first free slot, otherwise grow.
        if let Some(index) = self.slots.iter().position(|slot| slot.rec.is_none()) {
            let slot = &mut self.slots[index];
            slot.rec = Some(rec);
            return ElementId::new(index as u16, slot.generation);
        }

        let index = self.slots.len();
        let pushed = self.slots.push(Slot {
            generation: 0,
            rec: Some(rec),
        });
        debug_assert!(pushed.is_ok(), "element arena exhausted");
        ElementId::new(index as u16, 0)
    }

    /// Re-center `id` within its parent if it is anchored.
    fn recenter(&mut self, id: ElementId) {
        let Some(rec) = self.get(id) else { return };
        if !rec.centered {
            return;
        }
        let (w, h) = (rec.width, rec.height);
        let Some(parent) = rec.parent else { return };
        let Some(parent_rec) = self.get(parent) else {
            return;
        };
        let x = (parent_rec.width - w) / 2;
        let y = (parent_rec.height - h) / 2;
        if let Some(rec) = self.get_mut(id) {
            rec.x = x;
            rec.y = y;
        }
    }

    fn recenter_children(&mut self, parent: ElementId) {
        let children: Vec<ElementId, MAX_ELEMENTS> = self
            .slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| {
                let rec = slot.rec.as_ref()?;
                (rec.parent == Some(parent) && rec.centered)
                    .then(|| ElementId::new(i as u16, slot.generation))
            })
            .collect();
        for child in children {
            self.recenter(child);
        }
    }

    fn apply_size(&mut self, id: ElementId, width: i32, height: i32) {
        let Some(rec) = self.get_mut(id) else { return };
        if rec.width == width && rec.height == height {
            return;
        }
        rec.width = width;
        rec.height = height;
        let watchers = rec.size_watchers.clone();

        self.recenter(id);
        self.recenter_children(id);

        // Notify only on an actual change; this is what bounds re-entrant
        // geometry recursion to a single extra idempotent pass.
        for widget in watchers {
            self.push_event(UiEvent {
                target: widget,
                kind: EventKind::SizeChanged { element: id },
            });
        }
    }

    fn delete_subtree(&mut self, id: ElementId) {
        let children: Vec<ElementId, MAX_ELEMENTS> = self
            .slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| {
                let rec = slot.rec.as_ref()?;
                (rec.parent == Some(id)).then(|| ElementId::new(i as u16, slot.generation))
            })
            .collect();
        for child in children {
            self.delete_subtree(child);
        }
        if let Some(slot) = self.slots.get_mut(id.index())
            && slot.generation == id.generation()
        {
            slot.rec = None;
            slot.generation = slot.generation.wrapping_add(1);
        }
    }
}

impl Default for SceneHost {
    fn default() -> Self {
        Self::new()
    }
}

fn ease(easing: Easing, t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    match easing {
        Easing::Linear => t,
        Easing::EaseInOut => {
            if t < 0.5 {
                2.0 * t * t
            } else {
                let u = -2.0 * t + 2.0;
                1.0 - u * u / 2.0
            }
        }
    }
}

impl Host for SceneHost {
    fn create_element(&mut self, parent: Option<ElementId>) -> ElementId {
        self.alloc(parent, Payload::Box)
    }

    fn create_arc(&mut self, parent: ElementId) -> ElementId {
        self.alloc(Some(parent), Payload::Arc(ArcData::new()))
    }

    fn create_line(&mut self, parent: ElementId) -> ElementId {
        self.alloc(Some(parent), Payload::Line(LineData::new()))
    }

    fn create_text(&mut self, parent: ElementId) -> ElementId {
        self.alloc(Some(parent), Payload::Text(TextData::new()))
    }

    fn delete_element(&mut self, id: ElementId) {
        self.delete_subtree(id);
    }

    fn set_size(&mut self, id: ElementId, width: i32, height: i32) {
        self.apply_size(id, width, height);
    }

    fn set_width(&mut self, id: ElementId, width: i32) {
        let Some(rec) = self.get(id) else { return };
        let height = rec.height;
        self.apply_size(id, width, height);
    }

    fn set_height(&mut self, id: ElementId, height: i32) {
        let Some(rec) = self.get(id) else { return };
        let width = rec.width;
        self.apply_size(id, width, height);
    }

    fn set_pos(&mut self, id: ElementId, x: i32, y: i32) {
        if let Some(rec) = self.get_mut(id) {
            rec.x = x;
            rec.y = y;
            rec.centered = false;
        }
    }

    fn center_in_parent(&mut self, id: ElementId) {
        if let Some(rec) = self.get_mut(id) {
            rec.centered = true;
        }
        self.recenter(id);
    }

    fn computed_size(&self, id: ElementId) -> (i32, i32) {
        self.get(id).map_or((0, 0), |rec| (rec.width, rec.height))
    }

    fn declared_size(&self, id: ElementId) -> (SizeSpec, SizeSpec) {
        self.get(id)
            .map_or((SizeSpec::Content, SizeSpec::Content), |rec| rec.declared)
    }

    fn set_declared_size(&mut self, id: ElementId, width: SizeSpec, height: SizeSpec) {
        let mut fixed = (None, None);
        if let Some(rec) = self.get_mut(id) {
            rec.declared = (width, height);
            if let SizeSpec::Px(w) = width {
                fixed.0 = Some(w);
            }
            if let SizeSpec::Px(h) = height {
                fixed.1 = Some(h);
            }
        }
        // Declared pixel sizes take effect immediately; content sizing is
        // resolved by whoever lays the element out.
        match fixed {
            (Some(w), Some(h)) => self.apply_size(id, w, h),
            (Some(w), None) => self.set_width(id, w),
            (None, Some(h)) => self.set_height(id, h),
            (None, None) => {}
        }
    }

    fn subscribe_size_changed(&mut self, id: ElementId, widget: WidgetRef) {
        if let Some(rec) = self.get_mut(id)
            && !rec.size_watchers.contains(&widget)
        {
            let pushed = rec.size_watchers.push(widget);
            debug_assert!(pushed.is_ok(), "watcher table exhausted");
        }
    }

    fn schedule_one_shot(&mut self, delay_ms: u32, task: DeferredTask) -> TimerId {
        let id = TimerId(self.next_timer);
        self.next_timer = self.next_timer.wrapping_add(1);
        let pushed = self.timers.push(TimerRec {
            id,
            due_at: self.now_ms + u64::from(delay_ms),
            task,
        });
        debug_assert!(pushed.is_ok(), "timer table exhausted");
        id
    }

    fn cancel_one_shot(&mut self, timer: TimerId) {
        self.timers.retain(|rec| rec.id != timer);
    }

    fn start_animation(&mut self, spec: AnimationSpec) -> AnimId {
        let id = AnimId(self.next_anim);
        self.next_anim = self.next_anim.wrapping_add(1);
        let pushed = self.anims.push(AnimRec {
            id,
            spec,
            elapsed_ms: 0,
        });
        debug_assert!(pushed.is_ok(), "animation table exhausted");
        id
    }

    fn cancel_animations(&mut self, widget: WidgetRef) {
        self.anims.retain(|rec| rec.spec.widget != widget);
    }

    fn now_ms(&self) -> u64 {
        self.now_ms
    }

    fn set_hidden(&mut self, id: ElementId, hidden: bool) {
        if let Some(rec) = self.get_mut(id) {
            rec.hidden = hidden;
        }
    }

    fn is_hidden(&self, id: ElementId) -> bool {
        self.get(id).is_none_or(|rec| rec.hidden)
    }

    fn set_bg_color(&mut self, id: ElementId, color: Rgb888) {
        if let Some(rec) = self.get_mut(id) {
            rec.bg_color = Some(color);
        }
    }

    fn set_bg_opacity(&mut self, id: ElementId, opacity: u8) {
        if let Some(rec) = self.get_mut(id) {
            rec.bg_opacity = opacity;
        }
    }

    fn set_corner_radius(&mut self, id: ElementId, radius: i32) {
        if let Some(rec) = self.get_mut(id) {
            rec.corner_radius = radius;
        }
    }

    fn set_arc_bg_angles(&mut self, id: ElementId, start_deg: f32, end_deg: f32) {
        if let Some(Payload::Arc(arc)) = self.get_mut(id).map(|rec| &mut rec.payload) {
            arc.bg_start_deg = start_deg;
            arc.bg_end_deg = end_deg;
        }
    }

    fn set_arc_span(&mut self, id: ElementId, start_deg: f32, end_deg: f32) {
        if let Some(Payload::Arc(arc)) = self.get_mut(id).map(|rec| &mut rec.payload) {
            arc.span_start_deg = start_deg;
            arc.span_end_deg = end_deg;
        }
    }

    fn set_arc_widths(&mut self, id: ElementId, track_width: i32, span_width: i32) {
        if let Some(Payload::Arc(arc)) = self.get_mut(id).map(|rec| &mut rec.payload) {
            arc.track_width = track_width;
            arc.span_width = span_width;
        }
    }

    fn set_arc_colors(&mut self, id: ElementId, track: Rgb888, span: Rgb888) {
        if let Some(Payload::Arc(arc)) = self.get_mut(id).map(|rec| &mut rec.payload) {
            arc.track_color = track;
            arc.span_color = span;
        }
    }

    fn set_line_points(&mut self, id: ElementId, from: Point, to: Point) {
        if let Some(Payload::Line(line)) = self.get_mut(id).map(|rec| &mut rec.payload) {
            line.from = from;
            line.to = to;
        }
    }

    fn set_line_width(&mut self, id: ElementId, width: i32) {
        if let Some(Payload::Line(line)) = self.get_mut(id).map(|rec| &mut rec.payload) {
            line.width = width;
        }
    }

    fn set_line_color(&mut self, id: ElementId, color: Rgb888) {
        if let Some(Payload::Line(line)) = self.get_mut(id).map(|rec| &mut rec.payload) {
            line.color = color;
        }
    }

    fn set_text(&mut self, id: ElementId, text: &str) {
        if let Some(Payload::Text(data)) = self.get_mut(id).map(|rec| &mut rec.payload) {
            data.text.clear();
            for c in text.chars() {
                if data.text.push(c).is_err() {
                    break;
                }
            }
        }
    }

    fn set_text_color(&mut self, id: ElementId, color: Rgb888) {
        if let Some(Payload::Text(data)) = self.get_mut(id).map(|rec| &mut rec.payload) {
            data.color = color;
        }
    }

    fn set_text_align(&mut self, id: ElementId, align: TextAlign) {
        if let Some(Payload::Text(data)) = self.get_mut(id).map(|rec| &mut rec.payload) {
            data.align = align;
        }
    }

    fn set_font(&mut self, id: ElementId, font: FontKind) {
        if let Some(Payload::Text(data)) = self.get_mut(id).map(|rec| &mut rec.payload) {
            data.font = font;
        }
    }

    fn set_text_offset(&mut self, id: ElementId, x: i32) {
        if let Some(Payload::Text(data)) = self.get_mut(id).map(|rec| &mut rec.payload) {
            data.offset_x = x;
        }
    }

    fn measured_text_width(&self, id: ElementId) -> i32 {
        match self.get(id).map(|rec| &rec.payload) {
            Some(Payload::Text(data)) => {
                data.text.chars().count() as i32 * data.font.char_width()
            }
            _ => 0,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::TaskTag;

    const W: WidgetRef = WidgetRef(7);

    #[test]
    fn test_stale_id_is_inert() {
        let mut host = SceneHost::new();
        let el = host.create_element(None);
        host.delete_element(el);

        // All of these must silently do nothing.
        host.set_size(el, 10, 10);
        host.set_bg_color(el, crate::theme::color::ACTIVE);
        assert_eq!(host.computed_size(el), (0, 0));
        assert!(host.is_hidden(el));

        // The reused slot gets a new generation, so the old id stays dead.
        let reused = host.create_element(None);
        assert_eq!(reused.index(), el.index());
        assert_ne!(reused.generation(), el.generation());
    }

    #[test]
    fn test_size_event_only_on_change() {
        let mut host = SceneHost::new();
        let el = host.create_element(None);
        host.subscribe_size_changed(el, W);

        host.set_size(el, 64, 64);
        assert!(host.pop_event().is_some());

        // Same size again: no notification.
        host.set_size(el, 64, 64);
        assert!(host.pop_event().is_none());

        host.set_width(el, 60);
        assert_eq!(
            host.pop_event(),
            Some(UiEvent {
                target: W,
                kind: EventKind::SizeChanged { element: el },
            })
        );
    }

    #[test]
    fn test_centered_child_follows_parent_resize() {
        let mut host = SceneHost::new();
        let parent = host.create_element(None);
        host.set_size(parent, 100, 100);
        let child = host.create_element(Some(parent));
        host.set_size(child, 20, 20);
        host.center_in_parent(child);
        assert_eq!(host.absolute_pos(child), Point::new(40, 40));

        host.set_size(parent, 60, 60);
        assert_eq!(host.absolute_pos(child), Point::new(20, 20));
    }

    #[test]
    fn test_one_shot_fires_once_and_cancels() {
        let mut host = SceneHost::new();
        let timer = host.schedule_one_shot(
            30,
            DeferredTask {
                widget: W,
                tag: TaskTag::FlashRevert,
            },
        );
        host.tick(20);
        assert!(host.pop_event().is_none());
        host.tick(20);
        assert_eq!(
            host.pop_event(),
            Some(UiEvent {
                target: W,
                kind: EventKind::Timer(TaskTag::FlashRevert),
            })
        );
        host.tick(100);
        assert!(host.pop_event().is_none());

        // Canceling an already-fired timer is a no-op.
        host.cancel_one_shot(timer);
    }

    #[test]
    fn test_cancel_pending_one_shot() {
        let mut host = SceneHost::new();
        let timer = host.schedule_one_shot(
            10,
            DeferredTask {
                widget: W,
                tag: TaskTag::InitGeometry,
            },
        );
        host.cancel_one_shot(timer);
        host.tick(50);
        assert!(host.pop_event().is_none());
    }

    #[test]
    fn test_animation_steps_then_completes() {
        let mut host = SceneHost::new();
        let anim = host.start_animation(AnimationSpec {
            widget: W,
            from: 0,
            to: 100,
            duration_ms: 40,
            delay_ms: 0,
            easing: Easing::Linear,
        });

        host.tick(20);
        assert_eq!(
            host.pop_event(),
            Some(UiEvent {
                target: W,
                kind: EventKind::AnimStep { anim, value: 50 },
            })
        );

        host.tick(20);
        assert_eq!(
            host.pop_event(),
            Some(UiEvent {
                target: W,
                kind: EventKind::AnimStep { anim, value: 100 },
            })
        );
        assert_eq!(
            host.pop_event(),
            Some(UiEvent {
                target: W,
                kind: EventKind::AnimDone { anim },
            })
        );
        assert_eq!(host.running_anims(), 0);
    }

    #[test]
    fn test_animation_delay_suppresses_steps() {
        let mut host = SceneHost::new();
        host.start_animation(AnimationSpec {
            widget: W,
            from: 0,
            to: 10,
            duration_ms: 20,
            delay_ms: 40,
            easing: Easing::Linear,
        });
        host.tick(30);
        assert!(host.pop_event().is_none());
    }

    #[test]
    fn test_cancel_animations_by_widget() {
        let mut host = SceneHost::new();
        host.start_animation(AnimationSpec {
            widget: W,
            from: 0,
            to: 10,
            duration_ms: 100,
            delay_ms: 0,
            easing: Easing::Linear,
        });
        host.cancel_animations(W);
        host.tick(50);
        assert!(host.pop_event().is_none());
    }

    #[test]
    fn test_measured_text_width_uses_font_metrics() {
        let mut host = SceneHost::new();
        let root = host.create_element(None);
        let text = host.create_text(root);
        host.set_font(text, FontKind::Small);
        host.set_text(text, "Cutoff");
        assert_eq!(
            host.measured_text_width(text),
            6 * FontKind::Small.char_width()
        );
    }

    #[test]
    fn test_delete_removes_subtree() {
        let mut host = SceneHost::new();
        let root = host.create_element(None);
        let child = host.create_element(Some(root));
        let grandchild = host.create_element(Some(child));
        host.delete_element(root);
        assert_eq!(host.computed_size(child), (0, 0));
        assert_eq!(host.computed_size(grandchild), (0, 0));
        assert_eq!(host.ids().count(), 0);
    }
}
