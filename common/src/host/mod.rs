//! Abstract contract to the retained-mode host toolkit.
//!
//! The widget core never talks to a concrete UI toolkit directly. Everything
//! it needs — element creation, sizing, size-change notifications, deferred
//! one-shot callbacks, value animations, and vector arc/line/text styling —
//! goes through the [`Host`] trait. The crate ships one reference
//! implementation, [`scene::SceneHost`], used by the simulator and by the
//! unit tests.
//!
//! # Event model
//!
//! The host is single-threaded and cooperative. Mutations enqueue
//! [`UiEvent`]s; the owner drains them once per tick and routes each one to
//! the widget identified by its [`WidgetRef`] token. Deferred work is a
//! plain value ([`DeferredTask`]: token + [`TaskTag`]), never a closure, so
//! a widget that has been torn down simply never sees its late events.

pub mod scene;

use embedded_graphics::geometry::Point;
use embedded_graphics::pixelcolor::Rgb888;

/// Handle to a retained element. Contains a generation counter so handles
/// to deleted elements become inert instead of aliasing a reused arena slot.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ElementId {
    index: u16,
    generation: u16,
}

impl ElementId {
    pub const fn new(index: u16, generation: u16) -> Self {
        Self { index, generation }
    }

    pub const fn index(self) -> usize {
        self.index as usize
    }

    pub const fn generation(self) -> u16 {
        self.generation
    }
}

/// Opaque token identifying a widget in event dispatch. The composition
/// layer assigns tokens; widgets embed them in subscriptions and deferred
/// tasks so the driver can route events back.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct WidgetRef(pub u32);

impl WidgetRef {
    /// Derive a child token. Composition components hand these to their
    /// child widgets; callers must space their base tokens accordingly.
    pub const fn child(self, n: u32) -> Self {
        Self(self.0 + n)
    }
}

/// Handle to a pending one-shot timer.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct TimerId(pub u32);

/// Handle to a running value animation.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct AnimId(pub u32);

/// Declared sizing of an element, as opposed to its computed pixel box.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum SizeSpec {
    /// Size follows the element's content; the layout pass decides.
    #[default]
    Content,
    /// Fixed pixel size.
    Px(i32),
}

impl SizeSpec {
    pub const fn is_content(self) -> bool {
        matches!(self, Self::Content)
    }
}

/// What a deferred one-shot should do when it fires. Tags are shared
/// vocabulary between widgets and the driver; the host never interprets
/// them.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TaskTag {
    /// First geometry pass, deferred to the tick after construction so the
    /// host layout has produced real dimensions.
    InitGeometry,
    /// Revert a flash highlight to its base color.
    FlashRevert,
    /// Measure label text against its container and decide on scrolling.
    OverflowCheck,
    /// End of the marquee pause; scroll the label back.
    ScrollResume,
}

/// A scheduled one-shot: which widget to wake, and why.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct DeferredTask {
    pub widget: WidgetRef,
    pub tag: TaskTag,
}

/// Easing curve for value animations.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Easing {
    #[default]
    Linear,
    EaseInOut,
}

/// A time-based value animation delivered to `widget` as a series of
/// [`EventKind::AnimStep`] events followed by [`EventKind::AnimDone`].
#[derive(Clone, Copy, Debug)]
pub struct AnimationSpec {
    pub widget: WidgetRef,
    pub from: i32,
    pub to: i32,
    pub duration_ms: u32,
    pub delay_ms: u32,
    pub easing: Easing,
}

/// Horizontal text alignment inside a text element's box.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

/// Abstract font selector. The renderer maps these to concrete fonts; the
/// host only needs per-glyph metrics for overflow measurement.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum FontKind {
    /// Caption / list text.
    Small,
    /// Value text.
    #[default]
    Body,
}

impl FontKind {
    /// Advance width of one glyph (monospace panel fonts).
    pub const fn char_width(self) -> i32 {
        match self {
            Self::Small => 6,
            Self::Body => 8,
        }
    }

    pub const fn char_height(self) -> i32 {
        match self {
            Self::Small => 11,
            Self::Body => 15,
        }
    }
}

/// Corner radius sentinel that renders a box as a circle/pill regardless of
/// its size.
pub const RADIUS_CIRCLE: i32 = i32::MAX;

/// Notification payload drained by the driver each tick.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum EventKind {
    /// The element's computed size actually changed.
    SizeChanged { element: ElementId },
    /// A one-shot scheduled with [`Host::schedule_one_shot`] came due.
    Timer(TaskTag),
    /// A value animation produced a new interpolated value.
    AnimStep { anim: AnimId, value: i32 },
    /// A value animation ran to completion (final step already delivered).
    AnimDone { anim: AnimId },
}

/// A routed notification: which widget, and what happened.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct UiEvent {
    pub target: WidgetRef,
    pub kind: EventKind,
}

/// The retained-mode toolkit contract consumed by every widget.
///
/// All methods taking an [`ElementId`] are required to be no-ops (or return
/// zero/default values) for stale or never-valid ids: degenerate input is
/// silently absorbed, never an error.
pub trait Host {
    // --- element tree -----------------------------------------------------

    /// Create a plain box element. `None` parent creates a root.
    fn create_element(&mut self, parent: Option<ElementId>) -> ElementId;
    /// Create an annular-arc element (track + value span).
    fn create_arc(&mut self, parent: ElementId) -> ElementId;
    /// Create a two-point line element.
    fn create_line(&mut self, parent: ElementId) -> ElementId;
    /// Create a text element.
    fn create_text(&mut self, parent: ElementId) -> ElementId;
    /// Delete an element and its entire subtree.
    fn delete_element(&mut self, id: ElementId);

    // --- geometry ---------------------------------------------------------

    fn set_size(&mut self, id: ElementId, width: i32, height: i32);
    fn set_width(&mut self, id: ElementId, width: i32);
    fn set_height(&mut self, id: ElementId, height: i32);
    /// Position relative to the parent's origin.
    fn set_pos(&mut self, id: ElementId, x: i32, y: i32);
    /// Center in the parent and keep it centered across parent resizes.
    fn center_in_parent(&mut self, id: ElementId);
    /// Current computed pixel box; (0, 0) before the first layout.
    fn computed_size(&self, id: ElementId) -> (i32, i32);
    fn declared_size(&self, id: ElementId) -> (SizeSpec, SizeSpec);
    fn set_declared_size(&mut self, id: ElementId, width: SizeSpec, height: SizeSpec);

    // --- events, timers, animations ----------------------------------------

    /// Deliver [`EventKind::SizeChanged`] to `widget` whenever the
    /// element's computed size changes.
    fn subscribe_size_changed(&mut self, id: ElementId, widget: WidgetRef);
    /// Schedule a one-shot; fires on the first tick at or after the delay.
    fn schedule_one_shot(&mut self, delay_ms: u32, task: DeferredTask) -> TimerId;
    /// Cancel a pending one-shot. Unknown/expired ids are ignored.
    fn cancel_one_shot(&mut self, timer: TimerId);
    fn start_animation(&mut self, spec: AnimationSpec) -> AnimId;
    /// Cancel every running animation addressed to `widget`.
    fn cancel_animations(&mut self, widget: WidgetRef);
    /// Milliseconds elapsed on the host clock. Advances only on ticks.
    fn now_ms(&self) -> u64;

    // --- common style -------------------------------------------------------

    fn set_hidden(&mut self, id: ElementId, hidden: bool);
    fn is_hidden(&self, id: ElementId) -> bool;
    fn set_bg_color(&mut self, id: ElementId, color: Rgb888);
    fn set_bg_opacity(&mut self, id: ElementId, opacity: u8);
    fn set_corner_radius(&mut self, id: ElementId, radius: i32);

    // --- arc style ----------------------------------------------------------

    /// Angles in degrees, 0° = 3 o'clock, increasing clockwise (screen
    /// coordinates). The track is the full background arc.
    fn set_arc_bg_angles(&mut self, id: ElementId, start_deg: f32, end_deg: f32);
    /// Value span; callers must pass `start_deg <= end_deg`.
    fn set_arc_span(&mut self, id: ElementId, start_deg: f32, end_deg: f32);
    fn set_arc_widths(&mut self, id: ElementId, track_width: i32, span_width: i32);
    fn set_arc_colors(&mut self, id: ElementId, track: Rgb888, span: Rgb888);

    // --- line style ---------------------------------------------------------

    /// Endpoints relative to the parent's origin.
    fn set_line_points(&mut self, id: ElementId, from: Point, to: Point);
    fn set_line_width(&mut self, id: ElementId, width: i32);
    fn set_line_color(&mut self, id: ElementId, color: Rgb888);

    // --- text ---------------------------------------------------------------

    /// Replace the element's text. Overlong text is truncated to the host's
    /// per-element capacity.
    fn set_text(&mut self, id: ElementId, text: &str);
    fn set_text_color(&mut self, id: ElementId, color: Rgb888);
    fn set_text_align(&mut self, id: ElementId, align: TextAlign);
    fn set_font(&mut self, id: ElementId, font: FontKind);
    /// Horizontal draw offset inside the element box (marquee scrolling).
    fn set_text_offset(&mut self, id: ElementId, x: i32);
    /// Width of the element's current text in pixels.
    fn measured_text_width(&self, id: ElementId) -> i32;
}
