//! Virtual scrolling list with slot pooling.
//!
//! Renders only `visible_count` items using a fixed pool of reusable
//! slots, so rendering cost is bounded regardless of the logical list
//! size. The window over the logical list follows the selection under one
//! of two placement policies:
//!
//! - [`ScrollMode::PageBased`]: the window is always one of the fixed,
//!   non-overlapping pages; the cursor moves within a page until it would
//!   cross the boundary, then the whole window jumps by `visible_count`.
//! - [`ScrollMode::CenterLocked`]: the window continuously follows the
//!   selection, keeping it as close to the center slot as the list
//!   boundaries allow.
//!
//! Selection moves that keep the window in place take the highlight-only
//! fast path: the binder is asked to restyle the old and new slots and
//! nothing else is touched.

use heapless::Vec;

use crate::host::{ElementId, EventKind, Host, WidgetRef};

/// Hard cap on the slot pool; `visible_count` is clamped to it.
pub const MAX_VISIBLE: usize = 8;

/// Default number of visible slots.
pub const DEFAULT_VISIBLE_COUNT: usize = 5;

/// Item height used when nothing better is known yet.
const FALLBACK_ITEM_HEIGHT: i32 = 32;

/// Window placement policy.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum ScrollMode {
    /// Window shows fixed pages; the cursor moves within a page.
    #[default]
    PageBased,
    /// Selected item stays centered; the list scrolls around it.
    CenterLocked,
}

/// A reusable slot in the pool.
///
/// `payload` belongs to the owner: the list never constructs, inspects, or
/// replaces it. Binders typically park their per-slot sub-widgets here so
/// rebinding the same slot position can reuse them.
pub struct Slot<P> {
    pub container: ElementId,
    pub bound_index: Option<usize>,
    pub payload: Option<P>,
}

/// Owner-supplied slot content strategy.
pub trait SlotBinder {
    /// Whatever the owner wants to keep per slot (sub-widget handles etc.).
    type Payload;

    /// Create or update the slot's content for `index`, applying the
    /// selected treatment when `selected` is set.
    fn bind(
        &mut self,
        host: &mut dyn Host,
        slot: &mut Slot<Self::Payload>,
        index: usize,
        selected: bool,
    );

    /// Lightweight restyle when only the selection state of an
    /// already-bound slot changes. Return `false` (the default) to fall
    /// back to a full [`Self::bind`] of that slot.
    fn highlight(
        &mut self,
        host: &mut dyn Host,
        slot: &mut Slot<Self::Payload>,
        selected: bool,
    ) -> bool {
        let _ = (host, slot, selected);
        false
    }
}

/// Virtual scrolling list over `total_count` logical items.
pub struct VirtualList<B: SlotBinder> {
    me: WidgetRef,
    container: ElementId,
    binder: B,
    slots: Vec<Slot<B::Payload>, MAX_VISIBLE>,

    visible_count: usize,
    item_height: i32,
    auto_sizing: bool,

    total_count: usize,
    selected_index: usize,
    previous_selected: Option<usize>,
    /// `None` forces a window recalculation on the next rebind.
    window_start: Option<usize>,

    scroll_mode: ScrollMode,
    animate_scroll: bool,
    visible: bool,
    initialized: bool,

    padding: i32,
    item_gap: i32,
    margin_h: i32,
}

impl<B: SlotBinder> VirtualList<B> {
    pub fn new(host: &mut dyn Host, parent: ElementId, me: WidgetRef, binder: B) -> Self {
        let container = host.create_element(Some(parent));
        host.set_hidden(container, true);
        host.subscribe_size_changed(container, me);

        Self {
            me,
            container,
            binder,
            slots: Vec::new(),
            visible_count: DEFAULT_VISIBLE_COUNT,
            item_height: 0,
            auto_sizing: true,
            total_count: 0,
            selected_index: 0,
            previous_selected: None,
            window_start: None,
            scroll_mode: ScrollMode::default(),
            animate_scroll: false,
            visible: false,
            initialized: false,
            padding: crate::theme::layout::LIST_PAD,
            item_gap: crate::theme::layout::LIST_ITEM_GAP,
            margin_h: crate::theme::layout::MARGIN_MD,
        }
    }

    pub fn handle_event(&mut self, host: &mut dyn Host, kind: &EventKind) {
        if let EventKind::SizeChanged { .. } = kind
            && self.auto_sizing
        {
            self.recalculate_item_height(host);
        }
    }

    // --- fluent configuration ------------------------------------------------------

    /// Set the slot pool size. Recreates the pool if it already exists.
    pub fn visible_count(&mut self, host: &mut dyn Host, count: usize) -> &mut Self {
        let count = count.clamp(1, MAX_VISIBLE);
        if count == self.visible_count {
            return self;
        }
        self.visible_count = count;
        if self.initialized {
            for slot in &mut self.slots {
                host.delete_element(slot.container);
            }
            self.slots.clear();
            self.create_slots(host);
            if self.auto_sizing {
                self.recalculate_item_height(host);
            }
            self.window_start = None;
            self.rebind_all(host);
        }
        self
    }

    /// Fix the item height, disabling auto-sizing.
    pub fn item_height(&mut self, host: &mut dyn Host, height: i32) -> &mut Self {
        if height > 0 {
            self.item_height = height;
            self.auto_sizing = false;
            self.layout_slots(host);
        }
        self
    }

    pub fn scroll_mode(&mut self, host: &mut dyn Host, mode: ScrollMode) -> &mut Self {
        if self.scroll_mode != mode {
            self.scroll_mode = mode;
            self.window_start = None;
            if self.visible {
                self.rebind_all(host);
            }
        }
        self
    }

    /// Accepted for API compatibility; window transitions always rebind
    /// immediately — animated scrolling is not supported.
    pub fn animate_scroll(&mut self, enabled: bool) -> &mut Self {
        self.animate_scroll = enabled;
        self
    }

    pub fn padding(&mut self, host: &mut dyn Host, padding: i32) -> &mut Self {
        self.padding = padding;
        if self.auto_sizing {
            self.recalculate_item_height(host);
        }
        self.layout_slots(host);
        self
    }

    pub fn item_gap(&mut self, host: &mut dyn Host, gap: i32) -> &mut Self {
        self.item_gap = gap;
        if self.auto_sizing {
            self.recalculate_item_height(host);
        }
        self.layout_slots(host);
        self
    }

    pub fn margin_h(&mut self, host: &mut dyn Host, margin: i32) -> &mut Self {
        self.margin_h = margin;
        self.layout_slots(host);
        self
    }

    // --- data -------------------------------------------------------------------------

    /// Set the logical item count. Clamps the selection, and on an actual
    /// change forces a window recalculation and a full rebind. Returns
    /// whether the count changed.
    pub fn set_total_count(&mut self, host: &mut dyn Host, count: usize) -> bool {
        let changed = self.total_count != count;
        self.total_count = count;

        self.selected_index = if count == 0 {
            0
        } else {
            self.selected_index.min(count - 1)
        };

        if changed {
            self.window_start = None;
            self.previous_selected = None;
            self.rebind_all(host);
        }
        changed
    }

    pub const fn total_count(&self) -> usize {
        self.total_count
    }

    // --- navigation --------------------------------------------------------------------

    /// Move the selection. Within the current window this is a highlight
    /// -only update; a window move rebinds every visible slot.
    pub fn set_selected_index(&mut self, host: &mut dyn Host, index: usize) {
        if self.total_count == 0 {
            return;
        }
        let index = index.min(self.total_count - 1);
        if self.selected_index == index {
            return;
        }

        let old_index = self.selected_index;
        self.selected_index = index;

        if self.visible {
            self.update_selection(host, old_index, index);
        }
    }

    pub const fn selected_index(&self) -> usize {
        self.selected_index
    }

    /// First logical index of the current window.
    pub fn window_start(&self) -> usize {
        self.window_start.unwrap_or(0)
    }

    /// Selection as of the last rebind or highlight pass; `None` right
    /// after a count change invalidated the tracker.
    pub const fn previous_selected(&self) -> Option<usize> {
        self.previous_selected
    }

    /// Force a full rebind of all visible slots (external data mutation
    /// without a count change).
    pub fn invalidate(&mut self, host: &mut dyn Host) {
        self.rebind_all(host);
    }

    /// Rebind only the slot currently showing `logical_index`; no-op when
    /// it is outside the window.
    pub fn invalidate_index(&mut self, host: &mut dyn Host, logical_index: usize) {
        let Some(slot_idx) = self.slot_index_of(logical_index) else {
            return;
        };
        let selected = logical_index == self.selected_index;
        let binder = &mut self.binder;
        binder.bind(host, &mut self.slots[slot_idx], logical_index, selected);
    }

    // --- slot access -------------------------------------------------------------------

    /// Slot currently bound to `logical_index`, if visible.
    pub fn slot_for_index(&self, logical_index: usize) -> Option<&Slot<B::Payload>> {
        self.slot_index_of(logical_index).map(|i| &self.slots[i])
    }

    pub fn slots(&self) -> &[Slot<B::Payload>] {
        &self.slots
    }

    pub fn binder(&self) -> &B {
        &self.binder
    }

    pub fn binder_mut(&mut self) -> &mut B {
        &mut self.binder
    }

    pub const fn element(&self) -> ElementId {
        self.container
    }

    /// The widget token this list was registered under.
    pub const fn token(&self) -> WidgetRef {
        self.me
    }

    // --- visibility --------------------------------------------------------------------

    /// Show the list, creating the slot pool on first use.
    pub fn show(&mut self, host: &mut dyn Host) {
        host.set_hidden(self.container, false);
        self.visible = true;

        if !self.initialized {
            if self.auto_sizing {
                self.recalculate_item_height(host);
            }
            self.create_slots(host);
            self.initialized = true;
        }

        self.rebind_all(host);
    }

    pub fn hide(&mut self, host: &mut dyn Host) {
        host.set_hidden(self.container, true);
        self.visible = false;
    }

    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    // --- teardown ----------------------------------------------------------------------

    /// Delete all backing elements. Slot payloads are handed back to the
    /// drop of the owner's binder/payload types untouched.
    pub fn destroy(&mut self, host: &mut dyn Host) {
        self.slots.clear();
        host.delete_element(self.container);
        self.initialized = false;
        self.visible = false;
    }

    // --- internals ---------------------------------------------------------------------

    fn create_slots(&mut self, host: &mut dyn Host) {
        if self.item_height == 0 {
            self.item_height = FALLBACK_ITEM_HEIGHT;
        }

        for _ in 0..self.visible_count {
            let container = host.create_element(Some(self.container));
            host.set_hidden(container, true);
            let pushed = self.slots.push(Slot {
                container,
                bound_index: None,
                payload: None,
            });
            debug_assert!(pushed.is_ok(), "slot pool exceeds MAX_VISIBLE");
        }
        self.layout_slots(host);
    }

    fn layout_slots(&mut self, host: &mut dyn Host) {
        let (container_w, _) = host.computed_size(self.container);
        let inset = self.padding + self.margin_h;
        let slot_w = (container_w - 2 * inset).max(0);

        for (idx, slot) in self.slots.iter().enumerate() {
            let y = self.padding + idx as i32 * (self.item_height + self.item_gap);
            host.set_pos(slot.container, inset, y);
            host.set_size(slot.container, slot_w, self.item_height);
        }
    }

    /// Derive the item height from the container content height.
    fn recalculate_item_height(&mut self, host: &mut dyn Host) {
        if !self.auto_sizing {
            return;
        }
        let (_, container_h) = host.computed_size(self.container);
        let content_h = container_h - 2 * self.padding;
        if content_h <= 0 {
            // Not yet laid out; retried on the next size notification.
            return;
        }

        let total_gaps = self.item_gap * (self.visible_count as i32 - 1);
        let calculated = (content_h - total_gaps) / self.visible_count as i32;
        if calculated > 0 && calculated != self.item_height {
            self.item_height = calculated;
            self.layout_slots(host);
        }
    }

    fn calculate_window_start(&self) -> usize {
        if self.total_count == 0 {
            return 0;
        }

        match self.scroll_mode {
            ScrollMode::CenterLocked => {
                let center = self.visible_count / 2;
                let max_start = self.total_count.saturating_sub(self.visible_count);
                self.selected_index.saturating_sub(center).min(max_start)
            }
            ScrollMode::PageBased => {
                (self.selected_index / self.visible_count) * self.visible_count
            }
        }
    }

    fn slot_index_of(&self, logical_index: usize) -> Option<usize> {
        let start = self.window_start?;
        if logical_index < start || logical_index >= start + self.visible_count {
            return None;
        }
        let slot_idx = logical_index - start;
        (slot_idx < self.slots.len()).then_some(slot_idx)
    }

    fn rebind_all(&mut self, host: &mut dyn Host) {
        let start = self.calculate_window_start();
        self.window_start = Some(start);

        let total = self.total_count;
        let selected = self.selected_index;
        let binder = &mut self.binder;

        for (slot_idx, slot) in self.slots.iter_mut().enumerate() {
            let logical = start + slot_idx;
            if logical < total {
                slot.bound_index = Some(logical);
                binder.bind(host, slot, logical, logical == selected);
                host.set_hidden(slot.container, false);
            } else {
                slot.bound_index = None;
                host.set_hidden(slot.container, true);
            }
        }

        self.previous_selected = Some(selected);
    }

    fn update_selection(&mut self, host: &mut dyn Host, old_index: usize, new_index: usize) {
        let new_start = self.calculate_window_start();

        if Some(new_start) != self.window_start {
            // Window moved. Animated transition is unsupported; rebind
            // immediately regardless of the animate_scroll flag.
            self.rebind_all(host);
        } else {
            self.update_highlight_only(host, old_index, new_index);
        }
    }

    /// O(1) fast path: only the old and new selected slots are touched.
    fn update_highlight_only(&mut self, host: &mut dyn Host, old_index: usize, new_index: usize) {
        for (logical, selected) in [(old_index, false), (new_index, true)] {
            let Some(slot_idx) = self.slot_index_of(logical) else {
                continue;
            };
            let binder = &mut self.binder;
            let slot = &mut self.slots[slot_idx];
            if !binder.highlight(host, slot, selected) {
                binder.bind(host, slot, logical, selected);
            }
        }
        self.previous_selected = Some(new_index);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::scene::SceneHost;

    /// Binder that counts calls; `fast_highlight` selects whether the
    /// highlight fast path is implemented.
    struct CountingBinder {
        binds: usize,
        highlights: usize,
        fast_highlight: bool,
    }

    impl CountingBinder {
        fn new(fast_highlight: bool) -> Self {
            Self {
                binds: 0,
                highlights: 0,
                fast_highlight,
            }
        }
    }

    impl SlotBinder for CountingBinder {
        type Payload = u32;

        fn bind(
            &mut self,
            _host: &mut dyn Host,
            slot: &mut Slot<u32>,
            index: usize,
            _selected: bool,
        ) {
            self.binds += 1;
            // Exercise payload reuse: stamp on first bind, keep after.
            if slot.payload.is_none() {
                slot.payload = Some(index as u32);
            }
        }

        fn highlight(
            &mut self,
            _host: &mut dyn Host,
            _slot: &mut Slot<u32>,
            _selected: bool,
        ) -> bool {
            if self.fast_highlight {
                self.highlights += 1;
            }
            self.fast_highlight
        }
    }

    fn list_with(
        host: &mut SceneHost,
        total: usize,
        mode: ScrollMode,
        fast_highlight: bool,
    ) -> VirtualList<CountingBinder> {
        let screen = host.create_element(None);
        let parent = host.create_element(Some(screen));
        host.set_size(parent, 160, 120);
        let mut list = VirtualList::new(host, parent, WidgetRef(9), CountingBinder::new(fast_highlight));
        host.set_size(list.element(), 160, 120);
        list.scroll_mode(host, mode);
        list.set_total_count(host, total);
        list.show(host);
        list
    }

    #[test]
    fn test_page_based_walk() {
        let mut host = SceneHost::new();
        let mut list = list_with(&mut host, 10, ScrollMode::PageBased, true);

        assert_eq!(list.window_start(), 0);
        let binds_after_show = list.binder().binds;

        // Move within the page: highlight only.
        list.set_selected_index(&mut host, 4);
        assert_eq!(list.window_start(), 0);
        assert_eq!(list.binder().binds, binds_after_show);
        assert_eq!(list.binder().highlights, 2);

        // Cross the page boundary: full rebind of all five slots.
        list.set_selected_index(&mut host, 5);
        assert_eq!(list.window_start(), 5);
        assert_eq!(list.binder().binds, binds_after_show + 5);
    }

    #[test]
    fn test_center_locked_fast_path_at_boundary() {
        let mut host = SceneHost::new();
        let mut list = list_with(&mut host, 100, ScrollMode::CenterLocked, true);

        // At the top boundary the window cannot move, so a selection step
        // is exactly two highlight calls and zero binds.
        let binds = list.binder().binds;
        list.set_selected_index(&mut host, 1);
        assert_eq!(list.window_start(), 0);
        assert_eq!(list.binder().binds, binds);
        assert_eq!(list.binder().highlights, 2);
    }

    #[test]
    fn test_center_locked_follows_selection_mid_list() {
        let mut host = SceneHost::new();
        let mut list = list_with(&mut host, 100, ScrollMode::CenterLocked, true);

        list.set_selected_index(&mut host, 50);
        assert_eq!(list.window_start(), 48);
        list.set_selected_index(&mut host, 51);
        assert_eq!(list.window_start(), 49);

        // Bottom boundary clamps.
        list.set_selected_index(&mut host, 99);
        assert_eq!(list.window_start(), 95);
    }

    #[test]
    fn test_window_invariant_for_all_selections() {
        let mut host = SceneHost::new();
        for mode in [ScrollMode::PageBased, ScrollMode::CenterLocked] {
            for total in [0usize, 1, 4, 5, 6, 23] {
                let mut list = list_with(&mut host, total, mode, true);
                for selected in 0..total {
                    list.set_selected_index(&mut host, selected);
                    let start = list.window_start();

                    // The selection is always inside the window right
                    // after the call completes.
                    assert!(
                        (start..start + DEFAULT_VISIBLE_COUNT).contains(&selected),
                        "{mode:?} total={total} sel={selected} start={start}"
                    );

                    match mode {
                        // Fixed non-overlapping pages; a partial last page
                        // keeps its page-aligned start and hides the tail
                        // slots.
                        ScrollMode::PageBased => {
                            assert_eq!(start % DEFAULT_VISIBLE_COUNT, 0);
                        }
                        // Continuous windows never run past the end.
                        ScrollMode::CenterLocked => {
                            let max_start = total.saturating_sub(DEFAULT_VISIBLE_COUNT);
                            assert!(start <= max_start, "{mode:?} total={total} sel={selected}");
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_highlight_falls_back_to_bind() {
        let mut host = SceneHost::new();
        let mut list = list_with(&mut host, 10, ScrollMode::PageBased, false);

        let binds = list.binder().binds;
        list.set_selected_index(&mut host, 2);
        // No highlight implementation: old and new slots are re-bound.
        assert_eq!(list.binder().binds, binds + 2);
        assert_eq!(list.binder().highlights, 0);
    }

    #[test]
    fn test_set_total_count_clamps_selection() {
        let mut host = SceneHost::new();
        let mut list = list_with(&mut host, 20, ScrollMode::PageBased, true);
        list.set_selected_index(&mut host, 17);

        assert!(list.set_total_count(&mut host, 5));
        assert_eq!(list.selected_index(), 4);
        assert_eq!(list.window_start(), 0);

        assert!(list.set_total_count(&mut host, 0));
        assert_eq!(list.selected_index(), 0);
        // A count change invalidates the previous-selection tracker before
        // the rebind re-stamps it.
        assert_eq!(list.previous_selected(), Some(0));

        // Unchanged count reports false and does not rebind.
        let binds = list.binder().binds;
        assert!(!list.set_total_count(&mut host, 0));
        assert_eq!(list.binder().binds, binds);
    }

    #[test]
    fn test_empty_list_hides_all_slots() {
        let mut host = SceneHost::new();
        let mut list = list_with(&mut host, 3, ScrollMode::PageBased, true);
        list.set_total_count(&mut host, 0);
        for slot in list.slots() {
            assert!(host.is_hidden(slot.container));
            assert_eq!(slot.bound_index, None);
        }
    }

    #[test]
    fn test_partial_last_page_hides_tail_slots() {
        let mut host = SceneHost::new();
        let mut list = list_with(&mut host, 7, ScrollMode::PageBased, true);
        list.set_selected_index(&mut host, 6);
        assert_eq!(list.window_start(), 5);

        // Slots for 5 and 6 visible, the remaining three hidden.
        let hidden: usize = list
            .slots()
            .iter()
            .filter(|slot| host.is_hidden(slot.container))
            .count();
        assert_eq!(hidden, 3);
    }

    #[test]
    fn test_invalidate_index_only_when_visible() {
        let mut host = SceneHost::new();
        let mut list = list_with(&mut host, 20, ScrollMode::PageBased, true);

        let binds = list.binder().binds;
        list.invalidate_index(&mut host, 2);
        assert_eq!(list.binder().binds, binds + 1);

        // Out of window: no-op.
        list.invalidate_index(&mut host, 12);
        assert_eq!(list.binder().binds, binds + 1);
    }

    #[test]
    fn test_slot_mapping_is_offset_arithmetic() {
        let mut host = SceneHost::new();
        let mut list = list_with(&mut host, 20, ScrollMode::PageBased, true);
        list.set_selected_index(&mut host, 7);
        assert_eq!(list.window_start(), 5);

        let slot = list.slot_for_index(7).unwrap();
        assert_eq!(slot.bound_index, Some(7));
        assert!(list.slot_for_index(4).is_none());
        assert!(list.slot_for_index(10).is_none());
    }

    #[test]
    fn test_payload_survives_rebinds() {
        let mut host = SceneHost::new();
        let mut list = list_with(&mut host, 20, ScrollMode::PageBased, true);

        let stamped = list.slots()[0].payload;
        assert!(stamped.is_some());
        list.set_selected_index(&mut host, 9);
        list.set_selected_index(&mut host, 11);
        // Same slot position, new logical index, original payload object.
        assert_eq!(list.slots()[0].payload, stamped);
    }

    #[test]
    fn test_auto_item_height_from_container() {
        let mut host = SceneHost::new();
        let mut list = list_with(&mut host, 10, ScrollMode::PageBased, true);

        // content = 120 - 2*4 = 112; gaps = 2*4 = 8; (112-8)/5 = 20.
        let (_, slot_h) = host.computed_size(list.slots()[0].container);
        assert_eq!(slot_h, 20);

        // Container resize recomputes the height reactively.
        host.set_size(list.element(), 160, 230);
        while let Some(event) = host.pop_event() {
            list.handle_event(&mut host, &event.kind);
        }
        let (_, slot_h) = host.computed_size(list.slots()[0].container);
        assert_eq!(slot_h, (230 - 8 - 8) / 5);
    }

    #[test]
    fn test_visible_count_recreates_pool() {
        let mut host = SceneHost::new();
        let mut list = list_with(&mut host, 10, ScrollMode::PageBased, true);
        assert_eq!(list.slots().len(), 5);

        list.visible_count(&mut host, 3);
        assert_eq!(list.slots().len(), 3);
        // Window recalculated against the new pool.
        assert!(list.window_start() <= 7);

        // Payloads were discarded with the old pool; fresh slots restamp.
        assert!(list.slots()[0].payload.is_some());
    }

    #[test]
    fn test_selection_ignored_when_empty() {
        let mut host = SceneHost::new();
        let mut list = list_with(&mut host, 0, ScrollMode::PageBased, true);
        list.set_selected_index(&mut host, 3);
        assert_eq!(list.selected_index(), 0);
    }
}
