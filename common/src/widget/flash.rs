//! Value-change flash: a debounced, self-expiring color pulse.
//!
//! Triggering applies the flash color immediately and schedules a one-shot
//! revert. Triggering again while the revert is pending cancels and
//! replaces it, so rapid repeated triggers read as one sustained flash.
//! Triggers arriving faster than [`FLASH_RETRIGGER_MIN_MS`] are dropped
//! outright to bound timer churn during encoder scrubbing; the policy is
//! the same for every flashing widget.

use crate::host::{DeferredTask, Host, TaskTag, TimerId, WidgetRef};
use crate::theme::animation::{FLASH_DURATION_MS, FLASH_RETRIGGER_MIN_MS};

/// Per-widget flash state. At most one revert timer is outstanding.
#[derive(Debug, Default)]
pub struct FlashAnimator {
    timer: Option<TimerId>,
    last_trigger_ms: Option<u64>,
}

impl FlashAnimator {
    pub const fn new() -> Self {
        Self {
            timer: None,
            last_trigger_ms: None,
        }
    }

    /// Whether a revert is currently pending.
    pub const fn is_flashing(&self) -> bool {
        self.timer.is_some()
    }

    /// Request a flash for `widget`. Returns `true` if the caller should
    /// apply the flash color now; `false` means the trigger was
    /// rate-limited away.
    pub fn trigger(&mut self, host: &mut dyn Host, widget: WidgetRef) -> bool {
        let now = host.now_ms();
        if let Some(last) = self.last_trigger_ms
            && now.saturating_sub(last) < u64::from(FLASH_RETRIGGER_MIN_MS)
        {
            return false;
        }
        self.last_trigger_ms = Some(now);

        if let Some(timer) = self.timer.take() {
            host.cancel_one_shot(timer);
        }
        self.timer = Some(host.schedule_one_shot(
            FLASH_DURATION_MS,
            DeferredTask {
                widget,
                tag: TaskTag::FlashRevert,
            },
        ));
        true
    }

    /// Acknowledge the revert timer firing. The caller applies the base
    /// color.
    pub fn on_revert(&mut self) {
        self.timer = None;
    }

    /// Cancel any pending revert; part of widget teardown so a late timer
    /// can never address a dead widget.
    pub fn cancel(&mut self, host: &mut dyn Host) {
        if let Some(timer) = self.timer.take() {
            host.cancel_one_shot(timer);
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
    use crate::host::{EventKind, UiEvent};

    const W: WidgetRef = WidgetRef(3);

    #[test]
    fn test_trigger_schedules_single_revert() {
        let mut host = SceneHost::new();
        let mut flash = FlashAnimator::new();

        assert!(flash.trigger(&mut host, W));
        assert!(flash.is_flashing());
        assert_eq!(host.pending_timers(), 1);

        host.tick(FLASH_DURATION_MS);
        assert_eq!(
            host.pop_event(),
            Some(UiEvent {
                target: W,
                kind: EventKind::Timer(TaskTag::FlashRevert),
            })
        );
        flash.on_revert();
        assert!(!flash.is_flashing());
    }

    #[test]
    fn test_retrigger_replaces_pending_revert() {
        let mut host = SceneHost::new();
        let mut flash = FlashAnimator::new();

        assert!(flash.trigger(&mut host, W));
        host.tick(FLASH_RETRIGGER_MIN_MS);
        assert!(flash.trigger(&mut host, W));

        // The first revert was canceled; exactly one timer remains.
        assert_eq!(host.pending_timers(), 1);
    }

    #[test]
    fn test_rate_limit_drops_fast_triggers() {
        let mut host = SceneHost::new();
        let mut flash = FlashAnimator::new();

        assert!(flash.trigger(&mut host, W));
        host.tick(FLASH_RETRIGGER_MIN_MS / 2);
        assert!(!flash.trigger(&mut host, W));

        // The original revert is untouched.
        assert_eq!(host.pending_timers(), 1);
    }

    #[test]
    fn test_cancel_removes_pending_timer() {
        let mut host = SceneHost::new();
        let mut flash = FlashAnimator::new();
        flash.trigger(&mut host, W);
        flash.cancel(&mut host);
        assert_eq!(host.pending_timers(), 0);

        host.tick(1000);
        assert!(host.pop_event().is_none());
    }
}
