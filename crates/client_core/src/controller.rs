//! Mode and selection input handling.
//!
//! Mode changes go through a leading and trailing throttle followed by a
//! dedupe; each surviving value updates the swap icon and asks for a new
//! title. Selection
//! changes are delayed by a fixed settle interval and then act on whatever is
//! selected at that moment. Selection is neither throttled nor deduplicated:
//! every settled change fires on its own.

use shared::domain::{DisplayMode, MenuEntry};
use tokio::time::Instant;
use tracing::debug;

use crate::{
    bus::EventBus,
    settings::HomeSettings,
    state::HomeState,
    timing::{Dedupe, SettleDelay, Throttle},
};

#[derive(Debug)]
pub struct ModeSelectionController {
    mode_throttle: Throttle<DisplayMode>,
    mode_dedupe: Dedupe<DisplayMode>,
    selection_settle: SettleDelay<usize>,
}

impl ModeSelectionController {
    pub fn new(settings: &HomeSettings) -> Self {
        Self {
            mode_throttle: Throttle::new(settings.throttle_window),
            mode_dedupe: Dedupe::default(),
            selection_settle: SettleDelay::new(settings.settle_delay),
        }
    }

    pub fn set_mode(
        &mut self,
        state: &mut HomeState,
        bus: &mut EventBus,
        mode: DisplayMode,
        now: Instant,
    ) {
        state.mode = mode;
        if let Some(released) = self.mode_throttle.offer(mode, now) {
            self.propagate_mode(state, bus, released);
        }
    }

    pub fn swap_mode(&mut self, state: &mut HomeState, bus: &mut EventBus, now: Instant) {
        let next = state.mode.toggled();
        self.set_mode(state, bus, next, now);
    }

    /// # Panics
    ///
    /// Panics when `index` is not a valid menu position. An out-of-range
    /// selection is an integration bug and is never clamped.
    pub fn set_selected_index(&mut self, state: &mut HomeState, index: usize, now: Instant) {
        assert_valid_index(index);
        state.selected_index = index;
        self.selection_settle.push(index, now);
    }

    pub fn load_more(&mut self, state: &mut HomeState, bus: &mut EventBus) {
        if state.selected_entry().is_genres() {
            debug!("load more ignored while genres are selected");
            return;
        }
        state.page += 1;
        bus.request_page(state.page);
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.mode_throttle.deadline(), self.selection_settle.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Fires every timer that is due at `now`.
    pub fn advance(&mut self, state: &mut HomeState, bus: &mut EventBus, now: Instant) {
        if let Some(mode) = self.mode_throttle.poll(now) {
            self.propagate_mode(state, bus, mode);
        }

        while let Some(scheduled) = self.selection_settle.poll(now) {
            let entry = state.selected_entry();
            debug!(
                scheduled,
                current = state.selected_index,
                entry = entry.title(),
                "selection settled"
            );
            if entry.is_genres() {
                bus.request_categories();
            } else {
                state.page = 1;
                bus.request_page(state.page);
            }
            bus.refresh_title();
        }
    }

    fn propagate_mode(&mut self, state: &mut HomeState, bus: &mut EventBus, mode: DisplayMode) {
        if self.mode_dedupe.admit(&mode) {
            debug!(?mode, "mode change propagated");
            state.swap_icon = mode.icon().to_string();
            bus.refresh_title();
        }
    }

    pub fn pending_selections(&self) -> usize {
        self.selection_settle.len()
    }
}

pub fn assert_valid_index(index: usize) {
    assert!(
        index < MenuEntry::ALL.len(),
        "selected index {index} out of range for {} menu entries",
        MenuEntry::ALL.len()
    );
}
