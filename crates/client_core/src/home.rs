//! Synchronous core of the home screen: owns state, the signal bus and the
//! coordinators. It never awaits; the actor in `view_model` feeds it commands,
//! timer ticks and fetch completions, and executes the fetch requests it
//! hands back.

use shared::domain::DisplayMode;
use tokio::time::Instant;
use tracing::debug;

use crate::{
    bus::{EventBus, Signal},
    category::CategoryCoordinator,
    controller::ModeSelectionController,
    outcome::{Completion, FetchRequest},
    pagination::PaginationCoordinator,
    settings::HomeSettings,
    state::HomeState,
    title::derive_title,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeCommand {
    SetMode(DisplayMode),
    SwapMode,
    SetSelectedIndex(usize),
    LoadMore,
}

#[derive(Debug)]
pub struct HomeCore {
    settings: HomeSettings,
    state: HomeState,
    bus: EventBus,
    controller: ModeSelectionController,
    pagination: PaginationCoordinator,
    category: CategoryCoordinator,
}

impl HomeCore {
    pub fn new(settings: HomeSettings) -> Self {
        Self {
            controller: ModeSelectionController::new(&settings),
            settings,
            state: HomeState::default(),
            bus: EventBus::default(),
            pagination: PaginationCoordinator::default(),
            category: CategoryCoordinator::default(),
        }
    }

    /// Publishes the initial inputs once: the current mode passes the idle
    /// throttle at once, the current selection starts settling, and page 1 is
    /// requested right away.
    pub fn bootstrap(&mut self, now: Instant) {
        let mode = self.state.mode;
        let index = self.state.selected_index;
        self.controller.set_mode(&mut self.state, &mut self.bus, mode, now);
        self.controller.set_selected_index(&mut self.state, index, now);
        self.bus.request_page(self.state.page);
    }

    pub fn state(&self) -> &HomeState {
        &self.state
    }

    pub fn handle(&mut self, command: HomeCommand, now: Instant) {
        debug!(?command, "home command");
        match command {
            HomeCommand::SetMode(mode) => self.set_mode(mode, now),
            HomeCommand::SwapMode => self.swap_mode(now),
            HomeCommand::SetSelectedIndex(index) => self.set_selected_index(index, now),
            HomeCommand::LoadMore => self.load_more(),
        }
    }

    pub fn set_mode(&mut self, mode: DisplayMode, now: Instant) {
        self.controller.set_mode(&mut self.state, &mut self.bus, mode, now);
    }

    pub fn swap_mode(&mut self, now: Instant) {
        self.controller.swap_mode(&mut self.state, &mut self.bus, now);
    }

    pub fn set_selected_index(&mut self, index: usize, now: Instant) {
        self.controller.set_selected_index(&mut self.state, index, now);
    }

    pub fn load_more(&mut self) {
        self.controller.load_more(&mut self.state, &mut self.bus);
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.controller.next_deadline()
    }

    pub fn advance(&mut self, now: Instant) {
        self.controller.advance(&mut self.state, &mut self.bus, now);
    }

    /// Processes every pending signal in emission order and returns the
    /// fetches to start. A later request on a line supersedes an earlier one
    /// even within the same batch.
    pub fn drain(&mut self) -> Vec<FetchRequest> {
        let mut requests = Vec::new();
        while let Some(signal) = self.bus.pop() {
            let entry = self.state.selected_entry();
            let request = match signal {
                Signal::PageRequest { page } => {
                    self.pagination.dispatch(page, entry, &self.settings.locale)
                }
                Signal::CategoryRequest => self.category.dispatch(entry, &self.settings.locale),
                Signal::TitleRefresh => {
                    self.state.nav_title =
                        derive_title(self.state.mode, self.state.selected_index);
                    None
                }
            };
            if let Some(request) = request {
                requests.retain(|queued: &FetchRequest| queued.line() != request.line());
                requests.push(request);
            }
        }
        requests
    }

    /// Routes a completion to its coordinator. Returns whether it was applied.
    pub fn complete(&mut self, completion: Completion) -> bool {
        match completion {
            Completion::Movies {
                token,
                page,
                result,
            } => self.pagination.apply(token, page, result, &mut self.state),
            Completion::Genres { token, result } => {
                self.category.apply(token, result, &mut self.state)
            }
        }
    }

    pub fn pagination(&self) -> &PaginationCoordinator {
        &self.pagination
    }

    pub fn category(&self) -> &CategoryCoordinator {
        &self.category
    }

    pub fn pending_selections(&self) -> usize {
        self.controller.pending_selections()
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut HomeState {
        &mut self.state
    }
}

#[cfg(test)]
#[path = "tests/home_tests.rs"]
mod tests;
