use shared::{
    domain::{Genre, MenuEntry},
    error::FetchError,
};
use tracing::debug;

use crate::{
    bus::SignalLine,
    latest::{LatestGate, RequestToken},
    outcome::{results_or_empty, FetchRequest, FetchTarget},
    settings::Locale,
    state::HomeState,
};

/// Turns category requests into genre-list fetches.
#[derive(Debug, Default)]
pub struct CategoryCoordinator {
    gate: LatestGate,
}

impl CategoryCoordinator {
    /// Genre fetching only runs while the genres entry is selected.
    pub fn dispatch(&mut self, entry: MenuEntry, locale: &Locale) -> Option<FetchRequest> {
        if !entry.is_genres() {
            debug!(selected = entry.title(), "category request ignored outside genres");
            return None;
        }

        let token = self.gate.issue();
        debug!(%token, endpoint = MenuEntry::Genres.endpoint(), "dispatching genre fetch");
        Some(FetchRequest {
            token,
            endpoint: MenuEntry::Genres.endpoint(),
            params: locale.params(),
            target: FetchTarget::Genres,
        })
    }

    /// Replaces the genre list wholesale; a failure replaces it with nothing.
    pub fn apply(
        &mut self,
        token: RequestToken,
        result: Result<Vec<Genre>, FetchError>,
        state: &mut HomeState,
    ) -> bool {
        if !self.gate.accept(token) {
            debug!(%token, "discarding superseded genre result");
            return false;
        }
        state.genres = results_or_empty(SignalLine::Category, result);
        true
    }

    pub fn in_flight(&self) -> Option<RequestToken> {
        self.gate.in_flight()
    }
}
