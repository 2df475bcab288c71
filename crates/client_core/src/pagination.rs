use shared::{
    domain::{MenuEntry, Movie},
    error::FetchError,
    protocol::PARAM_PAGE,
};
use tracing::debug;

use crate::{
    bus::SignalLine,
    latest::{LatestGate, RequestToken},
    outcome::{results_or_empty, FetchRequest, FetchTarget},
    settings::Locale,
    state::HomeState,
};

/// Turns page requests into movie-list fetches and merges the latest result.
#[derive(Debug, Default)]
pub struct PaginationCoordinator {
    gate: LatestGate,
}

impl PaginationCoordinator {
    /// Returns `None` while the genres entry is selected; page fetching is
    /// suspended there.
    pub fn dispatch(
        &mut self,
        page: u32,
        entry: MenuEntry,
        locale: &Locale,
    ) -> Option<FetchRequest> {
        if entry.is_genres() {
            debug!(page, "page request ignored while genres are selected");
            return None;
        }

        let token = self.gate.issue();
        let mut params = vec![(PARAM_PAGE.to_string(), page.to_string())];
        params.extend(locale.params());
        debug!(%token, page, endpoint = entry.endpoint(), "dispatching page fetch");

        Some(FetchRequest {
            token,
            endpoint: entry.endpoint(),
            params,
            target: FetchTarget::MoviePage { page },
        })
    }

    /// Applies a completed fetch if it is still the latest one. Returns
    /// whether state was touched.
    pub fn apply(
        &mut self,
        token: RequestToken,
        page: u32,
        result: Result<Vec<Movie>, FetchError>,
        state: &mut HomeState,
    ) -> bool {
        if !self.gate.accept(token) {
            debug!(%token, page, "discarding superseded page result");
            return false;
        }
        let movies = results_or_empty(SignalLine::Page, result);
        merge_page(state, page, movies);
        true
    }

    pub fn in_flight(&self) -> Option<RequestToken> {
        self.gate.in_flight()
    }
}

/// Page 1 replaces the list (an empty first page is a valid "no results"
/// state). Later pages append, or roll the cursor back when empty.
pub fn merge_page(state: &mut HomeState, page: u32, movies: Vec<Movie>) {
    if page <= 1 {
        state.movies = movies;
    } else if movies.is_empty() {
        debug!(page, "empty page, rolling cursor back");
        state.page = page - 1;
    } else {
        state.movies.extend(movies);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::domain::MovieId;

    fn movie(id: i64) -> Movie {
        Movie {
            id: MovieId(id),
            title: format!("movie-{id}"),
            overview: String::new(),
            poster_path: None,
            backdrop_path: None,
            vote_average: 0.0,
            vote_count: 0,
            release_date: None,
        }
    }

    #[test]
    fn dispatch_builds_page_and_locale_params() {
        let mut coordinator = PaginationCoordinator::default();
        let request = coordinator
            .dispatch(3, MenuEntry::TopRated, &Locale::default())
            .expect("request");
        assert_eq!(request.endpoint, "movie/top_rated");
        assert_eq!(request.param("page"), Some("3"));
        assert_eq!(request.param("language"), Some("zh"));
        assert_eq!(request.param("region"), Some("US"));
        assert_eq!(request.target, FetchTarget::MoviePage { page: 3 });
        assert_eq!(coordinator.in_flight(), Some(request.token));
    }

    #[test]
    fn dispatch_is_suspended_for_genres() {
        let mut coordinator = PaginationCoordinator::default();
        assert!(coordinator
            .dispatch(1, MenuEntry::Genres, &Locale::default())
            .is_none());
        assert_eq!(coordinator.in_flight(), None);
    }

    #[test]
    fn merge_rules_cover_replace_append_and_rollback() {
        let mut state = HomeState {
            movies: vec![movie(1)],
            ..HomeState::default()
        };
        merge_page(&mut state, 1, vec![movie(2), movie(3)]);
        assert_eq!(state.movies, vec![movie(2), movie(3)]);

        state.page = 2;
        merge_page(&mut state, 2, vec![movie(4)]);
        assert_eq!(state.movies.len(), 3);
        assert_eq!(state.page, 2);

        state.page = 3;
        merge_page(&mut state, 3, Vec::new());
        assert_eq!(state.page, 2);
        assert_eq!(state.movies.len(), 3);

        merge_page(&mut state, 1, Vec::new());
        assert!(state.movies.is_empty());
    }
}
