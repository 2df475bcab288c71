use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use client_core::{
    spawn_home, CatalogGateway, CatalogTransport, HomeHandle, HomeSettings, HomeState,
};
use serde_json::json;
use shared::{
    domain::{DisplayMode, MovieId},
    error::FetchError,
};
use tokio::{
    sync::{mpsc, oneshot, watch},
    time::{timeout, Instant},
};

struct PendingCall {
    endpoint: String,
    params: Vec<(String, String)>,
    respond: oneshot::Sender<Result<Vec<u8>, FetchError>>,
}

impl PendingCall {
    fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    fn reply(self, body: Vec<u8>) {
        let _ = self.respond.send(Ok(body));
    }

    fn fail(self) {
        let err = FetchError::transport(self.endpoint.clone(), "connection reset");
        let _ = self.respond.send(Err(err));
    }
}

/// Parks every fetch until the test answers it, so completion order is
/// under test control.
struct ScriptedTransport {
    calls: mpsc::UnboundedSender<PendingCall>,
}

#[async_trait]
impl CatalogTransport for ScriptedTransport {
    async fn fetch(
        &self,
        endpoint: &str,
        params: &[(String, String)],
    ) -> Result<Vec<u8>, FetchError> {
        let (respond, response) = oneshot::channel();
        let _ = self.calls.send(PendingCall {
            endpoint: endpoint.to_string(),
            params: params.to_vec(),
            respond,
        });
        response
            .await
            .unwrap_or_else(|_| Err(FetchError::transport(endpoint, "test dropped the call")))
    }
}

struct Harness {
    handle: HomeHandle,
    calls: mpsc::UnboundedReceiver<PendingCall>,
    state: watch::Receiver<HomeState>,
}

impl Harness {
    /// Spawns the view model and answers the two startup page fetches.
    async fn started(first_page: &[i64]) -> Self {
        let (calls_tx, calls) = mpsc::unbounded_channel();
        let transport = ScriptedTransport { calls: calls_tx };
        let handle = spawn_home(
            CatalogGateway::new(Arc::new(transport)),
            HomeSettings::default(),
        );
        let state = handle.subscribe();
        let mut harness = Self {
            handle,
            calls,
            state,
        };

        let initial = harness.next_call().await;
        assert_eq!(initial.endpoint, "movie/now_playing");
        let settled = harness.next_call().await;
        assert_eq!(settled.param("page"), Some("1"));
        initial.reply(page_body(&[999]));
        settled.reply(page_body(first_page));

        let expected = first_page.to_vec();
        harness.wait_until(move |s| ids(s) == expected).await;
        harness
    }

    async fn next_call(&mut self) -> PendingCall {
        timeout(Duration::from_secs(5), self.calls.recv())
            .await
            .expect("fetch was dispatched")
            .expect("transport alive")
    }

    async fn wait_until(&mut self, predicate: impl Fn(&HomeState) -> bool) -> HomeState {
        let state = timeout(Duration::from_secs(5), self.state.wait_for(|s| predicate(s)))
            .await
            .expect("state reached")
            .expect("view model alive");
        state.clone()
    }
}

fn page_body(ids: &[i64]) -> Vec<u8> {
    let results: Vec<_> = ids
        .iter()
        .map(|id| json!({"id": id, "title": format!("movie-{id}")}))
        .collect();
    serde_json::to_vec(&json!({"page": 1, "results": results})).expect("encode")
}

fn genre_body(names: &[(i64, &str)]) -> Vec<u8> {
    let genres: Vec<_> = names
        .iter()
        .map(|(id, name)| json!({"id": id, "name": name}))
        .collect();
    serde_json::to_vec(&json!({"genres": genres})).expect("encode")
}

fn ids(state: &HomeState) -> Vec<i64> {
    state.movies.iter().map(|movie| movie.id.0).collect()
}

#[tokio::test(start_paused = true)]
async fn startup_applies_settled_first_page_and_derived_text() {
    let mut harness = Harness::started(&[1, 2]).await;
    let state = harness.wait_until(|s| !s.swap_icon.is_empty()).await;

    assert_eq!(ids(&state), vec![1, 2]);
    assert_eq!(state.movies[0].id, MovieId(1));
    assert_eq!(state.nav_title, "Now Playing");
    assert_eq!(state.swap_icon, DisplayMode::List.icon());
    assert_eq!(state.page, 1);
}

#[tokio::test(start_paused = true)]
async fn load_more_appends_then_rolls_back_on_empty_page() {
    let mut harness = Harness::started(&[1, 2]).await;

    harness.handle.load_more();
    let second = harness.next_call().await;
    assert_eq!(second.param("page"), Some("2"));
    second.reply(page_body(&[3]));
    let state = harness.wait_until(|s| s.movies.len() == 3).await;
    assert_eq!(ids(&state), vec![1, 2, 3]);
    assert_eq!(state.page, 2);

    harness.handle.load_more();
    let third = harness.next_call().await;
    assert_eq!(third.param("page"), Some("3"));
    third.reply(page_body(&[]));
    let state = harness.wait_until(|s| s.page == 2).await;
    assert_eq!(ids(&state), vec![1, 2, 3]);

    harness.handle.load_more();
    let retry = harness.next_call().await;
    assert_eq!(retry.param("page"), Some("3"));
    retry.fail();
    let state = harness.wait_until(|s| s.page == 2).await;
    assert_eq!(ids(&state), vec![1, 2, 3]);
}

#[tokio::test(start_paused = true)]
async fn late_result_from_superseded_selection_is_never_applied() {
    let mut harness = Harness::started(&[1]).await;

    harness.handle.set_selected_index(1);
    let popular = harness.next_call().await;
    assert_eq!(popular.endpoint, "movie/popular");

    harness.handle.set_selected_index(2);
    let top_rated = harness.next_call().await;
    assert_eq!(top_rated.endpoint, "movie/top_rated");

    top_rated.reply(page_body(&[20]));
    harness.wait_until(|s| ids(s) == vec![20]).await;
    popular.reply(page_body(&[10]));

    tokio::time::sleep(Duration::from_secs(1)).await;
    let state = harness.handle.state();
    assert_eq!(ids(&state), vec![20]);
    assert_eq!(state.nav_title, "Top Rated");
}

#[tokio::test(start_paused = true)]
async fn genres_selection_replaces_genre_list_and_clears_it_on_failure() {
    let mut harness = Harness::started(&[1]).await;

    harness.handle.set_selected_index(4);
    let call = harness.next_call().await;
    assert_eq!(call.endpoint, "genre/movie/list");
    assert_eq!(call.param("page"), None);
    assert_eq!(call.param("language"), Some("zh"));
    assert_eq!(call.param("region"), Some("US"));
    call.reply(genre_body(&[(28, "Action"), (35, "Comedy")]));

    let state = harness.wait_until(|s| s.genres.len() == 2).await;
    assert_eq!(state.nav_title, "Genres");
    assert_eq!(ids(&state), vec![1]);

    harness.handle.load_more();
    harness.handle.set_selected_index(4);
    let again = harness.next_call().await;
    assert_eq!(again.endpoint, "genre/movie/list");
    again.fail();
    let state = harness.wait_until(|s| s.genres.is_empty()).await;
    assert_eq!(state.page, 1);
}

#[tokio::test(start_paused = true)]
async fn mode_swap_shows_at_once_and_flapping_settles_on_latest() {
    let mut harness = Harness::started(&[1]).await;
    tokio::time::sleep(Duration::from_secs(1)).await;

    let before = Instant::now();
    harness.handle.swap_mode();
    harness.handle.swap_mode();
    harness.handle.swap_mode();
    let state = harness
        .wait_until(|s| s.swap_icon == DisplayMode::Grid.icon())
        .await;
    assert!(before.elapsed() < Duration::from_millis(500));
    assert_eq!(state.nav_title, "Movies");

    tokio::time::sleep(Duration::from_millis(600)).await;
    let state = harness.handle.state();
    assert_eq!(state.mode, DisplayMode::Grid);
    assert_eq!(state.swap_icon, DisplayMode::Grid.icon());
    assert_eq!(state.nav_title, "Movies");
}

#[tokio::test(start_paused = true)]
async fn shutdown_aborts_in_flight_fetches() {
    let mut harness = Harness::started(&[1]).await;

    harness.handle.load_more();
    let mut call = harness.next_call().await;
    harness.handle.shutdown().await;

    timeout(Duration::from_secs(5), call.respond.closed())
        .await
        .expect("in-flight fetch aborted");
}

#[tokio::test]
#[should_panic(expected = "out of range")]
async fn out_of_range_selection_panics_in_caller() {
    let (calls, _rx) = mpsc::unbounded_channel();
    let handle = spawn_home(
        CatalogGateway::new(Arc::new(ScriptedTransport { calls })),
        HomeSettings::default(),
    );
    handle.set_selected_index(5);
}
