//! End-to-end tests for the view controller
//!
//! HTTP scenarios run against a wiremock TMDB; ordering scenarios use a
//! scripted source whose responses are released by the test.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use moviedb::store::{view_store, RecordingMiddleware};
use moviedb::{Category, RequestStatus, StalePolicy, ViewController, ViewState};
use moviedb_api::{Endpoint, FetchError, MovieSource, MovieSummary, TmdbClient};
use serde_json::json;
use tokio::sync::oneshot;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> TmdbClient {
    TmdbClient::builder()
        .base_url(format!("{}/3/", server.uri()).parse().unwrap())
        .api_key("test-key")
        .build()
        .unwrap()
}

fn page(results: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "page": 1, "results": results }))
}

fn movie_a() -> MovieSummary {
    MovieSummary {
        id: 1,
        title: "A".into(),
        poster_path: Some("/a.jpg".into()),
        vote_average: 7.5,
    }
}

fn movie_a_json() -> serde_json::Value {
    json!([{ "id": 1, "title": "A", "poster_path": "/a.jpg", "vote_average": 7.5 }])
}

async fn mount_listing(server: &MockServer, listing: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(format!("/3/movie/{listing}")))
        .and(query_param("api_key", "test-key"))
        .respond_with(response)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_initialize_loads_all_three_lists() {
    let server = MockServer::start().await;
    for listing in ["popular", "top_rated", "upcoming"] {
        mount_listing(&server, listing, page(movie_a_json())).await;
    }

    let mut controller = ViewController::new(ViewState::default(), client_for(&server));
    assert!(controller.initialize());
    assert_eq!(controller.state().status, RequestStatus::InProgress);
    assert_eq!(controller.in_flight(), 3);

    controller.settle().await;

    let state = controller.state();
    assert_eq!(state.popular, vec![movie_a()]);
    assert_eq!(state.top_rated, vec![movie_a()]);
    assert_eq!(state.upcoming, vec![movie_a()]);
    assert_eq!(state.status, RequestStatus::Success);
    assert!(state.search_results.is_empty());
}

#[tokio::test]
async fn test_search_matrix() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/3/search/movie"))
        .and(query_param("query", "Matrix"))
        .and(query_param("page", "1"))
        .respond_with(page(json!([
            { "id": 99, "title": "The Matrix", "poster_path": "/m.jpg", "vote_average": 8.7 }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let mut controller = ViewController::new(ViewState::default(), client_for(&server));
    controller.set_search_query("Matrix");
    assert!(controller.submit_search());
    controller.settle().await;

    let state = controller.state();
    assert_eq!(state.search_results.len(), 1);
    assert_eq!(state.search_results[0].id, 99);
    assert_eq!(state.search_results[0].title, "The Matrix");
    assert_eq!(
        state.search_results[0].poster_url().as_deref(),
        Some("https://image.tmdb.org/t/p/w500/m.jpg")
    );
    assert_eq!(state.status, RequestStatus::Success);
}

#[tokio::test]
async fn test_same_url_twice_hits_server_twice() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/3/movie/popular"))
        .respond_with(page(movie_a_json()))
        .expect(2)
        .mount(&server)
        .await;
    let client = client_for(&server);

    let first = client.fetch_list(&Endpoint::Popular).await.unwrap();
    let second = client.fetch_list(&Endpoint::Popular).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first, vec![movie_a()]);
}

#[tokio::test]
async fn test_status_settles_after_every_completion() {
    let server = MockServer::start().await;
    mount_listing(&server, "popular", page(movie_a_json())).await;
    mount_listing(&server, "top_rated", ResponseTemplate::new(401)).await;
    mount_listing(&server, "upcoming", page(json!([]))).await;

    let mut controller = ViewController::new(ViewState::default(), client_for(&server));
    controller.initialize();

    while controller.in_flight() > 0 {
        controller.apply_next().await;
        assert!(
            controller.in_flight() > 0 || controller.state().status.is_settled(),
            "status {:?} after last completion",
            controller.state().status
        );
    }
    for category in Category::PRELOADED {
        assert!(controller.state().category_status[category].is_settled());
    }
    assert_eq!(
        controller.state().category_status[Category::TopRated],
        RequestStatus::Failure
    );
}

/// Source that counts calls and answers every listing with one movie
#[derive(Default)]
struct CountingSource {
    calls: AtomicUsize,
}

impl MovieSource for &'static CountingSource {
    async fn fetch_list(&self, _endpoint: &Endpoint) -> Result<Vec<MovieSummary>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(vec![movie_a()])
    }
}

fn leaked_counter() -> &'static CountingSource {
    Box::leak(Box::default())
}

#[tokio::test]
async fn test_category_switch_issues_no_fetch() {
    let source = leaked_counter();
    let mut controller = ViewController::new(ViewState::default(), source);
    controller.initialize();
    controller.settle().await;
    assert_eq!(source.calls.load(Ordering::SeqCst), 3);
    let status = controller.state().status;

    for category in [
        Category::SearchResults,
        Category::Upcoming,
        Category::TopRated,
        Category::Popular,
    ] {
        assert!(controller.set_active_category(category));
        assert_eq!(controller.state().active_category, category);
        assert_eq!(controller.state().status, status);
        assert_eq!(controller.in_flight(), 0);
    }
    assert!(!controller.set_active_category(Category::Popular));
    assert_eq!(source.calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_blank_search_is_noop() {
    let source = leaked_counter();
    let mut controller = ViewController::new(ViewState::default(), source);

    assert!(!controller.submit_search());
    controller.set_search_query("   ");
    assert!(!controller.submit_search());

    let state = controller.state();
    assert_eq!(state.status, RequestStatus::Initial);
    assert!(state.search_results.is_empty());
    assert_eq!(controller.in_flight(), 0);
    assert_eq!(source.calls.load(Ordering::SeqCst), 0);
}

type Reply = Result<Vec<MovieSummary>, FetchError>;

/// Source whose responses are released by the test. Listings are keyed by
/// endpoint name, searches by query.
#[derive(Default)]
struct ScriptedSource {
    pending: Mutex<HashMap<String, oneshot::Receiver<Reply>>>,
}

impl ScriptedSource {
    fn script(&self, key: &str) -> oneshot::Sender<Reply> {
        let (tx, rx) = oneshot::channel();
        self.pending.lock().unwrap().insert(key.to_string(), rx);
        tx
    }
}

fn script_key(endpoint: &Endpoint) -> String {
    match endpoint {
        Endpoint::Search { query, .. } => query.clone(),
        listing => listing.name().to_string(),
    }
}

impl MovieSource for &'static ScriptedSource {
    async fn fetch_list(&self, endpoint: &Endpoint) -> Result<Vec<MovieSummary>, FetchError> {
        let key = script_key(endpoint);
        let rx = self.pending.lock().unwrap().remove(&key);
        match rx {
            Some(rx) => rx.await.unwrap_or_else(|_| Ok(vec![])),
            None => Err(FetchError::Upstream {
                status: 404,
                message: format!("unscripted request {key}"),
            }),
        }
    }
}

fn leaked_script() -> &'static ScriptedSource {
    Box::leak(Box::default())
}

#[tokio::test]
async fn test_failed_upcoming_sets_shared_failure() {
    let source = leaked_script();
    let popular_tx = source.script("popular");
    let top_rated_tx = source.script("top_rated");
    let upcoming_tx = source.script("upcoming");

    let mut controller = ViewController::new(ViewState::default(), source);
    controller.initialize();

    // Upcoming fails last, so its failure is the final transition
    popular_tx.send(Ok(vec![movie_a()])).unwrap();
    assert!(controller.apply_next().await);
    top_rated_tx.send(Ok(vec![movie_a()])).unwrap();
    assert!(controller.apply_next().await);
    upcoming_tx
        .send(Err(FetchError::Upstream {
            status: 500,
            message: "Internal error.".into(),
        }))
        .unwrap();
    assert!(controller.apply_next().await);
    assert_eq!(controller.in_flight(), 0);

    let state = controller.state();
    assert_eq!(state.status, RequestStatus::Failure);
    assert_eq!(state.popular, vec![movie_a()]);
    assert_eq!(state.top_rated, vec![movie_a()]);
    assert!(state.upcoming.is_empty());
    assert_eq!(state.category_status[Category::Popular], RequestStatus::Success);
    assert_eq!(state.category_status[Category::Upcoming], RequestStatus::Failure);
}

fn titled(id: u64, title: &str) -> MovieSummary {
    MovieSummary {
        id,
        title: title.into(),
        poster_path: None,
        vote_average: 6.0,
    }
}

async fn race_two_searches(policy: StalePolicy) -> (Vec<MovieSummary>, RequestStatus, bool) {
    let source = leaked_script();
    let first_tx = source.script("alien");
    let second_tx = source.script("aliens");

    let mut controller = ViewController::new(ViewState::new(policy), source);
    controller.set_search_query("alien");
    controller.submit_search();
    controller.set_search_query("aliens");
    controller.submit_search();
    assert_eq!(controller.in_flight(), 2);

    // Newer request answers first
    second_tx.send(Ok(vec![titled(2, "Aliens")])).unwrap();
    assert!(controller.apply_next().await);
    assert_eq!(controller.state().search_results, vec![titled(2, "Aliens")]);

    first_tx.send(Ok(vec![titled(1, "Alien")])).unwrap();
    let late_applied = controller.apply_next().await;
    assert_eq!(controller.in_flight(), 0);

    let state = controller.state();
    (state.search_results.clone(), state.status, late_applied)
}

#[tokio::test]
async fn test_search_race_last_arrival_wins() {
    let (results, status, late_applied) = race_two_searches(StalePolicy::ArrivalOrder).await;

    assert!(late_applied);
    assert_eq!(results, vec![titled(1, "Alien")]);
    assert_eq!(status, RequestStatus::Success);
}

#[tokio::test]
async fn test_search_race_latest_only_drops_stale() {
    let (results, status, late_applied) = race_two_searches(StalePolicy::LatestOnly).await;

    assert!(!late_applied);
    assert_eq!(results, vec![titled(2, "Aliens")]);
    assert_eq!(status, RequestStatus::Success);
}

#[tokio::test]
async fn test_middleware_sees_actions_in_order() {
    let source = leaked_counter();
    let store = view_store(ViewState::default(), RecordingMiddleware::default());
    let mut controller = ViewController::with_store(store, source);

    controller.set_search_query("heat");
    controller.submit_search();
    controller.set_active_category(Category::SearchResults);
    controller.settle().await;

    let seen = &controller.store().middleware().seen;
    assert_eq!(
        seen,
        &vec![
            ("SearchQueryChange", true),
            ("SearchSubmit", true),
            ("CategorySelect", true),
            ("ListDidLoad", true),
        ]
    );
}

/// Source whose fetches panic instead of answering
struct PanickingSource;

impl MovieSource for PanickingSource {
    async fn fetch_list(&self, endpoint: &Endpoint) -> Result<Vec<MovieSummary>, FetchError> {
        panic!("source blew up on {}", endpoint.name());
    }
}

#[tokio::test]
async fn test_panicking_fetch_still_settles() {
    let mut controller = ViewController::new(ViewState::default(), PanickingSource);
    controller.initialize();
    assert_eq!(controller.in_flight(), 3);

    tokio::time::timeout(Duration::from_secs(5), controller.settle())
        .await
        .expect("settle hung on a panicked fetch");

    let state = controller.state();
    assert_eq!(controller.in_flight(), 0);
    assert_eq!(state.status, RequestStatus::Failure);
    for category in Category::PRELOADED {
        assert_eq!(state.category_status[category], RequestStatus::Failure);
    }
}
