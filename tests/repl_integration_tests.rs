//! Integration Tests for the REPL
//!
//! Drives full command scripts against a local axum server that mimics
//! the PokeAPI endpoints the Pokedex uses, counting upstream requests to
//! verify write-through caching.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use pokedex::{repl, CommandRegistry, PokeApiClient, Session};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::json;

// == Mock PokeAPI ==

const AREAS: [&str; 5] = [
    "canalave-city-area",
    "eterna-city-area",
    "pastoria-city-area",
    "sunyshore-city-area",
    "sinnoh-pokemon-league-area",
];

#[derive(Default)]
struct Hits {
    pages: AtomicUsize,
    areas: AtomicUsize,
    pokemon: AtomicUsize,
}

#[derive(Clone)]
struct MockState {
    base_url: String,
    hits: Arc<Hits>,
}

async fn location_page(
    State(state): State<MockState>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    state.hits.pages.fetch_add(1, Ordering::SeqCst);

    let offset: usize = params.get("offset").and_then(|v| v.parse().ok()).unwrap_or(0);
    let limit: usize = params.get("limit").and_then(|v| v.parse().ok()).unwrap_or(20);
    let page_url = |offset: usize| {
        format!(
            "{}/location-area/?offset={}&limit={}",
            state.base_url, offset, limit
        )
    };

    let results: Vec<_> = AREAS
        .iter()
        .skip(offset)
        .take(limit)
        .map(|name| json!({ "name": name, "url": format!("{}/location-area/{}/", state.base_url, name) }))
        .collect();
    let next = (offset + limit < AREAS.len()).then(|| page_url(offset + limit));
    let previous = (offset > 0).then(|| page_url(offset.saturating_sub(limit)));

    Json(json!({
        "count": AREAS.len(),
        "next": next,
        "previous": previous,
        "results": results,
    }))
}

async fn location_area(
    State(state): State<MockState>,
    Path(name): Path<String>,
) -> impl IntoResponse {
    state.hits.areas.fetch_add(1, Ordering::SeqCst);

    if name != "pastoria-city-area" {
        return (StatusCode::NOT_FOUND, "Not Found").into_response();
    }
    Json(json!({
        "id": 3,
        "name": name,
        "pokemon_encounters": [
            { "pokemon": { "name": "tentacool", "url": "" }, "version_details": [] },
            { "pokemon": { "name": "magikarp", "url": "" }, "version_details": [] },
        ],
    }))
    .into_response()
}

async fn pokemon(State(state): State<MockState>, Path(name): Path<String>) -> impl IntoResponse {
    state.hits.pokemon.fetch_add(1, Ordering::SeqCst);

    if name != "magikarp" {
        return (StatusCode::NOT_FOUND, "Not Found").into_response();
    }
    Json(json!({
        "id": 129,
        "name": "magikarp",
        "base_experience": 0,
        "height": 9,
        "weight": 100,
        "stats": [
            { "base_stat": 20, "effort": 0, "stat": { "name": "hp", "url": "" } },
            { "base_stat": 80, "effort": 1, "stat": { "name": "speed", "url": "" } },
        ],
        "types": [
            { "slot": 1, "type": { "name": "water", "url": "" } },
        ],
    }))
    .into_response()
}

/// Starts the mock server and returns its base URL plus request counters.
async fn spawn_mock_pokeapi() -> (String, Arc<Hits>) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base_url = format!("http://{}/api/v2", listener.local_addr().unwrap());
    let hits = Arc::new(Hits::default());

    let app = Router::new()
        .route("/api/v2/location-area/", get(location_page))
        .route("/api/v2/location-area/:name", get(location_area))
        .route("/api/v2/pokemon/:name", get(pokemon))
        .with_state(MockState {
            base_url: base_url.clone(),
            hits: hits.clone(),
        });

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (base_url, hits)
}

// == Helper Functions ==

fn new_session(base_url: &str, page_size: u32) -> Session {
    let client =
        PokeApiClient::new(base_url, Duration::from_secs(60), Duration::from_secs(5)).unwrap();
    let first_page = format!("{}/location-area/?offset=0&limit={}", base_url, page_size);
    Session::new(client, first_page, StdRng::seed_from_u64(42))
}

async fn run_script(session: &mut Session, script: &str) -> String {
    let registry = CommandRegistry::new();
    let mut output = Vec::new();

    repl::run(&registry, session, script.as_bytes(), &mut output)
        .await
        .unwrap();

    String::from_utf8(output).unwrap()
}

fn printed_lines(output: &str) -> Vec<&str> {
    output
        .split('\n')
        .map(|line| line.trim_start_matches(repl::PROMPT))
        .filter(|line| !line.is_empty())
        .collect()
}

// == Paging ==

#[tokio::test]
async fn test_map_pages_forward_and_back() {
    let (base_url, hits) = spawn_mock_pokeapi().await;
    let mut session = new_session(&base_url, 2);

    let output = run_script(&mut session, "map\nmap\nmap\nmap\nmapb\nmapb\nmapb\n").await;

    assert_eq!(
        printed_lines(&output),
        vec![
            "canalave-city-area",
            "eterna-city-area",
            "pastoria-city-area",
            "sunyshore-city-area",
            "sinnoh-pokemon-league-area",
            "you're on the last page",
            "pastoria-city-area",
            "sunyshore-city-area",
            "canalave-city-area",
            "eterna-city-area",
            "you're on the first page",
        ]
    );
    // Going back re-reads pages already fetched going forward
    assert_eq!(hits.pages.load(Ordering::SeqCst), 3);
    assert_eq!(session.client.location_cache().len(), 3);

    session.client.close().await;
}

// == Explore ==

#[tokio::test]
async fn test_explore_is_cached_by_area_name() {
    let (base_url, hits) = spawn_mock_pokeapi().await;
    let mut session = new_session(&base_url, 20);

    let output = run_script(
        &mut session,
        "explore pastoria-city-area\nEXPLORE Pastoria-City-Area\n",
    )
    .await;

    let expected = [
        "Exploring pastoria-city-area...",
        "Found Pokemon:",
        " - tentacool",
        " - magikarp",
    ];
    let lines = printed_lines(&output);
    assert_eq!(lines[..4], expected);
    assert_eq!(lines[4..], expected);
    assert_eq!(hits.areas.load(Ordering::SeqCst), 1);

    session.client.close().await;
}

#[tokio::test]
async fn test_explore_unknown_area_caches_nothing() {
    let (base_url, hits) = spawn_mock_pokeapi().await;
    let mut session = new_session(&base_url, 20);

    let output = run_script(&mut session, "explore nowhere\nexplore nowhere\n").await;

    assert_eq!(
        output.matches("Error: response failed with status code 404").count(),
        2
    );
    assert_eq!(hits.areas.load(Ordering::SeqCst), 2);
    assert!(session.client.area_cache().is_empty());

    session.client.close().await;
}

// == Catch / Inspect / Pokedex ==

#[tokio::test]
async fn test_catch_then_inspect() {
    let (base_url, hits) = spawn_mock_pokeapi().await;
    let mut session = new_session(&base_url, 20);

    // magikarp has an 80% catch chance; sixty throws cannot all miss in practice
    let script = "catch magikarp\n".repeat(60) + "pokedex\ninspect magikarp\n";
    let output = run_script(&mut session, &script).await;

    assert!(output.contains("Throwing a Pokeball at magikarp..."));
    assert!(output.contains("magikarp was caught!"));
    assert!(session.pokedex.contains("magikarp"));
    assert_eq!(hits.pokemon.load(Ordering::SeqCst), 1);

    let lines = printed_lines(&output);
    let tail = &lines[lines.len() - 10..];
    assert_eq!(
        tail,
        [
            "Your Pokedex:",
            " - magikarp",
            "Name: magikarp",
            "Height: 9",
            "Weight: 100",
            "Stats:",
            "  -hp: 20",
            "  -speed: 80",
            "Types:",
            "  - water",
        ]
    );

    session.client.close().await;
}

#[tokio::test]
async fn test_catch_unknown_pokemon() {
    let (base_url, _hits) = spawn_mock_pokeapi().await;
    let mut session = new_session(&base_url, 20);

    let output = run_script(&mut session, "catch missingno\npokedex\n").await;

    assert!(output.contains("Error: response failed with status code 404"));
    assert!(output.contains("Your pokedex is empty. Catch some pokemons!"));
    assert!(session.pokedex.is_empty());

    session.client.close().await;
}

// == Cache Expiry ==

#[tokio::test]
async fn test_expired_responses_are_refetched() {
    let (base_url, hits) = spawn_mock_pokeapi().await;
    let client = PokeApiClient::new(
        base_url.as_str(),
        Duration::from_millis(100),
        Duration::from_secs(5),
    )
    .unwrap();

    client.location_area("pastoria-city-area").await.unwrap();
    client.location_area("pastoria-city-area").await.unwrap();
    assert_eq!(hits.areas.load(Ordering::SeqCst), 1);

    tokio::time::sleep(Duration::from_millis(350)).await;
    assert!(
        client.area_cache().is_empty(),
        "Reaper should have reclaimed the stale entry"
    );

    client.location_area("pastoria-city-area").await.unwrap();
    assert_eq!(hits.areas.load(Ordering::SeqCst), 2);

    client.close().await;
}
