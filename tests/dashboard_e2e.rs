//! End-to-end dashboard tests against a live mock division server
//!
//! Covers the full path: select division -> HTTP fetch -> decode -> resolve.

mod common;

use std::time::Duration;

use serde_json::json;
use urc_client::Dashboard;
use urc_core::{DashboardConfig, ResolutionState, SourceEntry, SourceRegistry};
use urc_mock_server::{DivisionFixture, FixtureSet};

use common::TestHarness;

fn jane_fixture() -> DivisionFixture {
    DivisionFixture::drivers(json!([
        {
            "carNumber": "24",
            "name": "Jane Doe",
            "nickname": "Flash",
            "hometown": "Reading, PA",
            "stats": "3 wins"
        },
        { "carNumber": 7, "name": "Sam Smith", "stats": null }
    ]))
}

fn fixtures() -> FixtureSet {
    FixtureSet::new()
        .with_division("sprints-410", DivisionFixture::status(500))
        .with_division("late-models", DivisionFixture::error("Sheet not found"))
        .with_division("urc-sprints", jane_fixture())
}

fn registry(harness: &TestHarness) -> SourceRegistry {
    SourceRegistry::from_entries(vec![
        SourceEntry::new("URC Sprints", harness.endpoint("urc-sprints")),
        SourceEntry::new("Late Models", harness.endpoint("late-models")),
        SourceEntry::sentinel("Select a Division"),
        SourceEntry::new("410 Sprints", harness.endpoint("sprints-410")),
    ])
    .expect("valid registry")
}

async fn setup() -> (TestHarness, Dashboard) {
    setup_with(fixtures(), DashboardConfig::default()).await
}

async fn setup_with(fixtures: FixtureSet, config: DashboardConfig) -> (TestHarness, Dashboard) {
    let harness = TestHarness::new(fixtures).await;
    let dashboard = Dashboard::new(registry(&harness), &config).expect("dashboard");
    (harness, dashboard)
}

#[tokio::test]
async fn test_sources_sentinel_first_then_alphabetical() {
    let (_harness, dashboard) = setup().await;
    let names: Vec<String> = dashboard
        .view()
        .await
        .sources
        .into_iter()
        .map(|e| e.name)
        .collect();

    assert_eq!(
        names,
        ["Select a Division", "410 Sprints", "Late Models", "URC Sprints"]
    );
}

#[tokio::test]
async fn test_lookup_found() {
    let (_harness, dashboard) = setup().await;

    let view = dashboard.load_division("URC Sprints").await.unwrap();
    assert_eq!(view.state, ResolutionState::NoQuery);

    dashboard.set_query("24").await;
    let view = dashboard.view().await;
    let driver = view.state.found().expect("driver found");
    assert_eq!(driver.name, "Jane Doe");
    assert_eq!(driver.stats.as_deref(), Some("3 wins"));
}

#[tokio::test]
async fn test_lookup_ignores_surrounding_whitespace() {
    let (_harness, dashboard) = setup().await;
    dashboard.load_division("URC Sprints").await.unwrap();

    dashboard.set_query("24").await;
    let plain = dashboard.view().await.state;
    dashboard.set_query("  24  ").await;
    let padded = dashboard.view().await.state;

    assert_eq!(plain, padded);
    assert_eq!(dashboard.view().await.query, "24");
}

#[tokio::test]
async fn test_lookup_not_found() {
    let (_harness, dashboard) = setup().await;
    dashboard.load_division("URC Sprints").await.unwrap();

    dashboard.set_query("99").await;
    assert_eq!(
        dashboard.view().await.state,
        ResolutionState::NotFound("99".into())
    );
}

#[tokio::test]
async fn test_numeric_car_number_and_missing_stats() {
    let (_harness, dashboard) = setup().await;
    dashboard.load_division("URC Sprints").await.unwrap();

    dashboard.set_query("7").await;
    let view = dashboard.view().await;
    let driver = view.state.found().expect("driver found");
    assert_eq!(driver.name, "Sam Smith");
    assert_eq!(
        driver.stats.as_deref(),
        Some("No specific stats available for this driver.")
    );
}

#[tokio::test]
async fn test_http_500_is_error_and_query_keeps_error() {
    let (_harness, dashboard) = setup().await;

    let view = dashboard.load_division("410 Sprints").await.unwrap();
    match &view.state {
        ResolutionState::Error(message) => assert!(message.contains("500"), "{}", message),
        other => panic!("expected Error, got {:?}", other),
    }

    dashboard.set_query("24").await;
    let after = dashboard.view().await;
    assert_eq!(after.state, view.state);
    assert_eq!(after.query, "24");
}

#[tokio::test]
async fn test_error_payload_surfaces_message() {
    let (_harness, dashboard) = setup().await;

    let view = dashboard.load_division("Late Models").await.unwrap();
    assert_eq!(view.state, ResolutionState::Error("Sheet not found".into()));
}

#[tokio::test]
async fn test_malformed_payload() {
    let fixtures = fixtures().with_division(
        "urc-sprints",
        DivisionFixture::drivers(json!({ "rows": [] })),
    );
    let (_harness, dashboard) = setup_with(fixtures, DashboardConfig::default()).await;

    let view = dashboard.load_division("URC Sprints").await.unwrap();
    assert!(matches!(
        view.state,
        ResolutionState::Error(ref m) if m.starts_with("Malformed payload")
    ));
}

#[tokio::test]
async fn test_unknown_endpoint_path_is_transport_error() {
    let harness = TestHarness::new(fixtures()).await;
    let registry = SourceRegistry::from_entries(vec![
        SourceEntry::sentinel("Select a Division"),
        SourceEntry::new("Modifieds", harness.endpoint("modifieds")),
    ])
    .unwrap();
    let dashboard = Dashboard::new(registry, &DashboardConfig::default()).unwrap();

    let view = dashboard.load_division("Modifieds").await.unwrap();
    assert!(matches!(view.state, ResolutionState::Error(ref m) if m.contains("404")));
}

#[tokio::test]
async fn test_last_selection_wins() {
    let fixtures = fixtures()
        .with_division(
            "late-models",
            DivisionFixture::drivers(json!([{ "carNumber": "24", "name": "Slow Division Driver" }]))
                .with_delay(Duration::from_millis(400)),
        );
    let (_harness, dashboard) = setup_with(fixtures, DashboardConfig::default()).await;

    let slow = dashboard
        .select_division("Late Models")
        .await
        .unwrap()
        .expect("fetch spawned");
    let fast = dashboard
        .select_division("URC Sprints")
        .await
        .unwrap()
        .expect("fetch spawned");

    fast.await.unwrap();
    dashboard.set_query("24").await;
    assert_eq!(
        dashboard.view().await.state.found().map(|d| d.name.clone()),
        Some("Jane Doe".to_string())
    );

    slow.await.unwrap();
    let view = dashboard.view().await;
    assert_eq!(view.selected.name, "URC Sprints");
    assert_eq!(view.query, "24");
    assert_eq!(view.state.found().unwrap().name, "Jane Doe");
}

#[tokio::test]
async fn test_stalled_fetch_times_out() {
    let fixtures = fixtures().with_division(
        "urc-sprints",
        jane_fixture().with_delay(Duration::from_secs(5)),
    );
    let config = DashboardConfig::default().with_request_timeout(Duration::from_millis(200));
    let (_harness, dashboard) = setup_with(fixtures, config).await;

    let view = tokio::time::timeout(
        Duration::from_secs(3),
        dashboard.load_division("URC Sprints"),
    )
    .await
    .expect("timeout bounds the fetch")
    .unwrap();

    assert_eq!(
        view.state,
        ResolutionState::Error("Request timed out after 200 ms".into())
    );
}

#[tokio::test]
async fn test_reselect_retries_after_failure() {
    let fixtures = fixtures().with_division("urc-sprints", DivisionFixture::status(503));
    let (harness, dashboard) = setup_with(fixtures, DashboardConfig::default()).await;

    let view = dashboard.load_division("URC Sprints").await.unwrap();
    assert!(matches!(view.state, ResolutionState::Error(_)));

    harness
        .fixtures
        .write()
        .await
        .insert("urc-sprints", jane_fixture());

    dashboard.reload().await.expect("fetch spawned").await.unwrap();
    dashboard.set_query("24").await;
    assert_eq!(dashboard.view().await.state.found().unwrap().name, "Jane Doe");
}

#[tokio::test]
async fn test_sentinel_resets_to_idle() {
    let (_harness, dashboard) = setup().await;
    dashboard.load_division("URC Sprints").await.unwrap();
    dashboard.set_query("24").await;

    let view = dashboard.load_division("Select a Division").await.unwrap();
    assert_eq!(view.state, ResolutionState::Idle);
    assert_eq!(view.query, "");
    assert!(view.selected.is_sentinel());
}

#[tokio::test]
async fn test_reveal_signal_once_per_found_entry() {
    let (_harness, dashboard) = setup().await;
    dashboard.load_division("URC Sprints").await.unwrap();

    dashboard.set_query("24").await;
    assert!(dashboard.take_reveal_signal().await);

    dashboard.set_query("24").await;
    assert!(!dashboard.take_reveal_signal().await);

    dashboard.set_query("7").await;
    assert!(dashboard.take_reveal_signal().await);
}

#[tokio::test]
async fn test_take_view_pairs_signal_with_its_state() {
    let fixtures = fixtures().with_division(
        "late-models",
        jane_fixture().with_delay(Duration::from_millis(100)),
    );
    let (_harness, dashboard) = setup_with(fixtures, DashboardConfig::default()).await;
    dashboard.load_division("URC Sprints").await.unwrap();
    dashboard.set_query("24").await;

    // A selection lands between the state change and the consumer reading it
    let handle = dashboard.select_division("Late Models").await.unwrap().unwrap();
    dashboard.set_query("24").await;

    let (view, reveal) = dashboard.take_view().await;
    assert!(view.state.is_loading());
    assert!(!reveal, "signal from the dropped Found state leaked into Loading");

    handle.await.unwrap();
    let (view, reveal) = dashboard.take_view().await;
    assert!(matches!(view.state, ResolutionState::Found(_)));
    assert!(reveal);

    let (view, reveal) = dashboard.take_view().await;
    assert!(matches!(view.state, ResolutionState::Found(_)));
    assert!(!reveal);
}

#[tokio::test]
async fn test_subscribers_see_loading_then_result() {
    let fixtures = fixtures().with_division(
        "urc-sprints",
        jane_fixture().with_delay(Duration::from_millis(100)),
    );
    let (_harness, dashboard) = setup_with(fixtures, DashboardConfig::default()).await;
    let mut updates = dashboard.subscribe();

    dashboard.select_division("URC Sprints").await.unwrap();
    assert!(updates.borrow_and_update().state.is_loading());

    let settled = dashboard.settled().await.unwrap();
    assert_eq!(settled.state, ResolutionState::NoQuery);
    assert!(updates.has_changed().unwrap());
}
