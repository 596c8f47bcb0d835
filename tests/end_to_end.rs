use mte_core::cascade::{ApplyOutcome, CascadePhase};
use mte_core::chips::{AddOutcome, SwipeTracker};
use mte_core::config::ServiceConfig;
use mte_core::page::SelectionPage;
use mte_core::score::{ScoreResult, SCORE_ERROR_TEXT, SCORE_ZERO_TEXT};
use mte_core::service::HttpMteService;
use mte_core::types::Level;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Catalog with one module, one model and two variants.
async fn catalog() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/modules"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["Engine A", "Gearbox"])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/models/Engine%20A"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "model_name": "E1" }])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/variants/E1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "variant_name": "V1", "MTE": 1.5 },
            { "variant_name": "V2", "MTE": 2.0 }
        ])))
        .mount(&server)
        .await;
    server
}

async fn page_for(server: &MockServer) -> SelectionPage<HttpMteService> {
    let config = ServiceConfig::v0().with_base_url(server.uri());
    let mut page = SelectionPage::new(HttpMteService::new(&config).unwrap());
    assert_eq!(page.start().await, ApplyOutcome::Applied { count: 2 });
    page
}

async fn choose_engine_a_e1(page: &mut SelectionPage<HttpMteService>) {
    page.on_module_query_changed("eng");
    page.on_module_selected("Engine A").await.unwrap();
    page.on_model_selected("E1").await.unwrap();
}

#[tokio::test]
async fn full_selection_builds_one_chip() {
    let server = catalog().await;
    let mut page = page_for(&server).await;

    let shown = page.on_module_query_changed("eng");
    assert_eq!(shown.texts(), vec!["Engine A"]);

    page.on_module_selected("Engine A").await.unwrap();
    assert_eq!(page.cascade().field(Level::Model).candidates(), ["E1"]);
    page.on_model_selected("E1").await.unwrap();
    assert_eq!(page.on_variant_query_changed("v").texts(), vec!["V1", "V2"]);

    let added = page.on_variant_selected("V1").unwrap();

    assert!(added.was_added());
    assert_eq!(page.chips().labels(), vec!["Engine A > E1 > V1"]);
    assert_eq!(page.cascade().phase(), CascadePhase::VariantChosen);
    assert!(!page.suggestions(Level::Variant).is_panel_visible());
}

#[tokio::test]
async fn repeating_a_selection_keeps_one_chip() {
    let server = catalog().await;
    let mut page = page_for(&server).await;
    choose_engine_a_e1(&mut page).await;

    let first = page.on_variant_selected("V1").unwrap();
    let again = page.on_variant_selected("V1").unwrap();

    assert_eq!(again, AddOutcome::AlreadyPresent(first.id()));
    assert_eq!(page.chips().len(), 1);
}

#[tokio::test]
async fn removing_last_chip_shows_zero() {
    let server = catalog().await;
    let mut page = page_for(&server).await;
    choose_engine_a_e1(&mut page).await;
    page.on_variant_selected("V1").unwrap();

    let removed = page.on_chip_remove_requested(0).unwrap();

    assert_eq!(removed.label(), "Engine A > E1 > V1");
    assert!(page.chips().is_empty());
    assert_eq!(page.score_text(), SCORE_ZERO_TEXT);
    assert!(page.on_chip_remove_requested(0).is_none());
}

#[tokio::test]
async fn swipe_removes_the_swiped_chip() {
    let server = catalog().await;
    let mut page = page_for(&server).await;
    choose_engine_a_e1(&mut page).await;
    page.on_variant_selected("V1").unwrap();
    let second = page.on_variant_selected("V2").unwrap().id();

    let mut tracker = SwipeTracker::new(second);
    tracker.start(0.0);
    let outcome = tracker.released(150.0);
    page.on_chip_swiped(outcome);

    assert_eq!(page.chips().labels(), vec!["Engine A > E1 > V1"]);
}

#[tokio::test]
async fn calculate_shows_service_total() {
    let server = catalog().await;
    Mock::given(method("POST"))
        .and(path("/calculate_mte"))
        .and(body_json(json!({ "variants": ["V1", "V2"] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "overall_mte": 42 })))
        .expect(1)
        .mount(&server)
        .await;
    let mut page = page_for(&server).await;
    choose_engine_a_e1(&mut page).await;
    page.on_variant_selected("V1").unwrap();
    page.on_variant_selected("V2").unwrap();

    let result = page.on_calculate_requested().await;

    assert!(matches!(result, ScoreResult::Value(_)));
    assert_eq!(page.score_text(), "Overall MTE: 42");
    assert!(!page.is_loading());
}

#[tokio::test]
async fn calculate_failure_shows_error_and_stops_loading() {
    let server = catalog().await;
    Mock::given(method("POST"))
        .and(path("/calculate_mte"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    let mut page = page_for(&server).await;
    choose_engine_a_e1(&mut page).await;
    page.on_variant_selected("V1").unwrap();

    let result = page.on_calculate_requested().await;

    assert!(result.is_failed());
    assert_eq!(page.score_text(), SCORE_ERROR_TEXT);
    assert!(!page.is_loading());
    // Chips survive a failed calculation
    assert_eq!(page.chips().len(), 1);
}

#[tokio::test]
async fn calculate_with_no_chips_skips_the_service() {
    let server = catalog().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let mut page = page_for(&server).await;

    assert_eq!(page.on_calculate_requested().await, ScoreResult::Zero);
    assert_eq!(page.score_text(), SCORE_ZERO_TEXT);
}

#[tokio::test]
async fn clear_all_resets_everything() {
    let server = catalog().await;
    let mut page = page_for(&server).await;
    choose_engine_a_e1(&mut page).await;
    page.on_variant_selected("V1").unwrap();

    page.on_clear_all_requested();

    assert!(page.chips().is_empty());
    assert_eq!(page.cascade().phase(), CascadePhase::Empty);
    assert!(!page.cascade().field(Level::Model).is_enabled());
    assert!(!page.cascade().field(Level::Variant).is_enabled());
    assert_eq!(page.score_text(), SCORE_ZERO_TEXT);
    // Module suggestions are still available for the next round
    assert_eq!(page.on_module_query_changed("gear").texts(), vec!["Gearbox"]);
}

#[tokio::test]
async fn failed_model_listing_leaves_model_empty() {
    let server = catalog().await;
    Mock::given(method("GET"))
        .and(path("/models/Gearbox"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let mut page = page_for(&server).await;

    let outcome = page.on_module_selected("Gearbox").await.unwrap();

    assert_eq!(outcome, ApplyOutcome::Failed);
    assert!(page.cascade().field(Level::Model).is_enabled());
    assert!(page.cascade().field(Level::Model).candidates().is_empty());
}

#[tokio::test]
async fn click_outside_hides_suggestions() {
    let server = catalog().await;
    let mut page = page_for(&server).await;
    assert!(page.on_module_query_changed("e").is_panel_visible());

    page.on_click_outside();

    assert!(!page.suggestions(Level::Module).is_panel_visible());
}
