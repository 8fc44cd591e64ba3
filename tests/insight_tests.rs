//! Insight rendering over the sample dataset.

use std::sync::Arc;
use std::time::Duration;

use storelens::adapter::outbound::llm::mock::MockLlm;
use storelens::application::analysis::AnalysisService;
use storelens::application::insight::local::NO_COMPARISON_MESSAGE;
use storelens::application::insight::narrator::LlmNarrator;
use storelens::application::insight::service::{InsightOutcome, InsightService};
use storelens::infrastructure::factory::dataset::build_analysis_service;
use storelens::testkit::config::offline_config_at;
use storelens::testkit::fixture::write_sample;
use tempfile::TempDir;

fn sample_service() -> (TempDir, AnalysisService) {
    let dir = tempfile::tempdir().expect("tempdir");
    write_sample(dir.path());
    let service = build_analysis_service(&offline_config_at(dir.path()), None).expect("service");
    (dir, service)
}

fn narrated(llm: MockLlm) -> InsightService {
    InsightService::new(Arc::new(LlmNarrator::new(Arc::new(llm))))
}

#[test]
fn local_summary_covers_peers_and_stock() {
    let (_dir, analysis) = sample_service();
    let payload = analysis.insight_payload("롯데본점").expect("payload");
    let outcome = tokio_test::block_on(InsightService::local_only().request(payload));

    let text = outcome.text().expect("rendered");
    assert!(text.contains("매출이 비슷한 1개 매장과 비교 분석"));
    assert!(text.contains("재고"));
}

#[test]
fn store_without_peers_gets_fixed_message() {
    let (_dir, analysis) = sample_service();
    let payload = analysis.insight_payload("현대판교").expect("payload");
    let outcome = tokio_test::block_on(InsightService::local_only().request(payload));
    assert_eq!(outcome.text(), Some(NO_COMPARISON_MESSAGE));
}

#[tokio::test]
async fn llm_failure_falls_back_to_local_summary() {
    let (_dir, analysis) = sample_service();
    let payload = analysis.insight_payload("롯데본점").expect("payload");

    match narrated(MockLlm::failing()).request(payload).await {
        InsightOutcome::Rendered { renderer, text } => {
            assert_eq!(renderer, "local");
            assert!(!text.is_empty());
        }
        other => panic!("expected a rendered insight, got {other:?}"),
    }
}

#[tokio::test]
async fn latest_request_for_a_store_wins() {
    let (_dir, analysis) = sample_service();
    let service = Arc::new(narrated(
        MockLlm::replying("【아이템별 판매 현황】").with_delay(Duration::from_millis(200)),
    ));

    let stale = {
        let service = Arc::clone(&service);
        let payload = analysis.insight_payload("ST-001").expect("payload");
        tokio::spawn(async move { service.request(payload).await })
    };
    tokio::time::sleep(Duration::from_millis(20)).await;
    let fresh = service
        .request(analysis.insight_payload("롯데본점").expect("payload"))
        .await;

    assert_eq!(
        stale.await.expect("join"),
        InsightOutcome::Superseded { generation: 1 }
    );
    assert_eq!(fresh.text(), Some("【아이템별 판매 현황】"));
}

#[test]
fn outcome_serializes_with_status_tag() {
    let value = serde_json::to_value(InsightOutcome::Superseded { generation: 3 }).expect("json");
    assert_eq!(value["status"], "superseded");
    assert_eq!(value["generation"], 3);
}
