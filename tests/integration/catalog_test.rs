//! Catalog, Share and Report Integration Tests

use phishguard::services::{
    format_result_share, verification_links, ReportKind, SpamReport,
};
use phishguard::{AppError, AppState};
use phishguard_core::AnalysisResult;

use crate::mock_server::high_risk_analysis;

#[tokio::test]
async fn test_catalog_admin_flow_persists() {
    let temp = tempfile::tempdir().unwrap();
    {
        let state = AppState::open(temp.path()).unwrap();
        assert!(matches!(
            state.admin().login("4321"),
            Err(AppError::Unauthorized(_))
        ));

        let token = state.admin().login("1234").unwrap();
        let mut catalog = state.catalog().lock().await;
        assert_eq!(catalog.list().len(), 2);
        catalog.delete(&token, "2").unwrap();
        catalog
            .add(&token, "스팸 문자 필터", "의심 문자를 자동으로 분류합니다.")
            .unwrap();
    }

    let state = AppState::open(temp.path()).unwrap();
    let catalog = state.catalog().lock().await;
    let titles: Vec<&str> = catalog.list().iter().map(|a| a.title.as_str()).collect();
    assert_eq!(titles, vec!["척추측만증 AI 진단", "스팸 문자 필터"]);
}

#[tokio::test]
async fn test_share_uses_configured_link() {
    let temp = tempfile::tempdir().unwrap();
    let state = AppState::open(temp.path()).unwrap();
    let result: AnalysisResult = serde_json::from_value(high_risk_analysis()).unwrap();

    let link = state.config().await.app_link;
    let text = format_result_share(&result, &link);
    assert!(text.contains("📊 위험도: 85점"));
    assert!(text.contains("- 검찰 사칭 신고 다수\n- 최근 개통 번호\n- 대포폰 의심"));
    assert!(text.ends_with(&link));

    let links = verification_links(&result);
    assert_eq!(links[0].url, "https://www.google.com/search?q=010-1234-5678");
}

#[test]
fn test_report_receipt() {
    let report = SpamReport::new("1588-0000", ReportKind::Invalid).unwrap();
    assert!(report.receipt().starts_with("[신고 접수 완료]\n번호: 1588-0000\n유형: 없는 번호"));
    assert!(SpamReport::new("", ReportKind::Phishing).is_err());
}
