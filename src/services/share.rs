//! Share Text
//!
//! Plain-text renderings of a result and of the app itself, for pasting into chat
//! apps, plus external lookup links for a number.

use serde::Serialize;

use phishguard_core::AnalysisResult;

/// Public lookup site for reported fraud accounts and numbers
pub const THECHEAT_URL: &str = "https://thecheat.co.kr/";

const APP_SHARE_BLURB: &str = "🕵️‍♂️ 보이스피싱, 받기 전에 확인하세요!\n\nPhishGuard AI가 의심스러운 번호를 실시간으로 분석해드립니다. 지금 바로 확인해보세요.";

/// Render a result for sharing.
pub fn format_result_share(result: &AnalysisResult, app_link: &str) -> String {
    let summary = result
        .summary
        .iter()
        .map(|line| format!("- {}", line))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "🛡️ [PhishGuard AI 분석 결과]\n\n\
         📞 번호: {}\n\
         📊 위험도: {}점\n\
         🔍 분류: {}\n\n\
         💡 요약:\n{}\n\n\
         👇 이 번호 조회 & 예방하기:\n{}",
        result.normalized_number, result.risk_score, result.category, summary, app_link
    )
}

/// Render the app recommendation.
pub fn format_app_share(app_link: &str) -> String {
    format!("{}\n\n👇 앱 바로가기:\n{}", APP_SHARE_BLURB, app_link)
}

/// An external page for double-checking a number
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationLink {
    pub label: &'static str,
    pub url: String,
}

pub fn verification_links(result: &AnalysisResult) -> Vec<VerificationLink> {
    vec![
        VerificationLink {
            label: "구글 검색",
            url: format!(
                "https://www.google.com/search?q={}",
                urlencoding::encode(&result.normalized_number)
            ),
        },
        VerificationLink {
            label: "더치트 조회",
            url: THECHEAT_URL.to_string(),
        },
    ]
}
