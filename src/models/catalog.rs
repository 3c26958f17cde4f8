//! Catalog Models
//!
//! Recommended companion apps shown alongside the analyzer.

use serde::{Deserialize, Serialize};

/// A recommended app entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppItem {
    pub id: String,
    pub title: String,
    pub description: String,
}

impl AppItem {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
        }
    }
}

/// Entries used when no catalog has been saved yet
pub fn default_apps() -> Vec<AppItem> {
    vec![
        AppItem::new(
            "1",
            "척추측만증 AI 진단",
            "카메라로 체형을 분석하여 척추 건강 상태를 체크하세요.",
        ),
        AppItem::new(
            "2",
            "딥페이크 탐지기",
            "영상 통화 중 상대방의 얼굴이 딥페이크인지 실시간으로 분석합니다.",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_apps_have_unique_ids() {
        let apps = default_apps();
        assert_eq!(apps.len(), 2);
        assert_ne!(apps[0].id, apps[1].id);
    }
}
