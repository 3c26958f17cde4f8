//! Analysis Types
//!
//! Value objects produced by the remote analysis service and kept in local history.
//! Field names serialize in camelCase so the persisted history and the remote response
//! share one schema.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Highest valid risk score (inclusive). The lowest is 0.
pub const MAX_RISK_SCORE: i32 = 100;

/// Lower bound of the medium tier.
const MEDIUM_THRESHOLD: i32 = 40;

/// Lower bound of the high tier.
const HIGH_THRESHOLD: i32 = 70;

/// Risk assessment for a single phone number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Digits-only form of the submitted number, as returned by the service
    pub normalized_number: String,
    /// Risk score, valid range 0..=100
    pub risk_score: i32,
    /// Category label (includes an emoji marker)
    pub category: String,
    /// Short summary lines (three expected)
    pub summary: Vec<String>,
    /// Detailed reasoning lines (five expected)
    pub details: Vec<String>,
    /// What the user should do next
    pub action_guide: String,
    /// Closing message
    pub closing_message: String,
}

impl AnalysisResult {
    /// Risk tier derived from the score.
    pub fn tier(&self) -> RiskTier {
        RiskTier::from_score(self.risk_score)
    }

    /// Check the data contract the remote service is expected to honor.
    ///
    /// Out-of-range scores are rejected rather than clamped.
    pub fn validate(&self) -> CoreResult<()> {
        if !(0..=MAX_RISK_SCORE).contains(&self.risk_score) {
            return Err(CoreError::invalid_result(format!(
                "riskScore {} is outside 0..={}",
                self.risk_score, MAX_RISK_SCORE
            )));
        }
        if self.summary.is_empty() {
            return Err(CoreError::invalid_result("summary is empty"));
        }
        if self.details.is_empty() {
            return Err(CoreError::invalid_result("details is empty"));
        }
        Ok(())
    }
}

/// Coarse risk classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    /// The single place where score thresholds live.
    pub fn from_score(score: i32) -> Self {
        if score >= HIGH_THRESHOLD {
            RiskTier::High
        } else if score >= MEDIUM_THRESHOLD {
            RiskTier::Medium
        } else {
            RiskTier::Low
        }
    }

    /// Banner text shown above a result.
    pub fn headline(&self) -> &'static str {
        match self {
            RiskTier::Low => "안전 양호",
            RiskTier::Medium => "주의 필요",
            RiskTier::High => "보이스피싱 위험!",
        }
    }

    /// Stable lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::Low => "low",
            RiskTier::Medium => "medium",
            RiskTier::High => "high",
        }
    }
}

impl std::fmt::Display for RiskTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A completed analysis stored in local history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryItem {
    /// Unique id derived from the generation time
    pub id: String,
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
    #[serde(flatten)]
    pub result: AnalysisResult,
}

impl HistoryItem {
    pub fn new(id: impl Into<String>, timestamp: i64, result: AnalysisResult) -> Self {
        Self {
            id: id.into(),
            timestamp,
            result,
        }
    }

    /// Risk tier derived from the stored score.
    pub fn tier(&self) -> RiskTier {
        self.result.tier()
    }
}
