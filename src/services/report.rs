//! Spam Report
//!
//! Local acknowledgement of a user-submitted report. Reports are not sent anywhere.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::utils::error::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    /// Voice phishing or spam caller
    Phishing,
    /// Number does not exist
    Invalid,
}

impl ReportKind {
    pub fn label(&self) -> &'static str {
        match self {
            ReportKind::Phishing => "보이스피싱/스팸",
            ReportKind::Invalid => "없는 번호",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ReportKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "phishing" | "spam" => Ok(ReportKind::Phishing),
            "invalid" => Ok(ReportKind::Invalid),
            other => Err(AppError::validation(format!("unknown report kind: {}", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpamReport {
    pub number: String,
    pub kind: ReportKind,
}

impl SpamReport {
    pub fn new(number: &str, kind: ReportKind) -> AppResult<Self> {
        let number = number.trim();
        if number.is_empty() {
            return Err(AppError::validation("number is required"));
        }
        Ok(Self {
            number: number.to_string(),
            kind,
        })
    }

    /// Acknowledgement shown to the reporter.
    pub fn receipt(&self) -> String {
        format!(
            "[신고 접수 완료]\n번호: {}\n유형: {}\n\n소중한 제보 감사합니다.",
            self.number, self.kind
        )
    }
}
