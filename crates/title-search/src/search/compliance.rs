//! Compliance detail objects returned by the external compliance service.
//! Consumed for display only; never produced on this side of the wire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::deserialize_timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceRule {
    Respa,
    Tila,
    StateSpecific,
    LocalJurisdiction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceStatus {
    Pass,
    Fail,
    Warning,
    Pending,
}

impl ComplianceStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pass => "Pass",
            Self::Fail => "Fail",
            Self::Warning => "Warning",
            Self::Pending => "Pending",
        }
    }
}

/// Outcome of a single rule evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceCheck {
    pub rule_name: String,
    pub rule_type: ComplianceRule,
    pub status: ComplianceStatus,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    #[serde(default)]
    pub violations: Vec<String>,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceReport {
    pub report_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property_address: Option<serde_json::Value>,
    pub jurisdiction: String,
    pub checks: Vec<ComplianceCheck>,
    pub overall_status: ComplianceStatus,
    #[serde(deserialize_with = "deserialize_timestamp")]
    pub created_at: DateTime<Utc>,
    pub checked_by: String,
}
