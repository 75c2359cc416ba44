use serde::{Deserialize, Serialize};

use super::trade::Direction;

/// A planned, not-yet-executed directional view on an instrument.
///
/// `is_executed` flips to true exactly once, when a trade is derived from the
/// bias. A bias can only be deleted while it has not been executed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bias {
    pub id: String,
    pub pair: String,
    pub direction: Direction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: i64,
    #[serde(default)]
    pub is_executed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_analysis: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBiasInput {
    pub pair: String,
    pub direction: Direction,
    pub chart_link: Option<String>,
    pub notes: Option<String>,
}
