use serde::{Deserialize, Serialize};

/// Sentinel account id for trades not assigned to a named account.
pub const GENERAL_ACCOUNT: &str = "GENERAL";

pub(crate) fn default_account_id() -> String {
    GENERAL_ACCOUNT.to_string()
}

pub(crate) fn default_risk_multiple() -> f64 {
    1.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Long,
    Short,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Long => "LONG",
            Direction::Short => "SHORT",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeStatus {
    Open,
    Partial,
    Be,
    Won,
    Lost,
}

impl TradeStatus {
    /// WON, LOST and a final BE close all end the trade's lifecycle.
    pub fn is_closed(&self) -> bool {
        matches!(self, TradeStatus::Won | TradeStatus::Lost | TradeStatus::Be)
    }
}

/// A partial take-profit level owned by exactly one trade.
/// Percentages are not required to sum to 100.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialTp {
    pub id: String,
    pub price: f64,
    pub percentage: f64,
    pub hit: bool,
}

/// An executed position derived from a bias, tracked to closure.
///
/// `r_value` is the entry-to-stop price distance fixed at creation (one R).
/// `final_r` stays 0 until the trade is closed. Timestamps are Unix
/// milliseconds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    pub id: String,
    pub bias_id: String,
    #[serde(default = "default_account_id")]
    pub account_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy_id: Option<String>,
    pub pair: String,
    pub direction: Direction,
    pub entry_price: f64,
    pub stop_loss: f64,
    pub r_value: f64,
    #[serde(default = "default_risk_multiple")]
    pub risk_multiple: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart_link: Option<String>,
    #[serde(default)]
    pub tps: Vec<PartialTp>,
    pub status: TradeStatus,
    pub final_r: f64,
    pub created_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closed_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A take-profit level as entered in the execution dialog.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TpLevelInput {
    pub price: f64,
    pub percentage: f64,
}

/// Input for deriving a trade from a bias.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteBiasInput {
    pub bias_id: String,
    pub entry_price: f64,
    pub stop_loss: f64,
    /// Falls back to the configured default risk when absent.
    pub risk_multiple: Option<f64>,
    pub account_id: Option<String>,
    pub strategy_id: Option<String>,
    #[serde(default)]
    pub tps: Vec<TpLevelInput>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeFilters {
    pub status: Option<TradeStatus>,
    pub account_id: Option<String>,
    pub strategy_id: Option<String>,
    pub pair: Option<String>,
}
