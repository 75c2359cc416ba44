use serde::{Deserialize, Serialize};

use super::bias::Bias;
use super::tags::{Account, Strategy};
use super::trade::{Trade, GENERAL_ACCOUNT};

/// Pairs seeded into the watch-list on first launch.
pub const INITIAL_FAVORITES: [&str; 6] = ["EURUSD", "GBPUSD", "USDJPY", "XAUUSD", "US30", "NAS100"];

fn default_favorites() -> Vec<String> {
    INITIAL_FAVORITES.iter().map(|p| p.to_string()).collect()
}

fn default_default_risk() -> f64 {
    1.0
}

fn default_monthly_target_r() -> f64 {
    10.0
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Language {
    #[default]
    En,
    Es,
}

/// Root aggregate. One instance lives for the whole process, persisted
/// wholesale after every mutation and restored wholesale at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppState {
    pub favorites: Vec<String>,
    pub accounts: Vec<Account>,
    pub strategies: Vec<Strategy>,
    pub biases: Vec<Bias>,
    pub trades: Vec<Trade>,
    pub default_risk: f64,
    pub language: Language,
    pub monthly_target_r: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_celebrated_month: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            favorites: default_favorites(),
            accounts: Vec::new(),
            strategies: Vec::new(),
            biases: Vec::new(),
            trades: Vec::new(),
            default_risk: default_default_risk(),
            language: Language::default(),
            monthly_target_r: default_monthly_target_r(),
            last_celebrated_month: None,
        }
    }
}

impl AppState {
    /// Value-level defaulting for snapshots written by older versions.
    /// Runs once at load time, after deserialization.
    pub fn normalize(&mut self) {
        if !self.default_risk.is_finite() || self.default_risk <= 0.0 {
            self.default_risk = default_default_risk();
        }
        if !self.monthly_target_r.is_finite() || self.monthly_target_r <= 0.0 {
            self.monthly_target_r = default_monthly_target_r();
        }
        for trade in &mut self.trades {
            if !trade.risk_multiple.is_finite() || trade.risk_multiple <= 0.0 {
                trade.risk_multiple = 1.0;
            }
            if trade.account_id.trim().is_empty() {
                trade.account_id = GENERAL_ACCOUNT.to_string();
            }
        }
    }

    pub fn find_bias(&self, id: &str) -> Option<&Bias> {
        self.biases.iter().find(|b| b.id == id)
    }

    pub fn find_bias_mut(&mut self, id: &str) -> Option<&mut Bias> {
        self.biases.iter_mut().find(|b| b.id == id)
    }

    pub fn find_trade_mut(&mut self, id: &str) -> Option<&mut Trade> {
        self.trades.iter_mut().find(|t| t.id == id)
    }
}

/// The user-tunable subset of [`AppState`], as shown on the settings screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub default_risk: f64,
    pub language: Language,
    pub monthly_target_r: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSettingsInput {
    pub default_risk: Option<f64>,
    pub language: Option<Language>,
    pub monthly_target_r: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::trade::{Direction, TradeStatus};

    #[test]
    fn snapshot_round_trip_preserves_state() {
        let mut state = AppState::default();
        state.accounts.push(Account {
            id: "ACC-1".into(),
            name: "Funded".into(),
        });
        state.strategies.push(Strategy {
            id: "STRAT-1".into(),
            name: "Breakout".into(),
        });
        state.biases.push(Bias {
            id: "BIAS-1".into(),
            pair: "EURUSD".into(),
            direction: Direction::Long,
            chart_link: Some("https://tradingview.com/x".into()),
            notes: None,
            created_at: 1_700_000_000_000,
            is_executed: true,
            ai_analysis: None,
        });
        state.default_risk = 2.0;
        state.monthly_target_r = 20.0;
        state.language = Language::Es;
        state.last_celebrated_month = Some("2026-07".into());

        let json = serde_json::to_string(&state).unwrap();
        let restored: AppState = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.accounts.len(), 1);
        assert_eq!(restored.strategies[0].name, "Breakout");
        assert_eq!(restored.biases[0].pair, "EURUSD");
        assert!(restored.biases[0].is_executed);
        assert_eq!(restored.default_risk, 2.0);
        assert_eq!(restored.monthly_target_r, 20.0);
        assert_eq!(restored.language, Language::Es);
        assert_eq!(restored.last_celebrated_month.as_deref(), Some("2026-07"));
    }

    #[test]
    fn legacy_trade_defaults_risk_multiple_and_account() {
        // Snapshot written before accounts and risk multiples existed.
        let legacy = r#"{
            "id": "1700000000000",
            "biasId": "1699999999000",
            "pair": "EURUSD",
            "direction": "LONG",
            "entryPrice": 1.1,
            "stopLoss": 1.095,
            "rValue": 0.005,
            "tps": [],
            "status": "OPEN",
            "finalR": 0.0,
            "createdAt": 1700000000000
        }"#;

        let trade: Trade = serde_json::from_str(legacy).unwrap();
        assert_eq!(trade.risk_multiple, 1.0);
        assert_eq!(trade.account_id, GENERAL_ACCOUNT);
        assert_eq!(trade.strategy_id, None);
        assert_eq!(trade.status, TradeStatus::Open);
    }

    #[test]
    fn empty_document_falls_back_to_defaults() {
        let state: AppState = serde_json::from_str("{}").unwrap();
        assert_eq!(state.favorites.len(), INITIAL_FAVORITES.len());
        assert_eq!(state.default_risk, 1.0);
        assert_eq!(state.language, Language::En);
        assert!(state.trades.is_empty());
    }

    #[test]
    fn normalize_repairs_out_of_range_values() {
        let mut state = AppState::default();
        state.default_risk = 0.0;
        state.monthly_target_r = -5.0;
        state.trades.push(Trade {
            id: "T-1".into(),
            bias_id: "B-1".into(),
            account_id: "  ".into(),
            strategy_id: None,
            pair: "XAUUSD".into(),
            direction: Direction::Short,
            entry_price: 2400.0,
            stop_loss: 2410.0,
            r_value: 10.0,
            risk_multiple: 0.0,
            chart_link: None,
            tps: Vec::new(),
            status: TradeStatus::Open,
            final_r: 0.0,
            created_at: 1_700_000_000_000,
            closed_at: None,
            notes: None,
        });

        state.normalize();

        assert_eq!(state.default_risk, 1.0);
        assert_eq!(state.monthly_target_r, 10.0);
        assert_eq!(state.trades[0].risk_multiple, 1.0);
        assert_eq!(state.trades[0].account_id, GENERAL_ACCOUNT);
    }
}
