use chrono::Utc;
use tauri::State;

use crate::engine;
use crate::engine::CloseOutcome;
use crate::models::{ExecuteBiasInput, PartialTp, Trade, TradeFilters, TradeStatus};
use crate::store::Store;

#[tauri::command]
pub async fn get_trades(
    store: State<'_, Store>,
    filters: Option<TradeFilters>,
) -> Result<Vec<Trade>, String> {
    let filters = filters.unwrap_or_default();
    store.read(|state| {
        let mut trades: Vec<Trade> = state
            .trades
            .iter()
            .filter(|t| {
                filters.status.map_or(true, |status| t.status == status)
                    && filters
                        .account_id
                        .as_ref()
                        .map_or(true, |id| &t.account_id == id)
                    && filters
                        .strategy_id
                        .as_ref()
                        .map_or(true, |id| t.strategy_id.as_ref() == Some(id))
                    && filters
                        .pair
                        .as_ref()
                        .map_or(true, |pair| t.pair.contains(&pair.to_uppercase()))
            })
            .cloned()
            .collect();
        trades.sort_by_key(|t| std::cmp::Reverse(t.created_at));
        trades
    })
}

/// Derive a trade from a bias and mark the bias as executed, atomically.
/// Validation failures abort before any state is committed.
#[tauri::command]
pub async fn execute_bias(
    store: State<'_, Store>,
    input: ExecuteBiasInput,
) -> Result<Trade, String> {
    let now = Utc::now().timestamp_millis();
    store.mutate(|state| {
        let bias = state
            .find_bias(&input.bias_id)
            .ok_or_else(|| format!("Bias {} not found", input.bias_id))?;

        let trade = engine::execute_bias(bias, &input, state.default_risk, now)
            .map_err(|e| e.to_string())?;

        if let Some(bias) = state.find_bias_mut(&input.bias_id) {
            bias.is_executed = true;
        }
        state.trades.insert(0, trade.clone());
        Ok(trade)
    })
}

/// Replace a running trade's partial TPs and status (e.g. mark a TP as hit,
/// or park the trade at break-even without closing it).
#[tauri::command]
pub async fn update_trade(
    store: State<'_, Store>,
    id: String,
    tps: Vec<PartialTp>,
    status: TradeStatus,
) -> Result<Trade, String> {
    store.mutate(|state| {
        let trade = state
            .find_trade_mut(&id)
            .ok_or_else(|| format!("Trade {} not found", id))?;
        engine::apply_update(trade, tps, status).map_err(|e| e.to_string())?;
        Ok(trade.clone())
    })
}

#[tauri::command]
pub async fn close_trade(
    store: State<'_, Store>,
    id: String,
    outcome: CloseOutcome,
    manual_r: Option<f64>,
) -> Result<Trade, String> {
    let now = Utc::now().timestamp_millis();
    store.mutate(|state| {
        let trade = state
            .find_trade_mut(&id)
            .ok_or_else(|| format!("Trade {} not found", id))?;
        engine::close_trade(trade, outcome, manual_r, now);
        Ok(trade.clone())
    })
}
