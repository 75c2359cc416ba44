use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::models::{
    Bias, Direction, ExecuteBiasInput, PartialTp, Trade, TradeStatus, GENERAL_ACCOUNT,
};

#[derive(Debug, Error, PartialEq)]
pub enum LifecycleError {
    #[error("Entry price and stop loss are required and must be positive numbers")]
    InvalidPrice,

    #[error("Entry price and stop loss must differ")]
    EntryEqualsStop,

    #[error("For LONG, stop loss must be below entry")]
    StopNotBelowEntry,

    #[error("For SHORT, stop loss must be above entry")]
    StopNotAboveEntry,

    #[error("Risk multiple must be a positive number")]
    NonPositiveRisk,

    #[error("Bias was already executed")]
    BiasAlreadyExecuted,

    #[error("Trade is already closed")]
    TradeAlreadyClosed,

    #[error("A closed status must be set by closing the trade")]
    CloseViaUpdate,
}

/// Final result chosen when closing a trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CloseOutcome {
    Win,
    Loss,
    Be,
}

fn mint_id(kind: &str, now_ms: i64) -> String {
    format!("{}-{}-{}", kind, now_ms, Uuid::new_v4())
}

/// Derive a new trade from a bias.
///
/// Validates direction-consistent stop placement before anything is created:
/// for LONG the stop must sit below the entry, for SHORT above it. The
/// entry-to-stop distance becomes the trade's fixed `r_value`.
pub fn execute_bias(
    bias: &Bias,
    input: &ExecuteBiasInput,
    default_risk: f64,
    now_ms: i64,
) -> Result<Trade, LifecycleError> {
    if bias.is_executed {
        return Err(LifecycleError::BiasAlreadyExecuted);
    }

    let entry = input.entry_price;
    let stop = input.stop_loss;
    if !entry.is_finite() || !stop.is_finite() || entry <= 0.0 || stop <= 0.0 {
        return Err(LifecycleError::InvalidPrice);
    }
    if entry == stop {
        return Err(LifecycleError::EntryEqualsStop);
    }
    match bias.direction {
        Direction::Long if stop >= entry => return Err(LifecycleError::StopNotBelowEntry),
        Direction::Short if stop <= entry => return Err(LifecycleError::StopNotAboveEntry),
        _ => {}
    }

    let risk_multiple = input.risk_multiple.unwrap_or(default_risk);
    if !risk_multiple.is_finite() || risk_multiple <= 0.0 {
        return Err(LifecycleError::NonPositiveRisk);
    }

    let account_id = input
        .account_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .unwrap_or(GENERAL_ACCOUNT)
        .to_string();

    let tps = input
        .tps
        .iter()
        .map(|tp| PartialTp {
            id: mint_id("TP", now_ms),
            price: tp.price,
            percentage: tp.percentage,
            hit: false,
        })
        .collect();

    Ok(Trade {
        id: mint_id("TRADE", now_ms),
        bias_id: bias.id.clone(),
        account_id,
        strategy_id: input.strategy_id.clone(),
        pair: bias.pair.clone(),
        direction: bias.direction,
        entry_price: entry,
        stop_loss: stop,
        r_value: (entry - stop).abs(),
        risk_multiple,
        chart_link: bias.chart_link.clone(),
        tps,
        status: TradeStatus::Open,
        final_r: 0.0,
        created_at: now_ms,
        closed_at: None,
        notes: bias.notes.clone(),
    })
}

/// Replace a running trade's partial take-profits and status in place.
/// Used to mark individual TPs as hit and to park the trade at break-even
/// without closing it. Closed statuses must go through [`close_trade`].
pub fn apply_update(
    trade: &mut Trade,
    tps: Vec<PartialTp>,
    status: TradeStatus,
) -> Result<(), LifecycleError> {
    if trade.status.is_closed() {
        return Err(LifecycleError::TradeAlreadyClosed);
    }
    if status.is_closed() {
        return Err(LifecycleError::CloseViaUpdate);
    }
    trade.tps = tps;
    trade.status = status;
    Ok(())
}

/// Close a trade with a final result.
///
/// LOSS realizes `-risk_multiple`, BE realizes 0, WIN takes the manually
/// entered R or falls back to `+risk_multiple` when none was given. The
/// fallback deliberately ignores which partial TPs were hit. `closed_at` is
/// only stamped the first time, so re-applying the same close is idempotent.
pub fn close_trade(trade: &mut Trade, outcome: CloseOutcome, manual_r: Option<f64>, now_ms: i64) {
    let (status, final_r) = match outcome {
        CloseOutcome::Loss => (TradeStatus::Lost, -trade.risk_multiple),
        CloseOutcome::Be => (TradeStatus::Be, 0.0),
        CloseOutcome::Win => (
            TradeStatus::Won,
            manual_r.unwrap_or(trade.risk_multiple),
        ),
    };
    trade.status = status;
    trade.final_r = final_r;
    trade.closed_at.get_or_insert(now_ms);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TpLevelInput;

    const NOW: i64 = 1_700_000_000_000;

    fn long_bias() -> Bias {
        Bias {
            id: "BIAS-1".into(),
            pair: "EURUSD".into(),
            direction: Direction::Long,
            chart_link: Some("https://tradingview.com/x".into()),
            notes: Some("daily demand zone".into()),
            created_at: NOW - 1000,
            is_executed: false,
            ai_analysis: None,
        }
    }

    fn short_bias() -> Bias {
        Bias {
            direction: Direction::Short,
            pair: "XAUUSD".into(),
            ..long_bias()
        }
    }

    fn input(entry: f64, stop: f64) -> ExecuteBiasInput {
        ExecuteBiasInput {
            bias_id: "BIAS-1".into(),
            entry_price: entry,
            stop_loss: stop,
            risk_multiple: None,
            account_id: None,
            strategy_id: None,
            tps: Vec::new(),
        }
    }

    #[test]
    fn long_execution_computes_r_value() {
        let trade = execute_bias(&long_bias(), &input(1.1000, 1.0950), 1.0, NOW).unwrap();
        assert!((trade.r_value - 0.0050).abs() < 1e-12);
        assert_eq!(trade.status, TradeStatus::Open);
        assert_eq!(trade.final_r, 0.0);
        assert_eq!(trade.account_id, GENERAL_ACCOUNT);
        assert_eq!(trade.pair, "EURUSD");
        assert_eq!(trade.notes.as_deref(), Some("daily demand zone"));
    }

    #[test]
    fn short_execution_computes_r_value() {
        let trade = execute_bias(&short_bias(), &input(2400.0, 2410.0), 1.0, NOW).unwrap();
        assert!((trade.r_value - 10.0).abs() < 1e-12);
    }

    #[test]
    fn long_rejects_stop_at_or_above_entry() {
        assert_eq!(
            execute_bias(&long_bias(), &input(1.1000, 1.1050), 1.0, NOW).unwrap_err(),
            LifecycleError::StopNotBelowEntry
        );
        assert_eq!(
            execute_bias(&long_bias(), &input(1.1000, 1.1000), 1.0, NOW).unwrap_err(),
            LifecycleError::EntryEqualsStop
        );
    }

    #[test]
    fn short_rejects_stop_at_or_below_entry() {
        assert_eq!(
            execute_bias(&short_bias(), &input(2400.0, 2390.0), 1.0, NOW).unwrap_err(),
            LifecycleError::StopNotAboveEntry
        );
    }

    #[test]
    fn rejects_missing_or_negative_prices() {
        assert_eq!(
            execute_bias(&long_bias(), &input(0.0, 1.0950), 1.0, NOW).unwrap_err(),
            LifecycleError::InvalidPrice
        );
        assert_eq!(
            execute_bias(&long_bias(), &input(1.1, f64::NAN), 1.0, NOW).unwrap_err(),
            LifecycleError::InvalidPrice
        );
    }

    #[test]
    fn rejects_already_executed_bias() {
        let mut bias = long_bias();
        bias.is_executed = true;
        assert_eq!(
            execute_bias(&bias, &input(1.1000, 1.0950), 1.0, NOW).unwrap_err(),
            LifecycleError::BiasAlreadyExecuted
        );
    }

    #[test]
    fn risk_multiple_falls_back_to_default() {
        let trade = execute_bias(&long_bias(), &input(1.1000, 1.0950), 2.5, NOW).unwrap();
        assert_eq!(trade.risk_multiple, 2.5);

        let mut with_explicit = input(1.1000, 1.0950);
        with_explicit.risk_multiple = Some(0.5);
        let trade = execute_bias(&long_bias(), &with_explicit, 2.5, NOW).unwrap();
        assert_eq!(trade.risk_multiple, 0.5);
    }

    #[test]
    fn tps_are_created_unhit() {
        let mut with_tps = input(1.1000, 1.0950);
        with_tps.tps = vec![
            TpLevelInput {
                price: 1.1050,
                percentage: 50.0,
            },
            TpLevelInput {
                price: 1.1100,
                percentage: 50.0,
            },
        ];
        let trade = execute_bias(&long_bias(), &with_tps, 1.0, NOW).unwrap();
        assert_eq!(trade.tps.len(), 2);
        assert!(trade.tps.iter().all(|tp| !tp.hit));
        assert_ne!(trade.tps[0].id, trade.tps[1].id);
    }

    #[test]
    fn update_replaces_tps_and_status() {
        let mut trade = execute_bias(&long_bias(), &input(1.1000, 1.0950), 1.0, NOW).unwrap();
        let mut tps = trade.tps.clone();
        tps.push(PartialTp {
            id: "TP-X".into(),
            price: 1.1050,
            percentage: 50.0,
            hit: true,
        });

        apply_update(&mut trade, tps, TradeStatus::Be).unwrap();
        assert_eq!(trade.status, TradeStatus::Be);
        assert!(trade.tps.iter().any(|tp| tp.hit));
    }

    #[test]
    fn update_rejects_terminal_status_and_closed_trade() {
        let mut trade = execute_bias(&long_bias(), &input(1.1000, 1.0950), 1.0, NOW).unwrap();
        assert_eq!(
            apply_update(&mut trade, Vec::new(), TradeStatus::Won).unwrap_err(),
            LifecycleError::CloseViaUpdate
        );

        close_trade(&mut trade, CloseOutcome::Loss, None, NOW);
        assert_eq!(
            apply_update(&mut trade, Vec::new(), TradeStatus::Open).unwrap_err(),
            LifecycleError::TradeAlreadyClosed
        );
    }

    #[test]
    fn loss_close_realizes_negative_risk_multiple() {
        let mut with_risk = input(1.1000, 1.0950);
        with_risk.risk_multiple = Some(2.0);
        let mut trade = execute_bias(&long_bias(), &with_risk, 1.0, NOW).unwrap();

        close_trade(&mut trade, CloseOutcome::Loss, None, NOW + 60_000);
        assert_eq!(trade.status, TradeStatus::Lost);
        assert_eq!(trade.final_r, -2.0);
        assert_eq!(trade.closed_at, Some(NOW + 60_000));
    }

    #[test]
    fn break_even_close_realizes_zero() {
        let mut trade = execute_bias(&long_bias(), &input(1.1000, 1.0950), 1.0, NOW).unwrap();
        close_trade(&mut trade, CloseOutcome::Be, None, NOW + 60_000);
        assert_eq!(trade.status, TradeStatus::Be);
        assert_eq!(trade.final_r, 0.0);
    }

    #[test]
    fn win_close_defaults_to_risk_multiple() {
        let mut trade = execute_bias(&long_bias(), &input(1.1000, 1.0950), 1.0, NOW).unwrap();
        close_trade(&mut trade, CloseOutcome::Win, None, NOW + 60_000);
        assert_eq!(trade.status, TradeStatus::Won);
        assert_eq!(trade.final_r, 1.0);
    }

    #[test]
    fn win_close_takes_manual_r_over_default() {
        let mut trade = execute_bias(&long_bias(), &input(1.1000, 1.0950), 1.0, NOW).unwrap();
        close_trade(&mut trade, CloseOutcome::Win, Some(3.2), NOW + 60_000);
        assert_eq!(trade.final_r, 3.2);
    }

    #[test]
    fn reclose_with_same_inputs_is_idempotent() {
        let mut trade = execute_bias(&long_bias(), &input(1.1000, 1.0950), 1.0, NOW).unwrap();
        close_trade(&mut trade, CloseOutcome::Loss, None, NOW + 60_000);
        let first = trade.clone();

        close_trade(&mut trade, CloseOutcome::Loss, None, NOW + 120_000);
        assert_eq!(trade.status, first.status);
        assert_eq!(trade.final_r, first.final_r);
        assert_eq!(trade.closed_at, first.closed_at);
    }
}
