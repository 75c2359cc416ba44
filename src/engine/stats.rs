use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Trade, TradeStatus};

/// Optional account/strategy narrowing applied to every statistic.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsFilter {
    pub account_id: Option<String>,
    pub strategy_id: Option<String>,
}

impl StatsFilter {
    fn matches(&self, trade: &Trade) -> bool {
        if let Some(account_id) = &self.account_id {
            if &trade.account_id != account_id {
                return false;
            }
        }
        if let Some(strategy_id) = &self.strategy_id {
            if trade.strategy_id.as_ref() != Some(strategy_id) {
                return false;
            }
        }
        true
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalStats {
    pub net_r: f64,
    pub win_rate: f64,
    pub wins: i32,
    pub losses: i32,
    pub breakevens: i32,
    pub trades_taken: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquityCurvePoint {
    pub label: String,
    pub r: f64,
    pub cumulative_r: f64,
    pub closed_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyProgress {
    /// Calendar month key, e.g. "2026-08".
    pub month: String,
    pub net_r: f64,
    pub target_r: f64,
    /// Progress towards the target, clamped to [0, 100].
    pub percent: f64,
    pub achieved: bool,
}

/// Trades closed at an unknown instant fall back to their creation time.
fn effective_close_ms(trade: &Trade) -> i64 {
    trade.closed_at.unwrap_or(trade.created_at)
}

/// The closed subset (WON/LOST/BE) under `filter`, oldest close first.
fn closed_sorted<'a>(trades: &'a [Trade], filter: &StatsFilter) -> Vec<&'a Trade> {
    let mut closed: Vec<&Trade> = trades
        .iter()
        .filter(|t| t.status.is_closed() && filter.matches(t))
        .collect();
    closed.sort_by_key(|t| effective_close_ms(t));
    closed
}

pub fn journal_stats(trades: &[Trade], filter: &StatsFilter) -> JournalStats {
    let closed = closed_sorted(trades, filter);

    let net_r = closed.iter().map(|t| t.final_r).sum();
    let wins = closed
        .iter()
        .filter(|t| t.status == TradeStatus::Won)
        .count() as i32;
    let losses = closed
        .iter()
        .filter(|t| t.status == TradeStatus::Lost)
        .count() as i32;
    let breakevens = closed
        .iter()
        .filter(|t| t.status == TradeStatus::Be)
        .count() as i32;
    let trades_taken = closed.len() as i32;

    let win_rate = if trades_taken > 0 {
        (wins as f64 / trades_taken as f64) * 100.0
    } else {
        0.0
    };

    JournalStats {
        net_r,
        win_rate,
        wins,
        losses,
        breakevens,
        trades_taken,
    }
}

/// Prefix sums of `final_r` in chronological close order, one point per
/// closed trade. The last point's cumulative value equals the net R stat.
pub fn equity_curve(trades: &[Trade], filter: &StatsFilter) -> Vec<EquityCurvePoint> {
    let closed = closed_sorted(trades, filter);

    let mut cumulative_r = 0.0;
    closed
        .iter()
        .enumerate()
        .map(|(i, trade)| {
            cumulative_r += trade.final_r;
            EquityCurvePoint {
                label: format!("T{}", i + 1),
                r: trade.final_r,
                cumulative_r,
                closed_at: effective_close_ms(trade),
            }
        })
        .collect()
}

pub fn month_key(now: DateTime<Utc>) -> String {
    now.format("%Y-%m").to_string()
}

/// Net R of trades closed in the current UTC calendar month, expressed as
/// progress towards `target_r`.
pub fn monthly_progress(trades: &[Trade], target_r: f64, now: DateTime<Utc>) -> MonthlyProgress {
    let filter = StatsFilter::default();
    let net_r: f64 = closed_sorted(trades, &filter)
        .iter()
        .filter(|t| {
            DateTime::from_timestamp_millis(effective_close_ms(t))
                .map(|closed| closed.year() == now.year() && closed.month() == now.month())
                .unwrap_or(false)
        })
        .map(|t| t.final_r)
        .sum();

    let (percent, achieved) = if target_r > 0.0 {
        (
            ((net_r / target_r) * 100.0).clamp(0.0, 100.0),
            net_r >= target_r,
        )
    } else {
        (0.0, false)
    };

    MonthlyProgress {
        month: month_key(now),
        net_r,
        target_r,
        percent,
        achieved,
    }
}

/// One-shot celebration gate: fires the first time the target is reached in
/// a month that has not been celebrated yet.
pub fn should_celebrate(progress: &MonthlyProgress, last_celebrated_month: Option<&str>) -> bool {
    progress.achieved && last_celebrated_month != Some(progress.month.as_str())
}
