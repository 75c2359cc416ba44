use chrono::Utc;
use serde::Serialize;
use tauri::State;
use tauri_plugin_notification::NotificationExt;

use crate::engine::{self, EquityCurvePoint, JournalStats, MonthlyProgress, StatsFilter};
use crate::store::Store;

#[tauri::command]
pub async fn get_journal_stats(
    store: State<'_, Store>,
    filter: Option<StatsFilter>,
) -> Result<JournalStats, String> {
    let filter = filter.unwrap_or_default();
    store.read(|state| engine::journal_stats(&state.trades, &filter))
}

#[tauri::command]
pub async fn get_equity_curve(
    store: State<'_, Store>,
    filter: Option<StatsFilter>,
) -> Result<Vec<EquityCurvePoint>, String> {
    let filter = filter.unwrap_or_default();
    store.read(|state| engine::equity_curve(&state.trades, &filter))
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyProgressView {
    #[serde(flatten)]
    pub progress: MonthlyProgress,
    /// True exactly once per month, the first time the target is reached.
    pub celebrate: bool,
}

#[tauri::command]
pub async fn get_monthly_progress(
    app: tauri::AppHandle,
    store: State<'_, Store>,
) -> Result<MonthlyProgressView, String> {
    let now = Utc::now();

    let (progress, celebrate) = store.read(|state| {
        let progress = engine::monthly_progress(&state.trades, state.monthly_target_r, now);
        let celebrate = engine::should_celebrate(&progress, state.last_celebrated_month.as_deref());
        (progress, celebrate)
    })?;
    if celebrate {
        let month = progress.month.clone();
        store.mutate(|state| {
            state.last_celebrated_month = Some(month);
            Ok(())
        })?;

        if let Err(e) = app
            .notification()
            .builder()
            .title("Monthly target reached")
            .body(format!(
                "{:+.1}R this month, target of {:.0}R hit",
                progress.net_r, progress.target_r
            ))
            .show()
        {
            log::warn!("Could not show celebration notification: {}", e);
        }
    }

    Ok(MonthlyProgressView {
        progress,
        celebrate,
    })
}
