use chrono::Utc;
use serde::{Deserialize, Serialize};
use tauri::State;

use crate::models::AppState;
use crate::store::Store;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupData {
    pub state: AppState,
    pub export_date: String,
    pub version: String,
}

/// Export the whole journal as pretty-printed JSON. The frontend hands the
/// string to a save dialog.
#[tauri::command]
pub async fn export_all_data(store: State<'_, Store>) -> Result<String, String> {
    let state = store.read(|state| state.clone())?;

    let backup = BackupData {
        state,
        export_date: Utc::now().to_rfc3339(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    serde_json::to_string_pretty(&backup).map_err(|e| e.to_string())
}

/// Replace the whole journal from a JSON backup. Returns
/// `(biases, trades)` imported counts.
#[tauri::command]
pub async fn import_all_data(
    store: State<'_, Store>,
    json_data: String,
) -> Result<(usize, usize), String> {
    let backup: BackupData = serde_json::from_str(&json_data).map_err(|e| e.to_string())?;

    let mut imported = backup.state;
    imported.normalize();
    let counts = (imported.biases.len(), imported.trades.len());

    log::info!(
        "Importing backup from {} ({} biases, {} trades)",
        backup.export_date,
        counts.0,
        counts.1
    );

    store.mutate(|state| {
        *state = imported;
        Ok(())
    })?;

    Ok(counts)
}
