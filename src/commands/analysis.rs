use tauri::State;

use crate::api::{AnalysisProvider, GeminiClient, FALLBACK_MESSAGE, MISSING_KEY_MESSAGE};
use crate::store::Store;

/// Ask the AI helper for a technical checklist on a planned bias.
///
/// Never fails the surrounding workflow: a missing key or provider error
/// degrades to a fixed placeholder string. The state lock is not held across
/// the network call; if the bias was deleted in the meantime the result is
/// simply dropped.
#[tauri::command]
pub async fn analyze_bias(store: State<'_, Store>, id: String) -> Result<String, String> {
    let bias = store.read(|state| {
        state
            .find_bias(&id)
            .map(|b| (b.pair.clone(), b.direction, b.notes.clone().unwrap_or_default()))
    })?;
    let (pair, direction, notes) = bias.ok_or_else(|| format!("Bias {} not found", id))?;

    let client = match GeminiClient::from_env() {
        Ok(client) => client,
        Err(_) => return Ok(MISSING_KEY_MESSAGE.to_string()),
    };

    let analysis = match client.analyze_bias(&pair, direction, &notes).await {
        Ok(text) => text,
        Err(e) => {
            log::warn!("{} analysis for {} failed: {}", client.provider_name(), pair, e);
            return Ok(FALLBACK_MESSAGE.to_string());
        }
    };

    store.mutate(|state| {
        if let Some(bias) = state.find_bias_mut(&id) {
            bias.ai_analysis = Some(analysis.clone());
        }
        Ok(())
    })?;

    Ok(analysis)
}
