use chrono::Utc;
use tauri::State;
use uuid::Uuid;

use crate::models::{Bias, CreateBiasInput};
use crate::store::Store;

#[tauri::command]
pub async fn get_biases(store: State<'_, Store>) -> Result<Vec<Bias>, String> {
    store.read(|state| state.biases.clone())
}

#[tauri::command]
pub async fn create_bias(
    store: State<'_, Store>,
    bias: CreateBiasInput,
) -> Result<Bias, String> {
    let pair = bias.pair.trim().to_uppercase();
    if pair.is_empty() {
        return Err("Pair is required".to_string());
    }

    let now = Utc::now().timestamp_millis();
    let new_bias = Bias {
        id: format!("BIAS-{}-{}", now, Uuid::new_v4()),
        pair,
        direction: bias.direction,
        chart_link: bias.chart_link.filter(|link| !link.trim().is_empty()),
        notes: bias.notes.filter(|notes| !notes.trim().is_empty()),
        created_at: now,
        is_executed: false,
        ai_analysis: None,
    };

    store.mutate(move |state| {
        state.biases.insert(0, new_bias.clone());
        Ok(new_bias)
    })
}

#[tauri::command]
pub async fn delete_bias(store: State<'_, Store>, id: String) -> Result<(), String> {
    store.mutate(|state| {
        let index = state
            .biases
            .iter()
            .position(|b| b.id == id)
            .ok_or_else(|| format!("Bias {} not found", id))?;
        if state.biases[index].is_executed {
            return Err("Cannot delete a bias that was already executed".to_string());
        }
        state.biases.remove(index);
        Ok(())
    })
}
