use chrono::Utc;
use tauri::State;
use uuid::Uuid;

use crate::models::{Account, AppState, Settings, Strategy, UpdateSettingsInput};
use crate::store::Store;

/// Full snapshot for the initial render of the frontend.
#[tauri::command]
pub async fn get_app_state(store: State<'_, Store>) -> Result<AppState, String> {
    store.read(|state| state.clone())
}

#[tauri::command]
pub async fn get_settings(store: State<'_, Store>) -> Result<Settings, String> {
    store.read(|state| Settings {
        default_risk: state.default_risk,
        language: state.language,
        monthly_target_r: state.monthly_target_r,
    })
}

#[tauri::command]
pub async fn update_settings(
    store: State<'_, Store>,
    settings: UpdateSettingsInput,
) -> Result<Settings, String> {
    store.mutate(|state| {
        if let Some(risk) = settings.default_risk {
            if !risk.is_finite() || risk <= 0.0 {
                return Err("Default risk must be a positive number".to_string());
            }
            state.default_risk = risk;
        }
        if let Some(target) = settings.monthly_target_r {
            if !target.is_finite() || target <= 0.0 {
                return Err("Monthly target must be a positive number".to_string());
            }
            state.monthly_target_r = target;
        }
        if let Some(language) = settings.language {
            state.language = language;
        }
        Ok(Settings {
            default_risk: state.default_risk,
            language: state.language,
            monthly_target_r: state.monthly_target_r,
        })
    })
}

#[tauri::command]
pub async fn add_favorite(store: State<'_, Store>, pair: String) -> Result<Vec<String>, String> {
    let pair = pair.trim().to_uppercase();
    if pair.is_empty() {
        return Err("Pair is required".to_string());
    }
    store.mutate(|state| {
        if state.favorites.contains(&pair) {
            return Err(format!("{} is already in favorites", pair));
        }
        state.favorites.push(pair);
        Ok(state.favorites.clone())
    })
}

#[tauri::command]
pub async fn remove_favorite(store: State<'_, Store>, pair: String) -> Result<Vec<String>, String> {
    store.mutate(|state| {
        state.favorites.retain(|p| p != &pair);
        Ok(state.favorites.clone())
    })
}

#[tauri::command]
pub async fn add_account(store: State<'_, Store>, name: String) -> Result<Account, String> {
    let name = name.trim().to_string();
    if name.is_empty() {
        return Err("Account name is required".to_string());
    }
    let account = Account {
        id: format!("ACC-{}-{}", Utc::now().timestamp_millis(), Uuid::new_v4()),
        name,
    };
    store.mutate(move |state| {
        state.accounts.push(account.clone());
        Ok(account)
    })
}

#[tauri::command]
pub async fn remove_account(store: State<'_, Store>, id: String) -> Result<(), String> {
    store.mutate(|state| {
        state.accounts.retain(|a| a.id != id);
        Ok(())
    })
}

#[tauri::command]
pub async fn add_strategy(store: State<'_, Store>, name: String) -> Result<Strategy, String> {
    let name = name.trim().to_string();
    if name.is_empty() {
        return Err("Strategy name is required".to_string());
    }
    let strategy = Strategy {
        id: format!("STRAT-{}-{}", Utc::now().timestamp_millis(), Uuid::new_v4()),
        name,
    };
    store.mutate(move |state| {
        state.strategies.push(strategy.clone());
        Ok(strategy)
    })
}

#[tauri::command]
pub async fn remove_strategy(store: State<'_, Store>, id: String) -> Result<(), String> {
    store.mutate(|state| {
        state.strategies.retain(|s| s.id != id);
        Ok(())
    })
}
