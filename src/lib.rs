mod api;
mod commands;
mod engine;
mod models;
mod store;

use tauri::Manager;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tauri::Builder::default()
        .plugin(tauri_plugin_dialog::init())
        .plugin(tauri_plugin_notification::init())
        .plugin(tauri_plugin_clipboard_manager::init())
        .plugin(tauri_plugin_fs::init())
        .setup(|app| {
            // Get app data directory
            let app_dir = app
                .path()
                .app_data_dir()
                .expect("Failed to resolve app data directory");

            // Create directory if it doesn't exist
            std::fs::create_dir_all(&app_dir).expect("Failed to create app data directory");

            // Snapshot path; a missing or corrupt snapshot falls back to
            // defaults inside Store::load, it is never fatal.
            let snapshot_path = app_dir.join(store::SNAPSHOT_FILE);
            log::info!("Snapshot path: {:?}", snapshot_path);

            let store = store::Store::load(snapshot_path);

            // Store state container in app state
            app.manage(store);

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            commands::get_app_state,
            commands::get_biases,
            commands::create_bias,
            commands::delete_bias,
            commands::analyze_bias,
            commands::get_trades,
            commands::execute_bias,
            commands::update_trade,
            commands::close_trade,
            commands::get_journal_stats,
            commands::get_equity_curve,
            commands::get_monthly_progress,
            commands::get_settings,
            commands::update_settings,
            commands::add_favorite,
            commands::remove_favorite,
            commands::add_account,
            commands::remove_account,
            commands::add_strategy,
            commands::remove_strategy,
            commands::export_all_data,
            commands::import_all_data,
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application")
}
