use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use crate::models::AppState;

/// File name of the persisted snapshot, kept from the original storage key.
pub const SNAPSHOT_FILE: &str = "tradesync_v1.json";

/// Single-writer state container. Holds the whole [`AppState`] behind a mutex
/// and mirrors it to one JSON document after every mutation.
pub struct Store {
    state: Mutex<AppState>,
    path: PathBuf,
}

impl Store {
    /// Load the snapshot at `path`. A missing or malformed document is never
    /// fatal: both fall back to defaults, a malformed one with a warning.
    pub fn load(path: PathBuf) -> Self {
        let state = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<AppState>(&raw) {
                Ok(mut state) => {
                    state.normalize();
                    log::info!(
                        "Loaded snapshot from {:?} ({} biases, {} trades)",
                        path,
                        state.biases.len(),
                        state.trades.len()
                    );
                    state
                }
                Err(e) => {
                    log::warn!(
                        "Snapshot at {:?} is malformed ({}), starting with defaults",
                        path,
                        e
                    );
                    AppState::default()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No snapshot at {:?}, starting with defaults", path);
                AppState::default()
            }
            Err(e) => {
                log::warn!(
                    "Could not read snapshot at {:?} ({}), starting with defaults",
                    path,
                    e
                );
                AppState::default()
            }
        };

        Store {
            state: Mutex::new(state),
            path,
        }
    }

    pub fn read<R>(&self, f: impl FnOnce(&AppState) -> R) -> Result<R, String> {
        let state = self.state.lock().map_err(|e| e.to_string())?;
        Ok(f(&state))
    }

    /// Run a mutation and persist the full state afterwards. The closure's
    /// error aborts before anything is written.
    pub fn mutate<R>(
        &self,
        f: impl FnOnce(&mut AppState) -> Result<R, String>,
    ) -> Result<R, String> {
        let mut state = self.state.lock().map_err(|e| e.to_string())?;
        let out = f(&mut state)?;
        self.persist(&state);
        Ok(out)
    }

    /// Full-state overwrite. Write failures are logged, not surfaced: the
    /// in-memory state already changed and the next mutation retries anyway.
    fn persist(&self, state: &AppState) {
        match serde_json::to_string_pretty(state) {
            Ok(json) => {
                if let Err(e) = fs::write(&self.path, json) {
                    log::error!("Failed to write snapshot to {:?}: {}", self.path, e);
                }
            }
            Err(e) => log::error!("Failed to serialize snapshot: {}", e),
        }
    }
}
