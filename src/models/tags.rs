use serde::{Deserialize, Serialize};

/// A user-managed trading account label. Trades reference it by id, or use
/// the `GENERAL` sentinel when unassigned.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: String,
    pub name: String,
}

/// A user-managed strategy label. A trade references at most one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Strategy {
    pub id: String,
    pub name: String,
}
