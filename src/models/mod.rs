pub mod app_state;
pub mod bias;
pub mod tags;
pub mod trade;

pub use app_state::{AppState, Language, Settings, UpdateSettingsInput};
pub use bias::{Bias, CreateBiasInput};
pub use tags::{Account, Strategy};
pub use trade::{
    Direction, ExecuteBiasInput, PartialTp, Trade, TradeFilters, TradeStatus, TpLevelInput,
    GENERAL_ACCOUNT,
};
