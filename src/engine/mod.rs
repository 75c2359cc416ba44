pub mod lifecycle;
pub mod stats;

pub use lifecycle::{apply_update, close_trade, execute_bias, CloseOutcome, LifecycleError};
pub use stats::{
    equity_curve, journal_stats, month_key, monthly_progress, should_celebrate, EquityCurvePoint,
    JournalStats, MonthlyProgress, StatsFilter,
};
