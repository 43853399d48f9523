//! # Replenish Calculation Engine
//!
//! 需求序列、需求預測與再訂購量計算

pub mod baseline;
pub mod forecaster;
pub mod reorder;
pub mod seasonal;
pub mod series_builder;
pub mod variability;

// Re-export 主要類型
pub use baseline::{forecast_baseline, BaselineForecaster};
pub use forecaster::Forecaster;
pub use reorder::{round_up_to_multiple, suggest_order, ReorderEngine};
pub use seasonal::{forecast_seasonal, SeasonalForecaster};
pub use series_builder::{build_daily_series, build_daily_series_as_of, EMPTY_SERIES_DAYS};
pub use variability::{demand_variability, DEFAULT_VARIABILITY_WINDOW};
