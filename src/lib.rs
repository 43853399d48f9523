//! # Replenish
//!
//! 零售/藥局補貨建議引擎
//!
//! 流程：銷售紀錄 → 每日需求序列 → 需求預測 → (s,Q) 再訂購量 → 領域政策
//!
//! ```no_run
//! use replenish::prelude::*;
//!
//! # fn main() -> replenish::model::Result<()> {
//! let sales = replenish::io::load_sales_file("data/sales.csv")?;
//! let stock = replenish::io::load_stock_file("data/stock.csv")?;
//! let products = replenish::io::load_products_file("data/products.csv")?;
//!
//! let planner = ReplenishmentPlanner::from_config(PlanningConfig::new(Domain::Pharmacy))?;
//! let result = planner.plan(&sales, &stock, &products)?;
//! replenish::io::write_purchase_order(std::io::stdout(), &result.records)?;
//! # Ok(())
//! # }
//! ```

pub use replenish_calc as calc;
pub use replenish_core as model;
pub use replenish_io as io;
pub use replenish_planner as planner;
pub use replenish_policy as policy;

/// 常用類型
pub mod prelude {
    pub use replenish_calc::{
        build_daily_series, forecast_baseline, suggest_order, BaselineForecaster, Forecaster,
        ReorderEngine, SeasonalForecaster,
    };
    pub use replenish_core::{
        DailyDemandSeries, Domain, ForecastModel, ForecastPoint, PlanningConfig, ProductInfo,
        RecommendationRecord, ReorderInputs, ReorderResult, ReplenishError, SalesRecord,
        StockRecord, StockStatus, StoreScope,
    };
    pub use replenish_planner::{PlanResult, ReplenishmentPlanner};
    pub use replenish_policy::{select_policy, DomainPolicy};
}
