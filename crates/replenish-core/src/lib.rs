//! # Replenish Core
//!
//! 補貨建議的核心資料模型與類型定義

pub mod config;
pub mod forecast;
pub mod order;
pub mod product;
pub mod recommendation;
pub mod sales;
pub mod series;
pub mod stock;

// Re-export 主要類型
pub use config::{Domain, ForecastModel, PlanningConfig, StockAggregation, StoreScope};
pub use forecast::ForecastPoint;
pub use order::{CategoryPolicy, PolicyAdjustedResult, ReorderInputs, ReorderResult};
pub use product::ProductInfo;
pub use recommendation::{ComplianceFlag, ExpiryRisk, RecommendationRecord, StockStatus};
pub use sales::SalesRecord;
pub use series::DailyDemandSeries;
pub use stock::StockRecord;

/// 補貨計算錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum ReplenishError {
    #[error("季節性模型擬合失敗: {0}")]
    ForecastFitting(String),

    #[error("輸入資料結構錯誤: {0}")]
    ContractViolation(String),

    #[error("無效的配置: {0}")]
    InvalidConfig(String),

    #[error("未知的領域: {0}")]
    UnknownDomain(String),

    #[error("CSV 錯誤: {0}")]
    Csv(String),

    #[error("I/O 錯誤: {0}")]
    Io(String),

    #[error("計算錯誤: {0}")]
    CalculationError(String),
}

pub type Result<T> = std::result::Result<T, ReplenishError>;
