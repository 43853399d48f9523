//! # Replenish Planner
//!
//! 批次補貨計劃：每個 SKU 依序執行
//! 需求序列 → 預測 → 再訂購量 → 領域政策，SKU 之間並行處理。

pub mod lookup;
pub mod planner;
pub mod result;

// Re-export 主要類型
pub use lookup::{lookup_on_hand, resolve_product};
pub use planner::{ForecastOutcome, ReplenishmentPlanner};
pub use result::{PlanResult, PlanSummary};

/// 計劃警告（非致命狀況）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanWarning {
    pub sku: String,
    pub message: String,
    pub severity: WarningSeverity,
}

impl PlanWarning {
    pub fn new(sku: String, message: String, severity: WarningSeverity) -> Self {
        Self {
            sku,
            message,
            severity,
        }
    }

    pub fn info(sku: String, message: String) -> Self {
        Self::new(sku, message, WarningSeverity::Info)
    }

    pub fn warning(sku: String, message: String) -> Self {
        Self::new(sku, message, WarningSeverity::Warning)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningSeverity {
    Info,
    Warning,
}
