//! 單一商品的補貨建議紀錄

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 庫存狀態（紅黃綠燈）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StockStatus {
    /// 庫存低於一日需求
    Critical,
    /// 庫存低於再訂購點（藥局含緩衝）
    Warning,
    /// 庫存充足
    Safe,
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StockStatus::Critical => write!(f, "Critical"),
            StockStatus::Warning => write!(f, "Warning"),
            StockStatus::Safe => write!(f, "Safe"),
        }
    }
}

/// 到期風險標記
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpiryRisk {
    Ok,
    /// 易過期類別
    ExpirySensitive,
    /// 距到期日剩餘天數
    ExpiresIn(i64),
}

impl fmt::Display for ExpiryRisk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpiryRisk::Ok => write!(f, "OK"),
            ExpiryRisk::ExpirySensitive => write!(f, "Expiry Sensitive"),
            ExpiryRisk::ExpiresIn(days) => write!(f, "Expiry in {} days", days),
        }
    }
}

/// 法規管制標記
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComplianceFlag {
    Standard,
    /// 管制藥品
    ControlledDrug,
}

impl fmt::Display for ComplianceFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComplianceFlag::Standard => write!(f, "Standard"),
            ComplianceFlag::ControlledDrug => write!(f, "Controlled Drug"),
        }
    }
}

/// 補貨建議紀錄（提供給報表/匯出層）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationRecord {
    pub sku: String,
    pub product_name: String,
    pub category: String,
    pub store: String,
    pub supplier: String,

    /// 現有庫存
    pub on_hand: Decimal,

    /// 預測平均每日需求
    pub avg_daily_demand: Decimal,

    /// 再訂購點
    pub reorder_point: Decimal,

    /// 安全庫存
    pub safety_stock: Decimal,

    /// 建議訂購量
    pub suggested_qty: u64,

    pub unit_cost: Decimal,

    /// 訂購金額 = 數量 × 單位成本
    pub order_cost: Decimal,

    pub status: StockStatus,
    pub expiry_risk: ExpiryRisk,
    pub compliance: ComplianceFlag,

    /// 是否由季節性模型退回移動平均
    pub forecast_fallback: bool,
}

impl RecommendationRecord {
    /// 依數量與單位成本計算訂購金額（四捨五入到分）
    pub fn compute_order_cost(suggested_qty: u64, unit_cost: Decimal) -> Decimal {
        (Decimal::from(suggested_qty) * unit_cost).round_dp(2)
    }
}

/// 依「嚴重 > 警告 > 安全」排序（穩定排序）
pub fn sort_by_status(records: &mut [RecommendationRecord]) {
    records.sort_by_key(|r| r.status);
}
