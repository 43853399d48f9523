//! 批次計劃結果

use std::collections::BTreeMap;

use replenish_core::{RecommendationRecord, StockStatus};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::PlanWarning;

/// 批次計劃結果
#[derive(Debug, Clone)]
pub struct PlanResult {
    /// 本次計劃ID（日誌追蹤用）
    pub run_id: Uuid,

    /// 補貨建議（依狀態排序：嚴重 > 警告 > 安全）
    pub records: Vec<RecommendationRecord>,

    /// 警告信息
    pub warnings: Vec<PlanWarning>,

    /// 計算耗時（毫秒）
    pub calculation_time_ms: Option<u128>,
}

impl PlanResult {
    /// 創建空的計劃結果
    pub fn empty() -> Self {
        Self {
            run_id: Uuid::new_v4(),
            records: Vec::new(),
            warnings: Vec::new(),
            calculation_time_ms: None,
        }
    }

    /// 添加警告
    pub fn add_warning(&mut self, warning: PlanWarning) {
        self.warnings.push(warning);
    }

    /// 查詢單一 SKU 的建議
    pub fn record(&self, sku: &str) -> Option<&RecommendationRecord> {
        self.records.iter().find(|r| r.sku == sku)
    }

    /// 批次彙總
    pub fn summary(&self) -> PlanSummary {
        let count =
            |status: StockStatus| self.records.iter().filter(|r| r.status == status).count();

        PlanSummary {
            total_skus: self.records.len(),
            critical: count(StockStatus::Critical),
            warning: count(StockStatus::Warning),
            safe: count(StockStatus::Safe),
            total_order_cost: self.records.iter().map(|r| r.order_cost).sum(),
        }
    }

    /// 依供應商分組（供應商名稱排序）
    pub fn group_by_supplier(&self) -> BTreeMap<String, Vec<&RecommendationRecord>> {
        let mut grouped: BTreeMap<String, Vec<&RecommendationRecord>> = BTreeMap::new();
        for record in &self.records {
            grouped
                .entry(record.supplier.clone())
                .or_default()
                .push(record);
        }
        grouped
    }
}

/// 批次彙總指標
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanSummary {
    pub total_skus: usize,
    pub critical: usize,
    pub warning: usize,
    pub safe: usize,
    pub total_order_cost: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use replenish_core::{ComplianceFlag, ExpiryRisk};

    fn record(sku: &str, supplier: &str, status: StockStatus, cost: i64) -> RecommendationRecord {
        RecommendationRecord {
            sku: sku.to_string(),
            product_name: sku.to_string(),
            category: String::new(),
            store: "All Stores".to_string(),
            supplier: supplier.to_string(),
            on_hand: Decimal::ZERO,
            avg_daily_demand: Decimal::ONE,
            reorder_point: Decimal::ONE,
            safety_stock: Decimal::ZERO,
            suggested_qty: 1,
            unit_cost: Decimal::from(cost),
            order_cost: Decimal::from(cost),
            status,
            expiry_risk: ExpiryRisk::Ok,
            compliance: ComplianceFlag::Standard,
            forecast_fallback: false,
        }
    }

    #[test]
    fn test_summary() {
        let mut result = PlanResult::empty();
        result.records = vec![
            record("A", "X", StockStatus::Critical, 10),
            record("B", "Y", StockStatus::Warning, 5),
            record("C", "X", StockStatus::Safe, 0),
        ];

        let summary = result.summary();
        assert_eq!(summary.total_skus, 3);
        assert_eq!(summary.critical, 1);
        assert_eq!(summary.warning, 1);
        assert_eq!(summary.safe, 1);
        assert_eq!(summary.total_order_cost, Decimal::from(15));
    }

    #[test]
    fn test_add_warning() {
        let mut result = PlanResult::empty();
        result.add_warning(PlanWarning::info("A".to_string(), "找不到庫存紀錄".to_string()));
        result.add_warning(PlanWarning::warning("B".to_string(), "改用移動平均".to_string()));

        assert_eq!(result.warnings.len(), 2);
        assert_eq!(result.warnings[1].severity, crate::WarningSeverity::Warning);
    }

    #[test]
    fn test_group_by_supplier() {
        let mut result = PlanResult::empty();
        result.records = vec![
            record("A", "Y", StockStatus::Critical, 1),
            record("B", "X", StockStatus::Warning, 1),
            record("C", "Y", StockStatus::Safe, 1),
        ];

        let grouped = result.group_by_supplier();
        let suppliers: Vec<_> = grouped.keys().cloned().collect();
        assert_eq!(suppliers, vec!["X".to_string(), "Y".to_string()]);
        assert_eq!(grouped["Y"].len(), 2);
        assert_eq!(result.record("B").map(|r| r.supplier.as_str()), Some("X"));
    }
}
