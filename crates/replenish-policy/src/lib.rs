//! # Replenish Policy
//!
//! 領域政策層：依商品類別調整 MOQ 下限與最大訂購量

pub mod pharmacy;
pub mod supermarket;

use chrono::NaiveDate;
use replenish_calc::ReorderEngine;
use replenish_core::{
    CategoryPolicy, ComplianceFlag, Domain, ExpiryRisk, PolicyAdjustedResult, ProductInfo,
    ReorderInputs, StockStatus,
};
use rust_decimal::Decimal;

// Re-export 主要類型
pub use pharmacy::PharmacyPolicy;
pub use supermarket::SupermarketPolicy;

/// 領域政策介面
///
/// 各領域提供自己的類別 → 政策對照表與狀態判定，
/// 共用 `get_reorder_qty` 流程。
pub trait DomainPolicy: Send + Sync {
    /// 所屬領域
    fn domain(&self) -> Domain;

    /// 查詢類別政策
    fn policy_for(&self, sku: &str, category: Option<&str>) -> CategoryPolicy;

    /// 警告門檻倍數（現有庫存 < 再訂購點 × 倍數 即為警告）
    fn warning_multiplier(&self) -> Decimal {
        Decimal::ONE
    }

    /// 到期風險
    fn expiry_risk(
        &self,
        category: Option<&str>,
        product: Option<&ProductInfo>,
        today: NaiveDate,
    ) -> ExpiryRisk;

    /// 法規管制標記
    fn compliance_flag(&self, _category: Option<&str>) -> ComplianceFlag {
        ComplianceFlag::Standard
    }

    /// 庫存狀態判定
    fn evaluate_status(
        &self,
        on_hand: Decimal,
        avg_daily_demand: Decimal,
        reorder_point: Decimal,
    ) -> StockStatus {
        if on_hand < avg_daily_demand {
            StockStatus::Critical
        } else if on_hand < reorder_point * self.warning_multiplier() {
            StockStatus::Warning
        } else {
            StockStatus::Safe
        }
    }

    /// 計算建議訂購量並套用類別政策
    ///
    /// 引擎使用呼叫端要求的 MOQ；政策只調整數量，
    /// 再訂購點與安全庫存保留引擎原值。
    fn get_reorder_qty(
        &self,
        sku: &str,
        inputs: ReorderInputs,
        category: Option<&str>,
    ) -> replenish_core::Result<PolicyAdjustedResult> {
        let policy = self.policy_for(sku, category);
        let engine = ReorderEngine::suggest_order(inputs)?;
        Ok(apply_policy(sku, &policy, engine))
    }
}

/// 將類別政策套用到引擎結果
pub fn apply_policy(
    sku: &str,
    policy: &CategoryPolicy,
    engine: replenish_core::ReorderResult,
) -> PolicyAdjustedResult {
    let engine_qty = engine.suggested_qty;
    let suggested_qty = policy.adjust_quantity(engine_qty);

    let floored = engine_qty.max(u64::from(policy.moq));
    let max_cap_applied = policy.max_order_qty.filter(|cap| floored > *cap);

    if suggested_qty != engine_qty {
        tracing::debug!(
            "{}: 政策調整訂購量 {} → {}（MOQ {}，上限 {:?}）",
            sku,
            engine_qty,
            suggested_qty,
            policy.moq,
            policy.max_order_qty
        );
    }

    PolicyAdjustedResult {
        sku: sku.to_string(),
        suggested_qty,
        engine_qty,
        reorder_point: engine.reorder_point,
        safety_stock: engine.safety_stock,
        service_level: policy.service_level,
        moq_applied: policy.moq,
        max_cap_applied,
        engine,
    }
}

/// 依配置選擇領域政策（啟動時呼叫一次）
pub fn select_policy(domain: Domain) -> Box<dyn DomainPolicy> {
    match domain {
        Domain::Supermarket => Box::new(SupermarketPolicy),
        Domain::Pharmacy => Box::new(PharmacyPolicy),
    }
}

/// 類別是否在清單內
pub(crate) fn category_in(category: Option<&str>, list: &[&str]) -> bool {
    category.map_or(false, |c| list.contains(&c))
}

#[cfg(test)]
mod tests {
    use super::*;
    use replenish_calc::suggest_order;

    #[test]
    fn test_select_policy() {
        assert_eq!(select_policy(Domain::Supermarket).domain(), Domain::Supermarket);
        assert_eq!(select_policy(Domain::Pharmacy).domain(), Domain::Pharmacy);
    }

    #[test]
    fn test_apply_policy_keeps_engine_values() {
        // 引擎：ROP ≈ 507.38，建議 508
        let engine = suggest_order(
            Decimal::from(100),
            Decimal::from(2),
            5,
            Decimal::ZERO,
            1,
        )
        .unwrap();
        let policy = CategoryPolicy::new(Decimal::new(99, 2), 1).with_max_order_qty(50);

        let adjusted = apply_policy("MORPH1", &policy, engine.clone());

        assert_eq!(adjusted.engine_qty, 508);
        assert_eq!(adjusted.suggested_qty, 50);
        assert_eq!(adjusted.max_cap_applied, Some(50));
        assert_eq!(adjusted.reorder_point, engine.reorder_point);
        assert_eq!(adjusted.safety_stock, engine.safety_stock);
        assert!(adjusted.was_adjusted());
    }

    #[test]
    fn test_apply_policy_floor_only() {
        let engine = suggest_order(Decimal::ONE, Decimal::ZERO, 1, Decimal::from(10), 1).unwrap();
        let policy = CategoryPolicy::new(Decimal::new(97, 2), 5);

        let adjusted = apply_policy("MILK1", &policy, engine);

        assert_eq!(adjusted.engine_qty, 0);
        assert_eq!(adjusted.suggested_qty, 5);
        assert_eq!(adjusted.moq_applied, 5);
        assert_eq!(adjusted.max_cap_applied, None);
    }
}
