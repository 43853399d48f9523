//! 再訂購量計算（連續盤點 (s, Q) 模型）

use replenish_core::{ReorderInputs, ReorderResult, ReplenishError};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, MathematicalOps};

/// 再訂購量計算器（與業務領域無關）
pub struct ReorderEngine;

impl ReorderEngine {
    /// 計算建議訂購量
    ///
    /// 1. 提前期與 MOQ 至少為 1，σ 與 z 至少為 0
    /// 2. 需求 ≤ 0 時視為需求與變異皆為 0
    /// 3. 提前期需求 = 每日需求 × 提前期
    /// 4. 安全庫存 = z × σ × √提前期
    /// 5. 再訂購點 = 提前期需求 + 安全庫存
    /// 6. 缺口 > 0 時無條件進位，再進位到 MOQ 倍數
    pub fn suggest_order(inputs: ReorderInputs) -> replenish_core::Result<ReorderResult> {
        let inputs = Self::normalize(inputs);

        let lead = Decimal::from(inputs.lead_time_days);
        let sqrt_lead = lead.sqrt().ok_or_else(|| {
            ReplenishError::CalculationError(format!("無法計算 √{}", lead))
        })?;

        let demand_during_lead = inputs.daily_demand * lead;
        let safety_stock = inputs.service_z * inputs.sigma * sqrt_lead;
        let reorder_point = demand_during_lead + safety_stock;

        let raw_gap = reorder_point - inputs.on_hand;
        let qty = if raw_gap > Decimal::ZERO {
            raw_gap.ceil().to_u64().ok_or_else(|| {
                ReplenishError::CalculationError(format!("訂購量超出範圍: {}", raw_gap))
            })?
        } else {
            0
        };
        let suggested_qty = round_up_to_multiple(qty, inputs.moq)?;

        tracing::trace!(
            "ROP {} = {} + {}，現有 {}，建議 {}",
            reorder_point,
            demand_during_lead,
            safety_stock,
            inputs.on_hand,
            suggested_qty
        );

        Ok(ReorderResult {
            suggested_qty,
            reorder_point,
            safety_stock,
            demand_during_lead,
            inputs,
        })
    }

    /// 正規化輸入
    fn normalize(mut inputs: ReorderInputs) -> ReorderInputs {
        inputs.lead_time_days = inputs.lead_time_days.max(1);
        inputs.moq = inputs.moq.max(1);
        inputs.sigma = inputs.sigma.max(Decimal::ZERO);
        inputs.service_z = inputs.service_z.max(Decimal::ZERO);

        if inputs.daily_demand <= Decimal::ZERO {
            inputs.daily_demand = Decimal::ZERO;
            inputs.sigma = Decimal::ZERO;
        }
        inputs
    }
}

/// 以預設 z = 1.65 計算建議訂購量
pub fn suggest_order(
    daily_demand: Decimal,
    sigma: Decimal,
    lead_time_days: u32,
    on_hand: Decimal,
    moq: u32,
) -> replenish_core::Result<ReorderResult> {
    ReorderEngine::suggest_order(ReorderInputs::new(
        daily_demand,
        sigma,
        lead_time_days,
        on_hand,
        moq,
    ))
}

/// 進位到 `moq` 的倍數（0 維持 0）
pub fn round_up_to_multiple(qty: u64, moq: u32) -> replenish_core::Result<u64> {
    let moq = u64::from(moq.max(1));
    qty.div_ceil(moq)
        .checked_mul(moq)
        .ok_or_else(|| ReplenishError::CalculationError(format!("訂購量超出範圍: {}", qty)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    fn dec(v: i64) -> Decimal {
        Decimal::from(v)
    }

    #[test]
    fn test_no_order_needed() {
        let result = suggest_order(dec(5), dec(1), 2, dec(20), 1).unwrap();

        assert_eq!(result.suggested_qty, 0);
        assert!(result.reorder_point > Decimal::ZERO);
        assert!(!result.needs_order());
    }

    #[test]
    fn test_order_needed() {
        // ROP = 30 + 1.65·2·√3 ≈ 35.72 → 缺口 30.72 → 31
        let result = suggest_order(dec(10), dec(2), 3, dec(5), 1).unwrap();

        assert_eq!(result.suggested_qty, 31);
        assert_eq!(result.demand_during_lead, dec(30));
        assert_eq!(result.safety_stock.round_dp(2), Decimal::new(572, 2));
    }

    #[test]
    fn test_negative_service_z_is_clamped() {
        let inputs = ReorderInputs::new(dec(10), dec(3), 4, dec(0), 1)
            .with_service_z(Decimal::new(-165, 2));
        let result = ReorderEngine::suggest_order(inputs).unwrap();

        assert_eq!(result.safety_stock, Decimal::ZERO);
        assert_eq!(result.reorder_point, dec(40));
        assert_eq!(result.suggested_qty, 40);
        assert_eq!(result.inputs.service_z, Decimal::ZERO);
    }

    #[test]
    fn test_respects_moq() {
        // ROP = 20 + 1.65·√2 ≈ 22.33 → 23 → 25
        let result = suggest_order(dec(10), dec(1), 2, dec(0), 5).unwrap();

        assert_eq!(result.suggested_qty, 25);
        assert_eq!(result.suggested_qty % 5, 0);
    }

    #[test]
    fn test_negative_demand_clamped() {
        let result = suggest_order(dec(-5), dec(1), 2, dec(0), 1).unwrap();

        assert_eq!(result.suggested_qty, 0);
        assert_eq!(result.reorder_point, Decimal::ZERO);
        assert_eq!(result.inputs.daily_demand, Decimal::ZERO);
        assert_eq!(result.inputs.sigma, Decimal::ZERO);
    }

    #[test]
    fn test_inputs_normalized() {
        let result = suggest_order(dec(4), dec(0), 0, dec(0), 0).unwrap();

        assert_eq!(result.inputs.lead_time_days, 1);
        assert_eq!(result.inputs.moq, 1);
        assert_eq!(result.suggested_qty, 4);
    }

    #[test]
    fn test_custom_service_z() {
        let inputs = ReorderInputs::new(dec(10), dec(2), 4, Decimal::new(5, 1), 1)
            .with_service_z(dec(2));
        let result = ReorderEngine::suggest_order(inputs).unwrap();

        // 2 · 2 · √4 = 8
        assert_eq!(result.safety_stock.round_dp(10), dec(8));
        assert_eq!(result.reorder_point.round_dp(10), dec(48));
        assert_eq!(result.suggested_qty, 48);
    }

    #[rstest]
    #[case(0, 5, 0)]
    #[case(1, 5, 5)]
    #[case(5, 5, 5)]
    #[case(23, 5, 25)]
    #[case(7, 1, 7)]
    #[case(7, 0, 7)]
    fn test_round_up_to_multiple(#[case] qty: u64, #[case] moq: u32, #[case] expected: u64) {
        assert_eq!(round_up_to_multiple(qty, moq).unwrap(), expected);
    }

    #[test]
    fn test_round_up_overflow() {
        assert!(round_up_to_multiple(u64::MAX, 2).is_err());
    }

    proptest! {
        #[test]
        fn prop_moq_multiple_and_idempotent(qty in 1u64..1_000_000, moq in 1u32..1000) {
            let rounded = round_up_to_multiple(qty, moq).unwrap();
            prop_assert_eq!(rounded % u64::from(moq), 0);
            prop_assert!(rounded >= qty);
            prop_assert_eq!(round_up_to_multiple(rounded, moq).unwrap(), rounded);
        }

        #[test]
        fn prop_sigma_monotonic(
            demand in 0i64..200,
            sigma_low in 0i64..50,
            extra in 0i64..50,
            lead in 1u32..30,
            on_hand in 0i64..500,
            moq in 1u32..20,
        ) {
            let low = suggest_order(dec(demand), dec(sigma_low), lead, dec(on_hand), moq).unwrap();
            let high =
                suggest_order(dec(demand), dec(sigma_low + extra), lead, dec(on_hand), moq)
                    .unwrap();

            prop_assert!(high.reorder_point >= low.reorder_point);
            prop_assert!(high.suggested_qty >= low.suggested_qty);
        }

        #[test]
        fn prop_engine_qty_is_moq_multiple(
            demand in -20i64..200,
            sigma in 0i64..30,
            lead in 0u32..30,
            on_hand in 0i64..300,
            moq in 1u32..50,
        ) {
            let result = suggest_order(dec(demand), dec(sigma), lead, dec(on_hand), moq).unwrap();
            prop_assert_eq!(result.suggested_qty % u64::from(moq), 0);
            prop_assert!(result.reorder_point >= Decimal::ZERO);
            prop_assert!(result.safety_stock >= Decimal::ZERO);
        }
    }
}
