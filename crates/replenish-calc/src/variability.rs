//! 需求變異估計

use replenish_core::DailyDemandSeries;
use rust_decimal::{Decimal, MathematicalOps};

/// 預設估計窗口（天）
pub const DEFAULT_VARIABILITY_WINDOW: usize = 28;

/// 最近 `window` 天的樣本標準差（n − 1）；少於 2 筆時為 0
pub fn demand_variability(series: &DailyDemandSeries, window: usize) -> Decimal {
    let recent = series.tail(window);
    if recent.len() < 2 {
        return Decimal::ZERO;
    }

    let n = Decimal::from(recent.len());
    let mean = recent.iter().copied().sum::<Decimal>() / n;
    let squared: Decimal = recent
        .iter()
        .map(|v| {
            let diff = *v - mean;
            diff * diff
        })
        .sum();

    (squared / (n - Decimal::ONE))
        .sqrt()
        .unwrap_or(Decimal::ZERO)
}
