//! 加權移動平均基準預測

use chrono::NaiveDate;
use replenish_core::{DailyDemandSeries, ForecastPoint, ReplenishError};
use rust_decimal::Decimal;

use crate::forecaster::{future_dates, Forecaster};

/// 預測下限，避免再訂購點退化為 0
pub const FORECAST_FLOOR: Decimal = Decimal::from_parts(1, 0, 0, false, 1);

/// 預設窗口（天）
pub const DEFAULT_WINDOW: usize = 7;

/// 加權移動平均預測
///
/// 取最近 `window` 天（不足則全取），權重 1..k（最新一天權重最高），
/// 平均值四捨五入到小數兩位後套用 0.1 下限，輸出 `horizon` 天的水平預測。
pub fn forecast_baseline(
    series: &DailyDemandSeries,
    window: usize,
    horizon: u32,
) -> Vec<ForecastPoint> {
    let avg = weighted_average(series.tail(window.max(1)));

    future_dates(series.last_date(), horizon)
        .map(|date| ForecastPoint::new(date, avg))
        .collect()
}

/// 線性加權平均（含下限）
fn weighted_average(recent: &[Decimal]) -> Decimal {
    if recent.is_empty() {
        return FORECAST_FLOOR;
    }

    let mut weighted_sum = Decimal::ZERO;
    let mut weight_total = Decimal::ZERO;
    for (idx, value) in recent.iter().enumerate() {
        let weight = Decimal::from(idx + 1);
        weighted_sum += (*value).max(Decimal::ZERO) * weight;
        weight_total += weight;
    }

    (weighted_sum / weight_total).round_dp(2).max(FORECAST_FLOOR)
}

/// 基準預測器（實作 `Forecaster`，永不失敗）
#[derive(Debug, Clone)]
pub struct BaselineForecaster {
    window: usize,
}

impl BaselineForecaster {
    /// 創建新的基準預測器
    pub fn new(window: usize) -> Self {
        Self {
            window: window.max(1),
        }
    }

    /// 窗口大小
    pub fn window(&self) -> usize {
        self.window
    }
}

impl Default for BaselineForecaster {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}

impl Forecaster for BaselineForecaster {
    fn name(&self) -> &str {
        "weighted-moving-average"
    }

    fn forecast(
        &self,
        history: &[(NaiveDate, Decimal)],
        horizon: u32,
    ) -> replenish_core::Result<Vec<ForecastPoint>> {
        let Some((start, _)) = history.first() else {
            return Err(ReplenishError::ContractViolation(
                "預測輸入序列為空".to_string(),
            ));
        };
        let values = history.iter().map(|(_, v)| *v).collect();
        let series = DailyDemandSeries::new(*start, values)?;
        Ok(forecast_baseline(&series, self.window, horizon))
    }
}
