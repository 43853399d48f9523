//! 預測模型介面

use chrono::NaiveDate;
use replenish_core::ForecastPoint;
use rust_decimal::Decimal;

/// 可替換的需求預測模型
///
/// 輸入為連續每日 (日期, 數量) 配對；輸出恰為 `horizon` 筆，
/// 自最後觀測日的隔天開始，`yhat` 一律 ≥ 0。
pub trait Forecaster: Send + Sync {
    /// 模型名稱（日誌用）
    fn name(&self) -> &str;

    /// 產生預測
    fn forecast(
        &self,
        history: &[(NaiveDate, Decimal)],
        horizon: u32,
    ) -> replenish_core::Result<Vec<ForecastPoint>>;
}

/// 自 `last_date` 隔天起連續 `horizon` 天
pub(crate) fn future_dates(last_date: NaiveDate, horizon: u32) -> impl Iterator<Item = NaiveDate> {
    last_date.iter_days().skip(1).take(horizon as usize)
}
