//! 週季節性預測模型
//!
//! 加法分解：水準 + 線性趨勢 + 星期指數。
//! 資料不足兩個完整週期或序列無變化時回傳 `ForecastFitting`，
//! 由上層改用加權移動平均。

use chrono::{Datelike, NaiveDate};
use replenish_core::{ForecastPoint, ReplenishError};
use rust_decimal::{Decimal, MathematicalOps};

use crate::forecaster::{future_dates, Forecaster};

/// 週期長度（天）
const SEASON_LENGTH: usize = 7;

/// 季節性預測器
#[derive(Debug, Clone)]
pub struct SeasonalForecaster {
    /// 估計水準使用的最近天數
    level_window: usize,
    /// 預測區間的 z 值
    interval_z: Decimal,
}

/// 擬合後的模型參數
#[derive(Debug, Clone)]
struct SeasonalFit {
    level: Decimal,
    trend: Decimal,
    /// 水準所在位置距最後一天的天數
    level_offset: Decimal,
    weekday_index: [Decimal; SEASON_LENGTH],
    residual_sigma: Decimal,
}

impl SeasonalForecaster {
    /// 創建新的季節性預測器（水準窗口 28 天，95% 區間）
    pub fn new() -> Self {
        Self {
            level_window: 4 * SEASON_LENGTH,
            interval_z: Decimal::new(196, 2),
        }
    }

    /// 建構器模式：設置水準窗口
    pub fn with_level_window(mut self, days: usize) -> Self {
        self.level_window = days.max(SEASON_LENGTH);
        self
    }

    /// 最少需要的歷史天數
    pub fn min_history_days() -> usize {
        2 * SEASON_LENGTH
    }

    fn fit(&self, history: &[(NaiveDate, Decimal)]) -> replenish_core::Result<SeasonalFit> {
        let n = history.len();
        if n < Self::min_history_days() {
            return Err(ReplenishError::ForecastFitting(format!(
                "至少需要 {} 天資料，實際 {} 天",
                Self::min_history_days(),
                n
            )));
        }

        let values: Vec<Decimal> = history.iter().map(|(_, v)| (*v).max(Decimal::ZERO)).collect();
        if values.iter().all(|v| *v == values[0]) {
            return Err(ReplenishError::ForecastFitting("需求序列無變化".to_string()));
        }

        let weekday_index = Self::weekday_index(history, &values);

        // 去季節化
        let deseasonalized: Vec<Decimal> = history
            .iter()
            .zip(&values)
            .map(|((date, _), v)| *v - weekday_index[weekday(*date)])
            .collect();

        let k = self.level_window.min(n);
        let level = mean(&deseasonalized[n - k..]);
        let level_offset = Decimal::from(k - 1) / Decimal::TWO;

        let last_week = mean(&deseasonalized[n - SEASON_LENGTH..]);
        let prior_week = mean(&deseasonalized[n - 2 * SEASON_LENGTH..n - SEASON_LENGTH]);
        let trend = (last_week - prior_week) / Decimal::from(SEASON_LENGTH);

        // 窗口內殘差
        let mut squared = Decimal::ZERO;
        for (j, ((date, _), v)) in history[n - k..].iter().zip(&values[n - k..]).enumerate() {
            let days_before_last = Decimal::from(k - 1 - j);
            let fitted =
                level - trend * (days_before_last - level_offset) + weekday_index[weekday(*date)];
            let residual = *v - fitted;
            squared += residual * residual;
        }
        let residual_sigma = (squared / Decimal::from(k)).sqrt().ok_or_else(|| {
            ReplenishError::ForecastFitting("殘差標準差無法收斂".to_string())
        })?;

        Ok(SeasonalFit {
            level,
            trend,
            level_offset,
            weekday_index,
            residual_sigma,
        })
    }

    /// 各星期的平均偏離（總和為 0）
    fn weekday_index(
        history: &[(NaiveDate, Decimal)],
        values: &[Decimal],
    ) -> [Decimal; SEASON_LENGTH] {
        let overall = mean(values);
        let mut sums = [Decimal::ZERO; SEASON_LENGTH];
        let mut counts = [0usize; SEASON_LENGTH];

        for ((date, _), v) in history.iter().zip(values) {
            let w = weekday(*date);
            sums[w] += *v;
            counts[w] += 1;
        }

        let mut index = [Decimal::ZERO; SEASON_LENGTH];
        for w in 0..SEASON_LENGTH {
            if counts[w] > 0 {
                index[w] = sums[w] / Decimal::from(counts[w]) - overall;
            }
        }

        let center = mean(&index);
        for value in index.iter_mut() {
            *value -= center;
        }
        index
    }
}

impl Default for SeasonalForecaster {
    fn default() -> Self {
        Self::new()
    }
}

impl Forecaster for SeasonalForecaster {
    fn name(&self) -> &str {
        "weekly-seasonal"
    }

    fn forecast(
        &self,
        history: &[(NaiveDate, Decimal)],
        horizon: u32,
    ) -> replenish_core::Result<Vec<ForecastPoint>> {
        let fit = self.fit(history)?;
        let last_date = history[history.len() - 1].0;
        let band = self.interval_z * fit.residual_sigma;

        tracing::debug!(
            "季節性模型：水準 {}，趨勢 {}/天，殘差 σ {}",
            fit.level.round_dp(2),
            fit.trend.round_dp(3),
            fit.residual_sigma.round_dp(2)
        );

        let points = future_dates(last_date, horizon)
            .enumerate()
            .map(|(i, date)| {
                let steps_ahead = Decimal::from(i + 1) + fit.level_offset;
                let yhat = fit.level + fit.trend * steps_ahead + fit.weekday_index[weekday(date)];
                ForecastPoint::new(date, yhat).with_interval(yhat - band, yhat + band)
            })
            .collect();

        Ok(points)
    }
}

/// 以預設參數執行季節性預測
pub fn forecast_seasonal(
    history: &[(NaiveDate, Decimal)],
    horizon: u32,
) -> replenish_core::Result<Vec<ForecastPoint>> {
    SeasonalForecaster::new().forecast(history, horizon)
}

fn weekday(date: NaiveDate) -> usize {
    date.weekday().num_days_from_monday() as usize
}

fn mean(values: &[Decimal]) -> Decimal {
    if values.is_empty() {
        return Decimal::ZERO;
    }
    values.iter().copied().sum::<Decimal>() / Decimal::from(values.len())
}
