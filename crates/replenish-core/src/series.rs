//! 每日需求序列

use chrono::{Days, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{ReplenishError, Result};

/// 連續、無缺日的每日需求序列
///
/// 以起始日期加上每日數量儲存：第 `i` 筆對應 `start_date + i` 天，
/// 因此日期嚴格遞增且間隔恰為一天。數量一律 ≥ 0。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SeriesData")]
pub struct DailyDemandSeries {
    start_date: NaiveDate,
    values: Vec<Decimal>,
}

/// 反序列化用的原始資料（經 `DailyDemandSeries::new` 驗證）
#[derive(Deserialize)]
struct SeriesData {
    start_date: NaiveDate,
    values: Vec<Decimal>,
}

impl TryFrom<SeriesData> for DailyDemandSeries {
    type Error = ReplenishError;

    fn try_from(data: SeriesData) -> Result<Self> {
        Self::new(data.start_date, data.values)
    }
}

impl DailyDemandSeries {
    /// 由起始日與每日數量建立序列（負值截為 0）
    pub fn new(start_date: NaiveDate, values: Vec<Decimal>) -> Result<Self> {
        if values.is_empty() {
            return Err(ReplenishError::ContractViolation(
                "需求序列不可為空".to_string(),
            ));
        }

        let last_offset = values.len() as u64 - 1;
        start_date
            .checked_add_days(Days::new(last_offset))
            .ok_or_else(|| ReplenishError::ContractViolation("序列日期溢出".to_string()))?;

        let values = values
            .into_iter()
            .map(|v| v.max(Decimal::ZERO))
            .collect();

        Ok(Self { start_date, values })
    }

    /// 以 `end_date` 為最後一天、長度 `days` 的全零序列
    pub fn zeros_ending(end_date: NaiveDate, days: usize) -> Result<Self> {
        let offset = days.saturating_sub(1) as u64;
        let start_date = end_date
            .checked_sub_days(Days::new(offset))
            .ok_or_else(|| ReplenishError::ContractViolation("序列日期溢出".to_string()))?;
        Self::new(start_date, vec![Decimal::ZERO; days])
    }

    /// 起始日期
    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// 最後觀測日期
    pub fn last_date(&self) -> NaiveDate {
        // new() 已檢查最後一天不會溢出
        self.start_date + Days::new(self.values.len() as u64 - 1)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// 每日數量（由舊到新）
    pub fn values(&self) -> &[Decimal] {
        &self.values
    }

    /// 最近 `n` 天的數量（不足則取全部）
    pub fn tail(&self, n: usize) -> &[Decimal] {
        let skip = self.values.len().saturating_sub(n);
        &self.values[skip..]
    }

    /// 指定日期的數量
    pub fn value_on(&self, date: NaiveDate) -> Option<Decimal> {
        let offset = (date - self.start_date).num_days();
        if offset < 0 {
            return None;
        }
        self.values.get(offset as usize).copied()
    }

    /// 以 (日期, 數量) 配對逐日走訪
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, Decimal)> + '_ {
        self.start_date
            .iter_days()
            .zip(self.values.iter().copied())
    }

    /// 轉為 (日期, 數量) 配對，供外部預測模型使用
    pub fn to_pairs(&self) -> Vec<(NaiveDate, Decimal)> {
        self.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_clips_negative_values() {
        let series: DailyDemandSeries =
            serde_json::from_str(r#"{"start_date":"2025-01-01","values":["-5","3"]}"#).unwrap();

        assert_eq!(series.values(), &[Decimal::ZERO, Decimal::from(3)]);
    }

    #[test]
    fn test_deserialize_rejects_empty_series() {
        let result: std::result::Result<DailyDemandSeries, _> =
            serde_json::from_str(r#"{"start_date":"2025-01-01","values":[]}"#);

        assert!(result.is_err());
    }

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, day).unwrap()
    }

    #[test]
    fn test_create_series() {
        let series = DailyDemandSeries::new(
            d(1),
            vec![Decimal::from(10), Decimal::from(-3), Decimal::from(5)],
        )
        .unwrap();

        assert_eq!(series.len(), 3);
        assert_eq!(series.last_date(), d(3));
        // 負值截為 0
        assert_eq!(series.value_on(d(2)), Some(Decimal::ZERO));
        assert_eq!(series.value_on(d(4)), None);
    }

    #[test]
    fn test_empty_series_rejected() {
        assert!(DailyDemandSeries::new(d(1), Vec::new()).is_err());
    }

    #[test]
    fn test_zeros_ending() {
        let series = DailyDemandSeries::zeros_ending(d(10), 7).unwrap();

        assert_eq!(series.len(), 7);
        assert_eq!(series.start_date(), d(4));
        assert_eq!(series.last_date(), d(10));
        assert!(series.values().iter().all(|v| v.is_zero()));
    }

    #[test]
    fn test_tail_and_pairs() {
        let values: Vec<Decimal> = (1..=5).map(Decimal::from).collect();
        let series = DailyDemandSeries::new(d(1), values).unwrap();

        assert_eq!(series.tail(2), &[Decimal::from(4), Decimal::from(5)]);
        assert_eq!(series.tail(10).len(), 5);

        let pairs = series.to_pairs();
        assert_eq!(pairs[0], (d(1), Decimal::from(1)));
        assert_eq!(pairs[4], (d(5), Decimal::from(5)));
    }
}
