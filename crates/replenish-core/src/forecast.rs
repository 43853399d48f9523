//! 預測結果模型

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 單日預測值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    /// 預測日期
    pub date: NaiveDate,

    /// 期望需求（≥ 0）
    pub yhat: Decimal,

    /// 區間下界
    pub yhat_lower: Option<Decimal>,

    /// 區間上界
    pub yhat_upper: Option<Decimal>,
}

impl ForecastPoint {
    /// 創建新的預測值（負值截為 0）
    pub fn new(date: NaiveDate, yhat: Decimal) -> Self {
        Self {
            date,
            yhat: yhat.max(Decimal::ZERO),
            yhat_lower: None,
            yhat_upper: None,
        }
    }

    /// 建構器模式：設置預測區間（下界同樣截為 0）
    pub fn with_interval(mut self, lower: Decimal, upper: Decimal) -> Self {
        self.yhat_lower = Some(lower.max(Decimal::ZERO));
        self.yhat_upper = Some(upper.max(Decimal::ZERO));
        self
    }

    /// 再次確保所有值非負
    pub fn clipped(mut self) -> Self {
        self.yhat = self.yhat.max(Decimal::ZERO);
        self.yhat_lower = self.yhat_lower.map(|v| v.max(Decimal::ZERO));
        self.yhat_upper = self.yhat_upper.map(|v| v.max(Decimal::ZERO));
        self
    }
}

/// 預測期間的平均每日需求
pub fn average_yhat(points: &[ForecastPoint]) -> Decimal {
    if points.is_empty() {
        return Decimal::ZERO;
    }
    let total: Decimal = points.iter().map(|p| p.yhat).sum();
    total / Decimal::from(points.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forecast_point_clips_negative() {
        let date = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();
        let point = ForecastPoint::new(date, Decimal::from(-4))
            .with_interval(Decimal::from(-9), Decimal::from(3));

        assert_eq!(point.yhat, Decimal::ZERO);
        assert_eq!(point.yhat_lower, Some(Decimal::ZERO));
        assert_eq!(point.yhat_upper, Some(Decimal::from(3)));
    }

    #[test]
    fn test_average_yhat() {
        let date = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();
        let points = vec![
            ForecastPoint::new(date, Decimal::from(2)),
            ForecastPoint::new(date.succ_opt().unwrap(), Decimal::from(4)),
        ];

        assert_eq!(average_yhat(&points), Decimal::from(3));
        assert_eq!(average_yhat(&[]), Decimal::ZERO);
    }
}
