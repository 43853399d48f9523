//! 交易紀錄 → 每日需求序列

use std::collections::BTreeMap;

use chrono::NaiveDate;
use replenish_core::{DailyDemandSeries, SalesRecord};
use rust_decimal::Decimal;

/// 無銷售紀錄時補上的零序列長度（天）
pub const EMPTY_SERIES_DAYS: usize = 7;

/// 以本地今日為基準建立每日需求序列
pub fn build_daily_series(records: &[SalesRecord]) -> DailyDemandSeries {
    build_daily_series_as_of(records, chrono::Local::now().date_naive())
}

/// 建立每日需求序列
///
/// - 同日多筆交易加總
/// - 涵蓋 [最早日期, 最晚日期]，缺日補 0
/// - 加總後為負的日子截為 0
/// - 無紀錄時回傳以 `today` 結尾、7 天全零的序列
pub fn build_daily_series_as_of(records: &[SalesRecord], today: NaiveDate) -> DailyDemandSeries {
    // 按日期分組加總
    let mut daily: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    for record in records {
        *daily.entry(record.date).or_insert(Decimal::ZERO) += record.qty_sold;
    }

    let (Some((&first, _)), Some((&last, _))) = (daily.first_key_value(), daily.last_key_value())
    else {
        tracing::debug!("無銷售紀錄，使用 {} 天零序列", EMPTY_SERIES_DAYS);
        return zero_series(today);
    };

    // 逐日展開，缺日補 0
    let values: Vec<Decimal> = first
        .iter_days()
        .take_while(|date| *date <= last)
        .map(|date| {
            daily
                .get(&date)
                .copied()
                .unwrap_or(Decimal::ZERO)
                .max(Decimal::ZERO)
        })
        .collect();

    let gap_days = values.len() - daily.len();
    if gap_days > 0 {
        tracing::debug!("補齊 {} 個無銷售日", gap_days);
    }

    DailyDemandSeries::new(first, values).expect("日期溢出")
}

fn zero_series(today: NaiveDate) -> DailyDemandSeries {
    DailyDemandSeries::zeros_ending(today, EMPTY_SERIES_DAYS).expect("日期溢出")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, day).unwrap()
    }

    fn sale(date: NaiveDate, qty: i64) -> SalesRecord {
        SalesRecord::new(date, "MILK1".to_string(), "S1".to_string(), Decimal::from(qty))
    }

    #[test]
    fn test_basic_series() {
        let series = build_daily_series_as_of(&[sale(d(1), 10), sale(d(2), 20)], d(20));

        assert_eq!(series.len(), 2);
        assert_eq!(series.values(), &[Decimal::from(10), Decimal::from(20)]);
    }

    #[test]
    fn test_fills_missing_days() {
        let series = build_daily_series_as_of(&[sale(d(1), 5), sale(d(3), 15)], d(20));

        assert_eq!(series.len(), 3);
        assert_eq!(series.value_on(d(2)), Some(Decimal::ZERO));
    }

    #[test]
    fn test_sums_same_day_transactions() {
        let records = vec![sale(d(3), 4), sale(d(1), 2), sale(d(3), 6), sale(d(3), 1)];
        let series = build_daily_series_as_of(&records, d(20));

        assert_eq!(series.start_date(), d(1));
        assert_eq!(series.value_on(d(3)), Some(Decimal::from(11)));
    }

    #[test]
    fn test_empty_input() {
        let series = build_daily_series_as_of(&[], d(20));

        assert_eq!(series.len(), EMPTY_SERIES_DAYS);
        assert_eq!(series.last_date(), d(20));
        assert!(series.values().iter().all(|v| v.is_zero()));
    }

    #[test]
    fn test_clips_negatives() {
        let records = [sale(d(1), -5), sale(d(2), 3), sale(d(2), -1)];
        let series = build_daily_series_as_of(&records, d(20));

        assert_eq!(series.value_on(d(1)), Some(Decimal::ZERO));
        assert_eq!(series.value_on(d(2)), Some(Decimal::from(2)));
    }

    proptest! {
        #[test]
        fn prop_series_complete_and_non_negative(
            rows in prop::collection::vec((0u64..60, -20i64..50), 0..40)
        ) {
            let base = d(1);
            let records: Vec<SalesRecord> = rows
                .iter()
                .map(|(offset, qty)| sale(base + chrono::Days::new(*offset), *qty))
                .collect();

            let series = build_daily_series_as_of(&records, d(31));
            let pairs = series.to_pairs();

            prop_assert!(!pairs.is_empty());
            for window in pairs.windows(2) {
                prop_assert_eq!((window[1].0 - window[0].0).num_days(), 1);
            }
            prop_assert!(series.values().iter().all(|v| *v >= Decimal::ZERO));

            // 同日加總（非負時應相等）
            for (date, qty) in &pairs {
                let sum: Decimal = records
                    .iter()
                    .filter(|r| r.date == *date)
                    .map(|r| r.qty_sold)
                    .sum();
                prop_assert_eq!(*qty, sum.max(Decimal::ZERO));
            }
        }
    }
}
