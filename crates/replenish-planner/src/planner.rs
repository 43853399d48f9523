//! 補貨計劃主流程

use std::collections::{BTreeMap, HashMap};

use rayon::prelude::*;
use replenish_calc::{
    build_daily_series_as_of, demand_variability, forecast_baseline, Forecaster,
    SeasonalForecaster,
};
use replenish_core::forecast::average_yhat;
use replenish_core::recommendation::sort_by_status;
use replenish_core::{
    DailyDemandSeries, ForecastModel, ForecastPoint, PlanningConfig, ProductInfo,
    RecommendationRecord, ReorderInputs, ReplenishError, SalesRecord, StockRecord,
};
use replenish_policy::{select_policy, DomainPolicy};
use rust_decimal::Decimal;

use crate::lookup::{lookup_on_hand, resolve_product};
use crate::{PlanResult, PlanWarning};

/// 預測結果與所用模型
#[derive(Debug, Clone)]
pub struct ForecastOutcome {
    pub points: Vec<ForecastPoint>,

    /// 實際產生預測的模型
    pub model: String,

    /// 季節性模型失敗原因（已退回移動平均）
    pub fallback_reason: Option<String>,
}

impl ForecastOutcome {
    /// 是否退回移動平均
    pub fn used_fallback(&self) -> bool {
        self.fallback_reason.is_some()
    }

    /// 預測期平均每日需求
    pub fn avg_daily_demand(&self) -> Decimal {
        average_yhat(&self.points)
    }
}

/// 單一 SKU 的計算結果
struct SkuOutcome {
    record: RecommendationRecord,
    warnings: Vec<PlanWarning>,
}

/// 補貨計劃器
pub struct ReplenishmentPlanner {
    /// 計劃參數
    config: PlanningConfig,

    /// 領域政策（啟動時注入）
    policy: Box<dyn DomainPolicy>,

    /// 季節性預測模型
    seasonal: Box<dyn Forecaster>,
}

impl ReplenishmentPlanner {
    /// 創建新的計劃器（驗證配置）
    pub fn new(
        config: PlanningConfig,
        policy: Box<dyn DomainPolicy>,
    ) -> replenish_core::Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            policy,
            seasonal: Box::new(SeasonalForecaster::new()),
        })
    }

    /// 依配置中的領域選擇政策並創建計劃器
    pub fn from_config(config: PlanningConfig) -> replenish_core::Result<Self> {
        let policy = select_policy(config.domain);
        Self::new(config, policy)
    }

    /// 建構器模式：替換季節性預測模型
    pub fn with_seasonal_forecaster(mut self, forecaster: Box<dyn Forecaster>) -> Self {
        self.seasonal = forecaster;
        self
    }

    /// 主計劃入口
    pub fn plan(
        &self,
        sales: &[SalesRecord],
        stock: &[StockRecord],
        products: &[ProductInfo],
    ) -> replenish_core::Result<PlanResult> {
        tracing::info!(
            "開始補貨計劃（{}）：銷售 {} 筆，庫存 {} 筆，商品 {} 筆",
            self.policy.domain(),
            sales.len(),
            stock.len(),
            products.len()
        );

        let start_time = std::time::Instant::now();
        let mut result = PlanResult::empty();

        // Step 1: 篩選並按 SKU 分組
        let grouped = self.group_sales_by_sku(sales, products)?;
        tracing::debug!("SKU 數量: {}", grouped.len());

        // Step 2: 各 SKU 並行計算
        let outcomes: Vec<SkuOutcome> = grouped
            .par_iter()
            .map(|(sku, sku_sales)| self.plan_sku(sku, sku_sales, stock, products))
            .collect::<replenish_core::Result<_>>()?;

        for outcome in outcomes {
            result.records.push(outcome.record);
            for warning in outcome.warnings {
                result.add_warning(warning);
            }
        }

        // Step 3: 嚴重 > 警告 > 安全
        sort_by_status(&mut result.records);
        result.calculation_time_ms = Some(start_time.elapsed().as_millis());

        tracing::info!(
            "補貨計劃完成 [{}]，耗時 {:?}，建議 {} 筆，警告 {} 筆",
            result.run_id,
            start_time.elapsed(),
            result.records.len(),
            result.warnings.len()
        );

        Ok(result)
    }

    /// 依配置的模型產生預測；季節性模型失敗時退回移動平均
    pub fn forecast(&self, series: &DailyDemandSeries) -> ForecastOutcome {
        let horizon = self.config.horizon_days;

        if self.config.forecast_model == ForecastModel::Seasonal {
            match self.seasonal_forecast(series, horizon) {
                Ok(points) => {
                    return ForecastOutcome {
                        points,
                        model: self.seasonal.name().to_string(),
                        fallback_reason: None,
                    };
                }
                Err(e) => {
                    tracing::warn!("{} 預測失敗，退回移動平均: {}", self.seasonal.name(), e);
                    return ForecastOutcome {
                        points: forecast_baseline(series, self.config.window_days, horizon),
                        model: "weighted-moving-average".to_string(),
                        fallback_reason: Some(e.to_string()),
                    };
                }
            }
        }

        ForecastOutcome {
            points: forecast_baseline(series, self.config.window_days, horizon),
            model: "weighted-moving-average".to_string(),
            fallback_reason: None,
        }
    }

    /// 呼叫季節性模型並檢查輸出契約
    fn seasonal_forecast(
        &self,
        series: &DailyDemandSeries,
        horizon: u32,
    ) -> replenish_core::Result<Vec<ForecastPoint>> {
        let points = self.seasonal.forecast(&series.to_pairs(), horizon)?;

        if points.len() != horizon as usize {
            return Err(ReplenishError::ForecastFitting(format!(
                "預測筆數 {} 與預測期 {} 不符",
                points.len(),
                horizon
            )));
        }

        let dates_contiguous = series
            .last_date()
            .iter_days()
            .skip(1)
            .zip(&points)
            .all(|(expected, point)| point.date == expected);
        if !dates_contiguous {
            return Err(ReplenishError::ForecastFitting(format!(
                "預測日期須自 {} 的次日起逐日連續",
                series.last_date()
            )));
        }

        Ok(points.into_iter().map(ForecastPoint::clipped).collect())
    }

    /// 單一 SKU 計算
    fn plan_sku(
        &self,
        sku: &str,
        sku_sales: &[SalesRecord],
        stock: &[StockRecord],
        products: &[ProductInfo],
    ) -> replenish_core::Result<SkuOutcome> {
        let mut warnings = Vec::new();
        let today = self.config.today();

        let series = build_daily_series_as_of(sku_sales, today);
        let outcome = self.forecast(&series);
        if let Some(reason) = &outcome.fallback_reason {
            warnings.push(PlanWarning::warning(
                sku.to_string(),
                format!("季節性預測失敗，改用移動平均: {}", reason),
            ));
        }

        let avg_daily_demand = outcome.avg_daily_demand();
        let sigma = demand_variability(&series, self.config.variability_window_days);

        let on_hand = lookup_on_hand(
            stock,
            sku,
            &self.config.store,
            self.config.stock_aggregation,
        )
        .unwrap_or_else(|| {
            warnings.push(PlanWarning::info(
                sku.to_string(),
                "找不到庫存紀錄，現有庫存視為 0".to_string(),
            ));
            Decimal::ZERO
        });

        let (product, used_fallback) = resolve_product(sku, products, sku_sales);
        if used_fallback {
            warnings.push(PlanWarning::info(
                sku.to_string(),
                "商品主檔缺漏，使用預設值".to_string(),
            ));
        }
        let category = Some(product.category.as_str()).filter(|c| !c.is_empty());

        let inputs = ReorderInputs::new(
            avg_daily_demand,
            sigma,
            self.config.lead_time_days,
            on_hand,
            self.config.moq,
        )
        .with_service_z(self.config.service_z);
        let adjusted = self.policy.get_reorder_qty(sku, inputs, category)?;

        let status = self
            .policy
            .evaluate_status(on_hand, avg_daily_demand, adjusted.reorder_point);

        tracing::debug!(
            "{}: 平均需求 {}，σ {}，現有 {}，ROP {}，建議 {}（{}）",
            sku,
            avg_daily_demand.round_dp(2),
            sigma.round_dp(2),
            on_hand,
            adjusted.reorder_point.round_dp(2),
            adjusted.suggested_qty,
            status
        );

        let record = RecommendationRecord {
            sku: sku.to_string(),
            product_name: product.name.clone(),
            category: product.category.clone(),
            store: self.config.store.label(),
            supplier: product.supplier.clone(),
            on_hand,
            avg_daily_demand: avg_daily_demand.round_dp(2),
            reorder_point: adjusted.reorder_point.round_dp(2),
            safety_stock: adjusted.safety_stock.round_dp(2),
            suggested_qty: adjusted.suggested_qty,
            unit_cost: product.unit_cost,
            order_cost: RecommendationRecord::compute_order_cost(
                adjusted.suggested_qty,
                product.unit_cost,
            ),
            status,
            expiry_risk: self.policy.expiry_risk(category, Some(&product), today),
            compliance: self.policy.compliance_flag(category),
            forecast_fallback: outcome.used_fallback(),
        };

        Ok(SkuOutcome { record, warnings })
    }

    /// 套用門市/類別篩選後按 SKU 分組
    fn group_sales_by_sku(
        &self,
        sales: &[SalesRecord],
        products: &[ProductInfo],
    ) -> replenish_core::Result<BTreeMap<String, Vec<SalesRecord>>> {
        let product_categories: HashMap<&str, &str> = products
            .iter()
            .map(|p| (p.sku.as_str(), p.category.as_str()))
            .collect();
        let store_id = self.config.store.store_id();

        let mut grouped: BTreeMap<String, Vec<SalesRecord>> = BTreeMap::new();
        for record in sales {
            if record.sku.trim().is_empty() {
                return Err(ReplenishError::ContractViolation(format!(
                    "銷售紀錄缺少 SKU（日期 {}）",
                    record.date
                )));
            }

            if store_id.map_or(false, |s| !record.is_in_store(s)) {
                continue;
            }

            let category = record
                .category
                .as_deref()
                .or_else(|| product_categories.get(record.sku.as_str()).copied());
            if !self.config.accepts_category(category) {
                continue;
            }

            grouped
                .entry(record.sku.clone())
                .or_default()
                .push(record.clone());
        }

        Ok(grouped)
    }

    /// 獲取配置引用
    pub fn config(&self) -> &PlanningConfig {
        &self.config
    }

    /// 獲取領域政策引用
    pub fn policy(&self) -> &dyn DomainPolicy {
        self.policy.as_ref()
    }
}
