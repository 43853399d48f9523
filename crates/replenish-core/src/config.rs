//! 補貨計劃配置

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::order::DEFAULT_SERVICE_Z;
use crate::{ReplenishError, Result};

/// 預測期允許範圍（天）
pub const HORIZON_RANGE: (u32, u32) = (7, 30);
/// 提前期允許範圍（天）
pub const LEAD_TIME_RANGE: (u32, u32) = (1, 30);
/// 最小訂購量允許範圍
pub const MOQ_RANGE: (u32, u32) = (1, 1000);

/// 補貨計劃參數
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanningConfig {
    /// 業務領域（啟動時決定一次）
    pub domain: Domain,

    /// 預測模型
    pub forecast_model: ForecastModel,

    /// 預測期（天）
    pub horizon_days: u32,

    /// 加權移動平均窗口（天）
    pub window_days: usize,

    /// 需求變異估計窗口（天）
    pub variability_window_days: usize,

    /// 提前期（天）
    pub lead_time_days: u32,

    /// 要求的最小訂購量
    pub moq: u32,

    /// 服務水準係數 z
    pub service_z: Decimal,

    /// 門市範圍
    pub store: StoreScope,

    /// 類別篩選（空 = 全部）
    pub categories: Vec<String>,

    /// 計算基準日（None = 本地今日）
    pub as_of: Option<NaiveDate>,

    /// 全門市模式下的庫存彙總方式
    pub stock_aggregation: StockAggregation,
}

impl Default for PlanningConfig {
    fn default() -> Self {
        Self {
            domain: Domain::Supermarket,
            forecast_model: ForecastModel::MovingAverage,
            horizon_days: 14,
            window_days: 7,
            variability_window_days: 28,
            lead_time_days: 5,
            moq: 1,
            service_z: DEFAULT_SERVICE_Z,
            store: StoreScope::All,
            categories: Vec::new(),
            as_of: None,
            stock_aggregation: StockAggregation::FirstMatch,
        }
    }
}

impl PlanningConfig {
    /// 創建指定領域的預設配置
    pub fn new(domain: Domain) -> Self {
        Self {
            domain,
            ..Self::default()
        }
    }

    /// 從 JSON 載入配置並驗證
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| ReplenishError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// 建構器模式：設置預測模型
    pub fn with_forecast_model(mut self, model: ForecastModel) -> Self {
        self.forecast_model = model;
        self
    }

    /// 建構器模式：設置預測期
    pub fn with_horizon(mut self, days: u32) -> Self {
        self.horizon_days = days;
        self
    }

    /// 建構器模式：設置移動平均窗口
    pub fn with_window(mut self, days: usize) -> Self {
        self.window_days = days;
        self
    }

    /// 建構器模式：設置提前期
    pub fn with_lead_time(mut self, days: u32) -> Self {
        self.lead_time_days = days;
        self
    }

    /// 建構器模式：設置最小訂購量
    pub fn with_moq(mut self, moq: u32) -> Self {
        self.moq = moq;
        self
    }

    /// 建構器模式：設置服務水準係數
    pub fn with_service_z(mut self, z: Decimal) -> Self {
        self.service_z = z;
        self
    }

    /// 建構器模式：設置門市範圍
    pub fn with_store(mut self, store: StoreScope) -> Self {
        self.store = store;
        self
    }

    /// 建構器模式：設置類別篩選
    pub fn with_categories(mut self, categories: Vec<String>) -> Self {
        self.categories = categories;
        self
    }

    /// 建構器模式：設置計算基準日
    pub fn with_as_of(mut self, date: NaiveDate) -> Self {
        self.as_of = Some(date);
        self
    }

    /// 建構器模式：設置庫存彙總方式
    pub fn with_stock_aggregation(mut self, aggregation: StockAggregation) -> Self {
        self.stock_aggregation = aggregation;
        self
    }

    /// 計算基準日
    pub fn today(&self) -> NaiveDate {
        self.as_of.unwrap_or_else(|| chrono::Local::now().date_naive())
    }

    /// 檢查類別是否通過篩選
    pub fn accepts_category(&self, category: Option<&str>) -> bool {
        if self.categories.is_empty() {
            return true;
        }
        category.map_or(false, |c| self.categories.iter().any(|f| f == c))
    }

    /// 驗證參數範圍
    pub fn validate(&self) -> Result<()> {
        check_range("horizon_days", self.horizon_days, HORIZON_RANGE)?;
        check_range("lead_time_days", self.lead_time_days, LEAD_TIME_RANGE)?;
        check_range("moq", self.moq, MOQ_RANGE)?;

        if self.window_days == 0 {
            return Err(ReplenishError::InvalidConfig(
                "window_days 必須大於 0".to_string(),
            ));
        }
        if self.service_z <= Decimal::ZERO {
            return Err(ReplenishError::InvalidConfig(format!(
                "service_z 必須為正數：{}",
                self.service_z
            )));
        }
        Ok(())
    }
}

fn check_range(name: &str, value: u32, (min, max): (u32, u32)) -> Result<()> {
    if value < min || value > max {
        return Err(ReplenishError::InvalidConfig(format!(
            "{} 超出範圍 {}-{}：{}",
            name, min, max, value
        )));
    }
    Ok(())
}

/// 業務領域
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    /// 超市
    Supermarket,
    /// 藥局
    Pharmacy,
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Domain::Supermarket => write!(f, "supermarket"),
            Domain::Pharmacy => write!(f, "pharmacy"),
        }
    }
}

impl FromStr for Domain {
    type Err = ReplenishError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "supermarket" => Ok(Domain::Supermarket),
            "pharmacy" => Ok(Domain::Pharmacy),
            other => Err(ReplenishError::UnknownDomain(other.to_string())),
        }
    }
}

/// 預測模型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForecastModel {
    /// 加權移動平均（快速）
    MovingAverage,
    /// 季節性模型（失敗時退回移動平均）
    Seasonal,
}

/// 門市範圍
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreScope {
    /// 全部門市
    All,
    /// 單一門市
    Store(String),
}

impl StoreScope {
    /// 門市ID（全門市時為 None）
    pub fn store_id(&self) -> Option<&str> {
        match self {
            StoreScope::All => None,
            StoreScope::Store(id) => Some(id.as_str()),
        }
    }

    /// 報表顯示名稱
    pub fn label(&self) -> String {
        match self {
            StoreScope::All => "All Stores".to_string(),
            StoreScope::Store(id) => id.clone(),
        }
    }
}

/// 全門市庫存彙總方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockAggregation {
    /// 各門市加總
    Sum,
    /// 取第一筆符合的紀錄
    FirstMatch,
}
