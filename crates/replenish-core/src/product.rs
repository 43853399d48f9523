//! 商品主檔

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 預設供應商名稱
pub const UNKNOWN_SUPPLIER: &str = "Unknown";

/// 商品資訊
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductInfo {
    /// 商品代碼
    pub sku: String,

    /// 品名
    pub name: String,

    /// 類別
    pub category: String,

    /// 供應商
    pub supplier: String,

    /// 單位成本
    pub unit_cost: Decimal,

    /// 到期日（藥局批次）
    pub expiry: Option<NaiveDate>,
}

impl ProductInfo {
    /// 創建新的商品資訊
    pub fn new(sku: String, name: String, category: String) -> Self {
        Self {
            sku,
            name,
            category,
            supplier: UNKNOWN_SUPPLIER.to_string(),
            unit_cost: Decimal::ONE,
            expiry: None,
        }
    }

    /// 主檔缺漏時的預設值：品名 = SKU，供應商 Unknown，成本 1.0
    pub fn fallback(sku: &str, category: Option<String>) -> Self {
        Self::new(sku.to_string(), sku.to_string(), category.unwrap_or_default())
    }

    /// 建構器模式：設置供應商
    pub fn with_supplier(mut self, supplier: String) -> Self {
        self.supplier = supplier;
        self
    }

    /// 建構器模式：設置單位成本
    pub fn with_unit_cost(mut self, unit_cost: Decimal) -> Self {
        self.unit_cost = unit_cost;
        self
    }

    /// 建構器模式：設置到期日
    pub fn with_expiry(mut self, expiry: NaiveDate) -> Self {
        self.expiry = Some(expiry);
        self
    }
}
