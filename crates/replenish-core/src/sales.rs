//! 銷售紀錄模型

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 單筆銷售交易
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    /// 銷售日期
    pub date: NaiveDate,

    /// 商品代碼
    pub sku: String,

    /// 門市
    pub store_id: String,

    /// 銷售數量
    pub qty_sold: Decimal,

    /// 商品類別（銷售檔可選欄位）
    #[serde(default)]
    pub category: Option<String>,
}

impl SalesRecord {
    /// 創建新的銷售紀錄
    pub fn new(date: NaiveDate, sku: String, store_id: String, qty_sold: Decimal) -> Self {
        Self {
            date,
            sku,
            store_id,
            qty_sold,
            category: None,
        }
    }

    /// 建構器模式：設置類別
    pub fn with_category(mut self, category: String) -> Self {
        self.category = Some(category);
        self
    }

    /// 檢查是否屬於指定門市
    pub fn is_in_store(&self, store_id: &str) -> bool {
        self.store_id == store_id
    }
}
