//! 庫存模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 門市現有庫存
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockRecord {
    /// 商品代碼
    pub sku: String,

    /// 門市
    pub store_id: String,

    /// 現有庫存
    pub on_hand: Decimal,
}

impl StockRecord {
    /// 創建新的庫存紀錄
    pub fn new(sku: String, store_id: String, on_hand: Decimal) -> Self {
        Self {
            sku,
            store_id,
            on_hand,
        }
    }

    /// 檢查是否為指定商品與門市
    pub fn matches(&self, sku: &str, store_id: Option<&str>) -> bool {
        self.sku == sku && store_id.map_or(true, |s| self.store_id == s)
    }
}
