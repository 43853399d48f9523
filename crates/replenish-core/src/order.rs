//! 補貨輸入與結果模型

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 預設服務水準係數（約 95%）
pub const DEFAULT_SERVICE_Z: Decimal = Decimal::from_parts(165, 0, 0, false, 2);

/// 補貨引擎輸入
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReorderInputs {
    /// 預估每日需求
    pub daily_demand: Decimal,

    /// 需求標準差
    pub sigma: Decimal,

    /// 提前期（天）
    pub lead_time_days: u32,

    /// 現有庫存
    pub on_hand: Decimal,

    /// 最小訂購量
    pub moq: u32,

    /// 服務水準係數 z
    pub service_z: Decimal,
}

impl ReorderInputs {
    /// 創建新的補貨輸入（z 預設 1.65）
    pub fn new(
        daily_demand: Decimal,
        sigma: Decimal,
        lead_time_days: u32,
        on_hand: Decimal,
        moq: u32,
    ) -> Self {
        Self {
            daily_demand,
            sigma,
            lead_time_days,
            on_hand,
            moq,
            service_z: DEFAULT_SERVICE_Z,
        }
    }

    /// 建構器模式：設置服務水準係數
    pub fn with_service_z(mut self, service_z: Decimal) -> Self {
        self.service_z = service_z;
        self
    }
}

/// 補貨引擎結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReorderResult {
    /// 建議訂購量
    pub suggested_qty: u64,

    /// 再訂購點
    pub reorder_point: Decimal,

    /// 安全庫存
    pub safety_stock: Decimal,

    /// 提前期內需求
    pub demand_during_lead: Decimal,

    /// 實際使用的輸入（正規化後）
    pub inputs: ReorderInputs,
}

impl ReorderResult {
    /// 檢查是否需要下單
    pub fn needs_order(&self) -> bool {
        self.suggested_qty > 0
    }
}

/// 類別補貨政策
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryPolicy {
    /// 目標服務水準（0, 1）
    pub service_level: Decimal,

    /// 最小訂購量下限
    pub moq: u32,

    /// 最大訂購量上限
    pub max_order_qty: Option<u64>,
}

impl CategoryPolicy {
    /// 創建新的類別政策
    pub fn new(service_level: Decimal, moq: u32) -> Self {
        Self {
            service_level,
            moq,
            max_order_qty: None,
        }
    }

    /// 建構器模式：設置最大訂購量
    pub fn with_max_order_qty(mut self, max_order_qty: u64) -> Self {
        self.max_order_qty = Some(max_order_qty);
        self
    }

    /// 依政策調整訂購量：先補到 MOQ 下限，再壓到上限
    pub fn adjust_quantity(&self, mut quantity: u64) -> u64 {
        let floor = u64::from(self.moq);
        if quantity < floor {
            quantity = floor;
        }

        if let Some(cap) = self.max_order_qty {
            if quantity > cap {
                quantity = cap;
            }
        }

        quantity
    }
}

/// 套用類別政策後的結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyAdjustedResult {
    /// 商品代碼
    pub sku: String,

    /// 最終建議訂購量
    pub suggested_qty: u64,

    /// 引擎原始建議量
    pub engine_qty: u64,

    /// 再訂購點（引擎值，不重新計算）
    pub reorder_point: Decimal,

    /// 安全庫存（引擎值，不重新計算）
    pub safety_stock: Decimal,

    /// 政策服務水準
    pub service_level: Decimal,

    /// 政策 MOQ 下限
    pub moq_applied: u32,

    /// 被上限截斷時的上限值
    pub max_cap_applied: Option<u64>,

    /// 引擎完整結果
    pub engine: ReorderResult,
}

impl PolicyAdjustedResult {
    /// 檢查政策是否改變了引擎建議量
    pub fn was_adjusted(&self) -> bool {
        self.suggested_qty != self.engine_qty
    }
}
