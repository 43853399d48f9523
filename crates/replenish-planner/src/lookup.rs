//! 庫存與商品主檔查詢

use replenish_core::{ProductInfo, SalesRecord, StockAggregation, StockRecord, StoreScope};
use rust_decimal::Decimal;

/// 查詢現有庫存
///
/// 單一門市取該門市紀錄；全門市依 `aggregation` 加總或取第一筆。
/// 找不到紀錄時回傳 None（呼叫端視為 0）。
pub fn lookup_on_hand(
    stock: &[StockRecord],
    sku: &str,
    scope: &StoreScope,
    aggregation: StockAggregation,
) -> Option<Decimal> {
    let mut matches = stock.iter().filter(|s| s.matches(sku, scope.store_id()));

    match (scope, aggregation) {
        (StoreScope::All, StockAggregation::Sum) => {
            let first = matches.next()?;
            Some(first.on_hand + matches.map(|s| s.on_hand).sum::<Decimal>())
        }
        _ => matches.next().map(|s| s.on_hand),
    }
}

/// 取得商品資訊；主檔缺漏時回傳預設值與 `true`
///
/// 預設值：品名 = SKU、類別取自銷售紀錄、供應商 Unknown、成本 1.0
pub fn resolve_product(
    sku: &str,
    products: &[ProductInfo],
    sales: &[SalesRecord],
) -> (ProductInfo, bool) {
    if let Some(product) = products.iter().find(|p| p.sku == sku) {
        return (product.clone(), false);
    }

    let category = sales
        .iter()
        .filter(|r| r.sku == sku)
        .find_map(|r| r.category.clone());

    (ProductInfo::fallback(sku, category), true)
}
