//! 採購單 CSV 匯出

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use replenish_core::{RecommendationRecord, ReplenishError};
use replenish_planner::PlanResult;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::csv_error;

/// 採購單一列（欄位順序即 CSV 欄位順序）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PurchaseOrderRow {
    #[serde(rename = "Product")]
    pub product: String,
    #[serde(rename = "SKU")]
    pub sku: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Store")]
    pub store: String,
    #[serde(rename = "On Hand")]
    pub on_hand: Decimal,
    #[serde(rename = "Avg Daily Demand")]
    pub avg_daily_demand: Decimal,
    #[serde(rename = "Reorder Point")]
    pub reorder_point: Decimal,
    #[serde(rename = "Safety Stock")]
    pub safety_stock: Decimal,
    #[serde(rename = "Suggested Order Qty")]
    pub suggested_qty: u64,
    #[serde(rename = "Unit Cost")]
    pub unit_cost: Decimal,
    #[serde(rename = "Order Cost")]
    pub order_cost: Decimal,
    #[serde(rename = "Expiry Risk")]
    pub expiry_risk: String,
    #[serde(rename = "Status")]
    pub status: String,
    #[serde(rename = "Compliance Flag")]
    pub compliance: String,
    #[serde(rename = "Supplier")]
    pub supplier: String,
}

impl From<&RecommendationRecord> for PurchaseOrderRow {
    fn from(record: &RecommendationRecord) -> Self {
        Self {
            product: record.product_name.clone(),
            sku: record.sku.clone(),
            category: record.category.clone(),
            store: record.store.clone(),
            on_hand: record.on_hand,
            avg_daily_demand: record.avg_daily_demand.round_dp(2),
            reorder_point: record.reorder_point.round_dp(1),
            safety_stock: record.safety_stock.round_dp(1),
            suggested_qty: record.suggested_qty,
            unit_cost: record.unit_cost,
            order_cost: record.order_cost,
            expiry_risk: record.expiry_risk.to_string(),
            status: record.status.to_string(),
            compliance: record.compliance.to_string(),
            supplier: record.supplier.clone(),
        }
    }
}

/// 寫出完整採購單
pub fn write_purchase_order<'a, W, I>(writer: W, records: I) -> replenish_core::Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a RecommendationRecord>,
{
    let mut csv_writer = csv::Writer::from_writer(writer);

    for record in records {
        csv_writer
            .serialize(PurchaseOrderRow::from(record))
            .map_err(csv_error)?;
    }

    csv_writer
        .flush()
        .map_err(|e| ReplenishError::Io(e.to_string()))?;
    Ok(())
}

/// 供應商採購單檔名（英數字、`-`、`_` 以外的字元轉為底線）
pub fn supplier_file_name(supplier: &str) -> String {
    let safe: String = supplier
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("PO_{}.csv", safe)
}

/// 依供應商拆分採購單，回傳 檔名 → CSV 內容
pub fn supplier_order_csvs(
    result: &PlanResult,
) -> replenish_core::Result<BTreeMap<String, String>> {
    let mut files = BTreeMap::new();

    for (supplier, records) in result.group_by_supplier() {
        let mut buffer = Vec::new();
        write_purchase_order(&mut buffer, records)?;

        let content = String::from_utf8(buffer)
            .map_err(|e| ReplenishError::Io(format!("CSV 編碼錯誤: {}", e)))?;
        tracing::debug!("供應商 {} 採購單: {} 位元組", supplier, content.len());
        files.insert(supplier_file_name(&supplier), content);
    }

    Ok(files)
}

/// 將各供應商採購單寫入目錄，回傳寫出的檔案路徑
pub fn write_supplier_orders(
    result: &PlanResult,
    dir: &Path,
) -> replenish_core::Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    for (file_name, content) in supplier_order_csvs(result)? {
        let path = dir.join(file_name);
        std::fs::write(&path, content)
            .map_err(|e| ReplenishError::Io(format!("無法寫入 '{}': {}", path.display(), e)))?;
        written.push(path);
    }

    tracing::info!("已寫出 {} 份供應商採購單到 {}", written.len(), dir.display());
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use replenish_core::{ComplianceFlag, ExpiryRisk, StockStatus};
    use rstest::rstest;

    fn record(sku: &str, supplier: &str, qty: u64) -> RecommendationRecord {
        RecommendationRecord {
            sku: sku.to_string(),
            product_name: format!("Product {}", sku),
            category: "Dairy".to_string(),
            store: "S1".to_string(),
            supplier: supplier.to_string(),
            on_hand: Decimal::from(10),
            avg_daily_demand: Decimal::new(23333, 3),
            reorder_point: Decimal::new(16543, 2),
            safety_stock: Decimal::new(4876, 2),
            suggested_qty: qty,
            unit_cost: Decimal::new(85, 2),
            order_cost: RecommendationRecord::compute_order_cost(qty, Decimal::new(85, 2)),
            status: StockStatus::Critical,
            expiry_risk: ExpiryRisk::ExpirySensitive,
            compliance: ComplianceFlag::Standard,
            forecast_fallback: false,
        }
    }

    #[test]
    fn test_write_purchase_order() {
        let records = vec![record("MILK1", "DairyCo", 160)];
        let mut buffer = Vec::new();

        write_purchase_order(&mut buffer, &records).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Product,SKU,Category,Store,On Hand,Avg Daily Demand,Reorder Point,Safety Stock,\
             Suggested Order Qty,Unit Cost,Order Cost,Expiry Risk,Status,Compliance Flag,Supplier"
        );
        assert_eq!(
            lines.next().unwrap(),
            "Product MILK1,MILK1,Dairy,S1,10,23.33,165.4,48.8,160,0.85,136.00,\
             Expiry Sensitive,Critical,Standard,DairyCo"
        );
        assert!(lines.next().is_none());
    }

    #[rstest]
    #[case("Fresh Farms Ltd", "PO_Fresh_Farms_Ltd.csv")]
    #[case("Smith/Jones Ltd", "PO_Smith_Jones_Ltd.csv")]
    #[case("../etc", "PO____etc.csv")]
    #[case("Pharma-Dist_2", "PO_Pharma-Dist_2.csv")]
    fn test_supplier_file_name(#[case] supplier: &str, #[case] expected: &str) {
        assert_eq!(supplier_file_name(supplier), expected);
    }

    #[test]
    fn test_write_supplier_orders_with_slash_in_name() {
        let dir = std::env::temp_dir().join(format!("replenish-po-slash-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let mut result = PlanResult::empty();
        result.records = vec![
            record("MILK1", "Acme", 10),
            record("BREAD1", "Smith/Jones Ltd", 5),
        ];

        let written = write_supplier_orders(&result, &dir).unwrap();

        assert_eq!(
            written,
            vec![dir.join("PO_Acme.csv"), dir.join("PO_Smith_Jones_Ltd.csv")]
        );
        assert!(written.iter().all(|p| p.parent() == Some(dir.as_path())));

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_supplier_order_csvs() {
        let mut result = PlanResult::empty();
        result.records = vec![
            record("MILK1", "Dairy Co", 10),
            record("BREAD1", "Bakery Hub", 5),
            record("MILK2", "Dairy Co", 15),
        ];

        let files = supplier_order_csvs(&result).unwrap();

        assert_eq!(files.len(), 2);
        assert_eq!(files["PO_Dairy_Co.csv"].lines().count(), 3);
        assert_eq!(files["PO_Bakery_Hub.csv"].lines().count(), 2);
    }

    #[test]
    fn test_write_supplier_orders() {
        let dir = std::env::temp_dir().join(format!("replenish-po-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let mut result = PlanResult::empty();
        result.records = vec![record("AMOX500", "Pharma Dist", 5)];

        let written = write_supplier_orders(&result, &dir).unwrap();

        assert_eq!(written, vec![dir.join("PO_Pharma_Dist.csv")]);
        let content = std::fs::read_to_string(&written[0]).unwrap();
        assert!(content.contains("AMOX500"));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
