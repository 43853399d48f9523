//! CSV 載入
//!
//! 必要欄位：
//! - sales: date, sku, store_id, qty_sold（可選 category）
//! - stock: sku, store_id, on_hand
//! - products: sku, name（可選 category, supplier, unit_cost, expiry）

use std::io::Read;
use std::path::Path;

use chrono::NaiveDate;
use replenish_core::{ProductInfo, ReplenishError, SalesRecord, StockRecord};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::csv_error;

const SALES_COLUMNS: &[&str] = &["date", "sku", "store_id", "qty_sold"];
const STOCK_COLUMNS: &[&str] = &["sku", "store_id", "on_hand"];
const PRODUCT_COLUMNS: &[&str] = &["sku", "name"];

/// 支援的日期格式
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y"];

#[derive(Debug, Deserialize)]
struct SalesRow {
    date: String,
    sku: String,
    store_id: String,
    qty_sold: Decimal,
    #[serde(default)]
    category: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StockRow {
    sku: String,
    store_id: String,
    on_hand: Decimal,
}

#[derive(Debug, Deserialize)]
struct ProductRow {
    sku: String,
    name: String,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    supplier: Option<String>,
    #[serde(default)]
    unit_cost: Option<Decimal>,
    #[serde(default)]
    expiry: Option<String>,
}

/// 載入銷售紀錄（無法解析日期的列會被略過）
pub fn load_sales<R: Read>(reader: R) -> replenish_core::Result<Vec<SalesRecord>> {
    let rows: Vec<SalesRow> = read_rows(reader, SALES_COLUMNS, "sales")?;

    let mut records = Vec::with_capacity(rows.len());
    let mut skipped = 0usize;
    for row in rows {
        let Some(date) = parse_date(&row.date) else {
            skipped += 1;
            continue;
        };

        let mut record = SalesRecord::new(date, row.sku, row.store_id, row.qty_sold);
        record.category = non_empty(row.category);
        records.push(record);
    }

    if skipped > 0 {
        tracing::warn!("略過 {} 筆日期無法解析的銷售紀錄", skipped);
    }
    tracing::debug!("載入銷售紀錄 {} 筆", records.len());
    Ok(records)
}

/// 載入庫存紀錄
pub fn load_stock<R: Read>(reader: R) -> replenish_core::Result<Vec<StockRecord>> {
    let rows: Vec<StockRow> = read_rows(reader, STOCK_COLUMNS, "stock")?;
    Ok(rows
        .into_iter()
        .map(|row| StockRecord::new(row.sku, row.store_id, row.on_hand))
        .collect())
}

/// 載入商品主檔（缺漏欄位以預設值補上）
pub fn load_products<R: Read>(reader: R) -> replenish_core::Result<Vec<ProductInfo>> {
    let rows: Vec<ProductRow> = read_rows(reader, PRODUCT_COLUMNS, "products")?;

    Ok(rows
        .into_iter()
        .map(|row| {
            let mut product = ProductInfo::new(
                row.sku,
                row.name,
                non_empty(row.category).unwrap_or_default(),
            );
            if let Some(supplier) = non_empty(row.supplier) {
                product = product.with_supplier(supplier);
            }
            if let Some(cost) = row.unit_cost {
                product = product.with_unit_cost(cost);
            }
            if let Some(expiry) = row.expiry.as_deref().and_then(parse_date) {
                product = product.with_expiry(expiry);
            }
            product
        })
        .collect())
}

/// 從檔案載入銷售紀錄
pub fn load_sales_file<P: AsRef<Path>>(path: P) -> replenish_core::Result<Vec<SalesRecord>> {
    load_sales(open(path.as_ref())?)
}

/// 從檔案載入庫存紀錄
pub fn load_stock_file<P: AsRef<Path>>(path: P) -> replenish_core::Result<Vec<StockRecord>> {
    load_stock(open(path.as_ref())?)
}

/// 從檔案載入商品主檔
pub fn load_products_file<P: AsRef<Path>>(path: P) -> replenish_core::Result<Vec<ProductInfo>> {
    load_products(open(path.as_ref())?)
}

fn open(path: &Path) -> replenish_core::Result<std::fs::File> {
    std::fs::File::open(path)
        .map_err(|e| ReplenishError::Io(format!("無法開啟 '{}': {}", path.display(), e)))
}

/// 檢查必要欄位後逐列反序列化
fn read_rows<R: Read, T: DeserializeOwned>(
    reader: R,
    required: &[&str],
    source: &str,
) -> replenish_core::Result<Vec<T>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers().map_err(csv_error)?.clone();
    let missing: Vec<&str> = required
        .iter()
        .copied()
        .filter(|col| !headers.iter().any(|h| h == *col))
        .collect();
    if !missing.is_empty() {
        return Err(ReplenishError::ContractViolation(format!(
            "{} 缺少必要欄位: {}",
            source,
            missing.join(", ")
        )));
    }

    let mut rows = Vec::new();
    for (line_num, result) in csv_reader.deserialize().enumerate() {
        let row: T = result.map_err(|e| {
            ReplenishError::ContractViolation(format!(
                "{} 第 {} 行解析錯誤: {}",
                source,
                line_num + 2,
                e
            ))
        })?;
        rows.push(row);
    }
    Ok(rows)
}

/// 解析日期（可帶時間部分）
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let date_part = raw.trim().split(['T', ' ']).next()?;
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(date_part, fmt).ok())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
