//! # Replenish IO
//!
//! 銷售/庫存/商品 CSV 載入與採購單 CSV 匯出

pub mod export;
pub mod loader;

// Re-export 主要函數
pub use export::{
    supplier_file_name, supplier_order_csvs, write_purchase_order, write_supplier_orders,
    PurchaseOrderRow,
};
pub use loader::{
    load_products, load_products_file, load_sales, load_sales_file, load_stock, load_stock_file,
};

use replenish_core::ReplenishError;

pub(crate) fn csv_error(e: csv::Error) -> ReplenishError {
    ReplenishError::Csv(e.to_string())
}
