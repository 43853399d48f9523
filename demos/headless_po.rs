//! 無介面採購單示例
//!
//! 用法：
//!   cargo run --example headless_po -- [supermarket|pharmacy] [輸出檔案]
//!
//! 日誌層級由 RUST_LOG 控制（預設 info）

use std::fs::File;
use std::io;

use chrono::{Duration, NaiveDate};
use replenish::prelude::*;
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

const PRODUCTS_CSV: &str = "\
sku,name,category,supplier,unit_cost,expiry
MILK1,Fresh Milk 1L,Dairy,Dairy Co,0.85,
BREAD1,White Bread,Bakery,Bakery Hub,0.60,
RICE5,Rice 5kg,Grocery,Grain Traders,4.20,
AMOX500,Amoxicillin 500mg,Antibiotics,Pharma Dist,2.10,2025-02-10
MORPH10,Morphine 10mg,Opioids,Controlled Supply,5.75,
PARA500,Paracetamol 500mg,Analgesics,Pharma Dist,0.35,
";

const STOCK_CSV: &str = "\
sku,store_id,on_hand
MILK1,S1,40
BREAD1,S1,120
RICE5,S1,300
AMOX500,S1,15
MORPH10,S1,0
PARA500,S1,500
";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let domain: Domain = args.next().as_deref().unwrap_or("supermarket").parse()?;
    let output = args.next();

    let as_of = NaiveDate::from_ymd_opt(2025, 1, 31).expect("有效日期");
    let sales = sample_sales(as_of);
    let stock = replenish::io::load_stock(STOCK_CSV.as_bytes())?;
    let products = replenish::io::load_products(PRODUCTS_CSV.as_bytes())?;

    let config = PlanningConfig::new(domain)
        .with_forecast_model(ForecastModel::Seasonal)
        .with_horizon(14)
        .with_lead_time(5)
        .with_as_of(as_of);

    let planner = ReplenishmentPlanner::from_config(config)?;
    let result = planner.plan(&sales, &stock, &products)?;

    let summary = result.summary();
    eprintln!(
        "{} 個 SKU：嚴重 {}，警告 {}，安全 {}，訂購總額 {}",
        summary.total_skus,
        summary.critical,
        summary.warning,
        summary.safe,
        summary.total_order_cost
    );
    for warning in &result.warnings {
        eprintln!("  [{:?}] {}: {}", warning.severity, warning.sku, warning.message);
    }

    match output {
        Some(path) => {
            replenish::io::write_purchase_order(File::create(&path)?, &result.records)?;
            eprintln!("採購單已寫入 {}", path);
        }
        None => replenish::io::write_purchase_order(io::stdout(), &result.records)?,
    }

    Ok(())
}

/// 產生 31 天帶週期的銷售紀錄
fn sample_sales(as_of: NaiveDate) -> Vec<SalesRecord> {
    let profiles: [(&str, i64); 6] = [
        ("MILK1", 20),
        ("BREAD1", 12),
        ("RICE5", 3),
        ("AMOX500", 6),
        ("MORPH10", 2),
        ("PARA500", 9),
    ];

    let mut sales = Vec::new();
    for offset in 0..31 {
        let date = as_of - Duration::days(30 - offset);
        let weekend_boost = if offset % 7 >= 5 { 2 } else { 0 };
        for (sku, base) in profiles {
            let qty = base + weekend_boost + (offset % 3);
            sales.push(SalesRecord::new(
                date,
                sku.to_string(),
                "S1".to_string(),
                Decimal::from(qty),
            ));
        }
    }
    sales
}
