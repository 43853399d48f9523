//! 超市領域政策

use chrono::NaiveDate;
use replenish_core::{CategoryPolicy, Domain, ExpiryRisk, ProductInfo};
use rust_decimal::Decimal;

use crate::{category_in, DomainPolicy};

/// 生鮮類別（較高服務水準、MOQ 5）
pub const PERISHABLE_CATEGORIES: &[&str] = &["Dairy", "Bakery", "Produce"];

/// 超市政策
#[derive(Debug, Clone, Copy, Default)]
pub struct SupermarketPolicy;

impl DomainPolicy for SupermarketPolicy {
    fn domain(&self) -> Domain {
        Domain::Supermarket
    }

    fn policy_for(&self, _sku: &str, category: Option<&str>) -> CategoryPolicy {
        if category_in(category, PERISHABLE_CATEGORIES) {
            CategoryPolicy::new(Decimal::new(97, 2), 5)
        } else {
            CategoryPolicy::new(Decimal::new(90, 2), 1)
        }
    }

    fn expiry_risk(
        &self,
        category: Option<&str>,
        _product: Option<&ProductInfo>,
        _today: NaiveDate,
    ) -> ExpiryRisk {
        if category_in(category, PERISHABLE_CATEGORIES) {
            ExpiryRisk::ExpirySensitive
        } else {
            ExpiryRisk::Ok
        }
    }
}
