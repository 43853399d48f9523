//! 藥局領域政策

use chrono::NaiveDate;
use replenish_core::{CategoryPolicy, ComplianceFlag, Domain, ExpiryRisk, ProductInfo};
use rust_decimal::Decimal;

use crate::{category_in, DomainPolicy};

/// 管制藥品類別（服務水準 0.99、單次上限 50）
pub const CONTROLLED_CATEGORIES: &[&str] = &["Opioids", "Narcotics"];

/// 易過期類別（服務水準 0.98、MOQ 5）
pub const EXPIRY_SENSITIVE_CATEGORIES: &[&str] = &["Antibiotics", "Vaccines"];

/// 管制藥品單次最大訂購量
pub const CONTROLLED_MAX_ORDER_QTY: u64 = 50;

/// 到期日提醒天數
pub const EXPIRY_WARNING_DAYS: i64 = 30;

/// 藥局政策（缺貨容忍度較低）
#[derive(Debug, Clone, Copy, Default)]
pub struct PharmacyPolicy;

impl DomainPolicy for PharmacyPolicy {
    fn domain(&self) -> Domain {
        Domain::Pharmacy
    }

    fn policy_for(&self, _sku: &str, category: Option<&str>) -> CategoryPolicy {
        if category_in(category, CONTROLLED_CATEGORIES) {
            CategoryPolicy::new(Decimal::new(99, 2), 1).with_max_order_qty(CONTROLLED_MAX_ORDER_QTY)
        } else if category_in(category, EXPIRY_SENSITIVE_CATEGORIES) {
            CategoryPolicy::new(Decimal::new(98, 2), 5)
        } else {
            CategoryPolicy::new(Decimal::new(95, 2), 1)
        }
    }

    /// 再訂購點 × 1.2 以內即警告
    fn warning_multiplier(&self) -> Decimal {
        Decimal::new(12, 1)
    }

    fn expiry_risk(
        &self,
        category: Option<&str>,
        product: Option<&ProductInfo>,
        today: NaiveDate,
    ) -> ExpiryRisk {
        if let Some(expiry) = product.and_then(|p| p.expiry) {
            let days_left = (expiry - today).num_days();
            if days_left < EXPIRY_WARNING_DAYS {
                return ExpiryRisk::ExpiresIn(days_left);
            }
        }

        if category_in(category, EXPIRY_SENSITIVE_CATEGORIES) {
            ExpiryRisk::ExpirySensitive
        } else {
            ExpiryRisk::Ok
        }
    }

    fn compliance_flag(&self, category: Option<&str>) -> ComplianceFlag {
        if category_in(category, CONTROLLED_CATEGORIES) {
            ComplianceFlag::ControlledDrug
        } else {
            ComplianceFlag::Standard
        }
    }
}
