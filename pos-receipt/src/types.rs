//! Sale receipt data types
//!
//! A [`SaleReceiptRequest`] is built once per completed sale and never
//! mutated afterwards. It is serializable so a stored sale can be printed
//! again later.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Business name used when no profile is configured
pub const FALLBACK_BUSINESS_NAME: &str = "NEGOCIO";

/// Footer used when no profile is configured
pub const FALLBACK_FOOTER: &str = "¡Gracias por su compra!";

/// One printed line of the sale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub description: String,
    pub quantity: i64,
    pub unit_price: Decimal,
}

impl LineItem {
    pub fn new(description: impl Into<String>, quantity: i64, unit_price: Decimal) -> Self {
        Self {
            description: description.into(),
            quantity,
            unit_price,
        }
    }

    /// quantity × unit price; tax is only applied in the totals block
    pub fn line_total(&self) -> Decimal {
        Decimal::from(self.quantity) * self.unit_price
    }
}

/// Totals computed by the caller
///
/// Rendered as given. `total == subtotal + tax_amount` is expected but
/// not checked.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SaleTotals {
    pub subtotal: Decimal,
    pub tax_amount: Decimal,
    pub total: Decimal,
}

/// Business identity printed in the receipt header and footer
///
/// Optional fields are skipped when absent or blank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessProfile {
    pub display_name: String,
    /// School registration key (CCT), printed under the name
    #[serde(default)]
    pub registration_key: Option<String>,
    #[serde(default)]
    pub legal_id: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    /// Slogan printed under the header
    #[serde(default)]
    pub tagline: Option<String>,
    #[serde(default)]
    pub footer_lines: Vec<String>,
}

impl BusinessProfile {
    /// Profile used when the provider has nothing configured
    pub fn fallback() -> Self {
        Self {
            display_name: FALLBACK_BUSINESS_NAME.to_string(),
            registration_key: None,
            legal_id: None,
            address: None,
            phone: None,
            tagline: None,
            footer_lines: vec![FALLBACK_FOOTER.to_string()],
        }
    }
}

impl Default for BusinessProfile {
    fn default() -> Self {
        Self::fallback()
    }
}

/// Everything needed to print one sale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleReceiptRequest {
    pub folio: String,
    pub customer_name: String,
    pub customer_reference: String,
    pub line_items: Vec<LineItem>,
    pub totals: SaleTotals,
    pub payment_method_label: String,
    #[serde(default)]
    pub business: BusinessProfile,
    #[serde(default)]
    pub print_logo: bool,
}

/// Returns the trimmed value when it has visible content
pub(crate) fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_line_total() {
        let item = LineItem::new("Inscripción", 2, dec("500.00"));
        assert_eq!(item.line_total(), dec("1000.00"));
    }

    #[test]
    fn test_negative_quantity_is_not_rejected() {
        let item = LineItem::new("Devolución", -1, dec("80"));
        assert_eq!(item.line_total(), dec("-80"));
    }

    #[test]
    fn test_request_from_json_uses_fallback_profile() {
        let json = r#"{
            "folio": "F0007",
            "customer_name": "Ana López",
            "customer_reference": "A001",
            "line_items": [{"description": "Colegiatura", "quantity": 1, "unit_price": 1200.0}],
            "totals": {"subtotal": 1200.0, "tax_amount": 192.0, "total": 1392.0},
            "payment_method_label": "Efectivo"
        }"#;
        let request: SaleReceiptRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.business, BusinessProfile::fallback());
        assert!(!request.print_logo);
        assert_eq!(request.totals.total, dec("1392"));
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(&Some("  Tel ".into())), Some("Tel"));
        assert_eq!(non_blank(&Some("   ".into())), None);
        assert_eq!(non_blank(&None), None);
    }
}
