//! Business profile lookup
//!
//! The renderer always gets a profile: when the provider has none,
//! [`BusinessProfile::fallback`] is used.

use std::path::{Path, PathBuf};

use tracing::{info, instrument, warn};

use crate::error::ReceiptError;
use crate::types::{BusinessProfile, SaleReceiptRequest};

/// Source of the business identity printed on receipts
pub trait BusinessProfileProvider {
    /// `Ok(None)` when nothing is configured
    fn business_profile(&self) -> Result<Option<BusinessProfile>, ReceiptError>;
}

/// Fixed profile, typically assembled by the caller from its own storage
#[derive(Debug, Clone, Default)]
pub struct StaticProfileProvider(pub Option<BusinessProfile>);

impl BusinessProfileProvider for StaticProfileProvider {
    fn business_profile(&self) -> Result<Option<BusinessProfile>, ReceiptError> {
        Ok(self.0.clone())
    }
}

/// Profile stored as a JSON file
#[derive(Debug, Clone)]
pub struct JsonProfileProvider {
    path: PathBuf,
}

impl JsonProfileProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl BusinessProfileProvider for JsonProfileProvider {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn business_profile(&self) -> Result<Option<BusinessProfile>, ReceiptError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(ReceiptError::Profile {
                    path: self.path.display().to_string(),
                    reason: e.to_string(),
                });
            }
        };

        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| ReceiptError::Profile {
                path: self.path.display().to_string(),
                reason: e.to_string(),
            })
    }
}

/// Profile from the provider, or the fallback when none is configured
pub fn resolve_profile(
    provider: &dyn BusinessProfileProvider,
) -> Result<BusinessProfile, ReceiptError> {
    match provider.business_profile()? {
        Some(profile) => Ok(profile),
        None => {
            info!("no business profile configured, using fallback");
            Ok(BusinessProfile::fallback())
        }
    }
}

/// Replace the profile stored with a sale by the configured one
///
/// When the provider has nothing, the stored profile is kept so a reprint
/// shows the header the sale was made under. Returns whether it was replaced.
pub fn apply_profile(
    provider: &dyn BusinessProfileProvider,
    request: &mut SaleReceiptRequest,
) -> Result<bool, ReceiptError> {
    match provider.business_profile()? {
        Some(profile) => {
            request.business = profile;
            Ok(true)
        }
        None => {
            warn!(folio = %request.folio, "configured business profile not found, keeping stored one");
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FALLBACK_BUSINESS_NAME, FALLBACK_FOOTER, SaleTotals};
    use rust_decimal::Decimal;

    fn stored_request() -> SaleReceiptRequest {
        SaleReceiptRequest {
            folio: "F0020".into(),
            customer_name: "Ana".into(),
            customer_reference: "A20".into(),
            line_items: vec![],
            totals: SaleTotals {
                subtotal: Decimal::ZERO,
                tax_amount: Decimal::ZERO,
                total: Decimal::ZERO,
            },
            payment_method_label: "Efectivo".into(),
            business: BusinessProfile {
                display_name: "PREESCOLAR".into(),
                ..BusinessProfile::fallback()
            },
            print_logo: false,
        }
    }

    #[test]
    fn test_apply_profile_missing_file_keeps_stored() {
        let dir = tempfile::tempdir().unwrap();
        let provider = JsonProfileProvider::new(dir.path().join("negocio.json"));
        let mut request = stored_request();

        assert!(!apply_profile(&provider, &mut request).unwrap());
        assert_eq!(request.business.display_name, "PREESCOLAR");
    }

    #[test]
    fn test_apply_profile_replaces_when_configured() {
        let profile = BusinessProfile {
            display_name: "PREESCOLAR LIBERTAD".into(),
            ..BusinessProfile::fallback()
        };
        let mut request = stored_request();

        assert!(apply_profile(&StaticProfileProvider(Some(profile.clone())), &mut request).unwrap());
        assert_eq!(request.business, profile);
    }

    #[test]
    fn test_static_provider_fallback() {
        let profile = resolve_profile(&StaticProfileProvider(None)).unwrap();
        assert_eq!(profile.display_name, FALLBACK_BUSINESS_NAME);
        assert_eq!(profile.footer_lines, vec![FALLBACK_FOOTER.to_string()]);
    }

    #[test]
    fn test_json_provider_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("negocio.json");
        std::fs::write(
            &path,
            r#"{"display_name": "PREESCOLAR", "legal_id": "LCR030414IB8", "footer_lines": ["Gracias"]}"#,
        )
        .unwrap();

        let profile = resolve_profile(&JsonProfileProvider::new(&path)).unwrap();
        assert_eq!(profile.display_name, "PREESCOLAR");
        assert_eq!(profile.legal_id.as_deref(), Some("LCR030414IB8"));
        assert_eq!(profile.phone, None);
    }

    #[test]
    fn test_json_provider_missing_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let provider = JsonProfileProvider::new(dir.path().join("none.json"));
        assert_eq!(provider.business_profile().unwrap(), None);
        assert_eq!(
            resolve_profile(&provider).unwrap(),
            BusinessProfile::fallback()
        );
    }

    #[test]
    fn test_json_provider_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("negocio.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = JsonProfileProvider::new(&path).business_profile().unwrap_err();
        assert!(matches!(err, ReceiptError::Profile { .. }));
    }
}
