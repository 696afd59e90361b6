//! Brands and their localized compliance notices

use serde::{Deserialize, Serialize};

use core_kernel::BrandId;
use crate::error::ClaimError;

/// A notice text for one language
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedNotification {
    /// Language code, e.g. "fr" or "de-CH"
    pub language: String,
    pub content: String,
}

/// A product brand eligible for claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brand {
    pub id: BrandId,
    /// Display name, also the value stored on claims
    pub name: String,
    /// Notice shown when no localized variant matches
    pub default_notification: Option<String>,
    notifications: Vec<LocalizedNotification>,
}

impl Brand {
    /// Creates a brand without any notices
    pub fn new(id: BrandId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            default_notification: None,
            notifications: Vec::new(),
        }
    }

    /// Sets the default notice
    pub fn with_default_notification(mut self, text: impl Into<String>) -> Self {
        self.default_notification = Some(text.into());
        self
    }

    /// Adds a localized notice
    ///
    /// # Errors
    ///
    /// Returns `DuplicateNotification` if the brand already has a notice for
    /// the language. Language codes compare case-insensitively.
    pub fn add_notification(
        &mut self,
        language: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<(), ClaimError> {
        let language = language.into();
        if self.notification_for(&language).is_some() {
            return Err(ClaimError::DuplicateNotification {
                brand: self.name.clone(),
                language,
            });
        }
        self.notifications.push(LocalizedNotification {
            language,
            content: content.into(),
        });
        Ok(())
    }

    /// Localized notices owned by this brand
    pub fn notifications(&self) -> &[LocalizedNotification] {
        &self.notifications
    }

    /// Returns the notice for exactly this language, without fallback
    pub fn notification_for(&self, language: &str) -> Option<&LocalizedNotification> {
        self.notifications
            .iter()
            .find(|n| n.language.eq_ignore_ascii_case(language))
    }
}

/// A brand with its notice resolved for one request language
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrandNotice {
    pub id: BrandId,
    pub name: String,
    pub notification: String,
}

/// Picks the notice a customer sees for a brand
pub struct LocalizedNotificationResolver;

impl LocalizedNotificationResolver {
    /// Returns the brand's notice for `language`, falling back to the brand
    /// default, and to an empty string when the brand has no default.
    pub fn resolve<'a>(brand: &'a Brand, language: &str) -> &'a str {
        brand
            .notification_for(language)
            .map(|n| n.content.as_str())
            .or(brand.default_notification.as_deref())
            .unwrap_or("")
    }

    /// Resolves every brand for the same language
    pub fn resolve_all(brands: &[Brand], language: &str) -> Vec<BrandNotice> {
        brands
            .iter()
            .map(|brand| BrandNotice {
                id: brand.id,
                name: brand.name.clone(),
                notification: Self::resolve(brand, language).to_string(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn acme() -> Brand {
        let mut brand = Brand::new(BrandId::new(), "Acme")
            .with_default_notification("Keep your receipt.");
        brand.add_notification("fr", "Conservez votre ticket.").unwrap();
        brand.add_notification("de", "Bewahren Sie den Beleg auf.").unwrap();
        brand
    }

    #[test]
    fn test_resolves_matching_language() {
        let brand = acme();
        assert_eq!(
            LocalizedNotificationResolver::resolve(&brand, "fr"),
            "Conservez votre ticket."
        );
    }

    #[test]
    fn test_unknown_language_falls_back_to_default() {
        let brand = acme();
        assert_eq!(LocalizedNotificationResolver::resolve(&brand, "xx"), "Keep your receipt.");
    }

    #[test]
    fn test_missing_default_is_empty() {
        let brand = Brand::new(BrandId::new(), "Plain");
        assert_eq!(LocalizedNotificationResolver::resolve(&brand, "en"), "");
    }

    #[test]
    fn test_language_match_ignores_case() {
        let brand = acme();
        assert_eq!(
            LocalizedNotificationResolver::resolve(&brand, "DE"),
            "Bewahren Sie den Beleg auf."
        );
    }

    #[test]
    fn test_duplicate_language_is_rejected() {
        let mut brand = acme();
        let err = brand.add_notification("FR", "Autre").unwrap_err();
        assert!(matches!(err, ClaimError::DuplicateNotification { .. }));
        assert_eq!(brand.notifications().len(), 2);
    }

    #[test]
    fn test_resolve_all_keeps_brand_order() {
        let other = Brand::new(BrandId::new(), "Zenith").with_default_notification("None");
        let notices = LocalizedNotificationResolver::resolve_all(&[acme(), other], "fr");
        let names: Vec<_> = notices.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["Acme", "Zenith"]);
        assert_eq!(notices[1].notification, "None");
    }
}
