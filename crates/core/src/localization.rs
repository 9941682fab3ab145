//! Localization service.
//!
//! User-facing portal messages go through an injected [`Localizer`] keyed by
//! locale instead of a module-level lookup table, so deployments can serve
//! multiple locales and tests can substitute their own catalogs.

use std::collections::HashMap;
use std::sync::Arc;

/// Locale-keyed message lookup.
pub trait Localizer: Send + Sync {
    /// Resolve `key` for `locale`. Returns `None` when the key is unknown in
    /// both the requested and the fallback locale.
    fn text(&self, locale: &str, key: &str) -> Option<String>;

    /// Resolve `key`, falling back to the key itself so callers always have
    /// something to show.
    fn text_or_key(&self, locale: &str, key: &str) -> String {
        self.text(locale, key).unwrap_or_else(|| key.to_string())
    }
}

impl std::fmt::Debug for dyn Localizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("dyn Localizer")
    }
}

/// Fixed in-memory message catalog.
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    entries: HashMap<String, HashMap<String, String>>,
    fallback_locale: String,
}

impl StaticCatalog {
    pub fn new(fallback_locale: impl Into<String>) -> Self {
        Self {
            entries: HashMap::new(),
            fallback_locale: fallback_locale.into(),
        }
    }

    /// Add a locale with its key/message pairs.
    pub fn with_locale<K, V>(mut self, locale: impl Into<String>, pairs: Vec<(K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let map = self
            .entries
            .entry(locale.into())
            .or_default();
        for (key, value) in pairs {
            map.insert(key.into(), value.into());
        }
        self
    }

    /// The catalog used when none is configured: English fallback plus Uzbek.
    pub fn default_catalog() -> Self {
        Self::new("en")
            .with_locale(
                "en",
                vec![
                    ("registration.welcome", "Welcome aboard! Your partner account is ready."),
                    ("contact.received", "Thanks for reaching out. We will get back to you shortly."),
                    ("upgrade.submitted", "Your upgrade request has been submitted for review."),
                ],
            )
            .with_locale(
                "uz",
                vec![
                    ("registration.welcome", "Xush kelibsiz! Hamkor hisobingiz tayyor."),
                    ("contact.received", "Murojaatingiz uchun rahmat. Tez orada bog'lanamiz."),
                    ("upgrade.submitted", "Tarifni oshirish so'rovingiz ko'rib chiqishga yuborildi."),
                ],
            )
    }
}

impl Localizer for StaticCatalog {
    fn text(&self, locale: &str, key: &str) -> Option<String> {
        if let Some(found) = self.entries.get(locale).and_then(|m| m.get(key)) {
            return Some(found.clone());
        }
        self.entries
            .get(&self.fallback_locale)
            .and_then(|m| m.get(key))
            .cloned()
    }
}

/// Create the default localizer instance.
pub fn default_localizer() -> Arc<dyn Localizer> {
    Arc::new(StaticCatalog::default_catalog())
}

/// Pick the locale for a request: the first tag of an `Accept-Language`
/// header if present, otherwise the configured default.
pub fn resolve_locale(accept_language: Option<&str>, default_locale: &str) -> String {
    let Some(header) = accept_language else {
        return default_locale.to_string();
    };
    header
        .split(',')
        .next()
        .map(|tag| tag.split(';').next().unwrap_or(tag))
        .map(|tag| tag.trim().split('-').next().unwrap_or(tag).to_lowercase())
        .filter(|tag| !tag.is_empty())
        .unwrap_or_else(|| default_locale.to_string())
}
