//! # Title Lookup
//!
//! Route metadata carries translation keys, not display text. A
//! [`TitleResolver`] turns those keys into titles for the navigation
//! listing.

use std::collections::HashMap;

/// Resolves a translation key to display text.
pub trait TitleResolver: Send + Sync {
    fn resolve(&self, key: &str) -> Option<String>;

    /// Resolve `key`, falling back to the key itself.
    fn resolve_or_key(&self, key: &str) -> String {
        self.resolve(key).unwrap_or_else(|| key.to_string())
    }
}

/// In-memory message catalog.
#[derive(Debug, Clone, Default)]
pub struct MessageCatalog {
    messages: HashMap<String, String>,
}

impl MessageCatalog {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Built-in English page titles for the entity screens.
    pub fn english() -> Self {
        Self::empty()
            .with_message("bankAdviceApp.agency.home.title", "Agencies")
            .with_message("bankAdviceApp.enterprise.home.title", "Enterprises")
            .with_message("bankAdviceApp.advisor.home.title", "Advisors")
            .with_message("bankAdviceApp.manager.home.title", "Managers")
            .with_message("bankAdviceApp.appointment.home.title", "Appointments")
    }

    pub fn with_message(mut self, key: impl Into<String>, text: impl Into<String>) -> Self {
        self.messages.insert(key.into(), text.into());
        self
    }
}

impl TitleResolver for MessageCatalog {
    fn resolve(&self, key: &str) -> Option<String> {
        self.messages.get(key).cloned()
    }
}
