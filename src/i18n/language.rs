//! Language type: validated language representation.

use crate::error::LanguageError;
use crate::i18n::{LanguageConfig, LanguageRegistry};
use serde::{Serialize, Serializer};

/// A validated language.
///
/// Only codes present in the registry can be turned into a
/// `Language`, so every value is safe to look up in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Language {
    /// ISO 639-1 language code (e.g., "es", "en")
    code: &'static str,
}

impl Language {
    pub const SPANISH: Language = Language { code: "es" };
    pub const ENGLISH: Language = Language { code: "en" };

    /// Create a Language from a language code string.
    ///
    /// # Example
    /// ```
    /// use postales_del_vinedo::i18n::Language;
    ///
    /// let english = Language::from_code("en").unwrap();
    /// assert_eq!(english, Language::ENGLISH);
    /// assert!(Language::from_code("fr").is_err());
    /// ```
    pub fn from_code(code: &str) -> Result<Language, LanguageError> {
        LanguageRegistry::get()
            .get_by_code(code)
            .map(|config| Language { code: config.code })
            .ok_or_else(|| LanguageError::Unknown(code.to_string()))
    }

    /// The language the copy is written in (Spanish).
    pub fn canonical() -> Language {
        let config = LanguageRegistry::get().canonical();
        Language { code: config.code }
    }

    /// The other language of the toggle: es ↔ en.
    pub fn toggled(self) -> Language {
        if self == Language::SPANISH {
            Language::ENGLISH
        } else {
            Language::SPANISH
        }
    }

    pub fn code(&self) -> &'static str {
        self.code
    }

    /// # Panics
    /// Panics if the language code is not found in the registry. This cannot
    /// happen for values built through `from_code` or the constants.
    pub fn config(&self) -> &'static LanguageConfig {
        LanguageRegistry::get()
            .get_by_code(self.code)
            .expect("Language code should always be valid")
    }

    pub fn name(&self) -> &'static str {
        self.config().name
    }

    pub fn native_name(&self) -> &'static str {
        self.config().native_name
    }

    pub fn is_canonical(&self) -> bool {
        self.code == LanguageRegistry::get().canonical().code
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::canonical()
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code)
    }
}

impl Serialize for Language {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.code)
    }
}
