//! Supported languages.
//!
//! The page ships in Spanish first and English is the only alternative, so
//! the registry is a fixed table. Spanish is the canonical language: the copy
//! is written in it and lookups fall back to it.

/// One language the page can be shown in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LanguageConfig {
    /// ISO 639-1 code, also the value persisted under `pdv-lang`
    pub code: &'static str,

    /// English name (e.g., "Spanish")
    pub name: &'static str,

    /// Name in the language itself (e.g., "Español")
    pub native_name: &'static str,
}

const SPANISH: LanguageConfig = LanguageConfig {
    code: "es",
    name: "Spanish",
    native_name: "Español",
};

const ENGLISH: LanguageConfig = LanguageConfig {
    code: "en",
    name: "English",
    native_name: "English",
};

pub struct LanguageRegistry {
    canonical: &'static LanguageConfig,
    languages: &'static [LanguageConfig],
}

static REGISTRY: LanguageRegistry = LanguageRegistry {
    canonical: &SPANISH,
    languages: &[SPANISH, ENGLISH],
};

impl LanguageRegistry {
    pub fn get() -> &'static LanguageRegistry {
        &REGISTRY
    }

    /// Exact, case-sensitive match on the code.
    pub fn get_by_code(&self, code: &str) -> Option<&'static LanguageConfig> {
        self.languages.iter().find(|lang| lang.code == code)
    }

    /// Every language in toggle order, canonical first.
    pub fn languages(&self) -> &'static [LanguageConfig] {
        self.languages
    }

    pub fn canonical(&self) -> &'static LanguageConfig {
        self.canonical
    }
}
