//! Catalog coverage validation.
//!
//! Checks that the English table is a faithful companion of the Spanish
//! source: placeholders preserved, no blank entries, no orphan keys. Keys
//! that English leaves out are only warnings, since they resolve through the
//! Spanish fallback.

use crate::i18n::{Catalog, Language};
use regex::Regex;
use std::collections::BTreeSet;
use std::sync::OnceLock;

/// Validation report containing errors and warnings about a catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    /// Problems that show up on the page as broken copy
    pub errors: Vec<String>,

    /// Gaps covered by the fallback chain
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn is_clean(&self) -> bool {
        !self.has_errors() && !self.has_warnings()
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Validator for catalog coverage.
pub struct CatalogValidator;

static PLACEHOLDER_REGEX: OnceLock<Regex> = OnceLock::new();

impl CatalogValidator {
    /// Compare `target` against the source language of `catalog`.
    pub fn validate(catalog: &Catalog, target: Language) -> ValidationReport {
        let mut report = ValidationReport::new();
        let source = Language::canonical();

        for lang in [source, target] {
            for (key, value) in catalog.entries(lang) {
                if value.trim().is_empty() {
                    report
                        .errors
                        .push(format!("Blank value for '{}' in {}", key, lang));
                }
            }
        }

        let source_keys: BTreeSet<_> = catalog.keys(source).into_iter().collect();
        let target_keys: BTreeSet<_> = catalog.keys(target).into_iter().collect();

        for key in source_keys.difference(&target_keys) {
            report.warnings.push(format!(
                "'{}' has no {} translation, falls back to {}",
                key, target, source
            ));
        }

        for key in target_keys.difference(&source_keys) {
            report
                .warnings
                .push(format!("'{}' exists only in {}", key, target));
        }

        for key in source_keys.intersection(&target_keys) {
            let (Some(original), Some(translated)) =
                (catalog.get(source, key), catalog.get(target, key))
            else {
                continue;
            };
            let expected = Self::extract_placeholders(original);
            let actual = Self::extract_placeholders(translated);
            if expected != actual {
                report.errors.push(format!(
                    "Placeholder mismatch for '{}': {} has {:?}, {} has {:?}",
                    key, source, expected, target, actual
                ));
            }
        }

        report
    }

    /// Extract `{name}` placeholders, sorted and deduplicated.
    fn extract_placeholders(text: &str) -> BTreeSet<String> {
        let regex = PLACEHOLDER_REGEX.get_or_init(|| Regex::new(r"\{([a-z_]+)\}").unwrap());

        regex
            .captures_iter(text)
            .filter_map(|cap| cap.get(1).map(|m| m.as_str().to_string()))
            .collect()
    }
}
