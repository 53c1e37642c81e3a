//! Internationalization (i18n) for the bilingual landing page.
//!
//! # Architecture
//!
//! - `registry`: the supported languages (Spanish canonical, English)
//! - `language`: validated `Language` value
//! - `catalog`: immutable key → string tables with the Spanish fallback
//! - `preference`: persisted language selection
//! - `resolver`: the active-language owner views read from
//! - `validator`: catalog coverage checks
//! - `metrics`: lookup hit/fallback/miss counters
//!
//! # Example
//!
//! ```
//! use postales_del_vinedo::i18n::{LanguageResolver, MemoryPreferenceStore, NoDocument};
//!
//! let mut resolver = LanguageResolver::initialize(
//!     Box::new(MemoryPreferenceStore::new()),
//!     Box::new(NoDocument),
//! );
//! assert_eq!(resolver.translate("nav.cta"), "Reservá tu lote");
//!
//! resolver.toggle();
//! assert_eq!(resolver.translate("nav.cta"), "Reserve your lot");
//! ```

mod catalog;
mod language;
mod metrics;
mod preference;
mod registry;
mod resolver;
mod validator;

pub use catalog::{Catalog, Lookup, ENGLISH_STRINGS, SPANISH_STRINGS};
pub use language::Language;
pub use metrics::{MetricsReport, TranslationMetrics};
pub use preference::{
    FilePreferenceStore, MemoryPreferenceStore, PreferenceStore, UnavailablePreferenceStore,
    LANGUAGE_KEY,
};
pub use registry::{LanguageConfig, LanguageRegistry};
pub use resolver::{DocumentLanguage, LanguageResolver, NoDocument};
pub use validator::{CatalogValidator, ValidationReport};
