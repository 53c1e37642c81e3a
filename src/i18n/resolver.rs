//! Language resolver: owner of the active language.
//!
//! One resolver exists per page. Views read strings through `translate` and
//! register with `subscribe` to re-render when the visitor flips the toggle.
//! The selection is restored from, and written back to, a `PreferenceStore`;
//! when that storage fails the resolver keeps working from memory.

use crate::i18n::preference::{PreferenceStore, LANGUAGE_KEY};
use crate::i18n::{Catalog, Language};
use crate::notify::{Notifier, Subscription};
use tracing::{debug, info, warn};

/// Receiver of the document-level `lang` attribute.
pub trait DocumentLanguage {
    fn set_lang(&self, lang: Language);
}

impl<F> DocumentLanguage for F
where
    F: Fn(Language),
{
    fn set_lang(&self, lang: Language) {
        self(lang)
    }
}

/// A host without a document (tests, the preview binary).
#[derive(Debug, Default, Clone, Copy)]
pub struct NoDocument;

impl DocumentLanguage for NoDocument {
    fn set_lang(&self, _lang: Language) {}
}

pub struct LanguageResolver {
    active: Language,
    catalog: &'static Catalog,
    store: Box<dyn PreferenceStore>,
    document: Box<dyn DocumentLanguage>,
    persistent: bool,
    changes: Notifier<Language>,
}

impl LanguageResolver {
    /// Restore the saved language, or start in Spanish.
    ///
    /// Only reads storage; nothing is written until the language changes.
    pub fn initialize(
        store: Box<dyn PreferenceStore>,
        document: Box<dyn DocumentLanguage>,
    ) -> Self {
        let (active, persistent) = match store.load(LANGUAGE_KEY) {
            Ok(Some(code)) => match Language::from_code(&code) {
                Ok(lang) => (lang, true),
                Err(e) => {
                    debug!("Ignoring stored language: {}", e);
                    (Language::default(), true)
                }
            },
            Ok(None) => (Language::default(), true),
            Err(e) => {
                warn!("Language preference unavailable, using memory only: {}", e);
                (Language::default(), false)
            }
        };

        info!("Language resolver starting in {}", active);

        Self {
            active,
            catalog: Catalog::global(),
            store,
            document,
            persistent,
            changes: Notifier::new(),
        }
    }

    /// Swap the catalog (the landing copy is used by default).
    pub fn with_catalog(mut self, catalog: &'static Catalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn language(&self) -> Language {
        self.active
    }

    /// False once storage has failed; the selection then lives for the
    /// session only.
    pub fn is_persistent(&self) -> bool {
        self.persistent
    }

    /// Flip es ↔ en, persist it, and notify subscribers.
    pub fn toggle(&mut self) -> Language {
        self.set_language(self.active.toggled());
        self.active
    }

    /// Switch to `lang`. Selecting the current language does nothing.
    pub fn set_language(&mut self, lang: Language) {
        if lang == self.active {
            return;
        }

        self.active = lang;
        self.persist();
        self.document.set_lang(lang);
        info!("Language switched to {}", lang);
        self.changes.notify(&lang);
    }

    /// Active language, then Spanish, then the key itself.
    pub fn translate<'a>(&self, key: &'a str) -> &'a str {
        self.catalog.translate(self.active, key)
    }

    /// Accessible label for the toggle button, naming the target language.
    pub fn toggle_label(&self) -> &'static str {
        self.translate("lang.toggle_label")
    }

    /// Called with the new language after every change.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: FnMut(&Language) + 'static,
    {
        self.changes.subscribe(listener)
    }

    fn persist(&mut self) {
        if !self.persistent {
            return;
        }
        if let Err(e) = self.store.save(LANGUAGE_KEY, self.active.code()) {
            warn!("Could not save language preference, keeping it in memory: {}", e);
            self.persistent = false;
        }
    }
}

impl std::fmt::Debug for LanguageResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LanguageResolver")
            .field("active", &self.active)
            .field("persistent", &self.persistent)
            .field("subscribers", &self.changes.listener_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PreferenceError;
    use crate::i18n::preference::{
        FilePreferenceStore, MemoryPreferenceStore, UnavailablePreferenceStore,
    };
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use tempfile::TempDir;

    /// Store that remembers writes in a shared log the test can inspect.
    #[derive(Clone, Default)]
    struct RecordingStore {
        initial: Option<String>,
        writes: Rc<RefCell<Vec<String>>>,
    }

    impl PreferenceStore for RecordingStore {
        fn load(&self, _key: &str) -> Result<Option<String>, PreferenceError> {
            Ok(self.initial.clone())
        }

        fn save(&self, _key: &str, value: &str) -> Result<(), PreferenceError> {
            self.writes.borrow_mut().push(value.to_string());
            Ok(())
        }
    }

    /// Reads fine, fails every write.
    struct ReadOnlyStore;

    impl PreferenceStore for ReadOnlyStore {
        fn load(&self, _key: &str) -> Result<Option<String>, PreferenceError> {
            Ok(Some("en".to_string()))
        }

        fn save(&self, _key: &str, _value: &str) -> Result<(), PreferenceError> {
            Err(PreferenceError::Io(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "quota exceeded",
            )))
        }
    }

    fn resolver_with(store: impl PreferenceStore + 'static) -> LanguageResolver {
        LanguageResolver::initialize(Box::new(store), Box::new(NoDocument))
    }

    // ==================== Initialize Tests ====================

    #[test]
    fn test_initialize_defaults_to_spanish() {
        let resolver = resolver_with(MemoryPreferenceStore::new());
        assert_eq!(resolver.language(), Language::SPANISH);
        assert!(resolver.is_persistent());
    }

    #[test]
    fn test_initialize_restores_saved_language() {
        let resolver = resolver_with(MemoryPreferenceStore::with_value(LANGUAGE_KEY, "en"));
        assert_eq!(resolver.language(), Language::ENGLISH);
    }

    #[test]
    fn test_initialize_ignores_unknown_code() {
        let resolver = resolver_with(MemoryPreferenceStore::with_value(LANGUAGE_KEY, "fr"));
        assert_eq!(resolver.language(), Language::SPANISH);
    }

    #[test]
    fn test_initialize_does_not_write() {
        let store = RecordingStore {
            initial: Some("en".to_string()),
            ..Default::default()
        };
        let writes = Rc::clone(&store.writes);
        let _resolver = resolver_with(store);
        assert!(writes.borrow().is_empty());
    }

    #[test]
    fn test_initialize_with_unavailable_storage() {
        let resolver = resolver_with(UnavailablePreferenceStore);
        assert_eq!(resolver.language(), Language::SPANISH);
        assert!(!resolver.is_persistent());
    }

    // ==================== Toggle Tests ====================

    #[test]
    fn test_toggle_twice_returns_to_start() {
        for start in ["es", "en"] {
            let mut resolver =
                resolver_with(MemoryPreferenceStore::with_value(LANGUAGE_KEY, start));
            let initial = resolver.language();
            resolver.toggle();
            assert_ne!(resolver.language(), initial);
            resolver.toggle();
            assert_eq!(resolver.language(), initial);
        }
    }

    #[test]
    fn test_toggle_persists_every_change() {
        let store = RecordingStore::default();
        let writes = Rc::clone(&store.writes);
        let mut resolver = resolver_with(store);

        resolver.toggle();
        resolver.toggle();

        assert_eq!(*writes.borrow(), vec!["en".to_string(), "es".to_string()]);
    }

    #[test]
    fn test_toggle_updates_document_lang() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let mut resolver = LanguageResolver::initialize(
            Box::new(MemoryPreferenceStore::new()),
            Box::new(move |lang: Language| sink.borrow_mut().push(lang.code())),
        );

        resolver.toggle();

        assert_eq!(*seen.borrow(), vec!["en"]);
    }

    #[test]
    fn test_toggle_survives_write_failure() {
        let mut resolver = resolver_with(ReadOnlyStore);
        assert_eq!(resolver.language(), Language::ENGLISH);

        assert_eq!(resolver.toggle(), Language::SPANISH);
        assert!(!resolver.is_persistent());
        assert_eq!(resolver.toggle(), Language::ENGLISH);
    }

    #[test]
    fn test_toggle_persists_to_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.json");

        let mut resolver = resolver_with(FilePreferenceStore::new(&path));
        resolver.toggle();
        drop(resolver);

        let restored = resolver_with(FilePreferenceStore::new(&path));
        assert_eq!(restored.language(), Language::ENGLISH);
    }

    #[test]
    fn test_set_same_language_is_noop() {
        let store = RecordingStore::default();
        let writes = Rc::clone(&store.writes);
        let mut resolver = resolver_with(store);

        resolver.set_language(Language::SPANISH);
        assert!(writes.borrow().is_empty());
    }

    // ==================== Subscription Tests ====================

    #[test]
    fn test_subscribers_see_each_change() {
        let mut resolver = resolver_with(MemoryPreferenceStore::new());
        let changes = Rc::new(Cell::new(0));
        let last = Rc::new(Cell::new(Language::SPANISH));

        let (count, latest) = (Rc::clone(&changes), Rc::clone(&last));
        let subscription = resolver.subscribe(move |lang| {
            count.set(count.get() + 1);
            latest.set(*lang);
        });

        resolver.toggle();
        assert_eq!(changes.get(), 1);
        assert_eq!(last.get(), Language::ENGLISH);

        drop(subscription);
        resolver.toggle();
        assert_eq!(changes.get(), 1);
    }

    // ==================== Translate Tests ====================

    #[test]
    fn test_translate_follows_active_language() {
        let mut resolver = resolver_with(MemoryPreferenceStore::new());
        assert_eq!(resolver.translate("hero.cta"), "Descubrir el proyecto");
        resolver.toggle();
        assert_eq!(resolver.translate("hero.cta"), "Discover the project");
    }

    #[test]
    fn test_translate_spanish_only_key_in_english() {
        let mut resolver = resolver_with(MemoryPreferenceStore::new());
        resolver.toggle();
        assert_eq!(resolver.translate("hero.eyebrow"), "La Paz, Entre Ríos");
    }

    #[test]
    fn test_translate_unknown_key_is_total() {
        let resolver = resolver_with(MemoryPreferenceStore::new());
        assert_eq!(resolver.translate("does.not.exist"), "does.not.exist");
    }

    #[test]
    fn test_translate_with_custom_catalog() {
        const ES: &[(&str, &str)] = &[("only", "Sólo en español")];
        const EN: &[(&str, &str)] = &[];
        let catalog: &'static Catalog = Box::leak(Box::new(Catalog::from_tables(&[
            (Language::SPANISH, ES),
            (Language::ENGLISH, EN),
        ])));

        let mut resolver = resolver_with(MemoryPreferenceStore::new()).with_catalog(catalog);
        resolver.toggle();
        assert_eq!(resolver.translate("only"), "Sólo en español");
    }

    #[test]
    fn test_toggle_label_names_the_other_language() {
        let mut resolver = resolver_with(MemoryPreferenceStore::new());
        assert_eq!(resolver.toggle_label(), "Switch to English");
        resolver.toggle();
        assert_eq!(resolver.toggle_label(), "Cambiar a Español");
    }
}
