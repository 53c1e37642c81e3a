//! Message catalog: every user-facing string on the landing page, per language.
//!
//! Keys are dotted section paths (`hero.title`, `contact.submit`). Spanish is
//! the complete source copy; English translates everything except proper
//! nouns and place names, which resolve through the Spanish fallback.

use crate::i18n::{Language, TranslationMetrics};
use std::collections::{BTreeMap, HashMap};
use std::sync::OnceLock;
use tracing::debug;

type Table = HashMap<&'static str, &'static str>;

/// Which tier of the lookup chain answered a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup<'a> {
    /// Found in the requested language.
    Direct(&'a str),
    /// Missing in the requested language, found in the source language.
    Fallback(&'a str),
    /// Not found anywhere.
    Missing,
}

/// Immutable language → key → string tables.
#[derive(Debug, Clone)]
pub struct Catalog {
    tables: HashMap<&'static str, Table>,
}

static CATALOG: OnceLock<Catalog> = OnceLock::new();

impl Catalog {
    /// The catalog with the landing page copy, built on first use.
    pub fn global() -> &'static Catalog {
        CATALOG.get_or_init(|| {
            Catalog::from_tables(&[
                (Language::SPANISH, SPANISH_STRINGS),
                (Language::ENGLISH, ENGLISH_STRINGS),
            ])
        })
    }

    pub fn from_tables(tables: &[(Language, &[(&'static str, &'static str)])]) -> Self {
        let tables = tables
            .iter()
            .map(|(lang, entries)| (lang.code(), entries.iter().copied().collect::<Table>()))
            .collect();
        Self { tables }
    }

    /// Raw lookup in a single language. Empty strings count as absent.
    pub fn get(&self, lang: Language, key: &str) -> Option<&'static str> {
        self.tables
            .get(lang.code())
            .and_then(|table| table.get(key))
            .copied()
            .filter(|value| !value.is_empty())
    }

    /// Active language first, then the source language.
    pub fn lookup(&self, lang: Language, key: &str) -> Lookup<'static> {
        if let Some(value) = self.get(lang, key) {
            return Lookup::Direct(value);
        }
        match self.get(Language::canonical(), key) {
            Some(value) => Lookup::Fallback(value),
            None => Lookup::Missing,
        }
    }

    /// Resolve `key` for `lang`; returns the key itself when nothing matches.
    pub fn translate<'a>(&self, lang: Language, key: &'a str) -> &'a str {
        let metrics = TranslationMetrics::global();
        match self.lookup(lang, key) {
            Lookup::Direct(value) => {
                metrics.record_direct();
                value
            }
            Lookup::Fallback(value) => {
                metrics.record_fallback();
                value
            }
            Lookup::Missing => {
                metrics.record_missing();
                debug!("No translation for '{}' ({}), using key", key, lang);
                key
            }
        }
    }

    /// All keys defined for a language, sorted.
    pub fn keys(&self, lang: Language) -> Vec<&'static str> {
        let mut keys: Vec<_> = self
            .tables
            .get(lang.code())
            .map(|table| table.keys().copied().collect())
            .unwrap_or_default();
        keys.sort_unstable();
        keys
    }

    /// Raw entries for a language, sorted by key, empty values included.
    pub fn entries(&self, lang: Language) -> Vec<(&'static str, &'static str)> {
        let mut entries: Vec<_> = self
            .tables
            .get(lang.code())
            .map(|table| table.iter().map(|(k, v)| (*k, *v)).collect())
            .unwrap_or_default();
        entries.sort_unstable();
        entries
    }

    /// The fully resolved table for `lang`: every source key, translated
    /// or falling back, plus any keys only the target language defines.
    pub fn resolved(&self, lang: Language) -> BTreeMap<&'static str, &'static str> {
        let mut keys = self.keys(Language::canonical());
        keys.extend(self.keys(lang));
        keys.into_iter()
            .filter_map(|key| match self.lookup(lang, key) {
                Lookup::Direct(value) | Lookup::Fallback(value) => Some((key, value)),
                Lookup::Missing => None,
            })
            .collect()
    }
}

// ==================== Spanish Strings ====================

/// Spanish copy (source language).
pub const SPANISH_STRINGS: &[(&str, &str)] = &[
    // Brand
    ("brand.name", "Postales del Viñedo"),
    ("brand.tagline", "Tu viñedo privado en Entre Ríos"),
    // Navbar
    ("nav.concept", "Concepto"),
    ("nav.investment", "Inversión"),
    ("nav.amenities", "Amenities"),
    ("nav.location", "Ubicación"),
    ("nav.roadmap", "Roadmap"),
    ("nav.cta", "Reservá tu lote"),
    ("nav.menu", "Menú"),
    // Language toggle
    ("lang.toggle_label", "Switch to English"),
    // Hero
    ("hero.eyebrow", "La Paz, Entre Ríos"),
    ("hero.title", "Tu viñedo privado te está esperando"),
    ("hero.subtitle", "Lotes exclusivos · Vino propio · Club del vino · Vida sustentable"),
    ("hero.cta", "Descubrir el proyecto"),
    ("hero.scroll", "Deslizar para explorar"),
    // Concept
    ("concept.eyebrow", "El concepto"),
    ("concept.title", "Más que un lote, un estilo de vida"),
    ("concept.vineyard.title", "Tu Viñedo Personal"),
    ("concept.vineyard.desc", "800m² con producción de vino exclusiva. Mantenimiento profesional incluido. Tu propia bodega en casa."),
    ("concept.value.title", "Valor Productivo del Lote"),
    ("concept.value.desc", "Tu viñedo genera producción propia con potencial de comercialización futura mediante el Club del Vino y canales exclusivos."),
    ("concept.sustainability.title", "Sustentabilidad Total"),
    ("concept.sustainability.desc", "100% energía solar, economía circular, reserva de bosque nativo. Inversión con propósito."),
    // Gallery
    ("gallery.sunset", "Viñedos al atardecer"),
    ("gallery.winery", "Bodega boutique"),
    ("gallery.cabins", "Cabañas de diseño"),
    ("gallery.glamping", "Glamping exclusivo"),
    // Investment
    ("investment.from", "Inversión desde"),
    ("investment.price", "USD 40.000"),
    ("investment.lot", "Lote de 800m² · Financiación disponible"),
    ("investment.deposit.title", "Anticipo"),
    ("investment.deposit.desc", "30% + cuotas sin interés"),
    ("investment.presale.title", "Preventa"),
    ("investment.presale.desc", "15% descuento pioneros"),
    ("investment.financing.title", "Financiación"),
    ("investment.financing.desc", "Planes personalizados"),
    // Scarcity
    ("scarcity.eyebrow", "Disponibilidad limitada"),
    ("scarcity.available", "Solo {count} lotes disponibles"),
    ("scarcity.reserved", "{count} ya reservados en preventa · Asegurá tu lugar"),
    ("scarcity.testimonial1.author", "Martín R."),
    ("scarcity.testimonial1.role", "Inversor, Buenos Aires"),
    ("scarcity.testimonial2.author", "Carolina P."),
    ("scarcity.testimonial2.role", "Familia, Rosario"),
    // Amenities
    ("amenities.eyebrow", "El complejo"),
    ("amenities.title", "Todo lo que necesitás, en un solo lugar"),
    ("amenities.cabins.title", "Cabañas Boutique"),
    ("amenities.cabins.desc", "Alojamiento de diseño para huéspedes"),
    ("amenities.glamping.title", "Glamping de Lujo"),
    ("amenities.glamping.desc", "Experiencia única entre viñedos"),
    ("amenities.winery.title", "Bodega Propia"),
    ("amenities.winery.desc", "Producción y cata de vinos"),
    ("amenities.forest.title", "Bosque Nativo"),
    ("amenities.forest.desc", "Reserva natural protegida"),
    ("amenities.solar.title", "Energía Solar"),
    ("amenities.solar.desc", "100% sustentable"),
    ("amenities.circular.title", "Economía Circular"),
    ("amenities.circular.desc", "Gestión responsable de recursos"),
    // Location
    ("location.eyebrow", "Ubicación"),
    ("location.title", "Cerca de todo, lejos del ruido"),
    ("location.place", "La Paz, Entre Ríos"),
    ("location.place.desc", "El corazón de la ruta del vino entrerriano"),
    ("location.parana.title", "2 hs desde Paraná"),
    ("location.parana.desc", "Acceso directo por ruta asfaltada"),
    ("location.buenos_aires.title", "400km desde Buenos Aires"),
    ("location.buenos_aires.desc", "Escapada de fin de semana perfecta"),
    ("location.map_title", "Ubicación Postales del Viñedo - La Paz, Entre Ríos"),
    // Roadmap
    ("roadmap.eyebrow", "Roadmap"),
    ("roadmap.title", "Un proyecto con futuro claro"),
    ("roadmap.done", "Completado"),
    ("roadmap.presale.title", "Preventa Pioneros"),
    ("roadmap.presale.desc", "Descuentos exclusivos para primeros compradores"),
    ("roadmap.works.title", "Inicio de Obras"),
    ("roadmap.works.desc", "Infraestructura y servicios básicos"),
    ("roadmap.planting.title", "Viñedos Plantados"),
    ("roadmap.planting.desc", "Plantación de variedades seleccionadas"),
    ("roadmap.amenities.title", "Amenities Operativos"),
    ("roadmap.amenities.desc", "Cabañas y glamping en funcionamiento"),
    ("roadmap.harvest.title", "Primera Cosecha"),
    ("roadmap.harvest.desc", "Producción inicial de vino propio"),
    // Contact
    ("contact.title", "¿Listo para tu postal del viñedo?"),
    ("contact.subtitle", "Dejanos tus datos y te contactamos en menos de 24 horas para enviarte información completa y coordinar una visita."),
    ("contact.name", "Nombre completo"),
    ("contact.phone", "Teléfono"),
    ("contact.email", "Email"),
    ("contact.message", "Mensaje (opcional)"),
    ("contact.submit", "Quiero más información"),
    ("contact.submitting", "Enviando..."),
    ("contact.submitted", "¡Mensaje enviado!"),
    ("contact.trust.privacy", "Tus datos están protegidos"),
    ("contact.trust.response", "Respuesta en 24hs"),
    ("contact.trust.commitment", "Sin compromiso"),
    // WhatsApp
    ("whatsapp.label", "Contactar por WhatsApp"),
    ("whatsapp.greeting", "Hola, quiero más información sobre Postales del Viñedo"),
    // Footer
    ("footer.contact", "Contacto"),
    ("footer.follow", "Seguinos"),
    ("footer.copyright", "© 2026 Postales del Viñedo. Todos los derechos reservados."),
    ("footer.place", "La Paz, Entre Ríos, Argentina"),
];

// ==================== English Strings ====================

/// English copy. Brand and place names are left to the Spanish fallback.
pub const ENGLISH_STRINGS: &[(&str, &str)] = &[
    ("brand.tagline", "Your private vineyard in Entre Ríos"),
    // Navbar
    ("nav.concept", "Concept"),
    ("nav.investment", "Investment"),
    ("nav.amenities", "Amenities"),
    ("nav.location", "Location"),
    ("nav.roadmap", "Roadmap"),
    ("nav.cta", "Reserve your lot"),
    ("nav.menu", "Menu"),
    // Language toggle
    ("lang.toggle_label", "Cambiar a Español"),
    // Hero
    ("hero.title", "Your private vineyard is waiting for you"),
    ("hero.subtitle", "Exclusive lots · Your own wine · Wine club · Sustainable living"),
    ("hero.cta", "Discover the project"),
    ("hero.scroll", "Scroll to explore"),
    // Concept
    ("concept.eyebrow", "The concept"),
    ("concept.title", "More than a lot, a way of life"),
    ("concept.vineyard.title", "Your Personal Vineyard"),
    ("concept.vineyard.desc", "800m² with exclusive wine production. Professional maintenance included. Your own winery at home."),
    ("concept.value.title", "Productive Value of the Lot"),
    ("concept.value.desc", "Your vineyard yields its own production with future commercial potential through the Wine Club and exclusive channels."),
    ("concept.sustainability.title", "Total Sustainability"),
    ("concept.sustainability.desc", "100% solar energy, circular economy, native forest reserve. Investment with purpose."),
    // Gallery
    ("gallery.sunset", "Vineyards at sunset"),
    ("gallery.winery", "Boutique winery"),
    ("gallery.cabins", "Design cabins"),
    ("gallery.glamping", "Exclusive glamping"),
    // Investment
    ("investment.from", "Investment from"),
    ("investment.lot", "800m² lot · Financing available"),
    ("investment.deposit.title", "Down payment"),
    ("investment.deposit.desc", "30% + interest-free installments"),
    ("investment.presale.title", "Presale"),
    ("investment.presale.desc", "15% pioneer discount"),
    ("investment.financing.title", "Financing"),
    ("investment.financing.desc", "Tailored plans"),
    // Scarcity
    ("scarcity.eyebrow", "Limited availability"),
    ("scarcity.available", "Only {count} lots available"),
    ("scarcity.reserved", "{count} already reserved in presale · Secure your spot"),
    ("scarcity.testimonial1.role", "Investor, Buenos Aires"),
    ("scarcity.testimonial2.role", "Family, Rosario"),
    // Amenities
    ("amenities.eyebrow", "The complex"),
    ("amenities.title", "Everything you need, in one place"),
    ("amenities.cabins.title", "Boutique Cabins"),
    ("amenities.cabins.desc", "Design accommodation for guests"),
    ("amenities.glamping.title", "Luxury Glamping"),
    ("amenities.glamping.desc", "A unique experience among the vines"),
    ("amenities.winery.title", "Own Winery"),
    ("amenities.winery.desc", "Wine production and tasting"),
    ("amenities.forest.title", "Native Forest"),
    ("amenities.forest.desc", "Protected nature reserve"),
    ("amenities.solar.title", "Solar Energy"),
    ("amenities.solar.desc", "100% sustainable"),
    ("amenities.circular.title", "Circular Economy"),
    ("amenities.circular.desc", "Responsible resource management"),
    // Location
    ("location.eyebrow", "Location"),
    ("location.title", "Close to everything, far from the noise"),
    ("location.place.desc", "The heart of the Entre Ríos wine route"),
    ("location.parana.title", "2 hours from Paraná"),
    ("location.parana.desc", "Direct access by paved road"),
    ("location.buenos_aires.title", "400km from Buenos Aires"),
    ("location.buenos_aires.desc", "The perfect weekend getaway"),
    ("location.map_title", "Postales del Viñedo location - La Paz, Entre Ríos"),
    // Roadmap
    ("roadmap.title", "A project with a clear future"),
    ("roadmap.done", "Completed"),
    ("roadmap.presale.title", "Pioneer Presale"),
    ("roadmap.presale.desc", "Exclusive discounts for early buyers"),
    ("roadmap.works.title", "Construction Begins"),
    ("roadmap.works.desc", "Infrastructure and basic services"),
    ("roadmap.planting.title", "Vineyards Planted"),
    ("roadmap.planting.desc", "Planting of selected varieties"),
    ("roadmap.amenities.title", "Amenities Operational"),
    ("roadmap.amenities.desc", "Cabins and glamping up and running"),
    ("roadmap.harvest.title", "First Harvest"),
    ("roadmap.harvest.desc", "Initial production of your own wine"),
    // Contact
    ("contact.title", "Ready for your vineyard postcard?"),
    ("contact.subtitle", "Leave us your details and we will contact you within 24 hours to send you full information and arrange a visit."),
    ("contact.name", "Full name"),
    ("contact.phone", "Phone"),
    ("contact.message", "Message (optional)"),
    ("contact.submit", "I want more information"),
    ("contact.submitting", "Sending..."),
    ("contact.submitted", "Message sent!"),
    ("contact.trust.privacy", "Your data is protected"),
    ("contact.trust.response", "Reply within 24h"),
    ("contact.trust.commitment", "No commitment"),
    // WhatsApp
    ("whatsapp.label", "Contact us on WhatsApp"),
    ("whatsapp.greeting", "Hi, I'd like more information about Postales del Viñedo"),
    // Footer
    ("footer.contact", "Contact"),
    ("footer.follow", "Follow us"),
    ("footer.copyright", "© 2026 Postales del Viñedo. All rights reserved."),
    ("footer.place", "La Paz, Entre Ríos, Argentina"),
];

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL_ES: &[(&str, &str)] = &[
        ("greeting", "Hola"),
        ("only_es", "Solo español"),
        ("blank", "Vacío"),
    ];
    const SMALL_EN: &[(&str, &str)] = &[("greeting", "Hello"), ("blank", "")];

    fn small_catalog() -> Catalog {
        Catalog::from_tables(&[(Language::SPANISH, SMALL_ES), (Language::ENGLISH, SMALL_EN)])
    }

    // ==================== Lookup Chain Tests ====================

    #[test]
    fn test_direct_hit_in_active_language() {
        let catalog = small_catalog();
        assert_eq!(catalog.lookup(Language::ENGLISH, "greeting"), Lookup::Direct("Hello"));
        assert_eq!(catalog.translate(Language::SPANISH, "greeting"), "Hola");
    }

    #[test]
    fn test_spanish_only_key_resolves_in_both_languages() {
        let catalog = small_catalog();
        assert_eq!(catalog.translate(Language::SPANISH, "only_es"), "Solo español");
        assert_eq!(catalog.translate(Language::ENGLISH, "only_es"), "Solo español");
        assert_eq!(
            catalog.lookup(Language::ENGLISH, "only_es"),
            Lookup::Fallback("Solo español")
        );
    }

    #[test]
    fn test_missing_key_returns_key_verbatim() {
        let catalog = small_catalog();
        assert_eq!(catalog.translate(Language::ENGLISH, "nope.missing"), "nope.missing");
        assert_eq!(catalog.translate(Language::SPANISH, ""), "");
        assert_eq!(catalog.lookup(Language::SPANISH, "nope"), Lookup::Missing);
    }

    #[test]
    fn test_empty_translation_falls_back() {
        let catalog = small_catalog();
        assert_eq!(catalog.translate(Language::ENGLISH, "blank"), "Vacío");
        assert_eq!(catalog.get(Language::ENGLISH, "blank"), None);
    }

    // ==================== Resolved Table Tests ====================

    #[test]
    fn test_resolved_table_covers_every_source_key() {
        let catalog = small_catalog();
        let resolved = catalog.resolved(Language::ENGLISH);
        assert_eq!(resolved.len(), 3);
        assert_eq!(resolved["greeting"], "Hello");
        assert_eq!(resolved["only_es"], "Solo español");
        assert_eq!(resolved["blank"], "Vacío");
    }

    #[test]
    fn test_keys_sorted() {
        let catalog = small_catalog();
        assert_eq!(catalog.keys(Language::SPANISH), vec!["blank", "greeting", "only_es"]);
    }

    // ==================== Landing Copy Tests ====================

    #[test]
    fn test_global_catalog_has_landing_copy() {
        let catalog = Catalog::global();
        assert_eq!(catalog.translate(Language::SPANISH, "nav.cta"), "Reservá tu lote");
        assert_eq!(catalog.translate(Language::ENGLISH, "nav.cta"), "Reserve your lot");
    }

    #[test]
    fn test_brand_name_is_not_translated() {
        let catalog = Catalog::global();
        assert_eq!(catalog.get(Language::ENGLISH, "brand.name"), None);
        assert_eq!(catalog.translate(Language::ENGLISH, "brand.name"), "Postales del Viñedo");
    }

    #[test]
    fn test_english_keys_are_subset_of_spanish() {
        let catalog = Catalog::global();
        let spanish = catalog.keys(Language::SPANISH);
        for key in catalog.keys(Language::ENGLISH) {
            assert!(spanish.contains(&key), "English-only key: {}", key);
        }
    }

    #[test]
    fn test_no_duplicate_keys_in_source_tables() {
        for table in [SPANISH_STRINGS, ENGLISH_STRINGS] {
            let mut keys: Vec<_> = table.iter().map(|(key, _)| *key).collect();
            let total = keys.len();
            keys.sort_unstable();
            keys.dedup();
            assert_eq!(keys.len(), total);
        }
    }
}
