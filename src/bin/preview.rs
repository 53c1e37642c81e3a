//! Preview binary - walks a simulated visitor down the landing page in the
//! terminal, printing what the page chrome would show at each step.
//!
//! Usage:
//!   cargo run --bin preview              # Preview in the saved language
//!   cargo run --bin preview -- --toggle  # Switch language first (and save it)
//!
//! Optional environment variables:
//! - PREFERENCE_PATH (defaults to data/preferences.json)

use anyhow::Result;
use postales_del_vinedo::config::Config;
use postales_del_vinedo::counter::{spawn_ramp, DEFAULT_DURATION};
use postales_del_vinedo::i18n::{FilePreferenceStore, LanguageResolver, NoDocument};
use postales_del_vinedo::visual::{
    ElementBounds, ElementVisibility, HeroSpan, Reveal, ScrollSignal, ScrollTelemetry,
    VisibilityObserver, VisualStateTracker,
};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use tracing::info;

const DOCUMENT_HEIGHT: f64 = 3000.0;
const VIEWPORT_HEIGHT: f64 = 1000.0;
const HERO_HEIGHT: f64 = 900.0;
const SCROLL_STEP: f64 = 250.0;

/// The scarcity block ("Solo 15 lotes disponibles") sits below the hero.
const SCARCITY_TOP: f64 = 1500.0;
const SCARCITY_HEIGHT: f64 = 400.0;
const LOTS_AVAILABLE: u32 = 15;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("postales_del_vinedo=info".parse()?),
        )
        .init();

    let config = Config::from_env()?;
    let toggle = std::env::args().any(|arg| arg == "--toggle");

    let store = FilePreferenceStore::new(&config.preference_path);
    let mut resolver = LanguageResolver::initialize(Box::new(store), Box::new(NoDocument));
    if toggle {
        let lang = resolver.toggle();
        info!("Switched language to {}", lang);
    }

    println!("\n{}", "=".repeat(60));
    println!("{} ({})", resolver.translate("brand.name"), resolver.language());
    println!("{}", resolver.translate("hero.title"));
    println!("[{}]", resolver.toggle_label());
    println!("{}\n", "=".repeat(60));

    let telemetry = ScrollTelemetry::new();
    let tracker = VisualStateTracker::attach(&telemetry, HeroSpan::for_element(0.0, HERO_HEIGHT));

    let scarcity = ElementVisibility::counter();
    let triggered = Rc::new(RefCell::new(Reveal::new()));
    let sink = Rc::clone(&triggered);
    let _scarcity_watch = scarcity.observe(Box::new(move |visible: &bool| {
        sink.borrow_mut().on_visibility(*visible);
    }));

    let mut offset = 0.0;
    let mut ramp = None;
    while offset <= DOCUMENT_HEIGHT - VIEWPORT_HEIGHT {
        telemetry.emit(ScrollSignal::new(offset, VIEWPORT_HEIGHT, DOCUMENT_HEIGHT));
        scarcity.update(
            ElementBounds::at_scroll(SCARCITY_TOP, SCARCITY_HEIGHT, offset),
            VIEWPORT_HEIGHT,
        );

        let snapshot = tracker.snapshot();
        println!(
            "y={:>6.0}  progress={:>5.1}%  {}  nav={:<5}  fab={:<5}  hero: +{:.1}% / opacity {:.2}",
            offset,
            snapshot.visual.progress_percent,
            snapshot.visual.blend_declaration(),
            snapshot.visual.nav_scrolled,
            snapshot.visual.fab_visible,
            snapshot.parallax.translate_y_percent,
            snapshot.parallax.opacity,
        );

        if ramp.is_none() && triggered.borrow().is_revealed() {
            println!("          -> {} visible, counter starts", resolver.translate("scarcity.eyebrow"));
            ramp = Some(spawn_ramp(
                LOTS_AVAILABLE,
                DEFAULT_DURATION,
                Duration::from_millis(16),
            ));
        }

        offset += SCROLL_STEP;
    }

    if let Some(mut ramp) = ramp {
        let mut values = ramp.subscribe();
        let mut last = None;
        while ramp.current() < LOTS_AVAILABLE {
            if values.changed().await.is_err() {
                break;
            }
            let value = *values.borrow_and_update();
            // Print every whole step once rather than every frame.
            if last != Some(value) {
                println!("counter: {}", value);
                last = Some(value);
            }
        }
        let value = ramp.finished().await;
        println!(
            "\n{}",
            resolver
                .translate("scarcity.available")
                .replace("{count}", &value.to_string())
        );
    }

    Ok(())
}
