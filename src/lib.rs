//! Postales del Viñedo landing page core.
//!
//! The page itself is static markup; this crate holds the parts with actual
//! behaviour: the scroll-driven visual state, the animated counters, the
//! bilingual copy, and the lead relay behind the contact form.

pub mod config;
pub mod counter;
pub mod error;
pub mod i18n;
pub mod lead;
pub mod notify;
pub mod server;
pub mod visual;
