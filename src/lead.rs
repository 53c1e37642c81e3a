//! Contact form leads.
//!
//! Leads are relayed to a third-party collector (an Apps Script web app that
//! appends them to a spreadsheet). Delivery is best effort: the form always
//! shows "sent", and relay failures only reach the logs.

use crate::config::Config;
use crate::error::LeadError;
use crate::i18n::{Catalog, Language, LanguageResolver};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_REGEX.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap())
}

/// A prospective buyer's contact details, in the collector's JSON shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lead {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeadField {
    Name,
    Email,
    Phone,
    Message,
}

impl Lead {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
            message: message.into(),
        }
    }

    pub fn set(&mut self, field: LeadField, value: impl Into<String>) {
        let slot = match field {
            LeadField::Name => &mut self.name,
            LeadField::Email => &mut self.email,
            LeadField::Phone => &mut self.phone,
            LeadField::Message => &mut self.message,
        };
        *slot = value.into();
    }

    /// Same checks as the form's `required` and `type="email"` inputs.
    /// Every problem is reported, not just the first.
    pub fn validate(&self) -> Result<(), LeadError> {
        let mut reasons = Vec::new();

        if self.name.trim().is_empty() {
            reasons.push("name is required".to_string());
        }
        let email = self.email.trim();
        if email.is_empty() {
            reasons.push("email is required".to_string());
        } else if !email_regex().is_match(email) {
            reasons.push("email is invalid".to_string());
        }
        if self.phone.trim().is_empty() {
            reasons.push("phone is required".to_string());
        }

        if reasons.is_empty() {
            Ok(())
        } else {
            Err(LeadError::Invalid(reasons))
        }
    }
}

/// Posts leads to the collector endpoint.
#[derive(Debug, Clone)]
pub struct LeadRelay {
    client: reqwest::Client,
    endpoint: String,
}

impl LeadRelay {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.lead_endpoint_url.clone())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn submit(&self, lead: &Lead) -> Result<(), LeadError> {
        let response = self.client.post(&self.endpoint).json(lead).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LeadError::Status(status));
        }

        debug!("Lead endpoint answered {}", status);
        Ok(())
    }

    /// Fire and forget. The returned handle is only useful to tests and
    /// shutdown code; nothing about the outcome is reported back.
    pub fn submit_detached(&self, lead: Lead) -> JoinHandle<()> {
        let relay = self.clone();
        tokio::spawn(async move {
            match relay.submit(&lead).await {
                Ok(()) => info!("Lead relayed to {}", relay.endpoint),
                Err(e) => warn!("Failed to relay lead to {}: {}", relay.endpoint, e),
            }
        })
    }
}

// ==================== WhatsApp ====================

/// Click-to-chat link with no prefilled message, as used in the footer.
pub fn whatsapp_chat_link(number: &str) -> String {
    format!("https://wa.me/{}", number)
}

/// Click-to-chat link for the floating button, prefilled with the greeting
/// in `lang`.
pub fn whatsapp_link(number: &str, lang: Language) -> String {
    let greeting = Catalog::global().translate(lang, "whatsapp.greeting");
    format!(
        "{}?text={}",
        whatsapp_chat_link(number),
        urlencoding::encode(greeting)
    )
}

// ==================== Form state ====================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Editing,
    Submitting,
    Submitted { since: Duration },
}

/// The contact form's optimistic submit cycle.
///
/// `Editing → Submitting → Submitted`, then back to `Editing` with empty
/// fields once the confirmation has been shown for `reset_after`. The
/// transport outcome never changes the path.
#[derive(Debug, Clone)]
pub struct ContactForm {
    lead: Lead,
    phase: FormPhase,
    reset_after: Duration,
}

impl ContactForm {
    pub fn new(reset_after: Duration) -> Self {
        Self {
            lead: Lead::default(),
            phase: FormPhase::Editing,
            reset_after,
        }
    }

    pub fn lead(&self) -> &Lead {
        &self.lead
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    /// Input changes are ignored outside `Editing`.
    pub fn set(&mut self, field: LeadField, value: impl Into<String>) {
        if self.phase == FormPhase::Editing {
            self.lead.set(field, value);
        }
    }

    /// Lock the form and hand out the lead to send.
    pub fn begin_submit(&mut self) -> Option<Lead> {
        if self.phase != FormPhase::Editing {
            return None;
        }
        self.phase = FormPhase::Submitting;
        Some(self.lead.clone())
    }

    /// Called once the request has been handed off, whatever its fate.
    pub fn finish_submit(&mut self, now: Duration) {
        if self.phase == FormPhase::Submitting {
            self.phase = FormPhase::Submitted { since: now };
        }
    }

    /// `begin_submit` and `finish_submit` in one step.
    pub fn submit(&mut self, now: Duration) -> Option<Lead> {
        let lead = self.begin_submit()?;
        self.finish_submit(now);
        Some(lead)
    }

    /// Reset once the confirmation window has passed. Returns true on reset.
    pub fn poll(&mut self, now: Duration) -> bool {
        let FormPhase::Submitted { since } = self.phase else {
            return false;
        };
        if now.saturating_sub(since) < self.reset_after {
            return false;
        }
        self.lead = Lead::default();
        self.phase = FormPhase::Editing;
        true
    }

    pub fn button_label_key(&self) -> &'static str {
        match self.phase {
            FormPhase::Editing => "contact.submit",
            FormPhase::Submitting => "contact.submitting",
            FormPhase::Submitted { .. } => "contact.submitted",
        }
    }

    pub fn button_label(&self, resolver: &LanguageResolver) -> &'static str {
        resolver.translate(self.button_label_key())
    }
}
