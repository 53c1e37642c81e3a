use anyhow::{Context, Result};
use std::time::Duration;

/// Apps Script web app that collects leads into the sales spreadsheet.
pub const DEFAULT_LEAD_ENDPOINT: &str = "https://script.google.com/macros/s/AKfycbx0mh3IIV5yrWldjaIZLuKQjxN0MwBA1QghGeDGI3MR8KXqhhw12OknYrrbBCvYIkES1Q/exec";

/// Sales line used by the floating button and the footer.
pub const DEFAULT_WHATSAPP_NUMBER: &str = "5493512440572";

#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub port: u16,

    // Lead relay
    pub lead_endpoint_url: String,
    pub lead_reset_after: Duration,

    // Language preference storage
    pub preference_path: String,

    // WhatsApp contact, international format without "+"
    pub whatsapp_number: String,

    // Location map (La Paz, Entre Ríos)
    pub map_latitude: f64,
    pub map_longitude: f64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            port: std::env::var("PORT")
                .ok()
                .map(|v| v.parse().context("PORT must be a valid port number"))
                .transpose()?
                .unwrap_or(8080),

            lead_endpoint_url: std::env::var("LEAD_ENDPOINT_URL")
                .unwrap_or_else(|_| DEFAULT_LEAD_ENDPOINT.to_string()),
            lead_reset_after: Duration::from_millis(
                std::env::var("LEAD_RESET_AFTER_MS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(3000),
            ),

            preference_path: std::env::var("PREFERENCE_PATH")
                .unwrap_or_else(|_| "data/preferences.json".to_string()),

            whatsapp_number: std::env::var("WHATSAPP_NUMBER")
                .map(|v| v.trim_start_matches('+').to_string())
                .unwrap_or_else(|_| DEFAULT_WHATSAPP_NUMBER.to_string()),

            map_latitude: std::env::var("MAP_LATITUDE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(-30.750293528738894),
            map_longitude: std::env::var("MAP_LONGITUDE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(-59.61139471952832),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            lead_endpoint_url: DEFAULT_LEAD_ENDPOINT.to_string(),
            lead_reset_after: Duration::from_millis(3000),
            preference_path: "data/preferences.json".to_string(),
            whatsapp_number: DEFAULT_WHATSAPP_NUMBER.to_string(),
            map_latitude: -30.750293528738894,
            map_longitude: -59.61139471952832,
        }
    }
}
