//! Site configuration module.
//!
//! Handles loading, validating, and layering `config.toml`. Stock defaults
//! are the base layer; the content directory's `config.toml` overrides any
//! subset of keys.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! lang = "es"                 # <html lang>
//! assets_dir = "assets"       # Copied verbatim next to index.html
//!
//! [colors]
//! primary = "#3A6B8D"         # Headings, nav links, submit button
//! primary_hover = "#2D5470"
//! accent = "#4C7C49"          # Amenity icons, stars, location subtitle
//! highlight = "#D69F6A"       # Testimonial hover
//! background = "#D1D8E0"      # Page background
//! surface = "#FFFFFF"         # Cards, header, form
//! text = "#1F2937"
//! text_muted = "#4B5563"
//! error = "#EF4444"           # Field validation messages
//!
//! [typography]
//! heading_font = "Lora"
//! body_font = "Poppins"
//! # stylesheet = "https://fonts.googleapis.com/css2?family=Lora&family=Poppins"
//!
//! [email]
//! endpoint = "https://api.emailjs.com/api/v1.0/email/send"
//! service_id = ""             # Required for the inquiry form to send
//! template_id = ""
//! public_key = ""
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

pub const DEFAULT_EMAIL_ENDPOINT: &str = "https://api.emailjs.com/api/v1.0/email/send";

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Document language.
    pub lang: String,
    /// Directory inside the content root copied to the output root.
    pub assets_dir: String,
    pub colors: ColorConfig,
    pub typography: TypographyConfig,
    /// Email delivery service used by the inquiry form.
    pub email: EmailConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            lang: "es".to_string(),
            assets_dir: "assets".to_string(),
            colors: ColorConfig::default(),
            typography: TypographyConfig::default(),
            email: EmailConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are well-formed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.lang.trim().is_empty() {
            return Err(ConfigError::Validation("lang must not be empty".into()));
        }
        if self.assets_dir.trim().is_empty() {
            return Err(ConfigError::Validation(
                "assets_dir must not be empty".into(),
            ));
        }
        for (name, value) in self.colors.entries() {
            if !is_hex_color(value) {
                return Err(ConfigError::Validation(format!(
                    "colors.{name} must be a hex color like #3A6B8D, got {value:?}"
                )));
            }
        }
        if let Some(sheet) = &self.typography.stylesheet {
            if !(sheet.starts_with("https://") || sheet.starts_with("http://") || sheet.starts_with('/')) {
                return Err(ConfigError::Validation(format!(
                    "typography.stylesheet must be a URL or absolute path, got {sheet:?}"
                )));
            }
        }
        let endpoint = &self.email.endpoint;
        if !(endpoint.starts_with("https://") || endpoint.starts_with("http://")) {
            return Err(ConfigError::Validation(format!(
                "email.endpoint must be an http(s) URL, got {endpoint:?}"
            )));
        }
        Ok(())
    }
}

/// `#rgb`, `#rrggbb` or `#rrggbbaa`.
fn is_hex_color(value: &str) -> bool {
    match value.strip_prefix('#') {
        Some(hex) => {
            matches!(hex.len(), 3 | 6 | 8) && hex.chars().all(|c| c.is_ascii_hexdigit())
        }
        None => false,
    }
}

/// Brand palette.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    pub primary: String,
    pub primary_hover: String,
    pub accent: String,
    pub highlight: String,
    pub background: String,
    pub surface: String,
    pub text: String,
    pub text_muted: String,
    pub error: String,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            primary: "#3A6B8D".to_string(),
            primary_hover: "#2D5470".to_string(),
            accent: "#4C7C49".to_string(),
            highlight: "#D69F6A".to_string(),
            background: "#D1D8E0".to_string(),
            surface: "#FFFFFF".to_string(),
            text: "#1F2937".to_string(),
            text_muted: "#4B5563".to_string(),
            error: "#EF4444".to_string(),
        }
    }
}

impl ColorConfig {
    /// `(key, value)` pairs in declaration order.
    pub fn entries(&self) -> [(&'static str, &str); 9] {
        [
            ("primary", self.primary.as_str()),
            ("primary_hover", self.primary_hover.as_str()),
            ("accent", self.accent.as_str()),
            ("highlight", self.highlight.as_str()),
            ("background", self.background.as_str()),
            ("surface", self.surface.as_str()),
            ("text", self.text.as_str()),
            ("text_muted", self.text_muted.as_str()),
            ("error", self.error.as_str()),
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TypographyConfig {
    pub heading_font: String,
    pub body_font: String,
    /// Optional web-font stylesheet linked from `<head>`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stylesheet: Option<String>,
}

impl Default for TypographyConfig {
    fn default() -> Self {
        Self {
            heading_font: "Lora".to_string(),
            body_font: "Poppins".to_string(),
            stylesheet: None,
        }
    }
}

/// Email delivery service settings.
///
/// The identifiers are public by nature: the browser sends them with every
/// inquiry, so they end up in the generated HTML.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EmailConfig {
    pub endpoint: String,
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_EMAIL_ENDPOINT.to_string(),
            service_id: String::new(),
            template_id: String::new(),
            public_key: String::new(),
        }
    }
}

impl EmailConfig {
    /// First identifier left blank, if any.
    pub fn missing_field(&self) -> Option<&'static str> {
        [
            ("email.service_id", &self.service_id),
            ("email.template_id", &self.template_id),
            ("email.public_key", &self.public_key),
        ]
        .into_iter()
        .find(|(_, v)| v.trim().is_empty())
        .map(|(k, _)| k)
    }

    pub fn is_configured(&self) -> bool {
        self.missing_field().is_none()
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(SiteConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the directory has no `config.toml`.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory, layered over
/// stock defaults.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(root)?;
    let config = resolve_config(base, overlay)?;
    tracing::debug!(root = %root.display(), "configuration loaded");
    Ok(config)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Rental Site Configuration
# =========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Place this file next to site.toml.
# Unknown keys will cause an error.

# Document language (<html lang>).
lang = "es"

# Directory inside the content root copied verbatim to the output root
# (favicon, self-hosted fonts, local photos).
assets_dir = "assets"

# ---------------------------------------------------------------------------
# Palette (hex colors)
# ---------------------------------------------------------------------------
[colors]
primary = "#3A6B8D"        # Headings, nav links, submit button
primary_hover = "#2D5470"
accent = "#4C7C49"         # Amenity icons, rating stars
highlight = "#D69F6A"      # Testimonial hover tint
background = "#D1D8E0"     # Page background
surface = "#FFFFFF"        # Cards, header, form
text = "#1F2937"
text_muted = "#4B5563"
error = "#EF4444"          # Field validation messages

# ---------------------------------------------------------------------------
# Typography (font-family names; load them through assets or the system)
# ---------------------------------------------------------------------------
[typography]
heading_font = "Lora"
body_font = "Poppins"
# Web-font stylesheet linked from <head>, e.g. Google Fonts.
# stylesheet = "https://fonts.googleapis.com/css2?family=Lora:wght@400;700&family=Poppins:wght@300;400;600&display=swap"

# ---------------------------------------------------------------------------
# Inquiry email delivery (EmailJS)
# ---------------------------------------------------------------------------
[email]
endpoint = "https://api.emailjs.com/api/v1.0/email/send"
# All three identifiers are required for the inquiry form to send.
service_id = ""
template_id = ""
public_key = ""
"##
}

/// Generate CSS custom properties from the palette and typography.
pub fn generate_theme_css(colors: &ColorConfig, typography: &TypographyConfig) -> String {
    let mut css = String::from(":root {\n");
    for (name, value) in colors.entries() {
        css.push_str(&format!(
            "    --color-{}: {};\n",
            name.replace('_', "-"),
            value
        ));
    }
    css.push_str(&format!(
        "    --font-heading: \"{}\", Georgia, serif;\n    --font-body: \"{}\", system-ui, sans-serif;\n}}",
        typography.heading_font, typography.body_font
    ));
    css
}
