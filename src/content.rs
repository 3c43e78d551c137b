//! Site content loading.
//!
//! Everything a visitor reads lives in `site.toml` in the content directory:
//!
//! ```text
//! content/
//! ├── site.toml      # Copy, links, amenities, testimonials, gallery
//! ├── config.toml    # Palette, typography, email service (optional)
//! └── assets/        # Copied verbatim next to index.html (optional)
//! ```
//!
//! ## `site.toml` shape
//!
//! ```toml
//! name = "Casa Australis"
//! logo = "https://example.com/logo.png"
//!
//! [hero]
//! title = "Bienvenidos a Casa Australis"
//! description = "Markdown **allowed**."
//! image = "https://example.com/hero.jpg"
//!
//! [[hero.links]]
//! kind = "messaging"            # messaging | booking | map
//! label = "Contactar por WhatsApp"
//! href = "https://api.whatsapp.com/send/?phone=..."
//!
//! [[menu]]
//! href = "#services"            # must be a rendered section anchor
//! label = "Servicios"
//!
//! [services]
//! title = "Lo que te espera"
//! [[services.amenities]]
//! icon = "wifi"
//! name = "WiFi de alta velocidad"
//!
//! [location]                    # optional section
//! title = "..."
//! subtitle = "..."
//! body = "Markdown paragraphs"
//! image = "https://..."
//! map_url = "https://maps.app.goo.gl/..."
//!
//! [testimonials]
//! title = "..."
//! [[testimonials.items]]
//! name = "Ana Silva"
//! comment = "..."
//! rating = 5                    # 1-5
//!
//! [gallery]
//! title = "..."
//! images = ["https://...", "https://..."]
//!
//! [inquiry]                     # optional, Spanish defaults
//! title = "Consulta disponibilidad"
//!
//! [footer]                      # optional
//! text = "© 2024 Casa Australis. Todos los derechos reservados."
//! credit = { prefix = "Desarrollado por", label = "Studio88", href = "https://..." }
//! ```
//!
//! Unknown keys are rejected, like in `config.toml`.

use crate::types::{Amenity, ExternalLink, MenuItem, SECTION_ANCHORS, Testimonial};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CONTENT_FILE: &str = "site.toml";

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("content file not found: {0}")]
    Missing(PathBuf),
    #[error("Content validation error: {0}")]
    Validation(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteContent {
    /// Property name, used in the title, logo alt text and footer.
    pub name: String,
    #[serde(default)]
    pub logo: Option<String>,
    pub hero: Hero,
    #[serde(default)]
    pub menu: Vec<MenuItem>,
    #[serde(default)]
    pub services: Services,
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub testimonials: Testimonials,
    #[serde(default)]
    pub gallery: Gallery,
    #[serde(default)]
    pub inquiry: InquiryCopy,
    #[serde(default)]
    pub footer: Footer,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Hero {
    pub title: String,
    /// Markdown.
    #[serde(default)]
    pub description: String,
    /// Background image URL.
    pub image: String,
    #[serde(default)]
    pub links: Vec<ExternalLink>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Services {
    pub title: String,
    pub amenities: Vec<Amenity>,
}

impl Default for Services {
    fn default() -> Self {
        Self {
            title: "Servicios".to_string(),
            amenities: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Location {
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    /// Markdown.
    pub body: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub map_url: Option<String>,
    #[serde(default = "default_map_label")]
    pub map_label: String,
}

fn default_map_label() -> String {
    "Ver ubicación".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Testimonials {
    pub title: String,
    pub items: Vec<Testimonial>,
}

impl Default for Testimonials {
    fn default() -> Self {
        Self {
            title: "Lo que dicen nuestros huéspedes".to_string(),
            items: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Gallery {
    pub title: String,
    /// Image URLs in display order. Lightbox navigation wraps over this list.
    pub images: Vec<String>,
}

impl Default for Gallery {
    fn default() -> Self {
        Self {
            title: "Galería".to_string(),
            images: Vec::new(),
        }
    }
}

/// Copy around the inquiry form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct InquiryCopy {
    pub title: String,
    pub submit_label: String,
    pub sending_label: String,
}

impl Default for InquiryCopy {
    fn default() -> Self {
        Self {
            title: "Consulta disponibilidad".to_string(),
            submit_label: "Enviar consulta".to_string(),
            sending_label: "Enviando...".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Footer {
    /// Defaults to `© {name}` when absent.
    pub text: Option<String>,
    pub credit: Option<Credit>,
}

/// "Made by" line under the footer text.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Credit {
    pub prefix: String,
    pub label: String,
    pub href: String,
}

impl SiteContent {
    /// Whether the section behind `anchor` ends up on the page.
    pub fn renders_section(&self, anchor: &str) -> bool {
        match anchor {
            "#services" => !self.services.amenities.is_empty(),
            "#location" => self.location.is_some(),
            "#testimonials" => !self.testimonials.items.is_empty(),
            "#gallery" => !self.gallery.images.is_empty(),
            "#inquiry" => true,
            _ => false,
        }
    }

    pub fn validate(&self) -> Result<(), ContentError> {
        if self.name.trim().is_empty() {
            return invalid("name must not be empty");
        }
        if self.hero.title.trim().is_empty() {
            return invalid("hero.title must not be empty");
        }
        if self.hero.image.trim().is_empty() {
            return invalid("hero.image must not be empty");
        }
        for link in &self.hero.links {
            if !is_outbound_url(&link.href) {
                return invalid(format!(
                    "hero link {:?} must be an absolute URL, got {:?}",
                    link.label, link.href
                ));
            }
        }
        for item in &self.menu {
            if !SECTION_ANCHORS.contains(&item.href.as_str()) {
                return invalid(format!(
                    "menu item {:?} must point at one of {}, got {:?}",
                    item.label,
                    SECTION_ANCHORS.join(", "),
                    item.href
                ));
            }
            if !self.renders_section(&item.href) {
                return invalid(format!(
                    "menu item {:?} points at {}, which has no content",
                    item.label, item.href
                ));
            }
        }
        if let Some(url) = self.location.as_ref().and_then(|l| l.map_url.as_ref()) {
            if !is_outbound_url(url) {
                return invalid(format!(
                    "location.map_url must be an absolute URL, got {url:?}"
                ));
            }
        }
        for testimonial in &self.testimonials.items {
            if !(1..=5).contains(&testimonial.rating) {
                return invalid(format!(
                    "testimonial by {:?} has rating {}, expected 1-5",
                    testimonial.name, testimonial.rating
                ));
            }
        }
        if let Some(credit) = &self.footer.credit {
            if !is_outbound_url(&credit.href) {
                return invalid(format!(
                    "footer.credit.href must be an absolute URL, got {:?}",
                    credit.href
                ));
            }
        }
        if let Some(pos) = self.gallery.images.iter().position(|u| u.trim().is_empty()) {
            return invalid(format!("gallery.images[{pos}] is empty"));
        }
        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> Result<(), ContentError> {
    Err(ContentError::Validation(message.into()))
}

fn is_outbound_url(href: &str) -> bool {
    ["https://", "http://", "mailto:", "tel:"]
        .iter()
        .any(|scheme| href.starts_with(scheme))
}

/// Parse and validate `site.toml` text.
pub fn parse(text: &str) -> Result<SiteContent, ContentError> {
    let content: SiteContent = toml::from_str(text)?;
    content.validate()?;
    Ok(content)
}

/// Load `site.toml` from the content directory.
pub fn load(root: &Path) -> Result<SiteContent, ContentError> {
    let path = root.join(CONTENT_FILE);
    if !path.exists() {
        return Err(ContentError::Missing(path));
    }
    let text = fs::read_to_string(&path)?;
    let content = parse(&text)?;
    tracing::debug!(
        name = %content.name,
        amenities = content.services.amenities.len(),
        testimonials = content.testimonials.items.len(),
        images = content.gallery.images.len(),
        "content loaded"
    );
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{SAMPLE_SITE_TOML, minimal_site_toml, sample_content};
    use crate::types::{AmenityIcon, LinkKind};
    use tempfile::TempDir;

    #[test]
    fn sample_content_parses() {
        let content = sample_content();
        assert_eq!(content.name, "Casa Australis");
        assert_eq!(content.services.amenities.len(), 8);
        assert_eq!(content.services.amenities[0].icon, AmenityIcon::Wifi);
        assert_eq!(content.testimonials.items.len(), 4);
        assert_eq!(content.gallery.images.len(), 9);
        assert_eq!(content.hero.links.len(), 3);
        assert_eq!(content.hero.links[1].kind, LinkKind::Booking);
        assert_eq!(content.menu.len(), 4);
    }

    #[test]
    fn minimal_content_uses_defaults() {
        let content = parse(&minimal_site_toml()).unwrap();
        assert!(content.menu.is_empty());
        assert!(content.location.is_none());
        assert_eq!(content.inquiry.title, "Consulta disponibilidad");
        assert_eq!(content.inquiry.sending_label, "Enviando...");
    }

    #[test]
    fn load_reads_site_toml() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONTENT_FILE), SAMPLE_SITE_TOML).unwrap();
        let content = load(tmp.path()).unwrap();
        assert_eq!(content.name, "Casa Australis");
    }

    #[test]
    fn load_without_file_is_missing() {
        let tmp = TempDir::new().unwrap();
        assert!(matches!(load(tmp.path()), Err(ContentError::Missing(_))));
    }

    #[test]
    fn unknown_key_rejected() {
        let text = format!("{}\ntagline = \"x\"\n", minimal_site_toml());
        // lands inside [hero]
        assert!(matches!(parse(&text), Err(ContentError::Toml(_))));
    }

    #[test]
    fn rating_out_of_range_rejected() {
        let text = format!(
            "{}\n[testimonials]\n[[testimonials.items]]\nname = \"X\"\ncomment = \"y\"\nrating = 6\n",
            minimal_site_toml()
        );
        let err = parse(&text).unwrap_err();
        assert!(err.to_string().contains("rating 6"));
    }

    #[test]
    fn zero_rating_rejected() {
        let text = format!(
            "{}\n[testimonials]\n[[testimonials.items]]\nname = \"X\"\ncomment = \"y\"\nrating = 0\n",
            minimal_site_toml()
        );
        assert!(parse(&text).is_err());
    }

    #[test]
    fn menu_must_use_section_anchor() {
        let text = format!(
            "{}\n[[menu]]\nhref = \"/reservas\"\nlabel = \"Reservas\"\n",
            minimal_site_toml()
        );
        let err = parse(&text).unwrap_err();
        assert!(err.to_string().contains("/reservas"));
    }

    #[test]
    fn menu_anchor_must_have_content() {
        let text = format!(
            "{}\n[[menu]]\nhref = \"#gallery\"\nlabel = \"Galería\"\n",
            minimal_site_toml()
        );
        let err = parse(&text).unwrap_err();
        assert!(err.to_string().contains("no content"));
    }

    #[test]
    fn inquiry_anchor_always_renders() {
        let text = format!(
            "{}\n[[menu]]\nhref = \"#inquiry\"\nlabel = \"Consulta\"\n",
            minimal_site_toml()
        );
        assert!(parse(&text).is_ok());
    }

    #[test]
    fn relative_hero_link_rejected() {
        let mut content = sample_content();
        content.hero.links[0].href = "whatsapp".to_string();
        assert!(content.validate().is_err());
    }

    #[test]
    fn tel_and_mailto_links_allowed() {
        let mut content = sample_content();
        content.hero.links[0].href = "tel:+5492800000000".to_string();
        content.hero.links[1].href = "mailto:host@example.com".to_string();
        assert!(content.validate().is_ok());
    }

    #[test]
    fn empty_gallery_url_rejected() {
        let mut content = sample_content();
        content.gallery.images[3] = " ".to_string();
        let err = content.validate().unwrap_err();
        assert!(err.to_string().contains("gallery.images[3]"));
    }

    #[test]
    fn blank_name_rejected() {
        let mut content = sample_content();
        content.name = "  ".to_string();
        assert!(content.validate().is_err());
    }

    #[test]
    fn footer_credit_parses() {
        let content = sample_content();
        let credit = content.footer.credit.unwrap();
        assert_eq!(credit.label, "Studio88");
        assert!(content.footer.text.unwrap().contains("Casa Australis"));
    }

    #[test]
    fn footer_defaults_to_empty() {
        let content = parse(&minimal_site_toml()).unwrap();
        assert!(content.footer.text.is_none());
        assert!(content.footer.credit.is_none());
    }

    #[test]
    fn renders_section_tracks_content() {
        let mut content = sample_content();
        assert!(content.renders_section("#gallery"));
        content.gallery.images.clear();
        assert!(!content.renders_section("#gallery"));
        assert!(!content.renders_section("#nowhere"));
    }
}
