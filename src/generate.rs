//! HTML site generation.
//!
//! Takes the loaded content and configuration and writes a single-page site.
//!
//! ## Page Layout
//!
//! ```text
//! header      logo, desktop nav, hamburger + mobile overlay
//! #top        hero: background image, copy, outbound buttons
//! #inquiry    availability form
//! #services   amenity grid
//! #location   area description, image, map link
//! #testimonials
//! #gallery    thumbnail grid + one lightbox overlay per image
//! footer
//! ```
//!
//! Sections without content are left out.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html        # Everything inline: CSS, script, markup
//! └── ...               # Files copied from content/assets/
//! ```
//!
//! ## Interactivity Without a Framework
//!
//! - **Menu**: a hidden checkbox drives the mobile overlay; labels toggle it
//!   and the script unchecks it when a link is followed.
//! - **Lightbox**: each image has an overlay addressed by `#photo-N` and shown
//!   with `:target`. Previous/next links are wired from [`Lightbox`], so they
//!   wrap around the ends. The script adds arrow-key and Escape handling.
//! - **Inquiry form**: the script validates with the same messages as
//!   [`crate::inquiry`] (passed through `data-msg-*` attributes) and posts to
//!   the email service configured in `config.toml`.
//!
//! ## CSS and JavaScript
//!
//! Static assets are embedded at compile time:
//! - `static/style.css`: Base styles (palette injected from config)
//! - `static/site.js`: Menu, lightbox keyboard navigation, inquiry submission

use crate::config::{self, EmailConfig, SiteConfig};
use crate::content::{Footer, InquiryCopy, Location, SiteContent};
use crate::inquiry::{DATE_FORMAT, Field, messages};
use crate::lightbox::{Lightbox, LightboxError};
use crate::menu::NavMenu;
use crate::types::{Amenity, ExternalLink, MenuItem, Testimonial};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Event, Parser, TagEnd, html as md_html};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("asset walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("gallery error: {0}")]
    Lightbox(#[from] LightboxError),
}

/// What a build produced.
#[derive(Debug)]
pub struct GenerateReport {
    pub index: PathBuf,
    /// Section anchors rendered, in page order.
    pub sections: Vec<&'static str>,
    pub gallery_images: usize,
    pub assets_copied: usize,
    pub email_configured: bool,
}

const CSS_STATIC: &str = include_str!("../static/style.css");
const JS: &str = include_str!("../static/site.js");

/// Page order of the optional sections.
const PAGE_ORDER: [&str; 5] = [
    "#inquiry",
    "#services",
    "#location",
    "#testimonials",
    "#gallery",
];

pub fn generate(
    content: &SiteContent,
    config: &SiteConfig,
    source_dir: &Path,
    output_dir: &Path,
) -> Result<GenerateReport, GenerateError> {
    if let Some(field) = config.email.missing_field() {
        tracing::warn!(
            field,
            "email service is not configured; the inquiry form will not be able to send"
        );
    }

    fs::create_dir_all(output_dir)?;

    let page = render_page(content, config)?;
    let index = output_dir.join("index.html");
    fs::write(&index, page.into_string())?;
    tracing::debug!(path = %index.display(), "wrote index.html");

    let assets_dir = source_dir.join(&config.assets_dir);
    let assets_copied = if assets_dir.is_dir() {
        copy_assets(&assets_dir, output_dir)?
    } else {
        0
    };

    Ok(GenerateReport {
        index,
        sections: PAGE_ORDER
            .into_iter()
            .filter(|anchor| content.renders_section(anchor))
            .collect(),
        gallery_images: content.gallery.images.len(),
        assets_copied,
        email_configured: config.email.is_configured(),
    })
}

/// Copy every file under `src` into `dst`, keeping relative paths.
fn copy_assets(src: &Path, dst: &Path) -> Result<usize, GenerateError> {
    let mut copied = 0;
    for entry in WalkDir::new(src).min_depth(1) {
        let entry = entry?;
        let Ok(relative) = entry.path().strip_prefix(src) else {
            continue;
        };
        let target = dst.join(relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }
    tracing::debug!(copied, from = %src.display(), "copied assets");
    Ok(copied)
}

fn markdown_to_html(markdown: &str) -> String {
    let mut out = String::new();
    md_html::push_html(&mut out, Parser::new(markdown));
    out
}

/// Visible text of `markdown` on one line, for `<meta>` content.
fn markdown_to_text(markdown: &str) -> String {
    let mut out = String::new();
    for event in Parser::new(markdown) {
        match event {
            Event::Text(text) | Event::Code(text) => out.push_str(&text),
            Event::SoftBreak
            | Event::HardBreak
            | Event::End(TagEnd::Paragraph | TagEnd::Heading(_) | TagEnd::Item) => out.push(' '),
            _ => {}
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn photo_anchor(index: usize) -> String {
    format!("photo-{}", index + 1)
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(
    title: &str,
    config: &SiteConfig,
    description: Option<&str>,
    content: Markup,
) -> Markup {
    let css = format!(
        "{}\n\n{}",
        config::generate_theme_css(&config.colors, &config.typography),
        CSS_STATIC
    );
    html! {
        (DOCTYPE)
        html lang=(config.lang) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                @if let Some(description) = description {
                    meta name="description" content=(description);
                }
                @if let Some(sheet) = &config.typography.stylesheet {
                    link rel="stylesheet" href=(sheet);
                }
                style { (PreEscaped(css)) }
            }
            body {
                (content)
                script { (PreEscaped(JS)) }
            }
        }
    }
}

/// Renders the header: brand, desktop links and the mobile menu.
fn site_header(content: &SiteContent, menu: &NavMenu) -> Markup {
    html! {
        header.site-header {
            a.brand href="#top" {
                @if let Some(logo) = &content.logo {
                    img.brand-logo src=(logo) alt={ (content.name) " logo" };
                } @else {
                    span.brand-name { (content.name) }
                }
            }
            @if !content.menu.is_empty() {
                nav.desktop-nav {
                    @for item in &content.menu {
                        a href=(item.href) { (item.label) }
                    }
                }
                (render_nav(&content.menu, menu))
            }
        }
    }
}

/// Renders the mobile navigation: hamburger, backdrop and sliding panel.
///
/// `menu` decides whether the overlay starts open.
pub fn render_nav(items: &[MenuItem], menu: &NavMenu) -> Markup {
    html! {
        input.nav-toggle type="checkbox" id="nav-toggle" checked[menu.is_open()];
        label.nav-hamburger for="nav-toggle" aria-label="Menú" {
            span.hamburger-line {}
            span.hamburger-line {}
            span.hamburger-line {}
        }
        div.nav-overlay {
            label.nav-backdrop for="nav-toggle" {}
            nav.nav-panel {
                label.nav-close for="nav-toggle" { "×" }
                ul {
                    @for item in items {
                        li { a.nav-link href=(item.href) { (item.label) } }
                    }
                }
            }
        }
    }
}

fn render_cta(link: &ExternalLink) -> Markup {
    html! {
        a class={ "cta " (link.kind.css_class()) } href=(link.href) target="_blank" rel="noopener noreferrer" {
            (link.label)
        }
    }
}

// ============================================================================
// Sections
// ============================================================================

fn render_hero(content: &SiteContent, email: &EmailConfig) -> Markup {
    let hero = &content.hero;
    html! {
        section.hero id="top" {
            img.hero-image src=(hero.image) alt=(content.name);
            div.hero-overlay {
                div.hero-copy {
                    h1 { (hero.title) }
                    @if !hero.description.trim().is_empty() {
                        div.hero-description { (PreEscaped(markdown_to_html(&hero.description))) }
                    }
                    @if !hero.links.is_empty() {
                        div.hero-links {
                            @for link in &hero.links {
                                (render_cta(link))
                            }
                        }
                    }
                }
                (render_inquiry_form(&content.inquiry, email))
            }
        }
    }
}

fn field_slug(field: Field) -> &'static str {
    match field {
        Field::FirstName => "first-name",
        Field::LastName => "last-name",
        Field::Email => "email",
        Field::Dates => "dates",
    }
}

fn error_slot(field: Field) -> Markup {
    html! {
        p.field-error data-error-for=(field_slug(field)) role="alert" {}
    }
}

fn text_input(name: &str, label: &str, kind: &str, error: Option<Field>) -> Markup {
    let id = format!("inquiry-{name}");
    html! {
        div.form-field {
            label for=(id) { (label) }
            input id=(id) type=(kind) name=(name);
            @if let Some(field) = error {
                (error_slot(field))
            }
        }
    }
}

/// Renders the availability form.
///
/// Input names are the email template's parameter keys, so the script can
/// build the template parameters straight from the form.
pub fn render_inquiry_form(copy: &InquiryCopy, email: &EmailConfig) -> Markup {
    html! {
        section.inquiry id="inquiry" {
            h2 { (copy.title) }
            form.inquiry-form novalidate
                data-endpoint=(email.endpoint)
                data-service-id=(email.service_id)
                data-template-id=(email.template_id)
                data-public-key=(email.public_key)
                data-date-format=(DATE_FORMAT)
                data-msg-first-name=(messages::FIRST_NAME_REQUIRED)
                data-msg-last-name=(messages::LAST_NAME_REQUIRED)
                data-msg-email-required=(messages::EMAIL_REQUIRED)
                data-msg-email-invalid=(messages::EMAIL_INVALID)
                data-msg-dates-required=(messages::DATES_REQUIRED)
                data-msg-dates-reversed=(messages::DATES_REVERSED)
                data-msg-confirmation=(messages::CONFIRMATION)
                data-msg-retry=(messages::RETRY_LATER)
                data-phone-placeholder=(messages::PHONE_PLACEHOLDER)
                data-submit-label=(copy.submit_label)
                data-sending-label=(copy.sending_label)
            {
                (text_input("nombre", "Nombre *", "text", Some(Field::FirstName)))
                (text_input("apellido", "Apellido *", "text", Some(Field::LastName)))
                (text_input("email", "Email *", "email", Some(Field::Email)))
                (text_input("telefono", "Teléfono (opcional)", "tel", None))
                div.date-range {
                    (text_input("fecha_llegada", "Fecha de llegada *", "date", None))
                    (text_input("fecha_salida", "Fecha de salida *", "date", None))
                }
                (error_slot(Field::Dates))
                button.submit type="submit" { (copy.submit_label) }
                p.form-notice role="status" aria-live="polite" {}
            }
        }
    }
}

fn render_services(title: &str, amenities: &[Amenity]) -> Markup {
    html! {
        section.services id="services" {
            h2 { (title) }
            div.amenity-grid {
                @for amenity in amenities {
                    div.amenity-card {
                        span.amenity-icon aria-hidden="true" { (amenity.icon.glyph()) }
                        h3 { (amenity.name) }
                    }
                }
            }
        }
    }
}

fn render_location(location: &Location) -> Markup {
    html! {
        section.location id="location" {
            h2 { (location.title) }
            div.location-grid {
                @if let Some(image) = &location.image {
                    img.location-image src=(image) alt=(location.title) loading="lazy";
                }
                div.location-copy {
                    @if let Some(subtitle) = &location.subtitle {
                        h3 { (subtitle) }
                    }
                    div.location-body { (PreEscaped(markdown_to_html(&location.body))) }
                    @if let Some(url) = &location.map_url {
                        a.map-link href=(url) target="_blank" rel="noopener noreferrer" {
                            (location.map_label)
                        }
                    }
                }
            }
        }
    }
}

fn render_testimonials(title: &str, items: &[Testimonial]) -> Markup {
    html! {
        section.testimonials id="testimonials" {
            h2 { (title) }
            div.testimonial-grid {
                @for testimonial in items {
                    figure.testimonial {
                        div.stars aria-label={ (testimonial.rating) " / 5" } {
                            @for _ in 0..testimonial.rating {
                                span.star { "★" }
                            }
                        }
                        blockquote { "\u{201c}" (testimonial.comment) "\u{201d}" }
                        figcaption { (testimonial.name) }
                    }
                }
            }
        }
    }
}

/// Renders the thumbnail grid followed by one overlay per image.
pub fn render_gallery(title: &str, images: &[String], name: &str) -> Result<Markup, GenerateError> {
    let overlays = render_lightbox(images, name)?;
    Ok(html! {
        section.gallery id="gallery" {
            h2 { (title) }
            div.gallery-grid {
                @for (i, url) in images.iter().enumerate() {
                    a.gallery-thumb href={ "#" (photo_anchor(i)) } {
                        img src=(url) alt={ (name) " " (i + 1) } loading="lazy";
                    }
                }
            }
        }
        (overlays)
    })
}

/// One `:target` overlay per image with wrapping previous/next links.
pub fn render_lightbox(images: &[String], name: &str) -> Result<Markup, GenerateError> {
    let lightbox = Lightbox::new(images.len());
    let mut frames = Vec::with_capacity(images.len());
    for i in 0..images.len() {
        let (prev, next) = lightbox.neighbours(i)?;
        frames.push((i, photo_anchor(prev), photo_anchor(next)));
    }

    Ok(html! {
        @for (i, prev, next) in &frames {
            div.lightbox id=(photo_anchor(*i)) data-prev={ "#" (prev) } data-next={ "#" (next) } {
                a.lightbox-backdrop href="#gallery" aria-label="Cerrar" {}
                figure.lightbox-frame {
                    img src=(images[*i]) alt={ (name) " " (i + 1) };
                    figcaption { (i + 1) " / " (images.len()) }
                }
                a.lightbox-prev href={ "#" (prev) } aria-label="Anterior" { "‹" }
                a.lightbox-next href={ "#" (next) } aria-label="Siguiente" { "›" }
                a.lightbox-close href="#gallery" aria-label="Cerrar" { "×" }
            }
        }
    })
}

fn render_footer(footer: &Footer, name: &str) -> Markup {
    html! {
        footer.site-footer {
            p {
                @if let Some(text) = &footer.text {
                    (text)
                } @else {
                    "© " (name)
                }
            }
            @if let Some(credit) = &footer.credit {
                p.credit {
                    (credit.prefix) " "
                    a href=(credit.href) target="_blank" rel="noopener noreferrer" { (credit.label) }
                }
            }
        }
    }
}

// ============================================================================
// Page Renderer
// ============================================================================

/// Renders the whole landing page.
pub fn render_page(content: &SiteContent, config: &SiteConfig) -> Result<Markup, GenerateError> {
    let gallery = if content.gallery.images.is_empty() {
        None
    } else {
        Some(render_gallery(
            &content.gallery.title,
            &content.gallery.images,
            &content.name,
        )?)
    };

    let body = html! {
        (site_header(content, &NavMenu::new()))
        main {
            (render_hero(content, &config.email))
            @if !content.services.amenities.is_empty() {
                (render_services(&content.services.title, &content.services.amenities))
            }
            @if let Some(location) = &content.location {
                (render_location(location))
            }
            @if !content.testimonials.items.is_empty() {
                (render_testimonials(&content.testimonials.title, &content.testimonials.items))
            }
            @if let Some(gallery) = gallery {
                (gallery)
            }
        }
        (render_footer(&content.footer, &content.name))
    };

    let description = markdown_to_text(&content.hero.description);
    let description = (!description.is_empty()).then_some(description.as_str());

    Ok(base_document(&content.name, config, description, body))
}

// ============================================================================
// Tests
// ============================================================================
