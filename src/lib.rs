//! # Rental Site
//!
//! A static landing page generator for a single holiday rental, plus the
//! small state machines that drive the page's interactive parts.
//!
//! One `site.toml` describes the property. The build renders a single HTML
//! page: hero with outbound booking links, an availability inquiry form,
//! amenities, location, reviews and a photo gallery with a lightbox.
//!
//! # Architecture
//!
//! ```text
//! content/site.toml ─> content::load ─┐
//! content/config.toml ─> config::load_config ─┴─> generate::generate ─> dist/index.html
//!
//! CLI flags ─> InquiryForm ─> InquiryDesk::submit ─> Mailer (EmailJS REST)
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`content`] | `site.toml` loading and validation: copy, menu, amenities, reviews, gallery |
//! | [`config`] | `config.toml` loading over stock defaults, palette CSS, email service ids |
//! | [`generate`] | Renders the page with Maud and copies static assets |
//! | [`inquiry`] | Inquiry form validation and the submit/sending/result state machine |
//! | [`mailer`] | The `Mailer` seam and the EmailJS client behind it |
//! | [`lightbox`] | Gallery overlay selection with wrap-around navigation |
//! | [`menu`] | Mobile navigation open/closed state |
//! | [`types`] | Content types shared by the modules above |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## One Page, No Framework
//!
//! The menu is a checkbox, the lightbox is a set of `:target` overlays, and a
//! short embedded script adds keyboard navigation and form submission. The
//! page works from any static file host.
//!
//! ## State Machines in Rust
//!
//! [`lightbox::Lightbox`], [`menu::NavMenu`] and [`inquiry::InquiryDesk`]
//! hold the interaction rules. The generator wires overlay links from
//! `Lightbox`, and the `send` command drives `InquiryDesk` for real. The
//! embedded script reads its messages from attributes the generator writes, so
//! the Spanish copy lives in one place.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/): malformed markup
//! is a build error and all interpolation is auto-escaped.

pub mod config;
pub mod content;
pub mod generate;
pub mod inquiry;
pub mod lightbox;
pub mod mailer;
pub mod menu;
pub mod output;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
