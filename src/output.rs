//! CLI output formatting for every command.
//!
//! # Information-First Display
//!
//! Output leads with what the visitor will see (section titles, counts, link
//! labels) and shows files and URLs as indented context lines.
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Site
//!     Casa Australis
//!     Source: content/site.toml
//!
//! Sections
//! 001 #inquiry Consultá disponibilidad
//! 002 #services Servicios (8 amenities)
//! 003 #location Ubicación
//! 004 #testimonials Reseñas (4 reviews)
//! 005 #gallery Galería (9 images)
//!
//! Menu
//! 001 Servicios → #services
//!
//! Links
//! 001 WhatsApp [messaging]
//!     https://api.whatsapp.com/...
//!
//! Config
//!     config.toml
//!     assets/
//!     Email: service_vnk7sbc / template_yxsestj
//! ```
//!
//! ## Build
//!
//! ```text
//! Home → index.html
//!     Sections: #inquiry #services #location #testimonials #gallery
//!     Gallery: 9 images, 9 lightbox overlays
//!     Assets: 1 file copied
//! ```
//!
//! ## Send
//!
//! ```text
//! Inquiry not sent
//!     first name: El nombre es requerido
//!     dates: Ambas fechas son requeridas
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects. What `check` needs to know about the
//! content directory is gathered up front by [`SourceLayout::inspect`].

use crate::config::SiteConfig;
use crate::content::{CONTENT_FILE, SiteContent};
use crate::generate::GenerateReport;
use crate::inquiry::{FormErrors, Notice};
use crate::types::LinkKind;
use std::path::Path;

// ============================================================================
// Shared helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// `1 image`, `9 images`.
fn plural(n: usize, singular: &str, plural: &str) -> String {
    if n == 1 {
        format!("{n} {singular}")
    } else {
        format!("{n} {plural}")
    }
}

fn kind_label(kind: LinkKind) -> &'static str {
    match kind {
        LinkKind::Messaging => "messaging",
        LinkKind::Booking => "booking",
        LinkKind::Map => "map",
    }
}

/// One line per rendered section: anchor, heading and item count.
fn section_lines(content: &SiteContent) -> Vec<String> {
    let mut rows: Vec<(&str, &str, Option<String>)> = Vec::new();
    rows.push(("#inquiry", content.inquiry.title.as_str(), None));
    if content.renders_section("#services") {
        rows.push((
            "#services",
            content.services.title.as_str(),
            Some(plural(content.services.amenities.len(), "amenity", "amenities")),
        ));
    }
    if let Some(location) = &content.location {
        rows.push(("#location", location.title.as_str(), None));
    }
    if content.renders_section("#testimonials") {
        rows.push((
            "#testimonials",
            content.testimonials.title.as_str(),
            Some(plural(content.testimonials.items.len(), "review", "reviews")),
        ));
    }
    if content.renders_section("#gallery") {
        rows.push((
            "#gallery",
            content.gallery.title.as_str(),
            Some(plural(content.gallery.images.len(), "image", "images")),
        ));
    }

    rows.into_iter()
        .enumerate()
        .map(|(i, (anchor, title, count))| match count {
            Some(count) => format!("{} {} {} ({})", format_index(i + 1), anchor, title, count),
            None => format!("{} {} {}", format_index(i + 1), anchor, title),
        })
        .collect()
}

// ============================================================================
// check
// ============================================================================

/// Which optional files the content directory has.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SourceLayout {
    pub config_file: bool,
    pub assets_dir: bool,
}

impl SourceLayout {
    pub fn inspect(source_root: &Path, config: &SiteConfig) -> Self {
        Self {
            config_file: source_root.join("config.toml").is_file(),
            assets_dir: source_root.join(&config.assets_dir).is_dir(),
        }
    }
}

/// Format the content inventory shown by `check`.
pub fn format_check_output(
    content: &SiteContent,
    config: &SiteConfig,
    source_root: &Path,
    layout: SourceLayout,
) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("Site".to_string());
    lines.push(format!("{}{}", indent(1), content.name));
    lines.push(format!(
        "{}Source: {}",
        indent(1),
        source_root.join(CONTENT_FILE).display()
    ));
    lines.push(String::new());

    lines.push("Sections".to_string());
    lines.extend(section_lines(content));

    if !content.menu.is_empty() {
        lines.push(String::new());
        lines.push("Menu".to_string());
        for (i, item) in content.menu.iter().enumerate() {
            lines.push(format!(
                "{} {} \u{2192} {}",
                format_index(i + 1),
                item.label,
                item.href
            ));
        }
    }

    if !content.hero.links.is_empty() {
        lines.push(String::new());
        lines.push("Links".to_string());
        for (i, link) in content.hero.links.iter().enumerate() {
            lines.push(format!(
                "{} {} [{}]",
                format_index(i + 1),
                link.label,
                kind_label(link.kind)
            ));
            lines.push(format!("{}{}", indent(1), link.href));
        }
    }

    lines.push(String::new());
    lines.push("Config".to_string());
    if layout.config_file {
        lines.push(format!("{}config.toml", indent(1)));
    } else {
        lines.push(format!("{}(stock defaults)", indent(1)));
    }
    if layout.assets_dir {
        lines.push(format!("{}{}/", indent(1), config.assets_dir));
    }
    match config.email.missing_field() {
        None => lines.push(format!(
            "{}Email: {} / {}",
            indent(1),
            config.email.service_id,
            config.email.template_id
        )),
        Some(field) => lines.push(format!(
            "{}Email: not configured ({} is empty)",
            indent(1),
            field
        )),
    }

    lines
}

pub fn print_check_output(content: &SiteContent, config: &SiteConfig, source_root: &Path) {
    let layout = SourceLayout::inspect(source_root, config);
    for line in format_check_output(content, config, source_root, layout) {
        println!("{}", line);
    }
}

// ============================================================================
// build
// ============================================================================

/// Format the summary of a finished build.
pub fn format_build_output(report: &GenerateReport, output_root: &Path) -> Vec<String> {
    let mut lines = Vec::new();

    let index = report
        .index
        .strip_prefix(output_root)
        .unwrap_or(&report.index);
    lines.push(format!("Home \u{2192} {}", index.display()));
    lines.push(format!("{}Sections: {}", indent(1), report.sections.join(" ")));
    if report.gallery_images > 0 {
        lines.push(format!(
            "{}Gallery: {}, {}",
            indent(1),
            plural(report.gallery_images, "image", "images"),
            plural(report.gallery_images, "lightbox overlay", "lightbox overlays")
        ));
    }
    lines.push(format!(
        "{}Assets: {} copied",
        indent(1),
        plural(report.assets_copied, "file", "files")
    ));
    if !report.email_configured {
        lines.push(format!(
            "{}Warning: email service not configured, the form cannot send",
            indent(1)
        ));
    }

    lines
}

pub fn print_build_output(report: &GenerateReport, output_root: &Path) {
    for line in format_build_output(report, output_root) {
        println!("{}", line);
    }
}

// ============================================================================
// send
// ============================================================================

/// Format the per-field messages of a blocked submission.
pub fn format_inquiry_errors(errors: &FormErrors) -> Vec<String> {
    let mut lines = vec!["Inquiry not sent".to_string()];
    for (field, message) in errors.iter() {
        lines.push(format!("{}{}: {}", indent(1), field.label(), message));
    }
    lines
}

pub fn print_inquiry_errors(errors: &FormErrors) {
    for line in format_inquiry_errors(errors) {
        println!("{}", line);
    }
}

/// Format the guest-facing message after a delivery attempt.
pub fn format_notice(notice: Notice) -> Vec<String> {
    let heading = match notice {
        Notice::Confirmation => "Inquiry sent",
        Notice::RetryLater => "Inquiry failed",
    };
    vec![
        heading.to_string(),
        format!("{}{}", indent(1), notice.message()),
    ]
}

pub fn print_notice(notice: Notice) {
    for line in format_notice(notice) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
