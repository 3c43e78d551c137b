//! Shared content types.
//!
//! These are deserialized from `site.toml` by [`crate::content`] and consumed
//! by [`crate::generate`] and [`crate::output`].

use serde::{Deserialize, Serialize};

/// In-page anchors that the generated page exposes. Menu items may only
/// point at one of these.
pub const SECTION_ANCHORS: [&str; 5] = [
    "#services",
    "#location",
    "#testimonials",
    "#gallery",
    "#inquiry",
];

/// One entry of the header navigation (desktop bar and mobile overlay).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MenuItem {
    /// In-page anchor, e.g. `#gallery`.
    pub href: String,
    pub label: String,
}

/// Icon shown above an amenity name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AmenityIcon {
    Wifi,
    Tv,
    Kitchen,
    Parking,
    Bedding,
    PrivateEntrance,
    SingleFloor,
    HotWater,
    Heating,
    Garden,
}

impl AmenityIcon {
    /// Glyph rendered in the amenity card.
    pub fn glyph(self) -> &'static str {
        match self {
            AmenityIcon::Wifi => "📶",
            AmenityIcon::Tv => "📺",
            AmenityIcon::Kitchen => "🍳",
            AmenityIcon::Parking => "🚗",
            AmenityIcon::Bedding => "🛏",
            AmenityIcon::PrivateEntrance => "🚪",
            AmenityIcon::SingleFloor => "🏠",
            AmenityIcon::HotWater => "💧",
            AmenityIcon::Heating => "🔥",
            AmenityIcon::Garden => "🌲",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Amenity {
    pub icon: AmenityIcon,
    pub name: String,
}

/// A guest review. `rating` is a whole number of stars, 1 to 5.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Testimonial {
    pub name: String,
    pub comment: String,
    pub rating: u8,
}

/// Style of an outbound call-to-action button in the hero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LinkKind {
    Messaging,
    Booking,
    Map,
}

impl LinkKind {
    pub fn css_class(self) -> &'static str {
        match self {
            LinkKind::Messaging => "cta-messaging",
            LinkKind::Booking => "cta-booking",
            LinkKind::Map => "cta-map",
        }
    }
}

/// An external link (messaging deep link, booking listing, map).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExternalLink {
    pub kind: LinkKind,
    pub label: String,
    pub href: String,
}
