//! Closed clothing vocabularies and color math
//!
//! This module provides:
//! - The fixed category set and its Core/Optional partition
//! - Match tiers and the confidence-signal vocabularies (style family,
//!   formality, texture, color profile)
//! - Hex color parsing and circular hue distance used by scoring

use serde::{Deserialize, Serialize};

/// Clothing category, a closed set
///
/// Unknown category strings fail deserialization at the collaborator
/// boundary; gating of "uncertain" scans happens outside this core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Tops,
    Bottoms,
    Dresses,
    Skirts,
    Outerwear,
    Shoes,
    Bags,
    Accessories,
}

impl Category {
    /// Every category, used by partition checks and exhaustive tests
    pub const ALL: [Category; 8] = [
        Category::Tops,
        Category::Bottoms,
        Category::Dresses,
        Category::Skirts,
        Category::Outerwear,
        Category::Shoes,
        Category::Bags,
        Category::Accessories,
    ];

    /// Partition class of this category
    ///
    /// Total and disjoint by construction: a single exhaustive match, so a
    /// new category cannot be added without the compiler forcing a class.
    pub fn class(&self) -> CategoryClass {
        match self {
            Category::Tops
            | Category::Bottoms
            | Category::Shoes
            | Category::Dresses
            | Category::Skirts => CategoryClass::Core,
            Category::Outerwear | Category::Bags | Category::Accessories => CategoryClass::Optional,
        }
    }

    /// Whether this category participates in outfit-formula completeness
    pub fn is_core(&self) -> bool {
        self.class() == CategoryClass::Core
    }

    /// Noun used when building human-readable explanations
    pub fn noun(&self) -> &'static str {
        match self {
            Category::Tops => "top",
            Category::Bottoms => "bottoms",
            Category::Dresses => "dress",
            Category::Skirts => "skirt",
            Category::Outerwear => "layer",
            Category::Shoes => "shoes",
            Category::Bags => "bag",
            Category::Accessories => "accessory",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Tops => write!(f, "tops"),
            Category::Bottoms => write!(f, "bottoms"),
            Category::Dresses => write!(f, "dresses"),
            Category::Skirts => write!(f, "skirts"),
            Category::Outerwear => write!(f, "outerwear"),
            Category::Shoes => write!(f, "shoes"),
            Category::Bags => write!(f, "bags"),
            Category::Accessories => write!(f, "accessories"),
        }
    }
}

/// Partition class: Core categories fill outfit slots, Optional categories
/// attach as finishing touches and never block combo completeness
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryClass {
    Core,
    Optional,
}

/// Core slots of the outfit formula selected by the scanned item's category
///
/// The scanned item occupies its own slot when that slot appears in the
/// formula; optional-class scans decorate a fully wardrobe-filled formula.
/// Skirts borrow the bottoms-family three-slot formula with the skirt in the
/// bottoms position.
pub fn outfit_slots(scan: Category) -> &'static [Category] {
    match scan {
        Category::Dresses => &[Category::Dresses, Category::Shoes],
        Category::Skirts => &[Category::Tops, Category::Skirts, Category::Shoes],
        Category::Tops
        | Category::Bottoms
        | Category::Outerwear
        | Category::Shoes
        | Category::Bags
        | Category::Accessories => &[Category::Tops, Category::Bottoms, Category::Shoes],
    }
}

/// Match tier for a scored wardrobe pair
///
/// Ordered so that `High > Medium > Low`; tier assignment is monotone in the
/// underlying raw score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Tier {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tier::High => write!(f, "HIGH"),
            Tier::Medium => write!(f, "MEDIUM"),
            Tier::Low => write!(f, "LOW"),
        }
    }
}

/// Coarse color temperament from upstream analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorProfile {
    Neutral,
    Warm,
    Cool,
    Vivid,
}

/// Style family, a closed set used for alignment scoring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleFamily {
    Casual,
    Classic,
    Sporty,
    Edgy,
    Romantic,
    Minimal,
}

impl StyleFamily {
    /// Families that sit close enough to pair without friction
    pub fn is_adjacent(&self, other: StyleFamily) -> bool {
        use StyleFamily::*;
        matches!(
            (self, other),
            (Casual, Sporty)
                | (Sporty, Casual)
                | (Casual, Minimal)
                | (Minimal, Casual)
                | (Classic, Minimal)
                | (Minimal, Classic)
                | (Classic, Romantic)
                | (Romantic, Classic)
                | (Edgy, Minimal)
                | (Minimal, Edgy)
        )
    }
}

/// Formality level, ordered from loungewear to formal
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Formality {
    Lounge,
    Casual,
    SmartCasual,
    Business,
    Formal,
}

impl Formality {
    /// Ordinal rank used for proximity scoring
    pub fn rank(&self) -> u8 {
        match self {
            Formality::Lounge => 0,
            Formality::Casual => 1,
            Formality::SmartCasual => 2,
            Formality::Business => 3,
            Formality::Formal => 4,
        }
    }

    /// Absolute rank distance between two levels (0..=4)
    pub fn distance(&self, other: Formality) -> u8 {
        self.rank().abs_diff(other.rank())
    }
}

/// Texture type from upstream analysis, scoring input only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextureType {
    Smooth,
    Knit,
    Denim,
    Leather,
    Sheer,
    Structured,
}

/// A color as handed over by the image-analysis collaborator
///
/// Colors arrive ordered; the first entry is the dominant color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorRef {
    pub hex: String,
    #[serde(default)]
    pub name: String,
}

/// Color family bucket used for combo diversity round-robin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorFamily {
    Neutral,
    Red,
    Yellow,
    Green,
    Cyan,
    Blue,
    Magenta,
}

/// Color names treated as neutral regardless of hue
const NEUTRAL_NAMES: [&str; 9] = [
    "black", "white", "grey", "gray", "beige", "cream", "ivory", "tan", "khaki",
];

/// Parse a `#rrggbb` hex string into RGB bytes
///
/// Returns `None` for any malformed input; callers fall back to
/// neutral-compatible scoring rather than failing.
pub fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
    let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
    let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
    Some((r, g, b))
}

/// Hue in degrees (0..360) and saturation/value in 0..1 for RGB bytes
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> (f32, f32, f32) {
    let r = r as f32 / 255.0;
    let g = g as f32 / 255.0;
    let b = b as f32 / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let hue = if delta == 0.0 {
        0.0
    } else if max == r {
        60.0 * (((g - b) / delta).rem_euclid(6.0))
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };

    let saturation = if max == 0.0 { 0.0 } else { delta / max };
    (hue, saturation, max)
}

/// Circular distance between two hues in degrees (0..=180)
pub fn hue_distance(a: f32, b: f32) -> f32 {
    let diff = (a - b).abs() % 360.0;
    if diff > 180.0 {
        360.0 - diff
    } else {
        diff
    }
}

/// Whether a color reads as neutral (pairs with anything)
///
/// Low saturation, near-black/near-white values, and a small set of
/// conventionally neutral names all qualify.
pub fn is_neutral(color: &ColorRef) -> bool {
    let name = color.name.to_lowercase();
    if NEUTRAL_NAMES.iter().any(|n| name.contains(n)) {
        return true;
    }
    match parse_hex(&color.hex) {
        Some((r, g, b)) => {
            let (_, s, v) = rgb_to_hsv(r, g, b);
            s < 0.18 || v < 0.12 || (v > 0.92 && s < 0.25)
        }
        // Unparseable color: treat as neutral so scoring never punishes
        // malformed upstream data
        None => true,
    }
}

/// Dominant hue of a color, `None` when neutral or unparseable
pub fn dominant_hue(color: &ColorRef) -> Option<f32> {
    if is_neutral(color) {
        return None;
    }
    let (r, g, b) = parse_hex(&color.hex)?;
    let (h, _, _) = rgb_to_hsv(r, g, b);
    Some(h)
}

/// Bucket a color into its family for diversity round-robin
pub fn color_family(color: &ColorRef) -> ColorFamily {
    match dominant_hue(color) {
        None => ColorFamily::Neutral,
        Some(h) => match h as u32 {
            0..=29 | 330..=360 => ColorFamily::Red,
            30..=89 => ColorFamily::Yellow,
            90..=149 => ColorFamily::Green,
            150..=209 => ColorFamily::Cyan,
            210..=269 => ColorFamily::Blue,
            _ => ColorFamily::Magenta,
        },
    }
}
