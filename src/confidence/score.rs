// Pairwise scoring: category affinity, color compatibility, style alignment,
// formality proximity. Weighted per ScoringConfig; raw score bounded 0..=1.
use crate::catalog::{self, Category, ColorProfile, ColorRef, Tier};
use crate::config::ScoringConfig;
use crate::confidence::types::ScoreComponents;
use crate::item::{ScannedItem, SignalProfile, WardrobeItem};

/// Neutral baseline for components whose inputs are missing upstream
///
/// Uncertain signals neither reward nor punish; scoring degrades toward
/// category+color only, as required for partial records.
const UNCERTAIN: f32 = 0.5;

/// How well a wardrobe item's category complements the scanned category
///
/// A category filling one of the scan formula's open slots is the strongest
/// signal; optional-class finishing touches pair broadly; duplicates of the
/// scanned category rarely combine into one outfit.
pub fn category_affinity(scan: Category, other: Category) -> f32 {
    if other == scan {
        return 0.25;
    }
    let slots = catalog::outfit_slots(scan);
    if slots.contains(&other) {
        return 1.0;
    }
    match other.class() {
        catalog::CategoryClass::Optional => 0.7,
        // Core category outside the formula (e.g. dress against a scanned top)
        catalog::CategoryClass::Core => 0.35,
    }
}

/// Color compatibility from dominant hues
///
/// Neutral-to-anything is compatible. For two hued colors, analogous pairs
/// score best, complementary pairs keep a workable floor, and the awkward
/// middle distances fall off linearly.
pub fn color_compatibility(scan_colors: &[ColorRef], other_colors: &[ColorRef]) -> f32 {
    let scan_hue = scan_colors.first().and_then(catalog::dominant_hue);
    let other_hue = other_colors.first().and_then(catalog::dominant_hue);

    match (scan_hue, other_hue) {
        (Some(a), Some(b)) => {
            let dist = catalog::hue_distance(a, b);
            if dist <= 30.0 {
                0.95
            } else if dist >= 150.0 {
                0.78
            } else {
                0.9 - (dist - 30.0) / 120.0 * 0.5
            }
        }
        // At least one side neutral or missing: compatible
        _ => 0.9,
    }
}

/// Color score with the upstream color-profile metadata as a backstop
///
/// When the pixel colors give usable hues they win; otherwise the coarse
/// warm/cool/neutral profiles decide instead of falling straight to the
/// uncertain baseline.
fn color_score(scanned: &ScannedItem, item: &WardrobeItem) -> f32 {
    let hues_known = scanned.colors.first().and_then(catalog::dominant_hue).is_some()
        && item.colors.first().and_then(catalog::dominant_hue).is_some();
    if hues_known {
        return color_compatibility(&scanned.colors, &item.colors);
    }

    match (scanned.profile.color_profile, item.profile.color_profile) {
        (Some(ColorProfile::Neutral), _) | (_, Some(ColorProfile::Neutral)) => 0.9,
        (Some(a), Some(b)) if a == b => 0.9,
        (Some(ColorProfile::Warm), Some(ColorProfile::Cool))
        | (Some(ColorProfile::Cool), Some(ColorProfile::Warm)) => 0.6,
        (Some(ColorProfile::Vivid), Some(_)) | (Some(_), Some(ColorProfile::Vivid)) => 0.7,
        _ => color_compatibility(&scanned.colors, &item.colors),
    }
}

/// Style-family alignment, with a tag-overlap fallback when families are
/// missing from either profile
pub fn style_alignment(
    scan: &SignalProfile,
    scan_tags: &[String],
    other: &SignalProfile,
    other_tags: &[String],
) -> f32 {
    match (scan.style_family, other.style_family) {
        (Some(a), Some(b)) if a == b => 1.0,
        (Some(a), Some(b)) if a.is_adjacent(b) => 0.75,
        (Some(_), Some(_)) => 0.4,
        _ => {
            let overlap = scan_tags.iter().any(|t| other_tags.contains(t));
            if overlap {
                0.7
            } else {
                UNCERTAIN
            }
        }
    }
}

/// Formality proximity on the ordered lounge..formal scale
pub fn formality_proximity(scan: &SignalProfile, other: &SignalProfile) -> f32 {
    match (scan.formality, other.formality) {
        (Some(a), Some(b)) => match a.distance(b) {
            0 => 1.0,
            1 => 0.8,
            2 => 0.55,
            3 => 0.3,
            _ => 0.15,
        },
        _ => UNCERTAIN,
    }
}

/// Score one wardrobe item against the scanned item
pub fn score_pair(
    config: &ScoringConfig,
    scanned: &ScannedItem,
    item: &WardrobeItem,
) -> ScoreComponents {
    ScoreComponents {
        category: category_affinity(scanned.category, item.category) * config.category_weight,
        color: color_score(scanned, item) * config.color_weight,
        style: style_alignment(
            &scanned.profile,
            &scanned.style_tags,
            &item.profile,
            &item.style_tags,
        ) * config.style_weight,
        formality: formality_proximity(&scanned.profile, &item.profile) * config.formality_weight,
    }
}

/// Map a raw score to its tier via the two configured thresholds
///
/// Monotone by construction: a higher score can never land in a lower tier.
pub fn tier_for(score: f32, config: &ScoringConfig) -> Tier {
    if score >= config.high_threshold {
        Tier::High
    } else if score >= config.medium_threshold {
        Tier::Medium
    } else {
        Tier::Low
    }
}

/// Short reason naming the dominant component, attached to HIGH pairs
pub fn explain(config: &ScoringConfig, components: &ScoreComponents, category: Category) -> String {
    // Compare components on their unweighted 0..=1 scale so a small weight
    // doesn't hide a strong signal
    let normalized = [
        (
            components.category / config.category_weight,
            format!("fills the {} slot", category.noun()),
        ),
        (
            components.color / config.color_weight,
            "the colors sit close together".to_string(),
        ),
        (
            components.style / config.style_weight,
            "the styles speak the same language".to_string(),
        ),
        (
            components.formality / config.formality_weight,
            "the formality levels line up".to_string(),
        ),
    ];

    let (_, reason) = normalized
        .into_iter()
        .max_by(|(a, _), (b, _)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        .unwrap_or((0.0, "pairs well overall".to_string()));

    format!("Pairs well: {}", reason)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::item::ItemSignals;
    use uuid::Uuid;

    fn scanned_top() -> ScannedItem {
        ScannedItem {
            id: Uuid::new_v4(),
            category: Category::Tops,
            colors: vec![ColorRef {
                hex: "#1030e0".to_string(),
                name: "cobalt".to_string(),
            }],
            style_tags: vec!["casual".to_string()],
            signals: ItemSignals::default(),
            profile: SignalProfile::default(),
            context_sufficient: true,
            is_fashion_item: true,
        }
    }

    fn wardrobe(category: Category, hex: &str) -> WardrobeItem {
        WardrobeItem {
            id: Uuid::new_v4(),
            category,
            colors: vec![ColorRef {
                hex: hex.to_string(),
                name: String::new(),
            }],
            style_tags: vec![],
            profile: SignalProfile::default(),
            image_ref: None,
        }
    }

    #[test]
    fn test_category_affinity_prefers_formula_slots() {
        let bottoms = category_affinity(Category::Tops, Category::Bottoms);
        let bag = category_affinity(Category::Tops, Category::Bags);
        let another_top = category_affinity(Category::Tops, Category::Tops);

        assert!(bottoms > bag);
        assert!(bag > another_top);
    }

    #[test]
    fn test_neutral_color_always_compatible() {
        let blue = vec![ColorRef {
            hex: "#1030e0".to_string(),
            name: String::new(),
        }];
        let black = vec![ColorRef {
            hex: "#111111".to_string(),
            name: "black".to_string(),
        }];

        assert_eq!(color_compatibility(&blue, &black), 0.9);
        assert_eq!(color_compatibility(&black, &blue), 0.9);
    }

    #[test]
    fn test_clashing_hues_score_below_analogous() {
        let blue = vec![ColorRef {
            hex: "#1030e0".to_string(),
            name: String::new(),
        }];
        let teal = vec![ColorRef {
            hex: "#1090d0".to_string(),
            name: String::new(),
        }];
        let lime = vec![ColorRef {
            hex: "#70d010".to_string(),
            name: String::new(),
        }];

        let analogous = color_compatibility(&blue, &teal);
        let awkward = color_compatibility(&blue, &lime);
        assert!(analogous > awkward);
    }

    #[test]
    fn test_empty_colors_fall_back_to_compatible() {
        assert_eq!(color_compatibility(&[], &[]), 0.9);
    }

    #[test]
    fn test_color_profile_backstops_missing_hues() {
        let config = Config::default().scoring;

        let mut scanned = scanned_top();
        scanned.colors = vec![];
        scanned.profile.color_profile = Some(crate::catalog::ColorProfile::Warm);

        let mut warm = wardrobe(Category::Bottoms, "");
        warm.colors = vec![];
        warm.profile.color_profile = Some(crate::catalog::ColorProfile::Warm);

        let mut cool = wardrobe(Category::Bottoms, "");
        cool.colors = vec![];
        cool.profile.color_profile = Some(crate::catalog::ColorProfile::Cool);

        let same = score_pair(&config, &scanned, &warm).color;
        let clash = score_pair(&config, &scanned, &cool).color;
        assert!(same > clash);
    }

    #[test]
    fn test_score_is_bounded() {
        let config = Config::default().scoring;
        let scanned = scanned_top();
        let item = wardrobe(Category::Bottoms, "#1030e0");

        let total = score_pair(&config, &scanned, &item).total();
        assert!((0.0..=1.0).contains(&total));
    }

    #[test]
    fn test_tier_thresholds() {
        let config = Config::default().scoring;
        assert_eq!(tier_for(config.high_threshold + 0.01, &config), Tier::High);
        assert_eq!(
            tier_for(config.medium_threshold + 0.01, &config),
            Tier::Medium
        );
        assert_eq!(tier_for(0.1, &config), Tier::Low);
    }

    #[test]
    fn test_explanation_names_dominant_component() {
        let config = Config::default().scoring;
        let scanned = scanned_top();
        let item = wardrobe(Category::Bottoms, "#1030e0");

        let components = score_pair(&config, &scanned, &item);
        let text = explain(&config, &components, item.category);
        assert!(text.starts_with("Pairs well"));
    }
}
