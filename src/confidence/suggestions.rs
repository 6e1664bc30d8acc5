// Mode A suggestion bullets: short, category-targeted styling advice derived
// from the scanned item's signals, filtered against already-matched slots.
use std::collections::BTreeSet;

use crate::catalog::{self, Category, TextureType};
use crate::config::SuggestionsConfig;
use crate::confidence::types::{Bullet, ModeASuggestions};
use crate::item::{ScannedItem, StylingRisk};

/// Build the full Mode A bullet list for a scanned item
///
/// One bullet per open core slot of the scan's outfit formula, plus
/// wardrobe-independent advice from the item's own signals. The caller runs
/// [`filter_against_matches`] before surfacing the list.
pub fn mode_a_bullets(scanned: &ScannedItem) -> Vec<Bullet> {
    let mut bullets = Vec::new();

    for &slot in catalog::outfit_slots(scanned.category) {
        if slot == scanned.category {
            continue;
        }
        bullets.push(Bullet {
            key: format!("add_{}", slot),
            target: Some(slot),
            text: slot_advice(slot, scanned),
        });
    }

    if scanned.signals.styling_risk == StylingRisk::High {
        bullets.push(Bullet {
            key: "keep_rest_simple".to_string(),
            target: None,
            text: "A statement piece: keep the rest of the look simple".to_string(),
        });
    }

    if scanned
        .colors
        .first()
        .map(catalog::is_neutral)
        .unwrap_or(false)
    {
        bullets.push(Bullet {
            key: "neutral_base".to_string(),
            target: None,
            text: "Reads as a neutral base, so one color accent is enough".to_string(),
        });
    }

    if scanned.profile.texture == Some(TextureType::Sheer) {
        bullets.push(Bullet {
            key: "plan_layers".to_string(),
            target: None,
            text: "Sheer fabric, so plan a layer underneath".to_string(),
        });
    }

    bullets
}

/// Drop bullets targeting a category already satisfied by a HIGH match
///
/// Idempotent: filtering an already-filtered list changes nothing. A
/// non-empty input never filters to empty; the generic fallback keeps the
/// suggestion section renderable.
pub fn filter_against_matches(bullets: Vec<Bullet>, matched: &BTreeSet<Category>) -> Vec<Bullet> {
    if bullets.is_empty() {
        return bullets;
    }

    let filtered: Vec<Bullet> = bullets
        .into_iter()
        .filter(|b| match b.target {
            Some(category) => !matched.contains(&category),
            None => true,
        })
        .collect();

    if filtered.is_empty() {
        return vec![fallback_bullet()];
    }
    filtered
}

/// Assemble the final Mode A block, capped per configuration
pub fn mode_a(
    scanned: &ScannedItem,
    matched: &BTreeSet<Category>,
    config: &SuggestionsConfig,
) -> ModeASuggestions {
    let mut bullets = filter_against_matches(mode_a_bullets(scanned), matched);
    bullets.truncate(config.max_bullets);
    ModeASuggestions { bullets }
}

fn fallback_bullet() -> Bullet {
    Bullet {
        key: "versatile_base".to_string(),
        target: None,
        text: "Already pairs with pieces you own, so style it as usual".to_string(),
    }
}

fn slot_advice(slot: Category, scanned: &ScannedItem) -> String {
    let qualifier = match scanned.signals.styling_risk {
        StylingRisk::High => "simple",
        StylingRisk::Medium => "structured",
        StylingRisk::Low => "complementary",
    };
    match slot {
        Category::Shoes => format!("Add {} shoes to finish the look", qualifier),
        _ => format!("Add a {} {}", qualifier, slot.noun()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{ItemSignals, SignalProfile};
    use uuid::Uuid;

    fn scanned(category: Category, risk: StylingRisk) -> ScannedItem {
        ScannedItem {
            id: Uuid::new_v4(),
            category,
            colors: vec![],
            style_tags: vec![],
            signals: ItemSignals {
                styling_risk: risk,
                ..ItemSignals::default()
            },
            profile: SignalProfile::default(),
            context_sufficient: true,
            is_fashion_item: true,
        }
    }

    #[test]
    fn test_bullets_cover_open_slots() {
        let item = scanned(Category::Tops, StylingRisk::Medium);
        let bullets = mode_a_bullets(&item);

        let targets: Vec<_> = bullets.iter().filter_map(|b| b.target).collect();
        assert!(targets.contains(&Category::Bottoms));
        assert!(targets.contains(&Category::Shoes));
        // The scan fills its own slot
        assert!(!targets.contains(&Category::Tops));
    }

    #[test]
    fn test_high_risk_adds_untargeted_advice() {
        let item = scanned(Category::Dresses, StylingRisk::High);
        let bullets = mode_a_bullets(&item);
        assert!(bullets.iter().any(|b| b.key == "keep_rest_simple"));
    }

    #[test]
    fn test_sheer_texture_adds_layering_advice() {
        let mut item = scanned(Category::Tops, StylingRisk::Low);
        item.profile.texture = Some(TextureType::Sheer);

        let bullets = mode_a_bullets(&item);
        assert!(bullets.iter().any(|b| b.key == "plan_layers"));
    }

    #[test]
    fn test_filter_removes_matched_targets() {
        let item = scanned(Category::Tops, StylingRisk::Low);
        let bullets = mode_a_bullets(&item);

        let matched: BTreeSet<Category> = [Category::Bottoms].into_iter().collect();
        let filtered = filter_against_matches(bullets, &matched);

        assert!(filtered
            .iter()
            .all(|b| b.target != Some(Category::Bottoms)));
        assert!(filtered.iter().any(|b| b.target == Some(Category::Shoes)));
    }

    #[test]
    fn test_filter_is_idempotent() {
        let item = scanned(Category::Tops, StylingRisk::High);
        let matched: BTreeSet<Category> = [Category::Shoes].into_iter().collect();

        let once = filter_against_matches(mode_a_bullets(&item), &matched);
        let twice = filter_against_matches(once.clone(), &matched);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_filter_never_empties_nonempty_list() {
        let item = scanned(Category::Tops, StylingRisk::Low);
        let bullets = mode_a_bullets(&item);
        assert!(!bullets.is_empty());

        // Every core slot already matched
        let matched: BTreeSet<Category> = Category::ALL
            .into_iter()
            .filter(|c| c.is_core())
            .collect();
        let filtered = filter_against_matches(bullets, &matched);

        assert!(!filtered.is_empty());
        assert_eq!(filtered[0].key, "versatile_base");
    }

    #[test]
    fn test_cap_applies() {
        let item = scanned(Category::Tops, StylingRisk::High);
        let config = SuggestionsConfig { max_bullets: 1 };
        let block = mode_a(&item, &BTreeSet::new(), &config);
        assert_eq!(block.bullets.len(), 1);
    }
}
