//! Confidence engine: scores every wardrobe item against the scanned item
//!
//! Produces per-pair evaluations, tiered category coverage, and Mode A
//! styling suggestions. Pure and synchronous; total over any wardrobe size
//! including zero.

mod score;
mod suggestions;
mod types;

pub use score::{category_affinity, color_compatibility, score_pair, tier_for};
pub use suggestions::{filter_against_matches, mode_a, mode_a_bullets};
pub use types::{
    Bullet, ConfidenceResult, ModeASuggestions, PairEvaluation, RawEvaluation, ScoreComponents,
    SuggestionsMode, UiVibe,
};

use std::collections::BTreeSet;

use crate::catalog::{self, Category, Tier};
use crate::config::{Config, ScoringConfig, SuggestionsConfig};
use crate::item::{ScannedItem, WardrobeItem};

/// Scores a scanned item against a wardrobe snapshot
pub struct ConfidenceEngine {
    scoring: ScoringConfig,
    suggestions: SuggestionsConfig,
}

impl ConfidenceEngine {
    /// Create an engine from the loaded configuration
    pub fn new(config: &Config) -> Self {
        Self {
            scoring: config.scoring.clone(),
            suggestions: config.suggestions.clone(),
        }
    }

    /// Evaluate the scanned item against the whole wardrobe snapshot
    ///
    /// Never fails: an empty wardrobe yields an evaluated result with empty
    /// matches and Mode A suggestions active; malformed signals degrade to
    /// category+color scoring inside [`score_pair`].
    pub fn evaluate(&self, scanned: &ScannedItem, wardrobe: &[WardrobeItem]) -> ConfidenceResult {
        if !scanned.is_fashion_item {
            // Gating of non-fashion scans happens outside this core; scoring
            // a non-garment against a wardrobe has no meaning
            return ConfidenceResult::not_evaluated();
        }

        // Score every pair
        let pairs: Vec<PairEvaluation> = wardrobe
            .iter()
            .map(|item| self.evaluate_pair(scanned, item))
            .collect();

        // Order best-first; ties prefer categories that keep combo assembly
        // productive
        let pairs = order_pairs(scanned.category, pairs);

        let matches: Vec<PairEvaluation> = pairs
            .iter()
            .filter(|p| p.tier == Tier::High)
            .cloned()
            .collect();
        let near_matches: Vec<PairEvaluation> = pairs
            .iter()
            .filter(|p| p.tier == Tier::Medium)
            .cloned()
            .collect();
        let debug_tier = pairs.iter().map(|p| p.tier).max();

        let matched_categories: BTreeSet<Category> = matches
            .iter()
            .map(|p| p.category)
            .filter(|c| c.is_core())
            .collect();

        let mode_a = suggestions::mode_a(scanned, &matched_categories, &self.suggestions);

        let ui_vibe = if !matches.is_empty() {
            UiVibe::Confident
        } else if !near_matches.is_empty() {
            UiVibe::Encouraging
        } else {
            UiVibe::Fresh
        };

        tracing::debug!(
            wardrobe = wardrobe.len(),
            high = matches.len(),
            near = near_matches.len(),
            "evaluated scan against wardrobe"
        );

        ConfidenceResult {
            evaluated: true,
            show_matches_section: !matches.is_empty(),
            near_match_count: near_matches.len(),
            matches,
            near_matches,
            debug_tier,
            suggestions_mode: SuggestionsMode::ModeA,
            mode_a: Some(mode_a),
            ui_vibe,
            raw: RawEvaluation {
                pairs,
                matched_categories,
            },
        }
    }

    fn evaluate_pair(&self, scanned: &ScannedItem, item: &WardrobeItem) -> PairEvaluation {
        let components = score::score_pair(&self.scoring, scanned, item);
        let raw_score = components.total();
        let tier = score::tier_for(raw_score, &self.scoring);

        let explanation = if tier == Tier::High {
            Some(score::explain(&self.scoring, &components, item.category))
        } else {
            None
        };

        let color_family = item
            .colors
            .first()
            .map(catalog::color_family)
            .unwrap_or(catalog::ColorFamily::Neutral);

        PairEvaluation {
            item_id: item.id,
            category: item.category,
            color_family,
            raw_score,
            tier,
            components,
            explanation,
        }
    }
}

/// Order pairs by score descending with a slot-aware tie-break
///
/// Within a run of equal scores, items whose category fills a core formula
/// slot not yet covered by a higher-ranked pair come first; item id breaks
/// the remaining ties so output is deterministic.
fn order_pairs(scan: Category, mut pairs: Vec<PairEvaluation>) -> Vec<PairEvaluation> {
    pairs.sort_by(|a, b| {
        b.raw_score
            .partial_cmp(&a.raw_score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.item_id.cmp(&b.item_id))
    });

    let slots = catalog::outfit_slots(scan);
    let mut covered: BTreeSet<Category> = BTreeSet::new();
    covered.insert(scan);

    let mut ordered = Vec::with_capacity(pairs.len());
    let mut i = 0;
    while i < pairs.len() {
        let mut j = i + 1;
        while j < pairs.len() && pairs[j].raw_score == pairs[i].raw_score {
            j += 1;
        }

        let mut fills = Vec::new();
        let mut rest = Vec::new();
        for pair in &pairs[i..j] {
            if slots.contains(&pair.category) && !covered.contains(&pair.category) {
                covered.insert(pair.category);
                fills.push(pair.clone());
            } else {
                rest.push(pair.clone());
            }
        }
        for pair in &rest {
            covered.insert(pair.category);
        }
        ordered.append(&mut fills);
        ordered.append(&mut rest);

        i = j;
    }
    ordered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ColorRef;
    use crate::item::{ItemSignals, SignalProfile};
    use uuid::Uuid;

    fn scanned_top() -> ScannedItem {
        ScannedItem {
            id: Uuid::new_v4(),
            category: Category::Tops,
            colors: vec![ColorRef {
                hex: "#111111".to_string(),
                name: "black".to_string(),
            }],
            style_tags: vec![],
            signals: ItemSignals::default(),
            profile: SignalProfile::default(),
            context_sufficient: true,
            is_fashion_item: true,
        }
    }

    fn owned(category: Category) -> WardrobeItem {
        WardrobeItem {
            id: Uuid::new_v4(),
            category,
            colors: vec![ColorRef {
                hex: "#f5f5f5".to_string(),
                name: "white".to_string(),
            }],
            style_tags: vec![],
            profile: SignalProfile::default(),
            image_ref: None,
        }
    }

    fn engine() -> ConfidenceEngine {
        ConfidenceEngine::new(&Config::default())
    }

    #[test]
    fn test_empty_wardrobe_still_evaluates() {
        let result = engine().evaluate(&scanned_top(), &[]);

        assert!(result.evaluated);
        assert!(result.matches.is_empty());
        assert!(!result.show_matches_section);
        assert_eq!(result.debug_tier, None);
        assert_eq!(result.suggestions_mode, SuggestionsMode::ModeA);
        assert!(!result.mode_a.unwrap().bullets.is_empty());
    }

    #[test]
    fn test_non_fashion_item_not_evaluated() {
        let mut scanned = scanned_top();
        scanned.is_fashion_item = false;

        let result = engine().evaluate(&scanned, &[owned(Category::Bottoms)]);
        assert!(!result.evaluated);
        assert!(result.matches.is_empty());
    }

    #[test]
    fn test_matched_categories_high_only() {
        let result = engine().evaluate(&scanned_top(), &[owned(Category::Bottoms)]);

        for pair in &result.matches {
            assert_eq!(pair.tier, Tier::High);
        }
        for category in &result.raw.matched_categories {
            assert!(category.is_core());
        }
    }

    #[test]
    fn test_tie_break_prefers_unfilled_slots() {
        // Three identical items: two shoes, one bottoms. All score equal, so
        // the ordering should cover bottoms+shoes before the duplicate shoes.
        let items = vec![
            owned(Category::Shoes),
            owned(Category::Shoes),
            owned(Category::Bottoms),
        ];
        let result = engine().evaluate(&scanned_top(), &items);

        let order: Vec<Category> = result.raw.pairs.iter().map(|p| p.category).collect();
        assert_eq!(order.len(), 3);
        let first_two: BTreeSet<Category> = order[..2].iter().copied().collect();
        assert!(first_two.contains(&Category::Bottoms));
        assert!(first_two.contains(&Category::Shoes));
        assert_eq!(order[2], Category::Shoes);
    }

    #[test]
    fn test_high_pairs_carry_explanation() {
        let result = engine().evaluate(&scanned_top(), &[owned(Category::Bottoms)]);
        for pair in &result.matches {
            assert!(pair.explanation.is_some());
        }
        for pair in &result.near_matches {
            assert!(pair.explanation.is_none());
        }
    }
}
