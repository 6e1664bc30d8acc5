//! Combo assembler: builds slot-valid outfit combinations from scored pairs
//!
//! Consumes the confidence engine's output and fills the scan formula's core
//! slots, tier-gated per pass. Diversity comes from a deterministic
//! bucket-and-round-robin over color families, never from randomness, so the
//! same inputs always assemble the same outfits.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

use crate::catalog::{self, Category, ColorFamily, Tier};
use crate::config::CombosConfig;
use crate::confidence::{Bullet, ConfidenceResult, PairEvaluation};
use crate::item::{ScannedItem, WardrobeItem};

/// Minimum tier a pair needs to fill a slot in a given assembly pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TierFloor {
    /// Every filled slot must come from a HIGH-tier pair ("Wear now")
    High,
    /// MEDIUM-tier pairs may fill slots, flagged per slot ("Worth trying")
    HighAndMedium,
}

impl TierFloor {
    fn admits(&self, tier: Tier) -> bool {
        match self {
            TierFloor::High => tier == Tier::High,
            TierFloor::HighAndMedium => tier >= Tier::Medium,
        }
    }
}

/// One filled slot with its tier provenance
///
/// The tier is kept per slot so a mixed combo is never silent about which
/// pieces need a styling tweak.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotFill {
    pub slot: Category,
    pub item_id: Uuid,
    pub tier: Tier,
}

/// A complete or partial outfit combination
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssembledCombo {
    /// Deterministic id derived from the member items
    pub id: String,
    /// Core slots filled from the wardrobe, formula order
    pub slots: Vec<SlotFill>,
    /// Optional-category finishing touches, never required
    pub decorations: Vec<SlotFill>,
    /// Core slots the wardrobe could not fill at this pass's floor
    pub missing_slots: Vec<Category>,
}

impl AssembledCombo {
    /// Complete means every core slot the formula requires is filled
    pub fn is_complete(&self) -> bool {
        self.missing_slots.is_empty()
    }
}

/// Why no complete combo could be formed
///
/// The two cases drive different calls-to-action and must stay distinct:
/// a missing category is actionable (add an item), a tier shortfall is not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EmptyReason {
    /// The wardrobe has no item at all in these core categories
    MissingCorePieces { categories: Vec<Category> },
    /// Items exist in these categories but none clear the pass's tier floor
    MissingHighTierCorePieces { categories: Vec<Category> },
}

/// Output of one assembly pass
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssemblyResult {
    pub combos: Vec<AssembledCombo>,
    /// Whether at least one complete combo was formed
    pub can_form_combos: bool,
    /// Core slots that could not be filled at this pass's floor
    pub missing_slots: Vec<Category>,
    pub missing_message: Option<String>,
    pub empty_reason: Option<EmptyReason>,
}

/// Assembles outfits from a confidence result
pub struct ComboAssembler {
    config: CombosConfig,
}

impl ComboAssembler {
    pub fn new(config: CombosConfig) -> Self {
        Self { config }
    }

    /// Run one tier-gated assembly pass
    ///
    /// Total over any input: an unfillable formula yields a classified empty
    /// reason, never a bare empty list.
    pub fn assemble(
        &self,
        scanned: &ScannedItem,
        confidence: &ConfidenceResult,
        floor: TierFloor,
    ) -> AssemblyResult {
        let slots = catalog::outfit_slots(scanned.category);

        // The scanned item occupies its own slot when the formula names it
        let open_slots: Vec<Category> = slots
            .iter()
            .copied()
            .filter(|&slot| slot != scanned.category)
            .collect();

        // Eligible pairs per open slot, engine order preserved (best first)
        let mut eligible: AHashMap<Category, Vec<&PairEvaluation>> = AHashMap::new();
        for pair in &confidence.raw.pairs {
            if open_slots.contains(&pair.category) && floor.admits(pair.tier) {
                eligible.entry(pair.category).or_default().push(pair);
            }
        }

        let missing: Vec<Category> = open_slots
            .iter()
            .copied()
            .filter(|slot| !eligible.contains_key(slot))
            .collect();

        let combos = self.generate(scanned, confidence, &open_slots, &eligible, &missing, floor);
        let can_form_combos = combos.iter().any(|c| c.is_complete());

        let (empty_reason, missing_message) = if can_form_combos {
            (None, None)
        } else {
            let reason = classify_empty(&missing, &open_slots, confidence);
            let message = Some(empty_message(&reason));
            (Some(reason), message)
        };

        tracing::debug!(
            floor = ?floor,
            combos = combos.len(),
            complete = can_form_combos,
            missing = ?missing,
            "assembled outfit pass"
        );

        AssemblyResult {
            combos,
            can_form_combos,
            missing_slots: missing,
            missing_message,
            empty_reason,
        }
    }

    fn generate(
        &self,
        scanned: &ScannedItem,
        confidence: &ConfidenceResult,
        open_slots: &[Category],
        eligible: &AHashMap<Category, Vec<&PairEvaluation>>,
        missing: &[Category],
        floor: TierFloor,
    ) -> Vec<AssembledCombo> {
        // Nothing fillable at all: no combos, only the classified reason
        if eligible.is_empty() {
            return Vec::new();
        }

        // Diversify each slot's candidates by color family before indexing
        let diversified: AHashMap<Category, Vec<&PairEvaluation>> = eligible
            .iter()
            .map(|(&slot, pairs)| (slot, round_robin_by_family(pairs)))
            .collect();

        let deepest = diversified.values().map(|v| v.len()).max().unwrap_or(0);
        let target = deepest.min(self.config.assembly_limit);

        let decorations = self.pick_decorations(confidence, floor);

        let mut combos = Vec::new();
        let mut seen = BTreeSet::new();
        for k in 0..target {
            let mut fills = Vec::new();
            for &slot in open_slots {
                if let Some(candidates) = diversified.get(&slot) {
                    let pair = candidates[k % candidates.len()];
                    fills.push(SlotFill {
                        slot,
                        item_id: pair.item_id,
                        tier: pair.tier,
                    });
                }
            }

            // Rotation can cycle back onto an already-emitted combination
            let signature: Vec<Uuid> = fills.iter().map(|f| f.item_id).collect();
            if !seen.insert(signature) {
                continue;
            }

            combos.push(AssembledCombo {
                id: combo_id(scanned.id, &fills),
                slots: fills,
                decorations: decorations.clone(),
                missing_slots: missing.to_vec(),
            });
        }
        combos
    }

    /// Best optional-category pairs above the floor, as finishing touches
    fn pick_decorations(&self, confidence: &ConfidenceResult, floor: TierFloor) -> Vec<SlotFill> {
        confidence
            .raw
            .pairs
            .iter()
            .filter(|p| !p.category.is_core() && floor.admits(p.tier))
            .take(self.config.max_decorations)
            .map(|p| SlotFill {
                slot: p.category,
                item_id: p.item_id,
                tier: p.tier,
            })
            .collect()
    }
}

/// Weak-link tips for a selected combo (Mode B suggestions)
///
/// One bullet per slot filled below HIGH tier, naming the piece to tweak.
pub fn weak_link_tips(combo: &AssembledCombo) -> Vec<Bullet> {
    combo
        .slots
        .iter()
        .filter(|fill| fill.tier < Tier::High)
        .map(|fill| Bullet {
            key: format!("tweak_{}", fill.slot),
            target: Some(fill.slot),
            text: format!(
                "The {} is a near match, so swap or restyle it if the look feels off",
                fill.slot.noun()
            ),
        })
        .collect()
}

/// Interleave a slot's candidates across color-family buckets
///
/// Candidates arrive best-first; buckets keep that order internally and are
/// visited in first-seen order, so the result is deterministic and leads
/// with the strongest item of each family.
fn round_robin_by_family<'a>(pairs: &[&'a PairEvaluation]) -> Vec<&'a PairEvaluation> {
    let mut bucket_order: Vec<ColorFamily> = Vec::new();
    let mut buckets: AHashMap<ColorFamily, Vec<&PairEvaluation>> = AHashMap::new();

    for &pair in pairs {
        if !buckets.contains_key(&pair.color_family) {
            bucket_order.push(pair.color_family);
        }
        buckets.entry(pair.color_family).or_default().push(pair);
    }

    let mut result = Vec::with_capacity(pairs.len());
    let mut depth = 0;
    loop {
        let mut emitted = false;
        for family in &bucket_order {
            if let Some(pair) = buckets[family].get(depth) {
                result.push(*pair);
                emitted = true;
            }
        }
        if !emitted {
            break;
        }
        depth += 1;
    }
    result
}

fn combo_id(scan_id: Uuid, fills: &[SlotFill]) -> String {
    let parts: Vec<String> = fills
        .iter()
        .map(|f| f.item_id.simple().to_string()[..8].to_string())
        .collect();
    format!("outfit-{}-{}", scan_id.simple(), parts.join("-"))
}

/// Classify why no complete combo exists, exclusively one of the two causes
fn classify_empty(
    missing: &[Category],
    open_slots: &[Category],
    confidence: &ConfidenceResult,
) -> EmptyReason {
    // Categories with no wardrobe item at any tier
    let absent: Vec<Category> = missing
        .iter()
        .copied()
        .filter(|&slot| !confidence.raw.pairs.iter().any(|p| p.category == slot))
        .collect();

    if !absent.is_empty() {
        return EmptyReason::MissingCorePieces { categories: absent };
    }

    // Items exist everywhere required, so the shortfall is tier quality
    let below_floor: Vec<Category> = if missing.is_empty() {
        open_slots.to_vec()
    } else {
        missing.to_vec()
    };
    EmptyReason::MissingHighTierCorePieces {
        categories: below_floor,
    }
}

fn empty_message(reason: &EmptyReason) -> String {
    match reason {
        EmptyReason::MissingCorePieces { categories } => {
            format!("Nothing in your wardrobe yet for: {}", join_nouns(categories))
        }
        EmptyReason::MissingHighTierCorePieces { categories } => format!(
            "You own {} but none pair strongly with this scan",
            join_nouns(categories)
        ),
    }
}

fn join_nouns(categories: &[Category]) -> String {
    categories
        .iter()
        .map(|c| c.noun().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Re-resolve the wardrobe items behind a combo's slot fills
///
/// Presentation helper for callers that need full records; unknown ids are
/// skipped (the snapshot may have moved on, see staleness handling).
pub fn resolve_items<'a>(
    combo: &AssembledCombo,
    wardrobe: &'a [WardrobeItem],
) -> Vec<&'a WardrobeItem> {
    combo
        .slots
        .iter()
        .filter_map(|fill| wardrobe.iter().find(|item| item.id == fill.item_id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ColorRef;
    use crate::config::Config;
    use crate::confidence::ConfidenceEngine;
    use crate::item::{ItemSignals, SignalProfile};

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

    fn owned(category: Category, hex: &str) -> WardrobeItem {
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

    fn assemble(
        scanned: &ScannedItem,
        wardrobe: &[WardrobeItem],
        floor: TierFloor,
    ) -> AssemblyResult {
        let config = Config::default();
        let engine = ConfidenceEngine::new(&config);
        let confidence = engine.evaluate(scanned, wardrobe);
        ComboAssembler::new(config.combos).assemble(scanned, &confidence, floor)
    }

    #[test]
    fn test_perfect_high_outfit() {
        let scanned = scanned_top();
        let wardrobe = vec![
            owned(Category::Bottoms, "#f5f5f5"),
            owned(Category::Shoes, "#f5f5f5"),
        ];

        let result = assemble(&scanned, &wardrobe, TierFloor::High);

        assert!(result.can_form_combos);
        assert_eq!(result.combos.len(), 1);
        let combo = &result.combos[0];
        assert_eq!(combo.slots.len(), 2);
        assert!(combo.missing_slots.is_empty());
        assert!(result.empty_reason.is_none());
    }

    #[test]
    fn test_high_pass_contains_only_high_fills() {
        let scanned = scanned_top();
        let wardrobe = vec![
            owned(Category::Bottoms, "#f5f5f5"),
            owned(Category::Shoes, "#f5f5f5"),
            owned(Category::Shoes, "#202020"),
        ];

        let result = assemble(&scanned, &wardrobe, TierFloor::High);
        for combo in &result.combos {
            for fill in &combo.slots {
                assert_eq!(fill.tier, Tier::High);
            }
        }
    }

    #[test]
    fn test_filled_slots_subset_of_formula() {
        let scanned = scanned_top();
        let wardrobe = vec![
            owned(Category::Bottoms, "#f5f5f5"),
            owned(Category::Shoes, "#f5f5f5"),
            owned(Category::Bags, "#f5f5f5"),
        ];

        let result = assemble(&scanned, &wardrobe, TierFloor::High);
        let formula = catalog::outfit_slots(Category::Tops);
        for combo in &result.combos {
            for fill in &combo.slots {
                assert!(formula.contains(&fill.slot));
            }
            // Bags attach as decorations, never as slots
            assert!(combo.slots.iter().all(|f| f.slot != Category::Bags));
        }
    }

    #[test]
    fn test_missing_core_pieces_classified() {
        let scanned = scanned_top();
        // No shoes at all in the wardrobe
        let wardrobe = vec![owned(Category::Bottoms, "#f5f5f5")];

        let result = assemble(&scanned, &wardrobe, TierFloor::High);

        assert!(!result.can_form_combos);
        match result.empty_reason {
            Some(EmptyReason::MissingCorePieces { ref categories }) => {
                assert_eq!(categories, &vec![Category::Shoes]);
            }
            ref other => panic!("expected MissingCorePieces, got {:?}", other),
        }
        assert!(result.missing_message.is_some());
    }

    #[test]
    fn test_missing_high_tier_classified() {
        let mut scanned = scanned_top();
        scanned.colors = vec![ColorRef {
            hex: "#1030e0".to_string(),
            name: String::new(),
        }];
        scanned.profile.style_family = Some(crate::catalog::StyleFamily::Sporty);
        scanned.profile.formality = Some(crate::catalog::Formality::Lounge);

        // Shoes exist but clash hard enough to stay below HIGH
        let mut shoes = owned(Category::Shoes, "#70d010");
        shoes.profile.style_family = Some(crate::catalog::StyleFamily::Romantic);
        shoes.profile.formality = Some(crate::catalog::Formality::Formal);

        let wardrobe = vec![owned(Category::Bottoms, "#f5f5f5"), shoes];
        let result = assemble(&scanned, &wardrobe, TierFloor::High);

        assert!(!result.can_form_combos);
        match result.empty_reason {
            Some(EmptyReason::MissingHighTierCorePieces { ref categories }) => {
                assert!(categories.contains(&Category::Shoes));
            }
            ref other => panic!("expected MissingHighTierCorePieces, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_reasons_are_exclusive() {
        let scanned = scanned_top();
        let result = assemble(&scanned, &[], TierFloor::High);

        // Exactly one classified reason, never both
        assert!(!result.can_form_combos);
        assert!(result.empty_reason.is_some());
    }

    #[test]
    fn test_diversity_avoids_duplicate_combos() {
        let scanned = scanned_top();
        let wardrobe = vec![
            owned(Category::Bottoms, "#f5f5f5"),
            owned(Category::Shoes, "#f5f5f5"),
            owned(Category::Shoes, "#e0e0e0"),
            owned(Category::Shoes, "#d5d5d5"),
        ];

        let result = assemble(&scanned, &wardrobe, TierFloor::High);

        let ids: BTreeSet<&String> = result.combos.iter().map(|c| &c.id).collect();
        assert_eq!(ids.len(), result.combos.len());
        assert!(result.combos.len() > 1);
    }

    #[test]
    fn test_assembly_is_deterministic() {
        let scanned = scanned_top();
        let wardrobe = vec![
            owned(Category::Bottoms, "#f5f5f5"),
            owned(Category::Shoes, "#f5f5f5"),
            owned(Category::Shoes, "#e0e0e0"),
        ];

        let a = assemble(&scanned, &wardrobe, TierFloor::High);
        let b = assemble(&scanned, &wardrobe, TierFloor::High);

        let ids_a: Vec<&String> = a.combos.iter().map(|c| &c.id).collect();
        let ids_b: Vec<&String> = b.combos.iter().map(|c| &c.id).collect();
        assert_eq!(ids_a, ids_b);
    }

    #[test]
    fn test_weak_link_tips_flag_medium_slots() {
        let combo = AssembledCombo {
            id: "outfit-test".to_string(),
            slots: vec![
                SlotFill {
                    slot: Category::Bottoms,
                    item_id: Uuid::new_v4(),
                    tier: Tier::High,
                },
                SlotFill {
                    slot: Category::Shoes,
                    item_id: Uuid::new_v4(),
                    tier: Tier::Medium,
                },
            ],
            decorations: vec![],
            missing_slots: vec![],
        };

        let tips = weak_link_tips(&combo);
        assert_eq!(tips.len(), 1);
        assert_eq!(tips[0].target, Some(Category::Shoes));
        assert_eq!(tips[0].key, "tweak_shoes");
    }

    #[test]
    fn test_resolve_items_skips_stale_ids() {
        let scanned = scanned_top();
        let wardrobe = vec![
            owned(Category::Bottoms, "#f5f5f5"),
            owned(Category::Shoes, "#f5f5f5"),
        ];
        let result = assemble(&scanned, &wardrobe, TierFloor::High);
        let combo = &result.combos[0];

        assert_eq!(resolve_items(combo, &wardrobe).len(), 2);
        // A snapshot that moved on simply yields fewer records
        assert_eq!(resolve_items(combo, &wardrobe[..1]).len(), 1);
        assert_eq!(resolve_items(combo, &[]).len(), 0);
    }

    #[test]
    fn test_dress_formula_two_slots() {
        let mut scanned = scanned_top();
        scanned.category = Category::Dresses;
        let wardrobe = vec![owned(Category::Shoes, "#f5f5f5")];

        let result = assemble(&scanned, &wardrobe, TierFloor::High);
        assert!(result.can_form_combos);
        assert_eq!(result.combos[0].slots.len(), 1);
        assert_eq!(result.combos[0].slots[0].slot, Category::Shoes);
    }
}
