// Shared types for the confidence engine
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

use crate::catalog::{Category, ColorFamily, Tier};

/// Breakdown of score components for transparency
///
/// Each component is stored already weighted so the total is a plain sum.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ScoreComponents {
    /// Category affinity score (weighted)
    pub category: f32,
    /// Color compatibility score (weighted)
    pub color: f32,
    /// Style-family alignment score (weighted)
    pub style: f32,
    /// Formality proximity score (weighted)
    pub formality: f32,
}

impl ScoreComponents {
    /// Calculate total score by summing all components
    pub fn total(&self) -> f32 {
        self.category + self.color + self.style + self.formality
    }
}

/// One wardrobe item scored against the scanned item
///
/// Ephemeral: recomputed on every evaluation, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PairEvaluation {
    pub item_id: Uuid,
    pub category: Category,
    /// Dominant color family, a secondary attribute for combo diversity
    pub color_family: ColorFamily,
    pub raw_score: f32,
    pub tier: Tier,
    pub components: ScoreComponents,
    /// Human-readable reason, present on HIGH pairs only
    pub explanation: Option<String>,
}

/// Full per-pair evaluation kept alongside the tiered views
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawEvaluation {
    /// Every scored pair, ordered best-first
    pub pairs: Vec<PairEvaluation>,
    /// Core categories with at least one HIGH-tier pair
    pub matched_categories: BTreeSet<Category>,
}

/// Which suggestion mode the engine produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionsMode {
    /// Generic category-targeted styling bullets
    ModeA,
    /// Weak-link tips tied to a selected outfit candidate
    ModeB,
    Inactive,
}

/// A single category-targeted styling suggestion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub text: String,
    /// Category the suggestion asks the user to add, `None` for
    /// wardrobe-independent advice
    pub target: Option<Category>,
    /// Stable key for copy lookup by the localization collaborator
    pub key: String,
}

/// Mode A suggestion block
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModeASuggestions {
    pub bullets: Vec<Bullet>,
}

/// Copy-tone hint consumed by the localization collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UiVibe {
    /// Strong matches exist
    Confident,
    /// Near matches only, styling tweaks needed
    Encouraging,
    /// Nothing matched yet but suggestions apply
    Fresh,
}

/// The engine's full output for one scanned item against the whole wardrobe
///
/// Owned for the lifetime of a single screen render; the calling layer
/// recomputes it whenever the scanned item or wardrobe snapshot changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfidenceResult {
    /// False only if scoring could not run at all
    pub evaluated: bool,
    /// HIGH-tier pairs, ordered best-first
    pub matches: Vec<PairEvaluation>,
    /// MEDIUM-tier pairs surfaced as "worth trying" material
    pub near_matches: Vec<PairEvaluation>,
    pub near_match_count: usize,
    pub show_matches_section: bool,
    /// Best tier observed across the wardrobe, `None` when nothing scored
    pub debug_tier: Option<Tier>,
    pub suggestions_mode: SuggestionsMode,
    pub mode_a: Option<ModeASuggestions>,
    pub ui_vibe: UiVibe,
    pub raw: RawEvaluation,
}

impl ConfidenceResult {
    /// Result for the degenerate case where scoring could not run
    pub fn not_evaluated() -> Self {
        Self {
            evaluated: false,
            matches: Vec::new(),
            near_matches: Vec::new(),
            near_match_count: 0,
            show_matches_section: false,
            debug_tier: None,
            suggestions_mode: SuggestionsMode::Inactive,
            mode_a: None,
            ui_vibe: UiVibe::Fresh,
            raw: RawEvaluation::default(),
        }
    }
}
