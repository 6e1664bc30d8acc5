//! Render policy and tabs controller
//!
//! The single source of truth turning engine, verdict, and assembly outputs
//! into a presentation-agnostic render model. Everything here is a pure
//! projection recomputed on every input change; visibility decisions are
//! taken once, upstream of any styling code, and `UiState` is only ever an
//! input to colors/icons, never to visibility.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::Tier;
use crate::combos::{weak_link_tips, AssembledCombo, AssemblyResult};
use crate::confidence::{Bullet, ConfidenceResult, PairEvaluation, SuggestionsMode};
use crate::config::CombosConfig;

/// Coarse screen state consumed by presentation code for tone only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UiState {
    /// At least one HIGH match to show directly
    Matched,
    /// Only near matches; everything needs a styling tweak
    NearMatchesOnly,
    /// Nothing matched, suggestions carry the screen
    SuggestionsOnly,
    /// Wardrobe is empty, onboarding presentation
    EmptyWardrobe,
    /// Nothing actionable at all; offer a rescan
    NeedsRescan,
}

/// Matches section of the render model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchesSection {
    pub visible: bool,
    /// MEDIUM-tier pairs for the "Worth trying" view
    pub near_matches: Vec<PairEvaluation>,
}

/// The final, presentation-agnostic artifact
///
/// Derived, never mutated; recompute from fresh inputs on every change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultsRenderModel {
    pub ui_state: UiState,
    pub matches_section: MatchesSection,
    pub show_rescan_cta: bool,
}

/// Build the render model from the engine result and wardrobe size
pub fn build_render_model(
    confidence: &ConfidenceResult,
    wardrobe_count: usize,
) -> ResultsRenderModel {
    let has_high = !confidence.matches.is_empty();
    let has_near = confidence.near_match_count > 0;
    let has_suggestions = confidence
        .mode_a
        .as_ref()
        .map(|m| !m.bullets.is_empty())
        .unwrap_or(false);

    let ui_state = if !confidence.evaluated {
        UiState::NeedsRescan
    } else if has_high {
        UiState::Matched
    } else if has_near {
        UiState::NearMatchesOnly
    } else if wardrobe_count == 0 {
        UiState::EmptyWardrobe
    } else if has_suggestions {
        UiState::SuggestionsOnly
    } else {
        UiState::NeedsRescan
    };

    // Last-resort branch: the user is never shown a blank screen with no
    // path forward
    let show_rescan_cta = !confidence.evaluated || (!has_high && !has_near && !has_suggestions);

    ResultsRenderModel {
        ui_state,
        matches_section: MatchesSection {
            visible: confidence.evaluated && (has_high || has_near),
            near_matches: confidence.near_matches.clone(),
        },
        show_rescan_cta,
    }
}

/// The two outfit tabs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tab {
    WearNow,
    WorthTrying,
}

/// Tab partitioning and selection state for the outfit views
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TabsState {
    pub scanned_item_id: Uuid,
    pub show_high: bool,
    pub show_near: bool,
    /// Both tabs shown only when each independently has content
    pub show_tabs: bool,
    pub active_tab: Tab,
    pub wear_now: Vec<AssembledCombo>,
    pub worth_trying: Vec<AssembledCombo>,
    /// Selection is tab-scoped; cleared on switch and on staleness
    pub selected_combo: Option<String>,
}

/// Build the tabs state from both assembly passes
///
/// `prior_selection` is the previously selected combo id, if any; it
/// survives only when the recomputed lists still contain that combo.
pub fn build_tabs_state(
    scanned_item_id: Uuid,
    confidence: &ConfidenceResult,
    high_assembly: &AssemblyResult,
    near_assembly: &AssemblyResult,
    config: &CombosConfig,
    prior_selection: Option<String>,
) -> TabsState {
    let mut wear_now: Vec<AssembledCombo> = high_assembly
        .combos
        .iter()
        .filter(|c| c.is_complete())
        .cloned()
        .collect();

    // "Worth trying" shows only combos genuinely enriched by a near match;
    // all-HIGH combos already live in the other tab
    let mut worth_trying: Vec<AssembledCombo> = near_assembly
        .combos
        .iter()
        .filter(|c| c.is_complete() && c.slots.iter().any(|f| f.tier < Tier::High))
        .cloned()
        .collect();

    let show_high = confidence.evaluated && (!wear_now.is_empty() || !confidence.matches.is_empty());
    let show_near =
        confidence.evaluated && (!worth_trying.is_empty() || confidence.near_match_count > 0);
    let show_tabs = show_high && show_near;

    // The outfit cap is a presentation decision applied here, not inside
    // the assembler
    let cap = if show_tabs {
        config.max_per_tab_dual
    } else {
        config.max_per_tab_single
    };
    wear_now.truncate(cap);
    worth_trying.truncate(cap);

    // Stale-selection invalidation
    let selected_combo = prior_selection.filter(|id| {
        wear_now.iter().any(|c| &c.id == id) || worth_trying.iter().any(|c| &c.id == id)
    });

    let active_tab = if show_high { Tab::WearNow } else { Tab::WorthTrying };

    TabsState {
        scanned_item_id,
        show_high,
        show_near,
        show_tabs,
        active_tab,
        wear_now,
        worth_trying,
        selected_combo,
    }
}

/// Switch the active tab, clearing the previous tab's selection
pub fn switch_tab(state: TabsState, tab: Tab) -> TabsState {
    if state.active_tab == tab {
        return state;
    }
    TabsState {
        active_tab: tab,
        selected_combo: None,
        ..state
    }
}

/// Suggestions for the current tab and selection state
///
/// Mode B weak-link tips when a combo is selected, the engine's Mode A
/// bullets otherwise.
pub fn active_suggestions(
    state: &TabsState,
    confidence: &ConfidenceResult,
) -> (SuggestionsMode, Vec<Bullet>) {
    if let Some(id) = &state.selected_combo {
        let selected = state
            .wear_now
            .iter()
            .chain(state.worth_trying.iter())
            .find(|c| &c.id == id);
        if let Some(combo) = selected {
            return (SuggestionsMode::ModeB, weak_link_tips(combo));
        }
    }

    let bullets = confidence
        .mode_a
        .as_ref()
        .map(|m| m.bullets.clone())
        .unwrap_or_default();
    (confidence.suggestions_mode, bullets)
}

/// Select a combo in the active tab; unknown ids leave selection empty
pub fn select_combo(state: TabsState, combo_id: &str) -> TabsState {
    let list = match state.active_tab {
        Tab::WearNow => &state.wear_now,
        Tab::WorthTrying => &state.worth_trying,
    };
    let selected = list
        .iter()
        .any(|c| c.id == combo_id)
        .then(|| combo_id.to_string());
    TabsState {
        selected_combo: selected,
        ..state
    }
}
