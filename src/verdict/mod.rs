//! Decision tree: classifies the scanned item's overall placement
//!
//! Independent of individual wardrobe pairs; runs off the scanned item's own
//! signals plus the coarse wardrobe size. The cascade is an ordered rule
//! list, first match wins. The rules are not mutually exclusive, so order
//! is part of the contract.

use serde::{Deserialize, Serialize};

use crate::catalog::Category;
use crate::item::{FitPreference, ItemSignals, StylingRisk};

/// Terminal outcome of the classification cascade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeState {
    LooksLikeGoodMatch,
    CouldWorkWithPieces,
    MightFeelTricky,
    NeedsMoreContext,
}

impl OutcomeState {
    /// Every outcome, used by the round-trip tests
    pub const ALL: [OutcomeState; 4] = [
        OutcomeState::LooksLikeGoodMatch,
        OutcomeState::CouldWorkWithPieces,
        OutcomeState::MightFeelTricky,
        OutcomeState::NeedsMoreContext,
    ];

    /// Total mapping from outcome to the verdict surface state
    pub fn ui_state(&self) -> VerdictUiState {
        match self {
            OutcomeState::LooksLikeGoodMatch => VerdictUiState::Great,
            OutcomeState::CouldWorkWithPieces => VerdictUiState::Okay,
            OutcomeState::MightFeelTricky => VerdictUiState::Risky,
            OutcomeState::NeedsMoreContext => VerdictUiState::ContextNeeded,
        }
    }
}

/// Verdict state consumed by the results surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictUiState {
    Great,
    Okay,
    Risky,
    ContextNeeded,
}

impl VerdictUiState {
    /// Fixed reverse table back to a representative outcome
    ///
    /// Used when a saved scan is undone and the original outcome must be
    /// restored without re-running the rules (the inputs may be gone).
    pub fn representative_outcome(&self) -> OutcomeState {
        match self {
            VerdictUiState::Great => OutcomeState::LooksLikeGoodMatch,
            VerdictUiState::Okay => OutcomeState::CouldWorkWithPieces,
            VerdictUiState::Risky => OutcomeState::MightFeelTricky,
            VerdictUiState::ContextNeeded => OutcomeState::NeedsMoreContext,
        }
    }
}

/// Classification result with its human-readable explanation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTreeResult {
    pub outcome: OutcomeState,
    pub explanation: String,
    pub ui_state: VerdictUiState,
}

/// Inputs to one classification run
#[derive(Debug, Clone)]
pub struct ClassifyInput {
    pub category: Category,
    pub signals: ItemSignals,
    pub fit_preference: FitPreference,
    pub context_sufficient: bool,
    pub wardrobe_count: usize,
}

/// One rule of the cascade
pub struct Rule {
    pub name: &'static str,
    pub outcome: OutcomeState,
    pub applies: fn(&ClassifyInput) -> bool,
}

/// The ordered cascade, first match wins
///
/// Order is significant: insufficient context always wins, then the
/// risk/fit conflict, then the sparse-wardrobe and medium-risk cases.
pub fn rules() -> Vec<Rule> {
    vec![
        Rule {
            name: "insufficient_context",
            outcome: OutcomeState::NeedsMoreContext,
            applies: |input| !input.context_sufficient,
        },
        Rule {
            name: "risk_fit_conflict",
            outcome: OutcomeState::MightFeelTricky,
            applies: |input| {
                input.signals.styling_risk == StylingRisk::High
                    && input
                        .signals
                        .silhouette
                        .map(|s| input.fit_preference.conflicts_with(s))
                        .unwrap_or(false)
            },
        },
        Rule {
            name: "needs_pieces",
            outcome: OutcomeState::CouldWorkWithPieces,
            applies: |input| {
                input.wardrobe_count == 0 || input.signals.styling_risk == StylingRisk::Medium
            },
        },
        Rule {
            name: "good_match",
            outcome: OutcomeState::LooksLikeGoodMatch,
            applies: |_| true,
        },
    ]
}

/// Classify a scanned item; deterministic, total, side-effect-free
pub fn classify(input: &ClassifyInput) -> DecisionTreeResult {
    let outcome = rules()
        .iter()
        .find(|rule| (rule.applies)(input))
        .map(|rule| rule.outcome)
        // The last rule is a catch-all, so this is unreachable; keep the
        // cascade total anyway
        .unwrap_or(OutcomeState::CouldWorkWithPieces);

    DecisionTreeResult {
        outcome,
        explanation: explanation_for(outcome, input),
        ui_state: outcome.ui_state(),
    }
}

/// Explanation templating keyed by outcome plus signal flags
///
/// Text generation only; all branching happens in the cascade above.
fn explanation_for(outcome: OutcomeState, input: &ClassifyInput) -> String {
    let noun = input.category.noun();
    let notes = style_notes(&input.signals);

    match outcome {
        OutcomeState::NeedsMoreContext => {
            format!("The photo didn't give us enough to judge this {}", noun)
        }
        OutcomeState::MightFeelTricky => format!(
            "This {}{} may fight the fit you usually go for",
            noun, notes
        ),
        OutcomeState::CouldWorkWithPieces => {
            if input.wardrobe_count == 0 {
                format!("This {}{} could work once a few basics are in", noun, notes)
            } else {
                format!("This {}{} could work with the right pieces", noun, notes)
            }
        }
        OutcomeState::LooksLikeGoodMatch => {
            format!("This {}{} looks like an easy fit for you", noun, notes)
        }
    }
}

fn style_notes(signals: &ItemSignals) -> String {
    if signals.style_notes.is_empty() {
        String::new()
    } else {
        format!(" ({})", signals.style_notes.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::Silhouette;

    fn signals(risk: StylingRisk, silhouette: Option<Silhouette>) -> ItemSignals {
        ItemSignals {
            styling_risk: risk,
            silhouette,
            length: None,
            style_notes: vec![],
        }
    }

    fn input(
        signals: ItemSignals,
        fit: FitPreference,
        context: bool,
        wardrobe: usize,
    ) -> ClassifyInput {
        ClassifyInput {
            category: Category::Tops,
            signals,
            fit_preference: fit,
            context_sufficient: context,
            wardrobe_count: wardrobe,
        }
    }

    #[test]
    fn test_insufficient_context_always_wins() {
        // Every other rule would also fire here; rule 1 must take priority
        let s = signals(StylingRisk::High, Some(Silhouette::Oversized));
        let result = classify(&input(s, FitPreference::Fitted, false, 0));
        assert_eq!(result.outcome, OutcomeState::NeedsMoreContext);
        assert_eq!(result.ui_state, VerdictUiState::ContextNeeded);
    }

    #[test]
    fn test_risk_fit_conflict() {
        let s = signals(StylingRisk::High, Some(Silhouette::Oversized));
        let result = classify(&input(s, FitPreference::Fitted, true, 5));
        assert_eq!(result.outcome, OutcomeState::MightFeelTricky);
    }

    #[test]
    fn test_high_risk_without_conflict_is_not_tricky() {
        let s = signals(StylingRisk::High, Some(Silhouette::Oversized));
        let result = classify(&input(s, FitPreference::Relaxed, true, 5));
        assert_eq!(result.outcome, OutcomeState::LooksLikeGoodMatch);
    }

    #[test]
    fn test_empty_wardrobe_needs_pieces() {
        let s = signals(StylingRisk::Low, None);
        let result = classify(&input(s, FitPreference::NoPreference, true, 0));
        assert_eq!(result.outcome, OutcomeState::CouldWorkWithPieces);
    }

    #[test]
    fn test_medium_risk_needs_pieces() {
        let s = signals(StylingRisk::Medium, None);
        let result = classify(&input(s, FitPreference::NoPreference, true, 10));
        assert_eq!(result.outcome, OutcomeState::CouldWorkWithPieces);
    }

    #[test]
    fn test_default_good_match() {
        let s = signals(StylingRisk::Low, Some(Silhouette::Fitted));
        let result = classify(&input(s, FitPreference::Fitted, true, 10));
        assert_eq!(result.outcome, OutcomeState::LooksLikeGoodMatch);
    }

    #[test]
    fn test_cascade_order_is_fixed() {
        let names: Vec<_> = rules().iter().map(|r| r.name).collect();
        assert_eq!(
            names,
            vec![
                "insufficient_context",
                "risk_fit_conflict",
                "needs_pieces",
                "good_match"
            ]
        );
    }

    #[test]
    fn test_outcome_verdict_round_trip() {
        for outcome in OutcomeState::ALL {
            let ui = outcome.ui_state();
            let representative = ui.representative_outcome();
            assert_eq!(representative.ui_state(), ui);
        }
    }

    #[test]
    fn test_explanation_mentions_category() {
        let s = signals(StylingRisk::Low, None);
        let result = classify(&input(s, FitPreference::NoPreference, true, 3));
        assert!(result.explanation.contains("top"));
    }
}
