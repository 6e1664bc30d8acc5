//! End-to-end scan pipeline
//!
//! Composes the four stages leaf-first: confidence engine, decision tree,
//! combo assembly (both tier passes), render policy. One call per input
//! change; every stage is pure, so the pipeline is cheap to re-run whenever
//! the scanned item or wardrobe snapshot moves.

use serde::Serialize;
use std::time::Instant;

use crate::combos::{AssemblyResult, ComboAssembler, TierFloor};
use crate::confidence::{ConfidenceEngine, ConfidenceResult};
use crate::config::Config;
use crate::item::{FitPreference, ScannedItem, WardrobeItem};
use crate::render::{self, ResultsRenderModel, TabsState};
use crate::verdict::{self, ClassifyInput, DecisionTreeResult};

/// Everything one scan produces, ready for the presentation layer
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub confidence: ConfidenceResult,
    pub verdict: DecisionTreeResult,
    pub wear_now: AssemblyResult,
    pub worth_trying: AssemblyResult,
    pub render: ResultsRenderModel,
    pub tabs: TabsState,
    pub stats: ScanStats,
}

/// Summary counters handed to the analytics collaborator by the caller
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanStats {
    pub wardrobe_items: usize,
    pub high_matches: usize,
    pub near_matches: usize,
    pub wear_now_combos: usize,
    pub worth_trying_combos: usize,
    pub processing_time_ms: u64,
}

/// Main pipeline orchestrator
pub struct ScanPipeline {
    config: Config,
    engine: ConfidenceEngine,
    assembler: ComboAssembler,
}

impl ScanPipeline {
    /// Create a pipeline from the loaded configuration
    pub fn new(config: Config) -> Self {
        let engine = ConfidenceEngine::new(&config);
        let assembler = ComboAssembler::new(config.combos.clone());
        Self {
            config,
            engine,
            assembler,
        }
    }

    /// Run a full evaluation of one scanned item against a wardrobe snapshot
    ///
    /// `prior_selection` carries the previously selected combo id across
    /// recomputes so staleness can be resolved in one place.
    pub fn run(
        &self,
        scanned: &ScannedItem,
        wardrobe: &[WardrobeItem],
        fit_preference: FitPreference,
        prior_selection: Option<String>,
    ) -> ScanReport {
        let start = Instant::now();

        // Confidence engine scores the whole snapshot
        let confidence = self.engine.evaluate(scanned, wardrobe);

        // Decision tree runs in parallel off the scanned item and the
        // coarse wardrobe size, not the individual pairs
        let verdict = verdict::classify(&ClassifyInput {
            category: scanned.category,
            signals: scanned.signals.clone(),
            fit_preference,
            context_sufficient: scanned.context_sufficient,
            wardrobe_count: wardrobe.len(),
        });

        // Two tier-gated assembly passes feed the two tabs
        let wear_now = self
            .assembler
            .assemble(scanned, &confidence, TierFloor::High);
        let worth_trying =
            self.assembler
                .assemble(scanned, &confidence, TierFloor::HighAndMedium);

        // Pure projections resolve everything into the render model
        let render = render::build_render_model(&confidence, wardrobe.len());
        let tabs = render::build_tabs_state(
            scanned.id,
            &confidence,
            &wear_now,
            &worth_trying,
            &self.config.combos,
            prior_selection,
        );

        let stats = ScanStats {
            wardrobe_items: wardrobe.len(),
            high_matches: confidence.matches.len(),
            near_matches: confidence.near_match_count,
            wear_now_combos: tabs.wear_now.len(),
            worth_trying_combos: tabs.worth_trying.len(),
            processing_time_ms: start.elapsed().as_millis() as u64,
        };

        tracing::info!(
            high = stats.high_matches,
            near = stats.near_matches,
            outcome = ?verdict.outcome,
            elapsed_ms = stats.processing_time_ms,
            "scan pipeline complete"
        );

        ScanReport {
            confidence,
            verdict,
            wear_now,
            worth_trying,
            render,
            tabs,
            stats,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Category, ColorRef};
    use crate::item::{ItemSignals, SignalProfile};
    use uuid::Uuid;

    fn scanned(category: Category) -> ScannedItem {
        ScannedItem {
            id: Uuid::new_v4(),
            category,
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

    #[test]
    fn test_pipeline_end_to_end() {
        let pipeline = ScanPipeline::new(Config::default());
        let wardrobe = vec![owned(Category::Bottoms), owned(Category::Shoes)];

        let report = pipeline.run(
            &scanned(Category::Tops),
            &wardrobe,
            FitPreference::NoPreference,
            None,
        );

        assert!(report.confidence.evaluated);
        assert!(report.wear_now.can_form_combos);
        assert_eq!(report.stats.wardrobe_items, 2);
        assert_eq!(report.stats.wear_now_combos, report.tabs.wear_now.len());
    }

    #[test]
    fn test_pipeline_total_over_empty_inputs() {
        let pipeline = ScanPipeline::new(Config::default());
        let report = pipeline.run(
            &scanned(Category::Dresses),
            &[],
            FitPreference::NoPreference,
            None,
        );

        assert!(report.confidence.evaluated);
        assert!(!report.wear_now.can_form_combos);
        assert!(report.wear_now.empty_reason.is_some());
    }
}
