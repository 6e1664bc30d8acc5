//! Plain data records exchanged with the upstream collaborators
//!
//! The image-analysis collaborator supplies [`ScannedItem`], the persistence
//! collaborator supplies [`WardrobeItem`] snapshots. Both are read-only to
//! this core. Fields that upstream analysis may omit carry serde defaults so
//! incomplete records degrade to coarser scoring instead of failing.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::{Category, ColorProfile, ColorRef, Formality, StyleFamily, TextureType};

/// How risky an item is to style, per upstream analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StylingRisk {
    Low,
    #[default]
    Medium,
    High,
}

/// Detected silhouette of the item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Silhouette {
    Fitted,
    Straight,
    Relaxed,
    Oversized,
    Flowy,
}

/// The user's stated fit preference, supplied by the calling layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitPreference {
    Fitted,
    Relaxed,
    #[default]
    NoPreference,
}

impl FitPreference {
    /// Whether this preference conflicts with a detected silhouette
    pub fn conflicts_with(&self, silhouette: Silhouette) -> bool {
        match self {
            FitPreference::Fitted => {
                matches!(silhouette, Silhouette::Oversized | Silhouette::Relaxed)
            }
            FitPreference::Relaxed => matches!(silhouette, Silhouette::Fitted),
            FitPreference::NoPreference => false,
        }
    }
}

/// Category-specific attributes of a scanned item
///
/// The schema varies by category upstream; only `styling_risk` is always
/// present, so everything else is optional here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemSignals {
    #[serde(default)]
    pub styling_risk: StylingRisk,
    #[serde(default)]
    pub silhouette: Option<Silhouette>,
    #[serde(default)]
    pub length: Option<String>,
    #[serde(default)]
    pub style_notes: Vec<String>,
}

/// Confidence-signal metadata used only as scoring inputs
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignalProfile {
    #[serde(default)]
    pub color_profile: Option<ColorProfile>,
    #[serde(default)]
    pub style_family: Option<StyleFamily>,
    #[serde(default)]
    pub formality: Option<Formality>,
    #[serde(default)]
    pub texture: Option<TextureType>,
}

/// The item just scanned, immutable once produced upstream
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScannedItem {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub category: Category,
    #[serde(default)]
    pub colors: Vec<ColorRef>,
    #[serde(default)]
    pub style_tags: Vec<String>,
    #[serde(default)]
    pub signals: ItemSignals,
    #[serde(default)]
    pub profile: SignalProfile,
    /// Whether the upstream analysis judged the photo usable
    pub context_sufficient: bool,
    #[serde(default = "default_true")]
    pub is_fashion_item: bool,
}

fn default_true() -> bool {
    true
}

/// An owned item from the persistence collaborator's snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WardrobeItem {
    pub id: Uuid,
    pub category: Category,
    #[serde(default)]
    pub colors: Vec<ColorRef>,
    #[serde(default)]
    pub style_tags: Vec<String>,
    #[serde(default)]
    pub profile: SignalProfile,
    #[serde(default)]
    pub image_ref: Option<String>,
}
