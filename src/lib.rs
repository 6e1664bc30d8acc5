//! Pairfit - wardrobe matching and recommendation core
//!
//! Scores a scanned clothing item against the pieces a user already owns,
//! classifies the overall verdict through a rule cascade, assembles complete
//! outfit combinations under category-slot constraints, and resolves it all
//! into a presentation-agnostic render model. Pure and synchronous: no I/O,
//! no rendering, no persistence.

pub mod catalog;
pub mod cli;
pub mod combos;
pub mod confidence;
pub mod config;
pub mod error;
pub mod item;
pub mod pipeline;
pub mod render;
pub mod verdict;

pub use error::{PairfitError, Result};
