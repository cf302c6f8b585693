// Core algorithm exports
pub mod analyzer;
pub mod fusion;
pub mod normalize;
pub mod nutrition;
pub mod recipes;
pub mod scoring;

pub use analyzer::{Evaluation, MealAnalyzer, PlateEvaluation};
pub use fusion::{fuse, FusedDetectionSet};
pub use normalize::{parse_comma_list, Normalizer};
pub use nutrition::{aggregate, NutritionTable};
pub use scoring::{missing_nutrients, HealthScorer, JUNK_KEYWORDS};

use thiserror::Error;

/// Caller contract violations rejected before the pipeline runs.
/// The pipeline itself (fusion, aggregation, scoring) is total and never
/// needs to report an internal error.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("portion multiplier must be positive, got {0}")]
    InvalidPortion(f64),
}
