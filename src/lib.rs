//! PlateSense - Food photo analysis and nutrition scoring service
//!
//! This library fuses detections from multiple food-recognition backends,
//! aggregates reference nutrition for the recognized plate, and computes a
//! 0-100 composite health score with deficiency flags.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{fusion::fuse, Evaluation, MealAnalyzer};
pub use crate::models::{
    AggregatedNutrition, AnalyzeMealRequest, Detection, MealAnalysisResponse, ScoreBreakdown,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        // Verify that the library exports work correctly
        let analyzer = MealAnalyzer::with_defaults();
        let result = analyzer.evaluate(&[], &[], 1.0).unwrap();
        assert!(matches!(result, Evaluation::NoFood));
    }
}
