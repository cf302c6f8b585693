use crate::core::fusion::{fuse, FusedDetectionSet};
use crate::core::normalize::Normalizer;
use crate::core::nutrition::{aggregate, NutritionTable};
use crate::core::scoring::{missing_nutrients, HealthScorer};
use crate::core::AnalysisError;
use crate::models::{
    AggregatedNutrition, Detection, HealthScoreInputs, MealAdvice, MicronutrientProfile,
    ScoreBreakdown,
};

/// Outcome of evaluating one analysis request
#[derive(Debug)]
pub enum Evaluation {
    /// Fusion plus the description yielded no labels at all; the caller
    /// returns the canonical empty result without scoring or advice
    NoFood,
    Plate(PlateEvaluation),
}

/// A successfully evaluated plate, ready for advice enrichment and scoring
#[derive(Debug)]
pub struct PlateEvaluation {
    pub fused: FusedDetectionSet,
    /// Canonical labels: fused detections first, then description extras,
    /// deduplicated, in first-seen order
    pub labels: Vec<String>,
    pub nutrition: AggregatedNutrition,
}

/// Sequences the analysis pipeline: fusion, description merge, aggregation,
/// and scoring.
///
/// # Pipeline stages
/// 1. Fuse all detectors' outputs into one deduplicated label set
/// 2. Merge described foods into the label set
/// 3. Short-circuit when nothing was detected or described
/// 4. Aggregate reference nutrition scaled by the portion multiplier
/// 5. After advice enrichment (or its fallback), score and flag deficiencies
///
/// Holds only the immutable reference tables, so one instance is shared
/// across all workers.
#[derive(Debug, Clone)]
pub struct MealAnalyzer {
    normalizer: Normalizer,
    table: NutritionTable,
    scorer: HealthScorer,
}

impl MealAnalyzer {
    pub fn new(normalizer: Normalizer, table: NutritionTable, scorer: HealthScorer) -> Self {
        Self {
            normalizer,
            table,
            scorer,
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(
            Normalizer::with_defaults(),
            NutritionTable::with_defaults(),
            HealthScorer::with_default_thresholds(),
        )
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Stages 1-4. `described` carries the tokens parsed from the free-text
    /// food description; they join the label set without bounding boxes.
    pub fn evaluate(
        &self,
        detection_lists: &[Vec<Detection>],
        described: &[String],
        portion: f64,
    ) -> Result<Evaluation, AnalysisError> {
        let fused = fuse(&self.normalizer, detection_lists);

        let mut labels: Vec<String> = fused.labels().to_vec();
        for raw in described {
            let canonical = self.normalizer.normalize(raw);
            if !canonical.is_empty() && !labels.contains(&canonical) {
                labels.push(canonical);
            }
        }

        if labels.is_empty() {
            return Ok(Evaluation::NoFood);
        }

        let nutrition = aggregate(&self.table, &self.normalizer, &labels, portion)?;

        Ok(Evaluation::Plate(PlateEvaluation {
            fused,
            labels,
            nutrition,
        }))
    }

    /// Stage 5: score the plate once advice enrichment is settled. `advice`
    /// is `None` when the generator was unavailable; every enriched field
    /// then falls back to its documented default.
    pub fn score_plate(
        &self,
        plate: &PlateEvaluation,
        advice: Option<&MealAdvice>,
    ) -> (ScoreBreakdown, Vec<String>) {
        let micronutrients = MicronutrientProfile {
            iron_mg: Some(plate.nutrition.micronutrients.iron_mg),
            calcium_mg: Some(plate.nutrition.micronutrients.calcium_mg),
            magnesium_mg: Some(plate.nutrition.micronutrients.magnesium_mg),
            potassium_mg: Some(plate.nutrition.micronutrients.potassium_mg),
            fiber_g: advice.and_then(|a| a.fiber_g),
            vitamin_c_mg: advice.and_then(|a| a.vitamin_c_mg),
        };

        let inputs = HealthScoreInputs {
            detected_food: plate.labels.clone(),
            estimated_calories: plate.nutrition.estimated_calories as f64,
            macros: plate.nutrition.macros,
            fiber_g: advice.and_then(|a| a.fiber_g),
            micronutrients,
            glycemic_index: advice.and_then(|a| a.glycemic_index),
            diet_suitability: advice.map(|a| a.diet_suitability.clone()).unwrap_or_default(),
        };

        let breakdown = self.scorer.score(&inputs);
        let missing = missing_nutrients(&inputs.micronutrients);

        (breakdown, missing)
    }
}

impl Default for MealAnalyzer {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOX: [f64; 4] = [0.0, 0.0, 10.0, 10.0];

    #[test]
    fn test_evaluate_no_food_short_circuits() {
        let analyzer = MealAnalyzer::with_defaults();

        let result = analyzer.evaluate(&[], &[], 1.0).unwrap();
        assert!(matches!(result, Evaluation::NoFood));

        // Portion is not even inspected on the no-food path
        let result = analyzer.evaluate(&[vec![]], &[], -3.0).unwrap();
        assert!(matches!(result, Evaluation::NoFood));
    }

    #[test]
    fn test_evaluate_merges_description() {
        let analyzer = MealAnalyzer::with_defaults();
        let detections = vec![vec![Detection::new("idli", 0.8, BOX)]];
        let described = vec!["chutney".to_string(), "idli".to_string()];

        let Evaluation::Plate(plate) = analyzer.evaluate(&detections, &described, 1.0).unwrap()
        else {
            panic!("expected a plate");
        };

        // Described duplicate of a detected label does not repeat
        assert_eq!(plate.labels, ["idli", "chutney"]);
        assert_eq!(plate.nutrition.estimated_calories, 140);
        assert_eq!(plate.fused.len(), 1);
    }

    #[test]
    fn test_evaluate_description_only() {
        let analyzer = MealAnalyzer::with_defaults();
        let described = vec!["dal".to_string(), "rice".to_string()];

        let Evaluation::Plate(plate) = analyzer.evaluate(&[], &described, 1.0).unwrap() else {
            panic!("expected a plate");
        };

        assert!(plate.fused.is_empty());
        assert_eq!(plate.nutrition.recognized_items, ["dal", "rice"]);
    }

    #[test]
    fn test_evaluate_rejects_bad_portion() {
        let analyzer = MealAnalyzer::with_defaults();
        let described = vec!["idli".to_string()];

        assert!(analyzer.evaluate(&[], &described, 0.0).is_err());
    }

    #[test]
    fn test_score_plate_without_advice() {
        let analyzer = MealAnalyzer::with_defaults();
        let described = vec!["idli".to_string(), "chutney".to_string()];

        let Evaluation::Plate(plate) = analyzer.evaluate(&[], &described, 1.0).unwrap() else {
            panic!("expected a plate");
        };

        let (breakdown, missing) = analyzer.score_plate(&plate, None);

        assert!(breakdown.final_score <= 100);
        // Iron is measured and low for this plate; fiber/vitamin C are
        // unmeasured and default to passing
        assert!(missing.contains(&"Iron".to_string()));
        assert!(!missing.contains(&"Fiber".to_string()));
        assert!(!missing.contains(&"Vitamin C".to_string()));
    }

    #[test]
    fn test_score_plate_uses_advice_enrichment() {
        let analyzer = MealAnalyzer::with_defaults();
        let described = vec!["rice".to_string()];

        let Evaluation::Plate(plate) = analyzer.evaluate(&[], &described, 1.0).unwrap() else {
            panic!("expected a plate");
        };

        let (plain, _) = analyzer.score_plate(&plate, None);

        let advice = MealAdvice {
            glycemic_index: Some(90.0),
            ..Default::default()
        };
        let (enriched, _) = analyzer.score_plate(&plate, Some(&advice));

        // High GI docks the quality sub-score
        assert!(enriched.quality_score < plain.quality_score);
    }
}
