use crate::models::{
    HealthScoreInputs, Macros, MicronutrientProfile, ScoreBreakdown, ScoringThresholds,
    Suitability,
};

/// Fast-food and dessert terms that penalize the final score.
/// Matching is substring-based over the space-joined lowered label string.
pub const JUNK_KEYWORDS: &[&str] = &[
    "burger",
    "pizza",
    "fries",
    "samosa",
    "pakora",
    "kachori",
    "chips",
    "coke",
    "soft drink",
    "cola",
    "pastry",
    "donut",
    "cake",
    "fried",
    "roll",
    "bhaji",
    "tikki",
    "maggi",
];

/// Computes the 0-100 composite health score.
///
/// State-free and error-free: every optional input has a documented default,
/// so scoring cannot fail on a sparsely populated meal.
#[derive(Debug, Clone)]
pub struct HealthScorer {
    thresholds: ScoringThresholds,
}

impl HealthScorer {
    pub fn new(thresholds: ScoringThresholds) -> Self {
        Self { thresholds }
    }

    pub fn with_default_thresholds() -> Self {
        Self::new(ScoringThresholds::default())
    }

    /// Combine macro balance, micronutrient density, food quality, and
    /// medical suitability, then subtract the junk penalty. The penalty is
    /// applied last so junk food can drag down even a macro-balanced meal.
    pub fn score(&self, inputs: &HealthScoreInputs) -> ScoreBreakdown {
        let macro_score = macro_balance_score(&inputs.macros);
        let micro_score = micronutrient_score(&inputs.micronutrients);
        let quality_score = self.quality_score(inputs);
        let suitability_score = suitability_score(inputs);
        let junk_penalty = self.junk_penalty(&inputs.detected_food);

        let total = macro_score + micro_score + quality_score + suitability_score - junk_penalty;
        let final_score = total.round().clamp(0.0, 100.0) as u8;

        ScoreBreakdown {
            macro_score,
            micro_score,
            quality_score,
            suitability_score,
            junk_penalty,
            final_score,
        }
    }

    /// Food quality (0-25): penalizes heavy calories, high glycemic index,
    /// high fat, and low fiber. Absent GI and fiber default to zero.
    fn quality_score(&self, inputs: &HealthScoreInputs) -> f64 {
        let mut score: f64 = 25.0;

        if inputs.estimated_calories > self.thresholds.calorie_limit {
            score -= 10.0;
        }
        if inputs.glycemic_index.unwrap_or(0.0) > self.thresholds.glycemic_limit {
            score -= 7.0;
        }
        if inputs.macros.fat_g > self.thresholds.fat_limit_g {
            score -= 5.0;
        }
        if inputs.fiber_g.unwrap_or(0.0) < self.thresholds.fiber_floor_g {
            score -= 3.0;
        }

        score.max(0.0)
    }

    /// Junk penalty (0-cap): each distinct vocabulary keyword found in the
    /// detected labels costs a fixed number of points
    pub fn junk_penalty(&self, labels: &[String]) -> f64 {
        let lowered = labels.join(" ").to_lowercase();

        let mut penalty = 0.0;
        for keyword in JUNK_KEYWORDS {
            if lowered.contains(keyword) {
                penalty += self.thresholds.junk_hit_penalty;
            }
        }

        penalty.min(self.thresholds.junk_penalty_cap)
    }
}

impl Default for HealthScorer {
    fn default() -> Self {
        Self::with_default_thresholds()
    }
}

/// Macro balance (0-40): converts grams to calories (4/4/9 per gram) and
/// docks 10 points per macro whose share of macro-calories falls outside its
/// band (protein 20-35%, carbs 40-60%, fat 20-30%). Zero macro-calories
/// scores zero.
pub fn macro_balance_score(macros: &Macros) -> f64 {
    let protein_cal = macros.protein_g * 4.0;
    let carbs_cal = macros.carbs_g * 4.0;
    let fat_cal = macros.fat_g * 9.0;

    let total = protein_cal + carbs_cal + fat_cal;
    if total <= 0.0 {
        return 0.0;
    }

    let protein_pct = protein_cal / total * 100.0;
    let carbs_pct = carbs_cal / total * 100.0;
    let fat_pct = fat_cal / total * 100.0;

    let mut score: f64 = 40.0;

    if !(20.0..=35.0).contains(&protein_pct) {
        score -= 10.0;
    }
    if !(40.0..=60.0).contains(&carbs_pct) {
        score -= 10.0;
    }
    if !(20.0..=30.0).contains(&fat_pct) {
        score -= 10.0;
    }

    score.max(0.0)
}

/// Micronutrient density (0-25): fraction of tracked micronutrients that are
/// not deficient. Nothing tracked scores zero.
pub fn micronutrient_score(micros: &MicronutrientProfile) -> f64 {
    let tracked = micros.tracked_count();
    if tracked == 0 {
        return 0.0;
    }

    let deficient = missing_nutrients(micros).len();
    let score = 25.0 * (tracked as f64 - deficient as f64) / tracked as f64;

    score.clamp(0.0, 25.0)
}

/// Medical suitability (0-10): +2 per condition marked good, -4 per condition
/// marked restricted
pub fn suitability_score(inputs: &HealthScoreInputs) -> f64 {
    let good = inputs
        .diet_suitability
        .values()
        .filter(|v| **v == Suitability::Good)
        .count() as f64;
    let restricted = inputs
        .diet_suitability
        .values()
        .filter(|v| **v == Suitability::Restricted)
        .count() as f64;

    (10.0 + good * 2.0 - restricted * 4.0).clamp(0.0, 10.0)
}

/// Deficiency flags for the nutrients the app surfaces to the user.
///
/// A nutrient is flagged only when its *measured* value is below threshold;
/// an absent value substitutes a passing default (6 / 7 / 30 / 200), so
/// unmeasured nutrients are never flagged. This optimistic default is the
/// opposite of the zero default used in aggregation and quality scoring, and
/// is preserved deliberately.
pub fn missing_nutrients(micros: &MicronutrientProfile) -> Vec<String> {
    let mut missing = Vec::new();

    if micros.iron_mg.unwrap_or(6.0) < 2.0 {
        missing.push("Iron".to_string());
    }
    if micros.fiber_g.unwrap_or(7.0) < 3.0 {
        missing.push("Fiber".to_string());
    }
    if micros.vitamin_c_mg.unwrap_or(30.0) < 10.0 {
        missing.push("Vitamin C".to_string());
    }
    if micros.calcium_mg.unwrap_or(200.0) < 100.0 {
        missing.push("Calcium".to_string());
    }

    missing
}
