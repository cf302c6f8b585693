use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single bounding-box prediction from one detector
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Detection {
    pub label: String,
    pub confidence: f64,
    #[serde(rename = "bbox")]
    pub bounding_box: [f64; 4],
}

impl Detection {
    pub fn new(label: impl Into<String>, confidence: f64, bounding_box: [f64; 4]) -> Self {
        Self {
            label: label.into(),
            confidence,
            bounding_box,
        }
    }
}

/// The entry kept for one canonical label after fusion: the highest-confidence
/// occurrence observed across all source detectors
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FusedDetection {
    pub confidence: f64,
    #[serde(rename = "bbox")]
    pub bounding_box: [f64; 4],
}

/// Per-standard-portion reference values for one canonical food
#[derive(Debug, Clone, Copy)]
pub struct NutritionRecord {
    pub calories: f64,
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
    pub iron_mg: f64,
    pub calcium_mg: f64,
    pub magnesium_mg: f64,
    pub potassium_mg: f64,
}

/// Macronutrient totals in grams
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Macros {
    pub protein_g: f64,
    pub carbs_g: f64,
    pub fat_g: f64,
}

/// Micronutrient totals in milligrams
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Micronutrients {
    pub iron_mg: f64,
    pub calcium_mg: f64,
    pub magnesium_mg: f64,
    pub potassium_mg: f64,
}

/// Nutrition totals for one analysis request, scaled by the portion multiplier.
/// Calories are rounded to the nearest integer, everything else to one decimal.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AggregatedNutrition {
    pub recognized_items: Vec<String>,
    pub estimated_calories: i64,
    pub macros: Macros,
    pub micronutrients: Micronutrients,
}

/// Suitability verdict for one medical condition, as produced by the advice
/// generator. The frontend uses both the safe/moderate/avoid and the
/// good/restricted vocabularies, so both are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Suitability {
    Safe,
    Moderate,
    Avoid,
    Good,
    Restricted,
}

/// Tracked micronutrient values. `None` means the value was never measured,
/// which the deficiency check treats optimistically (it substitutes a passing
/// value), while aggregation and the quality sub-score default to zero. That
/// asymmetry is deliberate and must not be unified.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct MicronutrientProfile {
    pub iron_mg: Option<f64>,
    pub calcium_mg: Option<f64>,
    pub magnesium_mg: Option<f64>,
    pub potassium_mg: Option<f64>,
    pub fiber_g: Option<f64>,
    pub vitamin_c_mg: Option<f64>,
}

impl MicronutrientProfile {
    /// Number of micronutrients actually measured for this meal
    pub fn tracked_count(&self) -> usize {
        [
            self.iron_mg,
            self.calcium_mg,
            self.magnesium_mg,
            self.potassium_mg,
            self.fiber_g,
            self.vitamin_c_mg,
        ]
        .iter()
        .filter(|v| v.is_some())
        .count()
    }
}

/// Everything the health scorer reads. Absent optional fields fall back to
/// the documented per-field default, so scoring never fails.
#[derive(Debug, Clone, Default)]
pub struct HealthScoreInputs {
    pub detected_food: Vec<String>,
    pub estimated_calories: f64,
    pub macros: Macros,
    pub fiber_g: Option<f64>,
    pub micronutrients: MicronutrientProfile,
    pub glycemic_index: Option<f64>,
    pub diet_suitability: HashMap<String, Suitability>,
}

/// Composite health score with its sub-scores. The junk penalty is applied
/// after the four sub-scores so it can depress an otherwise balanced meal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// 0-40
    pub macro_score: f64,
    /// 0-25
    pub micro_score: f64,
    /// 0-25
    pub quality_score: f64,
    /// 0-10
    pub suitability_score: f64,
    /// 0-25, subtractive
    pub junk_penalty: f64,
    /// clamp(round(sum - penalty), 0, 100)
    pub final_score: u8,
}

/// Thresholds for the quality sub-score and junk penalty
#[derive(Debug, Clone, Copy)]
pub struct ScoringThresholds {
    pub calorie_limit: f64,
    pub glycemic_limit: f64,
    pub fat_limit_g: f64,
    pub fiber_floor_g: f64,
    pub junk_hit_penalty: f64,
    pub junk_penalty_cap: f64,
}

impl Default for ScoringThresholds {
    fn default() -> Self {
        Self {
            calorie_limit: 650.0,
            glycemic_limit: 70.0,
            fat_limit_g: 25.0,
            fiber_floor_g: 5.0,
            junk_hit_penalty: 7.0,
            junk_penalty_cap: 25.0,
        }
    }
}

/// Recommendation block returned by the advice generator (or the canned
/// fallback when the generator is unavailable)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DietRecommendations {
    #[serde(default)]
    pub add: Vec<String>,
    #[serde(default)]
    pub reduce: Vec<String>,
    #[serde(default)]
    pub pairings: Vec<String>,
    #[serde(default)]
    pub overall_comment: String,
}

/// Structured enrichment produced by the advice generator
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MealAdvice {
    #[serde(default)]
    pub glycemic_index: Option<f64>,
    #[serde(default)]
    pub fiber_g: Option<f64>,
    #[serde(default)]
    pub vitamin_c_mg: Option<f64>,
    #[serde(default)]
    pub diet_suitability: HashMap<String, Suitability>,
    #[serde(default)]
    pub overall_comment: String,
    pub diet_recommendations: DietRecommendations,
}

/// Freshness of an inventory item, derived from days to expiry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FreshnessStatus {
    Fresh,
    Expiring,
    Expired,
}

/// A grocery item in the volatile inventory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: uuid::Uuid,
    pub name: String,
    pub category: String,
    pub quantity: u32,
    #[serde(rename = "expiryDate")]
    pub expiry_date: chrono::NaiveDate,
    pub status: FreshnessStatus,
    #[serde(rename = "daysLeft")]
    pub days_left: i64,
}

/// One ingredient line of a recipe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeIngredient {
    pub name: String,
    #[serde(default)]
    pub qty: String,
}

/// A generated (or adjusted) recipe
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    pub title: String,
    pub servings: u32,
    pub ingredients: Vec<RecipeIngredient>,
    pub steps: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub estimated_calories: Option<f64>,
}

/// A replacement suggestion for one removed ingredient
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngredientReplacement {
    pub name: String,
    #[serde(default)]
    pub reason: String,
}

/// Replacement suggestions returned by the generator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplacementSuggestions {
    pub ingredient: String,
    pub replacements: Vec<IngredientReplacement>,
}
