// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    AggregatedNutrition, Detection, DietRecommendations, FreshnessStatus, FusedDetection,
    HealthScoreInputs, IngredientReplacement, InventoryItem, Macros, MealAdvice,
    MicronutrientProfile, Micronutrients, NutritionRecord, Recipe, RecipeIngredient,
    ReplacementSuggestions, ScoreBreakdown, ScoringThresholds, Suitability,
};
pub use requests::{
    AddInventoryItemRequest, AdjustRecipeRequest, AnalyzeMealRequest, GenerateRecipeRequest,
    ReplacementRequest, ScanRequest,
};
pub use responses::{ErrorResponse, HealthResponse, MealAnalysisResponse, ScanBillResponse};
