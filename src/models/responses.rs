use crate::models::domain::{
    DietRecommendations, InventoryItem, Macros, Micronutrients, ScoreBreakdown, Suitability,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Response for the meal analysis endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealAnalysisResponse {
    pub detected_food: Vec<String>,
    pub estimated_calories: i64,
    pub macros: Macros,
    pub micronutrients: Micronutrients,
    pub glycemic_index: Option<f64>,
    pub diet_suitability: HashMap<String, Suitability>,
    pub overall_comment: String,
    pub diet_recommendations: DietRecommendations,
    pub health_score: Option<ScoreBreakdown>,
    pub missing_nutrients: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_with_boxes: Option<String>,
}

impl MealAnalysisResponse {
    /// Canonical degenerate result when fusion plus description yield no labels.
    /// Aggregation, scoring, and advice generation are all skipped.
    pub fn no_food() -> Self {
        Self {
            detected_food: vec![],
            estimated_calories: 0,
            macros: Macros::default(),
            micronutrients: Micronutrients::default(),
            glycemic_index: None,
            diet_suitability: HashMap::new(),
            overall_comment: "No food detected".to_string(),
            diet_recommendations: DietRecommendations::default(),
            health_score: None,
            missing_nutrients: vec![],
            image_with_boxes: None,
        }
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

/// Response for the bill scan endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanBillResponse {
    pub added: Vec<InventoryItem>,
}
