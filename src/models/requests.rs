use crate::models::domain::{Recipe, RecipeIngredient};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to analyze a meal photo and/or free-text description
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeMealRequest {
    /// Base64-encoded image, forwarded to the detector backends
    #[serde(default, alias = "image", rename = "imageBase64")]
    pub image_base64: Option<String>,
    /// Scalar applied to every reference portion; 1.0 = standard portion
    #[serde(default = "default_portion")]
    pub portion: f64,
    /// Comma-separated medical conditions, e.g. "diabetic,high_bp"
    #[serde(default)]
    pub conditions: String,
    /// Comma-separated food names merged into the detected label set
    #[serde(default)]
    pub description: String,
    /// Restrict detection to one named detector; all configured when absent
    #[serde(default)]
    pub detector: Option<String>,
}

fn default_portion() -> f64 {
    1.0
}

/// Request to add an inventory item manually
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AddInventoryItemRequest {
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default = "default_shelf_life", rename = "shelfLifeDays")]
    pub shelf_life_days: i64,
}

fn default_category() -> String {
    "Unknown".to_string()
}

fn default_quantity() -> u32 {
    1
}

fn default_shelf_life() -> i64 {
    5
}

/// Request carrying a single base64 image (ingredient photo or grocery bill)
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ScanRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "image", rename = "imageBase64")]
    pub image_base64: String,
}

/// Request to generate a recipe from available ingredients
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GenerateRecipeRequest {
    #[validate(length(min = 1))]
    pub ingredients: Vec<String>,
    #[serde(default = "default_diet")]
    pub diet: String,
    #[serde(default = "default_servings")]
    pub servings: u32,
    #[serde(default)]
    pub calories: Option<u32>,
    /// Dietary preferences used for restricted-ingredient filtering
    #[serde(default)]
    pub preferences: Vec<String>,
}

fn default_diet() -> String {
    "any".to_string()
}

fn default_servings() -> u32 {
    1
}

/// Request to rework an existing recipe after ingredient edits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdjustRecipeRequest {
    pub recipe: Recipe,
    #[serde(default, rename = "excludedItems")]
    pub excluded_items: Vec<String>,
    #[serde(default, rename = "addedItems")]
    pub added_items: Vec<RecipeIngredient>,
    #[serde(default)]
    pub preferences: Vec<String>,
}

/// Request for replacement suggestions for one ingredient
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ReplacementRequest {
    #[validate(length(min = 1))]
    pub ingredient: String,
    pub recipe: Recipe,
    #[serde(default)]
    pub preferences: Vec<String>,
    #[serde(default, rename = "removedItems")]
    pub removed_items: Vec<String>,
}
