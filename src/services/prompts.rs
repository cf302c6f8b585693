//! Prompt builders for the structured-generation operations. Pure string
//! templating; every prompt demands a single JSON object so the client's
//! extraction step has something to grab even when the model adds prose.

use crate::models::{AggregatedNutrition, Recipe, RecipeIngredient};

/// Prompt for meal advice enrichment: glycemic index, fiber/vitamin C
/// estimates, per-condition suitability, and diet recommendations
pub fn advice_prompt(labels: &[String], nutrition: &AggregatedNutrition, conditions: &[String]) -> String {
    format!(
        r#"Only JSON. Enrich this meal analysis. Values must be realistic for the foods given.

Foods: {foods}
Estimated calories: {calories}
Macros (g): protein {protein}, carbs {carbs}, fat {fat}
Conditions: {conditions}

Schema:
{{
  "glycemic_index": number,
  "fiber_g": number,
  "vitamin_c_mg": number,
  "diet_suitability": {{ "<condition>": "safe"|"moderate"|"avoid"|"good"|"restricted" }},
  "overall_comment": "string",
  "diet_recommendations": {{
    "add": ["foods to improve nutrition"],
    "reduce": ["unhealthy parts"],
    "pairings": ["healthy combinations"],
    "overall_comment": "short advice"
  }}
}}"#,
        foods = labels.join(", "),
        calories = nutrition.estimated_calories,
        protein = nutrition.macros.protein_g,
        carbs = nutrition.macros.carbs_g,
        fat = nutrition.macros.fat_g,
        conditions = conditions.join(", "),
    )
}

/// Prompt for recipe generation from freshness-weighted ingredients
pub fn recipe_prompt(
    weighted_ingredients: &[(String, u8)],
    diet: &str,
    servings: u32,
    calories: Option<u32>,
) -> String {
    let ingredient_lines: Vec<String> = weighted_ingredients
        .iter()
        .map(|(name, weight)| format!("- {} (freshness {})", name, weight))
        .collect();

    format!(
        r#"Generate a realistic, cookable recipe using ONLY these ingredients, preferring higher freshness scores:

{ingredients}

Diet: {diet}
Servings: {servings}
Target calories: {calories}

Return ONLY a single valid JSON object. No markdown, no explanation:
{{
  "title": "",
  "servings": 0,
  "ingredients": [{{"name": "", "qty": ""}}],
  "steps": [],
  "tags": [],
  "estimated_calories": 0
}}"#,
        ingredients = ingredient_lines.join("\n"),
        diet = diet,
        servings = servings,
        calories = calories.map_or("flexible".to_string(), |c| c.to_string()),
    )
}

/// Prompt to rewrite a recipe's steps after ingredient edits
pub fn adjust_prompt(
    recipe: &Recipe,
    excluded: &[String],
    added: &[RecipeIngredient],
    preferences: &[String],
) -> String {
    let kept: Vec<String> = recipe
        .ingredients
        .iter()
        .map(|i| format!("{} ({})", i.name, i.qty))
        .collect();
    let added_lines: Vec<String> = added
        .iter()
        .map(|i| format!("{} ({})", i.name, i.qty))
        .collect();

    format!(
        r#"Only JSON. Rewrite this recipe after the ingredient changes below. Keep it cookable.

Title: {title}
Servings: {servings}
Current ingredients: {kept}
Removed: {removed}
Added: {added}
Preferences: {preferences}

Return ONLY a single valid JSON object with the same schema as the original recipe:
{{
  "title": "",
  "servings": 0,
  "ingredients": [{{"name": "", "qty": ""}}],
  "steps": [],
  "tags": [],
  "estimated_calories": 0
}}"#,
        title = recipe.title,
        servings = recipe.servings,
        kept = kept.join(", "),
        removed = excluded.join(", "),
        added = added_lines.join(", "),
        preferences = preferences.join(", "),
    )
}

/// Prompt for replacement suggestions for one removed ingredient
pub fn replacement_prompt(
    ingredient: &str,
    recipe: &Recipe,
    preferences: &[String],
    removed: &[String],
) -> String {
    format!(
        r#"Only JSON. Suggest up to 3 replacements for "{ingredient}" in the recipe "{title}".
Do not suggest anything already removed: {removed}
Respect preferences: {preferences}

Schema:
{{
  "ingredient": "{ingredient}",
  "replacements": [{{"name": "", "reason": ""}}]
}}"#,
        ingredient = ingredient,
        title = recipe.title,
        removed = removed.join(", "),
        preferences = preferences.join(", "),
    )
}

/// Instruction sent with a grocery-bill image for OCR extraction
pub const BILL_OCR_PROMPT: &str = r#"Read this grocery bill image and list the purchased food items.
Return ONLY a single valid JSON object, no markdown:
{
  "items": ["item name", "item name"]
}
Ignore prices, totals, quantities, and store metadata."#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AggregatedNutrition;

    #[test]
    fn test_advice_prompt_includes_meal() {
        let nutrition = AggregatedNutrition {
            recognized_items: vec!["idli".to_string()],
            estimated_calories: 140,
            ..Default::default()
        };

        let prompt = advice_prompt(
            &["idli".to_string(), "chutney".to_string()],
            &nutrition,
            &["diabetic".to_string()],
        );

        assert!(prompt.contains("idli, chutney"));
        assert!(prompt.contains("140"));
        assert!(prompt.contains("diabetic"));
        assert!(prompt.contains("diet_recommendations"));
    }

    #[test]
    fn test_recipe_prompt_flexible_calories() {
        let prompt = recipe_prompt(&[("rice".to_string(), 90)], "vegan", 2, None);

        assert!(prompt.contains("rice (freshness 90)"));
        assert!(prompt.contains("flexible"));
    }
}
