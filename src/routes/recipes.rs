use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::core::recipes::{filter_restricted, freshness_weight, restricted_for};
use crate::models::{
    AdjustRecipeRequest, ErrorResponse, GenerateRecipeRequest, IngredientReplacement, Recipe,
    RecipeIngredient, ReplacementRequest, ReplacementSuggestions,
};
use crate::routes::analysis::AppState;

/// Configure recipe routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/recipes/generate", web::post().to(generate_recipe))
        .route("/recipes/adjust", web::post().to(adjust_recipe))
        .route("/recipes/replacement", web::post().to(suggest_replacement));
}

/// Generate a recipe from available ingredients
///
/// POST /api/v1/recipes/generate
pub async fn generate_recipe(
    state: web::Data<AppState>,
    req: web::Json<GenerateRecipeRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    // Drop restricted ingredients before prompting, then weight the rest by
    // inventory freshness so near-expiry stock is used first
    let restricted = restricted_for(&req.preferences);
    let weighted: Vec<(String, u8)> = req
        .ingredients
        .iter()
        .filter(|name| !restricted.contains(&name.to_lowercase()))
        .map(|name| {
            let status = state.inventory.find(name).map(|item| item.status);
            (name.clone(), freshness_weight(status))
        })
        .collect();

    if weighted.is_empty() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "No usable ingredients".to_string(),
            message: "every provided ingredient is restricted by the preferences".to_string(),
            status_code: 400,
        });
    }

    let recipe = match state
        .llm
        .generate_recipe(&weighted, &req.diet, req.servings, req.calories)
        .await
    {
        Ok(recipe) => recipe,
        Err(e) => {
            tracing::warn!("Recipe generation unavailable, using fallback: {}", e);
            fallback_recipe(&weighted, req.servings)
        }
    };

    // The generator is prompted with the restrictions but re-filtered anyway
    let mut recipe = recipe;
    recipe.ingredients = filter_restricted(&req.preferences, recipe.ingredients);

    HttpResponse::Ok().json(recipe)
}

/// Rework a recipe after ingredient edits
///
/// POST /api/v1/recipes/adjust
pub async fn adjust_recipe(
    state: web::Data<AppState>,
    req: web::Json<AdjustRecipeRequest>,
) -> impl Responder {
    let adjusted = match state.llm.adjust_recipe(&req).await {
        Ok(recipe) => recipe,
        Err(e) => {
            tracing::warn!("Recipe adjustment unavailable, editing locally: {}", e);
            local_adjust(&req)
        }
    };

    let adjusted = Recipe {
        ingredients: filter_restricted(&req.preferences, adjusted.ingredients),
        ..adjusted
    };

    HttpResponse::Ok().json(adjusted)
}

/// Suggest replacements for one removed ingredient
///
/// POST /api/v1/recipes/replacement
pub async fn suggest_replacement(
    state: web::Data<AppState>,
    req: web::Json<ReplacementRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let suggestions = match state
        .llm
        .suggest_replacement(&req.ingredient, &req.recipe, &req.preferences, &req.removed_items)
        .await
    {
        Ok(suggestions) => suggestions,
        Err(e) => {
            tracing::warn!("Replacement suggestion unavailable: {}", e);
            ReplacementSuggestions {
                ingredient: req.ingredient.clone(),
                replacements: vec![IngredientReplacement {
                    name: "None".to_string(),
                    reason: "suggestion service unavailable".to_string(),
                }],
            }
        }
    };

    HttpResponse::Ok().json(suggestions)
}

/// Minimal cookable recipe assembled locally when the generator is down
fn fallback_recipe(weighted: &[(String, u8)], servings: u32) -> Recipe {
    let mut names: Vec<&str> = weighted.iter().map(|(name, _)| name.as_str()).collect();
    names.sort_by_key(|name| {
        std::cmp::Reverse(
            weighted
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, w)| *w)
                .unwrap_or(0),
        )
    });

    Recipe {
        title: format!("Simple {} stir", names.first().copied().unwrap_or("pantry")),
        servings,
        ingredients: names
            .iter()
            .map(|name| RecipeIngredient {
                name: name.to_string(),
                qty: "to taste".to_string(),
            })
            .collect(),
        steps: vec![
            "Prep and chop all ingredients.".to_string(),
            "Cook over medium heat until done, stirring occasionally.".to_string(),
            "Season and serve.".to_string(),
        ],
        tags: vec!["fallback".to_string()],
        estimated_calories: None,
    }
}

/// Local edit applied when the generator cannot rewrite the recipe: drop the
/// excluded ingredients and any step that names them, append the additions
fn local_adjust(req: &AdjustRecipeRequest) -> Recipe {
    let excluded: Vec<String> = req
        .excluded_items
        .iter()
        .map(|name| name.to_lowercase())
        .collect();

    let mut ingredients: Vec<RecipeIngredient> = req
        .recipe
        .ingredients
        .iter()
        .filter(|ingredient| !excluded.contains(&ingredient.name.to_lowercase()))
        .cloned()
        .collect();
    ingredients.extend(req.added_items.iter().cloned());

    let steps: Vec<String> = req
        .recipe
        .steps
        .iter()
        .filter(|step| {
            let lowered = step.to_lowercase();
            !excluded.iter().any(|name| lowered.contains(name))
        })
        .cloned()
        .collect();

    Recipe {
        title: req.recipe.title.clone(),
        servings: req.recipe.servings,
        ingredients,
        steps,
        tags: req.recipe.tags.clone(),
        estimated_calories: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_recipe_prefers_freshest() {
        let weighted = vec![("rice".to_string(), 60), ("spinach".to_string(), 90)];

        let recipe = fallback_recipe(&weighted, 2);
        assert_eq!(recipe.title, "Simple spinach stir");
        assert_eq!(recipe.servings, 2);
        assert_eq!(recipe.ingredients.len(), 2);
    }

    #[test]
    fn test_local_adjust_drops_excluded_steps() {
        let request = AdjustRecipeRequest {
            recipe: Recipe {
                title: "Paneer curry".to_string(),
                servings: 2,
                ingredients: vec![
                    RecipeIngredient {
                        name: "paneer".to_string(),
                        qty: "200g".to_string(),
                    },
                    RecipeIngredient {
                        name: "onion".to_string(),
                        qty: "1".to_string(),
                    },
                ],
                steps: vec![
                    "Fry the paneer cubes.".to_string(),
                    "Saute the onion.".to_string(),
                ],
                tags: vec![],
                estimated_calories: Some(400.0),
            },
            excluded_items: vec!["paneer".to_string()],
            added_items: vec![RecipeIngredient {
                name: "tofu".to_string(),
                qty: "200g".to_string(),
            }],
            preferences: vec![],
        };

        let adjusted = local_adjust(&request);

        let names: Vec<_> = adjusted.ingredients.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["onion", "tofu"]);
        assert_eq!(adjusted.steps, ["Saute the onion."]);
    }
}
