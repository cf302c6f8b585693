use crate::models::{FreshnessStatus, RecipeIngredient};

/// Ingredients excluded by halal preference
const HALAL_EXCLUDED: &[&str] = &[
    "pork",
    "bacon",
    "gelatin",
    "beer",
    "wine",
    "rum",
    "ham",
    "lard",
    "sausage",
    "pepperoni",
];

/// Ingredients excluded by vegetarian preference
const VEGETARIAN_EXCLUDED: &[&str] = &["chicken", "beef", "fish", "lamb", "shrimp", "egg"];

/// Additional exclusions for vegan on top of vegetarian
const VEGAN_EXCLUDED: &[&str] = &["milk", "cheese", "butter", "yogurt", "cream", "egg", "honey"];

/// When the user names one preferred protein, the other proteins are excluded
const PROTEIN_SWAPS: &[(&str, &[&str])] = &[
    ("chicken", &["beef", "fish", "lamb", "pork"]),
    ("beef", &["chicken", "fish", "lamb", "pork"]),
    ("fish", &["chicken", "beef", "lamb", "pork"]),
    ("lamb", &["chicken", "beef", "fish", "pork"]),
];

/// Build the lowercase restricted-ingredient list for a set of dietary
/// preferences
pub fn restricted_for(preferences: &[String]) -> Vec<String> {
    let mut restricted: Vec<&str> = Vec::new();

    for preference in preferences {
        match preference.to_lowercase().as_str() {
            "halal" => restricted.extend_from_slice(HALAL_EXCLUDED),
            "vegetarian" => restricted.extend_from_slice(VEGETARIAN_EXCLUDED),
            "vegan" => {
                restricted.extend_from_slice(VEGETARIAN_EXCLUDED);
                restricted.extend_from_slice(VEGAN_EXCLUDED);
            }
            other => {
                if let Some((_, excluded)) = PROTEIN_SWAPS.iter().find(|(name, _)| *name == other)
                {
                    restricted.extend_from_slice(excluded);
                }
            }
        }
    }

    restricted.iter().map(|r| r.to_lowercase()).collect()
}

/// Drop generator-produced ingredients that violate the user's preferences.
/// The generator is prompted with the same constraints, but its output is
/// filtered again because it cannot be trusted to honor them.
pub fn filter_restricted(
    preferences: &[String],
    ingredients: Vec<RecipeIngredient>,
) -> Vec<RecipeIngredient> {
    let restricted = restricted_for(preferences);

    ingredients
        .into_iter()
        .filter(|ingredient| !restricted.contains(&ingredient.name.to_lowercase()))
        .collect()
}

/// Weight used to bias recipe generation toward fresher stock.
/// Untracked ingredients are assumed fresh.
pub fn freshness_weight(status: Option<FreshnessStatus>) -> u8 {
    match status {
        Some(FreshnessStatus::Fresh) => 90,
        Some(FreshnessStatus::Expiring) => 60,
        Some(FreshnessStatus::Expired) => 10,
        None => 80,
    }
}
