use crate::core::normalize::Normalizer;
use crate::core::AnalysisError;
use crate::models::{AggregatedNutrition, NutritionRecord};
use std::collections::HashMap;

/// Static mapping from canonical food name to per-standard-portion reference
/// nutrition. Initialized once at startup and never mutated afterwards, so it
/// is safe to share across worker threads.
#[derive(Debug, Clone)]
pub struct NutritionTable {
    records: HashMap<String, NutritionRecord>,
}

macro_rules! record {
    ($cal:expr, $p:expr, $c:expr, $f:expr, $fe:expr, $ca:expr, $mg:expr, $k:expr) => {
        NutritionRecord {
            calories: $cal,
            protein_g: $p,
            carbs_g: $c,
            fat_g: $f,
            iron_mg: $fe,
            calcium_mg: $ca,
            magnesium_mg: $mg,
            potassium_mg: $k,
        }
    };
}

impl NutritionTable {
    pub fn new(records: HashMap<String, NutritionRecord>) -> Self {
        Self { records }
    }

    /// Built-in reference data covering the detector vocabularies.
    /// Values are per standard portion, not per 100 g.
    pub fn with_defaults() -> Self {
        let entries: &[(&str, NutritionRecord)] = &[
            ("idli", record!(60.0, 2.0, 12.0, 0.4, 0.3, 10.0, 8.0, 60.0)),
            ("chutney", record!(80.0, 2.0, 6.0, 5.5, 0.5, 20.0, 10.0, 90.0)),
            ("dosa", record!(170.0, 4.0, 28.0, 4.5, 0.8, 15.0, 18.0, 120.0)),
            ("sambar", record!(140.0, 6.0, 20.0, 4.0, 1.5, 40.0, 35.0, 280.0)),
            ("rice", record!(200.0, 4.2, 44.0, 0.5, 0.4, 10.0, 19.0, 55.0)),
            ("fried rice", record!(330.0, 7.0, 48.0, 12.0, 1.0, 25.0, 25.0, 140.0)),
            ("biryani", record!(420.0, 15.0, 55.0, 15.0, 2.0, 40.0, 45.0, 320.0)),
            ("chapati", record!(120.0, 3.5, 22.0, 2.5, 1.0, 12.0, 25.0, 90.0)),
            ("naan", record!(260.0, 7.5, 45.0, 5.0, 1.6, 30.0, 26.0, 110.0)),
            ("dal", record!(150.0, 9.0, 22.0, 3.0, 2.5, 30.0, 45.0, 350.0)),
            ("paneer", record!(265.0, 18.0, 4.0, 20.0, 0.5, 480.0, 25.0, 120.0)),
            ("samosa", record!(260.0, 4.5, 28.0, 14.0, 1.2, 20.0, 20.0, 180.0)),
            ("pakora", record!(180.0, 4.0, 16.0, 11.0, 1.0, 18.0, 22.0, 160.0)),
            ("hamburger", record!(540.0, 25.0, 42.0, 30.0, 3.5, 120.0, 35.0, 380.0)),
            ("pizza", record!(570.0, 22.0, 64.0, 24.0, 3.0, 320.0, 40.0, 350.0)),
            ("french fries", record!(365.0, 4.0, 48.0, 17.0, 0.8, 15.0, 30.0, 580.0)),
            ("sandwich", record!(300.0, 12.0, 36.0, 11.0, 2.2, 80.0, 30.0, 250.0)),
            ("pasta", record!(380.0, 13.0, 62.0, 8.0, 2.0, 60.0, 40.0, 260.0)),
            ("noodles", record!(350.0, 10.0, 54.0, 10.0, 1.8, 25.0, 32.0, 200.0)),
            ("salad", record!(90.0, 3.0, 10.0, 4.0, 1.2, 45.0, 25.0, 350.0)),
            ("soup", record!(110.0, 5.0, 14.0, 3.5, 1.0, 35.0, 20.0, 280.0)),
            ("omelette", record!(190.0, 13.0, 2.0, 14.0, 1.8, 55.0, 12.0, 140.0)),
            ("chicken curry", record!(310.0, 26.0, 8.0, 19.0, 2.0, 35.0, 40.0, 420.0)),
            ("yogurt", record!(100.0, 6.0, 8.0, 5.0, 0.1, 180.0, 17.0, 230.0)),
            ("apple", record!(95.0, 0.5, 25.0, 0.3, 0.2, 10.0, 9.0, 195.0)),
            ("banana", record!(105.0, 1.3, 27.0, 0.4, 0.3, 6.0, 32.0, 420.0)),
            ("cake", record!(350.0, 4.0, 50.0, 15.0, 1.2, 60.0, 12.0, 110.0)),
            ("donut", record!(290.0, 4.0, 33.0, 16.0, 1.1, 25.0, 14.0, 90.0)),
            ("cola", record!(140.0, 0.0, 39.0, 0.0, 0.0, 5.0, 2.0, 10.0)),
        ];

        let records = entries
            .iter()
            .map(|(name, record)| (name.to_string(), *record))
            .collect();

        Self::new(records)
    }

    pub fn get(&self, canonical: &str) -> Option<&NutritionRecord> {
        self.records.get(canonical)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Round to one decimal place, the resolution used for macro/micro totals
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Scale and sum reference nutrition across all recognized labels.
///
/// Contributions are linear and independent; labels with no reference entry
/// are skipped silently and excluded from `recognized_items`. Zero matched
/// labels is the defined degenerate case and yields all-zero totals. A
/// non-positive portion multiplier is a caller contract violation.
pub fn aggregate(
    table: &NutritionTable,
    normalizer: &Normalizer,
    labels: &[String],
    portion: f64,
) -> Result<AggregatedNutrition, AnalysisError> {
    if !portion.is_finite() || portion <= 0.0 {
        return Err(AnalysisError::InvalidPortion(portion));
    }

    let mut totals = AggregatedNutrition::default();
    let mut calories = 0.0;

    for label in labels {
        let canonical = normalizer.normalize(label);
        let Some(record) = table.get(&canonical) else {
            continue;
        };
        if totals.recognized_items.contains(&canonical) {
            continue;
        }

        calories += record.calories * portion;
        totals.macros.protein_g += record.protein_g * portion;
        totals.macros.carbs_g += record.carbs_g * portion;
        totals.macros.fat_g += record.fat_g * portion;
        totals.micronutrients.iron_mg += record.iron_mg * portion;
        totals.micronutrients.calcium_mg += record.calcium_mg * portion;
        totals.micronutrients.magnesium_mg += record.magnesium_mg * portion;
        totals.micronutrients.potassium_mg += record.potassium_mg * portion;

        totals.recognized_items.push(canonical);
    }

    totals.estimated_calories = calories.round() as i64;
    totals.macros.protein_g = round1(totals.macros.protein_g);
    totals.macros.carbs_g = round1(totals.macros.carbs_g);
    totals.macros.fat_g = round1(totals.macros.fat_g);
    totals.micronutrients.iron_mg = round1(totals.micronutrients.iron_mg);
    totals.micronutrients.calcium_mg = round1(totals.micronutrients.calcium_mg);
    totals.micronutrients.magnesium_mg = round1(totals.micronutrients.magnesium_mg);
    totals.micronutrients.potassium_mg = round1(totals.micronutrients.potassium_mg);

    Ok(totals)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (NutritionTable, Normalizer) {
        (NutritionTable::with_defaults(), Normalizer::with_defaults())
    }

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_aggregate_idli_chutney() {
        let (table, normalizer) = setup();

        let totals = aggregate(&table, &normalizer, &labels(&["idli", "chutney"]), 1.0).unwrap();

        assert_eq!(totals.estimated_calories, 140);
        assert_eq!(totals.macros.protein_g, 4.0);
        assert_eq!(totals.recognized_items, ["idli", "chutney"]);
    }

    #[test]
    fn test_aggregate_scales_with_portion() {
        let (table, normalizer) = setup();
        let names = labels(&["idli", "dal"]);

        let single = aggregate(&table, &normalizer, &names, 1.0).unwrap();
        let double = aggregate(&table, &normalizer, &names, 2.0).unwrap();

        assert_eq!(double.estimated_calories, single.estimated_calories * 2);
        assert_eq!(double.macros.protein_g, single.macros.protein_g * 2.0);
        assert_eq!(
            double.micronutrients.iron_mg,
            round1(single.micronutrients.iron_mg * 2.0)
        );
    }

    #[test]
    fn test_aggregate_skips_unknown_labels() {
        let (table, normalizer) = setup();

        let totals = aggregate(
            &table,
            &normalizer,
            &labels(&["idli", "mystery dish"]),
            1.0,
        )
        .unwrap();

        assert_eq!(totals.recognized_items, ["idli"]);
        assert_eq!(totals.estimated_calories, 60);
    }

    #[test]
    fn test_aggregate_only_unknown_labels_is_zero() {
        let (table, normalizer) = setup();

        let totals = aggregate(&table, &normalizer, &labels(&["unobtainium"]), 1.0).unwrap();

        assert!(totals.recognized_items.is_empty());
        assert_eq!(totals.estimated_calories, 0);
        assert_eq!(totals.macros.protein_g, 0.0);
        assert_eq!(totals.micronutrients.potassium_mg, 0.0);
    }

    #[test]
    fn test_aggregate_normalizes_before_lookup() {
        let (table, normalizer) = setup();

        let totals = aggregate(&table, &normalizer, &labels(&["Fries"]), 1.0).unwrap();

        assert_eq!(totals.recognized_items, ["french fries"]);
    }

    #[test]
    fn test_aggregate_deduplicates_synonym_collisions() {
        let (table, normalizer) = setup();

        // "burger" and "hamburger" collapse onto the same record; count it once
        let totals =
            aggregate(&table, &normalizer, &labels(&["burger", "hamburger"]), 1.0).unwrap();

        assert_eq!(totals.recognized_items, ["hamburger"]);
        assert_eq!(totals.estimated_calories, 540);
    }

    #[test]
    fn test_aggregate_rejects_nonpositive_portion() {
        let (table, normalizer) = setup();

        assert!(aggregate(&table, &normalizer, &labels(&["idli"]), 0.0).is_err());
        assert!(aggregate(&table, &normalizer, &labels(&["idli"]), -1.5).is_err());
        assert!(aggregate(&table, &normalizer, &labels(&["idli"]), f64::NAN).is_err());
    }

    #[test]
    fn test_round1() {
        assert_eq!(round1(1.25), 1.3);
        assert_eq!(round1(1.24), 1.2);
        assert_eq!(round1(0.0), 0.0);
    }
}
