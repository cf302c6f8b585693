// Integration tests for PlateSense

use platesense::core::{Evaluation, MealAnalyzer};
use platesense::models::{Detection, MealAdvice, Suitability};
use std::collections::HashMap;

const BOX: [f64; 4] = [0.0, 0.0, 10.0, 10.0];

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn evaluate_plate(
    analyzer: &MealAnalyzer,
    detection_lists: &[Vec<Detection>],
    described: &[String],
    portion: f64,
) -> platesense::core::analyzer::PlateEvaluation {
    match analyzer.evaluate(detection_lists, described, portion).unwrap() {
        Evaluation::Plate(plate) => plate,
        Evaluation::NoFood => panic!("expected a plate"),
    }
}

#[test]
fn test_integration_end_to_end_south_indian_breakfast() {
    let analyzer = MealAnalyzer::with_defaults();

    // Two detector variants disagree on confidence for the same plate
    let detection_lists = vec![
        vec![Detection::new("idlis", 0.65, BOX)],
        vec![
            Detection::new("idli", 0.88, BOX),
            Detection::new("chutney", 0.72, BOX),
        ],
    ];

    let plate = evaluate_plate(&analyzer, &detection_lists, &[], 1.0);

    assert_eq!(plate.labels, ["idli", "chutney"]);
    assert_eq!(plate.fused.get("idli").unwrap().confidence, 0.88);
    assert_eq!(plate.nutrition.estimated_calories, 140);
    assert_eq!(plate.nutrition.macros.protein_g, 4.0);

    let (breakdown, missing) = analyzer.score_plate(&plate, None);

    assert_eq!(breakdown.macro_score, 20.0);
    assert_eq!(breakdown.micro_score, 12.5);
    assert_eq!(breakdown.quality_score, 22.0);
    assert_eq!(breakdown.suitability_score, 10.0);
    assert_eq!(breakdown.junk_penalty, 0.0);
    assert_eq!(breakdown.final_score, 65);

    // Iron and calcium are measured and low for this plate
    assert_eq!(missing, strings(&["Iron", "Calcium"]));
}

#[test]
fn test_integration_junk_meal_is_penalized_last() {
    let analyzer = MealAnalyzer::with_defaults();

    let detection_lists = vec![vec![
        Detection::new("cheeseburger", 0.9, BOX),
        Detection::new("fries", 0.8, BOX),
    ]];

    let plate = evaluate_plate(&analyzer, &detection_lists, &[], 1.0);
    assert_eq!(plate.labels, ["hamburger", "french fries"]);
    assert_eq!(plate.nutrition.estimated_calories, 905);

    let (breakdown, _) = analyzer.score_plate(&plate, None);

    assert_eq!(breakdown.junk_penalty, 14.0);
    assert_eq!(breakdown.final_score, 48);
}

#[test]
fn test_integration_no_food_short_circuit() {
    let analyzer = MealAnalyzer::with_defaults();

    let result = analyzer.evaluate(&[vec![], vec![]], &[], 1.0).unwrap();
    assert!(matches!(result, Evaluation::NoFood));
}

#[test]
fn test_integration_description_supplements_detection() {
    let analyzer = MealAnalyzer::with_defaults();

    let detection_lists = vec![vec![Detection::new("rice", 0.8, BOX)]];
    let described = strings(&["dal", "rice"]);

    let plate = evaluate_plate(&analyzer, &detection_lists, &described, 1.0);

    // Detected labels come first; described duplicates are not repeated
    assert_eq!(plate.labels, ["rice", "dal"]);
    assert_eq!(plate.nutrition.estimated_calories, 350);
}

#[test]
fn test_integration_portion_scales_linearly() {
    let analyzer = MealAnalyzer::with_defaults();
    let described = strings(&["dosa", "sambar"]);

    let single = evaluate_plate(&analyzer, &[], &described, 1.0);
    let double = evaluate_plate(&analyzer, &[], &described, 2.0);

    assert_eq!(
        double.nutrition.estimated_calories,
        single.nutrition.estimated_calories * 2
    );
}

#[test]
fn test_integration_advice_enrichment_changes_score() {
    let analyzer = MealAnalyzer::with_defaults();
    let plate = evaluate_plate(&analyzer, &[], &strings(&["rice"]), 1.0);

    let (plain, _) = analyzer.score_plate(&plate, None);

    let mut suitability = HashMap::new();
    suitability.insert("diabetic".to_string(), Suitability::Restricted);
    let advice = MealAdvice {
        glycemic_index: Some(85.0),
        fiber_g: Some(1.0),
        diet_suitability: suitability,
        ..Default::default()
    };
    let (enriched, _) = analyzer.score_plate(&plate, Some(&advice));

    // High GI docks quality; a restricted condition docks suitability
    assert!(enriched.quality_score < plain.quality_score);
    assert!(enriched.suitability_score < plain.suitability_score);
    assert!(enriched.final_score < plain.final_score);
}

#[test]
fn test_integration_evaluate_is_deterministic() {
    let analyzer = MealAnalyzer::with_defaults();
    let detection_lists = vec![
        vec![
            Detection::new("biryani", 0.81, BOX),
            Detection::new("yogurt", 0.64, BOX),
        ],
        vec![Detection::new("curd", 0.59, BOX)],
    ];

    let first = evaluate_plate(&analyzer, &detection_lists, &[], 1.0);
    let second = evaluate_plate(&analyzer, &detection_lists, &[], 1.0);

    assert_eq!(first.labels, second.labels);
    assert_eq!(
        first.nutrition.estimated_calories,
        second.nutrition.estimated_calories
    );

    let (a, _) = analyzer.score_plate(&first, None);
    let (b, _) = analyzer.score_plate(&second, None);
    assert_eq!(a.final_score, b.final_score);
}
