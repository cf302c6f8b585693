// Criterion benchmarks for PlateSense

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use platesense::core::{
    fusion::fuse,
    normalize::Normalizer,
    nutrition::{aggregate, NutritionTable},
    scoring::HealthScorer,
};
use platesense::models::{Detection, HealthScoreInputs, Macros, MicronutrientProfile};

const BOX: [f64; 4] = [0.0, 0.0, 10.0, 10.0];

const LABEL_POOL: &[&str] = &[
    "idli", "chutney", "dosa", "sambar", "rice", "dal", "chapati", "paneer", "salad", "yogurt",
    "hamburger", "french fries", "pizza", "biryani", "samosa", "banana",
];

fn detection_lists(detector_count: usize, per_detector: usize) -> Vec<Vec<Detection>> {
    (0..detector_count)
        .map(|d| {
            (0..per_detector)
                .map(|i| {
                    let label = LABEL_POOL[(d + i) % LABEL_POOL.len()];
                    let confidence = 0.4 + ((d * 7 + i * 3) % 60) as f64 / 100.0;
                    Detection::new(label, confidence, BOX)
                })
                .collect()
        })
        .collect()
}

fn bench_fusion(c: &mut Criterion) {
    let normalizer = Normalizer::with_defaults();

    let mut group = c.benchmark_group("fusion");

    for per_detector in [4, 16, 64].iter() {
        let lists = detection_lists(3, *per_detector);

        group.bench_with_input(
            BenchmarkId::new("fuse_3_detectors", per_detector),
            per_detector,
            |b, _| {
                b.iter(|| fuse(black_box(&normalizer), black_box(&lists)));
            },
        );
    }

    group.finish();
}

fn bench_aggregation(c: &mut Criterion) {
    let table = NutritionTable::with_defaults();
    let normalizer = Normalizer::with_defaults();
    let labels: Vec<String> = LABEL_POOL.iter().map(|l| l.to_string()).collect();

    c.bench_function("aggregate_full_plate", |b| {
        b.iter(|| {
            aggregate(
                black_box(&table),
                black_box(&normalizer),
                black_box(&labels),
                black_box(1.5),
            )
        });
    });
}

fn bench_scoring(c: &mut Criterion) {
    let scorer = HealthScorer::with_default_thresholds();
    let inputs = HealthScoreInputs {
        detected_food: LABEL_POOL.iter().map(|l| l.to_string()).collect(),
        estimated_calories: 1200.0,
        macros: Macros {
            protein_g: 45.0,
            carbs_g: 150.0,
            fat_g: 50.0,
        },
        fiber_g: Some(6.0),
        micronutrients: MicronutrientProfile {
            iron_mg: Some(8.0),
            calcium_mg: Some(400.0),
            magnesium_mg: Some(120.0),
            potassium_mg: Some(900.0),
            fiber_g: Some(6.0),
            vitamin_c_mg: Some(40.0),
        },
        glycemic_index: Some(62.0),
        diet_suitability: Default::default(),
    };

    c.bench_function("health_score", |b| {
        b.iter(|| scorer.score(black_box(&inputs)));
    });
}

criterion_group!(benches, bench_fusion, bench_aggregation, bench_scoring);

criterion_main!(benches);
