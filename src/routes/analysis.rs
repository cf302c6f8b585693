use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;

use crate::core::normalize::parse_comma_list;
use crate::core::{Evaluation, MealAnalyzer};
use crate::models::{
    AnalyzeMealRequest, ErrorResponse, HealthResponse, MealAdvice, MealAnalysisResponse,
};
use crate::services::{
    fallback_recommendations, AdviceCache, AdviceOutcome, CacheKey, DetectorClient, InventoryStore,
    LlmClient,
};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub analyzer: MealAnalyzer,
    pub detector: Arc<DetectorClient>,
    pub llm: Arc<LlmClient>,
    pub advice_cache: Arc<AdviceCache>,
    pub inventory: Arc<dyn InventoryStore>,
}

/// Configure analysis routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/analyze", web::post().to(analyze_meal));
}

/// Health check endpoint
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Meal analysis endpoint
///
/// POST /api/v1/analyze
///
/// Request body:
/// ```json
/// {
///   "imageBase64": "string",
///   "portion": 1.0,
///   "conditions": "diabetic,high_bp",
///   "description": "idli, chutney",
///   "detector": "indian"
/// }
/// ```
pub async fn analyze_meal(
    state: web::Data<AppState>,
    req: web::Json<AnalyzeMealRequest>,
) -> impl Responder {
    if !req.portion.is_finite() || req.portion <= 0.0 {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Invalid portion".to_string(),
            message: format!("portion must be a positive number, got {}", req.portion),
            status_code: 400,
        });
    }

    if matches!(req.image_base64.as_deref(), Some("")) {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Invalid image".to_string(),
            message: "imageBase64 must not be empty when provided".to_string(),
            status_code: 400,
        });
    }

    let conditions = parse_comma_list(&req.conditions);
    let described = parse_comma_list(&req.description);

    // Fan the image out to the detector backends (when an image was sent)
    let (detection_lists, annotated) = match &req.image_base64 {
        Some(image) => state.detector.detect_all(image, req.detector.as_deref()).await,
        None => (vec![], None),
    };

    let plate = match state.analyzer.evaluate(&detection_lists, &described, req.portion) {
        Ok(Evaluation::NoFood) => {
            tracing::info!("No food detected or described, returning empty analysis");
            return HttpResponse::Ok().json(MealAnalysisResponse::no_food());
        }
        Ok(Evaluation::Plate(plate)) => plate,
        Err(e) => {
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: "Analysis failed".to_string(),
                message: e.to_string(),
                status_code: 400,
            });
        }
    };

    tracing::info!(
        "Analyzing plate: {} items, {} kcal",
        plate.labels.len(),
        plate.nutrition.estimated_calories
    );

    // Advice enrichment, cached per plate/portion/conditions
    let cache_key = CacheKey::advice(&plate.labels, req.portion, &conditions);
    let advice: Option<MealAdvice> = match state.advice_cache.get(&cache_key).await {
        Some(cached) => Some(cached),
        None => {
            match state
                .llm
                .generate_advice(&plate.labels, &plate.nutrition, &conditions)
                .await
            {
                AdviceOutcome::Generated(advice) => {
                    state
                        .advice_cache
                        .insert(cache_key, advice.clone())
                        .await;
                    Some(advice)
                }
                AdviceOutcome::Unavailable(reason) => {
                    tracing::warn!("Proceeding with fallback advice: {}", reason);
                    None
                }
            }
        }
    };

    let (health_score, missing_nutrients) = state.analyzer.score_plate(&plate, advice.as_ref());

    let response = match advice {
        Some(advice) => MealAnalysisResponse {
            detected_food: plate.labels,
            estimated_calories: plate.nutrition.estimated_calories,
            macros: plate.nutrition.macros,
            micronutrients: plate.nutrition.micronutrients,
            glycemic_index: advice.glycemic_index,
            diet_suitability: advice.diet_suitability,
            overall_comment: advice.overall_comment,
            diet_recommendations: advice.diet_recommendations,
            health_score: Some(health_score),
            missing_nutrients,
            image_with_boxes: annotated,
        },
        None => MealAnalysisResponse {
            detected_food: plate.labels,
            estimated_calories: plate.nutrition.estimated_calories,
            macros: plate.nutrition.macros,
            micronutrients: plate.nutrition.micronutrients,
            glycemic_index: None,
            diet_suitability: Default::default(),
            overall_comment: "Analysis complete".to_string(),
            diet_recommendations: fallback_recommendations(),
            health_score: Some(health_score),
            missing_nutrients,
            image_with_boxes: annotated,
        },
    };

    HttpResponse::Ok().json(response)
}

#[cfg(test)]
mod tests {
    use crate::models::HealthResponse;

    #[test]
    fn test_health_check_response() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            version: "0.1.0".to_string(),
            timestamp: chrono::Utc::now(),
        };

        assert_eq!(response.status, "healthy");
    }
}
