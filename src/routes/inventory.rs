use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::models::{
    AddInventoryItemRequest, ErrorResponse, InventoryItem, ScanBillResponse, ScanRequest,
};
use crate::routes::analysis::AppState;

const DEFAULT_SHELF_LIFE_DAYS: i64 = 5;

/// Configure inventory routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/inventory", web::get().to(list_items))
        .route("/inventory", web::post().to(add_item))
        .route("/inventory/{id}", web::delete().to(delete_item))
        .route("/inventory/scan-item", web::post().to(scan_item))
        .route("/inventory/scan-bill", web::post().to(scan_bill));
}

/// List all inventory items
///
/// GET /api/v1/inventory
pub async fn list_items(state: web::Data<AppState>) -> impl Responder {
    let items = state.inventory.list();
    HttpResponse::Ok().json(items)
}

/// Add one inventory item manually
///
/// POST /api/v1/inventory
pub async fn add_item(
    state: web::Data<AppState>,
    req: web::Json<AddInventoryItemRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let item = state.inventory.add(
        req.name.clone(),
        req.category.clone(),
        req.quantity,
        req.shelf_life_days,
    );

    tracing::info!("Added inventory item '{}' ({})", item.name, item.id);
    HttpResponse::Ok().json(item)
}

/// Delete one inventory item by id
///
/// DELETE /api/v1/inventory/{id}
pub async fn delete_item(
    state: web::Data<AppState>,
    path: web::Path<uuid::Uuid>,
) -> impl Responder {
    let id = path.into_inner();

    if state.inventory.remove(id) {
        HttpResponse::Ok().json(serde_json::json!({ "deleted": id }))
    } else {
        HttpResponse::NotFound().json(ErrorResponse {
            error: "Item not found".to_string(),
            message: format!("no inventory item with id {}", id),
            status_code: 404,
        })
    }
}

/// Recognize a single grocery item from a photo and add it to the inventory.
/// The food detectors double as the recognizer; the highest-confidence label
/// wins.
///
/// POST /api/v1/inventory/scan-item
pub async fn scan_item(
    state: web::Data<AppState>,
    req: web::Json<ScanRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let (detection_lists, _) = state.detector.detect_all(&req.image_base64, None).await;

    let best = detection_lists
        .iter()
        .flatten()
        .max_by(|a, b| a.confidence.total_cmp(&b.confidence));

    match best {
        Some(detection) => {
            let name = state.analyzer.normalizer().normalize(&detection.label);
            let item = state.inventory.add(
                name,
                "Scanned".to_string(),
                1,
                DEFAULT_SHELF_LIFE_DAYS,
            );
            HttpResponse::Ok().json(item)
        }
        None => HttpResponse::Ok().json(serde_json::json!({
            "item": serde_json::Value::Null,
            "message": "No item recognized",
        })),
    }
}

/// Extract items from a grocery-bill photo and add them all
///
/// POST /api/v1/inventory/scan-bill
pub async fn scan_bill(
    state: web::Data<AppState>,
    req: web::Json<ScanRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let names = match state.llm.extract_bill_items(&req.image_base64).await {
        Ok(names) => names,
        Err(e) => {
            tracing::error!("Bill extraction failed: {}", e);
            return HttpResponse::BadGateway().json(ErrorResponse {
                error: "Bill extraction failed".to_string(),
                message: e.to_string(),
                status_code: 502,
            });
        }
    };

    let added: Vec<InventoryItem> = names
        .into_iter()
        .filter(|name| !name.trim().is_empty())
        .map(|name| {
            state.inventory.add(
                name.trim().to_string(),
                "Scanned".to_string(),
                1,
                DEFAULT_SHELF_LIFE_DAYS,
            )
        })
        .collect();

    tracing::info!("Added {} items from scanned bill", added.len());
    HttpResponse::Ok().json(ScanBillResponse { added })
}
