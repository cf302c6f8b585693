// Route exports
pub mod analysis;
pub mod inventory;
pub mod recipes;

pub use analysis::AppState;

use actix_web::web;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(analysis::configure)
            .configure(inventory::configure)
            .configure(recipes::configure),
    );
}
