use std::sync::Arc;

use axum::routing::get;
use axum::{Extension, Router};

use crate::api::rest::{handlers, ui};
use crate::domain::service::Service;

/// Mount the passports REST surface and the dashboard on `router`.
pub fn register_routes(router: Router, service: Arc<Service>) -> anyhow::Result<Router> {
    let router = router
        // GET /passports - List passports; POST /passports - Create a passport
        .route(
            "/passports",
            get(handlers::list_passports).post(handlers::create_passport),
        )
        // GET /passports/stats - Counts per status
        .route("/passports/stats", get(handlers::passport_stats))
        // GET, PUT, DELETE /passports/{id}
        .route(
            "/passports/{id}",
            get(handlers::get_passport)
                .put(handlers::update_passport)
                .delete(handlers::delete_passport),
        )
        .route(
            "/job-categories",
            get(handlers::list_job_categories).post(handlers::create_job_category),
        )
        // Dashboard
        .route("/", get(ui::index))
        .route("/ui/{file}", get(ui::serve_asset))
        .layer(Extension(service));

    tracing::debug!("Passports REST routes registered");
    Ok(router)
}
