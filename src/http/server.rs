use actix_web::{web, App, HttpServer};

use crate::config::Config;
use crate::metrics::Metrics;
use crate::store::OrderStore;
use super::handlers;

// ============================================================================
// HTTP Server - Routing and Lifecycle
// ============================================================================

/// Run the HTTP server until shutdown.
///
/// Actix handles SIGINT itself: in-flight requests drain before the future
/// resolves, so callers get a graceful stop for free.
pub async fn run(config: &Config, store: OrderStore, metrics: Metrics) -> std::io::Result<()> {
    let store = web::Data::new(store);
    let metrics = web::Data::new(metrics);

    tracing::info!(addr = %config.http_addr, "starting HTTP server");

    HttpServer::new(move || {
        App::new()
            .app_data(store.clone())
            .app_data(metrics.clone())
            .route("/api/orders", web::post().to(handlers::create_order))
            .route("/api/orders", web::get().to(handlers::list_orders))
            .route("/api/orders/{id}", web::put().to(handlers::update_order))
            .route("/metrics", web::get().to(handlers::metrics_handler))
            .route("/health", web::get().to(handlers::health_handler))
    })
    .bind(config.http_addr.as_str())?
    .run()
    .await
}
