use std::time::Instant;

use actix_web::{web, HttpResponse, Responder};
use prometheus::{Encoder, TextEncoder};
use uuid::Uuid;

use crate::metrics::Metrics;
use crate::models::{Order, OrderFilter};
use crate::store::{OrderStore, StoreError};
use super::error::ApiError;

// ============================================================================
// Request Handlers - Wire Payloads in, Store Calls, JSON out
// ============================================================================
//
// Thin, mechanical glue: decode the payload, delegate to the store, encode
// the result or map the error. No business rules live here.
//
// ============================================================================

/// POST /api/orders
pub async fn create_order(
    store: web::Data<OrderStore>,
    metrics: web::Data<Metrics>,
    body: web::Json<Order>,
) -> Result<HttpResponse, ApiError> {
    let request_id = Uuid::new_v4();
    let order = body.into_inner();

    tracing::info!(
        %request_id,
        order_id = %order.id,
        item_count = order.items.len(),
        "creating order"
    );

    let order = observe(&metrics, "create", store.create(order)).await.map_err(|e| {
        tracing::error!(%request_id, error = %e, "create failed");
        ApiError(e)
    })?;

    Ok(HttpResponse::Created().json(order))
}

/// PUT /api/orders/{id}
pub async fn update_order(
    store: web::Data<OrderStore>,
    metrics: web::Data<Metrics>,
    path: web::Path<String>,
    body: web::Json<Order>,
) -> Result<HttpResponse, ApiError> {
    let request_id = Uuid::new_v4();
    let order_id = path.into_inner();
    let order = body.into_inner();

    tracing::info!(
        %request_id,
        order_id = %order_id,
        item_count = order.items.len(),
        "replacing order"
    );

    let order = observe(&metrics, "replace", store.replace(&order_id, order))
        .await
        .map_err(|e| {
            tracing::error!(%request_id, order_id = %order_id, error = %e, "replace failed");
            ApiError(e)
        })?;

    Ok(HttpResponse::Ok().json(order))
}

/// GET /api/orders?status=<value>
pub async fn list_orders(
    store: web::Data<OrderStore>,
    metrics: web::Data<Metrics>,
    filter: web::Query<OrderFilter>,
) -> Result<HttpResponse, ApiError> {
    let request_id = Uuid::new_v4();
    let filter = filter.into_inner();

    let orders = observe(&metrics, "list", store.list(&filter)).await.map_err(|e| {
        tracing::error!(%request_id, error = %e, "list failed");
        ApiError(e)
    })?;

    Ok(HttpResponse::Ok().json(orders))
}

/// GET /metrics
pub async fn metrics_handler(metrics: web::Data<Metrics>) -> impl Responder {
    let encoder = TextEncoder::new();
    let metric_families = metrics.registry().gather();

    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!(error = %e, "failed to encode metrics");
        return HttpResponse::InternalServerError().finish();
    }

    HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4")
        .body(buffer)
}

/// GET /health
pub async fn health_handler() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "order-service"
    }))
}

/// Time a store call and record its outcome.
async fn observe<T>(
    metrics: &Metrics,
    operation: &str,
    fut: impl std::future::Future<Output = Result<T, StoreError>>,
) -> Result<T, StoreError> {
    let started = Instant::now();
    let result = fut.await;
    metrics.record_store_op(
        operation,
        started.elapsed().as_secs_f64(),
        result.as_ref().err().map(StoreError::kind),
    );
    result
}
