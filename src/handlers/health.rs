use axum::{extract::State, response::Json};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::utils::logging::log_health_check;
use crate::AppState;

pub async fn health_check() -> Json<Value> {
    log_health_check();

    Json(json!({
        "status": "healthy",
        "service": "meta-vendedores-middleware",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Pronto quando a URL base do webhook está configurada; o backend em si não
/// tem operação de ping barata para sondar.
pub async fn ready_check(State(state): State<Arc<AppState>>) -> Json<Value> {
    let webhook_configured = !state.settings.webhook.base_url.is_empty();

    Json(json!({
        "ready": webhook_configured,
        "service": "meta-vendedores-middleware",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "dependencies": {
            "webhook": {
                "configured": webhook_configured,
                "base_url": state.settings.webhook.base_url
            }
        }
    }))
}

pub async fn status_check(State(state): State<Arc<AppState>>) -> Json<Value> {
    log_health_check();

    Json(json!({
        "service": "meta-vendedores-middleware",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "environment": std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string()),
        "integrations": {
            "webhook": {
                "base_url": state.settings.webhook.base_url,
            }
        },
        "auth": {
            "cookie": crate::auth::SESSION_COOKIE,
            "remember_max_age_days": state.settings.auth.remember_max_age_days
        }
    }))
}
