use axum::{extract::State, response::Json};
use serde_json::Value;
use std::sync::Arc;

use crate::utils::extract_collection;
use crate::utils::logging::*;
use crate::utils::AppError;
use crate::AppState;

pub async fn list_users(State(state): State<Arc<AppState>>) -> Result<Json<Value>, AppError> {
    log_request_received("/api/users", "POST");

    let data = state.n8n.list_users().await?;
    let usuarios = extract_collection(&data, "usuarios");

    Ok(Json(Value::Array(usuarios)))
}

/// Atualização de nome/papel; o registro segue como veio do formulário.
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, AppError> {
    log_request_received("/api/users/update", "POST");

    let data = state.n8n.update_user(&body).await?;
    Ok(Json(data))
}

pub async fn link_chatwoot(State(state): State<Arc<AppState>>) -> Result<Json<Value>, AppError> {
    log_request_received("/api/users/link-chatwoot", "POST");

    let data = state.n8n.link_chatwoot().await?;
    log_info("🔗 Vinculação Chatwoot disparada");
    Ok(Json(data))
}
