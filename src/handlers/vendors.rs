use axum::{extract::State, response::Json};
use serde_json::Value;
use std::sync::Arc;

use crate::utils::extract_collection;
use crate::utils::logging::log_request_received;
use crate::utils::AppError;
use crate::AppState;

/// Contas de vendedor com seus números de WhatsApp. `contas_vendedor` é a
/// operação que já chegou com nível extra de aninhamento; o normalizador
/// resolve.
pub async fn list_vendors(State(state): State<Arc<AppState>>) -> Result<Json<Value>, AppError> {
    log_request_received("/api/vendedores", "POST");

    let data = state.n8n.list_vendors().await?;
    let vendedores = extract_collection(&data, "vendedores");

    Ok(Json(Value::Array(vendedores)))
}
