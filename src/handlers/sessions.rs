use axum::{extract::State, response::Json};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::models::{AssignVendorRequest, CreateSessionRequest};
use crate::utils::logging::*;
use crate::utils::{extract_collection, extract_keyed, AppError};
use crate::AppState;

/// Lista as sessões de vendas. A resposta de `pega_sessao` pode vir como
/// array puro, `{value: [...]}` ou já chaveada; aqui vira sempre
/// `{sessoes, vendedores}`.
pub async fn list_sessions(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Value>, AppError> {
    log_request_received("/api/sessions", "POST");

    let data = state.n8n.list_sessions().await?;
    let data = match data {
        Value::Object(ref map) if map.contains_key("value") => map["value"].clone(),
        other => other,
    };

    let sessoes = extract_collection(&data, "sessoes");
    let vendedores = extract_keyed(&data, "vendedores");

    log_info(&format!(
        "📋 Sessões carregadas: {} sessões, {} vendedores",
        sessoes.len(),
        vendedores.len()
    ));

    Ok(Json(json!({
        "sessoes": sessoes,
        "vendedores": vendedores,
    })))
}

pub async fn create_session(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateSessionRequest>,
) -> Result<Json<Value>, AppError> {
    log_request_received("/api/sessions/create", "POST");

    if let Err(message) = body.validate() {
        log_validation_error("numero", &message);
        return Err(AppError::ValidationError(message));
    }

    let data = state
        .n8n
        .create_session(&serde_json::to_value(&body)?)
        .await?;
    Ok(Json(data))
}

/// Edição encaminha o registro completo, sem remontagem: o backend é quem
/// decide o que aplicar. A lista é recarregada inteira pelo chamador depois.
pub async fn edit_session(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, AppError> {
    log_request_received("/api/sessions/edit", "POST");

    let data = state.n8n.edit_session(&body).await?;
    Ok(Json(data))
}

pub async fn assign_vendor(
    State(state): State<Arc<AppState>>,
    Json(body): Json<AssignVendorRequest>,
) -> Result<Json<Value>, AppError> {
    log_request_received("/api/sessions/assign", "POST");

    let data = state
        .n8n
        .assign_vendor(&serde_json::to_value(&body)?)
        .await?;

    log_info(&format!(
        "✅ Vendedor '{}' atribuído à sessão '{}'",
        body.nome_vendedor, body.sessao
    ));

    Ok(Json(data))
}
