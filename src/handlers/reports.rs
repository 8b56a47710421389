use axum::{extract::State, response::Json};
use serde_json::Value;
use std::sync::Arc;

use crate::utils::logging::*;
use crate::utils::{extract_collection, extract_first_array, AppError};
use crate::AppState;

pub async fn get_reports(State(state): State<Arc<AppState>>) -> Result<Json<Value>, AppError> {
    log_request_received("/api/reports", "POST");

    let data = state.n8n.get_reports().await?;
    let relatorios = extract_collection(&data, "relatorios");

    Ok(Json(Value::Array(relatorios)))
}

pub async fn edit_report(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, AppError> {
    log_request_received("/api/reports/edit", "POST");

    let data = state.n8n.edit_report(&body).await?;
    Ok(Json(data))
}

pub async fn delete_report(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, AppError> {
    log_request_received("/api/reports/delete", "POST");

    if body.get("id").map_or(true, Value::is_null) {
        log_validation_error("id", "id do relatório ausente");
        return Err(AppError::ValidationError(
            "Informe o id do relatório a excluir".to_string(),
        ));
    }

    let data = state.n8n.delete_report(&body).await?;
    Ok(Json(data))
}

/// Relatório individual do vendedor logado. A chave da coleção varia entre
/// versões do fluxo, então vale a primeira propriedade em array.
pub async fn personal_report(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, AppError> {
    log_request_received("/api/meu-relatorio", "POST");

    let data = state.n8n.personal_report(&body).await?;
    let linhas = extract_first_array(&data);

    Ok(Json(Value::Array(linhas)))
}
