use axum::{extract::State, response::Json};
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::time::Instant;

use crate::models::{ClientMatch, SendMessageRequest};
use crate::utils::logging::*;
use crate::utils::{extract_collection, extract_keyed, AppError};
use crate::AppState;

/// Abertura da aba de mensagens: sessões disponíveis para o usuário e as
/// tags de campanha. O corpo é o usuário logado, encaminhado como está.
pub async fn init_messages(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, AppError> {
    log_request_received("/api/messages/init", "POST");

    let data = state.n8n.init_messages(&body).await?;
    let sessoes = extract_collection(&data, "sessoes");
    let tags = extract_keyed(&data, "tags");

    Ok(Json(json!({
        "sessoes": sessoes,
        "tags": tags,
    })))
}

/// Seleção de sessão: avisa o backend e devolve os templates liberados para
/// aquele número.
pub async fn select_session(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, AppError> {
    log_request_received("/api/messages/select", "POST");

    let data = state.n8n.select_session(&body).await?;
    let templates = extract_collection(&data, "templates");

    log_info(&format!("📋 Templates disponíveis: {}", templates.len()));

    Ok(Json(json!({ "templates": templates })))
}

/// Busca de cliente por empresa/tipo/data. O resultado volta já reduzido a
/// um único registro com número higienizado e variáveis pré-preenchidas.
pub async fn search_clients(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> Result<Json<ClientMatch>, AppError> {
    log_request_received("/api/messages/search-clients", "POST");

    let data = state.n8n.search_clients(&body).await?;
    let client = ClientMatch::from_upstream(&data);

    if client.dados_cliente.is_none() {
        log_warning("Nenhum cliente encontrado com os dados informados");
    }

    Ok(Json(client))
}

/// Envio da mensagem: resolve o template no servidor e encaminha o payload
/// completo para `vendedor_manda_mensagem`.
pub async fn send_message(
    State(state): State<Arc<AppState>>,
    Json(body): Json<SendMessageRequest>,
) -> Result<Json<Value>, AppError> {
    let start_time = Instant::now();
    log_request_received("/api/messages/send", "POST");

    let payload = body.to_upstream();
    state.n8n.send_message(&payload).await?;

    log_info(&format!(
        "✅ Mensagem '{}' enviada para {}",
        body.template.nome, body.numero_cliente
    ));
    log_request_processed(
        "/api/messages/send",
        200,
        start_time.elapsed().as_millis() as u64,
    );

    Ok(Json(json!({"success": true})))
}
