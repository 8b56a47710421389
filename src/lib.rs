// Biblioteca do middleware Meta Vendedores
// Expõe módulos para uso em testes e no binário

pub mod auth;
pub mod config;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod utils;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use handlers::*;
use middleware::{require_admin, require_atendimento, require_gestao, require_vendedor};

// AppState é definido aqui para ser compartilhado
#[derive(Clone)]
pub struct AppState {
    pub settings: config::Settings,
    pub n8n: services::N8nApiService,
}

/// Roteador completo da API, compartilhado entre o binário e os testes de
/// integração. Cada grupo de rotas carrega a guarda de papel da tela
/// correspondente do painel.
pub fn api_router(state: Arc<AppState>) -> Router {
    // Health checks e autenticação (públicos)
    let public = Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(ready_check))
        .route("/status", get(status_check))
        .route("/api/login", post(login))
        .route("/api/register", post(register))
        .route("/api/logout", post(logout))
        .with_state(state.clone());

    // Gestão de sessões e vendedores: admin e operador
    let gestao = Router::new()
        .route("/api/sessions", post(list_sessions))
        .route("/api/sessions/edit", post(edit_session))
        .route("/api/sessions/assign", post(assign_vendor))
        .route("/api/vendedores", post(list_vendors))
        .layer(axum::middleware::from_fn(require_gestao))
        .with_state(state.clone());

    // Administração: usuários e relatórios gerais
    let admin = Router::new()
        .route("/api/sessions/create", post(create_session))
        .route("/api/users", post(list_users))
        .route("/api/users/update", post(update_user))
        .route("/api/users/link-chatwoot", post(link_chatwoot))
        .route("/api/reports", post(get_reports))
        .route("/api/reports/edit", post(edit_report))
        .route("/api/reports/delete", post(delete_report))
        .layer(axum::middleware::from_fn(require_admin))
        .with_state(state.clone());

    // Aba de mensagens: admin e vendedor
    let atendimento = Router::new()
        .route("/api/messages/init", post(init_messages))
        .route("/api/messages/select", post(select_session))
        .route("/api/messages/search-clients", post(search_clients))
        .route("/api/messages/send", post(send_message))
        .layer(axum::middleware::from_fn(require_atendimento))
        .with_state(state.clone());

    // Relatório individual: só vendedor
    let vendas = Router::new()
        .route("/api/meu-relatorio", post(personal_report))
        .layer(axum::middleware::from_fn(require_vendedor))
        .with_state(state);

    public
        .merge(gestao)
        .merge(admin)
        .merge(atendimento)
        .merge(vendas)
}
