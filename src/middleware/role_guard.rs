//! Guarda de rota por papel, avaliada a partir do cookie de sessão.
//!
//! A checagem é consultiva: a autorização real (se existe) vive no backend
//! n8n. Aqui ela só reproduz, no servidor, o bloqueio de navegação que o
//! painel aplica por papel.

use axum::{
    extract::Request,
    http::{header::SET_COOKIE, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use serde_json::json;

use crate::auth::{removal_cookie, SessionState};
use crate::models::Role;
use crate::utils::logging::log_session_cleared;

/// Rotas de gestão de sessões e vendedores.
pub async fn require_gestao(jar: CookieJar, request: Request, next: Next) -> Result<Response, Response> {
    guard(&jar, &[Role::Admin, Role::Operador], request, next).await
}

/// Rotas exclusivas de administrador (usuários e relatórios gerais).
pub async fn require_admin(jar: CookieJar, request: Request, next: Next) -> Result<Response, Response> {
    guard(&jar, &[Role::Admin], request, next).await
}

/// Aba de mensagens: administradores e vendedores.
pub async fn require_atendimento(jar: CookieJar, request: Request, next: Next) -> Result<Response, Response> {
    guard(&jar, &[Role::Admin, Role::Vendedor], request, next).await
}

/// Relatório individual: só o próprio vendedor.
pub async fn require_vendedor(jar: CookieJar, request: Request, next: Next) -> Result<Response, Response> {
    guard(&jar, &[Role::Vendedor], request, next).await
}

async fn guard(
    jar: &CookieJar,
    allowed: &[Role],
    request: Request,
    next: Next,
) -> Result<Response, Response> {
    match SessionState::from_jar(jar) {
        SessionState::Authenticated(user) if allowed.contains(&user.role) => {
            Ok(next.run(request).await)
        }
        SessionState::Authenticated(user) => {
            tracing::warn!(
                "Acesso negado: papel '{}' não autorizado em {}",
                user.role.as_str(),
                request.uri().path()
            );
            Err(forbidden_response())
        }
        SessionState::Unauthenticated => Err(unauthorized_response()),
        SessionState::Corrupted => {
            log_session_cleared("cookie ilegível");
            Err(corrupted_session_response())
        }
    }
}

fn unauthorized_response() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "error": "Não autenticado",
            "status": StatusCode::UNAUTHORIZED.as_u16()
        })),
    )
        .into_response()
}

fn forbidden_response() -> Response {
    (
        StatusCode::FORBIDDEN,
        Json(json!({
            "error": "Acesso não autorizado para este papel",
            "status": StatusCode::FORBIDDEN.as_u16()
        })),
    )
        .into_response()
}

/// Cookie ilegível: responde 401 e já remove o cookie na mesma resposta,
/// para a sessão se recompor no próximo login.
fn corrupted_session_response() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        [(SET_COOKIE, removal_cookie().to_string())],
        Json(json!({
            "error": "Sessão inválida",
            "status": StatusCode::UNAUTHORIZED.as_u16()
        })),
    )
        .into_response()
}
