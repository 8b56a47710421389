use axum::{extract::State, response::Json};
use axum_extra::extract::cookie::CookieJar;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::time::Instant;

use crate::auth::{credential_digest, issue_cookie, removal_cookie};
use crate::models::{LoginRequest, RegisterRequest, User};
use crate::utils::logging::*;
use crate::utils::AppError;
use crate::AppState;

/// Login do painel: digere a senha, chama `loga_usuario` e grava o cookie de
/// sessão. Qualquer 2xx do webhook é login válido — inclusive o "OK" em
/// texto puro que o fluxo legado devolve.
pub async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Json(body): Json<LoginRequest>,
) -> Result<(CookieJar, Json<Value>), AppError> {
    let start_time = Instant::now();
    log_request_received("/api/login", "POST");

    if body.password.is_empty() {
        log_validation_error("password", "senha vazia");
        return Err(AppError::ValidationError("Senha é obrigatória".to_string()));
    }

    let digest = credential_digest(&body.password);
    let data = state
        .n8n
        .login(&json!({"email": body.email, "password": digest}))
        .await?;

    let user = User::from_upstream(&data, &body.email);
    let cookie = issue_cookie(
        &user,
        body.remember_me,
        state.settings.auth.remember_max_age_days,
    )?;

    log_login_success(&user.email, user.role.as_str());
    log_request_processed("/api/login", 200, start_time.elapsed().as_millis() as u64);

    Ok((jar.add(cookie), Json(serde_json::to_value(&user)?)))
}

/// Registro de usuário; a criação em si acontece no backend.
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RegisterRequest>,
) -> Result<Json<Value>, AppError> {
    log_request_received("/api/register", "POST");

    let digest = credential_digest(&body.password);
    let data = state
        .n8n
        .register(&json!({
            "name": body.name,
            "email": body.email,
            "password": digest,
            "role": body.role,
        }))
        .await?;

    Ok(Json(data))
}

/// Logout só existe localmente: remove o cookie e pronto.
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<Value>) {
    log_request_received("/api/logout", "POST");
    let jar = jar.remove(removal_cookie());
    (jar, Json(json!({"success": true})))
}
