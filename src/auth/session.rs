//! Sessão do painel, persistida no cookie `user_session`.
//!
//! O cookie carrega o usuário serializado em JSON (percent-encoded, como as
//! bibliotecas de cookie dos navegadores fazem). Cookie ilegível não é erro
//! fatal: a sessão vira não autenticada e o cookie é removido na resposta.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::models::User;
use crate::utils::AppResult;

pub const SESSION_COOKIE: &str = "user_session";

/// Estado da sessão derivado do cookie a cada requisição.
#[derive(Debug, Clone)]
pub enum SessionState {
    /// Cookie ausente.
    Unauthenticated,
    /// Cookie presente e válido.
    Authenticated(User),
    /// Cookie presente mas ilegível; deve ser removido na resposta.
    Corrupted,
}

impl SessionState {
    pub fn from_jar(jar: &CookieJar) -> Self {
        let cookie = match jar.get(SESSION_COOKIE) {
            Some(cookie) => cookie,
            None => return SessionState::Unauthenticated,
        };

        let decoded = match urlencoding::decode(cookie.value()) {
            Ok(decoded) => decoded,
            Err(_) => return SessionState::Corrupted,
        };

        match serde_json::from_str::<User>(&decoded) {
            Ok(user) => SessionState::Authenticated(user),
            Err(_) => SessionState::Corrupted,
        }
    }

    pub fn user(&self) -> Option<&User> {
        match self {
            SessionState::Authenticated(user) => Some(user),
            _ => None,
        }
    }
}

/// Emite o cookie de sessão para o usuário logado. Com "lembrar de mim" o
/// cookie ganha validade em dias; sem, dura só a sessão do navegador.
pub fn issue_cookie(user: &User, remember: bool, max_age_days: i64) -> AppResult<Cookie<'static>> {
    let payload = urlencoding::encode(&serde_json::to_string(user)?).into_owned();

    let mut builder = Cookie::build((SESSION_COOKIE, payload))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax);

    if remember {
        builder = builder.max_age(time::Duration::days(max_age_days));
    }

    Ok(builder.build())
}

/// Cookie usado para remover a sessão (logout ou cookie corrompido). Valor
/// vazio e Max-Age zero, para servir direto num header Set-Cookie.
pub fn removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::new(SESSION_COOKIE, "");
    cookie.set_path("/");
    cookie.set_max_age(time::Duration::ZERO);
    cookie
}
