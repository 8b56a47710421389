//! Testes de integração do contrato de proxy: app axum completo contra um
//! backend n8n simulado com httpmock.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use httpmock::prelude::*;
use serde_json::{json, Value};
use tower::ServiceExt;

use meta_vendedores_middleware::auth::credential_digest;
use meta_vendedores_middleware::config::settings::{
    AuthSettings, ServerSettings, Settings, WebhookSettings,
};
use meta_vendedores_middleware::models::{Role, User};
use meta_vendedores_middleware::services::N8nApiService;
use meta_vendedores_middleware::{api_router, AppState};

fn app(server: &MockServer) -> axum::Router {
    let settings = Settings {
        server: ServerSettings {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        webhook: WebhookSettings {
            base_url: server.url("/site_meta"),
        },
        auth: AuthSettings {
            remember_max_age_days: 30,
        },
    };
    let n8n = N8nApiService::new(reqwest::Client::new(), settings.webhook.base_url.clone());
    api_router(Arc::new(AppState { settings, n8n }))
}

fn session_cookie(role: Role) -> String {
    let user = User {
        id: "7".to_string(),
        name: "Teste".to_string(),
        email: "teste@empresa.com".to_string(),
        role,
    };
    format!(
        "user_session={}",
        urlencoding::encode(&serde_json::to_string(&user).unwrap())
    )
}

fn post_json(uri: &str, cookie: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn login_com_resposta_texto_cria_sessao() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/site_meta/loga_usuario")
                .json_body(json!({
                    "email": "ana@empresa.com",
                    "password": credential_digest("segredo")
                }));
            then.status(200).body("OK");
        })
        .await;

    let response = app(&server)
        .oneshot(post_json(
            "/api/login",
            None,
            json!({"email": "ana@empresa.com", "password": "segredo"}),
        ))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(response.status(), StatusCode::OK);

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("login deve gravar o cookie de sessão")
        .to_str()
        .unwrap()
        .to_string();
    assert!(set_cookie.starts_with("user_session="));
    assert!(set_cookie.contains("Max-Age"));

    let body = body_json(response).await;
    assert_eq!(body["email"], "ana@empresa.com");
    assert_eq!(body["name"], "ana");
    assert_eq!(body["role"], "operador");
}

#[tokio::test]
async fn login_sem_lembrar_gera_cookie_de_sessao() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/site_meta/loga_usuario");
            then.status(200)
                .json_body(json!({"id": 1, "name": "Ana", "role": "admin"}));
        })
        .await;

    let response = app(&server)
        .oneshot(post_json(
            "/api/login",
            None,
            json!({
                "email": "ana@empresa.com",
                "password": "segredo",
                "remember_me": false
            }),
        ))
        .await
        .unwrap();

    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(!set_cookie.contains("Max-Age"));
}

#[tokio::test]
async fn falha_do_webhook_espelha_status_e_texto() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/site_meta/pega_relatorio");
            then.status(500).body("boom");
        })
        .await;

    let response = app(&server)
        .oneshot(post_json(
            "/api/reports",
            Some(&session_cookie(Role::Admin)),
            json!({}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["error"], "boom");
    assert_eq!(body["status"], 500);
}

#[tokio::test]
async fn lista_de_vendedores_aninhada_vira_array_puro() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/site_meta/contas_vendedor");
            then.status(200).json_body(json!([{
                "vendedores": [{"id": 1, "nome": "X", "quantidade_zaps": 0, "zaps": []}]
            }]));
        })
        .await;

    let response = app(&server)
        .oneshot(post_json(
            "/api/vendedores",
            Some(&session_cookie(Role::Operador)),
            json!({}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(
        body,
        json!([{"id": 1, "nome": "X", "quantidade_zaps": 0, "zaps": []}])
    );
}

#[tokio::test]
async fn selecao_de_sessao_normaliza_templates() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/site_meta/vendedor_selecionou");
            then.status(200).json_body(json!([{
                "templates": [{"nome": "boas_vindas", "texto": "Oi {{nome}}"}]
            }]));
        })
        .await;

    let response = app(&server)
        .oneshot(post_json(
            "/api/messages/select",
            Some(&session_cookie(Role::Vendedor)),
            json!({"sessao": "vendas-01", "user": {"id": "7"}}),
        ))
        .await
        .unwrap();

    let body = body_json(response).await;
    assert_eq!(body["templates"][0]["nome"], "boas_vindas");
}

#[tokio::test]
async fn envio_resolve_template_no_servidor() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/site_meta/vendedor_manda_mensagem")
                .json_body_partial(
                    r#"{"mensagem_completa": "Olá Ana!\n\nSim\nNão", "nome_template": "boas_vindas"}"#,
                );
            then.status(200).json_body(json!({"status": "ok"}));
        })
        .await;

    let response = app(&server)
        .oneshot(post_json(
            "/api/messages/send",
            Some(&session_cookie(Role::Vendedor)),
            json!({
                "sessao": {"id": 1, "sessao": "vendas-01"},
                "template": {
                    "nome": "boas_vindas",
                    "texto": "Olá {{nome}}!",
                    "variaveis": ["nome"],
                    "botoes": ["Sim", "Não"]
                },
                "valores": {"nome": "Ana"},
                "numero_cliente": "5511999999999",
                "usuario": {"id": "7"}
            }),
        ))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body, json!({"success": true}));
}

#[tokio::test]
async fn papel_errado_recebe_403_sem_chamar_o_backend() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/site_meta/pega_relatorio");
            then.status(200).json_body(json!([]));
        })
        .await;

    let response = app(&server)
        .oneshot(post_json(
            "/api/reports",
            Some(&session_cookie(Role::Vendedor)),
            json!({}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(mock.hits_async().await, 0);
}

#[tokio::test]
async fn sem_cookie_recebe_401() {
    let server = MockServer::start_async().await;

    let response = app(&server)
        .oneshot(post_json("/api/sessions", None, json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn cookie_ilegivel_e_removido_na_resposta() {
    let server = MockServer::start_async().await;

    let response = app(&server)
        .oneshot(post_json(
            "/api/sessions",
            Some("user_session=isto-nao-e-json"),
            json!({}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("resposta deve limpar o cookie corrompido")
        .to_str()
        .unwrap();
    assert!(set_cookie.starts_with("user_session="));
    assert!(set_cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn criar_sessao_valida_numero_antes_de_encaminhar() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/site_meta/cria_sessao");
            then.status(200).json_body(json!({"id": 10}));
        })
        .await;

    let response = app(&server)
        .oneshot(post_json(
            "/api/sessions/create",
            Some(&session_cookie(Role::Admin)),
            json!({"sessao": "vendas-02", "numero": "1234"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(mock.hits_async().await, 0);

    let response = app(&server)
        .oneshot(post_json(
            "/api/sessions/create",
            Some(&session_cookie(Role::Admin)),
            json!({"sessao": "vendas-02", "numero": "5511999999999"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(mock.hits_async().await, 1);
}

#[tokio::test]
async fn lista_de_sessoes_combina_sessoes_e_vendedores() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/site_meta/pega_sessao");
            then.status(200).json_body(json!([
                {"sessoes": [{"id": 1, "sessao": "vendas-01"}]},
                {"vendedores": [{"vendedores": [{"id": 9, "nome": "V"}]}]}
            ]));
        })
        .await;

    let response = app(&server)
        .oneshot(post_json(
            "/api/sessions",
            Some(&session_cookie(Role::Operador)),
            json!({}),
        ))
        .await
        .unwrap();

    let body = body_json(response).await;
    assert_eq!(body["sessoes"][0]["sessao"], "vendas-01");
    // O aninhamento duplo das contas de vendedor é desfeito no caminho.
    assert_eq!(body["vendedores"][0]["nome"], "V");
}

#[tokio::test]
async fn busca_de_cliente_higieniza_numero() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/site_meta/vendedor_busca_cliente");
            then.status(200).json_body(json!([{
                "dados_cliente": {"NOME": "Ana", "TELEFONE": "+55 (11) 99999-9999"},
                "tags": ["vip"],
                "variaveis": [{"nome": "Ana"}]
            }]));
        })
        .await;

    let response = app(&server)
        .oneshot(post_json(
            "/api/messages/search-clients",
            Some(&session_cookie(Role::Vendedor)),
            json!({"sessao": {}, "empresa": "ACME", "tipo": "novo", "data": "2024-01-01"}),
        ))
        .await
        .unwrap();

    let body = body_json(response).await;
    assert_eq!(body["numero_cliente"], "5511999999999");
    assert_eq!(body["tags"], json!(["vip"]));
    assert_eq!(body["variaveis"]["nome"], "Ana");
    assert_eq!(body["dados_cliente"]["NOME"], "Ana");
}

#[tokio::test]
async fn logout_limpa_o_cookie() {
    let server = MockServer::start_async().await;

    let response = app(&server)
        .oneshot(post_json(
            "/api/logout",
            Some(&session_cookie(Role::Admin)),
            json!({}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("logout deve remover o cookie")
        .to_str()
        .unwrap();
    assert!(set_cookie.starts_with("user_session="));
}
