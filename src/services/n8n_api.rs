//! Cliente das operações do backend n8n.
//!
//! Cada operação do painel corresponde a um webhook fixo sob a URL base
//! configurada. O contrato é sempre o mesmo: POST JSON, espera a resposta
//! inteira, sem timeout nem retry — submissão duplicada é responsabilidade
//! de quem clica.

use reqwest::Client;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::utils::logging::*;
use crate::utils::{AppError, AppResult};

#[derive(Clone)]
pub struct N8nApiService {
    client: Client,
    base_url: String,
}

impl N8nApiService {
    pub fn new(client: Client, base_url: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Encaminha `body` para a operação e devolve a resposta como JSON.
    ///
    /// Sucesso com corpo não-JSON (login/registro respondem "OK" em texto)
    /// vira `{message: <texto>}`. Status fora da faixa de sucesso vira
    /// `AppError::Upstream` espelhando status e corpo.
    async fn post_json(&self, operation: &str, body: &Value) -> AppResult<Value> {
        let call_id = Uuid::new_v4().to_string();
        let url = format!("{}/{}", self.base_url, operation);
        log_webhook_call(operation, &call_id);

        let response = self.client.post(&url).json(body).send().await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            log_webhook_error(operation, Some(status.as_u16()), &text);
            return Err(AppError::Upstream {
                status: status.as_u16(),
                body: text,
            });
        }

        match serde_json::from_str(&text) {
            Ok(value) => Ok(value),
            Err(_) => Ok(json!({ "message": text })),
        }
    }

    pub async fn login(&self, body: &Value) -> AppResult<Value> {
        self.post_json("loga_usuario", body).await
    }

    pub async fn register(&self, body: &Value) -> AppResult<Value> {
        self.post_json("registra_usuario", body).await
    }

    pub async fn list_sessions(&self) -> AppResult<Value> {
        self.post_json("pega_sessao", &json!({})).await
    }

    pub async fn create_session(&self, body: &Value) -> AppResult<Value> {
        self.post_json("cria_sessao", body).await
    }

    pub async fn edit_session(&self, body: &Value) -> AppResult<Value> {
        self.post_json("edita_sessao", body).await
    }

    pub async fn assign_vendor(&self, body: &Value) -> AppResult<Value> {
        self.post_json("atribuir_vendedor", body).await
    }

    pub async fn init_messages(&self, body: &Value) -> AppResult<Value> {
        self.post_json("aba_mensagem_vendedor", body).await
    }

    pub async fn select_session(&self, body: &Value) -> AppResult<Value> {
        self.post_json("vendedor_selecionou", body).await
    }

    pub async fn search_clients(&self, body: &Value) -> AppResult<Value> {
        self.post_json("vendedor_busca_cliente", body).await
    }

    pub async fn send_message(&self, body: &Value) -> AppResult<Value> {
        self.post_json("vendedor_manda_mensagem", body).await
    }

    pub async fn list_users(&self) -> AppResult<Value> {
        self.post_json("pega_usuario", &json!({})).await
    }

    pub async fn update_user(&self, body: &Value) -> AppResult<Value> {
        self.post_json("atualiza_usuario", body).await
    }

    pub async fn link_chatwoot(&self) -> AppResult<Value> {
        self.post_json("vincula_chatwoot", &json!({})).await
    }

    pub async fn list_vendors(&self) -> AppResult<Value> {
        self.post_json("contas_vendedor", &json!({})).await
    }

    pub async fn get_reports(&self) -> AppResult<Value> {
        self.post_json("pega_relatorio", &json!({})).await
    }

    pub async fn edit_report(&self, body: &Value) -> AppResult<Value> {
        self.post_json("edita_relatorio", body).await
    }

    pub async fn delete_report(&self, body: &Value) -> AppResult<Value> {
        self.post_json("deleta_relatorio", body).await
    }

    pub async fn personal_report(&self, body: &Value) -> AppResult<Value> {
        self.post_json("relatorio_vendedor_individual", body).await
    }
}
