use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Sessão de vendas como o backend devolve em `pega_sessao`. Os campos podem
/// faltar dependendo da origem; o que não é mapeado fica em `extra`.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct SessionData {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub sessao: Option<String>,
    #[serde(default)]
    pub numero: Option<String>,
    #[serde(default)]
    pub id_numero: Option<Value>,
    #[serde(default)]
    pub token_permanente: Option<String>,
    #[serde(default)]
    pub inbox_id: Option<Value>,
    #[serde(default)]
    pub tipo_atendimento: Option<String>,
    #[serde(default)]
    pub origem_atendimento: Option<String>,
    #[serde(default)]
    pub nome_atendente: Option<String>,
    #[serde(default)]
    pub nome_app: Option<String>,
    #[serde(default)]
    pub vendedor_chatwoot: Option<String>,
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

/// Formulário de criação de sessão (`cria_sessao`).
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateSessionRequest {
    pub sessao: String,
    #[serde(default)]
    pub origem_atendimento: String,
    #[serde(default)]
    pub tipo_atendimento: String,
    #[serde(default)]
    pub nome_atendente: String,
    #[serde(default)]
    pub nome_app: String,
    pub numero: String,
    #[serde(default)]
    pub id_numero: String,
    #[serde(default)]
    pub id_business: String,
    #[serde(default)]
    pub id_aplicativo: String,
    #[serde(default)]
    pub token_permanente: String,
}

impl CreateSessionRequest {
    /// O número do WhatsApp precisa ter entre 12 e 13 dígitos, sem máscara.
    pub fn validate(&self) -> Result<(), String> {
        if !self.numero.chars().all(|c| c.is_ascii_digit()) {
            return Err("O campo Número deve conter apenas dígitos.".to_string());
        }
        if self.numero.len() < 12 || self.numero.len() > 13 {
            return Err("O campo Número deve ter entre 12 e 13 dígitos.".to_string());
        }
        Ok(())
    }
}

/// Atribuição de vendedor a uma sessão (`atribuir_vendedor`). Ids chegam como
/// string ou número dependendo da tela.
#[derive(Debug, Serialize, Deserialize)]
pub struct AssignVendorRequest {
    pub id_sessao: Value,
    pub sessao: String,
    pub id_vendedor: Value,
    pub nome_vendedor: String,
}
