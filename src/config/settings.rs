use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub webhook: WebhookSettings,
    pub auth: AuthSettings,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct WebhookSettings {
    /// URL base das operações do n8n; cada operação é um sufixo fixo
    /// (`loga_usuario`, `pega_sessao`, ...).
    pub base_url: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AuthSettings {
    /// Validade do cookie `user_session` quando o login pede "lembrar de mim".
    pub remember_max_age_days: i64,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let mut builder = Config::builder()
            // Arquivo de configuração base
            .add_source(File::with_name("config/default").required(false))
            // Arquivo específico do ambiente
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false));

        if let Ok(base_url) = std::env::var("WEBHOOK_BASE_URL") {
            builder = builder.set_override("webhook.base_url", base_url)?;
        }

        builder = builder.add_source(Environment::with_prefix("META_VENDEDORES").separator("__"));

        let s = builder.build()?;

        s.try_deserialize()
    }
}
