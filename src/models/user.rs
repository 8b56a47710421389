use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Papéis reconhecidos pelo painel. O backend devolve a string já nesses
/// três valores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Operador,
    Vendedor,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Operador => "operador",
            Role::Vendedor => "vendedor",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "admin" => Some(Role::Admin),
            "operador" => Some(Role::Operador),
            "vendedor" => Some(Role::Vendedor),
            _ => None,
        }
    }
}

/// Usuário da sessão, como persistido no cookie `user_session`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl User {
    /// Monta o usuário a partir da resposta de `loga_usuario`, tolerando os
    /// formatos já observados: registro solto ou array com o registro na
    /// primeira posição, `id` numérico ou string, nome em `name` ou `nome`.
    pub fn from_upstream(data: &Value, email: &str) -> Self {
        let record = match data {
            Value::Array(items) if !items.is_empty() => &items[0],
            other => other,
        };

        let id = record
            .get("id")
            .filter(|v| !v.is_null())
            .map(|v| match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| "n8n-user".to_string());

        let name = record
            .get("name")
            .or_else(|| record.get("nome"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| email.split('@').next().unwrap_or(email).to_string());

        let role = record
            .get("role")
            .and_then(Value::as_str)
            .and_then(Role::parse)
            .unwrap_or(Role::Operador);

        User {
            id,
            name,
            email: email.to_string(),
            role,
        }
    }
}

/// Corpo aceito em `/api/login`. A senha chega em claro pelo canal TLS e é
/// digerida aqui no servidor antes de seguir ao webhook.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    #[serde(default = "default_remember", alias = "rememberMe")]
    pub remember_me: bool,
}

fn default_remember() -> bool {
    true
}

/// Corpo aceito em `/api/register`.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_upstream_full_record() {
        let data = json!({"id": 7, "name": "Ana", "role": "admin"});
        let user = User::from_upstream(&data, "ana@empresa.com");
        assert_eq!(user.id, "7");
        assert_eq!(user.name, "Ana");
        assert_eq!(user.role, Role::Admin);
        assert_eq!(user.email, "ana@empresa.com");
    }

    #[test]
    fn test_from_upstream_array_wrapped() {
        let data = json!([{"id": "abc", "nome": "Bruno", "role": "vendedor"}]);
        let user = User::from_upstream(&data, "bruno@empresa.com");
        assert_eq!(user.id, "abc");
        assert_eq!(user.name, "Bruno");
        assert_eq!(user.role, Role::Vendedor);
    }

    #[test]
    fn test_from_upstream_plain_text_ok() {
        // Login que devolve só "OK" vira {message: "OK"} no proxy; o usuário
        // é construído com os valores de fallback.
        let data = json!({"message": "OK"});
        let user = User::from_upstream(&data, "carla@empresa.com");
        assert_eq!(user.id, "n8n-user");
        assert_eq!(user.name, "carla");
        assert_eq!(user.role, Role::Operador);
    }

    #[test]
    fn test_role_roundtrip() {
        let role: Role = serde_json::from_str("\"operador\"").unwrap();
        assert_eq!(role, Role::Operador);
        assert_eq!(serde_json::to_string(&role).unwrap(), "\"operador\"");
    }
}
