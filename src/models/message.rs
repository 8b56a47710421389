use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashMap;

use crate::models::session::SessionData;
use crate::models::template::Template;

/// Corpo aceito em `/api/messages/send`: o template escolhido, os valores
/// digitados e o contexto da sessão. A mensagem final é montada aqui no
/// servidor antes de seguir para `vendedor_manda_mensagem`.
#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub sessao: SessionData,
    pub template: Template,
    #[serde(default)]
    pub valores: HashMap<String, String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub demanda: Option<String>,
    #[serde(default)]
    pub numero_cliente: String,
    #[serde(default)]
    pub dados_cliente: Option<Value>,
    pub usuario: Value,
}

impl SendMessageRequest {
    /// Payload no contrato de `vendedor_manda_mensagem`: subconjunto fixo da
    /// sessão, mensagem resolvida e as variáveis como lista de objetos de
    /// chave única, na ordem declarada pelo template.
    pub fn to_upstream(&self) -> Value {
        let variaveis: Vec<Value> = self
            .template
            .variaveis
            .iter()
            .filter_map(|nome| {
                self.valores.get(nome).map(|valor| {
                    let mut item = serde_json::Map::new();
                    item.insert(nome.clone(), Value::String(valor.clone()));
                    Value::Object(item)
                })
            })
            .collect();

        json!({
            "sessao": {
                "sessao": self.sessao.sessao,
                "id": self.sessao.id,
                "numero": self.sessao.numero,
                "id_numero": self.sessao.id_numero,
                "token_permanente": self.sessao.token_permanente,
                "inbox_id": self.sessao.inbox_id,
                "tipo_atendimento": self.sessao.tipo_atendimento,
                "origem_atendimento": self.sessao.origem_atendimento,
                "nome_atendente": self.sessao.nome_atendente,
            },
            "mensagem_completa": self.template.mensagem_completa(&self.valores),
            "nome_template": self.template.nome,
            "lingua_template": self.template.lingua(),
            "variaveis": variaveis,
            "tags": self.tags,
            "demanda": self.demanda,
            "numero_cliente": self.numero_cliente,
            "dados_cliente": self.dados_cliente,
            "usuario": self.usuario,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_upstream_monta_mensagem_e_variaveis() {
        let req: SendMessageRequest = serde_json::from_value(json!({
            "sessao": {"id": 1, "sessao": "vendas-01", "numero": "5511999999999"},
            "template": {
                "nome": "boas_vindas",
                "texto": "Olá {{nome}}!",
                "variaveis": ["nome"],
                "botoes": ["Sim", "Não"],
                "linguagem": "pt_BR"
            },
            "valores": {"nome": "Ana"},
            "tags": ["vip"],
            "demanda": "ativa",
            "numero_cliente": "5511988887777",
            "usuario": {"id": "7", "role": "vendedor"}
        }))
        .unwrap();

        let payload = req.to_upstream();
        assert_eq!(payload["mensagem_completa"], "Olá Ana!\n\nSim\nNão");
        assert_eq!(payload["nome_template"], "boas_vindas");
        assert_eq!(payload["lingua_template"], "pt_BR");
        assert_eq!(payload["variaveis"], json!([{"nome": "Ana"}]));
        assert_eq!(payload["sessao"]["sessao"], "vendas-01");
        assert_eq!(payload["numero_cliente"], "5511988887777");
    }

    #[test]
    fn test_variavel_nao_preenchida_fica_fora_da_lista() {
        let req: SendMessageRequest = serde_json::from_value(json!({
            "sessao": {},
            "template": {
                "nome": "t",
                "texto": "{{a}} {{b}}",
                "variaveis": ["a", "b"]
            },
            "valores": {"b": "2"},
            "usuario": {}
        }))
        .unwrap();

        let payload = req.to_upstream();
        // A mensagem resolve as duas (ausente vira vazio)...
        assert_eq!(payload["mensagem_completa"], " 2");
        // ...mas a lista encaminhada só carrega as preenchidas.
        assert_eq!(payload["variaveis"], json!([{"b": "2"}]));
    }
}
