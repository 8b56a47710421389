use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;

/// Comprimento máximo de um número de cliente (DDI + DDD + número).
const MAX_DIGITOS_NUMERO: usize = 13;

/// Resultado normalizado de `vendedor_busca_cliente`.
///
/// O backend devolve o lead em formatos variados e com grafias divergentes
/// (`numero_cliente`, `numer_cliente`, `telefone`, `TELEFONE`); aqui tudo é
/// reduzido a um único registro com o número já higienizado.
#[derive(Debug, Serialize, Default)]
pub struct ClientMatch {
    pub dados_cliente: Option<Value>,
    pub numero_cliente: String,
    pub tags: Vec<String>,
    /// Valores de variáveis pré-preenchidos pelo backend, já achatados de
    /// `[{nome: valor}, ...]` para um mapa.
    pub variaveis: HashMap<String, String>,
}

impl ClientMatch {
    pub fn from_upstream(data: &Value) -> Self {
        let first = match data {
            Value::Array(items) => match items.first() {
                Some(item) => item,
                None => return ClientMatch::default(),
            },
            other => other,
        };
        if first.is_null() {
            return ClientMatch::default();
        }

        // O registro do cliente pode vir embrulhado em `dados_cliente` ou ser
        // o próprio item.
        let dados = first
            .get("dados_cliente")
            .filter(|v| !v.is_null())
            .unwrap_or(first);

        let numero_cliente = first_non_null(first, &["numero_cliente", "numer_cliente"])
            .or_else(|| {
                first_non_null(
                    dados,
                    &["numero_cliente", "numer_cliente", "telefone", "TELEFONE"],
                )
            })
            .map(sanitize_numero)
            .unwrap_or_default();

        let tags = first
            .get("tags")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        let variaveis = first
            .get("variaveis")
            .and_then(Value::as_array)
            .map(|items| fold_variaveis(items))
            .unwrap_or_default();

        ClientMatch {
            dados_cliente: Some(dados.clone()),
            numero_cliente,
            tags,
            variaveis,
        }
    }
}

fn first_non_null<'a>(record: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| record.get(*key))
        .find(|v| !v.is_null())
}

/// Mantém só os dígitos e corta no comprimento máximo de um número.
fn sanitize_numero(value: &Value) -> String {
    let raw = match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    raw.chars()
        .filter(|c| c.is_ascii_digit())
        .take(MAX_DIGITOS_NUMERO)
        .collect()
}

/// `[{nome: valor}, ...]` → mapa nome→valor; cada item carrega uma chave só.
fn fold_variaveis(items: &[Value]) -> HashMap<String, String> {
    let mut valores = HashMap::new();
    for item in items {
        if let Some(obj) = item.as_object() {
            for (key, value) in obj {
                let texto = match value {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                valores.insert(key.clone(), texto);
            }
        }
    }
    valores
}
