//! Normalização das respostas em lista do backend n8n.
//!
//! O backend não fixa o formato das coleções: a mesma operação pode devolver
//! um array puro, `{chave: [...]}` ou `[{chave: [...]}]` — e listas de
//! vendedores já chegaram com um nível extra de aninhamento. Este módulo
//! reduz qualquer um desses formatos à coleção esperada, sem nunca falhar:
//! formato irreconhecível vira lista vazia, com warn no log.

use serde_json::Value;

/// Campos que identificam um registro "nativo" quando o backend devolve um
/// array puro, sem chave envolvente.
const RECORD_DISCRIMINATORS: &[&str] = &["id", "nome", "name", "sessao"];

/// Formatos tolerados de uma resposta em lista.
#[derive(Debug)]
enum CollectionShape<'a> {
    /// `[{chave: [...]}, ...]` — array envolvendo o objeto chaveado.
    WrappedKeyed(&'a Vec<Value>),
    /// `{chave: [...]}`.
    Keyed(&'a Vec<Value>),
    /// Array puro de registros.
    Bare(&'a [Value]),
    Unrecognized,
}

fn classify<'a>(value: &'a Value, key: &str) -> CollectionShape<'a> {
    match value {
        Value::Array(items) => {
            let keyed = items.iter().find_map(|item| {
                item.as_object()
                    .and_then(|obj| obj.get(key))
                    .and_then(Value::as_array)
            });
            if let Some(inner) = keyed {
                return CollectionShape::WrappedKeyed(inner);
            }
            let has_records = items.iter().any(|item| {
                item.as_object().map_or(false, |obj| {
                    RECORD_DISCRIMINATORS.iter().any(|field| obj.contains_key(*field))
                })
            });
            if has_records {
                CollectionShape::Bare(items)
            } else {
                CollectionShape::Unrecognized
            }
        }
        Value::Object(map) => match map.get(key).and_then(Value::as_array) {
            Some(inner) => CollectionShape::Keyed(inner),
            None => CollectionShape::Unrecognized,
        },
        _ => CollectionShape::Unrecognized,
    }
}

/// Desfaz um nível extra de aninhamento: `[{chave: [...]}]` dentro da própria
/// coleção chaveada (observado nas listas de vendedores).
fn unwrap_nested(items: &[Value], key: &str) -> Vec<Value> {
    if let Some(inner) = items
        .first()
        .and_then(|item| item.as_object())
        .and_then(|obj| obj.get(key))
        .and_then(Value::as_array)
    {
        return inner.clone();
    }
    items.to_vec()
}

/// Reduz a resposta do webhook à coleção nomeada por `key`.
///
/// Aceita os três formatos documentados (array puro, `{key: [...]}` e
/// `[{key: [...]}]`) e devolve lista vazia para qualquer outra coisa.
pub fn extract_collection(value: &Value, key: &str) -> Vec<Value> {
    match classify(value, key) {
        CollectionShape::WrappedKeyed(items) | CollectionShape::Keyed(items) => {
            unwrap_nested(items, key)
        }
        CollectionShape::Bare(items) => items.to_vec(),
        CollectionShape::Unrecognized => {
            if !is_trivially_empty(value) {
                tracing::warn!(
                    "Formato inesperado na resposta do webhook (chave '{}'): {}",
                    key,
                    shape_of(value)
                );
            }
            Vec::new()
        }
    }
}

/// Variante usada para coleções secundárias de uma resposta combinada
/// (ex.: `vendedores` e `tags` junto de `sessoes`): só aceita os formatos
/// chaveados. Um array puro pertence à coleção primária, não a esta.
pub fn extract_keyed(value: &Value, key: &str) -> Vec<Value> {
    match classify(value, key) {
        CollectionShape::WrappedKeyed(items) | CollectionShape::Keyed(items) => {
            unwrap_nested(items, key)
        }
        _ => Vec::new(),
    }
}

/// Para respostas sem chave conhecida (relatório individual): o array em si,
/// ou a primeira propriedade em array de um objeto.
pub fn extract_first_array(value: &Value) -> Vec<Value> {
    match value {
        Value::Array(items) => items.clone(),
        Value::Object(map) => map
            .values()
            .find_map(Value::as_array)
            .cloned()
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}

fn is_trivially_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

fn shape_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bare_array_passes_through() {
        let input = json!([
            {"id": 1, "sessao": "vendas-01"},
            {"id": 2, "sessao": "vendas-02"}
        ]);
        let result = extract_collection(&input, "sessoes");
        assert_eq!(result.len(), 2);
        assert_eq!(result[0]["id"], 1);
    }

    #[test]
    fn test_idempotent_on_normalized_input() {
        let input = json!([{"id": 1, "nome": "Ana"}]);
        let once = extract_collection(&input, "usuarios");
        let twice = extract_collection(&Value::Array(once.clone()), "usuarios");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_three_documented_shapes_are_equivalent() {
        let records = json!([{"id": 1, "sessao": "vendas-01"}]);
        let wrapped = json!([{"sessoes": records.clone()}]);
        let keyed = json!({"sessoes": records.clone()});

        let expected = records.as_array().unwrap().clone();
        assert_eq!(extract_collection(&records, "sessoes"), expected);
        assert_eq!(extract_collection(&wrapped, "sessoes"), expected);
        assert_eq!(extract_collection(&keyed, "sessoes"), expected);
    }

    #[test]
    fn test_malformed_inputs_return_empty() {
        assert!(extract_collection(&Value::Null, "sessoes").is_empty());
        assert!(extract_collection(&json!({}), "sessoes").is_empty());
        assert!(extract_collection(&json!([]), "sessoes").is_empty());
        assert!(extract_collection(&json!([1, "dois", true]), "sessoes").is_empty());
        assert!(extract_collection(&json!("texto solto"), "sessoes").is_empty());
    }

    #[test]
    fn test_vendor_list_double_nesting() {
        // Formato já observado em contas_vendedor: a coleção chaveada contém
        // ela mesma outro objeto {vendedores: [...]}.
        let input = json!([{
            "vendedores": [{
                "vendedores": [{"id": 1, "nome": "X", "quantidade_zaps": 0, "zaps": []}]
            }]
        }]);
        let result = extract_collection(&input, "vendedores");
        assert_eq!(result.len(), 1);
        assert_eq!(result[0]["nome"], "X");
    }

    #[test]
    fn test_single_nesting_vendor_list() {
        let input = json!([{
            "vendedores": [{"id": 1, "nome": "X", "quantidade_zaps": 0, "zaps": []}]
        }]);
        let result = extract_collection(&input, "vendedores");
        assert_eq!(result.len(), 1);
        assert_eq!(result[0]["id"], 1);
    }

    #[test]
    fn test_extract_keyed_ignores_bare_arrays() {
        let bare = json!([{"id": 1, "sessao": "vendas-01"}]);
        assert!(extract_keyed(&bare, "vendedores").is_empty());

        let combined = json!([
            {"sessoes": [{"id": 1}]},
            {"vendedores": [{"id": 7, "nome": "V"}]}
        ]);
        let vendedores = extract_keyed(&combined, "vendedores");
        assert_eq!(vendedores.len(), 1);
        assert_eq!(vendedores[0]["id"], 7);
    }

    #[test]
    fn test_extract_first_array() {
        assert_eq!(
            extract_first_array(&json!([{"dia": "2024-01-01"}])).len(),
            1
        );
        assert_eq!(
            extract_first_array(&json!({"relatorio": [{"dia": "2024-01-01"}]})).len(),
            1
        );
        assert!(extract_first_array(&json!("nada")).is_empty());
    }
}
