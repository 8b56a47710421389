use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Template de mensagem devolvido por `vendedor_selecionou`.
///
/// `linguagem` também chega como `language` ou `idioma` dependendo da versão
/// do fluxo no n8n.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Template {
    pub nome: String,
    pub texto: String,
    #[serde(default)]
    pub variaveis: Vec<String>,
    #[serde(default)]
    pub botoes: Vec<String>,
    #[serde(default)]
    pub categoria: Option<String>,
    #[serde(default, alias = "language", alias = "idioma")]
    pub linguagem: Option<String>,
}

impl Template {
    pub fn lingua(&self) -> &str {
        self.linguagem.as_deref().unwrap_or("pt_BR")
    }

    /// Substitui cada `{{variavel}}` pelo valor informado (string vazia
    /// quando ausente), na ordem em que o template declara suas variáveis.
    ///
    /// A troca é busca textual literal — o nome da variável nunca é
    /// interpretado como padrão, mesmo contendo metacaracteres.
    pub fn render(&self, valores: &HashMap<String, String>) -> String {
        let mut texto = self.texto.clone();
        for variavel in &self.variaveis {
            let valor = valores.get(variavel).map(String::as_str).unwrap_or("");
            let marcador = format!("{{{{{}}}}}", variavel);
            texto = texto.replace(&marcador, valor);
        }
        texto
    }

    /// Mensagem final enviada ao cliente: texto resolvido seguido das
    /// legendas dos botões, uma por linha.
    pub fn mensagem_completa(&self, valores: &HashMap<String, String>) -> String {
        let mut mensagem = self.render(valores);
        if !self.botoes.is_empty() {
            mensagem.push_str("\n\n");
            mensagem.push_str(&self.botoes.join("\n"));
        }
        mensagem
    }
}
