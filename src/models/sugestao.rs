//! Sugestões de autocomplete
//!
//! O endpoint de sugestões nem sempre devolve uma lista bem formada; a
//! conversão aqui é defensiva e nunca propaga erro de formato.

use serde::{Deserialize, Serialize};

/// Sugestão retornada pelos endpoints /sugestoes/*.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sugestao {
    pub id: String,
    pub nome: String,
}

impl Sugestao {
    /// Converte o corpo bruto em lista de sugestões.
    ///
    /// Qualquer coisa que não seja um array (null, objeto, string) vira
    /// lista vazia, assim como itens individuais malformados.
    pub fn lista_de_json(valor: serde_json::Value) -> Vec<Sugestao> {
        match valor {
            serde_json::Value::Array(itens) => itens
                .into_iter()
                .filter_map(|item| serde_json::from_value(item).ok())
                .collect(),
            _ => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn converte_array_valido() {
        let corpo = json!([
            { "id": "1", "nome": "Padaria Central" },
            { "id": "2", "nome": "Padaria do Bairro" }
        ]);
        let lista = Sugestao::lista_de_json(corpo);
        assert_eq!(lista.len(), 2);
        assert_eq!(lista[0].nome, "Padaria Central");
    }

    #[test]
    fn corpo_nao_array_vira_lista_vazia() {
        assert!(Sugestao::lista_de_json(json!(null)).is_empty());
        assert!(Sugestao::lista_de_json(json!({ "message": "erro" })).is_empty());
        assert!(Sugestao::lista_de_json(json!("texto")).is_empty());
    }

    #[test]
    fn itens_malformados_sao_descartados() {
        let corpo = json!([
            { "id": "1", "nome": "Padaria Central" },
            { "id": 2 },
            "texto solto"
        ]);
        let lista = Sugestao::lista_de_json(corpo);
        assert_eq!(lista.len(), 1);
    }
}
