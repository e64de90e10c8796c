//! Registros de resultado
//!
//! Este módulo define o envelope retornado pela consulta de CNPJs e o
//! registro de exibição usado pela tabela de resultados e pela lista de
//! documentos do usuário.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::utils::validation::formatar_data_br;

/// Texto usado quando a razão social não vem preenchida.
pub const NOME_NAO_INFORMADO: &str = "Nome não informado";

/// Registro bruto de CNPJ como chega do backend.
///
/// A consulta "completo" traz campos adicionais (endereço, porte, quadro
/// societário...); eles ficam em `detalhes` e alimentam a visão de detalhe
/// do registro.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CnpjBruto {
    pub cnpj: String,
    pub razao_social: Option<String>,
    pub data_abertura: Option<String>,
    #[serde(flatten)]
    pub detalhes: serde_json::Map<String, serde_json::Value>,
}

/// Corpo da resposta da consulta.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DadosResposta {
    #[serde(default)]
    pub cnpjs: Vec<CnpjBruto>,
}

/// Envelope da resposta da consulta de CNPJs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RespostaConsulta {
    #[serde(rename = "responseData")]
    pub response_data: Option<DadosResposta>,
}

impl RespostaConsulta {
    /// Lista de CNPJs da resposta; envelope incompleto vira lista vazia.
    pub fn cnpjs(self) -> Vec<CnpjBruto> {
        self.response_data.map(|dados| dados.cnpjs).unwrap_or_default()
    }
}

/// Registro formatado para exibição na tabela de resultados.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegistroArquivo {
    pub id: String,
    pub nome: String,
    pub ultima_modificacao: String,
    pub data: String,
    pub tipo: String,
    pub url: String,
    /// Campos extras do resultado completo, exibidos na visão de detalhe.
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub detalhes: serde_json::Map<String, serde_json::Value>,
}

impl From<CnpjBruto> for RegistroArquivo {
    fn from(bruto: CnpjBruto) -> Self {
        let data = bruto
            .data_abertura
            .as_deref()
            .and_then(|texto| NaiveDate::parse_from_str(texto, "%Y-%m-%d").ok())
            .map(|data| formatar_data_br(&data))
            .unwrap_or_else(|| "-".to_string());

        Self {
            id: bruto.cnpj,
            nome: bruto
                .razao_social
                .filter(|nome| !nome.is_empty())
                .unwrap_or_else(|| NOME_NAO_INFORMADO.to_string()),
            ultima_modificacao: Local::now().date_naive().format("%d/%m/%Y").to_string(),
            data,
            tipo: "cnpj".to_string(),
            url: String::new(),
            detalhes: bruto.detalhes,
        }
    }
}

/// Documento do usuário como chega de GET /user/documents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentoApi {
    pub id: String,
    #[serde(rename = "name")]
    pub nome: String,
    #[serde(rename = "lastModified")]
    pub ultima_modificacao: String,
    #[serde(rename = "date")]
    pub data: String,
    pub url: String,
    #[serde(rename = "type")]
    pub tipo: String,
}

impl From<DocumentoApi> for RegistroArquivo {
    fn from(doc: DocumentoApi) -> Self {
        Self {
            id: doc.id,
            nome: doc.nome,
            ultima_modificacao: doc.ultima_modificacao,
            data: doc.data,
            tipo: doc.tipo,
            url: doc.url,
            detalhes: serde_json::Map::new(),
        }
    }
}
