//! Payload do envio de resultados por e-mail
//!
//! A pesquisa enviada por e-mail reaproveita o payload de consulta; o
//! resultado chega fora da aplicação, nos endereços informados.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::dto::consulta_dto::ConsultaPayload;
use crate::models::filtros::FiltrosPesquisa;
use crate::utils::errors::{erro_validacao, AppResult};
use crate::utils::validation::converter_limite;

/// Formato do arquivo gerado pelo backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatoArquivo {
    #[default]
    Csv,
    Xlsx,
}

impl fmt::Display for FormatoArquivo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatoArquivo::Csv => write!(f, "csv"),
            FormatoArquivo::Xlsx => write!(f, "xlsx"),
        }
    }
}

impl std::str::FromStr for FormatoArquivo {
    type Err = crate::utils::errors::AppError;

    fn from_str(valor: &str) -> Result<Self, Self::Err> {
        match valor.to_lowercase().as_str() {
            "csv" => Ok(FormatoArquivo::Csv),
            "xlsx" => Ok(FormatoArquivo::Xlsx),
            _ => Err(erro_validacao("tipo", "formato de arquivo desconhecido")),
        }
    }
}

/// Dados preenchidos no diálogo de envio.
#[derive(Debug, Clone, PartialEq)]
pub struct DetalhesEnvio {
    pub nome: String,
    pub enviar_para: Vec<String>,
    pub tipo: FormatoArquivo,
}

impl DetalhesEnvio {
    /// Valida o nome do arquivo e a lista de e-mails separados por vírgula.
    pub fn novo(nome: &str, emails: &str, tipo: FormatoArquivo) -> AppResult<Self> {
        if nome.trim().is_empty() {
            return Err(erro_validacao(
                "nome",
                "Por favor, insira um nome para o arquivo.",
            ));
        }
        let enviar_para: Vec<String> = emails
            .split(',')
            .map(|email| email.trim().to_string())
            .filter(|email| !email.is_empty())
            .collect();
        if enviar_para.is_empty() {
            return Err(erro_validacao(
                "enviar_para",
                "Por favor, insira pelo menos um e-mail válido.",
            ));
        }
        Ok(Self {
            nome: nome.trim().to_string(),
            enviar_para,
            tipo,
        })
    }
}

/// Corpo de POST /cnpj-query/send-email.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvioEmailPayload {
    pub total_linhas: u32,
    pub nome: String,
    pub tipo: FormatoArquivo,
    pub enviar_para: Vec<String>,
    pub pesquisa: ConsultaPayload,
}

impl EnvioEmailPayload {
    pub fn montar(filtros: &FiltrosPesquisa, detalhes: &DetalhesEnvio) -> Self {
        Self {
            total_linhas: converter_limite(&filtros.limite),
            nome: detalhes.nome.clone(),
            tipo: detalhes.tipo,
            enviar_para: detalhes.enviar_para.clone(),
            pesquisa: ConsultaPayload::montar(filtros),
        }
    }
}
