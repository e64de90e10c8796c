//! Serviço de sugestões de autocomplete
//!
//! Endpoints /sugestoes/*; o corpo devolvido nem sempre é uma lista bem
//! formada, então a conversão é defensiva.

use std::sync::Arc;

use crate::client::ApiClient;
use crate::models::sugestao::Sugestao;
use crate::utils::errors::AppResult;

/// Tipo de sugestão consultada.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TipoSugestao {
    Empresas,
    Cnae,
    NaturezaJuridica,
}

impl TipoSugestao {
    pub fn caminho(&self) -> &'static str {
        match self {
            TipoSugestao::Empresas => "/sugestoes/empresas",
            TipoSugestao::Cnae => "/sugestoes/cnae",
            TipoSugestao::NaturezaJuridica => "/sugestoes/natureza-juridica",
        }
    }
}

impl std::str::FromStr for TipoSugestao {
    type Err = crate::utils::errors::AppError;

    fn from_str(valor: &str) -> Result<Self, Self::Err> {
        match valor {
            "empresas" => Ok(TipoSugestao::Empresas),
            "cnae" => Ok(TipoSugestao::Cnae),
            "natureza-juridica" => Ok(TipoSugestao::NaturezaJuridica),
            _ => Err(crate::utils::errors::erro_validacao(
                "tipo",
                "tipo de sugestão desconhecido",
            )),
        }
    }
}

/// Serviço dos endpoints /sugestoes/*
pub struct SugestaoService {
    client: Arc<ApiClient>,
}

impl SugestaoService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Busca sugestões para o texto digitado. Consulta vazia não vai à rede;
    /// corpo que não seja uma lista vira lista vazia.
    pub async fn buscar(&self, tipo: TipoSugestao, consulta: &str) -> AppResult<Vec<Sugestao>> {
        if consulta.is_empty() {
            return Ok(Vec::new());
        }
        let caminho = format!("{}?q={}", tipo.caminho(), urlencoding::encode(consulta));
        let corpo: serde_json::Value = self.client.get_json(&caminho).await?;
        Ok(Sugestao::lista_de_json(corpo))
    }
}
