//! Estado do formulário de pesquisa
//!
//! Este módulo define os filtros preenchidos pelo usuário antes da
//! montagem do payload, com a validação de formato de cada campo de lista.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::utils::errors::{erro_validacao, AppError, AppResult};
use crate::utils::validation;

/// Nível de detalhe da consulta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TipoResultado {
    #[default]
    Simples,
    Completo,
}

impl fmt::Display for TipoResultado {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TipoResultado::Simples => write!(f, "simples"),
            TipoResultado::Completo => write!(f, "completo"),
        }
    }
}

impl std::str::FromStr for TipoResultado {
    type Err = AppError;

    fn from_str(valor: &str) -> Result<Self, Self::Err> {
        match valor.to_lowercase().as_str() {
            "simples" => Ok(TipoResultado::Simples),
            "completo" => Ok(TipoResultado::Completo),
            _ => Err(erro_validacao(
                "tipo_resultado",
                "tipo de resultado desconhecido",
            )),
        }
    }
}

/// Situação cadastral da empresa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SituacaoCadastral {
    Ativa,
    Baixada,
    Inapta,
    Suspensa,
    Nula,
}

impl fmt::Display for SituacaoCadastral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let nome = match self {
            SituacaoCadastral::Ativa => "ativa",
            SituacaoCadastral::Baixada => "baixada",
            SituacaoCadastral::Inapta => "inapta",
            SituacaoCadastral::Suspensa => "suspensa",
            SituacaoCadastral::Nula => "nula",
        };
        write!(f, "{}", nome)
    }
}

impl std::str::FromStr for SituacaoCadastral {
    type Err = AppError;

    fn from_str(valor: &str) -> Result<Self, Self::Err> {
        match valor.to_lowercase().as_str() {
            "ativa" => Ok(SituacaoCadastral::Ativa),
            "baixada" => Ok(SituacaoCadastral::Baixada),
            "inapta" => Ok(SituacaoCadastral::Inapta),
            "suspensa" => Ok(SituacaoCadastral::Suspensa),
            "nula" => Ok(SituacaoCadastral::Nula),
            _ => Err(erro_validacao(
                "situacao_cadastral",
                "situação cadastral desconhecida",
            )),
        }
    }
}

/// Campos de lista do formulário (tags adicionadas uma a uma).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CampoLista {
    AtividadePrincipal,
    NaturezaJuridica,
    Uf,
    Municipio,
    Bairro,
    Cep,
    Ddd,
}

/// Filtros da pesquisa de CNPJs.
///
/// Todos os campos de lista começam vazios, os interruptores desligados e o
/// limite em "50".
#[derive(Debug, Clone, PartialEq)]
pub struct FiltrosPesquisa {
    pub tipo_resultado: TipoResultado,
    pub razao_social: String,
    pub atividade_principal: Vec<String>,
    pub natureza_juridica: Vec<String>,
    pub situacao_cadastral: Option<SituacaoCadastral>,
    pub uf: Vec<String>,
    pub municipio: Vec<String>,
    pub bairro: Vec<String>,
    pub cep: Vec<String>,
    pub ddd: Vec<String>,
    pub abertura_de: Option<NaiveDate>,
    pub abertura_ate: Option<NaiveDate>,
    pub capital_de: String,
    pub capital_ate: String,
    pub somente_mei: bool,
    pub excluir_mei: bool,
    pub somente_matriz: bool,
    pub somente_filial: bool,
    pub com_telefone: bool,
    pub somente_fixo: bool,
    pub somente_celular: bool,
    pub com_email: bool,
    pub limite: String,
}

impl Default for FiltrosPesquisa {
    fn default() -> Self {
        Self {
            tipo_resultado: TipoResultado::Simples,
            razao_social: String::new(),
            atividade_principal: Vec::new(),
            natureza_juridica: Vec::new(),
            situacao_cadastral: None,
            uf: Vec::new(),
            municipio: Vec::new(),
            bairro: Vec::new(),
            cep: Vec::new(),
            ddd: Vec::new(),
            abertura_de: None,
            abertura_ate: None,
            capital_de: String::new(),
            capital_ate: String::new(),
            somente_mei: false,
            excluir_mei: false,
            somente_matriz: false,
            somente_filial: false,
            com_telefone: false,
            somente_fixo: false,
            somente_celular: false,
            com_email: false,
            limite: "50".to_string(),
        }
    }
}

impl FiltrosPesquisa {
    fn lista_mut(&mut self, campo: CampoLista) -> &mut Vec<String> {
        match campo {
            CampoLista::AtividadePrincipal => &mut self.atividade_principal,
            CampoLista::NaturezaJuridica => &mut self.natureza_juridica,
            CampoLista::Uf => &mut self.uf,
            CampoLista::Municipio => &mut self.municipio,
            CampoLista::Bairro => &mut self.bairro,
            CampoLista::Cep => &mut self.cep,
            CampoLista::Ddd => &mut self.ddd,
        }
    }

    fn validar_item(campo: CampoLista, valor: &str) -> Result<(), validator::ValidationError> {
        match campo {
            CampoLista::AtividadePrincipal | CampoLista::NaturezaJuridica => {
                validation::validar_codigo(valor)
            }
            CampoLista::Uf => validation::validar_uf(valor),
            CampoLista::Municipio | CampoLista::Bairro => validation::validar_localidade(valor),
            CampoLista::Cep => validation::validar_cep(valor),
            CampoLista::Ddd => validation::validar_ddd(valor),
        }
    }

    /// Adiciona um item a um campo de lista, recusando valor vazio, formato
    /// inválido ou item duplicado.
    pub fn adicionar_item(&mut self, campo: CampoLista, valor: &str) -> AppResult<()> {
        let valor = valor.trim();
        if valor.is_empty() || Self::validar_item(campo, valor).is_err() {
            return Err(erro_validacao(
                "item",
                "O valor do item está vazio ou não é valido para o campo",
            ));
        }
        let lista = self.lista_mut(campo);
        if lista.iter().any(|item| item == valor) {
            return Err(erro_validacao("item", "Este item já está na lista."));
        }
        lista.push(valor.to_string());
        Ok(())
    }

    /// Remove um item de um campo de lista, se presente.
    pub fn remover_item(&mut self, campo: CampoLista, valor: &str) {
        self.lista_mut(campo).retain(|item| item != valor);
    }
}
