//! Sistema de manejo de erros
//!
//! Este módulo define os tipos de erro da aplicação e a extração da
//! mensagem apresentada ao usuário.

use thiserror::Error;

/// Mensagem genérica quando o backend não fornece uma causa.
pub const MENSAGEM_PADRAO: &str = "Não foi possível processar sua solicitação.";

/// Erros principais da aplicação
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Erro de rede: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{mensagem}")]
    Api { status: u16, mensagem: String },

    #[error("Erro de validação: {0}")]
    Validacao(#[from] validator::ValidationErrors),

    #[error("Erro de configuração: {0}")]
    Configuracao(String),
}

impl AppError {
    /// Mensagem exibida ao usuário: a do backend quando existir, senão a
    /// genérica.
    pub fn mensagem_usuario(&self) -> String {
        match self {
            AppError::Api { mensagem, .. } if !mensagem.is_empty() => mensagem.clone(),
            AppError::Validacao(erros) => erros.to_string(),
            _ => MENSAGEM_PADRAO.to_string(),
        }
    }
}

/// Resultado tipado para operações que podem falhar
pub type AppResult<T> = Result<T, AppError>;

/// Helper para erros de validação de um campo do formulário
pub fn erro_validacao(campo: &'static str, mensagem: &'static str) -> AppError {
    use validator::ValidationError;

    let mut erro = ValidationError::new("campo");
    erro.add_param("mensagem".into(), &mensagem);

    let mut erros = validator::ValidationErrors::new();
    erros.add(campo, erro);

    AppError::Validacao(erros)
}
