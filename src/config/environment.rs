//! Configuração de variáveis de ambiente
//!
//! Este módulo concentra a configuração do cliente: URL base da API,
//! token de acesso opcional e parâmetros de exibição.

use std::env;

/// URL usada quando API_BASE_URL não está definida.
const URL_BASE_PADRAO: &str = "https://192.168.88.26:3001";

/// Configuração do ambiente
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub api_base_url: String,
    pub access_token: Option<String>,
    pub timeout_secs: u64,
    pub itens_por_pagina: usize,
}

impl EnvironmentConfig {
    /// Carrega a configuração do ambiente, com padrões de cliente quando a
    /// variável não está definida.
    pub fn from_env() -> Self {
        Self {
            api_base_url: env::var("API_BASE_URL")
                .unwrap_or_else(|_| URL_BASE_PADRAO.to_string()),
            access_token: env::var("ACCESS_TOKEN").ok().filter(|t| !t.is_empty()),
            timeout_secs: env::var("API_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
            itens_por_pagina: env::var("ITENS_POR_PAGINA")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
        }
    }

    /// Troca a URL base (equivalente ao ajuste dinâmico do cliente HTTP).
    pub fn com_base_url(mut self, url: String) -> Self {
        self.api_base_url = url;
        self
    }
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
