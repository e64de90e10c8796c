//! Usuário e sessão
//!
//! Modelos da sessão autenticada e do saldo de consultas.

use serde::{Deserialize, Serialize};

/// Usuário retornado pela verificação de sessão.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Usuario {
    #[serde(rename = "name")]
    pub nome: String,
    pub email: String,
    #[serde(rename = "isAdmin", default)]
    pub admin: bool,
    #[serde(rename = "plan", default)]
    pub plano: String,
    #[serde(rename = "maxQueries", default)]
    pub max_consultas: u64,
    #[serde(default)]
    pub services: Vec<String>,
}

impl Usuario {
    /// Acesso à base MEI contratado no plano.
    pub fn acesso_mei(&self) -> bool {
        self.services.iter().any(|s| s == "mei")
    }

    /// Acesso à base CNPJ contratado no plano.
    pub fn acesso_cnpj(&self) -> bool {
        self.services.iter().any(|s| s == "cnpj")
    }
}

/// Resposta de GET /session.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RespostaSessao {
    #[serde(default)]
    pub authenticated: bool,
    #[serde(rename = "userData")]
    pub user_data: Option<Usuario>,
}

/// Resposta de GET /cnpj-query/balance.
#[derive(Debug, Clone, Deserialize)]
pub struct RespostaSaldo {
    pub message: Saldo,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Saldo {
    pub total_balance: f64,
}
