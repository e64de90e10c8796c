//! Serviço de autenticação
//!
//! Login, logout e verificação de sessão. A sessão vive em cookie; a
//! verificação nunca devolve erro, apenas "não autenticado".

use serde_json::json;
use std::sync::Arc;

use crate::client::ApiClient;
use crate::models::usuario::RespostaSessao;
use crate::utils::errors::AppResult;

/// Serviço dos endpoints de sessão
pub struct AuthService {
    client: Arc<ApiClient>,
}

impl AuthService {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Autentica e deixa o cookie de sessão no cliente HTTP.
    pub async fn login(&self, email: &str, senha: &str) -> AppResult<()> {
        self.client
            .post_vazio("/login", &json!({ "email": email, "password": senha }))
            .await
    }

    pub async fn logout(&self) -> AppResult<()> {
        self.client.post_vazio("/logout", &json!({})).await
    }

    /// Verifica se há sessão ativa no servidor. Falha de rede ou resposta
    /// inesperada contam como não autenticado.
    pub async fn verificar_sessao(&self) -> RespostaSessao {
        match self.client.get_json::<RespostaSessao>("/session").await {
            Ok(sessao) => sessao,
            Err(erro) => {
                log::warn!("Sessão não verificada: {}", erro);
                RespostaSessao::default()
            }
        }
    }

    /// Pede o e-mail de recuperação de senha.
    pub async fn solicitar_recuperacao(&self, email: &str) -> AppResult<()> {
        self.client
            .post_vazio("/password/request", &json!({ "email": email }))
            .await
    }

    /// Redefine a senha com o token recebido por e-mail.
    pub async fn redefinir_senha(&self, email: &str, nova_senha: &str, token: &str) -> AppResult<()> {
        let caminho = format!("/password/reset?token={}", urlencoding::encode(token));
        self.client
            .post_vazio(&caminho, &json!({ "email": email, "newPassword": nova_senha }))
            .await
    }
}
